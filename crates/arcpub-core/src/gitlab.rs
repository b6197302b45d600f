use crate::config::GitLabConfig;
use crate::error::{ArcPubError, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// API types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub web_url: String,
    pub path_with_namespace: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub initialize_with_readme: bool,
    pub default_branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<u64>,
}

impl CreateProject {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            visibility: Visibility::Public,
            initialize_with_readme: true,
            default_branch: "main".to_string(),
            namespace_id: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Thin blocking client for the GitLab v4 projects API. Authenticates with
/// the `PRIVATE-TOKEN` header; non-success responses (name collision, auth
/// failure, not-found) surface as [`ArcPubError::Api`] with status and body.
pub struct GitLabClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl GitLabClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &GitLabConfig) -> Self {
        Self::new(&config.url, &config.private_token)
    }

    pub fn create_project(&self, params: &CreateProject) -> Result<Project> {
        let url = format!("{}/api/v4/projects", self.base_url);
        let resp = self
            .http
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .header("Accept", "application/json")
            .json(params)
            .send()?;
        let resp = check(resp)?;
        Ok(resp.json()?)
    }

    pub fn delete_project(&self, id: u64) -> Result<()> {
        let url = format!("{}/api/v4/projects/{id}", self.base_url);
        let resp = self
            .http
            .delete(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()?;
        check(resp)?;
        Ok(())
    }

    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let url = format!("{}/api/v4/projects", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("owned", "true"), ("simple", "true")])
            .header("PRIVATE-TOKEN", &self.token)
            .header("Accept", "application/json")
            .send()?;
        let resp = check(resp)?;
        Ok(resp.json()?)
    }

    /// Clone/push URL for a project: `<base_url>/<path_with_namespace>.git`.
    pub fn remote_url(&self, project: &Project) -> String {
        format!("{}/{}.git", self.base_url, project.path_with_namespace)
    }
}

fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().unwrap_or_default();
    Err(ArcPubError::Api { status, body })
}
