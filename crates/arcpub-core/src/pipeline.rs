use crate::config::Config;
use crate::dataset::{self, DatasetItem};
use crate::engine::{fulfill, FulfillReport};
use crate::error::Result;
use crate::git::{GitRepo, DEFAULT_BRANCH, DEFAULT_REMOTE};
use crate::gitlab::{CreateProject, GitLabClient};
use crate::package::ArcPackage;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of publishing one dataset item.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedArc {
    pub name: String,
    pub web_url: String,
    pub local_path: PathBuf,
    pub report: FulfillReport,
}

/// The full run: load dataset, then per item create the remote project,
/// initialize a local clone, materialize the ARC, commit, push. Strictly
/// sequential across items and contracts.
pub struct Pipeline {
    config: Config,
    client: GitLabClient,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let client = GitLabClient::from_config(&config.gitlab);
        Self { config, client }
    }

    /// Run the pipeline, cloning each ARC under `workdir`. Any fatal error
    /// (API, git, I/O) aborts the remaining batch; already-published items
    /// stay published.
    pub fn run(&self, workdir: &Path) -> Result<Vec<PublishedArc>> {
        let items = dataset::load(&self.config.dataset.path, self.config.dataset.take)?;
        let mut published = Vec::with_capacity(items.len());
        for item in &items {
            published.push(self.publish_item(item, workdir)?);
        }
        Ok(published)
    }

    fn publish_item(&self, item: &DatasetItem, workdir: &Path) -> Result<PublishedArc> {
        let name = item.sanitized_name();
        let package = ArcPackage::from_dataset_item(item);

        let mut params = CreateProject::new(&name, &package.description);
        params.namespace_id = self.config.gitlab.namespace;
        let project = self.client.create_project(&params)?;
        info!(name = %name, url = %project.web_url, "created remote repository");

        let local = workdir.join(&package.identifier);
        let repo = GitRepo::init(&local, DEFAULT_BRANCH)?;
        repo.add_remote(DEFAULT_REMOTE, &self.client.remote_url(&project))?;
        repo.fetch(DEFAULT_REMOTE)?;
        repo.checkout(DEFAULT_BRANCH)?;

        let contracts = package.write_contracts()?;
        let report = fulfill(repo.workdir(), &contracts)?;
        info!(
            name = %name,
            written = report.written,
            skipped = report.skipped,
            "materialized ARC"
        );

        repo.stage_all()?;
        repo.commit("Initialize ARC structure")?;
        repo.push(DEFAULT_REMOTE, DEFAULT_BRANCH)?;

        Ok(PublishedArc {
            name,
            web_url: project.web_url,
            local_path: local,
            report,
        })
    }
}
