use crate::error::{ArcPubError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = ".config.yml";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Process-wide configuration, loaded once at startup and passed explicitly
/// to the components that need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gitlab: GitLabConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabConfig {
    /// Base URL of the GitLab host, e.g. `https://gitlab.example.org`.
    pub url: String,
    /// Opaque credential for the `PRIVATE-TOKEN` header.
    pub private_token: String,
    /// Numeric namespace id to create projects under. Absent means the
    /// token owner's personal namespace.
    #[serde(default)]
    pub namespace: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
    /// Publish only the first N dataset items. Absent means all of them.
    #[serde(default)]
    pub take: Option<usize>,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("/data/edal.json")
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            take: None,
        }
    }
}

impl Config {
    /// Read configuration from a YAML file. Failures here are fatal and
    /// happen before any network or filesystem activity.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ArcPubError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Config = serde_yaml::from_str(&data)
            .map_err(|e| ArcPubError::Config(format!("malformed {}: {e}", path.display())))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(".config.yml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "gitlab:\n  url: https://gitlab.example.org\n  private_token: glpat-abc\n  namespace: 42\ndataset:\n  path: /data/edal.json\n  take: 3\n",
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.gitlab.url, "https://gitlab.example.org");
        assert_eq!(config.gitlab.namespace, Some(42));
        assert_eq!(config.dataset.take, Some(3));
    }

    #[test]
    fn namespace_and_dataset_section_are_optional() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "gitlab:\n  url: https://gitlab.example.org\n  private_token: glpat-abc\n",
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.gitlab.namespace, None);
        assert_eq!(config.dataset.path, PathBuf::from("/data/edal.json"));
        assert_eq!(config.dataset.take, None);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load(Path::new("/nonexistent/.config.yml")).unwrap_err();
        assert!(matches!(err, ArcPubError::Config(_)));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "gitlab: [not, a, mapping");
        assert!(matches!(Config::load(&path), Err(ArcPubError::Config(_))));
    }
}
