use crate::error::{ArcPubError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_REMOTE: &str = "origin";

/// Wrapper over the `git` binary for one working copy. Every operation is
/// blocking; failures carry the command line and the tool's stderr verbatim.
#[derive(Debug, Clone)]
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Create the directory if needed and `git init` it with the given
    /// initial branch.
    pub fn init(path: &Path, default_branch: &str) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        let repo = Self {
            workdir: path.to_path_buf(),
        };
        repo.run(&["init", "--initial-branch", default_branch])?;
        Ok(repo)
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.run(&["remote", "add", name, url]).map(drop)
    }

    pub fn fetch(&self, remote: &str) -> Result<()> {
        self.run(&["fetch", remote]).map(drop)
    }

    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch]).map(drop)
    }

    pub fn stage_all(&self) -> Result<()> {
        self.run(&["add", "-A"]).map(drop)
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).map(drop)
    }

    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", remote, branch]).map(drop)
    }

    /// Set a repo-local config value (e.g. `user.name` for commit identity).
    pub fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", key, value]).map(drop)
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?;
        if !output.status.success() {
            return Err(ArcPubError::Git {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
