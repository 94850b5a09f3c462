//! Change publisher: stages, commits, and pushes generated pages.
//!
//! `GitPublisher` shells out to the `git` CLI. All operations are blocking.

use crate::error::{PublishError, PublishResult};
use std::path::PathBuf;
use std::process::Command;

/// Version-control capability used by the finalize phase
pub trait ChangePublisher {
    /// Stage the given paths
    fn stage(&self, paths: &[PathBuf]) -> PublishResult<()>;

    /// Commit whatever is staged
    fn commit(&self, message: &str) -> PublishResult<()>;

    /// Push the current branch to its upstream
    fn push(&self) -> PublishResult<()>;
}

/// Publishes through the git CLI
#[derive(Debug, Clone)]
pub struct GitPublisher {
    repo_path: PathBuf,
}

impl GitPublisher {
    /// Run git commands from `repo_path`
    pub fn new(repo_path: PathBuf) -> Self {
        Self { repo_path }
    }

    fn git(&self, name: &str, args: &[&str]) -> PublishResult<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|source| PublishError::Spawn {
                command: name.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            return Err(PublishError::Command {
                command: name.to_string(),
                // `git commit` with nothing staged reports on stdout
                stderr: if stderr.is_empty() { stdout } else { stderr },
            });
        }

        Ok(())
    }
}

impl ChangePublisher for GitPublisher {
    fn stage(&self, paths: &[PathBuf]) -> PublishResult<()> {
        let mut args: Vec<&str> = vec!["add", "--"];
        let owned: Vec<String> = paths.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        args.extend(owned.iter().map(String::as_str));

        self.git("add", &args)
    }

    fn commit(&self, message: &str) -> PublishResult<()> {
        self.git("commit", &["commit", "-m", message])
    }

    fn push(&self) -> PublishResult<()> {
        self.git("push", &["push"])
    }
}
