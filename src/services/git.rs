//! Git service for the engine repository.
//!
//! Uses the git CLI via [`CommandRunner`]; nothing here touches the object store directly.

use super::CommandRunner;
use crate::domain::CommandSpec;
use crate::error::{ToolError, ToolResult};
use std::path::Path;

/// Git service for cloning and checking the engine source
#[derive(Debug, Clone)]
pub struct GitService {
    program: String,
}

impl GitService {
    /// Create a new GitService invoking `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.program)
    }

    /// Build `git --version`
    pub fn version_command(&self) -> CommandSpec {
        self.command().arg("--version")
    }

    /// Build `git lfs --version`
    pub fn lfs_version_command(&self) -> CommandSpec {
        self.command().args(["lfs", "--version"])
    }

    /// Build `git lfs install`
    pub fn lfs_install_command(&self) -> CommandSpec {
        self.command().args(["lfs", "install"])
    }

    /// Build `git clone <url> <destination>`
    pub fn clone_command(&self, url: &str, destination: &Path) -> CommandSpec {
        self.command().arg("clone").arg(url).path_arg(destination)
    }

    /// Build `git lfs pull`, run inside `repo`
    pub fn lfs_pull_command(&self, repo: &Path) -> CommandSpec {
        self.command().args(["lfs", "pull"]).current_dir(repo)
    }

    /// Build `git remote get-url <remote>`, run inside `repo`
    pub fn remote_url_command(&self, repo: &Path, remote: &str) -> CommandSpec {
        self.command()
            .args(["remote", "get-url", remote])
            .current_dir(repo)
    }

    /// `git --version` output, e.g. `git version 2.43.0`
    pub fn version(&self, runner: &mut dyn CommandRunner) -> ToolResult<String> {
        runner.capture(&self.version_command())
    }

    /// `git lfs --version` output
    pub fn lfs_version(&self, runner: &mut dyn CommandRunner) -> ToolResult<String> {
        runner.capture(&self.lfs_version_command())
    }

    /// Install the LFS hooks for the current user
    pub fn lfs_install(&self, runner: &mut dyn CommandRunner) -> ToolResult<()> {
        runner.run(&self.lfs_install_command())
    }

    /// Clone `url` into `destination`
    pub fn clone_repository(
        &self,
        runner: &mut dyn CommandRunner,
        url: &str,
        destination: &Path,
    ) -> ToolResult<()> {
        runner.run(&self.clone_command(url, destination))
    }

    /// Download the large-file payloads of an existing clone
    pub fn fetch_large_files(&self, runner: &mut dyn CommandRunner, repo: &Path) -> ToolResult<()> {
        runner.run(&self.lfs_pull_command(repo))
    }

    /// Get the URL configured for `remote` in `repo`
    pub fn remote_url(
        &self,
        runner: &mut dyn CommandRunner,
        repo: &Path,
        remote: &str,
    ) -> ToolResult<String> {
        runner.capture(&self.remote_url_command(repo, remote))
    }

    /// Check that `repo` is a clone whose `remote` points at `expected_url`
    pub fn verify_repository(
        &self,
        runner: &mut dyn CommandRunner,
        repo: &Path,
        remote: &str,
        expected_url: &str,
    ) -> ToolResult<()> {
        // .git is a file in worktrees, a directory otherwise
        if !repo.join(".git").exists() {
            return Err(ToolError::NotARepository(repo.to_path_buf()));
        }

        let found = self.remote_url(runner, repo, remote)?;
        if normalize_remote_url(&found) != normalize_remote_url(expected_url) {
            return Err(ToolError::RemoteMismatch {
                expected: expected_url.to_string(),
                found,
            });
        }
        Ok(())
    }
}

/// Compare-friendly form of a remote URL: no trailing `/` or `.git`, lower-case
pub fn normalize_remote_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix(".git")
        .unwrap_or(trimmed)
        .to_ascii_lowercase()
}
