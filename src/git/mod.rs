//! Git command abstraction layer
//!
//! The workflow talks to git only through the [GitClient] trait, so it can run
//! against a scripted fake instead of a real binary.
//!
//! - [command::CommandGit]: runs the `git` executable in the repository root
//! - [mock::MockGit]: scripted outputs and a call log, for tests
//!
//! Repository discovery lives in [repository] and uses `git2`, since it only
//! needs to read `.git` metadata and not run any command.
//!
//! ```rust
//! # use sgit::git::{GitClient, MockGit};
//! let git = MockGit::with_status(" M src/main.rs\0");
//! let output = git.status().unwrap();
//! assert!(output.success);
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::CommandGit;
pub use mock::{GitCall, MockGit};
pub use repository::discover_root;

use crate::error::Result;

/// Captured result of one git invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GitOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    /// Raw stdout; status output may carry paths that are not UTF-8
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl GitOutput {
    /// A successful invocation with the given stdout
    pub fn ok(stdout: impl Into<Vec<u8>>) -> Self {
        GitOutput {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed invocation with the given stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        GitOutput {
            success: false,
            code: Some(code),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// The text to show the operator when this invocation failed.
    ///
    /// Git prints some failures (e.g. "nothing to commit") on stdout.
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = String::from_utf8_lossy(&self.stdout);
        if !stdout.trim().is_empty() {
            return stdout.trim().to_string();
        }
        match self.code {
            Some(code) => format!("git exited with status {}", code),
            None => "git was terminated by a signal".to_string(),
        }
    }
}

/// The git operations the workflow needs.
///
/// Every method returns the captured output even when git exits non-zero;
/// `Err` is reserved for failures to run git at all
/// ([crate::error::SgitError::GitNotFound]).
pub trait GitClient: Send + Sync {
    /// Porcelain v1 status with NUL-separated records
    fn status(&self) -> Result<GitOutput>;

    /// Unstage everything, leaving the working tree untouched
    fn reset(&self) -> Result<GitOutput>;

    /// Stage the given paths, including deletions
    fn stage(&self, paths: &[String]) -> Result<GitOutput>;

    /// Commit the staged set with `message`
    fn commit(&self, message: &str) -> Result<GitOutput>;

    /// Push the current branch, to `remote` when given
    fn push(&self, remote: Option<&str>) -> Result<GitOutput>;
}
