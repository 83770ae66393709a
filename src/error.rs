use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::git_ops::PublishState;

/// The git step a command failure belongs to.
///
/// Each step leaves the repository in a different state, so the operator
/// message differs per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitStep {
    Stage,
    Commit,
    Push,
}

impl GitStep {
    /// What the repository looks like after this step failed.
    pub fn outcome(&self) -> &'static str {
        match self {
            GitStep::Stage => "Staging failed; nothing was committed",
            GitStep::Commit => {
                "Commit failed; files were staged but nothing was committed or pushed"
            }
            GitStep::Push => {
                "Push failed; the commit exists locally only and was not published"
            }
        }
    }
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GitStep::Stage => "stage",
            GitStep::Commit => "commit",
            GitStep::Push => "push",
        };
        f.write_str(name)
    }
}

/// Unified error type for sgit operations
#[derive(Error, Debug)]
pub enum SgitError {
    #[error("Version file error ({}): {reason}", .path.display())]
    VersionFile { path: PathBuf, reason: String },

    #[error("Git executable could not be invoked: {0}")]
    GitNotFound(String),

    #[error("{}: {}", .step.outcome(), .detail.trim())]
    GitCommand { step: GitStep, detail: String },

    #[error("Git status query failed: {0}")]
    StatusQuery(String),

    #[error("Aborted: {0}")]
    UserAbort(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot {action} while in state {from:?}")]
    InvalidTransition {
        from: PublishState,
        action: &'static str,
    },

    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in sgit
pub type Result<T> = std::result::Result<T, SgitError>;

impl SgitError {
    /// Create a version file error with context
    pub fn version_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SgitError::VersionFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SgitError::Config(msg.into())
    }

    /// Create an abort with the reason shown to the operator
    pub fn abort(msg: impl Into<String>) -> Self {
        SgitError::UserAbort(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// Clap keeps exit code 2 for usage errors, so the codes here start at 3.
    pub fn exit_code(&self) -> i32 {
        match self {
            SgitError::UserAbort(_) => 3,
            SgitError::VersionFile { .. } => 4,
            SgitError::GitNotFound(_) => 5,
            SgitError::GitCommand { step, .. } => match step {
                GitStep::Stage => 6,
                GitStep::Commit => 7,
                GitStep::Push => 8,
            },
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SgitError::config("bad key");
        assert_eq!(err.to_string(), "Configuration error: bad key");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SgitError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_version_file_error_names_path() {
        let err = SgitError::version_file("/repo/sgit.version", "expected MM.mm.pp");
        let msg = err.to_string();
        assert!(msg.contains("/repo/sgit.version"));
        assert!(msg.contains("expected MM.mm.pp"));
    }

    #[test]
    fn test_git_command_messages_name_the_step_outcome() {
        let stage = SgitError::GitCommand {
            step: GitStep::Stage,
            detail: "fatal: pathspec 'x' did not match\n".to_string(),
        };
        assert!(stage.to_string().starts_with("Staging failed"));
        assert!(stage.to_string().ends_with("did not match"));

        let commit = SgitError::GitCommand {
            step: GitStep::Commit,
            detail: "nothing to commit".to_string(),
        };
        assert!(commit.to_string().contains("files were staged"));

        let push = SgitError::GitCommand {
            step: GitStep::Push,
            detail: "Could not resolve host".to_string(),
        };
        let msg = push.to_string();
        assert!(msg.contains("locally only"));
        assert!(msg.contains("Could not resolve host"));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = vec![
            SgitError::abort("nothing to commit"),
            SgitError::version_file("sgit.version", "bad"),
            SgitError::GitNotFound("no such file".to_string()),
            SgitError::GitCommand {
                step: GitStep::Stage,
                detail: String::new(),
            },
            SgitError::GitCommand {
                step: GitStep::Commit,
                detail: String::new(),
            },
            SgitError::GitCommand {
                step: GitStep::Push,
                detail: String::new(),
            },
        ];

        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        assert!(codes.iter().all(|&c| c != 0 && c != 1 && c != 2));
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 6);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(GitStep::Stage.to_string(), "stage");
        assert_eq!(GitStep::Commit.to_string(), "commit");
        assert_eq!(GitStep::Push.to_string(), "push");
    }
}
