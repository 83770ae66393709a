//! Main workflow orchestration logic
//!
//! The whole commit cycle, separated from CLI argument parsing so it can run
//! against a mock git client and scripted prompt input.

use std::io::{BufRead, Write};

use log::info;

use crate::boundary::BoundaryWarning;
use crate::changes::ChangeSetInspector;
use crate::config::Config;
use crate::domain::selection::remaining;
use crate::domain::{message, version, IncrementRequest, Version};
use crate::error::Result;
use crate::git::GitClient;
use crate::git_ops::{GitOperator, PublishState};
use crate::store::VersionStore;
use crate::ui::{self, ExclusionPrompt};

/// Arguments for the commit workflow
///
/// Mirrors the CLI flags in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Which component(s) to bump, or an explicit version
    pub request: IncrementRequest,

    /// Preview mode - don't write the version file or run git
    pub dry_run: bool,
}

/// Result of a completed workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The version written (or, in a dry run, that would be written)
    pub version: Version,

    /// Full commit message, tag and body
    pub message: String,

    /// Paths handed to git for staging
    pub staged: Vec<String>,

    /// `Pushed` after a real run, `Idle` after a dry run
    pub state: PublishState,
}

/// Main commit workflow
///
/// 1. Load the stored version and compute the next one
/// 2. List pending changes (nothing to commit aborts the run)
/// 3. Ask which changes to exclude
/// 4. Write the new version
/// 5. Stage the remaining changes plus the version file
/// 6. Ask for the message body and commit
/// 7. Push
///
/// Any failure stops the run where it happened; earlier steps are not undone.
pub fn run_workflow<G, R, W>(
    args: &WorkflowArgs,
    config: &Config,
    store: &VersionStore,
    git: &G,
    prompt: ExclusionPrompt<R, W>,
) -> Result<WorkflowResult>
where
    G: GitClient + ?Sized,
    R: BufRead,
    W: Write,
{
    if !store.exists() {
        ui::display_boundary_warning(&BoundaryWarning::NewVersionFile {
            file: config.version_file.clone(),
        });
    }

    let current = store.load()?;
    let (next, starred) = version::next(current, &args.request);
    if let Some(component) = starred {
        if current.get(component) == version::COMPONENT_MAX {
            ui::display_boundary_warning(&BoundaryWarning::ComponentAtLimit { component });
        }
    }
    info!("version {} -> {}", current, next);
    ui::display_version_change(&current, &next);

    let report = ChangeSetInspector::new(git).list()?;
    if !report.unreadable.is_empty() {
        ui::display_boundary_warning(&BoundaryWarning::UnreadablePaths {
            paths: report.unreadable,
        });
    }
    let entries = report.entries;

    let (exclusions, message_prompt) = prompt.ask(&entries)?;
    if !exclusions.ignored.is_empty() {
        ui::display_boundary_warning(&BoundaryWarning::IgnoredExclusions {
            tokens: exclusions.ignored.clone(),
        });
    }

    let selected = remaining(&entries, &exclusions.indices);
    if selected.is_empty() {
        ui::display_boundary_warning(&BoundaryWarning::OnlyVersionFile {
            file: config.version_file.clone(),
        });
    }

    let mut operator = GitOperator::new(git, config.version_file.clone())
        .with_remote(config.push.remote.clone())
        .with_reset_index(config.behavior.reset_index);

    let planned = operator.paths_for(&selected);
    print!("{}", ui::format_staged_list(&planned));

    if args.dry_run {
        let body = message_prompt.ask()?;
        let commit_message = message::build(&next, starred, body.as_deref()).to_string();
        ui::display_dry_run(&next, &planned, &commit_message);

        return Ok(WorkflowResult {
            version: next,
            message: commit_message,
            staged: planned,
            state: operator.state(),
        });
    }

    store.save(&next)?;

    let staged = operator.stage(&selected)?;
    ui::display_success(&format!("Added {} file(s) to commit", staged.len()));

    let body = message_prompt.ask()?;
    let commit_message = message::build(&next, starred, body.as_deref());

    ui::display_status(&format!("Committing with message: \"{}\"", commit_message));
    operator.commit(&commit_message)?;

    ui::display_status("Pushing to remote repository...");
    operator.push()?;

    ui::display_success(&format!("Successfully pushed with version {}", next));

    Ok(WorkflowResult {
        version: next,
        message: commit_message.to_string(),
        staged,
        state: operator.state(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SgitError;
    use crate::git::{GitCall, MockGit};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn args(request: IncrementRequest) -> WorkflowArgs {
        WorkflowArgs {
            request,
            dry_run: false,
        }
    }

    fn patch() -> IncrementRequest {
        IncrementRequest::from_flags(false, false, false, None)
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let store = VersionStore::in_repo(dir.path(), "sgit.version");
        let git = MockGit::with_status(" M a.rs\0");

        let result = run_workflow(
            &WorkflowArgs {
                request: patch(),
                dry_run: true,
            },
            &Config::default(),
            &store,
            &git,
            ExclusionPrompt::new(Cursor::new("\nhello\n"), Vec::new()),
        )
        .unwrap();

        assert_eq!(result.version, Version::new(0, 0, 1));
        assert_eq!(result.message, "[00.00.*01] hello");
        assert_eq!(result.staged, vec!["a.rs", "sgit.version"]);
        assert_eq!(result.state, PublishState::Idle);
        assert!(!store.exists());
        assert_eq!(git.calls(), vec![GitCall::Status]);
    }

    #[test]
    fn test_malformed_version_file_stops_before_git() {
        let dir = TempDir::new().unwrap();
        let store = VersionStore::in_repo(dir.path(), "sgit.version");
        std::fs::write(store.path(), "not a version").unwrap();
        let git = MockGit::with_status(" M a.rs\0");

        let err = run_workflow(
            &args(patch()),
            &Config::default(),
            &store,
            &git,
            ExclusionPrompt::new(Cursor::new("\n\n"), Vec::new()),
        )
        .unwrap_err();

        assert!(matches!(err, SgitError::VersionFile { .. }));
        assert_eq!(err.exit_code(), 4);
        assert!(git.calls().is_empty());
    }

    #[test]
    fn test_remote_from_config() {
        let dir = TempDir::new().unwrap();
        let store = VersionStore::in_repo(dir.path(), "release.txt");
        let git = MockGit::with_status("?? a.rs\0");
        let mut config = Config::default();
        config.version_file = "release.txt".to_string();
        config.push.remote = Some("upstream".to_string());
        config.behavior.reset_index = false;

        let result = run_workflow(
            &args(patch()),
            &config,
            &store,
            &git,
            ExclusionPrompt::new(Cursor::new("\nmsg\n"), Vec::new()),
        )
        .unwrap();

        assert_eq!(result.staged, vec!["a.rs", "release.txt"]);
        assert_eq!(
            git.calls(),
            vec![
                GitCall::Status,
                GitCall::Stage(vec!["a.rs".to_string(), "release.txt".to_string()]),
                GitCall::Commit("[00.00.*01] msg".to_string()),
                GitCall::Push(Some("upstream".to_string())),
            ]
        );
    }
}
