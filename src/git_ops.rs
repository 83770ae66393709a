//! Stage, commit and push as one ordered sequence.
//!
//! ```text
//! Idle -> Staged -> Committed -> Pushed
//!   |        |          |
//! StageFailed CommitFailed PushFailed
//! ```
//!
//! Each step may only run from its predecessor state. A failure halts the
//! sequence without undoing earlier steps.

use log::{info, warn};

use crate::domain::{ChangeEntry, CommitMessage};
use crate::error::{GitStep, Result, SgitError};
use crate::git::{GitClient, GitOutput};

/// Where the stage/commit/push sequence currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Idle,
    Staged,
    Committed,
    Pushed,
    StageFailed,
    CommitFailed,
    PushFailed,
}

/// Drives git through stage, commit and push
pub struct GitOperator<'a, G: GitClient + ?Sized> {
    git: &'a G,
    version_file: String,
    remote: Option<String>,
    reset_index: bool,
    state: PublishState,
}

impl<'a, G: GitClient + ?Sized> GitOperator<'a, G> {
    /// `version_file` is relative to the repository root and is staged on
    /// every run.
    pub fn new(git: &'a G, version_file: impl Into<String>) -> Self {
        GitOperator {
            git,
            version_file: version_file.into(),
            remote: None,
            reset_index: true,
            state: PublishState::Idle,
        }
    }

    /// Push to this remote instead of the branch's upstream
    pub fn with_remote(mut self, remote: Option<String>) -> Self {
        self.remote = remote;
        self
    }

    /// Whether to unstage everything before staging the selection
    pub fn with_reset_index(mut self, reset_index: bool) -> Self {
        self.reset_index = reset_index;
        self
    }

    pub fn state(&self) -> PublishState {
        self.state
    }

    /// Stage the selected entries plus the version file.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - The paths handed to git, version file last
    /// * `Err(SgitError::GitCommand)` - With step `Stage` if git rejected the add
    pub fn stage(&mut self, entries: &[&ChangeEntry]) -> Result<Vec<String>> {
        self.expect_state(PublishState::Idle, "stage")?;

        if self.reset_index {
            let reset = self.run(PublishState::StageFailed, |git| git.reset())?;
            if !reset.success {
                // a repository without commits has nothing to reset to
                warn!("could not reset the index: {}", reset.diagnostic());
            }
        }

        let paths = self.paths_for(entries);
        let output = self.run(PublishState::StageFailed, |git| git.stage(&paths))?;
        self.finish(GitStep::Stage, output, PublishState::Staged)?;

        info!("staged {} path(s)", paths.len());
        Ok(paths)
    }

    /// Commit the staged set
    pub fn commit(&mut self, message: &CommitMessage) -> Result<()> {
        self.expect_state(PublishState::Staged, "commit")?;

        let text = message.to_string();
        let output = self.run(PublishState::CommitFailed, |git| git.commit(&text))?;
        self.finish(GitStep::Commit, output, PublishState::Committed)?;

        info!("committed: {}", text);
        Ok(())
    }

    /// Push the new commit
    pub fn push(&mut self) -> Result<()> {
        self.expect_state(PublishState::Committed, "push")?;

        let remote = self.remote.clone();
        let output = self.run(PublishState::PushFailed, |git| git.push(remote.as_deref()))?;
        self.finish(GitStep::Push, output, PublishState::Pushed)?;

        info!("pushed to {}", remote.as_deref().unwrap_or("upstream"));
        Ok(())
    }

    /// Paths [GitOperator::stage] hands to git for `entries`: each distinct
    /// path once, with the version file always last.
    pub fn paths_for(&self, entries: &[&ChangeEntry]) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for path in entries.iter().flat_map(|entry| entry.stage_paths()) {
            if path != self.version_file && !paths.iter().any(|p| p == path) {
                paths.push(path.to_string());
            }
        }
        paths.push(self.version_file.clone());
        paths
    }

    fn expect_state(&self, expected: PublishState, action: &'static str) -> Result<()> {
        if self.state != expected {
            return Err(SgitError::InvalidTransition {
                from: self.state,
                action,
            });
        }
        Ok(())
    }

    /// Run one git call, moving to `failed` if git could not be run at all
    fn run<F>(&mut self, failed: PublishState, call: F) -> Result<GitOutput>
    where
        F: FnOnce(&G) -> Result<GitOutput>,
    {
        let git = self.git;
        call(git).map_err(|e| {
            self.state = failed;
            e
        })
    }

    fn finish(&mut self, step: GitStep, output: GitOutput, next: PublishState) -> Result<()> {
        if output.success {
            self.state = next;
            return Ok(());
        }

        self.state = match step {
            GitStep::Stage => PublishState::StageFailed,
            GitStep::Commit => PublishState::CommitFailed,
            GitStep::Push => PublishState::PushFailed,
        };
        Err(SgitError::GitCommand {
            step,
            detail: output.diagnostic(),
        })
    }
}
