use std::sync::Mutex;

use crate::error::{Result, SgitError};
use crate::git::{GitClient, GitOutput};

/// A git invocation recorded by [MockGit]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Status,
    Reset,
    Stage(Vec<String>),
    Commit(String),
    Push(Option<String>),
}

/// Mock git client for testing without a git binary.
///
/// Every operation succeeds unless a failure is scripted for it. Calls are
/// recorded in order.
pub struct MockGit {
    status: GitOutput,
    reset: GitOutput,
    stage: GitOutput,
    commit: GitOutput,
    push: GitOutput,
    missing: bool,
    calls: Mutex<Vec<GitCall>>,
}

impl MockGit {
    /// Create a mock with a clean working tree
    pub fn new() -> Self {
        MockGit {
            status: GitOutput::ok(""),
            reset: GitOutput::ok(""),
            stage: GitOutput::ok(""),
            commit: GitOutput::ok(""),
            push: GitOutput::ok(""),
            missing: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose status query returns `porcelain`
    pub fn with_status(porcelain: impl Into<Vec<u8>>) -> Self {
        let mut mock = MockGit::new();
        mock.status = GitOutput::ok(porcelain);
        mock
    }

    /// Behave as if the git executable cannot be run
    pub fn missing_binary(mut self) -> Self {
        self.missing = true;
        self
    }

    pub fn fail_reset(mut self, stderr: &str) -> Self {
        self.reset = GitOutput::failed(128, stderr);
        self
    }

    pub fn fail_stage(mut self, stderr: &str) -> Self {
        self.stage = GitOutput::failed(128, stderr);
        self
    }

    pub fn fail_commit(mut self, stderr: &str) -> Self {
        self.commit = GitOutput::failed(1, stderr);
        self
    }

    pub fn fail_push(mut self, stderr: &str) -> Self {
        self.push = GitOutput::failed(128, stderr);
        self
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Paths passed to the last stage call
    pub fn staged_paths(&self) -> Option<Vec<String>> {
        self.calls().into_iter().rev().find_map(|call| match call {
            GitCall::Stage(paths) => Some(paths),
            _ => None,
        })
    }

    /// Message passed to the last commit call
    pub fn committed_message(&self) -> Option<String> {
        self.calls().into_iter().rev().find_map(|call| match call {
            GitCall::Commit(message) => Some(message),
            _ => None,
        })
    }

    fn record(&self, call: GitCall, output: &GitOutput) -> Result<GitOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.missing {
            return Err(SgitError::GitNotFound("git: No such file or directory".to_string()));
        }
        Ok(output.clone())
    }
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitClient for MockGit {
    fn status(&self) -> Result<GitOutput> {
        self.record(GitCall::Status, &self.status)
    }

    fn reset(&self) -> Result<GitOutput> {
        self.record(GitCall::Reset, &self.reset)
    }

    fn stage(&self, paths: &[String]) -> Result<GitOutput> {
        self.record(GitCall::Stage(paths.to_vec()), &self.stage)
    }

    fn commit(&self, message: &str) -> Result<GitOutput> {
        self.record(GitCall::Commit(message.to_string()), &self.commit)
    }

    fn push(&self, remote: Option<&str>) -> Result<GitOutput> {
        self.record(GitCall::Push(remote.map(str::to_string)), &self.push)
    }
}
