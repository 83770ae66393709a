use log::{debug, info};

use crate::domain::change::{parse_porcelain, StatusReport};
use crate::error::{Result, SgitError};
use crate::git::GitClient;

/// Lists pending changes through the git status query
pub struct ChangeSetInspector<'a, G: GitClient + ?Sized> {
    git: &'a G,
}

impl<'a, G: GitClient + ?Sized> ChangeSetInspector<'a, G> {
    pub fn new(git: &'a G) -> Self {
        ChangeSetInspector { git }
    }

    /// Numbered list of changed paths, in the order git reports them.
    ///
    /// Paths that are not valid UTF-8 cannot be passed back to git reliably,
    /// so they are left out of the list and reported separately.
    ///
    /// # Returns
    /// * `Ok(StatusReport)` - At least one listable change
    /// * `Err(SgitError::UserAbort)` - If there is nothing to commit
    /// * `Err(SgitError::GitNotFound)` - If git cannot be run
    /// * `Err(SgitError::StatusQuery)` - If git ran but the query failed
    pub fn list(&self) -> Result<StatusReport> {
        let output = self.git.status()?;
        if !output.success {
            return Err(SgitError::StatusQuery(output.diagnostic()));
        }

        let report = parse_porcelain(&output.stdout);
        debug!(
            "status reported {} change(s), {} unreadable",
            report.entries.len(),
            report.unreadable.len()
        );

        if report.entries.is_empty() {
            if !report.unreadable.is_empty() {
                return Err(SgitError::abort(format!(
                    "No changes to commit; skipped {} path(s) that are not valid UTF-8",
                    report.unreadable.len()
                )));
            }
            info!("working tree clean, nothing to commit");
            return Err(SgitError::abort("No changes to commit"));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChangeStatus;
    use crate::git::{GitCall, MockGit};

    #[test]
    fn test_list_changes() {
        let git = MockGit::with_status(" M a.rs\0?? b.rs\0");
        let entries = ChangeSetInspector::new(&git).list().unwrap().entries;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_index, 1);
        assert_eq!(entries[0].status, ChangeStatus::Modified);
        assert_eq!(entries[1].path, "b.rs");
        assert_eq!(git.calls(), vec![GitCall::Status]);
    }

    #[test]
    fn test_clean_tree_aborts() {
        let git = MockGit::new();
        let result = ChangeSetInspector::new(&git).list();
        assert!(matches!(result, Err(SgitError::UserAbort(_))));
    }

    #[test]
    fn test_non_utf8_paths_are_kept_out_of_the_list() {
        let git = MockGit::with_status(&b"?? caf\xe9.txt\0 M a.rs\0"[..]);
        let report = ChangeSetInspector::new(&git).list().unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].path, "a.rs");
        assert_eq!(report.unreadable.len(), 1);
    }

    #[test]
    fn test_only_non_utf8_paths_aborts() {
        let git = MockGit::with_status(&b"?? caf\xe9.txt\0"[..]);
        match ChangeSetInspector::new(&git).list() {
            Err(SgitError::UserAbort(reason)) => assert!(reason.contains("UTF-8")),
            other => panic!("expected UserAbort, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_git() {
        let git = MockGit::new().missing_binary();
        let result = ChangeSetInspector::new(&git).list();
        assert!(matches!(result, Err(SgitError::GitNotFound(_))));
    }
}
