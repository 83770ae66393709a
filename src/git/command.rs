use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{Result, SgitError};
use crate::git::{GitClient, GitOutput};

/// Runs the `git` executable with the repository root as working directory
pub struct CommandGit {
    root: PathBuf,
    program: String,
}

impl CommandGit {
    /// Use the `git` found on the command search path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CommandGit::with_program(root, "git")
    }

    /// Use a specific executable instead of `git`
    pub fn with_program(root: impl Into<PathBuf>, program: impl Into<String>) -> Self {
        CommandGit {
            root: root.into(),
            program: program.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run(&self, args: &[&str]) -> Result<GitOutput> {
        debug!("running {} {:?} in {}", self.program, args, self.root.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| SgitError::GitNotFound(format!("{}: {}", self.program, e)))?;

        let result = GitOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!("{} {:?} exited with {:?}", self.program, args, result.code);
        Ok(result)
    }
}

impl GitClient for CommandGit {
    fn status(&self) -> Result<GitOutput> {
        self.run(&["status", "--porcelain=v1", "-z", "--untracked-files=all"])
    }

    fn reset(&self) -> Result<GitOutput> {
        self.run(&["reset", "--quiet"])
    }

    fn stage(&self, paths: &[String]) -> Result<GitOutput> {
        let mut args = vec!["add", "-A", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args)
    }

    fn commit(&self, message: &str) -> Result<GitOutput> {
        self.run(&["commit", "-m", message])
    }

    fn push(&self, remote: Option<&str>) -> Result<GitOutput> {
        match remote {
            Some(remote) => self.run(&["push", remote, "HEAD"]),
            None => self.run(&["push"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::change::parse_porcelain;
    use crate::domain::ChangeStatus;
    use std::fs;
    use tempfile::TempDir;

    /// Fresh repository with a local identity and one commit of `files`
    fn init_repo(files: &[&str]) -> (TempDir, CommandGit) {
        let dir = TempDir::new().unwrap();
        let git = CommandGit::new(dir.path());

        for args in [
            &["init", "-q"][..],
            &["config", "user.name", "sgit test"][..],
            &["config", "user.email", "sgit@example.com"][..],
            &["config", "commit.gpgsign", "false"][..],
        ] {
            assert!(git.run(args).unwrap().success);
        }

        for file in files {
            fs::write(dir.path().join(file), format!("contents of {}\n", file)).unwrap();
        }
        assert!(git.run(&["add", "-A"]).unwrap().success);
        assert!(git.run(&["commit", "-q", "-m", "init"]).unwrap().success);

        (dir, git)
    }

    fn cached_name_status(git: &CommandGit) -> String {
        let output = git
            .run(&["diff", "--cached", "-M", "--name-status", "-z"])
            .unwrap();
        assert!(output.success);
        String::from_utf8(output.stdout).unwrap()
    }

    #[test]
    fn test_missing_program_is_git_not_found() {
        let dir = TempDir::new().unwrap();
        let git = CommandGit::with_program(dir.path(), "sgit-no-such-git-binary");

        match git.status() {
            Err(SgitError::GitNotFound(msg)) => {
                assert!(msg.contains("sgit-no-such-git-binary"))
            }
            other => panic!("expected GitNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_root_is_kept() {
        let git = CommandGit::new("/tmp/repo");
        assert_eq!(git.root(), Path::new("/tmp/repo"));
    }

    #[test]
    fn test_status_keeps_spaces_and_unicode_unquoted() {
        let (dir, git) = init_repo(&["seed.txt"]);
        fs::write(dir.path().join("with space.txt"), "x").unwrap();
        fs::write(dir.path().join("ünïcödé.txt"), "x").unwrap();

        let output = git.status().unwrap();
        assert!(output.success);
        let report = parse_porcelain(&output.stdout);

        let mut paths: Vec<&str> = report.entries.iter().map(|e| e.path.as_str()).collect();
        paths.sort();
        assert_eq!(paths, vec!["with space.txt", "ünïcödé.txt"]);
        assert!(report.unreadable.is_empty());
        assert!(report
            .entries
            .iter()
            .all(|e| e.status == ChangeStatus::Untracked));
    }

    #[test]
    fn test_stage_records_deletions_and_both_sides_of_rename() {
        let (dir, git) = init_repo(&["gone.txt", "old name.txt", "kept.txt"]);
        fs::remove_file(dir.path().join("gone.txt")).unwrap();
        fs::rename(dir.path().join("old name.txt"), dir.path().join("new name.txt")).unwrap();

        // stage once so status reports the rename as a single record
        assert!(git.run(&["add", "-A"]).unwrap().success);
        let report = parse_porcelain(&git.status().unwrap().stdout);
        let renamed = report
            .entries
            .iter()
            .find(|e| e.status == ChangeStatus::Renamed)
            .unwrap();
        assert_eq!(renamed.path, "new name.txt");
        assert_eq!(renamed.original_path.as_deref(), Some("old name.txt"));

        assert!(git.reset().unwrap().success);
        assert_eq!(cached_name_status(&git), "");

        let paths: Vec<String> = report
            .entries
            .iter()
            .flat_map(|e| e.stage_paths())
            .map(str::to_string)
            .collect();
        let output = git.stage(&paths).unwrap();
        assert!(output.success, "{}", output.diagnostic());

        let staged = cached_name_status(&git);
        assert!(staged.contains("D\0gone.txt\0"), "{:?}", staged);
        assert!(
            staged.contains("R100\0old name.txt\0new name.txt\0"),
            "{:?}",
            staged
        );
        assert!(!staged.contains("kept.txt"));
    }

    #[test]
    fn test_commit_after_stage() {
        let (dir, git) = init_repo(&["a.txt"]);
        fs::write(dir.path().join("a.txt"), "changed").unwrap();

        assert!(git.stage(&["a.txt".to_string()]).unwrap().success);
        let output = git.commit("[00.00.*01] change a").unwrap();
        assert!(output.success, "{}", output.diagnostic());

        let log = git.run(&["log", "-1", "--format=%s"]).unwrap();
        assert_eq!(String::from_utf8(log.stdout).unwrap().trim(), "[00.00.*01] change a");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_file_name_is_skipped_and_rest_stages() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (dir, git) = init_repo(&["seed.txt"]);
        fs::write(dir.path().join(OsStr::from_bytes(b"caf\xe9.txt")), "x").unwrap();
        fs::write(dir.path().join("plain.txt"), "x").unwrap();

        let report = parse_porcelain(&git.status().unwrap().stdout);
        assert_eq!(report.unreadable.len(), 1);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].path, "plain.txt");

        let output = git.stage(&["plain.txt".to_string()]).unwrap();
        assert!(output.success, "{}", output.diagnostic());
        assert_eq!(cached_name_status(&git), "A\0plain.txt\0");
    }
}
