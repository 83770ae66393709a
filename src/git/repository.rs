use std::path::{Path, PathBuf};

use git2::Repository;
use log::debug;

use crate::error::Result;

/// Find the working-tree root of the repository containing `start`.
///
/// # Returns
/// * `Ok(PathBuf)` - Root directory of the working tree
/// * `Err(SgitError::Git)` - If `start` is not inside a repository, or the
///   repository is bare
pub fn discover_root(start: &Path) -> Result<PathBuf> {
    let repo = Repository::discover(start)?;

    let root = repo
        .workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| git2::Error::from_str("bare repository has no working tree"))?;

    debug!("repository root: {}", root.display());
    Ok(root)
}
