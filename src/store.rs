//! Persistence of the version counter.
//!
//! The file holds exactly `MM.mm.pp`. Writes happen immediately and are not
//! undone if a later git step fails.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::domain::Version;
use crate::error::{Result, SgitError};

/// Default version file name at the repository root
pub const DEFAULT_VERSION_FILE: &str = "sgit.version";

/// Reads and writes the version file
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        VersionStore { path: path.into() }
    }

    /// Store for `file_name` under the repository root
    pub fn in_repo(root: &Path, file_name: &str) -> Self {
        VersionStore::new(root.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the stored version, or `00.00.00` when the file does not exist.
    ///
    /// # Returns
    /// * `Ok(Version)` - The stored version (or the first-run default)
    /// * `Err(SgitError::VersionFile)` - If the file exists but is malformed or not UTF-8
    /// * `Err(SgitError::Io)` - If the file exists but cannot be read
    pub fn load(&self) -> Result<Version> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found, starting at 00.00.00", self.path.display());
                return Ok(Version::default());
            }
            Err(e) => return Err(e.into()),
        };

        let contents = String::from_utf8(bytes).map_err(|e| {
            SgitError::version_file(&self.path, format!("not valid UTF-8: {}", e))
        })?;

        Version::parse(&contents).map_err(|reason| SgitError::version_file(&self.path, reason))
    }

    /// Overwrite the file with the zero-padded serialization
    pub fn save(&self, version: &Version) -> Result<()> {
        fs::write(&self.path, version.to_string())?;
        debug!("wrote {} to {}", version, self.path.display());
        Ok(())
    }
}
