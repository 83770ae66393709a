use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SgitError};
use crate::store::DEFAULT_VERSION_FILE;

/// Name of the per-repository configuration file
pub const REPO_CONFIG_FILE: &str = "sgit.toml";

/// Represents the complete configuration for sgit.
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Version file name, relative to the repository root
    #[serde(default = "default_version_file")]
    pub version_file: String,

    #[serde(default)]
    pub push: PushConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_version_file() -> String {
    DEFAULT_VERSION_FILE.to_string()
}

/// Where pushes go.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PushConfig {
    /// Push `HEAD` to this remote; `None` uses the branch's upstream
    #[serde(default)]
    pub remote: Option<String>,
}

/// Runtime behavior switches.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Unstage everything before staging the selected files
    #[serde(default = "default_true")]
    pub reset_index: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig { reset_index: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_file: default_version_file(),
            push: PushConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `sgit.toml` at the repository root
/// 3. `.sgit.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_root` - Repository root to look for `sgit.toml` in
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, repo_root: &Path) -> Result<Config> {
    match find_config(config_path, repo_root) {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

fn find_config(config_path: Option<&Path>, repo_root: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let in_repo = repo_root.join(REPO_CONFIG_FILE);
    if in_repo.exists() {
        return Some(in_repo);
    }

    dirs::config_dir()
        .map(|dir| dir.join(".sgit.toml"))
        .filter(|path| path.exists())
}

fn load_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SgitError::config(format!("cannot read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&contents)
        .map_err(|e| SgitError::config(format!("{}: {}", path.display(), e)))?;

    if config.version_file.trim().is_empty() {
        return Err(SgitError::config(format!(
            "{}: version_file must not be empty",
            path.display()
        )));
    }

    Ok(config)
}
