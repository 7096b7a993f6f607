use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{BumpError, Result};
use crate::version::TaggedVersion;

/// Name of the project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "gitbump.toml";

/// Name of the per-user configuration file inside the user config directory.
pub const USER_CONFIG_FILE: &str = ".gitbump.toml";

/// Represents the complete configuration for git-bump.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote the new tag is pushed to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Version offered when the repository has no version tags yet
    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Credentials used for HTTP basic auth when pushing.
///
/// The password itself never lives in the file; only the name of the
/// environment variable that holds it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AuthConfig {
    /// Overrides git's `user.name` as the basic auth username
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default = "default_password_env")]
    pub password_env: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_initial_version() -> String {
    "v0.1.0".to_string()
}

fn default_password_env() -> String {
    "GIT_BUMP_PASSWORD".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            username: None,
            password_env: default_password_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            initial_version: default_initial_version(),
            auth: AuthConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Reads the password from the configured environment variable.
    ///
    /// Returns an empty string when the variable is unset, which leaves
    /// authentication to a credential helper or cached credentials.
    pub fn password(&self) -> String {
        std::env::var(&self.password_env).unwrap_or_default()
    }
}

impl Config {
    /// Parses configuration from a TOML string and validates it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| BumpError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.remote.trim().is_empty() {
            return Err(BumpError::config("remote must not be empty"));
        }
        TaggedVersion::parse(&self.initial_version).map_err(|e| {
            BumpError::config(format!("invalid initial_version: {}", e))
        })?;
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in current directory
/// 3. `.gitbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => discover_config_file(),
    };

    match path {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            let content = fs::read_to_string(&path).map_err(|e| {
                io::Error::new(e.kind(), format!("cannot read {}: {}", path.display(), e))
            })?;
            Config::from_toml(&content)
        }
        None => Ok(Config::default()),
    }
}

fn discover_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}
