//! Configuration file resolution.
//!
//! Precedence, first match wins:
//! 1. Explicit path from the caller
//! 2. `CBE_INIT_CONFIG` environment variable
//! 3. `<user config dir>/cbe-init/config.xml`
//! 4. `/etc/cbe-init/config.xml`
//!
//! Explicit and environment paths are returned as given so that a typo
//! surfaces as an I/O error instead of silently falling through.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "CBE_INIT_CONFIG";

/// Directory name under the user config dir.
pub const APP_DIR_NAME: &str = "cbe-init";

/// Configuration file name inside the app directory.
pub const CONFIG_FILE_NAME: &str = "config.xml";

/// System-wide configuration path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/cbe-init/config.xml";

/// Where a resolved path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit,
    Env,
    UserConfig,
    System,
}

/// A resolved configuration path and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// Inputs to resolution, captured up front so tests need not touch the
/// process environment.
#[derive(Debug, Clone)]
pub struct ConfigSearch {
    pub env_path: Option<PathBuf>,
    pub user_config_dir: Option<PathBuf>,
    pub system_path: PathBuf,
}

impl ConfigSearch {
    /// Capture the search inputs from the current process.
    pub fn from_env() -> Self {
        Self {
            env_path: env_path(std::env::var_os(CONFIG_ENV_VAR)),
            user_config_dir: dirs::config_dir(),
            system_path: PathBuf::from(SYSTEM_CONFIG_PATH),
        }
    }

    /// Path of the per-user configuration file, if a config dir is known.
    pub fn user_config_path(&self) -> Option<PathBuf> {
        self.user_config_dir
            .as_ref()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Apply the precedence rules.
    pub fn resolve(&self, explicit: Option<&Path>) -> Option<ConfigPaths> {
        let resolved = if let Some(path) = explicit {
            Some(ConfigPaths {
                path: path.to_path_buf(),
                source: ConfigSource::Explicit,
            })
        } else if let Some(path) = &self.env_path {
            Some(ConfigPaths {
                path: path.clone(),
                source: ConfigSource::Env,
            })
        } else if let Some(path) = self.user_config_path().filter(|p| p.is_file()) {
            Some(ConfigPaths {
                path,
                source: ConfigSource::UserConfig,
            })
        } else if self.system_path.is_file() {
            Some(ConfigPaths {
                path: self.system_path.clone(),
                source: ConfigSource::System,
            })
        } else {
            None
        };

        match &resolved {
            Some(found) => debug!(
                path = %found.path.display(),
                source = ?found.source,
                "resolved init configuration path"
            ),
            None => debug!("no init configuration file found"),
        }
        resolved
    }
}

/// Path named by the `CBE_INIT_CONFIG` value; an empty value counts as unset.
fn env_path(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Resolve the configuration path using the current process environment.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<ConfigPaths> {
    ConfigSearch::from_env().resolve(explicit)
}
