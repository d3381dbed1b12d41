//! The admin config file named by `-f`.
//!
//! ```toml
//! [client]
//! op_timeout_ms = 30000
//! connect_timeout_ms = 10000
//! max_content_length = 536870912
//!
//! [log]
//! level = "info"
//! log_dir = "/var/log/qfs"
//! rotation = "daily"
//! ```
//!
//! Both tables are optional and unknown keys are rejected.

use std::path::{Path, PathBuf};

use qfs_logging::LogConfig;
use qfs_mon_client::{InvalidConfig, MonClientConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    pub client: MonClientConfig,
    pub log: LogConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] InvalidConfig),
}

impl AdminConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.client.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults when `path` is `None`, otherwise the file's contents.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
