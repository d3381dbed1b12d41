//! Monitor client configuration.
//!
//! Deserialized from the `[client]` table of the admin config file; every
//! key has a default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default cap on a response payload (512 MiB).
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 512 << 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonClientConfig {
    /// Time budget for one request, from send to the last content byte.
    pub op_timeout_ms: u64,

    /// Time budget for establishing the TCP connection.
    pub connect_timeout_ms: u64,

    /// Largest accepted response payload in bytes.
    pub max_content_length: usize,
}

impl Default for MonClientConfig {
    fn default() -> Self {
        Self {
            op_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid client config: {0}")]
pub struct InvalidConfig(pub String);

impl MonClientConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.op_timeout_ms == 0 {
            return Err(InvalidConfig("op_timeout_ms must be positive".into()));
        }
        if self.connect_timeout_ms == 0 {
            return Err(InvalidConfig("connect_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
