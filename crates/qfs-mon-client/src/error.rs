//! Monitor client error types.

use std::time::Duration;

use qfs_types::{status_code_t, ServerLocation};

use crate::wire::WireError;

/// Errors that can occur while executing one monitor request.
#[derive(Debug, thiserror::Error)]
pub enum MonClientError {
    /// The target location has no host or no port.
    #[error("invalid server location: {0}")]
    InvalidLocation(ServerLocation),

    /// Establishing the TCP connection failed.
    #[error("failed to connect to {location}: {source}")]
    Connect {
        location: ServerLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server closed the connection before a full response arrived.
    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Wire(#[from] WireError),
}

impl MonClientError {
    /// Negative status code reported through `MetaMonOp::status`.
    pub fn status_code(&self) -> status_code_t {
        match self {
            Self::InvalidLocation(_) => qfs_types::EINVAL,
            Self::Connect { source, .. } => io_status(source, qfs_types::ECONNREFUSED),
            Self::ConnectTimeout(_) | Self::Timeout(_) => qfs_types::ETIMEDOUT,
            Self::ConnectionClosed => qfs_types::EIO,
            Self::Io(e) => io_status(e, qfs_types::EIO),
            Self::Wire(WireError::ContentTooLarge { .. }) => qfs_types::EFBIG,
            Self::Wire(_) => qfs_types::EINVAL,
        }
    }
}

fn io_status(err: &std::io::Error, fallback: status_code_t) -> status_code_t {
    match err.raw_os_error() {
        Some(errno) if errno != 0 => qfs_types::from_errno(errno),
        _ => match err.kind() {
            std::io::ErrorKind::ConnectionRefused => qfs_types::ECONNREFUSED,
            std::io::ErrorKind::TimedOut => qfs_types::ETIMEDOUT,
            _ => fallback,
        },
    }
}
