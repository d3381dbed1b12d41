//! Status codes returned by the meta server and the monitor client.
//!
//! A status is an `i32`: zero or positive means success, negative means
//! failure. Failures are either a negated POSIX errno or one of the negated
//! server-specific codes in [`MetaErrorCode`].

/// Status code type. Negative values are errors.
#[allow(non_camel_case_types)]
pub type status_code_t = i32;

/// Server-specific error codes (1000+), sent negated on the wire.
pub mod MetaErrorCode {
    use super::status_code_t;

    pub const BAD_VERSION: status_code_t = 1000;
    pub const LEASE_EXPIRED: status_code_t = 1001;
    pub const BAD_CHECKSUM: status_code_t = 1002;
    pub const DATA_UNAVAILABLE: status_code_t = 1003;
    pub const SERVER_BUSY: status_code_t = 1004;
    pub const ALLOC_FAILED: status_code_t = 1005;
    pub const BAD_CLUSTER_KEY: status_code_t = 1006;
    pub const INVALID_CHUNK_SIZE: status_code_t = 1007;
    pub const LOG_FAILED: status_code_t = 1008;
    pub const VR_NOT_PRIMARY: status_code_t = 1009;
    pub const VR_BACKUP: status_code_t = 1010;
}

/// Whether a status code reports success.
pub fn is_ok(code: status_code_t) -> bool {
    code >= 0
}

/// Name of a server-specific code, if `code` (sign ignored) is one.
pub fn meta_error_name(code: status_code_t) -> Option<&'static str> {
    let name = match code.checked_abs()? {
        MetaErrorCode::BAD_VERSION => "version mismatch",
        MetaErrorCode::LEASE_EXPIRED => "lease has expired",
        MetaErrorCode::BAD_CHECKSUM => "checksum mismatch",
        MetaErrorCode::DATA_UNAVAILABLE => "data not available",
        MetaErrorCode::SERVER_BUSY => "server busy",
        MetaErrorCode::ALLOC_FAILED => "chunk allocation failed",
        MetaErrorCode::BAD_CLUSTER_KEY => "bad cluster key",
        MetaErrorCode::INVALID_CHUNK_SIZE => "invalid chunk size",
        MetaErrorCode::LOG_FAILED => "transaction log write failed",
        MetaErrorCode::VR_NOT_PRIMARY => "meta server node is not primary",
        MetaErrorCode::VR_BACKUP => "meta server node is backup",
        _ => return None,
    };
    Some(name)
}

/// Render a status code as human-readable text.
///
/// Server-specific codes use their fixed names; anything else is treated
/// as a (negated) errno and described by the OS. Never returns an empty
/// string.
pub fn error_code_to_str(code: status_code_t) -> String {
    if code == 0 {
        return "OK".to_string();
    }
    if let Some(name) = meta_error_name(code) {
        return name.to_string();
    }
    let errno = code.checked_abs().unwrap_or(i32::MAX);
    let text = std::io::Error::from_raw_os_error(errno).to_string();
    // Drop the trailing " (os error N)" that std appends.
    match text.rfind(" (os error ") {
        Some(pos) if pos > 0 => text[..pos].to_string(),
        _ => text,
    }
}

/// Negate an errno; the sign of `errno` is ignored.
pub fn from_errno(errno: i32) -> status_code_t {
    -errno.abs()
}

/// Negated errno values for failures detected on the client side.
pub const ECONNREFUSED: status_code_t = -libc::ECONNREFUSED;
pub const ETIMEDOUT: status_code_t = -libc::ETIMEDOUT;
pub const EHOSTUNREACH: status_code_t = -libc::EHOSTUNREACH;
pub const EINVAL: status_code_t = -libc::EINVAL;
pub const EIO: status_code_t = -libc::EIO;
pub const EFBIG: status_code_t = -libc::EFBIG;
