use std::fmt;

/// A `(host, port)` pair identifying one server.
///
/// The hostname is kept as given (name or literal IP); resolution happens
/// only when a connection is opened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerLocation {
    pub hostname: String,
    pub port: u16,
}

impl ServerLocation {
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }

    /// A location is usable once it has a non-empty host and a non-zero port.
    pub fn is_valid(&self) -> bool {
        !self.hostname.is_empty() && self.port > 0
    }

    /// Address string accepted by `tokio::net::TcpStream::connect`.
    pub fn connect_addr(&self) -> String {
        if self.hostname.contains(':') && !self.hostname.starts_with('[') {
            // Bare IPv6 literal.
            format!("[{}]:{}", self.hostname, self.port)
        } else {
            format!("{}:{}", self.hostname, self.port)
        }
    }
}

impl fmt::Display for ServerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hostname, self.port)
    }
}
