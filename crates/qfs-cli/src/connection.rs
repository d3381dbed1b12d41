//! Connection options shared by the admin binary.

use std::path::{Path, PathBuf};

use qfs_types::ServerLocation;

/// Where the meta server is and how to talk to it.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConnectionOptions {
    /// Meta server host name.
    #[arg(short = 'm', short_alias = 's', value_name = "HOST")]
    pub server: Option<String>,

    /// Meta server port.
    #[arg(short = 'p', value_name = "PORT")]
    pub port: Option<u16>,

    /// Client configuration file (TOML).
    #[arg(short = 'f', env = "QFS_ADMIN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ConnectionOptions {
    /// The server endpoint, if both host and a non-zero port were given.
    pub fn location(&self) -> Option<ServerLocation> {
        let location = ServerLocation::new(self.server.clone()?, self.port?);
        location.is_valid().then_some(location)
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}
