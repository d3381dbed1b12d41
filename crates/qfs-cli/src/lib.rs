//! Core of the QFS meta server admin tool.
//!
//! - [`catalog`]: the table of administrative commands, indexed by
//!   case-insensitive name.
//! - [`help`]: help and usage text rendered from the catalog.
//! - [`dispatch`]: runs command tokens in order through a
//!   [`MonExecutor`](qfs_mon_client::MonExecutor) and prints the results.
//! - [`connection`]: command line options naming the server and config file.
//! - [`config`]: the config file (`[client]` and `[log]` tables).
//! - [`output`]: the output and diagnostic streams.
//!
//! ```ignore
//! let catalog = Catalog::builtin()?;
//! let config = AdminConfig::load_optional(None)?;
//! let client = MonClient::new(config.client);
//! let mut printer = Printer::stdio();
//! let status = Dispatcher::new(&catalog, &client)
//!     .run_all(&location, &["open_files", "get_request_counters"], &mut printer)
//!     .await;
//! ```

pub mod catalog;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod help;
pub mod output;

pub use catalog::{normalize, Catalog, CatalogError, CommandEntry, META_ADMIN_COMMANDS};
pub use config::{AdminConfig, ConfigError};
pub use connection::ConnectionOptions;
pub use dispatch::{CommandOutcome, Dispatcher, ExitStatus};
pub use help::{show_help, write_usage};
pub use output::Printer;
