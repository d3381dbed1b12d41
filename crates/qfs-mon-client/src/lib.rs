//! Monitor client for the QFS meta server.
//!
//! Sends one administrative request (a [`MetaMonOp`]) to a meta server and
//! collects its status and response content. The dispatch code in
//! `qfs-cli` only depends on the [`MonExecutor`] trait, so tests can swap
//! the TCP client for an in-memory one.
//!
//! - [`op`]: operation codes and the request/response object.
//! - [`executor`]: the `MonExecutor` trait.
//! - [`wire`]: request encoding and response header parsing.
//! - [`client`]: `MonClient`, the TCP implementation.
//! - [`config`]: client timeouts and limits.

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod op;
pub mod wire;

pub use client::MonClient;
pub use config::{InvalidConfig, MonClientConfig};
pub use error::MonClientError;
pub use executor::MonExecutor;
pub use op::{MetaMonOp, MetaOpCode};
