use async_trait::async_trait;
use qfs_types::{status_code_t, ServerLocation};

use crate::op::MetaMonOp;

/// Executes monitor operations against a server.
///
/// Returns the final status, also stored in `op.status`. Negative means
/// failure, with `op.status_msg` describing it. On success `op.content`
/// holds the response payload, which may be empty.
#[async_trait]
pub trait MonExecutor: Send + Sync {
    async fn execute(&self, location: &ServerLocation, op: &mut MetaMonOp) -> status_code_t;
}
