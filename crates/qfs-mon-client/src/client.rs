//! TCP monitor client.
//!
//! Each `execute` opens a fresh connection, sends one request, reads one
//! response and closes the connection. No retries.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use qfs_types::{status_code_t, ServerLocation};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::MonClientConfig;
use crate::error::MonClientError;
use crate::executor::MonExecutor;
use crate::op::MetaMonOp;
use crate::wire::{self, ResponseHeader};

pub struct MonClient {
    config: MonClientConfig,
    next_seq: AtomicI64,
}

impl MonClient {
    pub fn new(config: MonClientConfig) -> Self {
        Self {
            config,
            next_seq: AtomicI64::new(1),
        }
    }

    pub fn config(&self) -> &MonClientConfig {
        &self.config
    }

    fn next_seq(&self) -> i64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    async fn connect(&self, location: &ServerLocation) -> Result<TcpStream, MonClientError> {
        if !location.is_valid() {
            return Err(MonClientError::InvalidLocation(location.clone()));
        }
        let timeout = self.config.connect_timeout();
        let stream = tokio::time::timeout(timeout, TcpStream::connect(location.connect_addr()))
            .await
            .map_err(|_| MonClientError::ConnectTimeout(timeout))?
            .map_err(|source| MonClientError::Connect {
                location: location.clone(),
                source,
            })?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    /// Send `op` and wait for its response, without the overall timeout.
    async fn round_trip(
        &self,
        location: &ServerLocation,
        op: &MetaMonOp,
        seq: i64,
    ) -> Result<(ResponseHeader, Bytes), MonClientError> {
        let mut stream = self.connect(location).await?;
        stream.write_all(&wire::encode_request(&op.verb, seq)).await?;
        stream.flush().await?;

        let mut buf = BytesMut::with_capacity(4096);
        let (header, header_len) = loop {
            if let Some(parsed) = wire::parse_response_header(&buf)? {
                break parsed;
            }
            if stream.read_buf(&mut buf).await? == 0 {
                return Err(MonClientError::ConnectionClosed);
            }
        };
        header.check(seq, self.config.max_content_length)?;

        let _ = buf.split_to(header_len);
        if header.status < 0 {
            // Failed requests carry no payload worth reading.
            return Ok((header, Bytes::new()));
        }
        buf.reserve(header.content_length.saturating_sub(buf.len()));
        while buf.len() < header.content_length {
            if stream.read_buf(&mut buf).await? == 0 {
                return Err(MonClientError::ConnectionClosed);
            }
        }
        buf.truncate(header.content_length);

        let _ = stream.shutdown().await;
        Ok((header, buf.freeze()))
    }

    async fn try_execute(
        &self,
        location: &ServerLocation,
        op: &MetaMonOp,
        seq: i64,
    ) -> Result<(ResponseHeader, Bytes), MonClientError> {
        let timeout = self.config.op_timeout();
        tokio::time::timeout(timeout, self.round_trip(location, op, seq))
            .await
            .map_err(|_| MonClientError::Timeout(timeout))?
    }
}

#[async_trait]
impl MonExecutor for MonClient {
    async fn execute(&self, location: &ServerLocation, op: &mut MetaMonOp) -> status_code_t {
        let seq = self.next_seq();
        tracing::debug!(%location, op = %op.op, verb = %op.verb, seq, "sending monitor request");

        match self.try_execute(location, op, seq).await {
            Ok((header, _)) if header.status < 0 => {
                let msg = header
                    .status_msg
                    .unwrap_or_else(|| format!("{} failed", op.verb));
                op.fail(header.status, msg);
            }
            Ok((header, content)) => {
                tracing::debug!(
                    seq,
                    status = header.status,
                    len = content.len(),
                    "monitor request done"
                );
                op.status = header.status;
                op.status_msg = header.status_msg.unwrap_or_default();
                op.content = content;
            }
            Err(err) => {
                tracing::debug!(seq, error = %err, "monitor request failed");
                op.fail(err.status_code(), format!("{}: {}", op.verb, err));
            }
        }
        op.status
    }
}
