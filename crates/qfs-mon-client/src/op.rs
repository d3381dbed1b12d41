use std::fmt;

use bytes::Bytes;
use qfs_types::status_code_t;

/// Remote administrative operations understood by the meta server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaOpCode {
    CheckLeases,
    RecomputeDirsize,
    DumpChunkToServerMap,
    DumpChunkReplicationCandidates,
    OpenFiles,
    GetChunkServersCounters,
    GetChunkServerDirsCounters,
    GetRequestCounters,
}

impl MetaOpCode {
    /// Symbolic name used in logs, e.g. `CMD_META_CHECK_LEASES`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::CheckLeases => "CMD_META_CHECK_LEASES",
            Self::RecomputeDirsize => "CMD_META_RECOMPUTE_DIRSIZE",
            Self::DumpChunkToServerMap => "CMD_META_DUMP_CHUNKTOSERVERMAP",
            Self::DumpChunkReplicationCandidates => "CMD_META_DUMP_CHUNKREPLICATIONCANDIDATES",
            Self::OpenFiles => "CMD_META_OPEN_FILES",
            Self::GetChunkServersCounters => "CMD_META_GET_CHUNK_SERVERS_COUNTERS",
            Self::GetChunkServerDirsCounters => "CMD_META_GET_CHUNK_SERVER_DIRS_COUNTERS",
            Self::GetRequestCounters => "CMD_META_GET_REQUEST_COUNTERS",
        }
    }
}

impl fmt::Display for MetaOpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One monitor request and, once executed, its outcome.
///
/// `verb` is the request line sent to the server. `status`, `status_msg`
/// and `content` are filled in by the executor.
#[derive(Debug, Clone)]
pub struct MetaMonOp {
    pub op: MetaOpCode,
    pub verb: String,
    pub status: status_code_t,
    pub status_msg: String,
    pub content: Bytes,
}

impl MetaMonOp {
    pub fn new(op: MetaOpCode, verb: impl Into<String>) -> Self {
        Self {
            op,
            verb: verb.into(),
            status: 0,
            status_msg: String::new(),
            content: Bytes::new(),
        }
    }

    pub fn content_length(&self) -> usize {
        self.content.len()
    }

    pub fn is_ok(&self) -> bool {
        qfs_types::is_ok(self.status)
    }

    /// Record a failure.
    pub fn fail(&mut self, status: status_code_t, msg: impl Into<String>) {
        self.status = status;
        self.status_msg = msg.into();
        self.content = Bytes::new();
    }
}
