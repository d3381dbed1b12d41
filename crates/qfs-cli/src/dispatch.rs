//! Executes command tokens in order and reports each result.

use std::io::{self, Write};

use qfs_mon_client::{MetaMonOp, MonExecutor};
use qfs_types::{error_code_to_str, ServerLocation};

use crate::catalog::Catalog;
use crate::output::Printer;

/// Overall result of a run, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitStatus {
    #[default]
    Success,
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

/// What happened to a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Unknown,
    Succeeded { content_length: usize },
    Failed { status: i32 },
}

/// Resolves tokens against a catalog and runs them through an executor.
pub struct Dispatcher<'a> {
    catalog: &'a Catalog,
    executor: &'a dyn MonExecutor,
}

impl<'a> Dispatcher<'a> {
    pub fn new(catalog: &'a Catalog, executor: &'a dyn MonExecutor) -> Self {
        Self { catalog, executor }
    }

    /// Run every token against `location`, one at a time, left to right.
    ///
    /// Unknown tokens are reported and skipped without affecting the exit
    /// status. A failed command, or a failed write of its result, marks the
    /// run as failed; later tokens still run either way.
    pub async fn run_all<S, O, E>(
        &self,
        location: &ServerLocation,
        tokens: &[S],
        printer: &mut Printer<O, E>,
    ) -> ExitStatus
    where
        S: AsRef<str>,
        O: Write,
        E: Write,
    {
        let mut exit = ExitStatus::Success;
        for token in tokens {
            let token = token.as_ref();
            match self.run_one(location, token, printer).await {
                Ok(CommandOutcome::Failed { .. }) => exit = ExitStatus::Failure,
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(token, error = %err, "failed to write command result");
                    exit = ExitStatus::Failure;
                }
            }
        }
        exit
    }

    /// Run a single token and print its result. Only writer errors are
    /// returned; execution failures are reported through the printer.
    pub async fn run_one<O: Write, E: Write>(
        &self,
        location: &ServerLocation,
        token: &str,
        printer: &mut Printer<O, E>,
    ) -> io::Result<CommandOutcome> {
        let Some((name, entry)) = self.catalog.get(token) else {
            printer.print_error(format_args!("no such command: {}", token))?;
            return Ok(CommandOutcome::Unknown);
        };

        let mut op = MetaMonOp::new(entry.op_code, entry.name);
        tracing::debug!(op = %entry.op_code, %location, "executing");
        let status = self.executor.execute(location, &mut op).await;

        if !qfs_types::is_ok(status) {
            let reason = error_code_to_str(status);
            tracing::debug!(op = %entry.op_code, status, msg = %op.status_msg, "command failed");
            printer.print_error(format_args!("{} error: {}", op.status_msg, reason))?;
            return Ok(CommandOutcome::Failed { status });
        }

        let content_length = op.content_length();
        if content_length == 0 {
            printer.print_line(format_args!("{} OK", name))?;
        } else {
            printer.print_raw(&op.content)?;
        }
        Ok(CommandOutcome::Succeeded { content_length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use parking_lot::Mutex;
    use qfs_mon_client::MetaOpCode;
    use qfs_types::status_code_t;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    struct Reply {
        status: status_code_t,
        msg: &'static str,
        content: &'static [u8],
    }

    impl Reply {
        fn ok(content: &'static [u8]) -> Self {
            Self { status: 0, msg: "", content }
        }

        fn err(status: status_code_t, msg: &'static str) -> Self {
            Self { status, msg, content: b"" }
        }
    }

    /// Records every executed op and answers from a per-op table.
    #[derive(Default)]
    struct MockExecutor {
        replies: HashMap<MetaOpCode, Reply>,
        calls: Mutex<Vec<(String, MetaOpCode, String)>>,
    }

    impl MockExecutor {
        fn with(mut self, op: MetaOpCode, reply: Reply) -> Self {
            self.replies.insert(op, reply);
            self
        }

        fn calls(&self) -> Vec<(String, MetaOpCode, String)> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl MonExecutor for MockExecutor {
        async fn execute(&self, location: &ServerLocation, op: &mut MetaMonOp) -> status_code_t {
            self.calls
                .lock()
                .push((location.to_string(), op.op, op.verb.clone()));
            let reply = self.replies.get(&op.op).cloned().unwrap_or(Reply::ok(b""));
            if reply.status < 0 {
                op.fail(reply.status, reply.msg);
            } else {
                op.status = reply.status;
                op.content = Bytes::from_static(reply.content);
            }
            op.status
        }
    }

    async fn run(executor: &MockExecutor, tokens: &[&str]) -> (ExitStatus, String, String) {
        let catalog = Catalog::builtin().unwrap();
        let location = ServerLocation::new("meta.example", 20000);
        let mut printer = Printer::new(Vec::new(), Vec::new());
        let exit = Dispatcher::new(&catalog, executor)
            .run_all(&location, tokens, &mut printer)
            .await;
        let (out, err) = printer.into_parts();
        (exit, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[tokio::test]
    async fn test_known_and_unknown_tokens() {
        let executor = MockExecutor::default();
        let (exit, out, err) = run(&executor, &["Open_Files", "bogus_cmd"]).await;

        assert_eq!(exit, ExitStatus::Success);
        assert_eq!(out, "open_files OK\n");
        assert_eq!(err, "no such command: bogus_cmd\n");
        assert_eq!(
            executor.calls(),
            vec![(
                "meta.example 20000".to_string(),
                MetaOpCode::OpenFiles,
                "OPEN_FILES".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_empty_content_prints_ok() {
        let executor = MockExecutor::default();
        let (exit, out, err) = run(&executor, &["check_leases"]).await;
        assert_eq!(exit, ExitStatus::Success);
        assert_eq!(out, "check_leases OK\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_content_written_verbatim() {
        let executor = MockExecutor::default()
            .with(MetaOpCode::GetRequestCounters, Reply::ok(b"Get=10\r\nPut=3\r\n"));
        let (exit, out, err) = run(&executor, &["GET_REQUEST_COUNTERS"]).await;
        assert_eq!(exit, ExitStatus::Success);
        assert_eq!(out, "Get=10\r\nPut=3\r\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_failure_sets_exit_status() {
        let executor = MockExecutor::default().with(
            MetaOpCode::CheckLeases,
            Reply::err(qfs_types::ECONNREFUSED, "connect failed"),
        );
        let (exit, out, err) = run(&executor, &["CHECK_LEASES"]).await;

        assert_eq!(exit, ExitStatus::Failure);
        assert_eq!(exit.code(), 1);
        assert!(out.is_empty());
        let expected = format!(
            "connect failed error: {}\n",
            error_code_to_str(qfs_types::ECONNREFUSED)
        );
        assert_eq!(err, expected);
        assert!(err.len() > "connect failed error: \n".len());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_commands() {
        let executor = MockExecutor::default().with(
            MetaOpCode::RecomputeDirsize,
            Reply::err(-qfs_types::MetaErrorCode::SERVER_BUSY, "RECOMPUTE_DIRSIZE failed"),
        );
        let (exit, out, err) =
            run(&executor, &["recompute_dirsize", "open_files", "check_leases"]).await;

        assert_eq!(exit, ExitStatus::Failure);
        assert_eq!(out, "open_files OK\ncheck_leases OK\n");
        assert!(err.starts_with("RECOMPUTE_DIRSIZE failed error: "));
        let order: Vec<MetaOpCode> = executor.calls().into_iter().map(|c| c.1).collect();
        assert_eq!(
            order,
            vec![MetaOpCode::RecomputeDirsize, MetaOpCode::OpenFiles, MetaOpCode::CheckLeases]
        );
    }

    #[tokio::test]
    async fn test_only_unknown_tokens() {
        let executor = MockExecutor::default();
        let (exit, out, err) = run(&executor, &["foo", "BAR"]).await;
        assert_eq!(exit, ExitStatus::Success);
        assert!(out.is_empty());
        assert_eq!(err, "no such command: foo\nno such command: BAR\n");
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_no_tokens() {
        let executor = MockExecutor::default();
        let (exit, out, err) = run(&executor, &[]).await;
        assert_eq!(exit, ExitStatus::Success);
        assert!(out.is_empty() && err.is_empty());
    }

    #[tokio::test]
    async fn test_run_one_outcome() {
        let catalog = Catalog::builtin().unwrap();
        let executor = MockExecutor::default()
            .with(MetaOpCode::OpenFiles, Reply::ok(b"lease list\n"))
            .with(MetaOpCode::CheckLeases, Reply::err(qfs_types::EIO, "io"));
        let dispatcher = Dispatcher::new(&catalog, &executor);
        let location = ServerLocation::new("localhost", 20000);
        let mut printer = Printer::new(Vec::new(), Vec::new());

        assert_eq!(
            dispatcher.run_one(&location, "OPEN_FILES", &mut printer).await.unwrap(),
            CommandOutcome::Succeeded { content_length: 11 }
        );
        assert_eq!(
            dispatcher.run_one(&location, "check_leases", &mut printer).await.unwrap(),
            CommandOutcome::Failed { status: qfs_types::EIO }
        );
        assert_eq!(
            dispatcher.run_one(&location, "nope", &mut printer).await.unwrap(),
            CommandOutcome::Unknown
        );
    }

    #[tokio::test]
    async fn test_one_error_line_per_failed_command() {
        let executor = MockExecutor::default()
            .with(MetaOpCode::OpenFiles, Reply::err(qfs_types::ECONNREFUSED, "OPEN_FILES"))
            .with(MetaOpCode::CheckLeases, Reply::err(qfs_types::EIO, "CHECK_LEASES"));
        let (exit, out, err) = run(&executor, &["open_files", "bogus_cmd", "check_leases"]).await;

        assert_eq!(exit, ExitStatus::Failure);
        assert!(out.is_empty());
        let lines: Vec<&str> = err.lines().collect();
        assert_eq!(lines.len(), 3, "stderr: {:?}", err);
        assert!(lines[0].starts_with("OPEN_FILES error: "));
        assert_eq!(lines[1], "no such command: bogus_cmd");
        assert!(lines[2].starts_with("CHECK_LEASES error: "));
    }

    /// Writer that rejects every write, like stdout after the reader exits.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[tokio::test]
    async fn test_write_error_does_not_stop_later_commands() {
        let catalog = Catalog::builtin().unwrap();
        let executor = MockExecutor::default();
        let location = ServerLocation::new("meta.example", 20000);
        let mut printer = Printer::new(BrokenPipe, Vec::new());

        let exit = Dispatcher::new(&catalog, &executor)
            .run_all(
                &location,
                &["open_files", "recompute_dirsize", "check_leases"],
                &mut printer,
            )
            .await;

        assert_eq!(exit, ExitStatus::Failure);
        let verbs: Vec<String> = executor.calls().into_iter().map(|c| c.2).collect();
        assert_eq!(verbs, vec!["OPEN_FILES", "RECOMPUTE_DIRSIZE", "CHECK_LEASES"]);
        let (_, err) = printer.into_parts();
        assert!(err.is_empty());
    }
}
