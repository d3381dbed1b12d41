//! Output streams for admin commands.
//!
//! Command results go to `out` (stdout), diagnostics to `err` (stderr).
//! Each stream is written as results arrive; nothing is reordered.

use std::fmt;
use std::io::{self, Write};

/// Printer holding the output and diagnostic writers.
pub struct Printer<O: Write = Box<dyn Write>, E: Write = Box<dyn Write>> {
    out: O,
    err: E,
}

impl Printer<Box<dyn Write>, Box<dyn Write>> {
    /// Printer over the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }
}

impl<O: Write, E: Write> Printer<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Write one line to the output stream.
    pub fn print_line(&mut self, line: impl fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{}", line)
    }

    /// Write bytes to the output stream unchanged.
    pub fn print_raw(&mut self, data: &[u8]) -> io::Result<()> {
        self.out.write_all(data)
    }

    /// Write one line to the diagnostic stream.
    pub fn print_error(&mut self, line: impl fmt::Display) -> io::Result<()> {
        writeln!(self.err, "{}", line)
    }

    pub fn out(&mut self) -> &mut O {
        &mut self.out
    }

    pub fn err(&mut self) -> &mut E {
        &mut self.err
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> fmt::Debug for Printer<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer").finish_non_exhaustive()
    }
}
