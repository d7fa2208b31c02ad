//! Sinks for the simulator's line-oriented output.
//!
//! The simulator hands every trace, disassembly and dump line to a
//! [`TraceSink`]. Passing no sink suppresses the output and changes nothing
//! else.

use std::io::{self, Write};

pub trait TraceSink {
    /// Accept one line, without its trailing newline.
    fn record(&mut self, line: &str);
}

/// Collects lines in memory; mostly useful in tests.
impl TraceSink for Vec<String> {
    fn record(&mut self, line: &str) {
        self.push(line.to_owned());
    }
}

/// Writes each line, newline-terminated, to an `io::Write`.
///
/// The first I/O error is kept and every later line is dropped; call
/// [`WriterSink::finish`] to see it.
pub struct WriterSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, error: None }
    }

    pub fn finish(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(err) => Err(err),
            None => {
                self.writer.flush()?;
                Ok(self.writer)
            }
        }
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn record(&mut self, line: &str) {
        if self.error.is_none() {
            if let Err(err) = writeln!(self.writer, "{line}") {
                self.error = Some(err);
            }
        }
    }
}

/// Send a multi-line block to the sink one line at a time.
pub(crate) fn record_lines(sink: &mut dyn TraceSink, text: &str) {
    for line in text.lines() {
        sink.record(line);
    }
}
