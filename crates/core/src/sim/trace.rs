//! Branch trace reader.
//!
//! A trace is plain text with one conditional branch per line:
//!
//! ```text
//! # pc        outcome
//! 0x4005d4    1
//! 4005e0      0
//! ```
//!
//! The address is hexadecimal with an optional `0x` prefix; the outcome is
//! `1` for taken and `0` for not-taken. Blank lines and lines starting with
//! `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::{Outcome, TraceError};

/// One resolved conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchEvent {
    /// Address of the branch instruction.
    pub pc: u32,
    /// Direction the branch took.
    pub outcome: Outcome,
}

impl BranchEvent {
    /// Parses a single trace line; `line_no` is only used for error reporting.
    ///
    /// Returns `Ok(None)` for blank and comment lines.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Parse`] if the line is not `<hex pc> <0|1>`.
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Self>, TraceError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let err = |message: String| TraceError::Parse {
            line: line_no,
            message,
        };

        let mut fields = line.split_whitespace();
        let (Some(pc), Some(outcome), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(err(format!("expected `<pc> <outcome>`, got `{line}`")));
        };

        let digits = pc
            .strip_prefix("0x")
            .or_else(|| pc.strip_prefix("0X"))
            .unwrap_or(pc);
        let pc = u32::from_str_radix(digits, 16)
            .map_err(|e| err(format!("bad address `{pc}`: {e}")))?;

        let outcome = match outcome {
            "1" => Outcome::Taken,
            "0" => Outcome::NotTaken,
            other => return Err(err(format!("bad outcome `{other}`, expected 0 or 1"))),
        };

        Ok(Some(Self { pc, outcome }))
    }
}

/// Iterator over the branch events of a trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;

            match BranchEvent::parse(&self.buf, self.line_no) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
