//! Line cursor over SDP text.

use std::collections::VecDeque;

use crate::error::{Error, Result};

/// A cursor over the non-blank lines of an SDP document.
///
/// Accepts both CRLF and bare LF line endings; blank lines are discarded up
/// front. Exposes one-line lookahead by type letter and strictly sequential
/// consumption; the cursor is scoped to a single parse and must not be
/// shared.
#[derive(Debug)]
pub struct SdpReader {
    lines: VecDeque<String>,
}

impl SdpReader {
    pub fn new(sdp: &str) -> SdpReader {
        SdpReader {
            lines: sdp
                .lines()
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// The type letter of the next line, without consuming it.
    ///
    /// Asking with no lines remaining is a contract violation and fails with
    /// [`Error::Underrun`].
    pub fn next_type(&self) -> Result<char> {
        let line = self.lines.front().ok_or(Error::Underrun)?;
        line.chars().next().ok_or(Error::Underrun)
    }

    /// The value after the two-character `x=` prefix, consuming the line.
    pub fn read_value(&mut self) -> Result<String> {
        let line = self.lines.pop_front().ok_or(Error::Underrun)?;
        Ok(line.get(2..).unwrap_or("").to_string())
    }

    /// Count of unconsumed lines.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Consumes the next line and returns true only if its type matches.
    pub fn skip(&mut self, expected: char) -> Result<bool> {
        if self.next_type()? == expected {
            self.read_value()?;
            return Ok(true);
        }
        Ok(false)
    }
}
