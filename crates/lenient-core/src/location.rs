//! Input positions carried through coercion diagnostics
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a token within the input text
///
/// `offset` is a zero-based byte offset; `line` and `column` are one-based,
/// with the column counted in characters, matching what `serde_json` reports
/// for its own errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Byte offset from the start of the input
    pub offset: usize,
    /// Line number, starting at 1
    pub line: usize,
    /// Column number, starting at 1
    pub column: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Location {
    /// Create a location from its parts
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Compute the location of the byte `offset` within `input`
    ///
    /// Offsets past the end clamp to the end of the input; offsets inside a
    /// multi-byte character are moved back to the character boundary.
    pub fn at(input: &str, offset: usize) -> Self {
        let mut offset = offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }

        let prefix = &input[..offset];
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = prefix[line_start..].chars().count() + 1;

        Self {
            offset,
            line,
            column,
        }
    }

    /// Location of the first token in `input`, skipping leading JSON whitespace
    pub fn of_root(input: &str) -> Self {
        let offset = input
            .find(|c: char| !matches!(c, ' ' | '\t' | '\n' | '\r'))
            .unwrap_or(input.len());
        Self::at(input, offset)
    }

    /// Location reported by a `serde_json` error, resolved against `input`
    pub(crate) fn of_json_error(input: &str, err: &serde_json::Error) -> Self {
        if err.line() == 0 {
            return Self::default();
        }
        let line_start: usize = input
            .split_inclusive('\n')
            .take(err.line() - 1)
            .map(str::len)
            .sum();
        let column_bytes: usize = input[line_start.min(input.len())..]
            .chars()
            .take(err.column().saturating_sub(1))
            .map(char::len_utf8)
            .sum();
        Self {
            offset: line_start + column_bytes,
            line: err.line(),
            column: err.column().max(1),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
