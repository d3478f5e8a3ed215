//! Errors produced while reading dates from loosely typed input.

use thiserror::Error;

/// Failure to interpret a string as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// The input was empty or only whitespace.
    #[error("date input is empty")]
    Empty,
    /// The input did not match any accepted date layout.
    #[error("`{input}` is not a valid date: {source}")]
    Invalid {
        /// The rejected input, trimmed.
        input: String,
        /// The parser error for the primary `YYYY-MM-DD` layout.
        #[source]
        source: chrono::ParseError,
    },
}
