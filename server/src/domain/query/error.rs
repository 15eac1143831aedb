//! Query layer error types

use thiserror::Error;

use crate::data::ClientError;

/// Error raised while translating or executing a table query
#[derive(Error, Debug)]
pub enum QueryError {
    /// Filter token is neither a preset name nor a filter directive
    #[error("Invalid Filter '{0}' given")]
    InvalidFilter(String),

    /// The LQL client reported a failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A column-discovery row had no string `name` field
    #[error("Column row {index} has no string 'name' field")]
    MissingColumnName { index: usize },
}

/// Error raised when a filter preset is not consistent LQL
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PresetError {
    #[error("preset has no lines")]
    Empty,

    #[error("line '{0}' is not a Filter:, Negate:, Or: or And: directive")]
    UnknownDirective(String),

    #[error("line '{0}' needs a positive operand count")]
    InvalidCount(String),

    #[error("line '{line}' combines more filters than the {available} available")]
    Underflow { line: String, available: usize },
}
