//! Error types

use thiserror::Error;

/// Errors raised by the table engine.
///
/// The processing pipeline itself cannot fail. These errors cover
/// configuration mistakes and operations that name something the table
/// does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("row index {0} out of range")]
    RowOutOfRange(usize),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
