//! Error kinds raised by table construction and access.

use std::fmt;

/// Failure of a `Table` operation. Both kinds abort the operation before any
/// state is modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Malformed construction or replacement parameters.
    InvalidArgument(String),
    /// Row or column index outside the table bounds.
    OutOfRange(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidArgument(e) => write!(f, "invalid argument: {e}"),
            TableError::OutOfRange(e) => write!(f, "out of range: {e}"),
        }
    }
}

impl std::error::Error for TableError {}
