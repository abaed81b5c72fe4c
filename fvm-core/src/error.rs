//! Error types for FVM operations

use alloc::string::String;
use thiserror::Error;

/// Errors that can occur during matrix operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FvmError {
    /// A dense row declared more positions than there are columns
    #[error("dense row has {len} values but only {columns} columns are registered")]
    OutOfRange {
        /// Length of the rejected row
        len: usize,
        /// Column count at the time of the append
        columns: usize,
    },
    /// The operation is not allowed in the matrix's current state
    #[error("illegal state: {0}")]
    IllegalState(#[from] StateError),
    /// A row lookup resolved to nothing
    #[error("row not found: {0}")]
    NotFound(MissingRow),
}

impl FvmError {
    /// Check for [`FvmError::OutOfRange`]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, FvmError::OutOfRange { .. })
    }

    /// Check for [`FvmError::IllegalState`]
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, FvmError::IllegalState(_))
    }

    /// Check for [`FvmError::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, FvmError::NotFound(_))
    }
}

/// Reasons a matrix refused an operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Columns can only be pre-declared before any row exists
    #[error("columns cannot be set once rows have been added")]
    ColumnsAfterRows,
    /// Bulk row naming must name every row
    #[error("expected {expected} row names, got {actual}")]
    RowNameCount {
        /// Current row count
        expected: usize,
        /// Number of names supplied
        actual: usize,
    },
    /// Bulk row naming is only allowed while no row is named
    #[error("row names have already been assigned")]
    RowNamesAlreadySet,
    /// Bulk row naming received the same name twice
    #[error("duplicate row name {0:?}")]
    DuplicateRowName(String),
    /// The operation needs every row to be named
    #[error("{named} of {rows} rows are named; all rows must be keyed")]
    NotFullyKeyed {
        /// Rows with a name
        named: usize,
        /// Total rows
        rows: usize,
    },
}

/// The lookup that failed in a [`FvmError::NotFound`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingRow {
    /// No row at this position
    Position(usize),
    /// No row carries this name
    Name(String),
}

impl core::fmt::Display for MissingRow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MissingRow::Position(idx) => write!(f, "position {idx}"),
            MissingRow::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

/// Result type for FVM operations
pub type Result<T> = core::result::Result<T, FvmError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_messages() {
        let err = FvmError::OutOfRange { len: 4, columns: 3 };
        assert_eq!(
            err.to_string(),
            "dense row has 4 values but only 3 columns are registered"
        );

        let err = FvmError::from(StateError::NotFullyKeyed { named: 1, rows: 2 });
        assert!(err.is_illegal_state());
        assert_eq!(
            err.to_string(),
            "illegal state: 1 of 2 rows are named; all rows must be keyed"
        );

        let err = FvmError::NotFound(MissingRow::Name("two".into()));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "row not found: name \"two\"");
    }
}
