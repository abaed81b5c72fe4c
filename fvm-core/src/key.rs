//! Explicit row lookup keys
//!
//! A row is addressed either by its position in the row store or by its
//! name in the row registry. The two are never inferred from each other.

use alloc::string::String;

use crate::error::MissingRow;

/// How a caller addresses a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey<'a> {
    /// Position in storage order
    Position(usize),
    /// Name assigned through the row registry
    Name(&'a str),
}

impl RowKey<'_> {
    /// Owned description of this key, for [`FvmError::NotFound`](crate::FvmError::NotFound)
    pub fn missing(&self) -> MissingRow {
        match *self {
            RowKey::Position(idx) => MissingRow::Position(idx),
            RowKey::Name(name) => MissingRow::Name(String::from(name)),
        }
    }
}

impl From<usize> for RowKey<'_> {
    fn from(idx: usize) -> Self {
        RowKey::Position(idx)
    }
}

impl<'a> From<&'a str> for RowKey<'a> {
    fn from(name: &'a str) -> Self {
        RowKey::Name(name)
    }
}

impl<'a> From<&'a String> for RowKey<'a> {
    fn from(name: &'a String) -> Self {
        RowKey::Name(name.as_str())
    }
}
