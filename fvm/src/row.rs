//! Row entries and the views handed out for them
//!
//! A stored row is either dense (an ordered list aligned to the column
//! order) or sparse (column name to value). Rows are stored exactly as the
//! caller supplied them; padding and filtering happen when they are read.

use std::ops::Deref;
use std::sync::Arc;

use hashbrown::HashMap;

/// Sparse row representation: column name to value
pub type SparseRow<T> = HashMap<String, T>;

/// A stored row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Row<T> {
    /// Values in column order, possibly shorter than the column count
    Dense(Vec<T>),
    /// Values keyed by column name
    Sparse(SparseRow<T>),
}

impl<T> Row<T> {
    /// Build a sparse row from `(name, value)` pairs
    pub fn sparse<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        Row::Sparse(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check whether this row is stored densely
    pub fn is_dense(&self) -> bool {
        matches!(self, Row::Dense(_))
    }

    /// Check whether this row is stored sparsely
    pub fn is_sparse(&self) -> bool {
        matches!(self, Row::Sparse(_))
    }

    /// Number of explicitly stored values
    pub fn stored_len(&self) -> usize {
        match self {
            Row::Dense(values) => values.len(),
            Row::Sparse(values) => values.len(),
        }
    }
}

impl<T> From<Vec<T>> for Row<T> {
    fn from(values: Vec<T>) -> Self {
        Row::Dense(values)
    }
}

impl<T: Clone> From<&[T]> for Row<T> {
    fn from(values: &[T]) -> Self {
        Row::Dense(values.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for Row<T> {
    fn from(values: [T; N]) -> Self {
        Row::Dense(values.into())
    }
}

impl<T> From<SparseRow<T>> for Row<T> {
    fn from(values: SparseRow<T>) -> Self {
        Row::Sparse(values)
    }
}

impl<T> From<std::collections::HashMap<String, T>> for Row<T> {
    fn from(values: std::collections::HashMap<String, T>) -> Self {
        Row::Sparse(values.into_iter().collect())
    }
}

impl<T> From<std::collections::BTreeMap<String, T>> for Row<T> {
    fn from(values: std::collections::BTreeMap<String, T>) -> Self {
        Row::Sparse(values.into_iter().collect())
    }
}

/// A row read densely, one value per column
///
/// Dense rows already at full width are borrowed from storage. Everything
/// else is shared with the matrix's view cache.
#[derive(Debug, Clone)]
pub enum DenseView<'a, T> {
    Borrowed(&'a [T]),
    Shared(Arc<[T]>),
}

impl<T: Clone> DenseView<'_, T> {
    /// Copy the values out
    pub fn into_owned(self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T> Deref for DenseView<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        match self {
            DenseView::Borrowed(values) => values,
            DenseView::Shared(values) => values,
        }
    }
}

impl<T> AsRef<[T]> for DenseView<'_, T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T: PartialEq> PartialEq for DenseView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

/// A row read sparsely, column name to value
///
/// Sparse rows are borrowed from storage, dense rows are shared with the
/// view cache.
#[derive(Debug, Clone)]
pub enum SparseView<'a, T> {
    Borrowed(&'a SparseRow<T>),
    Shared(Arc<SparseRow<T>>),
}

impl<T: Clone> SparseView<'_, T> {
    /// Copy the entries out
    pub fn into_owned(self) -> SparseRow<T> {
        match self {
            SparseView::Borrowed(values) => values.clone(),
            SparseView::Shared(values) => Arc::unwrap_or_clone(values),
        }
    }
}

impl<T> Deref for SparseView<'_, T> {
    type Target = SparseRow<T>;

    fn deref(&self) -> &SparseRow<T> {
        match self {
            SparseView::Borrowed(values) => values,
            SparseView::Shared(values) => values,
        }
    }
}

impl<T: PartialEq> PartialEq for SparseView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

/// A row read through the matrix's preferred representation
#[derive(Debug, Clone, PartialEq)]
pub enum RowView<'a, T> {
    /// Dense view, one value per column
    Dense(DenseView<'a, T>),
    /// Sparse view
    Sparse(SparseView<'a, T>),
}

impl<T> RowView<'_, T> {
    /// The dense view, if this is one
    pub fn as_dense(&self) -> Option<&[T]> {
        match self {
            RowView::Dense(values) => Some(values),
            RowView::Sparse(_) => None,
        }
    }

    /// The sparse view, if this is one
    pub fn as_sparse(&self) -> Option<&SparseRow<T>> {
        match self {
            RowView::Dense(_) => None,
            RowView::Sparse(values) => Some(values),
        }
    }
}

/// Rows for [`Matrix::extend_rows`](crate::Matrix::extend_rows)
#[derive(Debug, Clone, PartialEq)]
pub enum RowBatch<T> {
    /// Rows appended without names
    Unnamed(Vec<Row<T>>),
    /// Rows appended under their names, in this order
    Named(Vec<(String, Row<T>)>),
}

impl<T> RowBatch<T> {
    /// Number of rows in the batch
    pub fn len(&self) -> usize {
        match self {
            RowBatch::Unnamed(rows) => rows.len(),
            RowBatch::Named(rows) => rows.len(),
        }
    }

    /// Check whether the batch holds no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn into_entries(self) -> Vec<(Option<String>, Row<T>)> {
        match self {
            RowBatch::Unnamed(rows) => rows.into_iter().map(|row| (None, row)).collect(),
            RowBatch::Named(rows) => rows
                .into_iter()
                .map(|(name, row)| (Some(name), row))
                .collect(),
        }
    }
}

impl<T> From<Vec<Row<T>>> for RowBatch<T> {
    fn from(rows: Vec<Row<T>>) -> Self {
        RowBatch::Unnamed(rows)
    }
}

impl<T, S: Into<String>> From<Vec<(S, Row<T>)>> for RowBatch<T> {
    fn from(rows: Vec<(S, Row<T>)>) -> Self {
        RowBatch::Named(rows.into_iter().map(|(k, r)| (k.into(), r)).collect())
    }
}
