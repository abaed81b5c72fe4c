//! The feature vector matrix
//!
//! Rows are appended either densely or sparsely and stored untouched. Every
//! read goes through the column registry, so a dense row appended before a
//! later sparse row introduced new columns simply reads as padded with the
//! default value, and a sparse row reads densely in column order.

use std::sync::Arc;

use fvm_core::{
    FeatureMatrix, FvmError, MatrixElement, MatrixOperations, NameRegistry, Result, RowKey,
    StateError,
};
use hashbrown::HashSet;
use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::debug;

use crate::cache::{CachedView, MaterializationCache};
use crate::config::MatrixConfig;
use crate::dense::DenseMatrix;
use crate::iter::Iter;
use crate::row::{DenseView, Row, RowBatch, RowView, SparseRow, SparseView};

/// Rows of features that may each be stored densely or sparsely
#[derive(Debug)]
pub struct Matrix<T: MatrixElement> {
    columns: NameRegistry,
    row_names: NameRegistry,
    rows: Vec<Row<T>>,
    config: MatrixConfig<T>,
    /// Bumped every time the column set grows
    column_epoch: u64,
    cache: RwLock<MaterializationCache<T>>,
}

impl<T: MatrixElement> Matrix<T> {
    /// Create an empty matrix
    pub fn new(config: MatrixConfig<T>) -> Self {
        Self {
            columns: NameRegistry::new(),
            row_names: NameRegistry::new(),
            rows: Vec::new(),
            config,
            column_epoch: 0,
            cache: RwLock::new(MaterializationCache::new()),
        }
    }

    /// Create a matrix and bulk-load `rows` into it
    pub fn with_rows(config: MatrixConfig<T>, rows: impl Into<RowBatch<T>>) -> Result<Self> {
        let mut matrix = Self::new(config);
        matrix.extend_rows(rows)?;
        Ok(matrix)
    }

    /// The construction config, including the current read preference
    pub fn config(&self) -> &MatrixConfig<T> {
        &self.config
    }

    /// Value read for positions a row does not store
    pub fn default_value(&self) -> T {
        self.config.default_value
    }

    /// Whether [`row`](Self::row) returns sparse views
    pub fn default_to_hashed_rows(&self) -> bool {
        self.config.default_to_hashed_rows
    }

    /// Switch the representation [`row`](Self::row) returns
    pub fn set_default_to_hashed_rows(&mut self, hashed: bool) {
        self.config.default_to_hashed_rows = hashed;
    }

    /// Column names in canonical order
    pub fn column_names(&self) -> &[String] {
        self.columns.names()
    }

    /// Number of registered columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of the column called `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.position(name)
    }

    /// Pre-declare columns before any row is added
    pub fn set_columns<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.rows.is_empty() {
            return Err(StateError::ColumnsAfterRows.into());
        }
        self.register_columns(names);
        Ok(())
    }

    fn register_columns<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = self.columns.register_all(names);
        if added > 0 {
            self.column_epoch += 1;
            self.cache.get_mut().clear();
            debug!(
                added,
                columns = self.columns.len(),
                epoch = self.column_epoch,
                "registered new columns"
            );
        }
        added
    }

    /// Number of stored rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether no row is stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row names in naming order
    ///
    /// When every row is named this is also row order.
    pub fn row_names(&self) -> &[String] {
        self.row_names.names()
    }

    /// Position of the row called `name`
    pub fn row_index(&self, name: &str) -> Option<usize> {
        self.row_names.position(name)
    }

    /// Check whether every row has a name
    pub fn is_fully_keyed(&self) -> bool {
        self.rows.len() == self.row_names.len()
    }

    fn ensure_fully_keyed(&self) -> Result<()> {
        if self.is_fully_keyed() {
            return Ok(());
        }
        Err(StateError::NotFullyKeyed {
            named: self.row_names.len(),
            rows: self.rows.len(),
        }
        .into())
    }

    /// Name every existing row at once, positionally
    ///
    /// Only allowed while no row has a name, and `names` must cover every
    /// row exactly once.
    pub fn set_row_names<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.rows.len() {
            return Err(StateError::RowNameCount {
                expected: self.rows.len(),
                actual: names.len(),
            }
            .into());
        }
        if !self.row_names.is_empty() {
            return Err(StateError::RowNamesAlreadySet.into());
        }
        self.row_names = NameRegistry::from_names(names).map_err(StateError::DuplicateRowName)?;
        debug!(rows = self.rows.len(), "assigned row names");
        Ok(())
    }

    /// Append a row, or replace the row already called `name`
    ///
    /// A `Vec<T>` is stored densely and must not be longer than the column
    /// count. A map is stored sparsely and registers its keys as columns.
    pub fn add_row(&mut self, row: impl Into<Row<T>>, name: Option<&str>) -> Result<()> {
        match row.into() {
            Row::Dense(values) => self.add_dense_row(values, name),
            Row::Sparse(values) => self.add_sparse_row(values, name),
        }
    }

    fn add_dense_row(&mut self, values: Vec<T>, name: Option<&str>) -> Result<()> {
        if values.len() > self.columns.len() {
            return Err(FvmError::OutOfRange {
                len: values.len(),
                columns: self.columns.len(),
            });
        }
        self.store_row(Row::Dense(values), name);
        Ok(())
    }

    fn add_sparse_row(&mut self, values: SparseRow<T>, name: Option<&str>) -> Result<()> {
        let mut new_columns: Vec<&String> = values
            .keys()
            .filter(|column| !self.columns.contains(column))
            .collect();
        new_columns.sort_unstable();
        self.register_columns(new_columns);
        self.store_row(Row::Sparse(values), name);
        Ok(())
    }

    fn store_row(&mut self, row: Row<T>, name: Option<&str>) {
        self.cache.get_mut().clear();

        let Some(name) = name else {
            self.rows.push(row);
            return;
        };
        match self.row_names.bind(name, self.rows.len()) {
            Some(existing) => {
                debug!(name, row = existing, "replacing named row");
                self.rows[existing] = row;
            }
            None => self.rows.push(row),
        }
    }

    /// Append several rows
    ///
    /// The whole batch is checked against the column count it would see,
    /// including columns introduced by its own sparse rows, before anything
    /// is stored. A rejected batch leaves the matrix unchanged.
    pub fn extend_rows(&mut self, rows: impl Into<RowBatch<T>>) -> Result<()> {
        let batch = rows.into();
        if batch.is_empty() {
            return Ok(());
        }
        let entries = batch.into_entries();
        self.check_batch(&entries)?;

        for (name, row) in entries {
            self.add_row(row, name.as_deref())?;
        }
        Ok(())
    }

    fn check_batch(&self, entries: &[(Option<String>, Row<T>)]) -> Result<()> {
        let mut projected = self.columns.len();
        let mut introduced: HashSet<&str> = HashSet::new();
        for (_, row) in entries {
            match row {
                Row::Dense(values) if values.len() > projected => {
                    return Err(FvmError::OutOfRange {
                        len: values.len(),
                        columns: projected,
                    });
                }
                Row::Dense(_) => {}
                Row::Sparse(values) => {
                    for column in values.keys() {
                        if !self.columns.contains(column) && introduced.insert(column) {
                            projected += 1;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn resolve(&self, key: RowKey<'_>) -> Result<usize> {
        let idx = match key {
            RowKey::Position(idx) => Some(idx).filter(|&idx| idx < self.rows.len()),
            RowKey::Name(name) => self.row_names.position(name),
        };
        idx.ok_or_else(|| FvmError::NotFound(key.missing()))
    }

    /// The row exactly as it was stored
    pub fn row_entry<'k>(&self, key: impl Into<RowKey<'k>>) -> Result<&Row<T>> {
        let idx = self.resolve(key.into())?;
        Ok(&self.rows[idx])
    }

    /// Stored rows in storage order
    pub fn rows(&self) -> std::slice::Iter<'_, Row<T>> {
        self.rows.iter()
    }

    /// Read a row as one value per column, in column order
    pub fn row_as_dense<'k>(&self, key: impl Into<RowKey<'k>>) -> Result<DenseView<'_, T>> {
        let idx = self.resolve(key.into())?;
        Ok(self.dense_at(idx))
    }

    fn dense_at(&self, idx: usize) -> DenseView<'_, T> {
        let ncols = self.columns.len();
        match &self.rows[idx] {
            Row::Dense(values) if values.len() == ncols => DenseView::Borrowed(values),
            Row::Dense(values) => {
                let padding = std::iter::repeat(self.config.default_value).take(ncols - values.len());
                DenseView::Shared(values.iter().copied().chain(padding).collect())
            }
            Row::Sparse(values) => DenseView::Shared(self.cached_dense(idx, values)),
        }
    }

    fn cached_dense(&self, idx: usize, values: &SparseRow<T>) -> Arc<[T]> {
        let cached = self.cache.read().dense(idx, self.column_epoch);
        if let Some(dense) = cached {
            return dense;
        }

        let default = self.config.default_value;
        let dense: Arc<[T]> = self
            .columns
            .names()
            .iter()
            .map(|column| values.get(column.as_str()).copied().unwrap_or(default))
            .collect();
        self.cache
            .write()
            .insert(idx, self.column_epoch, CachedView::Dense(Arc::clone(&dense)));
        dense
    }

    /// Read a row as a map of column name to value
    ///
    /// Sparse rows come back exactly as stored. Dense rows leave out every
    /// position holding the default value.
    pub fn row_as_sparse<'k>(&self, key: impl Into<RowKey<'k>>) -> Result<SparseView<'_, T>> {
        let idx = self.resolve(key.into())?;
        match &self.rows[idx] {
            Row::Sparse(values) => Ok(SparseView::Borrowed(values)),
            Row::Dense(values) => Ok(SparseView::Shared(self.cached_sparse(idx, values))),
        }
    }

    fn cached_sparse(&self, idx: usize, values: &[T]) -> Arc<SparseRow<T>> {
        let cached = self.cache.read().sparse(idx, self.column_epoch);
        if let Some(sparse) = cached {
            return sparse;
        }

        let default = self.config.default_value;
        let sparse: Arc<SparseRow<T>> = Arc::new(
            self.columns
                .names()
                .iter()
                .zip(values)
                .filter(|(_, value)| **value != default)
                .map(|(column, value)| (column.clone(), *value))
                .collect(),
        );
        self.cache
            .write()
            .insert(idx, self.column_epoch, CachedView::Sparse(Arc::clone(&sparse)));
        sparse
    }

    /// Read a row in the preferred representation
    pub fn row<'k>(&self, key: impl Into<RowKey<'k>>) -> Result<RowView<'_, T>> {
        let key = key.into();
        if self.config.default_to_hashed_rows {
            self.row_as_sparse(key).map(RowView::Sparse)
        } else {
            self.row_as_dense(key).map(RowView::Dense)
        }
    }

    /// Materialize every row densely, shape (row_count, column_count)
    pub fn to_dense_matrix(&self) -> DenseMatrix<T> {
        let rows: Vec<DenseView<'_, T>> = (0..self.rows.len())
            .into_par_iter()
            .map(|idx| self.dense_at(idx))
            .collect();
        DenseMatrix::from_rows(self.columns.len(), rows)
    }

    /// Swap rows and columns
    ///
    /// Row names become column names and column names become row names,
    /// both in their existing order. Every row must be named.
    pub fn transpose(&self) -> Result<Matrix<T>> {
        self.ensure_fully_keyed()?;

        let swapped = self.to_dense_matrix().transpose();
        let mut transposed = Matrix::new(self.config);
        transposed.register_columns(self.row_names.names());
        for (name, values) in self.columns.names().iter().zip(swapped.into_rows()) {
            transposed.add_dense_row(values, Some(name.as_str()))?;
        }

        debug!(
            rows = transposed.row_count(),
            columns = transposed.column_count(),
            "transposed matrix"
        );
        Ok(transposed)
    }

    /// Every row name in row order
    pub fn keys(&self) -> Result<&[String]> {
        self.ensure_fully_keyed()?;
        Ok(self.row_names.names())
    }

    /// Iterate row names if every row is named, raw rows otherwise
    pub fn iter(&self) -> Iter<'_, T> {
        if self.is_fully_keyed() {
            Iter::keys(self.row_names.names())
        } else {
            Iter::rows(&self.rows)
        }
    }

    #[cfg(test)]
    pub(crate) fn cached_views(&self) -> usize {
        self.cache.read().len()
    }
}

impl<T: MatrixElement> Default for Matrix<T> {
    fn default() -> Self {
        Self::new(MatrixConfig::default())
    }
}

impl<T: MatrixElement> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            row_names: self.row_names.clone(),
            rows: self.rows.clone(),
            config: self.config,
            column_epoch: self.column_epoch,
            cache: RwLock::new(MaterializationCache::new()),
        }
    }
}

impl<'a, T: MatrixElement> IntoIterator for &'a Matrix<T> {
    type Item = crate::iter::Entry<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: MatrixElement> FeatureMatrix for Matrix<T> {
    type Element = T;

    fn get_element(&self, row: usize, col: usize) -> Option<T> {
        if col >= self.columns.len() {
            return None;
        }
        let default = self.config.default_value;
        let value = match self.rows.get(row)? {
            Row::Dense(values) => values.get(col).copied(),
            Row::Sparse(values) => self
                .columns
                .name(col)
                .and_then(|column| values.get(column).copied()),
        };
        Some(value.unwrap_or(default))
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }
}

impl<T: MatrixElement> MatrixOperations for Matrix<T> {
    fn get_row(&self, row_index: usize) -> Option<Vec<T>> {
        if row_index >= self.rows.len() {
            return None;
        }
        Some(self.dense_at(row_index).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Matrix<i32> {
        let mut m = Matrix::default();
        m.set_columns(["a", "b", "c"]).unwrap();
        m
    }

    fn sparse(pairs: &[(&str, i32)]) -> Row<i32> {
        Row::sparse(pairs.iter().copied())
    }

    #[test]
    fn test_dense_row_needs_columns() {
        let mut m = Matrix::<i32>::default();
        let err = m.add_row(vec![1, 2, 3], None).unwrap_err();
        assert_eq!(err, FvmError::OutOfRange { len: 3, columns: 0 });
        assert!(m.is_empty());
    }

    #[test]
    fn test_set_columns_after_rows_fails() {
        let mut m = abc();
        m.add_row(vec![1], None).unwrap();
        let err = m.set_columns(["d"]).unwrap_err();
        assert_eq!(err, FvmError::IllegalState(StateError::ColumnsAfterRows));
        assert_eq!(m.column_count(), 3);
    }

    #[test]
    fn test_sparse_keys_register_sorted() {
        let mut m = Matrix::<i32>::default();
        m.add_row(sparse(&[("z", 1), ("m", 2), ("a", 3)]), None)
            .unwrap();
        assert_eq!(m.column_names(), &["a", "m", "z"]);
        assert_eq!(m.row_as_dense(0).unwrap().as_ref(), &[3, 2, 1]);
    }

    #[test]
    fn test_cache_is_dropped_when_columns_grow() {
        let mut m = abc();
        m.add_row(sparse(&[("a", 1)]), Some("s")).unwrap();
        m.add_row(vec![0, 5], Some("d")).unwrap();

        assert_eq!(m.row_as_dense("s").unwrap().as_ref(), &[1, 0, 0]);
        assert_eq!(m.row_as_sparse("d").unwrap().len(), 1);
        assert_eq!(m.cached_views(), 2);

        m.add_row(sparse(&[("e", 9)]), None).unwrap();
        assert_eq!(m.cached_views(), 0);
        assert_eq!(m.row_as_dense("s").unwrap().as_ref(), &[1, 0, 0, 0]);
        assert_eq!(m.row_as_dense("d").unwrap().as_ref(), &[0, 5, 0, 0]);
    }

    #[test]
    fn test_dense_row_without_padding_is_borrowed() {
        let mut m = abc();
        m.add_row(vec![1, 2, 3], None).unwrap();
        m.add_row(vec![1, 2], None).unwrap();

        assert!(matches!(m.row_as_dense(0).unwrap(), DenseView::Borrowed(_)));
        assert!(matches!(m.row_as_dense(1).unwrap(), DenseView::Shared(_)));
        assert_eq!(m.row_as_dense(1).unwrap().as_ref(), &[1, 2, 0]);
    }

    #[test]
    fn test_repeated_reads_share_cached_view() {
        let mut m = abc();
        m.add_row(sparse(&[("b", 2)]), None).unwrap();
        m.add_row(vec![0, 0, 3], None).unwrap();

        let (DenseView::Shared(first), DenseView::Shared(second)) =
            (m.row_as_dense(0).unwrap(), m.row_as_dense(0).unwrap())
        else {
            panic!("sparse rows read densely come from the cache");
        };
        assert!(Arc::ptr_eq(&first, &second));

        let (SparseView::Shared(first), SparseView::Shared(second)) =
            (m.row_as_sparse(1).unwrap(), m.row_as_sparse(1).unwrap())
        else {
            panic!("dense rows read sparsely come from the cache");
        };
        assert!(Arc::ptr_eq(&first, &second));
        assert!(matches!(m.row_as_sparse(0).unwrap(), SparseView::Borrowed(_)));
    }

    #[test]
    fn test_set_row_names_rules() {
        let mut m = abc();
        m.add_row(vec![1], None).unwrap();
        m.add_row(vec![2], None).unwrap();

        let err = m.set_row_names(["only"]).unwrap_err();
        assert_eq!(
            err,
            FvmError::IllegalState(StateError::RowNameCount {
                expected: 2,
                actual: 1
            })
        );

        let err = m.set_row_names(["x", "x"]).unwrap_err();
        assert_eq!(
            err,
            FvmError::IllegalState(StateError::DuplicateRowName("x".into()))
        );
        assert!(m.row_names().is_empty());

        m.set_row_names(["x", "y"]).unwrap();
        assert_eq!(m.keys().unwrap(), &["x", "y"]);
        assert_eq!(m.row_as_dense("y").unwrap().as_ref(), &[2, 0, 0]);

        let err = m.set_row_names(["p", "q"]).unwrap_err();
        assert_eq!(err, FvmError::IllegalState(StateError::RowNamesAlreadySet));
    }

    #[test]
    fn test_partial_naming_blocks_bulk_naming() {
        let mut m = abc();
        m.add_row(vec![1], Some("first")).unwrap();
        m.add_row(vec![2], None).unwrap();

        assert!(!m.is_fully_keyed());
        assert_eq!(m.row_index("first"), Some(0));
        let err = m.set_row_names(["a", "b"]).unwrap_err();
        assert_eq!(err, FvmError::IllegalState(StateError::RowNamesAlreadySet));
    }

    #[test]
    fn test_extend_rejects_whole_batch() {
        let mut m = abc();
        let batch = vec![
            sparse(&[("d", 4)]),
            Row::Dense(vec![1, 2, 3, 4]),
            Row::Dense(vec![1, 2, 3, 4, 5]),
        ];
        let err = m.extend_rows(batch).unwrap_err();
        assert_eq!(err, FvmError::OutOfRange { len: 5, columns: 4 });
        assert_eq!(m.row_count(), 0);
        assert_eq!(m.column_count(), 3);
    }

    #[test]
    fn test_extend_with_empty_batch_is_a_no_op() {
        let mut m = abc();
        m.extend_rows(Vec::<Row<i32>>::new()).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.column_count(), 3);
    }

    #[test]
    fn test_extend_sees_columns_from_earlier_rows() {
        let mut m = abc();
        m.extend_rows(vec![sparse(&[("d", 4)]), Row::Dense(vec![1, 2, 3, 4])])
            .unwrap();
        assert_eq!(m.row_count(), 2);
        assert_eq!(m.column_names(), &["a", "b", "c", "d"]);
    }

    #[test]
    fn test_get_element() {
        let mut m = Matrix::new(MatrixConfig::with_default(-1));
        m.set_columns(["a", "b"]).unwrap();
        m.add_row(vec![7], None).unwrap();
        m.add_row(sparse(&[("b", 3)]), None).unwrap();

        assert_eq!(m.get_element(0, 0), Some(7));
        assert_eq!(m.get_element(0, 1), Some(-1));
        assert_eq!(m.get_element(1, 0), Some(-1));
        assert_eq!(m.get_element(1, 1), Some(3));
        assert_eq!(m.get_element(2, 0), None);
        assert_eq!(m.get_element(0, 2), None);
        assert_eq!(m.get_col(1), Some(vec![-1, 3]));
        assert_eq!(m.get_row(0), Some(vec![7, -1]));
    }

    #[test]
    fn test_clone_starts_with_empty_cache() {
        let mut m = abc();
        m.add_row(sparse(&[("a", 1)]), None).unwrap();
        m.row_as_dense(0).unwrap();

        let copy = m.clone();
        assert_eq!(copy.cached_views(), 0);
        assert_eq!(copy.row_as_dense(0).unwrap().as_ref(), &[1, 0, 0]);
    }
}
