//! Row-major dense matrix
//!
//! The fully materialized form of a feature matrix. It is only ever built
//! from rows that were already padded to the column count.

use fvm_core::{FeatureMatrix, MatrixElement, MatrixOperations};

/// Row-major 2D array
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T: Copy> DenseMatrix<T> {
    /// Build from rows that all have length `ncols`
    ///
    /// # Panics
    ///
    /// Panics if a row's length differs from `ncols`.
    pub fn from_rows<I, R>(ncols: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[T]>,
    {
        let mut data = Vec::new();
        let mut nrows = 0;
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), ncols, "row {nrows} has the wrong width");
            data.extend_from_slice(row);
            nrows += 1;
        }
        Self { nrows, ncols, data }
    }

    /// Shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Row `i`, if in bounds
    pub fn row(&self, i: usize) -> Option<&[T]> {
        if i >= self.nrows {
            return None;
        }
        let idx = i * self.ncols;
        Some(&self.data[idx..idx + self.ncols])
    }

    /// Value at (`row`, `col`), if in bounds
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        Some(self.data[row * self.ncols + col])
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        (0..self.nrows).map(move |i| {
            let idx = i * self.ncols;
            &self.data[idx..idx + self.ncols]
        })
    }

    /// Swap axes
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.ncols {
            data.extend((0..self.nrows).map(|row| self.data[row * self.ncols + col]));
        }
        Self {
            nrows: self.ncols,
            ncols: self.nrows,
            data,
        }
    }

    /// Split into owned rows
    pub fn into_rows(self) -> Vec<Vec<T>> {
        if self.ncols == 0 {
            return vec![Vec::new(); self.nrows];
        }
        self.data.chunks(self.ncols).map(<[T]>::to_vec).collect()
    }
}

impl<T: MatrixElement> FeatureMatrix for DenseMatrix<T> {
    type Element = T;

    fn get_element(&self, row: usize, col: usize) -> Option<T> {
        self.get(row, col)
    }

    fn dimensions(&self) -> (usize, usize) {
        self.shape()
    }
}

impl<T: MatrixElement> MatrixOperations for DenseMatrix<T> {
    fn get_row(&self, row_index: usize) -> Option<Vec<T>> {
        self.row(row_index).map(<[T]>::to_vec)
    }
}
