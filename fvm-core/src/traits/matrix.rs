//! Core matrix abstraction traits
//!
//! These traits let callers read a matrix without knowing whether its rows
//! are stored densely or sparsely.

use alloc::vec::Vec;

use super::element::MatrixElement;

/// Positional read access to a matrix of values
pub trait FeatureMatrix {
    /// The element type stored in this matrix
    type Element: MatrixElement;

    /// Get the value at the specified position
    ///
    /// Positions that exist but hold no explicit value read as the
    /// matrix default. Returns `None` only when out of bounds.
    fn get_element(&self, row: usize, col: usize) -> Option<Self::Element>;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Number of rows
    fn nrows(&self) -> usize {
        self.dimensions().0
    }

    /// Number of columns
    fn ncols(&self) -> usize {
        self.dimensions().1
    }
}

/// Extension trait for whole row/column reads
pub trait MatrixOperations: FeatureMatrix {
    /// Get every value of a row in column order
    fn get_row(&self, row_index: usize) -> Option<Vec<Self::Element>> {
        if row_index >= self.nrows() {
            return None;
        }
        (0..self.ncols())
            .map(|col| self.get_element(row_index, col))
            .collect()
    }

    /// Get every value of a column in row order
    fn get_col(&self, col_index: usize) -> Option<Vec<Self::Element>> {
        if col_index >= self.ncols() {
            return None;
        }
        (0..self.nrows())
            .map(|row| self.get_element(row, col_index))
            .collect()
    }
}
