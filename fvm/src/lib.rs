//! FVM - Feature Vector Matrix
//!
//! A row-oriented matrix where each row is stored either densely (values in
//! column order) or sparsely (column name to value), and every row can be
//! read back in either form.
//!
//! ## Architecture
//!
//! - **fvm-core**: errors, row keys, the name registry and matrix traits (`no_std`)
//! - **fvm**: the [`Matrix`] with its row store, view cache, dense export and transpose
//!
//! ## Quick Start
//!
//! ```rust
//! use fvm::{Matrix, MatrixConfig, Row};
//!
//! fn example() -> fvm::Result<()> {
//!     let mut matrix = Matrix::new(MatrixConfig::<i64>::default());
//!     matrix.set_columns(["a", "b", "c"])?;
//!
//!     matrix.add_row(vec![1i64, 2, 3], Some("dense"))?;
//!     matrix.add_row(Row::sparse([("a", 1i64), ("d", 4)]), Some("sparse"))?;
//!
//!     // The dense row picks up the new column at read time
//!     assert_eq!(matrix.row_as_dense("dense")?.as_ref(), &[1, 2, 3, 0]);
//!     assert_eq!(matrix.row_as_dense("sparse")?.as_ref(), &[1, 0, 0, 4]);
//!
//!     let transposed = matrix.transpose()?;
//!     assert_eq!(transposed.column_names(), &["dense", "sparse"]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **serde**: `Serialize`/`Deserialize` for [`MatrixConfig`] and [`Row`]

// Re-export core abstractions
pub use fvm_core::{
    // Core traits
    FeatureMatrix, MatrixElement, MatrixOperations,
    // Lookup and naming
    NameRegistry, RowKey,
    // Error handling
    FvmError, MissingRow, Result, StateError,
};

mod cache;
pub mod config;
pub mod dense;
pub mod iter;
pub mod matrix;
pub mod row;

// Public exports
pub use config::MatrixConfig;
pub use dense::DenseMatrix;
pub use iter::{Entry, Iter};
pub use matrix::Matrix;
pub use row::{DenseView, Row, RowBatch, RowView, SparseRow, SparseView};
