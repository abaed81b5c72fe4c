//! Abstract interfaces for feature vector matrices
//!
//! Traits are pure interfaces; the concrete matrix lives in the `fvm` crate.

pub mod element;
pub mod matrix;

pub use element::MatrixElement;
pub use matrix::{FeatureMatrix, MatrixOperations};
