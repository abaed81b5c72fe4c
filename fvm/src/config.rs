//! Construction-time configuration for a matrix

use fvm_core::MatrixElement;

/// Configuration for a [`Matrix`](crate::Matrix)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(default, bound(deserialize = "T: MatrixElement + serde::Deserialize<'de>"))
)]
pub struct MatrixConfig<T> {
    /// Value read for any position a row does not store
    pub default_value: T,
    /// Whether [`Matrix::row`](crate::Matrix::row) returns sparse views
    pub default_to_hashed_rows: bool,
}

impl<T: MatrixElement> MatrixConfig<T> {
    /// Create config with a default value
    pub fn with_default(default_value: T) -> Self {
        Self {
            default_value,
            default_to_hashed_rows: false,
        }
    }

    /// Set the default value
    pub fn with_default_value(mut self, default_value: T) -> Self {
        self.default_value = default_value;
        self
    }

    /// Prefer sparse views for bracket access
    pub fn with_hashed_rows(mut self, hashed: bool) -> Self {
        self.default_to_hashed_rows = hashed;
        self
    }
}

impl<T: MatrixElement> Default for MatrixConfig<T> {
    fn default() -> Self {
        Self::with_default(T::from_f64(0.0))
    }
}
