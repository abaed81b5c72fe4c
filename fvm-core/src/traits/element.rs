//! Matrix element type constraints
//!
//! This module defines the trait that constrains what types can be
//! stored as values in a feature vector matrix.

/// Trait for types that can be stored as matrix values
///
/// Values are compared against the matrix default when a dense row is
/// turned into its sparse view, so they must be:
/// - Copy: Can be copied without allocation
/// - PartialEq: Can be compared for equality
/// - Send + Sync: Rows can be materialized from several threads
pub trait MatrixElement: Copy + PartialEq + core::fmt::Debug + Send + Sync + 'static {
    /// Convert from f64 for generic construction
    ///
    /// Used to build the zero default value when the caller does not
    /// configure one.
    fn from_f64(value: f64) -> Self;

    /// Convert to f64 for generic operations
    fn to_f64(self) -> f64;
}

macro_rules! impl_matrix_element {
    ($($ty:ty),*) => {
        $(
            impl MatrixElement for $ty {
                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_matrix_element!(f32, f64, i32, i64, u32, u64);
