#![no_std]

//! FVM Core - Feature Vector Matrix building blocks
//!
//! This crate provides the pieces of a feature vector matrix that do not
//! depend on row storage: the error type, the element trait, the ordered
//! name registry shared by rows and columns, and the explicit row key.

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod error;
pub mod key;
pub mod registry;
pub mod traits;

pub use error::*;
pub use key::RowKey;
pub use registry::NameRegistry;
pub use traits::*;
