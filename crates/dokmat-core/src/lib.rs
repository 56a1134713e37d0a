//! Core data structures for dokmat (pure Rust)
//!
//! - [`DokMatrix`]: mutable, thread-safe dictionary-of-keys store
//! - [`Crs`] / [`Ccs`]: compressed row / column storage
//! - [`Cvs`]: compressed value storage (distinct value -> linear indices)

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ccs;
pub mod coords;
pub mod crs;
pub mod cvs;
pub mod dense;
pub mod dok;
pub mod element;
pub mod error;

pub use ccs::Ccs;
pub use coords::MajorOrder;
pub use crs::Crs;
pub use cvs::Cvs;
pub use dense::Dense;
pub use dok::{CoordinateKeys, CoordinateMatrix, DokMatrix, KeyStrategy, LinearIndexKeys, LinearIndexMatrix};
pub use element::Element;
pub use error::{Axis, Result, SparseError};
