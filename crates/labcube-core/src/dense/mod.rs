//! Dense tensor engine
//!
//! The minimal dense backend required by the cube layer: creation, shape
//! manipulation, gathers, broadcast element-wise application, comparisons,
//! and axis-wise reductions. Storage and iteration go through
//! `scirs2_core::ndarray_ext`; numeric traits come from
//! `scirs2_core::numeric`.
//!
//! The engine knows nothing about axis names or labels. It reports failures
//! through `anyhow`; the cube layer wraps them in its typed error enum.

// Core type definition
pub mod types;

// Operation modules (organized by functionality)
mod combining;
mod comparison;
mod creation;
mod elementwise;
mod indexing;
mod shape_ops;
mod statistics;

// Re-export the main type
pub use types::DenseND;

pub(crate) use shape_ops::broadcast_shape;
