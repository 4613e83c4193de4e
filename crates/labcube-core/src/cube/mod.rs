//! Labeled n-dimensional arrays
//!
//! A [`Cube`] pairs an [`AxisList`](crate::AxisList) with a dense value
//! tensor whose shape agrees with the axis lengths. Every operation returns
//! a new cube; operands are never mutated.
//!
//! The sub-modules mirror the operation groups of the public surface:
//! construction and structural operations ([`types`]), the binary kernel
//! with arithmetic and comparisons ([`arith`]), reductions and grouping
//! ([`reduce`]), label- and position-based selection ([`select`]), and
//! concatenation ([`combine`]).

pub mod arith;
pub mod combine;
pub mod reduce;
pub mod select;
pub mod types;

pub use combine::concatenate;
pub use reduce::Reducer;
pub use types::Cube;
