//! # labcube-core
//!
//! Labeled n-dimensional arrays ("cubes") with a deterministic axis algebra.
//!
//! A [`Cube`] wraps a dense value tensor with named, labeled [`Axis`] objects.
//! Binary operations match axes between operands by name, align the labels of
//! paired axes, and broadcast over unpaired ones, so that arithmetic between
//! cubes of different shape and axis order produces a canonical result:
//!
//! - **Index axes** carry unique labels and align by label lookup: two Index
//!   axes with the same label set combine whatever their orders are.
//! - **Series axes** carry arbitrary labels and align positionally; an Index
//!   operand is gathered to the Series' labels.
//! - Label sets are never intersected silently: incompatible axes fail with
//!   a typed error instead of inner-joining.
//!
//! ## Quick Start
//!
//! ```
//! use labcube_core::{Axis, Cube, DenseND};
//!
//! let year = Axis::index("year", [2014, 2015]).unwrap();
//! let quarter = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
//!
//! let sales = Cube::new(
//!     DenseND::from_vec(vec![14.0, 16.0, 13.0, 20.0, 15.0, 15.0, 10.0, 19.0], &[2, 4]).unwrap(),
//!     vec![year, quarter.clone()],
//! )
//! .unwrap();
//! let prices = Cube::new(
//!     DenseND::from_vec(vec![1.50, 1.52, 1.53, 1.55], &[4]).unwrap(),
//!     quarter,
//! )
//! .unwrap();
//!
//! // "quarter" pairs by name, "year" broadcasts; the result is year x quarter.
//! let revenue = sales.try_mul(&prices).unwrap();
//! assert_eq!(revenue.axes().names().collect::<Vec<_>>(), vec!["year", "quarter"]);
//!
//! // Reductions drop the reduced axes; reducing everything gives a scalar.
//! let total = revenue.sum::<&str>(&[]).unwrap();
//! assert!((total.scalar_value().unwrap() - 186.26_f64).abs() < 1e-9);
//! ```
//!
//! ## Architecture
//!
//! Leaves first: [`Label`] scalars, [`Axis`] (Index/Series), [`AxisList`],
//! [`Cube`]. The [`align`] function computes a pure [`AlignPlan`] from two
//! axis lists; the kernel ([`apply2`]) applies it with the dense engine's
//! transpose/gather/broadcast primitives. The engine itself ([`DenseND`])
//! wraps `scirs2_core`'s dynamic arrays and stays ignorant of labels.
//!
//! Everything is value-oriented: no operation mutates an operand, buffers
//! and axes are shared only where that is indistinguishable from a copy,
//! and plans depend only on the operand axis lists.
//!
//! ## Error Handling
//!
//! Failure modes are enumerated in [`CubeError`]; operations return
//! [`CubeResult`]. The std arithmetic operators delegate to the fallible
//! `try_*` methods and panic on alignment failure.
//!
//! ## Features
//!
//! - `serde`: serialization derives on the plain data holders
//!   ([`DenseND`], [`Label`]).

#![deny(warnings)]

pub mod align;
pub mod axes;
pub mod axis;
pub mod cube;
pub mod dense;
pub mod error;
pub mod label;

#[cfg(test)]
mod property_tests;

pub use align::{align, AlignPlan, OperandPlan};
pub use axes::{AxisId, AxisList, Shape};
pub use axis::{Axis, AxisKind};
pub use cube::arith::apply2;
pub use cube::{concatenate, Cube, Reducer};
pub use dense::DenseND;
pub use error::{CubeError, CubeResult};
pub use label::{labels, Label};
