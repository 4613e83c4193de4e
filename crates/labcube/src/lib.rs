//! # LabCube - labeled n-dimensional arrays
//!
//! This is the meta crate re-exporting the LabCube components for
//! convenient access.
//!
//! A cube is a dense tensor whose dimensions carry names and label vectors.
//! Binary operations match axes by name, align labels, and broadcast, so
//! that arithmetic between differently shaped and differently ordered
//! operands produces a canonical result or a typed error - never a silent
//! inner join.
//!
//! ## Quick Start
//!
//! ```
//! use labcube::prelude::*;
//!
//! let year = Axis::index("year", [2014, 2015])?;
//! let quarter = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"])?;
//! let sales = Cube::new(
//!     DenseND::from_vec(vec![14.0, 16.0, 13.0, 20.0, 15.0, 15.0, 10.0, 19.0], &[2, 4])?,
//!     vec![year, quarter.clone()],
//! )?;
//!
//! // Scalar broadcast keeps the axes.
//! let halved = &sales * 0.5;
//! assert_eq!(halved.axes(), sales.axes());
//!
//! // A single-axis cube aligns to the matching axis and broadcasts over
//! // the rest.
//! let prices = Cube::new(
//!     DenseND::from_vec(vec![1.50, 1.52, 1.53, 1.55], &[4])?,
//!     quarter,
//! )?;
//! let revenue = sales.try_mul(&prices)?;
//! assert_eq!(revenue.rank(), 2);
//! # Ok::<(), labcube::core::CubeError>(())
//! ```
//!
//! ## Components
//!
//! ### Core ([`core`])
//!
//! Labels, axes (Index/Series), axis lists, the alignment planner, the
//! broadcast kernel, reductions, grouping, and selection.

pub use labcube_core as core;

pub use labcube_core::{
    align, apply2, concatenate, labels, AlignPlan, Axis, AxisId, AxisKind, AxisList, Cube,
    CubeError, CubeResult, DenseND, Label, OperandPlan, Reducer, Shape,
};

/// Convenient glob import for the common surface.
pub mod prelude {
    pub use labcube_core::{
        align, apply2, concatenate, labels, Axis, AxisKind, AxisList, Cube, CubeError, CubeResult,
        DenseND, Label, Reducer,
    };
}
