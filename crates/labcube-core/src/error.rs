//! Typed error surface for cube operations
//!
//! Every failure mode of the axis algebra is enumerated here. Failures are
//! deterministic and data-dependent; nothing is retried and nothing is
//! swallowed. The dense engine underneath reports its own failures through
//! `anyhow`, which the cube layer wraps in [`CubeError::Engine`].
//!
//! # Examples
//!
//! ```
//! use labcube_core::{Axis, CubeError};
//!
//! let err = Axis::index("k", ["a", "b", "a"]).unwrap_err();
//! assert!(matches!(err, CubeError::UniquenessViolation { .. }));
//! ```

use crate::label::Label;
use thiserror::Error;

/// Errors raised by axis, axis-list, and cube operations.
#[derive(Error, Debug)]
pub enum CubeError {
    /// Two axes with the same name in one axis list.
    #[error("duplicate axis '{name}'")]
    DuplicateAxis { name: String },

    /// An Index axis would acquire a duplicate label.
    #[error("axis '{axis}' would contain duplicate label {label}")]
    UniquenessViolation { axis: String, label: Label },

    /// A lookup requested a label absent from the axis.
    #[error("label {label} not found on axis '{axis}'")]
    LabelNotFound { axis: String, label: Label },

    /// A paired axis failed the alignment compatibility rules.
    #[error("cannot align axes '{name}': {reason}")]
    IncompatibleAxes { name: String, reason: String },

    /// Operand shapes cannot be reconciled.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A positional selector exceeds the axis length.
    #[error("position {index} out of range for axis '{axis}' of length {len}")]
    IndexOutOfRange {
        axis: String,
        index: usize,
        len: usize,
    },

    /// Malformed transpose argument (incomplete or repeated entries).
    #[error("invalid permutation: {reason}")]
    InvalidPermutation { reason: String },

    /// Grouping requested with an order-sensitive reducer.
    #[error("reducer '{name}' is order-sensitive and cannot be used for grouping")]
    NonGroupableReducer { name: String },

    /// A reducer name did not parse.
    #[error("unknown reducer '{name}'")]
    UnknownReducer { name: String },

    /// No axis matched the given name or position.
    #[error("axis {selector} not found")]
    AxisNotFound { selector: String },

    /// Axis names must be non-empty.
    #[error("axis name must not be empty")]
    EmptyAxisName,

    /// Failure propagated from the dense tensor engine.
    #[error("tensor engine: {0}")]
    Engine(#[from] anyhow::Error),
}

impl From<std::convert::Infallible> for CubeError {
    fn from(x: std::convert::Infallible) -> Self {
        match x {}
    }
}

/// Result type alias for cube operations.
pub type CubeResult<T> = Result<T, CubeError>;
