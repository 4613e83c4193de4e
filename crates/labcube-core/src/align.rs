//! Axis matching and alignment planning
//!
//! Given the axis lists of two operands, [`align`] computes a pure,
//! deterministic [`AlignPlan`]: the output axis list plus, for each operand,
//! the gathers, the permutation, and the unit-dimension insertions that make
//! the two value tensors broadcast-compatible. The plan depends only on the
//! two axis lists; applying it is the kernel's job (`Cube::apply2`).
//!
//! ## Matching
//!
//! The left operand is walked in order; an axis pairs with the right
//! operand's axis of the same name when one exists, otherwise it is unique
//! to the left. Remaining right axes are unique to the right. The output
//! order is all left axes (paired axes contributing their resolved version)
//! followed by the unique right axes in the right operand's own order.
//!
//! ## Pairwise resolution
//!
//! | left   | right  | requirement                      | resolved | realignment              |
//! |--------|--------|----------------------------------|----------|--------------------------|
//! | Index  | Index  | same label multiset              | left     | right gathered to left   |
//! | Index  | Series | right labels ⊆ left labels       | right    | left gathered to right   |
//! | Series | Index  | left labels ⊆ right labels       | left     | right gathered to left   |
//! | Series | Series | identical label sequence         | left     | none                     |
//!
//! Anything else fails with [`CubeError::IncompatibleAxes`]. Label sets are
//! never silently intersected; restriction must be asked for explicitly via
//! `filter`.

use crate::axis::{Axis, AxisKind};
use crate::axes::AxisList;
use crate::error::{CubeError, CubeResult};

/// Per-operand shaping recipe.
///
/// Application order: `gathers` (on the operand's own axis positions), then
/// `permute`, then `inserts` (ascending positions in the output rank).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct OperandPlan {
    /// Gathers along the operand's own axes, pre-permutation.
    pub gathers: Vec<(usize, Vec<usize>)>,
    /// The operand's own axes listed in output order.
    pub permute: Vec<usize>,
    /// Output positions that receive a length-1 broadcast dimension.
    pub inserts: Vec<usize>,
}

impl OperandPlan {
    /// True when applying the plan leaves the tensor untouched.
    pub fn is_identity(&self) -> bool {
        self.gathers.is_empty()
            && self.inserts.is_empty()
            && self.permute.iter().enumerate().all(|(i, &p)| i == p)
    }
}

/// The full alignment plan for a binary operation.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignPlan {
    /// Axis list of the result cube.
    pub out_axes: AxisList,
    /// Shaping recipe for the left operand.
    pub left: OperandPlan,
    /// Shaping recipe for the right operand.
    pub right: OperandPlan,
}

/// Compute the alignment plan for two axis lists.
///
/// # Examples
///
/// ```
/// use labcube_core::{align, Axis, AxisList};
///
/// let y = Axis::index("year", [2014, 2015]).unwrap();
/// let q = Axis::index("quarter", ["Q1", "Q2"]).unwrap();
/// let left = AxisList::new(vec![y.clone(), q.clone()]).unwrap();
/// let right = AxisList::new(vec![q]).unwrap();
///
/// let plan = align(&left, &right).unwrap();
/// assert_eq!(plan.out_axes.names().collect::<Vec<_>>(), vec!["year", "quarter"]);
/// assert!(plan.left.is_identity());
/// assert_eq!(plan.right.inserts, vec![0]);
/// ```
pub fn align(a: &AxisList, b: &AxisList) -> CubeResult<AlignPlan> {
    let mut out_axes: Vec<Axis> = Vec::with_capacity(a.len() + b.len());
    let mut left = OperandPlan {
        permute: (0..a.len()).collect(),
        ..Default::default()
    };
    let mut right = OperandPlan::default();

    // paired_with[ib] = output position of the right axis ib, when paired.
    let mut paired_with: Vec<Option<usize>> = vec![None; b.len()];

    for (ia, axis_a) in a.iter().enumerate() {
        match b.find(axis_a.name()) {
            None => {
                // Unique to the left: the right tensor gets a unit dimension here.
                right.inserts.push(ia);
                out_axes.push(axis_a.clone());
            }
            Some(ib) => {
                let axis_b = &b[ib];
                paired_with[ib] = Some(ia);
                let resolved = resolve_pair(axis_a, axis_b, &mut left, &mut right, ia, ib)?;
                out_axes.push(resolved);
            }
        }
    }

    // Axes unique to the right keep the right operand's own order and go to
    // the tail; the left tensor gets unit dimensions there.
    for (ib, axis_b) in b.iter().enumerate() {
        if paired_with[ib].is_none() {
            paired_with[ib] = Some(out_axes.len());
            left.inserts.push(out_axes.len());
            out_axes.push(axis_b.clone());
        }
    }

    // Right permutation: own axes sorted by their output position.
    let mut order: Vec<(usize, usize)> = paired_with
        .iter()
        .enumerate()
        .map(|(ib, pos)| (pos.expect("every right axis is placed"), ib))
        .collect();
    order.sort_unstable();
    right.permute = order.into_iter().map(|(_, ib)| ib).collect();

    Ok(AlignPlan {
        out_axes: AxisList::new(out_axes)?,
        left,
        right,
    })
}

fn resolve_pair(
    axis_a: &Axis,
    axis_b: &Axis,
    left: &mut OperandPlan,
    right: &mut OperandPlan,
    ia: usize,
    ib: usize,
) -> CubeResult<Axis> {
    // Shared payloads are trivially aligned whatever the kind.
    if axis_a.same(axis_b) {
        return Ok(axis_a.clone());
    }

    match (axis_a.kind(), axis_b.kind()) {
        (AxisKind::Index, AxisKind::Index) => {
            if axis_a.len() != axis_b.len() {
                return Err(incompatible(axis_a, "the Index axes have different lengths"));
            }
            let gather = axis_b.positions(axis_a.labels()).map_err(|_| {
                incompatible(axis_a, "the Index axes carry different label sets")
            })?;
            push_gather(right, ib, gather);
            Ok(axis_a.clone())
        }
        (AxisKind::Index, AxisKind::Series) => {
            let gather = axis_a.positions(axis_b.labels()).map_err(|_| {
                incompatible(
                    axis_a,
                    "the Series labels are not a subset of the Index labels",
                )
            })?;
            push_gather(left, ia, gather);
            Ok(axis_b.clone())
        }
        (AxisKind::Series, AxisKind::Index) => {
            let gather = axis_b.positions(axis_a.labels()).map_err(|_| {
                incompatible(
                    axis_a,
                    "the Series labels are not a subset of the Index labels",
                )
            })?;
            push_gather(right, ib, gather);
            Ok(axis_a.clone())
        }
        (AxisKind::Series, AxisKind::Series) => {
            if axis_a.labels() != axis_b.labels() {
                return Err(incompatible(
                    axis_a,
                    "the Series axes carry different label sequences",
                ));
            }
            Ok(axis_a.clone())
        }
    }
}

fn incompatible(axis: &Axis, reason: &str) -> CubeError {
    CubeError::IncompatibleAxes {
        name: axis.name().to_string(),
        reason: reason.to_string(),
    }
}

fn push_gather(plan: &mut OperandPlan, axis: usize, gather: Vec<usize>) {
    // An identity gather is a no-op; keeping the plan minimal keeps it
    // comparable across equivalent inputs.
    if gather.iter().enumerate().any(|(i, &p)| i != p) {
        plan.gathers.push((axis, gather));
    }
}
