//! Ordered axis collections
//!
//! An [`AxisList`] is the ordered sequence of axes carried by a cube. Names
//! within a list are pairwise distinct; the list length is the rank of the
//! associated value tensor. Like axes, lists are immutable: every structural
//! operation returns a new list.
//!
//! Operations that designate an axis accept either its name or its position
//! through the [`AxisId`] trait.

use crate::axis::Axis;
use crate::error::{CubeError, CubeResult};
use smallvec::SmallVec;

/// Shape type for axis lengths, avoiding heap allocation at common ranks.
pub type Shape = SmallVec<[usize; 6]>;

/// Ordered collection of axes with pairwise distinct names.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AxisList {
    axes: Vec<Axis>,
}

impl AxisList {
    /// Build a list from axes, rejecting duplicate names.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::{Axis, AxisList};
    ///
    /// let y = Axis::index("year", [2014, 2015]).unwrap();
    /// let q = Axis::index("quarter", ["Q1", "Q2"]).unwrap();
    /// let axes = AxisList::new(vec![y, q]).unwrap();
    /// assert_eq!(axes.len(), 2);
    /// ```
    pub fn new(axes: Vec<Axis>) -> CubeResult<Self> {
        for (i, axis) in axes.iter().enumerate() {
            if axes[..i].iter().any(|a| a.name() == axis.name()) {
                return Err(CubeError::DuplicateAxis {
                    name: axis.name().to_string(),
                });
            }
        }
        Ok(Self { axes })
    }

    /// The empty list (rank 0).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of axes (cube rank).
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// True for the rank-0 list.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Iterate over the axes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Axis> {
        self.axes.iter()
    }

    /// Iterate over axis names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|a| a.name())
    }

    /// Axis lengths in order.
    pub fn shape(&self) -> Shape {
        self.axes.iter().map(|a| a.len()).collect()
    }

    /// Axis at a position, if any.
    pub fn get(&self, position: usize) -> Option<&Axis> {
        self.axes.get(position)
    }

    /// Position of the axis with the given name, if any.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.name() == name)
    }

    /// Whether an axis with the given name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Resolve an axis designator to a position.
    pub fn locate<A: AxisId>(&self, id: A) -> CubeResult<usize> {
        id.locate(self)
    }

    /// Resolve an axis designator to the axis itself.
    pub fn axis<A: AxisId>(&self, id: A) -> CubeResult<&Axis> {
        let position = id.locate(self)?;
        Ok(&self.axes[position])
    }

    /// Append an axis, rejecting a duplicate name.
    pub fn insert(&self, axis: Axis) -> CubeResult<Self> {
        self.insert_at(self.len(), axis)
    }

    /// Insert an axis at a position, rejecting a duplicate name.
    pub fn insert_at(&self, position: usize, axis: Axis) -> CubeResult<Self> {
        if self.contains(axis.name()) {
            return Err(CubeError::DuplicateAxis {
                name: axis.name().to_string(),
            });
        }
        if position > self.len() {
            return Err(CubeError::IndexOutOfRange {
                axis: axis.name().to_string(),
                index: position,
                len: self.len(),
            });
        }
        let mut axes = self.axes.clone();
        axes.insert(position, axis);
        Ok(Self { axes })
    }

    /// Remove the designated axis.
    pub fn remove<A: AxisId>(&self, id: A) -> CubeResult<Self> {
        let position = id.locate(self)?;
        let mut axes = self.axes.clone();
        axes.remove(position);
        Ok(Self { axes })
    }

    /// Replace the axis at a position, keeping the name-uniqueness invariant.
    pub fn replace(&self, position: usize, axis: Axis) -> CubeResult<Self> {
        if position >= self.len() {
            return Err(CubeError::IndexOutOfRange {
                axis: axis.name().to_string(),
                index: position,
                len: self.len(),
            });
        }
        if self
            .axes
            .iter()
            .enumerate()
            .any(|(i, a)| i != position && a.name() == axis.name())
        {
            return Err(CubeError::DuplicateAxis {
                name: axis.name().to_string(),
            });
        }
        let mut axes = self.axes.clone();
        axes[position] = axis;
        Ok(Self { axes })
    }

    /// Permute the list by the given position order.
    ///
    /// The order must be a complete, duplicate-free permutation of
    /// `0..len()`.
    pub fn transpose(&self, order: &[usize]) -> CubeResult<Self> {
        if order.len() != self.len() {
            return Err(CubeError::InvalidPermutation {
                reason: format!("expected {} entries, got {}", self.len(), order.len()),
            });
        }
        let mut seen = vec![false; self.len()];
        for &p in order {
            if p >= self.len() {
                return Err(CubeError::InvalidPermutation {
                    reason: format!("position {} out of range for rank {}", p, self.len()),
                });
            }
            if seen[p] {
                return Err(CubeError::InvalidPermutation {
                    reason: format!("position {} repeated", p),
                });
            }
            seen[p] = true;
        }
        let axes = order.iter().map(|&p| self.axes[p].clone()).collect();
        Ok(Self { axes })
    }
}

impl std::ops::Index<usize> for AxisList {
    type Output = Axis;

    fn index(&self, position: usize) -> &Axis {
        &self.axes[position]
    }
}

impl<'a> IntoIterator for &'a AxisList {
    type Item = &'a Axis;
    type IntoIter = std::slice::Iter<'a, Axis>;

    fn into_iter(self) -> Self::IntoIter {
        self.axes.iter()
    }
}

impl TryFrom<Vec<Axis>> for AxisList {
    type Error = CubeError;

    fn try_from(axes: Vec<Axis>) -> CubeResult<Self> {
        Self::new(axes)
    }
}

impl TryFrom<Axis> for AxisList {
    type Error = CubeError;

    fn try_from(axis: Axis) -> CubeResult<Self> {
        Self::new(vec![axis])
    }
}

/// Designates an axis within an [`AxisList`] by name or by position.
pub trait AxisId {
    /// Resolve to a position within `axes`.
    fn locate(&self, axes: &AxisList) -> CubeResult<usize>;

    /// Human-readable form for error messages.
    fn describe(&self) -> String;
}

impl AxisId for usize {
    fn locate(&self, axes: &AxisList) -> CubeResult<usize> {
        if *self < axes.len() {
            Ok(*self)
        } else {
            Err(CubeError::AxisNotFound {
                selector: self.describe(),
            })
        }
    }

    fn describe(&self) -> String {
        format!("#{}", self)
    }
}

impl AxisId for str {
    fn locate(&self, axes: &AxisList) -> CubeResult<usize> {
        axes.find(self).ok_or_else(|| CubeError::AxisNotFound {
            selector: self.describe(),
        })
    }

    fn describe(&self) -> String {
        format!("'{}'", self)
    }
}

impl AxisId for String {
    fn locate(&self, axes: &AxisList) -> CubeResult<usize> {
        self.as_str().locate(axes)
    }

    fn describe(&self) -> String {
        format!("'{}'", self)
    }
}

impl<A: AxisId + ?Sized> AxisId for &A {
    fn locate(&self, axes: &AxisList) -> CubeResult<usize> {
        (**self).locate(axes)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
