//! Cube construction, accessors, and structural operations

use crate::axes::{AxisId, AxisList, Shape};
use crate::axis::Axis;
use crate::dense::DenseND;
use crate::error::{CubeError, CubeResult};
use std::fmt;

/// A dense value tensor with named, labeled axes.
///
/// Invariants: the tensor rank equals the number of axes and each axis
/// length matches the corresponding tensor dimension. Cubes are immutable;
/// axes (and, transitively, label vectors) are shared between cubes rather
/// than copied.
///
/// # Examples
///
/// ```
/// use labcube_core::{Axis, Cube, DenseND};
///
/// let year = Axis::index("year", [2014, 2015]).unwrap();
/// let quarter = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
/// let sales = Cube::new(
///     DenseND::from_vec(vec![14.0, 16.0, 13.0, 20.0, 15.0, 15.0, 10.0, 19.0], &[2, 4]).unwrap(),
///     vec![year, quarter],
/// )
/// .unwrap();
/// assert_eq!(sales.rank(), 2);
/// assert_eq!(&sales.shape()[..], &[2, 4]);
/// ```
#[derive(Clone, PartialEq)]
pub struct Cube<T> {
    axes: AxisList,
    values: DenseND<T>,
}

impl<T> Cube<T> {
    /// Build a cube from values and axes, checking shape agreement.
    ///
    /// `axes` accepts an [`AxisList`], a `Vec<Axis>`, or a single [`Axis`].
    ///
    /// # Errors
    ///
    /// [`CubeError::ShapeMismatch`] when the rank or any axis length
    /// disagrees with the tensor, [`CubeError::DuplicateAxis`] when two axes
    /// share a name.
    pub fn new<A>(values: DenseND<T>, axes: A) -> CubeResult<Self>
    where
        A: TryInto<AxisList>,
        A::Error: Into<CubeError>,
    {
        let axes: AxisList = axes.try_into().map_err(Into::into)?;
        if values.rank() != axes.len() || values.shape() != &axes.shape()[..] {
            return Err(CubeError::ShapeMismatch {
                expected: axes.shape().to_vec(),
                got: values.shape().to_vec(),
            });
        }
        Ok(Self { axes, values })
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    /// Axis lengths in order.
    pub fn shape(&self) -> Shape {
        self.axes.shape()
    }

    /// The axis list.
    pub fn axes(&self) -> &AxisList {
        &self.axes
    }

    /// The raw value tensor.
    pub fn values(&self) -> &DenseND<T> {
        &self.values
    }

    /// Resolve an axis designator (name or position) to the axis.
    pub fn axis<A: AxisId>(&self, id: A) -> CubeResult<&Axis> {
        self.axes.axis(id)
    }

    /// Split the cube into its parts.
    pub fn into_parts(self) -> (DenseND<T>, AxisList) {
        (self.values, self.axes)
    }

    pub(crate) fn from_validated(values: DenseND<T>, axes: AxisList) -> Self {
        debug_assert_eq!(values.shape(), &axes.shape()[..]);
        Self { axes, values }
    }
}

impl<T: Clone> Cube<T> {
    /// Rank-0 cube holding a single value.
    ///
    /// In binary operations a scalar behaves as a degenerate cube: it pairs
    /// with nothing and broadcasts against everything.
    pub fn scalar(value: T) -> Self {
        Self {
            axes: AxisList::empty(),
            values: DenseND::scalar(value),
        }
    }

    /// The value of a rank-0 cube.
    pub fn scalar_value(&self) -> CubeResult<T> {
        Ok(self.values.scalar_value()?)
    }

    /// Apply a function to every value, keeping the axes.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::{Axis, Cube, DenseND};
    ///
    /// let k = Axis::index("k", ["a", "b"]).unwrap();
    /// let c = Cube::new(DenseND::from_vec(vec![1.0, 2.0], &[2]).unwrap(), k).unwrap();
    /// let doubled = c.apply(|x| x * 2.0);
    /// assert_eq!(doubled.values().to_vec(), vec![2.0, 4.0]);
    /// assert_eq!(doubled.axes(), c.axes());
    /// ```
    pub fn apply<U, F>(&self, f: F) -> Cube<U>
    where
        F: Fn(&T) -> U,
    {
        Cube {
            axes: self.axes.clone(),
            values: self.values.map(f),
        }
    }

    /// Permute the axes by names or positions.
    ///
    /// # Errors
    ///
    /// [`CubeError::InvalidPermutation`] when the order is incomplete,
    /// repeats an axis, or names an unknown axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::{Axis, Cube, DenseND};
    ///
    /// let y = Axis::index("year", [2014, 2015]).unwrap();
    /// let q = Axis::index("quarter", ["Q1", "Q2"]).unwrap();
    /// let c = Cube::new(DenseND::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap(), vec![y, q]).unwrap();
    ///
    /// let t = c.transpose(&["quarter", "year"]).unwrap();
    /// assert_eq!(t.axes().names().collect::<Vec<_>>(), vec!["quarter", "year"]);
    /// assert_eq!(t.values()[&[0, 1]], 3);
    /// ```
    pub fn transpose<A: AxisId>(&self, order: &[A]) -> CubeResult<Self> {
        if order.len() != self.rank() {
            return Err(CubeError::InvalidPermutation {
                reason: format!("expected {} entries, got {}", self.rank(), order.len()),
            });
        }
        let positions: Vec<usize> = order
            .iter()
            .map(|id| {
                id.locate(&self.axes)
                    .map_err(|_| CubeError::InvalidPermutation {
                        reason: format!("unknown axis {}", id.describe()),
                    })
            })
            .collect::<CubeResult<_>>()?;
        let axes = self.axes.transpose(&positions)?;
        let values = self.values.permute(&positions)?;
        Ok(Self { axes, values })
    }

    /// Rename one axis, keeping values and labels.
    pub fn rename_axis<A: AxisId>(&self, id: A, new_name: impl Into<String>) -> CubeResult<Self> {
        let position = self.axes.locate(id)?;
        let renamed = self.axes[position].rename(new_name)?;
        let axes = self.axes.replace(position, renamed)?;
        Ok(Self {
            axes,
            values: self.values.clone(),
        })
    }

    /// Exchange two axes.
    pub fn swap_axes<A: AxisId, B: AxisId>(&self, first: A, second: B) -> CubeResult<Self> {
        let i = self.axes.locate(first)?;
        let j = self.axes.locate(second)?;
        let mut order: Vec<usize> = (0..self.rank()).collect();
        order.swap(i, j);
        let axes = self.axes.transpose(&order)?;
        let values = self.values.permute(&order)?;
        Ok(Self { axes, values })
    }

    /// Substitute an axis of equal length (labels may differ).
    ///
    /// # Errors
    ///
    /// [`CubeError::ShapeMismatch`] when the lengths differ,
    /// [`CubeError::DuplicateAxis`] when the new name collides.
    pub fn replace_axis<A: AxisId>(&self, id: A, new_axis: Axis) -> CubeResult<Self> {
        let position = self.axes.locate(id)?;
        if new_axis.len() != self.axes[position].len() {
            return Err(CubeError::ShapeMismatch {
                expected: vec![self.axes[position].len()],
                got: vec![new_axis.len()],
            });
        }
        let axes = self.axes.replace(position, new_axis)?;
        Ok(Self {
            axes,
            values: self.values.clone(),
        })
    }

    /// Add a new axis at `position`, repeating the values along it.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::{Axis, Cube, DenseND};
    ///
    /// let k = Axis::index("k", ["a", "b"]).unwrap();
    /// let c = Cube::new(DenseND::from_vec(vec![1.0, 2.0], &[2]).unwrap(), k).unwrap();
    /// let s = Axis::index("scenario", ["low", "high"]).unwrap();
    /// let e = c.insert_axis(s, 0).unwrap();
    /// assert_eq!(&e.shape()[..], &[2, 2]);
    /// assert_eq!(e.values()[&[1, 0]], 1.0);
    /// ```
    pub fn insert_axis(&self, axis: Axis, position: usize) -> CubeResult<Self> {
        let axes = self.axes.insert_at(position, axis)?;
        let expanded = self.values.unsqueeze(position)?;
        let values = expanded.broadcast_to(&axes.shape())?;
        Ok(Self { axes, values })
    }

    /// Reorder values along the equally named existing axis so they line up
    /// with `new_axis`'s labels, and carry `new_axis` in the result.
    ///
    /// # Errors
    ///
    /// [`CubeError::LabelNotFound`] when `new_axis` carries a label absent
    /// from the existing axis.
    pub fn align_axis(&self, new_axis: &Axis) -> CubeResult<Self> {
        let position = self.axes.locate(new_axis.name())?;
        let gather = self.axes[position].positions(new_axis.labels())?;
        let values = self.values.take(&gather, position)?;
        let axes = self.axes.replace(position, new_axis.clone())?;
        Ok(Self { axes, values })
    }
}

impl<T: fmt::Debug> fmt::Debug for Cube<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cube")
            .field("axes", &self.axes)
            .field("values", &self.values)
            .finish()
    }
}

impl<T: fmt::Display + Clone> fmt::Display for Cube<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "axes:")?;
        for axis in &self.axes {
            writeln!(f, "{}", axis)?;
        }
        write!(f, "values:\n{}", self.values)
    }
}
