//! Reductions and groupings along named axes
//!
//! Reductions remove the reduced axes from the axis list in their original
//! positions; reducing every axis yields a rank-0 cube. Each reduction comes
//! in two spellings: name the axes to reduce, or name the axes to keep.
//! Grouping partitions positions of one axis by label equality and reduces
//! each partition.

use crate::axes::{AxisId, AxisList};
use crate::axis::Axis;
use crate::cube::types::Cube;
use crate::dense::DenseND;
use crate::error::{CubeError, CubeResult};
use scirs2_core::numeric::{FromPrimitive, Num};
use std::collections::HashMap;
use std::str::FromStr;

/// Named reducers for [`Cube::group`].
///
/// `First` and `Last` are order-sensitive: grouping collects positions by
/// label equality with no meaningful internal order, so they are rejected
/// with [`CubeError::NonGroupableReducer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reducer {
    /// Sum of the group.
    Sum,
    /// Product of the group.
    Prod,
    /// Arithmetic mean of the group.
    Mean,
    /// Minimum of the group.
    Min,
    /// Maximum of the group.
    Max,
    /// First value of the group (order-sensitive).
    First,
    /// Last value of the group (order-sensitive).
    Last,
}

impl Reducer {
    /// Whether the reducer's result is independent of the value order.
    pub fn is_order_insensitive(&self) -> bool {
        !matches!(self, Reducer::First | Reducer::Last)
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Reducer::Sum => "sum",
            Reducer::Prod => "prod",
            Reducer::Mean => "mean",
            Reducer::Min => "min",
            Reducer::Max => "max",
            Reducer::First => "first",
            Reducer::Last => "last",
        }
    }

    fn apply_axis<T>(&self, values: &DenseND<T>, axis: usize) -> anyhow::Result<DenseND<T>>
    where
        T: Clone + Num + FromPrimitive + PartialOrd,
    {
        match self {
            Reducer::Sum => values.sum_axis(axis),
            Reducer::Prod => values.prod_axis(axis),
            Reducer::Mean => values.mean_axis(axis),
            Reducer::Min => values.min_axis(axis),
            Reducer::Max => values.max_axis(axis),
            Reducer::First => values.reduce_axis(axis, |lane| lane[0].clone()),
            Reducer::Last => values.reduce_axis(axis, |lane| lane[lane.len() - 1].clone()),
        }
    }
}

impl FromStr for Reducer {
    type Err = CubeError;

    fn from_str(s: &str) -> CubeResult<Self> {
        match s {
            "sum" => Ok(Reducer::Sum),
            "prod" => Ok(Reducer::Prod),
            "mean" => Ok(Reducer::Mean),
            "min" => Ok(Reducer::Min),
            "max" => Ok(Reducer::Max),
            "first" => Ok(Reducer::First),
            "last" => Ok(Reducer::Last),
            other => Err(CubeError::UnknownReducer {
                name: other.to_string(),
            }),
        }
    }
}

impl<T: Clone> Cube<T> {
    /// Positions of the axes to reduce; an empty designator list means all.
    fn reduced_positions<A: AxisId>(&self, axes: &[A]) -> CubeResult<Vec<usize>> {
        if axes.is_empty() {
            return Ok((0..self.rank()).collect());
        }
        let mut positions = Vec::with_capacity(axes.len());
        for id in axes {
            let p = self.axes().locate(id)?;
            if positions.contains(&p) {
                return Err(CubeError::DuplicateAxis {
                    name: self.axes()[p].name().to_string(),
                });
            }
            positions.push(p);
        }
        positions.sort_unstable();
        Ok(positions)
    }

    /// Positions of the axes to reduce when the named axes are kept.
    fn complement_positions<A: AxisId>(&self, keep: &[A]) -> CubeResult<Vec<usize>> {
        let mut kept = vec![false; self.rank()];
        for id in keep {
            let p = self.axes().locate(id)?;
            if kept[p] {
                return Err(CubeError::DuplicateAxis {
                    name: self.axes()[p].name().to_string(),
                });
            }
            kept[p] = true;
        }
        Ok((0..self.rank()).filter(|&p| !kept[p]).collect())
    }

    /// Reduce the axes at `positions` (ascending) with an axis-removing
    /// engine operation, dropping those axes from the axis list.
    fn reduce_at<F>(&self, positions: &[usize], op: F) -> CubeResult<Cube<T>>
    where
        F: Fn(&DenseND<T>, usize) -> anyhow::Result<DenseND<T>>,
    {
        let mut values = self.values().clone();
        for &p in positions.iter().rev() {
            values = op(&values, p)?;
        }
        let mut axes = Vec::with_capacity(self.rank() - positions.len());
        for (i, axis) in self.axes().iter().enumerate() {
            if !positions.contains(&i) {
                axes.push(axis.clone());
            }
        }
        Cube::new(values, AxisList::new(axes)?)
    }
}

impl<T> Cube<T>
where
    T: Clone + Num,
{
    /// Sum along the named axes; an empty list reduces every axis, yielding
    /// a rank-0 cube.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::{Axis, Cube, DenseND};
    ///
    /// let y = Axis::index("year", [2014, 2015]).unwrap();
    /// let q = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
    /// let revenues = Cube::new(
    ///     DenseND::from_vec(vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0], &[2, 4]).unwrap(),
    ///     vec![y, q],
    /// )
    /// .unwrap();
    ///
    /// let by_year = revenues.sum(&["quarter"]).unwrap();
    /// assert_eq!(by_year.values().to_vec(), vec![100.0, 260.0]);
    ///
    /// let total = revenues.sum::<&str>(&[]).unwrap();
    /// assert_eq!(total.scalar_value().unwrap(), 360.0);
    /// ```
    pub fn sum<A: AxisId>(&self, axes: &[A]) -> CubeResult<Cube<T>> {
        let positions = self.reduced_positions(axes)?;
        self.reduce_at(&positions, |v, p| v.sum_axis(p))
    }

    /// Sum along every axis except the named ones.
    pub fn sum_keep<A: AxisId>(&self, keep: &[A]) -> CubeResult<Cube<T>> {
        let positions = self.complement_positions(keep)?;
        self.reduce_at(&positions, |v, p| v.sum_axis(p))
    }

    /// Product along the named axes; an empty list reduces every axis.
    pub fn prod<A: AxisId>(&self, axes: &[A]) -> CubeResult<Cube<T>> {
        let positions = self.reduced_positions(axes)?;
        self.reduce_at(&positions, |v, p| v.prod_axis(p))
    }
}

impl<T> Cube<T>
where
    T: Clone + Num + FromPrimitive,
{
    /// Mean along the named axes; an empty list reduces every axis.
    pub fn mean<A: AxisId>(&self, axes: &[A]) -> CubeResult<Cube<T>> {
        let positions = self.reduced_positions(axes)?;
        self.reduce_at(&positions, |v, p| v.mean_axis(p))
    }

    /// Mean along every axis except the named ones.
    pub fn mean_keep<A: AxisId>(&self, keep: &[A]) -> CubeResult<Cube<T>> {
        let positions = self.complement_positions(keep)?;
        self.reduce_at(&positions, |v, p| v.mean_axis(p))
    }
}

impl<T> Cube<T>
where
    T: Clone + PartialOrd,
{
    /// Minimum along the named axes; an empty list reduces every axis.
    pub fn min<A: AxisId>(&self, axes: &[A]) -> CubeResult<Cube<T>> {
        let positions = self.reduced_positions(axes)?;
        self.reduce_at(&positions, |v, p| v.min_axis(p))
    }

    /// Minimum along every axis except the named ones.
    pub fn min_keep<A: AxisId>(&self, keep: &[A]) -> CubeResult<Cube<T>> {
        let positions = self.complement_positions(keep)?;
        self.reduce_at(&positions, |v, p| v.min_axis(p))
    }

    /// Maximum along the named axes; an empty list reduces every axis.
    pub fn max<A: AxisId>(&self, axes: &[A]) -> CubeResult<Cube<T>> {
        let positions = self.reduced_positions(axes)?;
        self.reduce_at(&positions, |v, p| v.max_axis(p))
    }

    /// Maximum along every axis except the named ones.
    pub fn max_keep<A: AxisId>(&self, keep: &[A]) -> CubeResult<Cube<T>> {
        let positions = self.complement_positions(keep)?;
        self.reduce_at(&positions, |v, p| v.max_axis(p))
    }
}

impl Cube<bool> {
    /// Conjunction along the named axes; an empty list reduces every axis.
    pub fn all<A: AxisId>(&self, axes: &[A]) -> CubeResult<Cube<bool>> {
        let positions = self.reduced_positions(axes)?;
        self.reduce_at(&positions, |v, p| v.all_axis(p))
    }

    /// Conjunction along every axis except the named ones.
    pub fn all_keep<A: AxisId>(&self, keep: &[A]) -> CubeResult<Cube<bool>> {
        let positions = self.complement_positions(keep)?;
        self.reduce_at(&positions, |v, p| v.all_axis(p))
    }

    /// Disjunction along the named axes; an empty list reduces every axis.
    pub fn any<A: AxisId>(&self, axes: &[A]) -> CubeResult<Cube<bool>> {
        let positions = self.reduced_positions(axes)?;
        self.reduce_at(&positions, |v, p| v.any_axis(p))
    }

    /// Disjunction along every axis except the named ones.
    pub fn any_keep<A: AxisId>(&self, keep: &[A]) -> CubeResult<Cube<bool>> {
        let positions = self.complement_positions(keep)?;
        self.reduce_at(&positions, |v, p| v.any_axis(p))
    }
}

impl<T: Clone> Cube<T> {
    /// Reduce the named axes with a caller-supplied function mapping each
    /// one-dimensional lane to a scalar; an empty list reduces every axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::{Axis, Cube, DenseND};
    ///
    /// let k = Axis::index("k", ["a", "b", "c"]).unwrap();
    /// let c = Cube::new(DenseND::from_vec(vec![3.0, 1.0, 2.0], &[3]).unwrap(), k).unwrap();
    /// let spread = c
    ///     .reduce(&["k"], |lane| {
    ///         let mut sorted = lane.to_vec();
    ///         sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    ///         sorted[sorted.len() - 1] - sorted[0]
    ///     })
    ///     .unwrap();
    /// assert_eq!(spread.scalar_value().unwrap(), 2.0);
    /// ```
    pub fn reduce<A, F>(&self, axes: &[A], f: F) -> CubeResult<Cube<T>>
    where
        A: AxisId,
        F: Fn(&[T]) -> T,
    {
        let positions = self.reduced_positions(axes)?;
        self.reduce_at(&positions, |v, p| v.reduce_axis(p, &f))
    }
}

impl<T> Cube<T>
where
    T: Clone + Num + FromPrimitive + PartialOrd,
{
    /// Partition positions along one axis by label equality and reduce each
    /// group.
    ///
    /// The resulting axis is an Index with one entry per distinct label, in
    /// first-occurrence order. Grouping an axis that is already an Index is
    /// the identity, since every group is a singleton; the reducer check
    /// still applies.
    ///
    /// # Errors
    ///
    /// [`CubeError::NonGroupableReducer`] for `First`/`Last`.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::{Axis, Cube, DenseND, Reducer};
    ///
    /// let subject = Axis::series("subject", ["m", "b", "m", "p"]).unwrap();
    /// let score = Cube::new(
    ///     DenseND::from_vec(vec![65.0, 80.0, 95.0, 52.0], &[4]).unwrap(),
    ///     subject,
    /// )
    /// .unwrap();
    ///
    /// let by_subject = score.group("subject", Reducer::Mean).unwrap();
    /// assert_eq!(by_subject.values().to_vec(), vec![80.0, 80.0, 52.0]);
    /// ```
    pub fn group<A: AxisId>(&self, axis: A, reducer: Reducer) -> CubeResult<Cube<T>> {
        if !reducer.is_order_insensitive() {
            return Err(CubeError::NonGroupableReducer {
                name: reducer.name().to_string(),
            });
        }
        let position = self.axes().locate(axis)?;
        let grouped_axis = &self.axes()[position];
        if grouped_axis.is_index() {
            // Labels are already unique; every group is a singleton.
            return Ok(self.clone());
        }

        // Distinct labels in first-occurrence order with their positions.
        let mut order = Vec::new();
        let mut members: HashMap<&crate::label::Label, Vec<usize>> = HashMap::new();
        for (i, label) in grouped_axis.labels().iter().enumerate() {
            members
                .entry(label)
                .or_insert_with(|| {
                    order.push(label.clone());
                    Vec::new()
                })
                .push(i);
        }

        let mut parts = Vec::with_capacity(order.len());
        for label in &order {
            let positions = &members[label];
            let slab = self.values().take(positions, position)?;
            let reduced = reducer.apply_axis(&slab, position)?;
            parts.push(reduced.unsqueeze(position)?);
        }
        let values = DenseND::concatenate(&parts, position)?;
        let new_axis = Axis::index(grouped_axis.name(), order)?;
        let axes = self.axes().replace(position, new_axis)?;
        Cube::new(values, axes)
    }

    /// `group` with the reducer given by name, per the string surface.
    pub fn group_by_name<A: AxisId>(&self, axis: A, reducer: &str) -> CubeResult<Cube<T>> {
        self.group(axis, reducer.parse()?)
    }
}
