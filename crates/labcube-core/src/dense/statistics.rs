//! Axis-wise and full reductions
//!
//! Reductions remove the reduced axis from the shape; the cube layer keeps
//! dimension bookkeeping on its side and composes these per named axis.

use super::types::DenseND;
use scirs2_core::ndarray_ext::Axis;
use scirs2_core::numeric::{FromPrimitive, Num};

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Sum of all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(t.sum(), 10.0);
    /// ```
    pub fn sum(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, x| acc + x.clone())
    }

    /// Sum along one axis, removing it from the shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let s = t.sum_axis(1).unwrap();
    /// assert_eq!(s.shape(), &[2]);
    /// assert_eq!(s.to_vec(), vec![6.0, 15.0]);
    /// ```
    pub fn sum_axis(&self, axis: usize) -> anyhow::Result<Self> {
        self.check_axis(axis)?;
        Ok(Self {
            data: self.data.sum_axis(Axis(axis)),
        })
    }

    /// Product along one axis, removing it from the shape.
    pub fn prod_axis(&self, axis: usize) -> anyhow::Result<Self> {
        self.check_axis(axis)?;
        Ok(Self {
            data: self
                .data
                .fold_axis(Axis(axis), T::one(), |acc, x| acc.clone() * x.clone()),
        })
    }
}

impl<T> DenseND<T>
where
    T: Clone + Num + FromPrimitive,
{
    /// Arithmetic mean along one axis, removing it from the shape.
    ///
    /// For integer element types the division truncates.
    pub fn mean_axis(&self, axis: usize) -> anyhow::Result<Self> {
        self.check_axis(axis)?;
        let n = self.shape()[axis];
        if n == 0 {
            anyhow::bail!("Cannot take the mean over empty axis {}", axis);
        }
        let count = T::from_usize(n).unwrap();
        let summed = self.sum_axis(axis)?;
        Ok(summed.map(|x| x.clone() / count.clone()))
    }
}

impl<T> DenseND<T>
where
    T: Clone + PartialOrd,
{
    /// Minimum along one axis, removing it from the shape.
    pub fn min_axis(&self, axis: usize) -> anyhow::Result<Self> {
        self.extremum_axis(axis, |a, b| b < a)
    }

    /// Maximum along one axis, removing it from the shape.
    pub fn max_axis(&self, axis: usize) -> anyhow::Result<Self> {
        self.extremum_axis(axis, |a, b| b > a)
    }

    fn extremum_axis<F>(&self, axis: usize, replace: F) -> anyhow::Result<Self>
    where
        F: Fn(&T, &T) -> bool,
    {
        self.check_axis(axis)?;
        if self.shape()[axis] == 0 {
            anyhow::bail!("Cannot reduce empty axis {}", axis);
        }
        Ok(Self {
            data: self.data.map_axis(Axis(axis), |lane| {
                let mut best = lane[0].clone();
                for x in lane.iter().skip(1) {
                    if replace(&best, x) {
                        best = x.clone();
                    }
                }
                best
            }),
        })
    }
}

impl<T: Clone> DenseND<T> {
    /// Reduce one axis with a caller-supplied function over each lane.
    ///
    /// The function receives the one-dimensional slice of values along the
    /// axis, in positional order, and returns the reduced scalar.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// let span = t
    ///     .reduce_axis(0, |lane| lane[1] - lane[0])
    ///     .unwrap();
    /// assert_eq!(span.to_vec(), vec![2.0, 2.0]);
    /// ```
    pub fn reduce_axis<F>(&self, axis: usize, f: F) -> anyhow::Result<Self>
    where
        F: Fn(&[T]) -> T,
    {
        self.check_axis(axis)?;
        Ok(Self {
            data: self.data.map_axis(Axis(axis), |lane| f(&lane.to_vec())),
        })
    }

    pub(crate) fn check_axis(&self, axis: usize) -> anyhow::Result<()> {
        if axis >= self.rank() {
            anyhow::bail!("Axis {} out of bounds for rank {}", axis, self.rank());
        }
        Ok(())
    }
}
