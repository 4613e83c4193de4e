//! Element-wise comparisons and boolean reductions
//!
//! Comparisons produce boolean tensors under the same broadcasting rules as
//! arithmetic; `all`/`any` reduce boolean tensors.

use super::types::DenseND;
use scirs2_core::ndarray_ext::Axis;

impl<T> DenseND<T>
where
    T: Clone + PartialOrd,
{
    /// Element-wise `<` with broadcasting.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let a = DenseND::from_vec(vec![1.0, 5.0], &[2]).unwrap();
    /// let b = DenseND::from_vec(vec![3.0, 3.0], &[2]).unwrap();
    /// assert_eq!(a.lt(&b).unwrap().to_vec(), vec![true, false]);
    /// ```
    pub fn lt(&self, other: &Self) -> anyhow::Result<DenseND<bool>> {
        self.zip_with(other, |a, b| a < b)
    }

    /// Element-wise `<=` with broadcasting.
    pub fn le(&self, other: &Self) -> anyhow::Result<DenseND<bool>> {
        self.zip_with(other, |a, b| a <= b)
    }

    /// Element-wise `>` with broadcasting.
    pub fn gt(&self, other: &Self) -> anyhow::Result<DenseND<bool>> {
        self.zip_with(other, |a, b| a > b)
    }

    /// Element-wise `>=` with broadcasting.
    pub fn ge(&self, other: &Self) -> anyhow::Result<DenseND<bool>> {
        self.zip_with(other, |a, b| a >= b)
    }
}

impl<T> DenseND<T>
where
    T: Clone + PartialEq,
{
    /// Element-wise equality with broadcasting.
    pub fn eq_elementwise(&self, other: &Self) -> anyhow::Result<DenseND<bool>> {
        self.zip_with(other, |a, b| a == b)
    }

    /// Element-wise inequality with broadcasting.
    pub fn ne_elementwise(&self, other: &Self) -> anyhow::Result<DenseND<bool>> {
        self.zip_with(other, |a, b| a != b)
    }
}

impl DenseND<bool> {
    /// True when every element is true.
    pub fn all(&self) -> bool {
        self.data.iter().all(|&b| b)
    }

    /// True when at least one element is true.
    pub fn any(&self) -> bool {
        self.data.iter().any(|&b| b)
    }

    /// Conjunction along one axis, removing it from the shape.
    pub fn all_axis(&self, axis: usize) -> anyhow::Result<Self> {
        self.check_axis(axis)?;
        Ok(Self {
            data: self.data.map_axis(Axis(axis), |lane| lane.iter().all(|&b| b)),
        })
    }

    /// Disjunction along one axis, removing it from the shape.
    pub fn any_axis(&self, axis: usize) -> anyhow::Result<Self> {
        self.check_axis(axis)?;
        Ok(Self {
            data: self.data.map_axis(Axis(axis), |lane| lane.iter().any(|&b| b)),
        })
    }
}
