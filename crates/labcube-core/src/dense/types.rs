//! Dense tensor type definition and basic accessors
//!
//! `DenseND<T>` wraps scirs2_core's dynamic-dimensionality array with the
//! operations the cube layer needs. Creation and accessor methods live
//! here; shaping, indexing, element-wise, and reduction operations are
//! organized in sibling modules.

use scirs2_core::ndarray_ext::{Array, IxDyn};
use std::fmt;

/// Dense N-dimensional tensor backed by scirs2_core's ndarray.
///
/// Rank-0 tensors (shape `[]`, one element) represent scalars.
///
/// # Examples
///
/// ```
/// use labcube_core::DenseND;
///
/// let t = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// assert_eq!(t.shape(), &[2, 2]);
/// assert_eq!(t.rank(), 2);
/// assert_eq!(t[&[1, 0]], 3.0);
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "T: serde::Serialize")))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "T: serde::Deserialize<'de>"))
)]
pub struct DenseND<T> {
    /// Underlying ndarray storage (via scirs2_core)
    pub(crate) data: Array<T, IxDyn>,
}

impl<T> DenseND<T> {
    /// Wrap an existing dynamic-dimension array.
    pub fn from_array(array: Array<T, IxDyn>) -> Self {
        Self { data: array }
    }

    /// Create a tensor from a flat vector in row-major order.
    ///
    /// # Errors
    ///
    /// Fails when the vector length does not match the product of `shape`.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
    /// assert_eq!(t.shape(), &[2, 3]);
    /// assert!(DenseND::from_vec(vec![1, 2, 3], &[2, 3]).is_err());
    /// ```
    pub fn from_vec(vec: Vec<T>, shape: &[usize]) -> anyhow::Result<Self> {
        let total: usize = shape.iter().product();
        if vec.len() != total {
            anyhow::bail!(
                "Shape {:?} requires {} elements, but got {}",
                shape,
                total,
                vec.len()
            );
        }
        let array = Array::from_shape_vec(IxDyn(shape), vec)?;
        Ok(Self { data: array })
    }

    /// Rank (number of dimensions).
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the tensor has zero elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checked element access.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.data.get(IxDyn(index))
    }

    /// Iterate over elements in row-major (logical) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &Array<T, IxDyn> {
        &self.data
    }
}

impl<T: Clone> DenseND<T> {
    /// Flatten to a vector in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    /// The single element of a rank-0 or one-element tensor.
    pub fn scalar_value(&self) -> anyhow::Result<T> {
        if self.len() != 1 {
            anyhow::bail!("Tensor with {} elements is not a scalar", self.len());
        }
        Ok(self.data.iter().next().cloned().unwrap())
    }
}

impl<T> std::ops::Index<&[usize]> for DenseND<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &T {
        &self.data[IxDyn(index)]
    }
}

impl<T: PartialEq> PartialEq for DenseND<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: fmt::Debug> fmt::Debug for DenseND<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DenseND{:?}", self.data)
    }
}

impl<T: fmt::Display + Clone> fmt::Display for DenseND<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_validates_element_count() {
        assert!(DenseND::from_vec(vec![1, 2, 3, 4], &[2, 2]).is_ok());
        assert!(DenseND::from_vec(vec![1, 2, 3], &[2, 2]).is_err());
    }

    #[test]
    fn rank_zero_is_a_scalar() {
        let s = DenseND::from_vec(vec![42.0], &[]).unwrap();
        assert_eq!(s.rank(), 0);
        assert_eq!(s.len(), 1);
        assert_eq!(s.scalar_value().unwrap(), 42.0);
    }

    #[test]
    fn iteration_is_row_major() {
        let t = DenseND::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        let flat: Vec<i32> = t.iter().copied().collect();
        assert_eq!(flat, vec![1, 2, 3, 4]);
        assert_eq!(t[&[0, 1]], 2);
    }
}
