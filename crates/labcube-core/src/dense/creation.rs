//! Tensor creation helpers

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Array, IxDyn};
use scirs2_core::numeric::Num;

impl<T: Clone> DenseND<T> {
    /// Tensor of the given shape filled with one value.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::from_elem(&[2, 3], 5.0);
    /// assert_eq!(t[&[1, 2]], 5.0);
    /// ```
    pub fn from_elem(shape: &[usize], value: T) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// Rank-0 tensor holding a single value.
    pub fn scalar(value: T) -> Self {
        Self::from_elem(&[], value)
    }
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Tensor of zeros.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::from_elem(shape, T::zero())
    }

    /// Tensor of ones.
    pub fn ones(shape: &[usize]) -> Self {
        Self::from_elem(shape, T::one())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_and_ones() {
        let z = DenseND::<f64>::zeros(&[2, 2]);
        assert!(z.iter().all(|&x| x == 0.0));
        let o = DenseND::<f64>::ones(&[3]);
        assert!(o.iter().all(|&x| x == 1.0));
    }

    #[test]
    fn scalar_has_rank_zero() {
        let s = DenseND::scalar(7);
        assert_eq!(s.rank(), 0);
        assert_eq!(s.scalar_value().unwrap(), 7);
    }
}
