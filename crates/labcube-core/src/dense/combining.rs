//! Combining tensors along an existing axis

use super::types::DenseND;
use scirs2_core::ndarray_ext::Axis;

impl<T: Clone> DenseND<T> {
    /// Concatenate tensors along an existing axis.
    ///
    /// All tensors must agree on every dimension except the concatenation
    /// axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let a = DenseND::from_vec(vec![1.0, 2.0], &[1, 2]).unwrap();
    /// let b = DenseND::from_vec(vec![3.0, 4.0], &[1, 2]).unwrap();
    /// let c = DenseND::concatenate(&[a, b], 0).unwrap();
    /// assert_eq!(c.shape(), &[2, 2]);
    /// ```
    pub fn concatenate(tensors: &[Self], axis: usize) -> anyhow::Result<Self> {
        if tensors.is_empty() {
            anyhow::bail!("Cannot concatenate empty tensor list");
        }
        let rank = tensors[0].rank();
        if axis >= rank {
            anyhow::bail!("Axis {} out of bounds for rank {}", axis, rank);
        }
        let reference = tensors[0].shape();
        for (i, tensor) in tensors.iter().enumerate().skip(1) {
            if tensor.rank() != rank {
                anyhow::bail!("Tensor {} has rank {}, expected {}", i, tensor.rank(), rank);
            }
            for (dim, (&s1, &s2)) in reference.iter().zip(tensor.shape().iter()).enumerate() {
                if dim != axis && s1 != s2 {
                    anyhow::bail!("Shape mismatch at dimension {}: {} vs {}", dim, s1, s2);
                }
            }
        }
        let views: Vec<_> = tensors.iter().map(|t| t.data.view()).collect();
        let data = scirs2_core::ndarray::concatenate(Axis(axis), &views)?;
        Ok(Self { data })
    }
}
