//! Gathers along an axis
//!
//! Advanced indexing as the cube layer uses it: select positions along one
//! axis by an integer vector (duplicates allowed) or by a boolean mask.

use super::types::DenseND;
use scirs2_core::ndarray_ext::Axis;

impl<T: Clone> DenseND<T> {
    /// Gather elements along an axis by an integer vector.
    ///
    /// Indices may repeat; the output length along `axis` equals
    /// `indices.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::from_vec(vec![10.0, 20.0, 30.0, 40.0], &[4]).unwrap();
    /// let g = t.take(&[1, 3, 1], 0).unwrap();
    /// assert_eq!(g.to_vec(), vec![20.0, 40.0, 20.0]);
    /// ```
    pub fn take(&self, indices: &[usize], axis: usize) -> anyhow::Result<Self> {
        if axis >= self.rank() {
            anyhow::bail!("Axis {} out of bounds for rank {}", axis, self.rank());
        }
        let axis_size = self.shape()[axis];
        for &idx in indices {
            if idx >= axis_size {
                anyhow::bail!(
                    "Index {} out of bounds for axis {} with size {}",
                    idx,
                    axis,
                    axis_size
                );
            }
        }
        Ok(Self {
            data: self.data.select(Axis(axis), indices),
        })
    }

    /// Keep the positions along an axis where the mask is true.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::from_vec(vec![1, 2, 3, 4, 5, 6], &[3, 2]).unwrap();
    /// let c = t.compress(&[true, false, true], 0).unwrap();
    /// assert_eq!(c.shape(), &[2, 2]);
    /// assert_eq!(c[&[1, 0]], 5);
    /// ```
    pub fn compress(&self, mask: &[bool], axis: usize) -> anyhow::Result<Self> {
        if axis >= self.rank() {
            anyhow::bail!("Axis {} out of bounds for rank {}", axis, self.rank());
        }
        if mask.len() != self.shape()[axis] {
            anyhow::bail!(
                "Mask length {} does not match axis {} size {}",
                mask.len(),
                axis,
                self.shape()[axis]
            );
        }
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.take(&indices, axis)
    }
}
