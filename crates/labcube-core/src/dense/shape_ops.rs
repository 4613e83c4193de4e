//! Shape manipulation: reshape, permute, unit dimensions, broadcasting
//!
//! These are the structural primitives the alignment kernel composes:
//! transposition by permutation, insertion of length-1 dimensions, and
//! materialized broadcasting with trailing-dimension alignment.

use super::types::DenseND;
use scirs2_core::ndarray_ext::IxDyn;

impl<T: Clone> DenseND<T> {
    /// Reshape to a new shape with the same element count.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let r = t.reshape(&[6, 4]).unwrap();
    /// assert_eq!(r.shape(), &[6, 4]);
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> anyhow::Result<Self> {
        let new_size: usize = new_shape.iter().product();
        if new_size != self.len() {
            anyhow::bail!(
                "Cannot reshape tensor of size {} into shape {:?} (size {})",
                self.len(),
                new_shape,
                new_size
            );
        }
        if let Ok(reshaped) = self.data.view().into_shape_with_order(IxDyn(new_shape)) {
            Ok(Self {
                data: reshaped.to_owned(),
            })
        } else {
            // Non-contiguous layout: fall back to a copy in logical order.
            let flat: Vec<T> = self.data.iter().cloned().collect();
            Self::from_vec(flat, new_shape)
        }
    }

    /// Permute (transpose) the axes of the tensor.
    ///
    /// # Errors
    ///
    /// Fails when `axes` is not a complete, duplicate-free permutation of
    /// `0..rank`.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let p = t.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(p.shape(), &[4, 2, 3]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> anyhow::Result<Self> {
        if axes.len() != self.rank() {
            anyhow::bail!(
                "Permutation axes length {} does not match tensor rank {}",
                axes.len(),
                self.rank()
            );
        }
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() {
                anyhow::bail!("Invalid axis {} for rank {}", axis, self.rank());
            }
            if seen[axis] {
                anyhow::bail!("Duplicate axis {} in permutation", axis);
            }
            seen[axis] = true;
        }
        let permuted = self.data.clone().permuted_axes(IxDyn(axes));
        Ok(Self { data: permuted })
    }

    /// Insert a length-1 dimension at the given position.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::<f64>::zeros(&[3, 5]);
    /// let u = t.unsqueeze(1).unwrap();
    /// assert_eq!(u.shape(), &[3, 1, 5]);
    /// ```
    pub fn unsqueeze(&self, axis: usize) -> anyhow::Result<Self> {
        if axis > self.rank() {
            anyhow::bail!(
                "Axis {} out of bounds for result rank {}",
                axis,
                self.rank() + 1
            );
        }
        let mut new_shape = self.shape().to_vec();
        new_shape.insert(axis, 1);
        self.reshape(&new_shape)
    }

    /// Remove a length-1 dimension at the given position.
    pub fn squeeze_axis(&self, axis: usize) -> anyhow::Result<Self> {
        if axis >= self.rank() {
            anyhow::bail!("Axis {} out of bounds for rank {}", axis, self.rank());
        }
        if self.shape()[axis] != 1 {
            anyhow::bail!(
                "Cannot squeeze axis {} with size {}",
                axis,
                self.shape()[axis]
            );
        }
        let new_shape: Vec<usize> = self
            .shape()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &s)| s)
            .collect();
        self.reshape(&new_shape)
    }

    /// Materialize the tensor broadcast to a larger shape.
    ///
    /// Standard right-broadcasting rules apply: trailing dimensions align and
    /// length-1 dimensions stretch.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let row = DenseND::from_vec(vec![1.0, 2.0], &[1, 2]).unwrap();
    /// let full = row.broadcast_to(&[3, 2]).unwrap();
    /// assert_eq!(full.shape(), &[3, 2]);
    /// assert_eq!(full[&[2, 1]], 2.0);
    /// ```
    pub fn broadcast_to(&self, target: &[usize]) -> anyhow::Result<Self> {
        match self.data.broadcast(IxDyn(target)) {
            Some(view) => Ok(Self {
                data: view.to_owned(),
            }),
            None => anyhow::bail!(
                "Shape {:?} is not broadcastable to {:?}",
                self.shape(),
                target
            ),
        }
    }
}

/// Common broadcast shape of two shapes under trailing alignment, if any.
pub(crate) fn broadcast_shape(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let rank = a.len().max(b.len());
    let mut out = vec![0usize; rank];
    for i in 0..rank {
        let da = if i < rank - a.len() {
            1
        } else {
            a[i - (rank - a.len())]
        };
        let db = if i < rank - b.len() {
            1
        } else {
            b[i - (rank - b.len())]
        };
        out[i] = if da == db {
            da
        } else if da == 1 {
            db
        } else if db == 1 {
            da
        } else {
            return None;
        };
    }
    Some(out)
}
