//! Element-wise operations
//!
//! Unary maps, the broadcasting binary combinator the kernel is built on,
//! and the usual collection of pointwise numerical functions.

use super::shape_ops::broadcast_shape;
use super::types::DenseND;
use scirs2_core::numeric::{Float, Signed};

impl<T: Clone> DenseND<T> {
    /// Apply a function element-wise.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let t = DenseND::from_vec(vec![1.0, 2.0], &[2]).unwrap();
    /// let d = t.map(|x| x * 2.0);
    /// assert_eq!(d.to_vec(), vec![2.0, 4.0]);
    /// ```
    pub fn map<U, F>(&self, f: F) -> DenseND<U>
    where
        F: Fn(&T) -> U,
    {
        DenseND {
            data: self.data.map(f),
        }
    }

    /// Combine two tensors element-wise under standard broadcasting.
    ///
    /// Shapes are reconciled by the trailing-dimension rule (length-1
    /// dimensions stretch); the function is applied pairwise over the
    /// broadcast extent.
    ///
    /// # Errors
    ///
    /// Fails when the shapes cannot be broadcast to a common shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::DenseND;
    ///
    /// let m = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// let row = DenseND::from_vec(vec![10.0, 20.0], &[2]).unwrap();
    /// let sum = m.zip_with(&row, |a, b| a + b).unwrap();
    /// assert_eq!(sum.to_vec(), vec![11.0, 22.0, 13.0, 24.0]);
    /// ```
    pub fn zip_with<U, F>(&self, other: &Self, f: F) -> anyhow::Result<DenseND<U>>
    where
        F: Fn(&T, &T) -> U,
    {
        let target = broadcast_shape(self.shape(), other.shape()).ok_or_else(|| {
            anyhow::anyhow!(
                "Shapes {:?} and {:?} are not broadcastable",
                self.shape(),
                other.shape()
            )
        })?;
        let lhs = self.broadcast_to(&target)?;
        let rhs = other.broadcast_to(&target)?;
        let out: Vec<U> = lhs.iter().zip(rhs.iter()).map(|(a, b)| f(a, b)).collect();
        DenseND::from_vec(out, &target)
    }
}

impl<T> DenseND<T>
where
    T: Clone + Signed,
{
    /// Element-wise absolute value.
    pub fn abs(&self) -> Self {
        self.map(|x| x.abs())
    }
}

impl<T> DenseND<T>
where
    T: Clone + Float,
{
    /// Element-wise sine.
    pub fn sin(&self) -> Self {
        self.map(|x| x.sin())
    }

    /// Element-wise cosine.
    pub fn cos(&self) -> Self {
        self.map(|x| x.cos())
    }

    /// Element-wise tangent.
    pub fn tan(&self) -> Self {
        self.map(|x| x.tan())
    }

    /// Element-wise square root.
    pub fn sqrt(&self) -> Self {
        self.map(|x| x.sqrt())
    }

    /// Element-wise exponential.
    pub fn exp(&self) -> Self {
        self.map(|x| x.exp())
    }

    /// Element-wise natural logarithm.
    pub fn ln(&self) -> Self {
        self.map(|x| x.ln())
    }

    /// Element-wise base-10 logarithm.
    pub fn log10(&self) -> Self {
        self.map(|x| x.log10())
    }

    /// Element-wise power.
    pub fn powf(&self, n: T) -> Self {
        self.map(|x| x.powf(n))
    }

    /// Element-wise sign.
    pub fn signum(&self) -> Self {
        self.map(|x| x.signum())
    }

    /// Element-wise floor.
    pub fn floor(&self) -> Self {
        self.map(|x| x.floor())
    }

    /// Element-wise ceiling.
    pub fn ceil(&self) -> Self {
        self.map(|x| x.ceil())
    }

    /// Element-wise rounding to the nearest integer.
    pub fn round(&self) -> Self {
        self.map(|x| x.round())
    }
}
