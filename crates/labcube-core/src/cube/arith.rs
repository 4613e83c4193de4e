//! The binary kernel: alignment, broadcasting, arithmetic, comparisons
//!
//! [`apply2`] is the execution half of the aligner: it shapes both value
//! tensors according to the [`AlignPlan`](crate::align::AlignPlan) and
//! applies a binary element-wise function under standard broadcasting.
//! Everything binary on cubes funnels through it.
//!
//! The std operator impls (`+`, `-`, `*`, `/`) delegate to the fallible
//! `try_*` methods and panic on alignment failure; callers that need to
//! observe [`CubeError::IncompatibleAxes`] use the `try_*` forms.

use crate::align::{align, OperandPlan};
use crate::cube::types::Cube;
use crate::dense::DenseND;
use crate::error::{CubeError, CubeResult};
use scirs2_core::numeric::{Float, Num, Signed};

/// Shape one operand's tensor according to its plan: gathers on the original
/// axis positions, then the transpose into output order, then the unit
/// broadcast dimensions.
fn shape_operand<T: Clone>(values: &DenseND<T>, plan: &OperandPlan) -> anyhow::Result<DenseND<T>> {
    let mut shaped = values.clone();
    for (axis, indices) in &plan.gathers {
        shaped = shaped.take(indices, *axis)?;
    }
    if plan.permute.iter().enumerate().any(|(i, &p)| i != p) {
        shaped = shaped.permute(&plan.permute)?;
    }
    for &position in &plan.inserts {
        shaped = shaped.unsqueeze(position)?;
    }
    Ok(shaped)
}

/// Apply a binary element-wise function to two cubes after matching and
/// aligning their axes.
///
/// # Examples
///
/// ```
/// use labcube_core::{apply2, Axis, Cube, DenseND};
///
/// let k1 = Axis::index("k", ["a", "b", "c"]).unwrap();
/// let k2 = Axis::index("k", ["c", "b", "a"]).unwrap();
/// let p = Cube::new(DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap(), k1).unwrap();
/// let q = Cube::new(DenseND::from_vec(vec![30.0, 20.0, 10.0], &[3]).unwrap(), k2).unwrap();
///
/// let sum = apply2(&p, &q, |a, b| a + b).unwrap();
/// assert_eq!(sum.values().to_vec(), vec![11.0, 22.0, 33.0]);
/// ```
pub fn apply2<T, U, F>(a: &Cube<T>, b: &Cube<T>, f: F) -> CubeResult<Cube<U>>
where
    T: Clone,
    U: Clone,
    F: Fn(&T, &T) -> U,
{
    let plan = align(a.axes(), b.axes())?;
    let lhs = shape_operand(a.values(), &plan.left)?;
    let rhs = shape_operand(b.values(), &plan.right)?;
    let out = lhs.zip_with(&rhs, f)?;
    Cube::new(out, plan.out_axes)
}

impl<T: Clone> Cube<T> {
    /// Combine with a bare tensor, bypassing alignment.
    ///
    /// The engine's broadcast rules decide shape compatibility and this
    /// cube's axis list is kept for the result, so the broadcast result must
    /// have this cube's shape.
    ///
    /// # Errors
    ///
    /// [`CubeError::ShapeMismatch`] when the shapes cannot be reconciled or
    /// the raw operand would enlarge the result beyond this cube's shape.
    pub fn zip_raw<U, F>(&self, raw: &DenseND<T>, f: F) -> CubeResult<Cube<U>>
    where
        U: Clone,
        F: Fn(&T, &T) -> U,
    {
        let own = self.values().shape().to_vec();
        match crate::dense::broadcast_shape(&own, raw.shape()) {
            Some(target) if target == own => {}
            _ => {
                return Err(CubeError::ShapeMismatch {
                    expected: own,
                    got: raw.shape().to_vec(),
                });
            }
        }
        let out = self.values().zip_with(raw, f)?;
        Cube::new(out, self.axes().clone())
    }

    /// Combine with a scalar, keeping the axes. The scalar behaves as a
    /// rank-0 cube on the right-hand side.
    pub fn zip_scalar<U, F>(&self, scalar: T, f: F) -> Cube<U>
    where
        U: Clone,
        F: Fn(&T, &T) -> U,
    {
        self.apply(|x| f(x, &scalar))
    }
}

impl<T> Cube<T>
where
    T: Clone + Num,
{
    /// Element-wise addition with axis alignment.
    pub fn try_add(&self, rhs: &Cube<T>) -> CubeResult<Cube<T>> {
        apply2(self, rhs, |a, b| a.clone() + b.clone())
    }

    /// Element-wise subtraction with axis alignment.
    pub fn try_sub(&self, rhs: &Cube<T>) -> CubeResult<Cube<T>> {
        apply2(self, rhs, |a, b| a.clone() - b.clone())
    }

    /// Element-wise multiplication with axis alignment.
    pub fn try_mul(&self, rhs: &Cube<T>) -> CubeResult<Cube<T>> {
        apply2(self, rhs, |a, b| a.clone() * b.clone())
    }

    /// Element-wise division with axis alignment.
    pub fn try_div(&self, rhs: &Cube<T>) -> CubeResult<Cube<T>> {
        apply2(self, rhs, |a, b| a.clone() / b.clone())
    }
}

impl<T> Cube<T>
where
    T: Clone + PartialOrd,
{
    /// Element-wise `<` after alignment; boolean result cube.
    pub fn lt(&self, rhs: &Cube<T>) -> CubeResult<Cube<bool>> {
        apply2(self, rhs, |a, b| a < b)
    }

    /// Element-wise `<=` after alignment.
    pub fn le(&self, rhs: &Cube<T>) -> CubeResult<Cube<bool>> {
        apply2(self, rhs, |a, b| a <= b)
    }

    /// Element-wise `>` after alignment.
    pub fn gt(&self, rhs: &Cube<T>) -> CubeResult<Cube<bool>> {
        apply2(self, rhs, |a, b| a > b)
    }

    /// Element-wise `>=` after alignment.
    pub fn ge(&self, rhs: &Cube<T>) -> CubeResult<Cube<bool>> {
        apply2(self, rhs, |a, b| a >= b)
    }

    /// Element-wise `<` against a scalar.
    pub fn lt_scalar(&self, s: T) -> Cube<bool> {
        self.zip_scalar(s, |a, b| a < b)
    }

    /// Element-wise `<=` against a scalar.
    pub fn le_scalar(&self, s: T) -> Cube<bool> {
        self.zip_scalar(s, |a, b| a <= b)
    }

    /// Element-wise `>` against a scalar.
    pub fn gt_scalar(&self, s: T) -> Cube<bool> {
        self.zip_scalar(s, |a, b| a > b)
    }

    /// Element-wise `>=` against a scalar.
    pub fn ge_scalar(&self, s: T) -> Cube<bool> {
        self.zip_scalar(s, |a, b| a >= b)
    }
}

impl<T> Cube<T>
where
    T: Clone + PartialEq,
{
    /// Element-wise equality after alignment; boolean result cube.
    pub fn eq_elementwise(&self, rhs: &Cube<T>) -> CubeResult<Cube<bool>> {
        apply2(self, rhs, |a, b| a == b)
    }

    /// Element-wise inequality after alignment.
    pub fn ne_elementwise(&self, rhs: &Cube<T>) -> CubeResult<Cube<bool>> {
        apply2(self, rhs, |a, b| a != b)
    }

    /// Element-wise equality against a scalar.
    pub fn eq_scalar(&self, s: T) -> Cube<bool> {
        self.zip_scalar(s, |a, b| a == b)
    }

    /// Element-wise inequality against a scalar.
    pub fn ne_scalar(&self, s: T) -> Cube<bool> {
        self.zip_scalar(s, |a, b| a != b)
    }
}

impl<T> Cube<T>
where
    T: Clone + Signed,
{
    /// Element-wise absolute value, keeping the axes.
    pub fn abs(&self) -> Self {
        Self::from_validated(self.values().abs(), self.axes().clone())
    }
}

impl<T> Cube<T>
where
    T: Clone + Float,
{
    /// Element-wise sine, keeping the axes.
    pub fn sin(&self) -> Self {
        Self::from_validated(self.values().sin(), self.axes().clone())
    }

    /// Element-wise cosine, keeping the axes.
    pub fn cos(&self) -> Self {
        Self::from_validated(self.values().cos(), self.axes().clone())
    }

    /// Element-wise tangent, keeping the axes.
    pub fn tan(&self) -> Self {
        Self::from_validated(self.values().tan(), self.axes().clone())
    }

    /// Element-wise square root, keeping the axes.
    pub fn sqrt(&self) -> Self {
        Self::from_validated(self.values().sqrt(), self.axes().clone())
    }

    /// Element-wise exponential, keeping the axes.
    pub fn exp(&self) -> Self {
        Self::from_validated(self.values().exp(), self.axes().clone())
    }

    /// Element-wise natural logarithm, keeping the axes.
    pub fn ln(&self) -> Self {
        Self::from_validated(self.values().ln(), self.axes().clone())
    }

    /// Element-wise base-10 logarithm, keeping the axes.
    pub fn log10(&self) -> Self {
        Self::from_validated(self.values().log10(), self.axes().clone())
    }

    /// Element-wise power, keeping the axes.
    pub fn powf(&self, n: T) -> Self {
        Self::from_validated(self.values().powf(n), self.axes().clone())
    }
}

macro_rules! cube_binop {
    ($trait:ident, $method:ident, $try_method:ident, $what:literal) => {
        impl<T: Clone + Num> std::ops::$trait<&Cube<T>> for &Cube<T> {
            type Output = Cube<T>;

            fn $method(self, rhs: &Cube<T>) -> Cube<T> {
                self.$try_method(rhs)
                    .unwrap_or_else(|e| panic!(concat!("cube ", $what, " failed: {}"), e))
            }
        }

        impl<T: Clone + Num> std::ops::$trait<Cube<T>> for Cube<T> {
            type Output = Cube<T>;

            fn $method(self, rhs: Cube<T>) -> Cube<T> {
                std::ops::$trait::$method(&self, &rhs)
            }
        }

        impl<T: Clone + Num> std::ops::$trait<T> for &Cube<T> {
            type Output = Cube<T>;

            fn $method(self, rhs: T) -> Cube<T> {
                self.zip_scalar(rhs, |a, b| std::ops::$trait::$method(a.clone(), b.clone()))
            }
        }

        impl<T: Clone + Num> std::ops::$trait<T> for Cube<T> {
            type Output = Cube<T>;

            fn $method(self, rhs: T) -> Cube<T> {
                std::ops::$trait::$method(&self, rhs)
            }
        }
    };
}

cube_binop!(Add, add, try_add, "addition");
cube_binop!(Sub, sub, try_sub, "subtraction");
cube_binop!(Mul, mul, try_mul, "multiplication");
cube_binop!(Div, div, try_div, "division");
