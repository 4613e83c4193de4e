//! Selection by labels, positions, or masks
//!
//! All three operations restrict one named axis and gather the value tensor
//! accordingly. Selection never intersects silently: a label missing from
//! the axis is an error, not an empty result.

use crate::axes::AxisId;
use crate::cube::types::Cube;
use crate::error::CubeResult;
use crate::label::Label;

impl<T: Clone> Cube<T> {
    /// Restrict the named axis to the given labels, preserving the axis's
    /// own label order.
    ///
    /// Filtering is idempotent: filtering twice with the same labels equals
    /// filtering once.
    ///
    /// # Errors
    ///
    /// [`CubeError::LabelNotFound`](crate::CubeError::LabelNotFound) when a
    /// query label is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::{Axis, Cube, DenseND};
    ///
    /// let q = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
    /// let c = Cube::new(
    ///     DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4]).unwrap(),
    ///     q,
    /// )
    /// .unwrap();
    ///
    /// let half = c.filter("quarter", ["Q3", "Q1"]).unwrap();
    /// assert_eq!(half.values().to_vec(), vec![1.0, 3.0]); // axis order kept
    /// ```
    pub fn filter<A, L, I>(&self, axis: A, labels: I) -> CubeResult<Cube<T>>
    where
        A: AxisId,
        L: Into<Label>,
        I: IntoIterator<Item = L>,
    {
        let position = self.axes().locate(axis)?;
        let query: Vec<Label> = labels.into_iter().map(Into::into).collect();
        let (filtered, selector) = self.axes()[position].filter(&query)?;
        let values = self.values().take(&selector, position)?;
        let axes = self.axes().replace(position, filtered)?;
        Cube::new(values, axes)
    }

    /// Restrict the named axis to the given positions, in the given order.
    ///
    /// An Index axis that would acquire duplicate labels is demoted to a
    /// Series.
    ///
    /// # Errors
    ///
    /// [`CubeError::IndexOutOfRange`](crate::CubeError::IndexOutOfRange) for
    /// a position past the end of the axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::{Axis, AxisKind, Cube, DenseND};
    ///
    /// let q = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
    /// let c = Cube::new(
    ///     DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4]).unwrap(),
    ///     q,
    /// )
    /// .unwrap();
    ///
    /// let picked = c.take("quarter", &[3, 0, 3]).unwrap();
    /// assert_eq!(picked.values().to_vec(), vec![4.0, 1.0, 4.0]);
    /// assert_eq!(picked.axes()[0].kind(), AxisKind::Series); // demoted
    /// ```
    pub fn take<A: AxisId>(&self, axis: A, positions: &[usize]) -> CubeResult<Cube<T>> {
        let position = self.axes().locate(axis)?;
        let taken = self.axes()[position].take_demoting(positions)?;
        let values = self.values().take(positions, position)?;
        let axes = self.axes().replace(position, taken)?;
        Cube::new(values, axes)
    }

    /// Keep the positions of the named axis where the mask is true.
    ///
    /// # Errors
    ///
    /// [`CubeError::ShapeMismatch`](crate::CubeError::ShapeMismatch) when
    /// the mask length differs from the axis length.
    pub fn compress<A: AxisId>(&self, axis: A, mask: &[bool]) -> CubeResult<Cube<T>> {
        let position = self.axes().locate(axis)?;
        let positions = self.axes()[position].mask_positions(mask)?;
        self.take(position, &positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, AxisKind};
    use crate::dense::DenseND;
    use crate::error::CubeError;

    fn sales() -> Cube<f64> {
        let y = Axis::index("year", [2014, 2015]).unwrap();
        let q = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
        Cube::new(
            DenseND::from_vec(
                vec![14.0, 16.0, 13.0, 20.0, 15.0, 15.0, 10.0, 19.0],
                &[2, 4],
            )
            .unwrap(),
            vec![y, q],
        )
        .unwrap()
    }

    #[test]
    fn filter_keeps_axis_order_and_kind() {
        let c = sales();
        let f = c.filter("quarter", ["Q4", "Q2"]).unwrap();
        assert_eq!(&f.shape()[..], &[2, 2]);
        assert_eq!(f.values().to_vec(), vec![16.0, 20.0, 15.0, 19.0]);
        let axis = &f.axes()[1];
        assert_eq!(axis.labels(), &["Q2".into(), "Q4".into()]);
        assert_eq!(axis.kind(), AxisKind::Index);
    }

    #[test]
    fn filter_is_idempotent() {
        let c = sales();
        let once = c.filter("quarter", ["Q1", "Q3"]).unwrap();
        let twice = once.filter("quarter", ["Q1", "Q3"]).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_rejects_missing_labels() {
        let c = sales();
        let err = c.filter("quarter", ["Q1", "Q9"]).unwrap_err();
        match err {
            CubeError::LabelNotFound { axis, label } => {
                assert_eq!(axis, "quarter");
                assert_eq!(label, "Q9".into());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn take_selects_in_given_order() {
        let c = sales();
        let t = c.take("year", &[1, 0]).unwrap();
        assert_eq!(t.values().to_vec(), vec![15.0, 15.0, 10.0, 19.0, 14.0, 16.0, 13.0, 20.0]);
        assert_eq!(t.axes()[0].labels(), &[2015.into(), 2014.into()]);
        assert_eq!(t.axes()[0].kind(), AxisKind::Index);
    }

    #[test]
    fn full_range_take_is_identity() {
        let c = sales();
        let t = c.take("quarter", &[0, 1, 2, 3]).unwrap();
        assert_eq!(t, c);
    }

    #[test]
    fn take_out_of_range_fails() {
        let c = sales();
        assert!(matches!(
            c.take("quarter", &[4]).unwrap_err(),
            CubeError::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn take_demotes_on_duplicates() {
        let c = sales();
        let t = c.take("year", &[0, 0]).unwrap();
        assert_eq!(t.axes()[0].kind(), AxisKind::Series);
        assert_eq!(t.values()[&[1, 2]], 13.0);
    }

    #[test]
    fn compress_with_mask() {
        let c = sales();
        let kept = c.compress("quarter", &[true, false, false, true]).unwrap();
        assert_eq!(kept.values().to_vec(), vec![14.0, 20.0, 15.0, 19.0]);

        assert!(matches!(
            c.compress("quarter", &[true, false]).unwrap_err(),
            CubeError::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn selection_on_series_axes() {
        let s = Axis::series("k", ["b", "d", "b"]).unwrap();
        let c = Cube::new(DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap(), s).unwrap();
        let f = c.filter("k", ["b"]).unwrap();
        assert_eq!(f.values().to_vec(), vec![1.0, 3.0]);
        assert_eq!(f.axes()[0].kind(), AxisKind::Series);
    }
}
