//! Concatenation of cubes along an existing axis
//!
//! The named axis is concatenated across all operands; every other axis is
//! matched by name and aligned to a base version under the usual rules, with
//! missing axes broadcast. The label sets of the non-main axes are never
//! intersected silently.

use crate::axes::AxisList;
use crate::axis::{Axis, AxisKind};
use crate::cube::types::Cube;
use crate::error::{CubeError, CubeResult};

/// Concatenate cubes along the axis with the given name.
///
/// Every cube must carry the named axis. Its labels are chained in operand
/// order; with `as_index` the chained axis is re-validated as an Index
/// (failing [`CubeError::UniquenessViolation`] on a duplicate label),
/// otherwise it becomes a Series.
///
/// The remaining axes are collected in first-occurrence order across the
/// operands (a Series version takes precedence over an Index of the same
/// name) and every operand is aligned to them; operands missing one of them
/// are broadcast along it.
///
/// # Examples
///
/// ```
/// use labcube_core::{concatenate, Axis, Cube, DenseND};
///
/// let y = Axis::index("year", [2014, 2015]).unwrap();
/// let h1 = Axis::index("month", ["jan", "feb"]).unwrap();
/// let h2 = Axis::index("month", ["mar", "apr"]).unwrap();
/// let a = Cube::new(DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap(),
///     vec![y.clone(), h1]).unwrap();
/// let b = Cube::new(DenseND::from_vec(vec![5.0, 6.0, 7.0, 8.0], &[2, 2]).unwrap(),
///     vec![y, h2]).unwrap();
///
/// let year_so_far = concatenate(&[a, b], "month", true).unwrap();
/// assert_eq!(year_so_far.axes()[0].len(), 4);
/// assert_eq!(&year_so_far.shape()[..], &[4, 2]);
/// ```
pub fn concatenate<T: Clone>(
    cubes: &[Cube<T>],
    axis_name: &str,
    as_index: bool,
) -> CubeResult<Cube<T>> {
    if cubes.is_empty() {
        return Err(anyhow::anyhow!("cannot concatenate an empty cube list").into());
    }

    // Chain the main axis labels in operand order.
    let mut main_labels = Vec::new();
    for cube in cubes {
        main_labels.extend_from_slice(cube.axis(axis_name)?.labels());
    }
    let main_axis = if as_index {
        Axis::index(axis_name, main_labels)?
    } else {
        Axis::series(axis_name, main_labels)?
    };

    // Base versions of the remaining axes, first occurrence first; a Series
    // takes precedence over an equally named Index.
    let mut base_axes: Vec<Axis> = Vec::new();
    for cube in cubes {
        for axis in cube.axes() {
            if axis.name() == axis_name {
                continue;
            }
            match base_axes.iter().position(|a| a.name() == axis.name()) {
                None => base_axes.push(axis.clone()),
                Some(i) => {
                    if base_axes[i].kind() == AxisKind::Index && axis.kind() == AxisKind::Series {
                        base_axes[i] = axis.clone();
                    }
                }
            }
        }
    }

    let base_lens: Vec<usize> = base_axes.iter().map(|a| a.len()).collect();
    let mut parts = Vec::with_capacity(cubes.len());
    for cube in cubes {
        let mut values = cube.values().clone();

        // Align every base axis the cube carries.
        for base in &base_axes {
            let Some(position) = cube.axes().find(base.name()) else {
                continue;
            };
            let axis = &cube.axes()[position];
            if axis.same(base) {
                continue;
            }
            match axis.kind() {
                AxisKind::Index => {
                    if base.kind() == AxisKind::Index && axis.len() != base.len() {
                        return Err(incompatible(base, "the Index axes have different lengths"));
                    }
                    let gather = axis.positions(base.labels()).map_err(|_| {
                        incompatible(base, "the axes carry different label sets")
                    })?;
                    values = values.take(&gather, position)?;
                }
                AxisKind::Series => {
                    if axis.labels() != base.labels() {
                        return Err(incompatible(
                            base,
                            "the Series axes carry different label sequences",
                        ));
                    }
                }
            }
        }

        // Transpose into [main, base...] order, adding unit dimensions for
        // base axes the cube does not carry.
        let own_main = cube.axes().find(axis_name).expect("checked above");
        let mut order = vec![own_main];
        for base in &base_axes {
            match cube.axes().find(base.name()) {
                Some(position) => order.push(position),
                None => {
                    values = values.unsqueeze(values.rank())?;
                    order.push(values.rank() - 1);
                }
            }
        }
        values = values.permute(&order)?;

        // Stretch the broadcast dimensions; the main extent stays the
        // cube's own.
        let mut target = vec![cube.axis(axis_name)?.len()];
        target.extend_from_slice(&base_lens);
        parts.push(values.broadcast_to(&target)?);
    }

    let values = crate::dense::DenseND::concatenate(&parts, 0)?;
    let mut axes = vec![main_axis];
    axes.extend(base_axes);
    Cube::new(values, AxisList::new(axes)?)
}

fn incompatible(axis: &Axis, reason: &str) -> CubeError {
    CubeError::IncompatibleAxes {
        name: axis.name().to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseND;

    fn quarter_cube(values: Vec<f64>, quarters: &[&str]) -> Cube<f64> {
        let y = Axis::index("year", [2014, 2015]).unwrap();
        let q = Axis::index("quarter", quarters.iter().copied()).unwrap();
        Cube::new(
            DenseND::from_vec(values, &[2, quarters.len()]).unwrap(),
            vec![y, q],
        )
        .unwrap()
    }

    #[test]
    fn concatenates_along_the_named_axis() {
        let h1 = quarter_cube(vec![1.0, 2.0, 3.0, 4.0], &["Q1", "Q2"]);
        let h2 = quarter_cube(vec![5.0, 6.0, 7.0, 8.0], &["Q3", "Q4"]);
        let full = concatenate(&[h1, h2], "quarter", true).unwrap();

        // The main axis leads the result, base axes follow.
        assert_eq!(
            full.axes().names().collect::<Vec<_>>(),
            vec!["quarter", "year"]
        );
        assert_eq!(&full.shape()[..], &[4, 2]);
        // Q1 row is [1, 3]: the year axis was preserved.
        assert_eq!(full.values().to_vec(), vec![1.0, 3.0, 2.0, 4.0, 5.0, 7.0, 6.0, 8.0]);
    }

    #[test]
    fn aligns_shared_axes_by_label() {
        let y1 = Axis::index("year", [2014, 2015]).unwrap();
        let y2 = Axis::index("year", [2015, 2014]).unwrap();
        let q1 = Axis::index("quarter", ["Q1"]).unwrap();
        let q2 = Axis::index("quarter", ["Q2"]).unwrap();
        let a = Cube::new(
            DenseND::from_vec(vec![1.0, 2.0], &[2, 1]).unwrap(),
            vec![y1, q1],
        )
        .unwrap();
        let b = Cube::new(
            DenseND::from_vec(vec![20.0, 10.0], &[2, 1]).unwrap(),
            vec![y2, q2],
        )
        .unwrap();

        let both = concatenate(&[a, b], "quarter", true).unwrap();
        // b's year axis got reordered to the base (2014, 2015) order.
        assert_eq!(both.values().to_vec(), vec![1.0, 2.0, 10.0, 20.0]);
    }

    #[test]
    fn duplicate_labels_need_a_series_result() {
        let h1 = quarter_cube(vec![1.0, 2.0, 3.0, 4.0], &["Q1", "Q2"]);
        let h2 = quarter_cube(vec![5.0, 6.0, 7.0, 8.0], &["Q1", "Q2"]);
        assert!(matches!(
            concatenate(&[h1.clone(), h2.clone()], "quarter", true).unwrap_err(),
            CubeError::UniquenessViolation { .. }
        ));
        let series = concatenate(&[h1, h2], "quarter", false).unwrap();
        assert_eq!(series.axes()[0].kind(), AxisKind::Series);
        assert_eq!(series.axes()[0].len(), 4);
    }

    #[test]
    fn missing_axis_broadcasts() {
        let y = Axis::index("year", [2014, 2015]).unwrap();
        let q1 = Axis::index("quarter", ["Q1"]).unwrap();
        let q2 = Axis::index("quarter", ["Q2"]).unwrap();
        let with_year = Cube::new(
            DenseND::from_vec(vec![1.0, 2.0], &[1, 2]).unwrap(),
            vec![q1, y],
        )
        .unwrap();
        let flat = Cube::new(DenseND::from_vec(vec![9.0], &[1]).unwrap(), vec![q2]).unwrap();

        let both = concatenate(&[with_year, flat], "quarter", true).unwrap();
        assert_eq!(&both.shape()[..], &[2, 2]);
        // The axis-less operand was repeated across years.
        assert_eq!(both.values().to_vec(), vec![1.0, 2.0, 9.0, 9.0]);
    }

    #[test]
    fn missing_main_axis_is_an_error() {
        let y = Axis::index("year", [2014]).unwrap();
        let c = Cube::new(DenseND::from_vec(vec![1.0], &[1]).unwrap(), vec![y]).unwrap();
        assert!(matches!(
            concatenate(&[c], "quarter", true).unwrap_err(),
            CubeError::AxisNotFound { .. }
        ));
    }
}
