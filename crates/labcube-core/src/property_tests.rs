//! Property-based tests for the axis algebra
//!
//! These verify the library invariants over randomly generated cubes:
//! transpose round-trips, sum decomposition, filter idempotence, selection
//! identities, and commutativity of aligned arithmetic up to axis order.

#[cfg(test)]
mod tests {
    use crate::{Axis, AxisList, Cube, DenseND};
    use proptest::prelude::*;

    // Strategy for small shapes (1-3 axes, tiny extents keep cases fast).
    fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1usize..5, 1..=3)
    }

    fn values_for(shape: &[usize]) -> impl Strategy<Value = Vec<f64>> {
        let n: usize = shape.iter().product();
        prop::collection::vec(-100.0f64..100.0, n..=n)
    }

    fn cube_from(shape: &[usize], values: Vec<f64>) -> Cube<f64> {
        let axes: Vec<Axis> = shape
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                Axis::index(
                    format!("axis_{}", i),
                    (0..n).map(|j| format!("l{}", j)),
                )
                .unwrap()
            })
            .collect();
        Cube::new(
            DenseND::from_vec(values, shape).unwrap(),
            AxisList::new(axes).unwrap(),
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn prop_transpose_roundtrip(
            (shape, values) in shape_strategy()
                .prop_flat_map(|s| (Just(s.clone()), values_for(&s)))
        ) {
            let cube = cube_from(&shape, values);
            let rank = cube.rank();
            let forward: Vec<usize> = (0..rank).rev().collect();
            let mut inverse = vec![0usize; rank];
            for (i, &p) in forward.iter().enumerate() {
                inverse[p] = i;
            }
            let back = cube
                .transpose(&forward)
                .unwrap()
                .transpose(&inverse)
                .unwrap();
            prop_assert_eq!(back, cube);
        }

        #[test]
        fn prop_sum_decomposes(
            (shape, values) in shape_strategy()
                .prop_flat_map(|s| (Just(s.clone()), values_for(&s)))
        ) {
            let cube = cube_from(&shape, values);
            let total = cube.sum::<&str>(&[]).unwrap().scalar_value().unwrap();

            // Reducing the first axis and then the rest agrees with the
            // one-shot reduction.
            let partial = cube.sum(&["axis_0"]).unwrap();
            let stepped = partial.sum::<&str>(&[]).unwrap().scalar_value().unwrap();
            prop_assert!((total - stepped).abs() < 1e-6);

            // And with the engine's own full sum.
            prop_assert!((total - cube.values().sum()).abs() < 1e-6);
        }

        #[test]
        fn prop_filter_is_idempotent(
            (shape, values) in shape_strategy()
                .prop_flat_map(|s| (Just(s.clone()), values_for(&s))),
            selector_bits in prop::collection::vec(any::<bool>(), 1..5)
        ) {
            let cube = cube_from(&shape, values);
            let axis_len = shape[0];
            let wanted: Vec<String> = (0..axis_len)
                .filter(|&j| *selector_bits.get(j).unwrap_or(&true))
                .map(|j| format!("l{}", j))
                .collect();
            prop_assume!(!wanted.is_empty());

            let once = cube.filter("axis_0", wanted.clone()).unwrap();
            let twice = once.filter("axis_0", wanted).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_full_take_is_identity(
            (shape, values) in shape_strategy()
                .prop_flat_map(|s| (Just(s.clone()), values_for(&s)))
        ) {
            let cube = cube_from(&shape, values);
            let everything: Vec<usize> = (0..shape[0]).collect();
            let taken = cube.take("axis_0", &everything).unwrap();
            prop_assert_eq!(taken, cube);
        }

        #[test]
        fn prop_disjoint_axes_outer_product(
            left in prop::collection::vec(-10.0f64..10.0, 1..4),
            right in prop::collection::vec(-10.0f64..10.0, 1..4)
        ) {
            let a = Cube::new(
                DenseND::from_vec(left.clone(), &[left.len()]).unwrap(),
                Axis::index("left", (0..left.len() as i64).collect::<Vec<_>>()).unwrap(),
            )
            .unwrap();
            let b = Cube::new(
                DenseND::from_vec(right.clone(), &[right.len()]).unwrap(),
                Axis::index("right", (0..right.len() as i64).collect::<Vec<_>>()).unwrap(),
            )
            .unwrap();

            let product = a.try_mul(&b).unwrap();
            prop_assert_eq!(
                product.axes().names().collect::<Vec<_>>(),
                vec!["left", "right"]
            );
            for (i, x) in left.iter().enumerate() {
                for (j, y) in right.iter().enumerate() {
                    let got = product.values()[&[i, j]];
                    prop_assert!((got - x * y).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn prop_addition_commutes_up_to_axis_order(
            (shape, values_a, values_b) in shape_strategy().prop_flat_map(|s| {
                (Just(s.clone()), values_for(&s), values_for(&s))
            })
        ) {
            let a = cube_from(&shape, values_a);
            let b = cube_from(&shape, values_b)
                .transpose(&(0..shape.len()).rev().collect::<Vec<_>>())
                .unwrap();

            let ab = a.try_add(&b).unwrap();
            let ba = b.try_add(&a).unwrap();

            // Same set of axes, possibly different order; same values at
            // each coordinate after reordering.
            let order: Vec<&str> = ab.axes().names().collect();
            let ba_reordered = ba.transpose(&order).unwrap();
            prop_assert_eq!(ab, ba_reordered);
        }
    }
}
