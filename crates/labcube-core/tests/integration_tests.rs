//! Integration tests for labcube-core
//!
//! End-to-end scenarios exercising construction, alignment, broadcasting,
//! reductions, grouping, and selection together.

use labcube_core::{
    concatenate, Axis, AxisKind, Cube, CubeError, DenseND, Reducer,
};

fn sales_cube() -> Cube<f64> {
    let year = Axis::index("year", [2014, 2015]).unwrap();
    let quarter = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
    Cube::new(
        DenseND::from_vec(
            vec![14.0, 16.0, 13.0, 20.0, 15.0, 15.0, 10.0, 19.0],
            &[2, 4],
        )
        .unwrap(),
        vec![year, quarter],
    )
    .unwrap()
}

fn assert_values_close(cube: &Cube<f64>, expected: &[f64]) {
    let got = cube.values().to_vec();
    assert_eq!(got.len(), expected.len());
    for (g, e) in got.iter().zip(expected.iter()) {
        assert!((g - e).abs() < 1e-9, "{:?} != {:?}", got, expected);
    }
}

#[test]
fn scalar_broadcast_keeps_the_axis_list() {
    let sales = sales_cube();
    let halved = &sales * 0.5;
    assert_eq!(halved.axes(), sales.axes());
    assert_values_close(&halved, &[7.0, 8.0, 6.5, 10.0, 7.5, 7.5, 5.0, 9.5]);
}

#[test]
fn single_axis_alignment_by_broadcast() {
    let sales = sales_cube();
    let quarter = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
    let prices = Cube::new(
        DenseND::from_vec(vec![1.50, 1.52, 1.53, 1.55], &[4]).unwrap(),
        quarter,
    )
    .unwrap();

    let revenue = sales.try_mul(&prices).unwrap();
    assert_eq!(
        revenue.axes().names().collect::<Vec<_>>(),
        vec!["year", "quarter"]
    );
    assert_values_close(
        &revenue,
        &[21.0, 24.32, 19.89, 31.0, 22.5, 22.8, 15.3, 29.45],
    );
}

#[test]
fn index_index_reorder_alignment() {
    let a_axis = Axis::index("k", ["a", "b", "c"]).unwrap();
    let b_axis = Axis::index("k", ["c", "b", "a"]).unwrap();
    let p = Cube::new(
        DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap(),
        a_axis.clone(),
    )
    .unwrap();
    let q = Cube::new(
        DenseND::from_vec(vec![30.0, 20.0, 10.0], &[3]).unwrap(),
        b_axis,
    )
    .unwrap();

    let sum = p.try_add(&q).unwrap();
    assert_eq!(sum.axes()[0], a_axis);
    assert_values_close(&sum, &[11.0, 22.0, 33.0]);
}

#[test]
fn index_series_subset_alignment() {
    let i = Axis::index("k", ["a", "b", "c", "d"]).unwrap();
    let s = Axis::series("k", ["b", "d", "b"]).unwrap();
    let x = Cube::new(
        DenseND::from_vec(vec![10.0, 20.0, 30.0, 40.0], &[4]).unwrap(),
        i,
    )
    .unwrap();
    let y = Cube::new(
        DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap(),
        s.clone(),
    )
    .unwrap();

    let product = x.try_mul(&y).unwrap();
    assert_eq!(product.axes()[0], s);
    assert_values_close(&product, &[20.0, 80.0, 60.0]);
}

#[test]
fn aggregation_with_keep_and_reduce_spellings() {
    let year = Axis::index("year", [2014, 2015]).unwrap();
    let quarter = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
    let revenues = Cube::new(
        DenseND::from_vec(
            vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0],
            &[2, 4],
        )
        .unwrap(),
        vec![year, quarter],
    )
    .unwrap();

    let kept = revenues.sum_keep(&["year"]).unwrap();
    assert_eq!(kept.axes().names().collect::<Vec<_>>(), vec!["year"]);
    assert_values_close(&kept, &[100.0, 260.0]);

    let reduced = revenues.sum(&["quarter"]).unwrap();
    assert_eq!(kept, reduced);
}

#[test]
fn grouping_by_label_in_first_occurrence_order() {
    let subject = Axis::series("subject", ["m", "b", "m", "p", "m", "b", "m", "p"]).unwrap();
    let score = Cube::new(
        DenseND::from_vec(
            vec![65.0, 80.0, 95.0, 52.0, 35.0, 50.0, 89.0, 95.0],
            &[8],
        )
        .unwrap(),
        subject,
    )
    .unwrap();

    let by_subject = score.group("subject", Reducer::Mean).unwrap();
    let axis = &by_subject.axes()[0];
    assert_eq!(axis.kind(), AxisKind::Index);
    assert_eq!(axis.labels(), &["m".into(), "b".into(), "p".into()]);
    assert_values_close(&by_subject, &[71.0, 65.0, 73.5]);

    // The string-named surface spells the same thing.
    let again = score.group_by_name("subject", "mean").unwrap();
    assert_eq!(again, by_subject);
}

#[test]
fn incompatible_axes_fail_instead_of_inner_joining() {
    let p = Cube::new(
        DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap(),
        Axis::index("k", ["a", "b", "c"]).unwrap(),
    )
    .unwrap();
    let q = Cube::new(
        DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap(),
        Axis::index("k", ["a", "b", "d"]).unwrap(),
    )
    .unwrap();

    for result in [p.try_add(&q), p.try_mul(&q), p.lt(&q).map(|c| c.apply(|_| 0.0))] {
        match result.unwrap_err() {
            CubeError::IncompatibleAxes { name, .. } => assert_eq!(name, "k"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn chained_pipeline_filter_scale_group() {
    // Filter a cube, scale it, and aggregate, checking axes at every step.
    let sales = sales_cube();
    let h2 = sales.filter("quarter", ["Q3", "Q4"]).unwrap();
    assert_eq!(&h2.shape()[..], &[2, 2]);

    let taxed = &h2 * 1.2;
    let per_year = taxed.sum_keep(&["year"]).unwrap();
    assert_values_close(&per_year, &[(13.0 + 20.0) * 1.2, (10.0 + 19.0) * 1.2]);

    let total = per_year.sum::<&str>(&[]).unwrap();
    assert_eq!(total.rank(), 0);
    assert!((total.scalar_value().unwrap() - 62.0 * 1.2).abs() < 1e-9);
}

#[test]
fn three_operand_expression_with_mixed_axes() {
    // (sales * prices) + bonus, where bonus introduces a new axis.
    let sales = sales_cube();
    let prices = Cube::new(
        DenseND::from_vec(vec![2.0, 2.0, 3.0, 3.0], &[4]).unwrap(),
        Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap(),
    )
    .unwrap();
    let bonus = Cube::new(
        DenseND::from_vec(vec![0.0, 100.0], &[2]).unwrap(),
        Axis::index("scenario", ["base", "boosted"]).unwrap(),
    )
    .unwrap();

    let result = sales.try_mul(&prices).unwrap().try_add(&bonus).unwrap();
    assert_eq!(
        result.axes().names().collect::<Vec<_>>(),
        vec!["year", "quarter", "scenario"]
    );
    assert_eq!(&result.shape()[..], &[2, 4, 2]);
    // sales[2015][Q3] * 3 + 100 in the boosted scenario.
    assert!((result.values()[&[1, 2, 1]] - (10.0 * 3.0 + 100.0)).abs() < 1e-9);
}

#[test]
fn comparison_then_boolean_reduction() {
    let sales = sales_cube();
    let strong = sales.ge_scalar(14.0);
    let all_strong_years = strong.all(&["quarter"]).unwrap();
    assert_eq!(all_strong_years.values().to_vec(), vec![false, false]);
    let any_strong_years = strong.any(&["quarter"]).unwrap();
    assert_eq!(any_strong_years.values().to_vec(), vec![true, true]);
}

#[test]
fn structural_operations_compose() {
    let sales = sales_cube();

    let renamed = sales.rename_axis("year", "fiscal_year").unwrap();
    assert_eq!(
        renamed.axes().names().collect::<Vec<_>>(),
        vec!["fiscal_year", "quarter"]
    );

    let swapped = renamed.swap_axes(0usize, 1usize).unwrap();
    assert_eq!(&swapped.shape()[..], &[4, 2]);
    assert_eq!(swapped.values()[&[2, 1]], sales.values()[&[1, 2]]);

    let transposed = swapped.transpose(&["fiscal_year", "quarter"]).unwrap();
    assert_eq!(transposed.values(), sales.values());
}

#[test]
fn concatenate_quarters_across_halves() {
    let year = Axis::index("year", [2014, 2015]).unwrap();
    let h1 = Cube::new(
        DenseND::from_vec(vec![14.0, 16.0, 15.0, 15.0], &[2, 2]).unwrap(),
        vec![
            year.clone(),
            Axis::index("quarter", ["Q1", "Q2"]).unwrap(),
        ],
    )
    .unwrap();
    let h2 = Cube::new(
        DenseND::from_vec(vec![13.0, 20.0, 10.0, 19.0], &[2, 2]).unwrap(),
        vec![year, Axis::index("quarter", ["Q3", "Q4"]).unwrap()],
    )
    .unwrap();

    let full = concatenate(&[h1, h2], "quarter", true).unwrap();
    assert_eq!(full.axes()[0].labels().len(), 4);
    assert_eq!(full.axes()[0].kind(), AxisKind::Index);

    // Same numbers as the reference cube, modulo the axis order.
    let reference = sales_cube();
    let reordered = full.transpose(&["year", "quarter"]).unwrap();
    assert_eq!(reordered.values(), reference.values());
}

#[test]
fn raw_tensor_operand_uses_engine_broadcasting() {
    let sales = sales_cube();
    let per_quarter = DenseND::from_vec(vec![1.0, 0.0, 1.0, 0.0], &[4]).unwrap();
    let masked = sales.zip_raw(&per_quarter, |a, b| a * b).unwrap();
    assert_eq!(masked.axes(), sales.axes());
    assert_values_close(&masked, &[14.0, 0.0, 13.0, 0.0, 15.0, 0.0, 10.0, 0.0]);
}

#[test]
fn unary_functions_preserve_axes() {
    let sales = sales_cube();
    let logs = sales.ln().exp();
    assert_eq!(logs.axes(), sales.axes());
    for (g, e) in logs.values().iter().zip(sales.values().iter()) {
        assert!((g - e).abs() < 1e-9);
    }
}

#[test]
fn shared_value_buffers_are_not_observable() {
    // Filtering and arithmetic leave the source cube untouched.
    let sales = sales_cube();
    let before = sales.values().to_vec();

    let _ = sales.filter("quarter", ["Q1"]).unwrap();
    let _ = &sales * 3.0;
    let _ = sales.sum::<&str>(&[]).unwrap();
    let _ = sales.transpose(&["quarter", "year"]).unwrap();

    assert_eq!(sales.values().to_vec(), before);
}
