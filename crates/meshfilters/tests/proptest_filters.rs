//! Property-based tests for the filters.
//!
//! These use proptest to generate random grids, fields and parameters and
//! check the invariants the filters promise.
//!
//! Run with: cargo test -p meshfilters -- proptest

use meshfilters::*;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A small uniform grid with random resolution, origin and spacing.
fn arb_grid() -> impl Strategy<Value = Dataset> {
    (
        prop::array::uniform3(2u32..5),
        prop::array::uniform3(-10.0f32..10.0),
        prop::array::uniform3(0.1f32..2.0),
    )
        .prop_map(|(dims, origin, spacing)| {
            Dataset::uniform_grid(
                UVec3::from(dims),
                Vec3::from(origin),
                Vec3::from(spacing),
            )
            .expect("valid grid")
        })
}

/// A grid carrying a random linear point field `a . p + b`, set active.
fn arb_field_grid() -> impl Strategy<Value = Dataset> {
    (arb_grid(), prop::array::uniform3(-3.0f32..3.0), -5.0f32..5.0).prop_map(
        |(mut grid, a, b)| {
            let a = Vec3::from(a);
            let values: Vec<f32> = grid.points().iter().map(|p| a.dot(*p) + b).collect();
            grid.add_point_array(DataArray::scalars("f", values))
                .expect("field");
            grid.set_active_scalar("f", Association::Point)
                .expect("active");
            grid
        },
    )
}

fn arb_axis_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["x", "y", "z", "-x", "-y", "-z", "X", "-Z"])
}

// =============================================================================
// Resolver
// =============================================================================

proptest! {
    #[test]
    fn proptest_symbolic_normals_are_signed_unit_axes(name in arb_axis_name()) {
        let v = name.parse::<Normal>().expect("known name").to_vec3();
        prop_assert!((v.length() - 1.0).abs() < 1e-7);
        let negative = name.starts_with('-');
        let sum = v.x + v.y + v.z;
        prop_assert_eq!(sum, if negative { -1.0 } else { 1.0 });
    }

    #[test]
    fn proptest_unknown_axis_indices_rejected(index in 3usize..1000) {
        prop_assert!(Axis::try_from(index).is_err());
    }

    #[test]
    fn proptest_center_slice_always_succeeds(grid in arb_grid(), name in arb_axis_name()) {
        let out = slice(
            &grid,
            &SliceOptions {
                normal: name.parse().expect("known name"),
                ..SliceOptions::default()
            },
        );
        prop_assert!(out.is_ok());
        prop_assert!(out.expect("slice").n_cells() > 0);
    }

    #[test]
    fn proptest_outside_origin_is_bounds_violation(grid in arb_grid(), push in 0.01f32..100.0) {
        let bounds = grid.bounds();
        let origin = Vec3::new(bounds.max.x + push, bounds.min.y, bounds.min.z);
        let result = slice(
            &grid,
            &SliceOptions { origin: Some(origin), ..SliceOptions::default() },
        );
        prop_assert!(
            matches!(result, Err(FilterError::BoundsViolation { .. })),
            "expected a bounds violation"
        );
    }
}

// =============================================================================
// Threshold percent
// =============================================================================

proptest! {
    #[test]
    fn proptest_percent_fraction_and_percent_agree(p in 1u32..100) {
        let fraction = normalize_percent(p as f32 / 100.0).expect("fraction");
        let percent = normalize_percent(p as f32).expect("percent");
        prop_assert!((fraction - percent).abs() < 1e-6);
    }

    #[test]
    fn proptest_percent_over_hundred_rejected(p in 100.001f32..1.0e6) {
        prop_assert!(matches!(normalize_percent(p), Err(FilterError::OutOfRange(_))));
    }

    #[test]
    fn proptest_percent_non_positive_rejected(p in -1.0e6f32..1.0e-10) {
        prop_assert!(matches!(normalize_percent(p), Err(FilterError::OutOfRange(_))));
    }

    #[test]
    fn proptest_threshold_percent_keeps_upper_cells(grid in arb_field_grid(), p in 0.05f32..0.95) {
        let (min, max) = grid.data_range("f", Association::Point).expect("range");
        let cut = min + p * (max - min);
        let out = threshold_percent(
            &grid,
            &ThresholdPercentOptions {
                percent: ThresholdValue::Scalar(p),
                ..ThresholdPercentOptions::default()
            },
        )
        .expect("threshold");
        let f = out.point_data().get("f").expect("f");
        prop_assert!(f.values().iter().all(|&v| v >= cut));
    }
}

// =============================================================================
// Elevation
// =============================================================================

proptest! {
    #[test]
    fn proptest_elevation_stays_in_range(
        grid in arb_grid(),
        low in prop::array::uniform3(-20.0f32..20.0),
        high in prop::array::uniform3(-20.0f32..20.0),
        r0 in -50.0f32..50.0,
        r1 in -50.0f32..50.0,
    ) {
        let out = elevation(
            &grid,
            &ElevationOptions {
                low_point: Some(Vec3::from(low)),
                high_point: Some(Vec3::from(high)),
                scalar_range: ScalarRange::Explicit(r0, r1),
                ..ElevationOptions::default()
            },
        )
        .expect("elevation");
        let (lo, hi) = (r0.min(r1), r0.max(r1));
        let values = out.point_data().get(ELEVATION_ARRAY_NAME).expect("elevation");
        prop_assert_eq!(values.len(), grid.n_points());
        for &v in values.values() {
            prop_assert!(v >= lo - 1e-3 && v <= hi + 1e-3, "{} outside [{}, {}]", v, lo, hi);
        }
    }
}

// =============================================================================
// Clip and contour
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_clip_halves_partition_volume(grid in arb_field_grid(), t in 0.1f32..0.9) {
        let bounds = grid.bounds();
        let origin = bounds.min.lerp(bounds.max, t);
        let volume = |ds: &Dataset| -> f32 {
            ds.cells()
                .iter()
                .flat_map(Cell::tetrahedra)
                .map(|tet| {
                    let p = tet.map(|i| ds.points()[i as usize]);
                    ((p[1] - p[0]).cross(p[2] - p[0]).dot(p[3] - p[0]) / 6.0).abs()
                })
                .sum()
        };
        let options = ClipOptions { origin: Some(origin), ..ClipOptions::default() };
        let below = clip(&grid, &options).expect("clip");
        let above = clip(&grid, &ClipOptions { invert: false, ..options }).expect("clip");

        let total = volume(&grid);
        let parts = volume(&below) + volume(&above);
        prop_assert!((total - parts).abs() <= 1e-3 * total.max(1.0), "{} vs {}", total, parts);
    }

    #[test]
    fn proptest_contour_points_lie_on_level(grid in arb_field_grid(), t in 0.05f32..0.95) {
        let (min, max) = grid.data_range("f", Association::Point).expect("range");
        prop_assume!(max - min > 1e-3);
        let level = min + t * (max - min);
        let out = contour(
            &grid,
            &ContourOptions {
                isosurfaces: Isosurfaces::Values(vec![level]),
                ..ContourOptions::default()
            },
        )
        .expect("contour");
        let f = out.point_data().get("f").expect("f");
        let tolerance = 1e-3 * (max - min).max(1.0);
        for &v in f.values() {
            prop_assert!((v - level).abs() <= tolerance, "{} vs level {}", v, level);
        }
    }
}
