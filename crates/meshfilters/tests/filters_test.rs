//! Integration tests for the meshfilters API.
//!
//! These exercise the filters end to end through the public free functions and
//! the `DataSetFilters` extension trait.

use meshfilters::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A 10 x 1 x 1 bar of hexahedra with cell values 0..=9 and point values 0..=10 along x.
fn bar() -> Dataset {
    let mut ds = Dataset::uniform_grid(UVec3::new(11, 2, 2), Vec3::ZERO, Vec3::ONE)
        .expect("grid");
    let cell_values: Vec<f32> = (0..10).map(|i| i as f32).collect();
    ds.add_cell_array(DataArray::scalars("cells", cell_values))
        .expect("cell array");
    let point_values: Vec<f32> = ds.points().iter().map(|p| p.x).collect();
    ds.add_point_array(DataArray::scalars("points", point_values))
        .expect("point array");
    ds.set_active_scalar("cells", Association::Cell)
        .expect("active");
    ds
}

/// A unit cube sampled on a 6 x 6 x 6 grid with the field `x + 2y + 3z`.
fn cube() -> Dataset {
    let mut ds = Dataset::uniform_grid(UVec3::splat(6), Vec3::ZERO, Vec3::splat(0.2))
        .expect("grid");
    let values: Vec<f32> = ds
        .points()
        .iter()
        .map(|p| p.x + 2.0 * p.y + 3.0 * p.z)
        .collect();
    ds.add_point_array(DataArray::scalars("field", values))
        .expect("field");
    ds.set_active_scalar("field", Association::Point)
        .expect("active");
    ds
}

fn cell_values(ds: &Dataset) -> Vec<f32> {
    ds.cell_data()
        .get("cells")
        .expect("cells array")
        .values()
        .to_vec()
}

#[test]
fn test_symbolic_normals_are_unit_axes() {
    let table = [
        ("x", [1.0, 0.0, 0.0]),
        ("y", [0.0, 1.0, 0.0]),
        ("z", [0.0, 0.0, 1.0]),
        ("-x", [-1.0, 0.0, 0.0]),
        ("-y", [0.0, -1.0, 0.0]),
        ("-z", [0.0, 0.0, -1.0]),
    ];
    for (name, expected) in table {
        let normal: Normal = name.parse().expect("known normal");
        let v = normal.to_vec3();
        assert_eq!(v.to_array(), expected, "normal {name}");
        assert!((v.length() - 1.0).abs() < 1e-7);
    }
}

#[test]
fn test_slice_at_center_and_outside() {
    init_logging();
    let ds = cube();
    for normal in [Normal::X, Normal::Y, Normal::Z, Normal::from([1.0, 1.0, 0.0])] {
        let out = ds
            .slice(&SliceOptions {
                normal,
                origin: Some(ds.center()),
                ..SliceOptions::default()
            })
            .expect("slice through center");
        assert!(out.n_cells() > 0);
    }

    let outside = SliceOptions {
        origin: Some(Vec3::new(0.5, 0.5, 1.5)),
        ..SliceOptions::default()
    };
    assert!(matches!(
        ds.slice(&outside),
        Err(FilterError::BoundsViolation { .. })
    ));
}

#[test]
fn test_slice_on_bounding_box_faces() {
    init_logging();
    let ds = cube();
    let bounds = ds.bounds();
    let center = ds.center();
    let cases = [
        (Normal::X, 0, bounds.min.x),
        (Normal::X, 0, bounds.max.x),
        (Normal::NegX, 0, bounds.min.x),
        (Normal::NegX, 0, bounds.max.x),
        (Normal::Y, 1, bounds.max.y),
        (Normal::NegY, 1, bounds.min.y),
        (Normal::Z, 2, bounds.max.z),
        (Normal::NegZ, 2, bounds.min.z),
    ];
    for (normal, axis, coordinate) in cases {
        let mut origin = center;
        origin[axis] = coordinate;
        let out = ds
            .slice(&SliceOptions {
                normal,
                origin: Some(origin),
                generate_triangles: false,
            })
            .expect("slice on a face of the bounds");
        assert_eq!(out.n_cells(), 25, "{normal:?} at {origin}");
        assert_eq!(out.n_points(), 36);
        assert!(out.points().iter().all(|p| p[axis] == coordinate));
        assert!(out.point_data().contains("field"));
    }
}

#[test]
fn test_slice_along_axis_without_tolerance_covers_the_ends() {
    let ds = cube();
    let blocks = ds
        .slice_along_axis(&SliceAlongAxisOptions {
            n: 3,
            tolerance: Some(0.0),
            generate_triangles: false,
            ..SliceAlongAxisOptions::default()
        })
        .expect("slices");
    assert_eq!(blocks.len(), 3);
    for block in &blocks {
        assert_eq!(block.dataset().n_cells(), 25, "{}", block.name());
    }
    let (min, max) = ds.bounds().axis_range(0);
    let first = blocks.get(0).expect("first slice");
    let last = blocks.get(2).expect("last slice");
    assert!(first.points().iter().all(|p| p.x == min));
    assert!(last.points().iter().all(|p| p.x == max));
}

#[test]
fn test_slice_interpolates_field() {
    let ds = cube();
    let out = ds
        .slice(&SliceOptions {
            normal: Normal::Z,
            origin: Some(Vec3::new(0.5, 0.5, 0.3)),
            generate_triangles: true,
        })
        .expect("slice");
    assert!(out.cells().iter().all(|c| c.kind() == CellKind::Triangle));
    let field = out.point_data().get("field").expect("field");
    for (i, p) in out.points().iter().enumerate() {
        assert!((p.z - 0.3).abs() < 1e-5);
        assert!((field.values()[i] - (p.x + 2.0 * p.y + 3.0 * p.z)).abs() < 1e-4);
    }
    assert_eq!(out.active_scalar_info(), Some((Association::Point, "field")));
}

#[test]
fn test_threshold_inverted_range_includes_bounds() {
    init_logging();
    let mut ds = bar();
    // Spread the cell values over [0, 10].
    let values: Vec<f32> = (0..10).map(|i| i as f32 * 10.0 / 9.0).collect();
    ds.add_cell_array(DataArray::scalars("spread", values.clone()))
        .expect("spread");

    let out = ds
        .threshold(&ThresholdOptions {
            value: Some(ThresholdValue::try_from(&[values[3], values[6]][..]).expect("range")),
            scalars: Some("spread".to_string()),
            invert: true,
            ..ThresholdOptions::default()
        })
        .expect("threshold");

    let kept = out.cell_data().get("spread").expect("spread").values().to_vec();
    let expected: Vec<f32> = [0, 1, 2, 3, 6, 7, 8, 9].iter().map(|&i| values[i]).collect();
    assert_eq!(kept, expected);
    assert!(kept.iter().all(|&v| v <= values[3] || v >= values[6]));
}

#[test]
fn test_threshold_point_scalars_continuous() {
    let ds = bar();
    let strict = ds
        .threshold(&ThresholdOptions {
            value: Some(ThresholdValue::Range(2.5, 4.5)),
            scalars: Some("points".to_string()),
            preference: Association::Point,
            ..ThresholdOptions::default()
        })
        .expect("threshold");
    assert_eq!(cell_values(&strict), vec![3.0]);

    let continuous = ds
        .threshold(&ThresholdOptions {
            value: Some(ThresholdValue::Range(2.5, 4.5)),
            scalars: Some("points".to_string()),
            preference: Association::Point,
            continuous: true,
            ..ThresholdOptions::default()
        })
        .expect("threshold");
    assert_eq!(cell_values(&continuous), vec![2.0, 3.0, 4.0]);
}

#[test]
fn test_threshold_percent_forms_agree() {
    let ds = bar();
    let run = |percent: f32| {
        ds.threshold_percent(&ThresholdPercentOptions {
            percent: ThresholdValue::Scalar(percent),
            ..ThresholdPercentOptions::default()
        })
    };
    let a = run(50.0).expect("50");
    let b = run(0.5).expect("0.5");
    assert_eq!(a, b);
    assert_eq!(cell_values(&a), vec![5.0, 6.0, 7.0, 8.0, 9.0]);

    for bad in [0.0, 1e-11, 150.0, -3.0] {
        assert!(
            matches!(run(bad), Err(FilterError::OutOfRange(_))),
            "percent {bad} should be rejected"
        );
    }

    let range = ds
        .threshold_percent(&ThresholdPercentOptions {
            percent: ThresholdValue::Range(20.0, 0.5),
            ..ThresholdPercentOptions::default()
        })
        .expect("percent range");
    assert_eq!(cell_values(&range), vec![2.0, 3.0, 4.0]);
}

#[test]
fn test_slice_along_axis_labels_and_offsets() {
    init_logging();
    let ds = cube();
    let blocks = ds
        .slice_along_axis(&SliceAlongAxisOptions::default())
        .expect("slices");
    assert_eq!(
        blocks.names(),
        vec!["slice00", "slice01", "slice02", "slice03", "slice04"]
    );

    let (min, max) = ds.bounds().axis_range(0);
    let tol = (max - min) * 0.01;
    let mut previous = f32::NEG_INFINITY;
    for block in &blocks {
        let x = block.dataset().points()[0].x;
        assert!(block.dataset().points().iter().all(|p| (p.x - x).abs() < 1e-5));
        assert!(x > previous);
        assert!(x >= min + tol - 1e-6 && x <= max - tol + 1e-6);
        previous = x;
    }
}

#[test]
fn test_slice_orthogonal_through_point() {
    let ds = cube();
    let blocks = ds
        .slice_orthogonal(&OrthogonalSliceOptions {
            x: Some(0.1),
            ..OrthogonalSliceOptions::default()
        })
        .expect("orthogonal");
    assert_eq!(blocks.len(), 3);
    let yz = blocks.get_by_name("YZ").expect("YZ");
    assert!(yz.points().iter().all(|p| (p.x - 0.1).abs() < 1e-5));
    assert!(blocks.bounds().is_some());
}

#[test]
fn test_contour_count_levels() {
    init_logging();
    let ds = cube();
    let range = ds.data_range("field", Association::Point).expect("range");
    let levels = Isosurfaces::Count(10).levels(range);
    assert_eq!(levels.len(), 10);
    assert_eq!(levels[0], range.0);
    assert!((levels[9] - range.1).abs() < 1e-5);

    let out = ds.contour(&ContourOptions::default()).expect("contour");
    assert!(out.n_cells() > 0);
    let field = out.point_data().get("field").expect("field");
    let (lo, hi) = field.range().expect("values");
    assert!(lo >= range.0 - 1e-4 && hi <= range.1 + 1e-4);
}

#[test]
fn test_contour_rejects_cell_data() {
    let ds = bar();
    let err = ds
        .contour(&ContourOptions {
            scalars: Some("cells".to_string()),
            ..ContourOptions::default()
        })
        .unwrap_err();
    assert!(matches!(err, FilterError::MissingData(_)));
}

#[test]
fn test_texture_in_place_keeps_geometry_and_old_tcoords() {
    let mut ds = cube();
    let n = ds.n_points();
    ds.point_data_mut()
        .install_tcoords(DataArray::from_vec2("legacy", &vec![[0.0, 0.0]; n]));
    let before_points = ds.points().to_vec();
    let before_cells = ds.n_cells();

    let options = TextureMapOptions::new(Vec3::ZERO, Vec3::X, Vec3::Y);
    ds.texture_map_to_plane_in_place(&options).expect("texture");

    assert_eq!(ds.points(), &before_points[..]);
    assert_eq!(ds.n_cells(), before_cells);
    assert_eq!(ds.point_data().tcoords_name(), Some(DEFAULT_TCOORDS_NAME));
    assert!(ds.point_data().contains("legacy"));
}

#[test]
fn test_clip_then_outline_bounds() {
    let ds = cube();
    let clipped = ds
        .clip(&ClipOptions {
            normal: Normal::NegZ,
            origin: Some(Vec3::new(0.5, 0.5, 0.45)),
            invert: false,
        })
        .expect("clip");
    let outline = clipped.outline(false).expect("outline");
    let bounds = outline.bounds();
    assert!((bounds.max.z - 0.45).abs() < 1e-5);
    assert_eq!(bounds.min.z, 0.0);
    assert_eq!(outline.n_scalars(), 0);
}

#[test]
fn test_surface_and_wireframe_of_clipped_cube() {
    let ds = cube();
    let surface = ds.extract_geometry().expect("surface");
    assert_eq!(surface.n_cells(), 6 * 25);
    let edges = ds.wireframe().expect("edges");
    assert_eq!(edges.n_cells(), 3 * 6 * 6 * 5);
    assert_eq!(edges.active_scalar_info(), Some((Association::Point, "field")));
}

#[test]
fn test_elevation_feeds_contour() {
    let ds = cube();
    let elevated = ds.elevation(&ElevationOptions::default()).expect("elevation");
    assert_eq!(
        elevated.active_scalar_info(),
        Some((Association::Point, ELEVATION_ARRAY_NAME))
    );
    let rings = elevated
        .contour(&ContourOptions {
            isosurfaces: Isosurfaces::Values(vec![0.5]),
            ..ContourOptions::default()
        })
        .expect("contour");
    assert!(rings.points().iter().all(|p| (p.z - 0.5).abs() < 1e-5));
}

#[test]
fn test_settings_drive_options() {
    let settings = Settings::from_json_str(r#"{ "slice_count": 2, "contour_count": 4 }"#)
        .expect("settings");
    assert_eq!(SliceAlongAxisOptions::from_settings(&settings).n, 2);
    assert_eq!(
        ContourOptions::from_settings(&settings).isosurfaces,
        Isosurfaces::Count(4)
    );
}
