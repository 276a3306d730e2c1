//! Planar slices: single, orthogonal triple, and a series along an axis.

use glam::Vec3;
use meshfilters_core::{Algorithm, Cutter, Dataset, MultiBlock, Plane, Result};

use crate::output::wrap_output;
use crate::resolve::{check_inside_bounds, resolve_origin, Axis, Normal};
use crate::settings::Settings;

/// Options for [`slice`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SliceOptions {
    /// Plane normal.
    pub normal: Normal,
    /// Point on the plane; the dataset center when `None`.
    pub origin: Option<Vec3>,
    /// Split slice polygons into triangles.
    pub generate_triangles: bool,
}

impl SliceOptions {
    pub fn from_settings(_settings: &Settings) -> Self {
        Self::default()
    }
}

/// Options for [`slice_orthogonal`]. Unset coordinates default to the dataset center.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrthogonalSliceOptions {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub generate_triangles: bool,
}

impl OrthogonalSliceOptions {
    pub fn from_settings(_settings: &Settings) -> Self {
        Self::default()
    }
}

/// Options for [`slice_along_axis`].
#[derive(Debug, Clone, PartialEq)]
pub struct SliceAlongAxisOptions {
    /// Number of slices.
    pub n: usize,
    /// Axis the slices are spread along.
    pub axis: Axis,
    /// Gap kept free at both ends of the axis; a fraction of the extent when `None`.
    pub tolerance: Option<f32>,
    pub generate_triangles: bool,
    /// Fraction of the axis extent used when `tolerance` is `None`.
    pub tolerance_fraction: f32,
}

impl SliceAlongAxisOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            n: settings.slice_count,
            axis: Axis::X,
            tolerance: None,
            generate_triangles: false,
            tolerance_fraction: settings.slice_tolerance_fraction,
        }
    }
}

impl Default for SliceAlongAxisOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

fn cut(dataset: &Dataset, plane: Plane, generate_triangles: bool) -> Result<Dataset> {
    let output = Cutter::new(plane)
        .generate_triangles(generate_triangles)
        .execute(dataset)?;
    Ok(wrap_output(dataset, output))
}

/// Slices a dataset with a plane.
///
/// The origin must lie within the dataset bounds (inclusive).
pub fn slice(dataset: &Dataset, options: &SliceOptions) -> Result<Dataset> {
    let origin = resolve_origin(dataset, options.origin);
    check_inside_bounds(origin, dataset.bounds())?;
    let plane = Plane::new(origin, options.normal.to_vec3())?;
    log::debug!("slice: origin {origin}, normal {}", plane.normal());

    let output = cut(dataset, plane, options.generate_triangles)?;
    if output.n_cells() == 0 && dataset.n_cells() > 0 {
        log::warn!("slice through {origin} produced no cells");
    }
    Ok(output)
}

/// Slices a dataset with three axis-aligned planes through one point.
///
/// Blocks are `0 "YZ"` (normal x), `1 "XZ"` (normal y) and `2 "XY"` (normal z).
pub fn slice_orthogonal(dataset: &Dataset, options: &OrthogonalSliceOptions) -> Result<MultiBlock> {
    let center = dataset.center();
    let origin = Vec3::new(
        options.x.unwrap_or(center.x),
        options.y.unwrap_or(center.y),
        options.z.unwrap_or(center.z),
    );

    let mut blocks = MultiBlock::new();
    for (index, (name, normal)) in [("YZ", Normal::X), ("XZ", Normal::Y), ("XY", Normal::Z)]
        .into_iter()
        .enumerate()
    {
        let slice_options = SliceOptions {
            normal,
            origin: Some(origin),
            generate_triangles: options.generate_triangles,
        };
        blocks.set(index, name, slice(dataset, &slice_options)?);
    }
    Ok(blocks)
}

/// Returns `n` evenly spaced values from `start` to `stop` inclusive.
fn linspace(start: f32, stop: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let step = (stop - start) / (n - 1) as f32;
            #[allow(clippy::cast_precision_loss)]
            (0..n).map(|i| start + step * i as f32).collect()
        }
    }
}

/// Creates `n` parallel slices spread along an axis.
///
/// The slices span the axis extent shrunk by `tolerance` at both ends and pass
/// through the dataset center in the other two coordinates. Blocks are named
/// `slice00`, `slice01`, and so on.
pub fn slice_along_axis(dataset: &Dataset, options: &SliceAlongAxisOptions) -> Result<MultiBlock> {
    let bounds = dataset.bounds();
    let axis = options.axis.index();
    let (min, max) = bounds.axis_range(axis);
    let tolerance = options
        .tolerance
        .unwrap_or((max - min) * options.tolerance_fraction);
    let offsets = linspace(min + tolerance, max - tolerance, options.n);
    log::debug!(
        "slice_along_axis: {} slice(s) along {} at {offsets:?}",
        options.n,
        options.axis
    );

    let center = dataset.center();
    let mut blocks = MultiBlock::new();
    for (index, offset) in offsets.into_iter().enumerate() {
        let mut origin = center;
        origin[axis] = offset;
        let slice_options = SliceOptions {
            normal: Normal::from(options.axis),
            origin: Some(origin),
            generate_triangles: options.generate_triangles,
        };
        blocks.set(index, format!("slice{index:02}"), slice(dataset, &slice_options)?);
    }
    Ok(blocks)
}
