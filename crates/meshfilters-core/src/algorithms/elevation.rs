//! Scalars from the projection of points onto a line.

use glam::Vec3;

use super::Algorithm;
use crate::attributes::DataArray;
use crate::dataset::Dataset;
use crate::error::Result;

/// Name of the point array written by [`ElevationFilter`].
pub const ELEVATION_ARRAY_NAME: &str = "Elevation";

/// Maps every point to a scalar by projecting it onto the segment from
/// `low_point` to `high_point`.
///
/// The projection parameter is clamped to `[0, 1]` and mapped linearly onto
/// `scalar_range`. The result is written (replacing any previous array of the
/// same name) to the [`ELEVATION_ARRAY_NAME`] point array.
#[derive(Debug, Clone)]
pub struct ElevationFilter {
    low_point: Vec3,
    high_point: Vec3,
    scalar_range: (f32, f32),
}

impl ElevationFilter {
    pub fn new(low_point: Vec3, high_point: Vec3, scalar_range: (f32, f32)) -> Self {
        Self {
            low_point,
            high_point,
            scalar_range,
        }
    }

    /// Returns the elevation value of a single point.
    pub fn value_at(&self, point: Vec3) -> f32 {
        let axis = self.high_point - self.low_point;
        let mut length2 = axis.length_squared();
        if length2 == 0.0 {
            length2 = 1.0;
        }
        let t = ((point - self.low_point).dot(axis) / length2).clamp(0.0, 1.0);
        let (r0, r1) = self.scalar_range;
        r0 + t * (r1 - r0)
    }

    /// Computes the elevation array for a dataset's points.
    pub fn compute(&self, input: &Dataset) -> DataArray {
        let values = input.points().iter().map(|p| self.value_at(*p)).collect();
        DataArray::scalars(ELEVATION_ARRAY_NAME, values)
    }
}

impl Algorithm for ElevationFilter {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let mut output = input.clone();
        output.add_point_array(self.compute(input))?;
        Ok(output)
    }
}
