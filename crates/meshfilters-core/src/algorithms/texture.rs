//! Planar texture-coordinate generation.

use glam::Vec3;

use super::Algorithm;
use crate::attributes::DataArray;
use crate::dataset::Dataset;
use crate::error::{FilterError, Result};

/// Default name of generated texture coordinates.
pub const DEFAULT_TCOORDS_NAME: &str = "Texture Coordinates";

/// Generates `(u, v)` texture coordinates by projecting points onto a plane.
///
/// The plane is spanned by `origin -> point1` (the `u` axis) and
/// `origin -> point2` (the `v` axis); `point1` maps to `u = 1` and `point2`
/// to `v = 1`.
#[derive(Debug, Clone)]
pub struct TextureMapToPlane {
    origin: Vec3,
    point1: Vec3,
    point2: Vec3,
    name: String,
}

impl TextureMapToPlane {
    pub fn new(origin: Vec3, point1: Vec3, point2: Vec3) -> Self {
        Self {
            origin,
            point1,
            point2,
            name: DEFAULT_TCOORDS_NAME.to_string(),
        }
    }

    /// Sets the name of the produced array.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Computes the two-component coordinate array for a dataset's points.
    pub fn compute(&self, input: &Dataset) -> Result<DataArray> {
        let u_axis = self.point1 - self.origin;
        let v_axis = self.point2 - self.origin;
        let (u_len2, v_len2) = (u_axis.length_squared(), v_axis.length_squared());
        if u_len2 == 0.0 || v_len2 == 0.0 || u_axis.cross(v_axis).length_squared() == 0.0 {
            return Err(FilterError::InvalidArgument(format!(
                "texture plane axes {u_axis} and {v_axis} do not span a plane"
            )));
        }

        let coords: Vec<[f32; 2]> = input
            .points()
            .iter()
            .map(|p| {
                let d = *p - self.origin;
                [d.dot(u_axis) / u_len2, d.dot(v_axis) / v_len2]
            })
            .collect();
        Ok(DataArray::from_vec2(&self.name, &coords))
    }
}

impl Algorithm for TextureMapToPlane {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let coords = self.compute(input)?;
        let mut output = input.clone();
        output.point_data_mut().install_tcoords(coords);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use glam::UVec3;

    use super::*;

    fn plate() -> Dataset {
        Dataset::uniform_grid(UVec3::new(3, 3, 2), Vec3::ZERO, Vec3::new(1.0, 2.0, 1.0)).unwrap()
    }

    #[test]
    fn test_unit_square_mapping() {
        let ds = plate();
        let filter = TextureMapToPlane::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 0.0));
        let out = filter.execute(&ds).unwrap();

        let tcoords = out.point_data().tcoords().unwrap();
        assert_eq!(tcoords.name(), DEFAULT_TCOORDS_NAME);
        assert_eq!(tcoords.num_components(), 2);
        for (i, p) in out.points().iter().enumerate() {
            let uv = tcoords.tuple(i);
            assert!((uv[0] - p.x / 2.0).abs() < 1e-6);
            assert!((uv[1] - p.y / 4.0).abs() < 1e-6);
        }
        assert_eq!(out.n_cells(), ds.n_cells());
    }

    #[test]
    fn test_previous_tcoords_kept() {
        let mut ds = plate();
        ds.point_data_mut()
            .install_tcoords(DataArray::from_vec2("old", &vec![[0.0, 0.0]; 18]));
        let out = TextureMapToPlane::new(Vec3::ZERO, Vec3::X, Vec3::Y)
            .name("uv")
            .execute(&ds)
            .unwrap();
        assert_eq!(out.point_data().tcoords_name(), Some("uv"));
        assert!(out.point_data().contains("old"));
    }

    #[test]
    fn test_degenerate_axes() {
        let ds = plate();
        let same = TextureMapToPlane::new(Vec3::ZERO, Vec3::ZERO, Vec3::Y);
        assert!(matches!(same.compute(&ds), Err(FilterError::InvalidArgument(_))));
        let parallel = TextureMapToPlane::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert!(matches!(parallel.compute(&ds), Err(FilterError::InvalidArgument(_))));
    }
}
