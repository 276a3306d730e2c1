//! Planar texture coordinates.

use glam::Vec3;
use meshfilters_core::{Algorithm, Dataset, Result, TextureMapToPlane};

use crate::settings::Settings;

/// Options for [`texture_map_to_plane`].
///
/// `origin`, `point_u` and `point_v` define the plane: `point_u` maps to
/// `(1, 0)` and `point_v` to `(0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureMapOptions {
    pub origin: Vec3,
    pub point_u: Vec3,
    pub point_v: Vec3,
    /// Name of the produced texture-coordinate array.
    pub name: String,
}

impl TextureMapOptions {
    pub fn new(origin: Vec3, point_u: Vec3, point_v: Vec3) -> Self {
        Self::from_settings(origin, point_u, point_v, &Settings::default())
    }

    pub fn from_settings(origin: Vec3, point_u: Vec3, point_v: Vec3, settings: &Settings) -> Self {
        Self {
            origin,
            point_u,
            point_v,
            name: settings.texture_coordinates_name.clone(),
        }
    }

    fn filter(&self) -> TextureMapToPlane {
        TextureMapToPlane::new(self.origin, self.point_u, self.point_v).name(&self.name)
    }
}

/// Returns a copy of `dataset` with planar texture coordinates.
pub fn texture_map_to_plane(dataset: &Dataset, options: &TextureMapOptions) -> Result<Dataset> {
    log::debug!(
        "texture_map_to_plane: origin {}, u {}, v {} as '{}'",
        options.origin,
        options.point_u,
        options.point_v,
        options.name
    );
    options.filter().execute(dataset)
}

/// Installs planar texture coordinates on `dataset` itself.
///
/// A previous texture-coordinate array stays as an ordinary array, unless it
/// has the same name, in which case it is replaced.
pub fn texture_map_to_plane_in_place(dataset: &mut Dataset, options: &TextureMapOptions) -> Result<()> {
    let coords = options.filter().compute(dataset)?;
    dataset.point_data_mut().install_tcoords(coords);
    Ok(())
}
