//! Clipping by a plane.

use glam::Vec3;
use meshfilters_core::{Algorithm, ClipDataSet, Dataset, Result};

use crate::output::wrap_output;
use crate::resolve::{build_plane, Normal};
use crate::settings::Settings;

/// Options for [`clip`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClipOptions {
    /// Plane normal.
    pub normal: Normal,
    /// Point on the plane; the dataset center when `None`.
    pub origin: Option<Vec3>,
    /// Keep the side the normal points away from.
    pub invert: bool,
}

impl ClipOptions {
    pub fn from_settings(_settings: &Settings) -> Self {
        Self {
            normal: Normal::X,
            origin: None,
            invert: true,
        }
    }
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Clips a dataset with a plane.
///
/// With `invert` (the default) the part on the negative side of the normal is
/// kept; otherwise the positive side. The origin is not required to lie inside
/// the dataset.
pub fn clip(dataset: &Dataset, options: &ClipOptions) -> Result<Dataset> {
    let plane = build_plane(dataset, options.normal, options.origin)?;
    log::debug!(
        "clip: origin {}, normal {}, invert {}",
        plane.origin(),
        plane.normal(),
        options.invert
    );

    let output = ClipDataSet::new(plane)
        .inside_out(options.invert)
        .execute(dataset)?;
    if output.n_cells() == 0 && dataset.n_cells() > 0 {
        log::warn!("clip removed every cell");
    }
    Ok(wrap_output(dataset, output))
}
