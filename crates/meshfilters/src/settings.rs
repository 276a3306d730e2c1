//! Default parameters shared by the filters.

use meshfilters_core::{Result, DEFAULT_TCOORDS_NAME};
use serde::{Deserialize, Serialize};

/// Tunable defaults for the filter options.
///
/// Every options struct builds its [`Default`] from `Settings::default()` and
/// can be built from custom settings with `from_settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of slices made by `slice_along_axis`.
    pub slice_count: usize,

    /// Gap kept free at both ends of `slice_along_axis`, as a fraction of the axis extent.
    pub slice_tolerance_fraction: f32,

    /// Length of outline corner segments, as a fraction of the box extent.
    pub corner_factor: f32,

    /// Number of evenly spaced contour levels.
    pub contour_count: usize,

    /// Percentile used by `threshold_percent`.
    pub threshold_percent: f32,

    /// Name given to generated texture coordinates.
    pub texture_coordinates_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slice_count: 5,
            slice_tolerance_fraction: 0.01,
            corner_factor: 0.2,
            contour_count: 10,
            threshold_percent: 0.5,
            texture_coordinates_name: DEFAULT_TCOORDS_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Parses settings from JSON; missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the settings to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
