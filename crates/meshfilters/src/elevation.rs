//! Elevation scalars.

use glam::Vec3;
use meshfilters_core::{
    Algorithm, Association, Dataset, ElevationFilter, FilterError, Result, ELEVATION_ARRAY_NAME,
};
use serde::{Deserialize, Serialize};

use crate::output::{wrap_output, wrap_output_with_active};
use crate::settings::Settings;

/// The scalar range elevation values are mapped onto.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ScalarRange {
    /// The heights of the low and high points.
    #[default]
    Auto,
    /// The data range of a named array.
    Array(String),
    /// An explicit `(min, max)`.
    Explicit(f32, f32),
}

impl From<(f32, f32)> for ScalarRange {
    fn from((min, max): (f32, f32)) -> Self {
        Self::Explicit(min, max)
    }
}

impl TryFrom<&[f32]> for ScalarRange {
    type Error = FilterError;

    fn try_from(values: &[f32]) -> Result<Self> {
        match values {
            [min, max] => Ok(Self::Explicit(*min, *max)),
            _ => Err(FilterError::InvalidArgument(format!(
                "a scalar range needs exactly 2 values, got {}",
                values.len()
            ))),
        }
    }
}

/// Options for [`elevation`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationOptions {
    /// Start of the elevation line; the bottom-center of the bounds when `None`.
    pub low_point: Option<Vec3>,
    /// End of the elevation line; the top-center of the bounds when `None`.
    pub high_point: Option<Vec3>,
    pub scalar_range: ScalarRange,
    /// Association searched first for [`ScalarRange::Array`].
    pub preference: Association,
    /// Make the elevation array the active scalars.
    pub set_active: bool,
}

impl ElevationOptions {
    pub fn from_settings(_settings: &Settings) -> Self {
        Self {
            low_point: None,
            high_point: None,
            scalar_range: ScalarRange::Auto,
            preference: Association::Point,
            set_active: true,
        }
    }
}

impl Default for ElevationOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Adds an `Elevation` point array: each point's position along the line from
/// the low to the high point, mapped onto the scalar range.
pub fn elevation(dataset: &Dataset, options: &ElevationOptions) -> Result<Dataset> {
    let bounds = dataset.bounds();
    let center = bounds.center();
    let low = options
        .low_point
        .unwrap_or(Vec3::new(center.x, center.y, bounds.min.z));
    let high = options
        .high_point
        .unwrap_or(Vec3::new(center.x, center.y, bounds.max.z));
    let range = match &options.scalar_range {
        ScalarRange::Auto => (low.z, high.z),
        ScalarRange::Array(name) => dataset.data_range(name, options.preference)?,
        ScalarRange::Explicit(min, max) => (*min, *max),
    };
    log::debug!("elevation: {low} -> {high}, range {range:?}");

    let output = ElevationFilter::new(low, high, range).execute(dataset)?;
    if options.set_active {
        wrap_output_with_active(dataset, output, ELEVATION_ARRAY_NAME, Association::Point)
    } else {
        Ok(wrap_output(dataset, output))
    }
}
