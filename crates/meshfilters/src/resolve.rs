//! Normals, axes, origins and scalar arrays given in the short forms filters accept.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use meshfilters_core::{Association, Bounds, DataArray, Dataset, FilterError, Plane, Result};
use serde::{Deserialize, Serialize};

/// A plane normal: one of the six signed coordinate axes or an explicit vector.
///
/// Axis names parse case-insensitively from `"x"`, `"y"`, `"z"`, `"-x"`,
/// `"-y"` and `"-z"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Normal {
    #[default]
    X,
    Y,
    Z,
    NegX,
    NegY,
    NegZ,
    Vector(Vec3),
}

impl Normal {
    /// Returns the normal as a (not necessarily unit) vector.
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
            Self::NegX => Vec3::NEG_X,
            Self::NegY => Vec3::NEG_Y,
            Self::NegZ => Vec3::NEG_Z,
            Self::Vector(v) => v,
        }
    }
}

impl FromStr for Normal {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            "-x" => Ok(Self::NegX),
            "-y" => Ok(Self::NegY),
            "-z" => Ok(Self::NegZ),
            _ => Err(FilterError::InvalidArgument(format!(
                "normal '{s}' not understood, expected one of x, y, z, -x, -y, -z"
            ))),
        }
    }
}

impl From<Vec3> for Normal {
    fn from(v: Vec3) -> Self {
        Self::Vector(v)
    }
}

impl From<[f32; 3]> for Normal {
    fn from(v: [f32; 3]) -> Self {
        Self::Vector(Vec3::from(v))
    }
}

impl From<Axis> for Normal {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::X,
            Axis::Y => Self::Y,
            Axis::Z => Self::Z,
        }
    }
}

/// A coordinate axis, given by name (`"x"`, `"y"`, `"z"`) or index (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    /// Returns the axis index: 0 for x, 1 for y, 2 for z.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl FromStr for Axis {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(FilterError::InvalidArgument(format!(
                "axis '{s}' not understood, expected x, y or z"
            ))),
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = FilterError;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::Z),
            _ => Err(FilterError::InvalidArgument(format!(
                "axis index {index} not understood, expected 0, 1 or 2"
            ))),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
            Self::Z => f.write_str("z"),
        }
    }
}

/// Returns `origin`, or the dataset center when none is given.
pub fn resolve_origin(dataset: &Dataset, origin: Option<Vec3>) -> Vec3 {
    origin.unwrap_or_else(|| dataset.center())
}

/// Fails with [`FilterError::BoundsViolation`] unless `origin` lies within `bounds`.
pub fn check_inside_bounds(origin: Vec3, bounds: Bounds) -> Result<()> {
    if bounds.contains(origin) {
        Ok(())
    } else {
        Err(FilterError::BoundsViolation { origin, bounds })
    }
}

/// Builds the plane through the resolved origin with the resolved normal.
pub fn build_plane(dataset: &Dataset, normal: Normal, origin: Option<Vec3>) -> Result<Plane> {
    Plane::new(resolve_origin(dataset, origin), normal.to_vec3())
}

/// Finds the array a filter should work on.
///
/// An explicit name is looked up in `preference` first, then in the other
/// association. Without a name the active scalars are used.
pub fn resolve_scalars<'a>(
    dataset: &'a Dataset,
    scalars: Option<&str>,
    preference: Association,
) -> Result<(&'a DataArray, Association)> {
    match scalars {
        Some(name) => dataset.get_array(name, preference).ok_or_else(|| {
            FilterError::MissingData(format!("array '{name}' not found on dataset"))
        }),
        None => dataset.active_scalars().ok_or_else(|| {
            FilterError::MissingData("no scalars given and no active scalars set".to_string())
        }),
    }
}
