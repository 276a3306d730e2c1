//! Implicit planes used by the clip and cut algorithms.

use glam::Vec3;

use crate::error::{FilterError, Result};

/// An oriented plane defined by a point (origin) and a unit normal.
///
/// Points on the normal side have positive signed distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Creates a plane, normalizing `normal`.
    ///
    /// Fails with [`FilterError::InvalidArgument`] if the normal has zero length
    /// or is not finite.
    pub fn new(origin: Vec3, normal: Vec3) -> Result<Self> {
        let normal = normal.try_normalize().ok_or_else(|| {
            FilterError::InvalidArgument(format!("plane normal {normal} cannot be normalized"))
        })?;
        Ok(Self { origin, normal })
    }

    /// Returns the origin point of the plane.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the unit normal of the plane.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Returns the signed distance from a point to the plane.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.normal)
    }
}
