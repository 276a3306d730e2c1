//! Axis-aligned bounding boxes.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds {
    /// Creates bounds from two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Computes the tight bounds of a point set.
    ///
    /// Returns `None` for an empty point set.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Returns the bounds as `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }

    /// Returns the geometric center.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns `(min, max)` along one axis (0 = x, 1 = y, 2 = z).
    pub fn axis_range(&self, axis: usize) -> (f32, f32) {
        (self.min[axis], self.max[axis])
    }

    /// Returns whether a point lies inside the box, boundary included.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the 8 corners.
    ///
    /// Corners 0-3 lie on the `zmin` face and 4-7 on the `zmax` face, both
    /// counter-clockwise seen from +z, so the ordering matches a hexahedron cell.
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ]
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x0, x1, y0, y1, z0, z1] = self.to_array();
        write!(f, "[{x0}, {x1}, {y0}, {y1}, {z0}, {z1}]")
    }
}
