//! Bounding-box outlines.

use glam::Vec3;

use super::Algorithm;
use crate::cell::Cell;
use crate::dataset::Dataset;
use crate::error::Result;

/// Produces the 12 edges of a dataset's bounding box, optionally with its 6 faces.
#[derive(Debug, Clone, Default)]
pub struct OutlineFilter {
    generate_faces: bool,
}

impl OutlineFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also emits the six box faces as quads.
    #[must_use]
    pub fn generate_faces(mut self, generate_faces: bool) -> Self {
        self.generate_faces = generate_faces;
        self
    }
}

impl Algorithm for OutlineFilter {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let corners = input.bounds().corners().to_vec();
        let hex = Cell::hexahedron([0, 1, 2, 3, 4, 5, 6, 7]);

        let mut cells: Vec<Cell> = hex.edges().into_iter().map(|[a, b]| Cell::line(a, b)).collect();
        if self.generate_faces {
            cells.extend(hex.faces().into_iter().map(Cell::from_ring));
        }
        Dataset::new(corners, cells)
    }
}

/// Produces only the corners of a bounding box: three short segments per
/// corner, each running inward along one axis.
#[derive(Debug, Clone)]
pub struct OutlineCornerFilter {
    corner_factor: f32,
}

impl OutlineCornerFilter {
    /// Segment length as a fraction of the box extent, clamped to `[0.001, 0.5]`.
    pub fn new(corner_factor: f32) -> Self {
        Self {
            corner_factor: corner_factor.clamp(0.001, 0.5),
        }
    }

    pub fn corner_factor(&self) -> f32 {
        self.corner_factor
    }
}

impl Default for OutlineCornerFilter {
    fn default() -> Self {
        Self::new(0.2)
    }
}

impl Algorithm for OutlineCornerFilter {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let bounds = input.bounds();
        let step = bounds.extent() * self.corner_factor;
        let center = bounds.center();

        let mut points = Vec::with_capacity(32);
        let mut cells = Vec::with_capacity(24);
        for corner in bounds.corners() {
            // Unit direction from the corner towards the box interior, per axis.
            let inward = Vec3::select(corner.cmple(center), Vec3::ONE, Vec3::NEG_ONE);
            #[allow(clippy::cast_possible_truncation)]
            let base = points.len() as u32;
            points.push(corner);
            for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                points.push(corner + axis * inward * step);
            }
            for i in 1..=3 {
                cells.push(Cell::line(base, base + i));
            }
        }
        Dataset::new(points, cells)
    }
}
