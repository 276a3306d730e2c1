//! Plane cuts: the exact intersection of a dataset with a plane.
//!
//! Every cell is intersected independently. Intersection points sit on cell
//! edges where the signed distance changes sign, or on cell points lying in
//! the plane. For the convex cells supported here the points of a 3D cell
//! form a convex polygon, which is ordered counter-clockwise around the plane
//! normal before being emitted.

use glam::Vec3;

use super::builder::{dedup_refs, OutputBuilder, PointRef};
use super::geometry::{canonical_face_key, compute_face_counts, facets};
use super::Algorithm;
use crate::cell::Cell;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::plane::Plane;

/// Cuts a dataset with a plane, producing geometry one dimension lower.
///
/// 3D cells yield polygons (or triangle fans), 2D cells line segments and
/// 1D cells vertices. A face lying in the plane is emitted once: by the cell
/// on the positive side, or by the cell on the negative side when the face is
/// on the dataset boundary.
#[derive(Debug, Clone)]
pub struct Cutter {
    plane: Plane,
    generate_triangles: bool,
}

impl Cutter {
    pub fn new(plane: Plane) -> Self {
        Self {
            plane,
            generate_triangles: true,
        }
    }

    /// Whether polygons are split into triangles (the default) or kept whole.
    #[must_use]
    pub fn generate_triangles(mut self, generate_triangles: bool) -> Self {
        self.generate_triangles = generate_triangles;
        self
    }
}

impl Algorithm for Cutter {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let distances: Vec<f32> = input
            .points()
            .iter()
            .map(|p| self.plane.signed_distance(*p))
            .collect();
        let d = |p: u32| distances[p as usize];
        let face_counts = distances
            .contains(&0.0)
            .then(|| compute_face_counts(input));
        let mut builder = OutputBuilder::new(input);

        for (cell_id, cell) in input.cells().iter().enumerate() {
            if cell.points().iter().any(|&p| d(p) > 0.0) {
                let mut refs: Vec<PointRef> = cell
                    .points()
                    .iter()
                    .filter(|&&p| d(p) == 0.0)
                    .map(|&p| PointRef::Vertex(p))
                    .collect();
                for [a, b] in cell.edges() {
                    let (da, db) = (d(a), d(b));
                    if (da < 0.0 && db > 0.0) || (da > 0.0 && db < 0.0) {
                        refs.push(PointRef::crossing(a, b, da, db, 0));
                    }
                }
                dedup_refs(&mut refs);
                self.emit(&mut builder, cell, cell_id, &mut refs);
                continue;
            }

            // A cell on the negative side emits a facet lying in the plane only
            // when no other cell shares it.
            let Some(face_counts) = &face_counts else {
                continue;
            };
            if !cell.points().iter().any(|&p| d(p) < 0.0) {
                continue;
            }
            for face in facets(cell) {
                let in_plane = face.iter().all(|&p| d(p) == 0.0);
                if in_plane && face_counts.get(&canonical_face_key(&face)) == Some(&1) {
                    let mut refs: Vec<PointRef> = face.into_iter().map(PointRef::Vertex).collect();
                    self.emit(&mut builder, cell, cell_id, &mut refs);
                }
            }
        }

        Ok(builder.finish())
    }
}

impl Cutter {
    /// Emits the intersection of `cell` with the plane, given its points.
    fn emit(&self, builder: &mut OutputBuilder<'_>, cell: &Cell, cell_id: usize, refs: &mut [PointRef]) {
        match cell.dimension() {
            3 if refs.len() >= 3 => {
                order_polygon(refs, builder.input().points(), self.plane.normal());
                let ids = builder.insert_all(refs);
                if self.generate_triangles {
                    for i in 1..ids.len() - 1 {
                        builder.push_cell(Cell::triangle([ids[0], ids[i], ids[i + 1]]), cell_id);
                    }
                } else {
                    builder.push_cell(Cell::from_ring(ids), cell_id);
                }
            }
            2 if refs.len() >= 2 => {
                let a = builder.insert(refs[0]);
                let b = builder.insert(refs[1]);
                builder.push_cell(Cell::line(a, b), cell_id);
            }
            1 if !refs.is_empty() => {
                let p = builder.insert(refs[0]);
                builder.push_cell(Cell::vertex(p), cell_id);
            }
            _ => {}
        }
    }
}

/// Orders polygon points counter-clockwise around `normal`, about their centroid.
fn order_polygon(refs: &mut [PointRef], points: &[Vec3], normal: Vec3) {
    let positions: Vec<Vec3> = refs.iter().map(|r| r.position(points)).collect();
    #[allow(clippy::cast_precision_loss)]
    let centroid = positions.iter().copied().sum::<Vec3>() / positions.len() as f32;

    let Some(ref_dir) = (positions[0] - centroid).try_normalize() else {
        return;
    };
    let angle = |v: Vec3| {
        let v = v - centroid;
        ref_dir.cross(v).dot(normal).atan2(ref_dir.dot(v))
    };

    let mut order: Vec<usize> = (0..refs.len()).collect();
    order.sort_by(|&a, &b| angle(positions[a]).total_cmp(&angle(positions[b])));
    let sorted: Vec<PointRef> = order.iter().map(|&i| refs[i]).collect();
    refs.copy_from_slice(&sorted);
}
