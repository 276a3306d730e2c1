//! Half-space clipping of datasets by a plane.

use super::builder::{has_duplicates, OutputBuilder, PointRef};
use super::Algorithm;
use crate::cell::Cell;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::plane::Plane;

/// Keeps the part of a dataset on one side of a plane.
///
/// By default the side the normal points to (signed distance >= 0) is kept;
/// with [`inside_out`](Self::inside_out) the opposite side is kept instead.
/// Cells entirely on the kept side are copied whole. Straddling cells are cut:
/// 3D cells become tetrahedra, 2D cells triangles and lines shorter lines.
#[derive(Debug, Clone)]
pub struct ClipDataSet {
    plane: Plane,
    inside_out: bool,
}

impl ClipDataSet {
    pub fn new(plane: Plane) -> Self {
        Self {
            plane,
            inside_out: false,
        }
    }

    /// Keeps the negative side of the plane instead of the positive one.
    #[must_use]
    pub fn inside_out(mut self, inside_out: bool) -> Self {
        self.inside_out = inside_out;
        self
    }
}

impl Algorithm for ClipDataSet {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let sign = if self.inside_out { -1.0 } else { 1.0 };
        let values: Vec<f32> = input
            .points()
            .iter()
            .map(|p| sign * self.plane.signed_distance(*p))
            .collect();
        Ok(clip_by_values(input, &values))
    }
}

/// Keeps the region where the per-point `values` are >= 0.
pub(crate) fn clip_by_values(input: &Dataset, values: &[f32]) -> Dataset {
    let kept = |p: u32| values[p as usize] >= 0.0;
    let mut builder = OutputBuilder::new(input);

    for (cell_id, cell) in input.cells().iter().enumerate() {
        let n_kept = cell.points().iter().filter(|&&p| kept(p)).count();
        if n_kept == 0 {
            continue;
        }
        if n_kept == cell.points().len() {
            let ids = cell
                .points()
                .iter()
                .map(|&p| builder.insert(PointRef::Vertex(p)))
                .collect();
            builder.push_cell(Cell::from_raw(cell.kind(), ids), cell_id);
            continue;
        }

        match cell.dimension() {
            3 => {
                for tet in cell.tetrahedra() {
                    clip_tet(&mut builder, tet, values, cell_id);
                }
            }
            2 => {
                for tri in cell.triangles() {
                    clip_triangle(&mut builder, tri, values, cell_id);
                }
            }
            1 => clip_line(&mut builder, cell.points(), values, cell_id),
            _ => {}
        }
    }

    builder.finish()
}

fn crossing(values: &[f32], a: u32, b: u32) -> PointRef {
    PointRef::crossing(a, b, values[a as usize], values[b as usize], 0)
}

fn clip_tet(builder: &mut OutputBuilder<'_>, tet: [u32; 4], values: &[f32], source: usize) {
    let (inside, outside): (Vec<u32>, Vec<u32>) =
        tet.iter().copied().partition(|&p| values[p as usize] >= 0.0);
    let cut = |a: u32, b: u32| crossing(values, a, b);

    match inside.len() {
        4 => emit_tet(builder, tet.map(PointRef::Vertex), source),
        3 => {
            let o = outside[0];
            let bottom = [inside[0], inside[1], inside[2]].map(PointRef::Vertex);
            let top = [cut(inside[0], o), cut(inside[1], o), cut(inside[2], o)];
            emit_wedge(builder, bottom, top, source);
        }
        2 => {
            let (a, b) = (inside[0], inside[1]);
            let (c, d) = (outside[0], outside[1]);
            let bottom = [PointRef::Vertex(a), cut(a, c), cut(a, d)];
            let top = [PointRef::Vertex(b), cut(b, c), cut(b, d)];
            emit_wedge(builder, bottom, top, source);
        }
        1 => {
            let i = inside[0];
            let refs = [
                PointRef::Vertex(i),
                cut(i, outside[0]),
                cut(i, outside[1]),
                cut(i, outside[2]),
            ];
            emit_tet(builder, refs, source);
        }
        _ => {}
    }
}

/// Splits the wedge `bottom`/`top` (with `top[i]` opposite `bottom[i]`) into three tetrahedra.
fn emit_wedge(
    builder: &mut OutputBuilder<'_>,
    bottom: [PointRef; 3],
    top: [PointRef; 3],
    source: usize,
) {
    let [p0, p1, p2] = bottom;
    let [q0, q1, q2] = top;
    emit_tet(builder, [p0, p1, p2, q0], source);
    emit_tet(builder, [p1, p2, q0, q1], source);
    emit_tet(builder, [p2, q0, q1, q2], source);
}

fn emit_tet(builder: &mut OutputBuilder<'_>, refs: [PointRef; 4], source: usize) {
    if has_duplicates(&refs) {
        return;
    }
    let ids = refs.map(|r| builder.insert(r));
    builder.push_cell(Cell::tetra(ids), source);
}

fn clip_triangle(builder: &mut OutputBuilder<'_>, tri: [u32; 3], values: &[f32], source: usize) {
    let inside = |p: u32| values[p as usize] >= 0.0;
    let n_inside = tri.iter().filter(|&&p| inside(p)).count();
    let cut = |a: u32, b: u32| crossing(values, a, b);

    match n_inside {
        0 => return,
        3 => return emit_triangle(builder, tri.map(PointRef::Vertex), source),
        _ => {}
    }

    // Rotate so the lone vertex (inside or outside) comes first, keeping the winding.
    let lone_inside = n_inside == 1;
    let Some(start) = (0..3).find(|&i| inside(tri[i]) == lone_inside) else {
        return;
    };
    let [i, j, k] = [tri[start], tri[(start + 1) % 3], tri[(start + 2) % 3]];

    match n_inside {
        1 => emit_triangle(builder, [PointRef::Vertex(i), cut(i, j), cut(i, k)], source),
        2 => {
            // `i` is outside, `j` and `k` inside.
            let (kept_j, kept_k) = (PointRef::Vertex(j), PointRef::Vertex(k));
            emit_triangle(builder, [kept_j, kept_k, cut(k, i)], source);
            emit_triangle(builder, [kept_j, cut(k, i), cut(j, i)], source);
        }
        _ => {}
    }
}

fn emit_triangle(builder: &mut OutputBuilder<'_>, refs: [PointRef; 3], source: usize) {
    if has_duplicates(&refs) {
        return;
    }
    let ids = refs.map(|r| builder.insert(r));
    builder.push_cell(Cell::triangle(ids), source);
}

fn clip_line(builder: &mut OutputBuilder<'_>, points: &[u32], values: &[f32], source: usize) {
    let (a, b) = (points[0], points[1]);
    let refs = if values[a as usize] >= 0.0 {
        [PointRef::Vertex(a), crossing(values, a, b)]
    } else {
        [crossing(values, a, b), PointRef::Vertex(b)]
    };
    if has_duplicates(&refs) {
        return;
    }
    let [p, q] = refs.map(|r| builder.insert(r));
    builder.push_cell(Cell::line(p, q), source);
}
