//! Iso-contouring of point scalars.
//!
//! Volumetric cells are contoured with marching tetrahedra, surface cells with
//! marching triangles and line cells by locating their crossing point. A point
//! whose value equals the level counts as above it, so a cell face lying
//! exactly on the level is produced once, by the cell below it.

use glam::{Mat3, Vec3};

use super::builder::{has_duplicates, OutputBuilder, PointRef};
use super::Algorithm;
use crate::attributes::DataArray;
use crate::cell::Cell;
use crate::dataset::Dataset;
use crate::error::{FilterError, Result};

/// Name of the per-point normal array produced with `compute_normals`.
pub const NORMALS_ARRAY_NAME: &str = "Normals";
/// Name of the per-point gradient array produced with `compute_gradients`.
pub const GRADIENTS_ARRAY_NAME: &str = "Gradients";

/// Extracts the iso-surfaces (or iso-lines) of a point array at given levels.
#[derive(Debug, Clone)]
pub struct ContourFilter {
    array: String,
    values: Vec<f32>,
    compute_normals: bool,
    compute_gradients: bool,
    compute_scalars: bool,
}

impl ContourFilter {
    pub fn new(array: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            array: array.into(),
            values,
            compute_normals: false,
            compute_gradients: false,
            compute_scalars: true,
        }
    }

    /// Adds a normalized, face-averaged [`NORMALS_ARRAY_NAME`] point array.
    #[must_use]
    pub fn compute_normals(mut self, compute_normals: bool) -> Self {
        self.compute_normals = compute_normals;
        self
    }

    /// Adds an averaged [`GRADIENTS_ARRAY_NAME`] point array.
    #[must_use]
    pub fn compute_gradients(mut self, compute_gradients: bool) -> Self {
        self.compute_gradients = compute_gradients;
        self
    }

    /// Keeps the contoured array on the output and makes it active.
    #[must_use]
    pub fn compute_scalars(mut self, compute_scalars: bool) -> Self {
        self.compute_scalars = compute_scalars;
        self
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

impl Algorithm for ContourFilter {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let array = input.point_data().get(&self.array).ok_or_else(|| {
            FilterError::MissingData(format!("no point array named '{}' to contour", self.array))
        })?;
        let scalars: Vec<f32> = (0..array.len()).map(|i| array.scalar(i)).collect();

        let mut marcher = Marcher::new(input);
        for (level_index, &level) in self.values.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let tag = level_index as u32;
            let d: Vec<f32> = scalars.iter().map(|s| s - level).collect();
            for (cell_id, cell) in input.cells().iter().enumerate() {
                match cell.dimension() {
                    3 => {
                        for tet in cell.tetrahedra() {
                            marcher.tetrahedron(tet, &d, tag, cell_id);
                        }
                    }
                    2 => {
                        for tri in cell.triangles() {
                            marcher.triangle(tri, &d, tag, cell_id);
                        }
                    }
                    1 => marcher.line([cell.points()[0], cell.points()[1]], &d, tag, cell_id),
                    _ => {}
                }
            }
        }

        let Marcher {
            builder,
            mut normals,
            mut gradients,
            mut counts,
        } = marcher;
        let mut output = builder.finish();
        let n_points = output.n_points();

        if self.compute_scalars {
            output.point_data_mut().set_active_scalars(&self.array)?;
            output.cell_data_mut().clear_active_scalars();
        } else {
            output.point_data_mut().remove(&self.array);
        }

        if self.compute_normals {
            normals.resize(n_points, Vec3::ZERO);
            let normals: Vec<[f32; 3]> = normals
                .iter()
                .map(|n| {
                    let len = n.length();
                    if len > 1e-10 {
                        (*n / len).to_array()
                    } else {
                        [0.0; 3]
                    }
                })
                .collect();
            output.add_point_array(DataArray::from_vec3(NORMALS_ARRAY_NAME, &normals))?;
        }

        if self.compute_gradients {
            gradients.resize(n_points, Vec3::ZERO);
            counts.resize(n_points, 0);
            let gradients: Vec<[f32; 3]> = gradients
                .iter()
                .zip(&counts)
                .map(|(g, &count)| {
                    if count == 0 {
                        [0.0; 3]
                    } else {
                        #[allow(clippy::cast_precision_loss)]
                        let avg = *g / count as f32;
                        avg.to_array()
                    }
                })
                .collect();
            output.add_point_array(DataArray::from_vec3(GRADIENTS_ARRAY_NAME, &gradients))?;
        }

        log::debug!(
            "contour of '{}' at {} level(s): {} points, {} cells",
            self.array,
            self.values.len(),
            output.n_points(),
            output.n_cells()
        );
        Ok(output)
    }
}

/// Output under construction plus per-point normal and gradient sums.
struct Marcher<'a> {
    builder: OutputBuilder<'a>,
    normals: Vec<Vec3>,
    gradients: Vec<Vec3>,
    counts: Vec<u32>,
}

impl<'a> Marcher<'a> {
    fn new(input: &'a Dataset) -> Self {
        Self {
            builder: OutputBuilder::new(input),
            normals: Vec::new(),
            gradients: Vec::new(),
            counts: Vec::new(),
        }
    }

    fn points(&self) -> &'a [Vec3] {
        self.builder.input().points()
    }

    fn tetrahedron(&mut self, tet: [u32; 4], d: &[f32], tag: u32, source: usize) {
        let values = tet.map(|p| d[p as usize]);
        if values.iter().any(|v| v.is_nan()) {
            return;
        }
        let (above, below): (Vec<u32>, Vec<u32>) =
            tet.iter().copied().partition(|&p| d[p as usize] >= 0.0);
        let cut = |a: u32, b: u32| PointRef::crossing(a, b, d[a as usize], d[b as usize], tag);

        let corners = tet.map(|p| self.points()[p as usize]);
        let gradient = solve_gradient(
            [
                corners[1] - corners[0],
                corners[2] - corners[0],
                corners[3] - corners[0],
            ],
            Vec3::new(values[1] - values[0], values[2] - values[0], values[3] - values[0]),
        );

        match above.len() {
            1 | 3 => {
                let (lone, others) = if above.len() == 1 {
                    (above[0], &below)
                } else {
                    (below[0], &above)
                };
                let tri = [cut(lone, others[0]), cut(lone, others[1]), cut(lone, others[2])];
                self.emit_triangle(tri, gradient, source);
            }
            2 => {
                let (a0, a1) = (above[0], above[1]);
                let (b0, b1) = (below[0], below[1]);
                let quad = [cut(a0, b0), cut(a1, b0), cut(a1, b1), cut(a0, b1)];
                self.emit_triangle([quad[0], quad[1], quad[2]], gradient, source);
                self.emit_triangle([quad[0], quad[2], quad[3]], gradient, source);
            }
            _ => {}
        }
    }

    fn triangle(&mut self, tri: [u32; 3], d: &[f32], tag: u32, source: usize) {
        let values = tri.map(|p| d[p as usize]);
        if values.iter().any(|v| v.is_nan()) {
            return;
        }
        let (above, below): (Vec<u32>, Vec<u32>) =
            tri.iter().copied().partition(|&p| d[p as usize] >= 0.0);
        let cut = |a: u32, b: u32| PointRef::crossing(a, b, d[a as usize], d[b as usize], tag);

        let segment = match (above.len(), below.len()) {
            (1, 2) => [cut(above[0], below[0]), cut(above[0], below[1])],
            (2, 1) => [cut(above[0], below[0]), cut(above[1], below[0])],
            _ => return,
        };
        if has_duplicates(&segment) {
            return;
        }

        let corners = tri.map(|p| self.points()[p as usize]);
        let (e1, e2) = (corners[1] - corners[0], corners[2] - corners[0]);
        let gradient = solve_gradient(
            [e1, e2, e1.cross(e2)],
            Vec3::new(values[1] - values[0], values[2] - values[0], 0.0),
        );

        let ids = segment.map(|r| self.builder.insert(r));
        self.accumulate(&ids, None, gradient);
        self.builder.push_cell(Cell::line(ids[0], ids[1]), source);
    }

    fn line(&mut self, line: [u32; 2], d: &[f32], tag: u32, source: usize) {
        let [a, b] = line;
        let (da, db) = (d[a as usize], d[b as usize]);
        if da.is_nan() || db.is_nan() || (da >= 0.0) == (db >= 0.0) {
            return;
        }

        let edge = self.points()[b as usize] - self.points()[a as usize];
        let len2 = edge.length_squared();
        let gradient = (len2 > 0.0).then(|| edge * ((db - da) / len2));

        let id = self.builder.insert(PointRef::crossing(a, b, da, db, tag));
        self.accumulate(&[id], None, gradient);
        self.builder.push_cell(Cell::vertex(id), source);
    }

    /// Emits a triangle facing along `gradient` when one is known.
    fn emit_triangle(&mut self, mut refs: [PointRef; 3], gradient: Option<Vec3>, source: usize) {
        if has_duplicates(&refs) {
            return;
        }
        let p = refs.map(|r| r.position(self.points()));
        let mut normal = (p[1] - p[0]).cross(p[2] - p[0]);
        if gradient.is_some_and(|g| normal.dot(g) < 0.0) {
            refs.swap(1, 2);
            normal = -normal;
        }

        let ids = refs.map(|r| self.builder.insert(r));
        self.accumulate(&ids, Some(normal), gradient);
        self.builder.push_cell(Cell::triangle(ids), source);
    }

    fn accumulate(&mut self, ids: &[u32], normal: Option<Vec3>, gradient: Option<Vec3>) {
        let n_points = self.builder.points().len();
        self.normals.resize(n_points, Vec3::ZERO);
        self.gradients.resize(n_points, Vec3::ZERO);
        self.counts.resize(n_points, 0);
        for &id in ids {
            let id = id as usize;
            if let Some(normal) = normal {
                self.normals[id] += normal;
            }
            if let Some(gradient) = gradient {
                self.gradients[id] += gradient;
                self.counts[id] += 1;
            }
        }
    }
}

/// Solves `edges[i] · g = deltas[i]` for the gradient `g` of a linear field.
///
/// Returns `None` for degenerate (flat or collapsed) simplices.
fn solve_gradient(edges: [Vec3; 3], deltas: Vec3) -> Option<Vec3> {
    let m = Mat3::from_cols(edges[0], edges[1], edges[2]).transpose();
    let scale = edges[0].length() * edges[1].length() * edges[2].length();
    let det = m.determinant();
    if !det.is_finite() || det.abs() <= 1e-6 * scale {
        return None;
    }
    Some(m.inverse() * deltas)
}
