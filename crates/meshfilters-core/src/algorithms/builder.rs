//! Output assembly shared by the algorithms.
//!
//! Algorithms describe output points as [`PointRef`]s into the input: either an
//! input point, or a location on an input edge where some field crosses zero.
//! [`OutputBuilder`] turns those references into deduplicated output points,
//! interpolating point data as it goes, and collects output cells together with
//! the cell data of the input cell they came from.

use std::collections::HashMap;

use glam::Vec3;

use crate::attributes::AttributeData;
use crate::cell::Cell;
use crate::dataset::Dataset;

/// A reference to a point of the output, expressed in input terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PointRef {
    /// An input point, copied as-is.
    Vertex(u32),
    /// The zero crossing on edge `(a, b)`, at `lerp(a, b, t)`.
    ///
    /// `tag` separates crossings of different fields on the same edge
    /// (for instance different contour levels).
    Edge { a: u32, b: u32, t: f32, tag: u32 },
}

impl PointRef {
    /// Builds the reference for the zero crossing between `a` and `b`, given
    /// the field values `va` and `vb` at the endpoints.
    ///
    /// The edge is stored with its endpoints ordered so that both cells sharing
    /// it compute bit-identical parameters. Crossings at an endpoint collapse
    /// to that endpoint.
    pub(crate) fn crossing(a: u32, b: u32, va: f32, vb: f32, tag: u32) -> Self {
        let (a, b, va, vb) = if a <= b { (a, b, va, vb) } else { (b, a, vb, va) };
        let t = va / (va - vb);
        if t.is_nan() || t <= 0.0 {
            Self::Vertex(a)
        } else if t >= 1.0 {
            Self::Vertex(b)
        } else {
            Self::Edge { a, b, t, tag }
        }
    }

    /// Returns the position of the referenced point.
    pub(crate) fn position(&self, points: &[Vec3]) -> Vec3 {
        match *self {
            Self::Vertex(p) => points[p as usize],
            Self::Edge { a, b, t, .. } => points[a as usize].lerp(points[b as usize], t),
        }
    }

    fn key(&self) -> (u32, u32, u32) {
        match *self {
            Self::Vertex(p) => (p, u32::MAX, u32::MAX),
            Self::Edge { a, b, tag, .. } => (a, b, tag),
        }
    }
}

/// Removes duplicate references, keeping first occurrences in order.
pub(crate) fn dedup_refs(refs: &mut Vec<PointRef>) {
    let mut seen = Vec::with_capacity(refs.len());
    refs.retain(|r| {
        let key = r.key();
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
}

/// Returns whether two references in the slice denote the same point.
pub(crate) fn has_duplicates(refs: &[PointRef]) -> bool {
    refs.iter()
        .enumerate()
        .any(|(i, a)| refs[i + 1..].iter().any(|b| a.key() == b.key()))
}

/// Accumulates output points, cells and attributes for one input dataset.
pub(crate) struct OutputBuilder<'a> {
    input: &'a Dataset,
    points: Vec<Vec3>,
    point_data: AttributeData,
    cells: Vec<Cell>,
    cell_data: AttributeData,
    index: HashMap<(u32, u32, u32), u32>,
}

impl<'a> OutputBuilder<'a> {
    pub(crate) fn new(input: &'a Dataset) -> Self {
        Self {
            input,
            points: Vec::new(),
            point_data: input.point_data().empty_like(),
            cells: Vec::new(),
            cell_data: input.cell_data().empty_like(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn input(&self) -> &'a Dataset {
        self.input
    }

    /// Returns the output id of a referenced point, creating it on first use.
    pub(crate) fn insert(&mut self, point: PointRef) -> u32 {
        if let Some(&id) = self.index.get(&point.key()) {
            return id;
        }
        #[allow(clippy::cast_possible_truncation)]
        let id = self.points.len() as u32;
        self.points.push(point.position(self.input.points()));
        match point {
            PointRef::Vertex(p) => self.point_data.push_from(self.input.point_data(), p as usize),
            PointRef::Edge { a, b, t, .. } => {
                self.point_data
                    .push_lerp(self.input.point_data(), a as usize, b as usize, t);
            }
        }
        self.index.insert(point.key(), id);
        id
    }

    /// Inserts every reference, returning the output ids.
    pub(crate) fn insert_all(&mut self, points: &[PointRef]) -> Vec<u32> {
        points.iter().map(|p| self.insert(*p)).collect()
    }

    /// Adds an output cell that inherits the cell data of input cell `source`.
    pub(crate) fn push_cell(&mut self, cell: Cell, source: usize) {
        self.cells.push(cell);
        self.cell_data.push_from(self.input.cell_data(), source);
    }

    /// Returns the output point positions created so far.
    pub(crate) fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub(crate) fn finish(self) -> Dataset {
        Dataset::from_parts(self.points, self.cells, self.point_data, self.cell_data)
    }
}

/// Extracts a subset of cells, keeping only the points they use.
pub(crate) fn extract_cells(input: &Dataset, cell_ids: impl IntoIterator<Item = usize>) -> Dataset {
    let mut builder = OutputBuilder::new(input);
    for cell_id in cell_ids {
        let cell = &input.cells()[cell_id];
        let ids = cell
            .points()
            .iter()
            .map(|&p| builder.insert(PointRef::Vertex(p)))
            .collect();
        builder.push_cell(Cell::from_raw(cell.kind(), ids), cell_id);
    }
    builder.finish()
}
