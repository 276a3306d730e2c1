//! Wireframe extraction.

use std::collections::HashSet;

use super::Algorithm;
use crate::cell::Cell;
use crate::dataset::Dataset;
use crate::error::Result;

/// Turns every unique cell edge into a line cell.
///
/// Edges shared between cells are emitted once and carry the cell data of the
/// first cell that uses them. Points and point data are kept as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractEdges;

impl Algorithm for ExtractEdges {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let mut seen: HashSet<(u32, u32)> = HashSet::new();
        let mut cells = Vec::new();
        let mut cell_data = input.cell_data().empty_like();

        for (cell_id, cell) in input.cells().iter().enumerate() {
            for [a, b] in cell.edges() {
                if a == b || !seen.insert((a.min(b), a.max(b))) {
                    continue;
                }
                cells.push(Cell::line(a, b));
                cell_data.push_from(input.cell_data(), cell_id);
            }
        }

        Ok(Dataset::from_parts(
            input.points().to_vec(),
            cells,
            input.point_data().clone(),
            cell_data,
        ))
    }
}
