//! Surface extraction.

use std::collections::HashMap;

use super::Algorithm;
use crate::cell::Cell;
use crate::dataset::Dataset;
use crate::error::Result;

/// Extracts the outer surface of a dataset.
///
/// Vertices, lines and surface cells pass through unchanged. Faces of
/// volumetric cells that belong to exactly one cell form the boundary and are
/// emitted with outward winding, carrying the cell data of their cell. All
/// points and their data are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryFilter;

/// Order-independent identity of a face.
pub(crate) fn canonical_face_key(face: &[u32]) -> Vec<u32> {
    let mut key = face.to_vec();
    key.sort_unstable();
    key
}

/// Returns the boundary pieces of a cell one dimension down: faces of 3D
/// cells, edges of 2D cells and end points of 1D cells.
pub(crate) fn facets(cell: &Cell) -> Vec<Vec<u32>> {
    match cell.dimension() {
        3 => cell.faces(),
        2 => cell.edges().into_iter().map(Vec::from).collect(),
        1 => cell.points().iter().map(|&p| vec![p]).collect(),
        _ => Vec::new(),
    }
}

/// Counts how many cells share each facet.
pub(crate) fn compute_face_counts(input: &Dataset) -> HashMap<Vec<u32>, usize> {
    let mut face_counts: HashMap<Vec<u32>, usize> = HashMap::new();
    for cell in input.cells() {
        for face in facets(cell) {
            *face_counts.entry(canonical_face_key(&face)).or_insert(0) += 1;
        }
    }
    face_counts
}

impl Algorithm for GeometryFilter {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let face_counts = compute_face_counts(input);
        let mut cells = Vec::new();
        let mut cell_data = input.cell_data().empty_like();

        for (cell_id, cell) in input.cells().iter().enumerate() {
            if cell.dimension() < 3 {
                cells.push(cell.clone());
                cell_data.push_from(input.cell_data(), cell_id);
                continue;
            }
            for face in cell.faces() {
                if face_counts.get(&canonical_face_key(&face)) == Some(&1) {
                    cells.push(Cell::from_ring(face));
                    cell_data.push_from(input.cell_data(), cell_id);
                }
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

#[cfg(test)]
mod tests {
    use glam::{UVec3, Vec3};

    use super::*;
    use crate::attributes::DataArray;
    use crate::cell::CellKind;

    #[test]
    fn test_single_hex_surface() {
        let ds = Dataset::uniform_grid(UVec3::splat(2), Vec3::ZERO, Vec3::ONE).unwrap();
        let out = GeometryFilter.execute(&ds).unwrap();
        assert_eq!(out.n_cells(), 6);
        assert!(out.cells().iter().all(|c| c.kind() == CellKind::Quad));
        assert_eq!(out.n_points(), 8);
    }

    #[test]
    fn test_interior_faces_removed() {
        let mut ds = Dataset::uniform_grid(UVec3::splat(3), Vec3::ZERO, Vec3::ONE).unwrap();
        let ids: Vec<f32> = (0..8).map(|i| i as f32).collect();
        ds.add_cell_array(DataArray::scalars("id", ids)).unwrap();
        ds.add_point_array(DataArray::scalars("p", vec![1.0; 27]))
            .unwrap();

        let out = GeometryFilter.execute(&ds).unwrap();
        // 6 sides of 2 x 2 faces each.
        assert_eq!(out.n_cells(), 24);
        assert_eq!(out.n_points(), 27);
        assert_eq!(out.cell_data().get("id").unwrap().len(), 24);
        assert_eq!(out.point_data().get("p").unwrap().len(), 27);
    }

    #[test]
    fn test_boundary_faces_point_outward() {
        let ds = Dataset::uniform_grid(UVec3::splat(3), Vec3::ZERO, Vec3::ONE).unwrap();
        let out = GeometryFilter.execute(&ds).unwrap();
        let center = out.center();
        for cell in out.cells() {
            let p: Vec<Vec3> = cell.points().iter().map(|&i| out.points()[i as usize]).collect();
            let n = (p[1] - p[0]).cross(p[2] - p[0]);
            let centroid = p.iter().copied().sum::<Vec3>() / 4.0;
            assert!(n.dot(centroid - center) > 0.0);
        }
    }

    #[test]
    fn test_surface_cells_pass_through() {
        let ds = Dataset::from_triangles(vec![Vec3::ZERO, Vec3::X, Vec3::Y], &[[0, 1, 2]]).unwrap();
        let out = GeometryFilter.execute(&ds).unwrap();
        assert_eq!(out, ds);
    }
}
