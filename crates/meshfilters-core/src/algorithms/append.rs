//! Concatenation of datasets.

use super::Algorithm;
use crate::attributes::AttributeData;
use crate::cell::Cell;
use crate::dataset::Dataset;
use crate::error::Result;

/// Merges several datasets into one.
///
/// Points and cells are concatenated in input order, with cell point ids
/// shifted past the points of earlier inputs. Only arrays present on every
/// input, with the same width, survive.
///
/// Takes any number of inputs through [`execute_many`](Self::execute_many);
/// [`Algorithm::execute`] appends a single input, which copies it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendFilter;

impl AppendFilter {
    pub fn new() -> Self {
        Self
    }

    /// Appends `inputs` in order. No inputs give an empty dataset.
    pub fn execute_many(&self, inputs: &[&Dataset]) -> Result<Dataset> {
        let Some((first, rest)) = inputs.split_first() else {
            return Ok(Dataset::default());
        };

        let shared = |pick: fn(&Dataset) -> &AttributeData| {
            let mut data = pick(first).empty_like();
            data.retain_arrays(|array| {
                rest.iter().all(|ds| {
                    pick(ds)
                        .get(array.name())
                        .is_some_and(|a| a.num_components() == array.num_components())
                })
            });
            data
        };
        let mut point_data = shared(Dataset::point_data);
        let mut cell_data = shared(Dataset::cell_data);

        let mut points = Vec::new();
        let mut cells = Vec::new();
        for ds in inputs {
            #[allow(clippy::cast_possible_truncation)]
            let offset = points.len() as u32;
            points.extend_from_slice(ds.points());
            cells.extend(ds.cells().iter().map(|cell| {
                let ids = cell.points().iter().map(|&p| p + offset).collect();
                Cell::from_raw(cell.kind(), ids)
            }));
            point_data.extend_from(ds.point_data());
            cell_data.extend_from(ds.cell_data());
        }

        Ok(Dataset::from_parts(points, cells, point_data, cell_data))
    }
}

impl Algorithm for AppendFilter {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        self.execute_many(&[input])
    }
}
