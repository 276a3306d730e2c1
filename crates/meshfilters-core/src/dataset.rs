//! The dataset: points, cells, and the arrays attached to them.

use glam::{UVec3, Vec3};

use crate::attributes::{Association, AttributeData, DataArray};
use crate::bounds::Bounds;
use crate::cell::Cell;
use crate::error::{FilterError, Result};

/// A mesh or grid with point- and cell-associated data.
///
/// Cells may be of any [`CellKind`](crate::CellKind) and may be mixed freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<Vec3>,
    cells: Vec<Cell>,
    point_data: AttributeData,
    cell_data: AttributeData,
}

impl Dataset {
    /// Creates a dataset, checking that every cell references existing points.
    pub fn new(points: Vec<Vec3>, cells: Vec<Cell>) -> Result<Self> {
        let n_points = points.len();
        for cell in &cells {
            if let Some(&index) = cell.points().iter().find(|&&p| p as usize >= n_points) {
                return Err(FilterError::PointIndexOutOfBounds { index, n_points });
            }
        }
        Ok(Self::from_parts(
            points,
            cells,
            AttributeData::default(),
            AttributeData::default(),
        ))
    }

    /// Assembles a dataset from already-consistent parts.
    pub(crate) fn from_parts(
        points: Vec<Vec3>,
        cells: Vec<Cell>,
        point_data: AttributeData,
        cell_data: AttributeData,
    ) -> Self {
        Self {
            points,
            cells,
            point_data,
            cell_data,
        }
    }

    /// Creates a triangle surface mesh.
    pub fn from_triangles(points: Vec<Vec3>, triangles: &[[u32; 3]]) -> Result<Self> {
        let cells = triangles.iter().map(|t| Cell::triangle(*t)).collect();
        Self::new(points, cells)
    }

    /// Creates a uniform rectilinear grid of hexahedra.
    ///
    /// `dims` is the number of points along each axis (each at least 2). Points
    /// are ordered x fastest, then y, then z.
    pub fn uniform_grid(dims: UVec3, origin: Vec3, spacing: Vec3) -> Result<Self> {
        if dims.min_element() < 2 {
            return Err(FilterError::InvalidArgument(format!(
                "grid dimensions {dims} must be at least 2 along every axis"
            )));
        }
        let (nx, ny, nz) = (dims.x, dims.y, dims.z);
        let mut points = Vec::with_capacity((nx * ny * nz) as usize);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let ijk = UVec3::new(i, j, k).as_vec3();
                    points.push(origin + ijk * spacing);
                }
            }
        }

        let id = |i: u32, j: u32, k: u32| i + j * nx + k * nx * ny;
        let mut cells = Vec::with_capacity(((nx - 1) * (ny - 1) * (nz - 1)) as usize);
        for k in 0..nz - 1 {
            for j in 0..ny - 1 {
                for i in 0..nx - 1 {
                    cells.push(Cell::hexahedron([
                        id(i, j, k),
                        id(i + 1, j, k),
                        id(i + 1, j + 1, k),
                        id(i, j + 1, k),
                        id(i, j, k + 1),
                        id(i + 1, j, k + 1),
                        id(i + 1, j + 1, k + 1),
                        id(i, j + 1, k + 1),
                    ]));
                }
            }
        }
        Ok(Self::from_parts(
            points,
            cells,
            AttributeData::default(),
            AttributeData::default(),
        ))
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn point_data(&self) -> &AttributeData {
        &self.point_data
    }

    pub fn point_data_mut(&mut self) -> &mut AttributeData {
        &mut self.point_data
    }

    pub fn cell_data(&self) -> &AttributeData {
        &self.cell_data
    }

    pub fn cell_data_mut(&mut self) -> &mut AttributeData {
        &mut self.cell_data
    }

    /// Returns the attribute data for an association.
    pub fn attributes(&self, association: Association) -> &AttributeData {
        match association {
            Association::Point => &self.point_data,
            Association::Cell => &self.cell_data,
        }
    }

    /// Returns the mutable attribute data for an association.
    pub fn attributes_mut(&mut self, association: Association) -> &mut AttributeData {
        match association {
            Association::Point => &mut self.point_data,
            Association::Cell => &mut self.cell_data,
        }
    }

    /// Adds an array with one tuple per point.
    pub fn add_point_array(&mut self, array: DataArray) -> Result<()> {
        self.add_array(Association::Point, array)
    }

    /// Adds an array with one tuple per cell.
    pub fn add_cell_array(&mut self, array: DataArray) -> Result<()> {
        self.add_array(Association::Cell, array)
    }

    /// Adds an array to the given association, checking its tuple count.
    pub fn add_array(&mut self, association: Association, array: DataArray) -> Result<()> {
        let expected = match association {
            Association::Point => self.n_points(),
            Association::Cell => self.n_cells(),
        };
        if array.len() != expected {
            return Err(FilterError::SizeMismatch {
                expected,
                actual: array.len(),
            });
        }
        self.attributes_mut(association).add_array(array);
        Ok(())
    }

    /// Returns the bounding box; an empty dataset has zero-sized bounds at the origin.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.points).unwrap_or_default()
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> Vec3 {
        self.bounds().center()
    }

    /// Returns the number of arrays on points and cells together.
    pub fn n_scalars(&self) -> usize {
        self.point_data.len() + self.cell_data.len()
    }

    /// Returns the association and name of the active scalars.
    ///
    /// Point data is consulted before cell data.
    pub fn active_scalar_info(&self) -> Option<(Association, &str)> {
        if let Some(name) = self.point_data.active_scalars_name() {
            return Some((Association::Point, name));
        }
        self.cell_data
            .active_scalars_name()
            .map(|name| (Association::Cell, name))
    }

    /// Returns the active scalar array and its association.
    pub fn active_scalars(&self) -> Option<(&DataArray, Association)> {
        let (association, name) = self.active_scalar_info()?;
        self.attributes(association)
            .get(name)
            .map(|array| (array, association))
    }

    /// Makes `name` the active scalars.
    ///
    /// The array is looked up in `preference` first, then in the other association.
    /// Activating an array clears the active scalars of the other association.
    pub fn set_active_scalar(&mut self, name: &str, preference: Association) -> Result<()> {
        let association = self
            .get_array(name, preference)
            .map(|(_, association)| association)
            .ok_or_else(|| {
                FilterError::MissingData(format!("array '{name}' not found on dataset"))
            })?;
        self.attributes_mut(association).set_active_scalars(name)?;
        self.attributes_mut(association.other()).clear_active_scalars();
        Ok(())
    }

    /// Finds an array by name, searching `preference` first.
    pub fn get_array(
        &self,
        name: &str,
        preference: Association,
    ) -> Option<(&DataArray, Association)> {
        [preference, preference.other()]
            .into_iter()
            .find_map(|association| {
                self.attributes(association)
                    .get(name)
                    .map(|array| (array, association))
            })
    }

    /// Returns the NaN-ignoring `(min, max)` of the named array.
    pub fn data_range(&self, name: &str, preference: Association) -> Result<(f32, f32)> {
        let (array, _) = self.get_array(name, preference).ok_or_else(|| {
            FilterError::MissingData(format!("array '{name}' not found on dataset"))
        })?;
        array.range().ok_or_else(|| {
            FilterError::MissingData(format!("array '{name}' holds no finite values"))
        })
    }

    /// Copies bookkeeping metadata from `source`.
    ///
    /// Only the active scalar designation propagates: if `source`'s active
    /// scalars exist under the same name and association on `self`, they become
    /// the active scalars of `self`. Arrays and geometry are left untouched.
    pub fn copy_meta_from(&mut self, source: &Dataset) {
        if let Some((association, name)) = source.active_scalar_info() {
            if self.attributes_mut(association).set_active_scalars(name).is_ok() {
                self.attributes_mut(association.other()).clear_active_scalars();
            }
        }
    }
}
