//! Geometry kernel: configurable algorithm objects over [`Dataset`]s.
//!
//! Every algorithm follows the same life cycle: construct it with its
//! parameters, then [`Algorithm::execute`] it on an input dataset to obtain a
//! new output dataset. Inputs are never modified.
//!
//! Cells are processed through simplex decomposition: 3D cells are split into
//! tetrahedra and 2D cells into triangle fans whenever a cell straddles a
//! cutting surface. Point data is linearly interpolated onto new points and
//! every output cell inherits the cell data of the input cell it came from.

mod append;
mod builder;
mod clip;
mod contour;
mod cutter;
mod edges;
mod elevation;
mod geometry;
mod outline;
mod texture;
mod threshold;

pub use append::AppendFilter;
pub use clip::ClipDataSet;
pub use contour::{ContourFilter, GRADIENTS_ARRAY_NAME, NORMALS_ARRAY_NAME};
pub use cutter::Cutter;
pub use edges::ExtractEdges;
pub use elevation::{ElevationFilter, ELEVATION_ARRAY_NAME};
pub use geometry::GeometryFilter;
pub use outline::{OutlineCornerFilter, OutlineFilter};
pub use texture::{TextureMapToPlane, DEFAULT_TCOORDS_NAME};
pub use threshold::{Threshold, ThresholdCriterion};

use crate::dataset::Dataset;
use crate::error::Result;

/// A configured algorithm that maps one input dataset to one output dataset.
pub trait Algorithm {
    /// Runs the algorithm to completion on `input`.
    fn execute(&self, input: &Dataset) -> Result<Dataset>;
}
