//! meshfilters: convenience filters for meshes and grids.
//!
//! Each filter takes a [`Dataset`] and an options struct, resolves short-hand
//! arguments (axis names, default origins, active scalars), runs one kernel
//! algorithm from [`meshfilters_core`] and returns a new dataset carrying the
//! input's active scalar designation.
//!
//! # Quick Start
//!
//! ```
//! use meshfilters::*;
//!
//! fn main() -> Result<()> {
//!     let mut grid = Dataset::uniform_grid(UVec3::splat(5), Vec3::ZERO, Vec3::splat(0.25))?;
//!     let heights: Vec<f32> = grid.points().iter().map(|p| p.z).collect();
//!     grid.add_point_array(DataArray::scalars("height", heights))?;
//!     grid.set_active_scalar("height", Association::Point)?;
//!
//!     let half = grid.clip(&ClipOptions::default())?;
//!     let slices = grid.slice_orthogonal(&OrthogonalSliceOptions::default())?;
//!     let surfaces = grid.contour(&ContourOptions {
//!         isosurfaces: Isosurfaces::Values(vec![0.3, 0.6]),
//!         ..ContourOptions::default()
//!     })?;
//!
//!     assert!(half.n_cells() > 0);
//!     assert_eq!(slices.len(), 3);
//!     assert!(surfaces.n_cells() > 0);
//!     Ok(())
//! }
//! ```
//!
//! # Filters
//!
//! - [`clip`], [`slice`], [`slice_orthogonal`], [`slice_along_axis`]
//! - [`threshold`], [`threshold_percent`]
//! - [`outline`], [`outline_corners`], [`extract_geometry`], [`wireframe`]
//! - [`elevation`], [`contour`]
//! - [`texture_map_to_plane`], [`texture_map_to_plane_in_place`]
//!
//! The same filters are available as methods through [`DataSetFilters`].

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Exact float comparisons in tests of clamped and normalized values
#![allow(clippy::float_cmp)]

pub mod clip;
pub mod contour;
pub mod elevation;
pub mod extract;
pub mod output;
pub mod resolve;
pub mod settings;
pub mod slice;
pub mod texture;
pub mod threshold;

pub use meshfilters_core::{
    Algorithm, Association, AttributeData, Block, Bounds, Cell, CellKind, DataArray, Dataset,
    FilterError, MultiBlock, Plane, Result, UVec3, Vec3, DEFAULT_TCOORDS_NAME,
    ELEVATION_ARRAY_NAME, GRADIENTS_ARRAY_NAME, NORMALS_ARRAY_NAME,
};

pub use clip::{clip, ClipOptions};
pub use contour::{contour, ContourOptions, Isosurfaces};
pub use elevation::{elevation, ElevationOptions, ScalarRange};
pub use extract::{extract_geometry, outline, outline_corners, outline_corners_with, wireframe};
pub use output::{wrap_output, wrap_output_with_active};
pub use resolve::{Axis, Normal};
pub use settings::Settings;
pub use slice::{
    slice, slice_along_axis, slice_orthogonal, OrthogonalSliceOptions, SliceAlongAxisOptions,
    SliceOptions,
};
pub use texture::{texture_map_to_plane, texture_map_to_plane_in_place, TextureMapOptions};
pub use threshold::{
    normalize_percent, threshold, threshold_percent, ThresholdOptions, ThresholdPercentOptions,
    ThresholdValue,
};

/// The filters as methods on [`Dataset`].
pub trait DataSetFilters {
    fn clip(&self, options: &ClipOptions) -> Result<Dataset>;
    fn slice(&self, options: &SliceOptions) -> Result<Dataset>;
    fn slice_orthogonal(&self, options: &OrthogonalSliceOptions) -> Result<MultiBlock>;
    fn slice_along_axis(&self, options: &SliceAlongAxisOptions) -> Result<MultiBlock>;
    fn threshold(&self, options: &ThresholdOptions) -> Result<Dataset>;
    fn threshold_percent(&self, options: &ThresholdPercentOptions) -> Result<Dataset>;
    fn outline(&self, generate_faces: bool) -> Result<Dataset>;
    fn outline_corners(&self, factor: f32) -> Result<Dataset>;
    fn extract_geometry(&self) -> Result<Dataset>;
    fn wireframe(&self) -> Result<Dataset>;
    fn elevation(&self, options: &ElevationOptions) -> Result<Dataset>;
    fn contour(&self, options: &ContourOptions) -> Result<Dataset>;
    fn texture_map_to_plane(&self, options: &TextureMapOptions) -> Result<Dataset>;
    fn texture_map_to_plane_in_place(&mut self, options: &TextureMapOptions) -> Result<()>;
}

impl DataSetFilters for Dataset {
    fn clip(&self, options: &ClipOptions) -> Result<Dataset> {
        clip::clip(self, options)
    }

    fn slice(&self, options: &SliceOptions) -> Result<Dataset> {
        slice::slice(self, options)
    }

    fn slice_orthogonal(&self, options: &OrthogonalSliceOptions) -> Result<MultiBlock> {
        slice::slice_orthogonal(self, options)
    }

    fn slice_along_axis(&self, options: &SliceAlongAxisOptions) -> Result<MultiBlock> {
        slice::slice_along_axis(self, options)
    }

    fn threshold(&self, options: &ThresholdOptions) -> Result<Dataset> {
        threshold::threshold(self, options)
    }

    fn threshold_percent(&self, options: &ThresholdPercentOptions) -> Result<Dataset> {
        threshold::threshold_percent(self, options)
    }

    fn outline(&self, generate_faces: bool) -> Result<Dataset> {
        extract::outline(self, generate_faces)
    }

    fn outline_corners(&self, factor: f32) -> Result<Dataset> {
        extract::outline_corners(self, factor)
    }

    fn extract_geometry(&self) -> Result<Dataset> {
        extract::extract_geometry(self)
    }

    fn wireframe(&self) -> Result<Dataset> {
        extract::wireframe(self)
    }

    fn elevation(&self, options: &ElevationOptions) -> Result<Dataset> {
        elevation::elevation(self, options)
    }

    fn contour(&self, options: &ContourOptions) -> Result<Dataset> {
        contour::contour(self, options)
    }

    fn texture_map_to_plane(&self, options: &TextureMapOptions) -> Result<Dataset> {
        texture::texture_map_to_plane(self, options)
    }

    fn texture_map_to_plane_in_place(&mut self, options: &TextureMapOptions) -> Result<()> {
        texture::texture_map_to_plane_in_place(self, options)
    }
}
