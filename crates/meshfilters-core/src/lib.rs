//! Core data model and geometry kernel for meshfilters.
//!
//! This crate provides the types every filter works on and the algorithms
//! that do the geometric work:
//! - [`Dataset`]: points, cells of mixed kinds, and point/cell [`AttributeData`]
//! - [`MultiBlock`]: an indexed, named collection of datasets
//! - [`Plane`] and [`Bounds`] primitives
//! - [`algorithms`]: configurable kernel objects (clip, cut, threshold, contour, ...)
//!   implementing the [`Algorithm`] trait

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Point ids are u32 throughout; counts are checked where datasets are built
#![allow(clippy::cast_possible_truncation)]
// Exact comparisons against zero are intended for plane and level tests
#![allow(clippy::float_cmp)]

pub mod algorithms;
pub mod attributes;
pub mod bounds;
pub mod cell;
pub mod dataset;
pub mod error;
pub mod multiblock;
pub mod plane;

pub use algorithms::{
    AppendFilter, ClipDataSet, ContourFilter, Cutter, ElevationFilter, ExtractEdges,
    GeometryFilter, OutlineCornerFilter, OutlineFilter, TextureMapToPlane, Threshold,
    ThresholdCriterion, DEFAULT_TCOORDS_NAME, ELEVATION_ARRAY_NAME, GRADIENTS_ARRAY_NAME,
    NORMALS_ARRAY_NAME,
};
pub use algorithms::Algorithm;
pub use attributes::{Association, AttributeData, DataArray};
pub use bounds::Bounds;
pub use cell::{Cell, CellKind};
pub use dataset::Dataset;
pub use error::{FilterError, Result};
pub use multiblock::{Block, MultiBlock};
pub use plane::Plane;

// Re-export glam types for convenience
pub use glam::{UVec3, Vec3};
