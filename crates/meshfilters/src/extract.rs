//! Outlines, surfaces and wireframes.

use meshfilters_core::{
    Algorithm, Dataset, ExtractEdges, GeometryFilter, OutlineCornerFilter, OutlineFilter, Result,
};

use crate::output::wrap_output;
use crate::settings::Settings;

/// The 12 edges of the bounding box, plus its 6 faces with `generate_faces`.
///
/// The result carries no data arrays.
pub fn outline(dataset: &Dataset, generate_faces: bool) -> Result<Dataset> {
    OutlineFilter::new()
        .generate_faces(generate_faces)
        .execute(dataset)
}

/// Three short segments at each corner of the bounding box.
///
/// `factor` is the segment length relative to the box extent, clamped to
/// `[0.001, 0.5]`. The result carries no data arrays.
pub fn outline_corners(dataset: &Dataset, factor: f32) -> Result<Dataset> {
    log::debug!("outline_corners: factor {factor}");
    OutlineCornerFilter::new(factor).execute(dataset)
}

/// [`outline_corners`] with the corner factor from `settings`.
pub fn outline_corners_with(dataset: &Dataset, settings: &Settings) -> Result<Dataset> {
    outline_corners(dataset, settings.corner_factor)
}

/// The outer surface: boundary faces of volumetric cells plus all lower-dimensional cells.
pub fn extract_geometry(dataset: &Dataset) -> Result<Dataset> {
    let output = GeometryFilter.execute(dataset)?;
    log::debug!(
        "extract_geometry: {} cells -> {} surface cells",
        dataset.n_cells(),
        output.n_cells()
    );
    Ok(wrap_output(dataset, output))
}

/// Every unique cell edge as a line cell.
pub fn wireframe(dataset: &Dataset) -> Result<Dataset> {
    let output = ExtractEdges.execute(dataset)?;
    log::debug!("wireframe: {} edges", output.n_cells());
    Ok(wrap_output(dataset, output))
}
