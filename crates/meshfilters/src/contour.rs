//! Iso-contours.

use meshfilters_core::{Algorithm, Association, ContourFilter, Dataset, FilterError, Result};
use serde::{Deserialize, Serialize};

use crate::output::wrap_output;
use crate::resolve::resolve_scalars;
use crate::settings::Settings;

/// Which levels to contour at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Isosurfaces {
    /// This many levels spread evenly over the data range, ends included.
    Count(usize),
    /// These exact levels, in order.
    Values(Vec<f32>),
}

impl Isosurfaces {
    /// Resolves the levels for a data range.
    pub fn levels(&self, (min, max): (f32, f32)) -> Vec<f32> {
        match self {
            Self::Count(0) => Vec::new(),
            Self::Count(1) => vec![min],
            #[allow(clippy::cast_precision_loss)]
            Self::Count(n) => (0..*n)
                .map(|i| min + i as f32 * (max - min) / (*n - 1) as f32)
                .collect(),
            Self::Values(values) => values.clone(),
        }
    }
}

impl From<Vec<f32>> for Isosurfaces {
    fn from(values: Vec<f32>) -> Self {
        Self::Values(values)
    }
}

/// Options for [`contour`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContourOptions {
    pub isosurfaces: Isosurfaces,
    /// Point array to contour; the active scalars when `None`.
    pub scalars: Option<String>,
    pub compute_normals: bool,
    pub compute_gradients: bool,
    /// Keep the contoured array on the output as its active scalars.
    pub compute_scalars: bool,
    pub preference: Association,
}

impl ContourOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            isosurfaces: Isosurfaces::Count(settings.contour_count),
            scalars: None,
            compute_normals: false,
            compute_gradients: false,
            compute_scalars: true,
            preference: Association::Point,
        }
    }
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Extracts iso-surfaces (or iso-lines on surface meshes) of a point array.
pub fn contour(dataset: &Dataset, options: &ContourOptions) -> Result<Dataset> {
    if dataset.n_scalars() < 1 {
        return Err(FilterError::MissingData(
            "contour needs a point array, but the dataset has no arrays".to_string(),
        ));
    }
    let (array, association) =
        resolve_scalars(dataset, options.scalars.as_deref(), options.preference)?;
    if association != Association::Point {
        return Err(FilterError::MissingData(format!(
            "contour works on point data, but '{}' is a cell array",
            array.name()
        )));
    }

    let levels = match &options.isosurfaces {
        Isosurfaces::Count(_) => {
            let range = dataset.data_range(array.name(), Association::Point)?;
            options.isosurfaces.levels(range)
        }
        Isosurfaces::Values(values) => values.clone(),
    };
    log::debug!("contour: '{}' at levels {levels:?}", array.name());

    let output = ContourFilter::new(array.name(), levels)
        .compute_normals(options.compute_normals)
        .compute_gradients(options.compute_gradients)
        .compute_scalars(options.compute_scalars)
        .execute(dataset)?;
    if output.n_cells() == 0 && dataset.n_cells() > 0 {
        log::warn!("contour of '{}' produced no cells", array.name());
    }
    Ok(wrap_output(dataset, output))
}

#[cfg(test)]
mod tests {
    use meshfilters_core::{DataArray, UVec3, Vec3, GRADIENTS_ARRAY_NAME, NORMALS_ARRAY_NAME};

    use super::*;

    fn field() -> Dataset {
        let mut ds =
            Dataset::uniform_grid(UVec3::splat(5), Vec3::ZERO, Vec3::splat(0.25)).unwrap();
        let values: Vec<f32> = ds.points().iter().map(|p| p.x + p.y + p.z).collect();
        ds.add_point_array(DataArray::scalars("sum", values)).unwrap();
        ds.set_active_scalar("sum", Association::Point).unwrap();
        ds
    }

    #[test]
    fn test_levels() {
        assert_eq!(Isosurfaces::Count(3).levels((0.0, 2.0)), vec![0.0, 1.0, 2.0]);
        assert_eq!(Isosurfaces::Count(1).levels((4.0, 8.0)), vec![4.0]);
        assert!(Isosurfaces::Count(0).levels((4.0, 8.0)).is_empty());
        assert_eq!(
            Isosurfaces::Values(vec![3.0, 1.0]).levels((0.0, 0.0)),
            vec![3.0, 1.0]
        );
    }

    #[test]
    fn test_contour_values_lie_on_levels() {
        let options = ContourOptions {
            isosurfaces: Isosurfaces::Values(vec![0.6, 1.7]),
            ..ContourOptions::default()
        };
        let out = contour(&field(), &options).unwrap();
        assert!(out.n_cells() > 0);
        let sum = out.point_data().get("sum").unwrap();
        for (i, p) in out.points().iter().enumerate() {
            let s = p.x + p.y + p.z;
            assert!((s - 0.6).abs() < 1e-4 || (s - 1.7).abs() < 1e-4);
            assert!((sum.values()[i] - s).abs() < 1e-4);
        }
        assert_eq!(out.active_scalar_info(), Some((Association::Point, "sum")));
    }

    #[test]
    fn test_optional_arrays() {
        let options = ContourOptions {
            isosurfaces: Isosurfaces::Count(3),
            compute_normals: true,
            compute_gradients: true,
            compute_scalars: false,
            ..ContourOptions::default()
        };
        let out = contour(&field(), &options).unwrap();
        assert!(out.point_data().contains(NORMALS_ARRAY_NAME));
        assert!(out.point_data().contains(GRADIENTS_ARRAY_NAME));
        assert!(!out.point_data().contains("sum"));
    }

    #[test]
    fn test_requires_point_scalars() {
        let bare = Dataset::uniform_grid(UVec3::splat(2), Vec3::ZERO, Vec3::ONE).unwrap();
        assert!(matches!(
            contour(&bare, &ContourOptions::default()),
            Err(FilterError::MissingData(_))
        ));

        let mut cells = bare.clone();
        cells
            .add_cell_array(DataArray::scalars("c", vec![1.0]))
            .unwrap();
        cells.set_active_scalar("c", Association::Cell).unwrap();
        assert!(matches!(
            contour(&cells, &ContourOptions::default()),
            Err(FilterError::MissingData(_))
        ));
    }
}
