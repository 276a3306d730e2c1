//! Thresholding by value and by percentage of the data range.

use meshfilters_core::{
    Algorithm, AppendFilter, Association, Dataset, FilterError, Result, Threshold,
    ThresholdCriterion,
};
use serde::{Deserialize, Serialize};

use crate::output::wrap_output;
use crate::resolve::resolve_scalars;
use crate::settings::Settings;

/// A single threshold value or an inclusive `(low, high)` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThresholdValue {
    Scalar(f32),
    Range(f32, f32),
}

impl From<f32> for ThresholdValue {
    fn from(value: f32) -> Self {
        Self::Scalar(value)
    }
}

impl From<(f32, f32)> for ThresholdValue {
    fn from((low, high): (f32, f32)) -> Self {
        Self::Range(low, high)
    }
}

impl TryFrom<&[f32]> for ThresholdValue {
    type Error = FilterError;

    /// Builds a range from exactly two values.
    fn try_from(values: &[f32]) -> Result<Self> {
        match values {
            [low, high] => Ok(Self::Range(*low, *high)),
            _ => Err(FilterError::InvalidArgument(format!(
                "a threshold range needs exactly 2 values, got {}",
                values.len()
            ))),
        }
    }
}

/// Options for [`threshold`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdOptions {
    /// The threshold; the full data range (dropping NaN cells) when `None`.
    pub value: Option<ThresholdValue>,
    /// Array to threshold; the active scalars when `None`.
    pub scalars: Option<String>,
    /// Keep values below a scalar, or outside a range.
    pub invert: bool,
    /// Test point arrays over each cell's value interval instead of every point.
    pub continuous: bool,
    /// Association searched first when looking up `scalars`.
    pub preference: Association,
}

impl ThresholdOptions {
    pub fn from_settings(_settings: &Settings) -> Self {
        Self {
            value: None,
            scalars: None,
            invert: false,
            continuous: false,
            preference: Association::Cell,
        }
    }
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Options for [`threshold_percent`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdPercentOptions {
    /// Percentage (as a fraction, or a number >= 1 read as percent) or percentage range.
    pub percent: ThresholdValue,
    pub scalars: Option<String>,
    pub invert: bool,
    pub continuous: bool,
    pub preference: Association,
}

impl ThresholdPercentOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            percent: ThresholdValue::Scalar(settings.threshold_percent),
            scalars: None,
            invert: false,
            continuous: false,
            preference: Association::Cell,
        }
    }
}

impl Default for ThresholdPercentOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

fn run(
    dataset: &Dataset,
    name: &str,
    association: Association,
    criterion: ThresholdCriterion,
    continuous: bool,
) -> Result<Dataset> {
    Threshold::new(name, association, criterion)
        .continuous(continuous)
        .execute(dataset)
}

/// Keeps the cells whose scalars pass a threshold.
///
/// - no value: the full data range, which only removes cells with NaN values;
/// - a range: values inside it (inclusive), or with `invert` the union of
///   `[min, low]` and `[high, max]` over the data range;
/// - a scalar: values `>= value`, or with `invert` values `<= value`.
pub fn threshold(dataset: &Dataset, options: &ThresholdOptions) -> Result<Dataset> {
    let (array, association) =
        resolve_scalars(dataset, options.scalars.as_deref(), options.preference)?;
    let name = array.name();
    let data_range = || {
        array.range().ok_or_else(|| {
            FilterError::MissingData(format!("array '{name}' holds no finite values"))
        })
    };
    log::debug!(
        "threshold: {association} array '{name}', value {:?}, invert {}, continuous {}",
        options.value,
        options.invert,
        options.continuous
    );

    let output = match options.value {
        None => {
            let (min, max) = data_range()?;
            run(
                dataset,
                name,
                association,
                ThresholdCriterion::Between(min, max),
                options.continuous,
            )?
        }
        Some(ThresholdValue::Range(low, high)) if options.invert => {
            let (min, max) = data_range()?;
            let below = run(
                dataset,
                name,
                association,
                ThresholdCriterion::Between(min, low),
                options.continuous,
            )?;
            let above = run(
                dataset,
                name,
                association,
                ThresholdCriterion::Between(high, max),
                options.continuous,
            )?;
            AppendFilter::new().execute_many(&[&below, &above])?
        }
        Some(ThresholdValue::Range(low, high)) => run(
            dataset,
            name,
            association,
            ThresholdCriterion::Between(low, high),
            options.continuous,
        )?,
        Some(ThresholdValue::Scalar(value)) => {
            let criterion = if options.invert {
                ThresholdCriterion::Lower(value)
            } else {
                ThresholdCriterion::Upper(value)
            };
            run(dataset, name, association, criterion, options.continuous)?
        }
    };

    if output.n_cells() == 0 && dataset.n_cells() > 0 {
        log::warn!("threshold on '{name}' removed every cell");
    }
    Ok(wrap_output(dataset, output))
}

/// Reads a percentage as a fraction of the data range.
///
/// Values `>= 1` are taken as percent and divided by 100; the result must lie
/// in `[1e-10, 1]`. So `1.5` is accepted as 1.5%, not rejected as 150%; only
/// values above `100` fail on the high side.
pub fn normalize_percent(percent: f32) -> Result<f32> {
    let mut fraction = percent;
    if fraction >= 1.0 {
        fraction /= 100.0;
        if fraction > 1.0 {
            return Err(FilterError::OutOfRange(format!(
                "percentage {percent} is larger than 100%"
            )));
        }
    }
    if fraction < 1e-10 || fraction.is_nan() {
        return Err(FilterError::OutOfRange(format!(
            "percentage {percent} is too small or negative"
        )));
    }
    Ok(fraction)
}

/// Thresholds at a percentage (or percentage range) of the data range.
///
/// Each percentage `p` becomes the value `min + p * (max - min)`, then
/// [`threshold`] runs with the same flags.
pub fn threshold_percent(dataset: &Dataset, options: &ThresholdPercentOptions) -> Result<Dataset> {
    let (array, association) =
        resolve_scalars(dataset, options.scalars.as_deref(), options.preference)?;
    let (min, max) = array.range().ok_or_else(|| {
        FilterError::MissingData(format!("array '{}' holds no finite values", array.name()))
    })?;
    let at = |percent: f32| normalize_percent(percent).map(|p| min + p * (max - min));

    let value = match options.percent {
        ThresholdValue::Scalar(p) => ThresholdValue::Scalar(at(p)?),
        ThresholdValue::Range(p0, p1) => ThresholdValue::Range(at(p0)?, at(p1)?),
    };
    log::debug!("threshold_percent: {:?} maps to {value:?}", options.percent);

    threshold(
        dataset,
        &ThresholdOptions {
            value: Some(value),
            scalars: Some(array.name().to_string()),
            invert: options.invert,
            continuous: options.continuous,
            preference: association,
        },
    )
}

#[cfg(test)]
mod tests {
    use meshfilters_core::{DataArray, UVec3, Vec3};

    use super::*;

    /// Ten cells in a row with cell values 0..=9 and point values equal to x.
    fn bar() -> Dataset {
        let mut ds =
            Dataset::uniform_grid(UVec3::new(11, 2, 2), Vec3::ZERO, Vec3::ONE).unwrap();
        let ids: Vec<f32> = (0..10).map(|i| i as f32).collect();
        ds.add_cell_array(DataArray::scalars("id", ids)).unwrap();
        let xs: Vec<f32> = ds.points().iter().map(|p| p.x).collect();
        ds.add_point_array(DataArray::scalars("x", xs)).unwrap();
        ds.set_active_scalar("id", Association::Cell).unwrap();
        ds
    }

    fn ids(ds: &Dataset) -> Vec<f32> {
        ds.cell_data().get("id").unwrap().values().to_vec()
    }

    #[test]
    fn test_value_from_slice() {
        assert_eq!(
            ThresholdValue::try_from(&[1.0, 2.0][..]).unwrap(),
            ThresholdValue::Range(1.0, 2.0)
        );
        assert!(matches!(
            ThresholdValue::try_from(&[1.0, 2.0, 3.0][..]),
            Err(FilterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_scalar_threshold() {
        let options = ThresholdOptions {
            value: Some(ThresholdValue::Scalar(7.0)),
            ..ThresholdOptions::default()
        };
        assert_eq!(ids(&threshold(&bar(), &options).unwrap()), vec![7.0, 8.0, 9.0]);

        let inverted = ThresholdOptions {
            invert: true,
            ..options
        };
        assert_eq!(
            ids(&threshold(&bar(), &inverted).unwrap()),
            (0..=7).map(|i| i as f32).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_range_threshold() {
        let options = ThresholdOptions {
            value: Some(ThresholdValue::Range(2.0, 4.0)),
            ..ThresholdOptions::default()
        };
        let out = threshold(&bar(), &options).unwrap();
        assert_eq!(ids(&out), vec![2.0, 3.0, 4.0]);
        assert_eq!(out.active_scalar_info(), Some((Association::Cell, "id")));
    }

    #[test]
    fn test_inverted_range_appends_both_ends() {
        let options = ThresholdOptions {
            value: Some(ThresholdValue::Range(2.0, 7.0)),
            invert: true,
            ..ThresholdOptions::default()
        };
        let out = threshold(&bar(), &options).unwrap();
        assert_eq!(ids(&out), vec![0.0, 1.0, 2.0, 7.0, 8.0, 9.0]);
        assert_eq!(out.active_scalar_info(), Some((Association::Cell, "id")));
    }

    #[test]
    fn test_no_value_drops_nan_cells() {
        let mut ds = bar();
        let mut values: Vec<f32> = (0..10).map(|i| i as f32).collect();
        values[4] = f32::NAN;
        ds.add_cell_array(DataArray::scalars("n", values)).unwrap();
        let options = ThresholdOptions {
            scalars: Some("n".to_string()),
            ..ThresholdOptions::default()
        };
        assert_eq!(threshold(&ds, &options).unwrap().n_cells(), 9);
    }

    #[test]
    fn test_point_array_preference() {
        let options = ThresholdOptions {
            value: Some(ThresholdValue::Scalar(8.0)),
            scalars: Some("x".to_string()),
            preference: Association::Point,
            ..ThresholdOptions::default()
        };
        assert_eq!(ids(&threshold(&bar(), &options).unwrap()), vec![8.0, 9.0]);
    }

    #[test]
    fn test_missing_scalars() {
        let ds = Dataset::uniform_grid(UVec3::splat(2), Vec3::ZERO, Vec3::ONE).unwrap();
        assert!(matches!(
            threshold(&ds, &ThresholdOptions::default()),
            Err(FilterError::MissingData(_))
        ));
    }

    #[test]
    fn test_normalize_percent() {
        assert_eq!(normalize_percent(0.5).unwrap(), 0.5);
        assert_eq!(normalize_percent(50.0).unwrap(), 0.5);
        assert_eq!(normalize_percent(100.0).unwrap(), 1.0);
        assert!((normalize_percent(1.5).unwrap() - 0.015).abs() < 1e-7);
        assert!(matches!(normalize_percent(150.0), Err(FilterError::OutOfRange(_))));
        assert!(matches!(normalize_percent(0.0), Err(FilterError::OutOfRange(_))));
        assert!(matches!(normalize_percent(-0.2), Err(FilterError::OutOfRange(_))));
    }

    #[test]
    fn test_percent_matches_value_threshold() {
        let by_percent = threshold_percent(
            &bar(),
            &ThresholdPercentOptions {
                percent: ThresholdValue::Scalar(50.0),
                ..ThresholdPercentOptions::default()
            },
        )
        .unwrap();
        let by_value = threshold(
            &bar(),
            &ThresholdOptions {
                value: Some(ThresholdValue::Scalar(4.5)),
                ..ThresholdOptions::default()
            },
        )
        .unwrap();
        assert_eq!(by_percent, by_value);
        assert_eq!(ids(&by_percent), vec![5.0, 6.0, 7.0, 8.0, 9.0]);
    }
}
