//! Cell selection by scalar value.

use serde::{Deserialize, Serialize};

use super::builder::extract_cells;
use super::Algorithm;
use crate::attributes::Association;
use crate::cell::Cell;
use crate::dataset::Dataset;
use crate::error::{FilterError, Result};

/// The acceptance test applied to scalar values. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThresholdCriterion {
    /// `lower <= s <= upper`.
    Between(f32, f32),
    /// `s <= value`.
    Lower(f32),
    /// `s >= value`.
    Upper(f32),
}

impl ThresholdCriterion {
    /// Returns whether a single value passes. NaN never passes.
    pub fn accepts(&self, s: f32) -> bool {
        match *self {
            Self::Between(lo, hi) => lo <= s && s <= hi,
            Self::Lower(v) => s <= v,
            Self::Upper(v) => s >= v,
        }
    }

    /// Returns whether the closed interval `[lo, hi]` meets the accepted set.
    fn intersects(&self, lo: f32, hi: f32) -> bool {
        match *self {
            Self::Between(a, b) => lo <= b && hi >= a,
            Self::Lower(v) => lo <= v,
            Self::Upper(v) => hi >= v,
        }
    }
}

/// Keeps the cells whose scalar values pass a [`ThresholdCriterion`].
///
/// For a cell array the cell's own value is tested. For a point array every
/// point of the cell must pass, or, in continuous mode, the interval spanned
/// by the cell's point values must intersect the accepted range. Kept cells
/// keep their data; unused points are dropped.
#[derive(Debug, Clone)]
pub struct Threshold {
    array: String,
    association: Association,
    criterion: ThresholdCriterion,
    continuous: bool,
}

impl Threshold {
    pub fn new(array: impl Into<String>, association: Association, criterion: ThresholdCriterion) -> Self {
        Self {
            array: array.into(),
            association,
            criterion,
            continuous: false,
        }
    }

    /// Enables interval testing for point arrays.
    #[must_use]
    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    fn cell_passes(&self, cell: &Cell, value: impl Fn(usize) -> f32) -> bool {
        let values: Vec<f32> = cell.points().iter().map(|&p| value(p as usize)).collect();
        if values.iter().any(|v| v.is_nan()) {
            return false;
        }
        if self.continuous {
            let lo = values.iter().copied().fold(f32::INFINITY, f32::min);
            let hi = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            self.criterion.intersects(lo, hi)
        } else {
            values.iter().all(|&v| self.criterion.accepts(v))
        }
    }
}

impl Algorithm for Threshold {
    fn execute(&self, input: &Dataset) -> Result<Dataset> {
        let array = input.attributes(self.association).get(&self.array).ok_or_else(|| {
            FilterError::MissingData(format!(
                "no {} array named '{}' to threshold",
                self.association, self.array
            ))
        })?;

        let kept: Vec<usize> = match self.association {
            Association::Cell => (0..input.n_cells())
                .filter(|&i| self.criterion.accepts(array.scalar(i)))
                .collect(),
            Association::Point => input
                .cells()
                .iter()
                .enumerate()
                .filter(|(_, cell)| self.cell_passes(cell, |p| array.scalar(p)))
                .map(|(i, _)| i)
                .collect(),
        };
        log::debug!(
            "threshold on '{}' ({:?}) kept {} of {} cells",
            self.array,
            self.criterion,
            kept.len(),
            input.n_cells()
        );
        Ok(extract_cells(input, kept))
    }
}
