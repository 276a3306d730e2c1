//! Data arrays attached to dataset points and cells.
//!
//! A [`DataArray`] is a named, flat array of `f32` tuples. An [`AttributeData`]
//! collection holds the arrays of one association (points or cells) together
//! with two designations by name: the active scalars and, for point data, the
//! active texture coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// Whether an array's values belong to mesh points or mesh cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Association {
    /// One tuple per point.
    #[default]
    Point,
    /// One tuple per cell.
    Cell,
}

impl Association {
    /// Returns the other association.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Point => Self::Cell,
            Self::Cell => Self::Point,
        }
    }
}

impl FromStr for Association {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "point" => Ok(Self::Point),
            "cell" => Ok(Self::Cell),
            _ => Err(FilterError::InvalidArgument(format!(
                "association '{s}' not understood, expected 'point' or 'cell'"
            ))),
        }
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => f.write_str("point"),
            Self::Cell => f.write_str("cell"),
        }
    }
}

/// A named array of fixed-width `f32` tuples.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    name: String,
    num_components: usize,
    values: Vec<f32>,
}

impl DataArray {
    /// Creates a single-component (scalar) array.
    pub fn scalars(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            num_components: 1,
            values,
        }
    }

    /// Creates a two-component array from `[u, v]` pairs.
    pub fn from_vec2(name: impl Into<String>, values: &[[f32; 2]]) -> Self {
        Self {
            name: name.into(),
            num_components: 2,
            values: values.iter().flatten().copied().collect(),
        }
    }

    /// Creates a three-component array from `[x, y, z]` triples.
    pub fn from_vec3(name: impl Into<String>, values: &[[f32; 3]]) -> Self {
        Self {
            name: name.into(),
            num_components: 3,
            values: values.iter().flatten().copied().collect(),
        }
    }

    /// Creates an array with an arbitrary number of components.
    ///
    /// `values.len()` must be a multiple of `num_components`.
    pub fn with_components(
        name: impl Into<String>,
        num_components: usize,
        values: Vec<f32>,
    ) -> Result<Self> {
        if num_components == 0 {
            return Err(FilterError::InvalidArgument(
                "data arrays need at least one component".to_string(),
            ));
        }
        if values.len() % num_components != 0 {
            return Err(FilterError::SizeMismatch {
                expected: values.len().next_multiple_of(num_components),
                actual: values.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            num_components,
            values,
        })
    }

    /// Creates an empty array with the same name and width as `self`.
    #[must_use]
    pub fn empty_like(&self) -> Self {
        Self {
            name: self.name.clone(),
            num_components: self.num_components,
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Returns the number of tuples.
    pub fn len(&self) -> usize {
        self.values.len() / self.num_components
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the flat value buffer.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns tuple `i`.
    pub fn tuple(&self, i: usize) -> &[f32] {
        let n = self.num_components;
        &self.values[i * n..(i + 1) * n]
    }

    /// Returns the scalar value of tuple `i`.
    ///
    /// This is the value itself for one-component arrays and the tuple
    /// magnitude otherwise.
    pub fn scalar(&self, i: usize) -> f32 {
        let tuple = self.tuple(i);
        if let [value] = tuple {
            *value
        } else {
            tuple.iter().map(|c| c * c).sum::<f32>().sqrt()
        }
    }

    /// Returns the NaN-ignoring `(min, max)` of the scalar values.
    ///
    /// Returns `None` when the array holds no non-NaN value.
    pub fn range(&self) -> Option<(f32, f32)> {
        (0..self.len())
            .map(|i| self.scalar(i))
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Appends a tuple.
    pub(crate) fn push_tuple(&mut self, tuple: &[f32]) {
        debug_assert_eq!(tuple.len(), self.num_components);
        self.values.extend_from_slice(tuple);
    }

    /// Appends `lerp(tuple a, tuple b, t)` taken from `src`.
    pub(crate) fn push_lerp(&mut self, src: &DataArray, a: usize, b: usize, t: f32) {
        let n = self.num_components;
        for c in 0..n {
            let va = src.values[a * n + c];
            let vb = src.values[b * n + c];
            self.values.push(va + t * (vb - va));
        }
    }
}

/// The arrays of one association plus their designations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeData {
    arrays: Vec<DataArray>,
    active_scalars: Option<String>,
    active_tcoords: Option<String>,
}

impl AttributeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of arrays.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Adds an array, replacing (in place) any array with the same name.
    pub fn add_array(&mut self, array: DataArray) {
        if let Some(existing) = self.arrays.iter_mut().find(|a| a.name == array.name) {
            *existing = array;
        } else {
            self.arrays.push(array);
        }
    }

    /// Gets an array by name.
    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes an array by name, clearing any designation that referenced it.
    pub fn remove(&mut self, name: &str) -> Option<DataArray> {
        let idx = self.arrays.iter().position(|a| a.name == name)?;
        if self.active_scalars.as_deref() == Some(name) {
            self.active_scalars = None;
        }
        if self.active_tcoords.as_deref() == Some(name) {
            self.active_tcoords = None;
        }
        Some(self.arrays.remove(idx))
    }

    /// Iterates over the arrays in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DataArray> {
        self.arrays.iter()
    }

    /// Returns the array names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.arrays.iter().map(DataArray::name).collect()
    }

    /// Returns the name of the active scalar array.
    pub fn active_scalars_name(&self) -> Option<&str> {
        self.active_scalars.as_deref()
    }

    /// Returns the active scalar array.
    pub fn active_scalars(&self) -> Option<&DataArray> {
        self.get(self.active_scalars.as_deref()?)
    }

    /// Designates an existing array as the active scalars.
    pub fn set_active_scalars(&mut self, name: &str) -> Result<()> {
        if !self.contains(name) {
            return Err(FilterError::MissingData(format!(
                "cannot activate scalars '{name}': no such array"
            )));
        }
        self.active_scalars = Some(name.to_string());
        Ok(())
    }

    pub fn clear_active_scalars(&mut self) {
        self.active_scalars = None;
    }

    /// Returns the name of the texture-coordinate array.
    pub fn tcoords_name(&self) -> Option<&str> {
        self.active_tcoords.as_deref()
    }

    /// Returns the texture-coordinate array.
    pub fn tcoords(&self) -> Option<&DataArray> {
        self.get(self.active_tcoords.as_deref()?)
    }

    /// Installs `array` as the texture coordinates.
    ///
    /// The previous texture-coordinate array stays in the collection as an
    /// ordinary array unless it has the same name as `array`.
    pub fn install_tcoords(&mut self, array: DataArray) {
        let name = array.name.clone();
        self.add_array(array);
        self.active_tcoords = Some(name);
    }

    /// Creates a collection with the same array layout and designations but no values.
    #[must_use]
    pub fn empty_like(&self) -> Self {
        Self {
            arrays: self.arrays.iter().map(DataArray::empty_like).collect(),
            active_scalars: self.active_scalars.clone(),
            active_tcoords: self.active_tcoords.clone(),
        }
    }

    /// Appends tuple `i` of every array in `src`.
    ///
    /// `self` must have been created with [`AttributeData::empty_like`] from `src`.
    pub(crate) fn push_from(&mut self, src: &AttributeData, i: usize) {
        for (dst, src) in self.arrays.iter_mut().zip(&src.arrays) {
            dst.push_tuple(src.tuple(i));
        }
    }

    /// Appends the interpolation between tuples `a` and `b` of every array in `src`.
    pub(crate) fn push_lerp(&mut self, src: &AttributeData, a: usize, b: usize, t: f32) {
        for (dst, src) in self.arrays.iter_mut().zip(&src.arrays) {
            dst.push_lerp(src, a, b, t);
        }
    }

    /// Appends all tuples of the same-named arrays of `src`.
    ///
    /// Arrays missing from `src` (or differing in width) are left as they are;
    /// callers restrict both sides to a shared layout first.
    pub(crate) fn extend_from(&mut self, src: &AttributeData) {
        for dst in &mut self.arrays {
            if let Some(src) = src.get(&dst.name) {
                if src.num_components == dst.num_components {
                    dst.values.extend_from_slice(&src.values);
                }
            }
        }
    }

    /// Keeps only the arrays `keep` accepts, dropping designations that no
    /// longer reference an array.
    pub(crate) fn retain_arrays(&mut self, mut keep: impl FnMut(&DataArray) -> bool) {
        self.arrays.retain(|a| keep(a));
        if let Some(name) = self.active_scalars.clone() {
            if !self.contains(&name) {
                self.active_scalars = None;
            }
        }
        if let Some(name) = self.active_tcoords.clone() {
            if !self.contains(&name) {
                self.active_tcoords = None;
            }
        }
    }
}
