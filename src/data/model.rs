use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use ndarray::{ArrayD, Axis, IxDyn};
use serde::{Deserialize, Serialize};

use super::document::DatasetDoc;
use crate::error::{CompatError, Result};

// ---------------------------------------------------------------------------
// AttrValue – a single dataset attribute
// ---------------------------------------------------------------------------

/// A dynamically-typed attribute value, as found in NetCDF-style metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Null,
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => write!(f, "{s}"),
            AttrValue::Integer(i) => write!(f, "{i}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Null => write!(f, "<null>"),
        }
    }
}

impl AttrValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            AttrValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// DataArray – one labeled n-dimensional variable
// ---------------------------------------------------------------------------

/// An n-dimensional array of values with one name per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    dims: Vec<String>,
    values: ArrayD<f64>,
}

impl DataArray {
    /// Attach dimension names to `values`; one name per axis is required.
    pub fn new<S: Into<String>>(
        dims: impl IntoIterator<Item = S>,
        values: ArrayD<f64>,
    ) -> Result<Self> {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != values.ndim() {
            return Err(CompatError::DimensionMismatch {
                dims: dims.len(),
                ndim: values.ndim(),
            });
        }
        Ok(DataArray { dims, values })
    }

    /// Build from row-major `data` laid out as `shape`.
    pub fn from_shape_vec<S: Into<String>>(
        dims: impl IntoIterator<Item = S>,
        shape: &[usize],
        data: Vec<f64>,
    ) -> Result<Self> {
        let values = ArrayD::from_shape_vec(IxDyn(shape), data)?;
        Self::new(dims, values)
    }

    /// A zero-dimensional array holding one value.
    pub fn scalar(value: f64) -> Self {
        DataArray {
            dims: Vec::new(),
            values: ArrayD::from_elem(IxDyn(&[]), value),
        }
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    /// First element of the row-major flattened values.
    pub fn first_value(&self) -> Option<f64> {
        self.values.iter().next().copied()
    }

    /// Values in row-major order.
    pub fn flattened(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Owned sub-array at `index` along the leading axis.
    ///
    /// Panics if the array is zero-dimensional or `index` is out of bounds;
    /// callers check the shape first.
    pub fn index_axis0(&self, index: usize) -> ArrayD<f64> {
        self.values.index_axis(Axis(0), index).to_owned()
    }
}

// ---------------------------------------------------------------------------
// Dataset – variables, coordinates and attributes
// ---------------------------------------------------------------------------

/// A collection of named data variables sharing 1-D coordinates.
///
/// Variables keep insertion order; replacing an existing variable keeps its
/// position. `Clone` produces a fully independent deep copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetDoc", into = "DatasetDoc")]
pub struct Dataset {
    pub(crate) variables: Vec<(String, DataArray)>,
    pub(crate) coords: BTreeMap<String, Vec<f64>>,
    /// Scalar metadata.
    pub attrs: BTreeMap<String, AttrValue>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a data variable (not a coordinate) named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.position(name).map(|i| &self.variables[i].1)
    }

    /// Insert or replace a data variable.
    pub fn insert(&mut self, name: impl Into<String>, array: DataArray) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.variables[i].1 = array,
            None => self.variables.push((name, array)),
        }
    }

    /// Remove a data variable, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<DataArray> {
        self.position(name).map(|i| self.variables.remove(i).1)
    }

    /// Data variable names in dataset order.
    pub fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &DataArray)> {
        self.variables.iter().map(|(name, array)| (name.as_str(), array))
    }

    /// Number of data variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn coord(&self, name: &str) -> Option<&[f64]> {
        self.coords.get(name).map(Vec::as_slice)
    }

    pub fn coords(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.coords
    }

    /// Attach a coordinate. Re-setting identical values is a no-op; differing
    /// values under an existing name fail with `CoordinateConflict`.
    pub fn set_coord(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        match self.coords.get(&name) {
            Some(existing) if *existing != values => Err(CompatError::CoordinateConflict(name)),
            Some(_) => Ok(()),
            None => {
                self.coords.insert(name, values);
                Ok(())
            }
        }
    }

    /// Values of a coordinate, or else of a data variable, flattened.
    pub fn lookup_values(&self, name: &str) -> Option<Vec<f64>> {
        self.coord(name)
            .map(<[f64]>::to_vec)
            .or_else(|| self.get(name).map(DataArray::flattened))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|(n, _)| n == name)
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

fn default_vary() -> bool {
    true
}

/// One fitted model parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub standard_error: Option<f64>,
    #[serde(default = "default_vary")]
    pub vary: bool,
}

/// The fitted parameters of an optimization. Conversion never touches them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterCollection {
    parameters: Vec<Parameter>,
}

impl ParameterCollection {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        ParameterCollection { parameters }
    }

    pub fn get(&self, label: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ResultContainer – labeled datasets plus parameters
// ---------------------------------------------------------------------------

/// The outcome of a fit: one dataset per label and the shared parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultContainer {
    pub datasets: BTreeMap<String, Dataset>,
    #[serde(default)]
    pub parameters: Arc<ParameterCollection>,
}

impl ResultContainer {
    pub fn new(datasets: BTreeMap<String, Dataset>, parameters: ParameterCollection) -> Self {
        ResultContainer {
            datasets,
            parameters: Arc::new(parameters),
        }
    }

    /// A new container sharing this one's parameters around `datasets`.
    pub fn with_datasets(&self, datasets: BTreeMap<String, Dataset>) -> Self {
        ResultContainer {
            datasets,
            parameters: Arc::clone(&self.parameters),
        }
    }
}

// ---------------------------------------------------------------------------
// Convertible – anything the dispatcher accepts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Convertible {
    Dataset(Dataset),
    Result(ResultContainer),
}

impl From<Dataset> for Convertible {
    fn from(ds: Dataset) -> Self {
        Convertible::Dataset(ds)
    }
}

impl From<ResultContainer> for Convertible {
    fn from(result: ResultContainer) -> Self {
        Convertible::Result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn data_array_rejects_wrong_dim_count() {
        let err = DataArray::new(["time"], arr2(&[[1.0, 2.0]]).into_dyn()).unwrap_err();
        assert!(matches!(err, CompatError::DimensionMismatch { dims: 1, ndim: 2 }));
    }

    #[test]
    fn first_value_is_row_major() {
        let arr = DataArray::new(["a", "b"], arr2(&[[7.0, 8.0], [9.0, 10.0]]).into_dyn()).unwrap();
        assert_eq!(arr.first_value(), Some(7.0));
        assert_eq!(arr.flattened(), vec![7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut ds = Dataset::new();
        ds.insert("a", DataArray::scalar(1.0));
        ds.insert("b", DataArray::scalar(2.0));
        ds.insert("a", DataArray::scalar(3.0));
        assert_eq!(ds.variable_names(), vec!["a", "b"]);
        assert_eq!(ds.get("a").and_then(DataArray::first_value), Some(3.0));
    }

    #[test]
    fn set_coord_detects_conflicts() {
        let mut ds = Dataset::new();
        ds.set_coord("irf_nr", vec![0.0]).unwrap();
        ds.set_coord("irf_nr", vec![0.0]).unwrap();
        assert!(matches!(
            ds.set_coord("irf_nr", vec![1.0]),
            Err(CompatError::CoordinateConflict(_))
        ));
    }

    #[test]
    fn lookup_prefers_coordinates() {
        let mut ds = Dataset::new();
        ds.insert("x", DataArray::scalar(5.0));
        assert_eq!(ds.lookup_values("x"), Some(vec![5.0]));
        ds.set_coord("x", vec![1.0, 2.0]).unwrap();
        assert_eq!(ds.lookup_values("x"), Some(vec![1.0, 2.0]));
        assert_eq!(ds.lookup_values("missing"), None);
    }

    #[test]
    fn attr_display_and_numeric() {
        assert_eq!(AttrValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(AttrValue::from("x").as_f64(), None);
        assert_eq!(AttrValue::Null.to_string(), "<null>");
    }
}
