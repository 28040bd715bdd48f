//! Serializable mirror types for the data model.
//!
//! `ndarray` values are stored as an explicit `shape` plus row-major `data`
//! so documents stay readable and independent of the array crate's own
//! serde layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::model::{AttrValue, Convertible, DataArray, Dataset};
use crate::error::{CompatError, Result};

// ---------- Serializable mirror types ----------

/// Serializable version of one named [`DataArray`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDoc {
    pub name: String,
    #[serde(default)]
    pub dims: Vec<String>,
    #[serde(default)]
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

/// Serializable version of [`Dataset`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDoc {
    pub data_vars: Vec<VariableDoc>,
    #[serde(default)]
    pub coords: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    pub attrs: BTreeMap<String, AttrValue>,
}

impl From<Dataset> for DatasetDoc {
    fn from(ds: Dataset) -> Self {
        let data_vars = ds
            .variables
            .into_iter()
            .map(|(name, array)| VariableDoc {
                name,
                dims: array.dims().to_vec(),
                shape: array.shape().to_vec(),
                data: array.flattened(),
            })
            .collect();
        DatasetDoc {
            data_vars,
            coords: ds.coords,
            attrs: ds.attrs,
        }
    }
}

impl TryFrom<DatasetDoc> for Dataset {
    type Error = CompatError;

    fn try_from(doc: DatasetDoc) -> Result<Self> {
        let mut ds = Dataset::new();
        for var in doc.data_vars {
            let array = DataArray::from_shape_vec(var.dims, &var.shape, var.data)?;
            ds.insert(var.name, array);
        }
        ds.coords = doc.coords;
        ds.attrs = doc.attrs;
        Ok(ds)
    }
}

// ---------- Untyped documents ----------

impl Convertible {
    /// Sniff an untyped JSON document.
    ///
    /// A top-level `datasets` key marks a result, `data_vars` marks a single
    /// dataset; anything else is rejected with [`CompatError::InvalidInput`].
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let kind = match &value {
            JsonValue::Object(map) if map.contains_key("datasets") => Kind::Result,
            JsonValue::Object(map) if map.contains_key("data_vars") => Kind::Dataset,
            _ => return Err(CompatError::InvalidInput),
        };
        Ok(match kind {
            Kind::Result => Convertible::Result(serde_json::from_value(value)?),
            Kind::Dataset => Convertible::Dataset(serde_json::from_value(value)?),
        })
    }

    pub fn to_value(&self) -> Result<JsonValue> {
        let value = match self {
            Convertible::Dataset(ds) => serde_json::to_value(ds)?,
            Convertible::Result(result) => serde_json::to_value(result)?,
        };
        Ok(value)
    }
}

enum Kind {
    Dataset,
    Result,
}
