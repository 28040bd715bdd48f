//! Conversion of new-style result datasets to the legacy layout expected by
//! plotting tools.
//!
//! ```text
//!   convert ──┬── Result ──► convert_result ──► convert_dataset (per label)
//!             └── Dataset ─────────────────────► convert_dataset
//!
//!   convert_dataset: clone → irf → spectra → concentrations → fitted data → attrs
//! ```

pub mod adjust;
pub mod names;

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::data::model::{Convertible, Dataset, ResultContainer};
use crate::error::Result;

/// Convert a dataset or a result, whichever `input` holds.
pub fn convert(input: &Convertible, cleanup: bool) -> Result<Convertible> {
    Ok(match input {
        Convertible::Result(result) => Convertible::Result(convert_result(result, cleanup)?),
        Convertible::Dataset(ds) => Convertible::Dataset(convert_dataset(ds, cleanup)?),
    })
}

/// Convert an untyped JSON document.
///
/// Fails with [`CompatError::InvalidInput`](crate::CompatError::InvalidInput)
/// unless the document is a dataset or a result.
pub fn convert_value(value: JsonValue, cleanup: bool) -> Result<JsonValue> {
    let input = Convertible::from_value(value)?;
    convert(&input, cleanup)?.to_value()
}

/// Convert one dataset. `dataset` itself is left untouched; the adjusters
/// work on a deep copy which is returned.
pub fn convert_dataset(dataset: &Dataset, cleanup: bool) -> Result<Dataset> {
    let mut converted = dataset.clone();

    adjust::activation_to_irf(&mut converted, cleanup)?;
    adjust::estimations_to_spectra(&mut converted, cleanup)?;
    adjust::concentrations(&mut converted, cleanup);
    adjust::fitted_data(&mut converted, cleanup);

    if !converted.attrs.contains_key(names::WEIGHTED_RMSE_ATTR) {
        if let Some(rmse) = converted.attrs.get(names::RMSE_ATTR).cloned() {
            converted.attrs.insert(names::WEIGHTED_RMSE_ATTR.to_string(), rmse);
        }
    }

    log::debug!(
        "converted dataset: {} -> {} variables",
        dataset.len(),
        converted.len()
    );
    Ok(converted)
}

/// Convert every dataset of `result`. The returned container shares the
/// parameter collection of `result`.
pub fn convert_result(result: &ResultContainer, cleanup: bool) -> Result<ResultContainer> {
    let datasets = result
        .datasets
        .iter()
        .map(|(label, ds)| {
            let converted = convert_dataset(ds, cleanup)?;
            log::debug!("converted dataset '{label}'");
            Ok((label.clone(), converted))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;
    let converted = result.with_datasets(datasets);

    log::info!("converted result with {} datasets", converted.datasets.len());
    Ok(converted)
}
