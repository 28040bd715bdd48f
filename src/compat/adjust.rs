//! The field adjusters. Each one rewrites a [`Dataset`] in place and treats
//! missing source variables as nothing to do.

use std::collections::BTreeSet;

use super::names::*;
use crate::data::model::{DataArray, Dataset};
use crate::error::{CompatError, Result};

const GAUSSIAN_ACTIVATION_CENTER: &str = "gaussian_activation_center";
const GAUSSIAN_ACTIVATION_WIDTH: &str = "gaussian_activation_width";
const GAUSSIAN_ACTIVATION_SCALE: &str = "gaussian_activation_scale";
const GAUSSIAN_ACTIVATION_FUNCTION: &str = "gaussian_activation_function";
const GAUSSIAN_ACTIVATION_DISPERSION: &str = "gaussian_activation_dispersion";
const GAUSSIAN_ACTIVATION: &str = "gaussian_activation";
const GAUSSIAN_ACTIVATION_PART: &str = "gaussian_activation_part";

// ---------------------------------------------------------------------------
// IRF
// ---------------------------------------------------------------------------

/// Map the gaussian activation variables onto the legacy `irf*` names.
///
/// The gaussian sources are always kept: `cleanup` is accepted but only takes
/// effect once every irf aspect is converted, which is not yet the case.
pub fn activation_to_irf(ds: &mut Dataset, cleanup: bool) -> Result<()> {
    for (source, target) in [
        (GAUSSIAN_ACTIVATION_CENTER, IRF_CENTER),
        (GAUSSIAN_ACTIVATION_WIDTH, IRF_WIDTH),
        (GAUSSIAN_ACTIVATION_SCALE, IRF_SCALE),
    ] {
        let Some(array) = ds.get(source) else {
            continue;
        };
        let value = array
            .first_value()
            .ok_or_else(|| CompatError::EmptyVariable(source.to_string()))?;
        ds.insert(target, DataArray::scalar(value));
        log::debug!("{source} -> {target} = {value}");
    }

    if let Some(function) = ds.get(GAUSSIAN_ACTIVATION_FUNCTION).cloned() {
        let irf_nr: Vec<f64> = required_values(ds, GAUSSIAN_ACTIVATION)?
            .into_iter()
            .map(|nr| nr - 1.0)
            .collect();
        let time = required_values(ds, TIME)?;
        expect_shape(
            GAUSSIAN_ACTIVATION_FUNCTION,
            function.shape(),
            &[irf_nr.len(), time.len()],
        )?;

        ds.set_coord(IRF_NR, irf_nr)?;
        ds.set_coord(TIME, time)?;
        ds.insert(IRF, DataArray::new([IRF_NR, TIME], function.values().clone())?);
        log::debug!("{GAUSSIAN_ACTIVATION_FUNCTION} -> {IRF}");
    }

    if let Some(dispersion) = ds.get(GAUSSIAN_ACTIVATION_DISPERSION).cloned() {
        if dispersion.ndim() == 0 || dispersion.shape()[0] == 0 {
            return Err(CompatError::ShapeMismatch {
                name: GAUSSIAN_ACTIVATION_DISPERSION.to_string(),
                expected: "at least one entry along the first axis".to_string(),
                shape: dispersion.shape().to_vec(),
            });
        }
        let location = dispersion.index_axis0(0);
        let irf_nr = required_values(ds, GAUSSIAN_ACTIVATION_PART)?;
        let spectral = required_values(ds, SPECTRAL)?;
        expect_shape(
            GAUSSIAN_ACTIVATION_DISPERSION,
            location.shape(),
            &[irf_nr.len(), spectral.len()],
        )?;

        ds.set_coord(IRF_NR, irf_nr)?;
        ds.set_coord(SPECTRAL, spectral)?;
        ds.insert(IRF_CENTER_LOCATION, DataArray::new([IRF_NR, SPECTRAL], location)?);
        log::debug!("{GAUSSIAN_ACTIVATION_DISPERSION} -> {IRF_CENTER_LOCATION}");
    }

    if cleanup {
        log::debug!("keeping gaussian activation sources until all irf aspects convert");
    }
    Ok(())
}

fn required_values(ds: &Dataset, name: &str) -> Result<Vec<f64>> {
    ds.lookup_values(name)
        .ok_or_else(|| CompatError::MissingVariable(name.to_string()))
}

fn expect_shape(name: &str, shape: &[usize], expected: &[usize]) -> Result<()> {
    if shape == expected {
        return Ok(());
    }
    Err(CompatError::ShapeMismatch {
        name: name.to_string(),
        expected: format!("shape {expected:?}"),
        shape: shape.to_vec(),
    })
}

// ---------------------------------------------------------------------------
// Estimations / amplitudes
// ---------------------------------------------------------------------------

/// Rename estimation and amplitude variables to the legacy spectra names.
///
/// Kinetic estimations of shape `(activation, spectral, component)` are split
/// into one `decay_associated_spectra_mc{n}` per activation.
pub fn estimations_to_spectra(ds: &mut Dataset, cleanup: bool) -> Result<()> {
    let kinetic: Vec<String> = ds
        .variable_names()
        .into_iter()
        .filter(|name| is_kinetic_estimation(name))
        .collect();
    let mut written = BTreeSet::new();

    for source in kinetic {
        let Some(array) = ds.get(&source).cloned() else {
            continue;
        };
        if array.ndim() != 3 {
            return Err(CompatError::ShapeMismatch {
                name: source,
                expected: "3 axes (activation, spectral, component)".to_string(),
                shape: array.shape().to_vec(),
            });
        }
        if let Some(spectral) = ds.coord(SPECTRAL) {
            if array.shape()[1] != spectral.len() {
                return Err(CompatError::ShapeMismatch {
                    name: source,
                    expected: format!("{} entries along the spectral axis", spectral.len()),
                    shape: array.shape().to_vec(),
                });
            }
        }
        for activation in 0..array.shape()[0] {
            let target = decay_associated_spectra(activation);
            if !written.insert(target.clone()) {
                log::warn!("'{source}' overwrites '{target}' written by an earlier variable");
            }
            let slice = DataArray::new(
                [SPECTRAL.to_string(), component_dim(activation)],
                array.index_axis0(activation),
            )?;
            ds.insert(target.as_str(), slice);
            log::debug!("{source}[{activation}] -> {target}");
        }
        if cleanup {
            ds.remove(&source);
            log::debug!("dropped {source}");
        }
    }

    copy_matching(ds, is_species_estimation, SPECIES_ASSOCIATED_SPECTRA, cleanup);
    copy_matching(
        ds,
        is_damped_oscillation_estimation,
        DAMPED_OSCILLATION_ASSOCIATED_SPECTRA,
        cleanup,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Concentrations
// ---------------------------------------------------------------------------

pub fn concentrations(ds: &mut Dataset, cleanup: bool) {
    copy_matching(ds, is_species_concentration, SPECIES_CONCENTRATION, cleanup);
}

// ---------------------------------------------------------------------------
// Fitted data
// ---------------------------------------------------------------------------

pub fn fitted_data(ds: &mut Dataset, cleanup: bool) {
    let Some(fit) = ds.get(FIT).cloned() else {
        return;
    };
    ds.insert(FITTED_DATA, fit);
    log::debug!("{FIT} -> {FITTED_DATA}");
    if cleanup {
        ds.remove(FIT);
        log::debug!("dropped {FIT}");
    }
}

/// Copy every variable accepted by `matches` to `target`, in dataset order.
/// The last match wins. A variable already named `target` is left as is.
fn copy_matching(ds: &mut Dataset, matches: fn(&str) -> bool, target: &str, cleanup: bool) {
    let sources: Vec<String> = ds
        .variable_names()
        .into_iter()
        .filter(|name| name != target && matches(name))
        .collect();
    if let [.., last] = sources.as_slice() {
        if sources.len() > 1 {
            log::warn!(
                "{} variables map onto '{target}' ({}), keeping '{last}'",
                sources.len(),
                sources.join(", ")
            );
        }
    }

    for source in &sources {
        let Some(array) = ds.get(source).cloned() else {
            continue;
        };
        ds.insert(target, array);
        log::debug!("{source} -> {target}");
        if cleanup {
            ds.remove(source);
            log::debug!("dropped {source}");
        }
    }
}
