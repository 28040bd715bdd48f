//! Variable-name rules shared by the adjusters.
//!
//! Matching is substring based and case sensitive, so prefixed names such as
//! `dataset1_species_associated_estimation` qualify as well.

pub const IRF_CENTER: &str = "irf_center";
pub const IRF_WIDTH: &str = "irf_width";
pub const IRF_SCALE: &str = "irf_scale";
pub const IRF: &str = "irf";
pub const IRF_CENTER_LOCATION: &str = "irf_center_location";
pub const IRF_NR: &str = "irf_nr";

pub const SPECIES_ASSOCIATED_SPECTRA: &str = "species_associated_spectra";
pub const DAMPED_OSCILLATION_ASSOCIATED_SPECTRA: &str = "damped_oscillation_associated_spectra";
pub const SPECIES_CONCENTRATION: &str = "species_concentration";
pub const FIT: &str = "fit";
pub const FITTED_DATA: &str = "fitted_data";

pub const TIME: &str = "time";
pub const SPECTRAL: &str = "spectral";

pub const RMSE_ATTR: &str = "root_mean_square_error";
pub const WEIGHTED_RMSE_ATTR: &str = "weighted_root_mean_square_error";

/// Legacy name of the `n`-th (0-based) decay associated spectra slice.
pub fn decay_associated_spectra(n: usize) -> String {
    format!("decay_associated_spectra_mc{}", n + 1)
}

/// Component dimension of the `n`-th (0-based) decay associated spectra slice.
pub fn component_dim(n: usize) -> String {
    format!("component_mc{}", n + 1)
}

pub fn is_kinetic_estimation(name: &str) -> bool {
    name.contains("kinetic_associated_estimation") || name.contains("kinetic_associated_amplitude")
}

pub fn is_species_estimation(name: &str) -> bool {
    name.contains("species_associated_estimation") || name.contains("species_associated_amplitude")
}

pub fn is_damped_oscillation_estimation(name: &str) -> bool {
    name.contains("damped_oscillation_associated_estimation")
        || name.contains("damped_oscillation_associated_amplitude")
}

pub fn is_species_concentration(name: &str) -> bool {
    name.contains("species_associated_concentration") || name.contains("species_concentration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_names_are_one_based() {
        assert_eq!(decay_associated_spectra(0), "decay_associated_spectra_mc1");
        assert_eq!(component_dim(1), "component_mc2");
    }

    #[test]
    fn kinetic_predicate() {
        assert!(is_kinetic_estimation("kinetic_associated_estimation"));
        assert!(is_kinetic_estimation("megacomplex_kinetic_associated_amplitude"));
        assert!(!is_kinetic_estimation("Kinetic_Associated_Estimation"));
        assert!(!is_kinetic_estimation("decay_associated_spectra_mc1"));
    }

    #[test]
    fn species_and_oscillation_predicates() {
        assert!(is_species_estimation("species_associated_estimation"));
        assert!(is_species_estimation("species_associated_amplitude_mc2"));
        assert!(!is_species_estimation(SPECIES_ASSOCIATED_SPECTRA));
        assert!(is_damped_oscillation_estimation("damped_oscillation_associated_estimation"));
        assert!(is_damped_oscillation_estimation("damped_oscillation_associated_amplitude"));
        assert!(!is_damped_oscillation_estimation("damped_oscillation_phase"));
    }

    #[test]
    fn concentration_predicate_matches_its_own_target() {
        assert!(is_species_concentration("species_associated_concentration"));
        assert!(is_species_concentration("species_associated_concentration_mc1"));
        assert!(is_species_concentration(SPECIES_CONCENTRATION));
        assert!(!is_species_concentration("species_associated_spectra"));
    }
}
