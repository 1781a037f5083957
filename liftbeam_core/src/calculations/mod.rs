//! # Three-Beam Calculation
//!
//! The calculation pipeline for a three-beam machine support:
//!
//! 1. Structure-level loads ([`crate::loads`])
//! 2. Per-beam analysis ([`beam_analysis`])
//! 3. Governing required section modulus
//! 4. Catalog classification ([`steel_selection`])
//!
//! [`calculate`] is a pure function of the input, the catalog and the design
//! factors. Running it twice on the same input gives the same result.
//!
//! ## Example
//!
//! ```rust,no_run
//! use liftbeam_core::calculations::calculate;
//! use liftbeam_core::materials::builtin_catalog;
//! use liftbeam_core::structure::StructureInput;
//!
//! let json = std::fs::read_to_string("structure.json").unwrap();
//! let input: StructureInput = serde_json::from_str(&json).unwrap();
//!
//! let result = calculate(&input, builtin_catalog()).unwrap();
//! if let Some(section) = result.lightest_acceptable() {
//!     println!("Use {}", section.steel_label);
//! }
//! ```

pub mod beam_analysis;
pub mod steel_selection;

use serde::{Deserialize, Serialize};

use crate::design_factors::DesignFactors;
use crate::errors::CalcResult;
use crate::loads::StructureLoads;
use crate::materials::steel::SteelCatalog;
use crate::structure::StructureInput;

pub use beam_analysis::{BeamResult, BendingMoments, LoadPoint, Reactions};
pub use steel_selection::{SteelSelection, SteelStatus};

/// Results of a three-beam calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeBeamResult {
    /// Sum of all suspended weights (lb)
    pub gross_total_live_load: f64,

    /// Rope load on the machine (lb)
    pub total_live_load: f64,

    /// Machinery, slab, block-up and beam own weights (lb)
    pub total_dead_load: f64,

    /// Floor slab weight (lb)
    pub floor_slab_weight: f64,

    /// Per-beam results, in input order
    pub beams: Vec<BeamResult>,

    /// Largest required section modulus over the beams (in³)
    pub maximum_required_section_modulus: f64,

    /// Every catalog section with its checks, in catalog order
    pub steel_library_members: Vec<SteelSelection>,
}

impl ThreeBeamResult {
    /// Sections whose overall status is Yes or Borderline, in catalog order
    pub fn acceptable_sections(&self) -> Vec<&SteelSelection> {
        self.steel_library_members
            .iter()
            .filter(|s| s.is_acceptable())
            .collect()
    }

    /// Lightest acceptable section by weight per unit length.
    ///
    /// Ties go to the section listed first in the catalog.
    pub fn lightest_acceptable(&self) -> Option<&SteelSelection> {
        self.steel_library_members
            .iter()
            .filter(|s| s.is_acceptable())
            .fold(None, |lightest: Option<&SteelSelection>, s| match lightest {
                Some(l) if weight(l) <= weight(s) => Some(l),
                _ => Some(s),
            })
    }

    /// Beam whose required section modulus governs (first wins on ties)
    pub fn governing_beam(&self) -> Option<&BeamResult> {
        self.beams
            .iter()
            .find(|b| b.required_section_modulus == self.maximum_required_section_modulus)
    }
}

fn weight(section: &SteelSelection) -> f64 {
    section.steel_meta.shape.weight_per_unit_length
}

/// Run the full calculation with the default design factors.
///
/// # Errors
///
/// * `CalcError::InvalidInput` - the input fails validation
/// * `CalcError::CalculationFailed` - a beam's moment reference point cannot be found
pub fn calculate(
    input: &StructureInput,
    catalog: &SteelCatalog,
) -> CalcResult<ThreeBeamResult> {
    calculate_with_factors(input, catalog, &DesignFactors::default())
}

/// Run the full calculation with job-specific design factors.
pub fn calculate_with_factors(
    input: &StructureInput,
    catalog: &SteelCatalog,
    factors: &DesignFactors,
) -> CalcResult<ThreeBeamResult> {
    factors.validate()?;
    input.validate()?;

    let loads = StructureLoads::from_input(input, factors);

    let beams = input
        .beams
        .iter()
        .map(|beam| beam_analysis::analyze_beam(beam, input, &loads, factors))
        .collect::<CalcResult<Vec<_>>>()?;

    let maximum_required_section_modulus =
        steel_selection::maximum_required_section_modulus(&beams);
    let steel_library_members = steel_selection::classify_catalog(
        catalog,
        &beams,
        maximum_required_section_modulus,
        factors,
    );

    let result = ThreeBeamResult {
        gross_total_live_load: loads.gross_total_live_load,
        total_live_load: loads.total_live_load,
        total_dead_load: loads.total_dead_load,
        floor_slab_weight: loads.floor_slab_weight,
        beams,
        maximum_required_section_modulus,
        steel_library_members,
    };

    tracing::info!(
        label = %input.label,
        maximum_required_section_modulus,
        sections = result.steel_library_members.len(),
        acceptable = result.acceptable_sections().len(),
        "three-beam calculation complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::materials::steel::{builtin_catalog, SteelSection};
    use crate::structure::tests::sample_input;

    fn entry(label: &str, zu: f64, i: f64, weight: f64) -> SteelSection {
        SteelSection {
            label: label.to_string(),
            section_modulus: zu,
            moment_of_inertia: i,
            shape: "W".to_string(),
            height: 8.0,
            weight_per_unit_length: weight,
        }
    }

    #[test]
    fn test_calculate_sample() {
        let result = calculate(&sample_input(), builtin_catalog()).unwrap();

        assert_eq!(result.gross_total_live_load, 7850.0);
        assert!((result.total_live_load - 15_700.0).abs() < 1e-9);
        assert_eq!(result.beams.len(), 3);
        assert!((result.maximum_required_section_modulus - 172_000.0 / 19_300.0).abs() < 1e-9);
        assert_eq!(result.steel_library_members.len(), builtin_catalog().len());
    }

    #[test]
    fn test_governing_beam_first_wins() {
        let result = calculate(&sample_input(), builtin_catalog()).unwrap();
        let governing = result.governing_beam().unwrap();
        // beams 1 and 2 are identical
        assert_eq!(governing.beam_index.number(), 1);
    }

    #[test]
    fn test_lightest_acceptable() {
        let catalog = SteelCatalog::from_sections(vec![
            entry("HEAVY", 40.0, 300.0, 40.0),
            entry("WEAK", 5.0, 10.0, 9.0),
            entry("LIGHT_A", 20.0, 150.0, 18.0),
            entry("LIGHT_B", 25.0, 200.0, 18.0),
        ])
        .unwrap();
        let result = calculate(&sample_input(), &catalog).unwrap();

        let acceptable: Vec<&str> = result
            .acceptable_sections()
            .iter()
            .map(|s| s.steel_label.as_str())
            .collect();
        assert_eq!(acceptable, vec!["HEAVY", "LIGHT_A", "LIGHT_B"]);
        assert_eq!(result.lightest_acceptable().unwrap().steel_label, "LIGHT_A");
    }

    #[test]
    fn test_empty_catalog() {
        let result = calculate(&sample_input(), &SteelCatalog::new()).unwrap();
        assert!(result.steel_library_members.is_empty());
        assert!(result.lightest_acceptable().is_none());
        assert!(result.maximum_required_section_modulus > 0.0);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut input = sample_input();
        input.beams.pop();
        let err = calculate(&input, builtin_catalog()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_invalid_factors_rejected() {
        let factors = DesignFactors::default().with_borderline_band(1.0, 0.9);
        let err =
            calculate_with_factors(&sample_input(), builtin_catalog(), &factors).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_public_sample_calculates() {
        let result = calculate(&StructureInput::sample(), builtin_catalog()).unwrap();
        assert_eq!(result.beams.len(), 3);
        assert!(result.lightest_acceptable().is_some());
    }

    #[test]
    fn test_factors_scale_required_modulus() {
        let input = StructureInput::sample();
        let base = calculate(&input, builtin_catalog()).unwrap();

        let defaults = DesignFactors::default();
        let factors = DesignFactors {
            zu_factor_new_beams: defaults.zu_factor_new_beams / 2.0,
            ..defaults
        };
        let halved = calculate_with_factors(&input, builtin_catalog(), &factors).unwrap();
        let expected = base.maximum_required_section_modulus * 2.0;
        assert!((halved.maximum_required_section_modulus - expected).abs() < 1e-9);
    }

    #[test]
    fn test_factors_default_from_empty_json() {
        let factors: DesignFactors = serde_json::from_str("{}").unwrap();
        assert_eq!(factors, DesignFactors::default());
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&sample_input(), builtin_catalog()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"steel_library_members\""));
        assert!(json.contains("\"maximum_required_section_modulus\""));

        let roundtrip: ThreeBeamResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.beams.len(), 3);
    }
}
