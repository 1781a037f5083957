//! # Design Factors
//!
//! Numeric constants used by the three-beam calculation, grouped into a single
//! serializable struct so a job can load (and override) them from JSON.
//!
//! ## Factor Summary
//!
//! | Factor                         | Default     | Used in                      |
//! |--------------------------------|-------------|------------------------------|
//! | Arc of contact divisor         | 180         | Point live load              |
//! | Maximum deflection divisor     | 1666        | Allowable deflection L/1666  |
//! | Zu divisor, new beams          | 19,300      | Required section modulus     |
//! | Zu divisor, existing beams     | 17,600      | Required section modulus     |
//! | Inches per foot                | 12          | Floor slab weight            |
//! | Slab unit weight               | 11.5        | Floor slab weight            |
//! | Spacing ratio, beams 1 and 2   | 0.8         | Point live load              |
//! | Spacing ratio, beam 3          | 0.2         | Point live load              |
//! | Modulus of elasticity E (psi)  | 29,000,000  | Point deflection             |
//! | Borderline band                | (0.9, 1.0)  | Status classification        |

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::structure::BeamType;

/// Constants applied by the load, beam and steel calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignFactors {
    /// Divisor converting the arc of contact (degrees) to a load share
    pub arc_of_contact_factor: f64,

    /// Allowable deflection is span / this factor
    pub max_deflection_factor: f64,

    /// Allowable bending stress divisor for new beams (psi)
    pub zu_factor_new_beams: f64,

    /// Allowable bending stress divisor for existing beams (psi)
    pub zu_factor_existing_beams: f64,

    /// Inches per foot
    pub inch_to_feet: f64,

    /// Slab weight per square foot per inch of thickness (psf/in)
    pub slab_unit_weight: f64,

    /// Live-load spacing ratio for beams 1 and 2
    pub spacing_ratio_beams_1_2: f64,

    /// Live-load spacing ratio for beam 3
    pub spacing_ratio_beam_3: f64,

    /// Modulus of elasticity of steel (psi)
    pub modulus_of_elasticity_psi: f64,

    /// Lower bound (exclusive) of the borderline band on required/allowed
    pub borderline_lower_limit: f64,

    /// Upper bound (exclusive) of the borderline band on required/allowed
    pub borderline_upper_limit: f64,
}

impl Default for DesignFactors {
    fn default() -> Self {
        Self {
            arc_of_contact_factor: 180.0,
            max_deflection_factor: 1666.0,
            zu_factor_new_beams: 19_300.0,
            zu_factor_existing_beams: 17_600.0,
            inch_to_feet: 12.0,
            slab_unit_weight: 11.5,
            spacing_ratio_beams_1_2: 0.8,
            spacing_ratio_beam_3: 0.2,
            modulus_of_elasticity_psi: 29_000_000.0,
            borderline_lower_limit: 0.9,
            borderline_upper_limit: 1.0,
        }
    }
}

impl DesignFactors {
    /// Create the standard factors
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the modulus of elasticity (psi)
    pub fn with_modulus_of_elasticity(mut self, e_psi: f64) -> Self {
        self.modulus_of_elasticity_psi = e_psi;
        self
    }

    /// Set the borderline band on the required/allowed ratio
    pub fn with_borderline_band(mut self, lower: f64, upper: f64) -> Self {
        self.borderline_lower_limit = lower;
        self.borderline_upper_limit = upper;
        self
    }

    /// Section modulus divisor for the given beam type
    pub fn zu_factor(&self, beam_type: BeamType) -> f64 {
        match beam_type {
            BeamType::New => self.zu_factor_new_beams,
            BeamType::Existing => self.zu_factor_existing_beams,
        }
    }

    /// Validate that every divisor is positive and the borderline band is ordered.
    pub fn validate(&self) -> CalcResult<()> {
        let divisors = [
            ("arc_of_contact_factor", self.arc_of_contact_factor),
            ("max_deflection_factor", self.max_deflection_factor),
            ("zu_factor_new_beams", self.zu_factor_new_beams),
            ("zu_factor_existing_beams", self.zu_factor_existing_beams),
            ("inch_to_feet", self.inch_to_feet),
            ("modulus_of_elasticity_psi", self.modulus_of_elasticity_psi),
        ];
        for (field, value) in divisors {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(
                    format!("design_factors.{}", field),
                    value.to_string(),
                    "Factor must be a positive number",
                ));
            }
        }

        let ratios = [
            ("slab_unit_weight", self.slab_unit_weight),
            ("spacing_ratio_beams_1_2", self.spacing_ratio_beams_1_2),
            ("spacing_ratio_beam_3", self.spacing_ratio_beam_3),
        ];
        for (field, value) in ratios {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CalcError::invalid_input(
                    format!("design_factors.{}", field),
                    value.to_string(),
                    "Factor must be a non-negative number",
                ));
            }
        }

        if !(self.borderline_lower_limit < self.borderline_upper_limit) {
            return Err(CalcError::invalid_input(
                "design_factors.borderline_lower_limit",
                self.borderline_lower_limit.to_string(),
                format!(
                    "Borderline lower limit must be below the upper limit ({})",
                    self.borderline_upper_limit
                ),
            ));
        }

        Ok(())
    }
}
