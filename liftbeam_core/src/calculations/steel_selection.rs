//! Steel Section Selection
//!
//! Checks every catalog section against the governing required section
//! modulus and, beam by beam, against the allowable deflection.
//!
//! ## Status
//!
//! | required / allowed      | Status       |
//! |-------------------------|--------------|
//! | > 1.0 (required larger) | `No`         |
//! | (0.9, 1.0)              | `Borderline` |
//! | otherwise               | `Yes`        |
//!
//! ## Point Deflection
//!
//! ```text
//! δ = (P_static + P_dead) · a · V1³ / (3 · E · (a + b) · I)
//! ```

use serde::{Deserialize, Serialize};

use crate::design_factors::DesignFactors;
use crate::materials::steel::{SteelCatalog, SteelSection};
use crate::structure::BeamIndex;

use super::beam_analysis::{BeamResult, LoadPoint};

/// Acceptance status of a steel section for one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SteelStatus {
    Yes,
    Borderline,
    No,
}

impl SteelStatus {
    /// Whether the section may be used (Yes or Borderline)
    pub fn is_acceptable(&self) -> bool {
        !matches!(self, SteelStatus::No)
    }
}

impl std::fmt::Display for SteelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SteelStatus::Yes => "Yes",
            SteelStatus::Borderline => "Borderline",
            SteelStatus::No => "No",
        };
        write!(f, "{}", s)
    }
}

/// Classify a required value against an allowed one.
pub fn classify(required: f64, allowed: f64, factors: &DesignFactors) -> SteelStatus {
    let ratio = required / allowed;
    if required > allowed {
        SteelStatus::No
    } else if factors.borderline_lower_limit < ratio && ratio < factors.borderline_upper_limit {
        SteelStatus::Borderline
    } else {
        SteelStatus::Yes
    }
}

/// Governing required section modulus over all beams (0 when none is positive).
pub fn maximum_required_section_modulus(beams: &[BeamResult]) -> f64 {
    beams.iter().fold(0.0, |max, beam| {
        if max < beam.required_section_modulus {
            beam.required_section_modulus
        } else {
            max
        }
    })
}

/// Combine load points that sit at the same distance from the left reaction.
///
/// The first point at each distance takes the summed loads. Later coincident
/// points keep their slot and rank but lose their loads and move onto the left
/// reaction, so they contribute no deflection.
pub fn merge_coincident_points(points: &[LoadPoint]) -> Vec<LoadPoint> {
    let mut merged: Vec<LoadPoint> = Vec::with_capacity(points.len());
    let mut representatives: Vec<usize> = Vec::new();

    for point in points {
        let existing = representatives
            .iter()
            .copied()
            .find(|&i| merged[i].distance_left_a == point.distance_left_a);
        match existing {
            Some(i) => {
                merged[i].absorb(point);
                merged.push(point.zeroed_at_left_reaction());
            }
            None => {
                representatives.push(merged.len());
                merged.push(point.clone());
            }
        }
    }
    merged
}

/// Deflection contribution of one load point for a given moment of inertia.
pub fn point_deflection(
    point: &LoadPoint,
    moment_of_inertia: f64,
    factors: &DesignFactors,
) -> f64 {
    let a = point.distance_left_a;
    let span = a + point.distance_right_b;
    (point.static_load + point.dead_load) * a * point.value_v1.powi(3)
        / (3.0 * factors.modulus_of_elasticity_psi * span * moment_of_inertia)
}

/// Deflection contribution of one ranked point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDeflection {
    pub rank: u32,
    /// Deflection (in)
    pub deflection: f64,
}

/// Deflection check of one section on one beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDeflectionStatus {
    pub beam_index: BeamIndex,
    pub point_deflections: Vec<PointDeflection>,
    /// Sum of point deflections (in)
    pub total_deflection: f64,
    pub status: SteelStatus,
}

/// Shape metadata carried into the result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelShapeMeta {
    #[serde(rename = "type")]
    pub shape_type: String,
    pub height: f64,
    pub weight_per_unit_length: f64,
}

/// Section properties carried into the result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelMeta {
    pub section_modulus: f64,
    pub moment_of_inertia: f64,
    pub shape: SteelShapeMeta,
}

/// All checks for one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelChecks {
    #[serde(rename = "sectionModulusStatus")]
    pub section_modulus_status: SteelStatus,
    /// One record per beam, in beam order
    #[serde(rename = "deflectionStatus")]
    pub deflection_status: Vec<BeamDeflectionStatus>,
}

/// A catalog section annotated with its checks.
///
/// The checks serialize under `_calculations`, next to the catalog keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelSelection {
    pub steel_label: String,
    pub steel_meta: SteelMeta,
    #[serde(rename = "_calculations")]
    pub calculations: SteelChecks,
}

impl SteelSelection {
    /// Worst status across the section modulus and every deflection check
    pub fn overall_status(&self) -> SteelStatus {
        self.calculations
            .deflection_status
            .iter()
            .map(|d| d.status)
            .fold(self.calculations.section_modulus_status, SteelStatus::max)
    }

    /// Whether every check is Yes or Borderline
    pub fn is_acceptable(&self) -> bool {
        self.overall_status().is_acceptable()
    }
}

/// Per-beam data reused for every catalog section
struct BeamDeflectionInput<'a> {
    beam: &'a BeamResult,
    merged_points: Vec<LoadPoint>,
}

fn deflection_status(
    input: &BeamDeflectionInput<'_>,
    section: &SteelSection,
    factors: &DesignFactors,
) -> BeamDeflectionStatus {
    let point_deflections: Vec<PointDeflection> = input
        .merged_points
        .iter()
        .map(|p| PointDeflection {
            rank: p.rank,
            deflection: point_deflection(p, section.moment_of_inertia, factors),
        })
        .collect();
    let total_deflection = point_deflections.iter().map(|d| d.deflection).sum();

    BeamDeflectionStatus {
        beam_index: input.beam.beam_index,
        status: classify(total_deflection, input.beam.maximum_deflection, factors),
        point_deflections,
        total_deflection,
    }
}

/// Check one section against the governing modulus and each beam's deflection.
fn check_section(
    section: &SteelSection,
    inputs: &[BeamDeflectionInput<'_>],
    maximum_required_section_modulus: f64,
    factors: &DesignFactors,
) -> SteelSelection {
    SteelSelection {
        steel_label: section.label.clone(),
        steel_meta: SteelMeta {
            section_modulus: section.section_modulus,
            moment_of_inertia: section.moment_of_inertia,
            shape: SteelShapeMeta {
                shape_type: section.shape.clone(),
                height: section.height,
                weight_per_unit_length: section.weight_per_unit_length,
            },
        },
        calculations: SteelChecks {
            section_modulus_status: classify(
                maximum_required_section_modulus,
                section.section_modulus,
                factors,
            ),
            deflection_status: inputs
                .iter()
                .map(|input| deflection_status(input, section, factors))
                .collect(),
        },
    }
}

/// Classify every catalog section, in catalog order.
pub fn classify_catalog(
    catalog: &SteelCatalog,
    beams: &[BeamResult],
    maximum_required_section_modulus: f64,
    factors: &DesignFactors,
) -> Vec<SteelSelection> {
    if catalog.is_empty() {
        tracing::warn!("steel catalog is empty; no sections to classify");
        return Vec::new();
    }

    let inputs: Vec<BeamDeflectionInput<'_>> = beams
        .iter()
        .map(|beam| BeamDeflectionInput {
            beam,
            merged_points: merge_coincident_points(&beam.load_points),
        })
        .collect();

    catalog
        .iter()
        .map(|section| {
            check_section(section, &inputs, maximum_required_section_modulus, factors)
        })
        .collect()
}
