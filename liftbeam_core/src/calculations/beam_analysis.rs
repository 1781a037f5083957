//! Machine Beam Analysis
//!
//! Per-beam analysis of a simply-supported machine beam carrying discrete
//! load points: load derivation, ranking, reactions, bending moments,
//! required section modulus and allowable deflection.
//!
//! ## Sign Convention
//! - Loads act downward and are positive
//! - `a` is measured from the left reaction, `b` from the right reaction
//! - Positive moment: tension on bottom fiber (sagging)
//!
//! ## Example
//! ```rust
//! use liftbeam_core::calculations::beam_analysis::{rank_load_points, reactions, LoadPoint};
//! use liftbeam_core::structure::LoadPointKind;
//!
//! // 120 in beam with two 1000 lb loads
//! let points = rank_load_points(vec![
//!     LoadPoint::new(LoadPointKind::PointLoad, 90.0, 120.0, 1000.0, 0.0),
//!     LoadPoint::new(LoadPointKind::PointLoad, 30.0, 120.0, 1000.0, 0.0),
//! ]);
//! assert_eq!(points[0].distance_left_a, 30.0);
//!
//! let r = reactions(&points, 120.0);
//! assert!((r.left - 1000.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::design_factors::DesignFactors;
use crate::errors::{CalcError, CalcResult};
use crate::loads::{round_load, StructureLoads};
use crate::structure::{BeamIndex, BeamInput, LoadPointKind, StructureInput};

/// An analyzed load point.
///
/// Built through [`LoadPoint::new`], which derives `b`, `V1`, the total and the
/// static load so that `a + b == span` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadPoint {
    /// Load type
    pub load_type: LoadPointKind,

    /// Distance from the left reaction `a` (in)
    pub distance_left_a: f64,

    /// Distance from the right reaction `b = span - a` (in)
    pub distance_right_b: f64,

    /// Deflection geometry factor `V1 = b·sqrt(1/3 + 2a/(3b))`
    pub value_v1: f64,

    /// Live load (lb)
    pub live_load: f64,

    /// Dead load (lb)
    pub dead_load: f64,

    /// Live + dead (lb)
    pub total_load: f64,

    /// Half of the live load (lb), used for deflection
    pub static_load: f64,

    /// Position rank by distance from the left reaction; equal `a` share a rank.
    /// Zero until the point is ranked.
    pub rank: u32,
}

impl LoadPoint {
    /// Create an unranked load point at `a` on a beam of the given span.
    pub fn new(
        load_type: LoadPointKind,
        distance_left_a: f64,
        span: f64,
        live_load: f64,
        dead_load: f64,
    ) -> Self {
        let distance_right_b = span - distance_left_a;
        Self {
            load_type,
            distance_left_a,
            distance_right_b,
            value_v1: value_v1(distance_left_a, distance_right_b),
            live_load,
            dead_load,
            total_load: live_load + dead_load,
            static_load: live_load / 2.0,
            rank: 0,
        }
    }

    /// Span this point was built for (`a + b`)
    pub fn span(&self) -> f64 {
        self.distance_left_a + self.distance_right_b
    }

    /// Same point with all loads removed and moved onto the left reaction.
    pub(crate) fn zeroed_at_left_reaction(&self) -> Self {
        let span = self.span();
        Self {
            rank: self.rank,
            ..Self::new(self.load_type, 0.0, span, 0.0, 0.0)
        }
    }

    /// Add the loads of a coincident point to this one.
    pub(crate) fn absorb(&mut self, other: &LoadPoint) {
        self.live_load += other.live_load;
        self.dead_load += other.dead_load;
        self.total_load += other.total_load;
        self.static_load += other.static_load;
    }
}

/// Deflection geometry factor `V1 = b·sqrt(1/3 + 2a/(3b))`.
///
/// NaN when `b = 0`; input validation keeps load points off the right reaction.
pub fn value_v1(a: f64, b: f64) -> f64 {
    b * (1.0 / 3.0 + (2.0 * a) / (3.0 * b)).sqrt()
}

/// Support reactions (lb)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reactions {
    pub left: f64,
    pub right: f64,
}

/// Bending moments at the reference point, computed from each side (in-lb)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BendingMoments {
    pub left: f64,
    pub right: f64,
}

impl BendingMoments {
    /// Governing (larger) moment
    pub fn governing(&self) -> f64 {
        self.left.max(self.right)
    }
}

/// Results for a single machine beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamResult {
    /// Beam position
    pub beam_index: BeamIndex,

    /// Distance between reactions L (in)
    pub span: f64,

    /// Machine beam self-weight (lb)
    pub machine_beam_weight: f64,

    /// Blocking beam weight (lb)
    pub blocking_beam_weight: f64,

    /// Load points sorted by distance from the left reaction, with ranks
    pub load_points: Vec<LoadPoint>,

    /// Support reactions
    pub reactions: Reactions,

    /// Rank of the point at which the bending moment is taken
    pub reference_rank: u32,

    /// Bending moments at the reference point
    pub bending_moments: BendingMoments,

    /// Required section modulus Zu (in³)
    pub required_section_modulus: f64,

    /// Maximum allowable deflection L/1666 (in)
    pub maximum_deflection: f64,
}

impl BeamResult {
    /// Sum of all point total loads (lb)
    pub fn total_applied_load(&self) -> f64 {
        self.load_points.iter().map(|p| p.total_load).sum()
    }
}

/// Live load at a point for the given beam.
///
/// Only machine point loads carry live load: beams 1 and 2 share it by the
/// X/Y spacing, beam 3 takes a fixed share.
pub fn point_live_load(
    kind: LoadPointKind,
    beam_index: BeamIndex,
    input: &StructureInput,
    loads: &StructureLoads,
    factors: &DesignFactors,
) -> f64 {
    if kind != LoadPointKind::PointLoad {
        return 0.0;
    }

    let arc_share = input.arc_of_contact / factors.arc_of_contact_factor;
    let live_load = match beam_index {
        BeamIndex::First | BeamIndex::Second => {
            let spacing = input.machine_beam_spacing;
            let ratio = factors.spacing_ratio_beams_1_2;
            let x_share = spacing.x / (spacing.x + spacing.y);
            arc_share * loads.total_live_load * (ratio - ratio * x_share)
        }
        BeamIndex::Third => arc_share * loads.total_live_load * factors.spacing_ratio_beam_3,
    };
    round_load(live_load)
}

/// Dead load at a point for the given beam.
///
/// Machine points carry a third of the machinery weight; mid-points carry the
/// beam's own weight plus a third of the block-up beams and floor slab.
pub fn point_dead_load(
    kind: LoadPointKind,
    beam: &BeamInput,
    input: &StructureInput,
    loads: &StructureLoads,
) -> f64 {
    match kind {
        LoadPointKind::PointLoad => {
            round_load((input.machine_weight + input.motor_weight + input.isolation_weight) / 3.0)
        }
        LoadPointKind::MidPointLoad => round_load(
            beam.machine_beam_weight
                + beam.blocking_beam_weight
                + input.block_up_beams_weight / 3.0
                + loads.floor_slab_weight / 3.0,
        ),
        LoadPointKind::AdditionalLoad(_) => 0.0,
    }
}

/// Sort load points by distance from the left reaction and assign ranks.
///
/// The sort is stable. Ranks start at 1 and advance only when `a` changes,
/// so points at exactly the same distance share a rank.
pub fn rank_load_points(mut points: Vec<LoadPoint>) -> Vec<LoadPoint> {
    points.sort_by(|p, q| p.distance_left_a.total_cmp(&q.distance_left_a));

    let mut rank = 0;
    let mut previous_a: Option<f64> = None;
    for point in points.iter_mut() {
        if previous_a != Some(point.distance_left_a) {
            rank += 1;
        }
        previous_a = Some(point.distance_left_a);
        point.rank = rank;
    }
    points
}

/// Reactions from moment equilibrium about each support.
pub fn reactions(points: &[LoadPoint], span: f64) -> Reactions {
    let (moment_about_right, moment_about_left) = points.iter().fold((0.0, 0.0), |(mr, ml), p| {
        (mr + p.total_load * p.distance_right_b, ml + p.total_load * p.distance_left_a)
    });
    Reactions {
        left: moment_about_right / span,
        right: moment_about_left / span,
    }
}

/// Position of the first point whose running total load reaches the left reaction.
pub fn reference_point(points: &[LoadPoint], reaction_left: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    points.iter().position(|p| {
        cumulative += p.total_load;
        reaction_left <= cumulative
    })
}

/// Bending moments at the reference point (by sorted position).
///
/// The left moment subtracts loads before the reference point; the right
/// moment subtracts loads after it.
pub fn bending_moments(
    points: &[LoadPoint],
    reactions: Reactions,
    reference: usize,
) -> BendingMoments {
    let ref_point = &points[reference];
    let a_ref = ref_point.distance_left_a;

    let mut left = reactions.left * a_ref;
    let mut right = reactions.right * ref_point.distance_right_b;
    for (i, p) in points.iter().enumerate() {
        if i < reference {
            left -= p.total_load * (a_ref - p.distance_left_a);
        } else if i > reference {
            right -= p.total_load * (p.distance_left_a - a_ref);
        }
    }

    BendingMoments { left, right }
}

/// Analyze one beam of a validated structure.
///
/// # Errors
///
/// * `CalcError::CalculationFailed` - no load point reaches the left reaction,
///   so the governing moment cannot be located
pub fn analyze_beam(
    beam: &BeamInput,
    input: &StructureInput,
    loads: &StructureLoads,
    factors: &DesignFactors,
) -> CalcResult<BeamResult> {
    let span = beam.span;

    let points: Vec<LoadPoint> = beam
        .load_points
        .iter()
        .map(|lp| {
            let live = point_live_load(lp.load_type, beam.beam_index, input, loads, factors);
            let dead = point_dead_load(lp.load_type, beam, input, loads);
            LoadPoint::new(lp.load_type, lp.distance_left_a, span, live, dead)
        })
        .collect();
    let points = rank_load_points(points);

    let reactions = reactions(&points, span);
    let reference = reference_point(&points, reactions.left).ok_or_else(|| {
        CalcError::calculation_failed(
            "Bending moment",
            format!(
                "{}: no load point reaches the left reaction of {:.3} lb",
                beam.beam_index, reactions.left
            ),
        )
    })?;
    let bending_moments = bending_moments(&points, reactions, reference);
    let required_section_modulus = bending_moments.governing() / factors.zu_factor(input.beam_type);
    let maximum_deflection = span / factors.max_deflection_factor;

    tracing::debug!(
        beam = beam.beam_index.number(),
        reaction_left = reactions.left,
        reaction_right = reactions.right,
        moment_left = bending_moments.left,
        moment_right = bending_moments.right,
        required_section_modulus,
        "beam analyzed"
    );

    Ok(BeamResult {
        beam_index: beam.beam_index,
        span,
        machine_beam_weight: beam.machine_beam_weight,
        blocking_beam_weight: beam.blocking_beam_weight,
        reference_rank: points[reference].rank,
        load_points: points,
        reactions,
        bending_moments,
        required_section_modulus,
        maximum_deflection,
    })
}
