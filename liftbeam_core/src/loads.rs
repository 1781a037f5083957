//! Structure-level loads
//!
//! Live load delivered by the hoist ropes and the dead load of the machinery,
//! slab and support steel, computed once for the whole structure before the
//! beams are analyzed.
//!
//! # Example
//!
//! ```
//! use liftbeam_core::loads::round_load;
//!
//! assert_eq!(round_load(12.37), 12.0);
//! assert_eq!(round_load(12.96), 13.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::design_factors::DesignFactors;
use crate::structure::StructureInput;

/// Loads derived for the structure as a whole (lb).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureLoads {
    /// Sum of all suspended weights (informational)
    pub gross_total_live_load: f64,

    /// Rope load on the machine, reduced by the roping ratios
    pub total_live_load: f64,

    /// Floor slab weight over the machine area
    pub floor_slab_weight: f64,

    /// Machinery, slab, block-up and beam own weights
    pub total_dead_load: f64,
}

impl StructureLoads {
    /// Compute every structure-level load from a validated input.
    pub fn from_input(input: &StructureInput, factors: &DesignFactors) -> Self {
        let floor_slab_weight = floor_slab_weight(input, factors);
        let loads = Self {
            gross_total_live_load: gross_total_live_load(input),
            total_live_load: total_live_load(input),
            floor_slab_weight,
            total_dead_load: total_dead_load(input, floor_slab_weight),
        };
        tracing::debug!(
            gross_total_live_load = loads.gross_total_live_load,
            total_live_load = loads.total_live_load,
            floor_slab_weight = loads.floor_slab_weight,
            total_dead_load = loads.total_dead_load,
            "structure loads computed"
        );
        loads
    }
}

/// Car + capacity + counterweight + ropes + compensation + travelling cable
pub fn gross_total_live_load(input: &StructureInput) -> f64 {
    input.car_weight
        + input.capacity
        + input.counterweight
        + input.hoist_rope_weight
        + input.compensation_weight
        + input.travelling_cable_weight
}

/// Rope tension delivered to the machine from the car and counterweight sides.
///
/// Each side is doubled and divided by its roping ratio; hoist rope and
/// compensation weights are split evenly between the sides.
pub fn total_live_load(input: &StructureInput) -> f64 {
    let car_side = 2.0
        * (input.car_weight
            + input.capacity
            + 0.5 * input.hoist_rope_weight
            + 0.5 * input.compensation_weight
            + input.travelling_cable_weight)
        / input.car_roping_ratio.left_value;

    let counterweight_side = 2.0
        * (input.counterweight + 0.5 * input.hoist_rope_weight + 0.5 * input.compensation_weight)
        / input.counterweight_roping_ratio.left_value;

    car_side + counterweight_side
}

/// Slab thickness × longest span (ft) × spacing Z (ft) × slab unit weight
pub fn floor_slab_weight(input: &StructureInput, factors: &DesignFactors) -> f64 {
    input.slab_thickness
        * (input.max_beam_span() / factors.inch_to_feet)
        * (input.machine_beam_spacing.z / factors.inch_to_feet)
        * factors.slab_unit_weight
}

/// Total dead load, aggregated over every contributing source in one pass.
pub fn total_dead_load(input: &StructureInput, floor_slab_weight: f64) -> f64 {
    let machinery = input.block_up_beams_weight
        + input.machine_weight
        + input.motor_weight
        + input.isolation_weight
        + floor_slab_weight
        + input.deflector_weight;
    let beams: f64 = input.beams.iter().map(|b| b.own_weight()).sum();
    machinery + beams
}

/// Round a load to one decimal place, then drop the fractional part.
///
/// The one-decimal step rounds on the exact binary value, so `12.96` becomes
/// `13.0` and then `13`, while `12.37` becomes `12.4` and then `12`.
/// Zero and NaN give zero.
pub fn round_load(value: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        return 0.0;
    }
    format!("{:.1}", value)
        .parse::<f64>()
        .map(f64::trunc)
        .unwrap_or(0.0)
}
