//! # Structure Input
//!
//! The three-beam support structure as supplied by the caller: elevator
//! weights, roping, machine-beam spacing, machinery weights, the beam type,
//! and exactly three beams with their load points.
//!
//! All lengths are inches and all weights are pounds.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "Car 1 machine room",
//!   "car_weight": 2000.0,
//!   "capacity": 2500.0,
//!   "counterweight": 3000.0,
//!   "hoist_rope_weight": 200.0,
//!   "compensation_weight": 100.0,
//!   "travelling_cable_weight": 50.0,
//!   "car_roping_ratio": { "left_value": 1.0, "right_value": 1.0 },
//!   "counterweight_roping_ratio": { "left_value": 1.0, "right_value": 1.0 },
//!   "machine_beam_spacing": { "x": 30.0, "y": 30.0, "z": 60.0 },
//!   "arc_of_contact": 180.0,
//!   "slab_thickness": 4.0,
//!   "block_up_beams_weight": 300.0,
//!   "machine_weight": 900.0,
//!   "motor_weight": 600.0,
//!   "isolation_weight": 300.0,
//!   "deflector_weight": 150.0,
//!   "beam_type": "New",
//!   "beams": [
//!     {
//!       "beam_index": 1,
//!       "span": 100.0,
//!       "machine_beam_weight": 200.0,
//!       "blocking_beam_weight": 100.0,
//!       "load_points": [ { "load_type": "PointLoad", "distance_left_a": 50.0 } ]
//!     }
//!   ]
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, CalcError, CalcResult};

/// Number of beams in the support structure
pub const BEAM_COUNT: usize = 3;

/// Prefix of the additional-load family of load types
const ADDITIONAL_LOAD_PREFIX: &str = "AdditionalLoad#";

/// Whether the machine beams are new or existing steel.
///
/// Selects the allowable bending stress used for the required section modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BeamType {
    #[default]
    New,
    Existing,
}

impl fmt::Display for BeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeamType::New => write!(f, "New"),
            BeamType::Existing => write!(f, "Existing"),
        }
    }
}

/// Position of a beam in the structure (serialized as 1, 2 or 3).
///
/// Beams 1 and 2 share the machine live load by the X/Y spacing; beam 3
/// carries a fixed share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BeamIndex {
    First,
    Second,
    Third,
}

impl BeamIndex {
    /// All beam positions in order
    pub const ALL: [BeamIndex; BEAM_COUNT] =
        [BeamIndex::First, BeamIndex::Second, BeamIndex::Third];

    /// One-based beam number
    pub fn number(&self) -> u8 {
        match self {
            BeamIndex::First => 1,
            BeamIndex::Second => 2,
            BeamIndex::Third => 3,
        }
    }
}

impl TryFrom<u8> for BeamIndex {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BeamIndex::First),
            2 => Ok(BeamIndex::Second),
            3 => Ok(BeamIndex::Third),
            other => Err(CalcError::invalid_input(
                "beam_index",
                other.to_string(),
                "Beam index must be 1, 2 or 3",
            )),
        }
    }
}

impl From<BeamIndex> for u8 {
    fn from(index: BeamIndex) -> Self {
        index.number()
    }
}

impl fmt::Display for BeamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Beam {}", self.number())
    }
}

/// Kind of load applied at a load point.
///
/// Serialized as `"PointLoad"`, `"MidPointLoad"` or `"AdditionalLoad#N"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LoadPointKind {
    /// Machine load point (carries live and machinery dead load)
    PointLoad,
    /// Beam mid-point (carries beam self-weight, block-up and slab dead load)
    MidPointLoad,
    /// Additional marker point; contributes no load
    AdditionalLoad(u32),
}

impl LoadPointKind {
    /// Whether this kind contributes any live or dead load
    pub fn carries_load(&self) -> bool {
        !matches!(self, LoadPointKind::AdditionalLoad(_))
    }
}

impl FromStr for LoadPointKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PointLoad" => Ok(LoadPointKind::PointLoad),
            "MidPointLoad" => Ok(LoadPointKind::MidPointLoad),
            other => other
                .strip_prefix(ADDITIONAL_LOAD_PREFIX)
                .and_then(|n| n.parse::<u32>().ok())
                .map(LoadPointKind::AdditionalLoad)
                .ok_or_else(|| {
                    CalcError::invalid_input(
                        "load_type",
                        other,
                        "Expected PointLoad, MidPointLoad or AdditionalLoad#<n>",
                    )
                }),
        }
    }
}

impl TryFrom<String> for LoadPointKind {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LoadPointKind> for String {
    fn from(kind: LoadPointKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for LoadPointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPointKind::PointLoad => write!(f, "PointLoad"),
            LoadPointKind::MidPointLoad => write!(f, "MidPointLoad"),
            LoadPointKind::AdditionalLoad(n) => write!(f, "{}{}", ADDITIONAL_LOAD_PREFIX, n),
        }
    }
}

/// Roping ratio written as `left:right` (e.g. 2:1).
///
/// Only the left value enters the live load formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RopingRatio {
    pub left_value: f64,
    pub right_value: f64,
}

impl RopingRatio {
    /// Create a `left:right` roping ratio
    pub fn new(left_value: f64, right_value: f64) -> Self {
        Self { left_value, right_value }
    }

    /// 1:1 roping
    pub fn one_to_one() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Default for RopingRatio {
    fn default() -> Self {
        Self::one_to_one()
    }
}

impl fmt::Display for RopingRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.left_value, self.right_value)
    }
}

/// Machine-beam spacing offsets (in).
///
/// X and Y split the machine live load between beams 1 and 2; Z is the
/// slab width used for the floor slab weight.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MachineBeamSpacing {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A load point on a beam, located by its distance from the left reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadPointInput {
    /// Load type
    pub load_type: LoadPointKind,

    /// Distance from the left reaction `a` (in)
    pub distance_left_a: f64,
}

impl LoadPointInput {
    /// Create a load point at distance `a` from the left reaction
    pub fn new(load_type: LoadPointKind, distance_left_a: f64) -> Self {
        Self {
            load_type,
            distance_left_a,
        }
    }

    /// Machine point load at `a`
    pub fn point(distance_left_a: f64) -> Self {
        Self::new(LoadPointKind::PointLoad, distance_left_a)
    }

    /// Mid-point load at `a`
    pub fn mid_point(distance_left_a: f64) -> Self {
        Self::new(LoadPointKind::MidPointLoad, distance_left_a)
    }
}

/// One of the three machine support beams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// Beam position (1, 2 or 3)
    pub beam_index: BeamIndex,

    /// Distance between the two reactions L (in)
    pub span: f64,

    /// Machine beam self-weight (lb)
    #[serde(default)]
    pub machine_beam_weight: f64,

    /// Blocking beam weight (lb)
    #[serde(default)]
    pub blocking_beam_weight: f64,

    /// Load points, in any order
    pub load_points: Vec<LoadPointInput>,
}

impl BeamInput {
    /// Create a beam with no own weight and no load points
    pub fn new(beam_index: BeamIndex, span: f64) -> Self {
        Self {
            beam_index,
            span,
            machine_beam_weight: 0.0,
            blocking_beam_weight: 0.0,
            load_points: Vec::new(),
        }
    }

    /// Set the machine and blocking beam weights (builder pattern)
    pub fn with_own_weight(mut self, machine_beam_weight: f64, blocking_beam_weight: f64) -> Self {
        self.machine_beam_weight = machine_beam_weight;
        self.blocking_beam_weight = blocking_beam_weight;
        self
    }

    /// Add a load point (builder pattern)
    pub fn with_load_point(mut self, point: LoadPointInput) -> Self {
        self.load_points.push(point);
        self
    }

    /// Own-weight dead load contributed by this beam (lb)
    pub fn own_weight(&self) -> f64 {
        self.machine_beam_weight + self.blocking_beam_weight
    }

    /// Validate span and load point positions.
    pub fn validate(&self, position: usize) -> CalcResult<()> {
        let field = |name: &str| format!("beams[{}].{}", position, name);

        require_finite(&field("span"), self.span)?;
        if self.span <= 0.0 {
            return Err(CalcError::invalid_input(
                field("span"),
                self.span.to_string(),
                "Span must be positive",
            ));
        }
        require_finite(&field("machine_beam_weight"), self.machine_beam_weight)?;
        require_finite(&field("blocking_beam_weight"), self.blocking_beam_weight)?;

        if self.load_points.is_empty() {
            return Err(CalcError::invalid_input(
                field("load_points"),
                "[]",
                "Each beam needs at least one load point",
            ));
        }

        for (i, point) in self.load_points.iter().enumerate() {
            let a = point.distance_left_a;
            let name = field(&format!("load_points[{}].distance_left_a", i));
            require_finite(&name, a)?;
            if a < 0.0 || a >= self.span {
                return Err(CalcError::invalid_input(
                    name,
                    a.to_string(),
                    format!("Load point must lie in [0, {}) from the left reaction", self.span),
                ));
            }
        }

        Ok(())
    }
}

/// Complete input for a three-beam support calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureInput {
    /// User label (e.g., "Car 2 machine room")
    #[serde(default)]
    pub label: String,

    /// Car weight (lb)
    pub car_weight: f64,

    /// Rated capacity (lb)
    pub capacity: f64,

    /// Counterweight (lb)
    pub counterweight: f64,

    /// Hoist rope weight (lb)
    pub hoist_rope_weight: f64,

    /// Compensation weight (lb)
    pub compensation_weight: f64,

    /// Travelling cable weight (lb)
    pub travelling_cable_weight: f64,

    /// Car roping ratio
    pub car_roping_ratio: RopingRatio,

    /// Counterweight roping ratio
    pub counterweight_roping_ratio: RopingRatio,

    /// Machine-beam spacing offsets
    pub machine_beam_spacing: MachineBeamSpacing,

    /// Arc of contact of the ropes on the sheave (degrees)
    pub arc_of_contact: f64,

    /// Floor slab thickness (in)
    pub slab_thickness: f64,

    /// Block-up beams weight (lb)
    pub block_up_beams_weight: f64,

    /// Hoist machine weight (lb)
    pub machine_weight: f64,

    /// Motor weight (lb)
    pub motor_weight: f64,

    /// Isolation pad weight (lb)
    pub isolation_weight: f64,

    /// Deflector sheave weight (lb)
    pub deflector_weight: f64,

    /// New or existing machine beams
    pub beam_type: BeamType,

    /// Exactly three beams
    pub beams: Vec<BeamInput>,
}

impl StructureInput {
    /// Validate all preconditions of the calculation.
    ///
    /// Rejects non-finite values, zero roping ratios, a degenerate X/Y spacing,
    /// the wrong number of beams, and load points outside `[0, span)`.
    pub fn validate(&self) -> CalcResult<()> {
        let scalars = [
            ("car_weight", self.car_weight),
            ("capacity", self.capacity),
            ("counterweight", self.counterweight),
            ("hoist_rope_weight", self.hoist_rope_weight),
            ("compensation_weight", self.compensation_weight),
            ("travelling_cable_weight", self.travelling_cable_weight),
            ("machine_beam_spacing.x", self.machine_beam_spacing.x),
            ("machine_beam_spacing.y", self.machine_beam_spacing.y),
            ("machine_beam_spacing.z", self.machine_beam_spacing.z),
            ("arc_of_contact", self.arc_of_contact),
            ("slab_thickness", self.slab_thickness),
            ("block_up_beams_weight", self.block_up_beams_weight),
            ("machine_weight", self.machine_weight),
            ("motor_weight", self.motor_weight),
            ("isolation_weight", self.isolation_weight),
            ("deflector_weight", self.deflector_weight),
        ];
        for (field, value) in scalars {
            require_finite(field, value)?;
        }

        for (field, ratio) in [
            ("car_roping_ratio", self.car_roping_ratio),
            ("counterweight_roping_ratio", self.counterweight_roping_ratio),
        ] {
            require_finite(&format!("{}.left_value", field), ratio.left_value)?;
            if ratio.left_value == 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    ratio.to_string(),
                    "Roping ratio must be non-zero",
                ));
            }
        }

        let spacing = self.machine_beam_spacing;
        if spacing.x + spacing.y == 0.0 {
            return Err(CalcError::invalid_input(
                "machine_beam_spacing",
                format!("X={}, Y={}", spacing.x, spacing.y),
                "X + Y must be non-zero",
            ));
        }

        if self.beams.len() != BEAM_COUNT {
            return Err(CalcError::invalid_input(
                "beams",
                self.beams.len().to_string(),
                format!("Exactly {} beams are required", BEAM_COUNT),
            ));
        }

        for (position, beam) in self.beams.iter().enumerate() {
            beam.validate(position)?;
        }

        Ok(())
    }

    /// Longest span across all beams (in)
    pub fn max_beam_span(&self) -> f64 {
        self.beams.iter().map(|b| b.span).fold(f64::NEG_INFINITY, f64::max)
    }

    /// A typical 2:1 geared machine arrangement.
    ///
    /// Printed by `liftbeam sample` as a starting point for a new job.
    pub fn sample() -> Self {
        let beam = |index: BeamIndex, span: f64| {
            BeamInput::new(index, span)
                .with_own_weight(250.0, 60.0)
                .with_load_point(LoadPointInput::point(span * 0.4))
                .with_load_point(LoadPointInput::mid_point(span / 2.0))
        };

        StructureInput {
            label: "Machine room support".to_string(),
            car_weight: 3500.0,
            capacity: 3500.0,
            counterweight: 5250.0,
            hoist_rope_weight: 480.0,
            compensation_weight: 350.0,
            travelling_cable_weight: 120.0,
            car_roping_ratio: RopingRatio::new(2.0, 1.0),
            counterweight_roping_ratio: RopingRatio::new(2.0, 1.0),
            machine_beam_spacing: MachineBeamSpacing { x: 36.0, y: 24.0, z: 60.0 },
            arc_of_contact: 180.0,
            slab_thickness: 4.0,
            block_up_beams_weight: 400.0,
            machine_weight: 2400.0,
            motor_weight: 900.0,
            isolation_weight: 150.0,
            deflector_weight: 300.0,
            beam_type: BeamType::New,
            beams: vec![
                beam(BeamIndex::First, 144.0),
                beam(BeamIndex::Second, 144.0),
                beam(BeamIndex::Third, 96.0),
            ],
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Three beams with one centered point load each, spans 100/100/50.
    pub(crate) fn sample_input() -> StructureInput {
        StructureInput {
            label: "Test structure".to_string(),
            car_weight: 2000.0,
            capacity: 2500.0,
            counterweight: 3000.0,
            hoist_rope_weight: 200.0,
            compensation_weight: 100.0,
            travelling_cable_weight: 50.0,
            car_roping_ratio: RopingRatio::one_to_one(),
            counterweight_roping_ratio: RopingRatio::one_to_one(),
            machine_beam_spacing: MachineBeamSpacing { x: 30.0, y: 30.0, z: 60.0 },
            arc_of_contact: 180.0,
            slab_thickness: 4.0,
            block_up_beams_weight: 300.0,
            machine_weight: 900.0,
            motor_weight: 600.0,
            isolation_weight: 300.0,
            deflector_weight: 150.0,
            beam_type: BeamType::New,
            beams: vec![
                BeamInput::new(BeamIndex::First, 100.0)
                    .with_own_weight(200.0, 100.0)
                    .with_load_point(LoadPointInput::point(50.0)),
                BeamInput::new(BeamIndex::Second, 100.0)
                    .with_own_weight(200.0, 100.0)
                    .with_load_point(LoadPointInput::point(50.0)),
                BeamInput::new(BeamIndex::Third, 50.0)
                    .with_own_weight(100.0, 50.0)
                    .with_load_point(LoadPointInput::point(25.0)),
            ],
        }
    }

    #[test]
    fn test_sample_input_is_valid() {
        assert!(sample_input().validate().is_ok());
        assert_eq!(sample_input().max_beam_span(), 100.0);
    }

    #[test]
    fn test_public_sample_is_valid() {
        let sample = StructureInput::sample();
        assert!(sample.validate().is_ok());
        assert_eq!(sample.max_beam_span(), 144.0);
        assert_eq!(sample.beams[2].load_points.len(), 2);
    }

    #[test]
    fn test_load_point_kind_parsing() {
        assert_eq!("PointLoad".parse::<LoadPointKind>().unwrap(), LoadPointKind::PointLoad);
        assert_eq!("MidPointLoad".parse::<LoadPointKind>().unwrap(), LoadPointKind::MidPointLoad);
        assert_eq!(
            "AdditionalLoad#2".parse::<LoadPointKind>().unwrap(),
            LoadPointKind::AdditionalLoad(2)
        );
        assert!("AdditionalLoad#".parse::<LoadPointKind>().is_err());
        assert!("UniformLoad".parse::<LoadPointKind>().is_err());
        assert_eq!(LoadPointKind::AdditionalLoad(7).to_string(), "AdditionalLoad#7");
    }

    #[test]
    fn test_beam_index_serialization() {
        let json = serde_json::to_string(&BeamIndex::Third).unwrap();
        assert_eq!(json, "3");
        let parsed: BeamIndex = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, BeamIndex::Second);
        assert!(serde_json::from_str::<BeamIndex>("4").is_err());
    }

    #[test]
    fn test_input_serialization_roundtrip() {
        let input = sample_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"PointLoad\""));
        assert!(json.contains("\"beam_index\": 3"));
        let roundtrip: StructureInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }

    #[test]
    fn test_rejects_wrong_beam_count() {
        let mut input = sample_input();
        input.beams.pop();
        let err = input.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rejects_zero_roping_ratio() {
        let mut input = sample_input();
        input.counterweight_roping_ratio = RopingRatio::new(0.0, 1.0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_rejects_point_at_right_reaction() {
        let mut input = sample_input();
        input.beams[2].load_points[0].distance_left_a = 50.0;
        match input.validate() {
            Err(CalcError::InvalidInput { field, .. }) => {
                assert_eq!(field, "beams[2].load_points[0].distance_left_a")
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_beam_without_load_points() {
        let mut input = sample_input();
        input.beams[1].load_points.clear();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_weight() {
        let mut input = sample_input();
        input.motor_weight = f64::NAN;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_roping_ratio_display() {
        assert_eq!(RopingRatio::new(2.0, 1.0).to_string(), "2:1");
    }
}
