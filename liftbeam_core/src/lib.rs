//! # liftbeam_core - Elevator Machine Support Calculation Engine
//!
//! `liftbeam_core` checks the three steel beams that carry an elevator hoist
//! machine. It derives the rope and machinery loads, analyzes each beam as a
//! simply-supported member, and classifies every section of a steel catalog
//! against the required section modulus and the allowable deflection.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: [`calculations::calculate`] is a pure function of its inputs
//! - **JSON-First**: All inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use liftbeam_core::calculations::calculate;
//! use liftbeam_core::materials::builtin_catalog;
//! use liftbeam_core::structure::StructureInput;
//!
//! let input = StructureInput::sample();
//! let result = calculate(&input, builtin_catalog()).unwrap();
//!
//! for beam in &result.beams {
//!     println!("{}: Zu = {:.2} in³", beam.beam_index, beam.required_section_modulus);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`structure`] - Input model: weights, roping, spacing, beams and load points
//! - [`loads`] - Structure-level live and dead loads
//! - [`calculations`] - Beam analysis and steel selection
//! - [`materials`] - Steel section catalogs
//! - [`design_factors`] - Calculation constants, overridable per job
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod design_factors;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod structure;

pub use calculations::{calculate, calculate_with_factors, ThreeBeamResult};
pub use design_factors::DesignFactors;
pub use errors::{CalcError, CalcResult};
pub use structure::StructureInput;
