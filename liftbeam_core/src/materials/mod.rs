//! # Materials Database
//!
//! Structural steel sections for machine beam selection.
//!
//! ## Sources
//!
//! - **JSON**: the catalog interchange format (`steelLabel`, `sectionModulus_Zu`, ...)
//! - **CSV**: an AISC Shapes Database export
//! - **Built-in**: common W-shapes, AISC Manual 16th Ed.
//!
//! ## Example
//!
//! ```rust
//! use liftbeam_core::materials::{builtin_catalog, ShapeType};
//!
//! let w8x18 = builtin_catalog().lookup("W8X18").unwrap();
//! assert_eq!(w8x18.shape_type(), Some(ShapeType::W));
//! ```

pub mod steel;

pub use steel::{builtin_catalog, ShapeType, SteelCatalog, SteelSection};
