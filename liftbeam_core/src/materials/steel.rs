//! Steel Section Catalog
//!
//! Candidate steel sections checked against the machine beam requirements.
//! Only the properties the selection needs are kept: section modulus,
//! moment of inertia, and shape metadata for display and sorting.
//!
//! ## Data Sources
//!
//! - **Catalog JSON**: the steel library format (`steelLabel`,
//!   `sectionModulus_Zu`, `momentOfInertia_I`, `Shape`, `height`,
//!   `weightPerUnitLength`)
//! - **AISC CSV**: an export of the AISC Shapes Database v16.0
//!   (`Type`, `AISC_Manual_Label`, `W`, `d`, `Ix`, `Sx`, ...)
//! - **Built-in**: common W-shapes from the AISC Manual 16th Ed.
//!
//! ## Example
//!
//! ```rust
//! use liftbeam_core::materials::steel::{builtin_catalog, ShapeType};
//!
//! let catalog = builtin_catalog();
//! let w8x18 = catalog.lookup("w8x18").unwrap();
//! assert_eq!(w8x18.shape_type(), Some(ShapeType::W));
//! assert!(w8x18.moment_of_inertia > 60.0);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Steel shape type classification (AISC type codes used for beams)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    /// Wide flange beam (W-shape)
    W,
    /// Miscellaneous shape (M-shape)
    M,
    /// American Standard beam (S-shape)
    S,
    /// H-pile (HP-shape)
    HP,
    /// American Standard channel (C-shape)
    C,
    /// Miscellaneous channel (MC-shape)
    MC,
}

impl ShapeType {
    /// Parse from AISC type code
    pub fn from_aisc_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "W" => Some(ShapeType::W),
            "M" => Some(ShapeType::M),
            "S" => Some(ShapeType::S),
            "HP" => Some(ShapeType::HP),
            "C" => Some(ShapeType::C),
            "MC" => Some(ShapeType::MC),
            _ => None,
        }
    }

    /// AISC type code
    pub fn code(&self) -> &'static str {
        match self {
            ShapeType::W => "W",
            ShapeType::M => "M",
            ShapeType::S => "S",
            ShapeType::HP => "HP",
            ShapeType::C => "C",
            ShapeType::MC => "MC",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeType::W => "Wide Flange (W)",
            ShapeType::M => "Miscellaneous (M)",
            ShapeType::S => "American Standard (S)",
            ShapeType::HP => "H-Pile (HP)",
            ShapeType::C => "Channel (C)",
            ShapeType::MC => "Miscellaneous Channel (MC)",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A catalog entry, in the steel library JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelSection {
    /// Section label (e.g., "W8X18")
    #[serde(rename = "steelLabel")]
    pub label: String,

    /// Section modulus Zu (in³)
    #[serde(rename = "sectionModulus_Zu")]
    pub section_modulus: f64,

    /// Moment of inertia I (in⁴)
    #[serde(rename = "momentOfInertia_I")]
    pub moment_of_inertia: f64,

    /// Shape type code as written in the source (e.g., "W")
    #[serde(rename = "Shape", default)]
    pub shape: String,

    /// Section depth (in)
    #[serde(default)]
    pub height: f64,

    /// Nominal weight per linear foot (lb/ft)
    #[serde(rename = "weightPerUnitLength", default)]
    pub weight_per_unit_length: f64,
}

impl SteelSection {
    /// Parsed shape type, if the code is a known beam shape
    pub fn shape_type(&self) -> Option<ShapeType> {
        ShapeType::from_aisc_code(&self.shape)
    }

    /// Check that the properties used by the selection are usable.
    pub fn validate(&self) -> CalcResult<()> {
        if self.label.trim().is_empty() {
            return Err(CalcError::invalid_input("steelLabel", "", "Section label is empty"));
        }
        for (field, value) in [
            ("sectionModulus_Zu", self.section_modulus),
            ("momentOfInertia_I", self.moment_of_inertia),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(
                    format!("{}.{}", self.label, field),
                    value.to_string(),
                    "Section property must be a positive number",
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for SteelSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (Zu={:.2} in³, I={:.1} in⁴, {:.0} plf)",
            self.label, self.section_modulus, self.moment_of_inertia, self.weight_per_unit_length
        )
    }
}

/// Ordered steel catalog.
///
/// Catalog order is preserved; labels are indexed case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct SteelCatalog {
    /// Sections in catalog order
    sections: Vec<SteelSection>,

    /// Uppercase label -> position in `sections`
    by_label: HashMap<String, usize>,

    /// Catalog version or source tag (e.g., "builtin-common")
    pub version: Option<String>,
}

impl SteelCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from sections, validating each one
    pub fn from_sections(sections: impl IntoIterator<Item = SteelSection>) -> CalcResult<Self> {
        let mut catalog = Self::new();
        for section in sections {
            section.validate()?;
            catalog.insert(section);
        }
        Ok(catalog)
    }

    /// Parse a catalog from steel library JSON (an array of sections)
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let sections: Vec<SteelSection> = serde_json::from_str(json)
            .map_err(|e| CalcError::serialization(format!("Invalid steel catalog JSON: {}", e)))?;
        Self::from_sections(sections)
    }

    /// Load a catalog from a steel library JSON file
    pub fn load_from_json(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;
        let mut catalog = Self::from_json_str(&contents)?;
        catalog.version = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        tracing::debug!(path = %path.display(), sections = catalog.len(), "steel catalog loaded");
        Ok(catalog)
    }

    /// Load beam shapes from an AISC Shapes Database CSV export.
    ///
    /// Rows with an unknown shape type or no label are skipped. `Sx` is used
    /// as the section modulus and `Ix` as the moment of inertia; rows missing
    /// either are skipped. Height is the first of `d`, `Ht` and `OD` that the
    /// row fills in.
    pub fn load_from_csv(path: &Path) -> CalcResult<Self> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("open", &display, format!("Failed to open CSV: {}", e))
        })?;
        let mut catalog = Self::from_csv_str(&contents, &display)?;
        catalog.version = Some("aisc-csv".to_string());
        Ok(catalog)
    }

    fn from_csv_str(contents: &str, source: &str) -> CalcResult<Self> {
        let mut lines = contents.lines();

        let header_line = lines
            .next()
            .ok_or_else(|| CalcError::file_error("read", source, "CSV file is empty"))?;
        let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();
        let col_index = |name: &str| -> Option<usize> {
            headers.iter().position(|h| h.eq_ignore_ascii_case(name))
        };

        let type_idx = col_index("Type")
            .ok_or_else(|| CalcError::file_error("parse", source, "Missing 'Type' column"))?;
        let label_idx = col_index("AISC_Manual_Label").ok_or_else(|| {
            CalcError::file_error("parse", source, "Missing 'AISC_Manual_Label' column")
        })?;
        let ix_idx = col_index("Ix")
            .ok_or_else(|| CalcError::file_error("parse", source, "Missing 'Ix' column"))?;
        let sx_idx = col_index("Sx")
            .ok_or_else(|| CalcError::file_error("parse", source, "Missing 'Sx' column"))?;
        let w_idx = col_index("W");
        let height_idx: Vec<usize> = ["d", "Ht", "OD"]
            .into_iter()
            .filter_map(|name| col_index(name))
            .collect();

        let mut catalog = Self::new();
        let mut skipped = 0usize;

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            let get = |idx: Option<usize>| {
                idx.and_then(|i| fields.get(i))
                    .and_then(|v| parse_optional_f64(v))
            };

            let label = fields.get(label_idx).map(|s| s.trim()).unwrap_or("");
            let shape_type = fields.get(type_idx).and_then(|t| ShapeType::from_aisc_code(t));
            let (Some(shape_type), false) = (shape_type, label.is_empty()) else {
                skipped += 1;
                continue;
            };
            let (Some(moment_of_inertia), Some(section_modulus)) =
                (get(Some(ix_idx)), get(Some(sx_idx)))
            else {
                skipped += 1;
                continue;
            };

            let section = SteelSection {
                label: label.to_string(),
                section_modulus,
                moment_of_inertia,
                shape: shape_type.code().to_string(),
                height: height_idx.iter().find_map(|&i| get(Some(i))).unwrap_or(0.0),
                weight_per_unit_length: get(w_idx).unwrap_or(0.0),
            };
            section.validate()?;
            catalog.insert(section);
        }

        if skipped > 0 {
            tracing::debug!(source, skipped, "skipped CSV rows that are not usable beam shapes");
        }
        Ok(catalog)
    }

    /// Append a section; a repeated label replaces the earlier lookup target
    pub fn insert(&mut self, section: SteelSection) {
        let key = section.label.to_uppercase();
        self.by_label.insert(key, self.sections.len());
        self.sections.push(section);
    }

    /// Look up a section by label (case-insensitive)
    pub fn lookup(&self, label: &str) -> CalcResult<&SteelSection> {
        self.by_label
            .get(&label.to_uppercase())
            .map(|&i| &self.sections[i])
            .ok_or_else(|| CalcError::section_not_found(label))
    }

    /// All sections in catalog order
    pub fn sections(&self) -> &[SteelSection] {
        &self.sections
    }

    /// Iterate sections in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, SteelSection> {
        self.sections.iter()
    }

    /// New catalog holding only the sections of one shape type
    pub fn filter_by_type(&self, shape_type: ShapeType) -> SteelCatalog {
        let mut filtered = SteelCatalog::new();
        for section in self.iter().filter(|s| s.shape_type() == Some(shape_type)) {
            filtered.insert(section.clone());
        }
        filtered.version = self.version.clone();
        filtered
    }

    /// Sections whose label starts with a prefix (e.g., "W8")
    pub fn search(&self, pattern: &str) -> Vec<&SteelSection> {
        let pattern_upper = pattern.to_uppercase();
        self.iter()
            .filter(|s| s.label.to_uppercase().starts_with(&pattern_upper))
            .collect()
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a SteelCatalog {
    type Item = &'a SteelSection;
    type IntoIter = std::slice::Iter<'a, SteelSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse an optional f64 from a CSV field
///
/// Returns None for empty strings, dashes, or invalid numbers.
fn parse_optional_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return None;
    }
    f64::from_str(trimmed).ok()
}

// ============================================================================
// Built-in Common Shapes (for use without a catalog file)
// ============================================================================

/// (label, weight plf, depth in, Ix in⁴, Sx in³), AISC Manual 16th Ed.
const COMMON_W_SHAPES: [(&str, f64, f64, f64, f64); 24] = [
    ("W6X9", 9.0, 5.9, 16.4, 5.56),
    ("W6X15", 15.0, 5.99, 29.1, 9.72),
    ("W8X18", 18.0, 8.14, 61.9, 15.2),
    ("W8X24", 24.0, 7.93, 82.7, 20.9),
    ("W8X31", 31.0, 8.0, 110.0, 27.5),
    ("W10X22", 22.0, 10.2, 118.0, 23.2),
    ("W10X33", 33.0, 9.73, 170.0, 35.0),
    ("W10X49", 49.0, 10.0, 272.0, 54.6),
    ("W12X19", 19.0, 12.2, 130.0, 21.3),
    ("W12X26", 26.0, 12.2, 204.0, 33.4),
    ("W12X40", 40.0, 11.9, 307.0, 51.5),
    ("W12X58", 58.0, 12.2, 475.0, 78.0),
    ("W14X22", 22.0, 13.7, 199.0, 29.0),
    ("W14X30", 30.0, 13.8, 291.0, 42.0),
    ("W14X48", 48.0, 13.8, 485.0, 70.2),
    ("W16X26", 26.0, 15.7, 301.0, 38.4),
    ("W16X36", 36.0, 15.9, 448.0, 56.5),
    ("W16X50", 50.0, 16.3, 659.0, 81.0),
    ("W18X35", 35.0, 17.7, 510.0, 57.6),
    ("W18X50", 50.0, 18.0, 800.0, 88.9),
    ("W21X44", 44.0, 20.7, 843.0, 81.6),
    ("W21X62", 62.0, 21.0, 1330.0, 127.0),
    ("W24X55", 55.0, 23.6, 1350.0, 114.0),
    ("W24X76", 76.0, 23.9, 2100.0, 176.0),
];

static BUILTIN_CATALOG: Lazy<SteelCatalog> = Lazy::new(|| {
    let mut catalog = SteelCatalog::new();
    for (label, weight, depth, ix, sx) in COMMON_W_SHAPES {
        catalog.insert(SteelSection {
            label: label.to_string(),
            section_modulus: sx,
            moment_of_inertia: ix,
            shape: ShapeType::W.code().to_string(),
            height: depth,
            weight_per_unit_length: weight,
        });
    }
    catalog.version = Some("builtin-common".to_string());
    catalog
});

/// Process-wide catalog of common W-shapes, built on first use.
pub fn builtin_catalog() -> &'static SteelCatalog {
    &BUILTIN_CATALOG
}
