//! # Material & Grade Registry
//!
//! Strength properties for structural steel, high-strength bolts, and weld
//! filler metal, keyed by ASTM/AWS designation.
//!
//! The tables are process-wide statics initialized on first use and never
//! mutated afterwards, so lookups are safe from any thread.
//!
//! ## Designation Matching
//!
//! Lookups are case-insensitive and treat spaces, underscores, and dots as
//! dashes, so `"A572 Gr50"`, `"a572_gr50"`, and `"A572-GR50"` all resolve to
//! the same entry.
//!
//! ## Example
//!
//! ```rust
//! use conn_core::materials::{bolt_grade, material, weld_electrode};
//!
//! let a992 = material("A992").unwrap();
//! assert_eq!(a992.fy_ksi, 50.0);
//!
//! let a325x = bolt_grade("A325-X").unwrap();
//! assert_eq!(a325x.fnv_ksi, 68.0);
//!
//! let e70 = weld_electrode("e70xx").unwrap();
//! assert_eq!(e70.fexx_ksi, 70.0);
//! ```

pub mod shapes;

pub use shapes::{builtin_connection_shapes, normalize_shape_name, ShapeType, SteelShape, SteelShapeDb};

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Ksi;

/// Modulus of elasticity of structural steel (ksi)
pub const STEEL_E_KSI: f64 = 29_000.0;

/// Structural steel material (AISC 360 Table 2-4 values)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// ASTM designation (e.g., "A992")
    pub designation: String,
    /// Specified minimum yield stress Fy (ksi)
    pub fy_ksi: f64,
    /// Specified minimum tensile strength Fu (ksi)
    pub fu_ksi: f64,
    /// Modulus of elasticity E (ksi)
    pub e_ksi: f64,
}

impl Material {
    /// Create a steel material with the standard modulus of elasticity
    pub fn new(designation: impl Into<String>, fy_ksi: f64, fu_ksi: f64) -> Self {
        Material {
            designation: designation.into(),
            fy_ksi,
            fu_ksi,
            e_ksi: STEEL_E_KSI,
        }
    }

    pub fn fy(&self) -> Ksi {
        Ksi(self.fy_ksi)
    }

    pub fn fu(&self) -> Ksi {
        Ksi(self.fu_ksi)
    }

    pub fn e(&self) -> Ksi {
        Ksi(self.e_ksi)
    }
}

/// High-strength bolt grade (AISC 360 Table J3.2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltGrade {
    /// Designation including thread condition (e.g., "A325-X")
    pub designation: String,
    /// Nominal tensile stress Fnt (ksi)
    pub fnt_ksi: f64,
    /// Nominal shear stress Fnv (ksi)
    pub fnv_ksi: f64,
}

impl BoltGrade {
    pub fn fnt(&self) -> Ksi {
        Ksi(self.fnt_ksi)
    }

    pub fn fnv(&self) -> Ksi {
        Ksi(self.fnv_ksi)
    }
}

/// Weld filler metal classification (AWS A5.1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldElectrode {
    /// Classification (e.g., "E70XX")
    pub designation: String,
    /// Filler metal classification strength FEXX (ksi)
    pub fexx_ksi: f64,
}

impl WeldElectrode {
    pub fn fexx(&self) -> Ksi {
        Ksi(self.fexx_ksi)
    }
}

/// Result of a registry lookup that may hit any of the three tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Designation {
    Material(Material),
    BoltGrade(BoltGrade),
    WeldElectrode(WeldElectrode),
}

// ============================================================================
// Registries
// ============================================================================

static MATERIALS: Lazy<HashMap<&'static str, Material>> = Lazy::new(|| {
    [
        ("A36", 36.0, 58.0),
        ("A572-GR50", 50.0, 65.0),
        ("A992", 50.0, 65.0),
        ("A529-GR50", 50.0, 65.0),
        ("A500-GRC", 50.0, 62.0),
    ]
    .into_iter()
    .map(|(key, fy, fu)| (key, Material::new(key, fy, fu)))
    .collect()
});

static BOLT_GRADES: Lazy<HashMap<&'static str, BoltGrade>> = Lazy::new(|| {
    // Group A (A325/F1852) and Group B (A490/F2280); N = threads included,
    // X = threads excluded from the shear planes
    [
        ("A325-N", 90.0, 54.0),
        ("A325-X", 90.0, 68.0),
        ("A490-N", 113.0, 68.0),
        ("A490-X", 113.0, 84.0),
    ]
    .into_iter()
    .map(|(key, fnt, fnv)| {
        (
            key,
            BoltGrade {
                designation: key.to_string(),
                fnt_ksi: fnt,
                fnv_ksi: fnv,
            },
        )
    })
    .collect()
});

static WELD_ELECTRODES: Lazy<HashMap<&'static str, WeldElectrode>> = Lazy::new(|| {
    [("E60XX", 60.0), ("E70XX", 70.0), ("E80XX", 80.0)]
        .into_iter()
        .map(|(key, fexx)| {
            (
                key,
                WeldElectrode {
                    designation: key.to_string(),
                    fexx_ksi: fexx,
                },
            )
        })
        .collect()
});

/// Normalize a designation to its registry key
pub fn normalize_designation(designation: &str) -> String {
    let key = designation.trim().to_uppercase().replace([' ', '_', '.'], "-");
    // "A325N" and "A490X" are common shorthand for the dashed form
    match key.as_str() {
        "A325N" | "A325X" | "A490N" | "A490X" => format!("{}-{}", &key[..4], &key[4..]),
        "A572-50" | "A572GR50" => "A572-GR50".to_string(),
        _ => key,
    }
}

/// Look up a structural steel material
pub fn material(designation: &str) -> CalcResult<Material> {
    MATERIALS
        .get(normalize_designation(designation).as_str())
        .cloned()
        .ok_or_else(|| CalcError::unknown_designation("material", designation))
}

/// Look up a bolt grade
pub fn bolt_grade(designation: &str) -> CalcResult<BoltGrade> {
    BOLT_GRADES
        .get(normalize_designation(designation).as_str())
        .cloned()
        .ok_or_else(|| CalcError::unknown_designation("bolt grade", designation))
}

/// Look up a weld electrode
pub fn weld_electrode(designation: &str) -> CalcResult<WeldElectrode> {
    WELD_ELECTRODES
        .get(normalize_designation(designation).as_str())
        .cloned()
        .ok_or_else(|| CalcError::unknown_designation("weld electrode", designation))
}

/// Look up a designation in every registry.
///
/// The three tables use disjoint keys, so at most one can match.
pub fn lookup(designation: &str) -> CalcResult<Designation> {
    if let Ok(m) = material(designation) {
        return Ok(Designation::Material(m));
    }
    if let Ok(b) = bolt_grade(designation) {
        return Ok(Designation::BoltGrade(b));
    }
    if let Ok(w) = weld_electrode(designation) {
        return Ok(Designation::WeldElectrode(w));
    }
    Err(CalcError::unknown_designation("any", designation))
}

/// All registered steel designations, sorted
pub fn material_designations() -> Vec<&'static str> {
    let mut keys: Vec<_> = MATERIALS.keys().copied().collect();
    keys.sort_unstable();
    keys
}
