//! # Design Settings
//!
//! Resistance factors, bolt-hole allowances, and the acceptance limit used by
//! every limit-state calculator. Defaults follow AISC 360-16 (LRFD); a project
//! can override any value from JSON.
//!
//! ## Example
//!
//! ```rust
//! use conn_core::settings::DesignSettings;
//!
//! let json = r#"{ "resistance_factors": { "block_shear": 0.70 } }"#;
//! let settings = DesignSettings::from_json(json).unwrap();
//! assert_eq!(settings.resistance_factors.block_shear, 0.70);
//! assert_eq!(settings.resistance_factors.tensile_yielding, 0.90);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// LRFD resistance factors (φ) per limit state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResistanceFactors {
    /// Bolt shear rupture (J3.6)
    pub bolt_shear: f64,
    /// Bolt tension, including combined tension and shear (J3.6, J3.7)
    pub bolt_tension: f64,
    /// Bearing and tearout at bolt holes (J3.10)
    pub bolt_bearing: f64,
    /// Tensile yielding on the gross section (J4.1a)
    pub tensile_yielding: f64,
    /// Tensile rupture on the effective net section (J4.1b)
    pub tensile_rupture: f64,
    /// Block shear rupture (J4.3)
    pub block_shear: f64,
    /// Shear yielding (J4.2a)
    pub shear_yielding: f64,
    /// Shear rupture (J4.2b)
    pub shear_rupture: f64,
    /// Compression of connecting elements (J4.4)
    pub compression: f64,
    /// Web local yielding (J10.2)
    pub web_local_yielding: f64,
    /// Web local crippling (J10.3)
    pub web_crippling: f64,
    /// Fillet weld rupture (J2.4)
    pub weld: f64,
}

impl Default for ResistanceFactors {
    fn default() -> Self {
        ResistanceFactors {
            bolt_shear: 0.75,
            bolt_tension: 0.75,
            bolt_bearing: 0.75,
            tensile_yielding: 0.90,
            tensile_rupture: 0.75,
            block_shear: 0.75,
            shear_yielding: 1.00,
            shear_rupture: 0.75,
            compression: 0.90,
            web_local_yielding: 1.00,
            web_crippling: 0.75,
            weld: 0.75,
        }
    }
}

impl ResistanceFactors {
    fn named(&self) -> [(&'static str, f64); 12] {
        [
            ("bolt_shear", self.bolt_shear),
            ("bolt_tension", self.bolt_tension),
            ("bolt_bearing", self.bolt_bearing),
            ("tensile_yielding", self.tensile_yielding),
            ("tensile_rupture", self.tensile_rupture),
            ("block_shear", self.block_shear),
            ("shear_yielding", self.shear_yielding),
            ("shear_rupture", self.shear_rupture),
            ("compression", self.compression),
            ("web_local_yielding", self.web_local_yielding),
            ("web_crippling", self.web_crippling),
            ("weld", self.weld),
        ]
    }
}

/// Bolt-hole size allowances (AISC 360 Table J3.3 and B4.3b)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoleAllowances {
    /// Standard hole oversize over the bolt diameter (in); used for clear distance
    pub standard_oversize_in: f64,
    /// Total allowance over the bolt diameter for net-area deductions (in)
    pub net_area_allowance_in: f64,
}

impl Default for HoleAllowances {
    fn default() -> Self {
        HoleAllowances {
            standard_oversize_in: 1.0 / 16.0,
            net_area_allowance_in: 1.0 / 8.0,
        }
    }
}

/// Settings shared by all limit-state calculators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Resistance factors per limit state
    pub resistance_factors: ResistanceFactors,

    /// Hole allowances for bearing and net-area checks
    pub holes: HoleAllowances,

    /// Whitmore spread angle each side of the fastener pattern (degrees)
    pub whitmore_angle_deg: f64,

    /// Effective length factor for gusset buckling on the Whitmore section
    pub gusset_k_factor: f64,

    /// Largest DCR that still passes
    pub dcr_limit: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            resistance_factors: ResistanceFactors::default(),
            holes: HoleAllowances::default(),
            whitmore_angle_deg: 30.0,
            gusset_k_factor: 0.5,
            dcr_limit: 1.0,
        }
    }
}

impl DesignSettings {
    /// Parse settings from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: DesignSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate ranges of all settings.
    pub fn validate(&self) -> CalcResult<()> {
        for (name, phi) in self.resistance_factors.named() {
            if !(phi > 0.0 && phi <= 1.0) {
                return Err(CalcError::invalid_input(
                    format!("resistance_factors.{}", name),
                    phi.to_string(),
                    "Resistance factor must be in (0, 1]",
                ));
            }
        }
        if self.holes.standard_oversize_in < 0.0 || self.holes.net_area_allowance_in < 0.0 {
            return Err(CalcError::invalid_input(
                "holes",
                format!("{:?}", self.holes),
                "Hole allowances cannot be negative",
            ));
        }
        if !(self.whitmore_angle_deg > 0.0 && self.whitmore_angle_deg < 90.0) {
            return Err(CalcError::invalid_input(
                "whitmore_angle_deg",
                self.whitmore_angle_deg.to_string(),
                "Spread angle must be between 0 and 90 degrees",
            ));
        }
        if self.gusset_k_factor <= 0.0 {
            return Err(CalcError::invalid_input(
                "gusset_k_factor",
                self.gusset_k_factor.to_string(),
                "K factor must be positive",
            ));
        }
        if self.dcr_limit <= 0.0 {
            return Err(CalcError::invalid_input(
                "dcr_limit",
                self.dcr_limit.to_string(),
                "DCR limit must be positive",
            ));
        }
        Ok(())
    }
}
