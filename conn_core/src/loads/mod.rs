//! Design loads and interface force distribution
//!
//! A braced-frame connection sees three factored loads: the brace axial force
//! `Pu`, the beam end shear `Vu`, and the transfer force `Aub` carried through
//! the connection from the adjacent bay. The UFM turns the brace force into
//! four interface components through [`LoadMultipliers`]; [`AppliedLoads`]
//! adds the beam shear and transfer force on top.
//!
//! # Overview
//!
//! - [`DesignLoads`] - The three factored input loads
//! - [`LoadMultipliers`] - Dimensionless fractions of `Pu` per interface component
//! - [`AppliedLoads`] - Final interface forces, built once by [`AppliedLoads::from_ufm`]
//! - [`Interface`] / [`InterfaceForces`] - Per-interface view of the result
//!
//! # Example
//!
//! ```
//! use conn_core::loads::{AppliedLoads, DesignLoads, Interface, LoadMultipliers};
//! use conn_core::units::Kips;
//!
//! let loads = DesignLoads::new(Kips(840.0), Kips(50.0), Kips(100.0));
//! let multipliers = LoadMultipliers {
//!     shear_at_column: 0.3592,
//!     normal_at_column: 0.2095,
//!     shear_at_beam: 0.5242,
//!     normal_at_beam: 0.3203,
//! };
//! let applied = AppliedLoads::from_ufm(loads, multipliers);
//! let column = applied.interface(Interface::GussetToColumn);
//! assert!((column.shear.0 - 351.7).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::Kips;

/// Factored loads acting on the connection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignLoads {
    /// Brace axial force
    pub pu: Kips,
    /// Beam end shear
    pub vu: Kips,
    /// Transfer force along the beam
    pub aub: Kips,
}

impl DesignLoads {
    pub fn new(pu: Kips, vu: Kips, aub: Kips) -> Self {
        DesignLoads { pu, vu, aub }
    }

    /// Brace force only, no beam shear or transfer force
    pub fn brace_only(pu: Kips) -> Self {
        DesignLoads::new(pu, Kips(0.0), Kips(0.0))
    }
}

/// Fractions of the brace force resolved at each interface.
///
/// Produced by the UFM solver; each value is a dimensionless ratio of `Pu`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadMultipliers {
    /// Vertical shear at the gusset-to-column interface (β/r)
    pub shear_at_column: f64,
    /// Horizontal shear at the gusset-to-beam interface (α/r)
    pub shear_at_beam: f64,
    /// Horizontal normal force at the gusset-to-column interface (ec/r)
    pub normal_at_column: f64,
    /// Vertical normal force at the gusset-to-beam interface (eb/r)
    pub normal_at_beam: f64,
}

/// The two gusset interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interface {
    GussetToColumn,
    GussetToBeam,
}

impl Interface {
    pub fn display_name(&self) -> &'static str {
        match self {
            Interface::GussetToColumn => "Gusset-to-Column",
            Interface::GussetToBeam => "Gusset-to-Beam",
        }
    }
}

/// Shear and normal force on one interface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterfaceForces {
    pub shear: Kips,
    pub normal: Kips,
}

impl InterfaceForces {
    /// Vector resultant of shear and normal
    pub fn resultant(&self) -> Kips {
        Kips(self.shear.0.hypot(self.normal.0))
    }

    /// Angle of the resultant from the interface's longitudinal axis (degrees)
    pub fn load_angle_deg(&self) -> f64 {
        self.normal.0.abs().atan2(self.shear.0.abs()).to_degrees()
    }
}

/// Final forces at the gusset interfaces.
///
/// Fields are private: the only constructor is [`AppliedLoads::from_ufm`],
/// which performs the whole superposition in one step. Deserializing reads
/// only the design loads and multipliers and recomputes the forces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "AppliedLoadsRecord")]
pub struct AppliedLoads {
    gusset_to_column_shear: Kips,
    gusset_to_column_normal: Kips,
    gusset_to_beam_shear: Kips,
    gusset_to_beam_normal: Kips,
    design_loads: DesignLoads,
    multipliers: LoadMultipliers,
}

/// Serialized inputs of an [`AppliedLoads`]; the interface forces are derived
#[derive(Deserialize)]
struct AppliedLoadsRecord {
    design_loads: DesignLoads,
    multipliers: LoadMultipliers,
}

impl From<AppliedLoadsRecord> for AppliedLoads {
    fn from(record: AppliedLoadsRecord) -> Self {
        AppliedLoads::from_ufm(record.design_loads, record.multipliers)
    }
}

impl AppliedLoads {
    /// Distribute the brace force and superimpose `Vu` and `Aub` on the
    /// gusset-to-column interface.
    pub fn from_ufm(design_loads: DesignLoads, multipliers: LoadMultipliers) -> Self {
        let pu = design_loads.pu;
        let applied = AppliedLoads {
            gusset_to_column_shear: pu * multipliers.shear_at_column + design_loads.vu,
            gusset_to_column_normal: pu * multipliers.normal_at_column + design_loads.aub,
            gusset_to_beam_shear: pu * multipliers.shear_at_beam,
            gusset_to_beam_normal: pu * multipliers.normal_at_beam,
            design_loads,
            multipliers,
        };
        log::debug!(
            "Applied loads: column V={:.1} N={:.1}, beam V={:.1} N={:.1} kip",
            applied.gusset_to_column_shear.0,
            applied.gusset_to_column_normal.0,
            applied.gusset_to_beam_shear.0,
            applied.gusset_to_beam_normal.0
        );
        applied
    }

    pub fn gusset_to_column_shear(&self) -> Kips {
        self.gusset_to_column_shear
    }

    pub fn gusset_to_column_normal(&self) -> Kips {
        self.gusset_to_column_normal
    }

    pub fn gusset_to_beam_shear(&self) -> Kips {
        self.gusset_to_beam_shear
    }

    pub fn gusset_to_beam_normal(&self) -> Kips {
        self.gusset_to_beam_normal
    }

    /// The loads this snapshot was built from
    pub fn design_loads(&self) -> DesignLoads {
        self.design_loads
    }

    pub fn multipliers(&self) -> LoadMultipliers {
        self.multipliers
    }

    /// Shear/normal pair on one interface
    pub fn interface(&self, interface: Interface) -> InterfaceForces {
        match interface {
            Interface::GussetToColumn => InterfaceForces {
                shear: self.gusset_to_column_shear,
                normal: self.gusset_to_column_normal,
            },
            Interface::GussetToBeam => InterfaceForces {
                shear: self.gusset_to_beam_shear,
                normal: self.gusset_to_beam_normal,
            },
        }
    }
}
