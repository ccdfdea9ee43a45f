//! # Whitmore Section
//!
//! The brace force spreads into the gusset at 30° each side of the bolt
//! pattern; the effective width at the last bolt row is
//!
//! ```text
//! lw = (n_rows − 1)·s_row + 2·(n_cols − 1)·s_col·tan(30°)
//! ```
//!
//! Yielding (J4-1) and compression buckling (J4.4, chapter E) are checked on
//! `lw × t`. For buckling the gusset strip is treated as a column of radius of
//! gyration `t/√12` with effective length factor K (0.5 by default).

use std::f64::consts::PI;

use crate::calculations::LimitState;
use crate::connections::{BoltConfiguration, Connection};
use crate::errors::{CalcError, CalcResult};
use crate::members::Member;
use crate::settings::DesignSettings;
use crate::trace::{CalcTrace, TraceSection};
use crate::units::{Inches, Kips, Ksi};

/// KL/r at or below which J4.4 allows Fcr = Fy
const SHORT_STRIP_SLENDERNESS: f64 = 25.0;

/// Whitmore width for a bolt pattern and spread angle
pub fn whitmore_width(bolts: &BoltConfiguration, spread_angle_deg: f64) -> Inches {
    let spread = 2.0 * bolts.pattern_length().0 * spread_angle_deg.to_radians().tan();
    Inches(bolts.pattern_gage().0 + spread)
}

/// Yielding of the gusset on the Whitmore section, φ·Fy·lw·t
#[derive(Clone)]
pub struct WhitmoreYieldingCalculator<'a> {
    member: &'a dyn Member,
    bolts: &'a BoltConfiguration,
    settings: DesignSettings,
}

impl<'a> WhitmoreYieldingCalculator<'a> {
    pub fn new(member: &'a dyn Member, connection: &'a Connection) -> CalcResult<Self> {
        let bolts = connection.bolted_for("WhitmoreYieldingCalculator")?;
        Ok(WhitmoreYieldingCalculator {
            member,
            bolts,
            settings: DesignSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn width(&self) -> Inches {
        whitmore_width(self.bolts, self.settings.whitmore_angle_deg)
    }
}

impl LimitState for WhitmoreYieldingCalculator<'_> {
    fn name(&self) -> &'static str {
        "Whitmore Section Yielding"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J4-1"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let phi = self.settings.resistance_factors.tensile_yielding;
        let fy = self.member.material().fy();
        let t = self.member.thickness();
        let lw = self.width();

        trace.input("Fy", fy);
        trace.input("t", t);
        trace.calc("lw", lw);

        let area = lw * t;
        trace.calc("Aw = lw*t", area);

        let capacity = fy * area * (phi * self.member.loading_condition());
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}

/// Compression buckling of the gusset on the Whitmore section
#[derive(Clone)]
pub struct WhitmoreBucklingCalculator<'a> {
    member: &'a dyn Member,
    bolts: &'a BoltConfiguration,
    unbraced_length: Inches,
    settings: DesignSettings,
}

impl<'a> WhitmoreBucklingCalculator<'a> {
    /// `unbraced_length` is the gusset length from the Whitmore section to the
    /// supporting edge, measured along the brace line
    pub fn new(member: &'a dyn Member, connection: &'a Connection, unbraced_length: Inches) -> CalcResult<Self> {
        let bolts = connection.bolted_for("WhitmoreBucklingCalculator")?;
        if !(unbraced_length.0 > 0.0) {
            return Err(CalcError::invalid_input(
                "unbraced_length",
                unbraced_length.0.to_string(),
                "Unbraced length must be positive",
            ));
        }
        Ok(WhitmoreBucklingCalculator {
            member,
            bolts,
            unbraced_length,
            settings: DesignSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    /// KL/r of the gusset strip
    pub fn slenderness(&self) -> f64 {
        let r = self.member.thickness().0 / 12f64.sqrt();
        self.settings.gusset_k_factor * self.unbraced_length.0 / r
    }

    /// Critical stress Fcr per J4.4 / E3
    pub fn critical_stress(&self) -> Ksi {
        let material = self.member.material();
        let fy = material.fy().0;
        let kl_r = self.slenderness();
        if kl_r <= SHORT_STRIP_SLENDERNESS {
            return Ksi(fy);
        }
        let fe = PI.powi(2) * material.e().0 / kl_r.powi(2);
        if fy / fe <= 2.25 {
            Ksi(0.658_f64.powf(fy / fe) * fy)
        } else {
            Ksi(0.877 * fe)
        }
    }
}

impl LimitState for WhitmoreBucklingCalculator<'_> {
    fn name(&self) -> &'static str {
        "Whitmore Section Buckling"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 J4.4, Eq. E3-2, E3-3"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let phi = self.settings.resistance_factors.compression;
        let t = self.member.thickness();
        let lw = whitmore_width(self.bolts, self.settings.whitmore_angle_deg);

        trace.input("Fy", self.member.material().fy());
        trace.input("E", self.member.material().e());
        trace.input("t", t);
        trace.input("L", self.unbraced_length);
        trace.scalar(TraceSection::Input, "K", self.settings.gusset_k_factor);
        trace.calc("lw", lw);
        trace.scalar(TraceSection::Calculation, "KL/r", self.slenderness());

        let fcr = self.critical_stress();
        trace.calc("Fcr", fcr);

        let capacity = fcr * (lw * t) * (phi * self.member.loading_condition());
        trace.output("phi*Pn", capacity);
        Ok(capacity)
    }
}
