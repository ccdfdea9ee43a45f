//! # Block Shear Rupture
//!
//! AISC 360-16 J4.3: a block of material tears out along shear planes
//! parallel to the load and a tension plane across it.
//!
//! ```text
//! Rn = min(0.60·Fy·Agv, 0.60·Fu·Anv) + Ubs·Fu·Ant        (J4-5)
//! ```
//!
//! Both path totals are reported, shear yielding plus tension rupture and
//! shear rupture plus tension rupture; the lesser governs.
//!
//! ## Failure Patterns
//!
//! ```text
//!   L-pattern (angles, or any shear load)    U-pattern (plates, axial load)
//!
//!    +---------------------------            +---------------------------
//!    |  o   o   o   o   o   o   o  <- Agv    |  o---o---o---o---o---o---o  <- Agv
//!    |  |                                    |  |
//!    |  o   o   o   o   o   o   o            |  o---o---o---o---o---o---o  <- Agv
//!    |  ^ Ant to the free edge               |  ^ Ant between the outer rows
//! ```
//!
//! Areas are multiplied by the member's loading condition so a double angle
//! tears out on both legs.

use serde::{Deserialize, Serialize};

use crate::calculations::LimitState;
use crate::connections::{BoltConfiguration, BoltLines, Connection, LoadingOrientation};
use crate::errors::{CalcError, CalcResult};
use crate::members::{Member, MemberKind};
use crate::settings::DesignSettings;
use crate::trace::{CalcTrace, TraceSection};
use crate::units::{Kips, SqIn};

/// Block tear-out shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePattern {
    /// One shear plane and a tension plane to the free edge
    L,
    /// Two shear planes and a tension plane between them
    U,
}

/// Gross shear, net shear, and net tension areas of the block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockShearAreas {
    pub agv: SqIn,
    pub anv: SqIn,
    pub ant: SqIn,
}

/// Nominal strength of each failure path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockShearPaths {
    /// 0.60·Fy·Agv + Ubs·Fu·Ant
    pub shear_yielding: Kips,
    /// 0.60·Fu·Anv + Ubs·Fu·Ant
    pub shear_rupture: Kips,
}

impl BlockShearPaths {
    /// Governing nominal strength Rn
    pub fn governing(&self) -> Kips {
        self.shear_yielding.min(self.shear_rupture)
    }
}

#[derive(Clone)]
pub struct BlockShearCalculator<'a> {
    member: &'a dyn Member,
    bolts: &'a BoltConfiguration,
    orientation: LoadingOrientation,
    ubs: f64,
    settings: DesignSettings,
}

impl<'a> BlockShearCalculator<'a> {
    pub fn new(member: &'a dyn Member, connection: &'a Connection, orientation: LoadingOrientation) -> CalcResult<Self> {
        let bolts = connection.bolted_for("BlockShearCalculator")?;
        Ok(BlockShearCalculator {
            member,
            bolts,
            orientation,
            ubs: 1.0,
            settings: DesignSettings::default(),
        })
    }

    /// Tension stress distribution factor; 0.5 for non-uniform tension
    pub fn with_ubs(mut self, ubs: f64) -> Self {
        self.ubs = ubs;
        self
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn failure_pattern(&self) -> FailurePattern {
        if self.orientation == LoadingOrientation::Shear || self.member.kind() == MemberKind::Angle {
            FailurePattern::L
        } else {
            FailurePattern::U
        }
    }

    fn hole(&self) -> f64 {
        self.bolts.diameter_in + self.settings.holes.net_area_allowance_in
    }

    /// Gross and net lengths of one line of holes, edge bolt included
    fn line_lengths(&self, line: BoltLines) -> (f64, f64) {
        let n = f64::from(line.bolts_per_line);
        let gross = line.spacing.0 * (n - 1.0) + line.edge_distance.0;
        (gross, gross - (n - 0.5) * self.hole())
    }

    pub fn areas(&self) -> CalcResult<BlockShearAreas> {
        let t = self.member.thickness().0;
        let lc = self.member.loading_condition();
        let along = self.bolts.lines(self.orientation);
        let across = self.bolts.lines(match self.orientation {
            LoadingOrientation::Axial => LoadingOrientation::Shear,
            LoadingOrientation::Shear => LoadingOrientation::Axial,
        });

        let (shear_gross, shear_net) = self.line_lengths(along);
        let (planes, tension_net) = match self.failure_pattern() {
            FailurePattern::L => (1.0, self.line_lengths(across).1),
            FailurePattern::U => {
                let gaps = f64::from(across.bolts_per_line.saturating_sub(1));
                (2.0, across.spacing.0 * gaps - gaps * self.hole())
            }
        };

        let areas = BlockShearAreas {
            agv: SqIn(shear_gross * t * lc * planes),
            anv: SqIn(shear_net * t * lc * planes),
            ant: SqIn(tension_net * t * lc),
        };
        if !(areas.anv.0 > 0.0) || areas.ant.0 < 0.0 {
            return Err(CalcError::geometry_infeasible(
                self.member.label(),
                format!(
                    "block shear net areas Anv = {:.3} in², Ant = {:.3} in² are not feasible",
                    areas.anv.0, areas.ant.0
                ),
            ));
        }
        Ok(areas)
    }

    /// Nominal strength of both failure paths
    pub fn paths(&self) -> CalcResult<BlockShearPaths> {
        let areas = self.areas()?;
        Ok(self.paths_for(&areas))
    }

    fn paths_for(&self, areas: &BlockShearAreas) -> BlockShearPaths {
        let material = self.member.material();
        let tension = material.fu() * areas.ant * self.ubs;
        BlockShearPaths {
            shear_yielding: material.fy() * areas.agv * 0.6 + tension,
            shear_rupture: material.fu() * areas.anv * 0.6 + tension,
        }
    }
}

impl LimitState for BlockShearCalculator<'_> {
    fn name(&self) -> &'static str {
        "Block Shear"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J4-5"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let phi = self.settings.resistance_factors.block_shear;
        trace.input("Fy", self.member.material().fy());
        trace.input("Fu", self.member.material().fu());
        trace.input("t", self.member.thickness());
        trace.scalar(TraceSection::Input, "loading condition", self.member.loading_condition());
        trace.scalar(
            TraceSection::Input,
            "U-pattern",
            if self.failure_pattern() == FailurePattern::U { 1.0 } else { 0.0 },
        );

        let areas = self.areas()?;
        trace.calc("Agv", areas.agv);
        trace.calc("Anv", areas.anv);
        trace.calc("Ant", areas.ant);
        trace.scalar(TraceSection::Calculation, "Ubs", self.ubs);

        let paths = self.paths_for(&areas);
        trace.calc("0.6*Fy*Agv + Ubs*Fu*Ant", paths.shear_yielding);
        trace.calc("0.6*Fu*Anv + Ubs*Fu*Ant", paths.shear_rupture);
        trace.calc("Rn", paths.governing());

        let capacity = paths.governing() * phi;
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}
