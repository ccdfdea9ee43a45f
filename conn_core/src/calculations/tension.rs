//! # Tension Limit States
//!
//! Tensile yielding on the gross section (J4-1), tensile rupture on the
//! effective net section (J4-2 with the D3 shear lag factor), and yielding of
//! a gusset plate on its horizontal or vertical section.

use serde::{Deserialize, Serialize};

use crate::calculations::LimitState;
use crate::connections::{BoltConfiguration, Connection};
use crate::errors::{CalcError, CalcResult};
use crate::members::{DimensionedPlate, Member, MemberKind};
use crate::settings::DesignSettings;
use crate::trace::{CalcTrace, TraceSection};
use crate::units::{Kips, Quantity, SqIn};

/// Tensile yielding in the gross section, φ·Fy·Ag (AISC J4-1)
#[derive(Clone)]
pub struct TensileYieldingCalculator<'a> {
    member: &'a dyn Member,
    settings: DesignSettings,
}

impl<'a> TensileYieldingCalculator<'a> {
    pub fn new(member: &'a dyn Member) -> Self {
        TensileYieldingCalculator {
            member,
            settings: DesignSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl LimitState for TensileYieldingCalculator<'_> {
    fn name(&self) -> &'static str {
        "Tensile Yielding"
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
        let ag = self.member.gross_area()?;
        let lc = self.member.loading_condition();

        trace.input("Fy", fy);
        trace.input("Ag", ag);
        trace.scalar(TraceSection::Input, "loading condition", lc);

        let nominal = fy * ag;
        trace.calc("Rn = Fy*Ag", nominal);
        trace.scalar(TraceSection::Calculation, "phi", phi);

        let capacity = nominal * (phi * lc);
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}

/// Tensile rupture on the effective net area, φ·Fu·An·U (AISC J4-2)
#[derive(Clone)]
pub struct TensileRuptureCalculator<'a> {
    member: &'a dyn Member,
    bolts: &'a BoltConfiguration,
    settings: DesignSettings,
}

impl<'a> TensileRuptureCalculator<'a> {
    pub fn new(member: &'a dyn Member, connection: &'a Connection) -> CalcResult<Self> {
        let bolts = connection.bolted_for("TensileRuptureCalculator")?;
        Ok(TensileRuptureCalculator {
            member,
            bolts,
            settings: DesignSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Net area An = Ag − n_rows·(d + allowance)·t
    pub fn net_area(&self) -> CalcResult<SqIn> {
        let ag = self.member.gross_area()?;
        let hole = self.bolts.diameter_in + self.settings.holes.net_area_allowance_in;
        let an = ag.0 - f64::from(self.bolts.n_rows) * hole * self.member.thickness().0;
        if !(an > 0.0) {
            return Err(CalcError::geometry_infeasible(
                self.member.label(),
                format!("net area {:.3} in² after hole deductions is not positive", an),
            ));
        }
        Ok(SqIn(an))
    }

    /// Shear lag factor U = 1 − x̄/l; plates connected through their full width take U = 1
    pub fn shear_lag_factor(&self) -> CalcResult<f64> {
        if self.member.kind() == MemberKind::Plate {
            return Ok(1.0);
        }
        let x_bar = self.member.connection_eccentricity()?;
        let l = self.bolts.pattern_length();
        if !(l.0 > 0.0) {
            return Err(CalcError::geometry_infeasible(
                self.member.label(),
                "a single bolt column has no connection length for shear lag",
            ));
        }
        let u = 1.0 - x_bar.0 / l.0;
        if !(u > 0.0) {
            return Err(CalcError::geometry_infeasible(
                self.member.label(),
                format!("shear lag factor U = {:.3} is not positive (x̄ = {:.3}, l = {:.3})", u, x_bar.0, l.0),
            ));
        }
        Ok(u)
    }
}

impl LimitState for TensileRuptureCalculator<'_> {
    fn name(&self) -> &'static str {
        "Tensile Rupture"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J4-2, Table D3.1"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let phi = self.settings.resistance_factors.tensile_rupture;
        let fu = self.member.material().fu();
        let lc = self.member.loading_condition();

        trace.input("Fu", fu);
        trace.input("t", self.member.thickness());
        trace.input("d", self.bolts.diameter());
        trace.scalar(TraceSection::Input, "n_rows", f64::from(self.bolts.n_rows));

        let an = self.net_area()?;
        let u = self.shear_lag_factor()?;
        trace.calc("An", an);
        trace.scalar(TraceSection::Calculation, "U", u);

        let ae = an * u;
        trace.calc("Ae = An*U", ae);

        let capacity = fu * ae * (phi * lc);
        trace.scalar(TraceSection::Calculation, "phi", phi);
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}

/// Which plate section resists the load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateLoadDirection {
    /// Vertical load on the horizontal section (length × t)
    Vertical,
    /// Horizontal load on the vertical section (width × t)
    Horizontal,
}

/// Tensile yielding of a dimensioned plate on one of its sections
#[derive(Debug, Clone)]
pub struct PlateTensileYieldingCalculator<'a> {
    plate: &'a DimensionedPlate,
    direction: PlateLoadDirection,
    settings: DesignSettings,
}

impl<'a> PlateTensileYieldingCalculator<'a> {
    pub fn new(plate: &'a DimensionedPlate, direction: PlateLoadDirection) -> Self {
        PlateTensileYieldingCalculator {
            plate,
            direction,
            settings: DesignSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    fn along(&self, direction: PlateLoadDirection) -> Self {
        PlateTensileYieldingCalculator {
            direction,
            ..self.clone()
        }
    }

    /// φ·Fy·length·t
    pub fn capacity_vertical(&self) -> CalcResult<Kips> {
        self.along(PlateLoadDirection::Vertical).design_capacity()
    }

    /// φ·Fy·width·t
    pub fn capacity_horizontal(&self) -> CalcResult<Kips> {
        self.along(PlateLoadDirection::Horizontal).design_capacity()
    }

    pub fn check_dcr_vertical(&self, demand: Quantity) -> CalcResult<f64> {
        self.along(PlateLoadDirection::Vertical).check_dcr(demand)
    }

    pub fn check_dcr_horizontal(&self, demand: Quantity) -> CalcResult<f64> {
        self.along(PlateLoadDirection::Horizontal).check_dcr(demand)
    }
}

impl LimitState for PlateTensileYieldingCalculator<'_> {
    fn name(&self) -> &'static str {
        match self.direction {
            PlateLoadDirection::Vertical => "Plate Tensile Yielding (Vertical)",
            PlateLoadDirection::Horizontal => "Plate Tensile Yielding (Horizontal)",
        }
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J4-1"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let phi = self.settings.resistance_factors.tensile_yielding;
        let fy = self.plate.material().fy();
        let area = match self.direction {
            PlateLoadDirection::Vertical => {
                trace.input("length", self.plate.length());
                self.plate.horizontal_section_area()
            }
            PlateLoadDirection::Horizontal => {
                trace.input("width", self.plate.width());
                self.plate.vertical_section_area()
            }
        };
        trace.input("t", self.plate.thickness());
        trace.input("Fy", fy);
        trace.calc("Ag", area);

        let capacity = fy * area * (phi * self.plate.loading_condition());
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{bolt_grade, builtin_connection_shapes, material};
    use crate::members::{Plate, PlateDimensions, ShapeMember};
    use approx::assert_relative_eq;

    fn brace_connection() -> Connection {
        Connection::bolted(BoltConfiguration {
            grade: bolt_grade("A325-X").unwrap(),
            diameter_in: 0.875,
            n_rows: 2,
            n_columns: 7,
            row_spacing_in: 3.0,
            column_spacing_in: 3.0,
            edge_distance_vertical_in: 2.0,
            edge_distance_horizontal_in: 1.5,
        })
        .unwrap()
    }

    fn brace() -> ShapeMember {
        let db = builtin_connection_shapes();
        ShapeMember::from_db(&db, "L8X6X1", material("A36").unwrap())
            .unwrap()
            .with_loading_condition(2.0)
    }

    fn gusset() -> DimensionedPlate {
        Plate::new(1.0, material("A572-GR50").unwrap())
            .unwrap()
            .set_dimensions(PlateDimensions::new(31.53, 22.5).unwrap())
            .unwrap()
    }

    #[test]
    fn test_plate_tensile_yielding_strap() {
        let strap = Plate::new(0.5, material("A36").unwrap())
            .unwrap()
            .set_dimensions(PlateDimensions::new(12.0, 4.0).unwrap())
            .unwrap();
        let calc = TensileYieldingCalculator::new(&strap);
        assert_relative_eq!(calc.design_capacity().unwrap().0, 64.8, epsilon = 1e-9);
    }

    #[test]
    fn test_undimensioned_plate_fails() {
        let plate = Plate::new(0.5, material("A36").unwrap()).unwrap();
        let err = TensileYieldingCalculator::new(&plate).design_capacity().unwrap_err();
        assert_eq!(err.error_code(), "MISSING_PROPERTY");
    }

    #[test]
    fn test_double_angle_yielding() {
        let brace = brace();
        let capacity = TensileYieldingCalculator::new(&brace).design_capacity().unwrap();
        assert_relative_eq!(capacity.0, 0.9 * 36.0 * 13.0 * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_double_angle_rupture() {
        let brace = brace();
        let connection = brace_connection();
        let calc = TensileRuptureCalculator::new(&brace, &connection).unwrap();

        assert_relative_eq!(calc.net_area().unwrap().0, 11.0, epsilon = 1e-9);
        let u = calc.shear_lag_factor().unwrap();
        assert_relative_eq!(u, 1.0 - 1.65 / 18.0, epsilon = 1e-9);
        assert_relative_eq!(
            calc.design_capacity().unwrap().0,
            0.75 * 58.0 * 11.0 * u * 2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rupture_plate_has_no_shear_lag() {
        let gusset = gusset();
        let connection = brace_connection();
        let calc = TensileRuptureCalculator::new(&gusset, &connection).unwrap();
        assert_eq!(calc.shear_lag_factor().unwrap(), 1.0);
    }

    #[test]
    fn test_rupture_single_column_is_infeasible() {
        let brace = brace();
        let mut bolts = brace_connection().as_bolted().unwrap().clone();
        bolts.n_columns = 1;
        let connection = Connection::bolted(bolts).unwrap();
        let calc = TensileRuptureCalculator::new(&brace, &connection).unwrap();
        assert_eq!(calc.design_capacity().unwrap_err().error_code(), "GEOMETRY_INFEASIBLE");
    }

    #[test]
    fn test_gusset_plate_directions() {
        let gusset = gusset();
        let calc = PlateTensileYieldingCalculator::new(&gusset, PlateLoadDirection::Vertical);

        assert_relative_eq!(calc.capacity_vertical().unwrap().0, 0.9 * 50.0 * 31.53, epsilon = 1e-9);
        assert_relative_eq!(calc.capacity_horizontal().unwrap().0, 0.9 * 50.0 * 22.5, epsilon = 1e-9);

        let dcr = calc.check_dcr_vertical(Quantity::kips(269.0)).unwrap();
        assert_relative_eq!(dcr, 0.19, epsilon = 0.005);
        let dcr_h = calc.check_dcr_horizontal(Quantity::kips(269.0)).unwrap();
        assert!(dcr_h > dcr);
        assert_ne!(
            calc.name(),
            PlateTensileYieldingCalculator::new(&gusset, PlateLoadDirection::Horizontal).name()
        );
    }
}
