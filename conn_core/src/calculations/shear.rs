//! # Shear Limit States of Connecting Elements
//!
//! Shear yielding on the gross section (J4-3) and shear rupture on the net
//! section through a line of bolt holes (J4-4).

use crate::calculations::LimitState;
use crate::connections::{BoltConfiguration, Connection, LoadingOrientation};
use crate::errors::{CalcError, CalcResult};
use crate::members::{DimensionedPlate, Member};
use crate::settings::DesignSettings;
use crate::trace::{CalcTrace, TraceSection};
use crate::units::{Inches, Kips, SqIn};

fn require_length(field: &str, length: Inches) -> CalcResult<()> {
    if !(length.0 > 0.0) {
        return Err(CalcError::invalid_input(
            field,
            length.0.to_string(),
            "Shear plane length must be positive",
        ));
    }
    Ok(())
}

/// Shear yielding, φ·0.60·Fy·Agv (AISC J4-3)
#[derive(Clone)]
pub struct ShearYieldingCalculator<'a> {
    member: &'a dyn Member,
    shear_length: Inches,
    settings: DesignSettings,
}

impl<'a> ShearYieldingCalculator<'a> {
    /// Shear yielding over a plane of the given length through the member thickness
    pub fn new(member: &'a dyn Member, shear_length: Inches) -> CalcResult<Self> {
        require_length("shear_length", shear_length)?;
        Ok(ShearYieldingCalculator {
            member,
            shear_length,
            settings: DesignSettings::default(),
        })
    }

    /// Shear plane along a welded joint, taking the weld length
    pub fn along_weld(member: &'a dyn Member, connection: &Connection) -> CalcResult<Self> {
        let weld = connection.welded_for("ShearYieldingCalculator")?;
        Self::new(member, weld.length())
    }

    /// Shear plane along the plate length (the gusset-to-beam interface)
    pub fn along_plate_length(plate: &'a DimensionedPlate) -> CalcResult<Self> {
        Self::new(plate, plate.length())
    }

    /// Shear plane along the plate width (the gusset-to-column interface)
    pub fn along_plate_width(plate: &'a DimensionedPlate) -> CalcResult<Self> {
        Self::new(plate, plate.width())
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl LimitState for ShearYieldingCalculator<'_> {
    fn name(&self) -> &'static str {
        "Shear Yielding"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J4-3"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let phi = self.settings.resistance_factors.shear_yielding;
        let fy = self.member.material().fy();
        let t = self.member.thickness();

        trace.input("Fy", fy);
        trace.input("t", t);
        trace.input("L", self.shear_length);

        let agv = self.shear_length * t;
        trace.calc("Agv", agv);
        trace.scalar(TraceSection::Calculation, "phi", phi);

        let capacity = fy * agv * (0.6 * phi * self.member.loading_condition());
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}

/// Shear rupture through a line of bolt holes, φ·0.60·Fu·Anv (AISC J4-4)
#[derive(Clone)]
pub struct ShearRuptureCalculator<'a> {
    member: &'a dyn Member,
    bolts: &'a BoltConfiguration,
    shear_length: Inches,
    orientation: LoadingOrientation,
    settings: DesignSettings,
}

impl<'a> ShearRuptureCalculator<'a> {
    /// Net shear plane of `shear_length` cut by one line of holes parallel to the load
    pub fn new(
        member: &'a dyn Member,
        connection: &'a Connection,
        shear_length: Inches,
        orientation: LoadingOrientation,
    ) -> CalcResult<Self> {
        let bolts = connection.bolted_for("ShearRuptureCalculator")?;
        require_length("shear_length", shear_length)?;
        Ok(ShearRuptureCalculator {
            member,
            bolts,
            shear_length,
            orientation,
            settings: DesignSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn net_area(&self) -> CalcResult<SqIn> {
        let holes = f64::from(self.bolts.lines(self.orientation).bolts_per_line);
        let hole = self.bolts.diameter_in + self.settings.holes.net_area_allowance_in;
        let net_length = self.shear_length.0 - holes * hole;
        if !(net_length > 0.0) {
            return Err(CalcError::geometry_infeasible(
                self.member.label(),
                format!(
                    "{} holes of {:.3} in consume the {:.3} in shear plane",
                    holes, hole, self.shear_length.0
                ),
            ));
        }
        Ok(Inches(net_length) * self.member.thickness())
    }
}

impl LimitState for ShearRuptureCalculator<'_> {
    fn name(&self) -> &'static str {
        "Shear Rupture"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J4-4"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let phi = self.settings.resistance_factors.shear_rupture;
        let fu = self.member.material().fu();

        trace.input("Fu", fu);
        trace.input("t", self.member.thickness());
        trace.input("L", self.shear_length);
        trace.input("d", self.bolts.diameter());

        let anv = self.net_area()?;
        trace.calc("Anv", anv);
        trace.scalar(TraceSection::Calculation, "phi", phi);

        let capacity = fu * anv * (0.6 * phi * self.member.loading_condition());
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::WeldConfiguration;
    use crate::materials::{bolt_grade, material, weld_electrode};
    use crate::members::{Plate, PlateDimensions};
    use approx::assert_relative_eq;

    fn gusset() -> DimensionedPlate {
        Plate::new(1.0, material("A572-GR50").unwrap())
            .unwrap()
            .set_dimensions(PlateDimensions::new(31.5, 22.5).unwrap())
            .unwrap()
    }

    fn end_plate_bolts() -> Connection {
        Connection::bolted(BoltConfiguration {
            grade: bolt_grade("A325-N").unwrap(),
            diameter_in: 1.0,
            n_rows: 6,
            n_columns: 2,
            row_spacing_in: 3.0,
            column_spacing_in: 5.5,
            edge_distance_vertical_in: 1.5,
            edge_distance_horizontal_in: 1.5,
        })
        .unwrap()
    }

    #[test]
    fn test_shear_yielding_along_beam_interface() {
        let gusset = gusset();
        let calc = ShearYieldingCalculator::along_plate_length(&gusset).unwrap();
        assert_relative_eq!(calc.design_capacity().unwrap().0, 945.0, epsilon = 1e-9);

        let column = ShearYieldingCalculator::along_plate_width(&gusset).unwrap();
        assert_relative_eq!(column.design_capacity().unwrap().0, 0.6 * 50.0 * 22.5, epsilon = 1e-9);
    }

    #[test]
    fn test_shear_yielding_along_weld() {
        let gusset = gusset();
        let weld = Connection::welded(WeldConfiguration {
            electrode: weld_electrode("E70XX").unwrap(),
            weld_size_in: 0.3125,
            length_in: 20.0,
            lines: 2,
        })
        .unwrap();
        let calc = ShearYieldingCalculator::along_weld(&gusset, &weld).unwrap();
        assert_relative_eq!(calc.design_capacity().unwrap().0, 600.0, epsilon = 1e-9);

        let bolts = end_plate_bolts();
        let err = ShearYieldingCalculator::along_weld(&gusset, &bolts).err().unwrap();
        assert_eq!(err.error_code(), "CONFIGURATION_MISMATCH");
    }

    #[test]
    fn test_shear_rupture_through_holes() {
        let plate = Plate::new(0.75, material("A36").unwrap())
            .unwrap()
            .set_dimensions(PlateDimensions::new(18.0, 10.0).unwrap())
            .unwrap();
        let connection = end_plate_bolts();
        let calc = ShearRuptureCalculator::new(&plate, &connection, Inches(18.0), LoadingOrientation::Shear).unwrap();

        let anv = calc.net_area().unwrap();
        assert_relative_eq!(anv.0, (18.0 - 6.0 * 1.125) * 0.75, epsilon = 1e-9);
        assert_relative_eq!(
            calc.design_capacity().unwrap().0,
            0.75 * 0.6 * 58.0 * anv.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_shear_rupture_rejects_consumed_plane() {
        let plate = gusset();
        let connection = end_plate_bolts();
        let calc = ShearRuptureCalculator::new(&plate, &connection, Inches(6.0), LoadingOrientation::Shear).unwrap();
        assert_eq!(calc.design_capacity().unwrap_err().error_code(), "GEOMETRY_INFEASIBLE");
    }
}
