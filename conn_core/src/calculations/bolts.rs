//! # Bolt Limit States
//!
//! Shear rupture of the bolts (J3.6), bolt tension with the shear interaction
//! (J3.7), and bearing/tearout at the bolt holes (J3.10).
//!
//! ## Bearing and Tearout
//!
//! Each bolt is limited by the least of bolt shear, bearing `2.4·d·t·Fu`, and
//! tearout `1.2·lc·t·Fu`, where the clear distance `lc` is measured in the
//! direction of load to the next hole (inner bolts) or to the loaded edge
//! (end bolts). The group strength sums inner and end bolts line by line.
//!
//! ```text
//!   load <--   o------o------o------o  |edge
//!                 lc_inner       lc_end
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::LimitState;
use crate::connections::{BoltConfiguration, Connection, LoadingOrientation};
use crate::errors::{CalcError, CalcResult};
use crate::members::Member;
use crate::settings::DesignSettings;
use crate::trace::{CalcTrace, TraceSection};
use crate::units::{Inches, Kips, Ksi};

// ============================================================================
// Bolt Shear
// ============================================================================

/// Bolt shear rupture, φ·Fnv·Ab per shear plane (AISC J3-1)
#[derive(Debug, Clone)]
pub struct BoltShearCalculator<'a> {
    bolts: &'a BoltConfiguration,
    shear_planes: u32,
    settings: DesignSettings,
}

impl<'a> BoltShearCalculator<'a> {
    /// Bolt shear for a bolted connection; `shear_planes` is 1 (single) or 2 (double)
    pub fn new(connection: &'a Connection, shear_planes: u32) -> CalcResult<Self> {
        let bolts = connection.bolted_for("BoltShearCalculator")?;
        if shear_planes < 1 {
            return Err(CalcError::invalid_input(
                "shear_planes",
                shear_planes.to_string(),
                "At least one shear plane is required",
            ));
        }
        Ok(BoltShearCalculator {
            bolts,
            shear_planes,
            settings: DesignSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Design shear strength of a single bolt
    pub fn per_bolt(&self) -> Kips {
        let phi = self.settings.resistance_factors.bolt_shear;
        self.bolts.grade.fnv() * self.bolts.bolt_area() * (f64::from(self.shear_planes) * phi)
    }
}

impl LimitState for BoltShearCalculator<'_> {
    fn name(&self) -> &'static str {
        "Bolt Shear"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J3-1"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    /// Group strength: per-bolt strength times the number of bolts
    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let n = self.bolts.bolt_count();
        trace.input("Fnv", self.bolts.grade.fnv());
        trace.input("d", self.bolts.diameter());
        trace.calc("Ab", self.bolts.bolt_area());
        trace.scalar(TraceSection::Input, "Ns", f64::from(self.shear_planes));
        trace.scalar(TraceSection::Input, "n_bolts", f64::from(n));
        trace.scalar(TraceSection::Calculation, "phi", self.settings.resistance_factors.bolt_shear);

        let per_bolt = self.per_bolt();
        trace.calc("phi*rn (per bolt)", per_bolt);

        let capacity = per_bolt * f64::from(n);
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}

// ============================================================================
// Bolt Tension
// ============================================================================

/// Bolt tension reduced for coexisting shear (AISC J3-2, J3-3a)
#[derive(Debug, Clone)]
pub struct BoltTensionCalculator<'a> {
    bolts: &'a BoltConfiguration,
    required_shear_stress: Ksi,
    settings: DesignSettings,
}

impl<'a> BoltTensionCalculator<'a> {
    /// `required_shear_stress` is frv, the factored shear stress per bolt
    pub fn new(connection: &'a Connection, required_shear_stress: Ksi) -> CalcResult<Self> {
        let bolts = connection.bolted_for("BoltTensionCalculator")?;
        if required_shear_stress.0 < 0.0 {
            return Err(CalcError::invalid_input(
                "required_shear_stress",
                required_shear_stress.0.to_string(),
                "Shear stress cannot be negative",
            ));
        }
        Ok(BoltTensionCalculator {
            bolts,
            required_shear_stress,
            settings: DesignSettings::default(),
        })
    }

    /// Pure tension, no coexisting shear
    pub fn pure_tension(connection: &'a Connection) -> CalcResult<Self> {
        Self::new(connection, Ksi(0.0))
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Modified nominal tensile stress F'nt, capped at Fnt
    pub fn modified_tensile_stress(&self) -> CalcResult<Ksi> {
        let fnt = self.bolts.grade.fnt();
        let fnv = self.bolts.grade.fnv();
        let phi_v = self.settings.resistance_factors.bolt_shear;
        let frv = self.required_shear_stress;

        if frv.0 > phi_v * fnv.0 {
            return Err(CalcError::invalid_input(
                "required_shear_stress",
                frv.0.to_string(),
                format!("Exceeds the available shear stress φFnv = {:.2} ksi", phi_v * fnv.0),
            ));
        }
        let reduced = Ksi(1.3 * fnt.0 - fnt.0 / (phi_v * fnv.0) * frv.0);
        Ok(reduced.min(fnt))
    }
}

impl LimitState for BoltTensionCalculator<'_> {
    fn name(&self) -> &'static str {
        "Bolt Tension"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J3-2, J3-3a"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let phi = self.settings.resistance_factors.bolt_tension;
        let n = self.bolts.bolt_count();
        trace.input("Fnt", self.bolts.grade.fnt());
        trace.input("Fnv", self.bolts.grade.fnv());
        trace.input("frv", self.required_shear_stress);
        trace.calc("Ab", self.bolts.bolt_area());

        let fnt_prime = self.modified_tensile_stress()?;
        trace.calc("F'nt", fnt_prime);
        trace.scalar(TraceSection::Calculation, "phi", phi);

        let capacity = fnt_prime * self.bolts.bolt_area() * (phi * f64::from(n));
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}

// ============================================================================
// Bolt Bearing / Tearout
// ============================================================================

/// Governing design strength of one inner bolt and one end bolt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltBearingStrengths {
    pub inner: Kips,
    pub end: Kips,
}

/// Bolt-group strength limited by shear, bearing, and tearout (AISC J3-6a)
#[derive(Clone)]
pub struct BoltBearingCalculator<'a> {
    member: &'a dyn Member,
    bolts: &'a BoltConfiguration,
    orientation: LoadingOrientation,
    shear_planes: u32,
    settings: DesignSettings,
}

impl<'a> BoltBearingCalculator<'a> {
    pub fn new(
        member: &'a dyn Member,
        connection: &'a Connection,
        orientation: LoadingOrientation,
        shear_planes: u32,
    ) -> CalcResult<Self> {
        let bolts = connection.bolted_for("BoltBearingCalculator")?;
        if shear_planes < 1 {
            return Err(CalcError::invalid_input(
                "shear_planes",
                shear_planes.to_string(),
                "At least one shear plane is required",
            ));
        }
        Ok(BoltBearingCalculator {
            member,
            bolts,
            orientation,
            shear_planes,
            settings: DesignSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Clear distances (inner, end) in the direction of load
    pub fn clear_distances(&self) -> CalcResult<(Inches, Inches)> {
        let lines = self.bolts.lines(self.orientation);
        let hole = self.bolts.diameter_in + self.settings.holes.standard_oversize_in;
        let inner = lines.spacing.0 - hole;
        let end = lines.edge_distance.0 - hole / 2.0;

        if lines.bolts_per_line > 1 && !(inner > 0.0) {
            return Err(CalcError::geometry_infeasible(
                self.member.label(),
                format!("bolt spacing {:.3} in leaves no clear distance between holes", lines.spacing.0),
            ));
        }
        if !(end > 0.0) {
            return Err(CalcError::geometry_infeasible(
                self.member.label(),
                format!("edge distance {:.3} in leaves no clear distance to the edge", lines.edge_distance.0),
            ));
        }
        Ok((Inches(inner), Inches(end)))
    }

    /// Design strength of a single inner and end bolt
    pub fn bolt_strengths(&self) -> CalcResult<BoltBearingStrengths> {
        self.bolt_strengths_traced(&mut CalcTrace::disabled())
    }

    fn bolt_strengths_traced(&self, trace: &mut CalcTrace) -> CalcResult<BoltBearingStrengths> {
        let phi = self.settings.resistance_factors.bolt_bearing;
        let t = self.member.thickness();
        let fu = self.member.material().fu();
        let d = self.bolts.diameter();

        let (lc_inner, lc_end) = self.clear_distances()?;
        trace.calc("lc (inner)", lc_inner);
        trace.calc("lc (end)", lc_end);

        let shear = BoltShearCalculator {
            bolts: self.bolts,
            shear_planes: self.shear_planes,
            settings: self.settings,
        }
        .per_bolt();
        let bearing = fu * (d * t) * (2.4 * phi);
        let tearout_inner = fu * (lc_inner * t) * (1.2 * phi);
        let tearout_end = fu * (lc_end * t) * (1.2 * phi);

        trace.calc("phi*rn shear", shear);
        trace.calc("phi*2.4*d*t*Fu", bearing);
        trace.calc("phi*1.2*lc*t*Fu (inner)", tearout_inner);
        trace.calc("phi*1.2*lc*t*Fu (end)", tearout_end);

        Ok(BoltBearingStrengths {
            inner: shear.min(bearing).min(tearout_inner),
            end: shear.min(bearing).min(tearout_end),
        })
    }
}

impl LimitState for BoltBearingCalculator<'_> {
    fn name(&self) -> &'static str {
        "Bolt Bearing and Tearout"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J3-6a, J3-6c"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let lines = self.bolts.lines(self.orientation);
        trace.input("Fu", self.member.material().fu());
        trace.input("t", self.member.thickness());
        trace.input("d", self.bolts.diameter());
        trace.input("s", lines.spacing);
        trace.input("Le", lines.edge_distance);
        trace.scalar(TraceSection::Input, "bolts per line", f64::from(lines.bolts_per_line));
        trace.scalar(TraceSection::Input, "lines", f64::from(lines.lines));

        let strengths = self.bolt_strengths_traced(trace)?;
        trace.calc("phi*rn (inner)", strengths.inner);
        trace.calc("phi*rn (end)", strengths.end);

        let per_line = strengths.inner * f64::from(lines.bolts_per_line.saturating_sub(1)) + strengths.end;
        let capacity = per_line * (f64::from(lines.lines) * self.member.loading_condition());
        trace.scalar(TraceSection::Calculation, "loading condition", self.member.loading_condition());
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

    fn weld_connection() -> Connection {
        Connection::welded(WeldConfiguration {
            electrode: weld_electrode("E70XX").unwrap(),
            weld_size_in: 0.3125,
            length_in: 31.5,
            lines: 2,
        })
        .unwrap()
    }

    fn plate(t: f64) -> crate::members::DimensionedPlate {
        Plate::new(t, material("A572-GR50").unwrap())
            .unwrap()
            .set_dimensions(PlateDimensions::new(31.5, 22.5).unwrap())
            .unwrap()
    }

    #[test]
    fn test_bolt_shear_double_shear() {
        let connection = brace_connection();
        let calc = BoltShearCalculator::new(&connection, 2).unwrap();
        let ab = std::f64::consts::PI * 0.875_f64.powi(2) / 4.0;
        assert_relative_eq!(calc.per_bolt().0, 0.75 * 68.0 * ab * 2.0, epsilon = 1e-9);
        assert_relative_eq!(calc.design_capacity().unwrap().0, calc.per_bolt().0 * 14.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bolt_shear_rejects_weld() {
        let connection = weld_connection();
        let err = BoltShearCalculator::new(&connection, 1).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_MISMATCH");
        assert_eq!(err, CalcError::configuration_mismatch("BoltShearCalculator", "bolted", "welded"));
    }

    #[test]
    fn test_bolt_shear_idempotent() {
        let connection = brace_connection();
        let calc = BoltShearCalculator::new(&connection, 1).unwrap();
        assert_eq!(calc.design_capacity().unwrap(), calc.design_capacity().unwrap());
    }

    #[test]
    fn test_bolt_tension_interaction() {
        let connection = Connection::bolted(BoltConfiguration {
            grade: bolt_grade("A325-N").unwrap(),
            ..brace_connection().as_bolted().unwrap().clone()
        })
        .unwrap();

        let pure = BoltTensionCalculator::pure_tension(&connection).unwrap();
        assert_relative_eq!(pure.modified_tensile_stress().unwrap().0, 90.0);

        let combined = BoltTensionCalculator::new(&connection, Ksi(30.0)).unwrap();
        let expected = 1.3 * 90.0 - 90.0 / (0.75 * 54.0) * 30.0;
        assert_relative_eq!(combined.modified_tensile_stress().unwrap().0, expected, epsilon = 1e-9);
        assert!(combined.design_capacity().unwrap() < pure.design_capacity().unwrap());

        let over = BoltTensionCalculator::new(&connection, Ksi(45.0)).unwrap();
        assert!(over.design_capacity().is_err());
    }

    #[test]
    fn test_inner_bolt_bearing_exceeds_end_bolt() {
        let connection = brace_connection();
        let gusset = plate(0.25);
        let calc = BoltBearingCalculator::new(&gusset, &connection, LoadingOrientation::Axial, 2).unwrap();

        let (lc_inner, lc_end) = calc.clear_distances().unwrap();
        assert_relative_eq!(lc_inner.0, 3.0 - 0.9375);
        assert_relative_eq!(lc_end.0, 1.5 - 0.46875);

        let strengths = calc.bolt_strengths().unwrap();
        assert!(strengths.inner > strengths.end);

        let expected = (strengths.inner.0 * 6.0 + strengths.end.0) * 2.0;
        assert_relative_eq!(calc.design_capacity().unwrap().0, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_shear_orientation_uses_rows() {
        let connection = brace_connection();
        let gusset = plate(0.25);
        let calc = BoltBearingCalculator::new(&gusset, &connection, LoadingOrientation::Shear, 2).unwrap();
        let (lc_inner, lc_end) = calc.clear_distances().unwrap();
        assert_relative_eq!(lc_inner.0, 3.0 - 0.9375);
        assert_relative_eq!(lc_end.0, 2.0 - 0.46875);

        let strengths = calc.bolt_strengths().unwrap();
        let expected = (strengths.inner.0 + strengths.end.0) * 7.0;
        assert_relative_eq!(calc.design_capacity().unwrap().0, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_rejects_short_edge() {
        let mut bolts = brace_connection().as_bolted().unwrap().clone();
        bolts.edge_distance_horizontal_in = 0.4;
        let connection = Connection::bolted(bolts).unwrap();
        let gusset = plate(1.0);
        let calc = BoltBearingCalculator::new(&gusset, &connection, LoadingOrientation::Axial, 1).unwrap();
        assert_eq!(calc.design_capacity().unwrap_err().error_code(), "GEOMETRY_INFEASIBLE");
    }

    #[test]
    fn test_bearing_rejects_empty_bolt_line() {
        let mut bolts = brace_connection().as_bolted().unwrap().clone();
        bolts.n_columns = 0;
        let gusset = plate(1.0);

        let connection = Connection::Bolted(bolts.clone());
        let err = BoltBearingCalculator::new(&gusset, &connection, LoadingOrientation::Axial, 2).err().unwrap();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let json = serde_json::json!({ "type": "Bolted", "config": bolts });
        assert!(serde_json::from_value::<Connection>(json).is_err());
    }

    #[test]
    fn test_bearing_trace() {
        let connection = brace_connection();
        let gusset = plate(1.0);
        let calc = BoltBearingCalculator::new(&gusset, &connection, LoadingOrientation::Axial, 2).unwrap();
        let trace = calc.trace().unwrap();
        assert!(trace.get("lc (inner)").is_some());
        assert!(trace.render().contains("phi*Rn"));
    }
}
