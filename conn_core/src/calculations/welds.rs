//! # Fillet Weld Strength
//!
//! AISC 360-16 J2.4 for a linear fillet weld group loaded through its
//! centroid:
//!
//! ```text
//! φRn = φ · 0.60·Fexx · (1.0 + 0.50·sin^1.5 θ) · Awe        (J2-4, J2-5)
//! Awe = 0.707·w · L · lines
//! ```
//!
//! θ is the angle between the load and the weld axis; 0° is a longitudinal
//! weld and 90° a transverse one.

use crate::calculations::LimitState;
use crate::connections::{Connection, WeldConfiguration};
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;
use crate::trace::{CalcTrace, TraceSection};
use crate::units::{Kips, SqIn};

#[derive(Debug, Clone)]
pub struct WeldStrengthCalculator<'a> {
    weld: &'a WeldConfiguration,
    load_angle_deg: f64,
    settings: DesignSettings,
}

impl<'a> WeldStrengthCalculator<'a> {
    /// Weld group loaded at `load_angle_deg` from its axis (0 to 90)
    pub fn new(connection: &'a Connection, load_angle_deg: f64) -> CalcResult<Self> {
        let weld = connection.welded_for("WeldStrengthCalculator")?;
        if !(0.0..=90.0).contains(&load_angle_deg) {
            return Err(CalcError::invalid_input(
                "load_angle_deg",
                load_angle_deg.to_string(),
                "Load angle must be between 0 and 90 degrees",
            ));
        }
        Ok(WeldStrengthCalculator {
            weld,
            load_angle_deg,
            settings: DesignSettings::default(),
        })
    }

    /// Load parallel to the weld axis
    pub fn longitudinal(connection: &'a Connection) -> CalcResult<Self> {
        Self::new(connection, 0.0)
    }

    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Directional strength increase 1.0 + 0.50·sin^1.5 θ
    pub fn directional_factor(&self) -> f64 {
        1.0 + 0.5 * self.load_angle_deg.to_radians().sin().powf(1.5)
    }

    /// Effective throat area of all weld lines
    pub fn effective_area(&self) -> SqIn {
        self.weld.throat() * self.weld.length() * f64::from(self.weld.lines)
    }
}

impl LimitState for WeldStrengthCalculator<'_> {
    fn name(&self) -> &'static str {
        "Fillet Weld Strength"
    }

    fn code_reference(&self) -> &'static str {
        "AISC 360-16 Eq. J2-4, J2-5"
    }

    fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips> {
        let phi = self.settings.resistance_factors.weld;
        let fexx = self.weld.electrode.fexx();

        trace.input("Fexx", fexx);
        trace.input("w", self.weld.throat() / std::f64::consts::FRAC_1_SQRT_2);
        trace.input("L", self.weld.length());
        trace.scalar(TraceSection::Input, "lines", f64::from(self.weld.lines));
        trace.scalar(TraceSection::Input, "theta (deg)", self.load_angle_deg);

        let awe = self.effective_area();
        let kds = self.directional_factor();
        trace.calc("Awe", awe);
        trace.scalar(TraceSection::Calculation, "1 + 0.5 sin^1.5(theta)", kds);

        let capacity = fexx * awe * (0.6 * kds * phi);
        trace.output("phi*Rn", capacity);
        Ok(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::BoltConfiguration;
    use crate::materials::{bolt_grade, weld_electrode};
    use approx::assert_relative_eq;

    fn weld() -> Connection {
        Connection::welded(WeldConfiguration {
            electrode: weld_electrode("E70XX").unwrap(),
            weld_size_in: 0.3125,
            length_in: 31.5,
            lines: 2,
        })
        .unwrap()
    }

    #[test]
    fn test_longitudinal_weld() {
        let connection = weld();
        let calc = WeldStrengthCalculator::longitudinal(&connection).unwrap();
        let expected = 0.75 * 0.6 * 70.0 * 0.3125 * std::f64::consts::FRAC_1_SQRT_2 * 31.5 * 2.0;
        assert_relative_eq!(calc.design_capacity().unwrap().0, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_transverse_weld_is_half_again_stronger() {
        let connection = weld();
        let longitudinal = WeldStrengthCalculator::new(&connection, 0.0).unwrap();
        let transverse = WeldStrengthCalculator::new(&connection, 90.0).unwrap();
        assert_relative_eq!(transverse.directional_factor(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(
            transverse.design_capacity().unwrap().0,
            1.5 * longitudinal.design_capacity().unwrap().0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rejects_bolted_connection() {
        let connection = Connection::bolted(BoltConfiguration {
            grade: bolt_grade("A325-N").unwrap(),
            diameter_in: 0.75,
            n_rows: 3,
            n_columns: 1,
            row_spacing_in: 3.0,
            column_spacing_in: 3.0,
            edge_distance_vertical_in: 1.25,
            edge_distance_horizontal_in: 1.25,
        })
        .unwrap();
        let err = WeldStrengthCalculator::longitudinal(&connection).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_MISMATCH");
    }

    #[test]
    fn test_rejects_bad_angle() {
        let connection = weld();
        assert!(WeldStrengthCalculator::new(&connection, 120.0).is_err());
    }
}
