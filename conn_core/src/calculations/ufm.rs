//! # Uniform Force Method
//!
//! Locates the gusset interface control points of a vertical-brace
//! connection so that neither interface carries a moment (AISC Manual Part 13,
//! Design Guide 29), and resolves the brace force into interface components.
//!
//! ## Geometry
//!
//! ```text
//!              column face
//!                  |
//!          ec      |<-- β -->|          θ measured from vertical
//!       |<---->|   |         |
//!       |      +---+---------+--------- beam top flange
//!       |          |  gusset  \
//!       |          |           \  brace
//!                  |<--- α ---->\
//! ```
//!
//! - `eb` - half the beam depth
//! - `ec` - half the column depth (0 for a web-connected column)
//! - `α` - distance from the column face to the beam-interface centroid
//! - `β` - distance from the beam flange to the column-interface centroid
//!
//! No moment at either interface requires `α − β·tanθ = eb·tanθ − ec`, and
//! `r = sqrt((α + ec)² + (β + eb)²)`.
//!
//! ## Cases
//!
//! | Case | Fixed by caller | Solved |
//! |------|-----------------|--------|
//! | `General` | β (defaults to eb) | α |
//! | `SpecialCase1` | α | β |
//! | `SpecialCase2` | β | α |
//! | `SpecialCase3` | nothing (ec = β = 0) | α = eb·tanθ |
//!
//! ## Example (DG29 Example 5.1)
//!
//! ```rust
//! use conn_core::calculations::ufm::{BraceAngle, UfmInput};
//!
//! let input = UfmInput::new(10.7, 7.0, BraceAngle::from_degrees(47.2).unwrap()).with_beta(12.0);
//! let solution = input.solve().unwrap();
//! assert!((solution.r - 33.4).abs() < 0.05);
//! assert!((solution.multipliers.shear_at_beam - 0.524).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::{AppliedLoads, DesignLoads, LoadMultipliers};
use crate::materials::SteelShape;
use crate::members::{DimensionedPlate, Plate, PlateDimensions};
use crate::units::Inches;

/// Tolerance on the brace-component cross-check
const COMPONENT_TOLERANCE: f64 = 1e-6;

/// Brace inclination, measured from vertical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BraceAngle {
    radians: f64,
}

impl BraceAngle {
    /// Angle in degrees from vertical; must lie strictly between 0 and 90
    pub fn from_degrees(degrees: f64) -> CalcResult<Self> {
        if !(degrees > 0.0 && degrees < 90.0) {
            return Err(CalcError::geometry_infeasible(
                "brace angle",
                format!("θ = {} deg must lie strictly between 0 and 90", degrees),
            ));
        }
        Ok(BraceAngle {
            radians: degrees.to_radians(),
        })
    }

    /// Angle from the brace bevel: `vertical` rise over `horizontal` run
    pub fn from_bevel(vertical: f64, horizontal: f64) -> CalcResult<Self> {
        if !(vertical > 0.0 && horizontal > 0.0) {
            return Err(CalcError::geometry_infeasible(
                "brace bevel",
                format!("bevel {} / {} must have positive legs", vertical, horizontal),
            ));
        }
        Ok(BraceAngle {
            radians: horizontal.atan2(vertical),
        })
    }

    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn radians(&self) -> f64 {
        self.radians
    }

    pub fn tan(&self) -> f64 {
        self.radians.tan()
    }
}

/// Which control-point offset the designer fixes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "case")]
pub enum UfmCase {
    /// β is the input value; α follows from the no-moment condition
    General,
    /// α is fixed; β is re-solved
    SpecialCase1 { alpha: f64 },
    /// β is fixed (overriding the input β); α is solved
    SpecialCase2 { beta: f64 },
    /// No gusset-to-column interface: ec = β = 0
    SpecialCase3,
}

impl UfmCase {
    pub fn display_name(&self) -> &'static str {
        match self {
            UfmCase::General => "General",
            UfmCase::SpecialCase1 { .. } => "Special Case 1",
            UfmCase::SpecialCase2 { .. } => "Special Case 2",
            UfmCase::SpecialCase3 => "Special Case 3",
        }
    }
}

/// Inputs to the UFM solver.
///
/// ## JSON Example
///
/// ```json
/// {
///   "eb_in": 10.7,
///   "ec_in": 7.0,
///   "theta": { "radians": 0.8238 },
///   "beta_in": 12.0,
///   "case": { "case": "General" }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UfmInput {
    /// Beam half-depth (in)
    pub eb_in: f64,
    /// Column half-depth (in)
    pub ec_in: f64,
    pub theta: BraceAngle,
    /// Column-interface centroid offset; `None` means eb
    pub beta_in: Option<f64>,
    pub case: UfmCase,
}

impl UfmInput {
    pub fn new(eb_in: f64, ec_in: f64, theta: BraceAngle) -> Self {
        UfmInput {
            eb_in,
            ec_in,
            theta,
            beta_in: None,
            case: UfmCase::General,
        }
    }

    /// Offsets from a beam and a column connected through its flange
    pub fn from_shapes(beam: &SteelShape, column: &SteelShape, theta: BraceAngle) -> CalcResult<Self> {
        Ok(UfmInput::new(beam.half_depth()?, column.half_depth()?, theta))
    }

    pub fn with_beta(mut self, beta_in: f64) -> Self {
        self.beta_in = Some(beta_in);
        self
    }

    pub fn with_case(mut self, case: UfmCase) -> Self {
        self.case = case;
        self
    }

    fn validate(&self) -> CalcResult<()> {
        if !(self.eb_in > 0.0) {
            return Err(CalcError::geometry_infeasible(
                "UFM input",
                format!("beam half-depth eb = {} in must be positive", self.eb_in),
            ));
        }
        if !(self.ec_in >= 0.0) {
            return Err(CalcError::geometry_infeasible(
                "UFM input",
                format!("column half-depth ec = {} in cannot be negative", self.ec_in),
            ));
        }
        let degrees = self.theta.degrees();
        if !(degrees > 0.0 && degrees < 90.0) {
            return Err(CalcError::geometry_infeasible(
                "UFM input",
                format!("θ = {:.3} deg must lie strictly between 0 and 90", degrees),
            ));
        }
        Ok(())
    }

    /// Solve for the control points and interface multipliers
    pub fn solve(&self) -> CalcResult<UfmSolution> {
        self.validate()?;
        let eb = self.eb_in;
        let tan_theta = self.theta.tan();

        let (alpha, beta, ec) = match self.case {
            UfmCase::General => {
                let beta = self.beta_in.unwrap_or(eb);
                require_positive("β", beta, self.case)?;
                ((eb + beta) * tan_theta - self.ec_in, beta, self.ec_in)
            }
            UfmCase::SpecialCase1 { alpha } => {
                require_positive("α", alpha, self.case)?;
                let beta = (alpha + self.ec_in) / tan_theta - eb;
                (alpha, beta, self.ec_in)
            }
            UfmCase::SpecialCase2 { beta } => {
                require_positive("β", beta, self.case)?;
                ((eb + beta) * tan_theta - self.ec_in, beta, self.ec_in)
            }
            UfmCase::SpecialCase3 => (eb * tan_theta, 0.0, 0.0),
        };

        require_positive("α", alpha, self.case)?;
        if !matches!(self.case, UfmCase::SpecialCase3) {
            require_positive("β", beta, self.case)?;
        }

        let r = ((alpha + ec).powi(2) + (beta + eb).powi(2)).sqrt();
        let multipliers = LoadMultipliers {
            shear_at_column: beta / r,
            normal_at_column: ec / r,
            shear_at_beam: alpha / r,
            normal_at_beam: eb / r,
        };

        let solution = UfmSolution {
            case: self.case,
            alpha,
            beta,
            r,
            eb,
            ec,
            theta: self.theta,
            multipliers,
        };
        solution.cross_check();
        Ok(solution)
    }
}

fn require_positive(symbol: &str, value: f64, case: UfmCase) -> CalcResult<()> {
    if !(value > 0.0) {
        return Err(CalcError::geometry_infeasible(
            format!("UFM {}", case.display_name()),
            format!("{} = {:.3} in resolves non-positive", symbol, value),
        ));
    }
    Ok(())
}

/// Solved control points and multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UfmSolution {
    pub case: UfmCase,
    pub alpha: f64,
    pub beta: f64,
    pub r: f64,
    pub eb: f64,
    pub ec: f64,
    pub theta: BraceAngle,
    pub multipliers: LoadMultipliers,
}

impl UfmSolution {
    /// Fractions of the brace force resolved (vertical, horizontal).
    ///
    /// Vertical: column-interface shear plus beam-interface normal.
    /// Horizontal: column-interface normal plus beam-interface shear.
    pub fn brace_components(&self) -> (f64, f64) {
        let m = &self.multipliers;
        (m.shear_at_column + m.normal_at_beam, m.normal_at_column + m.shear_at_beam)
    }

    fn cross_check(&self) {
        let (vertical, horizontal) = self.brace_components();
        let dv = vertical - self.theta.radians().cos();
        let dh = horizontal - self.theta.radians().sin();
        log::trace!(
            "UFM {}: α={:.3} β={:.3} r={:.3}; ΣV-cosθ={:.2e}, ΣH-sinθ={:.2e}",
            self.case.display_name(),
            self.alpha,
            self.beta,
            self.r,
            dv,
            dh
        );
        if dv.abs() > COMPONENT_TOLERANCE || dh.abs() > COMPONENT_TOLERANCE {
            log::warn!(
                "UFM {} components do not close: vertical off by {:.3e}, horizontal off by {:.3e}",
                self.case.display_name(),
                dv,
                dh
            );
        }
    }

    /// Interface forces for the given design loads
    pub fn applied_loads(&self, design_loads: DesignLoads) -> AppliedLoads {
        AppliedLoads::from_ufm(design_loads, self.multipliers)
    }

    /// Gusset size that centres each interface on its control point.
    ///
    /// Beam interface `2(α − t_ep − clip)`, column interface `2(β − clip)`.
    pub fn gusset_dimensions(&self, endplate_thickness: Inches, clipping: Inches) -> CalcResult<PlateDimensions> {
        let length = 2.0 * (self.alpha - endplate_thickness.0 - clipping.0);
        let width = 2.0 * (self.beta - clipping.0);
        if !(length > 0.0 && width > 0.0) {
            return Err(CalcError::geometry_infeasible(
                "gusset sizing",
                format!(
                    "interface lengths {:.3} x {:.3} in for α = {:.3}, β = {:.3}",
                    length, width, self.alpha, self.beta
                ),
            ));
        }
        Ok(PlateDimensions {
            length_in: length,
            width_in: width,
        })
    }

    /// Size a gusset plate from this solution, using the plate's own clip
    pub fn dimension_gusset(&self, plate: Plate, endplate_thickness: Inches) -> CalcResult<DimensionedPlate> {
        let dims = self.gusset_dimensions(endplate_thickness, Inches(plate.clipping_in))?;
        plate.set_dimensions(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{builtin_connection_shapes, material};
    use crate::units::Kips;
    use approx::assert_relative_eq;

    fn example_input() -> UfmInput {
        UfmInput::new(10.7, 7.0, BraceAngle::from_degrees(47.2).unwrap()).with_beta(12.0)
    }

    #[test]
    fn test_example_5_1_geometry() {
        let s = example_input().solve().unwrap();
        assert_relative_eq!(s.alpha, 17.51, epsilon = 0.02);
        assert_relative_eq!(s.r, 33.4, epsilon = 0.05);
        assert_relative_eq!(s.multipliers.shear_at_column, 0.3592, epsilon = 1e-3);
        assert_relative_eq!(s.multipliers.normal_at_column, 0.2095, epsilon = 1e-3);
        assert_relative_eq!(s.multipliers.shear_at_beam, 0.5242, epsilon = 1e-3);
        assert_relative_eq!(s.multipliers.normal_at_beam, 0.3203, epsilon = 1e-3);
    }

    #[test]
    fn test_example_5_1_interface_forces() {
        let s = example_input().solve().unwrap();
        let applied = s.applied_loads(DesignLoads::new(Kips(840.0), Kips(50.0), Kips(100.0)));
        assert_relative_eq!(applied.gusset_to_column_shear().0, 352.0, epsilon = 1.0);
        assert_relative_eq!(applied.gusset_to_column_normal().0, 276.0, epsilon = 1.0);
        assert_relative_eq!(applied.gusset_to_beam_shear().0, 440.0, epsilon = 1.0);
        assert_relative_eq!(applied.gusset_to_beam_normal().0, 269.0, epsilon = 1.0);
    }

    #[test]
    fn test_from_shapes() {
        let db = builtin_connection_shapes();
        let theta = BraceAngle::from_degrees(47.2).unwrap();
        let input = UfmInput::from_shapes(db.lookup("W21X83").unwrap(), db.lookup("W14X90").unwrap(), theta).unwrap();
        assert_relative_eq!(input.eb_in, 10.7);
        assert_relative_eq!(input.ec_in, 7.0);
        assert!(input.beta_in.is_none());
    }

    #[test]
    fn test_beta_defaults_to_eb() {
        let theta = BraceAngle::from_degrees(45.0).unwrap();
        let s = UfmInput::new(10.0, 7.0, theta).solve().unwrap();
        assert_relative_eq!(s.beta, 10.0);
        assert_relative_eq!(s.alpha, 13.0, epsilon = 1e-9);
    }

    #[test]
    fn test_components_close_for_all_cases_and_angles() {
        for degrees in [20.0, 35.0, 47.2, 60.0, 75.0] {
            let theta = BraceAngle::from_degrees(degrees).unwrap();
            let cases = [
                UfmCase::General,
                UfmCase::SpecialCase1 { alpha: 40.0 },
                UfmCase::SpecialCase2 { beta: 15.0 },
                UfmCase::SpecialCase3,
            ];
            for case in cases {
                let s = UfmInput::new(10.7, 7.0, theta).with_case(case).solve().unwrap();
                let (vertical, horizontal) = s.brace_components();
                assert_relative_eq!(vertical, theta.radians().cos(), epsilon = 1e-9);
                assert_relative_eq!(horizontal, theta.radians().sin(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_special_case_1_resolves_beta() {
        let theta = BraceAngle::from_degrees(47.2).unwrap();
        let s = UfmInput::new(10.7, 7.0, theta)
            .with_case(UfmCase::SpecialCase1 { alpha: 17.5158 })
            .solve()
            .unwrap();
        assert_relative_eq!(s.alpha, 17.5158);
        assert_relative_eq!(s.beta, 12.0, epsilon = 1e-3);
    }

    #[test]
    fn test_special_case_2_overrides_input_beta() {
        let theta = BraceAngle::from_degrees(47.2).unwrap();
        let fixed = UfmInput::new(10.7, 7.0, theta)
            .with_beta(3.0)
            .with_case(UfmCase::SpecialCase2 { beta: 12.0 })
            .solve()
            .unwrap();
        let general = example_input().solve().unwrap();
        assert_relative_eq!(fixed.beta, 12.0);
        assert_relative_eq!(fixed.alpha, general.alpha, epsilon = 1e-12);
    }

    #[test]
    fn test_special_case_3_loads_beam_only() {
        let theta = BraceAngle::from_degrees(47.2).unwrap();
        let s = UfmInput::new(10.7, 7.0, theta)
            .with_case(UfmCase::SpecialCase3)
            .solve()
            .unwrap();
        assert_eq!(s.ec, 0.0);
        assert_eq!(s.beta, 0.0);
        assert_relative_eq!(s.alpha, 10.7 * theta.tan());
        assert_eq!(s.multipliers.shear_at_column, 0.0);
        assert_eq!(s.multipliers.normal_at_column, 0.0);
        assert_relative_eq!(s.r, 10.7 / theta.radians().cos(), epsilon = 1e-9);
    }

    #[test]
    fn test_infeasible_geometry() {
        // Steep brace into a deep column drives α negative
        let theta = BraceAngle::from_degrees(10.0).unwrap();
        let err = UfmInput::new(5.0, 12.0, theta).solve().unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_INFEASIBLE");

        // Fixed α too small for the column offset drives β negative
        let theta = BraceAngle::from_degrees(47.2).unwrap();
        let err = UfmInput::new(10.7, 7.0, theta)
            .with_case(UfmCase::SpecialCase1 { alpha: 1.0 })
            .solve()
            .unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_INFEASIBLE");

        assert!(UfmInput::new(0.0, 7.0, theta).solve().is_err());
        assert!(UfmInput::new(10.7, -1.0, theta).solve().is_err());
        assert!(BraceAngle::from_degrees(90.0).is_err());
        assert!(BraceAngle::from_degrees(0.0).is_err());
    }

    #[test]
    fn test_bevel_angle() {
        let theta = BraceAngle::from_bevel(12.0, 12.0).unwrap();
        assert_relative_eq!(theta.degrees(), 45.0, epsilon = 1e-9);
        let theta = BraceAngle::from_bevel(11.125, 12.0).unwrap();
        assert_relative_eq!(theta.degrees(), 47.17, epsilon = 0.02);
        assert!(BraceAngle::from_bevel(0.0, 12.0).is_err());
    }

    #[test]
    fn test_gusset_sizing() {
        let s = example_input().solve().unwrap();
        let dims = s.gusset_dimensions(Inches(1.0), Inches(0.75)).unwrap();
        assert_relative_eq!(dims.length_in, 31.53, epsilon = 0.01);
        assert_relative_eq!(dims.width_in, 22.5, epsilon = 1e-9);

        let gusset = Plate::new(1.0, material("A572-GR50").unwrap())
            .unwrap()
            .with_clipping(0.75);
        let sized = s.dimension_gusset(gusset, Inches(1.0)).unwrap();
        assert_relative_eq!(sized.length().0, dims.length_in);

        assert!(s.gusset_dimensions(Inches(20.0), Inches(0.0)).is_err());
    }
}
