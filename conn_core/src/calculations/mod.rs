//! # Connection Calculations
//!
//! The UFM solver ([`ufm`]) and one calculator per AISC 360 limit state.
//! Every calculator follows the same pattern:
//!
//! - Constructor takes shared references to the member and connection, plus
//!   any mode-specific arguments (shear planes, bearing length, ...), and
//!   rejects the wrong connection payload up front
//! - [`LimitState::design_capacity`] - φRn in kips, pure and repeatable
//! - [`LimitState::check_dcr`] - demand / capacity for a force `Quantity`
//! - [`LimitState::trace`] - the same computation with every intermediate value recorded
//!
//! Resistance factors come from [`DesignSettings`]; swap them with
//! `with_settings`.
//!
//! ## Available Calculations
//!
//! - [`ufm`] - Uniform Force Method control points and multipliers
//! - [`bolts`] - Bolt shear, bolt tension, bolt bearing/tearout
//! - [`tension`] - Tensile yielding and rupture of members, plate yielding
//! - [`block_shear`] - Block shear rupture (L and U patterns)
//! - [`whitmore`] - Whitmore section yielding and buckling
//! - [`shear`] - Shear yielding and shear rupture of connecting elements
//! - [`web`] - Web local yielding and crippling
//! - [`welds`] - Fillet weld strength
//!
//! ## Example
//!
//! ```rust
//! use conn_core::calculations::{LimitState, TensileYieldingCalculator};
//! use conn_core::materials::material;
//! use conn_core::members::{Plate, PlateDimensions};
//! use conn_core::units::Quantity;
//!
//! let plate = Plate::new(0.5, material("A36").unwrap())
//!     .unwrap()
//!     .set_dimensions(PlateDimensions::new(10.0, 4.0).unwrap())
//!     .unwrap();
//! let check = TensileYieldingCalculator::new(&plate);
//! let dcr = check.check_dcr(Quantity::kips(32.4)).unwrap();
//! assert!((dcr - 0.5).abs() < 1e-9);
//! ```

pub mod block_shear;
pub mod bolts;
pub mod shear;
pub mod tension;
pub mod ufm;
pub mod web;
pub mod welds;
pub mod whitmore;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;
use crate::trace::CalcTrace;
use crate::units::{Kips, Quantity};

pub use block_shear::{BlockShearCalculator, BlockShearPaths, FailurePattern};
pub use bolts::{BoltBearingCalculator, BoltBearingStrengths, BoltShearCalculator, BoltTensionCalculator};
pub use shear::{ShearRuptureCalculator, ShearYieldingCalculator};
pub use tension::{PlateLoadDirection, PlateTensileYieldingCalculator, TensileRuptureCalculator, TensileYieldingCalculator};
pub use ufm::{BraceAngle, UfmCase, UfmInput, UfmSolution};
pub use web::{WebLocalCripplingCalculator, WebLocalYieldingCalculator};
pub use welds::WeldStrengthCalculator;
pub use whitmore::{WhitmoreBucklingCalculator, WhitmoreYieldingCalculator};

/// Common interface of every limit-state calculator.
pub trait LimitState {
    /// Limit state name (e.g., "Block Shear")
    fn name(&self) -> &'static str;

    /// AISC 360 equation or section the capacity comes from
    fn code_reference(&self) -> &'static str;

    fn settings(&self) -> &DesignSettings;

    /// Compute φRn, recording intermediate values into `trace`
    fn capacity_traced(&self, trace: &mut CalcTrace) -> CalcResult<Kips>;

    /// Design strength φRn
    fn design_capacity(&self) -> CalcResult<Kips> {
        self.capacity_traced(&mut CalcTrace::disabled())
    }

    /// Run the calculation with the debug trace captured
    fn trace(&self) -> CalcResult<CalcTrace> {
        let mut trace = CalcTrace::enabled(self.name());
        self.capacity_traced(&mut trace)?;
        Ok(trace)
    }

    /// Demand-to-capacity ratio; `demand` must be a force
    fn check_dcr(&self, demand: Quantity) -> CalcResult<f64> {
        let capacity = self.design_capacity()?;
        dcr(self.name(), demand, capacity)
    }

    /// Capacity, demand, DCR, and pass/fail in one record
    fn evaluate(&self, demand: Quantity) -> CalcResult<LimitStateResult> {
        let capacity = self.design_capacity()?;
        let ratio = dcr(self.name(), demand, capacity)?;
        Ok(LimitStateResult {
            limit_state: self.name().to_string(),
            code_reference: self.code_reference().to_string(),
            capacity,
            demand: demand.as_kips()?,
            dcr: ratio,
            passes: ratio <= self.settings().dcr_limit,
        })
    }
}

/// Ratio of a force demand to a design capacity
pub(crate) fn dcr(limit_state: &str, demand: Quantity, capacity: Kips) -> CalcResult<f64> {
    if !(capacity.0 > 0.0) {
        return Err(CalcError::geometry_infeasible(
            limit_state,
            format!("design capacity {:.3} kip is not positive", capacity.0),
        ));
    }
    demand.ratio(&Quantity::from(capacity))
}

/// Outcome of one limit-state check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitStateResult {
    pub limit_state: String,
    pub code_reference: String,
    /// Design strength φRn
    pub capacity: Kips,
    pub demand: Kips,
    pub dcr: f64,
    pub passes: bool,
}

impl std::fmt::Display for LimitStateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<32} {:>9.1} / {:>9.1} kip  DCR = {:.3}  {}",
            self.limit_state,
            self.demand.0,
            self.capacity.0,
            self.dcr,
            if self.passes { "OK" } else { "NG" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::material;
    use crate::members::{Plate, PlateDimensions};
    use crate::units::Unit;
    use approx::assert_relative_eq;

    fn strap() -> crate::members::DimensionedPlate {
        Plate::new(0.5, material("A36").unwrap())
            .unwrap()
            .set_dimensions(PlateDimensions::new(10.0, 4.0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_check_dcr_converts_units() {
        let plate = strap();
        let check = TensileYieldingCalculator::new(&plate);
        let dcr = check.check_dcr(Quantity::new(64_800.0, Unit::Pound)).unwrap();
        assert_relative_eq!(dcr, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_check_dcr_rejects_non_force() {
        let plate = strap();
        let check = TensileYieldingCalculator::new(&plate);
        let err = check.check_dcr(Quantity::inches(3.0)).unwrap_err();
        assert_eq!(err.error_code(), "DIMENSION_MISMATCH");
    }

    #[test]
    fn test_evaluate_flags_failure() {
        let plate = strap();
        let check = TensileYieldingCalculator::new(&plate);

        let ok = check.evaluate(Quantity::kips(60.0)).unwrap();
        assert!(ok.passes);
        assert_eq!(ok.code_reference, check.code_reference());

        let ng = check.evaluate(Quantity::kips(70.0)).unwrap();
        assert!(!ng.passes);
        assert!(ng.to_string().contains("NG"));
    }

    #[test]
    fn test_calculators_run_on_worker_threads() {
        let plate = strap();
        let connection = crate::connections::Connection::bolted(crate::connections::BoltConfiguration {
            grade: crate::materials::bolt_grade("A325-N").unwrap(),
            diameter_in: 0.75,
            n_rows: 1,
            n_columns: 2,
            row_spacing_in: 3.0,
            column_spacing_in: 3.0,
            edge_distance_vertical_in: 2.0,
            edge_distance_horizontal_in: 1.5,
        })
        .unwrap();

        let checks: Vec<Box<dyn LimitState + Send + Sync + '_>> = vec![
            Box::new(TensileYieldingCalculator::new(&plate)),
            Box::new(BoltShearCalculator::new(&connection, 1).unwrap()),
            Box::new(
                BlockShearCalculator::new(&plate, &connection, crate::connections::LoadingOrientation::Axial).unwrap(),
            ),
        ];

        let threaded: Vec<Kips> = std::thread::scope(|scope| {
            let handles: Vec<_> = checks
                .iter()
                .map(|check| scope.spawn(move || check.design_capacity().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        let serial: Vec<Kips> = checks.iter().map(|c| c.design_capacity().unwrap()).collect();
        assert_eq!(threaded, serial);
    }

    #[test]
    fn test_trace_records_output() {
        let plate = strap();
        let check = TensileYieldingCalculator::new(&plate);
        let trace = check.trace().unwrap();
        assert_eq!(trace.title(), check.name());
        let out = trace.get("phi*Rn").unwrap();
        assert_relative_eq!(out.to(Unit::Kip).unwrap(), 64.8, epsilon = 1e-9);
    }
}
