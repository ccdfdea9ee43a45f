//! # Unit Types
//!
//! Type-safe wrappers for the units used in steel connection design, plus a
//! dimension-carrying [`Quantity`] for values whose dimension is only known at
//! runtime (demand forces handed to `check_dcr`, trace entries, etc.).
//!
//! ## Two Layers
//!
//! - **Newtypes** (`Inches`, `Kips`, `Ksi`, `SqIn`, ...) are plain `f64`
//!   wrappers. Cross-unit products that make physical sense are implemented
//!   (`Ksi * SqIn = Kips`, `Inches * Inches = SqIn`), everything else does not
//!   compile.
//! - **Quantity** stores a magnitude in base units (kip, inch) together with
//!   its [`Dimension`]. Addition, subtraction, and comparison return
//!   `CalcError::DimensionMismatch` when dimensions differ; multiplication and
//!   division propagate the dimension.
//!
//! ## US Customary Units
//!
//! AISC connection design is carried out in kips and inches:
//! - Length: inches (in), feet (ft)
//! - Force: kips (k = 1000 lb), pounds (lb)
//! - Stress: kips per square inch (ksi), pounds per square inch (psi)
//! - Moment: kip-inches (k-in), kip-feet (k-ft)
//!
//! ## Example
//!
//! ```rust
//! use conn_core::units::{Inches, Ksi, Quantity, Unit};
//!
//! let area = Inches(4.0) * Inches(0.5);
//! let force = Ksi(36.0) * area;
//! assert_eq!(force.0, 72.0);
//!
//! let demand = Quantity::new(64.8, Unit::Kip);
//! assert_eq!(demand.to(Unit::Pound).unwrap(), 64_800.0);
//! assert!(demand.checked_add(Quantity::new(1.0, Unit::Inch)).is_err());
//! ```

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Force in kips (1 kip = 1000 pounds)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kips(pub f64);

impl From<Pounds> for Kips {
    fn from(lb: Pounds) -> Self {
        Kips(lb.0 / 1000.0)
    }
}

impl From<Kips> for Pounds {
    fn from(k: Kips) -> Self {
        Pounds(k.0 * 1000.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in pounds per square inch (psi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Stress in kips per square inch (ksi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ksi(pub f64);

impl From<Psi> for Ksi {
    fn from(psi: Psi) -> Self {
        Ksi(psi.0 / 1000.0)
    }
}

impl From<Ksi> for Psi {
    fn from(ksi: Ksi) -> Self {
        Psi(ksi.0 * 1000.0)
    }
}

// ============================================================================
// Area and Moment Units
// ============================================================================

/// Area in square inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqIn(pub f64);

/// Moment in kip-inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KipIn(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// Smaller of two values
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Pounds);
impl_arithmetic!(Kips);
impl_arithmetic!(Psi);
impl_arithmetic!(Ksi);
impl_arithmetic!(SqIn);
impl_arithmetic!(KipIn);

impl Mul for Inches {
    type Output = SqIn;
    fn mul(self, rhs: Inches) -> SqIn {
        SqIn(self.0 * rhs.0)
    }
}

impl Mul<SqIn> for Ksi {
    type Output = Kips;
    fn mul(self, rhs: SqIn) -> Kips {
        Kips(self.0 * rhs.0)
    }
}

impl Mul<Ksi> for SqIn {
    type Output = Kips;
    fn mul(self, rhs: Ksi) -> Kips {
        Kips(self.0 * rhs.0)
    }
}

impl Mul<Inches> for Kips {
    type Output = KipIn;
    fn mul(self, rhs: Inches) -> KipIn {
        KipIn(self.0 * rhs.0)
    }
}

impl Div<SqIn> for Kips {
    type Output = Ksi;
    fn div(self, rhs: SqIn) -> Ksi {
        Ksi(self.0 / rhs.0)
    }
}

impl Div for Kips {
    type Output = f64;
    fn div(self, rhs: Kips) -> f64 {
        self.0 / rhs.0
    }
}

// ============================================================================
// Runtime-Dimensioned Quantities
// ============================================================================

/// Physical dimension expressed as exponents of force and length.
///
/// Stress is `force¹·length⁻²`, moment is `force¹·length¹`, and so on. Time and
/// temperature never appear in static connection design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub force: i8,
    pub length: i8,
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension { force: 0, length: 0 };
    pub const LENGTH: Dimension = Dimension { force: 0, length: 1 };
    pub const AREA: Dimension = Dimension { force: 0, length: 2 };
    pub const FORCE: Dimension = Dimension { force: 1, length: 0 };
    pub const STRESS: Dimension = Dimension { force: 1, length: -2 };
    pub const MOMENT: Dimension = Dimension { force: 1, length: 1 };

    fn product(self, rhs: Dimension) -> Dimension {
        Dimension {
            force: self.force + rhs.force,
            length: self.length + rhs.length,
        }
    }

    fn quotient(self, rhs: Dimension) -> Dimension {
        Dimension {
            force: self.force - rhs.force,
            length: self.length - rhs.length,
        }
    }

    /// Human-readable name used in error messages
    pub fn display_name(&self) -> String {
        match *self {
            Dimension::DIMENSIONLESS => "dimensionless".to_string(),
            Dimension::LENGTH => "length".to_string(),
            Dimension::AREA => "area".to_string(),
            Dimension::FORCE => "force".to_string(),
            Dimension::STRESS => "stress".to_string(),
            Dimension::MOMENT => "moment".to_string(),
            Dimension { force, length } => format!("force^{} length^{}", force, length),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Units a [`Quantity`] can be created in or converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Dimensionless,
    Inch,
    Foot,
    SquareInch,
    Kip,
    Pound,
    Ksi,
    Psi,
    KipInch,
    KipFoot,
}

impl Unit {
    /// Dimension of the unit
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Dimensionless => Dimension::DIMENSIONLESS,
            Unit::Inch | Unit::Foot => Dimension::LENGTH,
            Unit::SquareInch => Dimension::AREA,
            Unit::Kip | Unit::Pound => Dimension::FORCE,
            Unit::Ksi | Unit::Psi => Dimension::STRESS,
            Unit::KipInch | Unit::KipFoot => Dimension::MOMENT,
        }
    }

    /// Multiplier from this unit to the base unit of its dimension (kip, inch)
    fn to_base(&self) -> f64 {
        match self {
            Unit::Dimensionless | Unit::Inch | Unit::SquareInch | Unit::Kip | Unit::Ksi | Unit::KipInch => 1.0,
            Unit::Foot | Unit::KipFoot => 12.0,
            Unit::Pound | Unit::Psi => 0.001,
        }
    }

    /// Unit symbol for display
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Dimensionless => "",
            Unit::Inch => "in",
            Unit::Foot => "ft",
            Unit::SquareInch => "in²",
            Unit::Kip => "kip",
            Unit::Pound => "lb",
            Unit::Ksi => "ksi",
            Unit::Psi => "psi",
            Unit::KipInch => "kip-in",
            Unit::KipFoot => "kip-ft",
        }
    }

    /// Default display unit for a dimension, if one exists
    pub fn base_for(dimension: Dimension) -> Option<Unit> {
        match dimension {
            Dimension::DIMENSIONLESS => Some(Unit::Dimensionless),
            Dimension::LENGTH => Some(Unit::Inch),
            Dimension::AREA => Some(Unit::SquareInch),
            Dimension::FORCE => Some(Unit::Kip),
            Dimension::STRESS => Some(Unit::Ksi),
            Dimension::MOMENT => Some(Unit::KipInch),
            _ => None,
        }
    }
}

/// A magnitude tagged with its physical dimension.
///
/// The magnitude is stored in base units (kip, inch) so arithmetic never needs
/// to reconcile scale factors; conversion happens only in [`Quantity::new`]
/// and [`Quantity::to`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    magnitude: f64,
    dimension: Dimension,
}

impl Quantity {
    /// Create a quantity from a magnitude expressed in `unit`
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Quantity {
            magnitude: magnitude * unit.to_base(),
            dimension: unit.dimension(),
        }
    }

    pub fn kips(value: f64) -> Self {
        Quantity::new(value, Unit::Kip)
    }

    pub fn inches(value: f64) -> Self {
        Quantity::new(value, Unit::Inch)
    }

    pub fn ksi(value: f64) -> Self {
        Quantity::new(value, Unit::Ksi)
    }

    pub fn dimensionless(value: f64) -> Self {
        Quantity::new(value, Unit::Dimensionless)
    }

    /// Dimension of this quantity
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Magnitude in base units (kip, inch)
    pub fn base_magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Convert to the given unit, failing if the dimensions differ
    pub fn to(&self, unit: Unit) -> CalcResult<f64> {
        if unit.dimension() != self.dimension {
            return Err(CalcError::dimension_mismatch(
                "conversion",
                self.dimension.display_name(),
                format!("{} ({})", unit.symbol(), unit.dimension()),
            ));
        }
        Ok(self.magnitude / unit.to_base())
    }

    /// Interpret this quantity as a force in kips
    pub fn as_kips(&self) -> CalcResult<Kips> {
        self.to(Unit::Kip).map(Kips)
    }

    fn require_same(&self, other: &Quantity, operation: &str) -> CalcResult<()> {
        if self.dimension != other.dimension {
            return Err(CalcError::dimension_mismatch(
                operation,
                self.dimension.display_name(),
                other.dimension.display_name(),
            ));
        }
        Ok(())
    }

    /// Sum of two quantities of the same dimension
    pub fn checked_add(self, rhs: Quantity) -> CalcResult<Quantity> {
        self.require_same(&rhs, "addition")?;
        Ok(Quantity {
            magnitude: self.magnitude + rhs.magnitude,
            dimension: self.dimension,
        })
    }

    /// Difference of two quantities of the same dimension
    pub fn checked_sub(self, rhs: Quantity) -> CalcResult<Quantity> {
        self.require_same(&rhs, "subtraction")?;
        Ok(Quantity {
            magnitude: self.magnitude - rhs.magnitude,
            dimension: self.dimension,
        })
    }

    /// Ordering between commensurate quantities
    pub fn try_partial_cmp(&self, other: &Quantity) -> CalcResult<Option<Ordering>> {
        self.require_same(other, "comparison")?;
        Ok(self.magnitude.partial_cmp(&other.magnitude))
    }

    /// Dimensionless ratio `self / other` of two commensurate quantities
    pub fn ratio(&self, other: &Quantity) -> CalcResult<f64> {
        self.require_same(other, "ratio")?;
        Ok(self.magnitude / other.magnitude)
    }
}

impl Mul for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity {
            magnitude: self.magnitude * rhs.magnitude,
            dimension: self.dimension.product(rhs.dimension),
        }
    }
}

impl Div for Quantity {
    type Output = Quantity;
    fn div(self, rhs: Quantity) -> Quantity {
        Quantity {
            magnitude: self.magnitude / rhs.magnitude,
            dimension: self.dimension.quotient(rhs.dimension),
        }
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Quantity {
        Quantity {
            magnitude: self.magnitude * rhs,
            dimension: self.dimension,
        }
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;
    fn div(self, rhs: f64) -> Quantity {
        Quantity {
            magnitude: self.magnitude / rhs,
            dimension: self.dimension,
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Unit::base_for(self.dimension) {
            Some(Unit::Dimensionless) => write!(f, "{:.4}", self.magnitude),
            Some(unit) => write!(f, "{:.4} {}", self.magnitude, unit.symbol()),
            None => write!(f, "{:.4} [{}]", self.magnitude, self.dimension),
        }
    }
}

macro_rules! impl_into_quantity {
    ($type:ty, $unit:expr) => {
        impl From<$type> for Quantity {
            fn from(value: $type) -> Self {
                Quantity::new(value.0, $unit)
            }
        }
    };
}

impl_into_quantity!(Inches, Unit::Inch);
impl_into_quantity!(Feet, Unit::Foot);
impl_into_quantity!(Kips, Unit::Kip);
impl_into_quantity!(Pounds, Unit::Pound);
impl_into_quantity!(Ksi, Unit::Ksi);
impl_into_quantity!(Psi, Unit::Psi);
impl_into_quantity!(SqIn, Unit::SquareInch);
impl_into_quantity!(KipIn, Unit::KipInch);
