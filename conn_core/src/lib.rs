//! # conn_core - Steel Connection Design Engine
//!
//! `conn_core` checks braced-frame gusset connections to AISC 360-16 (LRFD).
//! Given a brace, beam, column, gusset plate, and the bolted or welded joint
//! between them, it distributes the brace force with the Uniform Force Method
//! and evaluates each connection limit state as a demand-capacity ratio.
//!
//! ## Design Philosophy
//!
//! - **One-way data flow**: loads → UFM multipliers → interface forces → limit states
//! - **JSON-First**: All data types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **No half-built state**: plates gain dimensions by consuming the undimensioned
//!   plate; applied loads come from a single constructor
//!
//! ## Quick Start
//!
//! ```rust
//! use conn_core::calculations::ufm::{BraceAngle, UfmInput};
//! use conn_core::loads::DesignLoads;
//! use conn_core::materials::builtin_connection_shapes;
//! use conn_core::units::Kips;
//!
//! let db = builtin_connection_shapes();
//! let input = UfmInput::from_shapes(
//!     db.lookup("W21X83").unwrap(),
//!     db.lookup("W14X90").unwrap(),
//!     BraceAngle::from_degrees(47.2).unwrap(),
//! )
//! .unwrap()
//! .with_beta(12.0);
//!
//! let solution = input.solve().unwrap();
//! let applied = solution.applied_loads(DesignLoads::new(Kips(840.0), Kips(50.0), Kips(100.0)));
//! assert!((applied.gusset_to_beam_shear().0 - 440.0).abs() < 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - UFM solver and limit-state calculators
//! - [`loads`] - Design loads, multipliers, and interface forces
//! - [`members`] - Plates and rolled-shape members
//! - [`connections`] - Bolt and weld configurations
//! - [`materials`] - Steel, bolt, and electrode grades; shape database
//! - [`settings`] - Resistance factors and design limits
//! - [`report`] - Collected results for one connection
//! - [`trace`] - Step-by-step calculation trace
//! - [`units`] - Type-safe unit wrappers and dimensioned quantities
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod connections;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod members;
pub mod report;
pub mod settings;
pub mod trace;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{LimitState, LimitStateResult};
pub use connections::{BoltConfiguration, Connection, LoadingOrientation, WeldConfiguration};
pub use errors::{CalcError, CalcResult};
pub use loads::{AppliedLoads, DesignLoads, LoadMultipliers};
pub use members::{DimensionedPlate, Member, Plate, PlateDimensions, ShapeMember};
pub use report::ConnectionReport;
pub use settings::DesignSettings;
