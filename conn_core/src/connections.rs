//! # Connection Configurations
//!
//! A connection is either bolted or welded, never both; [`Connection`] is a
//! sum type over the two payloads. Calculators that only make sense for one
//! kind ask for it through [`Connection::as_bolted`] / [`Connection::as_welded`]
//! and get `CalcError::ConfigurationMismatch` otherwise.
//!
//! ## Bolt Pattern Geometry
//!
//! ```text
//!            column_spacing
//!            |<->|
//!     o   o   o   o   o   o   o    ---  row 1
//!                                   | row_spacing
//!     o   o   o   o   o   o   o    ---  row 2
//!  |<>|                            ^
//!  edge_distance_horizontal        edge_distance_vertical (to the free edge)
//! ```
//!
//! Rows stack perpendicular to the member axis; columns run along it.
//!
//! ## Example
//!
//! ```rust
//! use conn_core::connections::{BoltConfiguration, Connection};
//! use conn_core::materials::bolt_grade;
//!
//! let bolts = BoltConfiguration {
//!     grade: bolt_grade("A325-X").unwrap(),
//!     diameter_in: 0.875,
//!     n_rows: 2,
//!     n_columns: 7,
//!     row_spacing_in: 3.0,
//!     column_spacing_in: 3.0,
//!     edge_distance_vertical_in: 2.0,
//!     edge_distance_horizontal_in: 1.5,
//! };
//! let connection = Connection::bolted(bolts).unwrap();
//! assert_eq!(connection.as_bolted().unwrap().bolt_count(), 14);
//! assert!(connection.as_welded().is_err());
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{BoltGrade, WeldElectrode};
use crate::units::{Inches, SqIn};

/// Connection kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    Bolted,
    Welded,
}

impl ConnectionType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionType::Bolted => "bolted",
            ConnectionType::Welded => "welded",
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Direction of the force relative to the bolt pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadingOrientation {
    /// Force along the member axis, parallel to the bolt columns
    Axial,
    /// Force across the member axis, parallel to the bolt rows' stacking
    Shear,
}

/// Bolt-line geometry seen along the direction of load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltLines {
    /// Pitch between bolts in a line, in the direction of load
    pub spacing: Inches,
    /// Edge distance from the last bolt to the loaded edge
    pub edge_distance: Inches,
    /// Bolts in each line parallel to the load
    pub bolts_per_line: u32,
    /// Number of lines parallel to the load
    pub lines: u32,
}

/// Geometry and grade of a bolt group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltConfiguration {
    pub grade: BoltGrade,

    /// Nominal bolt diameter (in)
    pub diameter_in: f64,

    /// Bolt rows across the member axis (≥ 1)
    pub n_rows: u32,

    /// Bolts per row along the member axis (≥ 1)
    pub n_columns: u32,

    /// Spacing between rows (in)
    pub row_spacing_in: f64,

    /// Spacing between bolts along a row (in)
    pub column_spacing_in: f64,

    /// Edge distance measured across the member axis (in)
    pub edge_distance_vertical_in: f64,

    /// Edge distance measured along the member axis (in)
    pub edge_distance_horizontal_in: f64,
}

impl BoltConfiguration {
    /// Validate counts, spacings, and edge distances.
    pub fn validate(&self) -> CalcResult<()> {
        if self.n_rows < 1 {
            return Err(CalcError::invalid_input("n_rows", self.n_rows.to_string(), "At least one bolt row is required"));
        }
        if self.n_columns < 1 {
            return Err(CalcError::invalid_input(
                "n_columns",
                self.n_columns.to_string(),
                "At least one bolt column is required",
            ));
        }
        let lengths = [
            ("diameter_in", self.diameter_in),
            ("row_spacing_in", self.row_spacing_in),
            ("column_spacing_in", self.column_spacing_in),
            ("edge_distance_vertical_in", self.edge_distance_vertical_in),
            ("edge_distance_horizontal_in", self.edge_distance_horizontal_in),
        ];
        for (field, value) in lengths {
            if !(value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive length"));
            }
        }
        Ok(())
    }

    pub fn diameter(&self) -> Inches {
        Inches(self.diameter_in)
    }

    /// Nominal unthreaded body area Ab = πd²/4
    pub fn bolt_area(&self) -> SqIn {
        SqIn(PI * self.diameter_in.powi(2) / 4.0)
    }

    pub fn bolt_count(&self) -> u32 {
        self.n_rows * self.n_columns
    }

    /// Bolt lines as seen by a force in the given orientation
    pub fn lines(&self, orientation: LoadingOrientation) -> BoltLines {
        match orientation {
            LoadingOrientation::Axial => BoltLines {
                spacing: Inches(self.column_spacing_in),
                edge_distance: Inches(self.edge_distance_horizontal_in),
                bolts_per_line: self.n_columns,
                lines: self.n_rows,
            },
            LoadingOrientation::Shear => BoltLines {
                spacing: Inches(self.row_spacing_in),
                edge_distance: Inches(self.edge_distance_vertical_in),
                bolts_per_line: self.n_rows,
                lines: self.n_columns,
            },
        }
    }

    /// Length of the bolt pattern along the member axis, first to last bolt
    pub fn pattern_length(&self) -> Inches {
        Inches(self.column_spacing_in * f64::from(self.n_columns.saturating_sub(1)))
    }

    /// Width of the bolt pattern across the member axis, outer rows
    pub fn pattern_gage(&self) -> Inches {
        Inches(self.row_spacing_in * f64::from(self.n_rows.saturating_sub(1)))
    }
}

/// Fillet weld group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldConfiguration {
    pub electrode: WeldElectrode,

    /// Fillet weld leg size (in)
    pub weld_size_in: f64,

    /// Effective length of each weld line (in)
    pub length_in: f64,

    /// Number of parallel weld lines (2 for welds on both faces)
    pub lines: u32,
}

impl WeldConfiguration {
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.weld_size_in > 0.0) {
            return Err(CalcError::invalid_input(
                "weld_size_in",
                self.weld_size_in.to_string(),
                "Weld size must be positive",
            ));
        }
        if !(self.length_in > 0.0) {
            return Err(CalcError::invalid_input(
                "length_in",
                self.length_in.to_string(),
                "Weld length must be positive",
            ));
        }
        if self.lines < 1 {
            return Err(CalcError::invalid_input("lines", self.lines.to_string(), "At least one weld line is required"));
        }
        Ok(())
    }

    pub fn length(&self) -> Inches {
        Inches(self.length_in)
    }

    /// Effective throat of an equal-leg fillet, 0.707w
    pub fn throat(&self) -> Inches {
        Inches(self.weld_size_in * std::f64::consts::FRAC_1_SQRT_2)
    }
}

/// A bolted or welded connection.
///
/// Payloads are validated on construction through [`Connection::bolted`] /
/// [`Connection::welded`], on deserialization, and again whenever a
/// calculator takes the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", try_from = "ConnectionRecord")]
pub enum Connection {
    Bolted(BoltConfiguration),
    Welded(WeldConfiguration),
}

/// Unvalidated wire form of [`Connection`]
#[derive(Deserialize)]
#[serde(tag = "type", content = "config")]
enum ConnectionRecord {
    Bolted(BoltConfiguration),
    Welded(WeldConfiguration),
}

impl TryFrom<ConnectionRecord> for Connection {
    type Error = CalcError;

    fn try_from(record: ConnectionRecord) -> CalcResult<Self> {
        match record {
            ConnectionRecord::Bolted(config) => Connection::bolted(config),
            ConnectionRecord::Welded(config) => Connection::welded(config),
        }
    }
}

impl Connection {
    /// Validated bolted connection
    pub fn bolted(config: BoltConfiguration) -> CalcResult<Self> {
        config.validate()?;
        Ok(Connection::Bolted(config))
    }

    /// Validated welded connection
    pub fn welded(config: WeldConfiguration) -> CalcResult<Self> {
        config.validate()?;
        Ok(Connection::Welded(config))
    }

    pub fn connection_type(&self) -> ConnectionType {
        match self {
            Connection::Bolted(_) => ConnectionType::Bolted,
            Connection::Welded(_) => ConnectionType::Welded,
        }
    }

    pub fn as_bolted(&self) -> CalcResult<&BoltConfiguration> {
        self.bolted_for("bolted connection")
    }

    pub fn as_welded(&self) -> CalcResult<&WeldConfiguration> {
        self.welded_for("welded connection")
    }

    /// Validated bolt payload, naming the requesting calculator in the mismatch error
    pub fn bolted_for(&self, calculator: &str) -> CalcResult<&BoltConfiguration> {
        match self {
            Connection::Bolted(config) => {
                config.validate()?;
                Ok(config)
            }
            Connection::Welded(_) => Err(CalcError::configuration_mismatch(
                calculator,
                ConnectionType::Bolted.display_name(),
                ConnectionType::Welded.display_name(),
            )),
        }
    }

    /// Validated weld payload, naming the requesting calculator in the mismatch error
    pub fn welded_for(&self, calculator: &str) -> CalcResult<&WeldConfiguration> {
        match self {
            Connection::Welded(config) => {
                config.validate()?;
                Ok(config)
            }
            Connection::Bolted(_) => Err(CalcError::configuration_mismatch(
                calculator,
                ConnectionType::Welded.display_name(),
                ConnectionType::Bolted.display_name(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{bolt_grade, weld_electrode};

    fn brace_bolts() -> BoltConfiguration {
        BoltConfiguration {
            grade: bolt_grade("A325-X").unwrap(),
            diameter_in: 0.875,
            n_rows: 2,
            n_columns: 7,
            row_spacing_in: 3.0,
            column_spacing_in: 3.0,
            edge_distance_vertical_in: 2.0,
            edge_distance_horizontal_in: 1.5,
        }
    }

    #[test]
    fn test_bolt_geometry() {
        let bolts = brace_bolts();
        assert!((bolts.bolt_area().0 - 0.6013).abs() < 1e-4);
        assert_eq!(bolts.pattern_length(), Inches(18.0));
        assert_eq!(bolts.pattern_gage(), Inches(3.0));

        let axial = bolts.lines(LoadingOrientation::Axial);
        assert_eq!(axial.bolts_per_line, 7);
        assert_eq!(axial.lines, 2);
        assert_eq!(axial.edge_distance, Inches(1.5));

        let shear = bolts.lines(LoadingOrientation::Shear);
        assert_eq!(shear.bolts_per_line, 2);
        assert_eq!(shear.edge_distance, Inches(2.0));
    }

    #[test]
    fn test_validation() {
        let mut bolts = brace_bolts();
        bolts.n_rows = 0;
        assert!(Connection::bolted(bolts).is_err());

        let mut bolts = brace_bolts();
        bolts.edge_distance_vertical_in = -1.0;
        let err = Connection::bolted(bolts).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_payload_mismatch() {
        let weld = Connection::welded(WeldConfiguration {
            electrode: weld_electrode("E70XX").unwrap(),
            weld_size_in: 0.3125,
            length_in: 31.5,
            lines: 2,
        })
        .unwrap();
        assert_eq!(weld.connection_type(), ConnectionType::Welded);

        let err = weld.bolted_for("BoltShearCalculator").unwrap_err();
        assert_eq!(err, CalcError::configuration_mismatch("BoltShearCalculator", "bolted", "welded"));
        assert!(weld.as_welded().is_ok());
    }

    #[test]
    fn test_deserialize_rejects_zero_bolt_count() {
        let connection = Connection::bolted(brace_bolts()).unwrap();
        let mut json = serde_json::to_value(&connection).unwrap();
        json["config"]["n_columns"] = serde_json::json!(0);

        let result: Result<Connection, _> = serde_json::from_value(json);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("n_columns"));
    }

    #[test]
    fn test_payload_access_revalidates() {
        let mut bolts = brace_bolts();
        bolts.n_columns = 0;
        assert_eq!(bolts.pattern_length(), Inches(0.0));

        let connection = Connection::Bolted(bolts);
        let err = connection.bolted_for("BoltBearingCalculator").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let weld = Connection::Welded(WeldConfiguration {
            electrode: weld_electrode("E70XX").unwrap(),
            weld_size_in: 0.3125,
            length_in: 31.5,
            lines: 0,
        });
        assert!(weld.as_welded().is_err());
    }

    #[test]
    fn test_serialization_tag() {
        let connection = Connection::bolted(brace_bolts()).unwrap();
        let json = serde_json::to_string(&connection).unwrap();
        assert!(json.contains("\"type\":\"Bolted\""));
        let roundtrip: Connection = serde_json::from_str(&json).unwrap();
        assert_eq!(connection, roundtrip);
    }
}
