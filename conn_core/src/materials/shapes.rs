//! Steel Shapes Database (AISC)
//!
//! Section properties for the rolled shapes that show up in braced-frame
//! connections: wide-flange beams and columns, and single angles used (often
//! back-to-back) as brace members.
//!
//! ## Data Source
//!
//! Values follow the AISC Shapes Database v16.0. Only the properties the
//! connection limit states read are carried: overall dimensions, thicknesses,
//! `k_des`, centroid location for angles, and the principal-axis properties.
//!
//! ## Name Normalization
//!
//! Labels are matched case-insensitively with `/` and `.` folded to `_`, so
//! `"L6X4X1/2"` and `"l6x4x1_2"` are the same key.
//!
//! ## Example
//!
//! ```rust
//! use conn_core::materials::shapes::builtin_connection_shapes;
//!
//! let db = builtin_connection_shapes();
//! let beam = db.lookup("W21X83").unwrap();
//! assert_eq!(beam.depth_in, Some(21.4));
//! assert!(db.lookup("W99X1").is_err());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Steel shape type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    /// Wide flange beam (W-shape)
    W,
    /// Single angle (L-shape)
    L,
}

impl ShapeType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeType::W => "Wide Flange (W)",
            ShapeType::L => "Angle (L)",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Structural steel shape with the section properties used in connection design.
///
/// All dimensional values are in inches (in, in², in³, in⁴).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelShape {
    /// Shape type (W, L)
    pub shape_type: ShapeType,

    /// AISC Manual label (e.g., "W14X90", "L8X6X1")
    pub label: String,

    /// Cross-sectional area (in²)
    pub area_in2: f64,

    /// Overall depth (in); long leg length for angles
    pub depth_in: Option<f64>,

    /// Flange width (in); short leg length for angles
    pub bf_in: Option<f64>,

    /// Flange thickness (in)
    pub tf_in: Option<f64>,

    /// Web thickness (in)
    pub tw_in: Option<f64>,

    /// Leg thickness for angles (in)
    pub t_in: Option<f64>,

    /// Distance from outer flange face to web toe of fillet, design value (in)
    pub k_des_in: Option<f64>,

    /// Centroid distance from the back of the long leg (in); angles only
    pub x_bar_in: Option<f64>,

    /// Centroid distance from the back of the short leg (in); angles only
    pub y_bar_in: Option<f64>,

    /// Moment of inertia about X-axis (in⁴)
    pub ix_in4: f64,

    /// Elastic section modulus about X-axis (in³)
    pub sx_in3: f64,

    /// Radius of gyration about X-axis (in)
    pub rx_in: f64,

    /// Moment of inertia about Y-axis (in⁴)
    pub iy_in4: f64,

    /// Radius of gyration about Y-axis (in)
    pub ry_in: f64,
}

impl SteelShape {
    /// Half the overall depth, the `eb`/`ec` offset used by the UFM
    pub fn half_depth(&self) -> CalcResult<f64> {
        self.depth_in
            .map(|d| d / 2.0)
            .ok_or_else(|| CalcError::missing_property(&self.label, "depth_in"))
    }
}

impl std::fmt::Display for SteelShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (A={:.2} in², Ix={:.1} in⁴)", self.label, self.area_in2, self.ix_in4)
    }
}

/// Normalize an AISC shape label to its database key
pub fn normalize_shape_name(label: &str) -> String {
    label.trim().to_uppercase().replace(['/', '.'], "_")
}

/// In-memory steel shapes database indexed by normalized label
#[derive(Debug, Clone, Default)]
pub struct SteelShapeDb {
    shapes: HashMap<String, SteelShape>,

    /// Database version (e.g., "16.0")
    pub version: Option<String>,
}

impl SteelShapeDb {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a shape into the database
    pub fn insert(&mut self, shape: SteelShape) {
        self.shapes.insert(normalize_shape_name(&shape.label), shape);
    }

    /// Look up a shape by its AISC label
    ///
    /// ```rust,ignore
    /// let shape = db.lookup("L6X4X1/2")?;
    /// let shape = db.lookup("l6x4x1_2")?; // Same entry
    /// ```
    pub fn lookup(&self, label: &str) -> CalcResult<&SteelShape> {
        self.shapes
            .get(&normalize_shape_name(label))
            .ok_or_else(|| CalcError::unknown_shape(label))
    }

    /// Get all shapes of a specific type
    pub fn shapes_of_type(&self, shape_type: ShapeType) -> Vec<&SteelShape> {
        self.shapes.values().filter(|s| s.shape_type == shape_type).collect()
    }

    /// Get the number of shapes in the database
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the database is empty
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

// ============================================================================
// Built-in Shapes (for use without an external database)
// ============================================================================

/// Get a database with the W-shapes and angles common in brace connections
pub fn builtin_connection_shapes() -> SteelShapeDb {
    let mut db = SteelShapeDb::new();

    // label, A, d, bf, tf, tw, kdes, Ix, Sx, rx, Iy, ry
    let w_shapes = [
        ("W12X40", 11.7, 11.9, 8.01, 0.515, 0.295, 1.02, 307.0, 51.5, 5.13, 44.1, 1.94),
        ("W14X90", 26.5, 14.0, 14.5, 0.710, 0.440, 1.31, 999.0, 143.0, 6.14, 362.0, 3.70),
        ("W18X50", 14.7, 18.0, 7.50, 0.570, 0.355, 0.972, 800.0, 88.9, 7.38, 40.1, 1.65),
        ("W21X83", 24.4, 21.4, 8.36, 0.835, 0.515, 1.34, 1830.0, 171.0, 8.67, 81.4, 1.83),
        ("W24X76", 22.4, 23.9, 8.99, 0.680, 0.440, 1.18, 2100.0, 176.0, 9.69, 82.5, 1.92),
    ];

    for (label, a, d, bf, tf, tw, kdes, ix, sx, rx, iy, ry) in w_shapes {
        db.insert(SteelShape {
            shape_type: ShapeType::W,
            label: label.to_string(),
            area_in2: a,
            depth_in: Some(d),
            bf_in: Some(bf),
            tf_in: Some(tf),
            tw_in: Some(tw),
            t_in: None,
            k_des_in: Some(kdes),
            x_bar_in: None,
            y_bar_in: None,
            ix_in4: ix,
            sx_in3: sx,
            rx_in: rx,
            iy_in4: iy,
            ry_in: ry,
        });
    }

    // label, A, long leg, short leg, t, x_bar, y_bar, Ix, Sx, rx, Iy, ry
    let angles = [
        ("L4X4X1/2", 3.75, 4.0, 4.0, 0.5, 1.18, 1.18, 5.52, 1.96, 1.21, 5.52, 1.21),
        ("L6X4X1/2", 4.75, 6.0, 4.0, 0.5, 0.981, 1.98, 17.3, 4.30, 1.91, 6.22, 1.14),
        ("L8X6X1", 13.0, 8.0, 6.0, 1.0, 1.65, 2.65, 80.9, 15.1, 2.49, 38.8, 1.72),
    ];

    for (label, a, long_leg, short_leg, t, x_bar, y_bar, ix, sx, rx, iy, ry) in angles {
        db.insert(SteelShape {
            shape_type: ShapeType::L,
            label: label.to_string(),
            area_in2: a,
            depth_in: Some(long_leg),
            bf_in: Some(short_leg),
            tf_in: None,
            tw_in: None,
            t_in: Some(t),
            k_des_in: None,
            x_bar_in: Some(x_bar),
            y_bar_in: Some(y_bar),
            ix_in4: ix,
            sx_in3: sx,
            rx_in: rx,
            iy_in4: iy,
            ry_in: ry,
        });
    }

    db.version = Some("builtin-connection".to_string());
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_type_display() {
        assert_eq!(ShapeType::W.to_string(), "Wide Flange (W)");
        assert_eq!(ShapeType::L.to_string(), "Angle (L)");
    }

    #[test]
    fn test_builtin_shapes() {
        let db = builtin_connection_shapes();
        assert_eq!(db.len(), 8);

        let w14x90 = db.lookup("W14X90").unwrap();
        assert_eq!(w14x90.area_in2, 26.5);
        assert_eq!(w14x90.half_depth().unwrap(), 7.0);

        let lower = db.lookup("w14x90").unwrap();
        assert_eq!(w14x90.label, lower.label);
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(normalize_shape_name(" l6x4x1/2 "), "L6X4X1_2");
        assert_eq!(normalize_shape_name("L6X4X0.5"), "L6X4X0_5");

        let db = builtin_connection_shapes();
        let a = db.lookup("L6X4X1/2").unwrap();
        let b = db.lookup("L6X4X1_2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shape_filtering() {
        let db = builtin_connection_shapes();
        let angles = db.shapes_of_type(ShapeType::L);
        assert_eq!(angles.len(), 3);
        assert!(angles.iter().all(|s| s.t_in.is_some()));
    }

    #[test]
    fn test_shape_not_found() {
        let db = builtin_connection_shapes();
        let err = db.lookup("NONEXISTENT").unwrap_err();
        assert_eq!(err, CalcError::unknown_shape("NONEXISTENT"));
    }

    #[test]
    fn test_shape_display() {
        let db = builtin_connection_shapes();
        let display = format!("{}", db.lookup("W21X83").unwrap());
        assert!(display.contains("W21X83"));
        assert!(display.contains("24.40"));
    }
}
