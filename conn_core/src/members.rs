//! # Connected Members
//!
//! Everything a limit state can be checked against implements [`Member`]:
//! custom plates (gussets, end plates) and rolled shapes from the section
//! database. The trait is resolved once, at construction, so calculators never
//! probe a member for which thickness property it happens to carry.
//!
//! ## Plate Lifecycle
//!
//! A gusset is usually created before its size is known; the UFM solver sizes
//! it later. That is modelled as two types:
//!
//! ```text
//! Plate (t, material, clipping)  --set_dimensions()-->  DimensionedPlate
//! ```
//!
//! `set_dimensions` consumes the `Plate`, so no calculator can ever observe a
//! half-sized plate, and checks that need plate dimensions take a
//! `DimensionedPlate`.
//!
//! ## Example
//!
//! ```rust
//! use conn_core::materials::material;
//! use conn_core::members::{Member, Plate, PlateDimensions};
//!
//! let plate = Plate::new(0.5, material("A36").unwrap())
//!     .unwrap()
//!     .set_dimensions(PlateDimensions::new(10.0, 4.0).unwrap())
//!     .unwrap();
//! assert_eq!(plate.gross_area().unwrap().0, 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{Material, ShapeType, SteelShape, SteelShapeDb};
use crate::units::{Inches, SqIn};

/// Broad member family; selects failure patterns (e.g. L vs U block shear)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    Plate,
    Angle,
    WideFlange,
}

impl MemberKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            MemberKind::Plate => "Plate",
            MemberKind::Angle => "Angle",
            MemberKind::WideFlange => "Wide Flange",
        }
    }
}

/// Capability interface shared by every connected member.
pub trait Member: Send + Sync {
    /// Identity used in error messages and reports
    fn label(&self) -> &str;

    fn material(&self) -> &Material;

    /// Thickness of the connected element (plate thickness, angle leg, or web)
    fn thickness(&self) -> Inches;

    /// Gross cross-sectional area resisting axial load
    fn gross_area(&self) -> CalcResult<SqIn>;

    /// Capacity multiplier for members acting in multiples (2 for double angles)
    fn loading_condition(&self) -> f64;

    fn kind(&self) -> MemberKind;

    /// Connection eccentricity x̄ used in the shear lag factor
    fn connection_eccentricity(&self) -> CalcResult<Inches> {
        Err(CalcError::missing_property(self.label(), "x_bar_in"))
    }
}

// ============================================================================
// Plates
// ============================================================================

/// Overall plate dimensions.
///
/// `length` runs horizontally along the gusset-to-beam interface and `width`
/// runs vertically along the gusset-to-column interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateDimensions {
    pub length_in: f64,
    pub width_in: f64,
}

impl PlateDimensions {
    pub fn new(length_in: f64, width_in: f64) -> CalcResult<Self> {
        let dims = PlateDimensions { length_in, width_in };
        dims.validate()?;
        Ok(dims)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.length_in > 0.0) {
            return Err(CalcError::geometry_infeasible(
                "plate dimensions",
                format!("length {:.3} in must be positive", self.length_in),
            ));
        }
        if !(self.width_in > 0.0) {
            return Err(CalcError::geometry_infeasible(
                "plate dimensions",
                format!("width {:.3} in must be positive", self.width_in),
            ));
        }
        Ok(())
    }

    pub fn length(&self) -> Inches {
        Inches(self.length_in)
    }

    pub fn width(&self) -> Inches {
        Inches(self.width_in)
    }
}

/// A custom plate whose size has not been set yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    /// User label (e.g., "Gusset", "End Plate")
    pub label: String,

    /// Plate thickness (in)
    pub thickness_in: f64,

    pub material: Material,

    /// Capacity multiplier (e.g., 2 for a pair of plates)
    pub loading_condition: f64,

    /// Corner clip that shortens the interface edges (in)
    pub clipping_in: f64,
}

impl Plate {
    /// Create a plate; thickness and material are required
    pub fn new(thickness_in: f64, material: Material) -> CalcResult<Self> {
        if !(thickness_in > 0.0) {
            return Err(CalcError::invalid_input(
                "thickness_in",
                thickness_in.to_string(),
                "Plate thickness must be positive",
            ));
        }
        Ok(Plate {
            label: "Plate".to_string(),
            thickness_in,
            material,
            loading_condition: 1.0,
            clipping_in: 0.0,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_loading_condition(mut self, loading_condition: f64) -> Self {
        self.loading_condition = loading_condition;
        self
    }

    pub fn with_clipping(mut self, clipping_in: f64) -> Self {
        self.clipping_in = clipping_in;
        self
    }

    /// Assign final dimensions. This is the only way to get a `DimensionedPlate`.
    pub fn set_dimensions(self, dimensions: PlateDimensions) -> CalcResult<DimensionedPlate> {
        dimensions.validate()?;
        if self.clipping_in < 0.0 {
            return Err(CalcError::invalid_input(
                "clipping_in",
                self.clipping_in.to_string(),
                "Clip cannot be negative",
            ));
        }
        if self.clipping_in >= dimensions.length_in.min(dimensions.width_in) {
            return Err(CalcError::geometry_infeasible(
                format!("plate '{}'", self.label),
                format!(
                    "clip {:.3} in consumes an entire edge ({:.3} x {:.3} in)",
                    self.clipping_in, dimensions.length_in, dimensions.width_in
                ),
            ));
        }
        if self.loading_condition <= 0.0 {
            return Err(CalcError::invalid_input(
                "loading_condition",
                self.loading_condition.to_string(),
                "Loading condition must be positive",
            ));
        }
        Ok(DimensionedPlate {
            plate: self,
            dimensions,
        })
    }
}

impl Member for Plate {
    fn label(&self) -> &str {
        &self.label
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn thickness(&self) -> Inches {
        Inches(self.thickness_in)
    }

    fn gross_area(&self) -> CalcResult<SqIn> {
        Err(CalcError::missing_property(&self.label, "width_in"))
    }

    fn loading_condition(&self) -> f64 {
        self.loading_condition
    }

    fn kind(&self) -> MemberKind {
        MemberKind::Plate
    }
}

/// A plate with final dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionedPlate {
    plate: Plate,
    dimensions: PlateDimensions,
}

impl DimensionedPlate {
    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    pub fn dimensions(&self) -> PlateDimensions {
        self.dimensions
    }

    pub fn length(&self) -> Inches {
        self.dimensions.length()
    }

    pub fn width(&self) -> Inches {
        self.dimensions.width()
    }

    pub fn clipping(&self) -> Inches {
        Inches(self.plate.clipping_in)
    }

    /// Horizontal section area (length x t), resisting vertical load
    pub fn horizontal_section_area(&self) -> SqIn {
        self.length() * self.thickness()
    }

    /// Vertical section area (width x t), resisting horizontal load
    pub fn vertical_section_area(&self) -> SqIn {
        self.width() * self.thickness()
    }
}

impl Member for DimensionedPlate {
    fn label(&self) -> &str {
        &self.plate.label
    }

    fn material(&self) -> &Material {
        &self.plate.material
    }

    fn thickness(&self) -> Inches {
        Inches(self.plate.thickness_in)
    }

    /// A plate in axial tension along its length works on its width
    fn gross_area(&self) -> CalcResult<SqIn> {
        Ok(self.vertical_section_area())
    }

    fn loading_condition(&self) -> f64 {
        self.plate.loading_condition
    }

    fn kind(&self) -> MemberKind {
        MemberKind::Plate
    }
}

// ============================================================================
// Rolled Shapes
// ============================================================================

/// Web geometry needed by the concentrated-force checks (AISC J10)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WebProperties {
    pub depth_in: f64,
    pub tw_in: f64,
    pub tf_in: f64,
    pub k_des_in: f64,
}

/// A rolled section from the shapes database, normalized to [`Member`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeMember {
    shape: SteelShape,
    material: Material,
    thickness_in: f64,
    loading_condition: f64,
}

impl ShapeMember {
    /// Wrap a shape; its connected-element thickness is resolved here once.
    pub fn new(shape: &SteelShape, material: Material) -> CalcResult<Self> {
        let thickness = match shape.shape_type {
            ShapeType::L => shape.t_in,
            ShapeType::W => shape.tw_in,
        };
        let thickness_in = thickness
            .filter(|t| *t > 0.0)
            .ok_or_else(|| CalcError::missing_property(&shape.label, "thickness"))?;

        Ok(ShapeMember {
            shape: shape.clone(),
            material,
            thickness_in,
            loading_condition: 1.0,
        })
    }

    /// Look up a shape by name and wrap it
    pub fn from_db(db: &SteelShapeDb, label: &str, material: Material) -> CalcResult<Self> {
        Self::new(db.lookup(label)?, material)
    }

    pub fn with_loading_condition(mut self, loading_condition: f64) -> Self {
        self.loading_condition = loading_condition;
        self
    }

    pub fn shape(&self) -> &SteelShape {
        &self.shape
    }

    /// Web properties; fails for shapes without a web (angles)
    pub fn web_properties(&self) -> CalcResult<WebProperties> {
        let missing = |prop: &str| CalcError::missing_property(&self.shape.label, prop);
        Ok(WebProperties {
            depth_in: self.shape.depth_in.ok_or_else(|| missing("depth_in"))?,
            tw_in: self.shape.tw_in.ok_or_else(|| missing("tw_in"))?,
            tf_in: self.shape.tf_in.ok_or_else(|| missing("tf_in"))?,
            k_des_in: self.shape.k_des_in.ok_or_else(|| missing("k_des_in"))?,
        })
    }
}

impl Member for ShapeMember {
    fn label(&self) -> &str {
        &self.shape.label
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn thickness(&self) -> Inches {
        Inches(self.thickness_in)
    }

    fn gross_area(&self) -> CalcResult<SqIn> {
        Ok(SqIn(self.shape.area_in2))
    }

    fn loading_condition(&self) -> f64 {
        self.loading_condition
    }

    fn kind(&self) -> MemberKind {
        match self.shape.shape_type {
            ShapeType::W => MemberKind::WideFlange,
            ShapeType::L => MemberKind::Angle,
        }
    }

    fn connection_eccentricity(&self) -> CalcResult<Inches> {
        self.shape
            .x_bar_in
            .map(Inches)
            .ok_or_else(|| CalcError::missing_property(&self.shape.label, "x_bar_in"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{builtin_connection_shapes, material};

    fn gusset() -> Plate {
        Plate::new(1.0, material("A572-GR50").unwrap())
            .unwrap()
            .with_label("Gusset")
            .with_clipping(0.75)
    }

    #[test]
    fn test_plate_requires_thickness() {
        let err = Plate::new(0.0, material("A36").unwrap()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_undimensioned_plate_has_no_area() {
        let err = gusset().gross_area().unwrap_err();
        assert_eq!(err, CalcError::missing_property("Gusset", "width_in"));
    }

    #[test]
    fn test_set_dimensions() {
        let plate = gusset().set_dimensions(PlateDimensions::new(31.5, 22.5).unwrap()).unwrap();
        assert_eq!(plate.horizontal_section_area(), SqIn(31.5));
        assert_eq!(plate.vertical_section_area(), SqIn(22.5));
        assert_eq!(plate.gross_area().unwrap(), SqIn(22.5));
        assert_eq!(plate.clipping(), Inches(0.75));
    }

    #[test]
    fn test_set_dimensions_rejects_bad_geometry() {
        assert!(PlateDimensions::new(-1.0, 4.0).is_err());
        let clipped = gusset().with_clipping(5.0);
        let err = clipped
            .set_dimensions(PlateDimensions { length_in: 4.0, width_in: 10.0 })
            .unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_INFEASIBLE");
    }

    #[test]
    fn test_shape_member_resolves_thickness() {
        let db = builtin_connection_shapes();
        let angle = ShapeMember::from_db(&db, "L8X6X1", material("A36").unwrap()).unwrap();
        assert_eq!(angle.thickness(), Inches(1.0));
        assert_eq!(angle.kind(), MemberKind::Angle);
        assert_eq!(angle.connection_eccentricity().unwrap(), Inches(1.65));

        let beam = ShapeMember::from_db(&db, "W21X83", material("A992").unwrap()).unwrap();
        assert_eq!(beam.thickness(), Inches(0.515));
        assert!(beam.connection_eccentricity().is_err());
        assert_eq!(beam.web_properties().unwrap().k_des_in, 1.34);
        assert!(angle.web_properties().is_err());
    }

    #[test]
    fn test_shape_member_missing_thickness() {
        let db = builtin_connection_shapes();
        let mut shape = db.lookup("W14X90").unwrap().clone();
        shape.tw_in = None;
        let err = ShapeMember::new(&shape, material("A992").unwrap()).unwrap_err();
        assert_eq!(err, CalcError::missing_property("W14X90", "thickness"));
    }

    #[test]
    fn test_unknown_shape() {
        let db = builtin_connection_shapes();
        let err = ShapeMember::from_db(&db, "W40X999", material("A992").unwrap()).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_SHAPE");
    }
}
