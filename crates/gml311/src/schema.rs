//! The GML 3.1.1 package
//!
//! Class and feature declarations for the supported subset of the schema.
//! The package is built once per process and shared by every graph through
//! an `Arc`; feature indices are fixed and exported as constants by the
//! `types` modules, and [`build_schema`] checks each declaration lands on
//! its constant.

use std::sync::Arc;

use once_cell::sync::Lazy;
use xsd_model::{
    ClassBuilder, ClassId, EnumId, FeatureSpec, GraphConfig, ModelError, ModelGraph, ModelResult,
    Package, PackageBuilder, ValueType,
};

use crate::enums::{ActuateType, CurveInterpolationType, ShowType, TypeType};
use crate::types::{
    circle, code, coord, envelope, geometry, line_string, location, measure, point, position, xlink,
};

/// GML namespace URI
pub const NS_URI: &str = "http://www.opengis.net/gml";

/// Class ids of the package
#[derive(Debug, Clone, Copy)]
pub struct Classes {
    pub abstract_gml: ClassId,
    pub abstract_geometry: ClassId,
    pub direct_position: ClassId,
    pub coord: ClassId,
    pub measure: ClassId,
    pub code: ClassId,
    pub point: ClassId,
    pub point_property: ClassId,
    pub multi_point: ClassId,
    pub line_string: ClassId,
    pub envelope: ClassId,
    pub circle_by_center_point: ClassId,
    pub location_property: ClassId,
}

/// Enumeration ids of the package
#[derive(Debug, Clone, Copy)]
pub struct Enums {
    pub actuate: EnumId,
    pub show: EnumId,
    pub type_type: EnumId,
    pub curve_interpolation: EnumId,
}

/// The built package with its class and enumeration ids
#[derive(Debug)]
pub struct Gml311Schema {
    pub package: Arc<Package>,
    pub classes: Classes,
    pub enums: Enums,
}

impl Gml311Schema {
    /// Empty graph over the GML package
    pub fn graph(&self) -> ModelGraph {
        ModelGraph::new(Arc::clone(&self.package))
    }

    /// Empty graph over the GML package with explicit settings
    pub fn graph_with_config(&self, config: GraphConfig) -> ModelGraph {
        ModelGraph::with_config(Arc::clone(&self.package), config)
    }
}

static SCHEMA: Lazy<Gml311Schema> = Lazy::new(|| match build_schema() {
    Ok(schema) => schema,
    Err(e) => panic!("GML 3.1.1 package declarations are inconsistent: {}", e),
});

/// The process-wide GML 3.1.1 package, built on first use
pub fn schema() -> &'static Gml311Schema {
    &SCHEMA
}

/// Declare a feature at a known index
fn declare(class: &mut ClassBuilder<'_>, expected: usize, spec: FeatureSpec) -> ModelResult<usize> {
    let index = class.feature(spec);
    if index != expected {
        return Err(ModelError::Config(format!(
            "feature declared at index {} instead of {}",
            index, expected
        )));
    }
    Ok(index)
}

/// Declare the xlink attribute block starting at `base`
fn declare_xlink(class: &mut ClassBuilder<'_>, base: usize, enums: &Enums) -> ModelResult<()> {
    let unsettable_enum = |name: &str, id: EnumId, default: u32| {
        FeatureSpec::attribute(name, ValueType::Enum(id))
            .default_value(xsd_model::EnumValue::new(id, default))
            .unsettable()
    };
    declare(
        class,
        base + xlink::ACTUATE,
        unsettable_enum("actuate", enums.actuate, ActuateType::OnLoad as u32),
    )?;
    declare(class, base + xlink::ARCROLE, FeatureSpec::attribute("arcrole", ValueType::String))?;
    declare(class, base + xlink::HREF, FeatureSpec::attribute("href", ValueType::String))?;
    declare(
        class,
        base + xlink::REMOTE_SCHEMA,
        FeatureSpec::attribute("remoteSchema", ValueType::String),
    )?;
    declare(class, base + xlink::ROLE, FeatureSpec::attribute("role", ValueType::String))?;
    declare(class, base + xlink::SHOW, unsettable_enum("show", enums.show, ShowType::New as u32))?;
    declare(class, base + xlink::TITLE, FeatureSpec::attribute("title", ValueType::String))?;
    declare(
        class,
        base + xlink::TYPE,
        unsettable_enum("type", enums.type_type, TypeType::Simple as u32),
    )?;
    Ok(())
}

fn declare_enums(b: &mut PackageBuilder) -> Enums {
    Enums {
        actuate: b.enumeration("ActuateType", ActuateType::LITERALS),
        show: b.enumeration("ShowType", ShowType::LITERALS),
        type_type: b.enumeration("TypeType", TypeType::LITERALS),
        curve_interpolation: b
            .enumeration("CurveInterpolationType", CurveInterpolationType::LITERALS),
    }
}

/// Build the GML 3.1.1 package
pub fn build_schema() -> ModelResult<Gml311Schema> {
    let mut b = Package::builder("gml311", NS_URI);
    let enums = declare_enums(&mut b);

    let mut c = b.class("AbstractGMLType").abstract_class();
    declare(
        &mut c,
        geometry::DESCRIPTION,
        FeatureSpec::attribute("description", ValueType::String),
    )?;
    declare(&mut c, geometry::NAME, FeatureSpec::many_attribute("name", ValueType::String))?;
    declare(&mut c, geometry::ID, FeatureSpec::attribute("id", ValueType::String))?;
    let abstract_gml = c.finish();

    let mut c = b.subclass("AbstractGeometryType", abstract_gml).abstract_class();
    declare(&mut c, geometry::GID, FeatureSpec::attribute("gid", ValueType::String))?;
    declare(&mut c, geometry::SRS_NAME, FeatureSpec::attribute("srsName", ValueType::String))?;
    declare(
        &mut c,
        geometry::SRS_DIMENSION,
        FeatureSpec::attribute("srsDimension", ValueType::Int),
    )?;
    let abstract_geometry = c.finish();

    let mut c = b.class("DirectPositionType");
    declare(&mut c, position::VALUE, FeatureSpec::attribute("value", ValueType::DoubleList))?;
    declare(&mut c, position::SRS_NAME, FeatureSpec::attribute("srsName", ValueType::String))?;
    declare(
        &mut c,
        position::SRS_DIMENSION,
        FeatureSpec::attribute("srsDimension", ValueType::Int),
    )?;
    let direct_position = c.finish();

    let mut c = b.class("CoordType");
    for (index, name) in [(coord::X, "x"), (coord::Y, "y"), (coord::Z, "z")] {
        declare(
            &mut c,
            index,
            FeatureSpec::attribute(name, ValueType::Double).default_value(0.0).unsettable(),
        )?;
    }
    let coord_class = c.finish();

    let mut c = b.class("MeasureType");
    declare(
        &mut c,
        measure::VALUE,
        FeatureSpec::attribute("value", ValueType::Double).default_value(0.0).unsettable(),
    )?;
    declare(&mut c, measure::UOM, FeatureSpec::attribute("uom", ValueType::String).required())?;
    let measure_class = c.finish();

    let mut c = b.class("CodeType");
    declare(&mut c, code::VALUE, FeatureSpec::attribute("value", ValueType::String))?;
    declare(&mut c, code::CODE_SPACE, FeatureSpec::attribute("codeSpace", ValueType::String))?;
    let code = c.finish();

    let mut c = b.subclass("PointType", abstract_geometry);
    declare(&mut c, point::POS, FeatureSpec::containment("pos", direct_position))?;
    declare(&mut c, point::COORD, FeatureSpec::containment("coord", coord_class))?;
    let point_class = c.finish();

    let mut c = b.class("PointPropertyType");
    declare(&mut c, point::PROPERTY_POINT, FeatureSpec::containment("point", point_class))?;
    declare_xlink(&mut c, point::PROPERTY_XLINK, &enums)?;
    let point_property = c.finish();

    let mut c = b.subclass("MultiPointType", abstract_geometry);
    declare(
        &mut c,
        point::POINT_MEMBER,
        FeatureSpec::many_containment("pointMember", point_property),
    )?;
    let multi_point = c.finish();

    let mut c = b.subclass("LineStringType", abstract_geometry);
    let group = declare(&mut c, line_string::GROUP, FeatureSpec::group("group"))?;
    declare(
        &mut c,
        line_string::POS,
        FeatureSpec::many_containment("pos", direct_position).in_group(group),
    )?;
    declare(
        &mut c,
        line_string::POINT_PROPERTY,
        FeatureSpec::many_containment("pointProperty", point_property).in_group(group),
    )?;
    declare(
        &mut c,
        line_string::COORD,
        FeatureSpec::many_containment("coord", coord_class).in_group(group),
    )?;
    let line_string_class = c.finish();

    let mut c = b.class("EnvelopeType");
    declare(
        &mut c,
        envelope::LOWER_CORNER,
        FeatureSpec::containment("lowerCorner", direct_position),
    )?;
    declare(
        &mut c,
        envelope::UPPER_CORNER,
        FeatureSpec::containment("upperCorner", direct_position),
    )?;
    declare(&mut c, envelope::COORD, FeatureSpec::many_containment("coord", coord_class))?;
    declare(&mut c, envelope::SRS_NAME, FeatureSpec::attribute("srsName", ValueType::String))?;
    declare(
        &mut c,
        envelope::SRS_DIMENSION,
        FeatureSpec::attribute("srsDimension", ValueType::Int),
    )?;
    let envelope_class = c.finish();

    let mut c = b.class("CircleByCenterPointType");
    let group = declare(&mut c, circle::GROUP, FeatureSpec::group("group"))?;
    declare(&mut c, circle::POS, FeatureSpec::containment("pos", direct_position).in_group(group))?;
    declare(
        &mut c,
        circle::POINT_PROPERTY,
        FeatureSpec::containment("pointProperty", point_property).in_group(group),
    )?;
    declare(&mut c, circle::RADIUS, FeatureSpec::containment("radius", measure_class).required())?;
    declare(
        &mut c,
        circle::INTERPOLATION,
        FeatureSpec::attribute("interpolation", ValueType::Enum(enums.curve_interpolation))
            .default_value(
                CurveInterpolationType::CircularArcCenterPointWithRadius
                    .to_value_in(enums.curve_interpolation),
            )
            .unsettable(),
    )?;
    declare(
        &mut c,
        circle::NUM_ARC,
        FeatureSpec::attribute("numArc", ValueType::Int).default_value(1i64).unsettable(),
    )?;
    let circle_class = c.finish();

    let mut c = b.class("LocationPropertyType");
    let group = declare(&mut c, location::GROUP, FeatureSpec::group("group"))?;
    declare(
        &mut c,
        location::GEOMETRY,
        FeatureSpec::containment("geometry", abstract_geometry).in_group(group),
    )?;
    declare(
        &mut c,
        location::LOCATION_KEY_WORD,
        FeatureSpec::containment("locationKeyWord", code).in_group(group),
    )?;
    declare(
        &mut c,
        location::LOCATION_STRING,
        FeatureSpec::attribute("locationString", ValueType::String).in_group(group),
    )?;
    declare_xlink(&mut c, location::XLINK, &enums)?;
    let location_class = c.finish();

    let package = Arc::new(b.build()?);
    tracing::debug!(
        "Built GML 3.1.1 package with {} classes",
        package.classes().len()
    );

    Ok(Gml311Schema {
        package,
        classes: Classes {
            abstract_gml,
            abstract_geometry,
            direct_position,
            coord: coord_class,
            measure: measure_class,
            code,
            point: point_class,
            point_property,
            multi_point,
            line_string: line_string_class,
            envelope: envelope_class,
            circle_by_center_point: circle_class,
            location_property: location_class,
        },
        enums,
    })
}
