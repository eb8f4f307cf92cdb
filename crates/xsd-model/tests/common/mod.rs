//! Shared fixture schema for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use xsd_model::{ClassId, FeatureSpec, Package, ValueType};

/// `PointType` feature indices
pub const POS: usize = 0;
pub const SRS_NAME: usize = 1;
pub const RADIUS: usize = 2;
pub const MEMBERS: usize = 3;

/// `DirectPositionType` feature indices
pub const VALUE: usize = 0;

/// `PathType` feature indices
pub const GROUP: usize = 0;
pub const COORD: usize = 1;
pub const TAG: usize = 2;
pub const LABEL: usize = 3;

pub struct Fixture {
    pub package: Arc<Package>,
    pub point: ClassId,
    pub position: ClassId,
    pub path: ClassId,
}

/// A small geometry-like schema:
///
/// - `DirectPositionType { value: double list }`
/// - `PointType { pos: containment, srsName: string, radius: unsettable double = 0.0,
///   members: many containment of PointType }`
/// - `PathType { group, coord: many containment in group, tag: many string in group,
///   label: string in group }`
pub fn fixture() -> Fixture {
    let mut b = Package::builder("fixture", "urn:fixture");

    let mut position = b.class("DirectPositionType");
    position.feature(FeatureSpec::attribute("value", ValueType::DoubleList));
    let position = position.finish();

    let mut point = b.class("PointType");
    let point_id = point.id();
    point.feature(FeatureSpec::containment("pos", position));
    point.feature(FeatureSpec::attribute("srsName", ValueType::String));
    point.feature(
        FeatureSpec::attribute("radius", ValueType::Double)
            .default_value(0.0)
            .unsettable(),
    );
    point.feature(FeatureSpec::many_containment("members", point_id));
    let point = point.finish();

    let mut path = b.class("PathType");
    let group = path.feature(FeatureSpec::group("group"));
    path.feature(FeatureSpec::many_containment("coord", position).in_group(group));
    path.feature(FeatureSpec::many_attribute("tag", ValueType::String).in_group(group));
    path.feature(FeatureSpec::attribute("label", ValueType::String).in_group(group));
    let path = path.finish();

    Fixture {
        package: Arc::new(b.build().expect("fixture schema")),
        point,
        position,
        path,
    }
}
