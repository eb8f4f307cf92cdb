//! Integration tests for the registry and reflective access

mod common;

use std::sync::Arc;

use common::*;
use xsd_model::{
    Check, FeatureKind, FeatureSpec, ModelError, ModelGraph, Package, Value, ValueType,
};

#[test]
fn test_feature_table_order() {
    let f = fixture();
    let features = f.package.describe(f.point);
    let names: Vec<_> = features.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["pos", "srsName", "radius", "members"]);
    assert_eq!(features[POS].kind, FeatureKind::Containment);
    assert!(features[RADIUS].unsettable);
    assert_eq!(features[RADIUS].default, Value::Double(0.0));
}

#[test]
fn test_subclass_inherits_feature_indices() {
    let mut b = Package::builder("t", "urn:t");
    let mut gml = b.class("AbstractGMLType").abstract_class();
    gml.feature(FeatureSpec::attribute("id", ValueType::String));
    let gml = gml.finish();
    let mut geometry = b.subclass("AbstractGeometryType", gml).abstract_class();
    geometry.feature(FeatureSpec::attribute("srsName", ValueType::String));
    let geometry = geometry.finish();
    let mut point = b.subclass("PointType", geometry);
    point.feature(FeatureSpec::attribute("label", ValueType::String));
    let point = point.finish();
    let package = Arc::new(b.build().unwrap());

    assert_eq!(package.describe(point).len(), 3);
    assert!(package.is_subclass_of(point, gml));
    assert!(!package.is_subclass_of(gml, point));
    let chain: Vec<_> = package.superclasses(point).map(|c| c.name.as_str()).collect();
    assert_eq!(chain, vec!["PointType", "AbstractGeometryType", "AbstractGMLType"]);

    let mut graph = ModelGraph::new(package.clone());
    assert!(matches!(graph.try_create(geometry), Err(ModelError::AbstractClass { .. })));
    let node = graph.create(point);
    graph.set_by_name(node, "id", "p1").unwrap();
    graph.set_by_name(node, "label", "here").unwrap();
    assert_eq!(graph.get(node, 0), Value::from("p1"));
    assert_eq!(graph.get_by_name(node, "label").unwrap(), Value::from("here"));
}

#[test]
fn test_duplicate_declarations_rejected() {
    let mut b = Package::builder("t", "urn:t");
    let mut c = b.class("Thing");
    c.feature(FeatureSpec::attribute("name", ValueType::String));
    c.feature(FeatureSpec::attribute("name", ValueType::Int));
    c.finish();
    assert!(matches!(b.build(), Err(ModelError::Duplicate { what: "feature", .. })));

    let mut b = Package::builder("t", "urn:t");
    b.class("Thing").finish();
    b.class("Thing").finish();
    assert!(matches!(b.build(), Err(ModelError::Duplicate { what: "class", .. })));
}

#[test]
fn test_reflective_errors() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let point = graph.create(f.point);
    let path = graph.create(f.path);

    assert!(matches!(graph.try_get(point, 42), Err(ModelError::InvalidFeatureIndex { .. })));
    assert!(matches!(graph.get_by_name(point, "nope"), Err(ModelError::UnknownFeature { .. })));
    assert!(matches!(
        graph.try_set(point, RADIUS, Value::from("wide")),
        Err(ModelError::TypeMismatch { .. })
    ));
    // Wrong class for a containment
    assert!(matches!(
        graph.try_set(point, POS, Value::Node(path)),
        Err(ModelError::TypeMismatch { .. })
    ));
    assert!(matches!(graph.try_list(point, RADIUS), Err(ModelError::KindMismatch { .. })));
    assert!(matches!(graph.try_create_by_name("Nope"), Err(ModelError::UnknownClass { .. })));
    assert!(!graph.is_set(point, RADIUS));
}

#[test]
#[should_panic(expected = "object model contract violation")]
fn test_contract_violation_panics() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let point = graph.create(f.point);
    graph.set(point, RADIUS, "wide");
}

#[test]
fn test_list_snapshot_is_detached_from_storage() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let point = graph.create(f.point);
    let child = graph.create(f.point);

    let before = graph.get(point, MEMBERS);
    graph.list(point, MEMBERS).push(child);
    assert_eq!(before, Value::List(vec![]));
    assert_eq!(graph.get(point, MEMBERS), Value::List(vec![Value::Node(child)]));

    graph.set(point, MEMBERS, Value::Null);
    assert_eq!(graph.container(child), None);
}

#[test]
fn test_literals_and_validation() {
    let f = fixture();
    let package = f.package.clone();
    assert_eq!(
        package.create_from_string(ValueType::DoubleList, "1 2.5").unwrap(),
        Value::DoubleList(vec![1.0, 2.5])
    );
    assert!(package.create_from_string(ValueType::Double, "wide").is_err());

    let mut b = Package::builder("t", "urn:t");
    let mut code = b.class("CodeType");
    code.feature(FeatureSpec::attribute("codeSpace", ValueType::String).required());
    let code = code.finish();
    let mut graph = ModelGraph::new(Arc::new(b.build().unwrap()));
    let node = graph.create(code);

    let diagnostics = graph.validate(node);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].check, Check::Required);
    graph.set(node, 0, "urn:codes");
    assert!(graph.validate(node).is_empty());
    assert_eq!(graph.display(node).to_string(), format!("CodeType{} (codeSpace: urn:codes)", node));
}
