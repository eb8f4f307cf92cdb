//! Integration tests for the GML 3.1.1 package
//!
//! Tests cover:
//! - Typed handles over containment (points, positions, envelopes)
//! - Unsettable attributes with schema defaults (circle, coord, xlink)
//! - Choice groups (line string control points, location)
//! - Validation of a built tree

use gml311::prelude::*;
use gml311::schema;
use xsd_model::{Check, EventKind, Recorder, Value};

#[test]
fn test_point_position_ownership() {
    let mut graph = schema().graph();
    let a = Point::create(&mut graph);
    let b = Point::create(&mut graph);
    let pos = DirectPosition::create(&mut graph);
    pos.set_value(&mut graph, vec![4.5, 52.1]);

    a.set_pos(&mut graph, Some(pos));
    assert_eq!(a.pos(&graph), Some(pos));
    assert_eq!(graph.container(pos.node()), Some(a.node()));

    b.set_pos(&mut graph, Some(pos));
    assert_eq!(a.pos(&graph), None);
    assert_eq!(b.pos(&graph), Some(pos));
    assert_eq!(pos.value(&graph), vec![4.5, 52.1]);
}

#[test]
fn test_geometry_attributes() {
    let mut graph = schema().graph();
    let point = Point::create(&mut graph);
    point.set_id(&mut graph, Some("p1"));
    point.add_name(&mut graph, "Amsterdam");
    point.add_name(&mut graph, "Mokum");
    point.set_srs_name(&mut graph, Some("EPSG:4326"));
    point.set_srs_dimension(&mut graph, Some(2));

    assert_eq!(point.id(&graph).as_deref(), Some("p1"));
    assert_eq!(point.names(&graph), vec!["Amsterdam", "Mokum"]);
    assert_eq!(point.srs_name(&graph).as_deref(), Some("EPSG:4326"));
    assert_eq!(point.srs_dimension(&graph), Some(2));
    assert_eq!(point.gid(&graph), None);

    let any = point.as_any();
    assert_eq!(any.srs_name(&graph).as_deref(), Some("EPSG:4326"));
    assert_eq!(Point::cast(&graph, any.node()), Some(point));
    assert_eq!(LineString::cast(&graph, any.node()), None);
}

#[test]
fn test_circle_defaults() {
    let mut graph = schema().graph();
    let circle = CircleByCenterPoint::create(&mut graph);

    assert!(!circle.is_set_num_arc(&graph));
    assert_eq!(circle.num_arc(&graph), 1);
    assert!(!circle.is_set_interpolation(&graph));
    assert_eq!(
        circle.interpolation(&graph),
        CurveInterpolationType::CircularArcCenterPointWithRadius
    );

    circle.set_num_arc(&mut graph, 1);
    assert!(circle.is_set_num_arc(&graph));
    circle.set_num_arc(&mut graph, 3);
    assert_eq!(circle.num_arc(&graph), 3);
    circle.unset_num_arc(&mut graph);
    assert!(!circle.is_set_num_arc(&graph));
    assert_eq!(circle.num_arc(&graph), 1);

    let radius = Measure::with_value(&mut graph, 5.0, "m");
    circle.set_radius(&mut graph, Some(radius));
    assert_eq!(circle.radius(&graph).map(|r| r.value(&graph)), Some(5.0));
    assert!(radius.is_set_value(&graph));
}

#[test]
fn test_circle_center_choice() {
    let mut graph = schema().graph();
    let circle = CircleByCenterPoint::create(&mut graph);
    let pos = DirectPosition::create(&mut graph);
    let property = PointProperty::create(&mut graph);

    assert_eq!(circle.center(&graph), None);
    circle.set_center(&mut graph, Some(Center::Pos(pos)));
    assert_eq!(circle.center(&graph), Some(Center::Pos(pos)));
    assert_eq!(circle.pos(&graph), Some(pos));

    circle.set_center(&mut graph, Some(Center::PointProperty(property)));
    assert_eq!(circle.center(&graph), Some(Center::PointProperty(property)));
    assert_eq!(circle.pos(&graph), None);
    assert_eq!(graph.container(pos.node()), None);
}

#[test]
fn test_circle_center_replacement_events() {
    use gml311::types::circle::{POINT_PROPERTY, POS};

    let mut graph = schema().graph();
    let circle = CircleByCenterPoint::create(&mut graph);
    let (p1, p2) = (DirectPosition::create(&mut graph), DirectPosition::create(&mut graph));
    circle.set_center(&mut graph, Some(Center::Pos(p1)));

    let recorder = Recorder::new();
    graph.observe(circle.node(), recorder.clone());

    // Same center: touched, not detached
    circle.set_center(&mut graph, Some(Center::Pos(p1)));
    let events = recorder.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Set);
    assert_eq!(events[0].old_value, events[0].new_value);
    assert_eq!(graph.container(p1.node()), Some(circle.node()));

    circle.set_center(&mut graph, Some(Center::Pos(p2)));
    let events = recorder.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Set);
    assert_eq!(events[0].feature, POS);
    assert_eq!(events[0].old_value, Value::Node(p1.node()));
    assert_eq!(events[0].new_value, Value::Node(p2.node()));
    assert_eq!(graph.container(p1.node()), None);

    let property = PointProperty::create(&mut graph);
    circle.set_center(&mut graph, Some(Center::PointProperty(property)));
    let events = recorder.take();
    assert_eq!(events.len(), 2);
    assert_eq!((events[0].kind, events[0].feature), (EventKind::Set, POS));
    assert_eq!(events[0].new_value, Value::Null);
    assert_eq!(events[1].feature, POINT_PROPERTY);
    assert_eq!(events[1].new_value, Value::Node(property.node()));
    assert_eq!(circle.center(&graph), Some(Center::PointProperty(property)));
}

#[test]
fn test_coord_ordinates() {
    let mut graph = schema().graph();
    let coord = Coord::create(&mut graph);
    coord.set_x(&mut graph, 1.0);
    coord.set_y(&mut graph, 0.0);
    assert_eq!(coord.ordinates(&graph), vec![1.0, 0.0]);
    assert!(!coord.is_set_z(&graph));
    assert_eq!(coord.z(&graph), 0.0);

    coord.set_z(&mut graph, 0.0);
    assert_eq!(coord.ordinates(&graph), vec![1.0, 0.0, 0.0]);
    coord.unset_z(&mut graph);
    assert_eq!(coord.ordinates(&graph).len(), 2);
}

#[test]
fn test_line_string_control_points_keep_order() {
    let mut graph = schema().graph();
    let line = LineString::create(&mut graph);
    let p1 = DirectPosition::create(&mut graph);
    let c1 = Coord::create(&mut graph);
    let p2 = DirectPosition::create(&mut graph);

    line.push(&mut graph, ControlPoint::Pos(p1));
    line.push(&mut graph, ControlPoint::Coord(c1));
    line.push(&mut graph, ControlPoint::Pos(p2));

    assert_eq!(
        line.control_points(&graph),
        vec![ControlPoint::Pos(p1), ControlPoint::Coord(c1), ControlPoint::Pos(p2)]
    );
    assert_eq!(line.pos(&graph), vec![p1, p2]);
    assert_eq!(line.coords(&graph), vec![c1]);
    assert!(line.point_properties(&graph).is_empty());

    line.clear(&mut graph);
    assert!(line.control_points(&graph).is_empty());
    assert_eq!(graph.container(p1.node()), None);
}

#[test]
fn test_line_string_bulk_positions() {
    let mut graph = schema().graph();
    let line = LineString::create(&mut graph);
    let positions: Vec<_> = (0..4).map(|_| DirectPosition::create(&mut graph)).collect();
    let recorder = Recorder::new();
    graph.observe(line.node(), recorder.clone());

    assert_eq!(line.extend_pos(&mut graph, &positions), 4);
    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::AddMany);
}

#[test]
fn test_multi_point_members() {
    let mut graph = schema().graph();
    let multi = MultiPoint::create(&mut graph);
    let members: Vec<_> = (0..3).map(|_| PointProperty::create(&mut graph)).collect();
    assert_eq!(multi.add_point_members(&mut graph, &members), 3);
    assert_eq!(multi.point_members(&graph), members);

    assert!(multi.remove_point_member(&mut graph, members[1]));
    assert_eq!(multi.point_members(&graph), vec![members[0], members[2]]);
    assert_eq!(graph.container(members[1].node()), None);
}

#[test]
fn test_xlink_defaults() {
    let mut graph = schema().graph();
    let property = PointProperty::create(&mut graph);

    assert_eq!(property.actuate(&graph), ActuateType::OnLoad);
    assert_eq!(property.show(&graph), ShowType::New);
    assert_eq!(property.link_type(&graph), TypeType::Simple);
    assert!(!property.is_set_show(&graph));
    assert!(!property.is_remote(&graph));

    property.set_show(&mut graph, ShowType::Embed);
    property.set_href(&mut graph, Some("http://example.com/points.gml#p1"));
    assert!(property.is_set_show(&graph));
    assert_eq!(property.show(&graph), ShowType::Embed);
    assert!(property.is_remote(&graph));

    property.unset_show(&mut graph);
    assert!(!property.is_set_show(&graph));
    assert_eq!(property.show(&graph), ShowType::New);
}

#[test]
fn test_location_replaces_geometry() {
    let mut graph = schema().graph();
    let location = LocationProperty::create(&mut graph);
    let first = Point::create(&mut graph);
    let second = LineString::create(&mut graph);

    location.set_geometry(&mut graph, Some(first));
    location.set_location_string(&mut graph, Some("near the harbour"));
    location.set_geometry(&mut graph, Some(second));

    assert_eq!(location.geometry(&graph), Some(second.as_any()));
    assert_eq!(graph.container(first.node()), None);
    assert_eq!(graph.container(second.node()), Some(location.node()));
    assert_eq!(location.location_string(&graph).as_deref(), Some("near the harbour"));
    assert_eq!(graph.feature_map(location.node(), 0).len(), 2);
}

#[test]
fn test_envelope_corners() {
    let mut graph = schema().graph();
    let envelope = Envelope::from_corners(&mut graph, vec![0.0, 0.0], vec![10.0, 20.0]);
    envelope.set_srs_name(&mut graph, Some("EPSG:28992"));

    let lower = envelope.lower_corner(&graph).unwrap();
    let upper = envelope.upper_corner(&graph).unwrap();
    assert_eq!(lower.value(&graph), vec![0.0, 0.0]);
    assert_eq!(upper.value(&graph), vec![10.0, 20.0]);
    assert_eq!(lower.srs_name(&graph), None);
    assert_eq!(envelope.srs_name(&graph).as_deref(), Some("EPSG:28992"));
    assert_eq!(graph.all_contents(envelope.node()), vec![lower.node(), upper.node()]);
}

#[test]
fn test_validate_missing_uom() {
    let mut graph = schema().graph();
    let circle = CircleByCenterPoint::create(&mut graph);
    let radius = Measure::create(&mut graph);
    radius.set_value(&mut graph, 2.0);
    circle.set_radius(&mut graph, Some(radius));

    let diagnostics = graph.validate(circle.node());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].node, radius.node());
    assert_eq!(diagnostics[0].check, Check::Required);

    radius.set_uom(&mut graph, Some("m"));
    assert!(graph.validate(circle.node()).is_empty());
}

#[test]
fn test_literal_conversion() {
    let package = &schema().package;
    let show = package.enum_by_name("ShowType").unwrap();
    let value = package
        .create_from_string(xsd_model::ValueType::Enum(show.id), "replace")
        .unwrap();
    assert_eq!(ShowType::from_value(&value), Some(ShowType::Replace));
    assert_eq!(package.convert_to_string(&ShowType::Other.to_value()).as_deref(), Some("other"));
    assert_eq!(Value::Null.as_enum(), None);
}
