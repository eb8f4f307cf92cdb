//! Integration tests for unsettable features and default values

mod common;

use common::*;
use xsd_model::{EventKind, ModelGraph, Recorder, Value};

#[test]
fn test_radius_lifecycle() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let circle = graph.create(f.point);

    assert!(!graph.is_set(circle, RADIUS));
    assert_eq!(graph.get(circle, RADIUS), Value::Double(0.0));

    graph.set(circle, RADIUS, 5.0);
    assert!(graph.is_set(circle, RADIUS));
    assert_eq!(graph.get(circle, RADIUS), Value::Double(5.0));

    graph.unset(circle, RADIUS);
    assert!(!graph.is_set(circle, RADIUS));
    assert_eq!(graph.get(circle, RADIUS), Value::Double(0.0));
}

#[test]
fn test_set_to_default_still_counts_as_set() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let circle = graph.create(f.point);

    graph.set(circle, RADIUS, 0.0);
    assert!(graph.is_set(circle, RADIUS));
    assert_eq!(graph.get(circle, RADIUS), Value::Double(0.0));

    graph.unset(circle, RADIUS);
    assert!(!graph.is_set(circle, RADIUS));
}

#[test]
fn test_set_and_unset_notifications() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let circle = graph.create(f.point);
    let recorder = Recorder::new();
    graph.observe(circle, recorder.clone());

    graph.set(circle, RADIUS, 2.0);
    graph.set(circle, RADIUS, 3.0);
    graph.unset(circle, RADIUS);
    graph.unset(circle, RADIUS);

    let events = recorder.take();
    let kinds: Vec<_> = events.iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![EventKind::Set, EventKind::Set, EventKind::Unset, EventKind::Unset]);

    // Only transitions of the set-state are flagged
    assert!(events[0].set_state_changed);
    assert!(!events[1].set_state_changed);
    assert!(events[2].set_state_changed);
    assert_eq!(events[2].old_value, Value::Double(3.0));
    assert_eq!(events[2].new_value, Value::Double(0.0));
    assert!(!events[3].set_state_changed);
}

#[test]
fn test_plain_attribute_is_set_tracks_default() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let point = graph.create(f.point);

    assert!(!graph.is_set(point, SRS_NAME));
    graph.set(point, SRS_NAME, "EPSG:4326");
    assert!(graph.is_set(point, SRS_NAME));
    graph.unset(point, SRS_NAME);
    assert!(!graph.is_set(point, SRS_NAME));
    assert_eq!(graph.get(point, SRS_NAME), Value::Null);
}

#[test]
fn test_unset_containment_releases_child() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let point = graph.create(f.point);
    let pos = graph.create(f.position);
    graph.set(point, POS, pos);
    assert!(graph.is_set(point, POS));

    graph.unset(point, POS);
    assert!(!graph.is_set(point, POS));
    assert_eq!(graph.container(pos), None);
    assert!(graph.contains(pos));
}

#[test]
fn test_unset_list_clears() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let point = graph.create(f.point);
    let a = graph.create(f.point);
    let b = graph.create(f.point);
    graph.list(point, MEMBERS).extend([a, b]);
    assert!(graph.is_set(point, MEMBERS));

    graph.unset(point, MEMBERS);
    assert!(!graph.is_set(point, MEMBERS));
    assert_eq!(graph.get(point, MEMBERS), Value::List(vec![]));
    assert_eq!(graph.container(a), None);
}
