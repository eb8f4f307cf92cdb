//! Integration tests for containment and ownership
//!
//! Tests cover:
//! - Exclusive ownership when a child is re-attached elsewhere
//! - Same-value assignment keeping ownership untouched
//! - Replacing a contained child
//! - Moves between lists and single-valued features
//! - Cycle rejection and subtree deletion

mod common;

use common::*;
use xsd_model::{EventKind, ModelError, ModelGraph, Recorder, Value};

#[test]
fn test_reattach_detaches_from_previous_owner() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let a = graph.create(f.point);
    let b = graph.create(f.point);
    let v = graph.create(f.position);

    graph.set(a, POS, v);
    assert_eq!(graph.container(v), Some(a));

    graph.set(b, POS, v);
    assert_eq!(graph.get(a, POS), Value::Null);
    assert_eq!(graph.get(b, POS), Value::Node(v));
    assert_eq!(graph.container(v), Some(b));
    assert_eq!(graph.containing_feature(v), Some(POS));
}

#[test]
fn test_reattach_notifies_both_owners_in_order() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let a = graph.create(f.point);
    let b = graph.create(f.point);
    let v = graph.create(f.position);
    graph.set(a, POS, v);

    let recorder = Recorder::new();
    graph.observe(a, recorder.clone());
    graph.observe(b, recorder.clone());
    graph.set(b, POS, v);

    let events = recorder.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].notifier, a);
    assert_eq!(events[0].kind, EventKind::Set);
    assert_eq!(events[0].old_value, Value::Node(v));
    assert_eq!(events[0].new_value, Value::Null);
    assert_eq!(events[1].notifier, b);
    assert_eq!(events[1].new_value, Value::Node(v));
}

#[test]
fn test_same_value_set_keeps_owner_and_notifies_once() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let a = graph.create(f.point);
    let v = graph.create(f.position);
    graph.set(a, POS, v);

    let recorder = Recorder::new();
    graph.observe(a, recorder.clone());
    graph.set(a, POS, v);

    assert_eq!(graph.container(v), Some(a));
    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Set);
    assert!(events[0].is_touch());
}

#[test]
fn test_replace_contained_child() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let point = graph.create(f.point);
    let p1 = graph.create(f.position);
    let p2 = graph.create(f.position);

    graph.set(point, POS, p1);
    assert_eq!(graph.get(point, POS), Value::Node(p1));
    assert_eq!(graph.container(p1), Some(point));

    graph.set(point, POS, p2);
    assert_eq!(graph.get(point, POS), Value::Node(p2));
    assert_eq!(graph.container(p1), None);
    assert_eq!(graph.container(p2), Some(point));

    // The attribute next to the containment is independent of it
    graph.set(point, SRS_NAME, "EPSG:4326");
    assert_eq!(graph.get(point, SRS_NAME), Value::from("EPSG:4326"));
    assert_eq!(graph.contents(point), vec![p2]);
}

#[test]
fn test_move_from_list_to_list() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let a = graph.create(f.point);
    let b = graph.create(f.point);
    let children: Vec<_> = (0..3).map(|_| graph.create(f.point)).collect();
    graph.list(a, MEMBERS).extend(children.iter().copied());

    let recorder = Recorder::new();
    graph.observe(a, recorder.clone());
    graph.list(b, MEMBERS).push(children[1]);

    assert_eq!(graph.list(a, MEMBERS).nodes(), vec![children[0], children[2]]);
    assert_eq!(graph.list(b, MEMBERS).nodes(), vec![children[1]]);
    assert_eq!(graph.container(children[1]), Some(b));

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Remove);
    assert_eq!(events[0].position, Some(1));
}

#[test]
fn test_cycle_rejected() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let root = graph.create(f.point);
    let child = graph.create(f.point);
    graph.list(root, MEMBERS).push(child);

    let err = graph
        .list(child, MEMBERS)
        .try_push(Value::Node(root))
        .unwrap_err();
    assert!(matches!(err, ModelError::ContainmentCycle { .. }));
    assert_eq!(graph.container(root), None);
    assert!(graph.list(child, MEMBERS).is_empty());

    let err = graph.list(root, MEMBERS).try_push(Value::Node(root)).unwrap_err();
    assert!(matches!(err, ModelError::ContainmentCycle { .. }));
}

#[test]
fn test_navigation() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let root = graph.create(f.point);
    let mid = graph.create(f.point);
    let leaf = graph.create(f.position);
    graph.list(root, MEMBERS).push(mid);
    graph.set(mid, POS, leaf);

    assert_eq!(graph.ancestors(leaf).collect::<Vec<_>>(), vec![mid, root]);
    assert_eq!(graph.root_of(leaf), root);
    assert_eq!(graph.root_of(root), root);
    assert!(graph.is_ancestor(root, leaf));
    assert!(!graph.is_ancestor(leaf, root));
    assert_eq!(graph.all_contents(root), vec![mid, leaf]);
}

#[test]
fn test_delete_frees_subtree_and_detaches() {
    let f = fixture();
    let mut graph = ModelGraph::new(f.package.clone());
    let root = graph.create(f.point);
    let mid = graph.create(f.point);
    let leaf = graph.create(f.position);
    graph.list(root, MEMBERS).push(mid);
    graph.set(mid, POS, leaf);
    assert_eq!(graph.len(), 3);

    let recorder = Recorder::new();
    graph.observe(root, recorder.clone());
    assert_eq!(graph.delete(mid), 2);

    assert_eq!(graph.len(), 1);
    assert!(!graph.contains(mid));
    assert!(!graph.contains(leaf));
    assert!(graph.list(root, MEMBERS).is_empty());
    assert_eq!(recorder.events()[0].kind, EventKind::Remove);

    // Stale handles are rejected, and a recycled slot does not revive them
    let fresh = graph.create(f.position);
    assert!(!graph.contains(leaf));
    assert!(graph.contains(fresh));
    assert!(matches!(graph.try_get(leaf, 0), Err(ModelError::StaleNode { .. })));
}
