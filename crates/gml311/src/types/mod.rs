//! Typed node handles
//!
//! Each schema class gets a `Copy` handle wrapping a [`NodeId`], with named
//! accessors that go through the reflective graph API at the class's fixed
//! feature indices. Handles do not borrow the graph; every accessor takes
//! it explicitly. The graph must be built on [`schema()`](crate::schema).

use xsd_model::{ClassId, ModelGraph, NodeId, Value};

use crate::schema::{schema, Classes};

/// A typed handle to a node of one GML class (or its subclasses)
pub trait GmlNode: Copy {
    /// Class the handle stands for
    fn class(classes: &Classes) -> ClassId;

    /// Wrap a node without checking its class
    fn wrap(node: NodeId) -> Self;

    /// Underlying node
    fn node(self) -> NodeId;

    /// Typed handle for `node`, if its class conforms
    fn cast(graph: &ModelGraph, node: NodeId) -> Option<Self> {
        let class = graph.try_class_of(node).ok()?;
        graph
            .package()
            .is_subclass_of(class, Self::class(&schema().classes))
            .then(|| Self::wrap(node))
    }
}

/// A handle for a concrete class
pub trait GmlClass: GmlNode {
    /// Create a node of this class in `graph`
    fn create(graph: &mut ModelGraph) -> Self {
        Self::wrap(graph.create(Self::class(&schema().classes)))
    }
}

macro_rules! gml_type {
    ($(#[$meta:meta])* $name:ident => $class:ident) => {
        gml_type!(@handle $(#[$meta])* $name => $class);
        impl crate::types::GmlClass for $name {}
    };
    (@abstract $(#[$meta:meta])* $name:ident => $class:ident) => {
        gml_type!(@handle $(#[$meta])* $name => $class);
    };
    (@handle $(#[$meta:meta])* $name:ident => $class:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(xsd_model::NodeId);

        impl crate::types::GmlNode for $name {
            fn class(classes: &crate::schema::Classes) -> xsd_model::ClassId {
                classes.$class
            }

            fn wrap(node: xsd_model::NodeId) -> Self {
                Self(node)
            }

            fn node(self) -> xsd_model::NodeId {
                self.0
            }
        }
    };
}

pub mod circle;
pub mod code;
pub mod coord;
pub mod envelope;
pub mod geometry;
pub mod line_string;
pub mod location;
pub mod measure;
pub mod point;
pub mod position;
pub mod xlink;

pub(crate) fn string(graph: &ModelGraph, node: NodeId, feature: usize) -> Option<String> {
    graph.get(node, feature).as_str().map(str::to_string)
}

pub(crate) fn set_string(
    graph: &mut ModelGraph,
    node: NodeId,
    feature: usize,
    value: Option<&str>,
) {
    graph.set(node, feature, value.map_or(Value::Null, Value::from));
}

pub(crate) fn double(graph: &ModelGraph, node: NodeId, feature: usize) -> f64 {
    graph.get(node, feature).as_double().unwrap_or_default()
}

pub(crate) fn int(graph: &ModelGraph, node: NodeId, feature: usize) -> Option<i64> {
    graph.get(node, feature).as_int()
}

pub(crate) fn set_int(graph: &mut ModelGraph, node: NodeId, feature: usize, value: Option<i64>) {
    graph.set(node, feature, value.map_or(Value::Null, Value::Int));
}

pub(crate) fn child<T: GmlNode>(graph: &ModelGraph, node: NodeId, feature: usize) -> Option<T> {
    graph.get(node, feature).as_node().map(T::wrap)
}

pub(crate) fn set_child<T: GmlNode>(
    graph: &mut ModelGraph,
    node: NodeId,
    feature: usize,
    value: Option<T>,
) {
    graph.set(node, feature, value.map_or(Value::Null, |v| Value::Node(v.node())));
}

pub(crate) fn children<T: GmlNode>(graph: &ModelGraph, node: NodeId, feature: usize) -> Vec<T> {
    match graph.get(node, feature) {
        Value::List(items) => items.iter().filter_map(Value::as_node).map(T::wrap).collect(),
        _ => Vec::new(),
    }
}
