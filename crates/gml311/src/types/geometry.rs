//! `AbstractGMLType` and `AbstractGeometryType`
//!
//! The shared attributes of the abstract base classes are exposed as
//! capability traits with default methods, so every concrete type gets
//! them by implementing the trait instead of through a wrapper chain.

use xsd_model::{ModelGraph, Value};

use super::{int, set_int, set_string, string, GmlNode};

pub const DESCRIPTION: usize = 0;
pub const NAME: usize = 1;
pub const ID: usize = 2;
pub const GID: usize = 3;
pub const SRS_NAME: usize = 4;
pub const SRS_DIMENSION: usize = 5;

/// Attributes shared by every `AbstractGMLType`
pub trait GmlObject: GmlNode {
    /// `gml:id`
    fn id(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), ID)
    }

    fn set_id(self, graph: &mut ModelGraph, id: Option<&str>) {
        set_string(graph, self.node(), ID, id);
    }

    fn description(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), DESCRIPTION)
    }

    fn set_description(self, graph: &mut ModelGraph, description: Option<&str>) {
        set_string(graph, self.node(), DESCRIPTION, description);
    }

    /// `gml:name` values, in document order
    fn names(self, graph: &ModelGraph) -> Vec<String> {
        match graph.get(self.node(), NAME) {
            Value::List(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn add_name(self, graph: &mut ModelGraph, name: &str) {
        graph.list(self.node(), NAME).push(name);
    }
}

/// Spatial reference attributes.
///
/// Geometries carry them at the `AbstractGeometryType` indices; other
/// classes (positions, envelopes) declare their own.
pub trait SrsReference: GmlNode {
    const SRS_NAME: usize;
    const SRS_DIMENSION: usize;

    fn srs_name(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), Self::SRS_NAME)
    }

    fn set_srs_name(self, graph: &mut ModelGraph, srs_name: Option<&str>) {
        set_string(graph, self.node(), Self::SRS_NAME, srs_name);
    }

    fn srs_dimension(self, graph: &ModelGraph) -> Option<i64> {
        int(graph, self.node(), Self::SRS_DIMENSION)
    }

    fn set_srs_dimension(self, graph: &mut ModelGraph, dimension: Option<i64>) {
        set_int(graph, self.node(), Self::SRS_DIMENSION, dimension);
    }
}

/// Attributes shared by every `AbstractGeometryType`
pub trait Geometry: GmlObject + SrsReference {
    fn gid(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), GID)
    }

    fn set_gid(self, graph: &mut ModelGraph, gid: Option<&str>) {
        set_string(graph, self.node(), GID, gid);
    }

    /// Erase the concrete type
    fn as_any(self) -> AnyGeometry {
        AnyGeometry::wrap(self.node())
    }
}

macro_rules! geometry_type {
    ($name:ty) => {
        impl crate::types::geometry::GmlObject for $name {}
        impl crate::types::geometry::SrsReference for $name {
            const SRS_NAME: usize = crate::types::geometry::SRS_NAME;
            const SRS_DIMENSION: usize = crate::types::geometry::SRS_DIMENSION;
        }
        impl crate::types::geometry::Geometry for $name {}
    };
}

gml_type! {
    @abstract
    /// Any geometry, concrete class unknown
    AnyGeometry => abstract_geometry
}

geometry_type!(AnyGeometry);

pub(crate) use geometry_type;
