//! `LineStringType`
//!
//! The control points are one choice group: `gml:pos`, `gml:pointProperty`
//! and `gml:coord` elements may be mixed, and their interleaving is part of
//! the geometry.

use xsd_model::{ModelGraph, Value};

use super::coord::Coord;
use super::geometry::{self, geometry_type};
use super::point::PointProperty;
use super::position::DirectPosition;
use super::GmlNode;

pub const GROUP: usize = geometry::SRS_DIMENSION + 1;
pub const POS: usize = GROUP + 1;
pub const POINT_PROPERTY: usize = GROUP + 2;
pub const COORD: usize = GROUP + 3;

gml_type! {
    /// `gml:LineString`
    LineString => line_string
}

geometry_type!(LineString);

/// One entry of a line string's control point sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPoint {
    Pos(DirectPosition),
    PointProperty(PointProperty),
    Coord(Coord),
}

impl ControlPoint {
    fn member(self) -> (usize, Value) {
        match self {
            ControlPoint::Pos(p) => (POS, Value::Node(p.node())),
            ControlPoint::PointProperty(p) => (POINT_PROPERTY, Value::Node(p.node())),
            ControlPoint::Coord(c) => (COORD, Value::Node(c.node())),
        }
    }
}

impl LineString {
    /// Control points in document order
    pub fn control_points(self, graph: &ModelGraph) -> Vec<ControlPoint> {
        let Value::Entries(entries) = graph.get(self.0, GROUP) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| {
                let node = entry.value.as_node()?;
                match entry.feature {
                    POS => Some(ControlPoint::Pos(DirectPosition::wrap(node))),
                    POINT_PROPERTY => Some(ControlPoint::PointProperty(PointProperty::wrap(node))),
                    COORD => Some(ControlPoint::Coord(Coord::wrap(node))),
                    _ => None,
                }
            })
            .collect()
    }

    /// Append a control point
    pub fn push(self, graph: &mut ModelGraph, point: ControlPoint) {
        let (member, value) = point.member();
        graph.feature_map(self.0, GROUP).add(member, value);
    }

    /// Append several positions as one change
    pub fn extend_pos(self, graph: &mut ModelGraph, positions: &[DirectPosition]) -> usize {
        graph
            .feature_map(self.0, GROUP)
            .list(POS)
            .extend(positions.iter().map(|p| Value::Node(p.node())))
    }

    /// The `gml:pos` entries only
    pub fn pos(self, graph: &ModelGraph) -> Vec<DirectPosition> {
        super::children(graph, self.0, POS)
    }

    /// The `gml:pointProperty` entries only
    pub fn point_properties(self, graph: &ModelGraph) -> Vec<PointProperty> {
        super::children(graph, self.0, POINT_PROPERTY)
    }

    /// The `gml:coord` entries only
    pub fn coords(self, graph: &ModelGraph) -> Vec<Coord> {
        super::children(graph, self.0, COORD)
    }

    pub fn clear(self, graph: &mut ModelGraph) {
        graph.feature_map(self.0, GROUP).clear();
    }
}
