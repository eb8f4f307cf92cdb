//! `PointType`, `PointPropertyType` and `MultiPointType`

use xsd_model::{ModelGraph, Value};

use super::coord::Coord;
use super::geometry::{self, geometry_type};
use super::position::DirectPosition;
use super::xlink::SimpleLink;
use super::{child, children, set_child, GmlNode};

pub const POS: usize = geometry::SRS_DIMENSION + 1;
pub const COORD: usize = POS + 1;

pub const PROPERTY_POINT: usize = 0;
pub const PROPERTY_XLINK: usize = 1;

pub const POINT_MEMBER: usize = geometry::SRS_DIMENSION + 1;

gml_type! {
    /// `gml:Point`
    Point => point
}

geometry_type!(Point);

impl Point {
    /// Position, when given as `gml:pos`
    pub fn pos(self, graph: &ModelGraph) -> Option<DirectPosition> {
        child(graph, self.0, POS)
    }

    /// Set the position; a position owned elsewhere is moved here
    pub fn set_pos(self, graph: &mut ModelGraph, pos: Option<DirectPosition>) {
        set_child(graph, self.0, POS, pos);
    }

    /// Position, when given as `gml:coord`
    pub fn coord(self, graph: &ModelGraph) -> Option<Coord> {
        child(graph, self.0, COORD)
    }

    pub fn set_coord(self, graph: &mut ModelGraph, coord: Option<Coord>) {
        set_child(graph, self.0, COORD, coord);
    }
}

gml_type! {
    /// `gml:pointProperty`: an embedded point or a link to one
    PointProperty => point_property
}

impl SimpleLink for PointProperty {
    const XLINK: usize = PROPERTY_XLINK;
}

impl PointProperty {
    pub fn point(self, graph: &ModelGraph) -> Option<Point> {
        child(graph, self.0, PROPERTY_POINT)
    }

    pub fn set_point(self, graph: &mut ModelGraph, point: Option<Point>) {
        set_child(graph, self.0, PROPERTY_POINT, point);
    }
}

gml_type! {
    /// `gml:MultiPoint`
    MultiPoint => multi_point
}

geometry_type!(MultiPoint);

impl MultiPoint {
    /// Member properties, in document order
    pub fn point_members(self, graph: &ModelGraph) -> Vec<PointProperty> {
        children(graph, self.0, POINT_MEMBER)
    }

    pub fn add_point_member(self, graph: &mut ModelGraph, member: PointProperty) {
        graph.list(self.0, POINT_MEMBER).push(member.node());
    }

    /// Append several members as one change
    pub fn add_point_members(self, graph: &mut ModelGraph, members: &[PointProperty]) -> usize {
        graph
            .list(self.0, POINT_MEMBER)
            .extend(members.iter().map(|m| Value::Node(m.node())))
    }

    pub fn remove_point_member(self, graph: &mut ModelGraph, member: PointProperty) -> bool {
        graph.list(self.0, POINT_MEMBER).remove_value(&Value::Node(member.node()))
    }
}
