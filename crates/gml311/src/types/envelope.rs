//! `EnvelopeType`

use xsd_model::{ModelGraph, Value};

use super::coord::Coord;
use super::geometry::SrsReference;
use super::position::DirectPosition;
use super::{child, children, set_child, GmlClass, GmlNode};

pub const LOWER_CORNER: usize = 0;
pub const UPPER_CORNER: usize = 1;
pub const COORD: usize = 2;
pub const SRS_NAME: usize = 3;
pub const SRS_DIMENSION: usize = 4;

gml_type! {
    /// `gml:Envelope`, a bounding box given by two corners
    Envelope => envelope
}

impl SrsReference for Envelope {
    const SRS_NAME: usize = SRS_NAME;
    const SRS_DIMENSION: usize = SRS_DIMENSION;
}

impl Envelope {
    /// Create an envelope with both corners set
    pub fn from_corners(graph: &mut ModelGraph, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        let envelope = Self::create(graph);
        let lower_corner = DirectPosition::create(graph);
        lower_corner.set_value(graph, lower);
        let upper_corner = DirectPosition::create(graph);
        upper_corner.set_value(graph, upper);
        envelope.set_lower_corner(graph, Some(lower_corner));
        envelope.set_upper_corner(graph, Some(upper_corner));
        envelope
    }

    pub fn lower_corner(self, graph: &ModelGraph) -> Option<DirectPosition> {
        child(graph, self.0, LOWER_CORNER)
    }

    pub fn set_lower_corner(self, graph: &mut ModelGraph, corner: Option<DirectPosition>) {
        set_child(graph, self.0, LOWER_CORNER, corner);
    }

    pub fn upper_corner(self, graph: &ModelGraph) -> Option<DirectPosition> {
        child(graph, self.0, UPPER_CORNER)
    }

    pub fn set_upper_corner(self, graph: &mut ModelGraph, corner: Option<DirectPosition>) {
        set_child(graph, self.0, UPPER_CORNER, corner);
    }

    /// Corners given as `gml:coord` (the deprecated encoding)
    pub fn coords(self, graph: &ModelGraph) -> Vec<Coord> {
        children(graph, self.0, COORD)
    }

    pub fn add_coord(self, graph: &mut ModelGraph, coord: Coord) {
        graph.list(self.0, COORD).push(Value::Node(coord.node()));
    }
}
