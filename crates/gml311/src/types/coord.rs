//! `CoordType`
//!
//! The three ordinates are unsettable: a 2D coordinate leaves `z` unset,
//! which is not the same as `z = 0`.

use xsd_model::ModelGraph;

use super::{double, GmlNode};

pub const X: usize = 0;
pub const Y: usize = 1;
pub const Z: usize = 2;

gml_type! {
    /// `gml:coord`
    Coord => coord
}

impl Coord {
    pub fn x(self, graph: &ModelGraph) -> f64 {
        double(graph, self.node(), X)
    }

    pub fn set_x(self, graph: &mut ModelGraph, x: f64) {
        graph.set(self.node(), X, x);
    }

    pub fn is_set_x(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.node(), X)
    }

    pub fn unset_x(self, graph: &mut ModelGraph) {
        graph.unset(self.node(), X);
    }

    pub fn y(self, graph: &ModelGraph) -> f64 {
        double(graph, self.node(), Y)
    }

    pub fn set_y(self, graph: &mut ModelGraph, y: f64) {
        graph.set(self.node(), Y, y);
    }

    pub fn is_set_y(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.node(), Y)
    }

    pub fn unset_y(self, graph: &mut ModelGraph) {
        graph.unset(self.node(), Y);
    }

    pub fn z(self, graph: &ModelGraph) -> f64 {
        double(graph, self.node(), Z)
    }

    pub fn set_z(self, graph: &mut ModelGraph, z: f64) {
        graph.set(self.node(), Z, z);
    }

    pub fn is_set_z(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.node(), Z)
    }

    pub fn unset_z(self, graph: &mut ModelGraph) {
        graph.unset(self.node(), Z);
    }

    /// Ordinates that are set, in x, y, z order
    pub fn ordinates(self, graph: &ModelGraph) -> Vec<f64> {
        [X, Y, Z]
            .into_iter()
            .take_while(|&f| graph.is_set(self.node(), f))
            .map(|f| double(graph, self.node(), f))
            .collect()
    }
}
