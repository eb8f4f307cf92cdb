//! `DirectPositionType`

use xsd_model::{ModelGraph, Value};

use super::geometry::SrsReference;
use super::GmlNode;

pub const VALUE: usize = 0;
pub const SRS_NAME: usize = 1;
pub const SRS_DIMENSION: usize = 2;

gml_type! {
    /// A coordinate tuple, `gml:pos`
    DirectPosition => direct_position
}

impl SrsReference for DirectPosition {
    const SRS_NAME: usize = SRS_NAME;
    const SRS_DIMENSION: usize = SRS_DIMENSION;
}

impl DirectPosition {
    /// Coordinates; empty when unset
    pub fn value(self, graph: &ModelGraph) -> Vec<f64> {
        graph
            .get(self.node(), VALUE)
            .as_double_list()
            .map(<[f64]>::to_vec)
            .unwrap_or_default()
    }

    pub fn set_value(self, graph: &mut ModelGraph, coordinates: Vec<f64>) {
        graph.set(self.node(), VALUE, Value::DoubleList(coordinates));
    }
}
