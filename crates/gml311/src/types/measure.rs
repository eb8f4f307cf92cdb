//! `MeasureType`

use xsd_model::ModelGraph;

use super::{double, set_string, string, GmlNode};

pub const VALUE: usize = 0;
pub const UOM: usize = 1;

gml_type! {
    /// A value with its unit of measure
    Measure => measure
}

impl Measure {
    /// Create a measure with both value and unit set
    pub fn with_value(graph: &mut ModelGraph, value: f64, uom: &str) -> Self {
        let measure = <Self as super::GmlClass>::create(graph);
        measure.set_value(graph, value);
        measure.set_uom(graph, Some(uom));
        measure
    }

    pub fn value(self, graph: &ModelGraph) -> f64 {
        double(graph, self.node(), VALUE)
    }

    pub fn set_value(self, graph: &mut ModelGraph, value: f64) {
        graph.set(self.node(), VALUE, value);
    }

    pub fn is_set_value(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.node(), VALUE)
    }

    pub fn unset_value(self, graph: &mut ModelGraph) {
        graph.unset(self.node(), VALUE);
    }

    /// Unit of measure reference
    pub fn uom(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), UOM)
    }

    pub fn set_uom(self, graph: &mut ModelGraph, uom: Option<&str>) {
        set_string(graph, self.node(), UOM, uom);
    }
}
