//! `CodeType`

use xsd_model::ModelGraph;

use super::{set_string, string, GmlNode};

pub const VALUE: usize = 0;
pub const CODE_SPACE: usize = 1;

gml_type! {
    /// A term from a dictionary, optionally qualified by its code space
    Code => code
}

impl Code {
    pub fn value(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), VALUE)
    }

    pub fn set_value(self, graph: &mut ModelGraph, value: Option<&str>) {
        set_string(graph, self.node(), VALUE, value);
    }

    pub fn code_space(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), CODE_SPACE)
    }

    pub fn set_code_space(self, graph: &mut ModelGraph, code_space: Option<&str>) {
        set_string(graph, self.node(), CODE_SPACE, code_space);
    }
}
