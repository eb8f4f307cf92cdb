//! `LocationPropertyType`
//!
//! A location is given either as a geometry, as a keyword from a code
//! list, or as free text; the choice group holds at most one of each.

use xsd_model::{ModelGraph, Value};

use super::code::Code;
use super::geometry::{AnyGeometry, Geometry};
use super::xlink::SimpleLink;
use super::{child, string, GmlNode};

pub const GROUP: usize = 0;
pub const GEOMETRY: usize = 1;
pub const LOCATION_KEY_WORD: usize = 2;
pub const LOCATION_STRING: usize = 3;
pub const XLINK: usize = 4;

gml_type! {
    /// `gml:location`
    LocationProperty => location_property
}

impl SimpleLink for LocationProperty {
    const XLINK: usize = XLINK;
}

impl LocationProperty {
    /// The location geometry, of any concrete geometry class
    pub fn geometry(self, graph: &ModelGraph) -> Option<AnyGeometry> {
        child(graph, self.0, GEOMETRY)
    }

    /// Set the geometry. A second geometry replaces the first.
    pub fn set_geometry<G: Geometry>(self, graph: &mut ModelGraph, geometry: Option<G>) {
        let value = geometry.map_or(Value::Null, |g| Value::Node(g.node()));
        graph.set(self.0, GEOMETRY, value);
    }

    pub fn location_key_word(self, graph: &ModelGraph) -> Option<Code> {
        child(graph, self.0, LOCATION_KEY_WORD)
    }

    pub fn set_location_key_word(self, graph: &mut ModelGraph, key_word: Option<Code>) {
        let value = key_word.map_or(Value::Null, |c| Value::Node(c.node()));
        graph.set(self.0, LOCATION_KEY_WORD, value);
    }

    pub fn location_string(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.0, LOCATION_STRING)
    }

    pub fn set_location_string(self, graph: &mut ModelGraph, text: Option<&str>) {
        graph.set(self.0, LOCATION_STRING, text.map_or(Value::Null, Value::from));
    }
}
