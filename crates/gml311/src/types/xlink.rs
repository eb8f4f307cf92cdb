//! The XLink simple-link attribute block
//!
//! Property types that may point at a remote object instead of embedding
//! it carry eight xlink attributes at consecutive indices. `actuate`,
//! `show` and `type` are unsettable enumerations with schema defaults.

use xsd_model::ModelGraph;

use super::{set_string, string, GmlNode};
use crate::enums::{ActuateType, ShowType, TypeType};

pub const ACTUATE: usize = 0;
pub const ARCROLE: usize = 1;
pub const HREF: usize = 2;
pub const REMOTE_SCHEMA: usize = 3;
pub const ROLE: usize = 4;
pub const SHOW: usize = 5;
pub const TITLE: usize = 6;
pub const TYPE: usize = 7;

/// XLink attributes of a property type
pub trait SimpleLink: GmlNode {
    /// Index of the first xlink attribute on the class
    const XLINK: usize;

    fn href(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), Self::XLINK + HREF)
    }

    fn set_href(self, graph: &mut ModelGraph, href: Option<&str>) {
        set_string(graph, self.node(), Self::XLINK + HREF, href);
    }

    fn role(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), Self::XLINK + ROLE)
    }

    fn set_role(self, graph: &mut ModelGraph, role: Option<&str>) {
        set_string(graph, self.node(), Self::XLINK + ROLE, role);
    }

    fn arcrole(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), Self::XLINK + ARCROLE)
    }

    fn set_arcrole(self, graph: &mut ModelGraph, arcrole: Option<&str>) {
        set_string(graph, self.node(), Self::XLINK + ARCROLE, arcrole);
    }

    fn title(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), Self::XLINK + TITLE)
    }

    fn set_title(self, graph: &mut ModelGraph, title: Option<&str>) {
        set_string(graph, self.node(), Self::XLINK + TITLE, title);
    }

    fn remote_schema(self, graph: &ModelGraph) -> Option<String> {
        string(graph, self.node(), Self::XLINK + REMOTE_SCHEMA)
    }

    fn set_remote_schema(self, graph: &mut ModelGraph, remote_schema: Option<&str>) {
        set_string(graph, self.node(), Self::XLINK + REMOTE_SCHEMA, remote_schema);
    }

    fn actuate(self, graph: &ModelGraph) -> ActuateType {
        ActuateType::from_value(&graph.get(self.node(), Self::XLINK + ACTUATE))
            .unwrap_or(ActuateType::OnLoad)
    }

    fn set_actuate(self, graph: &mut ModelGraph, actuate: ActuateType) {
        graph.set(self.node(), Self::XLINK + ACTUATE, actuate.to_value());
    }

    fn is_set_actuate(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.node(), Self::XLINK + ACTUATE)
    }

    fn unset_actuate(self, graph: &mut ModelGraph) {
        graph.unset(self.node(), Self::XLINK + ACTUATE);
    }

    fn show(self, graph: &ModelGraph) -> ShowType {
        ShowType::from_value(&graph.get(self.node(), Self::XLINK + SHOW)).unwrap_or(ShowType::New)
    }

    fn set_show(self, graph: &mut ModelGraph, show: ShowType) {
        graph.set(self.node(), Self::XLINK + SHOW, show.to_value());
    }

    fn is_set_show(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.node(), Self::XLINK + SHOW)
    }

    fn unset_show(self, graph: &mut ModelGraph) {
        graph.unset(self.node(), Self::XLINK + SHOW);
    }

    fn link_type(self, graph: &ModelGraph) -> TypeType {
        TypeType::from_value(&graph.get(self.node(), Self::XLINK + TYPE))
            .unwrap_or(TypeType::Simple)
    }

    fn set_link_type(self, graph: &mut ModelGraph, link_type: TypeType) {
        graph.set(self.node(), Self::XLINK + TYPE, link_type.to_value());
    }

    fn is_set_link_type(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.node(), Self::XLINK + TYPE)
    }

    fn unset_link_type(self, graph: &mut ModelGraph) {
        graph.unset(self.node(), Self::XLINK + TYPE);
    }

    /// Check if the property points at a remote object
    fn is_remote(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.node(), Self::XLINK + HREF)
    }
}
