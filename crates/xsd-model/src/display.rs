//! Debug dump of a node's attribute values

use std::fmt;

use crate::factory::format_double;
use crate::graph::ModelGraph;
use crate::registry::FeatureKind;
use crate::value::{NodeId, Value};

/// `Display` adapter returned by [`ModelGraph::display`]
pub struct NodeDisplay<'g> {
    graph: &'g ModelGraph,
    node: NodeId,
}

impl ModelGraph {
    /// Human-readable dump of the node's single-valued attributes:
    /// `PointType#3 (srsName: EPSG:4326, radius: <unset>)`
    pub fn display(&self, node: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { graph: self, node }
    }
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(class) = self.graph.class_descriptor(self.node) else {
            return write!(f, "<stale {}>", self.node);
        };
        write!(f, "{}{}", class.name, self.node)?;

        if let Some(uri) = self.graph.proxy_uri(self.node) {
            return write!(f, " (proxyURI: {})", uri);
        }

        let package = self.graph.package();
        let mut first = true;
        for feature in class.features() {
            if feature.kind != FeatureKind::Attribute || feature.is_group_member() {
                continue;
            }
            f.write_str(if first { " (" } else { ", " })?;
            first = false;
            write!(f, "{}: ", feature.name)?;

            if feature.unsettable && !self.graph.is_set(self.node, feature.index) {
                f.write_str("<unset>")?;
                continue;
            }
            match self.graph.get(self.node, feature.index) {
                Value::Null => f.write_str("null")?,
                Value::Double(d) => f.write_str(&format_double(d))?,
                value => match package.convert_to_string(&value) {
                    Some(text) => f.write_str(&text)?,
                    None => write!(f, "{:?}", value)?,
                },
            }
        }
        if !first {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
