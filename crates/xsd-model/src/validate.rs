//! Structural validation of a containment tree
//!
//! Checks constraints the graph does not enforce on every mutation:
//! required features, container back-links, enum literals and, under the
//! permissive group policy, singleton group members holding several
//! entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::ModelGraph;
use crate::node::Slot;
use crate::registry::{ClassDescriptor, FeatureDescriptor};
use crate::value::{NodeId, Value, ValueType};

/// Severity level for a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Suspicious but representable
    Warn,
    /// Violates the schema
    Error,
}

/// Which check produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Check {
    /// Required feature has no value
    Required,
    /// Node's container does not hold it under the recorded feature
    ContainerLink,
    /// Enum value outside its data type
    EnumLiteral,
    /// Singleton group member with more than one entry
    SingletonMember,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Offending node
    pub node: NodeId,
    /// Offending feature, if the finding is about one
    pub feature: Option<usize>,
    /// Check that failed
    pub check: Check,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warn => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

/// Validate `root` and every node contained under it
pub fn validate(graph: &ModelGraph, root: NodeId) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut nodes = vec![root];
    nodes.extend(graph.all_contents(root));

    for &node in &nodes {
        let Ok(class) = graph.class_descriptor(node) else {
            continue;
        };
        check_container(graph, node, class, &mut diagnostics);
        for feature in class.features() {
            check_feature(graph, node, class, feature, &mut diagnostics);
        }
    }

    tracing::debug!(
        "Validated {} nodes under {}: {} diagnostics",
        nodes.len(),
        root,
        diagnostics.len()
    );
    diagnostics
}

impl ModelGraph {
    /// Validate `root` and every node contained under it
    pub fn validate(&self, root: NodeId) -> Vec<Diagnostic> {
        validate(self, root)
    }
}

fn label(class: &ClassDescriptor, node: NodeId) -> String {
    format!("{}{}", class.name, node)
}

fn check_container(
    graph: &ModelGraph,
    node: NodeId,
    class: &ClassDescriptor,
    out: &mut Vec<Diagnostic>,
) {
    let Some(owner) = graph.container(node) else {
        return;
    };
    let Some(feature) = graph.containing_feature(node) else {
        return;
    };
    let target = Value::Node(node);
    let held = graph.node_ref(owner).is_ok_and(|data| {
        let group = graph.package().feature(data.class, feature).and_then(|f| f.group);
        match group.and_then(|g| data.slots.get(g)).or_else(|| data.slots.get(feature)) {
            // Every entry of a group member counts, not only the first
            Some(Slot::Group(Some(entries))) => {
                entries.iter().any(|e| e.feature == feature && e.value == target)
            }
            Some(Slot::Single { value, .. }) => *value == target,
            Some(Slot::Many(items)) => items.contains(&target),
            _ => false,
        }
    });
    if !held {
        out.push(Diagnostic {
            node,
            feature: None,
            check: Check::ContainerLink,
            severity: Severity::Error,
            message: format!(
                "{} names {} as container but is not held by feature {}",
                label(class, node),
                owner,
                feature
            ),
        });
    }
}

fn check_feature(
    graph: &ModelGraph,
    node: NodeId,
    class: &ClassDescriptor,
    feature: &FeatureDescriptor,
    out: &mut Vec<Diagnostic>,
) {
    if feature.required && !graph.try_is_set(node, feature.index).unwrap_or(false) {
        out.push(Diagnostic {
            node,
            feature: Some(feature.index),
            check: Check::Required,
            severity: Severity::Error,
            message: format!(
                "The required feature '{}' of '{}' must be set",
                feature.name,
                label(class, node)
            ),
        });
    }

    if let ValueType::Enum(id) = feature.value_type {
        let values = match graph.try_get(node, feature.index) {
            Ok(Value::List(items)) => items,
            Ok(value) => vec![value],
            Err(_) => Vec::new(),
        };
        for value in values {
            let valid = match value {
                Value::Null => true,
                Value::Enum(e) => e.ty == id && graph.package().literal_name(e).is_some(),
                _ => false,
            };
            if !valid {
                out.push(Diagnostic {
                    node,
                    feature: Some(feature.index),
                    check: Check::EnumLiteral,
                    severity: Severity::Error,
                    message: format!(
                        "The value {:?} of '{}' is not a valid {}",
                        value,
                        feature.name,
                        graph.package().type_name(feature.value_type)
                    ),
                });
            }
        }
    }

    if let (Some(group), false) = (feature.group, feature.is_many()) {
        let count = match graph.node_ref(node).map(|n| &n.slots[group]) {
            Ok(Slot::Group(Some(entries))) => {
                entries.iter().filter(|e| e.feature == feature.index).count()
            }
            _ => 0,
        };
        if count > 1 {
            out.push(Diagnostic {
                node,
                feature: Some(feature.index),
                check: Check::SingletonMember,
                severity: Severity::Warn,
                message: format!(
                    "The feature '{}' of '{}' holds {} entries but allows one",
                    feature.name,
                    label(class, node),
                    count
                ),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::registry::{FeatureSpec, Package};
    use crate::{GraphConfig, GroupMemberPolicy};

    struct Schema {
        package: Arc<Package>,
        doc: crate::ClassId,
        measure: crate::ClassId,
    }

    fn schema() -> Schema {
        let mut b = Package::builder("t", "urn:t");
        let mut m = b.class("MeasureType");
        m.feature(FeatureSpec::attribute("value", ValueType::Double));
        m.feature(FeatureSpec::attribute("uom", ValueType::String).required());
        let measure = m.finish();
        let mut d = b.class("Doc");
        d.feature(FeatureSpec::many_containment("measures", measure));
        let group = d.feature(FeatureSpec::group("choice"));
        d.feature(FeatureSpec::attribute("tag", ValueType::String).in_group(group));
        d.feature(FeatureSpec::containment("item", measure).in_group(group));
        let doc = d.finish();
        Schema {
            package: Arc::new(b.build().unwrap()),
            doc,
            measure,
        }
    }

    #[test]
    fn test_required_feature_reported() {
        let s = schema();
        let mut g = ModelGraph::new(s.package.clone());
        let doc = g.create(s.doc);
        let good = g.create(s.measure);
        g.set(good, 1, "m");
        let bad = g.create(s.measure);
        g.list(doc, 0).extend([good, bad]);

        let diagnostics = g.validate(doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].node, bad);
        assert_eq!(diagnostics[0].check, Check::Required);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert!(diagnostics[0].message.contains("'uom'"));
    }

    #[test]
    fn test_permissive_singleton_warns() {
        let s = schema();
        let config = GraphConfig::default().with_group_policy(GroupMemberPolicy::Permissive);
        let mut g = ModelGraph::with_config(s.package.clone(), config);
        let doc = g.create(s.doc);
        let mut map = g.feature_map(doc, 1);
        map.add(2, "a");
        map.add(2, "b");

        let diagnostics = validate(&g, doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].check, Check::SingletonMember);
        assert_eq!(diagnostics[0].severity, Severity::Warn);
    }

    #[test]
    fn test_repeated_singleton_containment_is_only_a_warning() {
        let s = schema();
        let config = GraphConfig::default().with_group_policy(GroupMemberPolicy::Permissive);
        let mut g = ModelGraph::with_config(s.package.clone(), config);
        let doc = g.create(s.doc);
        let (first, second) = (g.create(s.measure), g.create(s.measure));
        g.set(first, 1, "m");
        g.set(second, 1, "m");
        let mut map = g.feature_map(doc, 1);
        map.add(3, first);
        map.add(3, second);
        assert_eq!(g.container(second), Some(doc));

        let diagnostics = g.validate(doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].check, Check::SingletonMember);
        assert_eq!(diagnostics[0].feature, Some(3));
        assert_eq!(diagnostics[0].severity, Severity::Warn);
    }

    #[test]
    fn test_clean_tree() {
        let s = schema();
        let mut g = ModelGraph::new(s.package.clone());
        let doc = g.create(s.doc);
        assert!(g.validate(doc).is_empty());
    }
}
