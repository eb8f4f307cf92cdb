//! Typed object node storage
//!
//! Every node holds one slot per feature of its class, addressed by the
//! feature index. Choice group members have no storage of their own: their
//! values live as tagged entries in the group's slot.

use crate::registry::{ClassDescriptor, FeatureDescriptor, FeatureKind};
use crate::value::{ClassId, GroupEntry, NodeId, Value};

/// Backing store of one feature
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Slot {
    /// Single-valued feature; `is_set` tracks explicit assignment for
    /// unsettable features
    Single { value: Value, is_set: bool },
    /// Multi-valued feature
    Many(Vec<Value>),
    /// Choice group, allocated on first use
    Group(Option<Vec<GroupEntry>>),
    /// Member of a choice group, projected from the group's entries
    Member,
}

impl Slot {
    fn for_feature(feature: &FeatureDescriptor) -> Self {
        if feature.is_group_member() {
            return Slot::Member;
        }
        match feature.kind {
            FeatureKind::Group => Slot::Group(None),
            kind if kind.is_many() => Slot::Many(Vec::new()),
            _ => Slot::Single {
                value: feature.default.clone(),
                is_set: false,
            },
        }
    }
}

/// One instance of a schema class
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) class: ClassId,
    pub(crate) slots: Vec<Slot>,
    /// Owning node and the feature this node is contained under
    pub(crate) container: Option<(NodeId, usize)>,
    /// Set while the node is an unresolved placeholder
    pub(crate) proxy_uri: Option<String>,
}

impl Node {
    pub(crate) fn new(class: &ClassDescriptor) -> Self {
        Self {
            class: class.id,
            slots: class.features().iter().map(Slot::for_feature).collect(),
            container: None,
            proxy_uri: None,
        }
    }

    /// Node values held directly by this node, in feature order.
    /// Group entries are visited in document order.
    pub(crate) fn referenced_nodes(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.slots.iter().enumerate().flat_map(|(index, slot)| {
            let values: Box<dyn Iterator<Item = (usize, NodeId)> + '_> = match slot {
                Slot::Single { value, .. } => {
                    Box::new(value.as_node().map(|id| (index, id)).into_iter())
                }
                Slot::Many(items) => Box::new(
                    items
                        .iter()
                        .filter_map(move |v| v.as_node().map(|id| (index, id))),
                ),
                Slot::Group(Some(entries)) => Box::new(
                    entries
                        .iter()
                        .filter_map(|e| e.value.as_node().map(|id| (e.feature, id))),
                ),
                Slot::Group(None) | Slot::Member => Box::new(std::iter::empty()),
            };
            values
        })
    }
}

/// Arena cell: the generation survives the node so stale ids can be told apart
#[derive(Debug)]
pub(crate) struct ArenaEntry {
    pub(crate) generation: u32,
    pub(crate) node: Option<Node>,
}
