//! Containment & ownership tracking
//!
//! A node has at most one container. Attaching a node that is already
//! owned first detaches it from its previous owner, and every notification
//! produced on the way is collected in one chain that is dispatched after
//! the whole reassignment has been applied.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::error::{ModelError, ModelResult};
use crate::graph::{kind_mismatch, lookup, ModelGraph};
use crate::node::Slot;
use crate::notify::{EventKind, Notification, NotificationChain};
use crate::registry::FeatureDescriptor;
use crate::value::{NodeId, Value};

impl ModelGraph {
    /// Assign a single-valued containment feature
    pub(crate) fn set_containment(
        &mut self,
        owner: NodeId,
        desc: &FeatureDescriptor,
        value: Value,
    ) -> ModelResult<()> {
        let old = match &self.node_ref(owner)?.slots[desc.index] {
            Slot::Single { value, .. } => value.clone(),
            _ => return Err(kind_mismatch(desc, "set a single value")),
        };
        let new_child = value.as_node();
        let notify = self.notification_required(owner);
        let mut chain = NotificationChain::new();

        // Re-assigning the current child keeps ownership untouched
        if new_child.is_some() && old == value {
            self.store_single(owner, desc, value.clone(), notify, old, &mut chain)?;
            self.dispatch(chain);
            return Ok(());
        }

        if let Some(child) = new_child {
            self.check_cycle(owner, child)?;
            self.detach_from_container(child, &mut chain)?;
        }
        if let Some(previous) = old.as_node() {
            self.unlink(previous);
        }
        self.store_single(owner, desc, value, notify, old, &mut chain)?;
        if let Some(child) = new_child {
            self.link(child, owner, desc.index);
        }

        self.dispatch(chain);
        Ok(())
    }

    fn store_single(
        &mut self,
        owner: NodeId,
        desc: &FeatureDescriptor,
        value: Value,
        notify: bool,
        old: Value,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let was_set = match &mut self.node_mut(owner)?.slots[desc.index] {
            Slot::Single { value: current, is_set } => {
                *current = value.clone();
                std::mem::replace(is_set, true)
            }
            _ => return Err(kind_mismatch(desc, "set a single value")),
        };
        if notify {
            chain.record(
                Notification::new(owner, desc.index, EventKind::Set, old, value)
                    .with_set_state_changed(desc.unsettable && !was_set),
            );
        }
        Ok(())
    }

    /// Reject attaching `child` under `owner` if `child` is `owner` or one
    /// of its ancestors
    pub(crate) fn check_cycle(&self, owner: NodeId, child: NodeId) -> ModelResult<()> {
        if !self.config().detect_cycles {
            return Ok(());
        }
        if child == owner || self.is_ancestor(child, owner) {
            return Err(ModelError::ContainmentCycle {
                child: child.to_string(),
                owner: owner.to_string(),
            });
        }
        Ok(())
    }

    /// Remove `child` from its container's slot, recording the owner's
    /// notification. No-op for a root.
    pub(crate) fn detach_from_container(
        &mut self,
        child: NodeId,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let Some((owner, feature)) = self.node_ref(child)?.container else {
            return Ok(());
        };
        let package = Arc::clone(self.package());
        let desc = self.descriptor(&package, owner, feature)?;
        let notify = self.notification_required(owner);
        let target = Value::Node(child);

        let slots = &mut self.node_mut(owner)?.slots;
        let removed_at = match desc.group {
            Some(group) => match &mut slots[group] {
                Slot::Group(Some(entries)) => {
                    let mut member_pos = 0;
                    let mut found = None;
                    for (i, entry) in entries.iter().enumerate() {
                        if entry.feature != feature {
                            continue;
                        }
                        if entry.value == target {
                            found = Some(i);
                            break;
                        }
                        member_pos += 1;
                    }
                    found.map(|i| {
                        entries.remove(i);
                        Some(member_pos)
                    })
                }
                _ => None,
            },
            None => match &mut slots[feature] {
                Slot::Single { value, .. } if *value == target => {
                    *value = Value::Null;
                    Some(None)
                }
                Slot::Many(items) => items.iter().position(|v| *v == target).map(|pos| {
                    items.remove(pos);
                    Some(pos)
                }),
                _ => None,
            },
        };

        self.unlink(child);
        tracing::trace!("Detached {} from {}", child, owner);
        if notify {
            if let Some(position) = removed_at {
                chain.record(removal(owner, desc, target, position));
            }
        }
        Ok(())
    }

    pub(crate) fn link(&mut self, child: NodeId, owner: NodeId, feature: usize) {
        if let Ok(node) = self.node_mut(child) {
            node.container = Some((owner, feature));
        }
    }

    pub(crate) fn unlink(&mut self, child: NodeId) {
        if let Ok(node) = self.node_mut(child) {
            node.container = None;
        }
    }

    // ===== Navigation =====

    /// Owning node, if any
    pub fn container(&self, node: NodeId) -> Option<NodeId> {
        self.node_ref(node).ok()?.container.map(|(owner, _)| owner)
    }

    /// Feature of the container under which `node` is held
    pub fn containing_feature(&self, node: NodeId) -> Option<usize> {
        self.node_ref(node).ok()?.container.map(|(_, feature)| feature)
    }

    /// Containers of `node`, nearest first
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = node;
        std::iter::from_fn(move || {
            let owner = self.container(current)?;
            current = owner;
            Some(owner)
        })
        // Bounded in case cycle detection is switched off
        .take(self.len())
    }

    /// Topmost container of `node` (the node itself for a root)
    pub fn root_of(&self, node: NodeId) -> NodeId {
        self.ancestors(node).last().unwrap_or(node)
    }

    /// Check if `ancestor` contains `node`, directly or transitively
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Directly contained children, in feature order
    pub fn contents(&self, node: NodeId) -> Vec<NodeId> {
        let Ok(data) = self.node_ref(node) else {
            return Vec::new();
        };
        let package = self.package();
        data.referenced_nodes()
            .filter(|(feature, child)| {
                lookup(package, data.class, *feature).is_ok_and(|f| f.is_containment())
                    && self.container(*child) == Some(node)
            })
            .map(|(_, child)| child)
            .collect()
    }

    /// Every node contained under `node`, in pre-order. Each node is
    /// visited once, even if cycle detection is switched off.
    pub fn all_contents(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(node);
        let mut stack: Vec<NodeId> = self.contents(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.contents(current).into_iter().rev());
        }
        result
    }

    // ===== Lifecycle =====

    /// Detach `node` from its container and free it with its whole
    /// containment subtree. Returns the number of freed nodes.
    pub fn delete(&mut self, node: NodeId) -> usize {
        self.try_delete(node).unwrap_or_else(|e| e.violated())
    }

    /// Detach and free a subtree
    pub fn try_delete(&mut self, node: NodeId) -> ModelResult<usize> {
        self.node_ref(node)?;
        let mut chain = NotificationChain::new();
        self.detach_from_container(node, &mut chain)?;

        let mut doomed = vec![node];
        doomed.extend(self.all_contents(node));
        let freed: FxHashSet<NodeId> = doomed.iter().copied().collect();

        self.purge_references(&freed, &mut chain);
        for id in &doomed {
            self.release(*id);
        }
        tracing::debug!("Deleted {} ({} nodes)", node, doomed.len());

        self.dispatch(chain);
        Ok(doomed.len())
    }

    /// Drop cross references from live nodes to nodes about to be freed
    fn purge_references(&mut self, freed: &FxHashSet<NodeId>, chain: &mut NotificationChain) {
        let package = Arc::clone(self.package());
        let survivors: Vec<NodeId> = self.nodes().filter(|id| !freed.contains(id)).collect();
        let is_freed = |v: &Value| v.as_node().is_some_and(|id| freed.contains(&id));

        for id in survivors {
            let notify = self.notification_required(id);
            let Ok(data) = self.node_mut(id) else {
                continue;
            };
            let class = data.class;
            for (index, slot) in data.slots.iter_mut().enumerate() {
                match slot {
                    Slot::Single { value, .. } if is_freed(&*value) => {
                        let old = std::mem::take(value);
                        if notify {
                            chain.record(Notification::new(
                                id,
                                index,
                                EventKind::Set,
                                old,
                                Value::Null,
                            ));
                        }
                    }
                    Slot::Many(items) => {
                        let mut pos = 0;
                        while pos < items.len() {
                            if !is_freed(&items[pos]) {
                                pos += 1;
                                continue;
                            }
                            let old = items.remove(pos);
                            if notify {
                                let removed = Notification::new(
                                    id,
                                    index,
                                    EventKind::Remove,
                                    old,
                                    Value::Null,
                                );
                                chain.record(removed.at(pos));
                            }
                        }
                    }
                    Slot::Group(Some(entries)) => {
                        let mut pos = 0;
                        while pos < entries.len() {
                            if !is_freed(&entries[pos].value) {
                                pos += 1;
                                continue;
                            }
                            let member = entries[pos].feature;
                            let member_pos =
                                entries[..pos].iter().filter(|e| e.feature == member).count();
                            let old = entries.remove(pos).value;
                            if let (true, Ok(desc)) = (notify, lookup(&package, class, member)) {
                                chain.record(removal(id, desc, old, Some(member_pos)));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Notification for a value leaving a feature: REMOVE from a list,
/// SET to null for a single value
pub(crate) fn removal(
    owner: NodeId,
    desc: &FeatureDescriptor,
    old: Value,
    position: Option<usize>,
) -> Notification {
    match position {
        Some(pos) if desc.is_many() => {
            Notification::new(owner, desc.index, EventKind::Remove, old, Value::Null).at(pos)
        }
        _ => Notification::new(owner, desc.index, EventKind::Set, old, Value::Null),
    }
}
