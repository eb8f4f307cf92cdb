//! Multi-valued features
//!
//! [`FeatureList`] is a mutable view over one multi-valued feature of one
//! node. Containment lists apply the detach-before-attach discipline to
//! every element they receive. Bulk operations (`extend`, `clear`) record a
//! single ADD_MANY / REMOVE_MANY notification instead of one per element.

use crate::error::{ModelError, ModelResult};
use crate::graph::{kind_mismatch, ModelGraph};
use crate::node::Slot;
use crate::notify::{EventKind, Notification, NotificationChain};
use crate::registry::FeatureDescriptor;
use crate::value::{NodeId, Value};

impl ModelGraph {
    /// Mutable view over a multi-valued feature
    pub fn list(&mut self, node: NodeId, feature: usize) -> FeatureList<'_> {
        self.try_list(node, feature).unwrap_or_else(|e| e.violated())
    }

    /// Mutable view over a multi-valued feature, or `KindMismatch` for
    /// single-valued features and choice groups
    pub fn try_list(&mut self, node: NodeId, feature: usize) -> ModelResult<FeatureList<'_>> {
        let package = std::sync::Arc::clone(self.package());
        let desc = self.descriptor(&package, node, feature)?;
        let is_list = matches!(self.node_ref(node)?.slots[feature], Slot::Many(_));
        if desc.is_group_member() || !desc.kind.is_many() || !is_list {
            return Err(kind_mismatch(desc, "be viewed as a list"));
        }
        Ok(FeatureList {
            desc: desc.clone(),
            graph: self,
            node,
        })
    }

    fn items(&self, node: NodeId, desc: &FeatureDescriptor) -> ModelResult<&Vec<Value>> {
        match &self.node_ref(node)?.slots[desc.index] {
            Slot::Many(items) => Ok(items),
            _ => Err(kind_mismatch(desc, "be viewed as a list")),
        }
    }

    fn items_mut(
        &mut self,
        node: NodeId,
        desc: &FeatureDescriptor,
    ) -> ModelResult<&mut Vec<Value>> {
        match &mut self.node_mut(node)?.slots[desc.index] {
            Slot::Many(items) => Ok(items),
            _ => Err(kind_mismatch(desc, "be viewed as a list")),
        }
    }

    /// Insert `values` at `position` (the end when `None`). Elements
    /// already present in a reference list are skipped. Returns the number
    /// of inserted elements.
    pub(crate) fn list_insert_all(
        &mut self,
        node: NodeId,
        desc: &FeatureDescriptor,
        position: Option<usize>,
        values: Vec<Value>,
        chain: &mut NotificationChain,
    ) -> ModelResult<usize> {
        let len = self.items(node, desc)?.len();
        let position = position.unwrap_or(len);
        if position > len {
            return Err(ModelError::IndexOutOfBounds { index: position, len });
        }
        self.check_elements(node, desc, &values)?;

        let mut accepted = if desc.kind.is_unique() {
            let current = self.items(node, desc)?;
            let mut accepted: Vec<Value> = Vec::with_capacity(values.len());
            for value in values {
                if !current.contains(&value) && !accepted.contains(&value) {
                    accepted.push(value);
                }
            }
            accepted
        } else {
            values
        };
        if accepted.is_empty() {
            return Ok(0);
        }

        let notify = self.notification_required(node);
        if desc.is_containment() {
            for child in accepted.iter().filter_map(Value::as_node) {
                self.detach_from_container(child, chain)?;
            }
        }

        let items = self.items_mut(node, desc)?;
        let tail = items.split_off(position);
        items.extend(accepted.iter().cloned());
        items.extend(tail);
        if desc.is_containment() {
            for child in accepted.iter().filter_map(Value::as_node) {
                self.link(child, node, desc.index);
            }
        }

        let count = accepted.len();
        if notify {
            let notification = match accepted.len() {
                1 => Notification::new(
                    node,
                    desc.index,
                    EventKind::Add,
                    Value::Null,
                    accepted.swap_remove(0),
                ),
                _ => Notification::new(
                    node,
                    desc.index,
                    EventKind::AddMany,
                    Value::Null,
                    Value::List(accepted),
                ),
            };
            chain.record(notification.at(position));
        }
        Ok(count)
    }

    /// Remove every element
    pub(crate) fn list_clear(
        &mut self,
        node: NodeId,
        desc: &FeatureDescriptor,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(node);
        let mut removed = std::mem::take(self.items_mut(node, desc)?);
        if removed.is_empty() {
            return Ok(());
        }
        if desc.is_containment() {
            for child in removed.iter().filter_map(Value::as_node) {
                self.unlink(child);
            }
        }
        if notify {
            let notification = match removed.len() {
                1 => Notification::new(
                    node,
                    desc.index,
                    EventKind::Remove,
                    removed.swap_remove(0),
                    Value::Null,
                )
                .at(0),
                _ => Notification::new(
                    node,
                    desc.index,
                    EventKind::RemoveMany,
                    Value::List(removed),
                    Value::Null,
                ),
            };
            chain.record(notification);
        }
        Ok(())
    }

    fn list_remove(
        &mut self,
        node: NodeId,
        desc: &FeatureDescriptor,
        index: usize,
        chain: &mut NotificationChain,
    ) -> ModelResult<Value> {
        let notify = self.notification_required(node);
        let items = self.items_mut(node, desc)?;
        if index >= items.len() {
            return Err(ModelError::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }
        let removed = items.remove(index);
        if desc.is_containment() {
            if let Some(child) = removed.as_node() {
                self.unlink(child);
            }
        }
        if notify {
            chain.record(
                Notification::new(node, desc.index, EventKind::Remove, removed.clone(), Value::Null)
                    .at(index),
            );
        }
        Ok(removed)
    }

    fn list_replace(
        &mut self,
        node: NodeId,
        desc: &FeatureDescriptor,
        index: usize,
        value: Value,
        chain: &mut NotificationChain,
    ) -> ModelResult<Value> {
        let items = self.items(node, desc)?;
        if index >= items.len() {
            return Err(ModelError::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }
        let notify = self.notification_required(node);
        if items[index] == value {
            if notify {
                let touch = Notification::new(
                    node,
                    desc.index,
                    EventKind::Set,
                    value.clone(),
                    value.clone(),
                );
                chain.record(touch.at(index));
            }
            return Ok(value);
        }
        if desc.kind.is_unique() && items.contains(&value) {
            return Err(ModelError::Duplicate {
                what: "list element",
                name: format!(
                    "{} in {}",
                    value.as_node().map_or_else(String::new, |n| n.to_string()),
                    desc.name
                ),
            });
        }
        self.check_elements(node, desc, std::slice::from_ref(&value))?;

        if desc.is_containment() {
            if let Some(child) = value.as_node() {
                self.detach_from_container(child, chain)?;
            }
        }
        let items = self.items_mut(node, desc)?;
        let old = std::mem::replace(&mut items[index], value.clone());
        if desc.is_containment() {
            if let Some(previous) = old.as_node() {
                self.unlink(previous);
            }
            if let Some(child) = value.as_node() {
                self.link(child, node, desc.index);
            }
        }
        if notify {
            chain.record(
                Notification::new(node, desc.index, EventKind::Set, old.clone(), value).at(index),
            );
        }
        Ok(old)
    }

    fn list_move(
        &mut self,
        node: NodeId,
        desc: &FeatureDescriptor,
        from: usize,
        to: usize,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(node);
        let items = self.items_mut(node, desc)?;
        let len = items.len();
        if from >= len || to >= len {
            return Err(ModelError::IndexOutOfBounds {
                index: from.max(to),
                len,
            });
        }
        if from == to {
            return Ok(());
        }
        let moved = items.remove(from);
        items.insert(to, moved.clone());
        if notify {
            chain.record(
                Notification::new(node, desc.index, EventKind::Move, Value::Int(from as i64), moved)
                    .at(to),
            );
        }
        Ok(())
    }
}

/// Mutable view over one multi-valued feature of a node.
///
/// Every mutation goes straight to the node's storage and dispatches its
/// notifications before returning.
pub struct FeatureList<'g> {
    graph: &'g mut ModelGraph,
    node: NodeId,
    desc: FeatureDescriptor,
}

impl<'g> FeatureList<'g> {
    /// Owning node
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Descriptor of the viewed feature
    pub fn feature(&self) -> &FeatureDescriptor {
        &self.desc
    }

    fn slice(&self) -> &[Value] {
        self.graph
            .items(self.node, &self.desc)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.slice().len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.slice().is_empty()
    }

    /// Element at `index`
    pub fn get(&self, index: usize) -> Option<Value> {
        self.slice().get(index).cloned()
    }

    /// Check if `value` is an element
    pub fn contains(&self, value: &Value) -> bool {
        self.slice().contains(value)
    }

    /// Snapshot of the elements
    pub fn values(&self) -> Vec<Value> {
        self.slice().to_vec()
    }

    /// Node elements, skipping data values
    pub fn nodes(&self) -> Vec<NodeId> {
        self.slice().iter().filter_map(Value::as_node).collect()
    }

    fn run<R, F>(&mut self, op: F) -> ModelResult<R>
    where
        F: FnOnce(&mut ModelGraph, &FeatureDescriptor, &mut NotificationChain) -> ModelResult<R>,
    {
        let mut chain = NotificationChain::new();
        let result = op(&mut *self.graph, &self.desc, &mut chain);
        self.graph.dispatch(chain);
        result
    }

    /// Append one element. Returns false if a reference list already holds it.
    pub fn push(&mut self, value: impl Into<Value>) -> bool {
        self.try_push(value.into()).unwrap_or_else(|e| e.violated())
    }

    /// Append one element
    pub fn try_push(&mut self, value: Value) -> ModelResult<bool> {
        let node = self.node;
        self.run(|g, desc, chain| g.list_insert_all(node, desc, None, vec![value], chain))
            .map(|count| count > 0)
    }

    /// Insert one element before `index`
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> bool {
        self.try_insert(index, value.into()).unwrap_or_else(|e| e.violated())
    }

    /// Insert one element before `index`
    pub fn try_insert(&mut self, index: usize, value: Value) -> ModelResult<bool> {
        let node = self.node;
        self.run(|g, desc, chain| g.list_insert_all(node, desc, Some(index), vec![value], chain))
            .map(|count| count > 0)
    }

    /// Append several elements as one ADD_MANY change
    pub fn extend<I, V>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.try_extend(values.into_iter().map(Into::into).collect())
            .unwrap_or_else(|e| e.violated())
    }

    /// Append several elements as one ADD_MANY change. Nothing is added if
    /// any element is ill-typed.
    pub fn try_extend(&mut self, values: Vec<Value>) -> ModelResult<usize> {
        let node = self.node;
        self.run(|g, desc, chain| g.list_insert_all(node, desc, None, values, chain))
    }

    /// Remove the element at `index`
    pub fn remove(&mut self, index: usize) -> Value {
        self.try_remove(index).unwrap_or_else(|e| e.violated())
    }

    /// Remove the element at `index`
    pub fn try_remove(&mut self, index: usize) -> ModelResult<Value> {
        let node = self.node;
        self.run(|g, desc, chain| g.list_remove(node, desc, index, chain))
    }

    /// Remove the first element equal to `value`
    pub fn remove_value(&mut self, value: &Value) -> bool {
        let found = self.slice().iter().position(|v| v == value);
        match found {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every element as one REMOVE_MANY change
    pub fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            e.violated()
        }
    }

    /// Remove every element as one REMOVE_MANY change
    pub fn try_clear(&mut self) -> ModelResult<()> {
        let node = self.node;
        self.run(|g, desc, chain| g.list_clear(node, desc, chain))
    }

    /// Replace the element at `index`, returning the previous one
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Value {
        self.try_set(index, value.into()).unwrap_or_else(|e| e.violated())
    }

    /// Replace the element at `index`
    pub fn try_set(&mut self, index: usize, value: Value) -> ModelResult<Value> {
        let node = self.node;
        self.run(|g, desc, chain| g.list_replace(node, desc, index, value, chain))
    }

    /// Move the element at `from` to `to`
    pub fn move_item(&mut self, from: usize, to: usize) {
        if let Err(e) = self.try_move_item(from, to) {
            e.violated()
        }
    }

    /// Move the element at `from` to `to`
    pub fn try_move_item(&mut self, from: usize, to: usize) -> ModelResult<()> {
        let node = self.node;
        self.run(|g, desc, chain| g.list_move(node, desc, from, to, chain))
    }
}

impl std::fmt::Debug for FeatureList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureList")
            .field("node", &self.node)
            .field("feature", &self.desc.name)
            .field("values", &self.slice())
            .finish()
    }
}
