//! Choice groups (feature maps)
//!
//! A choice group stores an ordered sequence of [`GroupEntry`] values, each
//! tagged with the member feature it belongs to, so document order is kept
//! across heterogeneous kinds. A member feature has no storage of its own:
//! [`MemberView`] is a filtered projection over the group's entries and
//! writes through to the right position of the underlying sequence.
//!
//! Change notifications are reported on the member features, so the
//! group's events are the union of its members' events.

use std::sync::Arc;

use crate::config::GroupMemberPolicy;
use crate::containment::removal;
use crate::error::{ModelError, ModelResult};
use crate::graph::{kind_mismatch, ModelGraph};
use crate::node::Slot;
use crate::notify::{EventKind, Notification, NotificationChain};
use crate::registry::{FeatureDescriptor, FeatureKind};
use crate::value::{GroupEntry, NodeId, Value};

fn not_a_group(group: usize) -> ModelError {
    ModelError::KindMismatch {
        feature: format!("#{}", group),
        kind: "not a choice group".to_string(),
        operation: "hold entries".to_string(),
    }
}

/// Entries before `abs` tagged with `member`
fn member_position(entries: &[GroupEntry], abs: usize, member: usize) -> usize {
    entries[..abs].iter().filter(|e| e.feature == member).count()
}

/// Position in the whole group of the `nth` entry tagged with `member`
fn absolute_index(entries: &[GroupEntry], member: usize, nth: usize) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.feature == member)
        .nth(nth)
        .map(|(abs, _)| abs)
}

/// Notification for a value entering a member feature
fn addition(
    owner: NodeId,
    desc: &FeatureDescriptor,
    value: Value,
    position: usize,
) -> Notification {
    if desc.is_many() {
        Notification::new(owner, desc.index, EventKind::Add, Value::Null, value).at(position)
    } else {
        Notification::new(owner, desc.index, EventKind::Set, Value::Null, value)
    }
}

impl ModelGraph {
    /// Mutable view over the choice group at feature `group`
    pub fn feature_map(&mut self, node: NodeId, group: usize) -> FeatureMapView<'_> {
        self.try_feature_map(node, group).unwrap_or_else(|e| e.violated())
    }

    /// Mutable view over a choice group, or `KindMismatch` for other features
    pub fn try_feature_map(
        &mut self,
        node: NodeId,
        group: usize,
    ) -> ModelResult<FeatureMapView<'_>> {
        let package = Arc::clone(self.package());
        let desc = self.descriptor(&package, node, group)?;
        if desc.kind != FeatureKind::Group {
            return Err(kind_mismatch(desc, "be viewed as a choice group"));
        }
        Ok(FeatureMapView {
            graph: self,
            node,
            group,
        })
    }

    /// View over the group a member feature projects from
    pub(crate) fn feature_map_of(
        &mut self,
        node: NodeId,
        member: &FeatureDescriptor,
    ) -> ModelResult<FeatureMapView<'_>> {
        let group = member.group.ok_or_else(|| ModelError::NotGroupMember {
            feature: member.name.clone(),
            group: "none".to_string(),
        })?;
        self.try_feature_map(node, group)
    }

    fn group_entries(&self, node: NodeId, group: usize) -> ModelResult<&[GroupEntry]> {
        match &self.node_ref(node)?.slots[group] {
            Slot::Group(Some(entries)) => Ok(entries),
            Slot::Group(None) => Ok(&[]),
            _ => Err(not_a_group(group)),
        }
    }

    /// Entries of a group, allocating the storage on first use
    fn group_entries_mut(
        &mut self,
        node: NodeId,
        group: usize,
    ) -> ModelResult<&mut Vec<GroupEntry>> {
        match &mut self.node_mut(node)?.slots[group] {
            Slot::Group(entries) => Ok(entries.get_or_insert_with(Vec::new)),
            _ => Err(not_a_group(group)),
        }
    }

    /// Descriptor of `member`, checked to project from `group`
    fn member_descriptor(
        &self,
        node: NodeId,
        group: usize,
        member: usize,
    ) -> ModelResult<FeatureDescriptor> {
        let package = Arc::clone(self.package());
        let desc = self.descriptor(&package, node, member)?;
        if desc.group != Some(group) {
            let group_name = self
                .descriptor(&package, node, group)
                .map_or_else(|_| group.to_string(), |g| g.name.clone());
            return Err(ModelError::NotGroupMember {
                feature: desc.name.clone(),
                group: group_name,
            });
        }
        Ok(desc.clone())
    }

    fn check_entry(
        &self,
        node: NodeId,
        desc: &FeatureDescriptor,
        value: &Value,
    ) -> ModelResult<()> {
        if value.is_null() {
            return Err(self.mismatch(desc, value));
        }
        self.check_value(desc, value)?;
        if let (true, Some(child)) = (desc.is_containment(), value.as_node()) {
            self.check_cycle(node, child)?;
        }
        Ok(())
    }

    /// Insert an entry for `desc` before its `before`-th entry (at the end
    /// of the group when `None` or past the last one) without recording
    /// the addition. Returns the member position, or `None` if a reference
    /// member already holds the value.
    fn group_attach(
        &mut self,
        node: NodeId,
        group: usize,
        desc: &FeatureDescriptor,
        before: Option<usize>,
        value: Value,
        chain: &mut NotificationChain,
    ) -> ModelResult<Option<usize>> {
        let entries = self.group_entries(node, group)?;
        if desc.kind.is_reference()
            && entries.iter().any(|e| e.feature == desc.index && e.value == value)
        {
            return Ok(None);
        }
        if let Some(before) = before {
            let count = entries.iter().filter(|e| e.feature == desc.index).count();
            if before > count {
                return Err(ModelError::IndexOutOfBounds { index: before, len: count });
            }
        }

        let child = value.as_node().filter(|_| desc.is_containment());
        if let Some(child) = child {
            self.detach_from_container(child, chain)?;
        }

        let entries = self.group_entries_mut(node, group)?;
        let abs = before
            .and_then(|nth| absolute_index(entries, desc.index, nth))
            .unwrap_or(entries.len());
        let position = member_position(entries, abs, desc.index);
        entries.insert(abs, GroupEntry::new(desc.index, value));
        if let Some(child) = child {
            self.link(child, node, desc.index);
        }
        Ok(Some(position))
    }

    /// Add an entry, replacing the existing one for singleton members when
    /// the policy enforces it
    fn group_insert(
        &mut self,
        node: NodeId,
        group: usize,
        desc: &FeatureDescriptor,
        before: Option<usize>,
        value: Value,
        chain: &mut NotificationChain,
    ) -> ModelResult<bool> {
        self.check_entry(node, desc, &value)?;

        if !desc.is_many() && self.config().single_group_members == GroupMemberPolicy::Enforce {
            let existing = self
                .group_entries(node, group)?
                .iter()
                .position(|e| e.feature == desc.index);
            if let Some(abs) = existing {
                self.group_replace_entry(node, group, desc, abs, value, chain)?;
                return Ok(true);
            }
        }

        let notify = self.notification_required(node);
        match self.group_attach(node, group, desc, before, value.clone(), chain)? {
            Some(position) => {
                if notify {
                    chain.record(addition(node, desc, value, position));
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append several entries of one member as a single ADD_MANY change
    fn group_insert_all(
        &mut self,
        node: NodeId,
        group: usize,
        desc: &FeatureDescriptor,
        values: Vec<Value>,
        chain: &mut NotificationChain,
    ) -> ModelResult<usize> {
        if !desc.is_many() {
            let mut count = 0;
            for value in values {
                count += usize::from(self.group_insert(node, group, desc, None, value, chain)?);
            }
            return Ok(count);
        }
        for value in &values {
            self.check_entry(node, desc, value)?;
        }

        let notify = self.notification_required(node);
        let mut added = Vec::with_capacity(values.len());
        let mut first = None;
        for value in values {
            let attached = self.group_attach(node, group, desc, None, value.clone(), chain)?;
            if let Some(position) = attached {
                first.get_or_insert(position);
                added.push(value);
            }
        }
        let count = added.len();
        if let (true, Some(position)) = (notify, first) {
            let notification = match count {
                1 => Notification::new(
                    node,
                    desc.index,
                    EventKind::Add,
                    Value::Null,
                    added.swap_remove(0),
                ),
                _ => Notification::new(
                    node,
                    desc.index,
                    EventKind::AddMany,
                    Value::Null,
                    Value::List(added),
                ),
            };
            chain.record(notification.at(position));
        }
        Ok(count)
    }

    /// Replace the value of the entry at `abs` in place
    fn group_replace_entry(
        &mut self,
        node: NodeId,
        group: usize,
        desc: &FeatureDescriptor,
        abs: usize,
        value: Value,
        chain: &mut NotificationChain,
    ) -> ModelResult<Value> {
        let notify = self.notification_required(node);
        let old = match self.group_entries(node, group)?.get(abs) {
            Some(entry) => entry.value.clone(),
            None => {
                return Err(ModelError::IndexOutOfBounds {
                    index: abs,
                    len: self.group_entries(node, group)?.len(),
                })
            }
        };
        let position = member_position(self.group_entries(node, group)?, abs, desc.index);

        if old == value {
            if notify {
                chain.record(Notification::new(
                    node,
                    desc.index,
                    EventKind::Set,
                    old.clone(),
                    value,
                ));
            }
            return Ok(old);
        }

        let mut abs = abs;
        if desc.is_containment() {
            if let Some(child) = value.as_node() {
                self.detach_from_container(child, chain)?;
                // Detaching may have shifted entries of this same group
                abs = self
                    .group_entries(node, group)?
                    .iter()
                    .position(|e| e.feature == desc.index && e.value == old)
                    .unwrap_or(abs);
            }
            if let Some(previous) = old.as_node() {
                self.unlink(previous);
            }
        }

        let entries = self.group_entries_mut(node, group)?;
        entries[abs].value = value.clone();
        if let (true, Some(child)) = (desc.is_containment(), value.as_node()) {
            self.link(child, node, desc.index);
        }

        if notify {
            let mut notification =
                Notification::new(node, desc.index, EventKind::Set, old.clone(), value);
            if desc.is_many() {
                notification = notification.at(position);
            }
            chain.record(notification);
        }
        Ok(old)
    }

    /// Remove the entry at `abs`
    fn group_remove(
        &mut self,
        node: NodeId,
        group: usize,
        abs: usize,
        chain: &mut NotificationChain,
    ) -> ModelResult<GroupEntry> {
        let notify = self.notification_required(node);
        let package = Arc::clone(self.package());
        let entries = self.group_entries_mut(node, group)?;
        if abs >= entries.len() {
            return Err(ModelError::IndexOutOfBounds {
                index: abs,
                len: entries.len(),
            });
        }
        let position = member_position(entries, abs, entries[abs].feature);
        let entry = entries.remove(abs);
        let desc = self.descriptor(&package, node, entry.feature)?;

        if let (true, Some(child)) = (desc.is_containment(), entry.value.as_node()) {
            self.unlink(child);
        }
        if notify {
            chain.record(removal(node, desc, entry.value.clone(), Some(position)));
        }
        Ok(entry)
    }

    /// Remove the entries selected by `filter`, recording one change per member
    fn group_remove_where(
        &mut self,
        node: NodeId,
        group: usize,
        filter: impl Fn(&GroupEntry) -> bool,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(node);
        let package = Arc::clone(self.package());
        let entries = self.group_entries_mut(node, group)?;
        let (removed, kept): (Vec<GroupEntry>, Vec<GroupEntry>) =
            std::mem::take(entries).into_iter().partition(|e| filter(e));
        *entries = kept;
        if removed.is_empty() {
            return Ok(());
        }

        // Members in order of first appearance
        let mut members: Vec<usize> = Vec::new();
        for entry in &removed {
            if !members.contains(&entry.feature) {
                members.push(entry.feature);
            }
        }

        for member in members {
            let desc = self.descriptor(&package, node, member)?;
            let mut values: Vec<Value> = removed
                .iter()
                .filter(|e| e.feature == member)
                .map(|e| e.value.clone())
                .collect();
            if desc.is_containment() {
                for child in values.iter().filter_map(Value::as_node) {
                    self.unlink(child);
                }
            }
            if notify {
                let notification = match values.len() {
                    1 => removal(node, desc, values.swap_remove(0), Some(0)),
                    _ => Notification::new(
                        node,
                        member,
                        EventKind::RemoveMany,
                        Value::List(values),
                        Value::Null,
                    ),
                };
                chain.record(notification);
            }
        }
        Ok(())
    }

    /// Reflective assignment of a member feature
    pub(crate) fn set_group_member(
        &mut self,
        node: NodeId,
        desc: &FeatureDescriptor,
        value: Value,
    ) -> ModelResult<()> {
        let group = desc.group.ok_or_else(|| kind_mismatch(desc, "be set as a group member"))?;
        let member = desc.index;
        let mut chain = NotificationChain::new();

        if desc.is_many() {
            let items = match value {
                Value::List(items) => items,
                Value::Null => Vec::new(),
                other => return Err(self.mismatch(desc, &other)),
            };
            for item in &items {
                self.check_entry(node, desc, item)?;
            }
            self.group_remove_where(node, group, |e| e.feature == member, &mut chain)?;
            self.group_insert_all(node, group, desc, items, &mut chain)?;
        } else {
            let existing = self
                .group_entries(node, group)?
                .iter()
                .position(|e| e.feature == member);
            match (existing, value) {
                (Some(abs), Value::Null) => {
                    self.group_remove(node, group, abs, &mut chain)?;
                }
                (None, Value::Null) => {}
                (Some(abs), value) => {
                    self.check_entry(node, desc, &value)?;
                    self.group_replace_entry(node, group, desc, abs, value, &mut chain)?;
                }
                (None, value) => {
                    self.group_insert(node, group, desc, None, value, &mut chain)?;
                }
            }
        }

        self.dispatch(chain);
        Ok(())
    }

    /// Reflective assignment of a whole group
    pub(crate) fn replace_group(
        &mut self,
        node: NodeId,
        desc: &FeatureDescriptor,
        entries: Vec<GroupEntry>,
    ) -> ModelResult<()> {
        let group = desc.index;
        let mut members = Vec::with_capacity(entries.len());
        for entry in &entries {
            let member = self.member_descriptor(node, group, entry.feature)?;
            self.check_entry(node, &member, &entry.value)?;
            members.push(member);
        }

        let mut chain = NotificationChain::new();
        self.group_remove_where(node, group, |_| true, &mut chain)?;
        for (entry, member) in entries.into_iter().zip(members) {
            self.group_insert(node, group, &member, None, entry.value, &mut chain)?;
        }
        self.dispatch(chain);
        Ok(())
    }
}

/// Mutable view over one choice group of a node
pub struct FeatureMapView<'g> {
    graph: &'g mut ModelGraph,
    node: NodeId,
    group: usize,
}

impl<'g> FeatureMapView<'g> {
    /// Owning node
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Feature index of the group
    pub fn group(&self) -> usize {
        self.group
    }

    fn slice(&self) -> &[GroupEntry] {
        self.graph.group_entries(self.node, self.group).unwrap_or_default()
    }

    /// Snapshot of the entries, in document order
    pub fn entries(&self) -> Vec<GroupEntry> {
        self.slice().to_vec()
    }

    /// Number of entries across all members
    pub fn len(&self) -> usize {
        self.slice().len()
    }

    /// Check if the group has no entry
    pub fn is_empty(&self) -> bool {
        self.slice().is_empty()
    }

    /// Check if the group's storage has been allocated
    pub fn is_materialized(&self) -> bool {
        self.graph
            .node_ref(self.node)
            .is_ok_and(|n| matches!(n.slots[self.group], Slot::Group(Some(_))))
    }

    fn run<R>(
        &mut self,
        op: impl FnOnce(&mut ModelGraph, &mut NotificationChain) -> ModelResult<R>,
    ) -> ModelResult<R> {
        let mut chain = NotificationChain::new();
        let result = op(&mut *self.graph, &mut chain);
        self.graph.dispatch(chain);
        result
    }

    /// First value of `member`, or `Null`. With `create`, the group's
    /// storage is allocated even if no value exists yet.
    pub fn get(&mut self, member: usize, create: bool) -> Value {
        self.try_get(member, create).unwrap_or_else(|e| e.violated())
    }

    /// First value of `member`
    pub fn try_get(&mut self, member: usize, create: bool) -> ModelResult<Value> {
        self.graph.member_descriptor(self.node, self.group, member)?;
        if create {
            self.graph.group_entries_mut(self.node, self.group)?;
        }
        Ok(self
            .slice()
            .iter()
            .find(|e| e.feature == member)
            .map_or(Value::Null, |e| e.value.clone()))
    }

    /// Append an entry for `member`
    pub fn add(&mut self, member: usize, value: impl Into<Value>) -> bool {
        self.try_add(member, value.into()).unwrap_or_else(|e| e.violated())
    }

    /// Append an entry for `member`. A singleton member that already has an
    /// entry gets it replaced in place unless the graph is permissive.
    pub fn try_add(&mut self, member: usize, value: Value) -> ModelResult<bool> {
        let (node, group) = (self.node, self.group);
        let desc = self.graph.member_descriptor(node, group, member)?;
        self.run(|g, chain| g.group_insert(node, group, &desc, None, value, chain))
    }

    /// Assign a member: replaces its first entry in place, appends if it
    /// has none, removes it for `Null`
    pub fn set(&mut self, member: usize, value: impl Into<Value>) {
        if let Err(e) = self.try_set(member, value.into()) {
            e.violated()
        }
    }

    /// Assign a member
    pub fn try_set(&mut self, member: usize, value: Value) -> ModelResult<()> {
        let desc = self.graph.member_descriptor(self.node, self.group, member)?;
        self.graph.set_group_member(self.node, &desc, value)
    }

    /// Remove the entry at `index` of the whole group
    pub fn remove(&mut self, index: usize) -> GroupEntry {
        self.try_remove(index).unwrap_or_else(|e| e.violated())
    }

    /// Remove the entry at `index` of the whole group
    pub fn try_remove(&mut self, index: usize) -> ModelResult<GroupEntry> {
        let (node, group) = (self.node, self.group);
        self.run(|g, chain| g.group_remove(node, group, index, chain))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            e.violated()
        }
    }

    /// Remove every entry
    pub fn try_clear(&mut self) -> ModelResult<()> {
        let (node, group) = (self.node, self.group);
        self.run(|g, chain| g.group_remove_where(node, group, |_| true, chain))
    }

    /// Filtered view over the entries of `member`
    pub fn list(&mut self, member: usize) -> MemberView<'_> {
        self.try_list(member).unwrap_or_else(|e| e.violated())
    }

    /// Filtered view over the entries of `member`
    pub fn try_list(&mut self, member: usize) -> ModelResult<MemberView<'_>> {
        let desc = self.graph.member_descriptor(self.node, self.group, member)?;
        Ok(MemberView {
            graph: &mut *self.graph,
            node: self.node,
            group: self.group,
            desc,
        })
    }
}

impl std::fmt::Debug for FeatureMapView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureMapView")
            .field("node", &self.node)
            .field("group", &self.group)
            .field("entries", &self.slice())
            .finish()
    }
}

/// The entries of one member feature, as a list.
///
/// Reads filter the group's sequence; writes land at the matching position
/// of that sequence.
pub struct MemberView<'a> {
    graph: &'a mut ModelGraph,
    node: NodeId,
    group: usize,
    desc: FeatureDescriptor,
}

impl<'a> MemberView<'a> {
    /// Descriptor of the member feature
    pub fn feature(&self) -> &FeatureDescriptor {
        &self.desc
    }

    fn filtered(&self) -> impl Iterator<Item = &Value> + '_ {
        let member = self.desc.index;
        self.graph
            .group_entries(self.node, self.group)
            .unwrap_or_default()
            .iter()
            .filter(move |e| e.feature == member)
            .map(|e| &e.value)
    }

    /// Number of entries of this member
    pub fn len(&self) -> usize {
        self.filtered().count()
    }

    /// Check if the member has no entry
    pub fn is_empty(&self) -> bool {
        self.filtered().next().is_none()
    }

    /// Value at member position `index`
    pub fn get(&self, index: usize) -> Option<Value> {
        self.filtered().nth(index).cloned()
    }

    /// Check if `value` is an entry of this member
    pub fn contains(&self, value: &Value) -> bool {
        self.filtered().any(|v| v == value)
    }

    /// Snapshot of the member's values, in document order
    pub fn values(&self) -> Vec<Value> {
        self.filtered().cloned().collect()
    }

    /// Node values of the member
    pub fn nodes(&self) -> Vec<NodeId> {
        self.filtered().filter_map(Value::as_node).collect()
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

    /// Append a value at the end of the group
    pub fn push(&mut self, value: impl Into<Value>) -> bool {
        self.try_push(value.into()).unwrap_or_else(|e| e.violated())
    }

    /// Append a value at the end of the group
    pub fn try_push(&mut self, value: Value) -> ModelResult<bool> {
        let (node, group) = (self.node, self.group);
        self.run(|g, desc, chain| g.group_insert(node, group, desc, None, value, chain))
    }

    /// Insert a value before the member's `index`-th entry
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> bool {
        self.try_insert(index, value.into()).unwrap_or_else(|e| e.violated())
    }

    /// Insert a value before the member's `index`-th entry
    pub fn try_insert(&mut self, index: usize, value: Value) -> ModelResult<bool> {
        let (node, group) = (self.node, self.group);
        self.run(|g, desc, chain| g.group_insert(node, group, desc, Some(index), value, chain))
    }

    /// Append several values as one ADD_MANY change
    pub fn extend<I, V>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.try_extend(values.into_iter().map(Into::into).collect())
            .unwrap_or_else(|e| e.violated())
    }

    /// Append several values as one ADD_MANY change
    pub fn try_extend(&mut self, values: Vec<Value>) -> ModelResult<usize> {
        let (node, group) = (self.node, self.group);
        self.run(|g, desc, chain| g.group_insert_all(node, group, desc, values, chain))
    }

    /// Remove the member's `index`-th entry
    pub fn remove(&mut self, index: usize) -> Value {
        self.try_remove(index).unwrap_or_else(|e| e.violated())
    }

    /// Remove the member's `index`-th entry
    pub fn try_remove(&mut self, index: usize) -> ModelResult<Value> {
        let (node, group) = (self.node, self.group);
        self.run(|g, desc, chain| {
            let entries = g.group_entries(node, group)?;
            let len = entries.iter().filter(|e| e.feature == desc.index).count();
            let abs = absolute_index(entries, desc.index, index)
                .ok_or(ModelError::IndexOutOfBounds { index, len })?;
            g.group_remove(node, group, abs, chain).map(|entry| entry.value)
        })
    }

    /// Remove the first entry equal to `value`
    pub fn remove_value(&mut self, value: &Value) -> bool {
        let found = self.filtered().position(|v| v == value);
        match found {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every entry of this member
    pub fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            e.violated()
        }
    }

    /// Remove every entry of this member
    pub fn try_clear(&mut self) -> ModelResult<()> {
        let (node, group) = (self.node, self.group);
        self.run(|g, desc, chain| {
            let member = desc.index;
            g.group_remove_where(node, group, |e| e.feature == member, chain)
        })
    }
}

impl std::fmt::Debug for MemberView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberView")
            .field("node", &self.node)
            .field("member", &self.desc.name)
            .field("values", &self.values())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FeatureSpec, Package};
    use crate::{ClassId, GraphConfig, Recorder, ValueType};

    struct Line {
        graph: ModelGraph,
        line: ClassId,
        pos: ClassId,
        group: usize,
        x: usize,
        y: usize,
        label: usize,
    }

    fn line(config: GraphConfig) -> Line {
        let mut b = Package::builder("t", "urn:t");
        let mut pos = b.class("Pos");
        pos.feature(FeatureSpec::attribute("v", ValueType::Double));
        let pos = pos.finish();

        let mut line = b.class("Line");
        let group = line.feature(FeatureSpec::group("group"));
        let x = line.feature(FeatureSpec::many_containment("x", pos).in_group(group));
        let y = line.feature(FeatureSpec::many_attribute("y", ValueType::Double).in_group(group));
        let label =
            line.feature(FeatureSpec::attribute("label", ValueType::String).in_group(group));
        let line = line.finish();

        Line {
            graph: ModelGraph::with_config(Arc::new(b.build().unwrap()), config),
            line,
            pos,
            group,
            x,
            y,
            label,
        }
    }

    #[test]
    fn test_lazy_storage() {
        let mut l = line(GraphConfig::default());
        let n = l.graph.create(l.line);
        let mut map = l.graph.feature_map(n, l.group);
        assert!(!map.is_materialized());
        assert_eq!(map.get(l.label, false), Value::Null);
        assert!(!map.is_materialized());
        assert_eq!(map.get(l.label, true), Value::Null);
        assert!(map.is_materialized());
        assert!(map.is_empty());
    }

    #[test]
    fn test_member_insert_lands_between_entries() {
        let mut l = line(GraphConfig::default());
        let n = l.graph.create(l.line);
        let (a, b, c) = (l.graph.create(l.pos), l.graph.create(l.pos), l.graph.create(l.pos));
        let mut map = l.graph.feature_map(n, l.group);
        map.add(l.x, a);
        map.add(l.y, 1.0);
        map.add(l.x, c);
        map.list(l.x).insert(1, b);

        let tags: Vec<usize> = map.entries().iter().map(|e| e.feature).collect();
        assert_eq!(tags, vec![l.x, l.y, l.x, l.x]);
        assert_eq!(map.list(l.x).nodes(), vec![a, b, c]);
        assert_eq!(l.graph.container(b), Some(n));
        assert_eq!(l.graph.containing_feature(b), Some(l.x));
    }

    #[test]
    fn test_member_remove_unlinks_and_reports_member_position() {
        let mut l = line(GraphConfig::default());
        let n = l.graph.create(l.line);
        let (a, b) = (l.graph.create(l.pos), l.graph.create(l.pos));
        {
            let mut map = l.graph.feature_map(n, l.group);
            map.add(l.y, 0.5);
            map.list(l.x).extend([a, b]);
        }
        let recorder = Recorder::new();
        l.graph.observe(n, recorder.clone());

        let removed = l.graph.feature_map(n, l.group).list(l.x).remove(1);
        assert_eq!(removed, Value::Node(b));
        assert_eq!(l.graph.container(b), None);

        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].feature, l.x);
        assert_eq!(events[0].kind, EventKind::Remove);
        assert_eq!(events[0].position, Some(1));
    }

    #[test]
    fn test_member_remove_value() {
        let mut l = line(GraphConfig::default());
        let n = l.graph.create(l.line);
        let (a, b) = (l.graph.create(l.pos), l.graph.create(l.pos));
        let mut map = l.graph.feature_map(n, l.group);
        map.add(l.x, a);
        map.add(l.y, 2.0);
        map.add(l.x, b);

        let mut xs = map.list(l.x);
        assert!(xs.remove_value(&Value::Node(a)));
        assert!(!xs.remove_value(&Value::Node(a)));
        assert_eq!(xs.nodes(), vec![b]);
        assert!(map.list(l.y).remove_value(&Value::Double(2.0)));
        assert_eq!(map.len(), 1);
        assert_eq!(l.graph.container(a), None);
        assert_eq!(l.graph.container(b), Some(n));
    }

    #[test]
    fn test_singleton_member_enforced() {
        let mut l = line(GraphConfig::default());
        let n = l.graph.create(l.line);
        let mut map = l.graph.feature_map(n, l.group);
        map.add(l.y, 1.0);
        map.add(l.label, "first");
        map.add(l.label, "second");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(l.label, false), Value::from("second"));
    }

    #[test]
    fn test_singleton_member_permissive() {
        let config = GraphConfig::default().with_group_policy(GroupMemberPolicy::Permissive);
        let mut l = line(config);
        let n = l.graph.create(l.line);
        let mut map = l.graph.feature_map(n, l.group);
        map.add(l.label, "first");
        map.add(l.label, "second");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(l.label, false), Value::from("first"));
    }

    #[test]
    fn test_reflective_access_through_members() {
        let mut l = line(GraphConfig::default());
        let n = l.graph.create(l.line);
        l.graph.set(n, l.label, "tag");
        l.graph.set(n, l.y, Value::List(vec![Value::Double(1.0), Value::Double(2.0)]));
        assert_eq!(l.graph.get(n, l.label), Value::from("tag"));
        assert!(l.graph.is_set(n, l.y));
        assert!(!l.graph.is_set(n, l.x));

        l.graph.unset(n, l.label);
        assert_eq!(l.graph.get(n, l.label), Value::Null);
        let entries = l.graph.get(n, l.group);
        assert_eq!(entries.as_entries().map(<[GroupEntry]>::len), Some(2));
    }

    #[test]
    fn test_foreign_member_rejected() {
        let mut l = line(GraphConfig::default());
        let n = l.graph.create(l.line);
        let mut map = l.graph.feature_map(n, l.group);
        assert!(matches!(
            map.try_add(l.group, Value::Int(1)),
            Err(ModelError::NotGroupMember { .. })
        ));
        assert!(matches!(
            map.try_add(l.y, Value::from("x")),
            Err(ModelError::TypeMismatch { .. })
        ));
    }
}
