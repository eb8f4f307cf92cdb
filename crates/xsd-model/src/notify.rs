//! Notification Channel
//!
//! Structural mutations produce [`Notification`] records. A mutating
//! operation collects them in a [`NotificationChain`] while it detaches and
//! attaches nodes, and the graph dispatches the chain to observers only
//! once the operation has completed, so an observer never sees a
//! half-applied change.
//!
//! When nothing observes the affected node (directly, or through a tree
//! observer on one of its ancestors) no record is even constructed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::value::{NodeId, Value};

/// Kind of structural change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Single value assigned (or list element replaced)
    Set,
    /// Unsettable feature returned to its default
    Unset,
    /// One element added to a list
    Add,
    /// One element removed from a list
    Remove,
    /// Several elements added in one operation
    AddMany,
    /// Several elements removed in one operation
    RemoveMany,
    /// Element moved within a list
    Move,
    /// Proxy replaced by the node it stands for
    Resolve,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Set => "SET",
            EventKind::Unset => "UNSET",
            EventKind::Add => "ADD",
            EventKind::Remove => "REMOVE",
            EventKind::AddMany => "ADD_MANY",
            EventKind::RemoveMany => "REMOVE_MANY",
            EventKind::Move => "MOVE",
            EventKind::Resolve => "RESOLVE",
        };
        f.write_str(name)
    }
}

/// Record of one structural change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Node whose feature changed
    pub notifier: NodeId,
    /// Index of the changed feature
    pub feature: usize,
    /// Kind of change
    pub kind: EventKind,
    /// Previous value (`List` for REMOVE_MANY, source index for MOVE)
    pub old_value: Value,
    /// New value (`List` for ADD_MANY)
    pub new_value: Value,
    /// List position, for list events
    pub position: Option<usize>,
    /// For unsettable features: the change flipped the "is set" state
    pub set_state_changed: bool,
}

impl Notification {
    /// Create a notification
    pub fn new(
        notifier: NodeId,
        feature: usize,
        kind: EventKind,
        old_value: Value,
        new_value: Value,
    ) -> Self {
        Self {
            notifier,
            feature,
            kind,
            old_value,
            new_value,
            position: None,
            set_state_changed: false,
        }
    }

    /// Attach a list position
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Mark the change as flipping the unsettable "is set" state
    pub fn with_set_state_changed(mut self, changed: bool) -> Self {
        self.set_state_changed = changed;
        self
    }

    /// A SET whose old and new values are equal
    pub fn is_touch(&self) -> bool {
        self.kind == EventKind::Set && self.old_value == self.new_value
    }

    /// Fold `next` into `self` when both are plain SETs of the same feature
    fn merge(&mut self, next: &Notification) -> bool {
        let mergeable = self.kind == EventKind::Set
            && next.kind == EventKind::Set
            && self.notifier == next.notifier
            && self.feature == next.feature
            && self.position.is_none()
            && next.position.is_none();
        if mergeable {
            self.new_value = next.new_value.clone();
            self.set_state_changed |= next.set_state_changed;
        }
        mergeable
    }
}

/// Ordered batch of notifications awaiting dispatch
#[derive(Debug, Default, Clone)]
pub struct NotificationChain {
    events: Vec<Notification>,
}

impl NotificationChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notification, coalescing consecutive SETs of one feature
    pub fn record(&mut self, notification: Notification) {
        if let Some(last) = self.events.last_mut() {
            if last.merge(&notification) {
                return;
            }
        }
        self.events.push(notification);
    }

    /// Append every notification of `other`, in order
    pub fn append(&mut self, other: NotificationChain) {
        for notification in other.events {
            self.record(notification);
        }
    }

    /// Number of pending notifications
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pending notifications, in recording order
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.events.iter()
    }

    /// Consume the chain
    pub fn into_vec(self) -> Vec<Notification> {
        self.events
    }
}

/// Receives notifications from observed nodes
pub trait Observer {
    /// Called once per dispatched notification
    fn notify(&mut self, notification: &Notification);
}

impl<F> Observer for F
where
    F: FnMut(&Notification),
{
    fn notify(&mut self, notification: &Notification) {
        self(notification)
    }
}

/// Observer that keeps every notification it receives.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the graph.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Notification>>>,
}

impl Recorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded notifications
    pub fn events(&self) -> Vec<Notification> {
        self.events.borrow().clone()
    }

    /// Number of recorded notifications
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Remove and return the recorded notifications
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl Observer for Recorder {
    fn notify(&mut self, notification: &Notification) {
        self.events.borrow_mut().push(notification.clone());
    }
}

/// Handle returned when an observer is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Registration {
    id: ObserverId,
    /// Also receives events from every node contained under the target
    deep: bool,
    observer: Box<dyn Observer>,
}

/// Observers by target node
#[derive(Default)]
pub(crate) struct ObserverTable {
    next_id: u64,
    by_node: FxHashMap<NodeId, Vec<Registration>>,
}

impl ObserverTable {
    pub(crate) fn register(
        &mut self,
        node: NodeId,
        deep: bool,
        observer: Box<dyn Observer>,
    ) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.by_node
            .entry(node)
            .or_default()
            .push(Registration { id, deep, observer });
        id
    }

    pub(crate) fn unregister(&mut self, id: ObserverId) -> bool {
        let mut emptied = None;
        let mut found = false;
        for (node, registrations) in self.by_node.iter_mut() {
            if let Some(pos) = registrations.iter().position(|r| r.id == id) {
                registrations.remove(pos);
                found = true;
                if registrations.is_empty() {
                    emptied = Some(*node);
                }
                break;
            }
        }
        if let Some(node) = emptied {
            self.by_node.remove(&node);
        }
        found
    }

    pub(crate) fn forget_node(&mut self, node: NodeId) {
        self.by_node.remove(&node);
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    pub(crate) fn observes(&self, node: NodeId) -> bool {
        self.by_node.contains_key(&node)
    }

    pub(crate) fn observes_tree(&self, node: NodeId) -> bool {
        self.by_node
            .get(&node)
            .is_some_and(|regs| regs.iter().any(|r| r.deep))
    }

    /// Deliver to the notifier's observers, then to tree observers on its
    /// ancestors (nearest first). Returns the number of deliveries.
    pub(crate) fn deliver(&mut self, notification: &Notification, ancestors: &[NodeId]) -> usize {
        let mut delivered = 0;
        if let Some(regs) = self.by_node.get_mut(&notification.notifier) {
            for reg in regs.iter_mut() {
                reg.observer.notify(notification);
                delivered += 1;
            }
        }
        for ancestor in ancestors {
            if let Some(regs) = self.by_node.get_mut(ancestor) {
                for reg in regs.iter_mut().filter(|r| r.deep) {
                    reg.observer.notify(notification);
                    delivered += 1;
                }
            }
        }
        delivered
    }
}

impl fmt::Debug for ObserverTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverTable")
            .field("nodes", &self.by_node.len())
            .finish()
    }
}
