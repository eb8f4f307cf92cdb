//! Object graph
//!
//! [`ModelGraph`] owns every node of one document in a generational arena
//! and implements the reflective structural-feature contract: `get`, `set`,
//! `unset` and `is_set` addressed by feature index. Containment, lists,
//! choice groups and proxies are implemented in their own modules as
//! further `impl ModelGraph` blocks.
//!
//! Every fallible operation comes in two forms. `try_*` returns a
//! [`ModelResult`]; the plain form treats an error as a broken contract
//! (wrong feature index, ill-typed value, stale node) and panics.

use std::sync::Arc;

use crate::config::GraphConfig;
use crate::error::{ModelError, ModelResult};
use crate::node::{ArenaEntry, Node, Slot};
use crate::notify::{
    EventKind, Notification, NotificationChain, Observer, ObserverId, ObserverTable,
};
use crate::proxy::ProxyResolver;
use crate::registry::{ClassDescriptor, FeatureDescriptor, FeatureKind, Package};
use crate::value::{ClassId, NodeId, Value, ValueType};

/// Arena of typed object nodes sharing one [`Package`]
pub struct ModelGraph {
    package: Arc<Package>,
    pub(crate) entries: Vec<ArenaEntry>,
    free: Vec<u32>,
    live: usize,
    pub(crate) observers: ObserverTable,
    batch_depth: usize,
    pending: NotificationChain,
    pub(crate) resolver: Option<Box<dyn ProxyResolver>>,
    config: GraphConfig,
}

impl ModelGraph {
    /// Create an empty graph with the default configuration
    pub fn new(package: Arc<Package>) -> Self {
        Self::with_config(package, GraphConfig::default())
    }

    /// Create an empty graph
    pub fn with_config(package: Arc<Package>, config: GraphConfig) -> Self {
        Self {
            package,
            entries: Vec::new(),
            free: Vec::new(),
            live: 0,
            observers: ObserverTable::default(),
            batch_depth: 0,
            pending: NotificationChain::new(),
            resolver: None,
            config,
        }
    }

    /// The package every node of this graph instantiates
    #[inline]
    pub fn package(&self) -> &Arc<Package> {
        &self.package
    }

    /// Active configuration
    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if the graph holds no live node
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Check if `node` refers to a live node of this graph
    pub fn contains(&self, node: NodeId) -> bool {
        self.node_ref(node).is_ok()
    }

    /// Ids of all live nodes, in arena order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().enumerate().filter_map(|(index, entry)| {
            entry.node.as_ref().map(|_| NodeId {
                index: index as u32,
                generation: entry.generation,
            })
        })
    }

    // ===== Factory =====

    /// Instantiate a concrete class
    pub fn create(&mut self, class: ClassId) -> NodeId {
        self.try_create(class).unwrap_or_else(|e| e.violated())
    }

    /// Instantiate a concrete class, reporting unknown or abstract classes
    pub fn try_create(&mut self, class: ClassId) -> ModelResult<NodeId> {
        let package = Arc::clone(&self.package);
        let descriptor = package.class(class).ok_or_else(|| ModelError::UnknownClass {
            name: class.to_string(),
        })?;
        if descriptor.is_abstract {
            return Err(ModelError::AbstractClass {
                name: descriptor.name.clone(),
            });
        }

        let node = Node::new(descriptor);
        let id = match self.free.pop() {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                entry.node = Some(node);
                NodeId {
                    index,
                    generation: entry.generation,
                }
            }
            None => {
                let index = self.entries.len() as u32;
                self.entries.push(ArenaEntry {
                    generation: 0,
                    node: Some(node),
                });
                NodeId { index, generation: 0 }
            }
        };
        self.live += 1;
        tracing::trace!("Created {} {}", descriptor.name, id);
        Ok(id)
    }

    /// Instantiate a concrete class by name
    pub fn try_create_by_name(&mut self, name: &str) -> ModelResult<NodeId> {
        let class = self
            .package
            .class_by_name(name)
            .map(|c| c.id)
            .ok_or_else(|| ModelError::UnknownClass {
                name: name.to_string(),
            })?;
        self.try_create(class)
    }

    /// Class of a live node
    pub fn class_of(&self, node: NodeId) -> ClassId {
        self.try_class_of(node).unwrap_or_else(|e| e.violated())
    }

    /// Class of a node, or `StaleNode`
    pub fn try_class_of(&self, node: NodeId) -> ModelResult<ClassId> {
        self.node_ref(node).map(|n| n.class)
    }

    /// Class metadata of a live node
    pub fn class_descriptor(&self, node: NodeId) -> ModelResult<&ClassDescriptor> {
        let class = self.try_class_of(node)?;
        self.package.class(class).ok_or_else(|| ModelError::UnknownClass {
            name: class.to_string(),
        })
    }

    /// Index of the feature called `name` on the node's class
    pub fn feature_index(&self, node: NodeId, name: &str) -> ModelResult<usize> {
        let class = self.class_descriptor(node)?;
        class
            .feature_index(name)
            .ok_or_else(|| ModelError::UnknownFeature {
                class: class.name.clone(),
                feature: name.to_string(),
            })
    }

    // ===== Reflective access =====

    /// Current value of a feature.
    ///
    /// Multi-valued features read back as a [`Value::List`] snapshot and
    /// choice groups as [`Value::Entries`]; use [`ModelGraph::list`] and
    /// [`ModelGraph::feature_map`] for in-place mutation. References are
    /// returned unresolved, see [`ModelGraph::get_resolved`].
    pub fn get(&self, node: NodeId, feature: usize) -> Value {
        self.try_get(node, feature).unwrap_or_else(|e| e.violated())
    }

    /// Current value of a feature
    pub fn try_get(&self, node: NodeId, feature: usize) -> ModelResult<Value> {
        let package = Arc::clone(&self.package);
        let desc = self.descriptor(&package, node, feature)?;
        let data = self.node_ref(node)?;

        if let Some(group) = desc.group {
            let members = self.member_values(data, group, feature);
            return Ok(if desc.is_many() {
                Value::List(members.cloned().collect())
            } else {
                members.cloned().next().unwrap_or(Value::Null)
            });
        }

        let value = match &data.slots[feature] {
            Slot::Single { value: Value::Node(id), .. } if !self.contains(*id) => Value::Null,
            Slot::Single { value, .. } => value.clone(),
            Slot::Many(items) => Value::List(items.clone()),
            Slot::Group(entries) => Value::Entries(entries.clone().unwrap_or_default()),
            Slot::Member => Value::Null,
        };
        Ok(value)
    }

    /// Current value of the feature called `name`
    pub fn get_by_name(&self, node: NodeId, name: &str) -> ModelResult<Value> {
        let feature = self.feature_index(node, name)?;
        self.try_get(node, feature)
    }

    /// Assign a feature.
    ///
    /// Single-valued features take a scalar, a node or `Null`.
    /// Multi-valued features take a [`Value::List`] that replaces the whole
    /// content, choice groups a [`Value::Entries`].
    pub fn set(&mut self, node: NodeId, feature: usize, value: impl Into<Value>) {
        if let Err(e) = self.try_set(node, feature, value.into()) {
            e.violated()
        }
    }

    /// Assign a feature
    pub fn try_set(&mut self, node: NodeId, feature: usize, value: Value) -> ModelResult<()> {
        let package = Arc::clone(&self.package);
        let desc = self.descriptor(&package, node, feature)?;

        if desc.is_group_member() {
            return self.set_group_member(node, desc, value);
        }

        match desc.kind {
            FeatureKind::Attribute | FeatureKind::Reference => {
                self.check_value(desc, &value)?;
                let mut chain = NotificationChain::new();
                self.set_single(node, desc, value, &mut chain)?;
                self.dispatch(chain);
                Ok(())
            }
            FeatureKind::Containment => {
                self.check_value(desc, &value)?;
                self.set_containment(node, desc, value)
            }
            FeatureKind::ManyAttribute
            | FeatureKind::ManyContainment
            | FeatureKind::ManyReference => {
                let items = match value {
                    Value::List(items) => items,
                    Value::Null => Vec::new(),
                    other => return Err(self.mismatch(desc, &other)),
                };
                self.check_elements(node, desc, &items)?;
                let mut chain = NotificationChain::new();
                self.list_clear(node, desc, &mut chain)?;
                self.list_insert_all(node, desc, None, items, &mut chain)?;
                self.dispatch(chain);
                Ok(())
            }
            FeatureKind::Group => {
                let entries = match value {
                    Value::Entries(entries) => entries,
                    Value::Null => Vec::new(),
                    other => return Err(self.mismatch(desc, &other)),
                };
                self.replace_group(node, desc, entries)
            }
        }
    }

    /// Assign the feature called `name`
    pub fn set_by_name(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<Value>,
    ) -> ModelResult<()> {
        let feature = self.feature_index(node, name)?;
        self.try_set(node, feature, value.into())
    }

    /// Return a feature to its default.
    ///
    /// Unsettable features go back to the "not set" state with an UNSET
    /// notification. Other single-valued features are assigned their
    /// default, and multi-valued features and groups are cleared.
    pub fn unset(&mut self, node: NodeId, feature: usize) {
        if let Err(e) = self.try_unset(node, feature) {
            e.violated()
        }
    }

    /// Return a feature to its default
    pub fn try_unset(&mut self, node: NodeId, feature: usize) -> ModelResult<()> {
        let package = Arc::clone(&self.package);
        let desc = self.descriptor(&package, node, feature)?;

        if desc.is_group_member() {
            if desc.is_many() {
                return self.feature_map_of(node, desc)?.list(feature).try_clear();
            }
            return self.set_group_member(node, desc, Value::Null);
        }

        match desc.kind {
            FeatureKind::Group => self.try_feature_map(node, feature)?.try_clear(),
            kind if kind.is_many() => {
                let mut chain = NotificationChain::new();
                self.list_clear(node, desc, &mut chain)?;
                self.dispatch(chain);
                Ok(())
            }
            _ if desc.unsettable => {
                let notify = self.notification_required(node);
                let mut chain = NotificationChain::new();
                let (old, was_set) = match &mut self.node_mut(node)?.slots[feature] {
                    Slot::Single { value, is_set } => (
                        std::mem::replace(value, desc.default.clone()),
                        std::mem::replace(is_set, false),
                    ),
                    _ => return Err(kind_mismatch(desc, "unset")),
                };
                if desc.is_containment() {
                    if let Some(child) = old.as_node() {
                        self.unlink(child);
                    }
                }
                if notify {
                    chain.record(
                        Notification::new(
                            node,
                            feature,
                            EventKind::Unset,
                            old,
                            desc.default.clone(),
                        )
                        .with_set_state_changed(was_set),
                    );
                }
                self.dispatch(chain);
                Ok(())
            }
            _ => self.try_set(node, feature, desc.default.clone()),
        }
    }

    /// Whether a feature holds a value worth serializing.
    ///
    /// Unsettable features report their explicit-assignment flag, other
    /// attributes whether they differ from the default, references whether
    /// they are non-null, lists and groups whether they are non-empty.
    pub fn is_set(&self, node: NodeId, feature: usize) -> bool {
        self.try_is_set(node, feature).unwrap_or_else(|e| e.violated())
    }

    /// Whether a feature holds a value worth serializing
    pub fn try_is_set(&self, node: NodeId, feature: usize) -> ModelResult<bool> {
        let package = Arc::clone(&self.package);
        let desc = self.descriptor(&package, node, feature)?;
        let data = self.node_ref(node)?;

        if let Some(group) = desc.group {
            return Ok(self.member_values(data, group, feature).next().is_some());
        }

        let set = match &data.slots[feature] {
            Slot::Single { is_set, .. } if desc.unsettable => *is_set,
            Slot::Single { value, .. } if desc.kind.is_reference() => {
                value.as_node().is_some_and(|id| self.contains(id))
            }
            Slot::Single { value, .. } => *value != desc.default,
            Slot::Many(items) => !items.is_empty(),
            Slot::Group(entries) => entries.as_ref().is_some_and(|e| !e.is_empty()),
            Slot::Member => false,
        };
        Ok(set)
    }

    // ===== Subscription =====

    /// Observe changes to the features of `node`
    pub fn observe(&mut self, node: NodeId, observer: impl Observer + 'static) -> ObserverId {
        if let Err(e) = self.node_ref(node) {
            e.violated()
        }
        self.observers.register(node, false, Box::new(observer))
    }

    /// Observe changes to `root` and to every node contained under it
    pub fn observe_tree(&mut self, root: NodeId, observer: impl Observer + 'static) -> ObserverId {
        if let Err(e) = self.node_ref(root) {
            e.violated()
        }
        self.observers.register(root, true, Box::new(observer))
    }

    /// Remove an observer. Returns false if it was already removed.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    /// Check if a change to `node` would reach any observer.
    ///
    /// Mutating operations test this before building a notification.
    pub fn notification_required(&self, node: NodeId) -> bool {
        if !self.config.deliver || self.observers.is_empty() {
            return false;
        }
        self.observers.observes(node)
            || self.ancestors(node).any(|a| self.observers.observes_tree(a))
    }

    /// Start an explicit notification batch
    pub fn begin(&self) -> NotificationChain {
        NotificationChain::new()
    }

    /// Deliver a chain to observers in recording order.
    ///
    /// Inside [`ModelGraph::batch`] delivery is deferred to the end of the
    /// outermost batch.
    pub fn dispatch(&mut self, chain: NotificationChain) {
        if chain.is_empty() {
            return;
        }
        if self.batch_depth > 0 {
            self.pending.append(chain);
            return;
        }

        let events = chain.into_vec();
        let mut delivered = 0;
        for notification in &events {
            let ancestors: Vec<NodeId> = self.ancestors(notification.notifier).collect();
            delivered += self.observers.deliver(notification, &ancestors);
        }
        tracing::trace!("Dispatched {} notifications to {} observers", events.len(), delivered);
    }

    /// Run `f`, holding back every notification it produces until it returns
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let result = f(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            let pending = std::mem::take(&mut self.pending);
            self.dispatch(pending);
        }
        result
    }

    // ===== Internals =====

    pub(crate) fn node_ref(&self, id: NodeId) -> ModelResult<&Node> {
        self.entries
            .get(id.index as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.node.as_ref())
            .ok_or_else(|| ModelError::StaleNode {
                node: id.to_string(),
            })
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> ModelResult<&mut Node> {
        self.entries
            .get_mut(id.index as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.node.as_mut())
            .ok_or_else(|| ModelError::StaleNode {
                node: id.to_string(),
            })
    }

    /// Free a node's arena cell. Callers unlink it first.
    pub(crate) fn release(&mut self, id: NodeId) {
        if let Some(entry) = self.entries.get_mut(id.index as usize) {
            if entry.generation == id.generation && entry.node.take().is_some() {
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(id.index);
                self.live -= 1;
                self.observers.forget_node(id);
            }
        }
    }

    /// Feature descriptor for `feature` on the class of `node`
    pub(crate) fn descriptor<'p>(
        &self,
        package: &'p Package,
        node: NodeId,
        feature: usize,
    ) -> ModelResult<&'p FeatureDescriptor> {
        let class = self.try_class_of(node)?;
        lookup(package, class, feature)
    }

    /// Values of the group entries tagged with `member`
    pub(crate) fn member_values<'n>(
        &self,
        data: &'n Node,
        group: usize,
        member: usize,
    ) -> impl Iterator<Item = &'n Value> + 'n {
        let entries = match data.slots.get(group) {
            Some(Slot::Group(Some(entries))) => entries.as_slice(),
            _ => &[],
        };
        entries
            .iter()
            .filter(move |e| e.feature == member)
            .map(|e| &e.value)
    }

    /// Assign a single-valued attribute or cross reference
    pub(crate) fn set_single(
        &mut self,
        node: NodeId,
        desc: &FeatureDescriptor,
        value: Value,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(node);
        let (old, was_set) = match &mut self.node_mut(node)?.slots[desc.index] {
            Slot::Single { value: current, is_set } => (
                std::mem::replace(current, value.clone()),
                std::mem::replace(is_set, true),
            ),
            _ => return Err(kind_mismatch(desc, "set a single value")),
        };
        if notify {
            chain.record(
                Notification::new(node, desc.index, EventKind::Set, old, value)
                    .with_set_state_changed(desc.unsettable && !was_set),
            );
        }
        Ok(())
    }

    /// Check a single value against a feature's declared type
    pub(crate) fn check_value(&self, desc: &FeatureDescriptor, value: &Value) -> ModelResult<()> {
        match (desc.value_type, value) {
            (_, Value::Null) => Ok(()),
            (ValueType::Class(expected), Value::Node(id)) => {
                let actual = self.try_class_of(*id)?;
                if self.package.is_subclass_of(actual, expected) {
                    Ok(())
                } else {
                    Err(ModelError::TypeMismatch {
                        feature: desc.name.clone(),
                        expected: self.package.type_name(desc.value_type),
                        actual: self.package.type_name(ValueType::Class(actual)),
                    })
                }
            }
            (ty, v) if self.package.conforms_data(ty, v) => Ok(()),
            (_, v) => Err(self.mismatch(desc, v)),
        }
    }

    /// Check the elements about to be added to a list owned by `owner`
    pub(crate) fn check_elements(
        &self,
        owner: NodeId,
        desc: &FeatureDescriptor,
        items: &[Value],
    ) -> ModelResult<()> {
        for item in items {
            if item.is_null() {
                return Err(self.mismatch(desc, item));
            }
            self.check_value(desc, item)?;
            if desc.is_containment() {
                if let Some(child) = item.as_node() {
                    self.check_cycle(owner, child)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn mismatch(&self, desc: &FeatureDescriptor, value: &Value) -> ModelError {
        let expected = if desc.is_many() && desc.kind != FeatureKind::Group {
            format!("list of {}", self.package.type_name(desc.value_type))
        } else {
            self.package.type_name(desc.value_type)
        };
        ModelError::TypeMismatch {
            feature: desc.name.clone(),
            expected,
            actual: value.type_name().to_string(),
        }
    }
}

impl std::fmt::Debug for ModelGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGraph")
            .field("package", &self.package.name)
            .field("nodes", &self.live)
            .field("observers", &self.observers)
            .field("config", &self.config)
            .finish()
    }
}

/// Feature `index` of `class`, or `InvalidFeatureIndex`
pub(crate) fn lookup(
    package: &Package,
    class: ClassId,
    index: usize,
) -> ModelResult<&FeatureDescriptor> {
    let descriptor = package.class(class).ok_or_else(|| ModelError::UnknownClass {
        name: class.to_string(),
    })?;
    descriptor
        .feature(index)
        .ok_or_else(|| ModelError::InvalidFeatureIndex {
            class: descriptor.name.clone(),
            index,
            count: descriptor.feature_count(),
        })
}

pub(crate) fn kind_mismatch(desc: &FeatureDescriptor, operation: &str) -> ModelError {
    ModelError::KindMismatch {
        feature: desc.name.clone(),
        kind: desc.kind.to_string(),
        operation: operation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FeatureSpec;
    use crate::Recorder;

    struct Fixture {
        graph: ModelGraph,
        point: ClassId,
        item: ClassId,
    }

    fn fixture() -> Fixture {
        let mut b = Package::builder("t", "urn:t");
        let mut item = b.class("Item");
        item.feature(FeatureSpec::attribute("label", ValueType::String));
        let item = item.finish();

        let mut point = b.class("Point");
        point.feature(
            FeatureSpec::attribute("radius", ValueType::Double)
                .default_value(0.0)
                .unsettable(),
        );
        point.feature(FeatureSpec::attribute("name", ValueType::String));
        point.feature(FeatureSpec::many_attribute("values", ValueType::Double));
        point.feature(FeatureSpec::reference("target", item));
        let point = point.finish();

        let mut abs = b.class("Abstract").abstract_class();
        abs.feature(FeatureSpec::attribute("x", ValueType::Int));
        abs.finish();

        Fixture {
            graph: ModelGraph::new(Arc::new(b.build().unwrap())),
            point,
            item,
        }
    }

    #[test]
    fn test_create_and_reuse_slot() {
        let mut fx = fixture();
        let a = fx.graph.create(fx.point);
        assert_eq!(fx.graph.len(), 1);
        assert_eq!(fx.graph.class_of(a), fx.point);

        fx.graph.release(a);
        assert!(!fx.graph.contains(a));
        let b = fx.graph.create(fx.point);
        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(matches!(fx.graph.try_get(a, 0), Err(ModelError::StaleNode { .. })));
    }

    #[test]
    fn test_abstract_and_unknown_classes() {
        let mut fx = fixture();
        assert!(matches!(
            fx.graph.try_create_by_name("Abstract"),
            Err(ModelError::AbstractClass { .. })
        ));
        assert!(matches!(
            fx.graph.try_create_by_name("Nope"),
            Err(ModelError::UnknownClass { .. })
        ));
    }

    #[test]
    fn test_set_and_get_by_name() {
        let mut fx = fixture();
        let a = fx.graph.create(fx.point);
        fx.graph.set_by_name(a, "name", "p1").unwrap();
        assert_eq!(fx.graph.get_by_name(a, "name").unwrap(), Value::from("p1"));
        assert!(fx.graph.is_set(a, 1));
        assert!(matches!(
            fx.graph.get_by_name(a, "nope"),
            Err(ModelError::UnknownFeature { .. })
        ));
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let mut fx = fixture();
        let a = fx.graph.create(fx.point);
        let err = fx.graph.try_set(a, 0, Value::from("wide")).unwrap_err();
        assert!(matches!(err, ModelError::TypeMismatch { .. }));

        let other = fx.graph.create(fx.point);
        let err = fx.graph.try_set(a, 3, Value::Node(other)).unwrap_err();
        assert!(matches!(err, ModelError::TypeMismatch { .. }));
    }

    #[test]
    #[should_panic(expected = "object model contract violation")]
    fn test_invalid_index_panics() {
        let mut fx = fixture();
        let a = fx.graph.create(fx.point);
        fx.graph.set(a, 17, 1.0);
    }

    #[test]
    fn test_many_attribute_set_replaces_content() {
        let mut fx = fixture();
        let a = fx.graph.create(fx.point);
        fx.graph.set(a, 2, Value::List(vec![Value::Double(1.0), Value::Double(2.0)]));
        fx.graph.set(a, 2, Value::List(vec![Value::Double(3.0)]));
        assert_eq!(fx.graph.get(a, 2), Value::List(vec![Value::Double(3.0)]));
        fx.graph.unset(a, 2);
        assert!(!fx.graph.is_set(a, 2));
    }

    #[test]
    fn test_reference_is_set_follows_liveness() {
        let mut fx = fixture();
        let a = fx.graph.create(fx.point);
        let target = fx.graph.create(fx.item);
        fx.graph.set(a, 3, target);
        assert!(fx.graph.is_set(a, 3));
        fx.graph.release(target);
        assert!(!fx.graph.is_set(a, 3));
        assert_eq!(fx.graph.get(a, 3), Value::Null);
    }

    #[test]
    fn test_no_notification_without_observers() {
        let mut fx = fixture();
        let a = fx.graph.create(fx.point);
        assert!(!fx.graph.notification_required(a));
        let recorder = Recorder::new();
        fx.graph.observe(a, recorder.clone());
        assert!(fx.graph.notification_required(a));
        fx.graph.set(a, 1, "x");
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_delivery_switched_off() {
        let mut fx = fixture();
        fx.graph.config.deliver = false;
        let a = fx.graph.create(fx.point);
        let recorder = Recorder::new();
        fx.graph.observe(a, recorder.clone());
        fx.graph.set(a, 1, "x");
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_batch_defers_and_coalesces() {
        let mut fx = fixture();
        let a = fx.graph.create(fx.point);
        let recorder = Recorder::new();
        fx.graph.observe(a, recorder.clone());

        fx.graph.batch(|g| {
            g.set(a, 1, "first");
            g.batch(|g| g.set(a, 1, "second"));
            assert!(recorder.is_empty());
        });

        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].old_value, Value::Null);
        assert_eq!(events[0].new_value, Value::from("second"));
    }
}
