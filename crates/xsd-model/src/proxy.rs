//! Proxy resolution
//!
//! A proxy is a node standing in for an object that has not been loaded
//! yet; it carries only the URI of its target. Plain reads never resolve
//! proxies. [`ModelGraph::get_resolved`] asks the installed
//! [`ProxyResolver`] and, for cross references, swaps the resolved node
//! into the slot.

use std::sync::Arc;

use crate::error::ModelResult;
use crate::graph::ModelGraph;
use crate::node::Slot;
use crate::notify::{EventKind, Notification, NotificationChain};
use crate::registry::FeatureDescriptor;
use crate::value::{NodeId, Value};

/// Maps proxy URIs to loaded nodes
pub trait ProxyResolver {
    /// Node the URI designates, if it can be found
    fn resolve(&mut self, graph: &ModelGraph, uri: &str) -> Option<NodeId>;
}

impl<F> ProxyResolver for F
where
    F: FnMut(&ModelGraph, &str) -> Option<NodeId>,
{
    fn resolve(&mut self, graph: &ModelGraph, uri: &str) -> Option<NodeId> {
        self(graph, uri)
    }
}

impl ModelGraph {
    /// Install the resolver used by [`ModelGraph::resolve`]
    pub fn set_resolver(&mut self, resolver: impl ProxyResolver + 'static) {
        self.resolver = Some(Box::new(resolver));
    }

    /// Turn `node` into a proxy for `uri`, or back into a regular node
    pub fn set_proxy_uri(&mut self, node: NodeId, uri: Option<&str>) {
        match self.node_mut(node) {
            Ok(data) => data.proxy_uri = uri.map(str::to_string),
            Err(e) => e.violated(),
        }
    }

    /// Target URI of a proxy
    pub fn proxy_uri(&self, node: NodeId) -> Option<&str> {
        self.node_ref(node).ok()?.proxy_uri.as_deref()
    }

    /// Check if `node` is an unresolved proxy
    pub fn is_proxy(&self, node: NodeId) -> bool {
        self.proxy_uri(node).is_some()
    }

    /// Resolved target of `node`; the node itself if it is not a proxy or
    /// cannot be resolved
    pub fn resolve(&mut self, node: NodeId) -> NodeId {
        let Some(uri) = self.proxy_uri(node).map(str::to_string) else {
            return node;
        };
        let Some(mut resolver) = self.resolver.take() else {
            return node;
        };
        let resolved = resolver.resolve(self, &uri);
        self.resolver = Some(resolver);

        match resolved {
            Some(target) if target != node && self.contains(target) => {
                tracing::trace!("Resolved proxy {} ({}) to {}", node, uri, target);
                target
            }
            _ => node,
        }
    }

    /// Value of a feature with proxies resolved. Resolved cross references
    /// replace the proxy in the slot and notify a RESOLVE.
    pub fn get_resolved(&mut self, node: NodeId, feature: usize) -> Value {
        self.try_get_resolved(node, feature)
            .unwrap_or_else(|e| e.violated())
    }

    /// Value of a feature with proxies resolved
    pub fn try_get_resolved(&mut self, node: NodeId, feature: usize) -> ModelResult<Value> {
        let value = self.try_get(node, feature)?;
        let package = Arc::clone(self.package());
        let desc = self.descriptor(&package, node, feature)?;
        let writable =
            desc.kind.is_reference() && !desc.is_containment() && !desc.is_group_member();

        let mut chain = NotificationChain::new();
        let resolved = match value {
            Value::Node(proxy) => {
                let target = self.resolve_for(desc, proxy);
                if writable && target != proxy {
                    self.replace_proxy(node, feature, None, proxy, target, &mut chain)?;
                }
                Value::Node(target)
            }
            Value::List(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for (pos, item) in items.into_iter().enumerate() {
                    match item {
                        Value::Node(proxy) => {
                            let target = self.resolve_for(desc, proxy);
                            if writable && target != proxy {
                                self.replace_proxy(
                                    node,
                                    feature,
                                    Some(pos),
                                    proxy,
                                    target,
                                    &mut chain,
                                )?;
                            }
                            resolved.push(Value::Node(target));
                        }
                        other => resolved.push(other),
                    }
                }
                Value::List(resolved)
            }
            other => other,
        };
        self.dispatch(chain);
        Ok(resolved)
    }

    /// Resolve `proxy` for a read of `desc`. A target whose class does not
    /// conform to the feature's type is not accepted and the proxy stays.
    fn resolve_for(&mut self, desc: &FeatureDescriptor, proxy: NodeId) -> NodeId {
        let target = self.resolve(proxy);
        if target == proxy {
            return proxy;
        }
        match self.check_value(desc, &Value::Node(target)) {
            Ok(()) => target,
            Err(e) => {
                tracing::debug!("Rejected resolution of proxy {} to {}: {}", proxy, target, e);
                proxy
            }
        }
    }

    fn replace_proxy(
        &mut self,
        node: NodeId,
        feature: usize,
        position: Option<usize>,
        proxy: NodeId,
        target: NodeId,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(node);
        match (&mut self.node_mut(node)?.slots[feature], position) {
            (Slot::Single { value, .. }, None) => *value = Value::Node(target),
            // Reference lists stay unique: a proxy whose target is already listed stays as is
            (Slot::Many(items), Some(pos))
                if pos < items.len() && !items.contains(&Value::Node(target)) =>
            {
                items[pos] = Value::Node(target);
            }
            _ => return Ok(()),
        }
        if notify {
            let mut notification = Notification::new(
                node,
                feature,
                EventKind::Resolve,
                Value::Node(proxy),
                Value::Node(target),
            );
            if let Some(pos) = position {
                notification = notification.at(pos);
            }
            chain.record(notification);
        }
        Ok(())
    }
}
