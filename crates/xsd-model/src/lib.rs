//! XSD Object Model
//!
//! A reflective, schema-driven object graph. A [`Package`] describes the
//! classes of one schema and their indexed features; a [`ModelGraph`]
//! holds typed nodes of those classes and offers:
//!
//! - reflective `get` / `set` / `unset` / `is_set` by feature index
//! - exclusive containment with detach-before-attach reassignment
//! - multi-valued features ([`FeatureList`]) and ordered choice groups
//!   ([`FeatureMapView`], [`MemberView`])
//! - batched change notifications to node and tree observers
//! - proxy resolution, validation and a textual debug dump
//!
//! ```ignore
//! let mut graph = ModelGraph::new(package);
//! let point = graph.create(point_class);
//! let pos = graph.create(position_class);
//! graph.set(point, POS, pos);
//! assert_eq!(graph.container(pos), Some(point));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod feature_map;
pub mod graph;
pub mod list;
pub mod notify;
pub mod proxy;
pub mod registry;
pub mod validate;
pub mod value;

mod containment;
mod display;
mod factory;
mod node;

pub use config::{GraphConfig, GroupMemberPolicy};
pub use display::NodeDisplay;
pub use error::{ModelError, ModelResult};
pub use feature_map::{FeatureMapView, MemberView};
pub use graph::ModelGraph;
pub use list::FeatureList;
pub use notify::{EventKind, Notification, NotificationChain, Observer, ObserverId, Recorder};
pub use proxy::ProxyResolver;
pub use registry::{
    ClassBuilder, ClassDescriptor, EnumDescriptor, FeatureDescriptor, FeatureKind, FeatureSpec,
    Package, PackageBuilder,
};
pub use validate::{validate, Check, Diagnostic, Severity};
pub use value::{ClassId, EnumId, EnumValue, GroupEntry, NodeId, Value, ValueType};
