//! Feature Descriptor Registry
//!
//! Schema knowledge as data: packages hold classes, classes hold their
//! ordered feature tables, and features carry the cardinality, containment
//! and default-value metadata the graph dispatches on.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut b = Package::builder("gml", "http://www.opengis.net/gml");
//! let mut point = b.class("PointType");
//! let pos = point.feature(FeatureSpec::containment("pos", direct_position));
//! let point = point.finish();
//! let package = Arc::new(b.build()?);
//! ```

mod class;
mod descriptor;
mod package;

pub use class::{ClassBuilder, ClassDescriptor};
pub use descriptor::{FeatureDescriptor, FeatureKind, FeatureSpec};
pub use package::{EnumDescriptor, Package, PackageBuilder};
