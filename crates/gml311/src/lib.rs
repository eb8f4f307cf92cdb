//! GML 3.1.1 object model
//!
//! The Geography Markup Language 3.1.1 schema as an `xsd-model` package,
//! with typed handles for its classes. The package is built once per
//! process; graphs created from [`schema()`] share it.
//!
//! ```ignore
//! use gml311::prelude::*;
//!
//! let mut graph = gml311::schema().graph();
//! let point = Point::create(&mut graph);
//! let pos = DirectPosition::create(&mut graph);
//! pos.set_value(&mut graph, vec![4.5, 52.1]);
//! point.set_pos(&mut graph, Some(pos));
//! point.set_srs_name(&mut graph, Some("EPSG:4326"));
//! ```

pub mod enums;
pub mod schema;
pub mod types;

pub use enums::{ActuateType, CurveInterpolationType, ShowType, TypeType};
pub use schema::{build_schema, schema, Classes, Enums, Gml311Schema, NS_URI};
pub use types::circle::{Center, CircleByCenterPoint};
pub use types::code::Code;
pub use types::coord::Coord;
pub use types::envelope::Envelope;
pub use types::geometry::{AnyGeometry, Geometry, GmlObject, SrsReference};
pub use types::line_string::{ControlPoint, LineString};
pub use types::location::LocationProperty;
pub use types::measure::Measure;
pub use types::point::{MultiPoint, Point, PointProperty};
pub use types::position::DirectPosition;
pub use types::xlink::SimpleLink;
pub use types::{GmlClass, GmlNode};

/// Handles and capability traits in one import
pub mod prelude {
    pub use crate::enums::{ActuateType, CurveInterpolationType, ShowType, TypeType};
    pub use crate::types::circle::{Center, CircleByCenterPoint};
    pub use crate::types::code::Code;
    pub use crate::types::coord::Coord;
    pub use crate::types::envelope::Envelope;
    pub use crate::types::geometry::{AnyGeometry, Geometry, GmlObject, SrsReference};
    pub use crate::types::line_string::{ControlPoint, LineString};
    pub use crate::types::location::LocationProperty;
    pub use crate::types::measure::Measure;
    pub use crate::types::point::{MultiPoint, Point, PointProperty};
    pub use crate::types::position::DirectPosition;
    pub use crate::types::xlink::SimpleLink;
    pub use crate::types::{GmlClass, GmlNode};
}
