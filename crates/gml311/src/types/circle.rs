//! `CircleByCenterPointType`

use xsd_model::{ModelGraph, Value};

use super::measure::Measure;
use super::point::PointProperty;
use super::position::DirectPosition;
use super::{child, set_child, GmlNode};
use crate::enums::CurveInterpolationType;

pub const GROUP: usize = 0;
pub const POS: usize = 1;
pub const POINT_PROPERTY: usize = 2;
pub const RADIUS: usize = 3;
pub const INTERPOLATION: usize = 4;
pub const NUM_ARC: usize = 5;

gml_type! {
    /// A circle given by its center and radius
    CircleByCenterPoint => circle_by_center_point
}

/// How the center of a circle is given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Center {
    Pos(DirectPosition),
    PointProperty(PointProperty),
}

impl CircleByCenterPoint {
    /// The center, whichever way it is encoded
    pub fn center(self, graph: &ModelGraph) -> Option<Center> {
        let Value::Entries(entries) = graph.get(self.0, GROUP) else {
            return None;
        };
        let entry = entries.first()?;
        let node = entry.value.as_node()?;
        match entry.feature {
            POS => Some(Center::Pos(DirectPosition::wrap(node))),
            POINT_PROPERTY => Some(Center::PointProperty(PointProperty::wrap(node))),
            _ => None,
        }
    }

    /// Replace the center. Observers see the change as one delivery; keeping
    /// the same encoding replaces the entry in place.
    pub fn set_center(self, graph: &mut ModelGraph, center: Option<Center>) {
        graph.batch(|g| {
            let mut map = g.feature_map(self.0, GROUP);
            let (member, other, node) = match center {
                Some(Center::Pos(p)) => (POS, POINT_PROPERTY, p.node()),
                Some(Center::PointProperty(p)) => (POINT_PROPERTY, POS, p.node()),
                None => return map.clear(),
            };
            map.list(other).clear();
            map.set(member, node);
        });
    }

    pub fn pos(self, graph: &ModelGraph) -> Option<DirectPosition> {
        child(graph, self.0, POS)
    }

    pub fn radius(self, graph: &ModelGraph) -> Option<Measure> {
        child(graph, self.0, RADIUS)
    }

    pub fn set_radius(self, graph: &mut ModelGraph, radius: Option<Measure>) {
        set_child(graph, self.0, RADIUS, radius);
    }

    pub fn interpolation(self, graph: &ModelGraph) -> CurveInterpolationType {
        CurveInterpolationType::from_value(&graph.get(self.0, INTERPOLATION))
            .unwrap_or(CurveInterpolationType::CircularArcCenterPointWithRadius)
    }

    pub fn set_interpolation(self, graph: &mut ModelGraph, interpolation: CurveInterpolationType) {
        graph.set(self.0, INTERPOLATION, interpolation.to_value());
    }

    pub fn is_set_interpolation(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.0, INTERPOLATION)
    }

    pub fn unset_interpolation(self, graph: &mut ModelGraph) {
        graph.unset(self.0, INTERPOLATION);
    }

    /// Number of arcs, 1 unless set
    pub fn num_arc(self, graph: &ModelGraph) -> i64 {
        graph.get(self.0, NUM_ARC).as_int().unwrap_or(1)
    }

    pub fn set_num_arc(self, graph: &mut ModelGraph, num_arc: i64) {
        graph.set(self.0, NUM_ARC, num_arc);
    }

    pub fn is_set_num_arc(self, graph: &ModelGraph) -> bool {
        graph.is_set(self.0, NUM_ARC)
    }

    pub fn unset_num_arc(self, graph: &mut ModelGraph) {
        graph.unset(self.0, NUM_ARC);
    }
}
