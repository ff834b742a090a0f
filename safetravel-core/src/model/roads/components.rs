//! Road network components - points, ways and disruptions

use geo::{Distance, Euclidean, Haversine, Point};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{PointId, ROUTABLE_LABEL};

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Stable application id of the point
    pub id: PointId,
    /// Point coordinates
    pub geometry: Point<f64>,
    /// Labels attached to the point; only `Point` matters for routing
    pub labels: Vec<String>,
}

impl RoadNode {
    /// Creates a routable point
    pub fn routable(id: PointId, geometry: Point<f64>) -> Self {
        Self {
            id,
            geometry,
            labels: vec![ROUTABLE_LABEL.to_string()],
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Road graph edge (directed way)
#[derive(Debug, Clone, Default)]
pub struct RoadEdge {
    /// Speed limit in metres per second
    pub maxspeed: Option<f64>,
    /// Road class tag
    pub class: Option<String>,
    /// Traversal time per mode field; `f64::INFINITY` marks the way as
    /// impassable for that mode
    pub cross_times: HashMap<String, f64>,
}

impl RoadEdge {
    pub fn new(maxspeed: f64, class: Option<&str>) -> Self {
        Self {
            maxspeed: Some(maxspeed),
            class: class.map(str::to_string),
            cross_times: HashMap::new(),
        }
    }

    /// Sets the traversal time for a mode field
    #[must_use]
    pub fn with_cross_time(mut self, field: &str, seconds: f64) -> Self {
        self.cross_times.insert(field.to_string(), seconds);
        self
    }

    /// Marks the way as impassable for a mode field
    #[must_use]
    pub fn closed_for(self, field: &str) -> Self {
        self.with_cross_time(field, f64::INFINITY)
    }
}

/// Disruption attached to one or more road points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disruption {
    pub id: String,
    /// `Minimal`, `Moderate`, `Serious` or `Severe`
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

impl Disruption {
    pub fn new(id: impl Into<String>, severity: &str, closed: bool) -> Self {
        Self {
            id: id.into(),
            severity: Some(severity.to_string()),
            closed,
        }
    }
}

/// Coordinate reference system of the graph's points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystem {
    /// Longitude/latitude in degrees, great-circle distances
    #[default]
    Wgs84,
    /// Projected coordinates in metres, straight-line distances
    Cartesian,
}

impl CoordinateSystem {
    /// Distance in metres between two points
    pub fn distance(self, a: Point<f64>, b: Point<f64>) -> f64 {
        match self {
            CoordinateSystem::Wgs84 => Haversine.distance(a, b),
            CoordinateSystem::Cartesian => Euclidean.distance(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cartesian_distance_is_euclidean() {
        let d = CoordinateSystem::Cartesian.distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn wgs84_distance_is_symmetric() {
        let a = Point::new(-0.1276, 51.5072);
        let b = Point::new(-0.0877, 51.5081);
        let ab = CoordinateSystem::Wgs84.distance(a, b);
        let ba = CoordinateSystem::Wgs84.distance(b, a);
        assert_relative_eq!(ab, ba);
        // roughly 2.8 km across central London
        assert!(ab > 2_500.0 && ab < 3_000.0);
    }

    #[test]
    fn routable_node_carries_point_label() {
        let node = RoadNode::routable(7, Point::new(0.0, 0.0));
        assert!(node.has_label(ROUTABLE_LABEL));
        assert!(!node.has_label("Disruption"));
    }
}
