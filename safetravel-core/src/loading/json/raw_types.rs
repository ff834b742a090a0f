use hashbrown::HashMap;
use serde::Deserialize;

use crate::{PointId, ROUTABLE_LABEL, model::CoordinateSystem};

/// Top level road graph document
#[derive(Debug, Deserialize)]
pub struct RawRoadGraph {
    #[serde(default)]
    pub crs: CoordinateSystem,
    pub points: Vec<RawPoint>,
    #[serde(default)]
    pub ways: Vec<RawWay>,
    #[serde(default)]
    pub disruptions: Vec<RawDisruption>,
}

#[derive(Debug, Deserialize)]
pub struct RawPoint {
    pub id: PointId,
    #[serde(alias = "x")]
    pub lon: f64,
    #[serde(alias = "y")]
    pub lat: f64,
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawWay {
    pub from: PointId,
    pub to: PointId,
    /// Metres per second
    #[serde(default)]
    pub maxspeed: Option<f64>,
    #[serde(default)]
    pub class: Option<String>,
    /// Traversal time per mode field; `null` marks the way impassable
    #[serde(default)]
    pub cross_times: HashMap<String, Option<f64>>,
    /// Also add the reverse way
    #[serde(default)]
    pub two_way: bool,
}

#[derive(Debug, Deserialize)]
pub struct RawDisruption {
    pub id: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub closed: Option<bool>,
    /// Points the disruption is attached to
    pub points: Vec<PointId>,
}

fn default_labels() -> Vec<String> {
    vec![ROUTABLE_LABEL.to_string()]
}
