//! JSON road graph documents

mod processor;
mod raw_types;

pub use processor::{road_graph_from_json, road_graph_from_str};
pub use raw_types::{RawDisruption, RawPoint, RawRoadGraph, RawWay};
