//! Data model for road routing
//!
//! Contains the graph access trait the search is written against and the
//! in-memory road graph that implements it.

pub mod access;
pub mod road_model;
pub mod roads;

pub use access::RoadNetwork;
pub use road_model::RoadModel;
pub use roads::{
    CoordinateSystem, Disruption, RoadEdge, RoadGraph, RoadGraphBuilder, RoadNode,
};
