// Re-export key components
pub use crate::cost::{CostConfig, CostModel};
pub use crate::loading::{RoadModelConfig, create_road_model};
pub use crate::model::{
    CoordinateSystem, Disruption, RoadEdge, RoadGraph, RoadGraphBuilder, RoadModel, RoadNetwork,
    RoadNode,
};
pub use crate::routing::astar::{
    AStar, HopRecord, RouteQuery, SearchOutcome, SearchStats, route,
};
pub use crate::routing::itinerary::{ItineraryStop, RouteItinerary};

// Core types and constants
pub use petgraph::graph::NodeIndex;
pub use crate::Error;
pub use crate::PointId;
pub use crate::Seconds;
pub use crate::{CROSS_TIME_FOOT, CROSS_TIME_MOTOR_VEHICLE, MPH_TO_MS, ROUTABLE_LABEL};
