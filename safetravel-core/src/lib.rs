//! Least-time routing over a weighted road graph.
//!
//! The core of the crate is a weighted A* search with late reopening
//! ([`routing::astar`]) driven by a dynamic [`cost::CostModel`] (road class,
//! disruptions, busy intersections, speed caps). The graph itself is consumed
//! through the [`model::RoadNetwork`] trait; [`model::RoadGraph`] is the
//! bundled in-memory implementation.

pub mod cost;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{RoadModelConfig, create_road_model};
pub use model::{RoadGraph, RoadModel, RoadNetwork};
pub use routing::astar::{AStar, HopRecord, RouteQuery, SearchOutcome, SearchStats, route};

/// Stable application-level identifier of a road point
pub type PointId = u64;

/// Travel time, in seconds
pub type Seconds = f64;

/// Conversion factor from miles per hour to metres per second
pub const MPH_TO_MS: f64 = 0.44704;

/// Label a point must carry to take part in routing
pub const ROUTABLE_LABEL: &str = "Point";

/// Traversal-time field for pedestrians
pub const CROSS_TIME_FOOT: &str = "crossTimeFoot";

/// Traversal-time field for motor vehicles
pub const CROSS_TIME_MOTOR_VEHICLE: &str = "crossTimeMotorVehicle";
