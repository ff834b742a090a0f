//! Road network model - points, ways and disruptions

pub mod builder;
pub mod components;
pub mod network;

pub use builder::RoadGraphBuilder;
pub use components::{CoordinateSystem, Disruption, RoadEdge, RoadNode};
pub use network::{IndexedPoint, RoadGraph};
