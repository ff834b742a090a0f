//! Route search and route export

pub mod astar;
pub mod itinerary;
