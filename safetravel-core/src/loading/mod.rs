//! This module is responsible for loading a road graph document and the cost
//! configuration, and building a routing model from them.

mod builder;
mod config;
pub mod json;

pub use builder::create_road_model;
pub use config::RoadModelConfig;
