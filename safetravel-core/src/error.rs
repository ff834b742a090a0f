use thiserror::Error;

use crate::PointId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("`{0}' does not have `Point' as a label")]
    NotRoutable(&'static str),
    #[error("`weight' must be in [1, +Infinity), got {0}")]
    InvalidWeight(f64),
    #[error("`maxSpeed' must be a positive, finite speed in mph, got {0}")]
    InvalidMaxSpeed(f64),
    #[error("Unknown point id {0}")]
    UnknownPoint(PointId),
    #[error("Search interrupted after {0} expansions")]
    Interrupted(usize),
    #[error("Invalid cost configuration: {0}")]
    InvalidCostConfig(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Unrecoverable error: {0}")]
    UnrecoverableError(&'static str),
}

impl Error {
    /// Whether the error was caused by the caller's arguments rather than by
    /// the data or the engine
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::NotRoutable(_)
                | Error::InvalidWeight(_)
                | Error::InvalidMaxSpeed(_)
                | Error::UnknownPoint(_)
        )
    }
}
