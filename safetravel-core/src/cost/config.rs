use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{CROSS_TIME_MOTOR_VEHICLE, Error};

/// Tunable constants and factor tables of the cost model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Speed bonus (mph) the heuristic assumes over the requested cap
    pub speed_margin_mph: f64,
    /// Seconds added when arriving at a busy junction
    pub intersection_penalty: f64,
    /// A junction is busy when more ways than this lead into it
    pub busy_intersection_degree: usize,
    /// Multiplier for ways ending at a closed point
    pub closure_factor: f64,
    /// Traversal-time field for which road class factors apply
    pub road_class_field: String,
    /// Factor per road class tag
    pub road_class_weights: HashMap<String, f64>,
    /// Factor per disruption severity
    pub disruption_weights: HashMap<String, f64>,
}

impl Default for CostConfig {
    fn default() -> Self {
        let road_class_weights = [
            ("primary", 1.2),
            ("secondary", 1.4),
            ("tertiary", 1.6),
            ("unclassified", 1.8),
            ("road", 1.8),
            ("residential", 2.0),
            ("living_street", 2.4),
            ("service", 2.4),
        ];
        let disruption_weights = [
            ("Minimal", 1.1),
            ("Moderate", 2.0),
            ("Serious", 3.333),
            ("Severe", 6.0),
        ];

        Self {
            speed_margin_mph: 5.0,
            intersection_penalty: 2.0,
            busy_intersection_degree: 3,
            closure_factor: 25.0,
            road_class_field: CROSS_TIME_MOTOR_VEHICLE.to_string(),
            road_class_weights: road_class_weights
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            disruption_weights: disruption_weights
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

impl CostConfig {
    /// Reads a configuration from a JSON file; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let file = std::fs::File::open(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to open file '{}': {}", path.display(), e),
            )
        })?;
        let config: CostConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !self.speed_margin_mph.is_finite() || self.speed_margin_mph < 0.0 {
            return Err(Error::InvalidCostConfig(format!(
                "speed margin must be finite and non-negative, got {}",
                self.speed_margin_mph
            )));
        }

        if !self.intersection_penalty.is_finite() || self.intersection_penalty < 0.0 {
            return Err(Error::InvalidCostConfig(format!(
                "intersection penalty must be finite and non-negative, got {}",
                self.intersection_penalty
            )));
        }

        let factors = self
            .road_class_weights
            .iter()
            .chain(self.disruption_weights.iter())
            .map(|(name, factor)| (name.as_str(), *factor))
            .chain(std::iter::once(("closure", self.closure_factor)));

        for (name, factor) in factors {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(Error::InvalidCostConfig(format!(
                    "factor `{name}' must be finite and positive, got {factor}"
                )));
            }
        }

        Ok(())
    }
}
