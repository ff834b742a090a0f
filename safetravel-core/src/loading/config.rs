use std::path::PathBuf;

/// Where to read a road model from
#[derive(Debug, Clone)]
pub struct RoadModelConfig {
    /// JSON road graph document
    pub graph_path: PathBuf,
    /// Optional JSON cost configuration; defaults apply when absent
    pub cost_config_path: Option<PathBuf>,
}

impl RoadModelConfig {
    pub fn new(graph_path: impl Into<PathBuf>) -> Self {
        Self {
            graph_path: graph_path.into(),
            cost_config_path: None,
        }
    }

    #[must_use]
    pub fn with_cost_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.cost_config_path = Some(path.into());
        self
    }
}
