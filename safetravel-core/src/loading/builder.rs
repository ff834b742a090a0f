use log::info;

use super::config::RoadModelConfig;
use super::json::road_graph_from_json;
use crate::{
    Error,
    cost::{CostConfig, CostModel},
    model::{RoadGraph, RoadModel},
};

/// Creates a road model based on the provided configuration
///
/// # Errors
///
/// Returns an error if there are problems reading or processing data
pub fn create_road_model(config: &RoadModelConfig) -> Result<RoadModel, Error> {
    validate_config(config)?;

    info!("Processing road graph: {}", config.graph_path.display());
    let graph = road_graph_from_json(&config.graph_path)?;

    let cost_config = match &config.cost_config_path {
        Some(path) => {
            info!("Reading cost configuration: {}", path.display());
            CostConfig::from_json_file(path)?
        }
        None => CostConfig::default(),
    };
    let cost_model = CostModel::new(cost_config)?;

    report_graph(&graph);

    info!("Road model created successfully");
    Ok(RoadModel::new(graph, cost_model))
}

fn validate_config(config: &RoadModelConfig) -> Result<(), Error> {
    if !config.graph_path.exists() {
        return Err(Error::InvalidData(format!(
            "Road graph file not found: {}",
            config.graph_path.display()
        )));
    }

    if let Some(path) = &config.cost_config_path {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Cost configuration not found: {}", path.display()),
            )));
        }
    }

    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn report_graph(graph: &RoadGraph) {
    info!(
        "Loaded {} points, {} ways and {} disruptions",
        graph.node_count(),
        graph.edge_count(),
        graph.disruption_count()
    );

    let isolated = graph
        .inner()
        .node_indices()
        .filter(|&n| graph.inner().neighbors_undirected(n).next().is_none())
        .count();

    if isolated > 0 {
        let percentage = (isolated as f64 / graph.node_count() as f64) * 100.0;
        log::warn!(
            "{isolated} of {} points ({percentage:.1}%) have no ways and can never be routed \
        through.",
            graph.node_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_graph_file_is_invalid_data() {
        let config = RoadModelConfig::new("/definitely/not/here.json");
        assert!(matches!(
            create_road_model(&config),
            Err(Error::InvalidData(_))
        ));
    }
}
