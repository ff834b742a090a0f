use std::{fs::File, io::BufReader, path::Path};

use geo::Point;
use itertools::Itertools;
use log::{debug, info};

use super::raw_types::{RawDisruption, RawRoadGraph, RawWay};
use crate::{
    Error,
    model::{Disruption, RoadEdge, RoadGraph, RoadGraphBuilder, RoadNode},
};

/// Reads a road graph document from disk
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed, or if it
/// describes an inconsistent graph
pub fn road_graph_from_json(path: &Path) -> Result<RoadGraph, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let raw: RawRoadGraph = serde_json::from_reader(BufReader::new(file))?;
    build_road_graph(raw)
}

/// Parses a road graph document held in memory
///
/// # Errors
///
/// Returns an error if the text is not a valid, consistent document
pub fn road_graph_from_str(text: &str) -> Result<RoadGraph, Error> {
    let raw: RawRoadGraph = serde_json::from_str(text)?;
    build_road_graph(raw)
}

fn build_road_graph(raw: RawRoadGraph) -> Result<RoadGraph, Error> {
    let two_way = raw.ways.iter().filter(|w| w.two_way).count();
    debug!(
        "Way classes: {}",
        raw.ways
            .iter()
            .filter_map(|w| w.class.as_deref())
            .counts()
            .into_iter()
            .sorted()
            .map(|(class, n)| format!("{class}={n}"))
            .join(", ")
    );
    let mut builder =
        RoadGraphBuilder::with_capacity(raw.crs, raw.points.len(), raw.ways.len() + two_way);

    for point in raw.points {
        builder.add_node(RoadNode {
            id: point.id,
            geometry: Point::new(point.lon, point.lat),
            labels: point.labels,
        })?;
    }

    for way in raw.ways {
        let (from, to, two_way) = (way.from, way.to, way.two_way);
        let edge = road_edge(way);
        if two_way {
            builder.add_two_way(from, to, edge)?;
        } else {
            builder.add_way(from, to, edge)?;
        }
    }

    for disruption in raw.disruptions {
        add_disruption(&mut builder, disruption)?;
    }

    let graph = builder.build();
    info!(
        "Built road graph with {} points and {} ways",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn road_edge(way: RawWay) -> RoadEdge {
    RoadEdge {
        maxspeed: way.maxspeed,
        class: way.class,
        cross_times: way
            .cross_times
            .into_iter()
            .map(|(field, time)| (field, time.unwrap_or(f64::INFINITY)))
            .collect(),
    }
}

fn add_disruption(builder: &mut RoadGraphBuilder, raw: RawDisruption) -> Result<(), Error> {
    if raw.points.is_empty() {
        debug!("Disruption {} is not attached to any point", raw.id);
    }
    let disruption = Disruption {
        id: raw.id,
        severity: raw.severity,
        closed: raw.closed.unwrap_or(false),
    };
    builder.add_disruption(disruption, &raw.points)?;
    Ok(())
}
