use std::path::PathBuf;

use approx::assert_relative_eq;
use petgraph::{graph::NodeIndex, visit::EdgeRef};
use safetravel_core::prelude::*;

const START: PointId = 99912;
const END: PointId = 1150824164;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn model() -> RoadModel {
    create_road_model(&RoadModelConfig::new(data("bloomsbury.json"))).unwrap()
}

fn ids(model: &RoadModel, hops: &[HopRecord<NodeIndex>]) -> Vec<PointId> {
    hops.iter().map(|h| model.graph.point_id(h.node)).collect()
}

fn dijkstra_time(model: &RoadModel, field: &str, disruptions: bool, max_speed: f64) -> f64 {
    let graph = &model.graph;
    let (start, goal) = (graph.point(START).unwrap(), graph.point(END).unwrap());
    let times = petgraph::algo::dijkstra(graph.inner(), start, Some(goal), |e| {
        if !graph.is_routable(e.target()) {
            return f64::INFINITY;
        }
        model
            .cost_model
            .traversal_cost(graph, e.id(), e.source(), field, disruptions, max_speed)
            .unwrap_or(f64::INFINITY)
    });
    times[&goal]
}

#[test]
fn foot_route_between_fixture_points() {
    let model = model();
    let hops = model
        .route_between(START, END, CROSS_TIME_FOOT, false, 70.0, 1.0)
        .unwrap();

    assert!(!hops.is_empty());
    assert_eq!(model.graph.point_id(hops[0].node), END);

    let indices: Vec<_> = hops.iter().map(|h| h.index).collect();
    assert_eq!(indices, (0..hops.len()).collect::<Vec<_>>());

    let start = model.point(START).unwrap();
    let last = hops.last().unwrap().node;
    assert!(model.graph.find_edge(start, last).is_some());

    // Read in descending index order, times grow from the start
    let times: Vec<_> = hops.iter().rev().map(|h| h.time).collect();
    assert!(times.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(ids(&model, &hops), vec![END, 104, 102, 101]);
    assert_relative_eq!(
        hops[0].time,
        dijkstra_time(&model, CROSS_TIME_FOOT, false, 70.0),
        max_relative = 1e-9
    );
}

#[test]
fn closed_point_is_avoided_when_disruptions_count() {
    let model = model();
    let hops = model
        .route_between(START, END, CROSS_TIME_FOOT, true, 70.0, 1.0)
        .unwrap();

    assert_eq!(ids(&model, &hops), vec![END, 105, 103]);
    assert_relative_eq!(
        hops[0].time,
        dijkstra_time(&model, CROSS_TIME_FOOT, true, 70.0),
        max_relative = 1e-9
    );
}

#[test]
fn pedestrians_never_take_the_primary_road() {
    let model = model();
    let (p101, p104) = (model.point(101).unwrap(), model.point(104).unwrap());

    for disruptions in [false, true] {
        for weight in [1.0, 1.5, 3.0] {
            let hops = model
                .route_between(START, END, CROSS_TIME_FOOT, disruptions, 70.0, weight)
                .unwrap();
            let ordered: Vec<_> = std::iter::once(model.point(START).unwrap())
                .chain(hops.iter().rev().map(|h| h.node))
                .collect();
            assert!(
                !ordered.windows(2).any(|w| w[0] == p101 && w[1] == p104),
                "walked the primary road with weight {weight}"
            );
        }
    }
}

#[test]
fn motor_vehicle_route_is_optimal() {
    let model = model();
    for disruptions in [false, true] {
        let hops = model
            .route_between(START, END, CROSS_TIME_MOTOR_VEHICLE, disruptions, 30.0, 1.0)
            .unwrap();
        assert_relative_eq!(
            hops[0].time,
            dijkstra_time(&model, CROSS_TIME_MOTOR_VEHICLE, disruptions, 30.0),
            max_relative = 1e-9
        );
    }
}

#[test]
fn anytime_search_degrades_monotonically() {
    let model = model();
    let optimal = model
        .route_between(START, END, CROSS_TIME_FOOT, true, 70.0, 1.0)
        .unwrap();
    for weight in [1.2, 2.0, 10.0] {
        let inflated = model
            .route_between(START, END, CROSS_TIME_FOOT, true, 70.0, weight)
            .unwrap();
        assert!(inflated[0].time >= optimal[0].time - 1e-9);
    }
}

#[test]
fn same_query_same_answer() {
    let model = model();
    let first = model
        .search_between(START, END, CROSS_TIME_FOOT, true, 70.0, 2.0)
        .unwrap();
    let second = model
        .search_between(START, END, CROSS_TIME_FOOT, true, 70.0, 2.0)
        .unwrap();
    assert_eq!(first.hops, second.hops);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn trivial_and_invalid_queries() {
    let model = model();

    let same = model
        .route_between(START, START, CROSS_TIME_FOOT, false, 70.0, 1.0)
        .unwrap();
    assert!(same.is_empty());

    let unknown = model.route_between(START, 42, CROSS_TIME_FOOT, false, 70.0, 1.0);
    assert!(matches!(unknown, Err(Error::UnknownPoint(42))));

    let not_a_point = model.route_between(START, 7000, CROSS_TIME_FOOT, false, 70.0, 1.0);
    let err = not_a_point.unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(err.to_string(), "`end' does not have `Point' as a label");

    let bad_weight = model.route_between(START, END, CROSS_TIME_FOOT, false, 70.0, 0.5);
    assert!(matches!(bad_weight, Err(Error::InvalidWeight(_))));
}

#[test]
fn cost_configuration_is_read_from_disk() {
    let config =
        RoadModelConfig::new(data("bloomsbury.json")).with_cost_config(data("costs.json"));
    let model = create_road_model(&config).unwrap();

    assert_eq!(model.cost_model.config().speed_margin_mph, 15.0);
    assert_eq!(
        model.cost_model.config().road_class_weights.get("primary"),
        Some(&1.2)
    );

    let hops = model
        .route_between(START, END, CROSS_TIME_FOOT, false, 70.0, 1.0)
        .unwrap();
    assert_eq!(ids(&model, &hops), vec![END, 104, 102, 101]);
}

#[test]
fn itinerary_runs_from_start_to_goal() {
    let model = model();
    let hops = model
        .route_between(START, END, CROSS_TIME_FOOT, true, 70.0, 1.0)
        .unwrap();
    let itinerary = model.itinerary(START, &hops).unwrap().unwrap();

    assert_eq!(itinerary.point_ids(), vec![START, 103, 105, END]);
    assert_relative_eq!(itinerary.total_time(), hops[0].time);

    let geojson = itinerary.to_geojson().unwrap();
    assert_eq!(geojson.features.len(), 1 + itinerary.len());
}

#[test]
fn snaps_coordinates_to_the_nearest_point() {
    let model = model();
    let (node, distance) = model
        .graph
        .nearest_point(&geo::Point::new(-0.12995, 51.52002))
        .unwrap();
    assert_eq!(model.graph.point_id(node), START);
    assert!(distance < 10.0);
}
