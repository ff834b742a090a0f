//! Edge costing and the search heuristic
//!
//! Every edge relaxed by the search is priced by [`CostModel::traversal_cost`],
//! which applies, in this order:
//!
//! 1. the raw traversal time at the slower of the way's limit and the caller's cap,
//! 2. the road class factor (motor vehicles only),
//! 3. the busy intersection penalty (additive),
//! 4. the disruption factor (when disruptions are considered).
//!
//! Disruptions therefore scale the already penalised value.

mod config;

pub use config::CostConfig;

use log::{debug, warn};

use crate::{Error, MPH_TO_MS, Seconds, model::RoadNetwork};

/// Prices ways and estimates remaining travel time
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    config: CostConfig,
}

impl CostModel {
    /// Creates a cost model from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCostConfig`] if a factor or constant is out of range
    pub fn new(config: CostConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Estimated travel time from `a` to `b`, inflated by `weight`.
    ///
    /// Assumes travel at the requested cap plus the configured speed margin,
    /// which never overestimates since no way is priced faster than the cap.
    pub fn heuristic<G: RoadNetwork>(
        &self,
        graph: &G,
        a: G::Node,
        b: G::Node,
        max_speed_mph: f64,
        weight: f64,
    ) -> Seconds {
        let distance = graph.distance(graph.coordinate(a), graph.coordinate(b));
        weight * distance / ((max_speed_mph + self.config.speed_margin_mph) * MPH_TO_MS)
    }

    /// Time to cover `distance` metres at the slower of the way's own limit
    /// (m/s) and the caller's cap (mph)
    pub fn edge_cost(&self, distance: f64, edge_speed: Option<f64>, max_speed_mph: f64) -> Seconds {
        let capped = distance / (max_speed_mph * MPH_TO_MS);
        match edge_speed {
            Some(speed) => capped.max(distance / speed),
            None => capped,
        }
    }

    /// Scales `cost` by the road class factor when routing with the motor
    /// vehicle field. Unknown or missing classes leave the cost unchanged.
    pub fn apply_road_class_factor(
        &self,
        cross_time_field: &str,
        class: Option<&str>,
        cost: Seconds,
    ) -> Seconds {
        if cross_time_field != self.config.road_class_field {
            return cost;
        }
        class
            .and_then(|c| self.config.road_class_weights.get(c))
            .map_or(cost, |factor| cost * factor)
    }

    /// Fixed penalty for arriving at a busy junction
    pub fn intersection_penalty<G: RoadNetwork>(&self, graph: &G, successor: G::Node) -> Seconds {
        if graph.incoming_degree(successor) > self.config.busy_intersection_degree {
            self.config.intersection_penalty
        } else {
            0.0
        }
    }

    /// Applies the disruptions attached to `successor` to `cross_time`.
    ///
    /// Severity factors multiply together. A closure returns
    /// `cross_time * closure_factor` outright, ignoring every other
    /// disruption at the point. Disruptions without a known severity are
    /// skipped.
    pub fn apply_disruption_factor<G: RoadNetwork>(
        &self,
        graph: &G,
        successor: G::Node,
        cross_time: Seconds,
    ) -> Seconds {
        let mut adjusted = cross_time;

        for disruption in graph.disruptions(successor) {
            let Some(severity) = graph.disruption_severity(disruption) else {
                warn!(
                    "Disruption {} has no severity",
                    graph.disruption_label(disruption)
                );
                continue;
            };

            let Some(factor) = self.config.disruption_weights.get(severity) else {
                warn!(
                    "Unknown severity {severity} on disruption {}",
                    graph.disruption_label(disruption)
                );
                continue;
            };

            if graph.disruption_closed(disruption) {
                debug!(
                    "Closed road at {}\tpoint {}",
                    graph.disruption_label(disruption),
                    graph.point_id(successor)
                );
                return cross_time * self.config.closure_factor;
            }

            adjusted *= factor;
        }

        adjusted
    }

    /// Full price of traversing `edge` out of `from`, or `None` when the way
    /// is impassable for the requested mode.
    pub fn traversal_cost<G: RoadNetwork>(
        &self,
        graph: &G,
        edge: G::Edge,
        from: G::Node,
        cross_time_field: &str,
        consider_disruptions: bool,
        max_speed_mph: f64,
    ) -> Option<Seconds> {
        match graph.edge_property(edge, cross_time_field) {
            Some(stored) if stored == f64::INFINITY => return None,
            Some(_) => {}
            None => warn!(
                "Way out of point {} has no `{cross_time_field}' field",
                graph.point_id(from)
            ),
        }

        let successor = graph.end_node(edge);
        let distance = graph.distance(graph.coordinate(from), graph.coordinate(successor));

        let mut cost = self.edge_cost(distance, graph.edge_speed(edge), max_speed_mph);
        cost = self.apply_road_class_factor(cross_time_field, graph.edge_class(edge), cost);
        cost += self.intersection_penalty(graph, successor);
        if consider_disruptions {
            cost = self.apply_disruption_factor(graph, successor, cost);
        }

        Some(cost)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::model::{CoordinateSystem, Disruption, RoadEdge, RoadGraph, RoadGraphBuilder};
    use crate::{CROSS_TIME_FOOT, CROSS_TIME_MOTOR_VEHICLE};

    const FAST_CAP: f64 = 1_000.0;

    /// A(1) -> B(2) 100 m apart at 10 m/s, plus whatever the caller attaches
    fn pair(edge: RoadEdge, disruptions: &[Disruption]) -> RoadGraph {
        let mut builder = RoadGraphBuilder::new(CoordinateSystem::Cartesian);
        builder.add_point(1, 0.0, 0.0).unwrap();
        builder.add_point(2, 100.0, 0.0).unwrap();
        builder.add_way(1, 2, edge).unwrap();
        for d in disruptions {
            builder.add_disruption(d.clone(), &[2]).unwrap();
        }
        builder.build()
    }

    fn price(graph: &RoadGraph, field: &str, disruptions: bool) -> Option<f64> {
        let a = graph.point(1).unwrap();
        let edge = graph.outgoing_edges(a).next().unwrap();
        CostModel::default().traversal_cost(graph, edge, a, field, disruptions, FAST_CAP)
    }

    #[test]
    fn edge_cost_takes_the_slower_rate() {
        let model = CostModel::default();
        assert_relative_eq!(model.edge_cost(100.0, Some(10.0), FAST_CAP), 10.0);

        let capped = 100.0 / (10.0 * MPH_TO_MS);
        assert_relative_eq!(model.edge_cost(100.0, Some(10.0), 10.0), capped);
        assert_relative_eq!(model.edge_cost(100.0, None, 10.0), capped);
    }

    #[test]
    fn road_class_only_applies_to_motor_vehicles() {
        let model = CostModel::default();
        let primary = Some("primary");
        assert_relative_eq!(
            model.apply_road_class_factor(CROSS_TIME_MOTOR_VEHICLE, primary, 10.0),
            12.0
        );
        assert_relative_eq!(
            model.apply_road_class_factor(CROSS_TIME_MOTOR_VEHICLE, Some("service"), 10.0),
            24.0
        );
        assert_relative_eq!(model.apply_road_class_factor(CROSS_TIME_FOOT, primary, 10.0), 10.0);
        assert_relative_eq!(
            model.apply_road_class_factor(CROSS_TIME_MOTOR_VEHICLE, Some("motorway"), 10.0),
            10.0
        );
        assert_relative_eq!(
            model.apply_road_class_factor(CROSS_TIME_MOTOR_VEHICLE, None, 10.0),
            10.0
        );
    }

    #[test]
    fn heuristic_uses_speed_margin_and_weight() {
        let graph = pair(RoadEdge::new(10.0, None), &[]);
        let (a, b) = (graph.point(1).unwrap(), graph.point(2).unwrap());
        let model = CostModel::default();

        let expected = 100.0 / (75.0 * MPH_TO_MS);
        assert_relative_eq!(model.heuristic(&graph, a, b, 70.0, 1.0), expected);
        assert_relative_eq!(model.heuristic(&graph, b, a, 70.0, 1.0), expected);
        assert_relative_eq!(model.heuristic(&graph, a, b, 70.0, 2.5), 2.5 * expected);
    }

    #[test]
    fn severities_multiply() {
        let graph = pair(
            RoadEdge::new(10.0, None).with_cross_time(CROSS_TIME_FOOT, 1.0),
            &[
                Disruption::new("d1", "Moderate", false),
                Disruption::new("d2", "Serious", false),
            ],
        );
        assert_relative_eq!(price(&graph, CROSS_TIME_FOOT, false).unwrap(), 10.0);
        assert_relative_eq!(
            price(&graph, CROSS_TIME_FOOT, true).unwrap(),
            10.0 * 2.0 * 3.333
        );
    }

    #[test]
    fn closure_dominates_other_disruptions() {
        for order in [[0, 1], [1, 0]] {
            let disruptions = [
                Disruption::new("severe", "Severe", false),
                Disruption::new("closed", "Minimal", true),
            ];
            let graph = pair(
                RoadEdge::new(10.0, None).with_cross_time(CROSS_TIME_FOOT, 1.0),
                &[disruptions[order[0]].clone(), disruptions[order[1]].clone()],
            );
            assert_relative_eq!(price(&graph, CROSS_TIME_FOOT, true).unwrap(), 250.0);
        }
    }

    #[test]
    fn unusable_severities_are_skipped() {
        let graph = pair(
            RoadEdge::new(10.0, None).with_cross_time(CROSS_TIME_FOOT, 1.0),
            &[
                Disruption {
                    id: "missing".into(),
                    severity: None,
                    closed: true,
                },
                Disruption::new("odd", "Apocalyptic", true),
                Disruption::new("minimal", "Minimal", false),
            ],
        );
        assert_relative_eq!(price(&graph, CROSS_TIME_FOOT, true).unwrap(), 11.0);
    }

    #[test]
    fn impassable_ways_have_no_price() {
        let graph = pair(
            RoadEdge::new(10.0, Some("primary"))
                .with_cross_time(CROSS_TIME_FOOT, 12.0)
                .closed_for(CROSS_TIME_MOTOR_VEHICLE),
            &[],
        );
        assert!(price(&graph, CROSS_TIME_MOTOR_VEHICLE, false).is_none());
        assert!(price(&graph, CROSS_TIME_FOOT, false).is_some());
    }

    #[test]
    fn missing_field_is_treated_as_passable() {
        let graph = pair(RoadEdge::new(10.0, None), &[]);
        assert_relative_eq!(price(&graph, CROSS_TIME_FOOT, false).unwrap(), 10.0);
    }

    #[test]
    fn pipeline_order_is_class_then_penalty_then_disruption() {
        let mut builder = RoadGraphBuilder::new(CoordinateSystem::Cartesian);
        builder.add_point(1, 0.0, 0.0).unwrap();
        builder.add_point(2, 100.0, 0.0).unwrap();
        for (id, y) in [(3, 50.0), (4, -50.0), (5, 100.0)] {
            builder.add_point(id, 100.0, y).unwrap();
            builder.add_way(id, 2, RoadEdge::new(10.0, None)).unwrap();
        }
        builder
            .add_way(
                1,
                2,
                RoadEdge::new(10.0, Some("primary")).with_cross_time(CROSS_TIME_MOTOR_VEHICLE, 1.0),
            )
            .unwrap();
        builder
            .add_disruption(Disruption::new("d", "Moderate", false), &[2])
            .unwrap();
        let graph = builder.build();

        // 100 m at 10 m/s, * 1.2 primary, + 2.0 for four ways in, * 2.0 moderate
        let cost = price(&graph, CROSS_TIME_MOTOR_VEHICLE, true).unwrap();
        assert_relative_eq!(cost, (10.0 * 1.2 + 2.0) * 2.0);
    }

    #[test]
    fn three_ways_in_is_not_busy() {
        let mut builder = RoadGraphBuilder::new(CoordinateSystem::Cartesian);
        builder.add_point(1, 0.0, 0.0).unwrap();
        builder.add_point(2, 100.0, 0.0).unwrap();
        for (id, y) in [(3, 50.0), (4, -50.0)] {
            builder.add_point(id, 100.0, y).unwrap();
            builder.add_way(id, 2, RoadEdge::new(10.0, None)).unwrap();
        }
        builder.add_way(1, 2, RoadEdge::new(10.0, None)).unwrap();
        let graph = builder.build();

        let b = graph.point(2).unwrap();
        assert_eq!(CostModel::default().intersection_penalty(&graph, b), 0.0);
    }
}
