use log::{info, trace};

use super::path::{HopRecord, reconstruct};
use super::state::{ClosedSet, Cost, OpenSet, SearchNode};
use crate::{Error, cost::CostModel, model::RoadNetwork};

const OPEN_SET_CAPACITY: usize = 0xfff;
const CLOSED_SET_CAPACITY: usize = 0xfeee;

/// Inputs of a single route search
#[derive(Debug, Clone)]
pub struct RouteQuery<'a, N> {
    pub start: N,
    pub end: N,
    /// Traversal-time field selecting the mode, e.g. `crossTimeFoot`
    pub cross_time_field: &'a str,
    pub consider_disruptions: bool,
    /// Speed cap in mph
    pub max_speed: f64,
    /// Heuristic inflation, in `[1, +inf)`
    pub weight: f64,
}

impl<'a, N> RouteQuery<'a, N> {
    /// Optimal (`weight = 1`) query
    pub fn new(
        start: N,
        end: N,
        cross_time_field: &'a str,
        consider_disruptions: bool,
        max_speed: f64,
    ) -> Self {
        Self {
            start,
            end,
            cross_time_field,
            consider_disruptions,
            max_speed,
            weight: 1.0,
        }
    }

    /// Inflates the heuristic by `weight`, trading optimality for speed
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Points popped from the open set
    pub expanded: usize,
    /// Ways priced
    pub relaxed: usize,
    /// Ways skipped as impassable for the mode
    pub impassable: usize,
    /// Closed points moved back to the open set
    pub reopened: usize,
    pub open_size: usize,
    pub closed_size: usize,
}

/// Result of a search: hops from the goal back to the start (empty when the
/// goal is unreachable) and the search counters
#[derive(Debug, Clone)]
pub struct SearchOutcome<N> {
    pub hops: Vec<HopRecord<N>>,
    pub stats: SearchStats,
}

impl<N> SearchOutcome<N> {
    pub fn found(&self) -> bool {
        !self.hops.is_empty()
    }

    /// Travel time to the goal, if a route was found
    pub fn total_time(&self) -> Option<f64> {
        self.hops.first().map(|hop| hop.time)
    }
}

/// Weighted A* search engine bound to a graph and a cost model.
///
/// Holds no search state of its own; every call allocates and owns its open
/// and closed sets, so one engine can serve any number of searches.
pub struct AStar<'g, G> {
    graph: &'g G,
    cost_model: &'g CostModel,
}

impl<'g, G: RoadNetwork> AStar<'g, G> {
    pub fn new(graph: &'g G, cost_model: &'g CostModel) -> Self {
        Self { graph, cost_model }
    }

    /// Runs the search to completion
    ///
    /// # Errors
    ///
    /// Returns an error if the query violates a precondition
    pub fn search(&self, query: &RouteQuery<'_, G::Node>) -> Result<SearchOutcome<G::Node>, Error> {
        self.search_with(query, || true)
    }

    /// Runs the search, consulting `keep_going` once per iteration
    ///
    /// # Errors
    ///
    /// Returns an error if the query violates a precondition, or
    /// [`Error::Interrupted`] once `keep_going` returns `false`
    pub fn search_with<F>(
        &self,
        query: &RouteQuery<'_, G::Node>,
        mut keep_going: F,
    ) -> Result<SearchOutcome<G::Node>, Error>
    where
        F: FnMut() -> bool,
    {
        self.validate(query)?;

        let graph = self.graph;
        let start_id = graph.point_id(query.start);
        let goal_id = graph.point_id(query.end);

        let hint = graph.size_hint().unwrap_or(usize::MAX);
        let mut open = OpenSet::with_capacity(OPEN_SET_CAPACITY.min(hint));
        let mut closed = ClosedSet::with_capacity(CLOSED_SET_CAPACITY.min(hint));
        let mut stats = SearchStats::default();

        let h = self.heuristic(query.start, query);
        open.upsert(
            start_id,
            SearchNode {
                node: query.start,
                cost: Cost::new(0.0, h),
                parent: None,
            },
        );

        info!("Starting route from {start_id}\tto {goal_id}");

        let mut goal = None;
        loop {
            debug_assert!(open.is_consistent());

            if !keep_going() {
                info!("Route from {start_id} to {goal_id} interrupted");
                return Err(Error::Interrupted(stats.expanded));
            }

            let Some((current_id, current)) = open.pop_min()? else {
                break;
            };
            closed.insert(current_id, current);
            stats.expanded += 1;

            if current_id == goal_id {
                goal = Some((current_id, current));
                break;
            }

            for edge in graph.outgoing_edges(current.node) {
                let Some(cross_time) = self.cost_model.traversal_cost(
                    graph,
                    edge,
                    current.node,
                    query.cross_time_field,
                    query.consider_disruptions,
                    query.max_speed,
                ) else {
                    stats.impassable += 1;
                    continue;
                };
                stats.relaxed += 1;

                let successor = graph.end_node(edge);
                let successor_id = graph.point_id(successor);
                let travel_time = current.cost.g + cross_time;

                if let Some(known) = open.get(successor_id) {
                    if travel_time >= known.cost.g {
                        continue;
                    }
                } else if let Some(known) = closed.get(successor_id) {
                    if travel_time >= known.cost.g {
                        continue;
                    }
                    trace!(
                        "Reopening {successor_id}: {travel_time:.3}s < {:.3}s",
                        known.cost.g
                    );
                    closed.remove(successor_id);
                    stats.reopened += 1;
                }

                let h = self.heuristic(successor, query);
                open.upsert(
                    successor_id,
                    SearchNode {
                        node: successor,
                        cost: Cost::new(travel_time, h),
                        parent: Some(current_id),
                    },
                );
            }
        }

        stats.open_size = open.len();
        stats.closed_size = closed.len();
        info!(
            "A* terminated after {} expansions\topenSet size: {}\tclosedSet size: {}\treopened: {}",
            stats.expanded, stats.open_size, stats.closed_size, stats.reopened
        );

        let hops = match goal {
            Some(goal) => reconstruct(goal, start_id, &open, &closed)?,
            None => Vec::new(),
        };

        Ok(SearchOutcome { hops, stats })
    }

    fn heuristic(&self, node: G::Node, query: &RouteQuery<'_, G::Node>) -> f64 {
        self.cost_model
            .heuristic(self.graph, node, query.end, query.max_speed, query.weight)
    }

    fn validate(&self, query: &RouteQuery<'_, G::Node>) -> Result<(), Error> {
        if !self.graph.is_routable(query.start) {
            return Err(Error::NotRoutable("start"));
        }
        if !self.graph.is_routable(query.end) {
            return Err(Error::NotRoutable("end"));
        }
        // `!(w >= 1)` also rejects NaN
        if !(query.weight >= 1.0) || query.weight == f64::INFINITY {
            return Err(Error::InvalidWeight(query.weight));
        }
        if !query.max_speed.is_finite() || query.max_speed <= 0.0 {
            return Err(Error::InvalidMaxSpeed(query.max_speed));
        }
        Ok(())
    }
}

/// Finds the least-time route for `query`.
///
/// Returns hops from the goal (index 0) back to the point just after the
/// start. An unreachable goal, or a goal equal to the start, yields an empty
/// sequence.
///
/// # Errors
///
/// Returns an error if the query violates a precondition
pub fn route<G: RoadNetwork>(
    graph: &G,
    cost_model: &CostModel,
    query: &RouteQuery<'_, G::Node>,
) -> Result<Vec<HopRecord<G::Node>>, Error> {
    AStar::new(graph, cost_model)
        .search(query)
        .map(|outcome| outcome.hops)
}
