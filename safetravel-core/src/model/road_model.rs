use petgraph::graph::NodeIndex;

use crate::{
    Error, PointId,
    cost::CostModel,
    model::RoadGraph,
    routing::{
        astar::{AStar, HopRecord, RouteQuery, SearchOutcome},
        itinerary::RouteItinerary,
    },
};

/// Road graph together with the cost model used to route on it
#[derive(Debug, Clone)]
pub struct RoadModel {
    pub graph: RoadGraph,
    pub cost_model: CostModel,
}

impl RoadModel {
    pub fn new(graph: RoadGraph, cost_model: CostModel) -> Self {
        Self { graph, cost_model }
    }

    /// Resolves a stable point id
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPoint`] if no point carries `id`
    pub fn point(&self, id: PointId) -> Result<NodeIndex, Error> {
        self.graph.point(id).ok_or(Error::UnknownPoint(id))
    }

    /// Searches between two points given by their stable ids
    ///
    /// # Errors
    ///
    /// Returns an error if an id is unknown or the query violates a precondition
    pub fn search_between(
        &self,
        start_id: PointId,
        end_id: PointId,
        cross_time_field: &str,
        consider_disruptions: bool,
        max_speed: f64,
        weight: f64,
    ) -> Result<SearchOutcome<NodeIndex>, Error> {
        let query = RouteQuery::new(
            self.point(start_id)?,
            self.point(end_id)?,
            cross_time_field,
            consider_disruptions,
            max_speed,
        )
        .with_weight(weight);

        AStar::new(&self.graph, &self.cost_model).search(&query)
    }

    /// Hops of the least-time route between two stable ids, goal first
    ///
    /// # Errors
    ///
    /// Returns an error if an id is unknown or the query violates a precondition
    pub fn route_between(
        &self,
        start_id: PointId,
        end_id: PointId,
        cross_time_field: &str,
        consider_disruptions: bool,
        max_speed: f64,
        weight: f64,
    ) -> Result<Vec<HopRecord<NodeIndex>>, Error> {
        self.search_between(
            start_id,
            end_id,
            cross_time_field,
            consider_disruptions,
            max_speed,
            weight,
        )
        .map(|outcome| outcome.hops)
    }

    /// Lays `hops` found from `start_id` out as an itinerary
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPoint`] if `start_id` is unknown
    pub fn itinerary(
        &self,
        start_id: PointId,
        hops: &[HopRecord<NodeIndex>],
    ) -> Result<Option<RouteItinerary>, Error> {
        let start = self.point(start_id)?;
        Ok(RouteItinerary::new(&self.graph, start, hops))
    }
}
