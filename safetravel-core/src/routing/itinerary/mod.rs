//! Caller-facing view of a found route

mod to_geojson;

use geo::{LineString, Point};

use crate::{PointId, Seconds, model::RoadNetwork, routing::astar::HopRecord};

/// One point of an itinerary, in travel order
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryStop {
    pub id: PointId,
    pub position: Point<f64>,
    /// Travel time from the start
    pub time: Seconds,
}

/// A route laid out from start to goal
#[derive(Debug, Clone, PartialEq)]
pub struct RouteItinerary {
    stops: Vec<ItineraryStop>,
}

impl RouteItinerary {
    /// Builds the itinerary for `hops` found from `start`.
    ///
    /// Returns `None` when there are no hops, i.e. no route or start == goal.
    pub fn new<G: RoadNetwork>(
        graph: &G,
        start: G::Node,
        hops: &[HopRecord<G::Node>],
    ) -> Option<Self> {
        if hops.is_empty() {
            return None;
        }

        let origin = ItineraryStop {
            id: graph.point_id(start),
            position: graph.coordinate(start),
            time: 0.0,
        };
        let stops = std::iter::once(origin)
            .chain(hops.iter().rev().map(|hop| ItineraryStop {
                id: graph.point_id(hop.node),
                position: graph.coordinate(hop.node),
                time: hop.time,
            }))
            .collect();

        Some(Self { stops })
    }

    pub fn stops(&self) -> &[ItineraryStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Travel time from start to goal
    pub fn total_time(&self) -> Seconds {
        self.stops.last().map_or(0.0, |stop| stop.time)
    }

    pub fn point_ids(&self) -> Vec<PointId> {
        self.stops.iter().map(|stop| stop.id).collect()
    }

    pub fn to_line_string(&self) -> LineString<f64> {
        self.stops.iter().map(|stop| stop.position).collect()
    }
}
