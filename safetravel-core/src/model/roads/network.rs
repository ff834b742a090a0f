use geo::Point;
use hashbrown::HashMap;
use log::warn;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{CoordinateSystem, Disruption, RoadEdge, RoadNode};
use crate::{PointId, ROUTABLE_LABEL, model::RoadNetwork};

/// Point of the spatial index, tagged with its graph node
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// In-memory road graph
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub(crate) graph: DiGraph<RoadNode, RoadEdge>,
    pub(crate) crs: CoordinateSystem,
    pub(crate) disruptions: Vec<Disruption>,
    pub(crate) point_disruptions: HashMap<NodeIndex, Vec<usize>>,
    pub(crate) id_index: HashMap<PointId, NodeIndex>,
    pub(crate) rtree: RTree<IndexedPoint>,
}

impl RoadGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn disruption_count(&self) -> usize {
        self.disruptions.len()
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.crs
    }

    /// Looks up a point by its stable id
    pub fn point(&self, id: PointId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&RoadNode> {
        self.graph.node_weight(index)
    }

    pub fn edge(&self, index: EdgeIndex) -> Option<&RoadEdge> {
        self.graph.edge_weight(index)
    }

    /// Way from `from` to `to`, if one exists
    pub fn find_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(from, to)
    }

    /// Nearest routable point to `point` together with its distance in metres
    pub fn nearest_point(&self, point: &Point<f64>) -> Option<(NodeIndex, f64)> {
        let nearest = self.rtree.nearest_neighbor(&[point.x(), point.y()])?;
        let node = nearest.data;
        let distance = self.crs.distance(*point, self.graph[node].geometry);
        Some((node, distance))
    }

    /// Read-only access to the underlying `petgraph` graph
    pub fn inner(&self) -> &DiGraph<RoadNode, RoadEdge> {
        &self.graph
    }
}

impl RoadNetwork for RoadGraph {
    type Node = NodeIndex;
    type Edge = EdgeIndex;
    type Disruption = usize;

    fn is_routable(&self, node: NodeIndex) -> bool {
        self.graph
            .node_weight(node)
            .is_some_and(|n| n.has_label(ROUTABLE_LABEL))
    }

    fn point_id(&self, node: NodeIndex) -> PointId {
        self.graph[node].id
    }

    fn coordinate(&self, node: NodeIndex) -> Point<f64> {
        self.graph[node].geometry
    }

    fn distance(&self, a: Point<f64>, b: Point<f64>) -> f64 {
        self.crs.distance(a, b)
    }

    fn outgoing_edges(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .filter(|e| self.is_routable(e.target()))
            .map(|e| e.id())
    }

    fn incoming_degree(&self, node: NodeIndex) -> usize {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .filter(|e| self.is_routable(e.source()))
            .count()
    }

    fn edge_property(&self, edge: EdgeIndex, field: &str) -> Option<f64> {
        self.graph[edge].cross_times.get(field).copied()
    }

    fn edge_speed(&self, edge: EdgeIndex) -> Option<f64> {
        let speed = self.graph[edge].maxspeed?;
        if speed.is_finite() && speed > 0.0 {
            Some(speed)
        } else {
            warn!("Way {} has unusable maxspeed {speed}", edge.index());
            None
        }
    }

    fn edge_class(&self, edge: EdgeIndex) -> Option<&str> {
        self.graph[edge].class.as_deref()
    }

    fn end_node(&self, edge: EdgeIndex) -> NodeIndex {
        self.graph.raw_edges()[edge.index()].target()
    }

    fn disruptions(&self, node: NodeIndex) -> impl Iterator<Item = usize> + '_ {
        self.point_disruptions
            .get(&node)
            .into_iter()
            .flat_map(|ids| ids.iter().copied())
    }

    fn disruption_label(&self, disruption: usize) -> String {
        self.disruptions[disruption].id.clone()
    }

    fn disruption_severity(&self, disruption: usize) -> Option<&str> {
        self.disruptions[disruption].severity.as_deref()
    }

    fn disruption_closed(&self, disruption: usize) -> bool {
        self.disruptions[disruption].closed
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.graph.node_count())
    }
}
