use geo::Point;
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use rstar::RTree;

use super::components::{CoordinateSystem, Disruption, RoadEdge, RoadNode};
use super::network::{IndexedPoint, RoadGraph};
use crate::{Error, PointId, ROUTABLE_LABEL};

/// Incrementally assembles a [`RoadGraph`]
#[derive(Debug, Default)]
pub struct RoadGraphBuilder {
    graph: DiGraph<RoadNode, RoadEdge>,
    crs: CoordinateSystem,
    disruptions: Vec<Disruption>,
    point_disruptions: HashMap<NodeIndex, Vec<usize>>,
    id_index: HashMap<PointId, NodeIndex>,
}

impl RoadGraphBuilder {
    pub fn new(crs: CoordinateSystem) -> Self {
        Self {
            crs,
            ..Self::default()
        }
    }

    pub fn with_capacity(crs: CoordinateSystem, nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            crs,
            id_index: HashMap::with_capacity(nodes),
            ..Self::default()
        }
    }

    /// Adds a point. Ids must be unique.
    pub fn add_node(&mut self, node: RoadNode) -> Result<NodeIndex, Error> {
        if self.id_index.contains_key(&node.id) {
            return Err(Error::InvalidData(format!("Duplicate point id {}", node.id)));
        }
        let id = node.id;
        let index = self.graph.add_node(node);
        self.id_index.insert(id, index);
        Ok(index)
    }

    /// Adds a routable point at `(x, y)`
    pub fn add_point(&mut self, id: PointId, x: f64, y: f64) -> Result<NodeIndex, Error> {
        self.add_node(RoadNode::routable(id, Point::new(x, y)))
    }

    /// Adds a directed way between two known points
    pub fn add_way(
        &mut self,
        from: PointId,
        to: PointId,
        edge: RoadEdge,
    ) -> Result<EdgeIndex, Error> {
        let source = self.lookup(from)?;
        let target = self.lookup(to)?;
        Ok(self.graph.add_edge(source, target, edge))
    }

    /// Adds the same way in both directions
    pub fn add_two_way(&mut self, a: PointId, b: PointId, edge: RoadEdge) -> Result<(), Error> {
        self.add_way(a, b, edge.clone())?;
        self.add_way(b, a, edge)?;
        Ok(())
    }

    /// Attaches a disruption to every listed point
    pub fn add_disruption(
        &mut self,
        disruption: Disruption,
        points: &[PointId],
    ) -> Result<usize, Error> {
        let nodes = points
            .iter()
            .map(|&id| self.lookup(id))
            .collect::<Result<Vec<_>, _>>()?;

        let index = self.disruptions.len();
        self.disruptions.push(disruption);
        for node in nodes {
            self.point_disruptions.entry(node).or_default().push(index);
        }
        Ok(index)
    }

    pub fn build(self) -> RoadGraph {
        let indexed = self
            .graph
            .node_indices()
            .filter(|&i| self.graph[i].has_label(ROUTABLE_LABEL))
            .map(|i| {
                let geometry = self.graph[i].geometry;
                IndexedPoint::new([geometry.x(), geometry.y()], i)
            })
            .collect();

        RoadGraph {
            graph: self.graph,
            crs: self.crs,
            disruptions: self.disruptions,
            point_disruptions: self.point_disruptions,
            id_index: self.id_index,
            rtree: RTree::bulk_load(indexed),
        }
    }

    fn lookup(&self, id: PointId) -> Result<NodeIndex, Error> {
        self.id_index
            .get(&id)
            .copied()
            .ok_or_else(|| Error::InvalidData(format!("Way references unknown point {id}")))
    }
}
