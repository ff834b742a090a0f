//! Read-only access to a road graph
//!
//! The search and the cost model only ever talk to the graph through
//! [`RoadNetwork`], so the storage engine behind it can be swapped freely.

use std::hash::Hash;

use geo::Point;

use crate::PointId;

/// Read-only view of a road graph.
///
/// Nodes are road points, edges are directed ways between them. Disruptions
/// hang off points and penalise every edge that ends there.
pub trait RoadNetwork {
    /// Handle to a road point
    type Node: Copy + Eq + Hash;
    /// Handle to a directed way
    type Edge: Copy;
    /// Handle to a disruption record
    type Disruption: Copy;

    /// Whether the point carries the routable `Point` label
    fn is_routable(&self, node: Self::Node) -> bool;

    /// Stable application-level id of the point
    fn point_id(&self, node: Self::Node) -> PointId;

    /// Coordinate of the point (`x` = longitude or easting)
    fn coordinate(&self, node: Self::Node) -> Point<f64>;

    /// Distance in metres between two coordinates of this graph
    fn distance(&self, a: Point<f64>, b: Point<f64>) -> f64;

    /// Routable ways leaving `node`
    fn outgoing_edges(&self, node: Self::Node) -> impl Iterator<Item = Self::Edge> + '_;

    /// Number of routable ways arriving at `node`
    fn incoming_degree(&self, node: Self::Node) -> usize;

    /// Numeric property of a way, such as a traversal-time field.
    /// `None` when the way does not carry the property.
    fn edge_property(&self, edge: Self::Edge, field: &str) -> Option<f64>;

    /// Speed limit of the way, in metres per second
    fn edge_speed(&self, edge: Self::Edge) -> Option<f64>;

    /// Road class tag of the way (`primary`, `residential`, ...)
    fn edge_class(&self, edge: Self::Edge) -> Option<&str>;

    /// Point the way leads to
    fn end_node(&self, edge: Self::Edge) -> Self::Node;

    /// Disruptions attached to `node`
    fn disruptions(&self, node: Self::Node) -> impl Iterator<Item = Self::Disruption> + '_;

    /// Human readable identifier of a disruption, for diagnostics
    fn disruption_label(&self, disruption: Self::Disruption) -> String;

    /// Severity tag of a disruption (`Minimal`, `Moderate`, ...)
    fn disruption_severity(&self, disruption: Self::Disruption) -> Option<&str>;

    /// Whether the disruption closes the road
    fn disruption_closed(&self, disruption: Self::Disruption) -> bool {
        let _ = disruption;
        false
    }

    /// Upper bound on the number of points, used to size search state
    fn size_hint(&self) -> Option<usize> {
        None
    }
}
