use serde::Serialize;

use super::state::{ClosedSet, OpenSet, SearchNode};
use crate::{Error, PointId, Seconds};

/// One point of a found route
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HopRecord<N> {
    /// Position counted backwards from the goal, which is hop 0
    pub index: usize,
    pub node: N,
    /// Travel time from the start to this point
    pub time: Seconds,
}

/// Walks the parent chain from the goal back to the start.
///
/// Hops come out goal first; the start point itself is not emitted, so the
/// last hop is the start's direct successor.
pub(super) fn reconstruct<N: Copy>(
    goal: (PointId, SearchNode<N>),
    start: PointId,
    open: &OpenSet<N>,
    closed: &ClosedSet<N>,
) -> Result<Vec<HopRecord<N>>, Error> {
    let (mut step_id, mut step) = goal;
    let mut hops = Vec::new();
    let limit = open.len() + closed.len();

    while step_id != start {
        hops.push(HopRecord {
            index: hops.len(),
            node: step.node,
            time: step.cost.g,
        });

        step_id = step
            .parent
            .ok_or(Error::UnrecoverableError("parent chain ends before the start"))?;
        // A parent reopened after its child was settled sits in the open set
        step = *closed
            .get(step_id)
            .or_else(|| open.get(step_id))
            .ok_or(Error::UnrecoverableError("parent chain leaves the search space"))?;

        if hops.len() > limit {
            return Err(Error::UnrecoverableError("parent chain contains a cycle"));
        }
    }

    Ok(hops)
}
