use std::{cmp::Ordering, collections::BTreeSet};

use hashbrown::HashMap;

use crate::{Error, PointId, Seconds};

/// Cost so far (`g`) and estimated remaining cost (`h`) of a search node
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cost {
    pub g: Seconds,
    pub h: Seconds,
}

impl Cost {
    pub fn new(g: Seconds, h: Seconds) -> Self {
        Self { g, h }
    }

    /// Ordering key of the open set
    pub fn total(&self) -> Seconds {
        self.g + self.h
    }
}

/// Best known way of reaching a point during one search
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchNode<N> {
    pub(crate) node: N,
    pub(crate) cost: Cost,
    /// `None` only for the start point
    pub(crate) parent: Option<PointId>,
}

/// Position of an open node in the priority order
#[derive(Debug, Clone, Copy)]
pub(super) struct QueueKey {
    priority: Seconds,
    seq: u64,
    id: PointId,
}

// Min ordering by priority; equal priorities pop in insertion order
impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueKey {}

#[derive(Debug)]
struct OpenEntry<N> {
    node: SearchNode<N>,
    key: QueueKey,
}

/// Points waiting for expansion.
///
/// The lookup map and the priority order are only ever changed together, so
/// both always hold the same points.
#[derive(Debug)]
pub(crate) struct OpenSet<N> {
    entries: HashMap<PointId, OpenEntry<N>>,
    queue: BTreeSet<QueueKey>,
    next_seq: u64,
}

impl<N: Copy> OpenSet<N> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            queue: BTreeSet::new(),
            next_seq: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.entries.len() == self.queue.len()
    }

    pub(crate) fn get(&self, id: PointId) -> Option<&SearchNode<N>> {
        self.entries.get(&id).map(|entry| &entry.node)
    }

    /// Inserts `node`, replacing any entry already held for `id`
    pub(crate) fn upsert(&mut self, id: PointId, node: SearchNode<N>) {
        if let Some(stale) = self.entries.remove(&id) {
            self.queue.remove(&stale.key);
        }

        let key = QueueKey {
            priority: node.cost.total(),
            seq: self.next_seq,
            id,
        };
        self.next_seq += 1;

        self.queue.insert(key);
        self.entries.insert(id, OpenEntry { node, key });
    }

    /// Removes and returns the entry with the smallest `g + h`
    pub(crate) fn pop_min(&mut self) -> Result<Option<(PointId, SearchNode<N>)>, Error> {
        let Some(key) = self.queue.pop_first() else {
            return Ok(None);
        };
        let entry = self
            .entries
            .remove(&key.id)
            .ok_or(Error::UnrecoverableError("open set views disagree"))?;
        Ok(Some((key.id, entry.node)))
    }
}

/// Points whose cost is currently considered final
#[derive(Debug)]
pub(crate) struct ClosedSet<N> {
    nodes: HashMap<PointId, SearchNode<N>>,
}

impl<N: Copy> ClosedSet<N> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: PointId) -> Option<&SearchNode<N>> {
        self.nodes.get(&id)
    }

    pub(crate) fn insert(&mut self, id: PointId, node: SearchNode<N>) {
        self.nodes.insert(id, node);
    }

    pub(crate) fn remove(&mut self, id: PointId) -> Option<SearchNode<N>> {
        self.nodes.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(g: f64, h: f64) -> SearchNode<u32> {
        SearchNode {
            node: 0,
            cost: Cost::new(g, h),
            parent: None,
        }
    }

    #[test]
    fn pops_in_total_cost_order() {
        let mut open = OpenSet::with_capacity(4);
        open.upsert(1, node(5.0, 5.0));
        open.upsert(2, node(1.0, 2.0));
        open.upsert(3, node(0.0, 7.0));

        let order: Vec<_> = std::iter::from_fn(|| open.pop_min().unwrap().map(|(id, _)| id)).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(open.len(), 0);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut open = OpenSet::with_capacity(4);
        open.upsert(9, node(1.0, 1.0));
        open.upsert(3, node(2.0, 0.0));
        open.upsert(5, node(0.0, 2.0));

        let order: Vec<_> = std::iter::from_fn(|| open.pop_min().unwrap().map(|(id, _)| id)).collect();
        assert_eq!(order, vec![9, 3, 5]);
    }

    #[test]
    fn upsert_replaces_without_duplicating() {
        let mut open = OpenSet::with_capacity(4);
        open.upsert(1, node(10.0, 0.0));
        open.upsert(2, node(5.0, 0.0));
        open.upsert(1, node(1.0, 0.0));

        assert_eq!(open.len(), 2);
        assert!(open.is_consistent());
        assert_eq!(open.get(1).unwrap().cost.g, 1.0);

        let (id, popped) = open.pop_min().unwrap().unwrap();
        assert_eq!(id, 1);
        assert_eq!(popped.cost.g, 1.0);
        assert_eq!(open.len(), 1);
        assert!(open.is_consistent());
    }

    #[test]
    fn closed_set_reopens_by_removal() {
        let mut closed = ClosedSet::with_capacity(2);
        closed.insert(4, node(3.0, 0.0));
        assert!(closed.get(4).is_some());
        assert!(closed.remove(4).is_some());
        assert_eq!(closed.len(), 0);
    }
}
