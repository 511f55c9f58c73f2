//! Open/closed bookkeeping for best-first and A* search.
//!
//! Uses a `BinaryHeap` with lazy deletion: revising a node's cost pushes a
//! fresh entry and leaves the old one in the heap, where `pop` recognizes it
//! as stale and discards it.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::node::NodeId;

/// Heap ordering: lowest cost first, then the most recently opened node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    cost: usize,
    recency: Reverse<u64>,
    node: NodeId,
}

/// The live heap entry of an open node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    cost: usize,
    seq: u64,
}

/// Frontier for priority-ordered search.
///
/// Maintains:
/// - A min-heap of `(cost, recency)` entries, some of them stale
/// - The live slot of every open node
/// - The set of closed (already popped) nodes
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<Entry>>,
    open: HashMap<NodeId, Slot>,
    closed: HashSet<NodeId>,
    next_seq: u64,
    high_water: usize,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `node` with `cost`. Among equal costs it will be popped before
    /// every node opened earlier.
    pub fn push(&mut self, node: NodeId, cost: usize) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.closed.remove(&node);
        self.open.insert(node, Slot { cost, seq });
        self.heap.push(Reverse(Entry {
            cost,
            recency: Reverse(seq),
            node,
        }));
        self.high_water = self.high_water.max(self.open.len());
    }

    /// Revises the cost of an open node in place. Its recency is kept, so it
    /// still ties as if it had been opened at its original time.
    ///
    /// Returns `false` if the node is not open.
    pub fn update(&mut self, node: NodeId, cost: usize) -> bool {
        let Some(slot) = self.open.get_mut(&node) else {
            return false;
        };
        slot.cost = cost;
        let seq = slot.seq;
        self.heap.push(Reverse(Entry {
            cost,
            recency: Reverse(seq),
            node,
        }));
        true
    }

    /// Moves a closed node back into the frontier.
    ///
    /// Returns `false` if the node is not closed.
    pub fn reopen(&mut self, node: NodeId, cost: usize) -> bool {
        if !self.closed.contains(&node) {
            return false;
        }
        self.push(node, cost);
        true
    }

    /// Pops the cheapest open node and closes it.
    pub fn pop(&mut self) -> Option<NodeId> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            let live = Slot {
                cost: entry.cost,
                seq: entry.recency.0,
            };
            if self.open.get(&entry.node) == Some(&live) {
                self.open.remove(&entry.node);
                self.closed.insert(entry.node);
                return Some(entry.node);
            }
        }
        None
    }

    pub fn is_open(&self, node: NodeId) -> bool {
        self.open.contains_key(&node)
    }

    pub fn is_closed(&self, node: NodeId) -> bool {
        self.closed.contains(&node)
    }

    /// Number of open nodes.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Largest number of simultaneously open nodes.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
