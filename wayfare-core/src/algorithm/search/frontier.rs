//! Frontier variants: FIFO for BFS, LIFO for DFS, best-first
//! (min-heap keyed by `node.value`) for UCS/A*/bidirectional search.
//!
//! Frontiers operate purely on [`NodeRef`] arena indices plus an `f64`
//! ordering key -- they do not need to know the state type `S`, so unlike
//! [`super::node::SearchTree`] they are not generic over it.

use super::node::NodeRef;
use crate::util::priority_queue::InternalPriorityQueue;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::VecDeque;

pub trait Frontier {
    fn add(&mut self, node: NodeRef, value: f64);
    fn remove(&mut self) -> Option<NodeRef>;
    /// The top of the frontier under this discipline's ordering, without
    /// removing it.
    fn peek_top(&self) -> Option<(NodeRef, f64)>;
    fn clear(&mut self);
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn len(&self) -> usize;
    fn high_water_mark(&self) -> usize;
    /// Node refs currently queued, in no particular order -- used only to
    /// build the `frontier` field of a trace event.
    fn snapshot(&self) -> Vec<NodeRef>;
}

#[derive(Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeRef>,
    high_water: usize,
}

impl Frontier for FifoFrontier {
    fn add(&mut self, node: NodeRef, _value: f64) {
        self.queue.push_back(node);
        self.high_water = self.high_water.max(self.queue.len());
    }

    fn remove(&mut self) -> Option<NodeRef> {
        self.queue.pop_front()
    }

    fn peek_top(&self) -> Option<(NodeRef, f64)> {
        self.queue.front().map(|&n| (n, 0.0))
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn high_water_mark(&self) -> usize {
        self.high_water
    }

    fn snapshot(&self) -> Vec<NodeRef> {
        self.queue.iter().copied().collect()
    }
}

#[derive(Default)]
pub struct LifoFrontier {
    stack: Vec<NodeRef>,
    high_water: usize,
}

impl Frontier for LifoFrontier {
    fn add(&mut self, node: NodeRef, _value: f64) {
        self.stack.push(node);
        self.high_water = self.high_water.max(self.stack.len());
    }

    fn remove(&mut self) -> Option<NodeRef> {
        self.stack.pop()
    }

    fn peek_top(&self) -> Option<(NodeRef, f64)> {
        self.stack.last().map(|&n| (n, 0.0))
    }

    fn clear(&mut self) {
        self.stack.clear();
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn high_water_mark(&self) -> usize {
        self.high_water
    }

    fn snapshot(&self) -> Vec<NodeRef> {
        self.stack.clone()
    }
}

/// Min-heap keyed by `node.value`. Ties broken by insertion order (FIFO
/// among equals) via a monotonically increasing sequence number folded
/// into the sort key: "Implementations must ensure this (e.g.,
/// by composite key `(value, insertion_seq)`); otherwise results are not
/// reproducible."
#[derive(Default)]
pub struct BestFirstFrontier {
    heap: InternalPriorityQueue<NodeRef, Reverse<(OrderedFloat<f64>, u64)>>,
    next_seq: u64,
    high_water: usize,
}

impl Frontier for BestFirstFrontier {
    fn add(&mut self, node: NodeRef, value: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(node, Reverse((OrderedFloat(value), seq)));
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn remove(&mut self) -> Option<NodeRef> {
        self.heap.pop().map(|(n, _)| n)
    }

    fn peek_top(&self) -> Option<(NodeRef, f64)> {
        self.heap.peek().map(|(&n, Reverse((v, _)))| (n, v.0))
    }

    fn clear(&mut self) {
        self.heap.clear();
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn high_water_mark(&self) -> usize {
        self.high_water
    }

    fn snapshot(&self) -> Vec<NodeRef> {
        self.heap.iter().map(|(&n, _)| n).collect()
    }
}
