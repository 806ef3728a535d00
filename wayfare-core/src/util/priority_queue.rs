use priority_queue::PriorityQueue;
use std::collections::hash_map::RandomState;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

/// Thin wrapper around `priority_queue::PriorityQueue` so the rest of the
/// crate depends on this module rather than the external crate directly.
///
/// `priority_queue::PriorityQueue` is a max-heap: `pop` returns the item
/// with the *greatest* priority. Callers that want a min-heap (every
/// best-first frontier in this crate does) should wrap their priority in
/// `std::cmp::Reverse`.
pub struct InternalPriorityQueue<I: Hash + Eq, P: Ord, S = RandomState>(pub PriorityQueue<I, P, S>);

impl<I: Hash + Eq, P: Ord> Default for InternalPriorityQueue<I, P, RandomState> {
    fn default() -> Self {
        InternalPriorityQueue(PriorityQueue::new())
    }
}

impl<I: Hash + Eq, P: Ord, S> Deref for InternalPriorityQueue<I, P, S> {
    type Target = PriorityQueue<I, P, S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<I: Hash + Eq, P: Ord, S> DerefMut for InternalPriorityQueue<I, P, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
