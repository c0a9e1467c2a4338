use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use self::{heap_queue::HeapQueue, radix_queue::RadixQueue};
use crate::graphs::{Distance, VertexId};

pub mod heap_queue;
pub mod radix_queue;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DijkstraQueueElement {
    pub distance: Distance,
    pub vertex: VertexId,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for DijkstraQueueElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // Notice that the we flip the ordering on distances.
        // In case of a tie we compare vertices - this step is necessary
        // to make implementations of `PartialEq` and `Ord` consistent.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DijkstraQueueElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl DijkstraQueueElement {
    pub fn new(distance: Distance, vertex: VertexId) -> DijkstraQueueElement {
        DijkstraQueueElement { distance, vertex }
    }
}

/// Frontier of a Dijkstra search.
///
/// Implementations may assume that pushed distances are never smaller than
/// the distance of the last popped element.
pub trait DijkstraQueue {
    fn push(&mut self, state: DijkstraQueueElement);
    fn pop(&mut self) -> Option<DijkstraQueueElement>;
    fn is_empty(&self) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    #[default]
    Heap,
    Radix,
}

impl QueueKind {
    pub fn build(&self) -> Box<dyn DijkstraQueue> {
        match self {
            QueueKind::Heap => Box::new(HeapQueue::new()),
            QueueKind::Radix => Box::new(RadixQueue::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut queue: Box<dyn DijkstraQueue>) -> Vec<Distance> {
        for (distance, vertex) in [(5, 0), (1, 1), (3, 2), (1, 3)] {
            queue.push(DijkstraQueueElement::new(distance, vertex));
        }

        let mut distances = Vec::new();
        while let Some(element) = queue.pop() {
            distances.push(element.distance);
        }
        assert!(queue.is_empty());
        distances
    }

    #[test]
    fn queues_pop_in_ascending_order() {
        assert_eq!(drain(QueueKind::Heap.build()), vec![1, 1, 3, 5]);
        assert_eq!(drain(QueueKind::Radix.build()), vec![1, 1, 3, 5]);
    }
}
