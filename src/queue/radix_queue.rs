use radix_heap::RadixHeapMap;

use super::{DijkstraQueue, DijkstraQueueElement};
use crate::graphs::{Distance, VertexId};

/// Monotone queue on top of a radix heap. The radix heap is a max-heap, so
/// distances are stored negated.
#[derive(Clone)]
pub struct RadixQueue {
    heap: RadixHeapMap<i64, VertexId>,
}

impl Default for RadixQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RadixQueue {
    pub fn new() -> RadixQueue {
        RadixQueue {
            heap: RadixHeapMap::new(),
        }
    }
}

impl DijkstraQueue for RadixQueue {
    fn push(&mut self, state: DijkstraQueueElement) {
        self.heap.push(-(state.distance as i64), state.vertex);
    }

    fn pop(&mut self) -> Option<DijkstraQueueElement> {
        let (negative_distance, vertex) = self.heap.pop()?;
        Some(DijkstraQueueElement {
            distance: -negative_distance as Distance,
            vertex,
        })
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
