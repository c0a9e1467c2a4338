use std::collections::BinaryHeap;

use super::{DijkstraQueue, DijkstraQueueElement};

#[derive(Clone, Default)]
pub struct HeapQueue {
    queue: BinaryHeap<DijkstraQueueElement>,
}

impl HeapQueue {
    pub fn new() -> HeapQueue {
        HeapQueue {
            queue: BinaryHeap::new(),
        }
    }
}

impl DijkstraQueue for HeapQueue {
    fn push(&mut self, state: DijkstraQueueElement) {
        self.queue.push(state)
    }

    fn pop(&mut self) -> Option<DijkstraQueueElement> {
        self.queue.pop()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
