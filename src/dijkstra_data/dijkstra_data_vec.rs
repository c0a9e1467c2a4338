use super::DijkstraData;
use crate::{
    graphs::{Distance, VertexId},
    queue::{DijkstraQueue, DijkstraQueueElement},
};

#[derive(Clone, Default)]
pub struct DijkstraEntry {
    pub predecessor: Option<VertexId>,
    pub distance: Option<Distance>,
    pub is_expanded: bool,
}

/// Per vertex search state stored in a vector.
///
/// A new instance is created for every search, it is never shared between
/// searches.
pub struct DijkstraDataVec {
    pub queue: Box<dyn DijkstraQueue>,
    pub vertices: Vec<DijkstraEntry>,
}

impl DijkstraDataVec {
    pub fn new(
        number_of_vertices: usize,
        source: VertexId,
        queue: Box<dyn DijkstraQueue>,
    ) -> DijkstraDataVec {
        let vertices = vec![DijkstraEntry::default(); number_of_vertices];
        let mut data = DijkstraDataVec { queue, vertices };

        data.vertices[source as usize].distance = Some(0);
        data.queue.push(DijkstraQueueElement::new(0, source));

        data
    }

    /// Tentative distance of every vertex, `None` for unreached vertices.
    pub fn distances(&self) -> Vec<Option<Distance>> {
        self.vertices.iter().map(|entry| entry.distance).collect()
    }
}

impl DijkstraData for DijkstraDataVec {
    fn search_space_size(&self) -> u32 {
        self.vertices
            .iter()
            .filter(|entry| entry.is_expanded)
            .count() as u32
    }

    fn pop(&mut self) -> Option<DijkstraQueueElement> {
        while let Some(state) = self.queue.pop() {
            if !self.vertices[state.vertex as usize].is_expanded {
                self.vertices[state.vertex as usize].is_expanded = true;
                return Some(state);
            }
        }

        None
    }

    fn update(&mut self, tail: VertexId, head: VertexId, edge_cost: Distance) {
        let Some(distance_tail) = self.vertices[tail as usize].distance else {
            return;
        };

        let alternative_distance = distance_tail + edge_cost;
        let current_distance = self.vertices[head as usize]
            .distance
            .unwrap_or(Distance::MAX);
        if alternative_distance < current_distance {
            self.vertices[head as usize].predecessor = Some(tail);
            self.vertices[head as usize].distance = Some(alternative_distance);
            self.queue
                .push(DijkstraQueueElement::new(alternative_distance, head));
        }
    }

    fn get_distance(&self, vertex: VertexId) -> Option<Distance> {
        self.vertices.get(vertex as usize)?.distance
    }

    fn get_predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.vertices.get(vertex as usize)?.predecessor
    }
}
