use crate::{
    graphs::{Distance, VertexId},
    queue::DijkstraQueueElement,
};

pub mod dijkstra_data_vec;

/// Scratch state of a single Dijkstra search: tentative distances,
/// predecessors and the frontier.
pub trait DijkstraData {
    /// Number of vertices taken from the frontier so far.
    fn search_space_size(&self) -> u32;

    /// Pops the closest vertex that has not been expanded yet and marks it as
    /// expanded. Stale frontier entries are skipped.
    fn pop(&mut self) -> Option<DijkstraQueueElement>;

    /// Relaxes the edge from tail to head with the given cost.
    fn update(&mut self, tail: VertexId, head: VertexId, edge_cost: Distance);

    fn get_distance(&self, vertex: VertexId) -> Option<Distance>;

    fn get_predecessor(&self, vertex: VertexId) -> Option<VertexId>;

    /// Vertices from the source to the target, if the target was reached.
    fn get_path(&self, target: VertexId) -> Option<Vec<VertexId>> {
        self.get_distance(target)?;

        let mut route = vec![target];
        let mut current = target;
        while let Some(predecessor) = self.get_predecessor(current) {
            current = predecessor;
            route.push(current);
        }
        route.reverse();

        Some(route)
    }
}
