use std::ops::Range;

use self::edge::{DirectedEdge, WeightedEdge};

pub mod edge;
pub mod road_graph;

pub type VertexId = u32;
pub type Weight = u32;
pub type Distance = u64;

pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    fn number_of_edges(&self) -> u32 {
        self.vertices()
            .map(|vertex| self.out_edges(vertex).len() as u32)
            .sum::<u32>()
    }

    fn vertices(&self) -> Range<VertexId> {
        0..self.number_of_vertices()
    }

    fn out_edges(
        &self,
        source: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_>;

    /// Weight of the cheapest edge from tail to head, if any. Parallel edges
    /// are kept in the graph, so this is a scan over the tail's out edges.
    fn get_edge_weight(&self, edge: &DirectedEdge) -> Option<Weight> {
        self.out_edges(edge.tail())
            .filter(|out_edge| out_edge.head() == edge.head())
            .map(|out_edge| out_edge.weight())
            .min()
    }
}
