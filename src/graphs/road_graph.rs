use std::slice::Iter;

use ahash::{HashMap, HashMapExt};

use super::{
    edge::{TaillessEdge, WeightedEdge},
    Graph, VertexId, Weight,
};
use crate::error::{Result, TrafficError};

/// Adjacency list graph over named locations.
///
/// The set of vertices is fixed when the graph is built. Edges can be added
/// afterwards but never removed, and parallel edges are kept as they are.
#[derive(Clone, Debug)]
pub struct RoadGraph {
    names: Vec<String>,
    name_to_vertex: HashMap<String, VertexId>,
    out_edges: Vec<Vec<TaillessEdge>>,
}

impl RoadGraph {
    /// Creates a graph with one vertex per name, numbered in iteration order.
    pub fn new<I, S>(names: I) -> Result<RoadGraph>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut name_to_vertex = HashMap::with_capacity(names.len());
        for (vertex, name) in names.iter().enumerate() {
            if name_to_vertex.insert(name.clone(), vertex as VertexId).is_some() {
                return Err(TrafficError::DuplicateLocation { name: name.clone() });
            }
        }

        let out_edges = vec![Vec::new(); names.len()];

        Ok(RoadGraph {
            names,
            name_to_vertex,
            out_edges,
        })
    }

    /// Creates a graph whose vertices are named by their index.
    pub fn with_vertices(number_of_vertices: u32) -> RoadGraph {
        let names: Vec<String> = (0..number_of_vertices)
            .map(|vertex| vertex.to_string())
            .collect();
        let name_to_vertex = names
            .iter()
            .enumerate()
            .map(|(vertex, name)| (name.clone(), vertex as VertexId))
            .collect();

        RoadGraph {
            names,
            name_to_vertex,
            out_edges: vec![Vec::new(); number_of_vertices as usize],
        }
    }

    pub fn add_undirected_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        weight: Weight,
    ) -> Result<()> {
        self.check_vertex(tail)?;
        self.check_vertex(head)?;

        self.out_edges[tail as usize].push(TaillessEdge::new(head, weight));
        self.out_edges[head as usize].push(TaillessEdge::new(tail, weight));

        Ok(())
    }

    pub fn add_directed_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        weight: Weight,
    ) -> Result<()> {
        self.check_vertex(tail)?;
        self.check_vertex(head)?;

        self.out_edges[tail as usize].push(TaillessEdge::new(head, weight));

        Ok(())
    }

    pub fn vertex_by_name(&self, name: &str) -> Result<VertexId> {
        self.name_to_vertex
            .get(name)
            .copied()
            .ok_or_else(|| TrafficError::UnknownLocation {
                name: name.to_string(),
            })
    }

    pub fn name(&self, vertex: VertexId) -> Option<&str> {
        self.names.get(vertex as usize).map(String::as_str)
    }

    pub fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if (vertex as usize) < self.out_edges.len() {
            return Ok(());
        }

        Err(TrafficError::VertexOutOfRange {
            vertex,
            number_of_vertices: self.number_of_vertices(),
        })
    }
}

impl Graph for RoadGraph {
    fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.out_edges.iter().map(Vec::len).sum::<usize>() as u32
    }

    fn out_edges(
        &self,
        source: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_> {
        // Struct is needed as source would otherwise not live long enough.
        struct OutEdgeIterator<'a> {
            source: VertexId,
            tailless_edge_iterator: Iter<'a, TaillessEdge>,
        }

        impl<'a> Iterator for OutEdgeIterator<'a> {
            type Item = WeightedEdge;

            fn next(&mut self) -> Option<Self::Item> {
                let edge = self.tailless_edge_iterator.next()?;
                Some(edge.set_tail(self.source))
            }
        }

        impl<'a> ExactSizeIterator for OutEdgeIterator<'a> {
            fn len(&self) -> usize {
                self.tailless_edge_iterator.len()
            }
        }

        let tailless_edge_iterator = if let Some(edges) = self.out_edges.get(source as usize) {
            edges.iter()
        } else {
            [].iter()
        };

        Box::new(OutEdgeIterator {
            source,
            tailless_edge_iterator,
        })
    }
}
