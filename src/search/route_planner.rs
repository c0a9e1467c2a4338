use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use super::route::{CongestedSegment, Route, RouteRequest};
use crate::{
    config::PlannerConfig,
    congestion::{CongestionBand, CongestionIndex},
    dijkstra_data::{dijkstra_data_vec::DijkstraDataVec, DijkstraData},
    error::{Result, TrafficError},
    graphs::{
        edge::{DirectedEdge, WeightedEdge},
        Distance, Graph, VertexId,
    },
    queue::DijkstraQueueElement,
};

/// Dijkstra search where every edge costs its base weight plus the congestion
/// registered for its road segment.
///
/// The planner only reads the graph and the congestion index. Every query
/// allocates its own search state, so one planner can answer queries from
/// several threads at once.
pub struct RoutePlanner<'a> {
    graph: &'a dyn Graph,
    congestion: &'a CongestionIndex,
    config: PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(
        graph: &'a dyn Graph,
        congestion: &'a CongestionIndex,
    ) -> Result<RoutePlanner<'a>> {
        RoutePlanner::with_config(graph, congestion, PlannerConfig::default())
    }

    /// Fails if the congestion index was built for a different number of
    /// vertices than the graph has, as its keys would not match the graph's
    /// segments.
    pub fn with_config(
        graph: &'a dyn Graph,
        congestion: &'a CongestionIndex,
        config: PlannerConfig,
    ) -> Result<RoutePlanner<'a>> {
        if graph.number_of_vertices() != congestion.number_of_vertices() {
            return Err(TrafficError::VertexCountMismatch {
                graph: graph.number_of_vertices(),
                index: congestion.number_of_vertices(),
            });
        }

        Ok(RoutePlanner {
            graph,
            congestion,
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Base weight plus congestion penalty.
    pub fn edge_cost(&self, edge: &WeightedEdge) -> Distance {
        edge.weight() as Distance + self.congestion.penalty(edge.tail(), edge.head()) as Distance
    }

    /// Least cost route from source to target, `None` if the target can not
    /// be reached.
    pub fn find_route(&self, source: VertexId, target: VertexId) -> Result<Option<Route>> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;

        let data = self.search(source, Some(target));

        let Some(cost) = data.get_distance(target) else {
            debug!("no route from {} to {}", source, target);
            return Ok(None);
        };
        let Some(vertices) = data.get_path(target) else {
            return Ok(None);
        };

        debug!(
            "route from {} to {} with cost {} after expanding {} vertices",
            source,
            target,
            cost,
            data.search_space_size()
        );

        let congested_segments = self.congested_segments(&vertices);

        Ok(Some(Route {
            vertices,
            cost,
            congested_segments,
        }))
    }

    /// Cost of the cheapest route from source to every vertex.
    pub fn shortest_path_tree(&self, source: VertexId) -> Result<Vec<Option<Distance>>> {
        self.check_vertex(source)?;

        let data = self.search(source, None);
        Ok(data.distances())
    }

    /// Answers independent requests in parallel.
    pub fn find_routes(&self, requests: &[RouteRequest]) -> Vec<Result<Option<Route>>> {
        requests
            .par_iter()
            .map(|request| self.find_route(request.source, request.target))
            .collect()
    }

    /// Segments of the path whose congestion exceeds the configured
    /// threshold, in path order.
    pub fn congested_segments(&self, vertices: &[VertexId]) -> Vec<CongestedSegment> {
        vertices
            .iter()
            .tuple_windows()
            .filter_map(|(&tail, &head)| {
                let congestion = self.congestion.penalty(tail, head);
                if congestion <= self.config.congestion_threshold {
                    return None;
                }
                Some(CongestedSegment {
                    tail,
                    head,
                    congestion,
                    band: CongestionBand::from_level(congestion),
                })
            })
            .collect()
    }

    /// Cost of travelling along the given vertices, taking the cheapest of
    /// parallel edges. `None` if two consecutive vertices are not connected.
    pub fn path_cost(&self, vertices: &[VertexId]) -> Option<Distance> {
        vertices
            .iter()
            .tuple_windows()
            .map(|(&tail, &head)| {
                let edge = DirectedEdge::new(tail, head);
                let weight = self.graph.get_edge_weight(&edge)?;
                Some(self.edge_cost(&WeightedEdge::new(tail, head, weight)))
            })
            .sum()
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if vertex < self.graph.number_of_vertices() {
            return Ok(());
        }

        Err(TrafficError::VertexOutOfRange {
            vertex,
            number_of_vertices: self.graph.number_of_vertices(),
        })
    }

    // Runs until the target is expanded or, without a target, until the
    // frontier is empty. Labels of expanded vertices are final.
    fn search(&self, source: VertexId, target: Option<VertexId>) -> DijkstraDataVec {
        let mut data = DijkstraDataVec::new(
            self.graph.number_of_vertices() as usize,
            source,
            self.config.queue.build(),
        );

        while let Some(DijkstraQueueElement { vertex, .. }) = data.pop() {
            if Some(vertex) == target {
                break;
            }

            self.graph
                .out_edges(vertex)
                .for_each(|edge| data.update(vertex, edge.head(), self.edge_cost(&edge)));
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::road_graph::RoadGraph;

    #[test]
    fn mismatched_index_is_rejected() {
        let graph = RoadGraph::with_vertices(3);
        let congestion = CongestionIndex::new(30);
        assert!(matches!(
            RoutePlanner::new(&graph, &congestion),
            Err(TrafficError::VertexCountMismatch {
                graph: 3,
                index: 30
            })
        ));
    }

    #[test]
    fn out_of_range_query_is_rejected() {
        let graph = RoadGraph::with_vertices(3);
        let congestion = CongestionIndex::for_graph(&graph);
        let planner = RoutePlanner::new(&graph, &congestion).unwrap();
        assert!(matches!(
            planner.find_route(0, 3),
            Err(TrafficError::VertexOutOfRange { vertex: 3, .. })
        ));
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut graph = RoadGraph::with_vertices(3);
        graph.add_undirected_edge(0, 1, 1).unwrap();
        graph.add_undirected_edge(1, 2, 1).unwrap();
        let mut congestion = CongestionIndex::for_graph(&graph);
        congestion.register(0, 1, 2).unwrap();
        congestion.register(1, 2, 3).unwrap();

        let planner = RoutePlanner::new(&graph, &congestion).unwrap();
        let segments = planner.congested_segments(&[0, 1, 2]);
        assert_eq!(
            segments,
            vec![CongestedSegment {
                tail: 1,
                head: 2,
                congestion: 3,
                band: CongestionBand::Moderate,
            }]
        );
    }
}
