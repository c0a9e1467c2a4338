use indicatif::{ProgressBar, ProgressStyle};
use rand::prelude::*;

use crate::{
    congestion::{Congestion, CongestionIndex},
    error::Result,
    graphs::{road_graph::RoadGraph, Graph, Weight},
    search::route::RouteRequest,
};

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(
            " {msg} {wide_bar} {pos}/{len} estimated remaining: {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Random request with source != target, `None` if the graph has fewer than
/// two vertices.
pub fn random_request<R: Rng>(graph: &dyn Graph, rng: &mut R) -> Option<RouteRequest> {
    if graph.number_of_vertices() <= 1 {
        // not enough vertices to get a request with source != target
        return None;
    }

    // guarantee that source != target
    let source = rng.gen_range(0..graph.number_of_vertices());
    let mut target = rng.gen_range(0..graph.number_of_vertices() - 1);
    if target >= source {
        target += 1;
    }

    Some(RouteRequest::new(source, target))
}

pub fn random_requests<R: Rng>(
    graph: &dyn Graph,
    number_of_requests: u32,
    rng: &mut R,
) -> Vec<RouteRequest> {
    (0..number_of_requests)
        .filter_map(|_| random_request(graph, rng))
        .collect()
}

/// Graph with random undirected roads between random vertices. Weights are
/// drawn from `1..=max_weight`.
pub fn random_road_graph<R: Rng>(
    number_of_vertices: u32,
    number_of_roads: u32,
    max_weight: Weight,
    rng: &mut R,
) -> Result<RoadGraph> {
    let mut graph = RoadGraph::with_vertices(number_of_vertices);
    if number_of_vertices == 0 {
        return Ok(graph);
    }

    for _ in 0..number_of_roads {
        let tail = rng.gen_range(0..number_of_vertices);
        let head = rng.gen_range(0..number_of_vertices);
        let weight = rng.gen_range(1..=max_weight.max(1));
        graph.add_undirected_edge(tail, head, weight)?;
    }

    Ok(graph)
}

/// Registers a random congestion level in `0..=max_level` for roughly the
/// given share of the graph's edges.
pub fn random_congestion<R: Rng>(
    graph: &dyn Graph,
    share: f64,
    max_level: Congestion,
    rng: &mut R,
) -> Result<CongestionIndex> {
    let mut congestion = CongestionIndex::for_graph(graph);

    for vertex in graph.vertices() {
        for edge in graph.out_edges(vertex) {
            if rng.gen_bool(share.clamp(0.0, 1.0)) {
                congestion.register(edge.tail(), edge.head(), rng.gen_range(0..=max_level))?;
            }
        }
    }

    Ok(congestion)
}
