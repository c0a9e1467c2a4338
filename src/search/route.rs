use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    congestion::{Congestion, CongestionBand},
    graphs::{road_graph::RoadGraph, Distance, VertexId},
};

/// Represents a request for finding a route between two vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub source: VertexId,
    pub target: VertexId,
}

impl RouteRequest {
    pub fn new(source: VertexId, target: VertexId) -> RouteRequest {
        RouteRequest { source, target }
    }
}

/// A road segment on a route whose congestion is above the planner's
/// threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CongestedSegment {
    pub tail: VertexId,
    pub head: VertexId,
    pub congestion: Congestion,
    pub band: CongestionBand,
}

/// Least cost route between two vertices.
///
/// `cost` is the sum of base weights and congestion penalties of all
/// segments. `congested_segments` lists flagged segments in travel order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub vertices: Vec<VertexId>,
    pub cost: Distance,
    pub congested_segments: Vec<CongestedSegment>,
}

impl Route {
    pub fn source(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    pub fn target(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    pub fn number_of_segments(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Renders the route with location names, e.g. `Delhi -> Chennai`.
    pub fn describe(&self, graph: &RoadGraph) -> String {
        self.vertices
            .iter()
            .map(|&vertex| graph.name(vertex).unwrap_or("?"))
            .join(" -> ")
    }
}
