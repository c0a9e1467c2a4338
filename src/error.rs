use thiserror::Error;

use crate::graphs::VertexId;

pub type Result<T> = std::result::Result<T, TrafficError>;

/// Errors raised at the boundaries of the crate: building a road graph,
/// registering congestion, resolving location names and reading networks.
///
/// A missing route is not an error, see [`crate::search::route_planner`].
#[derive(Error, Debug)]
pub enum TrafficError {
    #[error("unknown location: {name}")]
    UnknownLocation { name: String },

    #[error("location {name} is defined more than once")]
    DuplicateLocation { name: String },

    #[error("vertex {vertex} is out of range for a graph with {number_of_vertices} vertices")]
    VertexOutOfRange {
        vertex: VertexId,
        number_of_vertices: u32,
    },

    #[error("graph has {graph} vertices but the congestion index was built for {index}")]
    VertexCountMismatch { graph: u32, index: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TrafficError::UnknownLocation {
            name: "Atlantis".to_string(),
        };
        assert!(err.to_string().contains("Atlantis"));

        let err = TrafficError::VertexOutOfRange {
            vertex: 31,
            number_of_vertices: 30,
        };
        assert!(err.to_string().contains("31"));
        assert!(err.to_string().contains("30"));
    }
}
