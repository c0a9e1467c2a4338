use std::{fs::File, io::BufReader, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    congestion::{Congestion, CongestionIndex, DuplicatePolicy},
    error::Result,
    graphs::{road_graph::RoadGraph, Graph, Weight},
};

/// A road between two named locations. Roads are travelable in both
/// directions unless marked as one way.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoadDescription {
    pub from: String,
    pub to: String,
    pub weight: Weight,
    #[serde(default)]
    pub one_way: bool,
}

/// Live traffic report for the road segment between two locations. The
/// direction of the report does not matter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CongestionReport {
    pub from: String,
    pub to: String,
    pub level: Congestion,
}

/// Description of a road network as read from a JSON document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoadNetwork {
    pub locations: Vec<String>,
    #[serde(default)]
    pub roads: Vec<RoadDescription>,
    #[serde(default)]
    pub congestion: Vec<CongestionReport>,
}

impl RoadNetwork {
    pub fn from_json_str(json: &str) -> Result<RoadNetwork> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<RoadNetwork> {
        let reader = BufReader::new(File::open(path)?);
        let network: RoadNetwork = serde_json::from_reader(reader)?;
        info!(
            "read {} locations, {} roads and {} congestion reports from {}",
            network.locations.len(),
            network.roads.len(),
            network.congestion.len(),
            path.display()
        );
        Ok(network)
    }

    /// Builds the road graph and the congestion index. Fails on duplicate
    /// location names and on roads or reports that name unknown locations.
    pub fn build(&self, policy: DuplicatePolicy) -> Result<(RoadGraph, CongestionIndex)> {
        let mut graph = RoadGraph::new(self.locations.iter().cloned())?;

        for road in self.roads.iter() {
            let tail = graph.vertex_by_name(&road.from)?;
            let head = graph.vertex_by_name(&road.to)?;
            if road.one_way {
                graph.add_directed_edge(tail, head, road.weight)?;
            } else {
                graph.add_undirected_edge(tail, head, road.weight)?;
            }
        }

        let mut congestion = CongestionIndex::for_graph(&graph);
        for report in self.congestion.iter() {
            let tail = graph.vertex_by_name(&report.from)?;
            let head = graph.vertex_by_name(&report.to)?;
            congestion.register_with(tail, head, report.level, policy)?;
        }

        info!(
            "built road graph with {} vertices and {} edges, {} congested segments",
            graph.number_of_vertices(),
            graph.number_of_edges(),
            congestion.len()
        );

        Ok((graph, congestion))
    }
}
