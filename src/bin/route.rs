use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::{error, info};
use serde::Serialize;
use traffic_paths::{
    config::{PlannerConfig, DEFAULT_CONGESTION_THRESHOLD},
    congestion::{Congestion, DuplicatePolicy},
    graphs::{road_graph::RoadGraph, Distance},
    network::RoadNetwork,
    queue::QueueKind,
    search::{route::Route, route_planner::RoutePlanner},
    Result,
};

/// Finds the cheapest route between two locations of a road network, where
/// the cost of a road is its length plus its current congestion.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Road network in .json format
    #[arg(short, long)]
    network: PathBuf,

    /// Name of the start location
    #[arg(short, long)]
    source: String,

    /// Name of the destination
    #[arg(short, long)]
    target: String,

    /// Roads with a congestion level above this value are reported
    #[arg(long, default_value_t = DEFAULT_CONGESTION_THRESHOLD)]
    threshold: Congestion,

    /// Priority queue used by the search
    #[arg(long, value_enum, default_value_t = QueueKind::Heap)]
    queue: QueueKind,

    /// How repeated congestion reports for the same road are merged
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::Overwrite)]
    duplicates: DuplicatePolicy,

    /// Print the result as json
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SegmentOutput<'a> {
    from: &'a str,
    to: &'a str,
    congestion: Congestion,
    band: String,
}

#[derive(Serialize)]
struct RouteOutput<'a> {
    source: &'a str,
    target: &'a str,
    found: bool,
    path: Vec<&'a str>,
    cost: Option<Distance>,
    congested_segments: Vec<SegmentOutput<'a>>,
}

impl<'a> RouteOutput<'a> {
    fn new(args: &'a Args, graph: &'a RoadGraph, route: Option<&Route>) -> RouteOutput<'a> {
        let name = |vertex| graph.name(vertex).unwrap_or("?");
        RouteOutput {
            source: &args.source,
            target: &args.target,
            found: route.is_some(),
            path: route
                .map(|route| route.vertices.iter().map(|&vertex| name(vertex)).collect())
                .unwrap_or_default(),
            cost: route.map(|route| route.cost),
            congested_segments: route
                .map(|route| {
                    route
                        .congested_segments
                        .iter()
                        .map(|segment| SegmentOutput {
                            from: name(segment.tail),
                            to: name(segment.head),
                            congestion: segment.congestion,
                            band: segment.band.to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let network = RoadNetwork::from_json_file(&args.network)?;
    let (graph, congestion) = network.build(args.duplicates)?;

    // resolve both names before searching
    let source = graph.vertex_by_name(&args.source)?;
    let target = graph.vertex_by_name(&args.target)?;

    let config = PlannerConfig {
        congestion_threshold: args.threshold,
        queue: args.queue,
    };
    let planner = RoutePlanner::with_config(&graph, &congestion, config)?;

    info!("searching route from {} to {}", args.source, args.target);
    let route = planner.find_route(source, target)?;

    if args.json {
        let output = RouteOutput::new(args, &graph, route.as_ref());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("Shortest path from {} to {} is: ", args.source, args.target);
    let Some(route) = route else {
        println!("no path exists");
        return Ok(());
    };

    println!("{}", route.describe(&graph));
    println!("Total cost: {}", route.cost);
    for segment in route.congested_segments.iter() {
        println!(
            "Congestion on the road from {} to {}: level {} ({})",
            graph.name(segment.tail).unwrap_or("?"),
            graph.name(segment.head).unwrap_or("?"),
            segment.congestion,
            segment.band
        );
    }

    Ok(())
}
