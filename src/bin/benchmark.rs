use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use indicatif::ProgressIterator;
use log::{error, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use traffic_paths::{
    config::{PlannerConfig, DEFAULT_CONGESTION_THRESHOLD},
    congestion::{CongestionIndex, DuplicatePolicy},
    graphs::road_graph::RoadGraph,
    network::RoadNetwork,
    queue::QueueKind,
    search::route_planner::RoutePlanner,
    utility::{get_progressbar, random_congestion, random_requests, random_road_graph},
    Result,
};

/// Times random route queries, once sequentially and once in parallel.
/// Without a network file a random road graph is generated.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Road network in .json format
    #[arg(short, long)]
    network: Option<PathBuf>,

    /// Number of vertices of the random graph
    #[arg(long, default_value_t = 10_000)]
    vertices: u32,

    /// Number of roads of the random graph
    #[arg(long, default_value_t = 40_000)]
    roads: u32,

    /// Share of roads of the random graph with congestion
    #[arg(long, default_value_t = 0.3)]
    congested_share: f64,

    /// Number of queries
    #[arg(short, long, default_value_t = 1_000)]
    queries: u32,

    /// Priority queue used by the search
    #[arg(long, value_enum, default_value_t = QueueKind::Heap)]
    queue: QueueKind,

    /// Seed for all random choices
    #[arg(long, default_value_t = 0)]
    seed: u64,
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
    let mut rng = StdRng::seed_from_u64(args.seed);

    let (graph, congestion): (RoadGraph, CongestionIndex) = match &args.network {
        Some(path) => RoadNetwork::from_json_file(path)?.build(DuplicatePolicy::Overwrite)?,
        None => {
            info!(
                "generating random graph with {} vertices and {} roads",
                args.vertices, args.roads
            );
            let graph = random_road_graph(args.vertices, args.roads, 1_000, &mut rng)?;
            let congestion = random_congestion(&graph, args.congested_share, 10, &mut rng)?;
            (graph, congestion)
        }
    };
    info!(
        "congestion index holds {} segments, height {}",
        congestion.len(),
        congestion.height()
    );

    let config = PlannerConfig {
        congestion_threshold: DEFAULT_CONGESTION_THRESHOLD,
        queue: args.queue,
    };
    let planner = RoutePlanner::with_config(&graph, &congestion, config)?;
    let requests = random_requests(&graph, args.queries, &mut rng);
    if requests.is_empty() {
        warn!("graph has too few vertices for a query");
        return Ok(());
    }

    let pb = get_progressbar("Sequential queries", requests.len() as u64);
    let start = Instant::now();
    let sequential = requests
        .iter()
        .progress_with(pb)
        .map(|request| planner.find_route(request.source, request.target))
        .collect::<Result<Vec<_>>>()?;
    let sequential_duration = start.elapsed();

    let start = Instant::now();
    let parallel = planner
        .find_routes(&requests)
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
    let parallel_duration = start.elapsed();

    if sequential != parallel {
        warn!("sequential and parallel queries disagree");
    }

    let found = sequential.iter().flatten().count();
    println!("{} of {} queries found a route", found, requests.len());
    println!(
        "average sequential query duration is {:?}",
        sequential_duration / requests.len() as u32
    );
    println!(
        "average parallel query duration is {:?}",
        parallel_duration / requests.len() as u32
    );

    Ok(())
}
