use std::path::Path;

use traffic_paths::{
    congestion::DuplicatePolicy,
    graphs::Graph,
    network::RoadNetwork,
    search::route_planner::RoutePlanner,
    TrafficError,
};

fn sample_network() -> RoadNetwork {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/india.json");
    RoadNetwork::from_json_file(&path).unwrap()
}

#[test]
fn sample_network_loads() {
    let (graph, congestion) = sample_network().build(DuplicatePolicy::Overwrite).unwrap();

    assert_eq!(graph.number_of_vertices(), 30);
    assert_eq!(congestion.number_of_vertices(), 30);
    // (Delhi, Mumbai) is reported twice
    assert_eq!(congestion.len(), 11);
    assert!(congestion.is_balanced());
}

#[test]
fn delhi_to_pune() {
    let (graph, congestion) = sample_network().build(DuplicatePolicy::Overwrite).unwrap();
    let planner = RoutePlanner::new(&graph, &congestion).unwrap();

    let delhi = graph.vertex_by_name("Delhi").unwrap();
    let pune = graph.vertex_by_name("Pune").unwrap();
    let route = planner.find_route(delhi, pune).unwrap().unwrap();

    assert_eq!(route.cost, 2400);
    assert_eq!(
        route.describe(&graph),
        "Delhi -> Bhopal -> Vijayawada -> Coimbatore -> Pune"
    );
    assert!(route.congested_segments.is_empty());
}

#[test]
fn duplicate_reports_follow_policy() {
    let network = sample_network();

    let (graph, congestion) = network.build(DuplicatePolicy::Overwrite).unwrap();
    let delhi = graph.vertex_by_name("Delhi").unwrap();
    let mumbai = graph.vertex_by_name("Mumbai").unwrap();
    assert_eq!(congestion.congestion(delhi, mumbai), Some(6));
    let planner = RoutePlanner::new(&graph, &congestion).unwrap();
    let route = planner.find_route(delhi, mumbai).unwrap().unwrap();
    assert_eq!(route.cost, 1406);

    let (graph, congestion) = network.build(DuplicatePolicy::KeepFirst).unwrap();
    assert_eq!(congestion.congestion(mumbai, delhi), Some(10));
    let planner = RoutePlanner::new(&graph, &congestion).unwrap();
    let route = planner.find_route(delhi, mumbai).unwrap().unwrap();
    assert_eq!(route.cost, 1410);
    assert_eq!(route.congested_segments.len(), 1);
    assert_eq!(route.congested_segments[0].congestion, 10);
}

#[test]
fn reports_in_either_direction_apply() {
    // Jaipur -> Mumbai is reported with the larger vertex first
    let (graph, congestion) = sample_network().build(DuplicatePolicy::Overwrite).unwrap();
    let planner = RoutePlanner::new(&graph, &congestion).unwrap();

    let delhi = graph.vertex_by_name("Delhi").unwrap();
    let srinagar = graph.vertex_by_name("Srinagar").unwrap();
    let route = planner.find_route(delhi, srinagar).unwrap().unwrap();

    assert_eq!(route.cost, 4070);
    assert_eq!(
        route.describe(&graph),
        "Delhi -> Mumbai -> Jaipur -> Amritsar -> Srinagar"
    );
    let flagged: Vec<_> = route
        .congested_segments
        .iter()
        .map(|segment| segment.congestion)
        .collect();
    assert_eq!(flagged, vec![6, 4]);
}

#[test]
fn one_way_road_has_no_way_back() {
    let (graph, congestion) = sample_network().build(DuplicatePolicy::Overwrite).unwrap();
    let planner = RoutePlanner::new(&graph, &congestion).unwrap();

    let mysore = graph.vertex_by_name("Mysore").unwrap();
    let nashik = graph.vertex_by_name("Nashik").unwrap();
    assert_eq!(planner.find_route(mysore, nashik).unwrap().unwrap().cost, 500);
    assert_eq!(planner.find_route(nashik, mysore).unwrap(), None);
}

#[test]
fn unknown_location_is_an_error() {
    let (graph, _) = sample_network().build(DuplicatePolicy::Overwrite).unwrap();
    assert!(matches!(
        graph.vertex_by_name("Atlantis"),
        Err(TrafficError::UnknownLocation { name }) if name == "Atlantis"
    ));
}

#[test]
fn road_to_unknown_location_is_rejected() {
    let network = RoadNetwork::from_json_str(
        r#"{
            "locations": ["A", "B"],
            "roads": [{ "from": "A", "to": "C", "weight": 3 }]
        }"#,
    )
    .unwrap();

    assert!(matches!(
        network.build(DuplicatePolicy::Overwrite),
        Err(TrafficError::UnknownLocation { name }) if name == "C"
    ));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(
        RoadNetwork::from_json_str(r#"{ "roads": [] }"#),
        Err(TrafficError::Json(_))
    ));
}
