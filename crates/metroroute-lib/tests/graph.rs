mod common;

use std::io::Cursor;

use metroroute_lib::{build_graph, Connection, Error, Graph, Link};

use common::{fixture_network, km_between, triangle_stations};

const HEADER: &str = "station1,station2,line\n";

fn build(body: &str) -> metroroute_lib::Result<Graph> {
    build_graph(Cursor::new(format!("{HEADER}{body}")), &triangle_stations())
}

#[test]
fn links_are_stored_symmetrically_with_haversine_weights() {
    let stations = triangle_stations();
    let graph = build("1,2,5\n2,3,5\n").expect("graph builds");

    let a = stations.get(1).unwrap();
    let b = stations.get(2).unwrap();
    let expected = Link {
        distance: km_between(a, b),
        line: 5,
    };
    assert_eq!(graph.link(1, 2), Some(expected));
    assert_eq!(graph.link(2, 1), Some(expected));
    assert_eq!(graph.link(1, 3), None);
    assert_eq!(graph.link_count(), 2);
}

#[test]
fn fixture_adjacency_is_symmetric() {
    let network = fixture_network();
    let graph = network.graph();

    assert!(graph.link_count() > 0);
    for station in graph.stations() {
        for (neighbour, link) in graph.neighbours(station) {
            assert_ne!(station, neighbour, "self loop at {station}");
            assert_eq!(
                graph.link(neighbour, station),
                Some(link),
                "{station} <-> {neighbour}"
            );
        }
    }
}

#[test]
fn every_station_is_a_graph_key() {
    let network = fixture_network();
    let graph = network.graph();

    assert_eq!(graph.station_count(), network.stations().len());
    assert!(graph.contains(302), "isolated station still present");
    assert_eq!(graph.degree(302), 0);
    assert_eq!(graph.neighbours(302).count(), 0);
}

#[test]
fn later_definition_of_a_pair_wins() {
    // Euston - Warren Street is defined on line 9 and again on line 7.
    let network = fixture_network();
    let link = network.graph().link(87, 279).expect("linked");
    assert_eq!(link.line, 7);
    assert_eq!(network.graph().link(279, 87), Some(link));

    let graph = build("1,2,5\n2,1,8\n").expect("graph builds");
    assert_eq!(graph.link(1, 2).map(|link| link.line), Some(8));
    assert_eq!(graph.link_count(), 1);
}

#[test]
fn links_iterates_each_pair_once() {
    let graph = build("1,2,5\n2,3,5\n1,3,9\n").expect("graph builds");
    let pairs: Vec<_> = graph.links().map(|(a, b, link)| (a, b, link.line)).collect();
    assert_eq!(pairs, vec![(1, 2, 5), (1, 3, 9), (2, 3, 5)]);
}

#[test]
fn unknown_station_reference_is_reported() {
    let err = build("1,2,5\n2,42,5\n").expect_err("station 42 is unknown");
    match err {
        Error::UnknownStationReference { line, station, .. } => {
            assert_eq!(line, 3);
            assert_eq!(station, 42);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_rows_are_rejected() {
    for body in ["1,2\n", "1,2,5,6\n", "1,two,5\n", "1,2,5.5\n", "-1,2,5\n", "1,2,red\n"] {
        let err = build(body).expect_err(body);
        assert!(
            matches!(err, Error::MalformedInput { line: 2, .. }),
            "{body:?}: {err}"
        );
    }
}

#[test]
fn negative_and_wide_line_labels_build_links() {
    let graph = build("1,2,-1\n2,3,4294967296\n").expect("signed line labels parse");
    assert_eq!(graph.link(1, 2).map(|link| link.line), Some(-1));
    assert_eq!(graph.link(2, 1).map(|link| link.line), Some(-1));
    assert_eq!(graph.link(3, 2).map(|link| link.line), Some(4_294_967_296));
}

#[test]
fn self_loops_are_rejected() {
    let err = build("2,2,5\n").expect_err("self loop");
    assert!(matches!(err, Error::MalformedInput { .. }));
    assert!(err.to_string().contains("itself"));
}

#[test]
fn in_memory_connections_report_their_position() {
    let err = Graph::from_connections(
        &triangle_stations(),
        [Connection::new(1, 2, 1), Connection::new(3, 9, 1)],
    )
    .expect_err("station 9 is unknown");
    assert!(matches!(
        err,
        Error::UnknownStationReference {
            line: 2,
            station: 9,
            ..
        }
    ));
}

#[test]
fn clones_share_adjacency() {
    let graph = build("1,2,5\n").expect("graph builds");
    let clone = graph.clone();
    assert_eq!(clone.link(1, 2), graph.link(1, 2));
    assert_eq!(clone.station_count(), 3);
}
