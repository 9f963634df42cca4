//! Shared fixtures for integration tests.

use std::path::PathBuf;

use metroroute_lib::{distance, Coordinates, DatasetPaths, Network, Station, StationId, StationTable};

/// Path to the fixtures directory holding the sample CSV tables.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Network loaded from the checked-in sample tables.
#[allow(dead_code)]
pub fn fixture_network() -> Network {
    Network::from_paths(&DatasetPaths::in_dir(&fixtures_dir())).expect("fixture network loads")
}

#[allow(dead_code)]
pub fn station(id: StationId, latitude: f64, longitude: f64) -> Station {
    Station {
        id,
        name: format!("Station {id}"),
        coordinates: Coordinates::new(latitude, longitude),
    }
}

/// Stations `1:(0,0)`, `2:(0,1)` and `3:(1,1)`.
#[allow(dead_code)]
pub fn triangle_stations() -> StationTable {
    StationTable::from_stations([
        station(1, 0.0, 0.0),
        station(2, 0.0, 1.0),
        station(3, 1.0, 1.0),
    ])
    .expect("distinct ids")
}

#[allow(dead_code)]
pub fn km_between(a: &Station, b: &Station) -> f64 {
    distance(
        a.coordinates.latitude,
        a.coordinates.longitude,
        b.coordinates.latitude,
        b.coordinates.longitude,
    )
}

/// Cheapest simple path weight from `start` to `goal`, by exhaustive DFS.
#[allow(dead_code)]
pub fn brute_force_distance(network: &Network, start: StationId, goal: StationId) -> Option<f64> {
    fn walk(
        network: &Network,
        current: StationId,
        goal: StationId,
        travelled: f64,
        visited: &mut Vec<StationId>,
        best: &mut Option<f64>,
    ) {
        if current == goal {
            if best.map_or(true, |b| travelled < b) {
                *best = Some(travelled);
            }
            return;
        }
        for (next, link) in network.graph().neighbours(current) {
            if visited.contains(&next) {
                continue;
            }
            visited.push(next);
            walk(network, next, goal, travelled + link.distance, visited, best);
            visited.pop();
        }
    }

    let mut best = None;
    walk(network, start, goal, 0.0, &mut vec![start], &mut best);
    best
}
