use serde::Serialize;

use crate::error::Result;
use crate::network::Network;
use crate::path::{shortest_path_with, Leg, Route, SearchStrategy};
use crate::stations::StationId;

/// High-level route planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: StationId,
    pub goal: StationId,
    pub strategy: SearchStrategy,
}

impl RouteRequest {
    /// Request a route using the default search strategy.
    pub fn new(start: StationId, goal: StationId) -> Self {
        Self {
            start,
            goal,
            strategy: SearchStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub strategy: SearchStrategy,
    pub start: StationId,
    pub goal: StationId,
    pub route: Route,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.route.hop_count()
    }

    /// Total route length in kilometres.
    pub fn distance(&self) -> f64 {
        self.route.distance
    }

    pub fn steps(&self) -> &[StationId] {
        &self.route.stations
    }

    pub fn legs(&self) -> &[Leg] {
        &self.route.legs
    }
}

/// Compute a route through `network` as described by `request`.
pub fn plan_route(network: &Network, request: &RouteRequest) -> Result<RoutePlan> {
    let route = shortest_path_with(
        network.graph(),
        request.start,
        request.goal,
        request.strategy,
    )?;

    Ok(RoutePlan {
        strategy: request.strategy,
        start: request.start,
        goal: request.goal,
        route,
    })
}
