//! metroroute library entry points.
//!
//! This crate loads a transit network from its station and line definition
//! tables, weights every connection by great-circle distance, and finds
//! shortest routes between stations. Higher-level consumers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.
//!
//! The three core entry points are [`load_stations`], [`build_graph`] and
//! [`shortest_path`]. [`Network`] and [`plan_route`] bundle them for callers
//! that work with files and request objects.

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod map;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod stations;

pub use dataset::{resolve_dataset, DatasetPaths};
pub use error::{Error, Result};
pub use geo::{distance, Coordinates};
pub use graph::{build_graph, Connection, Graph, LineId, Link};
pub use map::network_geojson;
pub use network::Network;
pub use output::{RouteRenderMode, RouteSummary};
pub use path::{shortest_path, shortest_path_with, Leg, Route, SearchStrategy};
pub use routing::{plan_route, RoutePlan, RouteRequest};
pub use stations::{load_stations, Station, StationId, StationTable};
