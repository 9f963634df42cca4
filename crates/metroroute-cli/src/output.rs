//! Output formatting for CLI commands.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use metroroute_lib::{
    Network, RoutePlan, RouteRenderMode, RouteSummary, SearchStrategy, Station,
};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Numbered station list with per-leg lines and distances.
    #[default]
    Text,
    /// Stations on a single comma-separated line.
    Compact,
    /// Machine-readable JSON.
    Json,
}

/// Search strategy selected with `--strategy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StrategyArg {
    /// Scan the unvisited set for the closest station.
    #[default]
    Scan,
    /// Use a binary heap priority queue.
    Heap,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Scan => SearchStrategy::Scan,
            StrategyArg::Heap => SearchStrategy::Heap,
        }
    }
}

/// Render a planned route in the requested format.
pub fn render_route(network: &Network, plan: &RoutePlan, format: OutputFormat) -> Result<String> {
    let summary = RouteSummary::from_plan(network, plan);
    match format {
        OutputFormat::Text => Ok(summary.render(RouteRenderMode::PlainText)),
        OutputFormat::Compact => Ok(summary.render(RouteRenderMode::Compact)),
        OutputFormat::Json => to_json(&summary),
    }
}

#[derive(Debug, Serialize)]
struct StationListing<'a> {
    #[serde(flatten)]
    station: &'a Station,
    connections: usize,
}

/// Render every station of the network with its number of connections.
pub fn render_stations(network: &Network, format: OutputFormat) -> Result<String> {
    let listings: Vec<_> = network
        .stations()
        .iter()
        .map(|station| StationListing {
            station,
            connections: network.graph().degree(station.id),
        })
        .collect();

    match format {
        OutputFormat::Json => to_json(&listings),
        OutputFormat::Compact => Ok(listings
            .iter()
            .map(|listing| format!("{} ({})", listing.station.id, listing.station.name))
            .collect::<Vec<_>>()
            .join(", ")
            + "\n"),
        OutputFormat::Text => {
            let mut buffer = String::new();
            for listing in &listings {
                let station = listing.station;
                let _ = writeln!(
                    buffer,
                    "{:>5}  {:<32} {:>9.4} {:>9.4}  {} connections",
                    station.id,
                    station.name,
                    station.coordinates.latitude,
                    station.coordinates.longitude,
                    listing.connections
                );
            }
            Ok(buffer)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    json.push('\n');
    Ok(json)
}
