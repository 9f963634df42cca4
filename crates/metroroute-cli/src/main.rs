use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use metroroute_cli::messages::describe_route_error;
use metroroute_cli::output::{render_route, render_stations, OutputFormat, StrategyArg};
use metroroute_lib::{
    network_geojson, plan_route, resolve_dataset, Network, RouteRequest, StationId,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest routes through a transit network")]
struct Cli {
    /// Directory holding Stations.csv and Line_definitions.csv.
    /// Falls back to $METROROUTE_DATA_DIR, then the current directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the station table path.
    #[arg(long, global = true)]
    stations: Option<PathBuf>,

    /// Override the line definition table path.
    #[arg(long, global = true)]
    lines: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two station ids.
    Route {
        /// Starting station id.
        #[arg(long = "from")]
        from: StationId,
        /// Destination station id.
        #[arg(long = "to")]
        to: StationId,
        /// Strategy used to pick the next station to settle.
        #[arg(long, value_enum, default_value_t = StrategyArg::Scan)]
        strategy: StrategyArg,
    },
    /// List the loaded stations.
    Stations,
    /// Export the network as GeoJSON, highlighting a route when given.
    Map {
        /// Starting station id of the highlighted route.
        #[arg(long = "from", requires = "to")]
        from: Option<StationId>,
        /// Destination station id of the highlighted route.
        #[arg(long = "to", requires = "from")]
        to: Option<StationId>,
        /// Write the GeoJSON to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let network = load_network(&cli)?;

    match cli.command {
        Command::Route { from, to, strategy } => {
            handle_route(&network, from, to, strategy, cli.format)
        }
        Command::Stations => handle_stations(&network, cli.format),
        Command::Map { from, to, output } => {
            handle_map(&network, from.zip(to), output.as_deref())
        }
    }
}

fn load_network(cli: &Cli) -> Result<Network> {
    let paths = resolve_dataset(
        cli.data_dir.as_deref(),
        cli.stations.as_deref(),
        cli.lines.as_deref(),
    )
    .context("failed to locate the transit dataset")?;
    Network::from_paths(&paths).with_context(|| {
        format!(
            "failed to load network from {} and {}",
            paths.stations.display(),
            paths.lines.display()
        )
    })
}

fn handle_route(
    network: &Network,
    from: StationId,
    to: StationId,
    strategy: StrategyArg,
    format: OutputFormat,
) -> Result<()> {
    let request = RouteRequest::new(from, to).with_strategy(strategy.into());
    let plan = plan_route(network, &request)
        .map_err(|err| anyhow!(describe_route_error(network, &err)))?;
    print!("{}", render_route(network, &plan, format)?);
    Ok(())
}

fn handle_stations(network: &Network, format: OutputFormat) -> Result<()> {
    print!("{}", render_stations(network, format)?);
    Ok(())
}

fn handle_map(
    network: &Network,
    endpoints: Option<(StationId, StationId)>,
    output: Option<&Path>,
) -> Result<()> {
    let route = match endpoints {
        Some((from, to)) => Some(
            plan_route(network, &RouteRequest::new(from, to))
                .map_err(|err| anyhow!(describe_route_error(network, &err)))?
                .route,
        ),
        None => None,
    };

    let geojson = network_geojson(network, route.as_ref()).to_string();
    match output {
        Some(path) => {
            fs::write(path, geojson)
                .with_context(|| format!("failed to write GeoJSON to {}", path.display()))?;
            tracing::info!(path = %path.display(), "map written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{geojson}").context("failed to write GeoJSON to stdout")?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
