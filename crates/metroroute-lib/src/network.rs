use std::io::Read;
use std::sync::Arc;

use tracing::info;

use crate::dataset::DatasetPaths;
use crate::error::Result;
use crate::graph::{Connection, Graph};
use crate::stations::{Station, StationId, StationTable};

/// In-memory transit network: the station table plus the graph built from it.
///
/// Read-only once constructed. Clones share the underlying data, so a network
/// can be handed to concurrent queries; rebuilding means constructing a new
/// value and replacing the old handle.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: Arc<StationTable>,
    graph: Graph,
}

impl Network {
    /// Load both dataset tables from disk.
    pub fn from_paths(paths: &DatasetPaths) -> Result<Self> {
        let stations = StationTable::from_path(&paths.stations)?;
        let graph = Graph::from_path(&paths.lines, &stations)?;
        info!(
            stations = stations.len(),
            links = graph.link_count(),
            "transit network loaded"
        );
        Ok(Self::from_parts(stations, graph))
    }

    /// Load both dataset tables from in-memory readers.
    pub fn from_readers<S: Read, L: Read>(stations: S, lines: L) -> Result<Self> {
        let stations = StationTable::from_reader(stations, "stations")?;
        let graph = Graph::from_reader(lines, "line definitions", &stations)?;
        Ok(Self::from_parts(stations, graph))
    }

    /// Assemble a network from stations and connections held in memory.
    pub fn from_connections<I>(stations: StationTable, connections: I) -> Result<Self>
    where
        I: IntoIterator<Item = Connection>,
    {
        let graph = Graph::from_connections(&stations, connections)?;
        Ok(Self::from_parts(stations, graph))
    }

    fn from_parts(stations: StationTable, graph: Graph) -> Self {
        Self {
            stations: Arc::new(stations),
            graph,
        }
    }

    pub fn stations(&self) -> &StationTable {
        &self.stations
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn station_name(&self, id: StationId) -> Option<&str> {
        self.stations.name(id)
    }
}
