use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::stations::{csv_row_error, record_line, StationId, StationTable};

/// Numeric label of the transit line serving a connection. Any integer is
/// accepted, including negative labels.
pub type LineId = i64;

/// Number of columns in a line definition row.
const LINE_DEFINITION_FIELDS: usize = 3;

/// Weighted, labelled link between two adjacent stations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Link {
    /// Great-circle length of the link in kilometres.
    pub distance: f64,
    pub line: LineId,
}

/// Undirected connection as read from a line definition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub from: StationId,
    pub to: StationId,
    pub line: LineId,
}

impl Connection {
    pub fn new(from: StationId, to: StationId, line: LineId) -> Self {
        Self { from, to, line }
    }
}

type Adjacency = BTreeMap<StationId, BTreeMap<StationId, Link>>;

/// Undirected transit graph used by pathfinding.
///
/// Every station of the table the graph was built from is a key, including
/// stations without connections. Links are stored in both directions with the
/// same weight and line. Clones share the adjacency.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<Adjacency>,
}

impl Graph {
    /// Build a graph from a line definition CSV file.
    pub fn from_path(path: &Path, stations: &StationTable) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        Self::from_reader(file, &path.display().to_string(), stations)
    }

    /// Build a graph from a header-prefixed `station_a, station_b, line` table.
    ///
    /// A later row for an already connected pair replaces the earlier link.
    pub fn from_reader<R: Read>(
        reader: R,
        source_name: &str,
        stations: &StationTable,
    ) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut adjacency = empty_adjacency(stations);
        for result in csv_reader.records() {
            let record = result.map_err(|err| csv_row_error(source_name, err))?;
            let line = record_line(&record);
            let connection = parse_connection(&record, source_name, line)?;
            insert_connection(&mut adjacency, stations, connection, source_name, line)?;
        }

        let graph = Self {
            adjacency: Arc::new(adjacency),
        };
        debug!(
            source = source_name,
            stations = graph.station_count(),
            links = graph.link_count(),
            "built transit graph"
        );
        Ok(graph)
    }

    /// Build a graph from connections already held in memory.
    ///
    /// Errors report the 1-based position of the offending connection.
    pub fn from_connections<I>(stations: &StationTable, connections: I) -> Result<Self>
    where
        I: IntoIterator<Item = Connection>,
    {
        let mut adjacency = empty_adjacency(stations);
        for (index, connection) in connections.into_iter().enumerate() {
            insert_connection(
                &mut adjacency,
                stations,
                connection,
                "connections",
                index as u64 + 1,
            )?;
        }
        Ok(Self {
            adjacency: Arc::new(adjacency),
        })
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.adjacency.contains_key(&station)
    }

    /// Neighbours of a station in ascending id order.
    pub fn neighbours(&self, station: StationId) -> impl Iterator<Item = (StationId, Link)> + '_ {
        self.adjacency
            .get(&station)
            .into_iter()
            .flat_map(|links| links.iter().map(|(id, link)| (*id, *link)))
    }

    /// Link between two stations, if they are adjacent.
    pub fn link(&self, from: StationId, to: StationId) -> Option<Link> {
        self.adjacency.get(&from)?.get(&to).copied()
    }

    /// Every undirected link once, as `(lower id, higher id, link)`.
    pub fn links(&self) -> impl Iterator<Item = (StationId, StationId, Link)> + '_ {
        self.adjacency.iter().flat_map(|(from, links)| {
            links
                .iter()
                .filter(move |(to, _)| *from < **to)
                .map(move |(to, link)| (*from, *to, *link))
        })
    }

    /// Station identifiers in ascending order.
    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn degree(&self, station: StationId) -> usize {
        self.adjacency.get(&station).map_or(0, BTreeMap::len)
    }

    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn link_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }
}

/// Build a graph from a line definition reader; see [`Graph::from_reader`].
pub fn build_graph<R: Read>(reader: R, stations: &StationTable) -> Result<Graph> {
    Graph::from_reader(reader, "line definitions", stations)
}

fn empty_adjacency(stations: &StationTable) -> Adjacency {
    stations.ids().map(|id| (id, BTreeMap::new())).collect()
}

fn parse_connection(record: &StringRecord, source_name: &str, line: u64) -> Result<Connection> {
    if record.len() != LINE_DEFINITION_FIELDS {
        return Err(Error::malformed(
            source_name,
            line,
            format!(
                "expected {LINE_DEFINITION_FIELDS} fields, found {}",
                record.len()
            ),
        ));
    }

    Ok(Connection {
        from: parse_field(record, 0, "station id", source_name, line)?,
        to: parse_field(record, 1, "station id", source_name, line)?,
        line: parse_field(record, 2, "line label", source_name, line)?,
    })
}

fn parse_field<T>(
    record: &StringRecord,
    index: usize,
    label: &str,
    source_name: &str,
    line: u64,
) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    record[index].parse().map_err(|err: T::Err| {
        Error::malformed(
            source_name,
            line,
            format!("invalid {label} '{}': {err}", &record[index]),
        )
    })
}

fn insert_connection(
    adjacency: &mut Adjacency,
    stations: &StationTable,
    connection: Connection,
    source_name: &str,
    line: u64,
) -> Result<()> {
    let Connection { from, to, .. } = connection;
    if from == to {
        return Err(Error::malformed(
            source_name,
            line,
            format!("station {from} cannot connect to itself"),
        ));
    }

    let lookup = |station: StationId| {
        stations
            .get(station)
            .ok_or_else(|| Error::UnknownStationReference {
                source_name: source_name.to_string(),
                line,
                station,
            })
    };
    let origin = lookup(from)?;
    let target = lookup(to)?;

    let link = Link {
        distance: origin.coordinates.distance_to(&target.coordinates),
        line: connection.line,
    };

    let previous = adjacency.entry(from).or_default().insert(to, link);
    adjacency.entry(to).or_default().insert(from, link);

    if let Some(previous) = previous {
        debug!(
            from,
            to,
            replaced_line = previous.line,
            line = link.line,
            "connection redefined; keeping the later line"
        );
    }
    Ok(())
}
