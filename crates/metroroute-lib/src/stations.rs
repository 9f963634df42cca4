//! Station table loading.
//!
//! Stations come from a header-prefixed CSV table whose first four columns are
//! `id, latitude, longitude, name`. Any further columns (display names, zones,
//! line counts and so on) are ignored.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// Numeric identifier for a station.
pub type StationId = u32;

/// Minimum number of columns a station row must provide.
const REQUIRED_STATION_FIELDS: usize = 4;

/// A station with its location and display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
}

/// Stations keyed by identifier, iterated in ascending id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationTable {
    stations: BTreeMap<StationId, Station>,
}

impl StationTable {
    /// Load a station table from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// Load a station table from any reader. `source_name` labels error messages.
    ///
    /// Duplicate identifiers are rejected rather than silently overwritten.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut table = Self::default();
        for result in csv_reader.records() {
            let record = result.map_err(|err| csv_row_error(source_name, err))?;
            let line = record_line(&record);
            let station = parse_station(&record, source_name, line)?;
            table.insert(station, source_name, line)?;
        }

        debug!(source = source_name, stations = table.len(), "loaded station table");
        Ok(table)
    }

    /// Build a table from stations already held in memory.
    ///
    /// The same id rules as [`StationTable::from_reader`] apply. Errors report
    /// the 1-based position of the offending station.
    pub fn from_stations<I>(stations: I) -> Result<Self>
    where
        I: IntoIterator<Item = Station>,
    {
        let mut table = Self::default();
        for (index, station) in stations.into_iter().enumerate() {
            table.insert(station, "stations", index as u64 + 1)?;
        }
        Ok(table)
    }

    fn insert(&mut self, station: Station, source_name: &str, line: u64) -> Result<()> {
        if station.id == 0 {
            return Err(Error::malformed(source_name, line, "station id must be positive"));
        }
        if self.stations.contains_key(&station.id) {
            return Err(Error::malformed(
                source_name,
                line,
                format!("duplicate station id {}", station.id),
            ));
        }
        self.stations.insert(station.id, station);
        Ok(())
    }

    /// Lookup a station by identifier.
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Lookup a station name by identifier.
    pub fn name(&self, id: StationId) -> Option<&str> {
        self.stations.get(&id).map(|station| station.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stations.keys().copied()
    }

    /// Smallest and largest known identifiers.
    pub fn id_range(&self) -> Option<(StationId, StationId)> {
        let first = self.stations.keys().next()?;
        let last = self.stations.keys().next_back()?;
        Some((*first, *last))
    }
}

/// Load stations from a reader; see [`StationTable::from_reader`].
pub fn load_stations<R: Read>(reader: R) -> Result<StationTable> {
    StationTable::from_reader(reader, "stations")
}

fn parse_station(record: &StringRecord, source_name: &str, line: u64) -> Result<Station> {
    if record.len() < REQUIRED_STATION_FIELDS {
        return Err(Error::malformed(
            source_name,
            line,
            format!(
                "expected at least {REQUIRED_STATION_FIELDS} fields, found {}",
                record.len()
            ),
        ));
    }

    let id: StationId = record[0].parse().map_err(|err| {
        Error::malformed(source_name, line, format!("invalid station id '{}': {err}", &record[0]))
    })?;

    let latitude = parse_coordinate(&record[1], "latitude", 90.0, source_name, line)?;
    let longitude = parse_coordinate(&record[2], "longitude", 180.0, source_name, line)?;

    Ok(Station {
        id,
        name: record[3].to_string(),
        coordinates: Coordinates::new(latitude, longitude),
    })
}

fn parse_coordinate(
    raw: &str,
    label: &str,
    limit: f64,
    source_name: &str,
    line: u64,
) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|err| {
        Error::malformed(source_name, line, format!("invalid {label} '{raw}': {err}"))
    })?;
    if !value.is_finite() || value.abs() > limit {
        return Err(Error::malformed(
            source_name,
            line,
            format!("{label} {raw} outside [-{limit}, {limit}]"),
        ));
    }
    Ok(value)
}

pub(crate) fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

pub(crate) fn csv_row_error(source_name: &str, err: csv::Error) -> Error {
    match err.position() {
        Some(pos) => Error::malformed(source_name, pos.line(), err.to_string()),
        None => Error::Csv(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,latitude,longitude,name,display_name,zone,total_lines,rail\n";

    fn load(body: &str) -> Result<StationTable> {
        load_stations(Cursor::new(format!("{HEADER}{body}")))
    }

    #[test]
    fn trailing_columns_are_ignored() {
        let table = load("1,51.5028,-0.2801,Acton Town,Acton<br />Town,3,2,0\n")
            .expect("station parses");
        let station = table.get(1).expect("station present");
        assert_eq!(station.name, "Acton Town");
        assert_eq!(station.coordinates, Coordinates::new(51.5028, -0.2801));
    }

    #[test]
    fn four_columns_are_enough() {
        let table = load("7,0,0,Origin\n").expect("minimal row parses");
        assert_eq!(table.name(7), Some("Origin"));
    }

    #[test]
    fn short_rows_are_malformed() {
        let err = load("1,51.5,-0.2\n").expect_err("three fields");
        assert!(matches!(err, Error::MalformedInput { line: 2, .. }), "{err}");
    }

    #[test]
    fn non_numeric_fields_are_malformed() {
        for row in ["x,0,0,A\n", "1,north,0,A\n", "1,0,west,A\n", "-4,0,0,A\n"] {
            let err = load(row).expect_err(row);
            assert!(matches!(err, Error::MalformedInput { .. }), "{row}: {err}");
        }
    }

    #[test]
    fn zero_id_is_rejected() {
        let err = load("0,0,0,Nowhere\n").expect_err("zero id");
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let err = load("1,91.0,0,Beyond\n").expect_err("latitude");
        assert!(err.to_string().contains("latitude 91.0 outside [-90, 90]"), "{err}");

        let err = load("1,0,-180.5,Beyond\n").expect_err("longitude");
        assert!(err.to_string().contains("longitude -180.5 outside [-180, 180]"), "{err}");

        let err = load("1,NaN,0,Nowhere\n").expect_err("non-finite latitude");
        assert!(matches!(err, Error::MalformedInput { line: 2, .. }), "{err}");

        let table = load("1,-90,180,Edge\n").expect("limits are inclusive");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = load("1,0,0,A\n1,1,1,B\n").expect_err("duplicate id");
        match err {
            Error::MalformedInput { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("duplicate station id 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn station(id: StationId, name: &str) -> Station {
        Station {
            id,
            name: name.to_string(),
            coordinates: Coordinates::new(0.0, 0.0),
        }
    }

    #[test]
    fn in_memory_duplicates_are_rejected() {
        let err = StationTable::from_stations([station(4, "D"), station(2, "B"), station(4, "E")])
            .expect_err("duplicate id");
        match err {
            Error::MalformedInput {
                source_name,
                line,
                message,
            } => {
                assert_eq!(source_name, "stations");
                assert_eq!(line, 3);
                assert!(message.contains("duplicate station id 4"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn in_memory_zero_id_is_rejected() {
        let err = StationTable::from_stations([station(0, "Nowhere")]).expect_err("zero id");
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn in_memory_stations_keep_their_names() {
        let table = StationTable::from_stations([station(9, "I"), station(2, "B")])
            .expect("distinct ids");
        assert_eq!(table.len(), 2);
        assert_eq!(table.name(9), Some("I"));
        assert_eq!(table.ids().collect::<Vec<_>>(), vec![2, 9]);
    }

    #[test]
    fn id_range_spans_known_ids() {
        let table = load("4,0,0,D\n2,0,0,B\n9,0,0,I\n").expect("parses");
        assert_eq!(table.id_range(), Some((2, 9)));
        assert_eq!(table.ids().collect::<Vec<_>>(), vec![2, 4, 9]);
        assert_eq!(StationTable::default().id_range(), None);
    }
}
