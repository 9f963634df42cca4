use std::path::PathBuf;

use thiserror::Error;

use crate::stations::StationId;

/// Convenient result alias for the metroroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A required dataset file could not be located at the resolved path.
    #[error("dataset file not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// A row in a station or line table had the wrong shape or types.
    #[error("malformed input in {source_name} at line {line}: {message}")]
    MalformedInput {
        source_name: String,
        line: u64,
        message: String,
    },

    /// A line definition referenced a station absent from the station table.
    #[error("{source_name} line {line} references unknown station {station}")]
    UnknownStationReference {
        source_name: String,
        line: u64,
        station: StationId,
    },

    /// A query referenced a station that is not part of the graph.
    #[error("unknown station {station}")]
    StationNotFound { station: StationId },

    /// No path connects the two requested stations.
    #[error("no route found between {start} and {goal}")]
    Unreachable { start: StationId, goal: StationId },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV reader errors that are not tied to a single row.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn malformed(source_name: &str, line: u64, message: impl Into<String>) -> Self {
        Error::MalformedInput {
            source_name: source_name.to_string(),
            line,
            message: message.into(),
        }
    }

    /// `true` for errors a caller can recover from by asking for another query.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::StationNotFound { .. } | Error::Unreachable { .. }
        )
    }
}
