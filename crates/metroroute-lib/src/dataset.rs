use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable naming the directory that holds the dataset files.
pub const DATA_DIR_ENV: &str = "METROROUTE_DATA_DIR";

/// Default filename of the station table.
pub const STATIONS_FILENAME: &str = "Stations.csv";

/// Default filename of the line definition table.
pub const LINES_FILENAME: &str = "Line_definitions.csv";

/// Locations of the two tables that make up a transit dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub stations: PathBuf,
    pub lines: PathBuf,
}

impl DatasetPaths {
    /// Default file layout inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            stations: data_dir.join(STATIONS_FILENAME),
            lines: data_dir.join(LINES_FILENAME),
        }
    }

    /// Fail with [`Error::DatasetNotFound`] unless both files exist.
    pub fn ensure_exists(&self) -> Result<()> {
        for path in [&self.stations, &self.lines] {
            if !path.is_file() {
                return Err(Error::DatasetNotFound { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// Resolve the dataset location.
///
/// The data directory is `data_dir` when given, else `$METROROUTE_DATA_DIR`,
/// else the current directory. Explicit file overrides take precedence over
/// the default names inside that directory. Both files must exist.
pub fn resolve_dataset(
    data_dir: Option<&Path>,
    stations: Option<&Path>,
    lines: Option<&Path>,
) -> Result<DatasetPaths> {
    let paths = resolve_with_env(data_dir, stations, lines, env::var_os(DATA_DIR_ENV));
    debug!(
        stations = %paths.stations.display(),
        lines = %paths.lines.display(),
        "resolved dataset paths"
    );
    paths.ensure_exists()?;
    Ok(paths)
}

fn resolve_with_env(
    data_dir: Option<&Path>,
    stations: Option<&Path>,
    lines: Option<&Path>,
    env_dir: Option<OsString>,
) -> DatasetPaths {
    let dir = match (data_dir, env_dir) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(dir)) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("."),
    };

    let defaults = DatasetPaths::in_dir(&dir);
    DatasetPaths {
        stations: stations.map(Path::to_path_buf).unwrap_or(defaults.stations),
        lines: lines.map(Path::to_path_buf).unwrap_or(defaults.lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_dir_beats_environment() {
        let paths = resolve_with_env(
            Some(Path::new("/data/metro")),
            None,
            None,
            Some(OsString::from("/elsewhere")),
        );
        assert_eq!(paths, DatasetPaths::in_dir(Path::new("/data/metro")));
    }

    #[test]
    fn environment_used_when_no_dir_given() {
        let paths = resolve_with_env(None, None, None, Some(OsString::from("/env/dir")));
        assert_eq!(paths.stations, Path::new("/env/dir").join(STATIONS_FILENAME));
    }

    #[test]
    fn empty_environment_falls_back_to_current_dir() {
        let paths = resolve_with_env(None, None, None, Some(OsString::new()));
        assert_eq!(paths, DatasetPaths::in_dir(Path::new(".")));
    }

    #[test]
    fn file_overrides_replace_defaults() {
        let paths = resolve_with_env(
            Some(Path::new("/data")),
            Some(Path::new("/tmp/nodes.csv")),
            None,
            None,
        );
        assert_eq!(paths.stations, PathBuf::from("/tmp/nodes.csv"));
        assert_eq!(paths.lines, Path::new("/data").join(LINES_FILENAME));
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(STATIONS_FILENAME), "id,latitude,longitude,name\n")
            .expect("write stations");

        let err = resolve_dataset(Some(dir.path()), None, None).expect_err("lines missing");
        match err {
            Error::DatasetNotFound { path } => {
                assert_eq!(path, dir.path().join(LINES_FILENAME));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
