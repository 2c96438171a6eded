/// Error types for the dashboard
///
/// Everything that can abort a dataset load or reject the startup tables
/// ends up here. Rendering itself never fails: empty selections and
/// undefined statistics are represented in the view model instead.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// A dataset file could not be read from disk
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the file (bad quoting, ragged rows, ...)
    #[error("malformed CSV in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row
    #[error("{file} is missing the expected column `{column}`")]
    MissingColumn { file: String, column: String },

    /// A numeric cell holds something that is not a number
    #[error("{file}, line {line}: column `{column}` holds non-numeric value {value:?}")]
    InvalidNumber {
        file: String,
        line: u64,
        column: String,
        value: String,
    },

    /// The subgroup table maps two entries to the same name or field
    #[error("subgroup catalog has a duplicate entry: {0}")]
    DuplicateSubgroup(String),

    /// The settings file exists but is not valid JSON for `Settings`
    #[error("invalid settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The blocking parse task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
