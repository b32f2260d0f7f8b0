use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the inventory dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row of the inventory dataset could not be parsed.
    ///
    /// `line` is the 1-based line number in the source, header included.
    #[error("Invalid inventory data at line {line}: {message}")]
    DataFormat { line: u64, message: String },

    /// A required column is absent from the dataset header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The inventory data file does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),
}

impl DashboardError {
    /// `true` for the load-time data errors (malformed rows, absent columns).
    pub fn is_data_format(&self) -> bool {
        matches!(
            self,
            DashboardError::DataFormat { .. } | DashboardError::MissingColumn(_)
        )
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
