//! Error types for cue-sweep
//!
//! Two failures are fatal to a sweep: the experiment log cannot be read
//! (`DataAccess`, `MissingColumns`) and the simulation runner fails
//! (`Simulation`). Neither is retried.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque failure reported by a simulation runner.
pub type SimulationError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// cue-sweep error types
#[derive(Error, Debug)]
pub enum Error {
    /// Experiment log could not be read or parsed
    #[error("Data access error: {0}\nThe experiment log must be a readable CSV file with a header row")]
    DataAccess(String),

    /// Experiment log lacks one or more of the parameter columns
    #[error("Data access error: experiment log is missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Names of the absent columns, in axis order
        missing: Vec<String>,
    },

    /// Simulation runner failed for a tuple (sweep halted)
    #[error("Simulation failed for {tuple}: {source}")]
    Simulation {
        /// Tuple being executed when the runner failed
        tuple: String,
        /// Error returned by the runner, unmodified
        #[source]
        source: SimulationError,
    },

    /// Parameter domain does not fit its axis
    #[error("Invalid domain '{axis}': {reason}")]
    InvalidDomain {
        /// Axis name
        axis: String,
        /// What is wrong with it
        reason: String,
    },

    /// Sweep configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures reading the experiment log.
    #[must_use]
    pub const fn is_data_access(&self) -> bool {
        matches!(self, Self::DataAccess(_) | Self::MissingColumns { .. })
    }
}
