//! Experiment log and completion tracking
//!
//! ## Schema Overview
//!
//! ```text
//! LogSource (CSV / memory) ──snapshot──> ExperimentRecord (N)
//!                                              │
//!                                              └──> CompletionOracle [set of tuple keys]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use cue_sweep::experiment::{CompletionOracle, ExperimentRecord, MemoryLog};
//! use cue_sweep::space::ParameterTuple;
//!
//! let done = ParameterTuple::new(1.5, 0.03, true, 0.5);
//! let log = MemoryLog::new(vec![ExperimentRecord::from(done)]);
//!
//! let oracle = CompletionOracle::from_source(&log)?;
//! assert!(oracle.is_completed(&done));
//! assert!(!oracle.is_completed(&ParameterTuple::new(1.5, 0.03, true, 0.25)));
//! # Ok::<(), cue_sweep::Error>(())
//! ```

mod experiment_record;
mod log_source;
mod oracle;

pub use experiment_record::ExperimentRecord;
pub use log_source::{records_from_batch, CsvLog, LogSource, MemoryLog};
pub use oracle::CompletionOracle;
