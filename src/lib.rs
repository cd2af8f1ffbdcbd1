//! # cue-sweep: Resumable Parameter Sweeps for Cue-Validity Simulations
//!
//! cue-sweep enumerates a full factorial parameter space, checks every
//! point against the experiment log written by earlier runs, and invokes
//! the simulation exactly once for each point that has not been run yet.
//!
//! ## Design Principles
//!
//! - **Snapshot before sweep**: the log is read once, up front. An
//!   unreadable log aborts before any simulation runs.
//! - **Exact-match dedup**: numeric values are rounded to 2 decimals when
//!   the space is generated and compared bit-for-bit against the log.
//! - **Sequential**: one tuple is skipped or fully simulated before the
//!   next one is considered. The first simulation failure ends the sweep.
//! - **Resumable**: re-running after a crash skips everything the crashed
//!   run managed to log.
//!
//! ## Example Usage
//!
//! ```rust
//! use cue_sweep::experiment::{ExperimentRecord, MemoryLog};
//! use cue_sweep::runner::SimulationConfig;
//! use cue_sweep::space::{ParameterSpace, ParameterTuple};
//! use cue_sweep::sweep::{SweepDriver, SweepSettings};
//! use cue_sweep::SimulationError;
//!
//! let done = ParameterTuple::new(1.2, 0.03, true, 0.5);
//! let log = MemoryLog::new(vec![ExperimentRecord::from(done)]);
//! let driver =
//!     SweepDriver::from_source(ParameterSpace::default(), &log, SweepSettings::default())?;
//!
//! let mut runs = 0;
//! let report = driver.run(&mut |_: &SimulationConfig| -> Result<(), SimulationError> {
//!     runs += 1;
//!     Ok(())
//! })?;
//! assert_eq!(report.skipped, 1);
//! assert_eq!(runs, 999);
//! # Ok::<(), cue_sweep::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod experiment;
pub mod runner;
pub mod space;
pub mod sweep;

pub use config::SweepConfig;
pub use error::{Error, Result, SimulationError};
pub use sweep::{SweepDriver, SweepReport, SweepSettings};
