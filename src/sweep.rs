//! Sweep Driver
//!
//! Walks the parameter space in generator order and resolves each tuple
//! before looking at the next one:
//!
//! ```text
//! tuple ──> oracle.is_completed? ──yes──> skip notice
//!                 │
//!                 no
//!                 └──> runner.run(SimulationConfig)  [blocks]
//! ```
//!
//! The oracle is a snapshot taken when the driver is built. A crash in the
//! middle of a sweep is recovered by building a fresh driver: everything
//! the runner managed to log is then seen as completed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SweepConfig;
use crate::experiment::{CompletionOracle, LogSource};
use crate::runner::{SimulationConfig, SimulationRunner};
use crate::space::{ParameterSpace, ParameterTuple};
use crate::{Error, Result};

/// Fixed simulation options, identical for every tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSettings {
    /// Repeated simulation runs per tuple
    pub n_simulation: u32,
    /// Sessions per simulation run
    pub n_session: u32,
    /// Ask the runner to persist results to the log
    pub persist: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            n_simulation: 1,
            n_session: 7,
            persist: true,
        }
    }
}

/// Outcome of a completed sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Tuples in the space
    pub total: usize,
    /// Tuples handed to the runner
    pub executed: usize,
    /// Tuples already present in the log
    pub skipped: usize,
    /// When the first tuple was considered
    pub started_at: DateTime<Utc>,
    /// When the last tuple was resolved
    pub finished_at: DateTime<Utc>,
}

impl SweepReport {
    /// Wall-clock duration of the sweep.
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Sequential, resumable sweep over a parameter space.
#[derive(Debug)]
pub struct SweepDriver {
    space: ParameterSpace,
    oracle: CompletionOracle,
    settings: SweepSettings,
}

impl SweepDriver {
    /// Create a driver over `space` using an existing snapshot.
    #[must_use]
    pub const fn new(
        space: ParameterSpace,
        oracle: CompletionOracle,
        settings: SweepSettings,
    ) -> Self {
        Self {
            space,
            oracle,
            settings,
        }
    }

    /// Snapshot `source` and create a driver.
    ///
    /// # Errors
    ///
    /// Returns a data access error if the log cannot be read. Nothing has
    /// been run at that point.
    pub fn from_source(
        space: ParameterSpace,
        source: &dyn LogSource,
        settings: SweepSettings,
    ) -> Result<Self> {
        let oracle = CompletionOracle::from_source(source)?;
        tracing::info!(
            records = oracle.record_count(),
            completed = oracle.distinct_count(),
            "experiment log snapshot taken"
        );
        Ok(Self::new(space, oracle, settings))
    }

    /// Build space, snapshot and settings from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the log cannot
    /// be read.
    pub fn from_config(config: &SweepConfig) -> Result<Self> {
        config.validate()?;
        Self::from_source(config.space()?, &config.log_source(), config.settings())
    }

    /// The parameter space being swept.
    #[must_use]
    pub const fn space(&self) -> &ParameterSpace {
        &self.space
    }

    /// The completion snapshot.
    #[must_use]
    pub const fn oracle(&self) -> &CompletionOracle {
        &self.oracle
    }

    /// The fixed simulation options.
    #[must_use]
    pub const fn settings(&self) -> SweepSettings {
        self.settings
    }

    /// Tuples that a sweep would execute, in order. Runs nothing.
    #[must_use]
    pub fn plan(&self) -> Vec<ParameterTuple> {
        self.space
            .iter()
            .filter(|tuple| !self.oracle.is_completed(tuple))
            .collect()
    }

    /// The runner options for one tuple.
    #[must_use]
    pub const fn simulation_config(&self, tuple: ParameterTuple) -> SimulationConfig {
        SimulationConfig {
            n_simulation: self.settings.n_simulation,
            n_session: self.settings.n_session,
            param_set: tuple,
            log: self.settings.persist,
        }
    }

    /// Run the sweep.
    ///
    /// Every tuple not in the snapshot is passed to `runner`, one at a
    /// time, in generator order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Simulation`] on the first runner failure. Remaining
    /// tuples are not attempted.
    pub fn run<R>(&self, runner: &mut R) -> Result<SweepReport>
    where
        R: SimulationRunner + ?Sized,
    {
        let total = self.space.len();
        let started_at = Utc::now();
        let mut executed = 0;
        let mut skipped = 0;

        for (idx, tuple) in self.space.iter().enumerate() {
            if self.oracle.is_completed(&tuple) {
                tracing::info!(
                    motivation = tuple.motivation(),
                    init_cost = tuple.init_cost(),
                    update_cost = tuple.update_cost(),
                    valid_cue_percentage = tuple.valid_cue_percentage(),
                    "SKIP {tuple}"
                );
                skipped += 1;
                continue;
            }

            tracing::info!("[{}/{total}] running {tuple}", idx + 1);
            runner
                .run(&self.simulation_config(tuple))
                .map_err(|source| Error::Simulation {
                    tuple: tuple.to_string(),
                    source,
                })?;
            executed += 1;
        }

        let report = SweepReport {
            total,
            executed,
            skipped,
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!(
            total,
            executed,
            skipped,
            elapsed_ms = report.elapsed().num_milliseconds(),
            "sweep finished"
        );
        Ok(report)
    }
}
