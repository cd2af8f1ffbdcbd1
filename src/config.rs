//! Sweep configuration
//!
//! Everything a sweep needs is passed in explicitly: where the experiment
//! log lives, the domains to sweep and the fixed simulation options. A
//! configuration can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "log_path": "data/log.csv",
//!   "n_session": 7,
//!   "command": ["python", "run_simulation.py"]
//! }
//! ```
//!
//! Missing keys take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::experiment::CsvLog;
use crate::runner::CommandRunner;
use crate::space::{ParameterDomain, ParameterSpace};
use crate::sweep::SweepSettings;
use crate::{Error, Result};

/// Default location of the experiment log
pub const DEFAULT_LOG_PATH: &str = "data/log.csv";

/// Sweep configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// CSV experiment log consulted before the sweep
    pub log_path: PathBuf,
    /// Treat a missing log file as empty
    pub allow_missing_log: bool,
    /// Repeated simulation runs per tuple
    pub n_simulation: u32,
    /// Sessions per simulation run
    pub n_session: u32,
    /// Ask the simulation to persist its results
    pub persist: bool,
    /// Custom domains in axis order; `None` sweeps the default space
    pub domains: Option<Vec<ParameterDomain>>,
    /// External simulation program and its arguments
    pub command: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let settings = SweepSettings::default();
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            allow_missing_log: false,
            n_simulation: settings.n_simulation,
            n_session: settings.n_session,
            persist: settings.persist,
            domains: None,
            command: Vec::new(),
        }
    }
}

impl SweepConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the experiment log path.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Treat a missing log file as an empty log.
    #[must_use]
    pub const fn allow_missing_log(mut self, allow: bool) -> Self {
        self.allow_missing_log = allow;
        self
    }

    /// Set the number of sessions per simulation.
    #[must_use]
    pub const fn n_session(mut self, n_session: u32) -> Self {
        self.n_session = n_session;
        self
    }

    /// Set the number of simulations per tuple.
    #[must_use]
    pub const fn n_simulation(mut self, n_simulation: u32) -> Self {
        self.n_simulation = n_simulation;
        self
    }

    /// Sweep custom domains instead of the default space.
    #[must_use]
    pub fn domains(mut self, domains: Vec<ParameterDomain>) -> Self {
        self.domains = Some(domains);
        self
    }

    /// Set the external simulation command.
    #[must_use]
    pub fn command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = command.into_iter().map(Into::into).collect();
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a count is zero, or the domain error
    /// if custom domains are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.n_simulation == 0 {
            return Err(Error::Config("n_simulation must be at least 1".to_string()));
        }
        if self.n_session == 0 {
            return Err(Error::Config("n_session must be at least 1".to_string()));
        }
        self.space().map(|_| ())
    }

    /// The parameter space to sweep.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if custom domains are invalid.
    pub fn space(&self) -> Result<ParameterSpace> {
        match &self.domains {
            Some(domains) => ParameterSpace::new(domains.clone()),
            None => Ok(ParameterSpace::default()),
        }
    }

    /// The fixed simulation options.
    #[must_use]
    pub const fn settings(&self) -> SweepSettings {
        SweepSettings {
            n_simulation: self.n_simulation,
            n_session: self.n_session,
            persist: self.persist,
        }
    }

    /// The experiment log as a log source.
    #[must_use]
    pub fn log_source(&self) -> CsvLog {
        CsvLog::new(&self.log_path).allow_missing(self.allow_missing_log)
    }

    /// Runner for the configured command, if one is set.
    #[must_use]
    pub fn command_runner(&self) -> Option<CommandRunner> {
        let (program, args) = self.command.split_first()?;
        Some(CommandRunner::new(program).args(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{INIT_COST, MOTIVATION, UPDATE_COST, VALID_CUE_PERCENTAGE};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SweepConfig::new();
        assert_eq!(config.log_path, PathBuf::from("data/log.csv"));
        assert_eq!(config.settings(), SweepSettings::default());
        assert_eq!(config.space().unwrap().len(), 1000);
        assert!(config.command_runner().is_none());
    }

    #[test]
    fn test_builder() {
        let config = SweepConfig::new()
            .log_path("/tmp/runs.csv")
            .n_session(3)
            .command(["python", "simulate.py"]);
        assert_eq!(config.settings().n_session, 3);
        assert_eq!(config.log_source().path(), Path::new("/tmp/runs.csv"));
        assert_eq!(config.command_runner().unwrap().program(), "python");
    }

    #[test]
    fn test_validate_rejects_zero_sessions() {
        let err = SweepConfig::new().n_session(0).validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"log_path": "runs/log.csv", "allow_missing_log": true, "command": ["sim"]}}"#
        )
        .unwrap();

        let config = SweepConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.log_path, PathBuf::from("runs/log.csv"));
        assert!(config.allow_missing_log);
        assert_eq!(config.n_session, 7);
        assert_eq!(config.command, vec!["sim"]);
    }

    #[test]
    fn test_from_json_file_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log": "x.csv"}}"#).unwrap();
        assert!(matches!(
            SweepConfig::from_json_file(file.path()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_custom_domains_round_trip_through_json() {
        let config = SweepConfig::new().domains(vec![
            ParameterDomain::numbers(MOTIVATION, [1.5]),
            ParameterDomain::numbers(INIT_COST, [0.03]),
            ParameterDomain::flags(UPDATE_COST, [true, false]),
            ParameterDomain::numbers(VALID_CUE_PERCENTAGE, [0.5]),
        ]);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SweepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.space().unwrap().len(), 2);
    }
}
