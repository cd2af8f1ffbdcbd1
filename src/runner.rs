//! Simulation Runner - the external collaborator invoked per tuple
//!
//! A runner receives one [`SimulationConfig`] per pending tuple and is
//! expected to append the resulting records to the experiment log. The
//! sweep only cares whether it returned an error.

use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::space::ParameterTuple;

/// Options passed to the simulation for one tuple.
///
/// Serialized form:
///
/// ```json
/// {"n_simulation":1,"n_session":7,
///  "param_set":{"motivation":1.5,"init_cost":0.03,"update_cost":true,"valid_cue_percentage":0.5},
///  "log":true}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Repeated simulation runs per invocation
    pub n_simulation: u32,
    /// Sessions per simulation run
    pub n_session: u32,
    /// Axis name → value for the tuple being executed
    pub param_set: ParameterTuple,
    /// Whether the simulation persists its results to the log
    pub log: bool,
}

/// Executes a simulation synchronously.
pub trait SimulationRunner {
    /// Run the simulation for one tuple and block until it finishes.
    ///
    /// # Errors
    ///
    /// Any failure; the sweep stops and reports it unmodified.
    fn run(&mut self, config: &SimulationConfig) -> Result<(), SimulationError>;
}

impl<F> SimulationRunner for F
where
    F: FnMut(&SimulationConfig) -> Result<(), SimulationError>,
{
    fn run(&mut self, config: &SimulationConfig) -> Result<(), SimulationError> {
        self(config)
    }
}

/// Runs the simulation as an external program.
///
/// The program is spawned once per tuple with the JSON-encoded
/// [`SimulationConfig`] on stdin. Stdout and stderr are inherited. A
/// non-zero exit status is a simulation failure.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandRunner {
    /// Runner invoking `program` with no extra arguments.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append command-line arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program to spawn.
    #[must_use]
    pub fn program(&self) -> &OsString {
        &self.program
    }
}

impl SimulationRunner for CommandRunner {
    fn run(&mut self, config: &SimulationConfig) -> Result<(), SimulationError> {
        let payload = serde_json::to_vec(config)?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()?;

        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| -> std::io::Result<()> {
                stdin.write_all(&payload)?;
                stdin.write_all(b"\n")
            });
        if let Err(e) = written {
            // Reap the child before reporting; it never got its config.
            let _ = child.kill();
            let _ = child.wait();
            return Err(format!(
                "failed to send config to {}: {e}",
                self.program.to_string_lossy()
            )
            .into());
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(format!(
                "{} exited with {status}",
                self.program.to_string_lossy()
            )
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimulationConfig {
        SimulationConfig {
            n_simulation: 1,
            n_session: 7,
            param_set: ParameterTuple::new(1.5, 0.03, true, 0.5),
            log: true,
        }
    }

    #[test]
    fn test_config_serialization() {
        let json = serde_json::to_value(config()).unwrap();
        assert_eq!(json["n_simulation"], 1);
        assert_eq!(json["n_session"], 7);
        assert_eq!(json["param_set"]["motivation"], 1.5);
        assert_eq!(json["param_set"]["update_cost"], true);
        assert_eq!(json["log"], true);
    }

    #[test]
    fn test_closure_runner() {
        let mut seen = Vec::new();
        let mut runner = |c: &SimulationConfig| -> Result<(), SimulationError> {
            seen.push(c.param_set);
            Ok(())
        };
        runner.run(&config()).unwrap();
        assert_eq!(seen, vec![ParameterTuple::new(1.5, 0.03, true, 0.5)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_runner_exit_status() {
        let mut ok = CommandRunner::new("sh").args(["-c", "cat > /dev/null"]);
        assert!(ok.run(&config()).is_ok());

        let mut failing = CommandRunner::new("sh").args(["-c", "cat > /dev/null; exit 3"]);
        let err = failing.run(&config()).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_runner_child_closing_stdin_early() {
        // Depending on timing the write lands in the pipe buffer or hits a
        // closed pipe; both must return once the child has exited.
        let mut runner = CommandRunner::new("sh").args(["-c", "exec 0<&-; exit 0"]);
        for _ in 0..5 {
            if let Err(err) = runner.run(&config()) {
                assert!(err.to_string().contains("failed to send config to sh"), "{err}");
            }
        }
    }

    #[test]
    fn test_command_runner_missing_program() {
        let mut runner = CommandRunner::new("cue-sweep-no-such-simulator");
        assert!(runner.run(&config()).is_err());
    }
}
