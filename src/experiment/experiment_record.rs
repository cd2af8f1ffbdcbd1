//! Experiment Record - one row of the persisted experiment log

use serde::{Deserialize, Serialize};

use crate::space::ParameterTuple;

/// The parameter columns of one previously executed simulation.
///
/// Columns are nullable: a log row with a missing cell still loads, but a
/// record with any null field identifies no tuple and never matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    motivation: Option<f64>,
    init_cost: Option<f64>,
    update_cost: Option<bool>,
    valid_cue_percentage: Option<f64>,
}

impl ExperimentRecord {
    /// Create a record from (possibly null) column values.
    #[must_use]
    pub const fn new(
        motivation: Option<f64>,
        init_cost: Option<f64>,
        update_cost: Option<bool>,
        valid_cue_percentage: Option<f64>,
    ) -> Self {
        Self {
            motivation,
            init_cost,
            update_cost,
            valid_cue_percentage,
        }
    }

    /// Motivation column.
    #[must_use]
    pub const fn motivation(&self) -> Option<f64> {
        self.motivation
    }

    /// Initial cost column.
    #[must_use]
    pub const fn init_cost(&self) -> Option<f64> {
        self.init_cost
    }

    /// Cost update column.
    #[must_use]
    pub const fn update_cost(&self) -> Option<bool> {
        self.update_cost
    }

    /// Valid cue percentage column.
    #[must_use]
    pub const fn valid_cue_percentage(&self) -> Option<f64> {
        self.valid_cue_percentage
    }

    /// The tuple this record was executed with, if no field is null.
    #[must_use]
    pub fn as_tuple(&self) -> Option<ParameterTuple> {
        Some(ParameterTuple::new(
            self.motivation?,
            self.init_cost?,
            self.update_cost?,
            self.valid_cue_percentage?,
        ))
    }
}

impl From<ParameterTuple> for ExperimentRecord {
    fn from(tuple: ParameterTuple) -> Self {
        Self::new(
            Some(tuple.motivation()),
            Some(tuple.init_cost()),
            Some(tuple.update_cost()),
            Some(tuple.valid_cue_percentage()),
        )
    }
}
