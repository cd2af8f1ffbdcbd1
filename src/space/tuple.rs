//! Parameter Tuple - one point of the sweep

use std::fmt;

use serde::{Deserialize, Serialize};

/// One concrete assignment of values to all four axes.
///
/// Serializes as a mapping from axis name to scalar, which is the
/// `param_set` shape a simulation runner receives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterTuple {
    motivation: f64,
    init_cost: f64,
    update_cost: bool,
    valid_cue_percentage: f64,
}

impl ParameterTuple {
    /// Create a tuple from raw field values.
    ///
    /// Values are taken as given; tuples produced by
    /// [`ParameterSpace`](super::ParameterSpace) are already rounded.
    #[must_use]
    pub const fn new(
        motivation: f64,
        init_cost: f64,
        update_cost: bool,
        valid_cue_percentage: f64,
    ) -> Self {
        Self {
            motivation,
            init_cost,
            update_cost,
            valid_cue_percentage,
        }
    }

    /// Motivation value.
    #[must_use]
    pub const fn motivation(&self) -> f64 {
        self.motivation
    }

    /// Initial cost value.
    #[must_use]
    pub const fn init_cost(&self) -> f64 {
        self.init_cost
    }

    /// Whether cost is updated.
    #[must_use]
    pub const fn update_cost(&self) -> bool {
        self.update_cost
    }

    /// Fraction of valid cues.
    #[must_use]
    pub const fn valid_cue_percentage(&self) -> f64 {
        self.valid_cue_percentage
    }

    /// Hashable identity of the tuple.
    #[must_use]
    pub fn key(&self) -> TupleKey {
        TupleKey {
            motivation: float_bits(self.motivation),
            init_cost: float_bits(self.init_cost),
            update_cost: self.update_cost,
            valid_cue_percentage: float_bits(self.valid_cue_percentage),
        }
    }
}

impl fmt::Display for ParameterTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.motivation, self.init_cost, self.update_cost, self.valid_cue_percentage
        )
    }
}

/// Exact, hashable form of a [`ParameterTuple`].
///
/// Two keys are equal iff every field of the tuples is equal as `f64`
/// (`0.0` and `-0.0` collapse to the same key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TupleKey {
    motivation: u64,
    init_cost: u64,
    update_cost: bool,
    valid_cue_percentage: u64,
}

fn float_bits(x: f64) -> u64 {
    if x == 0.0 {
        0.0_f64.to_bits()
    } else {
        x.to_bits()
    }
}
