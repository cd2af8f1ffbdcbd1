//! Parameter Domain - one named axis of the sweep

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Round to 2 decimal places.
///
/// Matches numpy's `round(2)`: the value is scaled by 100 and rounded half
/// to even. All numeric domain values pass through here at generation time.
#[must_use]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// A single scalar value on a domain axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Numeric value (already rounded to 2 decimals)
    Number(f64),
    /// Boolean value
    Flag(bool),
}

impl ParameterValue {
    /// Numeric payload, if any.
    #[must_use]
    pub const fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(x),
            Self::Flag(_) => None,
        }
    }

    /// Boolean payload, if any.
    #[must_use]
    pub const fn as_flag(self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(b),
            Self::Number(_) => None,
        }
    }

    /// Kind of this value.
    #[must_use]
    pub const fn kind(self) -> DomainKind {
        match self {
            Self::Number(_) => DomainKind::Numeric,
            Self::Flag(_) => DomainKind::Boolean,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => write!(f, "{x}"),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Scalar kind carried by a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    /// Float values rounded to 2 decimals
    Numeric,
    /// `true` / `false`
    Boolean,
}

/// A named, ordered sequence of scalar values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDomain {
    name: String,
    values: Vec<ParameterValue>,
}

impl ParameterDomain {
    /// `count` values evenly spaced over `[start, stop]`, endpoints included.
    ///
    /// Each value is rounded to 2 decimals.
    ///
    /// ```rust
    /// use cue_sweep::space::ParameterDomain;
    ///
    /// let domain = ParameterDomain::linspace("motivation", 0.1, 10.0, 10);
    /// assert_eq!(domain.len(), 10);
    /// assert_eq!(domain.values()[1].as_number(), Some(1.2));
    /// ```
    #[must_use]
    pub fn linspace(name: impl Into<String>, start: f64, stop: f64, count: usize) -> Self {
        let values = match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let step = (stop - start) / (count - 1) as f64;
                #[allow(clippy::cast_precision_loss)]
                let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
                // endpoint is exact, as in numpy
                values[count - 1] = stop;
                values
            }
        };
        Self::numbers(name, values)
    }

    /// Explicit numeric values, rounded to 2 decimals.
    #[must_use]
    pub fn numbers(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|x| ParameterValue::Number(round2(x)))
                .collect(),
        }
    }

    /// Explicit boolean values.
    #[must_use]
    pub fn flags(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(ParameterValue::Flag).collect(),
        }
    }

    /// Axis name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values in sweep order.
    #[must_use]
    pub fn values(&self) -> &[ParameterValue] {
        &self.values
    }

    /// Number of values on the axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the axis has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check the domain against the axis it is meant to fill.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if the name differs, the domain is
    /// empty, or any value is of the wrong kind.
    pub fn validate(&self, axis: &str, kind: DomainKind) -> Result<()> {
        let invalid = |reason: String| Error::InvalidDomain {
            axis: axis.to_string(),
            reason,
        };

        if self.name != axis {
            return Err(invalid(format!("domain is named '{}'", self.name)));
        }
        if self.values.is_empty() {
            return Err(invalid("domain has no values".to_string()));
        }
        if let Some(bad) = self.values.iter().find(|v| v.kind() != kind) {
            return Err(invalid(format!("value {bad} is not {kind:?}")));
        }
        if let Some(bad) = self
            .values
            .iter()
            .find(|v| v.as_number().is_some_and(|x| !x.is_finite()))
        {
            return Err(invalid(format!("value {bad} is not finite")));
        }
        Ok(())
    }

    pub(crate) fn numeric_values(&self) -> Vec<f64> {
        // deserialized domains skip the constructors, so round again here
        self.values
            .iter()
            .filter_map(|v| v.as_number())
            .map(round2)
            .collect()
    }

    pub(crate) fn flag_values(&self) -> Vec<bool> {
        self.values.iter().filter_map(|v| v.as_flag()).collect()
    }
}
