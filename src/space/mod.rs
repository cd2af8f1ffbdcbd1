//! Parameter Space Generator
//!
//! The sweep runs over the full Cartesian product of four named axes, in
//! fixed order:
//!
//! ```text
//! motivation × init_cost × update_cost × valid_cue_percentage
//! (outermost)                               (innermost)
//! ```
//!
//! Numeric values are rounded to 2 decimals when the domain is built, so
//! every tuple carries exactly the values later compared against the
//! experiment log.
//!
//! ## Usage
//!
//! ```rust
//! use cue_sweep::space::{ParameterSpace, ParameterTuple};
//!
//! let space = ParameterSpace::default();
//! assert_eq!(space.len(), 1000);
//!
//! let first = space.iter().next().unwrap();
//! assert_eq!(first, ParameterTuple::new(0.1, 0.01, true, 0.0));
//! ```

mod domain;
mod tuple;

pub use domain::{round2, DomainKind, ParameterDomain, ParameterValue};
pub use tuple::{ParameterTuple, TupleKey};

use crate::{Error, Result};

/// Axis name: motivation
pub const MOTIVATION: &str = "motivation";
/// Axis name: initial cost
pub const INIT_COST: &str = "init_cost";
/// Axis name: cost update flag
pub const UPDATE_COST: &str = "update_cost";
/// Axis name: fraction of valid cues
pub const VALID_CUE_PERCENTAGE: &str = "valid_cue_percentage";

/// Axes in sweep order (outermost first) with their scalar kind.
pub const AXES: [(&str, DomainKind); 4] = [
    (MOTIVATION, DomainKind::Numeric),
    (INIT_COST, DomainKind::Numeric),
    (UPDATE_COST, DomainKind::Boolean),
    (VALID_CUE_PERCENTAGE, DomainKind::Numeric),
];

/// The four validated domains of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpace {
    domains: Vec<ParameterDomain>,
    motivation: Vec<f64>,
    init_cost: Vec<f64>,
    update_cost: Vec<bool>,
    valid_cue_percentage: Vec<f64>,
}

impl Default for ParameterSpace {
    /// 10 motivation levels × 10 initial costs × 2 update flags × 5 cue
    /// validities.
    fn default() -> Self {
        let domains = vec![
            ParameterDomain::linspace(MOTIVATION, 0.1, 10.0, 10),
            ParameterDomain::linspace(INIT_COST, 0.01, 0.1, 10),
            ParameterDomain::flags(UPDATE_COST, [true, false]),
            ParameterDomain::numbers(VALID_CUE_PERCENTAGE, [0.0, 0.25, 0.5, 0.75, 1.0]),
        ];
        Self::from_validated(domains)
    }
}

impl ParameterSpace {
    /// Build a space from custom domains, given in axis order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] unless exactly four domains are
    /// given, named and typed as in [`AXES`], each with at least one value.
    pub fn new(domains: Vec<ParameterDomain>) -> Result<Self> {
        if domains.len() != AXES.len() {
            return Err(Error::InvalidDomain {
                axis: "*".to_string(),
                reason: format!("expected {} domains, got {}", AXES.len(), domains.len()),
            });
        }
        for (domain, (axis, kind)) in domains.iter().zip(AXES) {
            domain.validate(axis, kind)?;
        }
        Ok(Self::from_validated(domains))
    }

    fn from_validated(domains: Vec<ParameterDomain>) -> Self {
        Self {
            motivation: domains[0].numeric_values(),
            init_cost: domains[1].numeric_values(),
            update_cost: domains[2].flag_values(),
            valid_cue_percentage: domains[3].numeric_values(),
            domains,
        }
    }

    /// Domains in axis order.
    #[must_use]
    pub fn domains(&self) -> &[ParameterDomain] {
        &self.domains
    }

    /// Total number of tuples (product of axis lengths).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lengths().iter().product()
    }

    /// True if the space has no tuples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazily iterate all tuples in nested order, `motivation` outermost.
    #[must_use]
    pub fn iter(&self) -> ParameterTuples<'_> {
        ParameterTuples::new(self)
    }

    /// All tuples, collected.
    #[must_use]
    pub fn tuples(&self) -> Vec<ParameterTuple> {
        self.iter().collect()
    }

    fn lengths(&self) -> [usize; 4] {
        [
            self.motivation.len(),
            self.init_cost.len(),
            self.update_cost.len(),
            self.valid_cue_percentage.len(),
        ]
    }

    fn tuple_at(&self, idx: [usize; 4]) -> ParameterTuple {
        ParameterTuple::new(
            self.motivation[idx[0]],
            self.init_cost[idx[1]],
            self.update_cost[idx[2]],
            self.valid_cue_percentage[idx[3]],
        )
    }
}

impl<'a> IntoIterator for &'a ParameterSpace {
    type Item = ParameterTuple;
    type IntoIter = ParameterTuples<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the tuples of a [`ParameterSpace`].
///
/// Counts like an odometer over axis indices with the last axis fastest.
pub struct ParameterTuples<'a> {
    space: &'a ParameterSpace,
    lengths: [usize; 4],
    indices: [usize; 4],
    remaining: usize,
}

impl<'a> ParameterTuples<'a> {
    fn new(space: &'a ParameterSpace) -> Self {
        Self {
            space,
            lengths: space.lengths(),
            indices: [0; 4],
            remaining: space.len(),
        }
    }
}

impl Iterator for ParameterTuples<'_> {
    type Item = ParameterTuple;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tuple = self.space.tuple_at(self.indices);
        self.remaining -= 1;

        // Increment indices, innermost axis first
        for axis in (0..self.indices.len()).rev() {
            self.indices[axis] += 1;
            if self.indices[axis] < self.lengths[axis] {
                break;
            }
            self.indices[axis] = 0;
        }

        Some(tuple)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ParameterTuples<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_space_size() {
        let space = ParameterSpace::default();
        assert_eq!(space.len(), 1000);
        assert_eq!(space.iter().len(), 1000);
        assert_eq!(space.tuples().len(), 1000);
    }

    #[test]
    fn test_innermost_axis_varies_fastest() {
        let tuples = ParameterSpace::default().tuples();
        assert_eq!(tuples[0], ParameterTuple::new(0.1, 0.01, true, 0.0));
        assert_eq!(tuples[1], ParameterTuple::new(0.1, 0.01, true, 0.25));
        assert_eq!(tuples[5], ParameterTuple::new(0.1, 0.01, false, 0.0));
        assert_eq!(tuples[10], ParameterTuple::new(0.1, 0.02, true, 0.0));
        assert_eq!(tuples[100], ParameterTuple::new(1.2, 0.01, true, 0.0));
        assert_eq!(tuples[999], ParameterTuple::new(10.0, 0.1, false, 1.0));
    }

    #[test]
    fn test_new_rejects_wrong_axis_count() {
        let err = ParameterSpace::new(vec![ParameterDomain::numbers(MOTIVATION, [1.0])]);
        assert!(matches!(err, Err(Error::InvalidDomain { .. })));
    }

    #[test]
    fn test_new_rejects_swapped_axes() {
        let err = ParameterSpace::new(vec![
            ParameterDomain::numbers(INIT_COST, [0.01]),
            ParameterDomain::numbers(MOTIVATION, [1.0]),
            ParameterDomain::flags(UPDATE_COST, [true]),
            ParameterDomain::numbers(VALID_CUE_PERCENTAGE, [0.5]),
        ]);
        assert!(matches!(err, Err(Error::InvalidDomain { axis, .. }) if axis == MOTIVATION));
    }

    #[test]
    fn test_custom_space() {
        let space = ParameterSpace::new(vec![
            ParameterDomain::numbers(MOTIVATION, [1.5, 2.0]),
            ParameterDomain::numbers(INIT_COST, [0.03]),
            ParameterDomain::flags(UPDATE_COST, [true]),
            ParameterDomain::numbers(VALID_CUE_PERCENTAGE, [0.25, 0.5, 0.75]),
        ])
        .unwrap();

        assert_eq!(space.len(), 6);
        let tuples: Vec<_> = space.into_iter().collect();
        assert_eq!(tuples[2], ParameterTuple::new(1.5, 0.03, true, 0.75));
        assert_eq!(tuples[3], ParameterTuple::new(2.0, 0.03, true, 0.25));
    }
}
