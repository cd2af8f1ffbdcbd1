//! Completion Oracle - has a tuple already been executed?

use rustc_hash::FxHashSet;

use super::{ExperimentRecord, LogSource};
use crate::space::{ParameterTuple, TupleKey};
use crate::Result;

/// Snapshot of the experiment log answering exact-match membership queries.
///
/// ## Design
///
/// Records are loaded once and reduced to a hash set of tuple keys, so each
/// [`is_completed`](Self::is_completed) call is O(1) on average instead of a
/// scan over the whole history. The snapshot is never refreshed: records
/// appended while a sweep is running stay invisible to it.
///
/// Matching is exact on all four fields. No tolerance is applied to
/// numeric fields; values that differ in any bit from the generated
/// (rounded) tuple do not match.
#[derive(Debug, Default)]
pub struct CompletionOracle {
    completed: FxHashSet<TupleKey>,
    record_count: usize,
    ignored_rows: usize,
}

impl CompletionOracle {
    /// Snapshot the given log.
    ///
    /// # Errors
    ///
    /// Propagates the data access error of the log source.
    pub fn from_source(source: &dyn LogSource) -> Result<Self> {
        let records = source.snapshot()?;
        Ok(Self::from_records(&records))
    }

    /// Build from already-loaded records.
    #[must_use]
    pub fn from_records(records: &[ExperimentRecord]) -> Self {
        let mut completed = FxHashSet::default();
        let mut ignored_rows = 0;
        for record in records {
            match record.as_tuple() {
                Some(tuple) => {
                    completed.insert(tuple.key());
                }
                None => ignored_rows += 1,
            }
        }
        if ignored_rows > 0 {
            tracing::debug!(ignored_rows, "log rows with null parameters can never match");
        }

        Self {
            completed,
            record_count: records.len(),
            ignored_rows,
        }
    }

    /// True iff some historical record matches `tuple` on all four fields.
    #[must_use]
    pub fn is_completed(&self, tuple: &ParameterTuple) -> bool {
        self.completed.contains(&tuple.key())
    }

    /// Number of records in the snapshot, including ignored rows.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of distinct completed tuples.
    #[must_use]
    pub fn distinct_count(&self) -> usize {
        self.completed.len()
    }

    /// Number of records with at least one null parameter.
    #[must_use]
    pub const fn ignored_rows(&self) -> usize {
        self.ignored_rows
    }
}
