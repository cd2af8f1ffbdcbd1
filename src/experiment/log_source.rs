//! Log sources - where the completion snapshot is read from
//!
//! The experiment log is written by the simulation runner; this crate only
//! reads it, once, before a sweep starts.

use std::fs::File;
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array};
use arrow::compute::{cast_with_options, CastOptions};
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use super::ExperimentRecord;
use crate::space::{DomainKind, AXES};
use crate::{Error, Result};

/// A readable experiment log.
pub trait LogSource {
    /// Read every historical record.
    ///
    /// # Errors
    ///
    /// Returns a data access error if the log cannot be read or lacks one
    /// of the parameter columns.
    fn snapshot(&self) -> Result<Vec<ExperimentRecord>>;
}

/// Experiment log stored as a CSV file with a header row.
///
/// Columns are matched by name; columns other than the four parameters
/// are ignored. Cells are coerced to `Float64` (numeric axes) or `Boolean`
/// (`update_cost`), empty cells load as null.
#[derive(Debug, Clone)]
pub struct CsvLog {
    path: PathBuf,
    allow_missing: bool,
}

impl CsvLog {
    /// Log at `path`. The file must exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            allow_missing: false,
        }
    }

    /// Treat a missing file as an empty log (first sweep ever).
    #[must_use]
    pub const fn allow_missing(mut self, allow: bool) -> Self {
        self.allow_missing = allow;
        self
    }

    /// Path to the CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_batches(&self, mut file: File) -> Result<Vec<RecordBatch>> {
        let format = Format::default().with_header(true);
        let (schema, _) = format
            .infer_schema(&mut file, None)
            .map_err(|e| self.access_error("Failed to infer schema", &e))?;

        let mut projection = Vec::with_capacity(AXES.len());
        let mut missing = Vec::new();
        for (name, _) in AXES {
            match schema.fields().iter().position(|f| f.name() == name) {
                Some(idx) => projection.push(idx),
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(Error::MissingColumns { missing });
        }

        file.rewind()?;
        let reader = ReaderBuilder::new(Arc::new(schema))
            .with_header(true)
            .with_projection(projection)
            .build(file)
            .map_err(|e| self.access_error("Failed to create CSV reader", &e))?;

        let mut batches = Vec::new();
        for batch in reader {
            let batch = batch.map_err(|e| self.access_error("Failed to read rows", &e))?;
            batches.push(batch);
        }
        Ok(batches)
    }

    fn access_error(&self, context: &str, err: &dyn std::fmt::Display) -> Error {
        Error::DataAccess(format!("{context} in {}: {err}", self.path.display()))
    }
}

impl LogSource for CsvLog {
    fn snapshot(&self) -> Result<Vec<ExperimentRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if self.allow_missing && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "experiment log not found, starting empty"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.access_error("Failed to open experiment log", &e)),
        };

        let mut records = Vec::new();
        for batch in self.read_batches(file)? {
            records.extend(records_from_batch(&batch)?);
        }
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "loaded experiment log"
        );
        Ok(records)
    }
}

/// Experiment log held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    records: Vec<ExperimentRecord>,
}

impl MemoryLog {
    /// Create a log from existing records.
    #[must_use]
    pub fn new(records: Vec<ExperimentRecord>) -> Self {
        Self { records }
    }

    /// Append a record.
    pub fn push(&mut self, record: ExperimentRecord) {
        self.records.push(record);
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LogSource for MemoryLog {
    fn snapshot(&self) -> Result<Vec<ExperimentRecord>> {
        Ok(self.records.clone())
    }
}

/// Convert a batch holding the four parameter columns into records.
///
/// # Errors
///
/// Returns a data access error if a column is absent or a non-null cell
/// cannot be coerced to the column's scalar type.
pub fn records_from_batch(batch: &RecordBatch) -> Result<Vec<ExperimentRecord>> {
    let column = |name: &str, kind: DomainKind| -> Result<ArrayRef> {
        let raw = batch
            .column_by_name(name)
            .ok_or_else(|| Error::MissingColumns {
                missing: vec![name.to_string()],
            })?;
        let target = match kind {
            DomainKind::Numeric => DataType::Float64,
            DomainKind::Boolean => DataType::Boolean,
        };
        let options = CastOptions {
            safe: false,
            ..Default::default()
        };
        cast_with_options(raw, &target, &options)
            .map_err(|e| Error::DataAccess(format!("Column '{name}' is not {kind:?}: {e}")))
    };

    let [motivation, init_cost, update_cost, valid_cue] =
        AXES.map(|(name, kind)| column(name, kind));
    let (motivation, init_cost, update_cost, valid_cue) =
        (motivation?, init_cost?, update_cost?, valid_cue?);

    let motivation = as_floats(&motivation)?;
    let init_cost = as_floats(&init_cost)?;
    let valid_cue = as_floats(&valid_cue)?;
    let update_cost = update_cost
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| Error::DataAccess("update_cost did not coerce to Boolean".to_string()))?;

    let cell = |array: &Float64Array, row: usize| array.is_valid(row).then(|| array.value(row));
    Ok((0..batch.num_rows())
        .map(|row| {
            ExperimentRecord::new(
                cell(motivation, row),
                cell(init_cost, row),
                update_cost.is_valid(row).then(|| update_cost.value(row)),
                cell(valid_cue, row),
            )
        })
        .collect())
}

fn as_floats(array: &ArrayRef) -> Result<&Float64Array> {
    array
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| Error::DataAccess("numeric column did not coerce to Float64".to_string()))
}
