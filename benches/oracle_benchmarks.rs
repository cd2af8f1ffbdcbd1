//! Completion oracle benchmarks
//!
//! - CSV snapshot loading
//! - Oracle construction from records
//! - Membership queries over a full sweep
//! - Linear scan over the history, for comparison

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cue_sweep::experiment::{CompletionOracle, CsvLog, ExperimentRecord, LogSource};
use cue_sweep::space::{ParameterSpace, ParameterTuple};
use std::io::Write;

/// History of `n` records cycling over the default space
fn history(n: usize) -> Vec<ExperimentRecord> {
    let tuples = ParameterSpace::default().tuples();
    (0..n).map(|i| ExperimentRecord::from(tuples[i % tuples.len()])).collect()
}

fn write_csv(records: &[ExperimentRecord]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "motivation,init_cost,update_cost,valid_cue_percentage").unwrap();
    for record in records {
        let tuple = record.as_tuple().unwrap();
        writeln!(
            file,
            "{},{},{},{}",
            tuple.motivation(),
            tuple.init_cost(),
            if tuple.update_cost() { "True" } else { "False" },
            tuple.valid_cue_percentage()
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

fn linear_scan(records: &[ExperimentRecord], tuple: &ParameterTuple) -> bool {
    records.iter().any(|r| r.as_tuple().as_ref() == Some(tuple))
}

fn bench_csv_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_snapshot");
    for size in [1_000, 10_000, 100_000] {
        let file = write_csv(&history(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &file, |b, file| {
            b.iter(|| black_box(CsvLog::new(file.path()).snapshot().unwrap()));
        });
    }
    group.finish();
}

fn bench_oracle_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("oracle_build");
    for size in [1_000, 10_000, 100_000] {
        let records = history(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(CompletionOracle::from_records(records)));
        });
    }
    group.finish();
}

fn bench_full_sweep_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_sweep_lookup");
    let space = ParameterSpace::default();
    for size in [100, 1_000, 10_000] {
        let records = history(size);
        let oracle = CompletionOracle::from_records(&records);

        group.bench_with_input(BenchmarkId::new("hashed", size), &oracle, |b, oracle| {
            b.iter(|| space.iter().filter(|t| oracle.is_completed(t)).count());
        });
        group.bench_with_input(BenchmarkId::new("linear_scan", size), &records, |b, records| {
            b.iter(|| space.iter().filter(|t| linear_scan(records, t)).count());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_csv_snapshot,
    bench_oracle_build,
    bench_full_sweep_lookup
);
criterion_main!(benches);
