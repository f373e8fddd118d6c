//! Normalization performance benchmarks.
//!
//! Measures translate, backfill and finalize over generated channel exports.

use channel_report::schema::{MappedVocabulary, NativeFallback};
use channel_report::taxonomy::{
    Column, EntityAttribute, EntityGranularity, EntityMetric, Granularity, Property,
    TimeGranularity, TimeMetric,
};
use channel_report::{ChannelReporter, ReportTable, SourceReader};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

const NATIVE_COLUMNS: [&str; 6] = ["hour", "ad_id", "adgroup_id", "campaign_id", "cost", "clicks"];

/// Generate a shuffled hourly ad-level export with some empty cells.
fn generate_export(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut lines: Vec<String> = (0..rows)
        .map(|row| {
            let ad = row % 500;
            let cost = if rng.gen_bool(0.1) {
                String::new()
            } else {
                format!("{:.2}", rng.gen_range(0.0..250.0))
            };
            format!(
                "2024-03-{:02}T{:02}:00:00,ad{},ag{},c{},{},{}",
                (row / 24) % 28 + 1,
                row % 24,
                ad,
                ad / 10,
                ad / 100,
                cost,
                rng.gen_range(0..1000)
            )
        })
        .collect();
    lines.shuffle(&mut rng);

    let mut data = NATIVE_COLUMNS.join(",");
    data.push('\n');
    data.push_str(&lines.join("\n"));
    data.push('\n');
    data
}

fn reporter() -> ChannelReporter<MappedVocabulary> {
    let vocabulary = MappedVocabulary::new(NativeFallback::Unsupported)
        .with_column(Column::Time(TimeGranularity::Hourly, TimeMetric::Time), Some("hour"))
        .with_column(Column::Time(TimeGranularity::Daily, TimeMetric::Time), Some("hour"))
        .with_column(Column::Attribute(EntityGranularity::Ad, EntityAttribute::Id), Some("ad_id"))
        .with_column(
            Column::Attribute(EntityGranularity::Adgroup, EntityAttribute::Id),
            Some("adgroup_id"),
        )
        .with_column(
            Column::Attribute(EntityGranularity::Campaign, EntityAttribute::Id),
            Some("campaign_id"),
        )
        .with_property(Property::Metric(EntityMetric::Spend), Some("cost"))
        .with_property(Property::Metric(EntityMetric::Clicks), Some("clicks"));
    ChannelReporter::new(vocabulary, NATIVE_COLUMNS)
}

fn source(rows: usize) -> ReportTable {
    SourceReader::new()
        .read_str(&generate_export(rows))
        .expect("generated export parses")
}

const GRANULARITIES: [Granularity; 2] = [
    Granularity::Time(TimeGranularity::Hourly),
    Granularity::Entity(EntityGranularity::Ad),
];

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let reporter = reporter();

    for rows in [100, 1_000, 10_000] {
        let source = source(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &source, |b, source| {
            b.iter(|| reporter.normalize(black_box(source), &GRANULARITIES).unwrap());
        });
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let reporter = reporter();
    let source = source(5_000);
    let translated = reporter.translate(&source, &GRANULARITIES).unwrap();
    let mut backfilled = translated.clone();
    reporter
        .fill_ancestor_identifiers(&source, &mut backfilled, &GRANULARITIES)
        .unwrap();

    group.bench_function("translate", |b| {
        b.iter(|| reporter.translate(black_box(&source), &GRANULARITIES).unwrap());
    });
    group.bench_function("backfill", |b| {
        b.iter(|| {
            let mut report = translated.clone();
            reporter
                .fill_ancestor_identifiers(black_box(&source), &mut report, &GRANULARITIES)
                .unwrap();
            report
        });
    });
    group.bench_function("finalize", |b| {
        b.iter(|| reporter.finalize(black_box(&backfilled)).unwrap());
    });
    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let export = generate_export(10_000);
    let mut group = c.benchmark_group("read");
    group.throughput(Throughput::Bytes(export.len() as u64));
    group.bench_function("csv_10k", |b| {
        b.iter(|| SourceReader::new().read_str(black_box(&export)).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_stages, bench_read);
criterion_main!(benches);
