//! Performance benchmarks for cached-props.
//!
//! Startup cost is dominated by parsing snapshots and merging them, so these
//! cover property parsing at a few sizes, spec parsing, and cache naming.

use cached_props::core::{GlobalProperties, PropertyStore, PropertyTable, sanitize_location};
use cached_props::sources::parse_source_specs;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn snapshot_text(entries: usize) -> String {
    let mut text = String::from("# BEGIN # Thu Oct 16 09:30:00 UTC 2026\n");
    for i in 0..entries {
        if i % 10 == 0 {
            text.push_str("# section comment\n");
        }
        text.push_str(&format!("service.component{i}.endpoint = https://host-{i}.internal:8443/api\n"));
    }
    text.push_str("\n# END #\n");
    text
}

/// Benchmark property parsing across snapshot sizes
fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_properties");
    for entries in [10usize, 100, 1000] {
        let text = snapshot_text(entries);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entries), &text, |b, text| {
            b.iter(|| {
                let table = PropertyTable::parse(black_box(text.as_bytes()));
                black_box(table.len());
            });
        });
    }
    group.finish();
}

/// Benchmark merging a parsed table into the global store
fn benchmark_merge(c: &mut Criterion) {
    let table = PropertyTable::parse(snapshot_text(100).as_bytes());

    c.bench_function("merge_100_into_global", |b| {
        b.iter(|| {
            let props = GlobalProperties::new();
            let mut store = &props;
            for (key, value) in &table {
                if !PropertyStore::contains(&store, key) {
                    PropertyStore::set(&mut store, key, value);
                }
            }
            black_box(props.snapshot().len());
        });
    });
}

/// Benchmark invocation string parsing and cache naming
fn benchmark_specs(c: &mut Criterion) {
    let raw = "!https://config.example.com/base.properties,file:///etc/app/system.properties,/opt/app/local.properties";

    c.bench_function("parse_source_specs", |b| {
        b.iter(|| black_box(parse_source_specs(black_box(Some(raw)))));
    });

    c.bench_function("sanitize_location", |b| {
        b.iter(|| black_box(sanitize_location(black_box("https://config.example.com/base.properties"))));
    });
}

criterion_group!(benches, benchmark_parse, benchmark_merge, benchmark_specs);
criterion_main!(benches);
