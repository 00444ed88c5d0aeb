use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dupescan::progress::NoProgress;
use dupescan::report::{filter_duplicates, group_by_filename};

/// Synthetic key set where every filename appears under two prefixes.
fn make_keys(count: usize) -> Vec<String> {
    let mut keys = Vec::with_capacity(count);
    for i in 0..count / 2 {
        keys.push(format!("raw/partition={}/file_{}.parquet", i % 16, i));
        keys.push(format!("staging/partition={}/file_{}.parquet", i % 16, i));
    }
    keys
}

fn benchmark_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by_filename");
    group.sample_size(10);

    for size in [10_000, 100_000].iter() {
        let keys = make_keys(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let groups = group_by_filename(black_box(keys.clone()), &NoProgress);
                black_box(filter_duplicates(groups))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_grouping);
criterion_main!(benches);
