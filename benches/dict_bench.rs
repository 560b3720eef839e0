use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pyrt::runtime::{
    Dict, ObjectRef,
    value::{int, string},
};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("name_{i}")).collect()
}

fn bench_string_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("dict/set_str");

    for &size in &[100, 1_000, 10_000] {
        let keys = names(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter(|| {
                let d = Dict::new();
                for (i, key) in keys.iter().enumerate() {
                    d.set_str(key, int(i as i64));
                }
                black_box(d);
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dict/lookup");

    for &size in &[100, 1_000, 10_000] {
        let keys = names(size);
        let strings = Dict::new();
        let promoted = Dict::new();
        for (i, key) in keys.iter().enumerate() {
            strings.set_str(key, int(i as i64));
            promoted.set_str(key, int(i as i64));
        }
        // A single non-str key moves every entry into the general table.
        let _ = promoted.insert(int(-1), int(-1));
        let probes: Vec<ObjectRef> = keys.iter().map(|k| string(k)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("strings", size), &keys, |b, keys| {
            b.iter(|| {
                for key in keys {
                    black_box(strings.get_str(key));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("promoted", size), &probes, |b, probes| {
            b.iter(|| {
                for key in probes {
                    black_box(promoted.lookup(key).ok());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_string_insert, bench_lookup);
criterion_main!(benches);
