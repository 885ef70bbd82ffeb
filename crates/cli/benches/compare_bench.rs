//! Comparison Performance Benchmarks
//!
//! Measures the keyed subset path against the element-matching fallback
//! for growing array sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jcmp_cli::{compare_json, CompareMode, DefaultComparator, SubsetArrayComparator};
use serde_json::{json, Value};

fn keyed_records(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| json!({"id": format!("dep-{}", i), "name": format!("Dependency {}", i), "tags": ["a", "b"]}))
            .collect(),
    )
}

/// Records with no unique field, closed by a `null` so the array is mixed.
fn unkeyed_records(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| json!({"group": "g", "value": [i, i + 1]}))
            .chain(std::iter::once(Value::Null))
            .collect(),
    )
}

fn half(v: &Value) -> Value {
    let items = v.as_array().cloned().unwrap_or_default();
    Value::Array(items.into_iter().step_by(2).collect())
}

fn bench_subset_keyed(c: &mut Criterion) {
    let mut group = c.benchmark_group("subset_keyed");
    let cmp = SubsetArrayComparator::default();
    for size in [10usize, 100, 1000].iter() {
        let actual = keyed_records(*size);
        let expected = half(&actual);
        group.bench_with_input(BenchmarkId::new("records", size), size, |b, _| {
            b.iter(|| compare_json(&expected, &actual, &cmp))
        });
    }
    group.finish();
}

fn bench_matching_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching_fallback");
    let subset = SubsetArrayComparator::default();
    let default = DefaultComparator::new(CompareMode::Lenient);
    for size in [8usize, 32, 64].iter() {
        let actual = unkeyed_records(*size);
        let mut reversed = actual.as_array().cloned().unwrap_or_default();
        reversed.reverse();
        let reversed = Value::Array(reversed);
        group.bench_with_input(BenchmarkId::new("subset", size), size, |b, _| {
            b.iter(|| compare_json(&half(&actual), &reversed, &subset))
        });
        group.bench_with_input(BenchmarkId::new("default", size), size, |b, _| {
            b.iter(|| compare_json(&reversed, &actual, &default))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_subset_keyed, bench_matching_fallback);
criterion_main!(benches);
