//! Benchmark the array kernels with and without the SIMD prefix.

use bocchi_numeric::{Kernel, KernelConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const SIZES: [usize; 4] = [64, 1024, 16 * 1024, 256 * 1024];

fn ramp(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i % 97) as f32 * 0.25 + 1.0).collect()
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_f32");
    let simd = Kernel::default();
    let scalar = Kernel::new(KernelConfig::scalar());

    for len in SIZES {
        let a = ramp(len);
        let b = ramp(len);
        let mut out = vec![0.0f32; len];
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("simd", len), &len, |bench, _| {
            bench.iter(|| simd.add(black_box(&a), black_box(&b), &mut out))
        });
        group.bench_with_input(BenchmarkId::new("scalar", len), &len, |bench, _| {
            bench.iter(|| scalar.add(black_box(&a), black_box(&b), &mut out))
        });
    }

    group.finish();
}

fn bench_div_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("div_scalar_f64");
    let reciprocal = Kernel::default();
    let exact = Kernel::new(KernelConfig::default().with_division(bocchi_numeric::DivisionStrategy::Exact));

    for len in SIZES {
        let a: Vec<f64> = ramp(len).into_iter().map(f64::from).collect();
        let mut out = vec![0.0f64; len];
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("reciprocal", len), &len, |bench, _| {
            bench.iter(|| reciprocal.div_scalar(black_box(&a), black_box(3.0), &mut out))
        });
        group.bench_with_input(BenchmarkId::new("exact", len), &len, |bench, _| {
            bench.iter(|| exact.div_scalar(black_box(&a), black_box(3.0), &mut out))
        });
    }

    group.finish();
}

fn bench_accumulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_assign_f64");
    let kernel = Kernel::default();

    for len in SIZES {
        let b: Vec<f64> = ramp(len).into_iter().map(f64::from).collect();
        let mut acc = vec![0.0f64; len];
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |bench, _| {
            bench.iter(|| kernel.add_assign(&mut acc, black_box(&b)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add, bench_div_scalar, bench_accumulate);
criterion_main!(benches);
