//! Benchmarks for transient simulation runs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rlcsim_core::{Circuit, TimeVector};
use rlcsim_solver::postprocess::gradient;
use rlcsim_solver::{SimulationOptions, simulate, simulate_batch};

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let options = SimulationOptions::default();

    let cases = [
        ("series_rc", Some(100.0), None, Some(1e-3), "series", 1.0),
        ("series_rlc", Some(10.0), Some(10e-3), Some(10e-6), "series", 50e-3),
        ("parallel_rc", Some(100.0), None, Some(1e-3), "parallel", 1.0),
        ("parallel_rlc", Some(100.0), Some(0.1), Some(1e-4), "parallel", 1.0),
    ];

    for (name, r, l, cap, topology, duration) in cases {
        let circuit = Circuit::from_values(r, l, cap, 10.0, topology).unwrap();
        for samples in [500, 5000] {
            let times = TimeVector::uniform(duration, samples).unwrap();
            group.bench_with_input(BenchmarkId::new(name, samples), &times, |bencher, times| {
                bencher.iter(|| simulate(black_box(&circuit), black_box(times), &options).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_batch");
    let options = SimulationOptions::default();
    let times = TimeVector::uniform(50e-3, 500).unwrap();

    for count in [8, 64] {
        // Sweep the resistance across under- and over-damped series RLC
        let circuits: Vec<Circuit> = (0..count)
            .map(|i| {
                let r = 1.0 + 100.0 * i as f64 / count as f64;
                Circuit::from_values(Some(r), Some(10e-3), Some(10e-6), 1.0, "series").unwrap()
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &circuits, |bencher, circuits| {
            bencher.iter(|| simulate_batch(black_box(circuits), &times, &options));
        });
    }

    group.finish();
}

fn bench_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("gradient");

    for size in [500, 50_000] {
        let times: Vec<f64> = (0..size).map(|i| (i as f64).powf(1.1)).collect();
        let values: Vec<f64> = times.iter().map(|t| (t * 1e-3).sin()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| gradient(black_box(&values), black_box(&times)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_simulate, bench_batch, bench_gradient);
criterion_main!(benches);
