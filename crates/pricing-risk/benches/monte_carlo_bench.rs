use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pricing_risk::{run_simulation, sample_profit, SimulationParams};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_simulation(c: &mut Criterion) {
    let params = SimulationParams::default();
    c.bench_function("monte carlo 100k samples", |b| {
        b.iter(|| {
            let _ = black_box(run_simulation(100_000, 42, &params));
        })
    });
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    c.bench_function("single profit draw", |b| {
        b.iter(|| black_box(sample_profit(&params, &mut rng)))
    });
}

criterion_group!(benches, bench_simulation);
criterion_main!(benches);
