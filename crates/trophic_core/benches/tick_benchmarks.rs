use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trophic_core::simulation::Simulation;
use trophic_data::StartRequest;

fn seeded(sim: &mut Simulation) {
    sim.start(&StartRequest::new(80, 40, 10))
        .expect("request fits on the grid");
}

fn bench_tick_sequential(c: &mut Criterion) {
    c.bench_function("tick_sequential_130_entities", |b| {
        let mut sim = Simulation::with_seed(42);
        seeded(&mut sim);
        b.iter(|| {
            if sim.census().living() == 0 {
                seeded(&mut sim);
            }
            black_box(sim.step())
        })
    });
}

fn bench_tick_parallel(c: &mut Criterion) {
    c.bench_function("tick_parallel_4_workers", |b| {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .expect("worker pool");
        let mut sim = Simulation::with_pool(42, pool);
        seeded(&mut sim);
        b.iter(|| {
            if sim.census().living() == 0 {
                seeded(&mut sim);
            }
            black_box(sim.step())
        })
    });
}

fn bench_start(c: &mut Criterion) {
    c.bench_function("start_full_grid", |b| {
        let mut sim = Simulation::with_seed(7);
        b.iter(|| black_box(sim.start(&StartRequest::new(100, 100, 25))))
    });
}

criterion_group!(benches, bench_tick_sequential, bench_tick_parallel, bench_start);
criterion_main!(benches);
