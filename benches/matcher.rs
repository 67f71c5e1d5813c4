use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use dotmorph::{
    snapshot::{GridSize, Snapshot},
    transition::{CorrespondenceMatcher, TransitionScheduler},
};

fn random_snapshot(size: GridSize, rng: &mut SmallRng) -> Snapshot {
    Snapshot::from_fn(size, |_, _| [rng.gen(), rng.gen(), rng.gen()])
}

fn bench_correspond(c: &mut Criterion) {
    let mut group = c.benchmark_group("correspond");
    let matcher = CorrespondenceMatcher::new(30.0);

    for fidelity in [1u32, 3, 5] {
        let Some(size) = GridSize::from_fidelity(3, fidelity) else { continue };
        let mut rng = SmallRng::seed_from_u64(fidelity as u64);
        let prev = random_snapshot(size, &mut rng);
        let next = random_snapshot(size, &mut rng);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size.width, size.height)),
            &(prev, next),
            |b, (prev, next)| b.iter(|| matcher.correspond(black_box(prev), black_box(next), &mut rng)),
        );
    }

    group.finish();
}

fn bench_schedule(c: &mut Criterion) {
    let size = GridSize::new(60, 45);
    let mut rng = SmallRng::seed_from_u64(1);
    let snapshot = random_snapshot(size, &mut rng);
    let (pairs, _) = CorrespondenceMatcher::new(30.0).correspond(&snapshot, &snapshot, &mut rng);
    let scheduler = TransitionScheduler::default();

    c.bench_function("schedule_60x45", |b| {
        b.iter(|| scheduler.schedule(size, black_box(pairs.clone()), &mut rng))
    });
}

criterion_group!(benches, bench_correspond, bench_schedule);
criterion_main!(benches);
