use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pig_dice::{Difficulty, MatchRunner, SelfPlayConfig, TieredPolicy};

fn bench_match(c: &mut Criterion) {
    let runner = MatchRunner::new(
        SelfPlayConfig::new().with_difficulties(Difficulty::Normal, Difficulty::Hard),
    );
    let mut seed = 0u64;
    c.bench_function("play_match_goal_100", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(runner.play_match(["A", "B"], seed).ok())
        })
    });
}

fn bench_policy(c: &mut Criterion) {
    let policy = TieredPolicy::new(Difficulty::Hard);
    c.bench_function("tiered_policy_decide", |b| {
        b.iter(|| policy.decide(black_box(18), black_box(60), black_box(80), black_box(100)))
    });
}

criterion_group!(benches, bench_match, bench_policy);
criterion_main!(benches);
