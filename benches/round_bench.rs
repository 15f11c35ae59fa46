use criterion::{black_box, criterion_group, criterion_main, Criterion};
use robo_race::{load_course, resolve_round, GameModel, GameSetup, Programs};

fn first_cards(model: &GameModel) -> Programs {
    model
        .players
        .iter()
        .map(|p| (p.id, p.hand.iter().take(5).copied().collect()))
        .collect()
}

fn round_benchmark(c: &mut Criterion) {
    for name in ["training-ground", "conveyor-loop"] {
        let model = GameSetup::new(load_course(name).unwrap())
            .players(4)
            .seed(7)
            .build()
            .unwrap();
        let programs = first_cards(&model);

        c.bench_function(&format!("resolve_round {name}"), |b| {
            b.iter(|| resolve_round(black_box(&model), black_box(&programs)))
        });
    }
}

criterion_group!(benches, round_benchmark);
criterion_main!(benches);
