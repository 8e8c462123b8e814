use criterion::{criterion_group, criterion_main, Criterion};
use rl::{Env, EnvConfig, EsEnv, Mode};

fn bench_generation_step(c: &mut Criterion) {
    let config = EnvConfig {
        dim: 40,
        fes_max: usize::MAX / 2,
        population_size: 10,
        seed: Some(0),
        mode: Mode::Testing,
        ..EnvConfig::default()
    };
    let mut env = EsEnv::new(config).expect("valid bench config");
    env.reset(None, None).expect("reset");
    c.bench_function("es_env_step_d40_pop10", |b| {
        b.iter(|| env.step(&[0.0]).expect("step"));
    });
}

criterion_group!(benches, bench_generation_step);
criterion_main!(benches);
