use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZE: usize = 100_000;

fn sample() -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(42);

    (0..SIZE).map(|_| rng.gen()).collect()
}

fn quantiles(c: &mut Criterion) {
    let v = sample();
    let sorted = tukey::Quantiles::new(&v).unwrap();

    c.bench_function("quantile_f64", |b| {
        b.iter(|| tukey::quantile(black_box(0.75), sorted.as_slice()))
    });
    c.bench_function("quantiles_new_f64", |b| b.iter(|| tukey::Quantiles::new(&v)));
}

fn outliers(c: &mut Criterion) {
    let v = sample();

    c.bench_function("outliers_f64", |b| {
        b.iter(|| tukey::outliers(black_box(1.5), &mut v.clone()))
    });
    c.bench_function("classify_f64", |b| b.iter(|| tukey::classify(&v)));
}

criterion_group!(benches, quantiles, outliers);
criterion_main!(benches);
