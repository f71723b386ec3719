use approx::assert_relative_eq;
use quickcheck::{quickcheck, TestResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tukey::{classify, outliers, quantile, Error, Label, Quantiles, Result, Tukey};

// Samples are drawn from a seeded generator, so a failing case can be replayed from the seed
// reported by quickcheck.
fn sample(seed: u64, size: u8) -> Option<Vec<f64>> {
    if size == 0 {
        return None;
    }

    let mut rng = StdRng::seed_from_u64(seed);

    Some((0..size).map(|_| rng.gen_range(-1000.0..1000.0)).collect())
}

// these expected results are from R's function quantile(..., type = 8)
#[test]
fn known_values() {
    let mut data = vec![7., 3., 4., 2., 9., 8., 7., 4., 3., 20., 9., 7., 400.];

    let (found, low, high) = outliers(1.5, &mut data).unwrap();

    assert_eq!(found, vec![20., 400.]);
    assert_eq!(format!("{:.2}", low), "-4.33");
    assert_eq!(format!("{:.2}", high), "17.00");
}

#[test]
fn known_values_f32() {
    let mut data: Vec<f32> = vec![7., 3., 4., 2., 9., 8., 7., 4., 3., 20., 9., 7., 400.];

    let (found, low, high) = outliers(1.5, &mut data).unwrap();

    assert_eq!(found, vec![20., 400.]);
    assert_relative_eq!(low, -13. / 3., epsilon = 1e-4);
    assert_relative_eq!(high, 17., epsilon = 1e-4);
}

#[test]
fn empty_sample() {
    let mut empty: Vec<f64> = vec![];

    assert_eq!(quantile(0.5, &empty), Err(Error::EmptySample));
    assert_eq!(outliers(1.5, &mut empty), Err(Error::EmptySample));
    assert!(Quantiles::new(&empty).is_err());
    assert!(classify(&empty).is_err());
}

#[test]
fn single_data_point() {
    for &p in &[0., 0.1, 0.25, 0.5, 0.75, 0.9, 1.] {
        assert_eq!(quantile(p, &[-3.5]), Ok(-3.5));
    }
}

#[test]
fn extreme_outliers() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut data = (0..100)
        .map(|_| rng.gen_range(40.0..60.0))
        .collect::<Vec<f64>>();
    data.push(1e4);
    data.insert(0, -1e4);
    data.insert(50, 90.);

    let labeled = Tukey::default().classify(&data).unwrap();

    assert_eq!(labeled.label(0), Some(Label::LowSevere));
    assert_eq!(labeled.label(data.len() - 1), Some(Label::HighSevere));
    assert_eq!(labeled.label(data.len()), None);
    assert!(labeled.label(50).map_or(false, |label| label.is_high()));

    let (found, _, _) = outliers(3., &mut data.clone()).unwrap();

    assert_eq!(found.first(), Some(&-1e4));
    assert_eq!(found.last(), Some(&1e4));
}

fn fences(data: &[f64]) -> Result<(f64, f64)> {
    let (_, low, high) = outliers(1.5, &mut data.to_vec())?;

    Ok((low, high))
}

#[test]
fn errors_propagate() {
    assert_eq!(fences(&[]), Err(Error::EmptySample));
    assert_eq!(fences(&[1., 2.]), Ok((-0.5, 3.5)));
}

#[test]
fn error_messages() {
    assert_eq!(
        Error::EmptySample.to_string(),
        "Can't compute quantiles of an empty sample"
    );
    assert!(Error::InvalidMultiplier {
        mild: 2.,
        severe: 1.
    }
    .to_string()
    .contains("mild = 2, severe = 1"));
}

quickcheck! {
    fn quartiles_are_ordered(seed: u64, size: u8) -> TestResult {
        if let Some(v) = sample(seed, size) {
            let quantiles = Quantiles::new(&v).unwrap();
            let (q1, q2, q3) = quantiles.quartiles();

            TestResult::from_bool(q1 <= q2 && q2 <= q3)
        } else {
            TestResult::discard()
        }
    }

    fn outliers_lie_outside_the_fences(seed: u64, size: u8, k: u8) -> TestResult {
        if let Some(mut v) = sample(seed, size) {
            let k = f64::from(k) / 50.;
            let (found, low, high) = outliers(k, &mut v).unwrap();
            let inside = v.iter().filter(|&&x| low <= x && x <= high).count();

            TestResult::from_bool(
                found.iter().all(|&x| x < low || x > high) && found.len() + inside == v.len(),
            )
        } else {
            TestResult::discard()
        }
    }

    fn fences_are_reproducible(seed: u64, size: u8, k: u8) -> TestResult {
        if let Some(v) = sample(seed, size) {
            let k = f64::from(k) / 50.;

            TestResult::from_bool(outliers(k, &mut v.clone()) == outliers(k, &mut v.clone()))
        } else {
            TestResult::discard()
        }
    }
}
