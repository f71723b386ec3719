use rand::distributions::{Distribution, Standard};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Draws `size` data points uniformly from `[0, 1)`, returns `None` for an empty sample
pub fn sample<T>(size: usize) -> Option<Vec<T>>
where
    Standard: Distribution<T>,
{
    if size > 0 {
        let mut rng = StdRng::from_entropy();

        Some((0..size).map(|_| rng.gen()).collect())
    } else {
        None
    }
}
