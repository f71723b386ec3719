//! Sample quantiles
//!
//! Quantiles are estimated with "Definition 8" from Hyndman & Fan, *Sample Quantiles in
//! Statistical Packages* (1996), the same estimator R uses for `quantile(x, type = 8)`.
//!
//! Given a sorted sample `x` of `n` data points (1-based) and a probability `p`:
//!
//! ``` ignore
//! let m = (p + 1) / 3;
//! let h = p * n + m;              // real valued position
//! let (j, gamma) = (floor(h), h - floor(h));
//!
//! let q = (1 - gamma) * x[j] + gamma * x[j + 1];
//! ```
//!
//! Positions that land before the first data point (`j < 1`) or on/after the last one (`j >= n`)
//! are clamped to the smallest and the biggest data point respectively.

use std::cmp::Ordering;

use cast::usize;

use crate::error::{Error, Result};
use crate::float::Float;

/// Returns the quantile at probability `p` of an ascending sorted sample
///
/// `p` is not range checked: probabilities outside of `[0, 1]` clamp to the extremes of the
/// sample, and a `NaN` probability yields `NaN`. A single data point is returned as is, whatever
/// `p` is.
///
/// The sample is not sorted by this function, see [`sort`] or [`Quantiles`].
///
/// # Errors
///
/// Returns [`Error::EmptySample`] if `sorted` has no data points.
///
/// - Time: `O(1)`
pub fn quantile<A>(p: A, sorted: &[A]) -> Result<A>
where
    A: Float,
    usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
{
    match sorted.len() {
        0 => Err(Error::EmptySample),
        1 => Ok(sorted[0]),
        _ => Ok(interpolate(p, sorted)),
    }
}

/// Sorts a sample in ascending order, in place
///
/// `NaN`s have no defined position among the other values, they are all moved to the front of
/// the sample.
///
/// - Time: `O(N log N) where N = length`
pub fn sort<A>(sample: &mut [A])
where
    A: Float,
{
    fn cmp<T>(a: &T, b: &T) -> Ordering
    where
        T: Float,
    {
        match a.partial_cmp(b) {
            Some(o) => o,
            None => b.is_nan().cmp(&a.is_nan()),
        }
    }

    sample.sort_unstable_by(cmp);
}

// NB `sorted` must contain at least two data points
fn interpolate<A>(p: A, sorted: &[A]) -> A
where
    A: Float,
    usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
{
    debug_assert!(sorted.len() > 1);

    let _1 = A::cast(1);
    let _3 = A::cast(3);
    let len = sorted.len();
    let n = A::cast(len);

    let m = (p + _1) / _3;
    let h = p * n + m;

    if h.is_nan() {
        return h;
    }

    let j = h.floor();
    let gamma = h - j;

    if j < _1 {
        sorted[0]
    } else if j >= n {
        sorted[len - 1]
    } else {
        let j = match usize(j) {
            Ok(j) => j,
            // NB `unreachable!` because `j` is an integer in the `[1, n)` range at this point
            Err(_) => unreachable!(),
        };

        // `j` is 1-based, so the data points around position `h` are `j - 1` and `j`
        (_1 - gamma) * sorted[j - 1] + gamma * sorted[j]
    }
}

/// A sorted copy of a sample, ready to be queried for quantiles
///
/// Sorting happens once, when the view is built, making every following quantile computation
/// `O(1)`.
///
/// Invariants:
///
/// - The view contains at least one data point
/// - The data points are sorted in ascending order
#[derive(Clone, Debug)]
pub struct Quantiles<A>(Box<[A]>)
where
    A: Float;

impl<A> Quantiles<A>
where
    A: Float,
    usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
{
    /// Sorts a copy of `sample`, the original slice is left untouched
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySample`] if `sample` has no data points.
    ///
    /// - Time: `O(N log N) where N = length`
    /// - Memory: `O(length)`
    pub fn new(sample: &[A]) -> Result<Quantiles<A>> {
        Quantiles::from_sorted(sorted_copy(sample))
    }

    /// Wraps a sample that's already sorted in ascending order
    ///
    /// The order is only checked in debug builds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySample`] if `sorted` has no data points.
    pub fn from_sorted(sorted: Vec<A>) -> Result<Quantiles<A>> {
        if sorted.is_empty() {
            return Err(Error::EmptySample);
        }

        debug_assert!(sorted
            .windows(2)
            .all(|w| w[0] <= w[1] || w[0].is_nan() || w[1].is_nan()));

        Ok(Quantiles(sorted.into_boxed_slice()))
    }

    /// Returns the quantile at probability `p`
    pub fn at(&self, p: A) -> A {
        if self.0.len() == 1 {
            self.0[0]
        } else {
            interpolate(p, &self.0)
        }
    }

    /// Returns the interquartile range
    pub fn iqr(&self) -> A {
        let (q1, _, q3) = self.quartiles();

        q3 - q1
    }

    /// Returns the 0.5 quantile
    pub fn median(&self) -> A {
        self.at(A::cast(0.5_f32))
    }

    /// Returns the 0.25, 0.5 and 0.75 quantiles
    pub fn quartiles(&self) -> (A, A, A) {
        (
            self.at(A::cast(0.25_f32)),
            self.at(A::cast(0.5_f32)),
            self.at(A::cast(0.75_f32)),
        )
    }

    /// Returns the smallest data point
    pub fn min(&self) -> A {
        self.0[0]
    }

    /// Returns the biggest data point
    pub fn max(&self) -> A {
        self.0[self.0.len() - 1]
    }

    /// Returns the number of data points
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, a view can't be built from an empty sample
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the sorted data points
    pub fn as_slice(&self) -> &[A] {
        &self.0
    }
}

fn sorted_copy<A>(sample: &[A]) -> Vec<A>
where
    A: Float,
{
    let mut v = sample.to_vec();
    sort(&mut v);
    v
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use approx::assert_relative_eq;
            use quickcheck::{quickcheck, TestResult};

            use crate::error::Error;
            use crate::quantile::{quantile, sort, Quantiles};

            const GRID: [$ty; 11] = [0., 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.];

            quickcheck! {
                fn quartiles_are_ordered(size: u8) -> TestResult {
                    if let Some(mut v) = crate::test::sample::<$ty>(size as usize) {
                        sort(&mut v);

                        let q1 = quantile(0.25, &v).unwrap();
                        let q2 = quantile(0.5, &v).unwrap();
                        let q3 = quantile(0.75, &v).unwrap();

                        TestResult::from_bool(q1 <= q2 && q2 <= q3)
                    } else {
                        TestResult::discard()
                    }
                }

                fn monotonic(size: u8) -> TestResult {
                    if let Some(v) = crate::test::sample::<$ty>(size as usize) {
                        let quantiles = Quantiles::new(&v).unwrap();
                        let qs = GRID.iter().map(|&p| quantiles.at(p)).collect::<Vec<_>>();

                        TestResult::from_bool(qs.windows(2).all(|w| w[0] <= w[1]))
                    } else {
                        TestResult::discard()
                    }
                }

                fn bounded_by_the_sample(size: u8) -> TestResult {
                    if let Some(v) = crate::test::sample::<$ty>(size as usize) {
                        let quantiles = Quantiles::new(&v).unwrap();
                        let (min, max) = (quantiles.min(), quantiles.max());

                        TestResult::from_bool(
                            GRID.iter()
                                .map(|&p| quantiles.at(p))
                                .all(|q| q >= min && q <= max),
                        )
                    } else {
                        TestResult::discard()
                    }
                }

                fn single_data_point(x: $ty, p: $ty) -> TestResult {
                    if x.is_nan() {
                        return TestResult::discard();
                    }

                    TestResult::from_bool(quantile(p, &[x]) == Ok(x))
                }
            }

            #[test]
            fn empty() {
                let empty: [$ty; 0] = [];

                assert_eq!(quantile(0.5, &empty), Err(Error::EmptySample));
                assert_eq!(quantile(0., &empty), Err(Error::EmptySample));
                assert_eq!(Quantiles::new(&empty).unwrap_err(), Error::EmptySample);
                assert_eq!(
                    Quantiles::<$ty>::from_sorted(vec![]).unwrap_err(),
                    Error::EmptySample
                );
            }

            // reference values computed with R's `quantile(x, type = 8)`
            #[test]
            fn type_8() {
                let v: [$ty; 13] = [2., 3., 3., 4., 4., 7., 7., 7., 8., 9., 9., 20., 400.];

                assert_relative_eq!(quantile(0.25, &v).unwrap(), 11. / 3., epsilon = 1e-4);
                assert_relative_eq!(quantile(0.5, &v).unwrap(), 7., epsilon = 1e-4);
                assert_relative_eq!(quantile(0.75, &v).unwrap(), 9., epsilon = 1e-4);

                let v: [$ty; 4] = [1., 2., 3., 4.];

                assert_relative_eq!(quantile(0.25, &v).unwrap(), 17. / 12., epsilon = 1e-4);
                assert_relative_eq!(quantile(0.5, &v).unwrap(), 2.5, epsilon = 1e-4);
                assert_relative_eq!(quantile(0.75, &v).unwrap(), 43. / 12., epsilon = 1e-4);
            }

            #[test]
            fn clamps_out_of_range_positions() {
                let v: [$ty; 2] = [1., 2.];

                // h = 0.5 + 5 / 12 < 1
                assert_eq!(quantile(0.25, &v), Ok(1.));
                // h = 1.5 + 7 / 12 >= n
                assert_eq!(quantile(0.75, &v), Ok(2.));
                assert_eq!(quantile(0., &v), Ok(1.));
                assert_eq!(quantile(1., &v), Ok(2.));

                let v: [$ty; 3] = [1., 2., 3.];

                assert_eq!(quantile(-1., &v), Ok(1.));
                assert_eq!(quantile(2., &v), Ok(3.));
                assert_eq!(quantile(<$ty>::NEG_INFINITY, &v), Ok(1.));
                assert_eq!(quantile(<$ty>::INFINITY, &v), Ok(3.));
            }

            #[test]
            fn nan_propagates() {
                let v: [$ty; 3] = [1., 2., 3.];

                assert!(quantile(<$ty>::NAN, &v).unwrap().is_nan());

                let v: [$ty; 3] = [1., <$ty>::NAN, 3.];

                assert!(quantile(0.5, &v).unwrap().is_nan());
            }

            #[test]
            fn nans_sort_first() {
                let mut v: [$ty; 4] = [3., <$ty>::NAN, 1., 2.];

                sort(&mut v);

                assert!(v[0].is_nan());
                assert_eq!(&v[1..], &[1., 2., 3.]);
            }

            #[test]
            fn view_leaves_the_sample_untouched() {
                let v: [$ty; 5] = [5., 1., 4., 2., 3.];
                let quantiles = Quantiles::new(&v).unwrap();

                assert_eq!(v, [5., 1., 4., 2., 3.]);
                assert_eq!(quantiles.as_slice(), &[1., 2., 3., 4., 5.]);
                assert_eq!(quantiles.len(), 5);
                assert_eq!(quantiles.min(), 1.);
                assert_eq!(quantiles.max(), 5.);
                assert_eq!(quantiles.median(), 3.);

                let (q1, q2, q3) = quantiles.quartiles();

                assert_eq!(q2, quantiles.median());
                assert_relative_eq!(quantiles.iqr(), q3 - q1);
                assert_eq!(quantiles.at(0.25), quantile(0.25, quantiles.as_slice()).unwrap());
            }
        }
    };
}

#[cfg(test)]
mod test {
    test!(f32);
    test!(f64);
}
