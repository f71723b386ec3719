//! Tukey's method
//!
//! The original method uses two "fences" to classify the data. All the observations "inside" the
//! fences are considered "normal", and the rest are considered outliers.
//!
//! The fences are computed from the quartiles of the sample and a multiplier `k`:
//!
//! ``` ignore
//! // q1, q3 are the lower and upper quartiles
//! let iqr = q3 - q1;  // The interquartile range
//! let (low, high) = (q1 - k * iqr, q3 + k * iqr);  // the "fences"
//!
//! let is_outlier = |x| x < low || x > high;
//! ```
//!
//! The traditional multiplier is `1.5` for outliers and `3` for "extreme" outliers. There's no
//! statistical basis for those values, any multiplier is accepted by [`outliers`].
//!
//! [`Tukey`] classifies the data against both sets of fences at once, which adds a sense of
//! "severity" to the classification:
//!
//! ``` ignore
//!          LOW-ish                NORMAL-ish                 HIGH-ish
//!         x   |       +    |  o o  o    o   o o  o  |        +   |   x
//!           outer        inner                    inner        outer
//!
//! Legend:
//! o: "normal" data (not an outlier)
//! +: "mild" outlier
//! x: "severe" outlier
//! ```

use std::ops::Deref;
use std::slice;

use crate::error::{Error, Result};
use crate::float::Float;
use crate::quantile::{self, quantile, Quantiles};

use self::Label::*;

/// Returns the outliers of `sample` found with the fences of multiplier `multiplier`
///
/// The second and third values are the low and high fences, respectively, that were used to locate
/// the outliers. The outliers are returned in ascending order.
///
/// NOTE: `sample` is sorted *in place*, the caller's ordering is not preserved. Sort a copy, or
/// use [`Tukey::classify`], to keep it.
///
/// # Errors
///
/// Returns [`Error::EmptySample`] if `sample` has no data points.
///
/// - Time: `O(N log N) where N = length`
pub fn outliers<A>(multiplier: A, sample: &mut [A]) -> Result<(Vec<A>, A, A)>
where
    A: Float,
    usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
{
    quantile::sort(sample);

    let q1 = quantile(A::cast(0.25_f32), sample)?;
    let q3 = quantile(A::cast(0.75_f32), sample)?;
    let fences = Fences::new(multiplier, q1, q3);

    debug!(
        "Q1 = {:?}, Q3 = {:?}, k = {:?}: fences at [{:?}, {:?}]",
        q1, q3, multiplier, fences.low, fences.high
    );

    let outliers = sample
        .iter()
        .cloned()
        .filter(|&x| fences.is_outlier(x))
        .collect::<Vec<_>>();

    debug!(
        "Found {} outliers among {} data points",
        outliers.len(),
        sample.len()
    );

    Ok((outliers, fences.low, fences.high))
}

/// Classifies `sample` with the conventional multipliers (`1.5` and `3`)
///
/// See [`Tukey::classify`].
pub fn classify<A>(sample: &[A]) -> Result<LabeledSample<'_, A>>
where
    A: Float,
    usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
{
    Tukey::default().classify(sample)
}

/// A pair of fences, any data point strictly outside of them is an outlier
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fences<A>
where
    A: Float,
{
    /// The low fence
    pub low: A,
    /// The high fence
    pub high: A,
}

impl<A> Fences<A>
where
    A: Float,
{
    /// Computes the fences from the lower (`q1`) and upper (`q3`) quartiles
    pub fn new(multiplier: A, q1: A, q3: A) -> Fences<A> {
        let iqr = q3 - q1;

        Fences {
            low: q1 - multiplier * iqr,
            high: q3 + multiplier * iqr,
        }
    }

    /// Computes the fences from the quartiles of a sorted sample
    pub fn from_quantiles(multiplier: A, quantiles: &Quantiles<A>) -> Fences<A>
    where
        usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
    {
        let (q1, _, q3) = quantiles.quartiles();

        Fences::new(multiplier, q1, q3)
    }

    /// Checks if `x` lies within the fences (inclusive)
    pub fn contains(&self, x: A) -> bool {
        self.low <= x && x <= self.high
    }

    /// Checks if `x` lies strictly outside of the fences
    pub fn is_outlier(&self, x: A) -> bool {
        x < self.low || x > self.high
    }

    /// Returns the distance between the fences
    pub fn width(&self) -> A {
        self.high - self.low
    }
}

/// Tukey classifier with inner ("mild") and outer ("severe") fences
///
/// ``` ignore
/// let labeled = Tukey::default().mild(1.).severe(2.).classify(&data)?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Tukey<A>
where
    A: Float,
{
    mild: A,
    severe: A,
}

impl<A> Default for Tukey<A>
where
    A: Float,
{
    fn default() -> Tukey<A> {
        Tukey {
            mild: A::cast(1.5_f32),
            severe: A::cast(3),
        }
    }
}

impl<A> Tukey<A>
where
    A: Float,
    usize: cast::From<A, Output = std::result::Result<usize, cast::Error>>,
{
    /// Changes the multiplier of the inner fences, default: `1.5`
    pub fn mild(mut self, multiplier: A) -> Tukey<A> {
        self.mild = multiplier;
        self
    }

    /// Changes the multiplier of the outer fences, default: `3`
    pub fn severe(mut self, multiplier: A) -> Tukey<A> {
        self.severe = multiplier;
        self
    }

    /// Returns the `(mild, severe)` multipliers
    pub fn multipliers(&self) -> (A, A) {
        (self.mild, self.severe)
    }

    /// Computes the `(inner, outer)` fences of a sorted sample
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMultiplier`] unless `0 <= mild <= severe` and both multipliers are
    /// finite.
    pub fn fences(&self, quantiles: &Quantiles<A>) -> Result<(Fences<A>, Fences<A>)> {
        self.validate()?;

        let (q1, _, q3) = quantiles.quartiles();
        let inner = Fences::new(self.mild, q1, q3);
        let outer = Fences::new(self.severe, q1, q3);

        debug!(
            "Q1 = {:?}, Q3 = {:?}: inner fences at [{:?}, {:?}], outer fences at [{:?}, {:?}]",
            q1, q3, inner.low, inner.high, outer.low, outer.high
        );

        Ok((inner, outer))
    }

    /// Classifies the sample, and returns a labeled sample.
    ///
    /// Unlike [`outliers`], the order of `sample` is preserved: the quartiles are computed from a
    /// sorted copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySample`] if `sample` has no data points, and
    /// [`Error::InvalidMultiplier`] if the multipliers don't produce nested fences.
    ///
    /// - Time: `O(N log N) where N = length`
    /// - Memory: `O(length)`
    pub fn classify<'a>(&self, sample: &'a [A]) -> Result<LabeledSample<'a, A>> {
        let quantiles = Quantiles::new(sample)?;
        let (inner, outer) = self.fences(&quantiles)?;

        Ok(LabeledSample {
            inner,
            outer,
            sample,
        })
    }

    fn validate(&self) -> Result<()> {
        let (mild, severe) = (self.mild, self.severe);

        if mild.is_finite() && severe.is_finite() && mild >= A::cast(0) && mild <= severe {
            Ok(())
        } else {
            Err(Error::InvalidMultiplier {
                mild: mild.to_f64().unwrap_or(std::f64::NAN),
                severe: severe.to_f64().unwrap_or(std::f64::NAN),
            })
        }
    }
}

/// A classified/labeled sample.
///
/// The order of the data points is retained.
#[derive(Clone, Copy, Debug)]
pub struct LabeledSample<'a, A>
where
    A: Float,
{
    inner: Fences<A>,
    outer: Fences<A>,
    sample: &'a [A],
}

impl<'a, A> LabeledSample<'a, A>
where
    A: Float,
{
    /// Returns the number of data points per label, in the
    /// `(low severe, low mild, not an outlier, high mild, high severe)` order
    ///
    /// - Time: `O(length)`
    #[allow(clippy::similar_names)]
    pub fn count(&self) -> (usize, usize, usize, usize, usize) {
        let (mut los, mut lom, mut noa, mut him, mut his) = (0, 0, 0, 0, 0);

        for (_, label) in self {
            match label {
                LowSevere => los += 1,
                LowMild => lom += 1,
                NotAnOutlier => noa += 1,
                HighMild => him += 1,
                HighSevere => his += 1,
            }
        }

        (los, lom, noa, him, his)
    }

    /// Returns the `(inner, outer)` fences used to classify the outliers
    pub fn fences(&self) -> (Fences<A>, Fences<A>) {
        (self.inner, self.outer)
    }

    /// Returns the label of the `i`th data point, `None` if out of bounds
    pub fn label(&self, i: usize) -> Option<Label> {
        self.sample
            .get(i)
            .map(|&x| Label::of(x, &self.inner, &self.outer))
    }

    /// Returns the data points labeled as outliers, mild or severe, in sample order
    ///
    /// - Time: `O(length)`
    pub fn outliers(&self) -> Vec<A> {
        self.iter()
            .filter(|(_, label)| label.is_outlier())
            .map(|(x, _)| x)
            .collect()
    }

    /// Returns an iterator over the labeled data
    pub fn iter(&self) -> Iter<'a, A> {
        Iter {
            inner: self.inner,
            outer: self.outer,
            iter: self.sample.iter(),
        }
    }
}

impl<'a, A> Deref for LabeledSample<'a, A>
where
    A: Float,
{
    type Target = [A];

    fn deref(&self) -> &[A] {
        self.sample
    }
}

impl<'a, A> IntoIterator for &LabeledSample<'a, A>
where
    A: Float,
{
    type Item = (A, Label);
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Iter<'a, A> {
        self.iter()
    }
}

/// Iterator over the labeled data
pub struct Iter<'a, A>
where
    A: Float,
{
    inner: Fences<A>,
    outer: Fences<A>,
    iter: slice::Iter<'a, A>,
}

impl<'a, A> Iterator for Iter<'a, A>
where
    A: Float,
{
    type Item = (A, Label);

    fn next(&mut self) -> Option<(A, Label)> {
        let (inner, outer) = (&self.inner, &self.outer);

        self.iter.next().map(|&x| (x, Label::of(x, inner, outer)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Labels used to classify outliers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// A "mild" outlier in the "high" spectrum
    HighMild,
    /// A "severe" outlier in the "high" spectrum
    HighSevere,
    /// A "mild" outlier in the "low" spectrum
    LowMild,
    /// A "severe" outlier in the "low" spectrum
    LowSevere,
    /// A normal data point
    NotAnOutlier,
}

impl Label {
    fn of<A>(x: A, inner: &Fences<A>, outer: &Fences<A>) -> Label
    where
        A: Float,
    {
        if x < outer.low {
            LowSevere
        } else if x > outer.high {
            HighSevere
        } else if x < inner.low {
            LowMild
        } else if x > inner.high {
            HighMild
        } else {
            NotAnOutlier
        }
    }

    /// Checks if the data point has an "unusually" high value
    pub fn is_high(&self) -> bool {
        matches!(*self, HighMild | HighSevere)
    }

    /// Checks if the data point is labeled as a "mild" outlier
    pub fn is_mild(&self) -> bool {
        matches!(*self, HighMild | LowMild)
    }

    /// Checks if the data point has an "unusually" low value
    pub fn is_low(&self) -> bool {
        matches!(*self, LowMild | LowSevere)
    }

    /// Checks if the data point is labeled as an outlier
    pub fn is_outlier(&self) -> bool {
        !matches!(*self, NotAnOutlier)
    }

    /// Checks if the data point is labeled as a "severe" outlier
    pub fn is_severe(&self) -> bool {
        matches!(*self, HighSevere | LowSevere)
    }
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use approx::assert_abs_diff_eq;
            use quickcheck::{quickcheck, TestResult};

            use crate::error::Error;
            use crate::outliers::tukey::{classify, outliers, Fences, Label, Tukey};
            use crate::quantile::Quantiles;

            fn data() -> Vec<$ty> {
                vec![7., 3., 4., 2., 9., 8., 7., 4., 3., 20., 9., 7., 400.]
            }

            quickcheck! {
                // every data point is either an outlier or lies within the fences
                fn partition(size: u8, k: u8) -> TestResult {
                    if let Some(mut v) = crate::test::sample::<$ty>(size as usize) {
                        let k = <$ty>::from(k) / 100.;
                        let (found, low, high) = outliers(k, &mut v).unwrap();
                        let fences = Fences { low, high };
                        let inside = v.iter().filter(|&&x| fences.contains(x)).count();

                        TestResult::from_bool(
                            found.iter().all(|&x| x < low || x > high)
                                && found.len() + inside == v.len(),
                        )
                    } else {
                        TestResult::discard()
                    }
                }

                fn sorts_in_place(size: u8) -> TestResult {
                    if let Some(mut v) = crate::test::sample::<$ty>(size as usize) {
                        let (found, _, _) = outliers(1.5, &mut v).unwrap();

                        TestResult::from_bool(
                            v.windows(2).all(|w| w[0] <= w[1])
                                && found.windows(2).all(|w| w[0] <= w[1]),
                        )
                    } else {
                        TestResult::discard()
                    }
                }

                fn idempotent(size: u8, k: u8) -> TestResult {
                    if let Some(v) = crate::test::sample::<$ty>(size as usize) {
                        let k = <$ty>::from(k) / 100.;
                        let first = outliers(k, &mut v.clone()).unwrap();
                        let mut reversed = v.iter().rev().cloned().collect::<Vec<_>>();
                        let second = outliers(k, &mut reversed).unwrap();

                        TestResult::from_bool(first == second)
                    } else {
                        TestResult::discard()
                    }
                }

                // the "mild" outliers of the labeled sample are the outliers found with the
                // mild multiplier
                fn labels_agree_with_outliers(size: u8) -> TestResult {
                    if let Some(v) = crate::test::sample::<$ty>(size as usize) {
                        let labeled = classify(&v).unwrap();
                        let mut labeled_outliers = labeled.outliers();
                        crate::quantile::sort(&mut labeled_outliers);
                        let (found, _, _) = outliers(1.5, &mut v.clone()).unwrap();

                        TestResult::from_bool(labeled_outliers == found)
                    } else {
                        TestResult::discard()
                    }
                }
            }

            // reference values computed with R's `quantile(x, type = 8)`
            #[test]
            fn known_values() {
                let mut v = data();
                let (found, low, high) = outliers(1.5, &mut v).unwrap();

                assert_eq!(found, vec![20., 400.]);
                assert_abs_diff_eq!(low, -13. / 3., epsilon = 1e-4);
                assert_abs_diff_eq!(high, 17., epsilon = 1e-4);
            }

            #[test]
            fn sorts_the_callers_sample() {
                let mut v: Vec<$ty> = vec![3., 1., 2.];

                outliers(1.5, &mut v).unwrap();

                assert_eq!(v, vec![1., 2., 3.]);
            }

            #[test]
            fn empty() {
                let mut v: Vec<$ty> = vec![];

                assert_eq!(outliers(1.5, &mut v), Err(Error::EmptySample));
                assert_eq!(classify(&v).unwrap_err(), Error::EmptySample);
            }

            #[test]
            fn single_data_point() {
                let mut v: Vec<$ty> = vec![42.];

                assert_eq!(outliers(1.5, &mut v), Ok((vec![], 42., 42.)));
            }

            #[test]
            fn two_data_points() {
                let mut v: Vec<$ty> = vec![2., 1.];

                assert_eq!(outliers(1.5, &mut v), Ok((vec![], -0.5, 3.5)));
                assert_eq!(v, vec![1., 2.]);
            }

            #[test]
            fn constant_sample() {
                let mut v: Vec<$ty> = vec![4.; 10];
                let (found, low, high) = outliers(1.5, &mut v).unwrap();

                assert!(found.is_empty());
                assert_eq!((low, high), (4., 4.));
            }

            #[test]
            fn negative_multiplier() {
                let mut v: Vec<$ty> = vec![1., 2., 3., 4., 5.];
                let (found, low, high) = outliers(-1., &mut v).unwrap();

                assert!(low > high);
                assert_eq!(found, vec![1., 2., 3., 4., 5.]);
            }

            #[test]
            fn severity() {
                let v = data();
                let labeled = classify(&v).unwrap();
                let (inner, outer) = labeled.fences();

                assert_abs_diff_eq!(inner.low, -13. / 3., epsilon = 1e-4);
                assert_abs_diff_eq!(inner.high, 17., epsilon = 1e-4);
                assert_abs_diff_eq!(outer.low, -37. / 3., epsilon = 1e-4);
                assert_abs_diff_eq!(outer.high, 25., epsilon = 1e-4);

                assert_eq!(labeled.count(), (0, 0, 11, 1, 1));
                assert_eq!(labeled.label(9), Some(Label::HighMild));
                assert_eq!(labeled.label(12), Some(Label::HighSevere));
                assert_eq!(labeled.label(0), Some(Label::NotAnOutlier));
                assert_eq!(labeled.label(13), None);
                assert_eq!(labeled.outliers(), vec![20., 400.]);
                assert_eq!(labeled.len(), 13);
                // the caller's order is kept
                assert_eq!(&*labeled, &data()[..]);
            }

            #[test]
            fn low_outliers() {
                let v: Vec<$ty> = vec![-400., -6., 2., 3., 3., 4., 4., 7., 7., 7., 8., 9., 9.];
                let labeled = Tukey::default().classify(&v).unwrap();
                let (los, lom, _, him, his) = labeled.count();

                assert_eq!((los, lom, him, his), (1, 1, 0, 0));
                assert!(labeled.iter().next().map_or(false, |(_, l)| l.is_low() && l.is_severe()));
            }

            #[test]
            fn custom_multipliers() {
                let v = data();
                let tukey: Tukey<$ty> = Tukey::default().mild(0.5).severe(1.);

                assert_eq!(tukey.multipliers(), (0.5, 1.));

                let quantiles = Quantiles::new(&v).unwrap();
                let (inner, outer) = tukey.fences(&quantiles).unwrap();

                assert_eq!(inner, Fences::from_quantiles(0.5, &quantiles));
                assert_eq!(outer, Fences::from_quantiles(1., &quantiles));
                assert!(inner.width() < outer.width());
            }

            #[test]
            fn invalid_multipliers() {
                let v = data();

                let err = Tukey::<$ty>::default()
                    .mild(3.)
                    .severe(1.5)
                    .classify(&v)
                    .unwrap_err();

                assert_eq!(err, Error::InvalidMultiplier { mild: 3., severe: 1.5 });

                assert!(Tukey::<$ty>::default().mild(-1.).classify(&v).is_err());
                assert!(Tukey::<$ty>::default().severe(<$ty>::INFINITY).classify(&v).is_err());
                assert!(Tukey::<$ty>::default().mild(<$ty>::NAN).classify(&v).is_err());
            }

            #[test]
            fn labels() {
                assert!(Label::HighMild.is_high() && Label::HighMild.is_mild());
                assert!(Label::LowSevere.is_low() && Label::LowSevere.is_severe());
                assert!(Label::LowMild.is_outlier() && !Label::LowMild.is_severe());
                assert!(!Label::NotAnOutlier.is_outlier());
                assert!(!Label::NotAnOutlier.is_low() && !Label::NotAnOutlier.is_high());
            }
        }
    };
}

#[cfg(test)]
mod test {
    test!(f32);
    test!(f64);
}
