//! Outlier detection with Tukey's fences.
//!
//! The fences are derived from the interquartile range of the sample, so the detection is robust
//! (it's not influenced by the extreme values themselves) and makes no assumption about the
//! distribution of the population. The method:
//!
//! - detects several outliers at once, both low and high ones
//! - has a tunable multiplier to adjust how strict the detection is
//!
//! Quartiles are estimated with the "Definition 8" estimator of Hyndman & Fan, see the
//! `quantile` module.
//!
//! ```
//! let mut data = vec![7., 3., 4., 2., 9., 8., 7., 4., 3., 20., 9., 7., 400.];
//!
//! let (outliers, low, high) = tukey::outliers(1.5, &mut data).unwrap();
//!
//! assert_eq!(outliers, vec![20., 400.]);
//! assert!(low < 2. && high > 9.);
//! ```

#![deny(missing_docs)]

#[macro_use]
extern crate log;

#[cfg(test)]
mod test;

mod error;
mod float;

pub mod outliers;
pub mod quantile;

pub use crate::error::{Error, Result};
pub use crate::float::Float;
pub use crate::outliers::tukey::{classify, outliers, Fences, Label, LabeledSample, Tukey};
pub use crate::quantile::{quantile, Quantiles};
