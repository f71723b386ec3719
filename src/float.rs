//! Float trait

use std::fmt;

use cast::From;
use num_traits::float;

/// Floating point types a sample can be made of.
///
/// This is an extension of `num_traits::float::Float` that adds safe casting from the integer
/// and `f32` constants used by the estimators, plus `Debug` so values can be logged.
pub trait Float:
    float::Float + From<usize, Output = Self> + From<f32, Output = Self> + fmt::Debug + Sync + Send
{
}

impl Float for f32 {}
impl Float for f64 {}
