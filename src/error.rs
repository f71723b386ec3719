use std::fmt;

/// Errors reported by the quantile estimator and the outlier classifiers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// A quantile was requested from a sample without data points
    EmptySample,
    /// The multipliers of a `Tukey` classifier can't produce nested fences
    InvalidMultiplier {
        /// Multiplier of the inner ("mild") fences
        mild: f64,
        /// Multiplier of the outer ("severe") fences
        severe: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptySample => f.write_str("Can't compute quantiles of an empty sample"),
            Error::InvalidMultiplier { mild, severe } => write!(
                f,
                "Invalid fence multipliers: mild = {}, severe = {} (expected 0 <= mild <= severe)",
                mild, severe
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Shorthand for results whose error is [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
