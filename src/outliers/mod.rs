//! Classification of outliers
//!
//! WARNING: There's no formal/mathematical definition of what an outlier actually is. Therefore,
//! all outlier classifiers are *subjective*; Tukey's fences are a *de facto* standard that makes
//! no assumption about the distribution of the population (no mean, no standard deviation).

pub mod tukey;
