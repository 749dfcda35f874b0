//! Remote data sources.

pub mod jikan;

pub use jikan::{FetchError, JikanClient, RecommendationSource, Sleeper, ThreadSleeper};
