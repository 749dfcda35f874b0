//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - list entries parsed from the export (`ListEntry`, `WatchStatus`, `KnownIds`)
//! - remote suggestions (`RecommendationEntry`)
//! - run thresholds (`RunConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
