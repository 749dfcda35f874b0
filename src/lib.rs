//! `anime-recs` library crate.
//!
//! The binary (`recs`) is a thin wrapper around this library so the parser,
//! fetcher and aggregation loop can be tested without spawning processes or
//! touching the network.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
