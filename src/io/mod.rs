//! Input helpers.
//!
//! - MyAnimeList XML export ingest (`animelist`)

pub mod animelist;

pub use animelist::*;
