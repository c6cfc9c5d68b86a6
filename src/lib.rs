//! # song-resolver
//!
//! A library for resolving free-text queries against a music title catalog.
//!
//! Players refer to songs by their full title, by fragments of it, by
//! community nicknames, or by catalog id. `song-resolver` keeps a local cache
//! of a remote song catalog (songs plus community aliases) and ranks every
//! song against a query with a tiered exact/substring/fuzzy scheme, returning
//! all songs tied for the best score.
//!
//! ## Features
//!
//! - **Identifier lookup**: `c1234` resolves song 1234 directly
//! - **Alias matching**: Community nicknames match exactly or by substring
//! - **Fuzzy fallback**: Word-order-insensitive similarity, capped below title matches
//! - **Tie-inclusive results**: Equally good matches are all returned
//! - **Cache-first loading**: Remote fetch only when needed or forced
//! - **Degraded refresh**: Alias outages leave songs searchable by title
//!
//! ## Example
//!
//! ```rust
//! use song_resolver::{search, Song};
//!
//! let songs = vec![
//!     Song::new(1, "Title A").with_aliases(["TA"]),
//!     Song::new(2, "Title B"),
//! ];
//!
//! let results = search(&songs, "title a", 60);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id, 1);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog store, cache file and remote client
//! - [`core`]: Core data types for songs, difficulties and versions
//! - [`matching`]: Search engine and scoring
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::{CatalogError, CatalogStore, FetchReport, LoadOutcome};
pub use core::song::{Difficulty, DifficultyTier, Song};
pub use core::types::*;
pub use core::versions::VersionRegistry;
pub use matching::engine::{search, SearchEngine, SearchHit};
