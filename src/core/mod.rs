//! Core data types for the song catalog.
//!
//! - [`Song`]: One catalog entry with title, aliases, version and charts
//! - [`Difficulty`], [`DifficultyTier`]: Per-chart data, positional by tier
//! - [`VersionRegistry`]: Version number to label mapping filled by a refresh
//! - [`MatchTier`], [`CatalogState`]: Search and lifecycle classification types
//!
//! ## Identifiers
//!
//! Song ids below 8000 are regular catalog entries. Ids at or above it are
//! auxiliary entries: they stay in memory and in the cache file but search
//! never returns them. A payload without an id is treated as id 9999.

pub mod song;
pub mod types;
pub mod versions;
