//! Song search engine and scoring.
//!
//! - [`SearchEngine`](engine::SearchEngine): Ranks a song list against a keyword
//! - [`score_song`](scoring::score_song): Tiered score of a single song
//! - [`token_sort_ratio`](similarity::token_sort_ratio): Word-order-insensitive similarity
//!
//! ## Scoring Tiers
//!
//! The keyword is trimmed and lowercased, then each song is scored by the first
//! tier that matches:
//!
//! | Tier | Score |
//! |------|-------|
//! | `c<id>` identifier | 100 |
//! | Exact title | 100 |
//! | Exact alias | 95 |
//! | Title contains keyword | 90 |
//! | An alias contains keyword | 85 |
//! | Fuzzy similarity | 0-89 |
//!
//! Only the songs tied at the best score are returned.
//!
//! ## Example
//!
//! ```rust
//! use song_resolver::core::song::Song;
//! use song_resolver::matching::engine::SearchEngine;
//!
//! let songs = vec![
//!     Song::new(1, "Title A").with_aliases(["TA"]),
//!     Song::new(2, "Title B"),
//! ];
//!
//! let engine = SearchEngine::new(&songs);
//! let hits = engine.rank("titl");
//! assert_eq!(hits.len(), 2);
//! assert!(hits.iter().all(|h| h.score == 90));
//! ```

pub mod engine;
pub mod scoring;
pub mod similarity;
