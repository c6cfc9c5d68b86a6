//! Song catalog storage, caching and remote refresh.
//!
//! The catalog is fetched from two remote endpoints (songs and community
//! aliases), merged, installed as an in-memory snapshot, and persisted to a
//! single JSON cache file in the data directory.
//!
//! ## Load Policy
//!
//! [`CatalogStore::load`](store::CatalogStore::load) reads the cache unless a
//! refresh is forced or the version registry has never been populated; a
//! missing or corrupt cache falls back to a remote fetch. A failed fetch
//! empties the in-memory catalog but leaves any earlier cache file in place.
//!
//! ## Cache Format
//!
//! ```text
//! {
//!   "songs": [
//!     {"id": 1, "title": "...", "aliases": ["..."], "difficulties": [...], ...}
//!   ]
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use song_resolver::catalog::remote::RemoteConfig;
//! use song_resolver::catalog::store::CatalogStore;
//!
//! # async fn demo() {
//! let store = CatalogStore::new("data", RemoteConfig::default());
//! store.load(false).await;
//!
//! for song in store.search("c1234", 60) {
//!     println!("{}", song.title);
//! }
//! # }
//! ```

pub mod cache;
pub mod remote;
pub mod store;
