//! HTTP API for song lookup.
//!
//! This module exposes the catalog and search engine as a JSON API using Axum.
//! The catalog is loaded once at startup (cache first) and can be refreshed
//! on demand.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! song-resolver serve
//!
//! # Custom port and data directory
//! song-resolver serve --port 3000 --data-dir /var/lib/song-resolver
//!
//! # Bind to all interfaces
//! song-resolver serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/search?q=<keyword>&threshold=<0-100>` - Best-matching songs, ties included
//! - `GET /api/debug?q=<keyword>` - Raw scores for the first songs in the catalog
//! - `GET /api/catalog` - Catalog state, song count and version labels
//! - `POST /api/refresh` - Force a remote refresh

pub mod server;
