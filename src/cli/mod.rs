//! Command-line interface for song-resolver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Find the best-matching songs for a keyword
//! - **debug**: Show raw per-song scores for a keyword
//! - **refresh**: Force a remote refresh of the catalog
//! - **versions**: List version labels from the catalog source
//! - **serve**: Start the HTTP API
//!
//! ## Usage
//!
//! ```text
//! # Search by title, alias or id
//! song-resolver search "blue zenith"
//! song-resolver search c1234
//!
//! # JSON output for scripting
//! song-resolver search "titl" --format json
//!
//! # Refresh the cache from the remote source
//! song-resolver refresh --data-dir /var/lib/song-resolver
//!
//! # Start the API
//! song-resolver serve --port 8080
//! ```

use std::future::Future;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::remote::{
    RemoteConfig, DEFAULT_ALIASES_URL, DEFAULT_DATASET_VERSION, DEFAULT_SONGS_URL,
};
use crate::catalog::store::{CatalogStore, LoadOutcome};

pub mod catalog;
pub mod search;

#[derive(Parser)]
#[command(name = "song-resolver")]
#[command(version)]
#[command(about = "Find songs in a music catalog by title, alias or id")]
#[command(
    long_about = "song-resolver keeps a local cache of a remote song catalog and resolves free-text queries against it.\n\nEach song is scored by the first matching tier:\n- c<id> identifier or exact title (100)\n- Exact alias (95)\n- Title substring (90)\n- Alias substring (85)\n- Fuzzy similarity (at most 89)\n\nAll songs tied at the best score are returned."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Where the catalog comes from and where it is cached
#[derive(clap::Args, Clone, Debug)]
pub struct SourceArgs {
    /// Directory holding the catalog cache file
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Songs endpoint
    #[arg(long, global = true, default_value = DEFAULT_SONGS_URL)]
    pub songs_url: String,

    /// Aliases endpoint
    #[arg(long, global = true, default_value = DEFAULT_ALIASES_URL)]
    pub aliases_url: String,

    /// Dataset version tag sent to the songs endpoint
    #[arg(long, global = true, default_value_t = DEFAULT_DATASET_VERSION)]
    pub dataset_version: u32,
}

impl SourceArgs {
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig {
            songs_url: self.songs_url.clone(),
            aliases_url: self.aliases_url.clone(),
            dataset_version: self.dataset_version,
        }
    }

    pub fn open_store(&self) -> CatalogStore {
        CatalogStore::new(&self.data_dir, self.remote_config())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the best-matching songs for a keyword
    Search(search::SearchArgs),

    /// Show raw scores for the first songs in the catalog
    Debug(search::DebugArgs),

    /// Fetch the catalog from the remote source, replacing the cache
    Refresh,

    /// List known version labels
    Versions(catalog::VersionsArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Run a future to completion on a fresh runtime
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created.
pub fn block_on<F: Future>(future: F) -> anyhow::Result<F::Output> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(future))
}

/// Describe a load outcome on stderr when verbose
pub(crate) fn report_load(outcome: &LoadOutcome, verbose: bool) {
    if !verbose {
        return;
    }
    match outcome {
        LoadOutcome::Cache { song_count } => {
            eprintln!("Loaded {song_count} songs from cache");
        }
        LoadOutcome::Remote(report) => {
            eprintln!("Fetched {} songs from remote", report.song_count);
        }
        LoadOutcome::Failed(e) => {
            eprintln!("Catalog load failed: {e}");
        }
    }
}
