use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::catalog::cache::{self, CacheError, CACHE_FILE_NAME};
use crate::catalog::remote::{AliasEntry, AliasFetch, RemoteClient, RemoteConfig};
use crate::core::song::Song;
use crate::core::types::CatalogState;
use crate::core::versions::VersionRegistry;
use crate::matching::engine::search;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    RemoteUnavailable { endpoint: String, status: u16 },

    #[error("Failed to parse payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The complete song list currently installed, replaced as a whole
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    songs: Vec<Song>,
}

impl CatalogSnapshot {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Whether aliases were merged during a fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum AliasStatus {
    /// Alias list received; count of songs that got at least one alias
    Attached { songs_with_aliases: usize },
    /// Alias endpoint answered with a non-success status
    Unavailable { http_status: u16 },
}

/// Whether the fetched snapshot reached the cache file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum PersistStatus {
    Written,
    /// The in-memory snapshot was installed but the cache was not updated
    Failed(String),
}

/// Summary of a successful remote fetch
#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    pub song_count: usize,
    pub version_count: usize,
    pub aliases: AliasStatus,
    pub persisted: PersistStatus,
    pub completed_at: DateTime<Utc>,
}

/// Result of [`CatalogStore::load`]
#[derive(Debug)]
pub enum LoadOutcome {
    /// Snapshot read from the cache file; no remote call was made
    Cache { song_count: usize },
    /// Snapshot fetched from the remote source
    Remote(FetchReport),
    /// Fetch failed; the in-memory catalog is now empty
    Failed(CatalogError),
}

impl LoadOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<FetchReport, CatalogError>> for LoadOutcome {
    fn from(result: Result<FetchReport, CatalogError>) -> Self {
        match result {
            Ok(report) => Self::Remote(report),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Owns the in-memory catalog, the version registry and the cache file.
///
/// Refreshes are serialized; searches read whichever snapshot is installed
/// and never observe a partially merged list.
pub struct CatalogStore {
    cache_path: PathBuf,
    remote: RemoteClient,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    versions: RwLock<VersionRegistry>,
    state: RwLock<CatalogState>,
    refresh_lock: Mutex<()>,
}

impl CatalogStore {
    /// Create an empty store caching into `data_dir`
    pub fn new(data_dir: impl AsRef<Path>, config: RemoteConfig) -> Self {
        Self {
            cache_path: data_dir.as_ref().join(CACHE_FILE_NAME),
            remote: RemoteClient::new(config),
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::default())),
            versions: RwLock::new(VersionRegistry::new()),
            state: RwLock::new(CatalogState::Empty),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn remote_config(&self) -> &RemoteConfig {
        self.remote.config()
    }

    /// Currently installed snapshot
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn song_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Copy of the version registry
    pub fn versions(&self) -> VersionRegistry {
        self.versions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> CatalogState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Search the installed snapshot
    pub fn search(&self, keyword: &str, threshold: u8) -> Vec<Song> {
        search(self.snapshot().songs(), keyword, threshold)
    }

    /// Load the catalog, preferring the cache file.
    ///
    /// A remote fetch is made when `force_refresh` is set, when the version
    /// registry has never been populated, or when the cache is missing or
    /// unreadable. A failed fetch leaves the in-memory catalog empty.
    pub async fn load(&self, force_refresh: bool) -> LoadOutcome {
        let _guard = self.refresh_lock.lock().await;
        self.set_state(CatalogState::Loading);

        if force_refresh || !self.versions().is_populated() {
            return self.refresh_locked().await.into();
        }

        match read_cache_off_runtime(self.cache_path.clone()).await {
            Ok(songs) => {
                let song_count = songs.len();
                self.install(songs);
                self.set_state(CatalogState::Ready);
                tracing::info!("Loaded {song_count} songs from cache");
                LoadOutcome::Cache { song_count }
            }
            Err(CacheError::Missing(path)) => {
                tracing::debug!("No cache at {}, fetching", path.display());
                self.refresh_locked().await.into()
            }
            Err(e) => {
                tracing::warn!("{e}; fetching from remote");
                self.refresh_locked().await.into()
            }
        }
    }

    /// Fetch from the remote source, bypassing the cache.
    ///
    /// On failure the in-memory catalog is emptied before the error is
    /// returned; an existing cache file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the [`CatalogError`] that aborted the fetch.
    pub async fn fetch(&self) -> Result<FetchReport, CatalogError> {
        let _guard = self.refresh_lock.lock().await;
        self.set_state(CatalogState::Loading);
        self.refresh_locked().await
    }

    /// Caller must hold `refresh_lock`
    async fn refresh_locked(&self) -> Result<FetchReport, CatalogError> {
        tracing::info!("Fetching catalog from {}", self.remote.config().songs_url);
        match self.try_fetch().await {
            Ok(report) => {
                self.set_state(CatalogState::Ready);
                tracing::info!("Fetched {} songs from remote", report.song_count);
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Failed to load catalog: {e}");
                self.install(Vec::new());
                self.set_state(CatalogState::Empty);
                Err(e)
            }
        }
    }

    async fn try_fetch(&self) -> Result<FetchReport, CatalogError> {
        let payload = self.remote.fetch_songs().await?;
        let version_count = {
            let mut versions = self
                .versions
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            versions.merge(&payload.versions);
            versions.len()
        };

        let mut songs = payload.songs;
        let aliases = match self.remote.fetch_aliases().await? {
            AliasFetch::Available(list) => {
                let songs_with_aliases = attach_aliases(&mut songs, list.aliases);
                tracing::info!("Received aliases for {songs_with_aliases} songs");
                AliasStatus::Attached { songs_with_aliases }
            }
            AliasFetch::Unavailable { status } => {
                tracing::warn!("Alias endpoint returned status {status}, continuing without aliases");
                for song in &mut songs {
                    song.aliases.clear();
                }
                AliasStatus::Unavailable { http_status: status }
            }
        };

        let song_count = songs.len();
        let snapshot = self.install(songs);

        let persisted = match write_cache_off_runtime(self.cache_path.clone(), snapshot).await {
            Ok(()) => PersistStatus::Written,
            Err(e) => {
                tracing::error!(
                    "Failed to write cache {}: {e}",
                    self.cache_path.display()
                );
                PersistStatus::Failed(e.to_string())
            }
        };

        Ok(FetchReport {
            song_count,
            version_count,
            aliases,
            persisted,
            completed_at: Utc::now(),
        })
    }

    fn install(&self, songs: Vec<Song>) -> Arc<CatalogSnapshot> {
        let snapshot = Arc::new(CatalogSnapshot::new(songs));
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        snapshot
    }

    fn set_state(&self, state: CatalogState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

/// Read the cache file on the blocking pool
async fn read_cache_off_runtime(path: PathBuf) -> Result<Vec<Song>, CacheError> {
    tokio::task::spawn_blocking(move || cache::read_cache(&path))
        .await
        .map_err(|e| CacheError::Io(std::io::Error::other(e)))?
}

/// Write a snapshot to the cache file on the blocking pool
async fn write_cache_off_runtime(
    path: PathBuf,
    snapshot: Arc<CatalogSnapshot>,
) -> Result<(), CacheError> {
    tokio::task::spawn_blocking(move || cache::write_cache(&path, snapshot.songs()))
        .await
        .map_err(|e| CacheError::Io(std::io::Error::other(e)))?
}

/// Replace every song's aliases with the entry for its id, or an empty list.
/// Returns how many songs received a non-empty alias list.
fn attach_aliases(songs: &mut [Song], entries: Vec<AliasEntry>) -> usize {
    let by_id: HashMap<u32, Vec<String>> = entries
        .into_iter()
        .map(|entry| (entry.song_id, entry.aliases))
        .collect();

    let mut attached = 0;
    for song in songs.iter_mut() {
        song.aliases = by_id.get(&song.id).cloned().unwrap_or_default();
        if !song.aliases.is_empty() {
            attached += 1;
        }
    }
    attached
}
