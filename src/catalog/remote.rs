use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::catalog::store::CatalogError;
use crate::core::song::Song;
use crate::core::versions::VersionLabel;

pub const DEFAULT_SONGS_URL: &str = "https://maimai.lxns.net/api/v0/chunithm/song/list";
pub const DEFAULT_ALIASES_URL: &str = "https://maimai.lxns.net/api/v0/chunithm/alias/list";

/// Dataset version tag requested from the songs endpoint
pub const DEFAULT_DATASET_VERSION: u32 = 23000;

/// Where and what to fetch
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub songs_url: String,
    pub aliases_url: String,
    pub dataset_version: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            songs_url: DEFAULT_SONGS_URL.to_string(),
            aliases_url: DEFAULT_ALIASES_URL.to_string(),
            dataset_version: DEFAULT_DATASET_VERSION,
        }
    }
}

/// Payload of the songs endpoint
#[derive(Debug, Deserialize)]
pub struct SongListResponse {
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub versions: Vec<VersionLabel>,
}

/// Payload of the alias endpoint
#[derive(Debug, Deserialize)]
pub struct AliasListResponse {
    #[serde(default)]
    pub aliases: Vec<AliasEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AliasEntry {
    pub song_id: u32,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Outcome of the alias request; a non-success status is not an error
#[derive(Debug)]
pub enum AliasFetch {
    Available(AliasListResponse),
    Unavailable { status: u16 },
}

/// HTTP client for the two metadata endpoints
pub struct RemoteClient {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Fetch the song catalog with note detail
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RemoteUnavailable`] on a non-success status,
    /// [`CatalogError::Http`] on transport failure, or
    /// [`CatalogError::Parse`] if the body is not the expected JSON.
    pub async fn fetch_songs(&self) -> Result<SongListResponse, CatalogError> {
        let version = self.config.dataset_version.to_string();
        tracing::debug!("Requesting songs from {}", self.config.songs_url);

        let response = self
            .client
            .get(&self.config.songs_url)
            .query(&[("version", version.as_str()), ("notes", "true")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::RemoteUnavailable {
                endpoint: self.config.songs_url.clone(),
                status: status.as_u16(),
            });
        }

        parse_body(response).await
    }

    /// Fetch community aliases
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] on transport failure or
    /// [`CatalogError::Parse`] if a successful response does not parse.
    pub async fn fetch_aliases(&self) -> Result<AliasFetch, CatalogError> {
        tracing::debug!("Requesting aliases from {}", self.config.aliases_url);

        let response = self.client.get(&self.config.aliases_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(AliasFetch::Unavailable {
                status: status.as_u16(),
            });
        }

        Ok(AliasFetch::Available(parse_body(response).await?))
    }
}

async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CatalogError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_list_payload() {
        let json = r#"{
            "songs": [{"id": 1, "title": "A", "artist": "X", "version": 10000, "difficulties": []}],
            "versions": [{"version": 10000, "title": "CHUNITHM"}]
        }"#;
        let payload: SongListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(payload.songs.len(), 1);
        assert_eq!(payload.versions[0].title, "CHUNITHM");
    }

    #[test]
    fn test_alias_payload() {
        let json = r#"{"aliases": [{"song_id": 1, "aliases": ["a", "b"]}, {"song_id": 2}]}"#;
        let payload: AliasListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(payload.aliases[0].aliases, vec!["a", "b"]);
        assert!(payload.aliases[1].aliases.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = RemoteConfig::default();
        assert_eq!(config.dataset_version, 23000);
        assert!(config.songs_url.ends_with("/song/list"));
        assert!(config.aliases_url.ends_with("/alias/list"));
    }
}
