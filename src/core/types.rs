use serde::{Deserialize, Serialize};

/// Identifier assumed for a song whose payload carries no `id`
pub const UNKNOWN_SONG_ID: u32 = 9999;

/// Songs with an id at or above this value are auxiliary entries and never searchable
pub const AUXILIARY_ID_FLOOR: u32 = 8000;

/// Prefix for identifier lookups (`c1234` resolves song 1234)
pub const ID_PREFIX: char = 'c';

/// Default minimum score a song must reach to appear in search results
pub const DEFAULT_THRESHOLD: u8 = 60;

/// Which scoring tier produced a song's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Keyword is the prefixed song id
    Identifier,
    /// Keyword equals the title
    ExactTitle,
    /// Keyword equals one of the aliases
    ExactAlias,
    /// Keyword occurs inside the title
    TitleSubstring,
    /// Keyword occurs inside an alias
    AliasSubstring,
    /// Token-sorted similarity fallback
    Fuzzy,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier => write!(f, "identifier"),
            Self::ExactTitle => write!(f, "exact title"),
            Self::ExactAlias => write!(f, "exact alias"),
            Self::TitleSubstring => write!(f, "title substring"),
            Self::AliasSubstring => write!(f, "alias substring"),
            Self::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Lifecycle of the in-memory catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogState {
    /// Nothing loaded, or the last refresh failed
    Empty,
    /// A load or refresh is underway
    Loading,
    /// A snapshot from the cache or the remote source is installed
    Ready,
}

impl std::fmt::Display for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
        }
    }
}
