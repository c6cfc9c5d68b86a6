use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::types::{AUXILIARY_ID_FLOOR, UNKNOWN_SONG_ID};

fn unknown_song_id() -> u32 {
    UNKNOWN_SONG_ID
}

/// A single catalog entry
///
/// Fields the search engine does not care about (genre, bpm, ...) are kept in
/// `extra` so that a song read from the remote source and written to the cache
/// comes back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Stable external identifier
    #[serde(default = "unknown_song_id")]
    pub id: u32,

    /// Display title, matched case-insensitively
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub artist: String,

    /// Community nicknames, matched case-insensitively
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Key into the version registry
    #[serde(default)]
    pub version: u32,

    /// Difficulty charts, positional by tier
    #[serde(default)]
    pub difficulties: Vec<Difficulty>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Song {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: String::new(),
            aliases: Vec::new(),
            version: 0,
            difficulties: Vec::new(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_difficulties(mut self, difficulties: Vec<Difficulty>) -> Self {
        self.difficulties = difficulties;
        self
    }

    /// Whether this entry can appear in search results
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.id < AUXILIARY_ID_FLOOR
    }

    /// Chart for a given tier, if the song has that slot
    #[must_use]
    pub fn difficulty(&self, tier: DifficultyTier) -> Option<&Difficulty> {
        self.difficulties.get(tier.slot())
    }

    /// True only for entries that carry the optional hardest tier
    #[must_use]
    pub fn has_top_tier(&self) -> bool {
        self.difficulty(DifficultyTier::Ultima).is_some()
    }
}

/// Difficulty tiers in slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DifficultyTier {
    Basic,
    Advanced,
    Expert,
    Master,
    Ultima,
}

impl DifficultyTier {
    pub const ALL: [Self; 5] = [
        Self::Basic,
        Self::Advanced,
        Self::Expert,
        Self::Master,
        Self::Ultima,
    ];

    #[must_use]
    pub fn slot(self) -> usize {
        match self {
            Self::Basic => 0,
            Self::Advanced => 1,
            Self::Expert => 2,
            Self::Master => 3,
            Self::Ultima => 4,
        }
    }

    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Basic => "BAS",
            Self::Advanced => "ADV",
            Self::Expert => "EXP",
            Self::Master => "MAS",
            Self::Ultima => "ULT",
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "Basic"),
            Self::Advanced => write!(f, "Advanced"),
            Self::Expert => write!(f, "Expert"),
            Self::Master => write!(f, "Master"),
            Self::Ultima => write!(f, "Ultima"),
        }
    }
}

/// One chart of a song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Slot index as reported by the source
    #[serde(default)]
    pub difficulty: u8,

    /// Display level such as `13+`
    #[serde(default)]
    pub level: String,

    /// Fractional difficulty rating
    #[serde(default)]
    pub level_value: f64,

    #[serde(default)]
    pub note_designer: String,

    #[serde(default)]
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<NoteCounts>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Difficulty {
    pub fn new(level_value: f64, note_designer: impl Into<String>) -> Self {
        Self {
            difficulty: 0,
            level: String::new(),
            level_value,
            note_designer: note_designer.into(),
            version: 0,
            notes: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_note_total(mut self, total: u32) -> Self {
        self.notes = Some(NoteCounts {
            total,
            extra: Map::new(),
        });
        self
    }

    /// Total note count, 0 when the source omitted note detail
    #[must_use]
    pub fn note_count_total(&self) -> u32 {
        self.notes.as_ref().map_or(0, |n| n.total)
    }
}

/// Note counts for a chart; only the total is modelled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteCounts {
    #[serde(default)]
    pub total: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
