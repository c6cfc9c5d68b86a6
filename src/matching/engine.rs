use serde::Serialize;

use crate::core::song::Song;
use crate::core::types::{MatchTier, DEFAULT_THRESHOLD};
use crate::matching::scoring::{normalize_keyword, score_song};

/// Number of leading songs the debug preview scores
pub const DEBUG_PREVIEW_SONGS: usize = 50;

/// Number of entries the debug preview returns
pub const DEBUG_RESULT_LIMIT: usize = 10;

/// A scored song
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub song: &'a Song,
    pub score: u8,
    pub tier: MatchTier,
}

/// Configuration for the search engine
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum score for a song to be considered at all
    pub threshold: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Ranks songs against a free-text keyword
pub struct SearchEngine<'a> {
    songs: &'a [Song],
    config: SearchConfig,
}

impl<'a> SearchEngine<'a> {
    /// Create a search engine with the default threshold
    pub fn new(songs: &'a [Song]) -> Self {
        Self {
            songs,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(songs: &'a [Song], config: SearchConfig) -> Self {
        Self { songs, config }
    }

    /// Best-scoring songs for a keyword, ties included.
    ///
    /// Every song scoring exactly the top score is returned in input order;
    /// anything lower is dropped. Empty keyword or empty catalog yields nothing.
    pub fn rank(&self, keyword: &str) -> Vec<SearchHit<'a>> {
        let mut hits = self.scored(self.songs, keyword, self.config.threshold);

        let Some(max_score) = hits.first().map(|hit| hit.score) else {
            return hits;
        };
        hits.retain(|hit| hit.score == max_score);
        hits
    }

    /// Same as [`Self::rank`], returning the songs only
    pub fn search(&self, keyword: &str) -> Vec<Song> {
        self.rank(keyword)
            .into_iter()
            .map(|hit| hit.song.clone())
            .collect()
    }

    /// Raw scores for operator inspection.
    ///
    /// Only the first [`DEBUG_PREVIEW_SONGS`] songs are scored, always at the
    /// default threshold, and the top [`DEBUG_RESULT_LIMIT`] entries are
    /// returned across all score levels.
    pub fn debug_scores(&self, keyword: &str) -> Vec<SearchHit<'a>> {
        let preview = &self.songs[..self.songs.len().min(DEBUG_PREVIEW_SONGS)];
        let mut hits = self.scored(preview, keyword, DEFAULT_THRESHOLD);
        hits.truncate(DEBUG_RESULT_LIMIT);
        hits
    }

    /// Score searchable songs, drop those under the threshold, and sort by
    /// score descending. The sort is stable so equal scores keep input order.
    fn scored(&self, songs: &'a [Song], keyword: &str, threshold: u8) -> Vec<SearchHit<'a>> {
        let keyword = normalize_keyword(keyword);
        if keyword.is_empty() || songs.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'a>> = songs
            .iter()
            .filter(|song| song.is_searchable())
            .filter_map(|song| {
                let scored = score_song(&keyword, song);
                (scored.score >= threshold).then_some(SearchHit {
                    song,
                    score: scored.score,
                    tier: scored.tier,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits
    }
}

/// Search `songs` for `keyword`, returning every song tied at the top score
#[must_use]
pub fn search(songs: &[Song], keyword: &str, threshold: u8) -> Vec<Song> {
    SearchEngine::with_config(songs, SearchConfig { threshold }).search(keyword)
}
