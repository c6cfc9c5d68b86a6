use crate::core::song::Song;
use crate::core::types::{MatchTier, ID_PREFIX};
use crate::matching::similarity::token_sort_ratio;

/// Highest score the fuzzy fallback may produce, below every title tier
pub const FUZZY_SCORE_CAP: u8 = 89;

/// Score of a single song against a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierScore {
    pub tier: MatchTier,
    pub score: u8,
}

/// A song prepared for matching: lowercased title and aliases
struct Candidate<'a> {
    keyword: &'a str,
    id: u32,
    title: String,
    aliases: Vec<String>,
}

impl<'a> Candidate<'a> {
    fn new(keyword: &'a str, song: &Song) -> Self {
        Self {
            keyword,
            id: song.id,
            title: song.title.to_lowercase(),
            aliases: song.aliases.iter().map(|a| a.to_lowercase()).collect(),
        }
    }
}

/// One rule in the priority table
struct TierRule {
    tier: MatchTier,
    score: u8,
    matches: fn(&Candidate<'_>) -> bool,
}

fn is_identifier(c: &Candidate<'_>) -> bool {
    c.keyword
        .strip_prefix(ID_PREFIX)
        .is_some_and(|rest| rest == c.id.to_string())
}

fn is_exact_title(c: &Candidate<'_>) -> bool {
    c.keyword == c.title
}

fn is_exact_alias(c: &Candidate<'_>) -> bool {
    c.aliases.iter().any(|a| a == c.keyword)
}

fn is_title_substring(c: &Candidate<'_>) -> bool {
    c.title.contains(c.keyword)
}

fn is_alias_substring(c: &Candidate<'_>) -> bool {
    c.aliases.iter().any(|a| a.contains(c.keyword))
}

/// Exact and substring tiers, tried in order; the first match wins
const TIER_RULES: [TierRule; 5] = [
    TierRule {
        tier: MatchTier::Identifier,
        score: 100,
        matches: is_identifier,
    },
    TierRule {
        tier: MatchTier::ExactTitle,
        score: 100,
        matches: is_exact_title,
    },
    TierRule {
        tier: MatchTier::ExactAlias,
        score: 95,
        matches: is_exact_alias,
    },
    TierRule {
        tier: MatchTier::TitleSubstring,
        score: 90,
        matches: is_title_substring,
    },
    TierRule {
        tier: MatchTier::AliasSubstring,
        score: 85,
        matches: is_alias_substring,
    },
];

/// Normalize a raw query into the form the tiers compare against
#[must_use]
pub fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// Score a song against an already-normalized keyword.
///
/// Tiers are evaluated in priority order and are not cumulative. When none of
/// the exact or substring tiers match, the best token-sorted similarity
/// against the title and every alias is used, capped at [`FUZZY_SCORE_CAP`].
#[must_use]
pub fn score_song(keyword: &str, song: &Song) -> TierScore {
    let candidate = Candidate::new(keyword, song);

    if let Some(rule) = TIER_RULES.iter().find(|rule| (rule.matches)(&candidate)) {
        return TierScore {
            tier: rule.tier,
            score: rule.score,
        };
    }

    let best = candidate
        .aliases
        .iter()
        .map(|alias| token_sort_ratio(keyword, alias))
        .fold(token_sort_ratio(keyword, &candidate.title), u8::max);

    TierScore {
        tier: MatchTier::Fuzzy,
        score: best.min(FUZZY_SCORE_CAP),
    }
}
