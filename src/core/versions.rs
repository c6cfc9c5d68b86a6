use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label used for the placeholder entry and for unknown versions
pub const UNKNOWN_VERSION_LABEL: &str = "unknown";

/// A version label as delivered by the metadata source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionLabel {
    #[serde(default)]
    pub version: u32,

    #[serde(default = "unknown_label")]
    pub title: String,
}

fn unknown_label() -> String {
    UNKNOWN_VERSION_LABEL.to_string()
}

/// Mapping from version number to human-readable label
///
/// Always holds the `0 -> "unknown"` placeholder. A registry that still has
/// only that entry has never been populated from the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRegistry {
    labels: BTreeMap<u32, String>,
}

impl VersionRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut labels = BTreeMap::new();
        labels.insert(0, unknown_label());
        Self { labels }
    }

    /// Merge labels, overwriting existing entries with the same key
    pub fn merge<'a>(&mut self, labels: impl IntoIterator<Item = &'a VersionLabel>) {
        for label in labels {
            self.labels.insert(label.version, label.title.clone());
        }
    }

    /// Label for a version, falling back to the placeholder label
    #[must_use]
    pub fn label(&self, version: u32) -> &str {
        self.labels
            .get(&version)
            .map_or(UNKNOWN_VERSION_LABEL, String::as_str)
    }

    #[must_use]
    pub fn get(&self, version: u32) -> Option<&str> {
        self.labels.get(&version).map(String::as_str)
    }

    /// Whether any remote labels have been merged
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.labels.len() > 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Entries in ascending version order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.labels.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl Default for VersionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
