use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub storage: Option<StorageConfig>,

    #[serde(default)]
    pub feed: Option<FeedConfig>,
}

/// Where entries and wins live on disk. Unset paths default into the
/// config directory.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub entries_path: Option<PathBuf>,

    #[serde(default)]
    pub wins_path: Option<PathBuf>,

    /// Append-only JSON-lines log of every refresh
    #[serde(default)]
    pub history_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Standings endpoint (default: ESPN NBA standings)
    #[serde(default)]
    pub url: Option<String>,

    /// Warn when the wins snapshot is older than this, e.g. "12h"
    #[serde(default)]
    pub stale_after: Option<String>,

    /// Retries after the first failed request (default: 3)
    #[serde(default)]
    pub retries: Option<usize>,

    /// Append each refresh to the history file (default: true)
    #[serde(default)]
    pub history: Option<bool>,
}
