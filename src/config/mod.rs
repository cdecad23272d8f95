mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, FeedConfig, StorageConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::feed::DEFAULT_STANDINGS_URL;
use crate::scoring::{validate_scoring, ScoringConfig};

const DEFAULT_STALE_AFTER: &str = "12h";
const DEFAULT_RETRIES: usize = 3;

/// Get the config directory path (~/.config/nba-pool/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config").join("nba-pool"))
        .unwrap_or_else(|| PathBuf::from(".nba-pool"))
}

/// Get the default config file path (~/.config/nba-pool/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Expand a leading `~` to the home directory. Other paths pass through.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Create the parent directory of `path` if it is missing
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/nba-pool/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing file at the default path is not an error; every setting has a default.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

impl Config {
    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    fn storage_path(&self, pick: impl Fn(&StorageConfig) -> Option<&PathBuf>, file: &str) -> PathBuf {
        self.storage
            .as_ref()
            .and_then(|s| pick(s).map(|p| expand_home(p)))
            .unwrap_or_else(|| get_config_dir().join(file))
    }

    pub fn entries_path(&self) -> PathBuf {
        self.storage_path(|s| s.entries_path.as_ref(), "entries.json")
    }

    pub fn wins_path(&self) -> PathBuf {
        self.storage_path(|s| s.wins_path.as_ref(), "wins.json")
    }

    pub fn history_path(&self) -> PathBuf {
        self.storage_path(|s| s.history_path.as_ref(), "wins-history.jsonl")
    }

    pub fn feed_url(&self) -> &str {
        self.feed
            .as_ref()
            .and_then(|f| f.url.as_deref())
            .unwrap_or(DEFAULT_STANDINGS_URL)
    }

    pub fn feed_retries(&self) -> usize {
        self.feed
            .as_ref()
            .and_then(|f| f.retries)
            .unwrap_or(DEFAULT_RETRIES)
    }

    pub fn record_history(&self) -> bool {
        self.feed.as_ref().and_then(|f| f.history).unwrap_or(true)
    }

    /// Maximum snapshot age before scores are flagged as stale
    pub fn stale_after(&self) -> Result<Duration> {
        let raw = self
            .feed
            .as_ref()
            .and_then(|f| f.stale_after.as_deref())
            .unwrap_or(DEFAULT_STALE_AFTER);
        humantime::parse_duration(raw)
            .with_context(|| format!("feed.stale_after: invalid duration '{}'", raw))
    }
}

/// Validate the whole config at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(scoring_errors) = validate_scoring(&config.scoring()) {
        errors.extend(scoring_errors);
    }

    if let Some(ref feed) = config.feed {
        if let Some(ref raw) = feed.stale_after {
            if let Err(e) = humantime::parse_duration(raw) {
                errors.push(format!("feed.stale_after: invalid format '{}' - {}", raw, e));
            }
        }
        if let Some(ref url) = feed.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!("feed.url: expected an http(s) URL, got '{}'", url));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
