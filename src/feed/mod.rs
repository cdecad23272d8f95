pub mod client;
pub mod espn;

pub use client::{create_client, fetch_standings, DEFAULT_STANDINGS_URL};
pub use espn::parse_standings;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::wins::{append_history, save_wins, WinsRow, WinsTable};

/// Fewer rows than this means the feed is broken, not that teams vanished
pub const MIN_ROWS: usize = 26;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("standings request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("standings feed returned HTTP {0}")]
    Status(u16),

    #[error("invalid standings payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("too few rows from standings feed: got {count}, need at least {min}")]
    TooFewRows { count: usize, min: usize },
}

impl FeedError {
    /// True when the feed could not be reached, as opposed to a bad payload
    pub fn is_network(&self) -> bool {
        matches!(self, FeedError::Http(_) | FeedError::Status(_))
    }
}

/// Reject a partial feed so the previous snapshot stays in place
pub fn check_row_count(rows: &[WinsRow]) -> Result<(), FeedError> {
    if rows.len() < MIN_ROWS {
        return Err(FeedError::TooFewRows {
            count: rows.len(),
            min: MIN_ROWS,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSummary {
    pub updated: usize,
    pub at: DateTime<Utc>,
}

/// Pull the standings feed and replace the wins snapshot.
///
/// On any failure the existing snapshot is untouched. History is appended
/// only after the snapshot is saved.
pub async fn refresh_wins(
    client: &reqwest::Client,
    url: &str,
    retries: usize,
    wins_path: &Path,
    history_path: Option<&Path>,
) -> Result<RefreshSummary> {
    let rows = fetch_standings(client, url, retries).await?;

    if let Err(e) = check_row_count(&rows) {
        warn!("Keeping previous wins snapshot: {}", e);
        return Err(e.into());
    }

    let now = Utc::now();
    let table = WinsTable::from_rows(&rows, now);
    save_wins(wins_path, &table)?;

    if let Some(history_path) = history_path {
        append_history(history_path, &rows, now)?;
    }

    info!("Updated wins for {} teams", rows.len());

    Ok(RefreshSummary {
        updated: rows.len(),
        at: now,
    })
}
