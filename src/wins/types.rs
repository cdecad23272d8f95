use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::league::TeamId;

/// One team's win count as reported by the standings feed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WinsRow {
    pub team_id: TeamId,
    pub wins: u32,
}

/// Snapshot of every team's current win count.
///
/// Scoring treats this as read-only. A refresh produces a new table rather
/// than updating one in place. Teams missing from the table have 0 wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WinsTable {
    #[serde(default)]
    pub wins: BTreeMap<TeamId, u32>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Coerce a raw feed number into a win count.
///
/// Negative, NaN and infinite values become 0; fractions truncate.
/// Finite values at or above `u32::MAX` saturate to `u32::MAX`.
pub fn coerce_wins(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        0
    } else if raw >= u32::MAX as f64 {
        u32::MAX
    } else {
        raw.trunc() as u32
    }
}

impl WinsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw numeric values, coercing each one
    pub fn from_raw<I, K>(rows: I, updated_at: Option<DateTime<Utc>>) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<TeamId>,
    {
        Self {
            wins: rows
                .into_iter()
                .map(|(id, raw)| (id.into(), coerce_wins(raw)))
                .collect(),
            updated_at,
        }
    }

    pub fn from_rows(rows: &[WinsRow], updated_at: DateTime<Utc>) -> Self {
        Self {
            wins: rows.iter().map(|r| (r.team_id.clone(), r.wins)).collect(),
            updated_at: Some(updated_at),
        }
    }

    pub fn get(&self, team_id: &str) -> Option<u32> {
        self.wins.get(team_id).copied()
    }

    pub fn wins_or_zero(&self, team_id: &str) -> u32 {
        self.get(team_id).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.wins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wins.is_empty()
    }

    /// A snapshot with no timestamp is always stale
    pub fn is_stale(&self, max_age: std::time::Duration, now: DateTime<Utc>) -> bool {
        match self.updated_at {
            None => true,
            Some(at) => match chrono::Duration::from_std(max_age) {
                Ok(max_age) => now - at > max_age,
                Err(_) => false,
            },
        }
    }
}
