//! ESPN standings wire types and their mapping to wins rows.
//!
//! The standings payload nests conferences as `children`, each with a
//! `standings.entries` list, but the nesting depth is not stable across
//! seasons so the walk below accepts entries at any level.

use serde::Deserialize;
use std::collections::HashSet;

use crate::league::espn_team_id;
use crate::wins::{coerce_wins, WinsRow};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsResponse {
    pub children: Option<Vec<StandingsBlock>>,
    pub standings: Option<StandingsGroup>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsBlock {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub standings: Option<StandingsGroup>,
    pub children: Option<Vec<StandingsBlock>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsGroup {
    pub entries: Option<Vec<StandingsEntry>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsEntry {
    pub team: Option<EspnTeam>,
    pub stats: Option<Vec<EspnStat>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTeam {
    pub id: Option<String>,
    pub abbreviation: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStat {
    pub name: Option<String>,
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub description: Option<String>,
    pub value: Option<f64>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

impl EspnStat {
    fn is_wins(&self) -> bool {
        self.name.as_deref() == Some("wins")
            || self.short_display_name.as_deref() == Some("W")
            || self.description.as_deref() == Some("Wins")
    }

    fn raw_value(&self) -> f64 {
        self.value
            .or_else(|| {
                self.display_value
                    .as_deref()
                    .and_then(|s| s.trim().parse::<f64>().ok())
            })
            .unwrap_or(0.0)
    }
}

impl StandingsEntry {
    /// Wins row for this entry, or None if the team is not one we track
    pub fn to_row(&self) -> Option<WinsRow> {
        let abbreviation = self.team.as_ref()?.abbreviation.as_deref()?;
        let team_id = espn_team_id(abbreviation)?;

        let raw = self
            .stats
            .iter()
            .flatten()
            .find(|s| s.is_wins())
            .map(EspnStat::raw_value)
            .unwrap_or(0.0);

        Some(WinsRow {
            team_id: team_id.to_string(),
            wins: coerce_wins(raw),
        })
    }
}

fn collect_entries<'a>(block: &'a StandingsBlock, out: &mut Vec<&'a StandingsEntry>) {
    if let Some(entries) = block.standings.as_ref().and_then(|s| s.entries.as_ref()) {
        out.extend(entries.iter());
    }
    for child in block.children.iter().flatten() {
        collect_entries(child, out);
    }
}

impl StandingsResponse {
    /// Every standings entry in the payload, in document order
    pub fn entries(&self) -> Vec<&StandingsEntry> {
        let mut out = Vec::new();
        if let Some(entries) = self.standings.as_ref().and_then(|s| s.entries.as_ref()) {
            out.extend(entries.iter());
        }
        for block in self.children.iter().flatten() {
            collect_entries(block, &mut out);
        }
        out
    }

    /// One row per tracked team. If a team appears twice the first wins.
    pub fn to_rows(&self) -> Vec<WinsRow> {
        let mut seen = HashSet::new();
        self.entries()
            .into_iter()
            .filter_map(StandingsEntry::to_row)
            .filter(|row| seen.insert(row.team_id.clone()))
            .collect()
    }
}

/// Parse a standings response body into wins rows
pub fn parse_standings(body: &str) -> Result<Vec<WinsRow>, serde_json::Error> {
    let response: StandingsResponse = serde_json::from_str(body)?;
    Ok(response.to_rows())
}
