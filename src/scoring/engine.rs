use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::config::ScoringMode;
use super::error::ScoreError;
use crate::league::{Conference, Picks, Roster, TeamId};
use crate::wins::WinsTable;

/// Points for a predicted rank exactly matching the actual rank
pub const EXACT_MATCH_POINTS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerTeamDetail {
    pub team_id: TeamId,
    pub conference: Conference,
    pub predicted_rank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wins: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u64>,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub mode: ScoringMode,
    pub total: u64,
    pub east: u64,
    pub west: u64,
    /// Best attainable total; only meaningful in distance mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
    pub breakdown: Vec<PerTeamDetail>,
}

impl ScoreResult {
    pub fn conference(&self, conference: Conference) -> u64 {
        match conference {
            Conference::East => self.east,
            Conference::West => self.west,
        }
    }

    pub fn details(&self, conference: Conference) -> impl Iterator<Item = &PerTeamDetail> {
        self.breakdown
            .iter()
            .filter(move |d| d.conference == conference)
    }
}

struct ConferenceScore {
    points: u64,
    max: u64,
    details: Vec<PerTeamDetail>,
}

/// Score one entry's picks against a wins snapshot.
///
/// Pure: the same inputs always give the same result and nothing is
/// mutated. Unknown, duplicate and missing teams degrade to 0 points.
/// The only error is distance mode without actual standings.
pub fn compute_score(
    picks: &Picks,
    wins: &WinsTable,
    mode: ScoringMode,
    actual: Option<&Picks>,
) -> Result<ScoreResult, ScoreError> {
    let (east, west) = match mode {
        ScoringMode::Weighted => (
            score_weighted(Conference::East, &picks.east, wins),
            score_weighted(Conference::West, &picks.west, wins),
        ),
        ScoringMode::Distance => {
            let actual = actual.ok_or_else(|| {
                ScoreError::invalid_input("actual", "distance scoring requires actual standings")
            })?;
            (
                score_distance(Conference::East, &picks.east, &actual.east),
                score_distance(Conference::West, &picks.west, &actual.west),
            )
        }
    };

    let max = match mode {
        ScoringMode::Distance => Some(east.max + west.max),
        ScoringMode::Weighted => None,
    };

    let mut breakdown = east.details;
    breakdown.extend(west.details);

    Ok(ScoreResult {
        mode,
        total: east.points + west.points,
        east: east.points,
        west: west.points,
        max,
        breakdown,
    })
}

/// Points for a rank difference: 0 -> 5, 1 -> 3, 2 -> 1, anything else -> 0
pub fn distance_points(diff: usize) -> u64 {
    match diff {
        0 => EXACT_MATCH_POINTS,
        1 => 3,
        2 => 1,
        _ => 0,
    }
}

// Weight for position i (0-based) of an n-long list is n - i.
fn score_weighted(conference: Conference, list: &[TeamId], wins: &WinsTable) -> ConferenceScore {
    let n = list.len() as u64;
    let mut seen = HashSet::new();
    let mut points = 0;
    let mut details = Vec::new();

    for (i, team_id) in list.iter().enumerate() {
        if !seen.insert(team_id.as_str()) {
            continue;
        }
        let Some(team_wins) = wins.get(team_id) else {
            continue;
        };

        let weight = n - i as u64;
        let contribution = u64::from(team_wins) * weight;
        points += contribution;
        details.push(PerTeamDetail {
            team_id: team_id.clone(),
            conference,
            predicted_rank: i + 1,
            actual_rank: None,
            wins: Some(team_wins),
            weight: Some(weight),
            points: contribution,
        });
    }

    ConferenceScore {
        points,
        max: 0,
        details,
    }
}

/// 1-based rank of each id at its first occurrence
fn rank_map(list: &[TeamId]) -> HashMap<&str, usize> {
    let mut ranks = HashMap::with_capacity(list.len());
    for (i, team_id) in list.iter().enumerate() {
        ranks.entry(team_id.as_str()).or_insert(i + 1);
    }
    ranks
}

fn score_distance(conference: Conference, predicted: &[TeamId], actual: &[TeamId]) -> ConferenceScore {
    let actual_ranks = rank_map(actual);
    let mut seen = HashSet::new();
    let mut points = 0;
    let mut details = Vec::new();

    for (i, team_id) in predicted.iter().enumerate() {
        if !seen.insert(team_id.as_str()) {
            continue;
        }
        let Some(&actual_rank) = actual_ranks.get(team_id.as_str()) else {
            continue;
        };

        let predicted_rank = i + 1;
        let team_points = distance_points(predicted_rank.abs_diff(actual_rank));
        points += team_points;
        details.push(PerTeamDetail {
            team_id: team_id.clone(),
            conference,
            predicted_rank,
            actual_rank: Some(actual_rank),
            wins: None,
            weight: None,
            points: team_points,
        });
    }

    ConferenceScore {
        points,
        max: EXACT_MATCH_POINTS * actual_ranks.len() as u64,
        details,
    }
}

/// Derive the actual finishing order from a wins snapshot.
///
/// Each conference is sorted by wins descending, ties broken by team id.
/// Roster teams missing from the snapshot count as 0 wins.
pub fn actual_from_wins(roster: &Roster, wins: &WinsTable) -> Picks {
    let order = |conference: Conference| -> Vec<TeamId> {
        let mut teams: Vec<(&str, u32)> = roster
            .teams(conference)
            .iter()
            .map(|t| (t.id, wins.wins_or_zero(t.id)))
            .collect();
        teams.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        teams.into_iter().map(|(id, _)| id.to_string()).collect()
    };

    Picks::new(order(Conference::East), order(Conference::West))
}
