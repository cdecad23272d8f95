use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::entries::Entry;
use crate::league::{Picks, Roster};
use crate::scoring::{
    actual_from_wins, compute_score, compute_score_json, wins_from_json, ScoreError, ScoreResult,
    ScoringConfig, ScoringMode,
};
use serde_json::Value;
use crate::wins::WinsTable;

/// An entry with its score and 1-based place in the pool
#[derive(Debug, Clone)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub entry: &'a Entry,
    pub result: ScoreResult,
}

/// Score every entry and rank the pool.
///
/// Highest total first; ties go to the alphabetically earlier display
/// name (case-insensitive), then the earlier submission. Ranks are
/// consecutive even for tied totals.
pub fn score_and_sort<'a>(
    entries: &[&'a Entry],
    wins: &WinsTable,
    mode: ScoringMode,
    actual: Option<&Picks>,
) -> Result<Vec<RankedEntry<'a>>, ScoreError> {
    let mut scored = entries
        .iter()
        .map(|entry| -> Result<(&'a Entry, ScoreResult), ScoreError> {
            let result = compute_score(&entry.picks, wins, mode, actual)?;
            let listed = entry.picks.east.len() + entry.picks.west.len();
            if result.breakdown.len() < listed {
                debug!(
                    "{}: {} of {} picks did not score",
                    entry.display_name,
                    listed - result.breakdown.len(),
                    listed
                );
            }
            Ok((*entry, result))
        })
        .collect::<Result<Vec<_>, _>>()?;

    scored.sort_by(|a, b| compare_standing(a.0, &a.1, b.0, &b.1));

    Ok(scored
        .into_iter()
        .enumerate()
        .map(|(i, (entry, result))| RankedEntry {
            rank: i + 1,
            entry,
            result,
        })
        .collect())
}

fn compare_standing(a: &Entry, a_score: &ScoreResult, b: &Entry, b_score: &ScoreResult) -> Ordering {
    b_score
        .total
        .cmp(&a_score.total)
        .then_with(|| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        })
        .then_with(|| a.submitted_at.cmp(&b.submitted_at))
}

/// Actual standings to score against, or None in weighted mode.
///
/// Distance mode reads `scoring.actual_path` when configured and otherwise
/// ranks the roster by the current wins snapshot.
pub fn resolve_actual(
    scoring: &ScoringConfig,
    roster: &Roster,
    wins: &WinsTable,
) -> Result<Option<Picks>> {
    if scoring.mode() != ScoringMode::Distance {
        return Ok(None);
    }

    match scoring.resolved_actual_path() {
        Some(path) => load_actual(&path).map(Some),
        None => {
            debug!("No actual standings file configured, deriving order from wins");
            Ok(Some(actual_from_wins(roster, wins)))
        }
    }
}

/// Score one untyped JSON entry outside the pool.
///
/// Without an explicit `actual`, distance mode ranks the roster by the same
/// `wins` the entry is scored against.
pub fn score_entry_json(
    entry: &Value,
    wins: &Value,
    scoring: &ScoringConfig,
    roster: &Roster,
    actual: Option<&Value>,
) -> Result<ScoreResult> {
    let derived = match actual {
        Some(_) => None,
        None => {
            let table = wins_from_json(wins)?;
            resolve_actual(scoring, roster, &table)?
                .map(serde_json::to_value)
                .transpose()?
        }
    };

    let result = compute_score_json(
        entry,
        wins,
        scoring.mode().as_str(),
        actual.or(derived.as_ref()),
    )?;
    Ok(result)
}

/// Load a `{"east": [...], "west": [...]}` finishing order
pub fn load_actual(path: &Path) -> Result<Picks> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open actual standings at {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse actual standings in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Preset;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use std::env;
    use std::path::PathBuf;

    fn entry(name: &str, east: &[&str]) -> Entry {
        Entry::new(name, Picks::new(east.iter().map(|s| s.to_string()).collect(), Vec::new()))
    }

    fn wins() -> WinsTable {
        WinsTable::from_raw([("BOS", 60.0), ("NYK", 50.0), ("MIA", 10.0)], None)
    }

    #[test]
    fn test_sorted_by_points_descending() {
        let good = entry("Good", &["BOS", "NYK", "MIA"]);
        let bad = entry("Bad", &["MIA", "NYK", "BOS"]);
        let entries = vec![&bad, &good];

        let ranked = score_and_sort(&entries, &wins(), ScoringMode::Weighted, None).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].entry.display_name, "Good");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].result.total, 290);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].result.total, 10 * 3 + 50 * 2 + 60);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let zed = entry("zed", &["BOS"]);
        let amy = entry("Amy", &["BOS"]);
        let entries = vec![&zed, &amy];

        let ranked = score_and_sort(&entries, &wins(), ScoringMode::Weighted, None).unwrap();

        assert_eq!(ranked[0].entry.display_name, "Amy");
        assert_eq!(ranked[1].entry.display_name, "zed");
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn test_ties_with_same_name_broken_by_submission() {
        let mut later = entry("Sam", &["BOS"]);
        let mut earlier = entry("Sam", &["BOS"]);
        earlier.submitted_at = Utc::now() - Duration::days(1);
        later.submitted_at = Utc::now();
        let entries = vec![&later, &earlier];

        let ranked = score_and_sort(&entries, &wins(), ScoringMode::Weighted, None).unwrap();
        assert_eq!(ranked[0].entry.id, earlier.id);
    }

    #[test]
    fn test_empty_pool() {
        let ranked = score_and_sort(&[], &wins(), ScoringMode::Weighted, None).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_distance_without_actual_errors() {
        let e = entry("Sam", &["BOS"]);
        let result = score_and_sort(&[&e], &wins(), ScoringMode::Distance, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_actual_weighted_is_none() {
        let config = ScoringConfig::default();
        let actual = resolve_actual(&config, &Roster::nba(), &wins()).unwrap();
        assert!(actual.is_none());
    }

    #[test]
    fn test_resolve_actual_derives_from_wins() {
        let config = ScoringConfig {
            mode: Some(ScoringMode::Distance),
            actual_path: None,
        };
        let actual = resolve_actual(&config, &Roster::nba(), &wins()).unwrap().unwrap();
        assert_eq!(&actual.east[..3], ["BOS", "NYK", "MIA"]);
    }

    #[test]
    fn test_score_entry_json_distance_ranks_by_given_wins() {
        let config = ScoringConfig {
            mode: Some(ScoringMode::Distance),
            actual_path: None,
        };
        let entry = json!({ "east": ["BOS", "NYK"], "west": [] });
        let wins = json!({ "BOS": 60, "NYK": 10 });

        let result = score_entry_json(&entry, &wins, &config, &Roster::nba(), None).unwrap();

        assert_eq!(result.total, 10);
        let bos = result.breakdown.iter().find(|d| d.team_id == "BOS").unwrap();
        assert_eq!(bos.actual_rank, Some(1));
        let nyk = result.breakdown.iter().find(|d| d.team_id == "NYK").unwrap();
        assert_eq!(nyk.actual_rank, Some(2));
    }

    #[test]
    fn test_score_entry_json_explicit_actual_wins_over_derived() {
        let config = ScoringConfig {
            mode: Some(ScoringMode::Distance),
            actual_path: None,
        };
        let entry = json!({ "east": ["BOS", "NYK"], "west": [] });
        let wins = json!({ "BOS": 60, "NYK": 10 });
        let actual = json!({ "east": ["NYK", "BOS"], "west": [] });

        let result =
            score_entry_json(&entry, &wins, &config, &Roster::nba(), Some(&actual)).unwrap();
        assert_eq!(result.total, 6);
    }

    #[test]
    fn test_score_entry_json_weighted() {
        let entry = json!({ "east": ["BOS", "NYK", "MIA"], "west": [] });
        let wins = json!({ "wins": { "BOS": 60, "NYK": 50, "MIA": 10 }, "updatedAt": null });

        let result =
            score_entry_json(&entry, &wins, &ScoringConfig::default(), &Roster::nba(), None)
                .unwrap();
        assert_eq!(result.total, 290);
    }

    #[test]
    fn test_score_entry_json_bad_wins_reports_field() {
        let config = ScoringConfig {
            mode: Some(ScoringMode::Distance),
            actual_path: None,
        };
        let entry = json!({ "east": ["BOS"], "west": [] });
        let wins = json!({ "BOS": "sixty" });

        let err = score_entry_json(&entry, &wins, &config, &Roster::nba(), None).unwrap_err();
        assert!(err.to_string().contains("wins.BOS"));
    }

    #[test]
    fn test_resolve_actual_reads_file() {
        let temp_path = env::temp_dir().join("nba_pool_test_actual.json");
        let expected = Preset::LastSeason.picks();
        std::fs::write(&temp_path, serde_json::to_string(&expected).unwrap()).unwrap();

        let config = ScoringConfig {
            mode: Some(ScoringMode::Distance),
            actual_path: Some(PathBuf::from(&temp_path)),
        };
        let actual = resolve_actual(&config, &Roster::nba(), &WinsTable::new()).unwrap();
        assert_eq!(actual, Some(expected));

        let _ = std::fs::remove_file(&temp_path);
    }
}
