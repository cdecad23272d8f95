use std::collections::HashSet;
use std::fmt;

use super::config::{ScoringConfig, ScoringMode};
use crate::league::{Conference, Picks, Roster, TeamId};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(path) = config.resolved_actual_path() {
        if path.as_os_str().is_empty() {
            errors.push("scoring.actual_path: must not be empty".to_string());
        } else if config.mode() == ScoringMode::Distance && !path.exists() {
            errors.push(format!(
                "scoring.actual_path: file not found at {}",
                path.display()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Something off about a submitted list. None of these stop scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PicksIssue {
    /// Not a team in this conference
    UnknownTeam { conference: Conference, team_id: TeamId },
    DuplicateTeam { conference: Conference, team_id: TeamId },
    /// Fewer teams than the conference has
    IncompleteList {
        conference: Conference,
        expected: usize,
        found: usize,
    },
    TooManyTeams {
        conference: Conference,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for PicksIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PicksIssue::UnknownTeam {
                conference,
                team_id,
            } => write!(f, "{}: '{}' is not a {} team", conference, team_id, conference),
            PicksIssue::DuplicateTeam {
                conference,
                team_id,
            } => write!(f, "{}: '{}' is listed more than once", conference, team_id),
            PicksIssue::IncompleteList {
                conference,
                expected,
                found,
            } => write!(
                f,
                "{}: only {} of {} teams ranked (missing teams score 0)",
                conference, found, expected
            ),
            PicksIssue::TooManyTeams {
                conference,
                expected,
                found,
            } => write!(f, "{}: {} teams ranked, expected {}", conference, found, expected),
        }
    }
}

/// Check picks against the roster.
///
/// The scorer tolerates all of these; this exists so a submission can be
/// flagged before it is saved.
pub fn validate_picks(picks: &Picks, roster: &Roster) -> Vec<PicksIssue> {
    let mut issues = Vec::new();

    for conference in Conference::ALL {
        let list = picks.conference(conference);
        let expected = roster.teams(conference).len();
        let mut seen = HashSet::new();

        for team_id in list {
            if roster.conference_of(team_id) != Some(conference) {
                issues.push(PicksIssue::UnknownTeam {
                    conference,
                    team_id: team_id.clone(),
                });
            } else if !seen.insert(team_id.as_str()) {
                issues.push(PicksIssue::DuplicateTeam {
                    conference,
                    team_id: team_id.clone(),
                });
            }
        }

        if seen.len() < expected {
            issues.push(PicksIssue::IncompleteList {
                conference,
                expected,
                found: seen.len(),
            });
        } else if list.len() > expected {
            issues.push(PicksIssue::TooManyTeams {
                conference,
                expected,
                found: list.len(),
            });
        }
    }

    issues
}
