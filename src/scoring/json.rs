use chrono::{DateTime, Utc};
use serde_json::Value;

use super::config::ScoringMode;
use super::engine::{compute_score, ScoreResult};
use super::error::ScoreError;
use crate::league::{Picks, TeamId};
use crate::wins::WinsTable;

/// Score untyped JSON input.
///
/// `entry` and `actual` are objects with `east` and `west` arrays of team
/// ids. `wins` is either a flat `{ "BOS": 60, ... }` map or the snapshot
/// shape `{ "wins": { ... }, "updatedAt": "..." }`. Wrong shapes are
/// reported as [`ScoreError::InvalidInput`]; everything else degrades
/// exactly like [`compute_score`].
pub fn compute_score_json(
    entry: &Value,
    wins: &Value,
    mode: &str,
    actual: Option<&Value>,
) -> Result<ScoreResult, ScoreError> {
    let mode: ScoringMode = mode
        .parse()
        .map_err(|reason: String| ScoreError::invalid_input("mode", reason))?;
    let picks = parse_picks(entry, "entry")?;
    let wins = wins_from_json(wins)?;
    let actual = match actual {
        Some(value) if !value.is_null() => Some(parse_picks(value, "actual")?),
        _ => None,
    };

    compute_score(&picks, &wins, mode, actual.as_ref())
}

fn parse_picks(value: &Value, field: &str) -> Result<Picks, ScoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| ScoreError::invalid_input(field, "expected an object with 'east' and 'west'"))?;

    let list = |conference: &str| -> Result<Vec<TeamId>, ScoreError> {
        let path = format!("{}.{}", field, conference);
        let items = object
            .get(conference)
            .and_then(Value::as_array)
            .ok_or_else(|| ScoreError::invalid_input(&path, "expected an array of team ids"))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ScoreError::invalid_input(format!("{}[{}]", path, i), "expected a team id string")
                })
            })
            .collect()
    };

    Ok(Picks::new(list("east")?, list("west")?))
}

/// Parse a flat wins map or a `{ "wins": {...}, "updatedAt": ... }` snapshot
pub fn wins_from_json(value: &Value) -> Result<WinsTable, ScoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| ScoreError::invalid_input("wins", "expected an object of team id to wins"))?;

    // Snapshot shape: { wins: {...}, updatedAt }
    let (map, updated_at) = match object.get("wins") {
        Some(Value::Object(inner)) => {
            let updated_at = match object.get("updatedAt").or_else(|| object.get("updated_at")) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(
                    DateTime::parse_from_rfc3339(s)
                        .map_err(|e| ScoreError::invalid_input("wins.updatedAt", e.to_string()))?
                        .with_timezone(&Utc),
                ),
                Some(_) => {
                    return Err(ScoreError::invalid_input(
                        "wins.updatedAt",
                        "expected an RFC 3339 timestamp",
                    ))
                }
            };
            (inner, updated_at)
        }
        _ => (object, None),
    };

    let rows = map
        .iter()
        .map(|(team_id, raw)| {
            raw.as_f64()
                .map(|n| (team_id.clone(), n))
                .ok_or_else(|| ScoreError::invalid_input(format!("wins.{}", team_id), "expected a number"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WinsTable::from_raw(rows, updated_at))
}
