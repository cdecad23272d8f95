pub mod config;
pub mod engine;
pub mod error;
pub mod json;
pub mod validation;

pub use config::*;
pub use engine::{actual_from_wins, compute_score, distance_points, PerTeamDetail, ScoreResult};
pub use error::ScoreError;
pub use json::{compute_score_json, wins_from_json};
pub use validation::{validate_picks, validate_scoring, PicksIssue};
