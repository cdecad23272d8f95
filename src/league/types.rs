use serde::{Deserialize, Serialize};
use std::fmt;

/// League abbreviation, e.g. "BOS".
pub type TeamId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conference {
    East,
    West,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::East, Conference::West];

    /// Human-readable heading, e.g. "Eastern Conference"
    pub fn label(&self) -> &'static str {
        match self {
            Conference::East => "Eastern Conference",
            Conference::West => "Western Conference",
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conference::East => write!(f, "east"),
            Conference::West => write!(f, "west"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub id: &'static str,
    pub name: &'static str,
}

/// One ranked list per conference. Index 0 is the predicted best record.
///
/// This is both the prediction half of an entry and the shape of an
/// actual finishing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Picks {
    #[serde(default)]
    pub east: Vec<TeamId>,
    #[serde(default)]
    pub west: Vec<TeamId>,
}

impl Picks {
    pub fn new(east: Vec<TeamId>, west: Vec<TeamId>) -> Self {
        Self { east, west }
    }

    pub fn conference(&self, conference: Conference) -> &[TeamId] {
        match conference {
            Conference::East => &self.east,
            Conference::West => &self.west,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conference_display() {
        assert_eq!(Conference::East.to_string(), "east");
        assert_eq!(Conference::West.to_string(), "west");
        assert_eq!(Conference::West.label(), "Western Conference");
    }

    #[test]
    fn test_picks_missing_conference_defaults_empty() {
        let picks: Picks = serde_json::from_str(r#"{"east": ["BOS"]}"#).unwrap();
        assert_eq!(picks.conference(Conference::East), ["BOS".to_string()]);
        assert!(picks.conference(Conference::West).is_empty());
    }
}
