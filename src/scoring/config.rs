use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::expand_home;

/// Which scoring scheme the pool uses.
///
/// The two schemes reward different things and are not interchangeable:
/// `weighted` pays out raw wins weighted by predicted position, `distance`
/// pays out for how close each predicted rank is to the actual finish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    #[default]
    Weighted,
    Distance,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Weighted => "weighted",
            ScoringMode::Distance => "distance",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(ScoringMode::Weighted),
            "distance" => Ok(ScoringMode::Distance),
            other => Err(format!(
                "unknown scoring mode '{}' (expected 'weighted' or 'distance')",
                other
            )),
        }
    }
}

/// Scoring configuration.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   mode: distance
///   actual_path: ~/.config/nba-pool/final-standings.json
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Scoring scheme (default: weighted)
    #[serde(default)]
    pub mode: Option<ScoringMode>,

    /// JSON file with the actual finishing order (`{"east": [...], "west": [...]}`).
    /// Only read in distance mode. When absent the order is derived from the
    /// current wins snapshot.
    #[serde(default)]
    pub actual_path: Option<PathBuf>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: Some(ScoringMode::Weighted),
            actual_path: None,
        }
    }
}

impl ScoringConfig {
    pub fn mode(&self) -> ScoringMode {
        self.mode.unwrap_or_default()
    }

    /// `actual_path` with a leading `~` expanded
    pub fn resolved_actual_path(&self) -> Option<PathBuf> {
        self.actual_path.as_deref().map(expand_home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.mode, Some(ScoringMode::Weighted));
        assert!(config.actual_path.is_none());
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig {
            mode: Some(ScoringMode::Distance),
            actual_path: Some(PathBuf::from("/tmp/actual.json")),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_distance_mode_parse() {
        let yaml = r#"
mode: distance
actual_path: "/srv/pool/final.json"
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.mode(), ScoringMode::Distance);
        assert_eq!(config.actual_path, Some(PathBuf::from("/srv/pool/final.json")));
        assert_eq!(
            config.resolved_actual_path(),
            Some(PathBuf::from("/srv/pool/final.json"))
        );
    }

    #[test]
    fn test_actual_path_expands_home() {
        let yaml = "mode: distance\nactual_path: ~/.config/nba-pool/final-standings.json\n";
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let home = dirs::home_dir().unwrap();
        assert_eq!(
            config.resolved_actual_path(),
            Some(home.join(".config/nba-pool/final-standings.json"))
        );
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.mode.is_none());
        assert_eq!(config.mode(), ScoringMode::Weighted);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "mode: weighted\nbonus: 10\n";
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Distance".parse::<ScoringMode>(), Ok(ScoringMode::Distance));
        assert_eq!(" weighted ".parse::<ScoringMode>(), Ok(ScoringMode::Weighted));
        assert!("points".parse::<ScoringMode>().is_err());
    }
}
