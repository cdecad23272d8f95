use std::str::FromStr;

use super::types::{Conference, Picks, Team};

const fn team(id: &'static str, name: &'static str) -> Team {
    Team { id, name }
}

pub const EAST_TEAMS: [Team; 15] = [
    team("ATL", "Atlanta Hawks"),
    team("BOS", "Boston Celtics"),
    team("BKN", "Brooklyn Nets"),
    team("CHA", "Charlotte Hornets"),
    team("CHI", "Chicago Bulls"),
    team("CLE", "Cleveland Cavaliers"),
    team("DET", "Detroit Pistons"),
    team("IND", "Indiana Pacers"),
    team("MIA", "Miami Heat"),
    team("MIL", "Milwaukee Bucks"),
    team("NYK", "New York Knicks"),
    team("ORL", "Orlando Magic"),
    team("PHI", "Philadelphia 76ers"),
    team("TOR", "Toronto Raptors"),
    team("WAS", "Washington Wizards"),
];

pub const WEST_TEAMS: [Team; 15] = [
    team("DAL", "Dallas Mavericks"),
    team("DEN", "Denver Nuggets"),
    team("GSW", "Golden State Warriors"),
    team("HOU", "Houston Rockets"),
    team("LAC", "Los Angeles Clippers"),
    team("LAL", "Los Angeles Lakers"),
    team("MEM", "Memphis Grizzlies"),
    team("MIN", "Minnesota Timberwolves"),
    team("NOP", "New Orleans Pelicans"),
    team("OKC", "Oklahoma City Thunder"),
    team("PHX", "Phoenix Suns"),
    team("POR", "Portland Trail Blazers"),
    team("SAC", "Sacramento Kings"),
    team("SAS", "San Antonio Spurs"),
    team("UTA", "Utah Jazz"),
];

/// 2024-25 regular season finish, best record first
pub const LAST_SEASON_EAST: [&str; 15] = [
    "CLE", "BOS", "NYK", "IND", "MIL", "DET", "ORL", "ATL", "CHI", "MIA", "TOR", "BKN", "PHI",
    "CHA", "WAS",
];

pub const LAST_SEASON_WEST: [&str; 15] = [
    "OKC", "HOU", "LAL", "DEN", "LAC", "MIN", "GSW", "MEM", "SAC", "DAL", "PHX", "POR", "SAS",
    "NOP", "UTA",
];

/// ESPN abbreviations that differ from ours
const ESPN_ALIASES: [(&str, &str); 7] = [
    ("GS", "GSW"),
    ("NY", "NYK"),
    ("NO", "NOP"),
    ("SA", "SAS"),
    ("UTAH", "UTA"),
    ("WSH", "WAS"),
    ("BRK", "BKN"),
];

/// Map an ESPN team abbreviation to a roster id.
///
/// Known ids map to themselves; a handful of ESPN short forms are
/// translated. Anything else is not an NBA team we track.
pub fn espn_team_id(abbreviation: &str) -> Option<&'static str> {
    let abbreviation = abbreviation.trim();
    EAST_TEAMS
        .iter()
        .chain(WEST_TEAMS.iter())
        .find(|t| t.id.eq_ignore_ascii_case(abbreviation))
        .map(|t| t.id)
        .or_else(|| {
            ESPN_ALIASES
                .iter()
                .find(|(espn, _)| espn.eq_ignore_ascii_case(abbreviation))
                .map(|(_, id)| *id)
        })
}

/// The set of teams in each conference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    east: Vec<Team>,
    west: Vec<Team>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::nba()
    }
}

impl Roster {
    pub fn new(east: Vec<Team>, west: Vec<Team>) -> Self {
        Self { east, west }
    }

    /// The fixed 30-team league
    pub fn nba() -> Self {
        Self::new(EAST_TEAMS.to_vec(), WEST_TEAMS.to_vec())
    }

    pub fn teams(&self, conference: Conference) -> &[Team] {
        match conference {
            Conference::East => &self.east,
            Conference::West => &self.west,
        }
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.east.iter().chain(self.west.iter()).find(|t| t.id == id)
    }

    pub fn conference_of(&self, id: &str) -> Option<Conference> {
        Conference::ALL
            .into_iter()
            .find(|c| self.teams(*c).iter().any(|t| t.id == id))
    }

    /// Display name for a team id, falling back to the id itself
    pub fn team_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.team(id).map(|t| t.name).unwrap_or(id)
    }
}

/// Starting orders a player can submit without typing every id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Alphabetical,
    LastSeason,
}

impl Preset {
    pub fn picks(&self) -> Picks {
        match self {
            Preset::Alphabetical => Picks::new(
                EAST_TEAMS.iter().map(|t| t.id.to_string()).collect(),
                WEST_TEAMS.iter().map(|t| t.id.to_string()).collect(),
            ),
            Preset::LastSeason => Picks::new(
                LAST_SEASON_EAST.iter().map(|id| id.to_string()).collect(),
                LAST_SEASON_WEST.iter().map(|id| id.to_string()).collect(),
            ),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alphabetical" | "a-z" => Ok(Preset::Alphabetical),
            "last-season" | "last_season" => Ok(Preset::LastSeason),
            other => Err(format!(
                "unknown preset '{}' (expected 'alphabetical' or 'last-season')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_roster_has_thirty_unique_teams() {
        let roster = Roster::nba();
        let ids: HashSet<&str> = Conference::ALL
            .iter()
            .flat_map(|c| roster.teams(*c).iter().map(|t| t.id))
            .collect();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn test_conference_of() {
        let roster = Roster::nba();
        assert_eq!(roster.conference_of("BOS"), Some(Conference::East));
        assert_eq!(roster.conference_of("OKC"), Some(Conference::West));
        assert_eq!(roster.conference_of("XXX"), None);
    }

    #[test]
    fn test_team_name_falls_back_to_id() {
        let roster = Roster::nba();
        assert_eq!(roster.team_name("NOP"), "New Orleans Pelicans");
        assert_eq!(roster.team_name("SEA"), "SEA");
    }

    #[test]
    fn test_last_season_presets_are_permutations_of_roster() {
        let picks = Preset::LastSeason.picks();
        let roster = Roster::nba();
        for conference in Conference::ALL {
            let listed: HashSet<&str> = picks
                .conference(conference)
                .iter()
                .map(|s| s.as_str())
                .collect();
            let expected: HashSet<&str> = roster.teams(conference).iter().map(|t| t.id).collect();
            assert_eq!(listed, expected, "{} preset mismatch", conference);
        }
    }

    #[test]
    fn test_espn_team_id() {
        assert_eq!(espn_team_id("BOS"), Some("BOS"));
        assert_eq!(espn_team_id("gs"), Some("GSW"));
        assert_eq!(espn_team_id("UTAH"), Some("UTA"));
        assert_eq!(espn_team_id("NO"), Some("NOP"));
        assert_eq!(espn_team_id("DUKE"), None);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("last-season".parse::<Preset>(), Ok(Preset::LastSeason));
        assert_eq!("A-Z".parse::<Preset>(), Ok(Preset::Alphabetical));
        assert!("random".parse::<Preset>().is_err());
    }
}
