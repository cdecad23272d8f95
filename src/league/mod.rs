pub mod roster;
pub mod types;

pub use roster::{espn_team_id, Preset, Roster, EAST_TEAMS, LAST_SEASON_EAST, LAST_SEASON_WEST, WEST_TEAMS};
pub use types::{Conference, Picks, Team, TeamId};
