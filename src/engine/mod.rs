pub mod affinity;
pub mod community;
pub mod highlights;
pub mod loader;
pub mod ranking;
pub mod streak;

use crate::config::Season;
use crate::models::{CommunityStats, PlayerRecord, ProcessedPlayer, Schedule};

pub use affinity::{football_buddies, players_you_influence};
pub use community::community_stats;
pub use loader::{parse_roster, parse_schedule, RosterSnapshot};
pub use ranking::{find_player, leaderboard, process_roster, season_summary};

/// Everything derived from one roster + schedule snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub players: Vec<ProcessedPlayer>,
    pub community: CommunityStats,
}

impl Report {
    pub fn build(records: &[PlayerRecord], schedule: &Schedule, season: &Season) -> Self {
        Self {
            players: process_roster(records, season),
            community: community_stats(schedule, season),
        }
    }

    pub fn from_snapshot(roster: RosterSnapshot, schedule: &Schedule, season: &Season) -> Self {
        Self {
            players: roster.into_processed(season),
            community: community_stats(schedule, season),
        }
    }
}
