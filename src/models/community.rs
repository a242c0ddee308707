use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scheduled league game, whether it went ahead or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityGameRecord {
    pub date: String,
    pub month: String,
    pub played: bool,
    #[serde(default)]
    pub players: Option<u32>,
    #[serde(default)]
    pub field: Option<String>,
}

impl CommunityGameRecord {
    pub fn played(date: &str, month: &str, players: u32, field: Option<&str>) -> Self {
        Self {
            date: date.to_string(),
            month: month.to_string(),
            played: true,
            players: Some(players),
            field: field.map(str::to_string),
        }
    }

    pub fn cancelled(date: &str, month: &str) -> Self {
        Self {
            date: date.to_string(),
            month: month.to_string(),
            played: false,
            players: None,
            field: None,
        }
    }
}

/// Community schedule keyed by season year.
pub type Schedule = BTreeMap<i32, Vec<CommunityGameRecord>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub games_played: u32,
    pub games_cancelled: u32,
    pub total_attempted: u32,
    pub avg_players: f64,
    pub success_rate: u32,
    pub games_per_month: BTreeMap<String, u32>,
    pub fields: BTreeMap<String, u32>,
    pub busiest_month: Option<String>,
    pub top_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOverYear {
    pub games_change: i64,
    pub avg_players_change: f64,
    pub success_rate_change: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStats {
    pub current_year: i32,
    pub prior_year: i32,
    pub seasons: BTreeMap<i32, SeasonSummary>,
    pub changes: YearOverYear,
    pub total_games_all_time: u32,
}

impl CommunityStats {
    pub fn season(&self, year: i32) -> SeasonSummary {
        self.seasons.get(&year).cloned().unwrap_or_default()
    }

    pub fn current(&self) -> SeasonSummary {
        self.season(self.current_year)
    }

    pub fn prior(&self) -> SeasonSummary {
        self.season(self.prior_year)
    }
}
