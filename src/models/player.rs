use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Month;

/// Raw attendance as it comes from the repository: one list of "DD/MM"
/// strings per tracked season. Strings are kept verbatim so malformed entries
/// still count toward totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    #[serde(default)]
    pub dates_by_year: BTreeMap<i32, Vec<String>>,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dates_by_year: BTreeMap::new(),
        }
    }

    pub fn with_dates(mut self, year: i32, dates: &[&str]) -> Self {
        self.dates_by_year
            .insert(year, dates.iter().map(|d| d.to_string()).collect());
        self
    }

    pub fn dates(&self, year: i32) -> &[String] {
        self.dates_by_year
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Games per month for one season. Always holds all twelve months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyBreakdown(BTreeMap<Month, u32>);

impl MonthlyBreakdown {
    pub fn new() -> Self {
        Self(Month::all().into_iter().map(|m| (m, 0)).collect())
    }

    pub fn increment(&mut self, month: Month) {
        *self.0.entry(month).or_insert(0) += 1;
    }

    pub fn get(&self, month: Month) -> u32 {
        self.0.get(&month).copied().unwrap_or(0)
    }

    /// Calendar order, all twelve months.
    pub fn iter(&self) -> impl Iterator<Item = (Month, u32)> + '_ {
        Month::all().into_iter().map(|m| (m, self.get(m)))
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

impl Default for MonthlyBreakdown {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    pub count: u32,
    pub dates: Vec<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPlayer {
    pub name: String,
    pub dates_by_year: BTreeMap<i32, Vec<String>>,
    pub total: BTreeMap<i32, u32>,
    pub total_all_time: u32,
    /// `0` means the player did not take part that season. It is not a
    /// position; compare with `is_ranked` first.
    pub rank: BTreeMap<i32, u32>,
    pub monthly_breakdown: BTreeMap<i32, MonthlyBreakdown>,
    pub longest_streak: u32,
    pub streak_dates: Vec<String>,
    pub streak_start: Option<String>,
    pub streak_end: Option<String>,
}

impl ProcessedPlayer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dates(&self, year: i32) -> &[String] {
        self.dates_by_year
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_for(&self, year: i32) -> u32 {
        self.total.get(&year).copied().unwrap_or(0)
    }

    pub fn rank_for(&self, year: i32) -> u32 {
        self.rank.get(&year).copied().unwrap_or(0)
    }

    pub fn is_ranked(&self, year: i32) -> bool {
        self.rank_for(year) != 0
    }

    pub fn breakdown_for(&self, year: i32) -> MonthlyBreakdown {
        self.monthly_breakdown.get(&year).cloned().unwrap_or_default()
    }

    pub fn streak(&self) -> Streak {
        Streak {
            count: self.longest_streak,
            dates: self.streak_dates.clone(),
            start: self.streak_start.clone(),
            end: self.streak_end.clone(),
        }
    }
}

/// Anything that carries per-season attendance.
pub trait Attendance {
    fn name(&self) -> &str;
    fn dates(&self, year: i32) -> &[String];

    fn games(&self, year: i32) -> u32 {
        self.dates(year).len() as u32
    }
}

impl Attendance for PlayerRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn dates(&self, year: i32) -> &[String] {
        PlayerRecord::dates(self, year)
    }
}

impl Attendance for ProcessedPlayer {
    fn name(&self) -> &str {
        ProcessedPlayer::name(self)
    }

    fn dates(&self, year: i32) -> &[String] {
        ProcessedPlayer::dates(self, year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSeasonSummary {
    pub name: String,
    pub year: i32,
    pub games: u32,
    pub prior_games: u32,
    pub games_change: i64,
    pub rank: u32,
    pub prior_rank: u32,
    /// Positive means the player climbed. `None` unless both seasons are ranked.
    pub rank_change: Option<i64>,
    pub best_months: Vec<Month>,
    pub worst_months: Vec<Month>,
    pub share_of_community_games: u32,
}
