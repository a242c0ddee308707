use anyhow::{Context, Result};
use chrono::Weekday;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{StatsError, StatsResult};
use crate::models::date::parse_weekday;
use crate::utils::format::Language;

fn default_current_year() -> i32 {
    2025
}
fn default_prior_year() -> i32 {
    2024
}
fn default_anchor_weekday() -> String {
    "wednesday".to_string()
}
fn default_min_games_for_stats() -> u32 {
    3
}
fn default_min_overlap() -> u32 {
    2
}
fn default_top_n() -> usize {
    5
}
fn default_min_their_games() -> u32 {
    3
}
fn default_games_margin() -> i64 {
    3
}
fn default_rank_margin() -> i64 {
    2
}
fn default_streak_margin() -> i64 {
    1
}
fn default_buddy_games_margin() -> i64 {
    2
}
fn default_community_games_margin() -> i64 {
    3
}
fn default_avg_players_margin() -> i64 {
    1
}
fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonConfig {
    #[serde(default = "default_current_year")]
    pub current_year: i32,
    #[serde(default = "default_prior_year")]
    pub prior_year: i32,
    /// Weekday the recurring game is scheduled on ("wednesday", "wed", ...)
    #[serde(default = "default_anchor_weekday")]
    pub anchor_weekday: String,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            current_year: default_current_year(),
            prior_year: default_prior_year(),
            anchor_weekday: default_anchor_weekday(),
        }
    }
}

impl SeasonConfig {
    pub fn resolve(&self) -> StatsResult<Season> {
        let anchor = parse_weekday(&self.anchor_weekday).ok_or_else(|| {
            StatsError::InvalidConfig(format!("unknown weekday '{}'", self.anchor_weekday))
        })?;
        Ok(Season {
            current: self.current_year,
            prior: self.prior_year,
            anchor,
        })
    }
}

/// Seasons and anchor day, validated and ready for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season {
    pub current: i32,
    pub prior: i32,
    pub anchor: Weekday,
}

impl Season {
    pub fn new(current: i32, prior: i32, anchor: Weekday) -> Self {
        Self {
            current,
            prior,
            anchor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuddyConfig {
    /// Games the subject needs before buddies are computed at all
    #[serde(default = "default_min_games_for_stats")]
    pub min_games_for_stats: u32,
    #[serde(default = "default_min_overlap")]
    pub min_overlap: u32,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Gate on the other player for "players you influence most"
    #[serde(default = "default_min_their_games")]
    pub min_their_games: u32,
}

impl Default for BuddyConfig {
    fn default() -> Self {
        Self {
            min_games_for_stats: default_min_games_for_stats(),
            min_overlap: default_min_overlap(),
            top_n: default_top_n(),
            min_their_games: default_min_their_games(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "default_games_margin")]
    pub games_margin: i64,
    #[serde(default = "default_rank_margin")]
    pub rank_margin: i64,
    #[serde(default = "default_streak_margin")]
    pub streak_margin: i64,
    #[serde(default = "default_buddy_games_margin")]
    pub buddy_games_margin: i64,
    #[serde(default = "default_community_games_margin")]
    pub community_games_margin: i64,
    #[serde(default = "default_avg_players_margin")]
    pub avg_players_margin: i64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            games_margin: default_games_margin(),
            rank_margin: default_rank_margin(),
            streak_margin: default_streak_margin(),
            buddy_games_margin: default_buddy_games_margin(),
            community_games_margin: default_community_games_margin(),
            avg_players_margin: default_avg_players_margin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl DisplayConfig {
    pub fn language(&self) -> StatsResult<Language> {
        self.language.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub season: SeasonConfig,
    #[serde(default)]
    pub buddies: BuddyConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "kickabout")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }
}
