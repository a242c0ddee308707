//! League-wide season summaries from the scheduled-game records.

use std::collections::BTreeMap;

use crate::config::Season;
use crate::models::{CommunityGameRecord, CommunityStats, Schedule, SeasonSummary, YearOverYear};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Highest count, first seen in record order on ties.
fn most_common<'a, I>(labels: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<(&str, u32)> = Vec::new();
    for label in labels {
        match seen.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => seen.push((label, 1)),
        }
    }
    let mut best: Option<(&str, u32)> = None;
    for (label, count) in seen {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.to_string())
}

fn field_of(record: &CommunityGameRecord) -> Option<&str> {
    record.field.as_deref().map(str::trim).filter(|f| !f.is_empty())
}

pub fn summarize_season(records: &[CommunityGameRecord]) -> SeasonSummary {
    let played: Vec<&CommunityGameRecord> = records.iter().filter(|r| r.played).collect();
    let games_played = played.len() as u32;
    let total_attempted = records.len() as u32;

    let mut games_per_month: BTreeMap<String, u32> = BTreeMap::new();
    let mut fields: BTreeMap<String, u32> = BTreeMap::new();
    for record in &played {
        *games_per_month.entry(record.month.clone()).or_insert(0) += 1;
        if let Some(field) = field_of(record) {
            *fields.entry(field.to_string()).or_insert(0) += 1;
        }
    }

    let avg_players = if played.is_empty() {
        0.0
    } else {
        let sum: u32 = played.iter().map(|r| r.players.unwrap_or(0)).sum();
        round1(sum as f64 / games_played as f64)
    };

    let success_rate = if total_attempted == 0 {
        0
    } else {
        (100.0 * games_played as f64 / total_attempted as f64).round() as u32
    };

    SeasonSummary {
        games_played,
        games_cancelled: total_attempted - games_played,
        total_attempted,
        avg_players,
        success_rate,
        games_per_month,
        fields,
        busiest_month: most_common(played.iter().map(|r| r.month.as_str())),
        top_field: most_common(played.iter().filter_map(|r| field_of(r))),
    }
}

pub fn community_stats(schedule: &Schedule, season: &Season) -> CommunityStats {
    if schedule.values().all(Vec::is_empty) {
        log::info!("Community schedule is empty");
    }

    let mut seasons: BTreeMap<i32, SeasonSummary> = schedule
        .iter()
        .map(|(&year, records)| (year, summarize_season(records)))
        .collect();
    seasons.entry(season.current).or_default();
    seasons.entry(season.prior).or_default();

    let current = &seasons[&season.current];
    let prior = &seasons[&season.prior];
    let changes = YearOverYear {
        games_change: current.games_played as i64 - prior.games_played as i64,
        avg_players_change: round1(current.avg_players - prior.avg_players),
        success_rate_change: current.success_rate as i64 - prior.success_rate as i64,
    };

    let total_games_all_time = seasons.values().map(|s| s.games_played).sum();

    CommunityStats {
        current_year: season.current,
        prior_year: season.prior,
        seasons,
        changes,
        total_games_all_time,
    }
}
