//! Totals, competition ranks and monthly buckets.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::Season;
use crate::engine::highlights::{best_months, worst_months};
use crate::engine::streak::{longest_streak, roster_anchors};
use crate::error::{StatsError, StatsResult};
use crate::models::date::month_segment;
use crate::models::{
    CommunityStats, MonthlyBreakdown, PlayerRecord, PlayerSeasonSummary, ProcessedPlayer,
};

/// Bucket dates by month segment. Dates with an unreadable month are left out
/// here but still count toward the season total.
pub fn monthly_breakdown(dates: &[String]) -> MonthlyBreakdown {
    let mut breakdown = MonthlyBreakdown::new();
    for raw in dates {
        match month_segment(raw) {
            Some(month) => breakdown.increment(month),
            None => log::debug!("Skipping '{}' for monthly buckets", raw),
        }
    }
    breakdown
}

/// Competition ranks ("1, 1, 3") for each total, by index.
///
/// Only positive totals are ranked; a zero total gets the `0` sentinel.
pub fn competition_ranks(totals: &[u32]) -> Vec<u32> {
    let mut ranks = vec![0u32; totals.len()];

    let mut order: Vec<usize> = (0..totals.len()).filter(|&i| totals[i] > 0).collect();
    order.sort_by(|&a, &b| totals[b].cmp(&totals[a]));

    for (pos, &idx) in order.iter().enumerate() {
        ranks[idx] = if pos > 0 && totals[order[pos - 1]] == totals[idx] {
            ranks[order[pos - 1]]
        } else {
            pos as u32 + 1
        };
    }
    ranks
}

/// Full pipeline over a raw roster. Output keeps input order.
pub fn process_roster(records: &[PlayerRecord], season: &Season) -> Vec<ProcessedPlayer> {
    let mut years: BTreeSet<i32> = records
        .iter()
        .flat_map(|r| r.dates_by_year.keys().copied())
        .collect();
    years.insert(season.current);
    years.insert(season.prior);

    let current_totals: Vec<u32> = records
        .iter()
        .map(|r| r.dates(season.current).len() as u32)
        .collect();
    let prior_totals: Vec<u32> = records
        .iter()
        .map(|r| r.dates(season.prior).len() as u32)
        .collect();
    let current_ranks = competition_ranks(&current_totals);
    let prior_ranks = competition_ranks(&prior_totals);

    let anchors = roster_anchors(records, season.current, season.anchor);
    log::debug!(
        "Processing {} players, {} anchor games in {}",
        records.len(),
        anchors.len(),
        season.current
    );

    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let total: BTreeMap<i32, u32> = years
                .iter()
                .map(|&y| (y, record.dates(y).len() as u32))
                .collect();
            let monthly: BTreeMap<i32, MonthlyBreakdown> = years
                .iter()
                .map(|&y| (y, monthly_breakdown(record.dates(y))))
                .collect();

            let mut rank = BTreeMap::new();
            rank.insert(season.current, current_ranks[i]);
            rank.insert(season.prior, prior_ranks[i]);

            let streak = longest_streak(record.dates(season.current), &anchors);

            ProcessedPlayer {
                name: record.name.clone(),
                dates_by_year: record.dates_by_year.clone(),
                total_all_time: current_totals[i] + prior_totals[i],
                total,
                rank,
                monthly_breakdown: monthly,
                longest_streak: streak.count,
                streak_dates: streak.dates,
                streak_start: streak.start,
                streak_end: streak.end,
            }
        })
        .collect()
}

pub fn find_player<'a>(players: &'a [ProcessedPlayer], name: &str) -> StatsResult<&'a ProcessedPlayer> {
    players
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| StatsError::UnknownPlayer(name.to_string()))
}

/// Ranked players first by rank, non-participants last, ties by name.
pub fn leaderboard(players: &[ProcessedPlayer], year: i32) -> Vec<&ProcessedPlayer> {
    let mut board: Vec<&ProcessedPlayer> = players.iter().collect();
    board.sort_by(|a, b| {
        let key = |p: &ProcessedPlayer| match p.rank_for(year) {
            0 => u32::MAX,
            r => r,
        };
        key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
    });
    board
}

pub fn season_summary(
    player: &ProcessedPlayer,
    season: &Season,
    community: &CommunityStats,
) -> PlayerSeasonSummary {
    let games = player.total_for(season.current);
    let prior_games = player.total_for(season.prior);
    let rank = player.rank_for(season.current);
    let prior_rank = player.rank_for(season.prior);

    let rank_change = if rank != 0 && prior_rank != 0 {
        Some(prior_rank as i64 - rank as i64)
    } else {
        None
    };

    let played = community.season(season.current).games_played;
    let share = if played == 0 {
        0
    } else {
        (100.0 * games as f64 / played as f64).round() as u32
    };

    let breakdown = player.breakdown_for(season.current);
    PlayerSeasonSummary {
        name: player.name.clone(),
        year: season.current,
        games,
        prior_games,
        games_change: games as i64 - prior_games as i64,
        rank,
        prior_rank,
        rank_change,
        best_months: best_months(&breakdown),
        worst_months: worst_months(&breakdown),
        share_of_community_games: share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;
    use chrono::Weekday;

    fn season() -> Season {
        Season::new(2025, 2024, Weekday::Wed)
    }

    fn n_dates(n: u32) -> Vec<String> {
        (1..=n).map(|d| format!("{:02}/{:02}", (d % 28) + 1, (d % 12) + 1)).collect()
    }

    fn record(name: &str, current: u32, prior: u32) -> PlayerRecord {
        let mut r = PlayerRecord::new(name);
        r.dates_by_year.insert(2025, n_dates(current));
        if prior > 0 {
            r.dates_by_year.insert(2024, n_dates(prior));
        }
        r
    }

    #[test]
    fn ties_share_rank_and_next_rank_skips() {
        assert_eq!(competition_ranks(&[10, 10, 5]), vec![1, 1, 3]);
        assert_eq!(competition_ranks(&[5, 10, 10, 5, 1]), vec![3, 1, 1, 3, 5]);
        assert_eq!(competition_ranks(&[0, 3, 0]), vec![0, 1, 0]);
        assert!(competition_ranks(&[]).is_empty());
    }

    #[test]
    fn scenario_ranks() {
        let roster = vec![record("A", 10, 0), record("B", 10, 4), record("C", 5, 6)];
        let out = process_roster(&roster, &season());
        assert_eq!(out[0].rank_for(2025), 1);
        assert_eq!(out[1].rank_for(2025), 1);
        assert_eq!(out[2].rank_for(2025), 3);
        // prior year: A sat out
        assert_eq!(out[0].rank_for(2024), 0);
        assert_eq!(out[2].rank_for(2024), 1);
        assert_eq!(out[1].rank_for(2024), 2);
        assert_eq!(out[1].total_all_time, 14);
    }

    #[test]
    fn malformed_dates_count_but_do_not_bucket() {
        let mut r = PlayerRecord::new("A");
        r.dates_by_year
            .insert(2025, vec!["01/03".into(), "02/xx".into(), "nonsense".into()]);
        let out = process_roster(&[r], &season());
        assert_eq!(out[0].total_for(2025), 3);
        let b = out[0].breakdown_for(2025);
        assert_eq!(b.total(), 1);
        assert_eq!(b.get(Month::March), 1);
        assert_eq!(b.iter().count(), 12);
    }

    #[test]
    fn breakdown_sums_to_total_for_clean_dates() {
        let roster = vec![record("A", 17, 9)];
        let out = process_roster(&roster, &season());
        for year in [2024, 2025] {
            assert_eq!(out[0].breakdown_for(year).total(), out[0].total_for(year));
        }
    }

    #[test]
    fn empty_roster_processes_to_nothing() {
        assert!(process_roster(&[], &season()).is_empty());
    }

    #[test]
    fn leaderboard_puts_non_participants_last() {
        let roster = vec![record("Zed", 0, 3), record("Amy", 4, 0), record("Bob", 4, 0), record("Cat", 9, 0)];
        let out = process_roster(&roster, &season());
        let names: Vec<&str> = leaderboard(&out, 2025).iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Cat", "Amy", "Bob", "Zed"]);
    }

    #[test]
    fn find_player_is_case_insensitive() {
        let out = process_roster(&[record("Ana", 1, 0)], &season());
        assert_eq!(find_player(&out, "ana").unwrap().name(), "Ana");
        assert!(matches!(find_player(&out, "Bia"), Err(StatsError::UnknownPlayer(_))));
    }

    #[test]
    fn summary_reports_climb_and_share() {
        let roster = vec![record("A", 6, 2), record("B", 3, 5)];
        let out = process_roster(&roster, &season());
        let mut community = CommunityStats {
            current_year: 2025,
            prior_year: 2024,
            ..CommunityStats::default()
        };
        community.seasons.insert(
            2025,
            crate::models::SeasonSummary {
                games_played: 12,
                ..Default::default()
            },
        );

        let s = season_summary(&out[0], &season(), &community);
        assert_eq!(s.games_change, 4);
        assert_eq!(s.rank, 1);
        assert_eq!(s.prior_rank, 2);
        assert_eq!(s.rank_change, Some(1));
        assert_eq!(s.share_of_community_games, 50);

        let lone = process_roster(&[record("Solo", 2, 0)], &season());
        let s = season_summary(&lone[0], &season(), &community);
        assert_eq!(s.rank_change, None);
    }
}
