//! Football buddies: how much more often two players show up together than
//! chance would predict.
//!
//! `expected = subject_games * other_games / total_game_days` is the overlap
//! under independent attendance, and `affinity = overlap / expected` is the
//! lift over it.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::BuddyConfig;
use crate::models::{Attendance, FootballBuddy};

/// Candidates with fewer games than this never form a pair.
pub const MIN_PAIR_GAMES: u32 = 2;

/// Affinities closer than this are treated as a tie.
pub const AFFINITY_TIE_THRESHOLD: f64 = 0.1;

fn date_set(dates: &[String]) -> HashSet<&str> {
    dates.iter().map(|d| d.trim()).collect()
}

/// Distinct game days across the whole roster.
pub fn total_game_days<T: Attendance>(roster: &[T], year: i32) -> usize {
    roster
        .iter()
        .flat_map(|p| p.dates(year))
        .map(|d| d.trim())
        .collect::<HashSet<_>>()
        .len()
}

pub fn affinity(overlap: u32, subject_games: u32, other_games: u32, total_game_days: usize) -> f64 {
    if total_game_days == 0 {
        return 0.0;
    }
    let expected = (subject_games as f64 * other_games as f64) / total_game_days as f64;
    if expected > 0.0 {
        overlap as f64 / expected
    } else {
        0.0
    }
}

fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (100.0 * part as f64 / whole as f64).round() as u32
    }
}

/// Every other player passing `gate`, with overlap of at least `min_overlap`.
fn pair_candidates<T, F>(
    subject: &T,
    roster: &[T],
    year: i32,
    min_overlap: u32,
    gate: F,
) -> Vec<FootballBuddy>
where
    T: Attendance,
    F: Fn(u32) -> bool,
{
    let game_days = total_game_days(roster, year);
    if game_days == 0 {
        return Vec::new();
    }

    let subject_dates = date_set(subject.dates(year));
    let subject_games = subject.games(year);

    roster
        .iter()
        .filter(|other| other.name() != subject.name())
        .filter_map(|other| {
            let other_games = other.games(year);
            if !gate(other_games) {
                return None;
            }
            let overlap = date_set(other.dates(year))
                .intersection(&subject_dates)
                .count() as u32;
            if overlap < min_overlap {
                return None;
            }
            Some(FootballBuddy {
                subject: subject.name().to_string(),
                name: other.name().to_string(),
                games_with_you: overlap,
                their_total_games: other_games,
                percentage_of_your_games: percent(overlap, subject_games),
                influence_on_them: percent(overlap, other_games),
                affinity: affinity(overlap, subject_games, other_games, game_days),
            })
        })
        .collect()
}

/// Affinity first, but only when the gap is wider than the tie threshold;
/// then influence on the other player; then raw overlap.
pub fn buddy_order(a: &FootballBuddy, b: &FootballBuddy) -> Ordering {
    if (a.affinity - b.affinity).abs() > AFFINITY_TIE_THRESHOLD {
        return b.affinity.partial_cmp(&a.affinity).unwrap_or(Ordering::Equal);
    }
    b.influence_on_them
        .cmp(&a.influence_on_them)
        .then_with(|| b.games_with_you.cmp(&a.games_with_you))
}

/// Stable insertion sort. The threshold makes `buddy_order` non-transitive,
/// which `slice::sort_by` is allowed to reject; this never reorders equal
/// neighbours and never panics.
fn sort_with<F>(items: &mut [FootballBuddy], cmp: F)
where
    F: Fn(&FootballBuddy, &FootballBuddy) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// The subject's top buddies by affinity.
pub fn football_buddies<T: Attendance>(
    subject: &T,
    roster: &[T],
    year: i32,
    config: &BuddyConfig,
) -> Vec<FootballBuddy> {
    if subject.games(year) < config.min_games_for_stats {
        log::debug!(
            "{} has {} games in {}, below {} needed for buddies",
            subject.name(),
            subject.games(year),
            year,
            config.min_games_for_stats
        );
        return Vec::new();
    }

    let mut buddies = pair_candidates(subject, roster, year, config.min_overlap, |games| {
        games >= MIN_PAIR_GAMES
    });
    sort_with(&mut buddies, buddy_order);
    buddies.truncate(config.top_n);
    buddies
}

/// Players whose attendance the subject accounts for most.
pub fn players_you_influence<T: Attendance>(
    subject: &T,
    roster: &[T],
    year: i32,
    config: &BuddyConfig,
) -> Vec<FootballBuddy> {
    let mut influenced = pair_candidates(subject, roster, year, config.min_overlap, |games| {
        games >= config.min_their_games
    });
    influenced.sort_by(|a, b| b.influence_on_them.cmp(&a.influence_on_them));
    influenced.truncate(config.top_n);
    influenced
}
