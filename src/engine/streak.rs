//! Longest attendance run, anchored on the weekly game day.
//!
//! The anchor calendar comes from the whole roster: an anchor-weekday date on
//! which anybody played is a game the player could have attended. Missing one
//! of those breaks the run. Midweek extras never break it; they are folded
//! into the run that surrounds them.

use chrono::Weekday;
use std::collections::BTreeSet;

use crate::models::{Attendance, GameDate, Streak};

/// Anchor-weekday dates that had a game, ascending.
pub fn season_anchors<'a, I>(all_dates: I, year: i32, anchor: Weekday) -> Vec<GameDate>
where
    I: IntoIterator<Item = &'a String>,
{
    let anchors: BTreeSet<GameDate> = all_dates
        .into_iter()
        .filter_map(|raw| GameDate::parse(raw))
        .filter(|d| d.weekday(year) == Some(anchor))
        .collect();
    anchors.into_iter().collect()
}

/// Anchors for a roster's season.
pub fn roster_anchors<T: Attendance>(roster: &[T], year: i32, anchor: Weekday) -> Vec<GameDate> {
    season_anchors(roster.iter().flat_map(|p| p.dates(year)), year, anchor)
}

/// Best run over the given anchors.
///
/// With no anchors at all the whole date list is reported as one run, in the
/// order the dates were given.
pub fn longest_streak(player_dates: &[String], anchors: &[GameDate]) -> Streak {
    if anchors.is_empty() {
        log::debug!(
            "No anchor-day games in season, reporting {} dates as one streak",
            player_dates.len()
        );
        return Streak {
            count: player_dates.len() as u32,
            dates: player_dates.to_vec(),
            start: player_dates.first().cloned(),
            end: player_dates.last().cloned(),
        };
    }

    let own: BTreeSet<GameDate> = player_dates
        .iter()
        .filter_map(|raw| GameDate::parse(raw))
        .collect();

    let mut best = Streak::default();
    let mut current_count = 0u32;
    let mut current_dates: Vec<GameDate> = Vec::new();
    let mut last_anchor: Option<GameDate> = None;

    for &anchor in anchors {
        if !own.contains(&anchor) {
            current_count = 0;
            current_dates.clear();
            last_anchor = None;
            continue;
        }

        // A fresh run also picks up every earlier date of the player's.
        let bonus: Vec<GameDate> = match last_anchor {
            Some(last) => own.range(last..anchor).skip(1).copied().collect(),
            None => own.range(..anchor).copied().collect(),
        };

        current_count += 1 + bonus.len() as u32;
        current_dates.extend(bonus);
        current_dates.push(anchor);
        last_anchor = Some(anchor);

        if current_count > best.count {
            best = Streak {
                count: current_count,
                dates: current_dates.iter().map(GameDate::to_string).collect(),
                start: current_dates.first().map(GameDate::to_string),
                end: current_dates.last().map(GameDate::to_string),
            };
        }
    }

    best
}

/// Streak for one player against the roster's anchor calendar.
pub fn detect_streak<T: Attendance>(player: &T, roster: &[T], year: i32, anchor: Weekday) -> Streak {
    let anchors = roster_anchors(roster, year, anchor);
    longest_streak(player.dates(year), &anchors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerRecord;

    // Wednesdays in January 2025: 1, 8, 15, 22, 29
    const YEAR: i32 = 2025;

    fn dates(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn anchors(list: &[&str]) -> Vec<GameDate> {
        season_anchors(&dates(list), YEAR, Weekday::Wed)
    }

    #[test]
    fn anchors_keep_only_anchor_weekday_sorted() {
        let a = anchors(&["15/01", "03/01", "01/01", "bad", "08/01", "01/01"]);
        let printed: Vec<String> = a.iter().map(|d| d.to_string()).collect();
        assert_eq!(printed, vec!["01/01", "08/01", "15/01"]);
    }

    #[test]
    fn attending_every_anchor_counts_all_of_them() {
        let all = anchors(&["01/01", "08/01", "15/01", "22/01"]);
        let s = longest_streak(&dates(&["01/01", "08/01", "15/01", "22/01"]), &all);
        assert_eq!(s.count, 4);
        assert_eq!(s.start.as_deref(), Some("01/01"));
        assert_eq!(s.end.as_deref(), Some("22/01"));
    }

    #[test]
    fn midweek_games_inside_a_run_are_bonus() {
        let all = anchors(&["01/01", "08/01", "15/01"]);
        // 04/01 (Saturday) sits between two attended anchors
        let s = longest_streak(&dates(&["01/01", "04/01", "08/01", "15/01"]), &all);
        assert_eq!(s.count, 4);
        assert_eq!(s.dates, vec!["01/01", "04/01", "08/01", "15/01"]);
    }

    #[test]
    fn missed_anchor_resets_even_with_midweek_game() {
        let all = anchors(&["01/01", "08/01", "15/01", "22/01", "29/01"]);
        // misses 15/01 but played midweek on 17/01
        let player = dates(&["01/01", "08/01", "17/01", "22/01"]);
        let s = longest_streak(&player, &all);
        // first run: 01/01, 08/01 -> 2
        // second run starts fresh at 22/01 and picks up every earlier date:
        // 01/01, 08/01, 17/01 + 22/01 -> 4
        assert_eq!(s.count, 4);
        assert_eq!(s.start.as_deref(), Some("01/01"));
        assert_eq!(s.end.as_deref(), Some("22/01"));
    }

    #[test]
    fn first_anchor_of_run_collects_earlier_dates() {
        let all = anchors(&["08/01", "15/01"]);
        let player = dates(&["02/01", "03/01", "08/01"]);
        let s = longest_streak(&player, &all);
        assert_eq!(s.count, 3);
        assert_eq!(s.dates, vec!["02/01", "03/01", "08/01"]);
    }

    #[test]
    fn never_attending_an_anchor_is_zero() {
        let all = anchors(&["01/01", "08/01"]);
        let s = longest_streak(&dates(&["02/01", "03/01"]), &all);
        assert_eq!(s, Streak::default());
    }

    #[test]
    fn without_anchors_whole_list_is_one_streak_as_given() {
        let s = longest_streak(&dates(&["10/01", "02/01", "oops"]), &[]);
        assert_eq!(s.count, 3);
        assert_eq!(s.start.as_deref(), Some("10/01"));
        assert_eq!(s.end.as_deref(), Some("oops"));
    }

    #[test]
    fn detect_streak_uses_the_roster_calendar() {
        let roster = vec![
            PlayerRecord::new("Ana").with_dates(YEAR, &["01/01", "08/01", "15/01"]),
            PlayerRecord::new("Bia").with_dates(YEAR, &["01/01", "15/01"]),
        ];
        let s = detect_streak(&roster[1], &roster, YEAR, Weekday::Wed);
        // Bia missed 08/01, so the 15/01 run restarts and absorbs 01/01
        assert_eq!(s.count, 2);
        let s = detect_streak(&roster[0], &roster, YEAR, Weekday::Wed);
        assert_eq!(s.count, 3);
    }
}
