//! Builds the personalised season quiz from a player's processed stats.

use crate::config::{BuddyConfig, QuizConfig, Season};
use crate::engine::affinity::{football_buddies, total_game_days};
use crate::engine::community::summarize_season;
use crate::engine::highlights::months_by_count;
use crate::models::{
    Month, ProcessedPlayer, QuizQuestion, QuizSlide, RangeAnchor, Schedule,
};

const MONTH_OPTIONS: usize = 4;
const BUDDY_DISTRACTORS: usize = 3;

pub struct QuizContext<'a> {
    pub subject: &'a ProcessedPlayer,
    pub roster: &'a [ProcessedPlayer],
    pub schedule: &'a Schedule,
    pub season: Season,
    pub buddies: BuddyConfig,
    pub margins: QuizConfig,
}

fn range(
    id: &str,
    min: i64,
    max: i64,
    correct_answer: i64,
    margin: i64,
    anchor: Option<RangeAnchor>,
) -> QuizQuestion {
    QuizQuestion::Range {
        id: id.to_string(),
        min,
        max,
        correct_answer,
        margin,
        anchor,
    }
}

fn slide(id: &str, questions: Vec<QuizQuestion>) -> QuizSlide {
    QuizSlide {
        id: id.to_string(),
        questions,
    }
}

impl QuizContext<'_> {
    fn prior_anchor(&self, value: i64) -> RangeAnchor {
        RangeAnchor {
            value,
            label: self.season.prior.to_string(),
        }
    }

    fn games_slide(&self) -> QuizSlide {
        let games = self.subject.total_for(self.season.current) as i64;
        let prior = self.subject.total_for(self.season.prior) as i64;
        let max = (total_game_days(self.roster, self.season.current) as i64).max(games);
        let anchor = (prior > 0).then(|| self.prior_anchor(prior));
        slide(
            "games",
            vec![range("games_played", 0, max, games, self.margins.games_margin, anchor)],
        )
    }

    fn rank_slide(&self) -> Option<QuizSlide> {
        let rank = self.subject.rank_for(self.season.current);
        if rank == 0 {
            return None;
        }
        let ranked = self
            .roster
            .iter()
            .filter(|p| p.is_ranked(self.season.current))
            .count()
            .max(1) as i64;
        let prior_rank = self.subject.rank_for(self.season.prior);
        let anchor = (prior_rank != 0).then(|| self.prior_anchor(prior_rank as i64));
        Some(slide(
            "rank",
            vec![range("rank", 1, ranked, rank as i64, self.margins.rank_margin, anchor)],
        ))
    }

    fn months_slide(&self) -> Option<QuizSlide> {
        let breakdown = self.subject.breakdown_for(self.season.current);
        if breakdown.total() == 0 {
            return None;
        }
        let top: Vec<Month> = months_by_count(&breakdown)
            .into_iter()
            .take(MONTH_OPTIONS)
            .map(|(m, _)| m)
            .collect();
        let correct = top[0];
        let mut options = top;
        options.sort();
        Some(slide(
            "months",
            vec![QuizQuestion::Choice {
                id: "best_month".to_string(),
                options: options.iter().map(|m| m.as_str().to_string()).collect(),
                correct_answer: correct.as_str().to_string(),
            }],
        ))
    }

    fn streak_slide(&self) -> QuizSlide {
        let games = self.subject.total_for(self.season.current) as i64;
        let streak = self.subject.longest_streak as i64;
        slide(
            "streak",
            vec![range(
                "longest_streak",
                0,
                games.max(streak).max(1),
                streak,
                self.margins.streak_margin,
                None,
            )],
        )
    }

    fn buddies_slide(&self) -> Option<QuizSlide> {
        let year = self.season.current;
        let buddies = football_buddies(self.subject, self.roster, year, &self.buddies);
        let top = buddies.first()?;

        let mut others: Vec<&ProcessedPlayer> = self
            .roster
            .iter()
            .filter(|p| p.name != self.subject.name && p.name != top.name)
            .filter(|p| p.total_for(year) > 0)
            .collect();
        others.sort_by(|a, b| {
            b.total_for(year)
                .cmp(&a.total_for(year))
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut options: Vec<String> = others
            .iter()
            .take(BUDDY_DISTRACTORS)
            .map(|p| p.name.clone())
            .collect();
        options.push(top.name.clone());
        options.sort();

        let games = self.subject.total_for(year) as i64;
        Some(slide(
            "buddies",
            vec![
                QuizQuestion::Choice {
                    id: "top_buddy".to_string(),
                    options,
                    correct_answer: top.name.clone(),
                },
                range(
                    "buddy_games",
                    0,
                    games,
                    top.games_with_you as i64,
                    self.margins.buddy_games_margin,
                    None,
                ),
            ],
        ))
    }

    fn community_slide(&self) -> Option<QuizSlide> {
        let current_records = self
            .schedule
            .get(&self.season.current)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let prior_records = self
            .schedule
            .get(&self.season.prior)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let current = summarize_season(current_records);
        let prior = summarize_season(prior_records);
        if current.total_attempted == 0 {
            return None;
        }

        let mut questions = vec![range(
            "community_games",
            0,
            current.total_attempted as i64,
            current.games_played as i64,
            self.margins.community_games_margin,
            (prior.total_attempted > 0).then(|| self.prior_anchor(prior.games_played as i64)),
        )];

        if current.games_played > 0 {
            let most_players = current_records
                .iter()
                .filter(|r| r.played)
                .filter_map(|r| r.players)
                .max()
                .unwrap_or(0)
                .max(1) as i64;
            questions.push(range(
                "avg_players",
                0,
                most_players,
                current.avg_players.round() as i64,
                self.margins.avg_players_margin,
                (prior.games_played > 0)
                    .then(|| self.prior_anchor(prior.avg_players.round() as i64)),
            ));
        }

        Some(slide("community", questions))
    }
}

/// Slides in presentation order. Slides whose data is missing are left out.
pub fn generate_quiz(ctx: &QuizContext<'_>) -> Vec<QuizSlide> {
    let mut slides = vec![ctx.games_slide()];
    slides.extend(ctx.rank_slide());
    slides.extend(ctx.months_slide());
    slides.push(ctx.streak_slide());
    slides.extend(ctx.buddies_slide());
    slides.extend(ctx.community_slide());
    log::debug!(
        "Generated {} quiz slides for {}",
        slides.len(),
        ctx.subject.name
    );
    slides
}

pub fn question_count(slides: &[QuizSlide]) -> usize {
    slides.iter().map(|s| s.questions.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ranking::process_roster;
    use crate::models::{CommunityGameRecord, PlayerRecord};
    use chrono::Weekday;

    fn season() -> Season {
        Season::new(2025, 2024, Weekday::Wed)
    }

    fn roster() -> Vec<ProcessedPlayer> {
        let records = vec![
            PlayerRecord::new("Ana")
                .with_dates(2025, &["01/01", "08/01", "15/01", "05/02", "12/02", "19/02"])
                .with_dates(2024, &["03/01", "10/01"]),
            PlayerRecord::new("Bia")
                .with_dates(2025, &["01/01", "08/01", "15/01", "05/02", "12/02"]),
            PlayerRecord::new("Caio").with_dates(2025, &["22/01"]),
            PlayerRecord::new("Duda").with_dates(2024, &["03/01"]),
        ];
        process_roster(&records, &season())
    }

    fn schedule() -> Schedule {
        let mut s = Schedule::new();
        s.insert(
            2025,
            vec![
                CommunityGameRecord::played("01/01", "january", 10, Some("North")),
                CommunityGameRecord::played("08/01", "january", 13, Some("North")),
                CommunityGameRecord::cancelled("29/01", "january"),
            ],
        );
        s
    }

    fn quiz_for(name: &str, roster: &[ProcessedPlayer], schedule: &Schedule) -> Vec<QuizSlide> {
        let subject = roster.iter().find(|p| p.name == name).unwrap();
        generate_quiz(&QuizContext {
            subject,
            roster,
            schedule,
            season: season(),
            buddies: BuddyConfig::default(),
            margins: QuizConfig::default(),
        })
    }

    fn question<'a>(slides: &'a [QuizSlide], id: &str) -> &'a QuizQuestion {
        slides
            .iter()
            .flat_map(|s| &s.questions)
            .find(|q| q.id() == id)
            .unwrap()
    }

    #[test]
    fn full_quiz_has_every_slide_in_order() {
        let roster = roster();
        let schedule = schedule();
        let slides = quiz_for("Ana", &roster, &schedule);
        let ids: Vec<&str> = slides.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["games", "rank", "months", "streak", "buddies", "community"]);
        assert_eq!(question_count(&slides), 8);
    }

    #[test]
    fn games_question_anchors_on_prior_season() {
        let roster = roster();
        let slides = quiz_for("Ana", &roster, &Schedule::new());
        match question(&slides, "games_played") {
            QuizQuestion::Range {
                min,
                max,
                correct_answer,
                anchor,
                ..
            } => {
                assert_eq!(*min, 0);
                // 7 distinct game days across the roster
                assert_eq!(*max, 7);
                assert_eq!(*correct_answer, 6);
                let anchor = anchor.as_ref().unwrap();
                assert_eq!(anchor.value, 2);
                assert_eq!(anchor.label, "2024");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn best_month_options_are_in_calendar_order() {
        let roster = roster();
        let slides = quiz_for("Ana", &roster, &Schedule::new());
        match question(&slides, "best_month") {
            QuizQuestion::Choice {
                options,
                correct_answer,
                ..
            } => {
                assert_eq!(correct_answer, "january");
                assert_eq!(options, &vec!["january", "february", "march", "april"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn top_buddy_question_lists_buddy_among_options() {
        let roster = roster();
        let slides = quiz_for("Ana", &roster, &Schedule::new());
        match question(&slides, "top_buddy") {
            QuizQuestion::Choice {
                options,
                correct_answer,
                ..
            } => {
                assert_eq!(correct_answer, "Bia");
                // Duda has no current-year games
                assert_eq!(options, &vec!["Bia", "Caio"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_participant_skips_rank_months_and_buddies() {
        let roster = roster();
        let slides = quiz_for("Duda", &roster, &Schedule::new());
        let ids: Vec<&str> = slides.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["games", "streak"]);
    }

    #[test]
    fn community_questions_use_current_schedule() {
        let roster = roster();
        let schedule = schedule();
        let slides = quiz_for("Caio", &roster, &schedule);
        match question(&slides, "community_games") {
            QuizQuestion::Range {
                max,
                correct_answer,
                anchor,
                ..
            } => {
                assert_eq!(*max, 3);
                assert_eq!(*correct_answer, 2);
                assert!(anchor.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
        match question(&slides, "avg_players") {
            QuizQuestion::Range {
                max, correct_answer, ..
            } => {
                assert_eq!(*max, 13);
                // 11.5 rounds up
                assert_eq!(*correct_answer, 12);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
