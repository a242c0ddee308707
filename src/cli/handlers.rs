use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use kickabout::config::{AppConfig, Season};
use kickabout::engine::{
    find_player, football_buddies, leaderboard, parse_roster, parse_schedule,
    players_you_influence, season_summary, Report,
};
use kickabout::models::{
    AnswerValue, CommunityStats, FootballBuddy, PlayerSeasonSummary, ProcessedPlayer, QuizQuestion,
    QuizSlide, Schedule,
};
use kickabout::quiz::{generate_quiz, score_quiz, QuizContext};
use kickabout::utils::format::{
    format_decimal, format_decimal_delta, format_delta, format_percent, format_rank,
    games_label, month_name, pad_display, progress_bar, Language,
};

use crate::cli::args::Cli;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Run context ─────────────────────────────────────────────────────────────

/// Config plus CLI overrides, resolved once per run.
pub struct RunContext {
    pub config: AppConfig,
    pub season: Season,
    pub lang: Language,
}

impl RunContext {
    pub fn new(mut config: AppConfig, cli: &Cli) -> Result<Self> {
        if let Some(year) = cli.current_year {
            config.season.current_year = year;
        }
        if let Some(year) = cli.prior_year {
            config.season.prior_year = year;
        }
        if let Some(lang) = &cli.lang {
            config.display.language = lang.clone();
        }
        let season = config.season.resolve()?;
        let lang = config.display.language()?;
        Ok(Self {
            config,
            season,
            lang,
        })
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))
}

fn load_report(cli: &Cli, ctx: &RunContext) -> Result<(Report, Schedule)> {
    let roster_path = cli
        .roster
        .as_deref()
        .ok_or_else(|| anyhow!("--roster <path> is required for this command"))?;
    let roster = parse_roster(&read_file(roster_path)?)
        .with_context(|| format!("Loading roster {:?}", roster_path))?;

    let schedule = match cli.schedule.as_deref() {
        Some(path) => parse_schedule(&read_file(path)?)
            .with_context(|| format!("Loading schedule {:?}", path))?,
        None => {
            log::info!("No schedule given, community stats will be empty");
            Schedule::new()
        }
    };

    let report = Report::from_snapshot(roster, &schedule, &ctx.season);
    Ok((report, schedule))
}

// ─── Init ────────────────────────────────────────────────────────────────────

pub fn handle_init(reset: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if path.exists() && !reset {
        println!("Config already exists at {:?}. Use --reset to overwrite.", path);
        return Ok(());
    }
    let written = AppConfig::default().save()?;
    println_colored!(GREEN, "  ✓ Wrote default config to {:?}", written);
    Ok(())
}

// ─── Rankings ────────────────────────────────────────────────────────────────

pub fn handle_rankings(cli: &Cli, ctx: &RunContext) -> Result<()> {
    let (report, _) = load_report(cli, ctx)?;
    let season = &ctx.season;
    let board = leaderboard(&report.players, season.current);
    let width = board
        .iter()
        .map(|p| unicode_width::UnicodeWidthStr::width(p.name()))
        .max()
        .unwrap_or(4)
        .max(4);

    println!();
    println_colored!(GOLD, "  Rankings {}", season.current);
    println!();
    println_colored!(
        DIM,
        "  {:<14}  {}  {:>5}  {:>5}  {:>5}  {:>6}",
        "rank",
        pad_display("name", width),
        season.current,
        season.prior,
        "all",
        "streak"
    );
    for p in board {
        let line = format!(
            "  {:<14}  {}  {:>5}  {:>5}  {:>5}  {:>6}",
            format_rank(p.rank_for(season.current), ctx.lang),
            pad_display(p.name(), width),
            p.total_for(season.current),
            p.total_for(season.prior),
            p.total_all_time,
            p.longest_streak
        );
        if p.rank_for(season.current) == 1 {
            println_colored!(BOLD, "{}", line);
        } else {
            println!("{}", line);
        }
    }
    println!();
    Ok(())
}

// ─── Player ──────────────────────────────────────────────────────────────────

pub fn handle_player(cli: &Cli, ctx: &RunContext, name: &str) -> Result<()> {
    let (report, _) = load_report(cli, ctx)?;
    let season = &ctx.season;
    let lang = ctx.lang;
    let player = find_player(&report.players, name)?;
    let summary = season_summary(player, season, &report.community);

    println!();
    println_colored!(GOLD, "  {}  {}", player.name(), season.current);
    println!();
    println_colored!(
        BOLD,
        "  Games:   {}  ({} vs {})",
        games_label(summary.games, lang),
        format_delta(summary.games_change),
        season.prior
    );
    println!(
        "  Rank:    {}  (was {})",
        format_rank(summary.rank, lang),
        format_rank(summary.prior_rank, lang)
    );
    if let Some(change) = summary.rank_change {
        println!("  Climb:   {}", format_delta(change));
    }
    println!(
        "  Share of community games: {}",
        format_percent(summary.share_of_community_games)
    );
    match (&player.streak_start, &player.streak_end) {
        (Some(start), Some(end)) => println_colored!(
            GREEN,
            "  Longest streak: {}  ({} → {})",
            player.longest_streak,
            start,
            end
        ),
        _ => println_colored!(DIM, "  Longest streak: 0"),
    }

    println!();
    let breakdown = player.breakdown_for(season.current);
    let top = breakdown.iter().map(|(_, c)| c).max().unwrap_or(0);
    for (month, count) in breakdown.iter() {
        println!(
            "  {}  {}  {}",
            pad_display(month_name(month, lang), 10),
            progress_bar(count, top, 12),
            count
        );
    }

    let names = |months: &[kickabout::models::Month]| {
        months
            .iter()
            .map(|m| month_name(*m, lang))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!();
    println_colored!(GREEN, "  Best months:  {}", names(&summary.best_months));
    println_colored!(AMBER, "  Quiet months: {}", names(&summary.worst_months));
    println!();
    Ok(())
}

// ─── Buddies ─────────────────────────────────────────────────────────────────

fn print_buddies(list: &[FootballBuddy]) {
    let width = list
        .iter()
        .map(|b| unicode_width::UnicodeWidthStr::width(b.name.as_str()))
        .max()
        .unwrap_or(4);
    for b in list {
        println!(
            "  {}  {:>3} together  {:>4} of yours  {:>4} of theirs  lift {:.2}",
            pad_display(&b.name, width),
            b.games_with_you,
            format_percent(b.percentage_of_your_games),
            format_percent(b.influence_on_them),
            b.affinity
        );
    }
}

pub fn handle_buddies(cli: &Cli, ctx: &RunContext, name: &str) -> Result<()> {
    let (report, _) = load_report(cli, ctx)?;
    let player = find_player(&report.players, name)?;
    let year = ctx.season.current;
    let config = &ctx.config.buddies;

    let buddies = football_buddies(player, &report.players, year, config);
    let influenced = players_you_influence(player, &report.players, year, config);

    println!();
    println_colored!(GOLD, "  Football buddies: {}", player.name());
    println!();
    if buddies.is_empty() {
        println_colored!(
            DIM,
            "  Not enough games yet (needs {})",
            config.min_games_for_stats
        );
    } else {
        print_buddies(&buddies);
    }

    println!();
    println_colored!(GOLD, "  Players you influence most");
    println!();
    if influenced.is_empty() {
        println_colored!(DIM, "  Nobody yet");
    } else {
        print_buddies(&influenced);
    }
    println!();
    Ok(())
}

// ─── Community ───────────────────────────────────────────────────────────────

pub fn handle_community(cli: &Cli, ctx: &RunContext) -> Result<()> {
    let (report, _) = load_report(cli, ctx)?;
    let stats = &report.community;

    println!();
    println_colored!(GOLD, "  Community");
    println!();
    for (year, s) in [(stats.prior_year, stats.prior()), (stats.current_year, stats.current())] {
        println_colored!(BOLD, "  {}", year);
        println!(
            "    Played {} / {}  ({} cancelled, {} success)",
            s.games_played,
            s.total_attempted,
            s.games_cancelled,
            format_percent(s.success_rate)
        );
        println!("    Avg players: {}", format_decimal(s.avg_players));
        if let Some(month) = &s.busiest_month {
            println!("    Busiest month: {}", month);
        }
        if let Some(field) = &s.top_field {
            println!("    Top field: {}", field);
        }
    }
    println!();
    println_colored!(
        AMBER,
        "  Change: {} games, {} players, {} pts success",
        format_delta(stats.changes.games_change),
        format_decimal_delta(stats.changes.avg_players_change),
        format_delta(stats.changes.success_rate_change)
    );
    println!("  All-time games: {}", stats.total_games_all_time);
    println!();
    Ok(())
}

// ─── Quiz ────────────────────────────────────────────────────────────────────

pub fn handle_quiz(cli: &Cli, ctx: &RunContext, name: &str, answers: Option<&Path>) -> Result<()> {
    let (report, schedule) = load_report(cli, ctx)?;
    let player = find_player(&report.players, name)?;
    let slides = generate_quiz(&QuizContext {
        subject: player,
        roster: &report.players,
        schedule: &schedule,
        season: ctx.season,
        buddies: ctx.config.buddies,
        margins: ctx.config.quiz,
    });

    let Some(path) = answers else {
        println!();
        for slide in &slides {
            println_colored!(GOLD, "  [{}]", slide.id);
            for q in &slide.questions {
                match q {
                    QuizQuestion::Range { id, min, max, anchor, .. } => {
                        let hint = anchor
                            .as_ref()
                            .map(|a| format!("  ({}: {})", a.label, a.value))
                            .unwrap_or_default();
                        println!("    {}  {}..{}{}", id, min, max, hint);
                    }
                    QuizQuestion::Choice { id, options, .. } => {
                        println!("    {}  {}", id, options.join(" / "));
                    }
                }
            }
        }
        println!();
        return Ok(());
    };

    let raw: HashMap<String, AnswerValue> =
        serde_json::from_str(&read_file(path)?).context("Parsing answers")?;
    let result = score_quiz(&slides, &raw)?;

    println!();
    for a in &result.answers {
        let user = a
            .user_answer
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        match (a.is_correct, a.is_exact) {
            (true, Some(true)) => {
                println_colored!(GREEN, "  ✓✓ {}  {}", a.question_id, user)
            }
            (true, _) => println_colored!(
                GREEN,
                "  ✓  {}  {} (was {})",
                a.question_id,
                user,
                a.correct_answer
            ),
            (false, _) => println_colored!(
                DIM,
                "  ✗  {}  {} (was {})",
                a.question_id,
                user,
                a.correct_answer
            ),
        }
    }
    println!();
    println_colored!(
        BOLD,
        "  Score: {}/{}",
        result.total_correct,
        result.total_questions
    );
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Export<'a> {
    language: &'static str,
    player: &'a ProcessedPlayer,
    summary: PlayerSeasonSummary,
    buddies: Vec<FootballBuddy>,
    influenced: Vec<FootballBuddy>,
    community: &'a CommunityStats,
    quiz: Vec<QuizSlide>,
}

pub fn handle_export(cli: &Cli, ctx: &RunContext, name: &str) -> Result<()> {
    let (report, schedule) = load_report(cli, ctx)?;
    let player = find_player(&report.players, name)?;
    let config = &ctx.config.buddies;
    let year = ctx.season.current;

    let quiz = generate_quiz(&QuizContext {
        subject: player,
        roster: &report.players,
        schedule: &schedule,
        season: ctx.season,
        buddies: *config,
        margins: ctx.config.quiz,
    });

    let out = Export {
        language: ctx.lang.code(),
        player,
        summary: season_summary(player, &ctx.season, &report.community),
        buddies: football_buddies(player, &report.players, year, config),
        influenced: players_you_influence(player, &report.players, year, config),
        community: &report.community,
        quiz,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
