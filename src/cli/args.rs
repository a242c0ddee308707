use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kickabout", version, author, about = "Season stats for the weekly kickabout")]
pub struct Cli {
    /// Roster snapshot (JSON, {"kind": "raw" | "processed", "players": [...]})
    #[arg(long, global = true)]
    pub roster: Option<PathBuf>,
    /// Community schedule (JSON, {"<year>": [...]})
    #[arg(long, global = true)]
    pub schedule: Option<PathBuf>,
    /// Override the configured current season
    #[arg(long, global = true)]
    pub current_year: Option<i32>,
    /// Override the configured prior season
    #[arg(long, global = true)]
    pub prior_year: Option<i32>,
    /// Output language (en, pt)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        reset: bool,
    },
    /// Season leaderboard
    Rankings,
    /// Season summary for one player
    Player {
        /// Player name
        name: String,
    },
    /// Football buddies and the players you influence most
    Buddies {
        /// Player name
        name: String,
    },
    /// League-wide season stats
    Community,
    /// Personalised season quiz
    Quiz {
        /// Player name
        name: String,
        /// JSON object of questionId -> answer to score
        #[arg(long)]
        answers: Option<PathBuf>,
    },
    /// Dump a player's processed stats, buddies and quiz as JSON
    Export {
        /// Player name
        name: String,
    },
}
