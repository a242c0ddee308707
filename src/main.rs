mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers::{self, RunContext};
use kickabout::config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        // Writes the config, so it must not need one
        Commands::Init { reset } => handlers::handle_init(*reset)?,

        Commands::Rankings => handlers::handle_rankings(&cli, &run_context(&cli)?)?,
        Commands::Player { name } => handlers::handle_player(&cli, &run_context(&cli)?, name)?,
        Commands::Buddies { name } => handlers::handle_buddies(&cli, &run_context(&cli)?, name)?,
        Commands::Community => handlers::handle_community(&cli, &run_context(&cli)?)?,
        Commands::Quiz { name, answers } => {
            handlers::handle_quiz(&cli, &run_context(&cli)?, name, answers.as_deref())?
        }
        Commands::Export { name } => handlers::handle_export(&cli, &run_context(&cli)?, name)?,
    }

    Ok(())
}

/// Config file with this run's CLI overrides applied.
fn run_context(cli: &Cli) -> Result<RunContext> {
    let config = AppConfig::load().context("Loading config")?;
    let ctx = RunContext::new(config, cli)?;
    log::debug!(
        "Seasons {} / {}, anchor day {}",
        ctx.season.current,
        ctx.season.prior,
        ctx.season.anchor
    );
    Ok(ctx)
}
