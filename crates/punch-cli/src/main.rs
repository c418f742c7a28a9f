use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use punch_cli::commands::{breaks, clock, status, watch};
use punch_cli::{BreakAction, Cli, Commands, Config};
use punch_session::TimeClock;

/// Build the store over an API client from configuration.
fn open_clock(config: &Config) -> Result<TimeClock<punch_api::Client>> {
    let client = punch_api::Client::new(&config.api_url, &config.token)
        .context("failed to build API client (is PUNCH_TOKEN set?)")?;
    Ok(TimeClock::new(client))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut time_clock = open_clock(&config)?;
    let mut stdout = std::io::stdout();

    match command {
        Commands::In {
            entry_type,
            notes,
            location,
        } => {
            time_clock
                .refresh()
                .await
                .context("failed to fetch active entry")?;
            let location = location.or_else(|| config.default_location.clone());
            clock::clock_in(&mut stdout, &mut time_clock, entry_type, notes, location).await?;
        }
        Commands::Out { notes } => {
            time_clock
                .refresh()
                .await
                .context("failed to fetch active entry")?;
            clock::clock_out(&mut stdout, &mut time_clock, notes).await?;
        }
        Commands::Break { action } => {
            time_clock
                .refresh()
                .await
                .context("failed to fetch active entry")?;
            match action {
                BreakAction::Start { break_type, notes } => {
                    breaks::start(&mut stdout, &mut time_clock, break_type, notes).await?;
                }
                BreakAction::End { id, notes } => {
                    breaks::end(&mut stdout, &mut time_clock, id, notes).await?;
                }
            }
        }
        Commands::Status { json } => {
            status::run(&mut stdout, &mut time_clock, json, config.target_hours).await?;
        }
        Commands::Watch => {
            watch::run(&mut stdout, &mut time_clock, config.target_hours).await?;
        }
    }

    Ok(())
}
