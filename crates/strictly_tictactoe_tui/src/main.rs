//! Strictly Tic-Tac-Toe - unified CLI
//!
//! Interactive terminal play and headless replay of scripted games.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use strictly_tictactoe::Game;
use strictly_tictactoe_tui::{
    Settings,
    cli::{Cli, Command},
    replay, run_tui,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a settings file when `--config` is absent.
const CONFIG_ENV: &str = "STRICTLY_TICTACTOE_CONFIG";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    // The real subscriber needs the settings, so loading logs to stderr.
    let settings = Settings::load_logged(
        config_path.as_deref(),
        bootstrap_filter(),
        std::io::stderr,
    )?;

    match cli.command {
        Command::Play {
            descending,
            draw_label,
            log_file,
        } => {
            let settings = apply_overrides(settings, descending, draw_label);
            let settings = match log_file {
                Some(path) => settings.with_log_file(path),
                None => settings,
            };
            run_play(&settings, config_path.as_deref())
        }
        Command::Replay {
            format,
            descending,
            draw_label,
            script,
        } => {
            let settings = apply_overrides(settings, descending, draw_label);
            initialize_stderr_tracing(&settings);
            debug!(config = ?config_path, ?settings, "Settings resolved");

            let game = Game::new().with_order(settings.sort_order());
            let output = replay(script.as_slice(), game, &settings.view_options(), format)?;
            print!("{}", output);
            Ok(())
        }
    }
}

/// Command-line flags win over file settings.
fn apply_overrides(settings: Settings, descending: bool, draw_label: Option<String>) -> Settings {
    let settings = if descending {
        settings.with_descending(true)
    } else {
        settings
    };
    match draw_label {
        Some(label) => settings.with_draw_label(label),
        None => settings,
    }
}

/// Run the interactive terminal game
#[instrument(skip_all, fields(log_file = %settings.log_file().display()))]
fn run_play(settings: &Settings, config_path: Option<&Path>) -> Result<()> {
    initialize_file_tracing(settings.log_file(), settings)?;
    debug!(config = ?config_path, ?settings, "Settings resolved");
    run_tui(settings)
}

/// Logs to a file so output doesn't interfere with the TUI.
fn initialize_file_tracing(path: &Path, settings: &Settings) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(path = %path.display(), "File tracing initialized");
    Ok(())
}

fn initialize_stderr_tracing(settings: &Settings) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Filter used while settings load: `RUST_LOG`, else warnings only.
fn bootstrap_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// `RUST_LOG` wins over the configured filter.
fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.log_filter()))
}
