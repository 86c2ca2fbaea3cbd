//! Command-line interface for strictly_tictactoe_tui.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::replay::OutputFormat;

/// Tic-tac-toe with move history and time travel
#[derive(Parser, Debug)]
#[command(name = "strictly_tictactoe")]
#[command(about = "Tic-tac-toe with move history and time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Show the move list latest-first
        #[arg(long)]
        descending: bool,

        /// Status text for a drawn game
        #[arg(long)]
        draw_label: Option<String>,

        /// Write logs here instead of the configured file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Apply a script of moves, jumps, and sort toggles, then print the view
    Replay {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Show the move list latest-first
        #[arg(long)]
        descending: bool,

        /// Status text for a drawn game
        #[arg(long)]
        draw_label: Option<String>,

        /// Script tokens: 0-8 play a cell, jN jumps to step N, s toggles sort
        #[arg(required = true)]
        script: Vec<String>,
    },
}
