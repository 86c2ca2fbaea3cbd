//! Terminal front end for strictly_tictactoe.
//!
//! # Architecture
//!
//! - **App**: owns the [`Game`](strictly_tictactoe::Game) and maps keys to transitions
//! - **UI**: draws the rendered [`GameView`](strictly_tictactoe::GameView) with ratatui
//! - **Replay**: applies a scripted list of transitions without a terminal
//! - **Config**: TOML settings for display and logging

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
pub mod cli;
mod config;
mod input;
mod replay;
mod terminal;
pub mod ui;

pub use app::{App, AppAction, Focus};
pub use config::{ConfigError, Settings};
pub use input::{digit_position, move_cursor};
pub use replay::{OutputFormat, ScriptCommand, ScriptError, parse_script, replay, run_script};
pub use terminal::run_tui;
