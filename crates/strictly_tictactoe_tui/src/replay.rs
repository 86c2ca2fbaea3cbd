//! Headless replay of scripted transitions.
//!
//! A script is a list of tokens: a cell index `0`-`8` or a cell label such
//! as `center` or `top-left` plays that cell, `jN` or `jump:N` jumps to step
//! `N`, and `s` or `sort` toggles the move list order. Tokens may be
//! separated by whitespace or commas.

use derive_more::Display;
use std::str::FromStr;
use strictly_tictactoe::{Game, GameError, GameView, MoveOutcome, Position, ViewOptions};
use tracing::{debug, info, instrument};

/// One scripted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Play the cell.
    Play(Position),
    /// Move the cursor to a step.
    Jump(usize),
    /// Flip the move list order.
    ToggleSort,
}

/// Script parse or execution failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ScriptError {
    /// Token is not a cell, jump, or sort command.
    #[display("Unrecognized script token '{}'", _0)]
    UnknownToken(String),

    /// Token names a cell or step the game rejects.
    #[display("Script command #{} failed: {}", index, source)]
    Game {
        /// Zero-based command index.
        index: usize,
        /// Underlying game error.
        source: GameError,
    },
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Game { source, .. } => Some(source),
            ScriptError::UnknownToken(_) => None,
        }
    }
}

impl FromStr for ScriptCommand {
    type Err = ScriptError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unknown = || ScriptError::UnknownToken(token.to_string());
        let lower = token.trim().to_lowercase();

        if lower == "s" || lower == "sort" {
            return Ok(ScriptCommand::ToggleSort);
        }
        if let Some(step) = lower.strip_prefix("jump:").or_else(|| lower.strip_prefix('j')) {
            return step
                .parse::<usize>()
                .map(ScriptCommand::Jump)
                .map_err(|_| unknown());
        }
        Position::from_label_or_number(&lower)
            .map(ScriptCommand::Play)
            .ok_or_else(unknown)
    }
}

/// Splits raw arguments into commands.
#[instrument(skip(args))]
pub fn parse_script<S: AsRef<str>>(args: &[S]) -> Result<Vec<ScriptCommand>, ScriptError> {
    args.iter()
        .flat_map(|arg| {
            arg.as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .map(|token| token.parse())
        .collect()
}

/// Applies commands in order. Ignored moves are not errors.
#[instrument(skip(game, commands), fields(count = commands.len()))]
pub fn run_script(game: &mut Game, commands: &[ScriptCommand]) -> Result<(), ScriptError> {
    for (index, command) in commands.iter().enumerate() {
        match *command {
            ScriptCommand::Play(pos) => match game.play(pos) {
                MoveOutcome::Applied { step } => debug!(index, %pos, step, "Played"),
                MoveOutcome::Ignored(reason) => debug!(index, %pos, %reason, "Move ignored"),
            },
            ScriptCommand::Jump(step) => game
                .jump_to(step)
                .map_err(|source| ScriptError::Game { index, source })?,
            ScriptCommand::ToggleSort => game.toggle_sort(),
        }
    }
    info!(step = game.step(), history = game.history().len(), "Script finished");
    Ok(())
}

/// Output encoding for the final view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable board, status, and move list.
    #[default]
    Text,
    /// Pretty-printed JSON of the view.
    Json,
}

/// Parses `args`, replays them on a fresh game, and renders the result.
#[instrument(skip(args, game, options))]
pub fn replay<S: AsRef<str>>(
    args: &[S],
    game: Game,
    options: &ViewOptions,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let commands = parse_script(args)?;
    let mut game = game;
    run_script(&mut game, &commands)?;

    let view = GameView::render(&game, options);
    let output = match format {
        OutputFormat::Text => view.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&view)?,
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_tictactoe::{GameStatus, Player};

    #[test]
    fn test_parse_tokens() {
        let commands = parse_script(&["4,0", "j1 s", "jump:0", "8"]).expect("parse");
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Play(Position::Center),
                ScriptCommand::Play(Position::TopLeft),
                ScriptCommand::Jump(1),
                ScriptCommand::ToggleSort,
                ScriptCommand::Jump(0),
                ScriptCommand::Play(Position::BottomRight),
            ]
        );
    }

    #[test]
    fn test_parse_cell_labels() {
        let commands = parse_script(&["Center, top-left", "BOTTOM-RIGHT"]).expect("parse");
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Play(Position::Center),
                ScriptCommand::Play(Position::TopLeft),
                ScriptCommand::Play(Position::BottomRight),
            ]
        );
        assert_eq!(
            parse_script(&["middle"]),
            Err(ScriptError::UnknownToken("middle".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(
            parse_script(&["9"]),
            Err(ScriptError::UnknownToken("9".to_string()))
        );
        assert_eq!(
            parse_script(&["jx"]),
            Err(ScriptError::UnknownToken("jx".to_string()))
        );
        assert!(parse_script(&["undo"]).is_err());
    }

    #[test]
    fn test_run_script_wins_on_diagonal() {
        let mut game = Game::new();
        let commands = parse_script(&["4 1 0 2 8"]).expect("parse");
        run_script(&mut game, &commands).expect("run");
        assert!(matches!(game.status(), GameStatus::Won(line) if line.player == Player::X));
        assert_eq!(game.history().len(), 6);
    }

    #[test]
    fn test_run_script_ignores_illegal_moves() {
        let mut game = Game::new();
        let commands = parse_script(&["4 4 4"]).expect("parse");
        run_script(&mut game, &commands).expect("run");
        assert_eq!(game.step(), 1);
    }

    #[test]
    fn test_jump_out_of_range_fails() {
        let mut game = Game::new();
        let commands = parse_script(&["4", "j5"]).expect("parse");
        let err = run_script(&mut game, &commands).expect_err("bad jump");
        assert!(matches!(err, ScriptError::Game { index: 1, .. }));
        assert_eq!(game.step(), 1);
    }

    #[test]
    fn test_replay_text_and_json() {
        let options = ViewOptions::default();
        let text = replay(&["4 0", "j1", "8"], Game::new(), &options, OutputFormat::Text)
            .expect("replay");
        assert!(text.contains("Next player: X"));
        assert!(text.contains("> 2. Go to move #2 (3, 3)"));
        assert!(!text.contains("(1, 1)"));

        let json = replay(&["4"], Game::new(), &options, OutputFormat::Json).expect("replay");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["step"], 1);
        assert_eq!(value["status_line"], "Next player: O");
    }
}
