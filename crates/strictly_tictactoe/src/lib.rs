//! Pure tic-tac-toe game logic with move history and time travel.
//!
//! # Architecture
//!
//! - **Rules**: pure win and draw detection over a single [`Board`]
//! - **History**: board snapshots, truncated when play branches from an earlier step
//! - **Game**: the state machine driving moves, jumps, and move list order
//! - **View**: a pure [`GameView`] rendered from the game after each transition
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Game, GameView, Position, ViewOptions};
//!
//! let mut game = Game::new();
//! game.play(Position::Center);
//! game.play(Position::TopLeft);
//! game.jump_to(1)?;
//! game.play(Position::BottomRight);
//!
//! assert_eq!(game.history().len(), 3);
//! let view = GameView::render(&game, &ViewOptions::default());
//! assert_eq!(view.status_line, "Next player: X");
//! # Ok::<(), strictly_tictactoe::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod history;
mod invariants;
mod position;
pub mod rules;
mod types;
mod view;

#[cfg(kani)]
mod verification;

pub use action::{GameError, IgnoredReason, MoveOutcome};
pub use game::{FINAL_STEP, Game, GameStatus, SortOrder};
pub use history::History;
pub use invariants::{
    AlternatingMarkInvariant, CursorInBoundsInvariant, EmptyRootInvariant, GameInvariants,
    Invariant, InvariantSet, InvariantViolation, SingleCellDeltaInvariant,
};
pub use position::Position;
pub use rules::{WinningLine, check_winner};
pub use types::{Board, Player, Square};
pub use view::{CellView, DEFAULT_DRAW_LABEL, GameView, MoveEntry, ViewOptions};
