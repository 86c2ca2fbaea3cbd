//! Transition results and errors for the game state machine.
//!
//! Illegal moves are not errors: they are ignored, and the reason is
//! reported so callers can log it. Errors are reserved for input that
//! cannot name a board cell or history step at all.

use super::{InvariantViolation, Position};
use serde::{Deserialize, Serialize};

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoredReason {
    /// The displayed board already has a winner.
    #[display("game is already won")]
    GameOver,
    /// The square is already marked.
    #[display("{} is already occupied", _0)]
    SquareOccupied(Position),
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The move was applied; the cursor now points at `step`.
    Applied {
        /// Step of the new snapshot.
        step: usize,
    },
    /// The move was a no-op.
    Ignored(IgnoredReason),
}

impl MoveOutcome {
    /// Whether the move changed the game.
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }
}

/// Input that does not address the board or history.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Cell index outside 0-8.
    #[display("Cell {} is outside the board (must be 0-8)", _0)]
    InvalidCell(usize),

    /// Jump target beyond the last snapshot.
    #[display("Step {} is out of range (last step is {})", step, last)]
    StepOutOfRange {
        /// Requested step.
        step: usize,
        /// Last valid step.
        last: usize,
    },

    /// Restored game state breaks at least one invariant.
    #[display("Restored game violates {} invariant(s)", _0.len())]
    InvalidState(Vec<InvariantViolation>),
}

impl std::error::Error for GameError {}
