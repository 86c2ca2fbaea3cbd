//! Empty root invariant: the first snapshot is the empty board.

use super::super::{Board, Game};
use super::Invariant;

/// Invariant: `History[0]` is the empty board.
pub struct EmptyRootInvariant;

impl Invariant<Game> for EmptyRootInvariant {
    fn holds(game: &Game) -> bool {
        game.history().get(0) == Some(&Board::new())
    }

    fn description() -> &'static str {
        "History starts at the empty board"
    }
}
