//! Cursor invariant: the step always addresses a snapshot.

use super::super::Game;
use super::Invariant;

/// Invariant: `step < History.len()`.
pub struct CursorInBoundsInvariant;

impl Invariant<Game> for CursorInBoundsInvariant {
    fn holds(game: &Game) -> bool {
        game.step() < game.history().len()
    }

    fn description() -> &'static str {
        "Cursor addresses an existing snapshot"
    }
}
