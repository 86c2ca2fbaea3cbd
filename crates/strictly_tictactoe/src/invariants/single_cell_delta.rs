//! Single cell delta invariant: each step plays exactly one square.

use super::super::{Game, Square};
use super::Invariant;

/// Invariant: for step > 0, `History[step]` differs from `History[step - 1]`
/// in exactly one cell, and that cell was empty before.
pub struct SingleCellDeltaInvariant;

impl Invariant<Game> for SingleCellDeltaInvariant {
    fn holds(game: &Game) -> bool {
        game.history().snapshots().windows(2).all(|pair| {
            let changed = pair[0].diff(&pair[1]);
            changed.len() == 1 && pair[0].get(changed[0]) == Square::Empty
        })
    }

    fn description() -> &'static str {
        "Consecutive snapshots differ by exactly one newly marked square"
    }
}
