//! Alternating mark invariant: odd steps are X, even steps are O.

use super::super::{Game, Player};
use super::Invariant;

/// Invariant: the square played to reach step `k` holds X when `k` is odd
/// and O when `k` is even.
///
/// Together with parity-derived turns this makes "whose move" independent
/// of the path taken through history.
pub struct AlternatingMarkInvariant;

impl Invariant<Game> for AlternatingMarkInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();
        (1..history.len()).all(|step| {
            let expected = Player::for_step(step - 1);
            match (history.changed_cell(step), history.get(step)) {
                (Some(pos), Some(board)) => board.get(pos).mark() == Some(expected),
                _ => false,
            }
        })
    }

    fn description() -> &'static str {
        "Players alternate marks (X, O, X, O, ...)"
    }
}
