//! Kani proof harnesses for the win detector.
//!
//! Run with `cargo kani -p strictly_tictactoe`.

use crate::rules::{LINES, check_winner};
use crate::{Board, Player, Position, Square};

fn any_square() -> Square {
    match kani::any::<u8>() % 3 {
        0 => Square::Empty,
        1 => Square::Occupied(Player::X),
        _ => Square::Occupied(Player::O),
    }
}

fn any_board() -> Board {
    Board::from_squares([
        any_square(),
        any_square(),
        any_square(),
        any_square(),
        any_square(),
        any_square(),
        any_square(),
        any_square(),
        any_square(),
    ])
}

/// A reported line is always uniformly marked by the reported player.
#[kani::proof]
#[kani::unwind(10)]
fn verify_reported_line_is_uniform() {
    let board = any_board();
    if let Some(line) = check_winner(&board) {
        for pos in line.cells {
            assert_eq!(board.get(pos), Square::Occupied(line.player));
        }
    }
}

/// No winner means no line is uniformly marked.
#[kani::proof]
#[kani::unwind(10)]
fn verify_no_winner_means_no_line() {
    let board = any_board();
    if check_winner(&board).is_none() {
        for [a, b, c] in LINES {
            let sq = board.get(a);
            assert!(sq == Square::Empty || sq != board.get(b) || sq != board.get(c));
        }
    }
}

/// The reported line is the first complete one in check order.
#[kani::proof]
#[kani::unwind(10)]
fn verify_first_line_wins() {
    let board = any_board();
    if let Some(line) = check_winner(&board) {
        let first = LINES
            .iter()
            .position(|cells| *cells == line.cells)
            .expect("reported line is a known line");
        for earlier in &LINES[..first] {
            let marks: [Option<Player>; 3] = earlier.map(|p: Position| board.get(p).mark());
            assert!(marks[0].is_none() || marks[0] != marks[1] || marks[0] != marks[2]);
        }
    }
}
