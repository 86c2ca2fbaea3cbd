//! Game state machine: moves, time travel, and move list order.

use super::action::{GameError, IgnoredReason, MoveOutcome};
use super::history::{History, HistoryRecord};
use super::invariants::{GameInvariants, InvariantSet, assert_invariants};
use super::rules::{self, WinningLine};
use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Display order of the move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Game start first.
    #[default]
    Ascending,
    /// Latest move first.
    Descending,
}

impl SortOrder {
    /// The other order.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Lowercase name for display.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// Status of the board at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No winner yet and moves remain.
    InProgress {
        /// Player to move.
        next: Player,
    },
    /// A line is complete.
    Won(WinningLine),
    /// Cursor at step 9 with no winner.
    Draw,
}

/// Step at which every square is filled.
pub const FINAL_STEP: usize = 9;

/// Tic-tac-toe game with full move history.
///
/// The cursor (`step`) selects which snapshot is displayed and whose turn
/// it is. Playing from an earlier step discards the snapshots after it.
///
/// Deserialization checks [`GameInvariants`] and rejects any state that
/// `play` and `jump_to` could not have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct Game {
    history: History,
    step: usize,
    order: SortOrder,
}

impl Game {
    /// Creates a new game at the empty board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: History::new(),
            step: 0,
            order: SortOrder::default(),
        }
    }

    /// Sets the initial move list order.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns the snapshot history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current cursor step.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Move list order.
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Board at the cursor.
    pub fn board(&self) -> &Board {
        &self.history.snapshots()[self.step]
    }

    /// Player to move at the cursor.
    pub fn next_player(&self) -> Player {
        Player::for_step(self.step)
    }

    /// Winning line on the board at the cursor.
    pub fn winner(&self) -> Option<WinningLine> {
        rules::check_winner(self.board())
    }

    /// Status at the cursor. A win takes precedence over a full board.
    #[instrument(skip(self), fields(step = self.step))]
    pub fn status(&self) -> GameStatus {
        if let Some(line) = self.winner() {
            GameStatus::Won(line)
        } else if self.step == FINAL_STEP {
            GameStatus::Draw
        } else {
            GameStatus::InProgress {
                next: self.next_player(),
            }
        }
    }

    /// Empty squares on the board at the cursor, none once the game is won.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.winner().is_some() {
            return Vec::new();
        }
        self.board().empty_positions()
    }

    /// Marks `pos` for the player to move.
    ///
    /// Ignored if the board at the cursor has a winner or `pos` is taken.
    /// Otherwise later snapshots are discarded, the new board is appended,
    /// and the cursor moves to it.
    #[instrument(skip(self), fields(step = self.step))]
    pub fn play(&mut self, pos: Position) -> MoveOutcome {
        if self.winner().is_some() {
            debug!("Ignoring move: game already won");
            return MoveOutcome::Ignored(IgnoredReason::GameOver);
        }
        if !self.board().is_empty(pos) {
            debug!("Ignoring move: square occupied");
            return MoveOutcome::Ignored(IgnoredReason::SquareOccupied(pos));
        }

        let player = self.next_player();
        let board = self.board().with_mark(pos, player);
        self.step = self.history.branch(self.step, board);
        info!(%player, position = %pos, step = self.step, "Move applied");

        assert_invariants(self);
        MoveOutcome::Applied { step: self.step }
    }

    /// Like [`Game::play`], addressing the cell by index.
    #[instrument(skip(self))]
    pub fn play_index(&mut self, index: usize) -> Result<MoveOutcome, GameError> {
        let pos = Position::from_index(index).ok_or(GameError::InvalidCell(index))?;
        Ok(self.play(pos))
    }

    /// Moves the cursor to `step` without touching history.
    #[instrument(skip(self), fields(from = self.step))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), GameError> {
        let last = self.history.last_step();
        if step > last {
            return Err(GameError::StepOutOfRange { step, last });
        }
        self.step = step;
        debug!(next = %self.next_player(), "Cursor moved");

        assert_invariants(self);
        Ok(())
    }

    /// Flips the move list order.
    #[instrument(skip(self))]
    pub fn toggle_sort(&mut self) {
        self.order = self.order.toggled();
        debug!(order = self.order.label(), "Sort order toggled");
    }
}

/// Serialized shape of a [`Game`], not yet validated.
#[derive(Debug, Deserialize)]
struct GameRecord {
    history: HistoryRecord,
    step: usize,
    order: SortOrder,
}

impl TryFrom<GameRecord> for Game {
    type Error = GameError;

    #[instrument(skip(record), fields(step = record.step))]
    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let game = Self {
            history: record.history.into(),
            step: record.step,
            order: record.order,
        };
        if let Err(violations) = GameInvariants::check_all(&game) {
            for violation in &violations {
                warn!(%violation, "Rejecting restored game");
            }
            return Err(GameError::InvalidState(violations));
        }
        Ok(game)
    }
}

#[cfg(test)]
impl Game {
    /// Assembles a game from raw parts, bypassing every check.
    pub(crate) fn from_parts(history: History, step: usize) -> Self {
        Self {
            history,
            step,
            order: SortOrder::default(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(game: &mut Game, cells: &[usize]) {
        for cell in cells {
            let outcome = game.play_index(*cell).expect("valid cell");
            assert!(outcome.is_applied(), "move {} was ignored", cell);
        }
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.step(), 0);
        assert_eq!(game.next_player(), Player::X);
        assert_eq!(game.winner(), None);
        assert_eq!(game.status(), GameStatus::InProgress { next: Player::X });
    }

    #[test]
    fn test_play_alternates_players() {
        let mut game = Game::new();
        play_all(&mut game, &[4]);
        assert_eq!(game.board().get(Position::Center).mark(), Some(Player::X));
        assert_eq!(game.next_player(), Player::O);
        play_all(&mut game, &[0]);
        assert_eq!(game.board().get(Position::TopLeft).mark(), Some(Player::O));
        assert_eq!(game.next_player(), Player::X);
    }

    #[test]
    fn test_occupied_square_is_ignored() {
        let mut game = Game::new();
        play_all(&mut game, &[4]);
        let before = game.clone();

        let outcome = game.play(Position::Center);

        assert_eq!(
            outcome,
            MoveOutcome::Ignored(IgnoredReason::SquareOccupied(Position::Center))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_move_after_win_is_ignored() {
        let mut game = Game::new();
        play_all(&mut game, &[0, 3, 1, 4, 2]);
        assert!(matches!(game.status(), GameStatus::Won(line) if line.player == Player::X));
        let before = game.clone();

        assert_eq!(
            game.play(Position::BottomRight),
            MoveOutcome::Ignored(IgnoredReason::GameOver)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_invalid_cell_index() {
        let mut game = Game::new();
        assert_eq!(game.play_index(9), Err(GameError::InvalidCell(9)));
        assert_eq!(game.step(), 0);
    }

    #[test]
    fn test_jump_then_play_truncates() {
        let mut game = Game::new();
        play_all(&mut game, &[4, 0, 8, 2]);
        assert_eq!(game.history().len(), 5);

        game.jump_to(1).expect("jump");
        assert_eq!(game.next_player(), Player::O);
        play_all(&mut game, &[6]);

        assert_eq!(game.history().len(), 3);
        assert_eq!(game.step(), 2);
        assert_eq!(game.history().changed_cell(2), Some(Position::BottomLeft));
    }

    #[test]
    fn test_jump_out_of_range_leaves_state() {
        let mut game = Game::new();
        play_all(&mut game, &[4]);
        let before = game.clone();
        assert_eq!(
            game.jump_to(2),
            Err(GameError::StepOutOfRange { step: 2, last: 1 })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_jump_keeps_future_until_next_move() {
        let mut game = Game::new();
        play_all(&mut game, &[4, 0, 8]);
        game.jump_to(0).expect("jump");
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.history().len(), 4);
        game.jump_to(3).expect("jump");
        assert_eq!(game.next_player(), Player::O);
    }

    #[test]
    fn test_toggle_sort_does_not_touch_state() {
        let mut game = Game::new();
        play_all(&mut game, &[4]);
        let history = game.history().clone();
        game.toggle_sort();
        assert_eq!(game.order(), SortOrder::Descending);
        assert_eq!(game.history(), &history);
        assert_eq!(game.step(), 1);
        game.toggle_sort();
        assert_eq!(game.order(), SortOrder::Ascending);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut game = Game::new();
        // X O X / X O O / O X X
        play_all(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(game.step(), FINAL_STEP);
        assert_eq!(game.status(), GameStatus::Draw);
        assert!(game.valid_moves().is_empty());
    }

    #[test]
    fn test_ninth_move_win_is_not_a_draw() {
        let mut game = Game::new();
        // X O X / O X O / O X X, X completes the 0-4-8 diagonal last.
        play_all(&mut game, &[0, 1, 2, 3, 4, 5, 7, 6, 8]);
        assert_eq!(game.step(), FINAL_STEP);
        match game.status() {
            GameStatus::Won(line) => {
                assert_eq!(line.player, Player::X);
                assert_eq!(
                    line.cells,
                    [Position::TopLeft, Position::Center, Position::BottomRight]
                );
            }
            other => panic!("expected win, got {:?}", other),
        }
    }

    #[test]
    fn test_restore_round_trips_valid_game() {
        let mut game = Game::new().with_order(SortOrder::Descending);
        play_all(&mut game, &[4, 0, 8]);
        game.jump_to(1).expect("jump");

        let json = serde_json::to_string(&game).expect("serialize");
        let restored: Game = serde_json::from_str(&json).expect("restore");
        assert_eq!(restored, game);
    }

    #[test]
    fn test_restore_rejects_cursor_past_history() {
        let mut value = serde_json::to_value(Game::new()).expect("serialize");
        value["step"] = serde_json::json!(5);

        let err = serde_json::from_value::<Game>(value).expect_err("cursor out of bounds");
        assert!(err.to_string().contains("violates 1 invariant"));
    }

    #[test]
    fn test_restore_rejects_empty_history() {
        let mut value = serde_json::to_value(Game::new()).expect("serialize");
        value["history"]["snapshots"] = serde_json::json!([]);

        assert!(serde_json::from_value::<Game>(value).is_err());
    }

    #[test]
    fn test_restore_rejects_tampered_snapshot() {
        let mut game = Game::new();
        play_all(&mut game, &[4]);
        let mut value = serde_json::to_value(&game).expect("serialize");
        // Step 1 now holds an O where X moved.
        let tampered = Board::new().with_mark(Position::Center, Player::O);
        value["history"]["snapshots"][1] = serde_json::to_value(tampered).expect("board");

        assert!(serde_json::from_value::<Game>(value).is_err());
    }
}
