//! Pure view model rendered from the current game state.
//!
//! Every front end draws a [`GameView`] instead of reading [`Game`]
//! directly. Rendering is a pure function of the game and the display
//! options, so it is called again after each transition.

use super::game::{Game, GameStatus, SortOrder};
use super::{Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Label used when a full board has no winner.
pub const DEFAULT_DRAW_LABEL: &str = "Draw";

/// Display options that don't affect game rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Status text for a draw. Purely cosmetic.
    pub draw_label: String,
    /// Whether the winning line is marked in [`CellView::highlighted`].
    pub highlight_winner: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            draw_label: DEFAULT_DRAW_LABEL.to_string(),
            highlight_winner: true,
        }
    }
}

/// One board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Where the cell is.
    pub position: Position,
    /// Mark in the cell.
    pub mark: Option<Player>,
    /// Part of the winning line.
    pub highlighted: bool,
}

/// One row of the move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    /// History step this row jumps to.
    pub step: usize,
    /// Cell played to reach `step`; `None` for the game start.
    pub position: Option<Position>,
    /// Button text, e.g. `Go to move #3 (2, 1)`.
    pub label: String,
    /// The cursor is at this step.
    pub current: bool,
}

/// Everything a front end needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Cursor step.
    pub step: usize,
    /// Status at the cursor.
    pub status: GameStatus,
    /// Status text, e.g. `Next player: X`.
    pub status_line: String,
    /// Cells in row-major order.
    pub cells: [CellView; 9],
    /// Move list in display order.
    pub moves: Vec<MoveEntry>,
    /// Current move list order.
    pub order: SortOrder,
    /// Text for the sort toggle.
    pub sort_toggle_label: String,
}

impl GameView {
    /// Renders the view for the board at the cursor.
    #[instrument(skip(game, options), fields(step = game.step()))]
    pub fn render(game: &Game, options: &ViewOptions) -> Self {
        let status = game.status();
        let board = game.board();
        let line = match status {
            GameStatus::Won(line) if options.highlight_winner => Some(line),
            _ => None,
        };

        let cells = Position::ALL.map(|position| CellView {
            position,
            mark: board.get(position).mark(),
            highlighted: line.is_some_and(|l| l.contains(position)),
        });

        let mut moves: Vec<MoveEntry> = (0..game.history().len())
            .map(|step| {
                let position = game.history().changed_cell(step);
                MoveEntry {
                    step,
                    position,
                    label: move_label(step, position),
                    current: step == game.step(),
                }
            })
            .collect();
        if game.order() == SortOrder::Descending {
            moves.reverse();
        }

        Self {
            step: game.step(),
            status,
            status_line: status_line(status, options),
            cells,
            moves,
            order: game.order(),
            sort_toggle_label: format!("Change sort to {}", game.order().toggled().label()),
        }
    }

    /// Cell at `pos`.
    pub fn cell(&self, pos: Position) -> &CellView {
        &self.cells[pos.index()]
    }

    /// Index into [`GameView::moves`] of the row for the cursor step.
    pub fn current_row(&self) -> Option<usize> {
        self.moves.iter().position(|entry| entry.current)
    }
}

fn status_line(status: GameStatus, options: &ViewOptions) -> String {
    match status {
        GameStatus::Won(line) => format!("Winner: {}", line.player),
        GameStatus::Draw => options.draw_label.clone(),
        GameStatus::InProgress { next } => format!("Next player: {}", next),
    }
}

fn move_label(step: usize, position: Option<Position>) -> String {
    match position {
        Some(pos) if step > 0 => {
            let (row, col) = pos.coordinates();
            format!("Go to move #{} ({}, {})", step, row, col)
        }
        _ => "Go to game start".to_string(),
    }
}

impl std::fmt::Display for GameView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(3) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| {
                    let mark = cell.mark.map_or(".".to_string(), |p| p.to_string());
                    if cell.highlighted {
                        format!("[{}]", mark)
                    } else {
                        format!(" {} ", mark)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.status_line)?;
        writeln!(f, "{}", self.sort_toggle_label)?;
        for entry in &self.moves {
            let marker = if entry.current { ">" } else { " " };
            writeln!(f, "{} {}. {}", marker, entry.step, entry.label)?;
        }
        Ok(())
    }
}
