//! Application state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use strictly_tictactoe::{Game, GameView, MoveOutcome, Position, ViewOptions};
use tracing::{debug, instrument, warn};

use crate::config::Settings;
use crate::input::{digit_position, move_cursor};

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Arrow keys move the board cursor.
    Board,
    /// Arrow keys move the move list selection.
    Moves,
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Redraw and keep reading keys.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Main application state.
///
/// Owns the game exclusively; every key maps to at most one game
/// transition, after which the view is rendered again.
#[derive(Debug, Clone)]
pub struct App {
    game: Game,
    options: ViewOptions,
    cursor: Position,
    focus: Focus,
    selected_step: usize,
}

impl App {
    /// Creates a new application from settings.
    #[instrument(skip(settings))]
    pub fn new(settings: &Settings) -> Self {
        Self {
            game: Game::new().with_order(settings.sort_order()),
            options: settings.view_options(),
            cursor: Position::Center,
            focus: Focus::Board,
            selected_step: 0,
        }
    }

    /// Gets the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Focused panel.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Step highlighted in the move list.
    pub fn selected_step(&self) -> usize {
        self.selected_step
    }

    /// Renders the view for the current state.
    pub fn view(&self) -> GameView {
        GameView::render(&self.game, &self.options)
    }

    /// Handles one key event.
    #[instrument(skip(self), fields(focus = ?self.focus))]
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind != KeyEventKind::Press {
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                debug!("Quit requested");
                return AppAction::Quit;
            }
            KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
            KeyCode::Char('s') => self.game.toggle_sort(),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(pos) = digit_position(c) {
                    self.cursor = pos;
                    self.play(pos);
                }
            }
            code => match self.focus {
                Focus::Board => self.handle_board_key(code),
                Focus::Moves => self.handle_moves_key(code),
            },
        }
        AppAction::Continue
    }

    fn handle_board_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
            code => self.cursor = move_cursor(self.cursor, code),
        }
    }

    fn handle_moves_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Home => self.select_row(0),
            KeyCode::End => self.select_row(usize::MAX),
            KeyCode::Enter | KeyCode::Char(' ') => self.jump(self.selected_step),
            _ => {}
        }
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Board => {
                self.selected_step = self.game.step();
                Focus::Moves
            }
            Focus::Moves => Focus::Board,
        };
        debug!(focus = ?self.focus, "Focus switched");
    }

    /// Moves the selection by `delta` rows in display order.
    fn move_selection(&mut self, delta: isize) {
        let view = self.view();
        let row = view
            .moves
            .iter()
            .position(|entry| entry.step == self.selected_step)
            .unwrap_or(0);
        self.select_row(row.saturating_add_signed(delta));
    }

    /// Selects the row at `row`, clamped to the list.
    fn select_row(&mut self, row: usize) {
        let view = self.view();
        let last = view.moves.len().saturating_sub(1);
        if let Some(entry) = view.moves.get(row.min(last)) {
            self.selected_step = entry.step;
        }
    }

    fn play(&mut self, pos: Position) {
        match self.game.play(pos) {
            MoveOutcome::Applied { step } => self.selected_step = step,
            MoveOutcome::Ignored(reason) => debug!(%reason, "Move ignored"),
        }
    }

    fn jump(&mut self, step: usize) {
        if let Err(e) = self.game.jump_to(step) {
            warn!(error = %e, "Jump rejected");
        }
    }
}
