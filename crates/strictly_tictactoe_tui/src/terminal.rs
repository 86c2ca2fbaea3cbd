//! Terminal setup and the blocking event loop.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tracing::{error, info, instrument};

use crate::app::{App, AppAction};
use crate::config::Settings;
use crate::ui;

/// Runs the interactive game until the user quits.
///
/// The terminal is restored even when setup or the loop fails.
#[instrument(skip(settings))]
pub fn run_tui(settings: &Settings) -> Result<()> {
    info!("Starting Strictly Tic-Tac-Toe TUI");

    let guard = TerminalGuard::enter(enter_terminal, restore_terminal)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(settings);
    let res = run_loop(&mut terminal, &mut app);
    drop(guard);

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(
        step = app.game().step(),
        history = app.game().history().len(),
        "TUI exited"
    );
    res
}

/// Restores the terminal when dropped, including on early returns.
struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    /// Runs `enter`; if it fails partway, `restore` still runs.
    fn enter(enter: fn() -> io::Result<()>, restore: fn() -> io::Result<()>) -> io::Result<Self> {
        let guard = Self { restore };
        enter()?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = (self.restore)() {
            error!(error = %err, "Failed to restore terminal");
        }
    }
}

fn enter_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()?
            && app.handle_key(key) == AppAction::Quit
        {
            info!("User quit");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static FAILED_SETUP_RESTORES: AtomicUsize = AtomicUsize::new(0);
    static NORMAL_EXIT_RESTORES: AtomicUsize = AtomicUsize::new(0);

    fn no_tty() -> io::Result<()> {
        Err(io::Error::other("not a terminal"))
    }

    fn entered() -> io::Result<()> {
        Ok(())
    }

    fn count_failed_setup() -> io::Result<()> {
        FAILED_SETUP_RESTORES.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn count_normal_exit() -> io::Result<()> {
        NORMAL_EXIT_RESTORES.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        assert!(TerminalGuard::enter(no_tty, count_failed_setup).is_err());
        assert_eq!(FAILED_SETUP_RESTORES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_restores_once_on_drop() {
        let guard = TerminalGuard::enter(entered, count_normal_exit).expect("enter");
        assert_eq!(NORMAL_EXIT_RESTORES.load(Ordering::SeqCst), 0);
        drop(guard);
        assert_eq!(NORMAL_EXIT_RESTORES.load(Ordering::SeqCst), 1);
    }
}
