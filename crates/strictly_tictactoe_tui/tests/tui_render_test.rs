//! Renders the TUI into ratatui's test backend and checks the screen text.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use strictly_tictactoe_tui::{App, Settings, ui};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).expect("terminal");
    terminal.draw(|f| ui::draw(f, app)).expect("draw");

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_initial_screen() {
    let app = App::new(&Settings::default());
    let text = screen(&app);
    assert!(text.contains("Strictly Tic-Tac-Toe"));
    assert!(text.contains("Next player: X"));
    assert!(text.contains("Change sort to descending"));
    assert!(text.contains("0. Go to game start"));
}

#[test]
fn test_moves_appear_in_list_and_board() {
    let mut app = App::new(&Settings::default());
    press(&mut app, KeyCode::Char('5'));
    press(&mut app, KeyCode::Char('1'));
    let text = screen(&app);

    assert!(text.contains("Next player: X"));
    assert!(text.contains("1. Go to move #1 (2, 2)"));
    assert!(text.contains("2. Go to move #2 (1, 1)"));
    assert!(text.contains(" X "));
    assert!(text.contains(" O "));
}

#[test]
fn test_winner_and_descending_list() {
    let mut app = App::new(&Settings::default());
    for c in ['1', '4', '2', '5', '3'] {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Char('s'));
    let text = screen(&app);

    assert!(text.contains("Winner: X"));
    assert!(text.contains("Change sort to ascending"));
    let latest = text.find("5. Go to move #5").expect("latest move listed");
    let start = text.find("0. Go to game start").expect("start listed");
    assert!(latest < start, "descending order puts the latest move first");
}

#[test]
fn test_custom_draw_label() {
    let settings = Settings::default().with_draw_label("You both lost".to_string());
    let mut app = App::new(&settings);
    // X O X / X O O / O X X
    for c in ['1', '2', '3', '5', '4', '6', '8', '7', '9'] {
        press(&mut app, KeyCode::Char(c));
    }
    let text = screen(&app);
    assert!(text.contains("You both lost"));
}
