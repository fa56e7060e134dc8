//! Event Handling
//!
//! Keyboard handling for cmedit.

use crate::app::{App, Mode};
use anyhow::Result;
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Handle events, returns true if app should quit
pub fn handle_events(app: &mut App) -> Result<bool> {
    if poll(Duration::from_millis(100))? {
        if let Event::Key(key) = read()? {
            if key.kind == KeyEventKind::Release {
                return Ok(false);
            }
            return Ok(handle_key_event(app, key.code, key.modifiers));
        }
    }
    Ok(false)
}

pub fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    // Global quit shortcuts
    if modifiers.contains(KeyModifiers::CONTROL)
        && matches!(code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        return true;
    }

    match app.mode {
        Mode::Edit => handle_edit_mode(app, code, modifiers),
        Mode::Help => handle_help_mode(app, code),
    }
    false
}

fn handle_edit_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('l') => app.load(),
            KeyCode::Char('s') => app.save(),
            KeyCode::Char('n') => app.add_header_row(),
            KeyCode::Char('d') => app.remove_focused_header_row(),
            _ => {},
        }
        return;
    }

    match code {
        KeyCode::F(1) => app.enter_help_mode(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Enter => app.enter(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {},
    }
}

fn handle_help_mode(app: &mut App, code: KeyCode) {
    if matches!(code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter | KeyCode::Char('q')) {
        app.exit_help_mode();
    }
}
