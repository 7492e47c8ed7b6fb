use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Status;
use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_picker(app: &mut App, key: KeyEvent) {
    let Some(picker) = &mut app.picker else {
        app.mode = Mode::Navigate;
        return;
    };
    let last = Status::ALL.len() - 1;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => picker.cursor = (picker.cursor + 1).min(last),
        KeyCode::Char('k') | KeyCode::Up => picker.cursor = picker.cursor.saturating_sub(1),
        KeyCode::Enter => {
            let status = Status::ALL[picker.cursor.min(last)];
            pick_status(app, status);
        }
        KeyCode::Char(c @ '1'..='7') => {
            let idx = c as usize - '1' as usize;
            pick_status(app, Status::ALL[idx]);
        }
        KeyCode::Esc => close_picker(app),
        _ => {}
    }
}

/// Apply a status to the item the picker was opened for
pub(super) fn pick_status(app: &mut App, status: Status) {
    if let Some(picker) = app.picker.take() {
        set_status(app, picker.item, status);
    }
    app.mode = Mode::Navigate;
}

pub(super) fn close_picker(app: &mut App) {
    app.picker = None;
    app.mode = Mode::Navigate;
}
