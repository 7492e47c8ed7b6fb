use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // Esc only abandons a drag while one is open
    if app.drag.active_item().is_some() {
        if key.code == KeyCode::Esc {
            app.cancel_drag();
        }
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Cursor
        (_, KeyCode::Char('j') | KeyCode::Down) => {
            let len = app.current_items().len();
            if app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => app.cursor = app.cursor.saturating_sub(1),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.current_items().len().saturating_sub(1);
        }

        // Projects
        (_, KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right) => cycle_project(app, 1),
        (_, KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left) => cycle_project(app, -1),
        (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
            switch_to_index(app, c as usize - '1' as usize);
        }
        (_, KeyCode::Char('n')) => start_new_project(app),
        (_, KeyCode::Char('r')) => start_rename_project(app),
        (_, KeyCode::Char('D')) => start_delete_project(app),

        // Items
        (_, KeyCode::Char('a')) => add_item(app),
        (_, KeyCode::Char('e') | KeyCode::Enter) => {
            if let Some(id) = app.selected_id() {
                edit_title(app, id);
            }
        }
        (_, KeyCode::Char('s')) => {
            if let Some(id) = app.selected_id() {
                app.open_picker(id);
            }
        }
        (_, KeyCode::Char('m')) => {
            if let Some(id) = app.selected_id() {
                edit_minutes(app, id);
            }
        }
        (_, KeyCode::Char('x') | KeyCode::Delete) => {
            if let Some(id) = app.selected_id() {
                delete_item(app, id);
            }
        }

        // Files
        (_, KeyCode::Char('S')) => start_save(app),
        (_, KeyCode::Char('L')) => start_load(app),
        (_, KeyCode::Char('E')) => start_export(app),
        _ => {}
    }
}
