use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::tui::app::{App, ConfirmAction, Mode};

use super::*;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let state = app.confirm.take();
            app.mode = Mode::Navigate;
            if let Some(state) = state {
                match state.action {
                    ConfirmAction::DeleteProject(name) => delete_project(app, &name),
                    ConfirmAction::LoadBackup(store) => confirm_load(app, *store),
                }
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn confirm_load(app: &mut App, store: crate::model::ProjectStore) {
    app.store.replace_all(store);
    app.cursor = 0;
    app.persist();
    info!(projects = app.store.len(), "projects replaced from backup");
    app.notifier.success("Projects loaded successfully");
}
