use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::io::{backup, export};
use crate::ops::item_ops;
use crate::ops::project_ops::{self, Renamed};
use crate::tui::app::{App, ConfirmAction, EditField, Mode};
use crate::util::unicode;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(edit) = &mut app.edit else {
        app.mode = Mode::Navigate;
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => commit_edit(app),
        (_, KeyCode::Esc) => cancel_edit(app),
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&edit.buffer, edit.cursor) {
                edit.cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&edit.buffer, edit.cursor) {
                edit.cursor = next;
            }
        }
        (_, KeyCode::Home) => edit.cursor = 0,
        (_, KeyCode::End) => edit.cursor = edit.buffer.len(),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => edit.cursor = 0,
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => edit.cursor = edit.buffer.len(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            edit.buffer.drain(..edit.cursor);
            edit.cursor = 0;
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&edit.buffer, edit.cursor) {
                edit.buffer.drain(prev..edit.cursor);
                edit.cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&edit.buffer, edit.cursor) {
                edit.buffer.drain(edit.cursor..next);
            }
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            // The minutes field only takes digits
            if matches!(edit.field, EditField::Minutes(_)) && !c.is_ascii_digit() {
                return;
            }
            edit.buffer.insert(edit.cursor, c);
            edit.cursor += c.len_utf8();
        }
        _ => {}
    }
}

/// Leave edit mode without applying the buffer
pub(super) fn cancel_edit(app: &mut App) {
    app.edit = None;
    app.mode = Mode::Navigate;
}

/// Apply the buffer to its field and leave edit mode
pub(super) fn commit_edit(app: &mut App) {
    let Some(edit) = app.edit.take() else {
        app.mode = Mode::Navigate;
        return;
    };
    app.mode = Mode::Navigate;
    let project = app.store.current_name().to_string();
    let text = edit.buffer;

    match edit.field {
        EditField::Title(id) => {
            if item_ops::edit_title(&mut app.store, &project, id, &text).is_ok() {
                app.persist();
            }
        }
        EditField::Minutes(id) => {
            // Invalid input leaves the duration as it was
            if let Some(minutes) = item_ops::parse_minutes(&text)
                && item_ops::set_minutes(&mut app.store, &project, id, minutes).is_ok()
            {
                app.persist();
            }
        }
        EditField::NewProject => match project_ops::add_project(&mut app.store, &text) {
            Ok(_) => {
                app.cursor = 0;
                app.persist();
            }
            Err(project_ops::ProjectError::EmptyName) => {}
            Err(err) => app.notifier.error(err.to_string()),
        },
        EditField::RenameProject => {
            match project_ops::rename_project(&mut app.store, &project, &text) {
                Ok(Renamed::Changed) => app.persist(),
                Ok(Renamed::Unchanged) => {}
                Err(err) => app.notifier.error(err.to_string()),
            }
        }
        EditField::SavePath => {
            let Some(path) = path_from(&text) else {
                return;
            };
            match backup::save_backup(&path, &app.store) {
                Ok(()) => app
                    .notifier
                    .success(format!("Saved to {}", path.display())),
                Err(err) => {
                    warn!(%err, "backup failed");
                    app.notifier.error(err.to_string());
                }
            }
        }
        EditField::LoadPath => {
            let Some(path) = path_from(&text) else {
                return;
            };
            // Validate before asking: a bad file never reaches the prompt
            match backup::load_backup(&path) {
                Ok(store) => app.ask_confirm(
                    "This will replace all current projects. Continue?",
                    ConfirmAction::LoadBackup(Box::new(store)),
                ),
                Err(err) => {
                    warn!(%err, path = %path.display(), "backup rejected");
                    app.notifier.error(err.to_string());
                }
            }
        }
        EditField::ExportPath => {
            let Some(path) = path_from(&text) else {
                return;
            };
            match export::export_markdown(&path, &project, app.store.current_items()) {
                Ok(()) => app
                    .notifier
                    .success(format!("Exported to {}", path.display())),
                Err(export::ExportError::Empty) => app
                    .notifier
                    .error(export::ExportError::Empty.to_string()),
                Err(err) => {
                    warn!(%err, "export failed");
                    app.notifier.error("Export failed. Please try again.");
                }
            }
        }
    }
}

fn path_from(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
