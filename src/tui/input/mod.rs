mod actions;
mod confirm;
mod edit;
mod mouse;
mod navigate;
mod picker;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

// Submodules reach each other's helpers through `use super::*;`
#[allow(unused_imports)]
use actions::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use picker::*;

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl+Q quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        app.cancel_drag();
        app.should_quit = true;
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::StatusPick => handle_picker(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

/// Handle a bracketed paste event. Only active in Edit mode; newlines
/// become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode != Mode::Edit || text.is_empty() {
        return;
    }
    let clean = text.replace('\n', " ").replace('\r', "");
    if let Some(edit) = &mut app.edit {
        edit.buffer.insert_str(edit.cursor, &clean);
        edit.cursor += clean.len();
    }
}

/// The window lost focus: any drag in progress is abandoned
pub fn handle_focus_lost(app: &mut App) {
    app.cancel_drag();
}

/// Card positions are stale after a resize
pub fn handle_resize(app: &mut App) {
    app.cancel_drag();
}

/// Shift+letter arrives as either `Char('A')` or `Char('a')` with SHIFT
/// depending on the terminal; fold both into the uppercase form.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

#[cfg(test)]
pub(crate) mod test_keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ch(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    pub fn shift(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
    }

    pub fn type_str(app: &mut crate::tui::app::App, text: &str) {
        for c in text.chars() {
            super::handle_key(app, ch(c));
        }
    }
}
