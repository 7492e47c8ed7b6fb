//! Terminal mouse events to pointer events.
//!
//! The terminal reports a single pointer, so every event is fed to the
//! drag controller as pointer 0. Presses on controls act immediately;
//! presses on a card body arm a drag.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::drag::{PointerId, Press, PressRegion, ReleaseOutcome};
use crate::model::ItemId;
use crate::tui::app::{App, Control, Mode};

use super::*;

const MOUSE: PointerId = PointerId(0);

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let pressed = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));
    match app.mode {
        Mode::Confirm => return,
        Mode::StatusPick => {
            if pressed {
                match app.control_at(mouse.column, mouse.row) {
                    Some(Control::PickStatus(status)) => pick_status(app, status),
                    _ => close_picker(app),
                }
            }
            return;
        }
        Mode::Edit if pressed => {
            // Clicking away from an inline editor saves it; a prompt in the
            // status row is abandoned
            let inline = app.edit.as_ref().is_some_and(|e| e.field.is_inline());
            if inline {
                commit_edit(app);
            } else {
                cancel_edit(app);
            }
        }
        Mode::Edit => return,
        Mode::Navigate => {}
    }

    if app.show_help {
        if pressed {
            app.show_help = false;
        }
        return;
    }

    let point = app.metrics.point_at(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => mouse_down(app, mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => {
            app.drag.pointer_move(MOUSE, point, &app.hit_map);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            match app.drag.pointer_up(MOUSE, point, &app.hit_map) {
                ReleaseOutcome::Drop(request) => {
                    app.commit_drop(request);
                }
                ReleaseOutcome::Click(id) => app.select(id),
                ReleaseOutcome::Cancelled | ReleaseOutcome::Ignored => {}
            }
        }
        MouseEventKind::ScrollDown if app.drag.active_item().is_none() => {
            if app.cursor + 1 < app.current_items().len() {
                app.cursor += 1;
            }
        }
        MouseEventKind::ScrollUp if app.drag.active_item().is_none() => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        _ => {}
    }
}

fn mouse_down(app: &mut App, column: u16, row: u16) {
    // A press while a session is open means the release happened outside
    // the terminal and was never reported
    if app.drag.pointer_cancel(MOUSE) {
        debug!("stale drag session dropped on new press");
    }

    let point = app.metrics.point_at(column, row);
    match app.control_at(column, row) {
        Some(Control::Tab(index)) => {
            if index == app.store.current_index() {
                start_rename_project(app);
            } else {
                switch_to_index(app, index);
            }
        }
        Some(Control::NewTab) => start_new_project(app),
        Some(Control::AddItem) => add_item(app),
        Some(Control::Title(id)) => {
            press(app, column, row, id, PressRegion::Editable);
            edit_title(app, id);
        }
        Some(Control::Minutes(id)) => {
            press(app, column, row, id, PressRegion::Editable);
            edit_minutes(app, id);
        }
        Some(Control::Status(id)) => {
            press(app, column, row, id, PressRegion::Button);
            app.select(id);
            app.open_picker(id);
        }
        Some(Control::Delete(id)) => {
            press(app, column, row, id, PressRegion::Button);
            delete_item(app, id);
        }
        Some(Control::PickStatus(_)) => {}
        None => {
            if let Some(id) = app.hit_map.item_at(point) {
                press(app, column, row, id, PressRegion::Body);
            }
        }
    }
}

fn press(app: &mut App, column: u16, row: u16, item: ItemId, region: PressRegion) {
    let point = app.metrics.point_at(column, row);
    let outcome = app.drag.pointer_down(MOUSE, point, Press { item, region });
    debug!(%item, ?region, ?outcome, "card pressed");
}
