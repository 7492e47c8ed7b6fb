//! Operations shared by the keyboard and mouse handlers.

use chrono::Local;
use tracing::info;

use crate::io::backup::default_backup_name;
use crate::io::export::default_export_name;
use crate::model::{ItemId, Status};
use crate::ops::item_ops::{self, NewItem};
use crate::ops::project_ops::{self, ProjectError};
use crate::tui::app::{App, ConfirmAction, EditField};

/// Append a default item to the current project and start editing its title
pub(super) fn add_item(app: &mut App) {
    let project = app.store.current_name().to_string();
    match item_ops::add_item(&mut app.store, &project, NewItem::default()) {
        Ok(id) => {
            app.persist();
            app.select(id);
            app.begin_edit(EditField::Title(id), "");
        }
        Err(err) => app.notifier.error(err.to_string()),
    }
}

pub(super) fn delete_item(app: &mut App, id: ItemId) {
    app.cancel_drag();
    let project = app.store.current_name().to_string();
    if item_ops::delete_item(&mut app.store, &project, id).is_ok() {
        app.persist();
        app.clamp_cursor();
    }
}

pub(super) fn set_status(app: &mut App, id: ItemId, status: Status) {
    let project = app.store.current_name().to_string();
    if item_ops::set_status(&mut app.store, &project, id, status).is_ok() {
        app.persist();
    }
}

pub(super) fn edit_title(app: &mut App, id: ItemId) {
    let Some(title) = app
        .current_items()
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.title.clone())
    else {
        return;
    };
    app.select(id);
    app.begin_edit(EditField::Title(id), &title);
}

pub(super) fn edit_minutes(app: &mut App, id: ItemId) {
    let Some(minutes) = app
        .current_items()
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.minutes)
    else {
        return;
    };
    app.select(id);
    app.begin_edit(EditField::Minutes(id), &minutes.to_string());
}

/// Make the project at tab `index` current
pub(super) fn switch_to_index(app: &mut App, index: usize) {
    let Some(name) = app.store.names().nth(index).map(str::to_string) else {
        return;
    };
    switch_to(app, &name);
}

pub(super) fn switch_to(app: &mut App, name: &str) {
    if name == app.store.current_name() {
        return;
    }
    app.cancel_drag();
    if project_ops::switch_project(&mut app.store, name).is_ok() {
        app.cursor = 0;
        app.persist();
    }
}

pub(super) fn cycle_project(app: &mut App, offset: isize) {
    if let Some(name) = project_ops::cycle_project(&app.store, offset).map(str::to_string) {
        switch_to(app, &name);
    }
}

pub(super) fn start_new_project(app: &mut App) {
    app.begin_edit(EditField::NewProject, "");
}

pub(super) fn start_rename_project(app: &mut App) {
    let current = app.store.current_name().to_string();
    app.begin_edit(EditField::RenameProject, &current);
}

pub(super) fn start_delete_project(app: &mut App) {
    if app.store.len() <= 1 {
        app.notifier.error(ProjectError::LastProject.to_string());
        return;
    }
    let name = app.store.current_name().to_string();
    app.ask_confirm(
        format!("Are you sure you want to delete \"{name}\"?"),
        ConfirmAction::DeleteProject(name),
    );
}

pub(super) fn start_save(app: &mut App) {
    let path = app
        .files_dir
        .join(default_backup_name(Local::now().date_naive()));
    app.begin_edit(EditField::SavePath, &path.display().to_string());
}

pub(super) fn start_load(app: &mut App) {
    let dir = app.files_dir.display().to_string();
    let initial = if dir.ends_with(std::path::MAIN_SEPARATOR) {
        dir
    } else {
        format!("{dir}{}", std::path::MAIN_SEPARATOR)
    };
    app.begin_edit(EditField::LoadPath, &initial);
}

pub(super) fn start_export(app: &mut App) {
    if app.current_items().is_empty() {
        app.notifier
            .error(crate::io::export::ExportError::Empty.to_string());
        return;
    }
    let path = app
        .files_dir
        .join(default_export_name(Local::now().date_naive()));
    app.begin_edit(EditField::ExportPath, &path.display().to_string());
}

/// Delete the project named in a confirmed prompt
pub(super) fn delete_project(app: &mut App, name: &str) {
    match project_ops::delete_project(&mut app.store, name) {
        Ok(items) => {
            info!(project = name, items = items.len(), "project deleted");
            app.cursor = 0;
            app.persist();
        }
        Err(err) => app.notifier.error(err.to_string()),
    }
}
