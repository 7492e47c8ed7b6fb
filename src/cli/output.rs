use serde::Serialize;

use crate::model::{Item, ProjectStore, Status};
use crate::ops::item_ops::total_minutes;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub id: u64,
    pub position: usize,
    pub title: String,
    pub status: Status,
    pub minutes: u32,
}

#[derive(Serialize)]
pub struct AgendaJson {
    pub project: String,
    pub total_minutes: u32,
    pub items: Vec<ItemJson>,
}

#[derive(Serialize)]
pub struct ProjectInfoJson {
    pub name: String,
    pub current: bool,
    pub items: usize,
    pub total_minutes: u32,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(position: usize, item: &Item) -> ItemJson {
    ItemJson {
        id: item.id.0,
        position,
        title: item.title.clone(),
        status: item.status,
        minutes: item.minutes,
    }
}

pub fn agenda_to_json(project: &str, items: &[Item]) -> AgendaJson {
    AgendaJson {
        project: project.to_string(),
        total_minutes: total_minutes(items),
        items: items
            .iter()
            .enumerate()
            .map(|(i, item)| item_to_json(i + 1, item))
            .collect(),
    }
}

pub fn projects_to_json(store: &ProjectStore) -> Vec<ProjectInfoJson> {
    store
        .projects()
        .iter()
        .map(|(name, items)| ProjectInfoJson {
            name: name.clone(),
            current: name == store.current_name(),
            items: items.len(),
            total_minutes: total_minutes(items),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Plain text
// ---------------------------------------------------------------------------

/// One line per item: `<pos>. [<id>] <title> (<status>, <n> min)`
pub fn format_item_line(position: usize, item: &Item) -> String {
    format!(
        "{}. [{}] {} ({}, {} min)",
        position, item.id, item.title, item.status, item.minutes
    )
}

pub fn format_agenda(project: &str, items: &[Item]) -> String {
    let mut out = format!("{} \u{00B7} {} min\n", project, total_minutes(items));
    if items.is_empty() {
        out.push_str("  (no items)\n");
    }
    for (i, item) in items.iter().enumerate() {
        out.push_str("  ");
        out.push_str(&format_item_line(i + 1, item));
        out.push('\n');
    }
    out
}

pub fn format_project_line(name: &str, items: &[Item], current: bool) -> String {
    let marker = if current { "*" } else { " " };
    format!(
        "{} {} ({} items, {} min)",
        marker,
        name,
        items.len(),
        total_minutes(items)
    )
}
