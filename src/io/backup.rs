use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use tracing::info;

use crate::model::item::Item;
use crate::model::store::ProjectStore;

use super::store::atomic_write;

/// Error type for backup files
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("Invalid file format")]
    InvalidFormat,
    #[error("Failed to load file")]
    Parse(#[source] serde_json::Error),
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not serialize backup: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupOut<'a> {
    projects: &'a IndexMap<String, Vec<Item>>,
    current_project: &'a str,
    export_date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackupIn {
    projects: Option<IndexMap<String, Vec<Item>>>,
    #[serde(default)]
    current_project: Option<String>,
}

/// `agenda-projects-YYYY-MM-DD.json`
pub fn default_backup_name(date: NaiveDate) -> String {
    format!("agenda-projects-{}.json", date.format("%Y-%m-%d"))
}

/// Serialize every project into backup-file JSON
pub fn backup_json(store: &ProjectStore) -> Result<String, BackupError> {
    let out = BackupOut {
        projects: store.projects(),
        current_project: store.current_name(),
        export_date: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn save_backup(path: &Path, store: &ProjectStore) -> Result<(), BackupError> {
    let json = backup_json(store)?;
    atomic_write(path, json.as_bytes()).map_err(|source| BackupError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), projects = store.len(), "backup saved");
    Ok(())
}

/// Parse backup-file JSON. A missing `projects` key is a format error;
/// an unknown or missing current project falls back to the first one.
pub fn parse_backup(text: &str) -> Result<ProjectStore, BackupError> {
    let parsed: BackupIn = serde_json::from_str(text).map_err(|err| match err.classify() {
        Category::Data => BackupError::InvalidFormat,
        _ => BackupError::Parse(err),
    })?;
    let projects = parsed.projects.ok_or(BackupError::InvalidFormat)?;
    Ok(ProjectStore::from_parts(projects, parsed.current_project))
}

pub fn load_backup(path: &Path) -> Result<ProjectStore, BackupError> {
    let text = fs::read_to_string(path).map_err(|source| BackupError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let store = parse_backup(&text)?;
    info!(path = %path.display(), projects = store.len(), "backup loaded");
    Ok(store)
}
