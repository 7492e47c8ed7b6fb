use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::model::config::Config;
use crate::model::item::Item;
use crate::model::store::ProjectStore;

/// Error type for state persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not serialize agenda: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// On-disk layout of the state file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAgenda {
    #[serde(default)]
    pub projects: IndexMap<String, Vec<Item>>,
    #[serde(default)]
    pub current_project: Option<String>,
}

impl StoredAgenda {
    pub fn into_store(self) -> ProjectStore {
        ProjectStore::from_parts(self.projects, self.current_project)
    }
}

/// Persistence service for the whole workspace
pub trait AgendaStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<StoredAgenda>, StoreError>;

    fn save(&self, projects: &IndexMap<String, Vec<Item>>, current: &str) -> Result<(), StoreError>;
}

/// Load a store from the backend, falling back to the default project
pub fn load_or_default(backend: &dyn AgendaStore) -> Result<ProjectStore, StoreError> {
    Ok(backend
        .load()?
        .map(StoredAgenda::into_store)
        .unwrap_or_default())
}

pub fn save_store(backend: &dyn AgendaStore, store: &ProjectStore) -> Result<(), StoreError> {
    backend.save(store.projects(), store.current_name())
}

/// JSON state file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AgendaStore for FileStore {
    fn load(&self) -> Result<Option<StoredAgenda>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        match serde_json::from_str(&text) {
            Ok(stored) => Ok(Some(stored)),
            Err(err) => {
                let moved = set_aside(&self.path).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
                warn!(
                    path = %self.path.display(),
                    kept = %moved.display(),
                    %err,
                    "state file is corrupt; kept a copy and starting fresh"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, projects: &IndexMap<String, Vec<Item>>, current: &str) -> Result<(), StoreError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Out<'a> {
            projects: &'a IndexMap<String, Vec<Item>>,
            current_project: &'a str,
        }
        let json = serde_json::to_string_pretty(&Out {
            projects,
            current_project: current,
        })?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        atomic_write(&self.path, json.as_bytes()).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), projects = projects.len(), "state saved");
        Ok(())
    }
}

/// In-memory backend, used by tests and as a fallback
#[derive(Debug, Default)]
pub struct MemoryStore {
    stored: RefCell<Option<StoredAgenda>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(stored: StoredAgenda) -> Self {
        MemoryStore {
            stored: RefCell::new(Some(stored)),
            saves: Cell::new(0),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn snapshot(&self) -> Option<StoredAgenda> {
        self.stored.borrow().clone()
    }
}

impl AgendaStore for MemoryStore {
    fn load(&self) -> Result<Option<StoredAgenda>, StoreError> {
        Ok(self.stored.borrow().clone())
    }

    fn save(&self, projects: &IndexMap<String, Vec<Item>>, current: &str) -> Result<(), StoreError> {
        *self.stored.borrow_mut() = Some(StoredAgenda {
            projects: projects.clone(),
            current_project: Some(current.to_string()),
        });
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Rename an unreadable state file to `<name>.corrupt-<timestamp>` so the
/// next save cannot replace it.
fn set_aside(path: &Path) -> io::Result<PathBuf> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "agenda.json".to_string());
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let mut target = path.with_file_name(format!("{name}.corrupt-{stamp}"));
    let mut n = 1;
    while target.exists() {
        target = path.with_file_name(format!("{name}.corrupt-{stamp}-{n}"));
        n += 1;
    }
    fs::rename(path, &target)?;
    Ok(target)
}

/// `<data_dir>/agenda/agenda.json`
pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("agenda").join("agenda.json"))
}

/// State file to use: explicit flag, then config, then the platform default
pub fn resolve_state_path(flag: Option<&Path>, config: &Config) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.storage.state_file.clone())
        .or_else(default_state_path)
        .unwrap_or_else(|| PathBuf::from("agenda.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::{ItemId, Status};
    use crate::ops::item_ops::{NewItem, add_item, total_minutes};
    use crate::ops::project_ops::add_project;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_store() -> ProjectStore {
        let mut store = ProjectStore::new();
        add_item(
            &mut store,
            "Project 1",
            NewItem {
                title: "Standup".into(),
                status: Some(Status::Review),
                minutes: Some(10),
            },
        )
        .unwrap();
        add_project(&mut store, "Planning").unwrap();
        store
    }

    #[test]
    fn file_round_trip_keeps_tab_order_and_current() {
        let dir = TempDir::new().unwrap();
        let backend = FileStore::new(dir.path().join("nested").join("agenda.json"));
        let store = sample_store();
        save_store(&backend, &store).unwrap();

        let loaded = load_or_default(&backend).unwrap();
        assert_eq!(loaded, store);
        let names: Vec<&str> = loaded.names().collect();
        assert_eq!(names, vec!["Project 1", "Planning"]);
        assert_eq!(loaded.current_name(), "Planning");
    }

    #[test]
    fn file_uses_browser_layout() {
        let dir = TempDir::new().unwrap();
        let backend = FileStore::new(dir.path().join("agenda.json"));
        save_store(&backend, &sample_store()).unwrap();
        let text = fs::read_to_string(backend.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["currentProject"], "Planning");
        let first = &value["projects"]["Project 1"][0];
        assert_eq!(first["title"], "Standup");
        assert_eq!(first["status"], "review");
        assert_eq!(first["minutes"], 10);
        assert!(first["id"].is_u64());
    }

    #[test]
    fn reads_state_written_by_browser() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agenda.json");
        fs::write(
            &path,
            r#"{"projects":{"Weekly":[{"id":1700000000000,"title":"Budget","status":"approval","minutes":20}]},"currentProject":"Weekly"}"#,
        )
        .unwrap();
        let store = load_or_default(&FileStore::new(path)).unwrap();
        assert_eq!(store.current_name(), "Weekly");
        let item = &store.current_items()[0];
        assert_eq!(item.id, ItemId(1_700_000_000_000));
        assert_eq!(item.status, Status::Approval);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let backend = FileStore::new(dir.path().join("absent.json"));
        assert!(backend.load().unwrap().is_none());
        assert_eq!(load_or_default(&backend).unwrap(), ProjectStore::new());
    }

    #[test]
    fn corrupt_file_is_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agenda.json");
        fs::write(&path, "{not json").unwrap();
        assert!(FileStore::new(path).load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_survives_the_next_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agenda.json");
        fs::write(&path, "{not json").unwrap();
        let backend = FileStore::new(&path);

        let store = load_or_default(&backend).unwrap();
        assert_eq!(store, ProjectStore::new());
        save_store(&backend, &sample_store()).unwrap();

        let kept: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with("agenda.json.corrupt-"))
            })
            .collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(fs::read_to_string(&kept[0]).unwrap(), "{not json");
        assert!(fs::read_to_string(&path).unwrap().contains("Planning"));
    }

    #[test]
    fn out_of_range_state_loads_within_bounds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agenda.json");
        fs::write(
            &path,
            r#"{"projects":{"P":[
                {"id":18446744073709551615,"title":"a","status":"review","minutes":4000000000},
                {"id":7,"title":"b","status":"review","minutes":0}
            ]},"currentProject":"P"}"#,
        )
        .unwrap();
        let mut store = load_or_default(&FileStore::new(path)).unwrap();
        let minutes: Vec<u32> = store.current_items().iter().map(|i| i.minutes).collect();
        assert_eq!(minutes, vec![999, 15]);
        assert_eq!(total_minutes(store.current_items()), 1014);

        let id = add_item(&mut store, "P", NewItem::default()).unwrap();
        assert_eq!(id, ItemId(0));
    }

    #[test]
    fn empty_projects_fall_back_to_default_project() {
        let stored: StoredAgenda =
            serde_json::from_str(r#"{"projects":{},"currentProject":"Gone"}"#).unwrap();
        assert_eq!(stored.into_store(), ProjectStore::new());
    }

    #[test]
    fn memory_store_counts_saves() {
        let backend = MemoryStore::new();
        assert!(backend.load().unwrap().is_none());
        save_store(&backend, &sample_store()).unwrap();
        save_store(&backend, &sample_store()).unwrap();
        assert_eq!(backend.save_count(), 2);
        assert_eq!(
            backend.snapshot().unwrap().current_project.as_deref(),
            Some("Planning")
        );
    }

    #[test]
    fn explicit_state_path_wins() {
        let mut config = Config::default();
        config.storage.state_file = Some(PathBuf::from("/tmp/from-config.json"));
        assert_eq!(
            resolve_state_path(Some(Path::new("cli.json")), &config),
            PathBuf::from("cli.json")
        );
        assert_eq!(
            resolve_state_path(None, &config),
            PathBuf::from("/tmp/from-config.json")
        );
    }
}
