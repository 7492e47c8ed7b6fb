use crate::model::item::Item;
use crate::model::store::ProjectStore;

/// Error type for project (tab) operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectError {
    #[error("Project already exists")]
    AlreadyExists(String),
    #[error("Project name already exists")]
    NameTaken(String),
    #[error("project name cannot be empty")]
    EmptyName,
    #[error("project not found: {0}")]
    NotFound(String),
    #[error("Cannot delete the last project")]
    LastProject,
}

/// What a rename actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renamed {
    Changed,
    /// Blank or identical name: nothing to do
    Unchanged,
}

/// Create a project and make it current. Returns the trimmed name.
pub fn add_project(store: &mut ProjectStore, name: &str) -> Result<String, ProjectError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProjectError::EmptyName);
    }
    if !store.insert_project(name) {
        return Err(ProjectError::AlreadyExists(name.to_string()));
    }
    store.switch_to(name);
    Ok(name.to_string())
}

/// Rename a project. Blank or unchanged names are a no-op, not an error.
pub fn rename_project(
    store: &mut ProjectStore,
    old: &str,
    new: &str,
) -> Result<Renamed, ProjectError> {
    let new = new.trim();
    if new.is_empty() || new == old {
        return Ok(Renamed::Unchanged);
    }
    if !store.contains(old) {
        return Err(ProjectError::NotFound(old.to_string()));
    }
    if !store.rename_project(old, new) {
        return Err(ProjectError::NameTaken(new.to_string()));
    }
    Ok(Renamed::Changed)
}

/// Delete a project. The last remaining project can never be deleted.
pub fn delete_project(store: &mut ProjectStore, name: &str) -> Result<Vec<Item>, ProjectError> {
    if !store.contains(name) {
        return Err(ProjectError::NotFound(name.to_string()));
    }
    if store.len() <= 1 {
        return Err(ProjectError::LastProject);
    }
    store
        .remove_project(name)
        .ok_or(ProjectError::LastProject)
}

pub fn switch_project(store: &mut ProjectStore, name: &str) -> Result<(), ProjectError> {
    if store.switch_to(name) {
        Ok(())
    } else {
        Err(ProjectError::NotFound(name.to_string()))
    }
}

/// Name of the project `offset` tabs away from the current one, wrapping
pub fn cycle_project(store: &ProjectStore, offset: isize) -> Option<&str> {
    let len = store.len() as isize;
    if len == 0 {
        return None;
    }
    let idx = (store.current_index() as isize + offset).rem_euclid(len) as usize;
    store.names().nth(idx)
}
