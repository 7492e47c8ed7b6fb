use std::collections::HashSet;

use indexmap::IndexMap;

use super::item::{Item, ItemId, normalize_minutes};

/// Name given to the project created when no projects exist
pub const DEFAULT_PROJECT: &str = "Project 1";

/// Maximum number of items a single project may hold
pub const MAX_ITEMS: usize = 9;

/// All projects, in tab order, plus the name of the current one.
///
/// Always holds at least one project, and `current` always names one of
/// them. Mutations that could break either rule live here; validation of
/// user input lives in `ops`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStore {
    projects: IndexMap<String, Vec<Item>>,
    current: String,
}

impl Default for ProjectStore {
    fn default() -> Self {
        let mut projects = IndexMap::new();
        projects.insert(DEFAULT_PROJECT.to_string(), Vec::new());
        ProjectStore {
            projects,
            current: DEFAULT_PROJECT.to_string(),
        }
    }
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded data, restoring the invariants: an empty
    /// map gets the default project, an unknown current name falls back to
    /// the first project, duplicate item ids are re-assigned, and minutes
    /// are brought back into the editor's range.
    pub fn from_parts(projects: IndexMap<String, Vec<Item>>, current: Option<String>) -> Self {
        if projects.is_empty() {
            return Self::default();
        }
        let mut projects = projects;
        for items in projects.values_mut() {
            repair_duplicate_ids(items);
            for item in items.iter_mut() {
                item.minutes = normalize_minutes(item.minutes);
            }
        }
        let current = match current {
            Some(name) if projects.contains_key(&name) => name,
            _ => projects
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
        };
        ProjectStore { projects, current }
    }

    pub fn projects(&self) -> &IndexMap<String, Vec<Item>> {
        &self.projects
    }

    /// Project names in tab order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }

    pub fn current_name(&self) -> &str {
        &self.current
    }

    /// Tab index of the current project
    pub fn current_index(&self) -> usize {
        self.projects.get_index_of(&self.current).unwrap_or(0)
    }

    pub fn items(&self, name: &str) -> Option<&[Item]> {
        self.projects.get(name).map(Vec::as_slice)
    }

    pub fn items_mut(&mut self, name: &str) -> Option<&mut Vec<Item>> {
        self.projects.get_mut(name)
    }

    pub fn current_items(&self) -> &[Item] {
        self.items(&self.current).unwrap_or(&[])
    }

    pub fn current_items_mut(&mut self) -> &mut Vec<Item> {
        self.projects.entry(self.current.clone()).or_default()
    }

    pub fn find_item(&self, name: &str, id: ItemId) -> Option<&Item> {
        self.items(name)?.iter().find(|item| item.id == id)
    }

    /// Make `name` the current project. Returns false if it does not exist.
    pub fn switch_to(&mut self, name: &str) -> bool {
        if self.projects.contains_key(name) {
            self.current = name.to_string();
            true
        } else {
            false
        }
    }

    /// Append an empty project. Returns false if the name is taken.
    pub(crate) fn insert_project(&mut self, name: &str) -> bool {
        if self.projects.contains_key(name) {
            return false;
        }
        self.projects.insert(name.to_string(), Vec::new());
        true
    }

    /// Rename a project in place, keeping its tab position.
    pub(crate) fn rename_project(&mut self, old: &str, new: &str) -> bool {
        if self.projects.contains_key(new) {
            return false;
        }
        let Some(index) = self.projects.get_index_of(old) else {
            return false;
        };
        let Some((_, items)) = self.projects.shift_remove_index(index) else {
            return false;
        };
        self.projects.shift_insert(index, new.to_string(), items);
        if self.current == old {
            self.current = new.to_string();
        }
        true
    }

    /// Remove a project. Refuses to remove the last one. If the removed
    /// project was current, the first remaining project becomes current.
    pub(crate) fn remove_project(&mut self, name: &str) -> Option<Vec<Item>> {
        if self.projects.len() <= 1 {
            return None;
        }
        let items = self.projects.shift_remove(name)?;
        if self.current == name {
            self.current = self
                .projects
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| DEFAULT_PROJECT.to_string());
        }
        Some(items)
    }

    /// Replace every project at once (backup restore)
    pub fn replace_all(&mut self, other: ProjectStore) {
        *self = other;
    }
}

fn repair_duplicate_ids(items: &mut [Item]) {
    let mut taken: HashSet<u64> = items.iter().map(|item| item.id.0).collect();
    let mut seen = HashSet::new();
    for item in items.iter_mut() {
        if !seen.insert(item.id.0) {
            let id = ItemId::unused(&taken);
            taken.insert(id.0);
            seen.insert(id.0);
            item.id = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::Status;

    fn item(id: u64, title: &str) -> Item {
        Item::new(ItemId(id), title, Status::Informed, 15)
    }

    #[test]
    fn default_store_has_one_project() {
        let store = ProjectStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.current_name(), "Project 1");
        assert!(store.current_items().is_empty());
    }

    #[test]
    fn from_parts_empty_map_falls_back_to_default() {
        let store = ProjectStore::from_parts(IndexMap::new(), Some("Gone".into()));
        assert_eq!(store, ProjectStore::new());
    }

    #[test]
    fn from_parts_unknown_current_uses_first_project() {
        let mut projects = IndexMap::new();
        projects.insert("Alpha".to_string(), vec![]);
        projects.insert("Beta".to_string(), vec![]);
        let store = ProjectStore::from_parts(projects, Some("Gamma".into()));
        assert_eq!(store.current_name(), "Alpha");
    }

    #[test]
    fn from_parts_repairs_duplicate_ids() {
        let mut projects = IndexMap::new();
        projects.insert(
            "P".to_string(),
            vec![item(5, "a"), item(5, "b"), item(7, "c")],
        );
        let store = ProjectStore::from_parts(projects, None);
        let ids: Vec<u64> = store.current_items().iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![5, 8, 7]);
    }

    #[test]
    fn from_parts_repairs_duplicates_of_the_largest_id() {
        let mut projects = IndexMap::new();
        projects.insert(
            "P".to_string(),
            vec![item(u64::MAX, "a"), item(u64::MAX, "b"), item(0, "c")],
        );
        let store = ProjectStore::from_parts(projects, None);
        let ids: Vec<u64> = store.current_items().iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![u64::MAX, 1, 0]);
    }

    #[test]
    fn from_parts_normalizes_out_of_range_minutes() {
        let mut zero = item(1, "zero");
        zero.minutes = 0;
        let mut huge = item(2, "huge");
        huge.minutes = 4_000_000_000;
        let mut projects = IndexMap::new();
        projects.insert("P".to_string(), vec![zero, huge, item(3, "ok")]);
        let store = ProjectStore::from_parts(projects, None);
        let minutes: Vec<u32> = store.current_items().iter().map(|i| i.minutes).collect();
        assert_eq!(minutes, vec![15, 999, 15]);
    }

    #[test]
    fn rename_keeps_tab_position_and_current() {
        let mut store = ProjectStore::new();
        store.insert_project("Second");
        assert!(store.rename_project("Project 1", "First"));
        let names: Vec<&str> = store.names().collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(store.current_name(), "First");
    }

    #[test]
    fn remove_refuses_last_project() {
        let mut store = ProjectStore::new();
        assert!(store.remove_project("Project 1").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_current_moves_to_first_remaining() {
        let mut store = ProjectStore::new();
        store.insert_project("B");
        store.insert_project("C");
        store.switch_to("B");
        store.remove_project("B");
        assert_eq!(store.current_name(), "Project 1");
        assert_eq!(store.len(), 2);
    }
}
