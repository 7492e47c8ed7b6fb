use crate::model::item::{DEFAULT_MINUTES, Item, ItemId, MAX_MINUTES, Status, normalize_title};
use crate::model::store::{MAX_ITEMS, ProjectStore};

/// Error type for item operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("Maximum 9 agenda items allowed")]
    Full,
    #[error("item not found: {0}")]
    NotFound(ItemId),
    #[error("project not found: {0}")]
    NoProject(String),
    #[error("minutes must be between 1 and 999")]
    InvalidMinutes,
}

/// Fields for a new item; `None` means "use the default"
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub title: String,
    pub status: Option<Status>,
    pub minutes: Option<u32>,
}

/// Append an item to a project. Fails once the project holds `MAX_ITEMS`.
pub fn add_item(store: &mut ProjectStore, project: &str, new: NewItem) -> Result<ItemId, ItemError> {
    let items = store
        .items_mut(project)
        .ok_or_else(|| ItemError::NoProject(project.to_string()))?;
    if items.len() >= MAX_ITEMS {
        return Err(ItemError::Full);
    }
    let id = ItemId::next_after(items.iter());
    let minutes = new.minutes.filter(|m| *m > 0).unwrap_or(DEFAULT_MINUTES);
    items.push(Item::new(id, &new.title, new.status.unwrap_or_default(), minutes));
    Ok(id)
}

/// Remove an item, returning it and its former index
pub fn delete_item(
    store: &mut ProjectStore,
    project: &str,
    id: ItemId,
) -> Result<(usize, Item), ItemError> {
    let items = store
        .items_mut(project)
        .ok_or_else(|| ItemError::NoProject(project.to_string()))?;
    let idx = items
        .iter()
        .position(|item| item.id == id)
        .ok_or(ItemError::NotFound(id))?;
    Ok((idx, items.remove(idx)))
}

/// Set an item's title; blank input becomes the default title
pub fn edit_title(
    store: &mut ProjectStore,
    project: &str,
    id: ItemId,
    title: &str,
) -> Result<(), ItemError> {
    find_item_mut(store, project, id)?.title = normalize_title(title);
    Ok(())
}

pub fn set_status(
    store: &mut ProjectStore,
    project: &str,
    id: ItemId,
    status: Status,
) -> Result<(), ItemError> {
    find_item_mut(store, project, id)?.status = status;
    Ok(())
}

pub fn set_minutes(
    store: &mut ProjectStore,
    project: &str,
    id: ItemId,
    minutes: u32,
) -> Result<(), ItemError> {
    if minutes == 0 || minutes > MAX_MINUTES {
        return Err(ItemError::InvalidMinutes);
    }
    find_item_mut(store, project, id)?.minutes = minutes;
    Ok(())
}

/// Parse minutes typed into the editor. Invalid or non-positive input
/// yields `None`, which callers treat as "leave unchanged".
pub fn parse_minutes(input: &str) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=MAX_MINUTES).contains(m))
}

/// Sum of item durations
pub fn total_minutes(items: &[Item]) -> u32 {
    items
        .iter()
        .fold(0u32, |total, item| total.saturating_add(item.minutes))
}

/// Find which project holds an item
pub fn project_of(store: &ProjectStore, id: ItemId) -> Option<&str> {
    store
        .projects()
        .iter()
        .find(|(_, items)| items.iter().any(|item| item.id == id))
        .map(|(name, _)| name.as_str())
}

fn find_item_mut<'a>(
    store: &'a mut ProjectStore,
    project: &str,
    id: ItemId,
) -> Result<&'a mut Item, ItemError> {
    store
        .items_mut(project)
        .ok_or_else(|| ItemError::NoProject(project.to_string()))?
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or(ItemError::NotFound(id))
}
