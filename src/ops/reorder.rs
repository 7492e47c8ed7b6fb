use crate::model::item::{Item, ItemId};

/// Which side of the target item a dragged item lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

/// Error type for reorder commits. Every variant leaves the sequence untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    #[error("item not found: {0}")]
    NotFound(ItemId),
    #[error("cannot drop item {0} onto itself")]
    SelfDrop(ItemId),
}

/// Result of a committed move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    pub from: usize,
    pub to: usize,
}

impl Moved {
    /// Whether the sequence order actually changed
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Final index of an item moved from `from` to the `side` of the item at
/// `target`, accounting for the shift caused by removing it first.
pub fn destination_index(from: usize, target: usize, side: DropSide) -> usize {
    let raw = match side {
        DropSide::Before => target,
        DropSide::After => target + 1,
    };
    if from < raw { raw - 1 } else { raw }
}

/// Move `dragged` to the `side` of `target`. The sequence is only permuted;
/// on error nothing is changed.
pub fn move_item(
    items: &mut Vec<Item>,
    dragged: ItemId,
    target: ItemId,
    side: DropSide,
) -> Result<Moved, ReorderError> {
    if dragged == target {
        return Err(ReorderError::SelfDrop(dragged));
    }
    let from = items
        .iter()
        .position(|item| item.id == dragged)
        .ok_or(ReorderError::NotFound(dragged))?;
    let target_idx = items
        .iter()
        .position(|item| item.id == target)
        .ok_or(ReorderError::NotFound(target))?;

    let to = destination_index(from, target_idx, side);
    move_index(items, from, to);
    Ok(Moved { from, to })
}

/// Remove the element at `from` and re-insert it at `to`
pub fn move_index<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() {
        return;
    }
    let element = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, element);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::Status;
    use pretty_assertions::assert_eq;

    fn items(titles: &[&str]) -> Vec<Item> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| Item::new(ItemId(i as u64 + 1), t, Status::Informed, 10))
            .collect()
    }

    fn titles(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    fn id_of(items: &[Item], title: &str) -> ItemId {
        items.iter().find(|i| i.title == title).unwrap().id
    }

    #[test]
    fn drag_first_after_third() {
        let mut seq = items(&["A", "B", "C", "D"]);
        let (a, c) = (id_of(&seq, "A"), id_of(&seq, "C"));
        let moved = move_item(&mut seq, a, c, DropSide::After).unwrap();
        assert_eq!(moved, Moved { from: 0, to: 2 });
        assert_eq!(titles(&seq), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn drag_last_before_second() {
        let mut seq = items(&["A", "B", "C", "D"]);
        let (d, b) = (id_of(&seq, "D"), id_of(&seq, "B"));
        move_item(&mut seq, d, b, DropSide::Before).unwrap();
        assert_eq!(titles(&seq), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn drop_on_adjacent_slot_is_noop() {
        let mut seq = items(&["A", "B", "C"]);
        let (a, b, c) = (id_of(&seq, "A"), id_of(&seq, "B"), id_of(&seq, "C"));

        // B before C and B after A both mean "stay put".
        assert!(move_item(&mut seq, b, c, DropSide::Before).unwrap().is_noop());
        assert!(move_item(&mut seq, b, a, DropSide::After).unwrap().is_noop());
        assert_eq!(titles(&seq), vec!["A", "B", "C"]);
    }

    #[test]
    fn self_drop_is_rejected() {
        let mut seq = items(&["A", "B"]);
        let a = id_of(&seq, "A");
        assert_eq!(
            move_item(&mut seq, a, a, DropSide::After),
            Err(ReorderError::SelfDrop(a))
        );
        assert_eq!(titles(&seq), vec!["A", "B"]);
    }

    #[test]
    fn stale_dragged_item_leaves_sequence_unchanged() {
        let mut seq = items(&["A", "B", "C"]);
        let (a, c) = (id_of(&seq, "A"), id_of(&seq, "C"));
        seq.retain(|i| i.id != a);
        assert_eq!(
            move_item(&mut seq, a, c, DropSide::Before),
            Err(ReorderError::NotFound(a))
        );
        assert_eq!(titles(&seq), vec!["B", "C"]);
    }

    #[test]
    fn stale_target_leaves_sequence_unchanged() {
        let mut seq = items(&["A", "B"]);
        let a = id_of(&seq, "A");
        let gone = ItemId(999);
        assert_eq!(
            move_item(&mut seq, a, gone, DropSide::After),
            Err(ReorderError::NotFound(gone))
        );
        assert_eq!(titles(&seq), vec!["A", "B"]);
    }

    #[test]
    fn every_move_is_a_permutation() {
        let names = ["A", "B", "C", "D", "E", "F"];
        for len in 2..=names.len() {
            let base = items(&names[..len]);
            for from in 0..len {
                for target in 0..len {
                    if from == target {
                        continue;
                    }
                    for side in [DropSide::Before, DropSide::After] {
                        let mut seq = base.clone();
                        let moved =
                            move_item(&mut seq, base[from].id, base[target].id, side).unwrap();
                        assert_eq!(seq.len(), len);
                        let mut got: Vec<u64> = seq.iter().map(|i| i.id.0).collect();
                        got.sort_unstable();
                        let want: Vec<u64> = (1..=len as u64).collect();
                        assert_eq!(got, want);
                        assert_eq!(seq[moved.to].id, base[from].id);
                    }
                }
            }
        }
    }

    #[test]
    fn destination_index_accounts_for_removal_shift() {
        assert_eq!(destination_index(0, 2, DropSide::After), 2);
        assert_eq!(destination_index(0, 2, DropSide::Before), 1);
        assert_eq!(destination_index(3, 1, DropSide::Before), 1);
        assert_eq!(destination_index(3, 1, DropSide::After), 2);
        assert_eq!(destination_index(1, 2, DropSide::Before), 1);
    }

    #[test]
    fn move_index_out_of_range_is_ignored() {
        let mut v = vec![1, 2, 3];
        move_index(&mut v, 5, 0);
        assert_eq!(v, vec![1, 2, 3]);
        move_index(&mut v, 0, 10);
        assert_eq!(v, vec![2, 3, 1]);
    }
}
