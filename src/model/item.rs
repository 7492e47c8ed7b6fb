use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Title used when an item is created or edited with a blank title
pub const DEFAULT_TITLE: &str = "Unnamed";

/// Duration given to new items when none is specified
pub const DEFAULT_MINUTES: u32 = 15;

/// Upper bound accepted by the minutes editor
pub const MAX_MINUTES: u32 = 999;

/// Opaque item identifier, derived from the wall clock in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Next id for a sequence: the current time, bumped past any id
    /// already in use so ids created in the same millisecond stay unique.
    pub fn next_after<'a>(existing: impl IntoIterator<Item = &'a Item>) -> ItemId {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let taken: HashSet<u64> = existing.into_iter().map(|item| item.id.0).collect();
        match taken.iter().max() {
            Some(&max) if max >= now => ItemId::unused(&taken),
            _ => ItemId(now),
        }
    }

    /// One past the largest taken id, or the smallest free id once the
    /// largest is `u64::MAX`.
    pub(crate) fn unused(taken: &HashSet<u64>) -> ItemId {
        let max = taken.iter().copied().max();
        match max.map(|m| m.checked_add(1)) {
            None => ItemId(0),
            Some(Some(next)) => ItemId(next),
            Some(None) => ItemId((0..).find(|id| !taken.contains(id)).unwrap_or(0)),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// Agenda item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Alignment,
    Approval,
    Help,
    Decision,
    #[default]
    Informed,
    Review,
    Escalation,
}

impl Status {
    /// All statuses in picker order
    pub const ALL: [Status; 7] = [
        Status::Alignment,
        Status::Approval,
        Status::Help,
        Status::Decision,
        Status::Informed,
        Status::Review,
        Status::Escalation,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Status::Alignment => "Alignment",
            Status::Approval => "Approval",
            Status::Help => "Help Required",
            Status::Decision => "Decision",
            Status::Informed => "Informed",
            Status::Review => "Review",
            Status::Escalation => "Escalation",
        }
    }

    /// Key used in files and config (`[ui.status_colors]`)
    pub fn key(self) -> &'static str {
        match self {
            Status::Alignment => "alignment",
            Status::Approval => "approval",
            Status::Help => "help",
            Status::Decision => "decision",
            Status::Informed => "informed",
            Status::Review => "review",
            Status::Escalation => "escalation",
        }
    }

    /// Default chip colour as `#RRGGBB`
    pub fn default_color(self) -> &'static str {
        match self {
            Status::Alignment => "#6A1B9A",
            Status::Approval => "#052545",
            Status::Help => "#FFFFC5",
            Status::Decision => "#64B5F6",
            Status::Informed => "#388E3C",
            Status::Review => "#D32F2F",
            Status::Escalation => "#FFA500",
        }
    }

    /// Single-cell glyph shown before the label
    pub fn icon(self) -> &'static str {
        match self {
            Status::Alignment => "\u{25CE}",  // ◎
            Status::Approval => "\u{2713}",   // ✓
            Status::Help => "?",
            Status::Decision => "\u{2726}",   // ✦
            Status::Informed => "i",
            Status::Review => "\u{25C9}",     // ◉
            Status::Escalation => "\u{25B2}", // ▲
        }
    }

    /// Parse a status key or label (case-insensitive)
    pub fn parse(s: &str) -> Option<Status> {
        let s = s.trim();
        Status::ALL
            .into_iter()
            .find(|st| st.key().eq_ignore_ascii_case(s) || st.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single timed agenda entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub status: Status,
    pub minutes: u32,
}

impl Item {
    pub fn new(id: ItemId, title: &str, status: Status, minutes: u32) -> Self {
        Item {
            id,
            title: normalize_title(title),
            status,
            minutes: normalize_minutes(minutes),
        }
    }
}

/// Zero becomes the default duration and anything above the editor's
/// bound is clamped to it
pub fn normalize_minutes(minutes: u32) -> u32 {
    match minutes {
        0 => DEFAULT_MINUTES,
        m => m.min(MAX_MINUTES),
    }
}

/// Trim a title, substituting the default for blank input
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}
