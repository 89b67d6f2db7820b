use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Server-assigned item identifier.
///
/// Opaque to the UI: it is only compared, hashed and sent back to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A saved read-it-later entry as shown in the list view.
///
/// Tags are kept in a `BTreeSet` so the rendered summary has a stable
/// (lexicographic) order regardless of the order the server returns them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub url: String,
    pub read: bool,
    pub starred: bool,
    pub tags: BTreeSet<String>,
    /// Estimated reading time in minutes. `None` when the server does not know.
    pub reading_time: Option<u32>,
}

impl Item {
    /// Two-character status code: `R`/`N` for read/unread, `*`/space for starred.
    pub fn status_code(&self) -> String {
        let read_char = if self.read { 'R' } else { 'N' };
        let star_char = if self.starred { '*' } else { ' ' };
        format!("{}{}", read_char, star_char)
    }

    /// Tags joined with `", "`, empty when the item has none.
    pub fn tags_summary(&self) -> String {
        self.tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `"{minutes}m"`, or an empty string when the reading time is unknown.
    pub fn reading_time_label(&self) -> String {
        self.reading_time
            .map(|m| format!("{}m", m))
            .unwrap_or_default()
    }
}

/// Full item record returned by a single-item fetch, including the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetail {
    pub item: Item,
    /// HTML body. Empty when the server has no extracted content.
    pub content: String,
    pub domain_name: Option<String>,
}

// ============================================================================
// Mutations
// ============================================================================

/// The two user-togglable flags of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Read,
    Starred,
}

impl Flag {
    /// Current value of this flag on `item`.
    pub fn value(self, item: &Item) -> bool {
        match self {
            Flag::Read => item.read,
            Flag::Starred => item.starred,
        }
    }

    pub(crate) fn set(self, item: &mut Item, value: bool) {
        match self {
            Flag::Read => item.read = value,
            Flag::Starred => item.starred = value,
        }
    }

    /// Remote patch setting this flag to `value`.
    pub fn patch(self, value: bool) -> ItemUpdate {
        match self {
            Flag::Read => ItemUpdate {
                read: Some(value),
                starred: None,
            },
            Flag::Starred => ItemUpdate {
                read: None,
                starred: Some(value),
            },
        }
    }

    /// Status line shown after the server confirmed the new value.
    pub fn confirmation(self, value: bool) -> &'static str {
        match (self, value) {
            (Flag::Read, true) => "Marked as read",
            (Flag::Read, false) => "Marked as unread",
            (Flag::Starred, true) => "Starred",
            (Flag::Starred, false) => "Unstarred",
        }
    }

    /// Status line shown when the server rejected the update.
    pub fn failure(self, error: &impl fmt::Display) -> String {
        let what = match self {
            Flag::Read => "read",
            Flag::Starred => "star",
        };
        format!("Error updating {} status: {}", what, error)
    }
}

/// Partial update of an item's flags. `None` fields are left untouched remotely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub read: Option<bool>,
    pub starred: Option<bool>,
}
