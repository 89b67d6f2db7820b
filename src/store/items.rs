use std::collections::HashMap;

use super::types::{Flag, Item, ItemId};

/// In-memory ordered collection of the session's items.
///
/// Order is fixed at load time (server order). Items are addressed by
/// position for display and by [`ItemId`] for lookup; the two views are kept
/// consistent by the `index` map, which is built once and never rebuilt since
/// items are never inserted or removed after load.
///
/// Screens never hold copies of items: they keep positions or identifiers and
/// read through the store on every render, so a commit made while one screen
/// is on top is visible to every other screen.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl ItemStore {
    /// Build the store from a bulk fetch, preserving server order.
    ///
    /// Duplicate identifiers keep their first occurrence; later duplicates
    /// are dropped and logged.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut store = Self::default();
        for item in items {
            if store.index.contains_key(&item.id) {
                tracing::warn!(item_id = %item.id, "Dropping duplicate item from list response");
                continue;
            }
            store.index.insert(item.id, store.items.len());
            store.items.push(item);
        }
        tracing::debug!(count = store.items.len(), "Item store populated");
        store
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at a display position.
    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn get_by_id(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).and_then(|&pos| self.items.get(pos))
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Write a server-confirmed flag value into the store.
    ///
    /// Only called after the remote update succeeded. Returns `false` when
    /// the id is unknown.
    pub(crate) fn commit(&mut self, id: ItemId, flag: Flag, value: bool) -> bool {
        let Some(&pos) = self.index.get(&id) else {
            tracing::warn!(item_id = %id, ?flag, "Commit for unknown item ignored");
            return false;
        };
        match self.items.get_mut(pos) {
            Some(item) => {
                flag.set(item, value);
                true
            }
            None => false,
        }
    }
}
