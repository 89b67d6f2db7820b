mod items;
mod mutation;
mod types;

pub use items::ItemStore;
pub use mutation::{toggle, Toggle};
pub use types::{Flag, Item, ItemDetail, ItemId, ItemUpdate};

/// Unread, unstarred item with predictable title and url.
#[cfg(test)]
pub(crate) fn sample_item(id: i64) -> Item {
    Item {
        id: ItemId(id),
        title: format!("Item {}", id),
        url: format!("https://example.com/{}", id),
        read: false,
        starred: false,
        tags: Default::default(),
        reading_time: None,
    }
}
