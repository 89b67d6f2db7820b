use crate::notify::{Notifier, STATUS_DELAY};
use crate::store::{Flag, Item, ItemStore, Toggle};

pub const LIST_HELP: &str = "j/k=navigate, enter/o=open, r=read, s=star, q=quit";

/// Cells of one list row, built from the store on every draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: String,
    pub status: String,
    pub title: String,
    pub tags: String,
    pub time: String,
}

impl ListRow {
    fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            status: item.status_code(),
            title: item.title.clone(),
            tags: item.tags_summary(),
            time: item.reading_time_label(),
        }
    }
}

#[derive(Debug)]
pub struct ListScreen {
    cursor: usize,
    pub status: Notifier,
}

impl Default for ListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ListScreen {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            status: Notifier::new(LIST_HELP, STATUS_DELAY),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move down one row, stopping at the last item.
    pub fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn selected<'a>(&self, store: &'a ItemStore) -> Option<&'a Item> {
        store.get(self.cursor)
    }

    pub fn row(&self, store: &ItemStore, position: usize) -> Option<ListRow> {
        store.get(position).map(ListRow::from_item)
    }

    /// Turn a toggle outcome into a status message.
    pub fn report(&mut self, flag: Flag, outcome: &Toggle) {
        match outcome {
            Toggle::Committed { value, .. } => {
                self.status.show(flag.confirmation(*value));
            }
            Toggle::Rejected { error, .. } => {
                self.status.show(flag.failure(error));
            }
            Toggle::Stale => {}
        }
    }
}
