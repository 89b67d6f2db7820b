//! Per-screen state. Screens reference items by position or id and read
//! everything else from the [`ItemStore`](crate::store::ItemStore).

mod detail;
mod list;

pub use detail::{ContentState, DetailScreen, DETAIL_HELP, EMPTY_CONTENT, LOADING_CONTENT};
pub use list::{ListRow, ListScreen, LIST_HELP};
