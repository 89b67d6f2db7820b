use crate::notify::{Notifier, STATUS_DELAY};
use crate::store::{Item, ItemId};

pub const DETAIL_HELP: &str = "q/esc=back, j/k=scroll, PgUp/PgDn=page, Home/End=top/bottom";
pub const LOADING_CONTENT: &str = "Loading article content...";
pub const EMPTY_CONTENT: &str = "No content available for this article.";

/// Title, URL, reading time, separator.
const HEADER_LINES: usize = 4;

/// Maximum scroll offset (ratatui scroll offsets are u16).
const MAX_SCROLL: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentState {
    Loading,
    /// Rendered text split into lines. Empty when the item has no body.
    Loaded(Vec<String>),
    Failed(String),
}

/// Scrollable view of one item.
///
/// Holds only the item's id; header fields are looked up in the store at
/// draw time so flag changes show up without a reload.
#[derive(Debug)]
pub struct DetailScreen {
    item_id: ItemId,
    generation: u64,
    content: ContentState,
    scroll: usize,
    /// Body rows visible at the last draw.
    visible_lines: usize,
    pub status: Notifier,
}

impl DetailScreen {
    pub fn new(item_id: ItemId, generation: u64) -> Self {
        Self {
            item_id,
            generation,
            content: ContentState::Loading,
            scroll: 0,
            visible_lines: 0,
            status: Notifier::new(DETAIL_HELP, STATUS_DELAY),
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Load generation this screen is waiting for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn set_loaded(&mut self, text: &str) {
        self.content = ContentState::Loaded(text.lines().map(str::to_string).collect());
        self.clamp_scroll();
    }

    pub fn set_failed(&mut self, error: impl Into<String>) {
        self.content = ContentState::Failed(error.into());
        self.clamp_scroll();
    }

    /// Header and body lines as drawn. `item` is `None` only if the store
    /// lost the id, in which case the header is left out.
    pub fn lines(&self, item: Option<&Item>) -> Vec<String> {
        let mut lines = Vec::with_capacity(HEADER_LINES + self.content_len());
        if let Some(item) = item {
            let time = match item.reading_time {
                Some(m) => format!("{m}m"),
                None => "Unknown".to_string(),
            };
            lines.push(item.title.clone());
            lines.push(format!("URL: {}", item.url));
            lines.push(format!("Reading time: {time}"));
            lines.push("─".repeat(40));
        }
        match &self.content {
            ContentState::Loading => lines.push(LOADING_CONTENT.to_string()),
            ContentState::Loaded(body) if body.is_empty() => lines.push(EMPTY_CONTENT.to_string()),
            ContentState::Loaded(body) => lines.extend(body.iter().cloned()),
            ContentState::Failed(error) => lines.push(format!("Error loading article: {error}")),
        }
        lines
    }

    fn content_len(&self) -> usize {
        match &self.content {
            ContentState::Loaded(body) if !body.is_empty() => body.len(),
            _ => 1,
        }
    }

    fn total_lines(&self) -> usize {
        HEADER_LINES + self.content_len()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Record the viewport height from the latest draw and re-clamp.
    pub fn set_visible_lines(&mut self, lines: usize) {
        self.visible_lines = lines;
        self.clamp_scroll();
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
        self.clamp_scroll();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.visible_lines.max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.visible_lines.max(1));
    }

    pub fn scroll_home(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_end(&mut self) {
        self.scroll = MAX_SCROLL;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max_scroll = self.total_lines().saturating_sub(self.visible_lines);
        self.scroll = self.scroll.min(max_scroll).min(MAX_SCROLL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sample_item;
    use pretty_assertions::assert_eq;

    fn loaded(lines: usize, visible: usize) -> DetailScreen {
        let mut detail = DetailScreen::new(ItemId(1), 1);
        let text = (0..lines).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        detail.set_loaded(&text);
        detail.set_visible_lines(visible);
        detail
    }

    #[test]
    fn test_header_and_placeholder() {
        let mut item = sample_item(1);
        item.reading_time = Some(5);
        let detail = DetailScreen::new(ItemId(1), 1);

        let lines = detail.lines(Some(&item));
        assert_eq!(lines[0], "Item 1");
        assert_eq!(lines[1], "URL: https://example.com/1");
        assert_eq!(lines[2], "Reading time: 5m");
        assert_eq!(lines[4], LOADING_CONTENT);
    }

    #[test]
    fn test_unknown_reading_time() {
        let detail = DetailScreen::new(ItemId(1), 1);
        let lines = detail.lines(Some(&sample_item(1)));
        assert_eq!(lines[2], "Reading time: Unknown");
    }

    #[test]
    fn test_empty_and_failed_content() {
        let mut detail = DetailScreen::new(ItemId(1), 1);
        detail.set_loaded("");
        assert_eq!(detail.lines(None), vec![EMPTY_CONTENT.to_string()]);

        detail.set_failed("Request timed out");
        assert_eq!(
            detail.lines(None),
            vec!["Error loading article: Request timed out".to_string()]
        );
    }

    #[test]
    fn test_scroll_is_clamped() {
        // 4 header + 20 body lines in a 10 line viewport
        let mut detail = loaded(20, 10);
        detail.scroll_up(1);
        assert_eq!(detail.scroll(), 0);

        detail.scroll_down(3);
        assert_eq!(detail.scroll(), 3);

        detail.page_down();
        assert_eq!(detail.scroll(), 13);
        detail.page_down();
        assert_eq!(detail.scroll(), 14);

        detail.page_up();
        assert_eq!(detail.scroll(), 4);

        detail.scroll_end();
        assert_eq!(detail.scroll(), 14);
        detail.scroll_home();
        assert_eq!(detail.scroll(), 0);
    }

    #[test]
    fn test_short_content_does_not_scroll() {
        let mut detail = loaded(2, 10);
        detail.scroll_down(5);
        detail.scroll_end();
        assert_eq!(detail.scroll(), 0);
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut detail = loaded(50, 10);
        detail.scroll_end();
        assert_eq!(detail.scroll(), 44);
        detail.set_failed("boom");
        assert_eq!(detail.scroll(), 0);
    }
}
