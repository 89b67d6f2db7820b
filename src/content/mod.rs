//! Conversion of a fetched item into terminal-displayable text.

use thiserror::Error;

use crate::store::ItemDetail;
use crate::util::strip_control_chars;

/// Narrowest width the renderer is asked to wrap at.
pub const MIN_RENDER_WIDTH: usize = 20;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to convert HTML: {0}")]
    Html(#[from] html2text::Error),
    #[error("Render width {0} is too narrow")]
    TooNarrow(usize),
}

/// Turns a full item record into a text block wrapped at `width` columns.
///
/// Implementations are pure: same input, same output, no side effects.
pub trait Renderer: Send + Sync {
    fn render(&self, detail: &ItemDetail, width: usize) -> Result<String, RenderError>;
}

/// Renders the HTML body as plain wrapped text.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, detail: &ItemDetail, width: usize) -> Result<String, RenderError> {
        if width < MIN_RENDER_WIDTH {
            return Err(RenderError::TooNarrow(width));
        }
        let text = html2text::from_read(detail.content.as_bytes(), width)?;
        // Item bodies come from arbitrary web pages
        let text = strip_control_chars(&text);
        Ok(text.trim().to_string())
    }
}
