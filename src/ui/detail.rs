use crate::app::App;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the article view for the detail screen on top of the stack.
///
/// The body is already wrapped at [`App::detail_width`]. Every line takes
/// exactly one row; anything wider than the view is cut at the border so the
/// scroll limit in `DetailScreen` matches what is drawn.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    // Borders take one row/column on each side
    let inner_width = area.width.saturating_sub(2) as usize;

    let Some(detail) = app.nav.detail_mut() else {
        return;
    };
    detail.set_visible_lines(area.height.saturating_sub(2) as usize);

    let item = app.store.get_by_id(detail.item_id());
    let lines = detail.lines(item);
    let header_lines = if item.is_some() { 4 } else { 0 };

    let text = Text::from_iter(lines.into_iter().enumerate().map(|(i, line)| {
        let line = truncate_to_width(&line, inner_width).into_owned();
        match i {
            0 if header_lines > 0 => {
                Line::styled(line, Style::default().add_modifier(Modifier::BOLD))
            }
            i if i < header_lines => Line::styled(line, Style::default().fg(Color::DarkGray)),
            _ => Line::from(line),
        }
    }));

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Article"))
        .scroll((detail.scroll() as u16, 0));

    f.render_widget(paragraph, area);
}
