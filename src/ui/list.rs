use crate::app::App;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const ID_WIDTH: u16 = 7;
const STATUS_WIDTH: u16 = 6;
const TAGS_WIDTH: u16 = 24;
const TIME_WIDTH: u16 = 5;
const HIGHLIGHT_SYMBOL: &str = "> ";

/// Render the item table. Rows are rebuilt from the store on every call.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!("Articles ({})", app.store.len()));

    if app.store.is_empty() {
        f.render_widget(Paragraph::new("No articles").block(block), area);
        return;
    }

    // Inner width minus the fixed columns, their spacing and the highlight symbol
    let title_width = area
        .width
        .saturating_sub(2 + ID_WIDTH + STATUS_WIDTH + TAGS_WIDTH + TIME_WIDTH + 4)
        .saturating_sub(HIGHLIGHT_SYMBOL.len() as u16) as usize;

    let list = app.nav.list();
    let rows = (0..app.store.len()).filter_map(|pos| {
        let row = list.row(&app.store, pos)?;
        let read = app.store.get(pos).is_some_and(|item| item.read);
        let style = if read {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Some(
            Row::new(vec![
                Cell::from(row.id),
                Cell::from(row.status),
                Cell::from(truncate_to_width(&row.title, title_width).into_owned()),
                Cell::from(truncate_to_width(&row.tags, TAGS_WIDTH as usize).into_owned()),
                Cell::from(row.time),
            ])
            .style(style),
        )
    });

    let header = Row::new(vec!["ID", "Status", "Title", "Tags", "Time"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Length(ID_WIDTH),
            Constraint::Length(STATUS_WIDTH),
            Constraint::Fill(1),
            Constraint::Length(TAGS_WIDTH),
            Constraint::Length(TIME_WIDTH),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
    .highlight_symbol(HIGHLIGHT_SYMBOL);

    let mut state = TableState::default().with_selected(Some(list.cursor()));
    f.render_stateful_widget(table, area, &mut state);
}
