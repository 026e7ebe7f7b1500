//! Inventory list with the selected item's description.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::{Focus, TuiApp};

/// Draw the inventory panel.
pub fn draw(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let focused = app.focus == Focus::Inventory;
    let border = if focused { Color::Green } else { Color::DarkGray };
    let entries = app.session().inventory();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(area);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let style = if entry.usable {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if entry.usable { " *" } else { "" };
            ListItem::new(format!("{}{marker}", entry.name)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" 背包 ({}) ", entries.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
        .highlight_symbol("\u{25b6} ");

    let mut state = ListState::default();
    if focused && !entries.is_empty() {
        state.select(Some(app.inventory_cursor));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let detail = match entries.get(app.inventory_cursor) {
        Some(entry) if focused => entry.description.as_str(),
        _ if entries.is_empty() => "背包是空的。",
        _ => "按 Tab 查看物品。",
    };
    let paragraph = Paragraph::new(detail)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[1]);
}
