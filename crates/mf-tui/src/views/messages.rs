//! Message log, newest at the bottom.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::TuiApp;

/// Draw the message panel.
pub fn draw(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.messages.len().saturating_sub(visible);
    let lines: Vec<Line> = app.messages[start..]
        .iter()
        .map(|m| {
            Line::from(Span::styled(
                m.text.as_str(),
                Style::default().fg(m.style.color()),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" 消息 ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
