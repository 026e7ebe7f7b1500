//! The current scene: narrative text, then numbered choices or the ending.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{Focus, TuiApp};

/// Draw the scene panel.
pub fn draw(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let scene = &app.scene;
    let mut lines = vec![
        Line::from(Span::styled(
            scene.description.as_str(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    if let Some(ending) = scene.ending {
        lines.push(Line::from(Span::styled(
            ending.message(),
            Style::default().fg(Color::Yellow).bold(),
        )));
    } else if scene.terminal {
        lines.push(Line::from(Span::styled(
            "故事到这里结束了。",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        for (i, choice) in scene.choices.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!(" {}. ", i + 1), Style::default().fg(Color::Cyan).bold()),
                Span::raw(choice.label.as_str()),
            ]));
        }
    }

    let border = if app.focus == Focus::Story {
        Color::Green
    } else {
        Color::DarkGray
    };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", scene.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.story_scroll, 0));
    frame.render_widget(paragraph, area);
}
