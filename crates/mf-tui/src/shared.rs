//! Shared utilities for views: layout helpers, message lines, and popups.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Visual style for a message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Normal feedback (white).
    Info,
    /// Something good happened: an item or a save (green).
    Gain,
    /// An action failed (red).
    Error,
    /// Session bookkeeping like restart or load (cyan).
    System,
}

impl OutputStyle {
    /// Foreground color for this style.
    pub fn color(self) -> Color {
        match self {
            Self::Info => Color::White,
            Self::Gain => Color::Green,
            Self::Error => Color::Red,
            Self::System => Color::Cyan,
        }
    }
}

/// A single line in the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Visual style of this line.
    pub style: OutputStyle,
    /// The text content.
    pub text: String,
}

impl OutputLine {
    /// Create a line.
    pub fn new(style: OutputStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Gauge color for a health fraction.
pub fn health_color(fraction: f64) -> Color {
    if fraction < 0.3 {
        Color::Red
    } else if fraction < 0.6 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw the key help overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("按键说明").style(Style::default().bold()),
        Line::from(""),
        Line::from("  1-9         选择对应的选项"),
        Line::from("  Tab         切换到背包 / 返回故事"),
        Line::from("  j / k       背包中上下移动 (故事中滚动)"),
        Line::from("  u / Enter   使用选中的物品"),
        Line::from(""),
        Line::from("  s           保存游戏"),
        Line::from("  l           加载游戏"),
        Line::from("  r           重新开始 (需确认)"),
        Line::from(""),
        Line::from("  ?           显示 / 隐藏帮助"),
        Line::from("  q           退出 (需确认)"),
        Line::from("  Ctrl+C      立即退出"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" 帮助 ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Draw a yes/no question over the screen.
pub fn draw_confirm_popup(frame: &mut Frame, title: &str, question: &str) {
    let area = centered_rect(50, 25, frame.area());

    let text = vec![
        Line::from(""),
        Line::from(question.to_string()).style(Style::default().bold()),
        Line::from(""),
        Line::from("  y / Enter 确认    n / Esc 取消").style(Style::default().fg(Color::Gray)),
    ];

    let popup = Paragraph::new(text)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
