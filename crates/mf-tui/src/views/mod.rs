//! Screen layout and panel rendering.

pub mod inventory;
pub mod messages;
pub mod scene;

use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph};

use crate::app::{Focus, TuiApp};
use crate::shared::health_color;

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &TuiApp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title and health
            Constraint::Min(8),    // Scene and inventory
            Constraint::Length(7), // Messages
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(rows[1]);
    scene::draw(frame, app, columns[0]);
    inventory::draw(frame, app, columns[1]);

    messages::draw(frame, app, rows[2]);

    let status = Paragraph::new(status_hint(app))
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, rows[3]);

    if app.show_help {
        crate::shared::draw_help_popup(frame);
    }
    if let Some(confirm) = app.confirm {
        crate::shared::draw_confirm_popup(frame, confirm.title(), confirm.question());
    }
}

fn draw_header(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(24)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" 神秘森林 ", Style::default().fg(Color::Green).bold()),
        Span::styled(
            format!("· {}", app.scene.title),
            Style::default().fg(Color::White),
        ),
    ]));
    frame.render_widget(title, columns[0]);

    let player = app.session().player();
    let fraction = f64::from(player.health()) / f64::from(player.max_health().max(1));
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(health_color(fraction)).bg(Color::DarkGray))
        .ratio(fraction.clamp(0.0, 1.0))
        .label(Span::styled(
            format!("生命值 {}/{}", player.health(), player.max_health()),
            Style::default().fg(Color::White),
        ));
    frame.render_widget(gauge, columns[1]);
}

fn status_hint(app: &TuiApp) -> &'static str {
    if app.confirm.is_some() {
        " y/Enter:确认  n/Esc:取消"
    } else if app.scene.terminal {
        " r:重新开始  l:读档  q:退出  ?:帮助"
    } else {
        match app.focus {
            Focus::Story => " 1-9:选择  Tab:背包  s:保存  l:读档  r:重来  ?:帮助  q:退出",
            Focus::Inventory => " j/k:移动  u/Enter:使用  Tab/Esc:返回  ?:帮助  q:退出",
        }
    }
}
