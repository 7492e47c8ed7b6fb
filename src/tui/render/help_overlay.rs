use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_fixed;

const OVERLAY_W: u16 = 48;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Items", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Select item", key_style, desc_style);
    add_binding(&mut lines, " a", "Add item", key_style, desc_style);
    add_binding(&mut lines, " e/Enter", "Edit title", key_style, desc_style);
    add_binding(&mut lines, " s", "Choose status", key_style, desc_style);
    add_binding(&mut lines, " m", "Edit minutes", key_style, desc_style);
    add_binding(&mut lines, " x/Del", "Delete item", key_style, desc_style);
    add_binding(&mut lines, " drag", "Reorder with the mouse", key_style, desc_style);

    lines.push(Line::from(Span::styled(" Projects", header_style)));
    add_binding(&mut lines, " Tab/S-Tab", "Next / previous project", key_style, desc_style);
    add_binding(&mut lines, " 1-9", "Jump to project", key_style, desc_style);
    add_binding(&mut lines, " n", "New project", key_style, desc_style);
    add_binding(&mut lines, " r", "Rename project", key_style, desc_style);
    add_binding(&mut lines, " D", "Delete project", key_style, desc_style);

    lines.push(Line::from(Span::styled(" Files", header_style)));
    add_binding(&mut lines, " S", "Save backup", key_style, desc_style);
    add_binding(&mut lines, " L", "Load backup", key_style, desc_style);
    add_binding(&mut lines, " E", "Export agenda", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Cancel drag / close", key_style, desc_style);
    add_binding(&mut lines, " ?  q", "Toggle help  Quit", key_style, desc_style);

    // Sized to the content, clamped to the screen
    let overlay_area = centered_fixed(OVERLAY_W, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Key Bindings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 14;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
