use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::Status;
use crate::tui::app::{App, Control};

use super::centered_fixed;

const PICKER_W: u16 = 24;

/// Popup listing every status, opened from a card's chip
pub fn render_status_picker(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(picker) = app.picker else {
        return;
    };
    let height = Status::ALL.len() as u16 + 2;
    let popup = centered_fixed(PICKER_W, height, area);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let inner_w = popup.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, status) in Status::ALL.into_iter().enumerate() {
        let selected = i == picker.cursor;
        let pointer = if selected { "\u{25B8}" } else { " " };
        let chip = format!(" {} {} ", status.icon(), status.label());
        let chip_style = Style::default()
            .fg(app.theme.chip_fg(status))
            .bg(app.theme.status_color(status));
        let chip_style = if selected {
            chip_style.add_modifier(Modifier::BOLD)
        } else {
            chip_style
        };
        lines.push(Line::from(vec![
            Span::styled(
                pointer,
                Style::default().fg(app.theme.highlight).bg(bg),
            ),
            Span::styled(chip, chip_style),
        ]));
        let row = popup.y + 1 + i as u16;
        if row < popup.y + popup.height.saturating_sub(1) {
            app.controls.push((
                Control::PickStatus(status),
                Rect::new(popup.x + 1, row, inner_w as u16, 1),
            ));
        }
    }

    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
