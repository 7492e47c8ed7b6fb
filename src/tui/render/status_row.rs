use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::tui::notify::NoticeKind;
use crate::util::unicode;

use super::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    // Notifications win over everything else while visible
    if let Some(notice) = app.notifier.current() {
        let color = match notice.kind {
            NoticeKind::Success => app.theme.green,
            NoticeKind::Error => app.theme.red,
        };
        let style = Style::default()
            .fg(app.theme.text_bright)
            .bg(color)
            .add_modifier(Modifier::BOLD);
        let text = format!(" {} ", notice.message);
        let line = Line::from(vec![Span::styled(
            unicode::truncate_to_width(&text, width),
            style,
        )]);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let mut spans: Vec<Span> = Vec::new();
    let hint = match app.mode {
        Mode::Edit => match &app.edit {
            Some(edit) if !edit.field.is_inline() => {
                let prompt = format!("{}: ", edit.field.prompt());
                let cursor_col = unicode::display_width(&prompt)
                    + unicode::byte_offset_to_display_col(&edit.buffer, edit.cursor);
                spans.push(Span::styled(
                    prompt,
                    Style::default().fg(app.theme.highlight).bg(bg),
                ));
                spans.push(Span::styled(
                    edit.buffer.clone(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ));
                if cursor_col < width {
                    frame.set_cursor_position((area.x + cursor_col as u16, area.y));
                }
                "Enter ok  Esc cancel"
            }
            _ => "Enter save  Esc cancel",
        },
        Mode::Confirm => {
            if let Some(confirm) = &app.confirm {
                spans.push(Span::styled(
                    format!("{} ", confirm.message),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ));
                spans.push(Span::styled(
                    "(y/n)",
                    Style::default().fg(app.theme.highlight).bg(bg),
                ));
            }
            ""
        }
        Mode::StatusPick => "\u{2191}\u{2193} choose  Enter set  Esc close",
        Mode::Navigate => {
            if app.drag.is_dragging() {
                spans.push(Span::styled(
                    "Release over an item to drop",
                    Style::default().fg(app.theme.drop_marker).bg(bg),
                ));
                "Esc cancel"
            } else if app.config.ui.show_key_hints {
                "a add  e title  s status  m minutes  x delete  ? help  q quit"
            } else {
                ""
            }
        }
    };

    let content_width = spans_width(&spans);
    let hint_width = unicode::display_width(hint);
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::EditField;
    use crate::tui::render::test_helpers::*;

    fn row(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn navigate_shows_key_hints() {
        let app = app_with_titles(&[]);
        assert!(row(&app).ends_with("? help  q quit"));
    }

    #[test]
    fn hints_can_be_disabled() {
        let mut app = app_with_titles(&[]);
        app.config.ui.show_key_hints = false;
        assert_eq!(row(&app), "");
    }

    #[test]
    fn prompt_edit_shows_buffer() {
        let mut app = app_with_titles(&[]);
        app.begin_edit(EditField::NewProject, "Retro");
        let out = row(&app);
        assert!(out.starts_with("Enter project name: Retro"));
        assert!(out.ends_with("Esc cancel"));
    }

    #[test]
    fn error_notice_replaces_hints() {
        let mut app = app_with_titles(&[]);
        app.notifier.error("Maximum 9 agenda items allowed");
        assert_eq!(row(&app), " Maximum 9 agenda items allowed");
    }
}
