use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Control};
use crate::util::unicode;

use super::spans_width;

/// Render the tab bar: one tab per project plus the new-tab button,
/// with a separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    // Split into tab row and separator row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &mut App, area: Rect) -> Vec<usize> {
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let mut controls: Vec<(Control, Rect)> = Vec::new();
    let sep = Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );

    // Leading icon
    let bg_style = Style::default().bg(app.theme.background);
    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{25B6}",
        Style::default().fg(app.theme.highlight).bg(app.theme.background),
    ));
    spans.push(Span::styled(" ", bg_style));

    let current = app.store.current_index();
    for (i, name) in app.store.names().enumerate() {
        let label = format!(" {} ", name);
        let start = spans_width(&spans);
        let width = unicode::display_width(&label);
        controls.push((Control::Tab(i), cell_rect(area, start, width)));
        spans.push(Span::styled(label, tab_style(app, i == current)));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    // New project button
    let start = spans_width(&spans);
    controls.push((Control::NewTab, cell_rect(area, start, 3)));
    spans.push(Span::styled(
        " + ",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(Style::default().bg(app.theme.background));
    frame.render_widget(tabs, area);

    // Tabs that fell off the right edge are not clickable
    let right = area.x + area.width;
    app.controls
        .extend(controls.into_iter().filter(|(_, rect)| rect.x < right));
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let mut line: String = String::with_capacity(width * 3);
    for col in 0..width {
        if sep_cols.contains(&col) {
            line.push('\u{2534}');
        } else {
            line.push('\u{2500}');
        }
    }
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

fn cell_rect(area: Rect, start: usize, width: usize) -> Rect {
    let x = area.x.saturating_add(start.min(u16::MAX as usize) as u16);
    let right = area.x + area.width;
    let width = (width.min(u16::MAX as usize) as u16).min(right.saturating_sub(x));
    Rect::new(x, area.y, width, 1)
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::project_ops::add_project;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    #[test]
    fn tabs_with_separators() {
        let mut app = app_with_titles(&[]);
        add_project(&mut app.store, "Retro").unwrap();
        let output = render_to_string(40, 2, |frame, area| {
            render_tab_bar(frame, &mut app, area);
        });
        assert_snapshot!(output, @r"
         ▶  Project 1 │ Retro │ +
        ──────────────┴───────┴─────────────────
        ");
    }

    #[test]
    fn tabs_register_click_targets() {
        let mut app = app_with_titles(&[]);
        add_project(&mut app.store, "Retro").unwrap();
        render_to_string(40, 2, |frame, area| {
            render_tab_bar(frame, &mut app, area);
        });
        // " ▶ " is 3 cells, " Project 1 " is 11, then the separator
        assert_eq!(app.control_at(3, 0), Some(Control::Tab(0)));
        assert_eq!(app.control_at(13, 0), Some(Control::Tab(0)));
        assert_eq!(app.control_at(14, 0), None);
        assert_eq!(app.control_at(15, 0), Some(Control::Tab(1)));
        assert_eq!(app.control_at(23, 0), Some(Control::NewTab));
        assert_eq!(app.control_at(23, 1), None);
    }
}
