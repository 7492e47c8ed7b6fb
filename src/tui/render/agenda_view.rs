use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::drag::{DragVisuals, Ghost};
use crate::model::{Item, MAX_ITEMS};
use crate::ops::item_ops::total_minutes;
use crate::ops::reorder::DropSide;
use crate::tui::app::{App, Control, EditField, EditState, Mode};
use crate::util::unicode;

use super::spans_width;

/// Rows taken by one card
pub const CARD_HEIGHT: u16 = 2;
/// Header line plus a blank row above the first card
pub const HEADER_ROWS: u16 = 2;
/// Columns on each side of the cards, where drop markers are drawn
pub const MARGIN: u16 = 2;

const BAR: &str = "\u{258C}"; // ▌
const CLOCK: &str = "\u{25F7}"; // ◷
const DELETE: &str = " \u{00D7} "; // ×
const DELETE_W: usize = 3;

/// Render the current project's agenda and publish its hit boxes
pub fn render_agenda_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let visuals = app.drag.visuals();
    app.hit_map.clear();
    render_header(frame, app, area);

    let items: Vec<Item> = app.current_items().to_vec();
    let bg = app.theme.background;
    if items.is_empty() {
        if area.height > HEADER_ROWS {
            let msg = Paragraph::new(Line::from(Span::styled(
                "  No agenda items yet. Press a to add one.",
                Style::default().fg(app.theme.dim).bg(bg),
            )));
            frame.render_widget(msg, Rect::new(area.x, area.y + HEADER_ROWS, area.width, 1));
        }
        return;
    }

    let width = area.width.saturating_sub(2 * MARGIN);
    let rows = area.height.saturating_sub(HEADER_ROWS);
    if width < 12 || rows < CARD_HEIGHT {
        return;
    }
    let visible = (rows / CARD_HEIGHT) as usize;
    let first = if app.cursor >= visible {
        app.cursor + 1 - visible
    } else {
        0
    };

    for (slot, (i, item)) in items.iter().enumerate().skip(first).take(visible).enumerate() {
        let rect = Rect::new(
            area.x + MARGIN,
            area.y + HEADER_ROWS + slot as u16 * CARD_HEIGHT,
            width,
            CARD_HEIGHT,
        );
        let controls = render_card(frame, app, item, rect, i == app.cursor, &visuals);
        app.controls.extend(controls);
        let bounds = app.metrics.bounds_of(rect);
        app.hit_map.push(item.id, bounds);
    }

    if let Some(ghost) = visuals.ghost
        && let Some(item) = items.iter().find(|i| i.id == ghost.item)
    {
        render_ghost(frame, app, item, ghost, width, area);
    }
}

fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let items = app.current_items();
    let full = items.len() >= MAX_ITEMS;
    let mut spans = vec![
        Span::styled(
            " Agenda",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " \u{00B7} {}/{} items \u{00B7} {} min",
                items.len(),
                MAX_ITEMS,
                total_minutes(items)
            ),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];

    let (button, button_style) = if full {
        (
            "[Maximum 9 Items]",
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::DIM),
        )
    } else {
        (
            "[+ Add Item]",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )
    };
    let used = spans_width(&spans);
    let button_w = unicode::display_width(button);
    let width = area.width as usize;
    if used + button_w + 2 <= width {
        let pad = width - used - button_w - 1;
        spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
        spans.push(Span::styled(button, button_style));
        if !full {
            let x = area.x + (used + pad) as u16;
            app.controls
                .push((Control::AddItem, Rect::new(x, area.y, button_w as u16, 1)));
        }
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(header, Rect::new(area.x, area.y, area.width, 1));
}

/// Inline edit for `field` on this card, if one is active
fn inline_edit<'a>(app: &'a App, field: &EditField) -> Option<&'a EditState> {
    if app.mode != Mode::Edit {
        return None;
    }
    app.edit.as_ref().filter(|edit| &edit.field == field)
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    item: &Item,
    rect: Rect,
    selected: bool,
    visuals: &DragVisuals,
) -> Vec<(Control, Rect)> {
    let theme = &app.theme;
    let mut controls = Vec::new();
    let is_source = visuals.source == Some(item.id);
    let marker = visuals
        .drop_zone
        .filter(|zone| zone.target == item.id)
        .map(|zone| zone.side);

    let bg = if selected && !is_source {
        theme.selection_bg
    } else {
        theme.background
    };
    let text_style = if is_source {
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(theme.text_bright).bg(bg)
    };
    let bar_color = if marker.is_some() {
        theme.drop_marker
    } else if is_source {
        theme.dim
    } else {
        theme.status_color(item.status)
    };
    let bar_style = Style::default().fg(bar_color).bg(bg);
    let plain = Style::default().bg(bg);
    let width = rect.width as usize;

    // Row 0: bar, title, delete button
    let title_room = width.saturating_sub(2 + DELETE_W + 1).max(1);
    let title_edit = inline_edit(app, &EditField::Title(item.id));
    let title_text = match title_edit {
        Some(edit) => unicode::truncate_to_width(&edit.buffer, title_room),
        None => unicode::truncate_to_width(&item.title, title_room),
    };
    let title_style = if title_edit.is_some() {
        text_style.add_modifier(Modifier::UNDERLINED)
    } else {
        text_style.add_modifier(Modifier::BOLD)
    };
    let title_w = unicode::display_width(&title_text);
    let mut row0 = vec![
        Span::styled(BAR, bar_style),
        Span::styled(" ", plain),
        Span::styled(title_text, title_style),
    ];
    let pad = width.saturating_sub(spans_width(&row0) + DELETE_W);
    row0.push(Span::styled(" ".repeat(pad), plain));
    row0.push(Span::styled(
        DELETE,
        Style::default().fg(theme.red).bg(bg),
    ));
    controls.push((
        Control::Title(item.id),
        clamp_to(rect, rect.x + 2, rect.y, title_w.max(1)),
    ));
    controls.push((
        Control::Delete(item.id),
        clamp_to(rect, rect.x + rect.width.saturating_sub(DELETE_W as u16), rect.y, DELETE_W),
    ));
    if let Some(edit) = title_edit {
        let col = unicode::byte_offset_to_display_col(&edit.buffer, edit.cursor).min(title_room);
        frame.set_cursor_position((rect.x + 2 + col as u16, rect.y));
    }

    // Row 1: bar, status chip, minutes
    let chip = format!(" {} {} ", item.status.icon(), item.status.label());
    let chip_style = if is_source {
        Style::default().fg(theme.dim).bg(bg)
    } else {
        Style::default()
            .fg(theme.chip_fg(item.status))
            .bg(theme.status_color(item.status))
    };
    let minutes_edit = inline_edit(app, &EditField::Minutes(item.id));
    let minutes_value = match minutes_edit {
        Some(edit) => edit.buffer.clone(),
        None => item.minutes.to_string(),
    };
    let minutes_style = if minutes_edit.is_some() {
        text_style.add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
            .fg(if is_source { theme.dim } else { theme.text })
            .bg(bg)
    };
    let chip_w = unicode::display_width(&chip);
    let minutes_text = format!("{} {} min", CLOCK, minutes_value);
    let minutes_w = unicode::display_width(&minutes_text);
    let row1 = vec![
        Span::styled(BAR, bar_style),
        Span::styled(" ", plain),
        Span::styled(chip, chip_style),
        Span::styled("  ", plain),
        Span::styled(minutes_text, minutes_style),
    ];
    let chip_x = rect.x + 2;
    controls.push((Control::Status(item.id), clamp_to(rect, chip_x, rect.y + 1, chip_w)));
    let minutes_x = chip_x + chip_w as u16 + 2;
    controls.push((
        Control::Minutes(item.id),
        clamp_to(rect, minutes_x, rect.y + 1, minutes_w),
    ));
    if let Some(edit) = minutes_edit {
        // after the clock glyph and its space
        let col = 2 + unicode::byte_offset_to_display_col(&edit.buffer, edit.cursor);
        frame.set_cursor_position((minutes_x + col as u16, rect.y + 1));
    }

    let card = Paragraph::new(vec![Line::from(row0), Line::from(row1)]).style(plain);
    frame.render_widget(card, rect);

    if let Some(side) = marker {
        render_marker(frame, app, rect, side);
    }

    controls.retain(|(_, r)| r.width > 0);
    controls
}

/// ▲ beside the top row for Before, ▼ beside the bottom row for After
fn render_marker(frame: &mut Frame, app: &App, rect: Rect, side: DropSide) {
    let (y, glyph) = match side {
        DropSide::Before => (rect.y, "\u{25B2}"),
        DropSide::After => (rect.y + 1, "\u{25BC}"),
    };
    let style = Style::default()
        .fg(app.theme.drop_marker)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    let frame_area = frame.area();
    if rect.x >= MARGIN {
        frame.render_widget(
            Paragraph::new(Span::styled(glyph, style)),
            Rect::new(rect.x - MARGIN, y, 1, 1),
        );
    }
    let right = rect.x + rect.width + 1;
    if right < frame_area.x + frame_area.width {
        frame.render_widget(
            Paragraph::new(Span::styled(glyph, style)),
            Rect::new(right, y, 1, 1),
        );
    }
}

/// Floating copy of the dragged card, kept inside the content area
fn render_ghost(frame: &mut Frame, app: &App, item: &Item, ghost: Ghost, width: u16, area: Rect) {
    let (col, row) = app.metrics.cell_at(ghost.position);
    let max_x = (area.x + area.width).saturating_sub(width).max(area.x);
    let max_y = (area.y + area.height).saturating_sub(CARD_HEIGHT).max(area.y);
    let rect = Rect::new(
        col.clamp(area.x, max_x),
        row.clamp(area.y, max_y),
        width.min(area.width),
        CARD_HEIGHT.min(area.height),
    );

    let theme = &app.theme;
    let bg = theme.ghost_bg;
    let bar_style = Style::default().fg(theme.drop_marker).bg(bg);
    let title_room = (rect.width as usize).saturating_sub(3).max(1);
    let row0 = Line::from(vec![
        Span::styled(BAR, bar_style),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            unicode::truncate_to_width(&item.title, title_room),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let row1 = Line::from(vec![
        Span::styled(BAR, bar_style),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            format!(" {} {} ", item.status.icon(), item.status.label()),
            Style::default()
                .fg(theme.chip_fg(item.status))
                .bg(theme.status_color(item.status)),
        ),
        Span::styled(
            format!("  {} {} min", CLOCK, item.minutes),
            Style::default().fg(theme.text).bg(bg),
        ),
    ]);

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(vec![row0, row1]).style(Style::default().bg(bg)),
        rect,
    );
}

/// A one-row rect starting at `x`, cut to the card's right edge
fn clamp_to(card: Rect, x: u16, y: u16, width: usize) -> Rect {
    let right = card.x + card.width;
    let width = (width.min(u16::MAX as usize) as u16).min(right.saturating_sub(x));
    Rect::new(x.min(right), y, width, 1)
}
