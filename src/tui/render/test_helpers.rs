use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::MemoryStore;
use crate::model::{Config, DEFAULT_PROJECT, ProjectStore};
use crate::ops::item_ops::{NewItem, add_item};
use crate::tui::app::App;
use crate::tui::render;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _area| render::render(frame, app))
}

/// An app over an in-memory store whose default project holds one
/// item per title (status informed, 15 minutes).
pub fn app_with_titles(titles: &[&str]) -> App {
    let mut store = ProjectStore::new();
    for title in titles {
        add_item(
            &mut store,
            DEFAULT_PROJECT,
            NewItem {
                title: title.to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    }
    App::new(store, Box::new(MemoryStore::new()), Config::default())
}
