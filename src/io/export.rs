use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::model::item::Item;
use crate::ops::item_ops::total_minutes;

use super::store::atomic_write;

/// Error type for agenda snapshots
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Please add at least one agenda item before exporting")]
    Empty,
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// `agenda-YYYY-MM-DD.md`
pub fn default_export_name(date: NaiveDate) -> String {
    format!("agenda-{}.md", date.format("%Y-%m-%d"))
}

/// Render a project's agenda as a Markdown table
pub fn render_markdown(project: &str, items: &[Item]) -> Result<String, ExportError> {
    if items.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut out = format!("# {}\n\n", escape_cell(project));
    out.push_str("| # | Item | Status | Minutes |\n");
    out.push_str("|--:|------|--------|--------:|\n");
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            i + 1,
            escape_cell(&item.title),
            item.status.label(),
            item.minutes
        ));
    }
    out.push_str(&format!("\n**Total:** {} min\n", total_minutes(items)));
    Ok(out)
}

pub fn export_markdown(path: &Path, project: &str, items: &[Item]) -> Result<(), ExportError> {
    let text = render_markdown(project, items)?;
    atomic_write(path, text.as_bytes()).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), items = items.len(), "agenda exported");
    Ok(())
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
