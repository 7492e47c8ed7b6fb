//! Mapping between terminal cells and drag-engine pointer units.

use ratatui::layout::Rect;

use crate::drag::{Bounds, Point};
use crate::model::config::PointerConfig;

/// Pointer units per terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_width: i32,
    pub cell_height: i32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::from_config(&PointerConfig::default())
    }
}

impl CellMetrics {
    pub fn from_config(config: &PointerConfig) -> Self {
        CellMetrics {
            cell_width: config.cell_width.max(1) as i32,
            cell_height: config.cell_height.max(1) as i32,
        }
    }

    /// Pointer position for a mouse event: the centre of the cell
    pub fn point_at(&self, column: u16, row: u16) -> Point {
        Point::new(
            i32::from(column) * self.cell_width + self.cell_width / 2,
            i32::from(row) * self.cell_height + self.cell_height / 2,
        )
    }

    pub fn bounds_of(&self, rect: Rect) -> Bounds {
        Bounds::new(
            i32::from(rect.x) * self.cell_width,
            i32::from(rect.y) * self.cell_height,
            i32::from(rect.width) * self.cell_width,
            i32::from(rect.height) * self.cell_height,
        )
    }

    /// Cell containing `point`, clamped at the origin
    pub fn cell_at(&self, point: Point) -> (u16, u16) {
        let col = point.x.div_euclid(self.cell_width).clamp(0, i32::from(u16::MAX));
        let row = point.y.div_euclid(self.cell_height).clamp(0, i32::from(u16::MAX));
        (col as u16, row as u16)
    }
}
