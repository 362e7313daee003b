// render.rs - Notification seam towards whatever paints the board

use crate::grid::GridState;

/// What changed since the last notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellsChanged {
    /// Only these cells differ; everything else is as last painted.
    Cells(Vec<(usize, usize)>),
    /// Repaint everything.
    Full,
}

impl CellsChanged {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellsChanged::Cells(cells) if cells.is_empty())
    }
}

pub trait RenderSink {
    fn on_cells_changed(&mut self, grid: &GridState, change: CellsChanged);
}

/// Discards notifications, for callers that read the grid themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRender;

impl RenderSink for NoRender {
    fn on_cells_changed(&mut self, _grid: &GridState, _change: CellsChanged) {}
}
