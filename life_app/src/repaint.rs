// repaint.rs - Wakes the egui event loop when the board changes

use std::sync::{Arc, OnceLock};

use eframe::egui;
use life_core::{CellsChanged, GridState, RenderSink};
use tracing::debug;

/// Shared handle to the egui context. The simulation is built before the
/// window exists, so the context is attached once eframe hands it over;
/// until then repaint requests are dropped.
#[derive(Clone, Default)]
pub struct RepaintHandle {
    ctx: Arc<OnceLock<egui::Context>>,
}

impl RepaintHandle {
    pub fn attach(&self, ctx: egui::Context) {
        if self.ctx.set(ctx).is_err() {
            debug!("repaint handle already attached");
        }
    }

    pub fn request(&self) {
        if let Some(ctx) = self.ctx.get() {
            ctx.request_repaint();
        }
    }
}

// egui redraws the whole board every frame, so the change set only decides
// whether a frame is needed at all.
impl RenderSink for RepaintHandle {
    fn on_cells_changed(&mut self, _grid: &GridState, change: CellsChanged) {
        if !change.is_empty() {
            self.request();
        }
    }
}
