// app.rs - Front-end state wrapped around the simulation

use egui::Color32;
use life_core::{LifeError, Simulation, TimerId};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use crate::repaint::RepaintHandle;
use crate::timer::TokioScheduler;

pub type BoardSimulation = Simulation<TokioScheduler, RepaintHandle>;

pub struct LifeApp {
    pub sim: BoardSimulation,
    ticks: UnboundedReceiver<TimerId>,

    /// Slider value; pushed into the simulation when it changes.
    pub fps: f64,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
}

impl LifeApp {
    pub fn new(sim: BoardSimulation, ticks: UnboundedReceiver<TimerId>) -> Self {
        let fps = sim.rate();
        Self {
            sim,
            ticks,
            fps,
            live_color: Color32::BLACK,
            dead_color: Color32::WHITE,
            selected_pattern: 0,
        }
    }

    /// Runs one generation for every timer firing queued since last frame.
    pub fn drain_ticks(&mut self) {
        while let Ok(id) = self.ticks.try_recv() {
            if let Err(err) = self.sim.on_timer(id) {
                warn!(%err, "timer step failed");
            }
        }
    }

    /// Logs a rejected operation; the board is left as it was.
    pub fn report(&self, action: &str, result: Result<(), LifeError>) {
        if let Err(err) = result {
            warn!(action, %err, "operation rejected");
        }
    }
}
