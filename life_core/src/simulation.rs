// simulation.rs - The board plus its engine, as seen by a front end
//
// Every mutating call ends by telling the render sink what changed, so UI
// handlers reduce to a single method call each.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::LifeConfig;
use crate::engine::{AutomatonEngine, RunMode};
use crate::error::Result;
use crate::grid::{CellState, GridState};
use crate::history::CycleHistory;
use crate::patterns;
use crate::render::{CellsChanged, RenderSink};
use crate::scheduler::{Scheduler, TimerId};

/// Live/dead totals for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Population {
    pub live: usize,
    pub total: usize,
}

impl Population {
    pub fn dead(&self) -> usize {
        self.total - self.live
    }

    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.live as f32 / self.total as f32 * 100.0
        }
    }
}

pub struct Simulation<S, R> {
    grid: GridState,
    engine: AutomatonEngine<S>,
    renderer: R,
    history: CycleHistory,
    rng: StdRng,
}

impl<S: Scheduler, R: RenderSink> Simulation<S, R> {
    pub fn new(config: &LifeConfig, scheduler: S, renderer: R) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut sim = Self {
            grid: GridState::new(config.width, config.height)?,
            engine: AutomatonEngine::new(scheduler, config.frames_per_second)?,
            renderer,
            history: CycleHistory::new(config.cycle_history),
            rng,
        };
        sim.notify(CellsChanged::Full);
        Ok(sim)
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn engine(&self) -> &AutomatonEngine<S> {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn get_cell(&self, x: usize, y: usize) -> Result<CellState> {
        self.grid.get(x, y)
    }

    pub fn generation_count(&self) -> u64 {
        self.grid.generation()
    }

    pub fn run_mode(&self) -> RunMode {
        self.engine.mode()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn rate(&self) -> f64 {
        self.engine.rate()
    }

    pub fn population(&self) -> Population {
        Population {
            live: self.grid.live_count(),
            total: self.grid.width() * self.grid.height(),
        }
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> Result<CellState> {
        let state = self.grid.toggle(x, y)?;
        self.history.clear();
        self.notify(CellsChanged::Cells(vec![(x, y)]));
        Ok(state)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        self.grid.set(x, y, state)?;
        self.history.clear();
        self.notify(CellsChanged::Cells(vec![(x, y)]));
        Ok(())
    }

    /// Kills every cell, resets the generation counter and pauses.
    pub fn clear_all(&mut self) {
        self.engine.stop();
        self.grid.clear_all();
        self.history.clear();
        info!("board cleared");
        self.notify(CellsChanged::Full);
    }

    /// Fills the board with coin flips from the simulation's own generator
    /// and resets the generation counter. A running simulation keeps going.
    pub fn randomize_all(&mut self) {
        self.grid.randomize_all(&mut self.rng);
        self.after_randomize();
    }

    pub fn randomize_with<G: Rng + ?Sized>(&mut self, rng: &mut G) {
        self.grid.randomize_all(rng);
        self.after_randomize();
    }

    fn after_randomize(&mut self) {
        self.history.clear();
        info!(live = self.grid.live_count(), "board randomized");
        self.notify(CellsChanged::Full);
    }

    /// Replaces the board with a preset, resets the counter and pauses.
    pub fn apply_pattern(&mut self, name: &str) -> Result<()> {
        let pattern = patterns::find(name)?;
        self.engine.stop();
        self.grid.load(pattern.render(self.grid.width(), self.grid.height()))?;
        self.grid.reset_generation();
        self.history.clear();
        info!(pattern = pattern.name, "applied preset pattern");
        self.notify(CellsChanged::Full);
        Ok(())
    }

    /// Advances one generation by hand. Leaves the run mode alone.
    pub fn step(&mut self) -> Result<()> {
        let changed = self.engine.step(&mut self.grid)?;
        self.after_step(changed);
        Ok(())
    }

    /// Starts automatic stepping. A fresh run forgets the generations seen
    /// before, so a board paused on a cycle can be run again.
    pub fn start(&mut self, rate: f64) -> Result<()> {
        let was_running = self.engine.is_running();
        self.engine.start(rate)?;
        if was_running {
            return Ok(());
        }
        self.history.clear();
        info!(rate = self.engine.rate(), "simulation running");
        Ok(())
    }

    /// Starts at the currently configured rate.
    pub fn resume(&mut self) -> Result<()> {
        self.start(self.engine.rate())
    }

    pub fn stop(&mut self) {
        if self.engine.is_running() {
            info!(generation = self.grid.generation(), "simulation paused");
        }
        self.engine.stop();
    }

    pub fn set_rate(&mut self, rate: f64) -> Result<()> {
        self.engine.set_rate(rate)
    }

    /// Delivers one scheduler firing. Returns whether a generation was
    /// computed; stale firings from a cancelled schedule return `false`.
    pub fn on_timer(&mut self, id: TimerId) -> Result<bool> {
        match self.engine.on_timer(id, &mut self.grid)? {
            Some(changed) => {
                self.after_step(changed);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn after_step(&mut self, changed: Vec<(usize, usize)>) {
        if self.history.record(self.grid.current()) && self.engine.is_running() {
            info!(generation = self.grid.generation(), "board repeats a recent generation, pausing");
            self.engine.stop();
        }
        self.notify(CellsChanged::Cells(changed));
    }

    fn notify(&mut self, change: CellsChanged) {
        debug!(
            generation = self.grid.generation(),
            full = matches!(change, CellsChanged::Full),
            "cells changed"
        );
        self.renderer.on_cells_changed(&self.grid, change);
    }
}
