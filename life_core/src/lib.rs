//! Conway's Game of Life on a fixed-size board with non-wrapping edges.
//!
//! [`GridState`] stores the cells, [`rules`] holds the B3/S23 transition,
//! [`AutomatonEngine`] steps a borrowed grid and owns the repeating timer, and
//! [`Simulation`] ties them to a [`RenderSink`] for front ends. Timing comes
//! from an injected [`Scheduler`], so everything here runs without a clock.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod render;
pub mod rules;
pub mod scheduler;
pub mod simulation;

pub use config::LifeConfig;
pub use engine::{AutomatonEngine, RunMode, validate_rate};
pub use error::{LifeError, Result};
pub use grid::{CellState, Generation, GridState};
pub use patterns::{PATTERNS, Pattern};
pub use render::{CellsChanged, NoRender, RenderSink};
pub use rules::{compute_next_generation, compute_next_generation_into, count_live_neighbors};
pub use scheduler::{MIN_PERIOD, ManualScheduler, Scheduler, TimerId};
pub use simulation::{Population, Simulation};
