// main.rs - Desktop front end for the life engine

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;
use life_core::config::DEFAULT_CYCLE_HISTORY;
use life_core::engine::DEFAULT_RATE;
use life_core::grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use life_core::{LifeConfig, Simulation};
use tracing::info;

mod app;
mod geometry;
mod repaint;
mod timer;
mod ui;

use app::LifeApp;
use geometry::BoardGeometry;
use repaint::RepaintHandle;
use timer::TokioScheduler;

#[derive(Parser, Debug)]
#[command(name = "life", version, about = "Conway's Game of Life on a bounded board")]
struct Cli {
    /// Board width in cells.
    #[arg(long, env = "LIFE_WIDTH", default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Board height in cells.
    #[arg(long, env = "LIFE_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Generations per second while simulating.
    #[arg(long, env = "LIFE_FPS", default_value_t = DEFAULT_RATE)]
    fps: f64,

    /// Pause once the board repeats one of this many recent generations
    /// (0, the default, never pauses).
    #[arg(long, env = "LIFE_CYCLE_HISTORY", default_value_t = DEFAULT_CYCLE_HISTORY)]
    cycle_history: usize,

    /// Seed for the randomize button.
    #[arg(long, env = "LIFE_SEED")]
    seed: Option<u64>,

    /// Preset to place on the board at startup.
    #[arg(long, conflicts_with = "random")]
    pattern: Option<String>,

    /// Start from a random board.
    #[arg(long)]
    random: bool,
}

impl Cli {
    fn config(&self) -> LifeConfig {
        LifeConfig {
            width: self.width,
            height: self.height,
            frames_per_second: self.fps,
            cycle_history: self.cycle_history,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config();
    config.validate().context("invalid board configuration")?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start timer runtime")?;
    let repaint = RepaintHandle::default();
    let (scheduler, ticks) = TokioScheduler::new(runtime, repaint.clone());
    let mut sim = Simulation::new(&config, scheduler, repaint.clone())?;

    if let Some(name) = &cli.pattern {
        sim.apply_pattern(name)?;
    } else if cli.random {
        sim.randomize_all();
    }

    let board = BoardGeometry::new(egui::Pos2::ZERO, config.width, config.height).total_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([board.x.max(760.0) + 40.0, board.y + 220.0]),
        ..Default::default()
    };

    info!(
        width = config.width,
        height = config.height,
        fps = config.frames_per_second,
        "starting Game of Life"
    );

    let app = LifeApp::new(sim, ticks);
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| {
            repaint.attach(cc.egui_ctx.clone());
            Box::new(app)
        }),
    )
    .map_err(|err| anyhow!("window closed with an error: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
