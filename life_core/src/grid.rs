// grid.rs - Cell storage for a fixed-size, non-wrapping board

use rand::Rng;
use tracing::debug;

use crate::error::{LifeError, Result};

/// Default board size, columns by rows.
pub const DEFAULT_WIDTH: usize = 64;
pub const DEFAULT_HEIGHT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn flipped(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

/// Number of cells on a `width` by `height` board. Both sides must be
/// non-zero and the product must fit in `usize`.
pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(LifeError::InvalidDimensions { width, height }),
    }
}

/// One full generation's worth of cells, row-major.
///
/// Produced by the transition rule and handed back to [`GridState::commit`].
/// It carries its own dimensions so a buffer computed for a different board
/// is caught at commit time instead of silently scrambling rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Generation {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Generation {
    pub fn dead(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::Dead; width * height],
        }
    }

    /// Resizes to `width` by `height`, all dead, keeping the allocation.
    pub(crate) fn reshape(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, CellState::Dead);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Unchecked read; the caller has already validated the coordinate.
    pub(crate) fn at(&self, x: usize, y: usize) -> CellState {
        self.cells[y * self.width + x]
    }

    pub(crate) fn put(&mut self, x: usize, y: usize, state: CellState) {
        self.cells[y * self.width + x] = state;
    }

    pub fn get(&self, x: usize, y: usize) -> Option<CellState> {
        (x < self.width && y < self.height).then(|| self.at(x, y))
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(LifeError::IndexOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.put(x, y, state);
        Ok(())
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Coordinates whose state differs between `self` and `other`.
    pub fn diff(&self, other: &Generation) -> Vec<(usize, usize)> {
        let width = self.width;
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(|(i, _)| (i % width, i / width))
            .collect()
    }
}

/// The board: current generation, a spare buffer the next one is written
/// into, and the generation counter. Committing swaps the two buffers, so
/// stepping does not allocate once the board exists.
#[derive(Debug, Clone)]
pub struct GridState {
    current: Generation,
    next: Generation,
    generation: u64,
}

impl GridState {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        cell_count(width, height)?;
        Ok(Self {
            current: Generation::dead(width, height),
            next: Generation::dead(width, height),
            generation: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.current.width
    }

    pub fn height(&self) -> usize {
        self.current.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    fn check(&self, x: usize, y: usize) -> Result<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(LifeError::IndexOutOfRange {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState> {
        self.check(x, y)?;
        Ok(self.current.at(x, y))
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        self.check(x, y)?;
        self.current.put(x, y, state);
        Ok(())
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<CellState> {
        self.check(x, y)?;
        let flipped = self.current.at(x, y).flipped();
        self.current.put(x, y, flipped);
        Ok(flipped)
    }

    pub fn clear_all(&mut self) {
        self.current.cells.fill(CellState::Dead);
        self.generation = 0;
    }

    /// Fills the board with independent fair coin flips and starts counting
    /// generations from zero again.
    pub fn randomize_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in self.current.cells.iter_mut() {
            *cell = CellState::from(rng.gen_bool(0.5));
        }
        self.generation = 0;
    }

    /// Replaces the current generation wholesale without touching the counter.
    pub(crate) fn load(&mut self, cells: Generation) -> Result<()> {
        self.ensure_same_shape(&cells)?;
        self.current = cells;
        Ok(())
    }

    pub(crate) fn reset_generation(&mut self) {
        self.generation = 0;
    }

    /// Lends out the spare buffer to write the next generation into. Its
    /// contents are whatever generation was displaced last; hand it back
    /// through [`commit`](Self::commit).
    pub(crate) fn take_spare(&mut self) -> Generation {
        let empty = Generation {
            width: self.width(),
            height: self.height(),
            cells: Vec::new(),
        };
        std::mem::replace(&mut self.next, empty)
    }

    /// Swaps `next` in as the current generation and bumps the counter. The
    /// displaced generation becomes the spare buffer.
    pub fn commit(&mut self, next: Generation) -> Result<()> {
        self.ensure_same_shape(&next)?;
        self.next = next;
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        debug!(generation = self.generation, "committed generation");
        Ok(())
    }

    fn ensure_same_shape(&self, other: &Generation) -> Result<()> {
        if other.width != self.width() || other.height != self.height() {
            return Err(LifeError::DimensionMismatch {
                expected: self.current.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }

    /// The generation being displayed.
    pub fn current(&self) -> &Generation {
        &self.current
    }

    pub fn live_count(&self) -> usize {
        self.current.live_count()
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        let width = self.width();
        self.current
            .cells
            .iter()
            .enumerate()
            .map(move |(i, &state)| (i % width, i / width, state))
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells()
            .filter(|&(_, _, state)| state.is_alive())
            .map(|(x, y, _)| (x, y))
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            current: Generation::dead(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            next: Generation::dead(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            generation: 0,
        }
    }
}
