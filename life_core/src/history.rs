// history.rs - Detects when the board revisits a recent generation

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::Generation;

/// Remembers hashes of the last few generations so a running simulation can
/// pause once it has settled into a still life or short oscillator.
#[derive(Debug, Clone)]
pub struct CycleHistory {
    hashes: VecDeque<u64>,
    capacity: usize,
}

impl CycleHistory {
    /// A capacity of zero disables detection.
    pub fn new(capacity: usize) -> Self {
        Self {
            hashes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.hashes.clear();
    }

    /// Records `cells` and reports whether it matches one of the remembered
    /// generations.
    pub fn record(&mut self, cells: &Generation) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let hash = hash_generation(cells);
        if self.hashes.contains(&hash) {
            return true;
        }
        if self.hashes.len() == self.capacity {
            self.hashes.pop_front();
        }
        self.hashes.push_back(hash);
        false
    }
}

fn hash_generation(cells: &Generation) -> u64 {
    let mut hasher = DefaultHasher::new();
    cells.hash(&mut hasher);
    hasher.finish()
}
