// error.rs - Contract violations surfaced by the life engine

use thiserror::Error;

/// Everything the engine can reject. None of these are transient: the caller
/// passed something the board cannot accept, and state is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    IndexOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("simulation rate must be a positive finite number of frames per second, got {0}")]
    InvalidRate(f64),
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("generation buffer holds {actual} cells but the board has {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("no preset pattern named {0:?}")]
    UnknownPattern(String),
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;
