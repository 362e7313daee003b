// config.rs - Board and simulation settings

use serde::{Deserialize, Serialize};

use crate::engine::{DEFAULT_RATE, validate_rate};
use crate::error::Result;
use crate::grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH, cell_count};

/// How many recent generations are compared when looking for cycles. Off
/// unless asked for: a running board only pauses when told to.
pub const DEFAULT_CYCLE_HISTORY: usize = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Columns on the board.
    pub width: usize,
    /// Rows on the board.
    pub height: usize,
    /// Generations per second while the simulation runs.
    pub frames_per_second: f64,
    /// Recent generations remembered for cycle detection; 0 turns it off.
    pub cycle_history: usize,
    /// Seed for randomize. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            frames_per_second: DEFAULT_RATE,
            cycle_history: DEFAULT_CYCLE_HISTORY,
            seed: None,
        }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> Result<()> {
        cell_count(self.width, self.height)?;
        validate_rate(self.frames_per_second)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;

    #[test]
    fn defaults_match_reference_board() {
        let config = LifeConfig::default();
        assert_eq!((config.width, config.height), (64, 32));
        assert_eq!(config.cycle_history, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_catches_bad_values() {
        let config = LifeConfig {
            height: 0,
            ..LifeConfig::default()
        };
        assert!(matches!(config.validate(), Err(LifeError::InvalidDimensions { .. })));

        let config = LifeConfig {
            frames_per_second: -1.0,
            ..LifeConfig::default()
        };
        assert_eq!(config.validate(), Err(LifeError::InvalidRate(-1.0)));

        for rate in [1e-20, 1e12] {
            let config = LifeConfig {
                frames_per_second: rate,
                ..LifeConfig::default()
            };
            assert_eq!(config.validate(), Err(LifeError::InvalidRate(rate)));
        }

        let config = LifeConfig {
            width: usize::MAX,
            height: 2,
            ..LifeConfig::default()
        };
        assert!(matches!(config.validate(), Err(LifeError::InvalidDimensions { .. })));
    }
}
