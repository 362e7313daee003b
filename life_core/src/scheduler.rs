// scheduler.rs - Repeating-timer capability the engine drives the simulation with

use std::time::Duration;

use crate::error::{LifeError, Result};

/// Shortest period a repetition may be scheduled with. Faster rates are
/// rejected rather than handed to a timer that cannot honour them.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies one scheduled repetition. Firings carry the id they were
/// scheduled under so the engine can discard any that outlived a cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// "Run every `period` until cancelled" and "cancel".
///
/// A scheduler never calls back into the engine itself. It delivers the
/// `TimerId` of each firing to whoever owns the simulation, and that owner
/// calls `Simulation::on_timer` on its own thread, so every step runs to
/// completion without overlapping any other operation.
pub trait Scheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        (**self).schedule_repeating(period)
    }

    fn cancel(&mut self, id: TimerId) {
        (**self).cancel(id)
    }
}

/// Scheduler with no clock: it records what was asked of it and fires only
/// when told to. Used for headless runs and for driving the engine in tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Vec<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repetitions that are currently scheduled, oldest first.
    pub fn active(&self) -> &[(TimerId, Duration)] {
        &self.active
    }

    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }

    /// Period of the single live repetition, if any.
    pub fn period(&self) -> Option<Duration> {
        self.active.first().map(|&(_, period)| period)
    }

    /// Ids a real timer would deliver if `ticks` periods elapsed now.
    pub fn fire(&self, ticks: usize) -> Vec<TimerId> {
        self.active
            .iter()
            .flat_map(|&(id, _)| std::iter::repeat(id).take(ticks))
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.active.push((id, period));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.active.retain(|&(active, _)| active != id);
        self.cancelled.push(id);
    }
}

/// Converts a frame rate into the timer period, the way the browser loop
/// computed `1000 / fps` milliseconds.
///
/// Fails with [`LifeError::InvalidRate`] when the rate is not a positive
/// finite number, when the period does not fit in a `Duration`, or when it
/// is shorter than [`MIN_PERIOD`].
pub fn period_for_rate(frames_per_second: f64) -> Result<Duration> {
    if !(frames_per_second.is_finite() && frames_per_second > 0.0) {
        return Err(LifeError::InvalidRate(frames_per_second));
    }
    match Duration::try_from_secs_f64(1.0 / frames_per_second) {
        Ok(period) if period >= MIN_PERIOD => Ok(period),
        _ => Err(LifeError::InvalidRate(frames_per_second)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_cancel_removes() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.schedule_repeating(Duration::from_millis(100));
        let b = scheduler.schedule_repeating(Duration::from_millis(50));
        assert_ne!(a, b);
        assert_eq!(scheduler.active().len(), 2);

        scheduler.cancel(a);
        assert_eq!(scheduler.active(), &[(b, Duration::from_millis(50))]);
        assert_eq!(scheduler.cancelled(), &[a]);
        assert_eq!(scheduler.fire(3), vec![b, b, b]);
    }

    #[test]
    fn rate_to_period() {
        assert_eq!(period_for_rate(10.0), Ok(Duration::from_millis(100)));
        assert_eq!(period_for_rate(0.5), Ok(Duration::from_secs(2)));
        assert_eq!(period_for_rate(1000.0), Ok(MIN_PERIOD));
    }

    #[test]
    fn unrepresentable_periods_are_rejected() {
        // 1e20 seconds overflows Duration; 1e-12 seconds rounds to zero.
        assert_eq!(period_for_rate(1e-20), Err(LifeError::InvalidRate(1e-20)));
        assert_eq!(period_for_rate(1e12), Err(LifeError::InvalidRate(1e12)));
        assert_eq!(period_for_rate(2000.0), Err(LifeError::InvalidRate(2000.0)));
        assert!(period_for_rate(f64::MIN_POSITIVE).is_err());
        assert!(period_for_rate(f64::MAX).is_err());
    }
}
