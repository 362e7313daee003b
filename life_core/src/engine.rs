// engine.rs - Generation stepping and the idle/running state machine

use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::grid::GridState;
use crate::rules::compute_next_generation_into;
use crate::scheduler::{Scheduler, TimerId, period_for_rate};

/// Default simulation speed in generations per second.
pub const DEFAULT_RATE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Idle,
    Running,
}

/// Rejects rates that would schedule a zero, negative, undefined or
/// unrepresentable period.
pub fn validate_rate(rate: f64) -> Result<f64> {
    period_for_rate(rate).map(|_| rate)
}

/// Applies transitions to a borrowed [`GridState`] and owns the repeating
/// timer that does so automatically while running.
#[derive(Debug)]
pub struct AutomatonEngine<S> {
    scheduler: S,
    mode: RunMode,
    timer: Option<TimerId>,
    rate: f64,
}

impl<S: Scheduler> AutomatonEngine<S> {
    pub fn new(scheduler: S, rate: f64) -> Result<Self> {
        Ok(Self {
            scheduler,
            mode: RunMode::Idle,
            timer: None,
            rate: validate_rate(rate)?,
        })
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.mode == RunMode::Running
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn active_timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Advances `grid` by one generation and returns the cells that changed.
    /// Works in either mode and never changes it.
    pub fn step(&self, grid: &mut GridState) -> Result<Vec<(usize, usize)>> {
        let mut next = grid.take_spare();
        compute_next_generation_into(grid.current(), &mut next);
        let changed = next.diff(grid.current());
        grid.commit(next)?;
        Ok(changed)
    }

    /// Begins stepping automatically at `rate` generations per second.
    /// Already running is a no-op; the existing schedule is kept.
    pub fn start(&mut self, rate: f64) -> Result<()> {
        let period = period_for_rate(rate)?;
        if self.is_running() {
            debug!("start ignored, simulation already running");
            return Ok(());
        }
        self.rate = rate;
        self.schedule(period);
        self.mode = RunMode::Running;
        Ok(())
    }

    /// Cancels automatic stepping. Once this returns no firing from the old
    /// schedule will step the grid, even one already queued.
    pub fn stop(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
            debug!(timer = id.0, "stopped simulation");
        }
        self.mode = RunMode::Idle;
    }

    /// Changes the speed. While running the timer is restarted so the new
    /// period applies from now on rather than after the pending wait.
    pub fn set_rate(&mut self, rate: f64) -> Result<()> {
        let period = period_for_rate(rate)?;
        self.rate = rate;
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
            self.schedule(period);
        }
        Ok(())
    }

    /// Handles one firing from the scheduler. Steps only if `id` belongs to
    /// the live schedule; anything else is a leftover and is dropped.
    pub fn on_timer(
        &self,
        id: TimerId,
        grid: &mut GridState,
    ) -> Result<Option<Vec<(usize, usize)>>> {
        if self.timer != Some(id) {
            debug!(timer = id.0, "dropping stale timer firing");
            return Ok(None);
        }
        self.step(grid).map(Some)
    }

    fn schedule(&mut self, period: Duration) {
        let id = self.scheduler.schedule_repeating(period);
        debug!(timer = id.0, rate = self.rate, ?period, "scheduled simulation timer");
        self.timer = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use crate::grid::CellState;
    use crate::scheduler::{MIN_PERIOD, ManualScheduler};

    fn engine() -> AutomatonEngine<ManualScheduler> {
        AutomatonEngine::new(ManualScheduler::new(), DEFAULT_RATE).unwrap()
    }

    #[test]
    fn starts_idle() {
        let engine = engine();
        assert_eq!(engine.mode(), RunMode::Idle);
        assert!(engine.scheduler().active().is_empty());
    }

    #[test]
    fn start_is_idempotent() {
        let mut engine = engine();
        engine.start(5.0).unwrap();
        engine.start(20.0).unwrap();
        assert_eq!(engine.mode(), RunMode::Running);
        assert_eq!(engine.scheduler().active().len(), 1);
        assert_eq!(engine.scheduler().period(), Some(Duration::from_millis(200)));
        assert_eq!(engine.rate(), 5.0);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut engine = engine();
        engine.stop();
        assert_eq!(engine.mode(), RunMode::Idle);

        engine.start(5.0).unwrap();
        engine.stop();
        engine.stop();
        assert_eq!(engine.mode(), RunMode::Idle);
        assert!(engine.scheduler().active().is_empty());
        assert_eq!(engine.scheduler().cancelled().len(), 1);
    }

    #[test]
    fn invalid_rates_are_rejected_without_changing_mode() {
        let mut engine = engine();
        for rate in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(engine.start(rate), Err(LifeError::InvalidRate(_))));
            assert_eq!(engine.mode(), RunMode::Idle);
        }

        engine.start(2.0).unwrap();
        assert!(engine.start(0.0).is_err());
        assert_eq!(engine.mode(), RunMode::Running);
        assert!(engine.set_rate(-1.0).is_err());
        assert_eq!(engine.rate(), 2.0);
        assert!(AutomatonEngine::new(ManualScheduler::new(), 0.0).is_err());
    }

    #[test]
    fn extreme_positive_rates_are_rejected_without_scheduling() {
        let mut engine = engine();
        for rate in [1e-20, 1e12, f64::MIN_POSITIVE, f64::MAX] {
            assert_eq!(engine.start(rate), Err(LifeError::InvalidRate(rate)));
            assert_eq!(engine.mode(), RunMode::Idle);
            assert_eq!(engine.rate(), DEFAULT_RATE);
            assert!(engine.scheduler().active().is_empty());
        }
        assert!(AutomatonEngine::new(ManualScheduler::new(), 1e-20).is_err());
        assert!(AutomatonEngine::new(ManualScheduler::new(), 1e12).is_err());

        engine.start(4.0).unwrap();
        let live = engine.active_timer().unwrap();
        assert_eq!(engine.set_rate(1e12), Err(LifeError::InvalidRate(1e12)));
        assert_eq!(engine.set_rate(1e-20), Err(LifeError::InvalidRate(1e-20)));
        assert_eq!(engine.rate(), 4.0);
        assert_eq!(engine.active_timer(), Some(live));
        assert_eq!(engine.scheduler().active(), &[(live, Duration::from_millis(250))]);
        assert!(engine.scheduler().cancelled().is_empty());
    }

    #[test]
    fn fastest_accepted_rate_schedules_the_minimum_period() {
        let mut engine = engine();
        engine.start(1000.0).unwrap();
        assert_eq!(engine.scheduler().period(), Some(MIN_PERIOD));
    }

    #[test]
    fn set_rate_restarts_live_timer() {
        let mut engine = engine();
        engine.set_rate(4.0).unwrap();
        assert!(engine.scheduler().active().is_empty());

        engine.start(4.0).unwrap();
        let first = engine.active_timer().unwrap();
        engine.set_rate(50.0).unwrap();
        let second = engine.active_timer().unwrap();

        assert_ne!(first, second);
        assert_eq!(engine.scheduler().cancelled(), &[first]);
        assert_eq!(engine.scheduler().active(), &[(second, Duration::from_millis(20))]);
        assert_eq!(engine.mode(), RunMode::Running);
    }

    #[test]
    fn step_keeps_mode_and_reports_changes() {
        let engine = engine();
        let mut grid = GridState::new(5, 5).unwrap();
        grid.set(2, 2, CellState::Alive).unwrap();

        let changed = engine.step(&mut grid).unwrap();
        assert_eq!(changed, vec![(2, 2)]);
        assert_eq!(grid.generation(), 1);
        assert_eq!(grid.live_count(), 0);
        assert_eq!(engine.mode(), RunMode::Idle);
    }

    #[test]
    fn steps_alternate_between_two_buffers() {
        let engine = engine();
        let mut grid = GridState::new(5, 5).unwrap();
        for x in 1..4 {
            grid.set(x, 2, CellState::Alive).unwrap();
        }
        let horizontal = grid.current().clone();

        engine.step(&mut grid).unwrap();
        let vertical = grid.current().clone();
        assert_eq!(grid.take_spare(), horizontal);

        engine.step(&mut grid).unwrap();
        engine.step(&mut grid).unwrap();
        assert_eq!(grid.current(), &vertical);
        assert_eq!(grid.generation(), 3);
    }

    #[test]
    fn stale_firings_do_not_step() {
        let mut engine = engine();
        let mut grid = GridState::new(4, 4).unwrap();
        engine.start(10.0).unwrap();
        let id = engine.active_timer().unwrap();

        assert!(engine.on_timer(id, &mut grid).unwrap().is_some());
        assert_eq!(grid.generation(), 1);

        engine.stop();
        assert!(engine.on_timer(id, &mut grid).unwrap().is_none());
        assert_eq!(grid.generation(), 1);
    }
}
