// timer.rs - Repeating timers on a tokio runtime
//
// Each schedule is a task around `tokio::time::interval` that pushes its
// TimerId into a channel. The UI thread drains the channel once per frame and
// hands every id to the simulation, so steps never overlap.

use std::collections::HashMap;
use std::time::Duration;

use life_core::{MIN_PERIOD, Scheduler, TimerId};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::repaint::RepaintHandle;

pub struct TokioScheduler {
    runtime: Runtime,
    sender: UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
    repaint: RepaintHandle,
}

impl TokioScheduler {
    /// Returns the scheduler and the receiving end its firings arrive on.
    pub fn new(runtime: Runtime, repaint: RepaintHandle) -> (Self, UnboundedReceiver<TimerId>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            runtime,
            sender,
            tasks: HashMap::new(),
            next_id: 0,
            repaint,
        };
        (scheduler, receiver)
    }

    #[cfg(test)]
    fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        // `interval` panics on a zero period.
        let period = period.max(MIN_PERIOD);

        let task = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the first step is due
            // one full period after scheduling.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if sender.send(id).is_err() {
                    break;
                }
                repaint.request();
            }
        });

        debug!(timer = id.0, ?period, "spawned timer task");
        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
            debug!(timer = id.0, "aborted timer task");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
