use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: HashMap<&'static str, JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` now and then every `period`. Each run gets its own task, so
    /// a run that never finishes does not hold back later ticks. A task
    /// registered under an existing name replaces the old one.
    pub fn every<F, Fut>(&mut self, name: &'static str, period: Duration, mut task: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Dropping the set aborts runs still in flight.
            let mut runs = JoinSet::new();
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        debug!(task = name, in_flight = runs.len(), "tick");
                        runs.spawn(task());
                    }
                    Some(_) = runs.join_next(), if !runs.is_empty() => {}
                }
            }
        });

        if let Some(previous) = self.tasks.insert(name, handle) {
            previous.abort();
        }
        info!(task = name, period_secs = period.as_secs_f64(), "scheduled");
    }

    pub fn cancel(&mut self, name: &str) -> bool {
        match self.tasks.remove(name) {
            Some(handle) => {
                handle.abort();
                info!(task = name, "cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.tasks
            .get(name)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tasks.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn shutdown(&mut self) {
        for (name, handle) in self.tasks.drain() {
            handle.abort();
            debug!(task = name, "stopped");
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
