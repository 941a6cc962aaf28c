//! Every cycle carries a token. Once a newer cycle has been issued, an older
//! one stops at its next checkpoint instead of overwriting fresher data.

use crate::api::DashboardApi;
use crate::clock;
use crate::errors::FetchError;
use crate::filter::{FilterStrategy, NoopFilter};
use crate::messages::{MessageCatalog, MessageKind};
use crate::notifier::Notifier;
use crate::render::{render_records, render_statistics};
use crate::scheduler::Scheduler;
use crate::view::{SharedView, View};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::MutexGuard;
use tracing::{debug, info, warn};

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(300);
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
pub struct Intervals {
    pub refresh: Duration,
    pub clock: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            refresh: REFRESH_INTERVAL,
            clock: CLOCK_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    Rendered,
    /// A newer cycle was issued while this one was waiting on the backend.
    Stale,
    Failed,
}

pub struct Poller {
    api: Arc<dyn DashboardApi>,
    view: SharedView,
    notifier: Notifier,
    messages: Arc<MessageCatalog>,
    filter: Arc<dyn FilterStrategy>,
    intervals: Intervals,
    cycles: AtomicU64,
}

impl Poller {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        view: SharedView,
        notifier: Notifier,
        messages: Arc<MessageCatalog>,
    ) -> Self {
        Self {
            api,
            view,
            notifier,
            messages,
            filter: Arc::new(NoopFilter),
            intervals: Intervals::default(),
            cycles: AtomicU64::new(0),
        }
    }

    pub fn with_filter(mut self, filter: Arc<dyn FilterStrategy>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_intervals(mut self, intervals: Intervals) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn start(self: &Arc<Self>) -> Scheduler {
        let mut scheduler = Scheduler::new();

        let poller = Arc::clone(self);
        scheduler.every("refresh", self.intervals.refresh, move || {
            let poller = Arc::clone(&poller);
            async move {
                poller.refresh().await;
            }
        });

        let poller = Arc::clone(self);
        scheduler.every("clock", self.intervals.clock, move || {
            let poller = Arc::clone(&poller);
            async move {
                poller.tick_clock().await;
            }
        });

        scheduler
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let cycle = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        match self.run_cycle(cycle).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(cycle, error = %err, "dashboard refresh failed");
                self.notifier
                    .show(self.messages.text(MessageKind::DashboardLoad))
                    .await;
                RefreshOutcome::Failed
            }
        }
    }

    async fn run_cycle(&self, cycle: u64) -> Result<RefreshOutcome, FetchError> {
        let stats = self.api.statistics().await?;
        match self.current_view(cycle).await {
            Some(mut view) => render_statistics(&mut view, &stats),
            None => return Ok(RefreshOutcome::Stale),
        }

        let records = self.api.startups().await?;
        match self.current_view(cycle).await {
            Some(mut view) => render_records(&mut view, &records),
            None => return Ok(RefreshOutcome::Stale),
        }

        info!(
            cycle,
            total = stats.total_startups,
            records = records.len(),
            "dashboard refreshed"
        );
        Ok(RefreshOutcome::Rendered)
    }

    /// Locks the view unless `cycle` has been superseded.
    async fn current_view(&self, cycle: u64) -> Option<MutexGuard<'_, View>> {
        let view = self.view.lock().await;
        let latest = self.cycles.load(Ordering::SeqCst);
        if latest != cycle {
            debug!(cycle, latest, "discarding stale refresh");
            return None;
        }
        Some(view)
    }

    pub async fn tick_clock(&self) {
        let mut view = self.view.lock().await;
        let clock = view.handles.clock;
        view.doc.set_text(clock, clock::now_label());
    }

    /// Switching on runs the filter hook; switching off runs the removal hook
    /// and then reloads everything.
    pub async fn set_filter(&self, enabled: bool) -> Option<RefreshOutcome> {
        {
            let mut view = self.view.lock().await;
            let toggle = view.handles.filter_toggle;
            if enabled {
                view.doc.set_attr(toggle, "checked", "checked");
                self.filter.apply(&mut view);
            } else {
                view.doc.remove_attr(toggle, "checked");
                self.filter.remove(&mut view);
            }
        }
        info!(enabled, "inception filter toggled");

        if enabled {
            None
        } else {
            Some(self.refresh().await)
        }
    }
}
