use std::time::Duration;

/// Host-side timer that calls back into the navigator on an interval.
///
/// The host owns the actual timer (event loop, runtime task, browser
/// interval); each tick should call [`Navigator::refresh`](crate::Navigator::refresh).
pub trait RefreshScheduler {
    /// Start ticking every `period`.
    fn start(&mut self, period: Duration);
    /// Change the interval of a running timer.
    fn set_period(&mut self, period: Duration);
    /// Stop ticking.
    fn stop(&mut self);
    /// Whether the timer is ticking.
    fn is_running(&self) -> bool;
}

/// Refresh policy: keeps an optional scheduler in line with the configured
/// period. Start/stop calls are idempotent.
#[derive(Default)]
pub struct RefreshTimer {
    period: Option<Duration>,
    scheduler: Option<Box<dyn RefreshScheduler>>,
}

impl std::fmt::Debug for RefreshTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTimer")
            .field("period", &self.period)
            .field("attached", &self.scheduler.is_some())
            .field("running", &self.is_running())
            .finish()
    }
}

impl RefreshTimer {
    /// Timer with a configured period and no scheduler yet.
    pub fn new(period: Option<Duration>) -> Self {
        Self {
            period: effective(period),
            scheduler: None,
        }
    }

    /// The active period (`None` when disabled).
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Whether the attached scheduler is ticking.
    pub fn is_running(&self) -> bool {
        self.scheduler.as_ref().is_some_and(|s| s.is_running())
    }

    /// Attach the host scheduler, starting it when a period is configured.
    /// A previously attached scheduler is stopped and returned.
    pub fn attach(
        &mut self,
        scheduler: Box<dyn RefreshScheduler>,
    ) -> Option<Box<dyn RefreshScheduler>> {
        let mut previous = self.scheduler.replace(scheduler);
        if let Some(prev) = previous.as_mut() {
            if prev.is_running() {
                prev.stop();
            }
        }
        self.sync();
        previous
    }

    /// Detach the scheduler, stopping it first.
    pub fn detach(&mut self) -> Option<Box<dyn RefreshScheduler>> {
        let mut scheduler = self.scheduler.take();
        if let Some(s) = scheduler.as_mut() {
            if s.is_running() {
                s.stop();
            }
        }
        scheduler
    }

    /// Change the period: a positive value (re)starts the timer, `None` or
    /// zero stops it.
    pub fn set_period(&mut self, period: Option<Duration>) {
        self.period = effective(period);
        self.sync();
    }

    fn sync(&mut self) {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return;
        };
        match self.period {
            Some(period) => {
                if scheduler.is_running() {
                    scheduler.set_period(period);
                } else {
                    scheduler.start(period);
                }
            }
            None => {
                if scheduler.is_running() {
                    scheduler.stop();
                }
            }
        }
        trace_refresh_synced(self.period, scheduler.is_running());
    }
}

fn effective(period: Option<Duration>) -> Option<Duration> {
    period.filter(|p| !p.is_zero())
}

#[cfg(feature = "tracing")]
fn trace_refresh_synced(period: Option<Duration>, running: bool) {
    tracing::debug!(
        event = "refresh.synced",
        period_ms = period.map(|p| p.as_millis() as u64),
        running,
        "refresh timer synced"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_refresh_synced(_period: Option<Duration>, _running: bool) {}
