//! Poll scheduling and lifecycle.
//!
//! # Responsibilities
//! - Own the polling cadence: immediate probe on start, fixed interval after
//! - Enforce the at-most-one-in-flight probe guard
//! - Fold probe results into shared state and fire recovery on success
//!
//! # Design Decisions
//! - One spawned task per monitor; probes and timer waits run sequentially
//!   inside it, so no locks guard the scheduling decisions
//! - `stop()` cancels the pending wait but never aborts an in-flight probe;
//!   its result still updates state, and the stopped flag prevents re-arming
//! - The scheduler raises no errors; it absorbs whatever the prober reports

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::config::MonitorConfig;
use crate::monitor::probe::{HealthProber, MonitorSetupError, ProbeOutcome};
use crate::monitor::recovery::RecoveryAction;
use crate::monitor::state::{MonitorState, MonitorStatus, PollState};
use crate::session::TokenSource;

/// Handle to a running availability monitor.
///
/// This is the contract the presentation layer consumes: read-only status
/// snapshots plus `trigger_now()`. The scheduler task and its timer are
/// private to this handle.
pub struct HealthMonitor {
    shared: Arc<Shared>,
    interval: Duration,
    /// The single pending-poll handle. `None` before `start()` and after
    /// `stop()`; at most one exists at any time.
    task: Option<JoinHandle<()>>,
}

struct Shared {
    state: MonitorState,
    prober: HealthProber,
    recovery: Arc<dyn RecoveryAction>,
    /// Wakes the scheduler task for a manual probe or teardown.
    wake: Notify,
    stopped: AtomicBool,
}

impl HealthMonitor {
    pub fn new(
        prober: HealthProber,
        recovery: Arc<dyn RecoveryAction>,
        interval: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: MonitorState::new(),
                prober,
                recovery,
                wake: Notify::new(),
                stopped: AtomicBool::new(false),
            }),
            interval,
            task: None,
        }
    }

    /// Build a monitor from validated configuration.
    pub fn from_config(
        config: &MonitorConfig,
        tokens: Arc<dyn TokenSource>,
        recovery: Arc<dyn RecoveryAction>,
    ) -> Result<Self, MonitorSetupError> {
        let prober = HealthProber::new(config, tokens)?;
        Ok(Self::new(
            prober,
            recovery,
            Duration::from_secs(config.poll.interval_secs),
        ))
    }

    /// Begin polling: one immediate probe, then one every interval.
    ///
    /// Calling `start()` on a monitor that is already running or already
    /// stopped is a logged no-op.
    pub fn start(&mut self) {
        if self.task.is_some() {
            tracing::warn!("health monitor already started");
            return;
        }
        if self.shared.stopped.load(Ordering::SeqCst) {
            tracing::warn!("health monitor already stopped, not starting");
            return;
        }

        // The first probe is observable as Checking before the task runs.
        self.shared.state.set_state(PollState::Checking);

        let shared = self.shared.clone();
        let interval = self.interval;
        self.task = Some(tokio::spawn(async move {
            shared.run(interval).await;
        }));
    }

    /// Probe immediately, outside the regular cadence.
    ///
    /// Suppressed while a probe is already in flight, so concurrent triggers
    /// never dispatch a second probe. The recurring schedule is undisturbed.
    pub fn trigger_now(&self) {
        if self.shared.stopped.load(Ordering::SeqCst) {
            tracing::debug!("monitor stopped, manual check ignored");
            return;
        }
        if self.shared.state.begin_manual_check() {
            tracing::debug!("manual health check requested");
            self.shared.wake.notify_one();
        } else {
            tracing::debug!(
                state = ?self.shared.state.poll_state(),
                "manual check suppressed"
            );
        }
    }

    /// Stop polling. Idempotent; safe before `start()`.
    ///
    /// Cancels the pending timer wait. An in-flight probe still folds its
    /// result into state, but no further probe is ever dispatched.
    pub fn stop(&mut self) {
        if !self.shared.stopped.swap(true, Ordering::SeqCst) {
            tracing::info!("health monitor stopping");
        }
        self.shared.wake.notify_one();
        self.task = None;
    }

    /// Snapshot of `{PollState, LastCheckedAt}` for the presentation layer.
    pub fn status(&self) -> MonitorStatus {
        self.shared.state.snapshot()
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Shared {
    async fn run(self: Arc<Self>, interval: Duration) {
        tracing::info!(
            interval_secs = interval.as_secs(),
            "health monitor started"
        );

        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first wait
        // below lands one full interval after start.
        ticker.tick().await;

        loop {
            if self.stopped.load(Ordering::SeqCst) {
                break;
            }

            // State is Checking here: set by start() for the first probe, by
            // the wait arm below for every later one.
            let result = self.prober.probe().await;
            self.state.touch_last_checked(result.checked_at);

            match result.outcome {
                ProbeOutcome::Success => {
                    self.state.set_state(PollState::Healthy);
                    if self.stopped.load(Ordering::SeqCst) {
                        tracing::debug!("backend healthy but monitor stopped, skipping recovery");
                    } else {
                        tracing::info!("backend healthy, triggering recovery");
                        self.recovery.recover();
                    }
                    // Never re-arm after a healthy result.
                    return;
                }
                ProbeOutcome::Failure(err) => {
                    self.state.set_state(PollState::Unhealthy);
                    tracing::warn!(error = %err, "backend still unavailable");
                }
            }

            if self.stopped.load(Ordering::SeqCst) {
                break;
            }

            // Wait for the next scheduled poll or a manual trigger, then
            // claim the Checking slot before probing again.
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("scheduled health check due");
                }
                _ = self.wake.notified() => {}
            }

            if self.stopped.load(Ordering::SeqCst) {
                break;
            }
            self.state.set_state(PollState::Checking);
        }

        tracing::debug!("health monitor loop exited");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::NoAuth;

    struct NoopRecovery;

    impl RecoveryAction for NoopRecovery {
        fn recover(&self) {}
    }

    fn unstarted_monitor() -> HealthMonitor {
        let config = MonitorConfig::default();
        HealthMonitor::from_config(&config, Arc::new(NoAuth), Arc::new(NoopRecovery)).unwrap()
    }

    #[tokio::test]
    async fn test_status_before_start() {
        let monitor = unstarted_monitor();
        let status = monitor.status();
        assert_eq!(status.state, PollState::Idle);
        assert_eq!(status.last_checked_at, None);
    }

    #[tokio::test]
    async fn test_stop_before_start_is_safe() {
        let mut monitor = unstarted_monitor();
        monitor.stop();
        monitor.stop();
        assert_eq!(monitor.status().state, PollState::Idle);
    }

    #[tokio::test]
    async fn test_trigger_before_start_is_noop() {
        let monitor = unstarted_monitor();
        monitor.trigger_now();
        assert_eq!(monitor.status().state, PollState::Idle);
    }

    #[tokio::test]
    async fn test_start_after_stop_refused() {
        let mut monitor = unstarted_monitor();
        monitor.stop();
        monitor.start();
        assert_eq!(monitor.status().state, PollState::Idle);
    }
}
