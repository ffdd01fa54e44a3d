//! Monitor state machine.
//!
//! # States
//! - Idle: monitor created but not started
//! - Checking: a probe is outstanding (transient)
//! - Healthy: backend confirmed reachable; recovery has run
//! - Unhealthy: last probe failed; next timer tick will re-check
//!
//! # State Transitions
//! ```text
//! Idle → Checking: start()
//! Checking → Healthy: probe success
//! Checking → Unhealthy: probe failure
//! Unhealthy → Checking: timer tick or trigger_now()
//! ```

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Poll state enum.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle = 0,
    Checking = 1,
    Healthy = 2,
    Unhealthy = 3,
}

impl From<u8> for PollState {
    fn from(val: u8) -> Self {
        match val {
            1 => PollState::Checking,
            2 => PollState::Healthy,
            3 => PollState::Unhealthy,
            _ => PollState::Idle,
        }
    }
}

/// Snapshot of the monitor for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorStatus {
    pub state: PollState,
    pub last_checked_at: Option<SystemTime>,
}

/// Shared monitor state.
///
/// Mutated only by the poll scheduler; everyone else reads snapshots.
#[derive(Debug)]
pub struct MonitorState {
    /// Current poll state (0=Idle, 1=Checking, 2=Healthy, 3=Unhealthy).
    state: AtomicU8,
    /// Completion time of the last probe, epoch millis. 0 = never probed.
    last_checked_ms: AtomicU64,
}

impl MonitorState {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(PollState::Idle as u8),
            last_checked_ms: AtomicU64::new(0),
        }
    }

    pub fn poll_state(&self) -> PollState {
        self.state.load(Ordering::SeqCst).into()
    }

    pub(crate) fn set_state(&self, state: PollState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Claim the checking slot for a manual probe.
    ///
    /// Succeeds only from `Unhealthy`, the one state a manual re-check makes
    /// sense from. This is what makes concurrent triggers collapse to a
    /// single dispatched probe.
    pub(crate) fn begin_manual_check(&self) -> bool {
        self.state
            .compare_exchange(
                PollState::Unhealthy as u8,
                PollState::Checking as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }

    /// Record a probe completion time. Overwritten on every completion
    /// regardless of outcome.
    pub(crate) fn touch_last_checked(&self, at: SystemTime) {
        let ms = at
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis() as u64;
        self.last_checked_ms.store(ms, Ordering::SeqCst);
    }

    pub fn last_checked_at(&self) -> Option<SystemTime> {
        match self.last_checked_ms.load(Ordering::SeqCst) {
            0 => None,
            ms => Some(UNIX_EPOCH + Duration::from_millis(ms)),
        }
    }

    pub fn snapshot(&self) -> MonitorStatus {
        MonitorStatus {
            state: self.poll_state(),
            last_checked_at: self.last_checked_at(),
        }
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_state_roundtrip() {
        for state in [
            PollState::Idle,
            PollState::Checking,
            PollState::Healthy,
            PollState::Unhealthy,
        ] {
            assert_eq!(PollState::from(state as u8), state);
        }
        assert_eq!(PollState::from(200u8), PollState::Idle);
    }

    #[test]
    fn test_new_state_is_idle_and_unprobed() {
        let state = MonitorState::new();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.state, PollState::Idle);
        assert_eq!(snapshot.last_checked_at, None);
    }

    #[test]
    fn test_manual_check_only_from_unhealthy() {
        let state = MonitorState::new();
        assert!(!state.begin_manual_check());

        state.set_state(PollState::Unhealthy);
        assert!(state.begin_manual_check());
        assert_eq!(state.poll_state(), PollState::Checking);

        // A second claim while one is outstanding must fail.
        assert!(!state.begin_manual_check());
    }

    #[test]
    fn test_last_checked_overwritten() {
        let state = MonitorState::new();
        let first = UNIX_EPOCH + Duration::from_secs(1_000);
        let second = UNIX_EPOCH + Duration::from_secs(2_000);

        state.touch_last_checked(first);
        assert_eq!(state.last_checked_at(), Some(first));

        state.touch_last_checked(second);
        assert_eq!(state.last_checked_at(), Some(second));
    }
}
