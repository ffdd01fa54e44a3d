//! Availability monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! Poll scheduler (scheduler.rs):
//!     start() → immediate probe, then fixed-interval timer
//!     trigger_now() → immediate probe, suppressed while one is in flight
//!     stop() → cancel pending timer, no further probes
//!
//! Health prober (probe.rs):
//!     Optional token from session source
//!     → GET {base_url}{health_path}
//!     → classify: 2xx + JSON body = Success, anything else = Failure
//!
//! State machine (state.rs):
//!     Idle → Checking → Healthy (recovery fires, monitor done)
//!                     ↘ Unhealthy → Checking (timer or manual trigger)
//!
//! Recovery (recovery.rs):
//!     First Success → RecoveryAction::recover(), exactly once
//! ```
//!
//! # Design Decisions
//! - At most one probe in flight: `Checking` is the guard
//! - The scheduler absorbs every prober error; nothing propagates upward
//! - Shared state is atomics only; the presentation layer reads snapshots

pub mod probe;
pub mod recovery;
pub mod scheduler;
pub mod state;

pub use probe::{HealthCheckResult, HealthProber, ProbeError, ProbeOutcome};
pub use recovery::{RecoveryAction, RecoveryNotifier};
pub use scheduler::HealthMonitor;
pub use state::{MonitorStatus, PollState};
