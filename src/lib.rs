//! Backend Availability Monitor
//!
//! Gates user interaction while a backend service is unreachable and restores
//! normal operation once it recovers.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               HEALTH MONITOR                  │
//!                    │                                               │
//!   trigger_now()    │  ┌───────────┐        ┌──────────────┐       │
//!   ───────────────────▶│   poll    │───────▶│    health    │───────┼──▶ GET /health
//!                    │  │ scheduler │        │    prober    │       │    (backend)
//!   status()         │  └─────┬─────┘        └──────┬───────┘       │
//!   ◀───────────────────┐     │                     │               │
//!                    │  │     │ Success             │ token lookup  │
//!                    │  │     ▼                     ▼               │
//!                    │  │ ┌──────────┐       ┌──────────────┐      │
//!                    │  │ │ recovery │       │   session    │      │
//!                    │  │ │  action  │       │ token source │      │
//!                    │  │ └──────────┘       └──────────────┘      │
//!                    │  │                                           │
//!                    │  └── shared state {PollState, LastCheckedAt} │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! The scheduler probes immediately on `start()`, then on a fixed interval
//! until the backend reports healthy, at which point the recovery action runs
//! once and the monitor tears itself down.

// Core subsystems
pub mod config;
pub mod monitor;
pub mod session;

pub use config::MonitorConfig;
pub use monitor::scheduler::HealthMonitor;
pub use monitor::state::{MonitorStatus, PollState};
