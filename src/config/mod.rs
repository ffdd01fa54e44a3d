//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → env/CLI overrides applied by the caller
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the monitor starts
//! - All fields have defaults so a config file is optional
//! - Validation separates syntactic (serde) from semantic checks and runs
//!   after overrides, not during parsing

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, ConfigError};
pub use schema::{BackendConfig, MonitorConfig, ObservabilityConfig, PollConfig};
pub use validation::validate_config;
