//! Configuration for the import scheduler
//!
//! `SchedulerConfig` holds the static settings chosen at construction;
//! `SystemConfig` holds the settings that can be reloaded while running.

// Sub-modules
pub mod system;
pub mod types;

// Re-exports for public API
pub use system::SystemConfig;
pub use types::SchedulerConfig;
