//! Site-scoped page import scheduler
//!
//! Owns the registry of per-site queues, exposes the producer API, reacts
//! to lifecycle notifications and drives the single import worker.

// Core struct and constructor
mod core;

// Functionality implementations
mod metrics;
mod notifications;
mod producer;
mod registry;
mod selection;
mod shutdown;
mod worker;

// Re-export the main types
pub use core::ImportScheduler;
pub use metrics::{SchedulerMetrics, SchedulerMetricsSnapshot};
