//! Event bus implementation for publishing and subscribing to import
//! lifecycle notifications.

// Core struct and constructors
mod core;

// Functionality implementations
mod publishing;
mod shutdown;
mod subscription;

// Re-export the main type
pub use core::ImportEventBus;
