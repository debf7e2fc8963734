//! Shared configuration constants for the site import scheduler
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Maximum number of normalized links kept per site before the link cache
/// is cleared wholesale.
///
/// The cache is not LRU: once it holds more than this many entries the next
/// insert empties it first.
pub const LINK_CACHE_CAPACITY: usize = 50_000;

/// Cap value meaning "no per-site limit"
///
/// Any negative `import_page_max` disables the cap; this is the canonical one.
pub const UNLIMITED_IMPORTS: i64 = -1;

/// Default capacity of the notification bus buffer
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 256;

/// Default upper bound on how long an idle worker parks before re-checking
/// the registry, in milliseconds.
///
/// Producers wake the worker explicitly; this only bounds the damage of a
/// wake-up that races with the worker going idle.
pub const DEFAULT_IDLE_WAIT_MS: u64 = 1_000;

/// User agent used by the demo binary when cataloging pages
pub const DEFAULT_USER_AGENT: &str = "kodegen-site-import/0.10";
