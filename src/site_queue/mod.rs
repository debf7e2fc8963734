//! Per-site import state: the three id sets and the link-dedupe cache

pub mod link_cache;
pub mod queue;

pub use link_cache::{LinkDedupeCache, normalize_link};
pub use queue::{SiteBinding, SiteImportQueue};
