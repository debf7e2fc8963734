//! Per-site cache of external links already handled during an import pass
//!
//! Keys are normalized so that fragment and case variants of the same link
//! collapse onto one entry. The cache is bounded, but it does not evict
//! individual entries: when it is full the next new link empties it first.

use ahash::AHashMap;

use crate::types::LinkRecord;
use crate::utils::LINK_CACHE_CAPACITY;

/// Normalize a raw link into its cache key
///
/// Takes the segment after the last `/`. If that segment carries a `#`
/// fragment, the key is instead the whole link cut just before the first
/// `#`. The result is lower-cased.
#[must_use]
pub fn normalize_link(raw: &str) -> String {
    let segment = match raw.rfind('/') {
        Some(slash) => &raw[slash + 1..],
        None => raw,
    };

    let key = if segment.contains('#') {
        match raw.find('#') {
            Some(hash) => &raw[..hash],
            None => segment,
        }
    } else {
        segment
    };

    key.to_lowercase()
}

/// Bounded map of normalized link -> [`LinkRecord`]
#[derive(Debug)]
pub struct LinkDedupeCache {
    entries: AHashMap<String, LinkRecord>,
    capacity: usize,
}

impl LinkDedupeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(LINK_CACHE_CAPACITY)
    }

    /// Create a cache that clears itself once it holds `capacity` entries
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AHashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Remember `record` for `raw_link`
    ///
    /// A link that is not yet cached is only inserted after the cache is
    /// emptied if it is already full. Re-recording a cached link overwrites
    /// it in place.
    pub fn record(&mut self, raw_link: &str, record: LinkRecord) {
        let key = normalize_link(raw_link);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            log::debug!(
                "Link cache reached {} entries, clearing before inserting {key}",
                self.entries.len()
            );
            self.clear();
        }
        self.entries.insert(key, record);
    }

    #[must_use]
    pub fn lookup(&self, raw_link: &str) -> Option<&LinkRecord> {
        self.entries.get(&normalize_link(raw_link))
    }

    #[must_use]
    pub fn contains(&self, raw_link: &str) -> bool {
        self.entries.contains_key(&normalize_link(raw_link))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for LinkDedupeCache {
    fn default() -> Self {
        Self::new()
    }
}
