//! Core identity and snapshot types shared by the queue, scheduler and
//! collaborator traits.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Integer identity of a page, unique within a site
pub type PageId = i64;

/// Opaque key identifying a site
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SiteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Unresolved reference to a page as carried by deletion notifications
///
/// Resolution to `(SiteId, PageId)` is done by an [`IdResolver`](crate::services::IdResolver).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRef {
    pub site_name: String,
    pub key: String,
}

impl PageRef {
    #[must_use]
    pub fn new(site_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            key: key.into(),
        }
    }
}

/// Snapshot of the producer's execution context
///
/// Captured once, on the first catalog call for a site, and handed to the
/// importer for every page of that site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    pub principal: Option<String>,
    pub attributes: HashMap<String, String>,
}

impl CallerContext {
    #[must_use]
    pub fn for_principal(principal: impl Into<String>) -> Self {
        Self {
            principal: Some(principal.into()),
            attributes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// What the importer remembers about an external link it already handled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Link as it appeared in the source page
    pub original: String,
    /// Page the link was rewritten to, if it was imported as one
    pub target_page: Option<PageId>,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

impl LinkRecord {
    #[must_use]
    pub fn new(original: impl Into<String>, target_page: Option<PageId>) -> Self {
        Self {
            original: original.into(),
            target_page,
            recorded_at: chrono::Utc::now(),
        }
    }
}

/// Point-in-time copy of one site's queue state
///
/// Id lists are sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteQueueSnapshot {
    pub site: SiteId,
    pub cataloged: Vec<PageId>,
    pub importing: Vec<PageId>,
    pub imported: Vec<PageId>,
    pub max_import_count: i64,
    pub at_capacity: bool,
    pub cached_links: usize,
}
