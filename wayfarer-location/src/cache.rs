//! Single-entry cache of the last resolved location.

use tokio::time::Instant;

use crate::LocationResult;

/// A cached [`LocationResult`] and the instant it stops being served.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCacheEntry {
    /// Cached location.
    pub result: LocationResult,
    /// Last instant at which the entry is fresh.
    pub expires_at: Instant,
}

impl LocationCacheEntry {
    /// Whether the entry may still be served at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: Instant) -> bool {
        now <= self.expires_at
    }
}

/// Holds at most one entry; expired entries are never returned.
#[derive(Debug, Default)]
pub(crate) struct LocationCache {
    entry: Option<LocationCacheEntry>,
}

impl LocationCache {
    pub(crate) fn fresh(&self, now: Instant) -> Option<&LocationResult> {
        self.entry
            .as_ref()
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| &entry.result)
    }

    pub(crate) fn store(&mut self, result: LocationResult, expires_at: Instant) {
        self.entry = Some(LocationCacheEntry { result, expires_at });
    }

    pub(crate) fn clear(&mut self) {
        self.entry = None;
    }
}
