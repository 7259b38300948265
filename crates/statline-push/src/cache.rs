//! Dynamic metric-instance cache.
//!
//! Process-wide map from fully-qualified name to handle, with
//! get-or-create, single-handle-per-name semantics: concurrent misses on
//! the same name resolve to exactly one stored handle, and every caller in
//! the race observes that handle. Entries are never evicted and never
//! expire; a handle lives for the rest of the process.
//!
//! # Cardinality
//! Memory grows monotonically with the number of distinct family + label
//! combinations ever requested, and every entry becomes one series on the
//! collector. Label cardinality must be bounded by callers (do not feed
//! request IDs, client addresses, or similar unbounded values in as
//! labels); the cache will not do it for them.

use dashmap::DashMap;

use statline_core::{MetricHandle, MetricName};

/// Concurrent name → handle map with lazy, race-safe creation.
#[derive(Default)]
pub struct DynamicCache {
    map: DashMap<MetricName, MetricHandle>,
}

impl DynamicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle stored under `name`, creating it on first use.
    ///
    /// On a hit `create` is not invoked. On concurrent misses the map's
    /// entry lock serializes creation per key, so exactly one `create`
    /// runs and its handle is what every caller gets back.
    pub fn get_or_create(&self, name: MetricName, create: impl FnOnce() -> MetricHandle) -> MetricHandle {
        // Fast path: shared lookup, no shard write lock on the hot path.
        if let Some(existing) = self.map.get(&name) {
            return existing.value().clone();
        }
        self.map.entry(name).or_insert_with(create).value().clone()
    }

    /// Number of live dynamic series.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
