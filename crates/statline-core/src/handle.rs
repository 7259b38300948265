//! Metric handles: thin accumulators read and reset by the flush path.
//!
//! Handles do no aggregation beyond accumulation. The flush side drains
//! counters and timings (`take*`) and samples gauges; mutation is atomic
//! and never blocks on anything but a short mutex for timing samples.
//! Snapshots taken by the flush loop are best-effort, not transactional:
//! a mutation racing a drain lands either in this flush or the next one,
//! never nowhere.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Monotonically increasing accumulator.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Increment by an arbitrary delta.
    pub fn add(&self, delta: u64) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }

    /// Drain the accumulated delta, resetting to zero.
    pub fn take(&self) -> u64 {
        self.value.swap(0, Ordering::Relaxed)
    }
}

/// Last-set scalar value.
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    /// Replace the current value.
    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// Add a signed delta (open-connection style gauges).
    pub fn add(&self, delta: i64) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }

    /// Current value; gauges are sampled, not reset, on flush.
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Duration sample accumulator for downstream percentile computation.
///
/// Samples are stored in whole milliseconds, the unit the collector
/// expects for timing lines.
#[derive(Debug, Default)]
pub struct Timing {
    samples: Mutex<Vec<u64>>,
}

impl Timing {
    /// Record one duration sample.
    pub fn observe(&self, duration: Duration) {
        let ms = duration.as_millis() as u64;
        let mut guard = self.samples.lock().unwrap_or_else(|e| e.into_inner());
        guard.push(ms);
    }

    /// Drain all accumulated samples (milliseconds).
    pub fn take(&self) -> Vec<u64> {
        let mut guard = self.samples.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }
}

/// Type-erased handle stored uniformly in the cache and the client's
/// bookkeeping. Tagged variant instead of downcasting.
#[derive(Debug, Clone)]
pub enum MetricHandle {
    Counter(Arc<Counter>),
    Gauge(Arc<Gauge>),
    Timing(Arc<Timing>),
}

impl MetricHandle {
    pub fn counter() -> Self {
        MetricHandle::Counter(Arc::new(Counter::default()))
    }

    pub fn gauge() -> Self {
        MetricHandle::Gauge(Arc::new(Gauge::default()))
    }

    pub fn timing() -> Self {
        MetricHandle::Timing(Arc::new(Timing::default()))
    }

    /// Extract the counter, or hand back a detached one on kind mismatch.
    ///
    /// A mismatch means two different handle kinds were requested under one
    /// fully-qualified name, which only a caller bug can produce. The
    /// subsystem is fail-open: the detached handle absorbs mutations that
    /// are never flushed, and the mismatch is logged once at warn.
    pub fn counter_or_detached(&self, name: &crate::MetricName) -> Arc<Counter> {
        match self {
            MetricHandle::Counter(c) => Arc::clone(c),
            _ => {
                tracing::warn!(%name, "metric registered with a different kind, returning detached counter");
                Arc::new(Counter::default())
            }
        }
    }

    /// Extract the gauge, or hand back a detached one on kind mismatch.
    pub fn gauge_or_detached(&self, name: &crate::MetricName) -> Arc<Gauge> {
        match self {
            MetricHandle::Gauge(g) => Arc::clone(g),
            _ => {
                tracing::warn!(%name, "metric registered with a different kind, returning detached gauge");
                Arc::new(Gauge::default())
            }
        }
    }

    /// Extract the timing, or hand back a detached one on kind mismatch.
    pub fn timing_or_detached(&self, name: &crate::MetricName) -> Arc<Timing> {
        match self {
            MetricHandle::Timing(t) => Arc::clone(t),
            _ => {
                tracing::warn!(%name, "metric registered with a different kind, returning detached timing");
                Arc::new(Timing::default())
            }
        }
    }
}
