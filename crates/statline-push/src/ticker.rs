//! Flush ticker: the periodic background push task.
//!
//! At most one ticker runs per [`FlushTicker`]. `start` while running is a
//! no-op that keeps the original task; `stop` is idempotent and allows a
//! later restart. Stopping prevents further ticks promptly but does not
//! abort a push already in flight.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use crate::client::StatsdClient;
use crate::sink::MetricSink;

/// Interval used when the configured value cannot be parsed.
pub const DEFAULT_PUSH_INTERVAL: Duration = Duration::from_secs(10);

/// Parse a push interval literal such as `"500ms"`, `"10s"`, or `"1m"`.
///
/// A bare number is taken as seconds. Anything unparseable (or zero) logs
/// a warning and falls back to [`DEFAULT_PUSH_INTERVAL`]; startup never
/// fails on a bad interval.
pub fn parse_push_interval(s: &str) -> Duration {
    match parse_duration(s) {
        Some(d) if !d.is_zero() => d,
        _ => {
            tracing::warn!(value = %s, "unable to parse push interval, using 10s as default value");
            DEFAULT_PUSH_INTERVAL
        }
    }
}

fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(ms) = s.strip_suffix("ms") {
        return ms.trim().parse().ok().map(Duration::from_millis);
    }
    if let Some(secs) = s.strip_suffix('s') {
        return secs.trim().parse().ok().map(Duration::from_secs);
    }
    if let Some(mins) = s.strip_suffix('m') {
        return mins.trim().parse::<u64>().ok().map(|m| Duration::from_secs(m * 60));
    }
    s.parse().ok().map(Duration::from_secs)
}

struct TickerHandle {
    stop: watch::Sender<bool>,
}

/// Lifecycle slot for the background push task.
///
/// Dropping the ticker (or the handle inside it) also ends the task: the
/// task selects on the stop channel, and a dropped sender completes that
/// branch just like an explicit `stop`.
#[derive(Default)]
pub struct FlushTicker {
    inner: Mutex<Option<TickerHandle>>,
}

impl FlushTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch the periodic push task, unless one is already running.
    ///
    /// The first flush fires one full `interval` after start, then every
    /// `interval` until [`stop`](Self::stop). Push failures are logged and
    /// swallowed; the next tick is the retry. Must be called from within a
    /// tokio runtime.
    pub fn start(&self, interval: Duration, client: Arc<StatsdClient>, sink: Arc<dyn MetricSink>) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if guard.is_some() {
            return;
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            let first = tokio::time::Instant::now() + interval;
            let mut ticks = tokio::time::interval_at(first, interval);
            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        if let Err(e) = client.flush(sink.as_ref()).await {
                            tracing::warn!(error = %e, "metrics push failed, retrying on next tick");
                        }
                    }
                    _ = stop_rx.changed() => break,
                }
            }
            tracing::debug!("flush ticker stopped");
        });

        *guard = Some(TickerHandle { stop: stop_tx });
    }

    /// Stop the running task, if any; no-op otherwise.
    pub fn stop(&self) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = guard.take() {
            let _ = handle.stop.send(true);
        }
    }

    /// Whether a push task is currently running.
    pub fn is_running(&self) -> bool {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_literals() {
        assert_eq!(parse_push_interval("10s"), Duration::from_secs(10));
        assert_eq!(parse_push_interval("500ms"), Duration::from_millis(500));
        assert_eq!(parse_push_interval("2m"), Duration::from_secs(120));
        assert_eq!(parse_push_interval("30"), Duration::from_secs(30));
    }

    #[test]
    fn bad_interval_falls_back_to_default() {
        assert_eq!(parse_push_interval("not-a-duration"), DEFAULT_PUSH_INTERVAL);
        assert_eq!(parse_push_interval(""), DEFAULT_PUSH_INTERVAL);
        assert_eq!(parse_push_interval("0s"), DEFAULT_PUSH_INTERVAL);
    }
}
