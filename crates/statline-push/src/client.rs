//! Statsd client: handle factory, flush bookkeeping, and line encoding.
//!
//! Every handle the factory hands out is registered in an internal map
//! keyed by fully-qualified name; the flush loop discovers series through
//! that map. Registration is idempotent per name, so a registry rebuilt on
//! configuration reload gets the same handles back and accumulation
//! continues uninterrupted. Construction never blocks on network I/O.

use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use dashmap::DashMap;

use statline_core::{Counter, Gauge, MetricHandle, MetricName, NameScheme, Result, Timing};

use crate::sink::MetricSink;

/// Conservative payload bound for a single UDP datagram.
const MAX_DATAGRAM_BYTES: usize = 1400;

/// Shared statsd client; one per process, owned by the runtime.
pub struct StatsdClient {
    scheme: NameScheme,
    registry: DashMap<MetricName, MetricHandle>,
}

impl StatsdClient {
    pub fn new(scheme: NameScheme) -> Self {
        Self {
            scheme,
            registry: DashMap::new(),
        }
    }

    /// Name scheme this client qualifies series with.
    pub fn scheme(&self) -> &NameScheme {
        &self.scheme
    }

    /// Counter bound to `name`, registered for flush discovery.
    ///
    /// Re-registering a name returns the existing handle.
    pub fn new_counter(&self, name: MetricName) -> Arc<Counter> {
        self.registry
            .entry(name.clone())
            .or_insert_with(MetricHandle::counter)
            .value()
            .counter_or_detached(&name)
    }

    /// Gauge bound to `name`, registered for flush discovery.
    pub fn new_gauge(&self, name: MetricName) -> Arc<Gauge> {
        self.registry
            .entry(name.clone())
            .or_insert_with(MetricHandle::gauge)
            .value()
            .gauge_or_detached(&name)
    }

    /// Timing bound to `name`, registered for flush discovery.
    pub fn new_timing(&self, name: MetricName) -> Arc<Timing> {
        self.registry
            .entry(name.clone())
            .or_insert_with(MetricHandle::timing)
            .value()
            .timing_or_detached(&name)
    }

    /// Number of registered series (diagnostics and tests).
    pub fn series_count(&self) -> usize {
        self.registry.len()
    }

    /// Drain current values and push them through `sink`.
    ///
    /// Counters and timings are reset as they are encoded; a send failure
    /// therefore drops the already-drained deltas, which is the accepted
    /// fire-and-forget semantics of the protocol. Gauges are sampled, not
    /// reset, so they reappear on the next tick regardless.
    pub async fn flush(&self, sink: &dyn MetricSink) -> Result<()> {
        for datagram in self.encode_pending() {
            sink.send(datagram).await?;
        }
        Ok(())
    }

    /// Encode pending values into datagrams, draining resettable handles.
    ///
    /// Runs synchronously so no map shard lock is ever held across an await.
    fn encode_pending(&self) -> Vec<Bytes> {
        let mut datagrams = Vec::new();
        let mut buf = BytesMut::new();

        for entry in self.registry.iter() {
            let name = entry.key().as_str();
            match entry.value() {
                MetricHandle::Counter(c) => {
                    let delta = c.take();
                    if delta != 0 {
                        append_line(&mut datagrams, &mut buf, name, &delta.to_string(), "c");
                    }
                }
                MetricHandle::Gauge(g) => {
                    append_line(&mut datagrams, &mut buf, name, &g.get().to_string(), "g");
                }
                MetricHandle::Timing(t) => {
                    for ms in t.take() {
                        append_line(&mut datagrams, &mut buf, name, &ms.to_string(), "ms");
                    }
                }
            }
        }

        if !buf.is_empty() {
            datagrams.push(buf.freeze());
        }
        datagrams
    }
}

/// Append one `name:value|unit` line, rolling over to a new datagram when
/// the current one would exceed [`MAX_DATAGRAM_BYTES`].
///
/// The bound is best-effort: a single line longer than the bound cannot be
/// split (a partial statsd line is garbage to the collector), so it ships
/// as its own oversized datagram and never drags later lines with it.
fn append_line(datagrams: &mut Vec<Bytes>, buf: &mut BytesMut, name: &str, value: &str, unit: &str) {
    let line_len = name.len() + value.len() + unit.len() + 3; // ':' '|' '\n'
    if !buf.is_empty() && buf.len() + line_len > MAX_DATAGRAM_BYTES {
        datagrams.push(buf.split().freeze());
    }
    buf.put_slice(name.as_bytes());
    buf.put_u8(b':');
    buf.put_slice(value.as_bytes());
    buf.put_u8(b'|');
    buf.put_slice(unit.as_bytes());
    buf.put_u8(b'\n');
    if buf.len() > MAX_DATAGRAM_BYTES {
        datagrams.push(buf.split().freeze());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StatsdClient {
        StatsdClient::new(NameScheme::with_identity("app", "host"))
    }

    #[test]
    fn factory_is_idempotent_per_name() {
        let c = client();
        let name = c.scheme().metric("backend.request.total", &[]);
        let a = c.new_counter(name.clone());
        let b = c.new_counter(name);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(c.series_count(), 1);
    }

    #[test]
    fn zero_counters_are_not_encoded() {
        let c = client();
        let counter = c.new_counter(c.scheme().metric("backend.request.total", &[]));
        assert!(c.encode_pending().is_empty());

        counter.add(3);
        let datagrams = c.encode_pending();
        assert_eq!(datagrams.len(), 1);
        assert_eq!(&datagrams[0][..], b"statline.app.host.backend.request.total:3|c\n");
        // Drained: nothing pending until the next increment.
        assert!(c.encode_pending().is_empty());
    }

    #[test]
    fn gauges_are_sampled_every_encode() {
        let c = client();
        let gauge = c.new_gauge(c.scheme().metric("backend.connections.open", &[]));
        gauge.set(5);
        for _ in 0..2 {
            let datagrams = c.encode_pending();
            assert_eq!(&datagrams[0][..], b"statline.app.host.backend.connections.open:5|g\n");
        }
    }

    #[test]
    fn timings_emit_one_line_per_sample() {
        let c = client();
        let timing = c.new_timing(c.scheme().metric("backend.request.duration", &[]));
        timing.observe(std::time::Duration::from_millis(4));
        timing.observe(std::time::Duration::from_millis(9));
        let datagrams = c.encode_pending();
        let text = String::from_utf8(datagrams[0].to_vec()).expect("utf8");
        assert_eq!(
            text,
            "statline.app.host.backend.request.duration:4|ms\n\
             statline.app.host.backend.request.duration:9|ms\n"
        );
    }

    #[test]
    fn oversized_line_ships_alone() {
        let c = client();
        // One pathological series whose single line exceeds the datagram
        // bound, surrounded by ordinary series.
        let before = c.new_counter(c.scheme().metric("backend.request.total", &[]));
        before.inc();
        let huge_label = "x".repeat(2 * MAX_DATAGRAM_BYTES);
        let huge = c.new_counter(c.scheme().metric("backend.request.total", &[huge_label.as_str()]));
        huge.inc();

        let datagrams = c.encode_pending();
        let oversized: Vec<_> = datagrams.iter().filter(|d| d.len() > MAX_DATAGRAM_BYTES).collect();
        assert_eq!(oversized.len(), 1);
        // The oversized datagram holds exactly the one unsplittable line.
        assert_eq!(oversized[0].iter().filter(|&&b| b == b'\n').count(), 1);
    }

    #[test]
    fn long_batches_split_into_multiple_datagrams() {
        let c = client();
        let timing = c.new_timing(c.scheme().metric("backend.request.duration", &[]));
        for i in 0..200 {
            timing.observe(std::time::Duration::from_millis(i));
        }
        let datagrams = c.encode_pending();
        assert!(datagrams.len() > 1);
        for d in &datagrams {
            assert!(d.len() <= MAX_DATAGRAM_BYTES);
        }
    }
}
