//! Metric continuity across registry rebuilds (configuration reloads).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use statline_core::name::NameScheme;
use statline_core::Result;
use statline_push::config::StatsdSection;
use statline_push::sink::MetricSink;
use statline_push::MetricsRuntime;

#[derive(Default)]
struct NullSink;

#[async_trait]
impl MetricSink for NullSink {
    async fn send(&self, _datagram: Bytes) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct MemorySink {
    datagrams: Mutex<Vec<Bytes>>,
}

#[async_trait]
impl MetricSink for MemorySink {
    async fn send(&self, datagram: Bytes) -> Result<()> {
        self.datagrams.lock().unwrap().push(datagram);
        Ok(())
    }
}

fn runtime() -> MetricsRuntime {
    MetricsRuntime::with_scheme(NameScheme::with_identity("app", "host"))
}

#[tokio::test]
async fn static_handles_survive_reload() {
    let rt = runtime();
    let cfg = StatsdSection::default();

    let first = rt.register_with_sink(&cfg, Arc::new(NullSink));
    first.config_reloads().inc();
    first.backend_retries().add(2);

    // Reload: new façade, same underlying handles.
    let second = rt.register_with_sink(&cfg, Arc::new(NullSink));
    assert!(std::ptr::eq(first.config_reloads(), second.config_reloads()));

    second.config_reloads().inc();
    assert_eq!(second.config_reloads().take(), 2);
    assert_eq!(second.backend_retries().take(), 2);
}

#[tokio::test]
async fn dynamic_handles_survive_reload() {
    let rt = runtime();
    let cfg = StatsdSection::default();

    let first = rt.register_with_sink(&cfg, Arc::new(NullSink));
    let before = first.backend_reqs_with_labels(&["api", "GET", "200"]);
    before.inc();

    let second = rt.register_with_sink(&cfg, Arc::new(NullSink));
    let after = second.backend_reqs_with_labels(&["api", "GET", "200"]);

    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(rt.cache().len(), 1);
    assert_eq!(after.take(), 1);
}

#[tokio::test]
async fn label_order_produces_distinct_series() {
    let rt = runtime();
    let registry = rt.register_with_sink(&StatsdSection::default(), Arc::new(NullSink));

    let a = registry.entrypoint_reqs_with_labels(&["GET", "200"]);
    let b = registry.entrypoint_reqs_with_labels(&["200", "GET"]);

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(rt.cache().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn dynamic_series_flush_under_their_labelled_name() {
    let rt = runtime();
    let sink = Arc::new(MemorySink::default());

    let registry = rt.register_with_sink(
        &StatsdSection {
            address: String::new(),
            push_interval: "1s".to_string(),
        },
        sink.clone(),
    );
    registry.backend_reqs_with_labels(&["api", "GET", "200"]).add(4);
    registry
        .entrypoint_open_conns_with_labels(&["web"])
        .set(7);

    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

    let all: String = sink
        .datagrams
        .lock()
        .unwrap()
        .iter()
        .map(|d| String::from_utf8_lossy(d).into_owned())
        .collect();
    assert!(all.contains("statline.app.host.backend.request.total.api.GET.200:4|c"));
    assert!(all.contains("statline.app.host.entrypoint.connections.open.web:7|g"));
}

#[tokio::test]
async fn registry_reports_enabled() {
    let rt = runtime();
    let registry = rt.register_with_sink(&StatsdSection::default(), Arc::new(NullSink));
    assert!(registry.is_enabled());
    rt.stop();
}
