//! Registry façade handed to the host application.
//!
//! Bundles the twelve static handles whose names are known at startup with
//! the `*_with_labels` accessors backed by the dynamic instance cache. A
//! registry is rebuilt on every configuration reload, but the client,
//! cache, and name scheme behind it are process-wide, so handles returned
//! before and after a rebuild are the same objects and keep accumulating.

use std::sync::Arc;

use statline_core::{Counter, Gauge, MetricHandle, Timing};

use crate::cache::DynamicCache;
use crate::client::StatsdClient;
use crate::families;

pub struct Registry {
    enabled: bool,
    client: Arc<StatsdClient>,
    cache: Arc<DynamicCache>,

    backend_reqs: Arc<Counter>,
    backend_req_duration: Arc<Timing>,
    backend_retries: Arc<Counter>,
    backend_open_conns: Arc<Gauge>,
    backend_server_up: Arc<Gauge>,
    config_reloads: Arc<Counter>,
    config_reload_failures: Arc<Counter>,
    last_config_reload_success: Arc<Gauge>,
    last_config_reload_failure: Arc<Gauge>,
    entrypoint_reqs: Arc<Counter>,
    entrypoint_req_duration: Arc<Timing>,
    entrypoint_open_conns: Arc<Gauge>,
}

impl Registry {
    pub(crate) fn new(client: Arc<StatsdClient>, cache: Arc<DynamicCache>) -> Self {
        let counter = |family: &str| client.new_counter(client.scheme().metric(family, &[]));
        let gauge = |family: &str| client.new_gauge(client.scheme().metric(family, &[]));
        let timing = |family: &str| client.new_timing(client.scheme().metric(family, &[]));

        let backend_reqs = counter(families::BACKEND_REQS);
        let backend_req_duration = timing(families::BACKEND_REQ_DURATION);
        let backend_retries = counter(families::BACKEND_RETRIES);
        let backend_open_conns = gauge(families::BACKEND_OPEN_CONNS);
        let backend_server_up = gauge(families::BACKEND_SERVER_UP);
        let config_reloads = counter(families::CONFIG_RELOADS);
        let config_reload_failures = counter(families::CONFIG_RELOAD_FAILURES);
        let last_config_reload_success = gauge(families::LAST_CONFIG_RELOAD_SUCCESS);
        let last_config_reload_failure = gauge(families::LAST_CONFIG_RELOAD_FAILURE);
        let entrypoint_reqs = counter(families::ENTRYPOINT_REQS);
        let entrypoint_req_duration = timing(families::ENTRYPOINT_REQ_DURATION);
        let entrypoint_open_conns = gauge(families::ENTRYPOINT_OPEN_CONNS);

        Self {
            enabled: true,
            backend_reqs,
            backend_req_duration,
            backend_retries,
            backend_open_conns,
            backend_server_up,
            config_reloads,
            config_reload_failures,
            last_config_reload_success,
            last_config_reload_failure,
            entrypoint_reqs,
            entrypoint_req_duration,
            entrypoint_open_conns,
            client,
            cache,
        }
    }

    /// Whether this registry actually reports anywhere.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // Static handles.

    pub fn backend_reqs(&self) -> &Counter {
        &self.backend_reqs
    }

    pub fn backend_req_duration(&self) -> &Timing {
        &self.backend_req_duration
    }

    pub fn backend_retries(&self) -> &Counter {
        &self.backend_retries
    }

    pub fn backend_open_conns(&self) -> &Gauge {
        &self.backend_open_conns
    }

    pub fn backend_server_up(&self) -> &Gauge {
        &self.backend_server_up
    }

    pub fn config_reloads(&self) -> &Counter {
        &self.config_reloads
    }

    pub fn config_reload_failures(&self) -> &Counter {
        &self.config_reload_failures
    }

    pub fn last_config_reload_success(&self) -> &Gauge {
        &self.last_config_reload_success
    }

    pub fn last_config_reload_failure(&self) -> &Gauge {
        &self.last_config_reload_failure
    }

    pub fn entrypoint_reqs(&self) -> &Counter {
        &self.entrypoint_reqs
    }

    pub fn entrypoint_req_duration(&self) -> &Timing {
        &self.entrypoint_req_duration
    }

    pub fn entrypoint_open_conns(&self) -> &Gauge {
        &self.entrypoint_open_conns
    }

    // Dynamic handles: label values appended positionally to the family.
    // Same family + same ordered labels always resolves to the same handle.

    pub fn backend_reqs_with_labels(&self, labels: &[&str]) -> Arc<Counter> {
        self.dynamic_counter(families::BACKEND_REQS, labels)
    }

    pub fn backend_req_duration_with_labels(&self, labels: &[&str]) -> Arc<Timing> {
        self.dynamic_timing(families::BACKEND_REQ_DURATION, labels)
    }

    pub fn backend_open_conns_with_labels(&self, labels: &[&str]) -> Arc<Gauge> {
        self.dynamic_gauge(families::BACKEND_OPEN_CONNS, labels)
    }

    pub fn entrypoint_reqs_with_labels(&self, labels: &[&str]) -> Arc<Counter> {
        self.dynamic_counter(families::ENTRYPOINT_REQS, labels)
    }

    pub fn entrypoint_req_duration_with_labels(&self, labels: &[&str]) -> Arc<Timing> {
        self.dynamic_timing(families::ENTRYPOINT_REQ_DURATION, labels)
    }

    pub fn entrypoint_open_conns_with_labels(&self, labels: &[&str]) -> Arc<Gauge> {
        self.dynamic_gauge(families::ENTRYPOINT_OPEN_CONNS, labels)
    }

    fn dynamic_counter(&self, family: &str, labels: &[&str]) -> Arc<Counter> {
        let name = self.client.scheme().metric(family, labels);
        self.cache
            .get_or_create(name.clone(), || {
                MetricHandle::Counter(self.client.new_counter(name.clone()))
            })
            .counter_or_detached(&name)
    }

    fn dynamic_gauge(&self, family: &str, labels: &[&str]) -> Arc<Gauge> {
        let name = self.client.scheme().metric(family, labels);
        self.cache
            .get_or_create(name.clone(), || {
                MetricHandle::Gauge(self.client.new_gauge(name.clone()))
            })
            .gauge_or_detached(&name)
    }

    fn dynamic_timing(&self, family: &str, labels: &[&str]) -> Arc<Timing> {
        let name = self.client.scheme().metric(family, labels);
        self.cache
            .get_or_create(name.clone(), || {
                MetricHandle::Timing(self.client.new_timing(name.clone()))
            })
            .timing_or_detached(&name)
    }
}
