//! Process-wide metrics runtime.
//!
//! One `MetricsRuntime` is built at startup and threaded through the
//! application; it owns the pieces that must outlive any single
//! configuration: the statsd client, the dynamic instance cache, and the
//! flush ticker. Rebuilding a [`Registry`] through [`register`] on reload
//! reuses all of them, so series keep their identity and their values.
//!
//! [`register`]: MetricsRuntime::register

use std::sync::Arc;

use statline_core::NameScheme;

use crate::cache::DynamicCache;
use crate::client::StatsdClient;
use crate::config::StatsdSection;
use crate::registry::Registry;
use crate::sink::{MetricSink, UdpSink};
use crate::ticker::{parse_push_interval, FlushTicker};

/// Push target used when the configured address is empty.
pub const DEFAULT_ADDRESS: &str = "localhost:8125";

pub struct MetricsRuntime {
    client: Arc<StatsdClient>,
    cache: Arc<DynamicCache>,
    ticker: FlushTicker,
}

impl MetricsRuntime {
    /// Runtime with the process identity read from the environment.
    pub fn new() -> Self {
        Self::with_scheme(NameScheme::from_env())
    }

    /// Runtime with an explicit name scheme (tests pin identities here).
    pub fn with_scheme(scheme: NameScheme) -> Self {
        Self {
            client: Arc::new(StatsdClient::new(scheme)),
            cache: Arc::new(DynamicCache::new()),
            ticker: FlushTicker::new(),
        }
    }

    /// Start the pusher if it is not running yet and build a registry.
    ///
    /// Called once per configuration (re)load. The UDP target and interval
    /// come from `cfg`, with documented defaults when unset or
    /// unparseable; a second call while the pusher runs keeps the original
    /// ticker and only rebuilds the façade. Must be called from within a
    /// tokio runtime.
    pub fn register(&self, cfg: &StatsdSection) -> Registry {
        let address = if cfg.address.is_empty() {
            DEFAULT_ADDRESS.to_string()
        } else {
            cfg.address.clone()
        };
        self.register_with_sink(cfg, Arc::new(UdpSink::new(address)))
    }

    /// Same as [`register`](Self::register) with a caller-supplied sink.
    ///
    /// Custom transports and tests plug in here; the address field of
    /// `cfg` is ignored since the sink already knows its destination.
    pub fn register_with_sink(&self, cfg: &StatsdSection, sink: Arc<dyn MetricSink>) -> Registry {
        let interval = parse_push_interval(&cfg.push_interval);
        self.ticker.start(interval, Arc::clone(&self.client), sink);
        Registry::new(Arc::clone(&self.client), Arc::clone(&self.cache))
    }

    /// Stop the background pusher. Idempotent; a later
    /// [`register`](Self::register) starts a fresh one.
    pub fn stop(&self) {
        self.ticker.stop();
    }

    /// Whether the background pusher is currently running.
    pub fn is_pushing(&self) -> bool {
        self.ticker.is_running()
    }

    /// The shared client (flush bookkeeping, name scheme).
    pub fn client(&self) -> &Arc<StatsdClient> {
        &self.client
    }

    /// The shared dynamic instance cache.
    pub fn cache(&self) -> &Arc<DynamicCache> {
        &self.cache
    }
}

impl Default for MetricsRuntime {
    fn default() -> Self {
        Self::new()
    }
}
