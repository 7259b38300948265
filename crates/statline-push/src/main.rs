//! statline pusher demo binary.
//!
//! Loads the YAML config (path from argv, default `statline.yaml`), starts
//! the push runtime, and emits sample traffic so a collector listening on
//! the configured address sees series immediately. Ctrl-C stops the ticker
//! and exits. The subsystem is fail-open: a missing or broken config file
//! degrades to defaults instead of aborting.

use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use statline_push::config::{self, StatsdSection};
use statline_push::MetricsRuntime;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "statline.yaml".to_string());
    let statsd = match config::load_from_file(&path) {
        Ok(cfg) => cfg.statsd,
        Err(e) => {
            tracing::warn!(%path, error = %e, "config load failed, using defaults");
            StatsdSection::default()
        }
    };

    let runtime = MetricsRuntime::new();
    let registry = runtime.register(&statsd);
    tracing::info!(
        prefix = runtime.client().scheme().prefix(),
        "statline pusher started"
    );

    registry.config_reloads().inc();

    let mut demo = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = demo.tick() => {
                registry.entrypoint_reqs().inc();
                registry
                    .backend_reqs_with_labels(&["demo-backend", "GET", "200"])
                    .inc();
                registry
                    .backend_req_duration_with_labels(&["demo-backend", "GET", "200"])
                    .observe(Duration::from_millis(12));
                registry.backend_server_up().set(1);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    runtime.stop();
    tracing::info!("statline pusher stopped");
}
