//! statline push subsystem library entry.
//!
//! This crate wires the name scheme, handle factory, dynamic instance
//! cache, flush ticker, and registry façade into a cohesive statsd push
//! stack. It is intended to be consumed by the binary (`main.rs`), by the
//! host application, and by integration tests.
//!
//! Typical wiring: build one [`MetricsRuntime`] at process startup, call
//! [`MetricsRuntime::register`] on every configuration (re)load to obtain a
//! fresh [`Registry`], and mutate handles through the registry on the
//! request path. The runtime owns the process-wide pieces, so registries
//! are cheap to rebuild and metric identity survives reloads.

pub mod cache;
pub mod client;
pub mod config;
pub mod families;
pub mod registry;
pub mod runtime;
pub mod sink;
pub mod ticker;

pub use registry::Registry;
pub use runtime::MetricsRuntime;
