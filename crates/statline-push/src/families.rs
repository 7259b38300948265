//! Metric family name constants.
//!
//! Families are the stable middle segment of a fully-qualified name, after
//! the process prefix and before any label values. The literals below are
//! part of the wire contract with existing collectors; renaming one is a
//! breaking change to every dashboard built on it.
//!
//! # Labels
//! The dynamic families accept caller-supplied label values appended
//! positionally. By convention backend families take `(backend)` or
//! `(backend, method, code)`, entrypoint families `(entrypoint)` or
//! `(entrypoint, method, code)`; whatever the caller picks, the order must
//! stay fixed per family.

/// Total backend requests. Dynamic labels: backend, method, code.
pub const BACKEND_REQS: &str = "backend.request.total";

/// Backend request duration. Dynamic labels: backend, method, code.
pub const BACKEND_REQ_DURATION: &str = "backend.request.duration";

/// Total request retries against backends.
pub const BACKEND_RETRIES: &str = "backend.retries.total";

/// Open connections per backend. Dynamic labels: backend.
pub const BACKEND_OPEN_CONNS: &str = "backend.connections.open";

/// Backend server health (1 up, 0 down).
pub const BACKEND_SERVER_UP: &str = "backend.server.up";

/// Total configuration reloads.
pub const CONFIG_RELOADS: &str = "config.reload.total";

/// Total failed configuration reloads.
pub const CONFIG_RELOAD_FAILURES: &str = "config.reload.total.failure";

/// Unix timestamp of the last successful reload.
pub const LAST_CONFIG_RELOAD_SUCCESS: &str = "config.reload.lastSuccessTimestamp";

/// Unix timestamp of the last failed reload.
pub const LAST_CONFIG_RELOAD_FAILURE: &str = "config.reload.lastFailureTimestamp";

/// Total entrypoint requests. Dynamic labels: entrypoint, method, code.
pub const ENTRYPOINT_REQS: &str = "entrypoint.request.total";

/// Entrypoint request duration. Dynamic labels: entrypoint, method, code.
pub const ENTRYPOINT_REQ_DURATION: &str = "entrypoint.request.duration";

/// Open connections per entrypoint. Dynamic labels: entrypoint.
pub const ENTRYPOINT_OPEN_CONNS: &str = "entrypoint.connections.open";
