//! Metric name scheme.
//!
//! Every series pushed to the collector is identified by a fully-qualified
//! dotted name: `statline.<appName>.<hostName>.<family>[.<label>...]`.
//! Label values are appended positionally, in call order; the scheme does
//! not sort or normalize them, so callers must pass labels for a given
//! family in a fixed, agreed order.
//!
//! Label values are joined verbatim. A label value that itself contains
//! `.` merges with the structural separator; this is a documented
//! limitation kept for wire compatibility with existing collectors, not
//! something this module escapes away.

use std::fmt;
use std::sync::OnceLock;

/// Fixed literal identifying the product in every metric name.
pub const APP_PREFIX: &str = "statline";

/// Environment variable naming the application instance.
pub const APP_NAME_ENV: &str = "APP_NAME";

/// Application name used when [`APP_NAME_ENV`] is unset or empty.
pub const DEFAULT_APP_NAME: &str = "test-proxy";

/// Sentinel host segment used when the OS reports no hostname.
pub const FALLBACK_HOST_NAME: &str = "no-host-available";

static APP_NAME: OnceLock<String> = OnceLock::new();

/// Application name segment, resolved once per process.
///
/// Reads [`APP_NAME_ENV`] on first call and caches the result; an unset or
/// empty variable falls back to [`DEFAULT_APP_NAME`]. The environment is
/// never written back, so the fallback is pure but still stable across
/// every subsequent call in the process.
pub fn app_name() -> &'static str {
    APP_NAME.get_or_init(|| match std::env::var(APP_NAME_ENV) {
        Ok(v) if !v.is_empty() => v,
        _ => DEFAULT_APP_NAME.to_string(),
    })
}

/// Host name segment from the OS, or [`FALLBACK_HOST_NAME`].
pub fn host_name() -> String {
    match hostname::get() {
        Ok(h) => h.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::debug!(error = %e, "hostname unavailable, using sentinel");
            FALLBACK_HOST_NAME.to_string()
        }
    }
}

/// Dot-join a metric family with its label values, in call order.
///
/// An empty label sequence returns `family` unchanged. No trailing
/// separator, no escaping.
pub fn join_labels(family: &str, labels: &[&str]) -> String {
    let mut out = String::with_capacity(family.len() + labels.iter().map(|l| l.len() + 1).sum::<usize>());
    out.push_str(family);
    for label in labels {
        out.push('.');
        out.push_str(label);
    }
    out
}

/// Fully-qualified name of one time series.
///
/// Immutable once built; used as the key of both the dynamic instance
/// cache and the client's flush bookkeeping. Two builds from the same
/// family and the same ordered labels compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricName(String);

impl MetricName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MetricName {
    fn from(s: String) -> Self {
        MetricName(s)
    }
}

/// Name builder bound to one process identity.
///
/// Holds the `<appPrefix>.<appName>.<hostName>` prefix captured at
/// construction time. One scheme lives for the whole process (owned by the
/// runtime) so every registry rebuild produces identical names.
#[derive(Debug, Clone)]
pub struct NameScheme {
    prefix: String,
}

impl NameScheme {
    /// Scheme for this process: env-derived app name, OS host name.
    pub fn from_env() -> Self {
        Self::with_identity(app_name(), &host_name())
    }

    /// Scheme with explicit identity segments. Tests use this to pin names.
    pub fn with_identity(app: &str, host: &str) -> Self {
        Self {
            prefix: format!("{APP_PREFIX}.{app}.{host}"),
        }
    }

    /// Build the fully-qualified name for `family` with `labels` appended.
    pub fn metric(&self, family: &str, labels: &[&str]) -> MetricName {
        MetricName(format!("{}.{}", self.prefix, join_labels(family, labels)))
    }

    /// The `<appPrefix>.<appName>.<hostName>` segment, without trailing dot.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn join_is_positional() {
        assert_ne!(
            join_labels("backend.request.total", &["GET", "200"]),
            join_labels("backend.request.total", &["200", "GET"])
        );
    }

    #[test]
    fn join_empty_labels_is_identity() {
        assert_eq!(join_labels("x", &[]), "x");
    }

    #[test]
    fn embedded_dots_merge_with_separator() {
        // Documented limitation: values are joined verbatim.
        assert_eq!(join_labels("f", &["a.b"]), "f.a.b");
        assert_eq!(join_labels("f", &["a", "b"]), "f.a.b");
    }

    #[test]
    fn scheme_prefixes_every_metric() {
        let scheme = NameScheme::with_identity("app", "host");
        assert_eq!(
            scheme.metric("backend.request.total", &["GET", "200"]).as_str(),
            "statline.app.host.backend.request.total.GET.200"
        );
        assert_eq!(scheme.metric("x", &[]).as_str(), "statline.app.host.x");
    }
}
