use serde::Deserialize;

use statline_core::error::{Result, StatlineError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub statsd: StatsdSection,
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(StatlineError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        Ok(())
    }
}

/// Statsd pusher settings.
///
/// Both fields tolerate being unset: an empty address resolves to the
/// default collector target at registration time, and an unparseable
/// interval falls back to the default with a warning. Bad values here
/// never fail startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsdSection {
    /// Collector `host:port`; empty means `localhost:8125`.
    #[serde(default)]
    pub address: String,

    /// Push interval literal, e.g. `"10s"`; empty or invalid means 10s.
    #[serde(default)]
    pub push_interval: String,
}
