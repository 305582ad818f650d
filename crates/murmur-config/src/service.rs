use std::time::Duration;

use serde::Deserialize;

/// How the handlers are registered with the durable-execution runtime
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Time without progress after which the runtime suspends an invocation
    #[serde(
        default = "default_inactivity_timeout",
        deserialize_with = "duration_str::deserialize_option_duration"
    )]
    pub inactivity_timeout: Option<Duration>,
    /// Time after which the runtime aborts a suspended invocation
    #[serde(default, deserialize_with = "duration_str::deserialize_option_duration")]
    pub abort_timeout: Option<Duration>,
    /// Public keys accepted for request identity verification
    #[serde(default)]
    pub identity_keys: Vec<String>,
    /// How long the runtime keeps the journal of a completed invocation
    #[serde(default, deserialize_with = "duration_str::deserialize_option_duration")]
    pub journal_retention: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout: default_inactivity_timeout(),
            abort_timeout: None,
            identity_keys: Vec::new(),
            journal_retention: None,
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
const fn default_inactivity_timeout() -> Option<Duration> {
    Some(Duration::from_secs(10 * 60))
}
