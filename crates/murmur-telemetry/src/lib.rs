//! Logging for murmur
//!
//! Structured logs via the `tracing` ecosystem, rendered as text or JSON

use murmur_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Resolve the log filter
///
/// An explicit override (the `--log` flag) wins over `RUST_LOG`, which wins
/// over the configured filter. Unparseable filters fall back to `info`.
pub fn filter(config: &TelemetryConfig, log_override: Option<&str>) -> EnvFilter {
    log_override
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| EnvFilter::try_new(&config.filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Initialize logging from configuration
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig, log_override: Option<&str>) -> anyhow::Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .flatten_event(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter(config, log_override))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(filter: &str) -> TelemetryConfig {
        TelemetryConfig {
            filter: filter.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn override_wins() {
        let filter = filter(&config("info"), Some("stt=trace"));
        assert_eq!(filter.to_string(), "stt=trace");
    }

    #[test]
    fn configured_filter_is_used() {
        temp_env::with_var_unset("RUST_LOG", || {
            let filter = filter(&config("warn"), None);
            assert_eq!(filter.to_string(), "warn");
        });
    }

    #[test]
    fn rust_log_beats_configuration() {
        temp_env::with_var("RUST_LOG", Some("error"), || {
            let filter = filter(&config("debug"), None);
            assert_eq!(filter.to_string(), "error");
        });
    }

    #[test]
    fn invalid_override_falls_through() {
        temp_env::with_var_unset("RUST_LOG", || {
            let filter = filter(&config("debug"), Some("stt=notalevel"));
            assert_eq!(filter.to_string(), "debug");
        });
    }
}
