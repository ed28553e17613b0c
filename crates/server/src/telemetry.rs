//! Logging and Prometheus metrics setup.

use crate::config::ServerConfig;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

pub const PREDICTIONS_TOTAL: &str = "emotext_predictions_total";
pub const INFERENCE_DURATION: &str = "emotext_inference_duration_seconds";
pub const REQUEST_ERRORS_TOTAL: &str = "emotext_request_errors_total";

/// Install the global tracing subscriber.
///
/// JSON lines in normal operation; pretty output with a `debug` filter when
/// `config.debug` is set. Returns an error if a subscriber is already set.
pub fn init_tracing(config: &ServerConfig) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true);

    if config.debug {
        builder
            .pretty()
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    } else {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    }
    Ok(())
}

/// Install the process-wide Prometheus recorder.
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(INFERENCE_DURATION.to_string()),
            &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
        )?
        .install_recorder()?;

    metrics::describe_counter!(PREDICTIONS_TOTAL, "Predictions served, by route and label");
    metrics::describe_histogram!(
        INFERENCE_DURATION,
        metrics::Unit::Seconds,
        "Model inference latency"
    );
    metrics::describe_counter!(REQUEST_ERRORS_TOTAL, "Error responses, by error code");

    tracing::info!("Prometheus metrics initialized");
    Ok(handle)
}

/// Record one successful prediction.
pub fn record_prediction(route: &'static str, label: &str, elapsed: Duration) {
    metrics::counter!(PREDICTIONS_TOTAL, "route" => route, "label" => label.to_string())
        .increment(1);
    metrics::histogram!(INFERENCE_DURATION, "route" => route).record(elapsed.as_secs_f64());
}
