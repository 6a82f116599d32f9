//! Prometheus metrics for notification dispatch.
//!
//! - Notifications sent and failed, by kind
//! - Template render failures, by kind
//! - Activity log writes and failures

use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "notify";

lazy_static! {
    /// Notifications persisted, by kind
    pub static ref NOTIFICATIONS_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_sent_total", METRIC_PREFIX),
        "Total notifications persisted",
        &["kind"]
    ).unwrap();

    /// Notifications whose persistence failed, by kind
    pub static ref NOTIFICATIONS_FAILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_failed_total", METRIC_PREFIX),
        "Total notifications that failed to persist",
        &["kind"]
    ).unwrap();

    /// Templates that could not be rendered, by kind
    pub static ref TEMPLATE_RENDER_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_render_failures_total", METRIC_PREFIX),
        "Total template renders rejected for missing or unresolved variables",
        &["kind"]
    ).unwrap();

    /// Activity log entries written
    pub static ref ACTIVITIES_RECORDED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_activities_recorded_total", METRIC_PREFIX),
        "Total activity log entries recorded"
    ).unwrap();

    /// Activity log entries dropped
    pub static ref ACTIVITIES_FAILED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_activities_failed_total", METRIC_PREFIX),
        "Total activity log entries that could not be recorded"
    ).unwrap();
}

/// Encode all registered metrics in the Prometheus text format
pub fn encode_metrics() -> String {
    use prometheus::Encoder;

    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_includes_touched_metrics() {
        NOTIFICATIONS_SENT_TOTAL
            .with_label_values(&["after_event"])
            .inc();
        ACTIVITIES_RECORDED_TOTAL.inc();

        let output = encode_metrics();
        assert!(output.contains("notify_notifications_sent_total"));
        assert!(output.contains("notify_activities_recorded_total"));
    }
}
