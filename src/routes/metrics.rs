//! Prometheus metrics endpoint
//!
//! Exposes portal metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "portal_page_views_total",
        "Portal pages rendered, by view"
    );
    metrics::describe_counter!(
        "portal_spec_resolutions_total",
        "Spec lookups performed while rendering, by outcome"
    );
    metrics::describe_gauge!(
        "portal_index_entries",
        "Number of entries in the most recently served index"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a rendered page (`home`, `spec` or `error`)
pub fn record_page_view(view: &'static str) {
    metrics::counter!("portal_page_views_total", "view" => view).increment(1);
}

/// Record a spec lookup (`found` or `missing`)
pub fn record_spec_resolution(outcome: &'static str) {
    metrics::counter!("portal_spec_resolutions_total", "outcome" => outcome).increment(1);
}

/// Update the index size gauge
pub fn set_index_entries(count: usize) {
    metrics::gauge!("portal_index_entries").set(count as f64);
}
