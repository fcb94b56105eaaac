//! Metrics collection.
//!
//! # Metrics
//! - `hero_bridge_outcomes_total` (counter): per-hero bridge results by network, status
//! - `hero_bridge_directory_pages_total` (counter): directory page fetches by status

/// Record the terminal state of one hero's bridge attempt.
pub fn record_bridge_outcome(network: &str, status: &'static str) {
    metrics::counter!(
        "hero_bridge_outcomes_total",
        "network" => network.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Record one directory page request.
pub fn record_directory_page(status: &'static str) {
    metrics::counter!("hero_bridge_directory_pages_total", "status" => status).increment(1);
}
