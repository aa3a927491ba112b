// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the nodenet operator.
//!
//! All metrics carry the namespace prefix `nodenet_firestoned_io_`
//! (prometheus-safe version of "nodenet.firestoned.io").
//!
//! # Metrics Categories
//!
//! - **Reconciliation Metrics** - Passes run, their outcome and duration
//! - **Child Resource Metrics** - Writes issued against `IPReservation` and `DNSRecordSet`
//! - **Condition Metrics** - State changes of `NodeSet` conditions
//! - **Error Metrics** - Failed API calls by category
//!
//! # Example
//!
//! ```rust,no_run
//! use nodenet::metrics::record_reconciliation_success;
//!
//! record_reconciliation_success("NodeSet", std::time::Duration::from_millis(40));
//! ```

use crate::reconcilers::resources::UpsertOutcome;
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all nodenet metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "nodenet_firestoned_io";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Reconciliation Metrics
// ============================================================================

/// Total number of reconciliations by resource type and status
///
/// Labels:
/// - `resource_type`: Kind of resource (`NodeSet`)
/// - `status`: Outcome (`success`, `error`, `requeue`)
pub static RECONCILIATION_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_reconciliations_total"),
        "Total number of reconciliations by resource type and status",
    );
    let counter = CounterVec::new(opts, &["resource_type", "status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of reconciliations in seconds
pub static RECONCILIATION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_reconciliation_duration_seconds"),
        "Duration of reconciliations in seconds by resource type",
    )
    .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]);
    let histogram = HistogramVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

// ============================================================================
// Child Resource Metrics
// ============================================================================

/// Total number of child resource upserts by kind and outcome
///
/// Labels:
/// - `resource_type`: Kind of child (`IPReservation`, `DNSRecordSet`)
/// - `outcome`: `created`, `updated` or `unchanged`
pub static CHILD_WRITES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_child_upserts_total"),
        "Total number of child resource upserts by kind and outcome",
    );
    let counter = CounterVec::new(opts, &["resource_type", "outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Condition Metrics
// ============================================================================

/// Total number of `NodeSet` condition state changes
///
/// Counted per condition type and the state entered, so the series set stays
/// bounded no matter how many `NodeSet`s come and go.
///
/// Labels:
/// - `condition_type`: `IPReservationReady`, `DNSDataReady` or `Ready`
/// - `state`: `Ready`, `Waiting`, `Error` or `NotApplicable`
pub static CONDITION_TRANSITIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_condition_transitions_total"),
        "Total number of NodeSet condition state changes by condition type and new state",
    );
    let counter = CounterVec::new(opts, &["condition_type", "state"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Error Metrics
// ============================================================================

/// Total number of errors by resource type and error category
///
/// Labels:
/// - `resource_type`: Kind of resource the failing call targeted
/// - `error_type`: `list_error`, `get_error`, `persist_error` or `status_error`
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of errors by resource type and error category",
    );
    let counter = CounterVec::new(opts, &["resource_type", "error_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a successful reconciliation
pub fn record_reconciliation_success(resource_type: &str, duration: Duration) {
    RECONCILIATION_TOTAL
        .with_label_values(&[resource_type, "success"])
        .inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&[resource_type])
        .observe(duration.as_secs_f64());
}

/// Record a failed reconciliation
pub fn record_reconciliation_error(resource_type: &str, duration: Duration) {
    RECONCILIATION_TOTAL
        .with_label_values(&[resource_type, "error"])
        .inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&[resource_type])
        .observe(duration.as_secs_f64());
}

/// Record a pass that finished but has to be retried because a dependency is not ready
pub fn record_reconciliation_requeue(resource_type: &str, duration: Duration) {
    RECONCILIATION_TOTAL
        .with_label_values(&[resource_type, "requeue"])
        .inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&[resource_type])
        .observe(duration.as_secs_f64());
}

/// Record the outcome of a child resource upsert
pub fn record_child_write(resource_type: &str, outcome: UpsertOutcome) {
    CHILD_WRITES_TOTAL
        .with_label_values(&[resource_type, outcome.as_str()])
        .inc();
}

/// Record a condition entering `state`
pub fn record_condition_transition(condition_type: &str, state: &str) {
    CONDITION_TRANSITIONS_TOTAL
        .with_label_values(&[condition_type, state])
        .inc();
}

/// Record an error
pub fn record_error(resource_type: &str, error_type: &str) {
    ERRORS_TOTAL
        .with_label_values(&[resource_type, error_type])
        .inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}
