// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the nodenet operator.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for all nodenet CRDs
pub const API_GROUP: &str = "nodenet.firestoned.io";

/// API version for all nodenet CRDs
pub const API_VERSION: &str = "v1beta1";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "nodenet.firestoned.io/v1beta1";

/// Kind name for `NodeSet` resource
pub const KIND_NODE_SET: &str = "NodeSet";

/// Kind name for `IPReservation` resource
pub const KIND_IP_RESERVATION: &str = "IPReservation";

/// Kind name for `NetConfig` resource
pub const KIND_NET_CONFIG: &str = "NetConfig";

/// Kind name for `DNSService` resource
pub const KIND_DNS_SERVICE: &str = "DNSService";

/// Kind name for `DNSRecordSet` resource
pub const KIND_DNS_RECORD_SET: &str = "DNSRecordSet";

/// Field manager used for every write issued by the controller
pub const FIELD_MANAGER: &str = "nodenet-controller";

// ============================================================================
// Network Identity Constants
// ============================================================================

/// Name of the control-plane network (compared case-insensitively).
///
/// The DNS domain of the first reservation on this network becomes the
/// cluster search domain, and fully-qualified node hostnames are published
/// as aliases on it.
pub const CTLPLANE_NETWORK: &str = "ctlplane";

/// Value written to `spec.dnsDataLabelSelectorValue` of every `DNSRecordSet`.
///
/// The DNS service mounts all record sets carrying this value.
pub const DNS_DATA_LABEL_SELECTOR_VALUE: &str = "dnsdata";

/// Separator between DNS labels
pub const DOMAIN_SEPARATOR: char = '.';

// ============================================================================
// Kubernetes API Constants
// ============================================================================

/// Page size for paginated list calls against the Kubernetes API
pub const KUBE_LIST_PAGE_SIZE: u32 = 100;

// ============================================================================
// Controller Requeue Constants
// ============================================================================

/// Requeue duration for controller errors (30 seconds)
pub const ERROR_REQUEUE_DURATION_SECS: u64 = 30;

/// Requeue duration while a dependency is still converging (15 seconds)
pub const WAITING_REQUEUE_DURATION_SECS: u64 = 15;

/// Requeue duration once everything is ready (5 minutes)
pub const READY_REQUEUE_DURATION_SECS: u64 = 300;

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 4;

// ============================================================================
// Metrics Server Constants
// ============================================================================

/// Path for Prometheus metrics endpoint
pub const METRICS_SERVER_PATH: &str = "/metrics";

/// Default bind address for the metrics HTTP server
pub const METRICS_SERVER_BIND_ADDRESS: &str = "0.0.0.0:8080";
