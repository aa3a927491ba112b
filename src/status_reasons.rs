// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Standard Kubernetes status condition types, reasons and messages for `NodeSet`.
//!
//! A `NodeSet` carries three conditions:
//!
//! - **`IPReservationReady`** - every participating node has a Ready `IPReservation`
//! - **`DNSDataReady`** - host records were derived and accepted by the DNS service
//! - **`Ready`** - neither of the above is waiting or failing
//!
//! Each feature condition is in one of four states, encoded with `status`,
//! `reason` and `severity`:
//!
//! | State           | status  | reason          | severity |
//! |-----------------|---------|-----------------|----------|
//! | Ready           | `True`  | `Ready`         | -        |
//! | NotApplicable   | `True`  | `NotApplicable` | -        |
//! | Waiting         | `False` | `Requested`     | `Info`   |
//! | Error           | `False` | `Error`         | `Error`  |
//!
//! # Example Status
//!
//! ```yaml
//! status:
//!   conditions:
//!     - type: Ready
//!       status: "False"
//!       reason: Requested
//!       severity: Info
//!       message: "NodeSet network identity is converging"
//!     - type: IPReservationReady
//!       status: "True"
//!       reason: Ready
//!       message: "NodeSet IP reservations ready"
//!     - type: DNSDataReady
//!       status: "False"
//!       reason: Requested
//!       severity: Info
//!       message: "NodeSet DNS data not ready"
//! ```

// ============================================================================
// Condition Types
// ============================================================================

/// Overall readiness of the `NodeSet` network identity.
pub const CONDITION_TYPE_READY: &str = "Ready";

/// Readiness of the per-node IP reservations.
pub const CONDITION_TYPE_IP_RESERVATION_READY: &str = "IPReservationReady";

/// Readiness of the derived DNS host records.
pub const CONDITION_TYPE_DNS_DATA_READY: &str = "DNSDataReady";

// ============================================================================
// Reasons
// ============================================================================

/// The feature converged.
pub const REASON_READY: &str = "Ready";

/// A dependency was requested and is not ready yet.
pub const REASON_REQUESTED: &str = "Requested";

/// A list, get or write against the API server failed.
pub const REASON_ERROR: &str = "Error";

/// There is nothing to converge for this feature.
pub const REASON_NOT_APPLICABLE: &str = "NotApplicable";

// ============================================================================
// Severities
// ============================================================================

/// Severity of a condition that is expected to resolve on its own.
pub const SEVERITY_INFO: &str = "Info";

/// Severity of a condition caused by a failure.
pub const SEVERITY_ERROR: &str = "Error";

// ============================================================================
// Messages
// ============================================================================

pub const IP_RESERVATION_READY_MESSAGE: &str = "NodeSet IP reservations ready";
pub const IP_RESERVATION_WAITING_MESSAGE: &str = "NodeSet IP reservations in progress";
pub const IP_RESERVATION_ERROR_MESSAGE: &str = "NodeSet IP reservation error occurred";
pub const IP_RESERVATION_NOT_APPLICABLE_MESSAGE: &str =
    "No NetConfig exists or no node of the NodeSet requests a network, IP reservations are not used";

pub const DNS_DATA_READY_MESSAGE: &str = "NodeSet DNS data ready";
pub const DNS_DATA_WAITING_MESSAGE: &str = "NodeSet DNS data not ready";
pub const DNS_DATA_ERROR_MESSAGE: &str = "NodeSet DNS data error occurred";
pub const DNS_DATA_NOT_APPLICABLE_MESSAGE: &str =
    "No DNS service or no IP reservations exist, DNS data is not used";

pub const NODESET_READY_MESSAGE: &str = "NodeSet network identity ready";
pub const NODESET_WAITING_MESSAGE: &str = "NodeSet network identity is converging";
pub const NODESET_ERROR_MESSAGE: &str = "NodeSet network identity reconciliation failed";
