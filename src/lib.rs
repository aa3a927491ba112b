// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # nodenet - Node network identity operator for Kubernetes
//!
//! nodenet converges the network identity of a set of managed nodes. For every
//! `NodeSet` it requests one `IPReservation` per node, waits for those
//! reservations and the namespace's `DNSService` to become ready, then derives
//! DNS host records, fully-qualified aliases and a search domain from the
//! reservation results and publishes them as a `DNSRecordSet`.
//!
//! ## Modules
//!
//! - [`crd`] - Custom Resource Definition types
//! - [`reconcilers`] - One reconciliation pass per `NodeSet`
//! - [`context`] - Shared controller context
//! - [`errors`] - Errors of failed API calls
//! - [`metrics`] - Prometheus metrics
//! - [`status_reasons`] - Condition types, reasons and messages
//!
//! ## Example
//!
//! ```rust
//! use nodenet::crd::{NetworkAttachment, NodeSetSpec, NodeSpec, NodeTemplate};
//! use nodenet::reconcilers::nodeset::planner::plan_reservations;
//! use std::collections::BTreeMap;
//!
//! let spec = NodeSetSpec {
//!     node_template: NodeTemplate {
//!         networks: vec![NetworkAttachment {
//!             name: "ctlplane".to_string(),
//!             subnet_name: Some("subnet1".to_string()),
//!             fixed_ip: None,
//!         }],
//!     },
//!     nodes: BTreeMap::from([("edpm-0".to_string(), NodeSpec::default())]),
//! };
//!
//! let plan = plan_reservations(&spec);
//! assert_eq!(plan[0].name, "edpm-0");
//! ```

pub mod constants;
pub mod context;
pub mod crd;
pub mod errors;
pub mod labels;
pub mod metrics;
pub mod reconcilers;
pub mod status_reasons;

#[cfg(test)]
mod crd_tests;
#[cfg(test)]
mod status_reasons_tests;
