// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared types and imports for `NodeSet` reconciliation.

#![allow(clippy::wildcard_imports)]

pub use crate::constants::{
    CTLPLANE_NETWORK, DNS_DATA_LABEL_SELECTOR_VALUE, DOMAIN_SEPARATOR, KIND_DNS_RECORD_SET,
    KIND_DNS_SERVICE, KIND_IP_RESERVATION, KIND_NET_CONFIG, KIND_NODE_SET,
};
pub use crate::context::Context;
pub use crate::crd::{
    DNSHost, DNSRecordSet, DNSRecordSetSpec, DNSService, IPReservation, IPReservationSpec,
    NetConfig, NetworkAttachment, NodeSet, NodeSetSpec, NodeSpec, NodeTemplate, Reservation,
};
pub use crate::errors::NetworkError;
pub use crate::labels::{child_labels, COMPONENT_DNS_RECORDS, COMPONENT_IP_RESERVATION};
pub use crate::reconcilers::repository::{
    DnsRecordRepository, DnsServiceRepository, NetConfigRepository, ReservationRepository,
};
pub use crate::reconcilers::resources::{controller_owner_reference, ChildMeta, UpsertOutcome};
pub use crate::reconcilers::status::{is_ready, NodeSetStatusUpdater, PublishedIdentity};
pub use crate::status_reasons::*;

pub use kube::ResourceExt;
pub use std::collections::BTreeMap;
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};

/// Per-node, per-network values of a `NodeSet` (hostnames or addresses).
///
/// Outer map keys are node names, inner map keys are lowercased network names.
pub type NodeNetworkMap = BTreeMap<String, BTreeMap<String, String>>;
