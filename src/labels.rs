// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common label constants applied to every resource created by the controller.

use std::collections::BTreeMap;

// ============================================================================
// Kubernetes Standard Labels
// https://kubernetes.io/docs/concepts/overview/working-with-objects/common-labels/
// ============================================================================

/// Standard label for the component name within the architecture
pub const K8S_COMPONENT: &str = "app.kubernetes.io/component";

/// Standard label for the tool being used to manage the operation of an application
pub const K8S_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Standard label for the name of a higher-level application this one is part of
pub const K8S_PART_OF: &str = "app.kubernetes.io/part-of";

// ============================================================================
// Kubernetes Standard Label Values
// ============================================================================

/// Value for `app.kubernetes.io/part-of` and `app.kubernetes.io/managed-by`
pub const PART_OF_NODENET: &str = "nodenet";

/// Component value for IP reservations
pub const COMPONENT_IP_RESERVATION: &str = "ip-reservation";

/// Component value for DNS record sets
pub const COMPONENT_DNS_RECORDS: &str = "dns-records";

// ============================================================================
// nodenet-Specific Labels
// ============================================================================

/// Label naming the `NodeSet` that owns a child resource
pub const NODENET_NODESET_LABEL: &str = "nodenet.firestoned.io/nodeset";

/// Build the label set stamped on a child resource of a `NodeSet`.
///
/// # Arguments
///
/// * `nodeset_name` - Name of the owning `NodeSet`
/// * `component` - Component value (e.g., [`COMPONENT_IP_RESERVATION`])
#[must_use]
pub fn child_labels(nodeset_name: &str, component: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (K8S_COMPONENT.to_string(), component.to_string()),
        (K8S_MANAGED_BY.to_string(), PART_OF_NODENET.to_string()),
        (K8S_PART_OF.to_string(), PART_OF_NODENET.to_string()),
        (NODENET_NODESET_LABEL.to_string(), nodeset_name.to_string()),
    ])
}
