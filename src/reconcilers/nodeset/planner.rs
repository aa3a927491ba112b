// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Derives which nodes request IP reservations, and on which networks.

#[allow(clippy::wildcard_imports)]
use super::types::*;

/// A node that participates in IP reservation.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedNode {
    /// Node name, also the name of its `IPReservation`.
    pub name: String,
    /// Declared hostname, falling back to the node name.
    pub hostname: String,
    /// Networks to reserve addresses on.
    pub networks: Vec<NetworkAttachment>,
}

/// Networks a node requests: its own list, or the template's when its own is empty.
#[must_use]
pub fn effective_networks<'a>(
    node: &'a NodeSpec,
    template: &'a NodeTemplate,
) -> &'a [NetworkAttachment] {
    if node.networks.is_empty() {
        &template.networks
    } else {
        &node.networks
    }
}

/// Plan one reservation per participating node, in lexical order of node names.
///
/// Nodes whose effective network list is empty are left out. An empty plan
/// means the feature does not apply to this `NodeSet`.
#[must_use]
pub fn plan_reservations(spec: &NodeSetSpec) -> Vec<PlannedNode> {
    spec.nodes
        .iter()
        .filter_map(|(name, node)| {
            let networks = effective_networks(node, &spec.node_template);
            if networks.is_empty() {
                return None;
            }

            let hostname = node
                .host_name
                .as_deref()
                .filter(|h| !h.is_empty())
                .unwrap_or(name)
                .to_string();

            Some(PlannedNode {
                name: name.clone(),
                hostname,
                networks: networks.to_vec(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod planner_tests;
