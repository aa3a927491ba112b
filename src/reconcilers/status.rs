// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Status condition helpers for Kubernetes resources.
//!
//! Conditions are kept as an ordered list keyed by `type`: setting a condition
//! replaces the entry with the same type in place or appends a new one, so the
//! last write for a type wins.
//!
//! # Example
//!
//! ```rust
//! use nodenet::reconcilers::status::{find_condition, set_condition};
//!
//! let mut conditions = Vec::new();
//! set_condition(&mut conditions, "Ready", "False", "Requested", Some("Info"), "Waiting");
//! set_condition(&mut conditions, "Ready", "True", "Ready", None, "Done");
//!
//! assert_eq!(conditions.len(), 1);
//! assert_eq!(find_condition(&conditions, "Ready").unwrap().status, "True");
//! ```

use crate::constants::{API_GROUP_VERSION, KIND_NODE_SET};
use crate::crd::{Condition, NodeSet, NodeSetStatus};
use crate::errors::NetworkError;
use crate::status_reasons::CONDITION_TYPE_READY;
use chrono::Utc;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, ResourceExt};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::debug;

/// Find a condition by type in a list of conditions.
#[must_use]
pub fn find_condition<'a>(
    conditions: &'a [Condition],
    condition_type: &str,
) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.r#type == condition_type)
}

/// Check whether the `Ready` condition of a resource is confirmed `True`.
///
/// A missing condition, `False` and `Unknown` all count as not ready.
#[must_use]
pub fn is_ready(conditions: &[Condition]) -> bool {
    find_condition(conditions, CONDITION_TYPE_READY).is_some_and(|c| c.status == "True")
}

/// Update or add a condition in a conditions list (in-memory, no API call).
///
/// The `lastTransitionTime` is preserved if the status did not change, and
/// set to now otherwise.
pub fn set_condition(
    conditions: &mut Vec<Condition>,
    condition_type: &str,
    status: &str,
    reason: &str,
    severity: Option<&str>,
    message: &str,
) {
    if let Some(existing) = conditions.iter_mut().find(|c| c.r#type == condition_type) {
        if existing.status != status || existing.last_transition_time.is_none() {
            existing.last_transition_time = Some(Utc::now().to_rfc3339());
        }
        existing.status = status.to_string();
        existing.reason = Some(reason.to_string());
        existing.severity = severity.map(str::to_string);
        existing.message = Some(message.to_string());
    } else {
        conditions.push(Condition {
            r#type: condition_type.to_string(),
            status: status.to_string(),
            reason: Some(reason.to_string()),
            severity: severity.map(str::to_string),
            message: Some(message.to_string()),
            last_transition_time: Some(Utc::now().to_rfc3339()),
        });
    }
}

/// Compare two condition lists ignoring `lastTransitionTime`.
#[must_use]
pub fn conditions_equal(current: &[Condition], new: &[Condition]) -> bool {
    if current.len() != new.len() {
        return false;
    }

    new.iter().all(|new_cond| {
        find_condition(current, &new_cond.r#type).is_some_and(|curr| {
            curr.status == new_cond.status
                && curr.reason == new_cond.reason
                && curr.severity == new_cond.severity
                && curr.message == new_cond.message
        })
    })
}

/// Network identity published on the `NodeSet` status once DNS data is ready.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PublishedIdentity {
    pub dns_cluster_addresses: Vec<String>,
    pub ctlplane_search_domain: Option<String>,
    pub all_hostnames: BTreeMap<String, BTreeMap<String, String>>,
    pub all_ips: BTreeMap<String, BTreeMap<String, String>>,
}

/// Centralized status updater for `NodeSet` resources.
///
/// Collects all status changes of a pass in memory and writes them in a
/// single server-side apply on the status subresource, skipped entirely when
/// nothing changed semantically.
pub struct NodeSetStatusUpdater {
    namespace: String,
    name: String,
    current_status: Option<NodeSetStatus>,
    new_status: NodeSetStatus,
}

impl NodeSetStatusUpdater {
    /// Create a new status updater, starting from the current status of `nodeset`.
    #[must_use]
    pub fn new(nodeset: &NodeSet) -> Self {
        let current_status = nodeset.status.clone();
        let new_status = current_status.clone().unwrap_or_default();

        Self {
            namespace: nodeset.namespace().unwrap_or_default(),
            name: nodeset.name_any(),
            current_status,
            new_status,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Condition of type `condition_type` as it will be written.
    #[must_use]
    pub fn condition(&self, condition_type: &str) -> Option<&Condition> {
        find_condition(&self.new_status.conditions, condition_type)
    }

    /// Update or add a condition (in-memory only, no API call).
    pub fn set_condition(
        &mut self,
        condition_type: &str,
        status: &str,
        reason: &str,
        severity: Option<&str>,
        message: &str,
    ) {
        set_condition(
            &mut self.new_status.conditions,
            condition_type,
            status,
            reason,
            severity,
            message,
        );
    }

    /// Set the observed generation to match the current generation.
    pub fn set_observed_generation(&mut self, generation: Option<i64>) {
        self.new_status.observed_generation = generation;
    }

    /// Publish the network identity derived in this pass.
    pub fn set_identity(&mut self, identity: PublishedIdentity) {
        self.new_status.dns_cluster_addresses = identity.dns_cluster_addresses;
        self.new_status.ctlplane_search_domain = identity.ctlplane_search_domain;
        self.new_status.all_hostnames = identity.all_hostnames;
        self.new_status.all_ips = identity.all_ips;
    }

    /// Withdraw any previously published network identity.
    pub fn clear_identity(&mut self) {
        self.set_identity(PublishedIdentity::default());
    }

    /// Check if the status has semantic changes that warrant an API update.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        match &self.current_status {
            None => true,
            Some(current) => {
                current.observed_generation != self.new_status.observed_generation
                    || current.dns_cluster_addresses != self.new_status.dns_cluster_addresses
                    || current.ctlplane_search_domain != self.new_status.ctlplane_search_domain
                    || current.all_hostnames != self.new_status.all_hostnames
                    || current.all_ips != self.new_status.all_ips
                    || !conditions_equal(&current.conditions, &self.new_status.conditions)
            }
        }
    }

    /// The status as it will be written.
    #[must_use]
    pub fn status(&self) -> &NodeSetStatus {
        &self.new_status
    }

    /// Apply the collected status changes to Kubernetes (single API call).
    ///
    /// Server-side apply is used so that map entries and fields dropped since
    /// the previous pass (for example a node removed from the set) are removed
    /// from the stored status as well.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::StatusUpdate`] if the API call fails.
    pub async fn apply(&self, client: &Client) -> Result<(), NetworkError> {
        if !self.has_changes() {
            debug!(
                "NodeSet {}/{} status unchanged, skipping update",
                self.namespace, self.name
            );
            return Ok(());
        }

        let api: Api<NodeSet> = Api::namespaced(client.clone(), &self.namespace);
        let patch = json!({
            "apiVersion": API_GROUP_VERSION,
            "kind": KIND_NODE_SET,
            "status": self.new_status,
        });

        api.patch_status(
            &self.name,
            &PatchParams::apply(crate::constants::FIELD_MANAGER).force(),
            &Patch::Apply(&patch),
        )
        .await
        .map_err(|e| NetworkError::status_update(KIND_NODE_SET, &self.namespace, &self.name, e))?;

        debug!(
            "Updated NodeSet {}/{} status: {} condition(s)",
            self.namespace,
            self.name,
            self.new_status.conditions.len()
        );

        Ok(())
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;
