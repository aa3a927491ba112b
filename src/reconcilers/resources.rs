// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic create-or-patch helper for Kubernetes resources.
//!
//! [`create_or_patch`] fetches the current object, applies a mutation to a copy
//! and writes only when the mutation changed something. Writes go through
//! `replace`, which carries the `resourceVersion` of the object that was read,
//! so a concurrent writer makes the call fail with a 409 conflict instead of
//! being silently overwritten.
//!
//! # Example
//!
//! ```rust,no_run
//! use nodenet::crd::{IPReservation, IPReservationSpec};
//! use nodenet::reconcilers::resources::create_or_patch;
//! use kube::{Api, Client};
//!
//! async fn example(client: Client) -> kube::Result<()> {
//!     let api: Api<IPReservation> = Api::namespaced(client, "openstack");
//!     let blank = IPReservation::new("edpm-0", IPReservationSpec::default());
//!
//!     let outcome = create_or_patch(&api, blank, |reservation| {
//!         reservation.spec.networks.clear();
//!     })
//!     .await?;
//!     println!("{}", outcome.as_str());
//!     Ok(())
//! }
//! ```

use crate::constants::FIELD_MANAGER;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use kube::api::PostParams;
use kube::{Api, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::{debug, info};

/// What an upsert did to the stored object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    Unchanged,
}

impl UpsertOutcome {
    /// Lower-case label for logs and metrics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }

    /// Whether the upsert issued a write.
    #[must_use]
    pub fn wrote(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Labels and controller owner stamped on every child resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildMeta {
    pub labels: BTreeMap<String, String>,
    pub owner: OwnerReference,
}

/// Build the controller owner reference pointing at `owner`.
///
/// Garbage collection of children is left to the API server: deleting the
/// owner deletes everything that carries this reference.
#[must_use]
pub fn controller_owner_reference<K>(owner: &K) -> OwnerReference
where
    K: Resource<DynamicType = ()>,
{
    OwnerReference {
        api_version: K::api_version(&()).to_string(),
        kind: K::kind(&()).to_string(),
        name: owner.meta().name.clone().unwrap_or_default(),
        uid: owner.meta().uid.clone().unwrap_or_default(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }
}

/// Apply `child` to an object's metadata.
///
/// Our labels are added or overwritten, foreign labels are kept. Any other
/// controller owner reference is replaced by ours, non-controller owner
/// references are kept. Our reference keeps its position in the list when it
/// is already present. Applying the same `child` twice is a no-op.
pub fn apply_child_meta(meta: &mut ObjectMeta, child: &ChildMeta) {
    let labels = meta.labels.get_or_insert_with(BTreeMap::new);
    for (key, value) in &child.labels {
        labels.insert(key.clone(), value.clone());
    }

    let owners = meta.owner_references.get_or_insert_with(Vec::new);
    owners.retain(|owner| owner.uid == child.owner.uid || owner.controller != Some(true));
    match owners.iter_mut().find(|owner| owner.uid == child.owner.uid) {
        Some(existing) => *existing = child.owner.clone(),
        None => owners.push(child.owner.clone()),
    }
}

/// Check whether `desired` differs from `current` and must be written.
///
/// Objects are compared in their serialized form, the same form the API
/// server would receive.
///
/// # Errors
///
/// Returns an error if either object cannot be serialized.
pub fn needs_write<K: Serialize>(current: &K, desired: &K) -> serde_json::Result<bool> {
    Ok(serde_json::to_value(current)? != serde_json::to_value(desired)?)
}

/// Create or patch a namespaced resource with a mutation callback.
///
/// `blank` names the object (and carries its namespace); it is only used as
/// the starting point when the object does not exist yet. `mutate` is applied
/// to the existing object (or the blank one) and must be deterministic.
///
/// # Errors
///
/// Returns the client error of the failing get, create or replace call. A
/// concurrent modification surfaces as an API error with code 409.
pub async fn create_or_patch<K, F>(api: &Api<K>, blank: K, mutate: F) -> kube::Result<UpsertOutcome>
where
    K: Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned,
    F: FnOnce(&mut K),
{
    let name = blank.name_any();
    let params = PostParams {
        field_manager: Some(FIELD_MANAGER.to_string()),
        ..PostParams::default()
    };

    match api.get_opt(&name).await? {
        None => {
            let mut desired = blank;
            mutate(&mut desired);
            api.create(&params, &desired).await?;
            info!("Created {} {}", K::kind(&()), name);
            Ok(UpsertOutcome::Created)
        }
        Some(current) => {
            let mut desired = current.clone();
            mutate(&mut desired);

            if !needs_write(&current, &desired).map_err(kube::Error::SerdeError)? {
                debug!("{} {} unchanged, skipping write", K::kind(&()), name);
                return Ok(UpsertOutcome::Unchanged);
            }

            api.replace(&name, &params, &desired).await?;
            info!("Updated {} {}", K::kind(&()), name);
            Ok(UpsertOutcome::Updated)
        }
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod resources_tests;
