// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `IPReservation` children of a `NodeSet`.

#[allow(clippy::wildcard_imports)]
use super::types::*;

use super::planner::{plan_reservations, PlannedNode};
use super::readiness::{aggregate_reservations, Readiness, ReservationMap};

/// Upsert one `IPReservation` per planned node, named after the node.
///
/// Stops at the first failing upsert and returns its error; reservations
/// synchronized before the failure are left as written.
///
/// # Errors
///
/// Returns [`NetworkError::Persist`] for the first node that could not be written.
pub async fn sync_reservations<R>(
    repo: &R,
    namespace: &str,
    plan: &[PlannedNode],
    child: &ChildMeta,
) -> Result<usize, NetworkError>
where
    R: ReservationRepository + ?Sized,
{
    let mut written = 0;
    for node in plan {
        let spec = IPReservationSpec {
            networks: node.networks.clone(),
        };
        let outcome = repo
            .upsert_reservation(namespace, &node.name, &spec, child)
            .await?;

        if outcome.wrote() {
            written += 1;
            debug!(
                reservation = %node.name,
                outcome = outcome.as_str(),
                "IPReservation written"
            );
        }
    }
    Ok(written)
}

/// Read back the reservation of every planned node, in plan order.
///
/// # Errors
///
/// Returns [`NetworkError::Get`] for the first reservation that could not be read.
pub async fn read_back_reservations<R>(
    repo: &R,
    namespace: &str,
    plan: &[PlannedNode],
) -> Result<Vec<IPReservation>, NetworkError>
where
    R: ReservationRepository + ?Sized,
{
    let mut reservations = Vec::with_capacity(plan.len());
    for node in plan {
        reservations.push(repo.get_reservation(namespace, &node.name).await?);
    }
    Ok(reservations)
}

/// Make sure every participating node of `nodeset` has an `IPReservation`
/// and report whether they are all ready.
///
/// A `NodeSet` without participating nodes, or in a namespace without a
/// `NetConfig`, is [`Readiness::NotApplicable`] and causes no writes.
///
/// # Errors
///
/// Returns the failing `NetConfig` list, or the first failing upsert or read-back.
pub async fn ensure_ip_reservations<R>(
    repo: &R,
    nodeset: &NodeSet,
) -> Result<(Vec<PlannedNode>, Readiness<ReservationMap>), NetworkError>
where
    R: NetConfigRepository + ReservationRepository + ?Sized,
{
    let namespace = nodeset.namespace().unwrap_or_default();
    let plan = plan_reservations(&nodeset.spec);

    if plan.is_empty() {
        debug!(
            nodeset = %nodeset.name_any(),
            "No node requests networks, IP reservation not applicable"
        );
        return Ok((plan, Readiness::NotApplicable));
    }

    if repo.list_net_configs(&namespace).await?.is_empty() {
        debug!(
            nodeset = %nodeset.name_any(),
            "No NetConfig in namespace, IP reservation not applicable"
        );
        return Ok((plan, Readiness::NotApplicable));
    }

    let child = ChildMeta {
        labels: child_labels(&nodeset.name_any(), COMPONENT_IP_RESERVATION),
        owner: controller_owner_reference(nodeset),
    };

    let written = sync_reservations(repo, &namespace, &plan, &child).await?;
    debug!(
        nodeset = %nodeset.name_any(),
        planned = plan.len(),
        written,
        "Synchronized IPReservations"
    );

    let reservations = read_back_reservations(repo, &namespace, &plan).await?;
    let readiness = aggregate_reservations(&reservations);
    Ok((plan, readiness))
}

#[cfg(test)]
#[path = "reservations_tests.rs"]
mod reservations_tests;
