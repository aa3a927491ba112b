// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `NodeSet` network identity reconciliation.
//!
//! One pass runs a linear pipeline:
//!
//! 1. [`planner`] - which nodes request reservations, on which networks
//! 2. [`reservations`] - check for a `NetConfig`, upsert one `IPReservation` per node, read them back
//! 3. [`readiness`] - reduce the reservations to one readiness
//! 4. [`dns_service`] - gate on the namespace's DNS service
//! 5. [`dns_records`] - build and persist the `DNSRecordSet`
//! 6. [`conditions`] - record the outcome of each stage as named conditions
//!
//! The pass holds no state between invocations; everything is re-read from
//! the store. Repetition and backoff are left to the caller.

pub mod conditions;
pub mod dns_records;
pub mod dns_service;
#[cfg(test)]
pub mod fake;
pub mod planner;
pub mod readiness;
pub mod reservations;
pub mod types;

pub use conditions::{ConditionState, Feature};
pub use readiness::Readiness;

use conditions::{mark, mark_overall};
use dns_records::ensure_dns_records;
use reservations::ensure_ip_reservations;
#[allow(clippy::wildcard_imports)]
use types::*;

use crate::constants::{READY_REQUEUE_DURATION_SECS, WAITING_REQUEUE_DURATION_SECS};
use crate::metrics;
use std::time::Duration;

/// States the features of a `NodeSet` ended up in after a successful pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeSetReconcileOutcome {
    pub reservations: ConditionState,
    pub dns: ConditionState,
    pub overall: ConditionState,
}

impl NodeSetReconcileOutcome {
    /// Whether a dependency is still converging.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.overall.is_pending()
    }

    /// When the `NodeSet` should be looked at again.
    #[must_use]
    pub fn requeue_after(&self) -> Duration {
        if self.is_waiting() {
            Duration::from_secs(WAITING_REQUEUE_DURATION_SECS)
        } else {
            Duration::from_secs(READY_REQUEUE_DURATION_SECS)
        }
    }
}

fn fail(updater: &mut NodeSetStatusUpdater, feature: Feature, err: &NetworkError) {
    error!(
        "{} failed for NodeSet {}/{}: {}",
        feature.condition_type(),
        updater.namespace(),
        updater.name(),
        err
    );
    metrics::record_error(err.kind(), err.category());
    mark(updater, feature, ConditionState::Error, Some(&err.to_string()));
    updater.clear_identity();
    mark_overall(updater);
}

/// Run one reconciliation pass of `nodeset` against `repo`.
///
/// All condition changes are collected in `updater`; writing them is left to
/// the caller, so they are recorded even when the pass fails.
///
/// # Errors
///
/// Returns the first failed API call. The condition of the failing feature is
/// set to `Error` before returning; when the reservation stage fails the DNS
/// condition is left as it was.
pub async fn run_pass<R>(
    repo: &R,
    nodeset: &NodeSet,
    updater: &mut NodeSetStatusUpdater,
) -> Result<NodeSetReconcileOutcome, NetworkError>
where
    R: NetConfigRepository
        + ReservationRepository
        + DnsServiceRepository
        + DnsRecordRepository
        + ?Sized,
{
    updater.set_observed_generation(nodeset.metadata.generation);

    let (plan, reservations) = match ensure_ip_reservations(repo, nodeset).await {
        Ok(result) => result,
        Err(err) => {
            fail(updater, Feature::IpReservation, &err);
            return Err(err);
        }
    };
    let reservation_state = ConditionState::from(&reservations);
    mark(updater, Feature::IpReservation, reservation_state, None);

    let dns = match ensure_dns_records(repo, nodeset, &plan, &reservations).await {
        Ok(dns) => dns,
        Err(err) => {
            fail(updater, Feature::DnsData, &err);
            return Err(err);
        }
    };
    let dns_state = ConditionState::from(&dns);
    mark(updater, Feature::DnsData, dns_state, None);

    match dns {
        Readiness::Ready(identity) => updater.set_identity(identity.into()),
        Readiness::Waiting | Readiness::NotApplicable => updater.clear_identity(),
    }

    let overall = mark_overall(updater);
    Ok(NodeSetReconcileOutcome {
        reservations: reservation_state,
        dns: dns_state,
        overall,
    })
}

/// Reconciles a `NodeSet` resource.
///
/// Runs one pass against the API server and writes the resulting status in a
/// single call, whether the pass succeeded or not.
///
/// # Errors
///
/// Returns the error of the pass, or of the status write if the pass succeeded.
pub async fn reconcile_nodeset(
    ctx: Arc<Context>,
    nodeset: NodeSet,
) -> Result<NodeSetReconcileOutcome, NetworkError> {
    let namespace = nodeset.namespace().unwrap_or_default();
    let name = nodeset.name_any();
    info!("Reconciling NodeSet: {}/{}", namespace, name);

    let mut updater = NodeSetStatusUpdater::new(&nodeset);
    let result = run_pass(&ctx.repository, &nodeset, &mut updater).await;

    if let Err(status_err) = updater.apply(&ctx.client).await {
        metrics::record_error(KIND_NODE_SET, status_err.category());
        match &result {
            Ok(_) => return Err(status_err),
            Err(_) => warn!(
                "Failed to record status of NodeSet {}/{}: {}",
                namespace, name, status_err
            ),
        }
    }

    if let Ok(outcome) = &result {
        debug!(
            nodeset = %name,
            reservations = outcome.reservations.as_str(),
            dns = outcome.dns.as_str(),
            ready = outcome.overall.as_str(),
            "NodeSet pass finished"
        );
    }
    result
}
