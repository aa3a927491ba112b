// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS host records derived from the IP reservations of a `NodeSet`.
//!
//! The record set is only built once both the DNS service and every IP
//! reservation are ready, and is written as a whole in one upsert.

#[allow(clippy::wildcard_imports)]
use super::types::*;

use super::dns_service::{check_dns_service, DnsAddresses};
use super::planner::PlannedNode;
use super::readiness::{Readiness, ReservationMap};

/// Host part of `hostname`, up to the first domain separator.
#[must_use]
pub fn short_name(hostname: &str) -> &str {
    hostname
        .split(DOMAIN_SEPARATOR)
        .next()
        .unwrap_or(hostname)
}

/// Whether `hostname` already carries a domain.
#[must_use]
pub fn is_fqdn(hostname: &str) -> bool {
    hostname.contains(DOMAIN_SEPARATOR)
}

/// Records and per-node maps derived from the reservations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DnsRecordPlan {
    /// One entry per reservation that yields at least one name.
    pub hosts: Vec<DNSHost>,
    /// DNS domain of the first control-plane reservation, in node order.
    pub search_domain: Option<String>,
    /// node -> network -> hostname
    pub hostnames: NodeNetworkMap,
    /// node -> network -> address
    pub ips: NodeNetworkMap,
}

/// Project reservations onto DNS host records.
///
/// For every reservation the alias `<short name>.<dns domain>` is registered
/// unless it equals the declared hostname. A declared hostname that is already
/// fully qualified is registered as is on the control-plane network, once.
/// Reservations without a DNS domain only contribute their address.
#[must_use]
pub fn build_dns_records(plan: &[PlannedNode], reservations: &ReservationMap) -> DnsRecordPlan {
    let mut records = DnsRecordPlan::default();

    for node in plan {
        let Some(node_reservations) = reservations.get(&node.name) else {
            continue;
        };
        let short = short_name(&node.hostname);

        for reservation in node_reservations {
            let network = reservation.network.to_lowercase();
            let is_ctlplane = network == CTLPLANE_NETWORK;
            let mut names: Vec<String> = Vec::new();

            if !reservation.dns_domain.is_empty() {
                let fqdn = format!("{short}{DOMAIN_SEPARATOR}{}", reservation.dns_domain);
                if fqdn != node.hostname {
                    records
                        .hostnames
                        .entry(node.name.clone())
                        .or_default()
                        .insert(network.clone(), fqdn.clone());
                    names.push(fqdn);
                }
            }

            if is_ctlplane && is_fqdn(&node.hostname) {
                if !names.contains(&node.hostname) {
                    names.push(node.hostname.clone());
                }
                records
                    .hostnames
                    .entry(node.name.clone())
                    .or_default()
                    .insert(network.clone(), node.hostname.clone());
            }

            if is_ctlplane && records.search_domain.is_none() && !reservation.dns_domain.is_empty() {
                records.search_domain = Some(reservation.dns_domain.clone());
            }

            records
                .ips
                .entry(node.name.clone())
                .or_default()
                .insert(network, reservation.address.clone());

            if !names.is_empty() {
                records.hosts.push(DNSHost {
                    ip: reservation.address.clone(),
                    hostnames: names,
                });
            }
        }
    }

    records
}

/// Network identity of a `NodeSet` once its DNS data is served.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkIdentity {
    pub addresses: DnsAddresses,
    pub search_domain: Option<String>,
    pub hostnames: NodeNetworkMap,
    pub ips: NodeNetworkMap,
}

impl From<NetworkIdentity> for PublishedIdentity {
    fn from(identity: NetworkIdentity) -> Self {
        Self {
            dns_cluster_addresses: identity.addresses.cluster_addresses.unwrap_or_default(),
            ctlplane_search_domain: identity.search_domain,
            all_hostnames: identity.hostnames,
            all_ips: identity.ips,
        }
    }
}

/// Build and persist the DNS records of `nodeset` once their inputs are ready.
///
/// The DNS service is checked first, then the reservation readiness computed
/// earlier in the pass. Records are never built from partial data.
///
/// # Errors
///
/// Returns the error of the failing list, upsert or read-back call.
pub async fn ensure_dns_records<R>(
    repo: &R,
    nodeset: &NodeSet,
    plan: &[PlannedNode],
    reservations: &Readiness<ReservationMap>,
) -> Result<Readiness<NetworkIdentity>, NetworkError>
where
    R: DnsServiceRepository + DnsRecordRepository + ?Sized,
{
    let namespace = nodeset.namespace().unwrap_or_default();
    let name = nodeset.name_any();

    // Either input being not applicable makes DNS data not applicable, even
    // while the other one is still converging.
    let reservations = match reservations {
        Readiness::Ready(map) if !map.is_empty() => Some(map),
        Readiness::Waiting => None,
        Readiness::Ready(_) | Readiness::NotApplicable => {
            debug!(nodeset = %name, "No IP reservations, DNS data not applicable");
            return Ok(Readiness::NotApplicable);
        }
    };

    let addresses = match check_dns_service(repo, &namespace).await? {
        Readiness::NotApplicable => {
            debug!(nodeset = %name, "No DNSService, DNS data not applicable");
            return Ok(Readiness::NotApplicable);
        }
        Readiness::Waiting => {
            debug!(nodeset = %name, "DNSService not ready, waiting");
            return Ok(Readiness::Waiting);
        }
        Readiness::Ready(addresses) if !addresses.has_server_addresses() => {
            debug!(nodeset = %name, "DNSService advertises no address, DNS data not applicable");
            return Ok(Readiness::NotApplicable);
        }
        Readiness::Ready(addresses) => addresses,
    };

    let Some(reservations) = reservations else {
        debug!(nodeset = %name, "IP reservations not ready, waiting");
        return Ok(Readiness::Waiting);
    };

    let records = build_dns_records(plan, reservations);
    let spec = DNSRecordSetSpec {
        hosts: records.hosts,
        dns_data_label_selector_value: DNS_DATA_LABEL_SELECTOR_VALUE.to_string(),
    };
    let child = ChildMeta {
        labels: child_labels(&name, COMPONENT_DNS_RECORDS),
        owner: controller_owner_reference(nodeset),
    };

    let outcome = repo
        .upsert_record_set(&namespace, &name, &spec, &child)
        .await?;
    if outcome.wrote() {
        info!(
            "Published {} host(s) for NodeSet {}/{}",
            spec.hosts.len(),
            namespace,
            name
        );
    }

    let record_set = repo.get_record_set(&namespace, &name).await?;
    let served = record_set
        .status
        .as_ref()
        .is_some_and(|status| is_ready(&status.conditions));
    if !served {
        debug!(nodeset = %name, "DNSRecordSet not served yet, waiting");
        return Ok(Readiness::Waiting);
    }

    Ok(Readiness::Ready(NetworkIdentity {
        addresses,
        search_domain: records.search_domain,
        hostnames: records.hostnames,
        ips: records.ips,
    }))
}

#[cfg(test)]
#[path = "dns_records_tests.rs"]
mod dns_records_tests;
