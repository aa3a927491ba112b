// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory repository for driving `NodeSet` passes in unit tests.
//!
//! Objects are stored per kind and name within a single namespace. Upserts
//! behave like the API server with a status subresource: they replace the
//! spec and metadata but keep the stored status, and only count as a write
//! when something changed.
//!
//! A new repository holds one `NetConfig`, so IP reservation is in use unless
//! a test starts from [`FakeRepository::without_net_config`].

#![allow(clippy::unwrap_used)]

#[allow(clippy::wildcard_imports)]
use super::types::*;

use crate::crd::{
    Condition, DNSRecordSetStatus, DNSServiceStatus, IPReservationStatus, NetConfigSpec,
};
use crate::reconcilers::resources::{apply_child_meta, needs_write};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// Everything the fake has stored or been asked to do.
#[derive(Default)]
pub struct FakeState {
    pub reservations: BTreeMap<String, IPReservation>,
    pub record_sets: BTreeMap<String, DNSRecordSet>,
    pub net_configs: Vec<NetConfig>,
    pub dns_services: Vec<DNSService>,
    /// Every write issued, as `Kind/name`, in call order.
    pub writes: Vec<String>,
    /// Every call made, as `op Kind/name`, in call order.
    pub calls: Vec<String>,
    /// Names whose upsert fails.
    pub fail_upsert: BTreeSet<String>,
    pub fail_list_net_configs: bool,
    pub fail_list_dns_services: bool,
    pub fail_get_record_set: bool,
    /// Ready status given to record sets as soon as they are written.
    pub record_sets_served: bool,
}

/// Shared in-memory repository implementing every repository trait.
#[derive(Clone, Default)]
pub struct FakeRepository {
    pub state: Arc<Mutex<FakeState>>,
}

fn ready_condition(status: &str) -> Condition {
    Condition {
        r#type: CONDITION_TYPE_READY.to_string(),
        status: status.to_string(),
        reason: Some(REASON_READY.to_string()),
        ..Condition::default()
    }
}

impl FakeRepository {
    pub fn new() -> Self {
        let repo = Self::without_net_config();
        repo.state
            .lock()
            .unwrap()
            .net_configs
            .push(NetConfig::new("netconfig", NetConfigSpec::default()));
        repo
    }

    /// A repository for a namespace where IPAM is not configured.
    pub fn without_net_config() -> Self {
        Self::default()
    }

    /// Add a `DNSService` with the given readiness and addresses.
    pub fn add_dns_service(&self, name: &str, ready: bool, addresses: Option<Vec<&str>>) {
        let mut service = DNSService::new(name, crate::crd::DNSServiceSpec::default());
        let addresses = addresses.map(|a| a.into_iter().map(str::to_string).collect::<Vec<_>>());
        service.status = Some(DNSServiceStatus {
            dns_cluster_addresses: addresses.clone(),
            dns_addresses: addresses,
            conditions: vec![ready_condition(if ready { "True" } else { "False" })],
        });
        self.state.lock().unwrap().dns_services.push(service);
    }

    /// Play the IP address manager: give the reservation `name` its result.
    ///
    /// `reservations` are `(network, address, dns_domain)` triples.
    pub fn serve_reservation(&self, name: &str, ready: &str, reservations: &[(&str, &str, &str)]) {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .reservations
            .get_mut(name)
            .unwrap_or_else(|| panic!("IPReservation {name} was never written"));
        stored.status = Some(IPReservationStatus {
            reservations: reservations
                .iter()
                .map(|(network, address, domain)| Reservation {
                    network: (*network).to_string(),
                    address: (*address).to_string(),
                    dns_domain: (*domain).to_string(),
                    ..Reservation::default()
                })
                .collect(),
            conditions: vec![ready_condition(ready)],
            observed_generation: None,
        });
    }

    /// Play the IP address manager for every stored reservation.
    pub fn serve_all_reservations(&self, ready: &str, domain: &str) {
        let names: Vec<String> = self.state.lock().unwrap().reservations.keys().cloned().collect();
        for (index, name) in names.iter().enumerate() {
            let address = format!("172.20.0.{}", 10 + index);
            self.serve_reservation(name, ready, &[(CTLPLANE_NETWORK, address.as_str(), domain)]);
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn record_set(&self, name: &str) -> Option<DNSRecordSet> {
        self.state.lock().unwrap().record_sets.get(name).cloned()
    }

    pub fn reservation(&self, name: &str) -> Option<IPReservation> {
        self.state.lock().unwrap().reservations.get(name).cloned()
    }
}

fn injected(kind: &'static str, namespace: &str, name: &str) -> NetworkError {
    NetworkError::persist(kind, namespace, name, "injected failure")
}

/// Apply `mutate` to the stored object (or `blank`) and store it if it changed.
fn upsert<K, F>(
    store: &mut BTreeMap<String, K>,
    writes: &mut Vec<String>,
    kind: &str,
    blank: K,
    mutate: F,
) -> UpsertOutcome
where
    K: kube::Resource + Clone + serde::Serialize,
    F: FnOnce(&mut K),
{
    let name = blank.meta().name.clone().unwrap_or_default();
    let existing = store.get(&name).cloned();
    let mut desired = existing.clone().unwrap_or(blank);
    mutate(&mut desired);

    let outcome = match &existing {
        None => UpsertOutcome::Created,
        Some(current) if needs_write(current, &desired).unwrap() => UpsertOutcome::Updated,
        Some(_) => UpsertOutcome::Unchanged,
    };
    if outcome.wrote() {
        writes.push(format!("{kind}/{name}"));
        store.insert(name, desired);
    }
    outcome
}

#[async_trait]
impl ReservationRepository for FakeRepository {
    async fn upsert_reservation(
        &self,
        namespace: &str,
        name: &str,
        spec: &IPReservationSpec,
        child: &ChildMeta,
    ) -> Result<UpsertOutcome, NetworkError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("upsert {KIND_IP_RESERVATION}/{name}"));
        if state.fail_upsert.contains(name) {
            return Err(injected(KIND_IP_RESERVATION, namespace, name));
        }

        let state = &mut *state;
        Ok(upsert(
            &mut state.reservations,
            &mut state.writes,
            KIND_IP_RESERVATION,
            IPReservation::new(name, IPReservationSpec::default()),
            |reservation| {
                apply_child_meta(&mut reservation.metadata, child);
                reservation.spec = spec.clone();
            },
        ))
    }

    async fn get_reservation(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<IPReservation, NetworkError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("get {KIND_IP_RESERVATION}/{name}"));
        state
            .reservations
            .get(name)
            .cloned()
            .ok_or_else(|| NetworkError::get(KIND_IP_RESERVATION, namespace, name, "not found"))
    }
}

#[async_trait]
impl NetConfigRepository for FakeRepository {
    async fn list_net_configs(&self, namespace: &str) -> Result<Vec<NetConfig>, NetworkError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("list {KIND_NET_CONFIG}"));
        if state.fail_list_net_configs {
            return Err(NetworkError::list(KIND_NET_CONFIG, namespace, "injected failure"));
        }
        Ok(state.net_configs.clone())
    }
}

#[async_trait]
impl DnsServiceRepository for FakeRepository {
    async fn list_dns_services(&self, namespace: &str) -> Result<Vec<DNSService>, NetworkError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("list {KIND_DNS_SERVICE}"));
        if state.fail_list_dns_services {
            return Err(NetworkError::list(KIND_DNS_SERVICE, namespace, "injected failure"));
        }
        Ok(state.dns_services.clone())
    }
}

#[async_trait]
impl DnsRecordRepository for FakeRepository {
    async fn upsert_record_set(
        &self,
        namespace: &str,
        name: &str,
        spec: &DNSRecordSetSpec,
        child: &ChildMeta,
    ) -> Result<UpsertOutcome, NetworkError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("upsert {KIND_DNS_RECORD_SET}/{name}"));
        if state.fail_upsert.contains(name) {
            return Err(injected(KIND_DNS_RECORD_SET, namespace, name));
        }

        let state = &mut *state;
        let outcome = upsert(
            &mut state.record_sets,
            &mut state.writes,
            KIND_DNS_RECORD_SET,
            DNSRecordSet::new(name, DNSRecordSetSpec::default()),
            |record_set| {
                apply_child_meta(&mut record_set.metadata, child);
                record_set.spec = spec.clone();
            },
        );

        if state.record_sets_served {
            if let Some(stored) = state.record_sets.get_mut(name) {
                stored.status = Some(DNSRecordSetStatus {
                    conditions: vec![ready_condition("True")],
                });
            }
        }
        Ok(outcome)
    }

    async fn get_record_set(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<DNSRecordSet, NetworkError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("get {KIND_DNS_RECORD_SET}/{name}"));
        if state.fail_get_record_set {
            return Err(NetworkError::get(KIND_DNS_RECORD_SET, namespace, name, "injected failure"));
        }
        state
            .record_sets
            .get(name)
            .cloned()
            .ok_or_else(|| NetworkError::get(KIND_DNS_RECORD_SET, namespace, name, "not found"))
    }
}
