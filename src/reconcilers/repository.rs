// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed store access for the kinds a `NodeSet` pass touches.
//!
//! Each kind gets its own small trait so the reconciliation pass can be driven
//! against the API server ([`KubeRepository`]) or an in-memory store in tests.
//! All methods return [`NetworkError`] carrying the failing call's kind and
//! key; none of them retry.

use crate::constants::{
    KIND_DNS_RECORD_SET, KIND_DNS_SERVICE, KIND_IP_RESERVATION, KIND_NET_CONFIG,
    KUBE_LIST_PAGE_SIZE,
};
use crate::crd::{
    DNSRecordSet, DNSRecordSetSpec, DNSService, IPReservation, IPReservationSpec, NetConfig,
};
use crate::errors::NetworkError;
use crate::metrics;
use crate::reconcilers::resources::{
    apply_child_meta, create_or_patch, ChildMeta, UpsertOutcome,
};
use async_trait::async_trait;
use kube::api::ListParams;
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

/// Store access for `IPReservation` children.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Create or patch the reservation `name` so its spec equals `spec`.
    async fn upsert_reservation(
        &self,
        namespace: &str,
        name: &str,
        spec: &IPReservationSpec,
        child: &ChildMeta,
    ) -> Result<UpsertOutcome, NetworkError>;

    /// Read back the reservation `name`, including its status.
    async fn get_reservation(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<IPReservation, NetworkError>;
}

/// Store access for `NetConfig` resources.
#[async_trait]
pub trait NetConfigRepository: Send + Sync {
    /// List every `NetConfig` in `namespace`.
    async fn list_net_configs(&self, namespace: &str) -> Result<Vec<NetConfig>, NetworkError>;
}

/// Store access for `DNSService` resources.
#[async_trait]
pub trait DnsServiceRepository: Send + Sync {
    /// List every `DNSService` in `namespace`, in the order the store returns them.
    async fn list_dns_services(&self, namespace: &str) -> Result<Vec<DNSService>, NetworkError>;
}

/// Store access for `DNSRecordSet` children.
#[async_trait]
pub trait DnsRecordRepository: Send + Sync {
    /// Create or patch the record set `name` so its spec equals `spec`.
    async fn upsert_record_set(
        &self,
        namespace: &str,
        name: &str,
        spec: &DNSRecordSetSpec,
        child: &ChildMeta,
    ) -> Result<UpsertOutcome, NetworkError>;

    /// Read back the record set `name`, including its status.
    async fn get_record_set(&self, namespace: &str, name: &str)
        -> Result<DNSRecordSet, NetworkError>;
}

/// Repository backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeRepository {
    client: Client,
}

impl KubeRepository {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api<K>(&self, namespace: &str) -> Api<K>
    where
        K: Resource<Scope = kube::core::NamespaceResourceScope, DynamicType = ()>,
    {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ReservationRepository for KubeRepository {
    async fn upsert_reservation(
        &self,
        namespace: &str,
        name: &str,
        spec: &IPReservationSpec,
        child: &ChildMeta,
    ) -> Result<UpsertOutcome, NetworkError> {
        let api: Api<IPReservation> = self.api(namespace);
        let mut blank = IPReservation::new(name, IPReservationSpec::default());
        blank.metadata.namespace = Some(namespace.to_string());

        let outcome = create_or_patch(&api, blank, |reservation| {
            apply_child_meta(&mut reservation.metadata, child);
            reservation.spec = spec.clone();
        })
        .await
        .map_err(|e| NetworkError::persist(KIND_IP_RESERVATION, namespace, name, e))?;

        metrics::record_child_write(KIND_IP_RESERVATION, outcome);
        Ok(outcome)
    }

    async fn get_reservation(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<IPReservation, NetworkError> {
        let api: Api<IPReservation> = self.api(namespace);
        api.get(name)
            .await
            .map_err(|e| NetworkError::get(KIND_IP_RESERVATION, namespace, name, e))
    }
}

#[async_trait]
impl NetConfigRepository for KubeRepository {
    async fn list_net_configs(&self, namespace: &str) -> Result<Vec<NetConfig>, NetworkError> {
        let api: Api<NetConfig> = self.api(namespace);
        list_all(&api, ListParams::default())
            .await
            .map_err(|e| NetworkError::list(KIND_NET_CONFIG, namespace, e))
    }
}

#[async_trait]
impl DnsServiceRepository for KubeRepository {
    async fn list_dns_services(&self, namespace: &str) -> Result<Vec<DNSService>, NetworkError> {
        let api: Api<DNSService> = self.api(namespace);
        list_all(&api, ListParams::default())
            .await
            .map_err(|e| NetworkError::list(KIND_DNS_SERVICE, namespace, e))
    }
}

#[async_trait]
impl DnsRecordRepository for KubeRepository {
    async fn upsert_record_set(
        &self,
        namespace: &str,
        name: &str,
        spec: &DNSRecordSetSpec,
        child: &ChildMeta,
    ) -> Result<UpsertOutcome, NetworkError> {
        let api: Api<DNSRecordSet> = self.api(namespace);
        let mut blank = DNSRecordSet::new(name, DNSRecordSetSpec::default());
        blank.metadata.namespace = Some(namespace.to_string());

        // The whole host list is replaced in one write; readers never see a
        // partially updated record set.
        let outcome = create_or_patch(&api, blank, |record_set| {
            apply_child_meta(&mut record_set.metadata, child);
            record_set.spec = spec.clone();
        })
        .await
        .map_err(|e| NetworkError::persist(KIND_DNS_RECORD_SET, namespace, name, e))?;

        metrics::record_child_write(KIND_DNS_RECORD_SET, outcome);
        Ok(outcome)
    }

    async fn get_record_set(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<DNSRecordSet, NetworkError> {
        let api: Api<DNSRecordSet> = self.api(namespace);
        api.get(name)
            .await
            .map_err(|e| NetworkError::get(KIND_DNS_RECORD_SET, namespace, name, e))
    }
}

/// List every object matching `params`, following continue tokens page by page.
///
/// # Errors
///
/// Returns the client error of the first failing page.
pub async fn list_all<K>(api: &Api<K>, mut params: ListParams) -> kube::Result<Vec<K>>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    params.limit = Some(KUBE_LIST_PAGE_SIZE);

    let mut items = Vec::new();
    let mut pages = 0_u32;

    loop {
        pages += 1;
        let page = api.list(&params).await?;
        items.extend(page.items);

        match page.metadata.continue_ {
            Some(token) if !token.is_empty() => params.continue_token = Some(token),
            _ => break,
        }
    }

    debug!(pages, total_items = items.len(), "Completed paginated list");
    Ok(items)
}
