// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Readiness and addresses of the namespace's DNS service.

#[allow(clippy::wildcard_imports)]
use super::types::*;

use super::readiness::Readiness;

/// Addresses advertised by a ready DNS service.
///
/// `None` means the service did not publish the list at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DnsAddresses {
    pub server_addresses: Option<Vec<String>>,
    pub cluster_addresses: Option<Vec<String>>,
}

impl DnsAddresses {
    /// Whether the service advertises at least one server address.
    #[must_use]
    pub fn has_server_addresses(&self) -> bool {
        self.server_addresses.as_ref().is_some_and(|a| !a.is_empty())
    }
}

/// Inspect the DNS services of a namespace.
///
/// No service means DNS is not used here. With several services only the first
/// one is consulted.
#[must_use]
pub fn inspect_dns_services(services: &[DNSService]) -> Readiness<DnsAddresses> {
    let Some(service) = services.first() else {
        return Readiness::NotApplicable;
    };

    let status = service.status.clone().unwrap_or_default();
    if !is_ready(&status.conditions) {
        debug!(service = %service.name_any(), "DNSService exists but is not ready");
        return Readiness::Waiting;
    }

    Readiness::Ready(DnsAddresses {
        server_addresses: status.dns_addresses,
        cluster_addresses: status.dns_cluster_addresses,
    })
}

/// List the DNS services of `namespace` and report their readiness.
///
/// # Errors
///
/// Returns [`NetworkError::List`] if the services cannot be listed.
pub async fn check_dns_service<R>(
    repo: &R,
    namespace: &str,
) -> Result<Readiness<DnsAddresses>, NetworkError>
where
    R: DnsServiceRepository + ?Sized,
{
    let services = repo.list_dns_services(namespace).await?;
    if services.len() > 1 {
        debug!(
            namespace,
            count = services.len(),
            "Several DNSServices found, using {}",
            services[0].name_any()
        );
    }
    Ok(inspect_dns_services(&services))
}

#[cfg(test)]
#[path = "dns_service_tests.rs"]
mod dns_service_tests;
