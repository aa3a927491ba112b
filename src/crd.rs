// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions (CRDs) for node network identity.
//!
//! # Resource Types
//!
//! - [`NodeSet`] - The declarative collection of nodes whose network identity is reconciled
//! - [`IPReservation`] - One per participating node; requests addresses on its networks
//! - [`NetConfig`] - Networks and subnets the IPAM controller allocates from
//! - [`DNSService`] - The (singleton) DNS service advertising resolver addresses
//! - [`DNSRecordSet`] - Host records derived from the reservations of a `NodeSet`
//!
//! Only `NodeSet` is owned by this operator's users. `IPReservation` and
//! `DNSRecordSet` are written by the `NodeSet` controller and consumed by the
//! IPAM and DNS controllers; `NetConfig` and `DNSService` are only ever read.
//!
//! # Example: Declaring a NodeSet
//!
//! ```rust
//! use nodenet::crd::{NetworkAttachment, NodeSetSpec, NodeSpec, NodeTemplate};
//! use std::collections::BTreeMap;
//!
//! let spec = NodeSetSpec {
//!     node_template: NodeTemplate {
//!         networks: vec![NetworkAttachment {
//!             name: "ctlplane".to_string(),
//!             subnet_name: Some("subnet1".to_string()),
//!             fixed_ip: None,
//!         }],
//!     },
//!     nodes: BTreeMap::from([(
//!         "edpm-compute-0".to_string(),
//!         NodeSpec::default(),
//!     )]),
//! };
//! assert_eq!(spec.nodes.len(), 1);
//! ```

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Condition represents an observation of a resource's current state.
///
/// Conditions are used in status subresources to communicate the state of
/// a resource to users and controllers. Conditions are keyed by `type`; at most
/// one condition of each type exists in a list.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition (e.g., Ready, IPReservationReady, DNSDataReady).
    pub r#type: String,

    /// Status of the condition: True, False, or Unknown.
    pub status: String,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Severity of a False condition: Info, Warning, or Error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

// ============================================================================
// NodeSet
// ============================================================================

/// A request to attach a node to a named network.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAttachment {
    /// Name of the network (e.g., "ctlplane", "internalapi").
    pub name: String,

    /// Subnet of the network to allocate from. The IPAM controller picks a
    /// default subnet when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_name: Option<String>,

    /// Fixed address to reserve instead of allocating one.
    #[serde(default, rename = "fixedIP", skip_serializing_if = "Option::is_none")]
    pub fixed_ip: Option<String>,
}

/// Defaults shared by every node in a `NodeSet`.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    /// Networks applied to nodes that do not declare their own.
    #[serde(default)]
    pub networks: Vec<NetworkAttachment>,
}

/// A single node of a `NodeSet`.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    /// Hostname of the node, either short (`edpm-0`) or fully qualified
    /// (`edpm-0.ctlplane.example.com`). Defaults to the node name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,

    /// Networks for this node. When empty the template networks apply.
    #[serde(default)]
    pub networks: Vec<NetworkAttachment>,
}

/// `NodeSet` declares a group of nodes and the networks they attach to.
///
/// For every node with at least one network the controller maintains an
/// `IPReservation` named after the node. Once all reservations and the DNS
/// service are ready, it publishes the node addresses as a `DNSRecordSet`.
///
/// # Example
///
/// ```yaml
/// apiVersion: nodenet.firestoned.io/v1beta1
/// kind: NodeSet
/// metadata:
///   name: edpm-compute
///   namespace: openstack
/// spec:
///   nodeTemplate:
///     networks:
///       - name: ctlplane
///         subnetName: subnet1
///       - name: internalapi
///         subnetName: subnet1
///   nodes:
///     edpm-compute-0:
///       hostName: edpm-compute-0
///     edpm-compute-1:
///       hostName: edpm-compute-1.ctlplane.example.com
///       networks:
///         - name: ctlplane
///           fixedIP: 192.168.122.101
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[kube(
    group = "nodenet.firestoned.io",
    version = "v1beta1",
    kind = "NodeSet",
    namespaced,
    shortname = "nodeset",
    doc = "NodeSet declares a group of nodes and the networks they attach to. The controller reserves addresses for every node and publishes DNS host records once the reservations and the DNS service are ready."
)]
#[kube(status = "NodeSetStatus")]
#[serde(rename_all = "camelCase")]
pub struct NodeSetSpec {
    /// Defaults applied to every node.
    #[serde(default)]
    pub node_template: NodeTemplate,

    /// Nodes keyed by node name. The node name also names the node's
    /// `IPReservation`; nodes are always processed in lexical order of their names.
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeSpec>,
}

/// `NodeSet` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeSetStatus {
    /// Ready, IPReservationReady and DNSDataReady conditions.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Cluster-internal addresses of the DNS service, for node resolver configuration.
    #[serde(default)]
    pub dns_cluster_addresses: Vec<String>,

    /// Search domain derived from the first control-plane reservation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctlplane_search_domain: Option<String>,

    /// Published hostname per node and network.
    #[serde(default)]
    pub all_hostnames: BTreeMap<String, BTreeMap<String, String>>,

    /// Reserved address per node and network.
    #[serde(default, rename = "allIPs")]
    pub all_ips: BTreeMap<String, BTreeMap<String, String>>,
}

// ============================================================================
// IPReservation
// ============================================================================

/// `IPReservation` requests one address per listed network for a single node.
///
/// Addresses are allocated by the IPAM controller, which reports them in
/// `status.reservations` and marks the resource Ready.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[kube(
    group = "nodenet.firestoned.io",
    version = "v1beta1",
    kind = "IPReservation",
    namespaced,
    shortname = "ipres",
    doc = "IPReservation requests an address on each listed network for a single node."
)]
#[kube(status = "IPReservationStatus")]
#[serde(rename_all = "camelCase")]
pub struct IPReservationSpec {
    /// Networks to reserve addresses on.
    #[serde(default)]
    pub networks: Vec<NetworkAttachment>,
}

/// An allocated address plus DNS domain for one network of a node.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Network the address was allocated on.
    pub network: String,

    /// Subnet the address was allocated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,

    /// Allocated address.
    pub address: String,

    /// DNS domain of the subnet (e.g., "ctlplane.example.com").
    #[serde(default)]
    pub dns_domain: String,

    /// Gateway of the subnet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
}

/// `IPReservation` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IPReservationStatus {
    #[serde(default)]
    pub reservations: Vec<Reservation>,

    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

// ============================================================================
// NetConfig
// ============================================================================

/// A range of addresses the IPAM controller may hand out.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub struct AllocationRange {
    pub start: String,
    pub end: String,
}

/// A subnet of a configured network.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    pub name: String,

    /// Subnet in CIDR notation (e.g., "192.168.122.0/24").
    pub cidr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<i32>,

    #[serde(default)]
    pub allocation_ranges: Vec<AllocationRange>,
}

/// A network nodes can attach to.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDefinition {
    /// Network name referenced by `NetworkAttachment.name`.
    pub name: String,

    /// DNS domain of addresses allocated on this network.
    #[serde(default)]
    pub dns_domain: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i32>,

    #[serde(default)]
    pub subnets: Vec<Subnet>,
}

/// `NetConfig` describes the networks of a namespace for the IPAM controller.
///
/// Without a `NetConfig` in the namespace IP reservation is not used and no
/// `IPReservation` is written.
///
/// # Example
///
/// ```yaml
/// apiVersion: nodenet.firestoned.io/v1beta1
/// kind: NetConfig
/// metadata:
///   name: netconfig
///   namespace: openstack
/// spec:
///   networks:
///     - name: ctlplane
///       dnsDomain: ctlplane.example.com
///       subnets:
///         - name: subnet1
///           cidr: 192.168.122.0/24
///           gateway: 192.168.122.1
///           allocationRanges:
///             - start: 192.168.122.100
///               end: 192.168.122.250
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[kube(
    group = "nodenet.firestoned.io",
    version = "v1beta1",
    kind = "NetConfig",
    namespaced,
    shortname = "netcfg",
    doc = "NetConfig describes the networks and subnets the IPAM controller allocates node addresses from."
)]
#[serde(rename_all = "camelCase")]
pub struct NetConfigSpec {
    #[serde(default)]
    pub networks: Vec<NetworkDefinition>,
}

// ============================================================================
// DNSService
// ============================================================================

/// `DNSService` is the resolver serving the namespace. Only its status is read.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[kube(
    group = "nodenet.firestoned.io",
    version = "v1beta1",
    kind = "DNSService",
    namespaced,
    doc = "DNSService is the DNS resolver of a namespace. It serves every DNSRecordSet labelled with its selector value."
)]
#[kube(status = "DNSServiceStatus")]
#[serde(rename_all = "camelCase")]
pub struct DNSServiceSpec {
    /// Number of resolver replicas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

/// `DNSService` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DNSServiceStatus {
    /// Addresses the resolver is reachable on from the nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_addresses: Option<Vec<String>>,

    /// Cluster-internal service addresses of the resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_cluster_addresses: Option<Vec<String>>,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

// ============================================================================
// DNSRecordSet
// ============================================================================

/// A host entry: one address and the names that resolve to it.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DNSHost {
    pub ip: String,
    pub hostnames: Vec<String>,
}

/// `DNSRecordSet` carries the host records of one `NodeSet`.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[kube(
    group = "nodenet.firestoned.io",
    version = "v1beta1",
    kind = "DNSRecordSet",
    namespaced,
    doc = "DNSRecordSet holds host records served by the DNSService whose selector matches dnsDataLabelSelectorValue."
)]
#[kube(status = "DNSRecordSetStatus")]
#[serde(rename_all = "camelCase")]
pub struct DNSRecordSetSpec {
    #[serde(default)]
    pub hosts: Vec<DNSHost>,

    /// Selector value the DNS service uses to pick up this record set.
    #[serde(default)]
    pub dns_data_label_selector_value: String,
}

/// `DNSRecordSet` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DNSRecordSetStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}
