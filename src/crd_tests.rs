// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `crd.rs`

#[cfg(test)]
mod tests {
    use crate::constants::{API_GROUP, API_GROUP_VERSION, API_VERSION};
    use crate::crd::*;
    use kube::{CustomResourceExt, Resource};
    use serde_json::json;

    #[test]
    fn test_crd_names() {
        let crd = NodeSet::crd();
        assert_eq!(crd.spec.group, API_GROUP);
        assert_eq!(crd.spec.versions[0].name, API_VERSION);
        assert_eq!(NodeSet::api_version(&()), API_GROUP_VERSION);
        assert_eq!(crd.spec.names.kind, "NodeSet");
        assert_eq!(crd.spec.scope, "Namespaced");

        assert_eq!(IPReservation::crd().spec.names.kind, "IPReservation");
        assert_eq!(NetConfig::crd().spec.names.kind, "NetConfig");
        assert_eq!(DNSService::crd().spec.names.kind, "DNSService");
        assert_eq!(DNSRecordSet::crd().spec.names.kind, "DNSRecordSet");
    }

    #[test]
    fn test_nodeset_spec_deserializes_camel_case() {
        let spec: NodeSetSpec = serde_json::from_value(json!({
            "nodeTemplate": {
                "networks": [{"name": "ctlplane", "subnetName": "subnet1"}]
            },
            "nodes": {
                "edpm-1": {
                    "hostName": "edpm-1.example.com",
                    "networks": [{"name": "ctlplane", "fixedIP": "192.168.122.101"}]
                },
                "edpm-0": {}
            }
        }))
        .unwrap();

        assert_eq!(spec.node_template.networks[0].subnet_name.as_deref(), Some("subnet1"));
        let names: Vec<_> = spec.nodes.keys().cloned().collect();
        assert_eq!(names, vec!["edpm-0", "edpm-1"]);
        assert_eq!(
            spec.nodes["edpm-1"].networks[0].fixed_ip.as_deref(),
            Some("192.168.122.101")
        );
        assert!(spec.nodes["edpm-0"].networks.is_empty());
    }

    #[test]
    fn test_nodeset_status_serializes_identity_maps() {
        let mut status = NodeSetStatus::default();
        status
            .all_ips
            .entry("edpm-0".to_string())
            .or_default()
            .insert("ctlplane".to_string(), "172.20.0.10".to_string());
        status.ctlplane_search_domain = Some("ctlplane.example.com".to_string());

        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["allIPs"]["edpm-0"]["ctlplane"], "172.20.0.10");
        assert_eq!(value["ctlplaneSearchDomain"], "ctlplane.example.com");
    }

    #[test]
    fn test_record_set_spec_field_names() {
        let spec = DNSRecordSetSpec {
            hosts: vec![DNSHost {
                ip: "172.20.0.10".to_string(),
                hostnames: vec!["edpm-0.example.com".to_string()],
            }],
            dns_data_label_selector_value: "dnsdata".to_string(),
        };

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["dnsDataLabelSelectorValue"], "dnsdata");
        assert_eq!(value["hosts"][0]["hostnames"][0], "edpm-0.example.com");
    }

    #[test]
    fn test_reservation_status_deserializes() {
        let status: IPReservationStatus = serde_json::from_value(json!({
            "reservations": [
                {"network": "ctlplane", "address": "172.20.0.10", "dnsDomain": "ctlplane.example.com"}
            ],
            "conditions": [{"type": "Ready", "status": "True"}]
        }))
        .unwrap();

        assert_eq!(status.reservations[0].dns_domain, "ctlplane.example.com");
        assert_eq!(status.conditions[0].status, "True");
    }

    #[test]
    fn test_net_config_spec_deserializes() {
        let spec: NetConfigSpec = serde_json::from_value(json!({
            "networks": [{
                "name": "ctlplane",
                "dnsDomain": "ctlplane.example.com",
                "subnets": [{
                    "name": "subnet1",
                    "cidr": "192.168.122.0/24",
                    "allocationRanges": [{"start": "192.168.122.100", "end": "192.168.122.250"}]
                }]
            }]
        }))
        .unwrap();

        let network = &spec.networks[0];
        assert_eq!(network.dns_domain, "ctlplane.example.com");
        assert_eq!(network.subnets[0].cidr, "192.168.122.0/24");
        assert_eq!(network.subnets[0].allocation_ranges[0].end, "192.168.122.250");
        assert!(network.subnets[0].gateway.is_none());
    }
}
