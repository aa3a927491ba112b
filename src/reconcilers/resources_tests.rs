// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `resources.rs`

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::crd::{IPReservation, IPReservationSpec, NetworkAttachment, NodeSet, NodeSetSpec};
    use crate::labels::{child_labels, COMPONENT_IP_RESERVATION};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};

    fn owner_nodeset() -> NodeSet {
        let mut nodeset = NodeSet::new("edpm", NodeSetSpec::default());
        nodeset.metadata.namespace = Some("openstack".to_string());
        nodeset.metadata.uid = Some("uid-1234".to_string());
        nodeset
    }

    fn child_meta() -> ChildMeta {
        ChildMeta {
            labels: child_labels("edpm", COMPONENT_IP_RESERVATION),
            owner: controller_owner_reference(&owner_nodeset()),
        }
    }

    #[test]
    fn test_controller_owner_reference() {
        let owner = controller_owner_reference(&owner_nodeset());

        assert_eq!(owner.api_version, "nodenet.firestoned.io/v1beta1");
        assert_eq!(owner.kind, "NodeSet");
        assert_eq!(owner.name, "edpm");
        assert_eq!(owner.uid, "uid-1234");
        assert_eq!(owner.controller, Some(true));
        assert_eq!(owner.block_owner_deletion, Some(true));
    }

    #[test]
    fn test_apply_child_meta_is_idempotent() {
        let child = child_meta();
        let mut meta = ObjectMeta::default();

        apply_child_meta(&mut meta, &child);
        let first = meta.clone();
        apply_child_meta(&mut meta, &child);

        assert_eq!(meta, first);
        assert_eq!(meta.owner_references.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_apply_child_meta_keeps_foreign_labels_and_owners() {
        let foreign_owner = OwnerReference {
            api_version: "v1".to_string(),
            kind: "ConfigMap".to_string(),
            name: "other".to_string(),
            uid: "uid-other".to_string(),
            controller: None,
            block_owner_deletion: None,
        };
        let mut meta = ObjectMeta {
            labels: Some(BTreeMap::from([("team".to_string(), "infra".to_string())])),
            owner_references: Some(vec![foreign_owner.clone()]),
            ..ObjectMeta::default()
        };

        apply_child_meta(&mut meta, &child_meta());

        let labels = meta.labels.expect("labels should be set");
        assert_eq!(labels["team"], "infra");
        assert_eq!(labels["nodenet.firestoned.io/nodeset"], "edpm");

        let owners = meta.owner_references.expect("owners should be set");
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0], foreign_owner);
        assert_eq!(owners[1].uid, "uid-1234");
    }

    #[test]
    fn test_apply_child_meta_keeps_owner_order() {
        let child = child_meta();
        let foreign_owner = OwnerReference {
            api_version: "v1".to_string(),
            kind: "ConfigMap".to_string(),
            name: "other".to_string(),
            uid: "uid-other".to_string(),
            controller: None,
            block_owner_deletion: None,
        };
        let mut meta = ObjectMeta {
            labels: Some(child.labels.clone()),
            owner_references: Some(vec![child.owner.clone(), foreign_owner.clone()]),
            ..ObjectMeta::default()
        };
        let before = meta.clone();

        apply_child_meta(&mut meta, &child);

        assert_eq!(meta, before);
        let owners = meta.owner_references.expect("owners should be set");
        assert_eq!(owners[0].uid, "uid-1234");
        assert_eq!(owners[1], foreign_owner);
    }

    #[test]
    fn test_apply_child_meta_replaces_previous_controller() {
        let stale_controller = OwnerReference {
            api_version: "nodenet.firestoned.io/v1beta1".to_string(),
            kind: "NodeSet".to_string(),
            name: "edpm".to_string(),
            uid: "uid-recreated".to_string(),
            controller: Some(true),
            block_owner_deletion: Some(true),
        };
        let mut meta = ObjectMeta {
            owner_references: Some(vec![stale_controller]),
            ..ObjectMeta::default()
        };

        apply_child_meta(&mut meta, &child_meta());

        let owners = meta.owner_references.expect("owners should be set");
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].uid, "uid-1234");
    }

    #[test]
    fn test_needs_write_detects_spec_changes() {
        let current = IPReservation::new(
            "edpm-0",
            IPReservationSpec {
                networks: vec![NetworkAttachment {
                    name: "ctlplane".to_string(),
                    ..NetworkAttachment::default()
                }],
            },
        );
        let same = current.clone();
        let mut changed = current.clone();
        changed.spec.networks[0].fixed_ip = Some("192.168.122.100".to_string());

        assert!(!needs_write(&current, &same).unwrap());
        assert!(needs_write(&current, &changed).unwrap());
    }

    #[test]
    fn test_upsert_outcome() {
        assert!(UpsertOutcome::Created.wrote());
        assert!(UpsertOutcome::Updated.wrote());
        assert!(!UpsertOutcome::Unchanged.wrote());
        assert_eq!(UpsertOutcome::Unchanged.as_str(), "unchanged");
    }
}
