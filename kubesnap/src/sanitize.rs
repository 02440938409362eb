//! Per-object field sanitization.
//!
//! Strips server-assigned and ephemeral fields from a captured manifest so the
//! result can be re-applied to a cluster as a fresh creation, without
//! server-assigned identifiers colliding with existing objects and without
//! carrying runtime status that has no meaning outside the originating cluster.
//!
//! The policy is expressed as static tables rather than inline conditionals so
//! it stays auditable and independently testable. It applies unconditionally to
//! every object regardless of kind.

use serde_json::Value;

/// `metadata` fields removed from every sanitized manifest.
pub const STRIPPED_METADATA_FIELDS: &[&str] = &[
    "resourceVersion",
    "uid",
    "selfLink",
    "creationTimestamp",
    "generation",
    "managedFields",
];

/// Controller bookkeeping annotations removed when present.
pub const STRIPPED_ANNOTATION_KEYS: &[&str] = &[
    "objectset.rio.cattle.io/applied",
    "objectset.rio.cattle.io/id",
    "objectset.rio.cattle.io/hash",
    "cattle.io.timestamp",
];

/// Controller bookkeeping labels removed when present.
pub const STRIPPED_LABEL_KEYS: &[&str] = &["objectset.rio.cattle.io/hash"];

/// `metadata` maps dropped entirely when key removal leaves them empty.
///
/// Only these two get the empty-map rule; other maps that might become empty
/// are left alone.
const PRUNED_WHEN_EMPTY: &[&str] = &["annotations", "labels"];

/// Sanitizes a captured manifest in place.
///
/// Removes the fixed set of metadata fields, the whole `status` subtree, and
/// the known-volatile annotation and label keys. Fields that are absent are
/// silent no-ops; the function never fails and is idempotent. The caller is
/// responsible for supplying a copy it is willing to lose.
pub fn sanitize(manifest: &mut Value) {
    if let Some(metadata) = manifest.get_mut("metadata").and_then(Value::as_object_mut) {
        for field in STRIPPED_METADATA_FIELDS {
            metadata.remove(*field);
        }

        remove_map_keys(metadata, "annotations", STRIPPED_ANNOTATION_KEYS);
        remove_map_keys(metadata, "labels", STRIPPED_LABEL_KEYS);

        for field in PRUNED_WHEN_EMPTY {
            let is_empty_map = metadata
                .get(*field)
                .and_then(Value::as_object)
                .is_some_and(|map| map.is_empty());
            if is_empty_map {
                metadata.remove(*field);
            }
        }
    }

    if let Some(root) = manifest.as_object_mut() {
        root.remove("status");
    }
}

/// Removes the given keys from a string-keyed map nested under `metadata`.
fn remove_map_keys(
    metadata: &mut serde_json::Map<String, Value>,
    field: &str,
    keys: &[&str],
) {
    if let Some(map) = metadata.get_mut(field).and_then(Value::as_object_mut) {
        for key in keys {
            map.remove(*key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deployment_with_server_fields() -> Value {
        json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {
                "name": "web",
                "namespace": "ns-a",
                "resourceVersion": "12345",
                "uid": "9f6e8a7d-0000-1111-2222-333344445555",
                "selfLink": "/apis/apps/v1/namespaces/ns-a/deployments/web",
                "creationTimestamp": "2025-01-01T00:00:00Z",
                "generation": 4,
                "managedFields": [{"manager": "kubectl"}],
                "annotations": {
                    "objectset.rio.cattle.io/applied": "H4sIAAAA",
                    "objectset.rio.cattle.io/id": "abc",
                    "app.kubernetes.io/managed-by": "helm"
                },
                "labels": {
                    "objectset.rio.cattle.io/hash": "deadbeef",
                    "app": "web"
                }
            },
            "spec": {"replicas": 2},
            "status": {"readyReplicas": 2}
        })
    }

    #[test]
    fn test_strips_server_managed_fields() {
        let mut manifest = deployment_with_server_fields();
        sanitize(&mut manifest);

        let metadata = manifest["metadata"].as_object().unwrap();
        for field in STRIPPED_METADATA_FIELDS {
            assert!(!metadata.contains_key(*field), "{field} should be removed");
        }
        assert!(manifest.get("status").is_none());
    }

    #[test]
    fn test_strips_blocked_annotation_and_label_keys_keeps_others() {
        let mut manifest = deployment_with_server_fields();
        sanitize(&mut manifest);

        let annotations = manifest["metadata"]["annotations"].as_object().unwrap();
        assert_eq!(annotations.len(), 1);
        assert!(annotations.contains_key("app.kubernetes.io/managed-by"));

        let labels = manifest["metadata"]["labels"].as_object().unwrap();
        assert_eq!(labels.len(), 1);
        assert!(labels.contains_key("app"));
    }

    #[test]
    fn test_spec_and_identity_survive() {
        let mut manifest = deployment_with_server_fields();
        sanitize(&mut manifest);

        assert_eq!(manifest["apiVersion"], "apps/v1");
        assert_eq!(manifest["kind"], "Deployment");
        assert_eq!(manifest["metadata"]["name"], "web");
        assert_eq!(manifest["metadata"]["namespace"], "ns-a");
        assert_eq!(manifest["spec"]["replicas"], 2);
    }

    #[test]
    fn test_noop_on_already_clean_manifest() {
        let clean = json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings", "namespace": "ns-a"},
            "data": {"key": "value"}
        });
        let mut manifest = clean.clone();
        sanitize(&mut manifest);
        assert_eq!(manifest, clean);
    }

    #[test]
    fn test_idempotent() {
        let mut once = deployment_with_server_fields();
        sanitize(&mut once);

        let mut twice = once.clone();
        sanitize(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_annotations_with_only_blocked_keys_removed_entirely() {
        let mut manifest = json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {
                "name": "svc",
                "annotations": {
                    "objectset.rio.cattle.io/applied": "x",
                    "objectset.rio.cattle.io/hash": "y"
                },
                "labels": {
                    "objectset.rio.cattle.io/hash": "z"
                }
            }
        });
        sanitize(&mut manifest);

        let metadata = manifest["metadata"].as_object().unwrap();
        assert!(!metadata.contains_key("annotations"));
        assert!(!metadata.contains_key("labels"));
    }

    #[test]
    fn test_other_empty_maps_are_not_pruned() {
        let mut manifest = json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "empty-data"},
            "data": {}
        });
        sanitize(&mut manifest);
        assert!(manifest["data"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_manifest_without_metadata_is_tolerated() {
        let mut manifest = json!({"status": {"phase": "Active"}});
        sanitize(&mut manifest);
        assert!(manifest.get("status").is_none());
    }
}
