//! Builders for realistic captured manifests, server-assigned fields included.

use serde_json::{Value, json};

/// A Namespace manifest as the API would serve it, including fields the
/// sanitizer is expected to strip.
pub fn namespace(name: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": format!("uid-{name}"),
            "resourceVersion": "100",
            "creationTimestamp": "2025-01-01T00:00:00Z",
            "labels": {
                "kubernetes.io/metadata.name": name
            }
        },
        "spec": {"finalizers": ["kubernetes"]},
        "status": {"phase": "Active"}
    })
}

/// A Deployment manifest as the API would serve it.
pub fn deployment(namespace: &str, name: &str) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("uid-{namespace}-{name}"),
            "resourceVersion": "200",
            "generation": 1,
            "creationTimestamp": "2025-01-01T00:00:00Z",
            "annotations": {
                "deployment.kubernetes.io/revision": "1",
                "objectset.rio.cattle.io/applied": "H4sIAAAA",
                "objectset.rio.cattle.io/id": "fleet"
            },
            "labels": {
                "app": name,
                "objectset.rio.cattle.io/hash": "deadbeef"
            },
            "managedFields": [{"manager": "kube-controller-manager"}]
        },
        "spec": {
            "replicas": 1,
            "selector": {"matchLabels": {"app": name}},
            "template": {
                "metadata": {"labels": {"app": name}},
                "spec": {
                    "containers": [{"name": name, "image": format!("{name}:latest")}]
                }
            }
        },
        "status": {"readyReplicas": 1, "replicas": 1}
    })
}

/// A ConfigMap manifest as the API would serve it.
pub fn configmap(namespace: &str, name: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("uid-{namespace}-{name}"),
            "resourceVersion": "300",
            "creationTimestamp": "2025-01-01T00:00:00Z"
        },
        "data": {"key": "value"}
    })
}
