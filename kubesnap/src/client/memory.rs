//! In-memory cluster client for tests and dry runs.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::catalog::{NAMESPACES, ResourceDescriptor};
use crate::client::base::ClusterClient;
use crate::error::{ErrorKind, SnapResult, SnapshotError};
use crate::snapshot_error;

#[derive(Debug, Default)]
struct Inner {
    /// Namespace manifests keyed by name, in insertion order.
    namespaces: Vec<(String, Value)>,
    /// Namespaced objects keyed by (namespace, descriptor), in insertion order.
    objects: HashMap<(String, ResourceDescriptor), Vec<Value>>,
    /// Kinds whose list calls fail, per namespace.
    failing_lists: HashSet<(String, ResourceDescriptor)>,
    /// Namespace names whose get calls fail.
    failing_namespace_gets: HashSet<String>,
}

/// [`ClusterClient`] over canned manifests, with per-call failure injection.
///
/// Serves objects in insertion order, mirroring a cluster that returns items in
/// a stable but unspecified order.
#[derive(Debug, Clone, Default)]
pub struct MemoryClusterClient {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryClusterClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a namespace manifest; its `metadata.name` becomes the namespace name.
    pub async fn add_namespace(&self, manifest: Value) {
        let name = manifest
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .expect("namespace manifest must have metadata.name")
            .to_string();

        let mut inner = self.inner.lock().await;
        inner.namespaces.push((name, manifest));
    }

    /// Registers a namespaced object under the given kind.
    pub async fn add_object(
        &self,
        namespace: &str,
        resource: ResourceDescriptor,
        manifest: Value,
    ) {
        let mut inner = self.inner.lock().await;
        inner
            .objects
            .entry((namespace.to_string(), resource))
            .or_default()
            .push(manifest);
    }

    /// Makes list calls for the given kind in the given namespace fail.
    pub async fn fail_list(&self, namespace: &str, resource: ResourceDescriptor) {
        let mut inner = self.inner.lock().await;
        inner
            .failing_lists
            .insert((namespace.to_string(), resource));
    }

    /// Makes the namespace-object get for the given name fail.
    pub async fn fail_namespace_get(&self, name: &str) {
        let mut inner = self.inner.lock().await;
        inner.failing_namespace_gets.insert(name.to_string());
    }
}

impl ClusterClient for MemoryClusterClient {
    async fn list_namespace_names(&self) -> SnapResult<Vec<String>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .namespaces
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn get_cluster_scoped(
        &self,
        resource: &ResourceDescriptor,
        name: &str,
    ) -> SnapResult<Value> {
        let inner = self.inner.lock().await;

        if *resource == NAMESPACES {
            if inner.failing_namespace_gets.contains(name) {
                return Err(snapshot_error!(
                    ErrorKind::ClusterRequestFailed,
                    "Injected namespace get failure",
                    name
                ));
            }
            if let Some((_, manifest)) = inner.namespaces.iter().find(|(n, _)| n == name) {
                return Ok(manifest.clone());
            }
        }

        Err(snapshot_error!(
            ErrorKind::ClusterResourceNotFound,
            "Object not found",
            format!("{resource} {name}")
        ))
    }

    async fn list_namespaced(
        &self,
        resource: &ResourceDescriptor,
        namespace: &str,
    ) -> SnapResult<Vec<Value>> {
        let inner = self.inner.lock().await;

        let key = (namespace.to_string(), *resource);
        if inner.failing_lists.contains(&key) {
            return Err(snapshot_error!(
                ErrorKind::ClusterRequestFailed,
                "Injected list failure",
                format!("{resource} in {namespace}")
            ));
        }

        Ok(inner.objects.get(&key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::manifests;

    #[tokio::test]
    async fn test_lists_namespaces_in_insertion_order() {
        let client = MemoryClusterClient::new();
        client.add_namespace(manifests::namespace("ns-b")).await;
        client.add_namespace(manifests::namespace("ns-a")).await;

        let names = client.list_namespace_names().await.unwrap();
        assert_eq!(names, vec!["ns-b", "ns-a"]);
    }

    #[tokio::test]
    async fn test_empty_kind_lists_as_empty_not_error() {
        let client = MemoryClusterClient::new();
        client.add_namespace(manifests::namespace("ns-a")).await;

        let deployments = ResourceDescriptor::new("apps", "v1", "deployments");
        let items = client.list_namespaced(&deployments, "ns-a").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_injected_list_failure() {
        let client = MemoryClusterClient::new();
        let deployments = ResourceDescriptor::new("apps", "v1", "deployments");
        client.fail_list("ns-a", deployments).await;

        let err = client
            .list_namespaced(&deployments, "ns-a")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClusterRequestFailed);
    }

    #[tokio::test]
    async fn test_namespace_get_round_trip() {
        let client = MemoryClusterClient::new();
        client.add_namespace(manifests::namespace("ns-a")).await;

        let manifest = client.get_cluster_scoped(&NAMESPACES, "ns-a").await.unwrap();
        assert_eq!(manifest["metadata"]["name"], "ns-a");

        let err = client
            .get_cluster_scoped(&NAMESPACES, "missing")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClusterResourceNotFound);
    }
}
