//! Cluster client backed by the Kubernetes dynamic API.

use kube::Client;
use kube::api::{Api, ApiResource, DynamicObject, ListParams};
use serde_json::Value;

use crate::catalog::{NAMESPACES, ResourceDescriptor};
use crate::client::base::ClusterClient;
use crate::error::SnapResult;

/// [`ClusterClient`] implementation over a [`kube::Client`].
///
/// Uses the dynamic API (`Api<DynamicObject>`) so the catalog can enumerate
/// arbitrary resource kinds, including CRDs, without compiled-in types.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    /// Wraps an already-authenticated client handle.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connects using the default credential chain: in-cluster service account
    /// config first, local kubeconfig as fallback.
    pub async fn connect() -> SnapResult<Self> {
        let client = Client::try_default().await?;
        Ok(Self::new(client))
    }

    fn cluster_api(&self, resource: &ResourceDescriptor) -> Api<DynamicObject> {
        Api::all_with(self.client.clone(), &api_resource(resource))
    }

    fn namespaced_api(&self, resource: &ResourceDescriptor, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &api_resource(resource))
    }
}

/// Bridges a catalog descriptor to a kube [`ApiResource`].
///
/// The kind is left empty: list and get request paths are built from group,
/// version, and plural only, and this client never submits objects.
fn api_resource(resource: &ResourceDescriptor) -> ApiResource {
    ApiResource {
        group: resource.group.to_string(),
        version: resource.version.to_string(),
        api_version: resource.api_version(),
        kind: String::new(),
        plural: resource.plural.to_string(),
    }
}

impl ClusterClient for KubeClusterClient {
    async fn list_namespace_names(&self) -> SnapResult<Vec<String>> {
        use kube::ResourceExt;

        let namespaces = self.cluster_api(&NAMESPACES).list(&ListParams::default()).await?;

        Ok(namespaces.items.iter().map(|ns| ns.name_any()).collect())
    }

    async fn get_cluster_scoped(
        &self,
        resource: &ResourceDescriptor,
        name: &str,
    ) -> SnapResult<Value> {
        let object = self.cluster_api(resource).get(name).await?;

        Ok(serde_json::to_value(&object)?)
    }

    async fn list_namespaced(
        &self,
        resource: &ResourceDescriptor,
        namespace: &str,
    ) -> SnapResult<Vec<Value>> {
        let list = self
            .namespaced_api(resource, namespace)
            .list(&ListParams::default())
            .await?;

        list.items
            .iter()
            .map(|item| Ok(serde_json::to_value(item)?))
            .collect()
    }
}
