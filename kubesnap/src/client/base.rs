use std::future::Future;

use serde_json::Value;

use crate::catalog::ResourceDescriptor;
use crate::error::SnapResult;

/// Read-only access to a cluster's API surface, as consumed by the snapshot walker.
///
/// Implementations return manifests as semi-structured values, exactly as the
/// API served them. The walker never mutates cluster state through this trait.
pub trait ClusterClient {
    /// Lists the names of all namespaces in the cluster.
    fn list_namespace_names(&self) -> impl Future<Output = SnapResult<Vec<String>>> + Send;

    /// Fetches a single cluster-scoped object of the given kind by name.
    fn get_cluster_scoped(
        &self,
        resource: &ResourceDescriptor,
        name: &str,
    ) -> impl Future<Output = SnapResult<Value>> + Send;

    /// Lists all objects of the given kind scoped to a namespace.
    ///
    /// An installed kind with no objects yields an empty vector, not an error.
    fn list_namespaced(
        &self,
        resource: &ResourceDescriptor,
        namespace: &str,
    ) -> impl Future<Output = SnapResult<Vec<Value>>> + Send;
}
