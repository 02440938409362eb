//! Static enumeration of the Kubernetes resource kinds captured by a snapshot.
//!
//! The catalog is fixed at startup: the walker iterates it in declaration order
//! for every namespace. The cluster-scoped `namespaces` kind is kept out of the
//! catalog and special-cased, since the namespace object itself is captured once
//! per namespace via a get instead of a list.

use std::fmt;

/// Identifies one Kubernetes API resource type by group, version, and plural name.
///
/// Immutable and defined at startup, mirroring a GroupVersionResource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    pub group: &'static str,
    pub version: &'static str,
    pub plural: &'static str,
}

impl ResourceDescriptor {
    pub const fn new(group: &'static str, version: &'static str, plural: &'static str) -> Self {
        Self {
            group,
            version,
            plural,
        }
    }

    /// Returns the `apiVersion` form of this descriptor (`group/version`, or bare
    /// `version` for the core group).
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_string()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.plural)
    }
}

/// The cluster-scoped Namespace kind, captured per namespace via a get by name.
pub const NAMESPACES: ResourceDescriptor = ResourceDescriptor::new("", "v1", "namespaces");

/// The namespaced resource kinds captured by the snapshot, in walk order.
pub const CATALOG: &[ResourceDescriptor] = &[
    ResourceDescriptor::new("apps", "v1", "deployments"),
    ResourceDescriptor::new("apps", "v1", "daemonsets"),
    ResourceDescriptor::new("apps", "v1", "statefulsets"),
    ResourceDescriptor::new("batch", "v1", "jobs"),
    ResourceDescriptor::new("batch", "v1", "cronjobs"),
    ResourceDescriptor::new("", "v1", "pods"),
    ResourceDescriptor::new("", "v1", "services"),
    ResourceDescriptor::new("", "v1", "configmaps"),
    ResourceDescriptor::new("", "v1", "secrets"),
    ResourceDescriptor::new("", "v1", "persistentvolumeclaims"),
    ResourceDescriptor::new("networking.istio.io", "v1", "virtualservices"),
    ResourceDescriptor::new("networking.istio.io", "v1", "gateways"),
    ResourceDescriptor::new("networking.istio.io", "v1", "destinationrules"),
    ResourceDescriptor::new("networking.istio.io", "v1alpha3", "envoyfilters"),
    ResourceDescriptor::new("networking.k8s.io", "v1", "ingresses"),
    ResourceDescriptor::new("", "v1", "serviceaccounts"),
    ResourceDescriptor::new("rbac.authorization.k8s.io", "v1", "roles"),
    ResourceDescriptor::new("rbac.authorization.k8s.io", "v1", "rolebindings"),
    ResourceDescriptor::new("rbac.authorization.k8s.io", "v1", "clusterroles"),
    ResourceDescriptor::new("rbac.authorization.k8s.io", "v1", "clusterrolebindings"),
    ResourceDescriptor::new("apiextensions.k8s.io", "v1", "customresourcedefinitions"),
    ResourceDescriptor::new("", "v1", "persistentvolumes"),
    ResourceDescriptor::new("apiregistration.k8s.io", "v1", "apiservices"),
    ResourceDescriptor::new("networking.k8s.io", "v1", "ingressclasses"),
    ResourceDescriptor::new("storage.k8s.io", "v1", "storageclasses"),
    ResourceDescriptor::new("networking.k8s.io", "v1", "networkpolicies"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_core_group() {
        let pods = ResourceDescriptor::new("", "v1", "pods");
        assert_eq!(pods.api_version(), "v1");
        assert_eq!(pods.to_string(), "v1/pods");
    }

    #[test]
    fn test_api_version_named_group() {
        let deployments = ResourceDescriptor::new("apps", "v1", "deployments");
        assert_eq!(deployments.api_version(), "apps/v1");
        assert_eq!(deployments.to_string(), "apps/v1/deployments");
    }

    #[test]
    fn test_catalog_excludes_namespaces() {
        assert!(!CATALOG.contains(&NAMESPACES));
    }

    #[test]
    fn test_catalog_has_no_duplicates() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a, b, "duplicate catalog entry: {a}");
            }
        }
    }

    #[test]
    fn test_catalog_walk_order_starts_with_workloads() {
        assert_eq!(CATALOG[0].plural, "deployments");
        assert_eq!(CATALOG[0].group, "apps");
    }
}
