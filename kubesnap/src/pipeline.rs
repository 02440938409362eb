//! Core snapshot traversal.
//!
//! [`SnapshotPipeline`] drives the ordered walk over namespaces × resource
//! kinds: for every namespace it captures the namespace object itself plus
//! every object of every catalog kind, writing each one twice (as observed and
//! sanitized). Failures are isolated at the smallest possible scope so the walk
//! always runs to completion; only the creation of the two variant roots can
//! fail the run as a whole.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::catalog::{CATALOG, NAMESPACES, ResourceDescriptor};
use crate::client::ClusterClient;
use crate::error::SnapResult;
use crate::layout::{SnapshotLayout, Variant};
use crate::sanitize::sanitize;
use crate::writer::write_manifest;

/// Orchestrates the namespace × resource-kind traversal over a cluster client.
pub struct SnapshotPipeline<C> {
    client: C,
    catalog: &'static [ResourceDescriptor],
    layout: SnapshotLayout,
}

impl<C> SnapshotPipeline<C>
where
    C: ClusterClient,
{
    /// Creates a pipeline over the default capture catalog.
    pub fn new(client: C, layout: SnapshotLayout) -> Self {
        Self::with_catalog(client, layout, CATALOG)
    }

    /// Creates a pipeline over a custom catalog.
    pub fn with_catalog(
        client: C,
        layout: SnapshotLayout,
        catalog: &'static [ResourceDescriptor],
    ) -> Self {
        Self {
            client,
            catalog,
            layout,
        }
    }

    pub fn layout(&self) -> &SnapshotLayout {
        &self.layout
    }

    /// Walks every namespace in input order and captures both snapshot variants.
    ///
    /// Namespaces are processed independently: per-namespace, per-kind, and
    /// per-object failures are logged and skipped without affecting siblings.
    /// Duplicate namespace entries are processed again rather than deduplicated;
    /// the rewritten files carry identical content.
    ///
    /// Fails only if a variant root cannot be created.
    pub async fn run(&self, namespaces: &[String]) -> SnapResult<()> {
        for variant in Variant::ALL {
            fs::create_dir_all(self.layout.variant_root(variant))?;
        }

        for namespace in namespaces {
            let namespace = namespace.trim();
            info!(namespace, "processing namespace");
            self.process_namespace(namespace).await;
        }

        Ok(())
    }

    /// Captures one namespace: its directories, the namespace object, and every
    /// catalog kind, tolerating failure at each step.
    async fn process_namespace(&self, namespace: &str) {
        // A variant whose namespace directory cannot be created is dropped for
        // this namespace; the other variant still proceeds.
        let mut active = Vec::new();
        for variant in Variant::ALL {
            let dir = self.layout.namespace_dir(variant, namespace);
            match fs::create_dir_all(&dir) {
                Ok(()) => active.push(variant),
                Err(err) => error!(
                    namespace,
                    variant = variant.as_str(),
                    error = %err,
                    "failed to create namespace directory"
                ),
            }
        }
        if active.is_empty() {
            return;
        }

        if let Err(err) = self.capture_namespace_object(namespace, &active).await {
            error!(namespace, error = %err, "failed to capture namespace object");
        }

        for resource in self.catalog {
            if let Err(err) = self
                .process_resource_kind(namespace, resource, &active)
                .await
            {
                error!(
                    namespace,
                    resource = %resource,
                    error = %err,
                    "failed to list resource kind"
                );
            }
        }
    }

    /// Fetches the cluster-scoped Namespace object by name and writes both variants.
    async fn capture_namespace_object(
        &self,
        namespace: &str,
        active: &[Variant],
    ) -> SnapResult<()> {
        let manifest = self.client.get_cluster_scoped(&NAMESPACES, namespace).await?;

        self.write_variants(
            &manifest,
            |variant| self.layout.namespace_object_path(variant, namespace),
            active,
        );

        Ok(())
    }

    /// Lists one kind in one namespace and writes both variants of every object.
    ///
    /// An empty result writes nothing, so no per-kind directory appears for
    /// kinds without objects.
    async fn process_resource_kind(
        &self,
        namespace: &str,
        resource: &ResourceDescriptor,
        active: &[Variant],
    ) -> SnapResult<()> {
        let items = self.client.list_namespaced(resource, namespace).await?;

        if items.is_empty() {
            info!(namespace, resource = %resource, "no objects found for resource kind");
            return Ok(());
        }

        for item in &items {
            let Some(name) = item.pointer("/metadata/name").and_then(Value::as_str) else {
                warn!(
                    namespace,
                    resource = %resource,
                    "skipping object without metadata.name"
                );
                continue;
            };

            info!(namespace, resource = %resource, name, "saving object");
            self.write_variants(
                item,
                |variant| self.layout.object_path(variant, namespace, resource, name),
                active,
            );
        }

        Ok(())
    }

    /// Writes the original manifest and a sanitized deep copy to their variant
    /// paths. Each variant's write failure is logged independently; one
    /// variant's failure does not block the other's attempt.
    fn write_variants<P>(&self, original: &Value, path_for: P, active: &[Variant])
    where
        P: Fn(Variant) -> std::path::PathBuf,
    {
        if active.contains(&Variant::Original) {
            self.persist(original, Variant::Original, &path_for(Variant::Original));
        }

        if active.contains(&Variant::Modified) {
            let mut modified = original.clone();
            sanitize(&mut modified);
            self.persist(&modified, Variant::Modified, &path_for(Variant::Modified));
        }
    }

    fn persist(&self, manifest: &Value, variant: Variant, path: &Path) {
        if let Err(err) = write_manifest(manifest, path) {
            error!(
                variant = variant.as_str(),
                path = %path.display(),
                error = %err,
                "failed to write manifest"
            );
        }
    }
}
