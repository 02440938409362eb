//! On-disk layout of the snapshot tree.
//!
//! Every captured object lands in exactly one file per variant:
//! `{root}/{variant}/{namespace}/{plural}/{name}.yaml`, with the namespace
//! object itself at `{root}/{variant}/{namespace}/{namespace}.yaml`. Files are
//! always written whole; nothing is appended or updated in place.

use std::path::{Path, PathBuf};

use crate::catalog::ResourceDescriptor;

/// The two parallel variants a captured object is persisted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// The object exactly as fetched from the API.
    Original,
    /// The sanitized, re-appliable copy.
    Modified,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Original, Variant::Modified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Original => "original",
            Variant::Modified => "modified",
        }
    }
}

/// Derives every path in the snapshot tree from the output root.
#[derive(Debug, Clone)]
pub struct SnapshotLayout {
    root: PathBuf,
}

impl SnapshotLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The snapshot tree root, which is also the archive root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/{variant}`
    pub fn variant_root(&self, variant: Variant) -> PathBuf {
        self.root.join(variant.as_str())
    }

    /// `{root}/{variant}/{namespace}`
    pub fn namespace_dir(&self, variant: Variant, namespace: &str) -> PathBuf {
        self.variant_root(variant).join(namespace)
    }

    /// `{root}/{variant}/{namespace}/{namespace}.yaml` — the namespace object itself.
    pub fn namespace_object_path(&self, variant: Variant, namespace: &str) -> PathBuf {
        self.namespace_dir(variant, namespace)
            .join(format!("{namespace}.yaml"))
    }

    /// `{root}/{variant}/{namespace}/{plural}/{name}.yaml`
    pub fn object_path(
        &self,
        variant: Variant,
        namespace: &str,
        resource: &ResourceDescriptor,
        name: &str,
    ) -> PathBuf {
        self.namespace_dir(variant, namespace)
            .join(resource.plural)
            .join(format!("{name}.yaml"))
    }
}
