//! Serialization of captured manifests to YAML files.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::SnapResult;

/// Writes a manifest as the complete content of the YAML file at `path`,
/// creating parent directories on demand and truncating any existing file.
///
/// No partial-write recovery is attempted: a failed write leaves at most a
/// truncated or missing file, and the caller treats that as a per-object
/// failure rather than a process abort.
pub fn write_manifest(manifest: &Value, path: &Path) -> SnapResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let yaml = serde_yaml::to_string(manifest)?;
    fs::write(path, yaml)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_writes_full_yaml_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("original/ns-a/deployments/web.yaml");

        let manifest = json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "web"}
        });
        write_manifest(&manifest, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("apiVersion: apps/v1"));
        assert!(content.contains("kind: Deployment"));
        assert!(content.contains("name: web"));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("web.yaml");

        write_manifest(&json!({"kind": "Deployment"}), &path).unwrap();
        write_manifest(&json!({"kind": "Service"}), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("kind: Service"));
        assert!(!content.contains("Deployment"));
    }

    #[test]
    fn test_unwritable_path_reports_io_error() {
        let dir = tempdir().unwrap();
        // A regular file where a directory is needed.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_manifest(&json!({}), &blocker.join("web.yaml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoError);
    }
}
