//! Transfer of the packaged archive to an object-storage endpoint.
//!
//! The destination is a pre-signed (pre-authenticated) URL: a time-limited,
//! capability-bearing URL that authorizes a PUT without separate credentials.
//! The transfer is a single all-or-nothing attempt with no retry and no
//! streaming; callers needing resilience must wrap this primitive.

use std::fs;
use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use tracing::info;
use url::Url;

use crate::error::{ErrorKind, SnapResult, SnapshotError};
use crate::{bail, snapshot_error};

const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// Resolves the final upload target from a caller-supplied destination URL.
///
/// Object-storage pre-signed URLs may point at a bare "directory" endpoint; the
/// final target must end with the archive's file name, so `/{file_name}` is
/// appended (after trimming one trailing slash) unless already present.
pub fn resolve_destination(destination_url: &str, file_name: &str) -> SnapResult<Url> {
    let suffix = format!("/{file_name}");

    let resolved = if destination_url.ends_with(&suffix) {
        destination_url.to_string()
    } else {
        format!("{}{suffix}", destination_url.trim_end_matches('/'))
    };

    Ok(Url::parse(&resolved)?)
}

/// Uploads the archive at `archive_path` to `destination_url` with a single PUT.
///
/// The whole file is read into memory and sent with
/// `Content-Type: application/zip`. Only HTTP 200 and 201 count as success;
/// any other status is reported as [`ErrorKind::UploadRejected`].
pub async fn upload_archive(archive_path: &Path, destination_url: &str) -> SnapResult<()> {
    let file_name = archive_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            snapshot_error!(
                ErrorKind::MissingArchive,
                "Archive path has no file name",
                archive_path.display()
            )
        })?;

    let destination = resolve_destination(destination_url, file_name)?;

    if !archive_path.exists() {
        bail!(
            ErrorKind::MissingArchive,
            "Archive file does not exist",
            archive_path.display()
        );
    }
    let body = fs::read(archive_path)?;

    info!(destination = %destination, bytes = body.len(), "uploading archive");

    let response = reqwest::Client::new()
        .put(destination)
        .header(CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if !matches!(status.as_u16(), 200 | 201) {
        bail!(
            ErrorKind::UploadRejected,
            "Upload rejected by object storage",
            format!("status {status}")
        );
    }

    Ok(())
}
