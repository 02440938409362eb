use std::path::{Path, PathBuf};

use kubesnap::archive::{todays_archive_file_name, zip_directory};
use kubesnap::client::ClusterClient;
use kubesnap::client::kube::KubeClusterClient;
use kubesnap::error::{ErrorKind, SnapResult, SnapshotError};
use kubesnap::layout::SnapshotLayout;
use kubesnap::pipeline::SnapshotPipeline;
use kubesnap::snapshot_error;
use kubesnap::upload::upload_archive;
use kubesnap_config::shared::{NamespaceSelector, SnapshotAgentConfig, ValidationError};
use secrecy::ExposeSecret;
use tracing::{debug, error, info};

/// Starts the snapshot agent with the provided configuration.
///
/// Connects to the cluster, resolves the namespaces to cover, walks them into
/// a snapshot tree on disk, then packages the tree into a zip archive and
/// uploads it if a destination is configured. Archive and upload failures are
/// logged but do not fail the run, since the tree on disk is still usable.
pub async fn start_snapshot_agent(agent_config: SnapshotAgentConfig) -> anyhow::Result<()> {
    info!("starting snapshot agent");

    log_config(&agent_config);

    let selector = agent_config
        .namespace_selector()
        .ok_or(ValidationError::EmptyNamespaceSelector)?;

    let client = KubeClusterClient::connect().await?;

    let namespaces = resolve_namespaces(&client, selector).await?;
    info!(count = namespaces.len(), "resolved namespaces to snapshot");

    let output_root = PathBuf::from(&agent_config.output_dir);
    let pipeline = SnapshotPipeline::new(client, SnapshotLayout::new(&output_root));
    pipeline.run(&namespaces).await?;

    package_and_upload(&agent_config, &output_root).await;

    info!("snapshot agent completed");

    Ok(())
}

fn log_config(config: &SnapshotAgentConfig) {
    debug!(
        namespaces = config.namespaces,
        output_dir = config.output_dir,
        upload_configured = config.upload.is_some(),
        "snapshot agent config"
    );
}

/// Expands the namespace selector into the concrete list of namespaces.
///
/// The wildcard selector is resolved through the cluster API. A failure to
/// enumerate namespaces is fatal, since there is nothing to snapshot without
/// the list.
async fn resolve_namespaces(
    client: &KubeClusterClient,
    selector: NamespaceSelector,
) -> SnapResult<Vec<String>> {
    match selector {
        NamespaceSelector::All => client.list_namespace_names().await.map_err(|err| {
            snapshot_error!(
                ErrorKind::NamespaceEnumerationFailed,
                "Failed to enumerate cluster namespaces",
                err
            )
        }),
        NamespaceSelector::Explicit(namespaces) => Ok(namespaces),
    }
}

/// Packages the snapshot tree into a zip archive and uploads it.
///
/// The archive is written next to the snapshot tree, named after today's date.
async fn package_and_upload(config: &SnapshotAgentConfig, output_root: &Path) {
    let file_name = todays_archive_file_name();
    let archive_path = output_root
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(&file_name);

    if let Err(err) = zip_directory(output_root, &archive_path) {
        error!("failed to package the snapshot archive: {err}");
        return;
    }

    info!(archive = %archive_path.display(), "snapshot archive written");

    let Some(upload) = &config.upload else {
        debug!("no upload destination configured, leaving the archive on disk");
        return;
    };

    if let Err(err) = upload_archive(&archive_path, upload.url.expose_secret()).await {
        error!("failed to upload the snapshot archive: {err}");
    }
}
