use crate::config::load_agent_config;
use crate::core::start_snapshot_agent;
use kubesnap_config::Environment;
use kubesnap_config::shared::SnapshotAgentConfig;
use kubesnap_telemetry::init_tracing;
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod core;

fn main() -> anyhow::Result<()> {
    // Load agent config
    let agent_config = load_agent_config()?;

    // Initialize tracing
    let _log_flusher = init_tracing(env!("CARGO_BIN_NAME"))?;

    // Initialize Sentry before the async runtime starts
    let _sentry_guard = init_sentry(&agent_config)?;

    // We start the runtime.
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(agent_config))?;

    Ok(())
}

async fn async_main(agent_config: SnapshotAgentConfig) -> anyhow::Result<()> {
    // We start the snapshot agent and catch any errors.
    if let Err(err) = start_snapshot_agent(agent_config).await {
        sentry::capture_error(&*err);
        error!("an error occurred in the snapshot agent: {err}");

        return Err(err);
    }

    Ok(())
}

/// Initializes Sentry with agent-specific configuration.
///
/// Initializes Sentry if a DSN is provided. Tags all errors with the
/// "snapshot-agent" service identifier and configures panic handling to
/// automatically capture panics and send them to Sentry.
fn init_sentry(
    agent_config: &SnapshotAgentConfig,
) -> anyhow::Result<Option<sentry::ClientInitGuard>> {
    if let Some(sentry_config) = &agent_config.sentry {
        info!("initializing sentry with supplied dsn");

        let environment = Environment::load()?;
        let guard = sentry::init(sentry::ClientOptions {
            dsn: Some(sentry_config.dsn.parse()?),
            environment: Some(environment.to_string().into()),
            integrations: vec![Arc::new(
                sentry::integrations::panic::PanicIntegration::new(),
            )],
            ..Default::default()
        });

        // Set service tag to differentiate the agent from other services
        sentry::configure_scope(|scope| {
            scope.set_tag("service", "snapshot-agent");
        });

        return Ok(Some(guard));
    }

    info!("sentry not configured for snapshot agent, skipping initialization");

    Ok(None)
}
