use kubesnap_config::load_config;
use kubesnap_config::shared::SnapshotAgentConfig;

/// Loads the [`SnapshotAgentConfig`] and validates it.
pub fn load_agent_config() -> anyhow::Result<SnapshotAgentConfig> {
    let config = load_config::<SnapshotAgentConfig>()?;
    config.validate()?;

    Ok(config)
}
