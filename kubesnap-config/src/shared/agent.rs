use serde::{Deserialize, Serialize};

use crate::load::Config;
use crate::shared::{NamespaceSelector, SentryConfig, UploadConfig, ValidationError};

/// Default directory the snapshot tree is written under.
const DEFAULT_OUTPUT_DIR: &str = "resources";

/// Complete configuration for the snapshot agent.
///
/// Aggregates everything required to run a snapshot: the namespaces to cover,
/// where the tree is written, and optional upload and Sentry integrations.
/// Typically loaded from configuration files and `APP_*` environment variables
/// at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SnapshotAgentConfig {
    /// Namespaces to snapshot: `*` for all, or a comma-separated list.
    pub namespaces: String,
    /// Directory the snapshot tree and archive are written under.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Optional upload destination for the packaged archive.
    ///
    /// If `None`, the archive is left on disk and nothing is uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadConfig>,
    /// Optional Sentry configuration for error tracking.
    ///
    /// If provided, enables Sentry error reporting. If `None`, the agent
    /// operates without Sentry integration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentry: Option<SentryConfig>,
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

impl SnapshotAgentConfig {
    /// Validates the complete agent configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.namespace_selector().is_none() {
            return Err(ValidationError::EmptyNamespaceSelector);
        }

        if self.output_dir.trim().is_empty() {
            return Err(ValidationError::EmptyOutputDir);
        }

        if let Some(upload) = &self.upload {
            upload.validate()?;
        }

        Ok(())
    }

    /// Parses the configured namespaces into a [`NamespaceSelector`].
    pub fn namespace_selector(&self) -> Option<NamespaceSelector> {
        NamespaceSelector::parse(&self.namespaces)
    }
}

impl Config for SnapshotAgentConfig {
    const LIST_PARSE_KEYS: &'static [&'static str] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(namespaces: &str) -> SnapshotAgentConfig {
        SnapshotAgentConfig {
            namespaces: namespaces.to_string(),
            output_dir: default_output_dir(),
            upload: None,
            sentry: None,
        }
    }

    #[test]
    fn wildcard_config_is_valid() {
        let config = config("*");
        assert!(config.validate().is_ok());
        assert_eq!(config.namespace_selector(), Some(NamespaceSelector::All));
    }

    #[test]
    fn empty_namespaces_are_rejected() {
        let config = config("  ");
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyNamespaceSelector)
        ));
    }

    #[test]
    fn empty_output_dir_is_rejected() {
        let mut config = config("default");
        config.output_dir = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyOutputDir)
        ));
    }

    #[test]
    fn empty_upload_url_is_rejected() {
        let mut config = config("default");
        config.upload = Some(UploadConfig {
            url: String::new().into(),
        });
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyDestinationUrl)
        ));
    }

    #[test]
    fn output_dir_defaults_when_omitted() {
        let config: SnapshotAgentConfig =
            serde_json::from_str(r#"{ "namespaces": "*" }"#).unwrap();
        assert_eq!(config.output_dir, "resources");
    }
}
