use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The namespace selector resolves to no namespaces.
    #[error("`namespaces` must be `*` or a non-empty comma-separated list of namespace names")]
    EmptyNamespaceSelector,
    /// The snapshot output directory is empty.
    #[error("`output_dir` cannot be empty")]
    EmptyOutputDir,
    /// Upload is configured but the destination URL is empty.
    #[error("Invalid upload config: `url` cannot be empty")]
    EmptyDestinationUrl,
}
