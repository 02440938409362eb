use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::SerializableSecretString;
use crate::shared::ValidationError;

/// Destination for the packaged snapshot archive.
///
/// The URL is usually a pre-signed object storage URL and may embed
/// credentials in its query string, so it is handled as a secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Pre-signed URL the archive is uploaded to with an HTTP `PUT`.
    pub url: SerializableSecretString,
}

impl UploadConfig {
    /// Validates the upload configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.expose_secret().trim().is_empty() {
            return Err(ValidationError::EmptyDestinationUrl);
        }

        Ok(())
    }
}
