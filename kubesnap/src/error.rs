use std::error;
use std::fmt;

/// Convenient result type for snapshot operations using [`SnapshotError`] as the error type.
pub type SnapResult<T> = Result<T, SnapshotError>;

/// Main error type for snapshot operations.
///
/// [`SnapshotError`] can represent single errors, errors with additional detail, or
/// multiple aggregated errors, while keeping a unified interface for callers that
/// only care about the [`ErrorKind`].
#[derive(Debug, Clone)]
pub struct SnapshotError {
    repr: ErrorRepr,
}

/// Internal representation of error data.
///
/// Users should not interact with this type directly but use [`SnapshotError`] methods instead.
#[derive(Debug, Clone)]
enum ErrorRepr {
    /// Error with kind and static description
    WithDescription(ErrorKind, &'static str),
    /// Error with kind, static description, and dynamic detail
    WithDescriptionAndDetail(ErrorKind, &'static str, String),
    /// Multiple aggregated errors
    Many(Vec<SnapshotError>),
}

/// Specific categories of errors that can occur while capturing, packaging, or
/// uploading a cluster snapshot.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    // Cluster API errors
    ClusterConnectionFailed,
    ClusterRequestFailed,
    ClusterResourceNotFound,
    PermissionDenied,
    NamespaceEnumerationFailed,

    // IO & Serialization Errors
    IoError,
    SerializationError,
    DeserializationError,

    // Packaging Errors
    ArchiveFailed,

    // Upload Errors
    InvalidDestinationUrl,
    MissingArchive,
    UploadTransportFailed,
    UploadRejected,

    // Configuration Errors
    ConfigError,
    ValidationError,

    // Unknown / Uncategorized
    Unknown,
}

impl SnapshotError {
    /// Creates a [`SnapshotError`] containing multiple aggregated errors.
    ///
    /// Useful when several independent operations fail and all failures should be
    /// reported rather than just the first one.
    pub fn many(errors: Vec<SnapshotError>) -> SnapshotError {
        SnapshotError {
            repr: ErrorRepr::Many(errors),
        }
    }

    /// Returns the [`ErrorKind`] of this error.
    ///
    /// For multiple errors, returns the kind of the first error or [`ErrorKind::Unknown`]
    /// if the error list is empty.
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::WithDescription(kind, _)
            | ErrorRepr::WithDescriptionAndDetail(kind, _, _) => kind,
            ErrorRepr::Many(ref errors) => errors
                .first()
                .map(|err| err.kind())
                .unwrap_or(ErrorKind::Unknown),
        }
    }

    /// Returns all [`ErrorKind`]s present in this error.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        match self.repr {
            ErrorRepr::WithDescription(kind, _)
            | ErrorRepr::WithDescriptionAndDetail(kind, _, _) => vec![kind],
            ErrorRepr::Many(ref errors) => errors
                .iter()
                .flat_map(|err| err.kinds())
                .collect::<Vec<_>>(),
        }
    }

    /// Returns the detailed error information if available.
    ///
    /// For multiple errors, returns the detail of the first error that has one.
    pub fn detail(&self) -> Option<&str> {
        match self.repr {
            ErrorRepr::WithDescriptionAndDetail(_, _, ref detail) => Some(detail.as_str()),
            ErrorRepr::Many(ref errors) => errors.iter().find_map(|e| e.detail()),
            _ => None,
        }
    }
}

impl PartialEq for SnapshotError {
    fn eq(&self, other: &SnapshotError) -> bool {
        match (&self.repr, &other.repr) {
            (ErrorRepr::WithDescription(kind_a, _), ErrorRepr::WithDescription(kind_b, _)) => {
                kind_a == kind_b
            }
            (
                ErrorRepr::WithDescriptionAndDetail(kind_a, _, _),
                ErrorRepr::WithDescriptionAndDetail(kind_b, _, _),
            ) => kind_a == kind_b,
            (ErrorRepr::Many(errors_a), ErrorRepr::Many(errors_b)) => {
                errors_a.len() == errors_b.len()
                    && errors_a.iter().zip(errors_b.iter()).all(|(a, b)| a == b)
            }
            _ => false,
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.repr {
            ErrorRepr::WithDescription(kind, desc) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;

                Ok(())
            }
            ErrorRepr::WithDescriptionAndDetail(kind, desc, ref detail) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;
                f.write_str(" -> ")?;
                detail.fmt(f)?;

                Ok(())
            }
            ErrorRepr::Many(ref errors) => {
                if errors.is_empty() {
                    write!(f, "Multiple errors occurred (empty)")?;
                } else if errors.len() == 1 {
                    errors[0].fmt(f)?;
                } else {
                    write!(f, "Multiple errors occurred ({} total):", errors.len())?;
                    for (i, error) in errors.iter().enumerate() {
                        write!(f, "\n  {}: {}", i + 1, error)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl error::Error for SnapshotError {}

/// Creates a [`SnapshotError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for SnapshotError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> SnapshotError {
        SnapshotError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

/// Creates a [`SnapshotError`] from an error kind, static description, and dynamic detail.
impl From<(ErrorKind, &'static str, String)> for SnapshotError {
    fn from((kind, desc, detail): (ErrorKind, &'static str, String)) -> SnapshotError {
        SnapshotError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, desc, detail),
        }
    }
}

/// Creates a [`SnapshotError`] from a vector of errors for aggregation.
impl<E> From<Vec<E>> for SnapshotError
where
    E: Into<SnapshotError>,
{
    fn from(errors: Vec<E>) -> SnapshotError {
        SnapshotError {
            repr: ErrorRepr::Many(errors.into_iter().map(Into::into).collect()),
        }
    }
}

// Foreign error conversions

/// Converts [`std::io::Error`] to [`SnapshotError`] with [`ErrorKind::IoError`].
impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> SnapshotError {
        SnapshotError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::IoError,
                "I/O error occurred",
                err.to_string(),
            ),
        }
    }
}

/// Converts [`serde_json::Error`] to [`SnapshotError`] with appropriate error kind.
impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> SnapshotError {
        let (kind, description) = match err.classify() {
            serde_json::error::Category::Io => (ErrorKind::IoError, "JSON I/O operation failed"),
            serde_json::error::Category::Syntax
            | serde_json::error::Category::Data
            | serde_json::error::Category::Eof => (
                ErrorKind::DeserializationError,
                "JSON deserialization failed",
            ),
        };

        SnapshotError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, description, err.to_string()),
        }
    }
}

/// Converts [`serde_yaml::Error`] to [`SnapshotError`] with [`ErrorKind::SerializationError`].
impl From<serde_yaml::Error> for SnapshotError {
    fn from(err: serde_yaml::Error) -> SnapshotError {
        SnapshotError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::SerializationError,
                "YAML serialization failed",
                err.to_string(),
            ),
        }
    }
}

/// Converts [`kube::Error`] to [`SnapshotError`] with appropriate error kind.
///
/// API responses are classified by HTTP status code so the walker can tell a
/// missing resource kind apart from an RBAC denial or a transport failure.
impl From<kube::Error> for SnapshotError {
    fn from(err: kube::Error) -> SnapshotError {
        let (kind, description) = match &err {
            kube::Error::Api(response) => match response.code {
                401 | 403 => (
                    ErrorKind::PermissionDenied,
                    "Kubernetes API denied the request",
                ),
                404 => (
                    ErrorKind::ClusterResourceNotFound,
                    "Kubernetes API resource not found",
                ),
                _ => (
                    ErrorKind::ClusterRequestFailed,
                    "Kubernetes API request failed",
                ),
            },
            kube::Error::HyperError(_) | kube::Error::Service(_) => (
                ErrorKind::ClusterConnectionFailed,
                "Kubernetes API connection failed",
            ),
            kube::Error::SerdeError(_) => (
                ErrorKind::DeserializationError,
                "Kubernetes API response deserialization failed",
            ),
            _ => (
                ErrorKind::ClusterRequestFailed,
                "Kubernetes API request failed",
            ),
        };

        SnapshotError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, description, err.to_string()),
        }
    }
}

/// Converts [`zip::result::ZipError`] to [`SnapshotError`] with appropriate error kind.
impl From<zip::result::ZipError> for SnapshotError {
    fn from(err: zip::result::ZipError) -> SnapshotError {
        let (kind, description) = match &err {
            zip::result::ZipError::Io(_) => (ErrorKind::IoError, "Archive I/O failed"),
            _ => (ErrorKind::ArchiveFailed, "Archive creation failed"),
        };

        SnapshotError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, description, err.to_string()),
        }
    }
}

/// Converts [`reqwest::Error`] to [`SnapshotError`] with [`ErrorKind::UploadTransportFailed`].
impl From<reqwest::Error> for SnapshotError {
    fn from(err: reqwest::Error) -> SnapshotError {
        let (kind, description) = if err.is_builder() {
            (
                ErrorKind::InvalidDestinationUrl,
                "Upload request could not be built",
            )
        } else {
            (
                ErrorKind::UploadTransportFailed,
                "Upload transport error occurred",
            )
        };

        SnapshotError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, description, err.to_string()),
        }
    }
}

/// Converts [`url::ParseError`] to [`SnapshotError`] with [`ErrorKind::InvalidDestinationUrl`].
impl From<url::ParseError> for SnapshotError {
    fn from(err: url::ParseError) -> SnapshotError {
        SnapshotError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::InvalidDestinationUrl,
                "Destination URL is not a valid URL",
                err.to_string(),
            ),
        }
    }
}
