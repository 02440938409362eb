//! Macros for snapshot error handling.
//!
//! Provides convenience macros for creating and returning [`crate::error::SnapshotError`]
//! instances with reduced boilerplate.

/// Creates a [`crate::error::SnapshotError`] from error kind and description.
///
/// Accepts either a static description or a static description plus dynamic detail.
#[macro_export]
macro_rules! snapshot_error {
    ($kind:expr, $desc:expr) => {
        SnapshotError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        SnapshotError::from(($kind, $desc, $detail.to_string()))
    };
}

/// Creates and returns a [`crate::error::SnapshotError`] from the current function.
///
/// Combines error creation with early return for error conditions that should
/// immediately terminate execution.
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return Err($crate::snapshot_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return Err($crate::snapshot_error!($kind, $desc, $detail))
    };
}
