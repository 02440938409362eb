//! Configuration management for the snapshot agent.
//!
//! Provides environment detection, configuration loading from YAML files and
//! `APP_*` environment variables, secret handling, and shared configuration
//! types.

mod environment;
mod load;
mod secret;
pub mod shared;

pub use environment::*;
pub use load::*;
pub use secret::*;
