//! Tracing setup for the snapshot agent.
//!
//! Production environments log structured JSON to rotating files, development
//! environments log pretty-printed output to the console.

mod tracing;

pub use tracing::*;
