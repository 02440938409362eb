pub mod archive;
pub mod catalog;
pub mod client;
pub mod error;
pub mod layout;
mod macros;
pub mod pipeline;
pub mod sanitize;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod upload;
pub mod writer;
