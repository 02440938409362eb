mod base;
pub mod kube;
pub mod memory;

pub use base::*;
