mod agent;
mod base;
mod selector;
mod sentry;
mod upload;

pub use agent::*;
pub use base::*;
pub use selector::*;
pub use sentry::*;
pub use upload::*;
