//! Hook scripts run around tag creation:
//! - pre-tag-create: before the tag is created
//! - post-tag-create: after the tag exists locally
//! - post-push: after the tag reached the remote

pub mod executor;
pub mod lifecycle;

pub use executor::HookExecutor;
pub use lifecycle::{HookContext, HookType};
