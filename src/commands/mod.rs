//! CLI actions
//!
//! Each action delegates to a provider or the Kubernetes API and prints
//! human-readable progress to stdout.

pub mod create;
pub mod nuke;
pub mod status;
pub mod version;
