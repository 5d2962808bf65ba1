pub mod cli;
pub mod cluster;
pub mod commands;
pub mod config;
pub mod error;
pub mod ingress;
pub mod status;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::cli::Cli;
pub use crate::error::{Error, Result};
