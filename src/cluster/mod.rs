//! Cluster topology and lifecycle
//!
//! - `config`: builds the kind cluster topology
//! - `provider`: creates, lists and deletes clusters

pub mod config;
pub mod provider;

pub use config::{build_cluster_config, ClusterOptions, ClusterTopology, ConfigError, NodeRole};
pub use provider::{ClusterProvider, KindProvider, ProviderError};
