//! Cluster lifecycle provider
//!
//! `ClusterProvider` is the seam between the commands and whatever actually
//! provisions clusters. `KindProvider` implements it by shelling out to the
//! kind binary.

use crate::cluster::config::{ClusterTopology, ConfigError};
use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to run {binary}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({}){}", describe_exit(.code), describe_stderr(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Cluster lifecycle operations
#[async_trait]
pub trait ClusterProvider: Send + Sync {
    /// Provision a cluster with the given topology
    async fn create(&self, name: &str, topology: &ClusterTopology) -> Result<(), ProviderError>;

    /// Names of all clusters the provider knows about
    async fn list(&self) -> Result<Vec<String>, ProviderError>;

    /// Tear down a single cluster
    async fn delete(&self, name: &str) -> Result<(), ProviderError>;
}

/// Provider backed by the kind CLI
#[derive(Debug, Clone)]
pub struct KindProvider {
    binary: String,
}

impl KindProvider {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn spawn_error(&self, source: std::io::Error) -> ProviderError {
        ProviderError::Spawn {
            binary: self.binary.clone(),
            source,
        }
    }

    fn command_failed(&self, args: &[&str], code: Option<i32>, stderr: &[u8]) -> ProviderError {
        ProviderError::CommandFailed {
            command: format!("{} {}", self.binary, args.join(" ")),
            code,
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }
}

impl Default for KindProvider {
    fn default() -> Self {
        Self::new("kind")
    }
}

#[async_trait]
impl ClusterProvider for KindProvider {
    async fn create(&self, name: &str, topology: &ClusterTopology) -> Result<(), ProviderError> {
        let config = topology.to_yaml()?;
        let args = ["create", "cluster", "--name", name, "--config", "-"];
        debug!(cluster = name, config = %config, "Rendered kind config");

        // kind's progress output goes straight to the terminal
        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // stdin drops with the match arm, closing the pipe
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(config.as_bytes()).await,
            None => Ok(()),
        };

        // A kind that exits early breaks the pipe; its exit status says more
        let status = child.wait().await.map_err(|e| self.spawn_error(e))?;
        if !status.success() {
            return Err(self.command_failed(&args, status.code(), b""));
        }
        written.map_err(|e| self.spawn_error(e))?;

        info!(cluster = name, nodes = topology.nodes.len(), "Cluster created");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, ProviderError> {
        let args = ["get", "clusters"];
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(self.command_failed(&args, output.status.code(), &output.stderr));
        }

        let clusters = parse_cluster_list(&String::from_utf8_lossy(&output.stdout));
        debug!(count = clusters.len(), "Listed kind clusters");
        Ok(clusters)
    }

    async fn delete(&self, name: &str) -> Result<(), ProviderError> {
        let args = ["delete", "cluster", "--name", name];
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(self.command_failed(&args, output.status.code(), &output.stderr));
        }

        info!(cluster = name, "Cluster deleted");
        Ok(())
    }
}

/// Parse `kind get clusters` stdout into cluster names
///
/// kind prints one name per line; "No kind clusters found." goes to stderr,
/// so an empty stdout means no clusters.
pub fn parse_cluster_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
