//! Command-line surface
//!
//! `kindling [--workers N] [--name NAME] [--ingress]` creates a cluster;
//! `status`, `nuke` and `version` are subcommands.

use crate::cluster::{ClusterOptions, KindProvider};
use crate::commands;
use crate::config::Settings;
use crate::error::Result;
use crate::version::BUILD_INFO;
use clap::{Args, Parser, Subcommand};

pub const DEFAULT_CLUSTER_NAME: &str = "kindling-cluster";

/// Ephemeral local Kubernetes clusters
#[derive(Parser, Debug)]
#[command(name = "kindling", version = BUILD_INFO.version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub create: CreateArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    /// Number of worker nodes
    #[arg(short = 'w', long, default_value_t = 1)]
    pub workers: u32,

    /// Cluster name
    #[arg(short = 'n', long, default_value = DEFAULT_CLUSTER_NAME)]
    pub name: String,

    /// Enable Ingress controller and port mapping
    #[arg(long)]
    pub ingress: bool,
}

impl CreateArgs {
    pub fn options(&self) -> ClusterOptions {
        ClusterOptions {
            workers: self.workers,
            ingress: self.ingress,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check the health of nodes
    Status,
    /// Brings down all active Kindling clusters
    Nuke,
    /// Print version info
    Version,
}

impl Cli {
    /// Run the selected action
    pub async fn run(self, settings: &Settings) -> Result<()> {
        let provider = KindProvider::new(&settings.kind_binary);

        match self.command {
            None => {
                commands::create::run(&provider, settings, &self.create.name, &self.create.options())
                    .await
            }
            Some(Commands::Status) => commands::status::run(settings).await,
            Some(Commands::Nuke) => commands::nuke::run(&provider).await,
            Some(Commands::Version) => {
                commands::version::run();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
