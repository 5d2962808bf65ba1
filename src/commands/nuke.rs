//! Tear down every cluster the provider knows about

use crate::cluster::{ClusterProvider, ProviderError};
use crate::error::{display_chain, Error, Result};
use tracing::warn;

/// Outcome of a bulk teardown
#[derive(Debug, Default)]
pub struct TeardownReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, ProviderError)>,
}

impl TeardownReport {
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete all clusters in listing order
///
/// A failed deletion is recorded and the remaining clusters are still
/// attempted. Only a failure to list clusters aborts.
pub async fn delete_all(provider: &dyn ClusterProvider) -> Result<TeardownReport> {
    let clusters = provider.list().await.map_err(Error::ListClusters)?;

    let mut report = TeardownReport::default();
    if clusters.is_empty() {
        return Ok(report);
    }

    println!("Nuking {} cluster(s)...", clusters.len());
    for cluster in clusters {
        println!("Deleting: {}", cluster);
        match provider.delete(&cluster).await {
            Ok(()) => report.deleted.push(cluster),
            Err(e) => {
                warn!(cluster = %cluster, error = %e, "Cluster deletion failed");
                println!("Failed to delete {}: {}", cluster, display_chain(&e));
                report.failed.push((cluster, e));
            }
        }
    }

    Ok(report)
}

pub async fn run(provider: &dyn ClusterProvider) -> Result<()> {
    let report = delete_all(provider).await?;

    if report.attempted() == 0 {
        println!("No active clusters found. Nothing to do.");
        return Ok(());
    }

    if !report.is_complete() {
        return Err(Error::TeardownIncomplete {
            failed: report.failed.into_iter().map(|(name, _)| name).collect(),
        });
    }

    println!("All active clusters nuked.");
    Ok(())
}

#[cfg(test)]
#[path = "nuke_test.rs"]
mod tests;
