//! Node health reporting
//!
//! Lists cluster nodes through the Kubernetes API (credentials from the
//! ambient kubeconfig) and renders them as an aligned table.

mod node;
mod table;

pub use node::{StatusRow, CONTROL_PLANE_LABEL};
pub use table::{render_table, HEADERS};

use k8s_openapi::api::core::v1::Node;
use kube::api::{Api, ListParams};
use kube::{Client, Config};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("could not find kubeconfig")]
    Kubeconfig(#[from] kube::config::InferConfigError),

    #[error("connection error")]
    Connection(#[source] kube::Error),

    #[error("failed to fetch nodes")]
    ListNodes(#[source] kube::Error),

    #[error("timed out after {0:?} fetching nodes")]
    Timeout(Duration),
}

/// Build a client from the ambient kubeconfig / in-cluster environment
pub async fn connect() -> Result<Client, StatusError> {
    let config = Config::infer().await?;
    debug!(cluster_url = %config.cluster_url, "Inferred Kubernetes config");
    Client::try_from(config).map_err(StatusError::Connection)
}

/// List all nodes, giving up after `timeout`
pub async fn list_nodes(client: Client, timeout: Duration) -> Result<Vec<Node>, StatusError> {
    let nodes: Api<Node> = Api::all(client);

    let list = tokio::time::timeout(timeout, nodes.list(&ListParams::default()))
        .await
        .map_err(|_| StatusError::Timeout(timeout))?
        .map_err(StatusError::ListNodes)?;

    info!(count = list.items.len(), "Fetched nodes");
    Ok(list.items)
}

/// Render nodes as the status table
pub fn format_nodes(nodes: &[Node]) -> String {
    let rows: Vec<StatusRow> = nodes.iter().map(StatusRow::from_node).collect();
    render_table(&rows)
}
