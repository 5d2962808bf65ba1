//! kind cluster topology construction
//!
//! Builds the `kind.x-k8s.io/v1alpha4` `Cluster` document handed to kind:
//! one control-plane node first, followed by N workers. When ingress is
//! requested the control-plane node also maps host ports 80/443 and carries
//! the kubeadm patch that labels it `ingress-ready=true`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// API version understood by `kind create cluster --config`
pub const KIND_API_VERSION: &str = "kind.x-k8s.io/v1alpha4";

/// Upper bound on worker nodes for a local cluster
pub const MAX_WORKERS: u32 = 50;

/// kubeadm patch labelling the control-plane node for ingress-nginx's kind provider
pub const INGRESS_READY_PATCH: &str = r#"kind: InitConfiguration
nodeRegistration:
  kubeletExtraArgs:
    node-labels: "ingress-ready=true"
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("requested {requested} workers, at most {max} are supported")]
    TooManyWorkers { requested: u32, max: u32 },

    #[error("failed to render cluster config")]
    Render(#[from] serde_yaml::Error),
}

/// Options controlling the requested cluster shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterOptions {
    /// Number of worker nodes next to the control plane
    pub workers: u32,

    /// Expose 80/443 on the host and label the control plane for ingress-nginx
    pub ingress: bool,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            ingress: false,
        }
    }
}

/// Role of a node in the topology
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NodeRole {
    ControlPlane,
    Worker,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::ControlPlane => write!(f, "control-plane"),
            NodeRole::Worker => write!(f, "worker"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortProtocol {
    Tcp,
    Udp,
    Sctp,
}

/// Host port forwarded into a node container
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub container_port: u16,
    pub host_port: u16,
    pub protocol: PortProtocol,
}

impl PortMapping {
    pub fn tcp(port: u16) -> Self {
        Self {
            container_port: port,
            host_port: port,
            protocol: PortProtocol::Tcp,
        }
    }
}

/// A single node descriptor
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub role: NodeRole,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_port_mappings: Vec<PortMapping>,

    /// Raw kubeadm configuration patches applied on this node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kubeadm_config_patches: Vec<String>,
}

impl Node {
    pub fn new(role: NodeRole) -> Self {
        Self {
            role,
            extra_port_mappings: Vec::new(),
            kubeadm_config_patches: Vec::new(),
        }
    }
}

/// Ordered node list; the control plane is always `nodes[0]`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterTopology {
    pub kind: String,
    pub api_version: String,
    pub nodes: Vec<Node>,
}

impl ClusterTopology {
    pub fn control_plane(&self) -> Option<&Node> {
        self.nodes
            .first()
            .filter(|node| node.role == NodeRole::ControlPlane)
    }

    pub fn workers(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|node| node.role == NodeRole::Worker)
    }

    /// Render as the YAML document `kind create cluster --config -` reads
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Build the cluster topology for the given options
///
/// # Errors
/// `ConfigError::TooManyWorkers` when `options.workers` exceeds [`MAX_WORKERS`].
pub fn build_cluster_config(options: &ClusterOptions) -> Result<ClusterTopology, ConfigError> {
    if options.workers > MAX_WORKERS {
        return Err(ConfigError::TooManyWorkers {
            requested: options.workers,
            max: MAX_WORKERS,
        });
    }

    let mut control_plane = Node::new(NodeRole::ControlPlane);
    if options.ingress {
        control_plane.extra_port_mappings = vec![PortMapping::tcp(80), PortMapping::tcp(443)];
        control_plane.kubeadm_config_patches = vec![INGRESS_READY_PATCH.to_string()];
    }

    let mut nodes = Vec::with_capacity(options.workers as usize + 1);
    nodes.push(control_plane);
    nodes.extend((0..options.workers).map(|_| Node::new(NodeRole::Worker)));

    Ok(ClusterTopology {
        kind: "Cluster".to_string(),
        api_version: KIND_API_VERSION.to_string(),
        nodes,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
