use k8s_openapi::api::core::v1::Node;
use kube::ResourceExt;

/// Label kubeadm puts on control-plane nodes
pub const CONTROL_PLANE_LABEL: &str = "node-role.kubernetes.io/control-plane";

const ROLE_CONTROL_PLANE: &str = "control-plane";
const ROLE_WORKER: &str = "worker";
const STATUS_READY: &str = "Ready";
const STATUS_NOT_READY: &str = "NotReady";
const IP_UNKNOWN: &str = "Unknown";

/// Display row derived from a Node
///
/// Missing labels, conditions or addresses degrade to "worker", "NotReady"
/// and "Unknown" rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub name: String,
    pub role: String,
    pub status: String,
    pub internal_ip: String,
}

impl StatusRow {
    pub fn from_node(node: &Node) -> Self {
        Self {
            name: node.name_any(),
            role: node_role(node).to_string(),
            status: node_readiness(node).to_string(),
            internal_ip: internal_ip(node).unwrap_or(IP_UNKNOWN).to_string(),
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [&self.name, &self.role, &self.status, &self.internal_ip]
    }
}

fn node_role(node: &Node) -> &'static str {
    if node.labels().contains_key(CONTROL_PLANE_LABEL) {
        ROLE_CONTROL_PLANE
    } else {
        ROLE_WORKER
    }
}

fn node_readiness(node: &Node) -> &'static str {
    let ready = node
        .status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .is_some_and(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == "Ready" && c.status == "True")
        });

    if ready {
        STATUS_READY
    } else {
        STATUS_NOT_READY
    }
}

/// First address of type InternalIP
fn internal_ip(node: &Node) -> Option<&str> {
    node.status
        .as_ref()
        .and_then(|s| s.addresses.as_ref())
        .and_then(|addresses| addresses.iter().find(|a| a.type_ == "InternalIP"))
        .map(|a| a.address.as_str())
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
