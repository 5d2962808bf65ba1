//! NGINX ingress controller installation
//!
//! Applies the kind-flavoured ingress-nginx manifest with kubectl and waits
//! for the controller pod. Failures here never fail cluster creation; the
//! caller reports them as warnings.

use std::process::Output;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// ingress-nginx manifest tuned for kind (hostPort 80/443, ingress-ready nodeSelector)
pub const DEFAULT_INGRESS_MANIFEST: &str =
    "https://raw.githubusercontent.com/kubernetes/ingress-nginx/main/deploy/static/provider/kind/deploy.yaml";

pub const INGRESS_NAMESPACE: &str = "ingress-nginx";
pub const CONTROLLER_SELECTOR: &str = "app.kubernetes.io/component=controller";

/// Upper bound for `kubectl wait`
pub const READY_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Error)]
pub enum IngressError {
    #[error("failed to run {binary}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("kubectl apply exited with {status}")]
    Apply { status: String, output: String },

    #[error("ingress controller not ready within {0:?}")]
    NotReady(Duration),
}

/// Runs kubectl against a single kind cluster's context
#[derive(Debug, Clone)]
pub struct IngressInstaller {
    kubectl: String,
    context: String,
    manifest: String,
    ready_timeout: Duration,
}

impl IngressInstaller {
    /// Installer for the cluster named `cluster`
    ///
    /// kind registers the kubeconfig context as `kind-<cluster>`.
    pub fn new(kubectl: impl Into<String>, cluster: &str, manifest: impl Into<String>) -> Self {
        Self {
            kubectl: kubectl.into(),
            context: format!("kind-{}", cluster),
            manifest: manifest.into(),
            ready_timeout: READY_TIMEOUT,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn apply_args(&self) -> Vec<String> {
        vec![
            "--context".to_string(),
            self.context.clone(),
            "apply".to_string(),
            "-f".to_string(),
            self.manifest.clone(),
        ]
    }

    pub fn wait_args(&self) -> Vec<String> {
        vec![
            "--context".to_string(),
            self.context.clone(),
            "wait".to_string(),
            "--namespace".to_string(),
            INGRESS_NAMESPACE.to_string(),
            "--for=condition=ready".to_string(),
            "pod".to_string(),
            format!("--selector={}", CONTROLLER_SELECTOR),
            format!("--timeout={}s", self.ready_timeout.as_secs()),
        ]
    }

    /// Apply the ingress-nginx manifest
    ///
    /// On failure the combined kubectl output is kept on the error.
    pub async fn apply(&self) -> Result<(), IngressError> {
        let output = self.run(self.apply_args()).await?;
        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(IngressError::Apply {
                status: output
                    .status
                    .code()
                    .map_or_else(|| "a signal".to_string(), |code| format!("code {}", code)),
                output: combined,
            });
        }

        debug!(context = %self.context, "Ingress manifest applied");
        Ok(())
    }

    /// Block until the controller pod reports ready or the timeout passes
    pub async fn wait_ready(&self) -> Result<(), IngressError> {
        let output = self.run(self.wait_args()).await?;
        if !output.status.success() {
            warn!(
                context = %self.context,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "kubectl wait did not succeed"
            );
            return Err(IngressError::NotReady(self.ready_timeout));
        }
        Ok(())
    }

    async fn run(&self, args: Vec<String>) -> Result<Output, IngressError> {
        debug!(kubectl = %self.kubectl, args = ?args, "Running kubectl");
        Command::new(&self.kubectl)
            .args(&args)
            .output()
            .await
            .map_err(|source| IngressError::Spawn {
                binary: self.kubectl.clone(),
                source,
            })
    }
}
