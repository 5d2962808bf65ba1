//! Default action: bring up a cluster

use crate::cluster::{build_cluster_config, ClusterOptions, ClusterProvider};
use crate::config::Settings;
use crate::error::{display_chain, Error, Result};
use crate::ingress::{IngressError, IngressInstaller};
use tracing::{info, warn};

pub const BANNER: &str = r#"
  _  _____ _   _ _____  _     ___ _   _  ____
 | |/ /_ _| \ | |  _  \| |   |_ _| \ | |/ ___|
 | ' / | ||  \| | | |  | |    | ||  \| | |  _
 |  \  | || |\  | |_|  | |___ | || |\  | |_| |
 |_| \_\___|_| \_|____/|_____|___|_| \_|\____|
"#;

/// Create cluster `name`, optionally followed by the ingress controller
///
/// Provisioning failures abort with an error. Ingress problems are only
/// reported; the cluster is left running either way.
pub async fn run(
    provider: &dyn ClusterProvider,
    settings: &Settings,
    name: &str,
    options: &ClusterOptions,
) -> Result<()> {
    print!("{}", BANNER);

    let topology = build_cluster_config(options)?;

    println!(
        "Starting up {} (1 CP, {} Workers)...",
        name, options.workers
    );
    provider
        .create(name, &topology)
        .await
        .map_err(Error::Create)?;

    if options.ingress {
        // Give the API server a moment before applying manifests
        tokio::time::sleep(settings.ingress_settle_delay).await;
        let installer =
            IngressInstaller::new(&settings.kubectl_binary, name, &settings.ingress_manifest);
        let outcome = install_ingress(&installer).await;
        info!(cluster = name, ?outcome, "Ingress step finished");
    }

    println!("\nCluster is hot! Use 'kindling status' to check health.");
    Ok(())
}

/// How far ingress installation got
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngressOutcome {
    Online,
    NotReady,
    ApplyFailed,
}

async fn install_ingress(installer: &IngressInstaller) -> IngressOutcome {
    println!("Installing NGINX Ingress Controller...");
    info!(context = installer.context(), "Installing ingress-nginx");

    if let Err(e) = installer.apply().await {
        warn!(error = %e, "Ingress installation failed");
        println!("Failed to install ingress: {}", display_chain(&e));
        if let IngressError::Apply { output, .. } = &e {
            println!("kubectl output: {}", output);
        }
        return IngressOutcome::ApplyFailed;
    }

    println!("Waiting for Ingress to be ready...");
    match installer.wait_ready().await {
        Ok(()) => {
            println!("Ingress is online! Reachable at http://localhost:80");
            IngressOutcome::Online
        }
        Err(e) => {
            warn!(error = %e, "Ingress not ready");
            println!(
                "Ingress is taking a while to start. Check 'kubectl get pods -n ingress-nginx' later."
            );
            IngressOutcome::NotReady
        }
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
