//! Print node health for the current kubeconfig context

use crate::config::Settings;
use crate::error::Result;
use crate::status;

pub async fn run(settings: &Settings) -> Result<()> {
    let client = status::connect().await?;
    let nodes = status::list_nodes(client, settings.status_timeout).await?;
    print!("{}", status::format_nodes(&nodes));
    Ok(())
}
