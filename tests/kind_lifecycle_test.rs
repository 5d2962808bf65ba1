//! End-to-end cluster lifecycle against a real kind installation
//!
//! Run with: KINDLING_RUN_E2E=1 cargo test --test kind_lifecycle_test -- --ignored --nocapture
//!
//! Requirements:
//! - Docker running
//! - kind on PATH (or KINDLING_KIND_BIN)
//!
//! WARNING: creates and deletes a real cluster named `kindling-e2e`.

#![allow(clippy::expect_used)]

use kindling::cluster::{build_cluster_config, ClusterOptions, ClusterProvider, KindProvider};
use kindling::config::Settings;
use kindling::status;

const CLUSTER_NAME: &str = "kindling-e2e";

fn should_skip() -> bool {
    std::env::var("KINDLING_RUN_E2E").is_err()
}

#[tokio::test]
#[ignore = "requires Docker and kind; set KINDLING_RUN_E2E=1"]
async fn test_create_status_delete_roundtrip() {
    if should_skip() {
        println!("⏭️  Skipping: KINDLING_RUN_E2E not set");
        return;
    }

    let settings = Settings::from_env();
    let provider = KindProvider::new(&settings.kind_binary);

    // Leftovers from an aborted run
    if provider
        .list()
        .await
        .expect("list clusters")
        .iter()
        .any(|name| name == CLUSTER_NAME)
    {
        provider.delete(CLUSTER_NAME).await.expect("delete stale cluster");
    }

    println!("🏗️  Creating kind cluster: {}", CLUSTER_NAME);
    let topology = build_cluster_config(&ClusterOptions {
        workers: 1,
        ingress: false,
    })
    .expect("build topology");
    provider
        .create(CLUSTER_NAME, &topology)
        .await
        .expect("create cluster");

    let clusters = provider.list().await.expect("list clusters");
    assert!(clusters.iter().any(|name| name == CLUSTER_NAME));

    // kind switches the current context to the new cluster
    let client = status::connect().await.expect("connect to cluster");
    let nodes = status::list_nodes(client, settings.status_timeout)
        .await
        .expect("list nodes");
    let table = status::format_nodes(&nodes);
    println!("{}", table);

    assert_eq!(nodes.len(), 2, "one control plane and one worker");
    assert!(table.contains("control-plane"));
    assert!(table.contains(&format!("{}-worker", CLUSTER_NAME)));

    println!("🗑️  Deleting cluster: {}", CLUSTER_NAME);
    provider.delete(CLUSTER_NAME).await.expect("delete cluster");

    let clusters = provider.list().await.expect("list clusters");
    assert!(!clusters.iter().any(|name| name == CLUSTER_NAME));
}
