//! Runtime settings
//!
//! Read once at startup from environment variables:
//! - KINDLING_KIND_BIN: kind executable (default: "kind")
//! - KINDLING_KUBECTL_BIN: kubectl executable (default: "kubectl")
//! - KINDLING_INGRESS_MANIFEST: manifest applied by `--ingress`
//! - KINDLING_STATUS_TIMEOUT_SECS: node listing timeout (default: 10)

use crate::ingress::DEFAULT_INGRESS_MANIFEST;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between cluster creation and ingress installation
pub const INGRESS_SETTLE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub kind_binary: String,
    pub kubectl_binary: String,
    pub ingress_manifest: String,
    pub status_timeout: Duration,
    pub ingress_settle_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kind_binary: "kind".to_string(),
            kubectl_binary: "kubectl".to_string(),
            ingress_manifest: DEFAULT_INGRESS_MANIFEST.to_string(),
            status_timeout: DEFAULT_STATUS_TIMEOUT,
            ingress_settle_delay: INGRESS_SETTLE_DELAY,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let status_timeout = match non_empty("KINDLING_STATUS_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        value = %raw,
                        "Invalid KINDLING_STATUS_TIMEOUT_SECS, using default"
                    );
                    defaults.status_timeout
                }
            },
            None => defaults.status_timeout,
        };

        Self {
            kind_binary: non_empty("KINDLING_KIND_BIN").unwrap_or(defaults.kind_binary),
            kubectl_binary: non_empty("KINDLING_KUBECTL_BIN").unwrap_or(defaults.kubectl_binary),
            ingress_manifest: non_empty("KINDLING_INGRESS_MANIFEST")
                .unwrap_or(defaults.ingress_manifest),
            status_timeout,
            ingress_settle_delay: defaults.ingress_settle_delay,
        }
    }
}
