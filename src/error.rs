//! Crate-level error type

use crate::cluster::{ConfigError, ProviderError};
use crate::status::StatusError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid cluster options")]
    Config(#[from] ConfigError),

    #[error("cluster startup failed")]
    Create(#[source] ProviderError),

    #[error("failed to list clusters")]
    ListClusters(#[source] ProviderError),

    #[error("failed to delete {} cluster(s): {}", .failed.len(), .failed.join(", "))]
    TeardownIncomplete { failed: Vec<String> },

    #[error(transparent)]
    Status(#[from] StatusError),
}

/// Render an error followed by each of its causes, `outer: inner: root`
pub fn display_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        cause = inner.source();
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests can use unwrap for brevity

    use super::*;
    use std::time::Duration;

    fn kind_create_failure() -> ProviderError {
        ProviderError::CommandFailed {
            command: "kind create cluster --name dev --config -".to_string(),
            code: Some(1),
            stderr: String::new(),
        }
    }

    #[test]
    fn test_cause_reported_once_in_error_chain() {
        let err = anyhow::Error::from(Error::Create(kind_create_failure()));

        let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();

        assert_eq!(
            chain,
            vec![
                "cluster startup failed",
                "`kind create cluster --name dev --config -` failed (exit code 1)",
            ]
        );
        assert_eq!(
            format!("{:#}", err),
            "cluster startup failed: `kind create cluster --name dev --config -` failed (exit code 1)"
        );
    }

    #[test]
    fn test_wrapping_messages_do_not_embed_source() {
        let cases = [
            Error::ListClusters(kind_create_failure()),
            Error::Config(ConfigError::TooManyWorkers {
                requested: 99,
                max: 50,
            }),
        ];

        for err in cases {
            let source = std::error::Error::source(&err)
                .expect("wrapped error keeps its source")
                .to_string();
            assert!(
                !err.to_string().contains(&source),
                "{:?} repeats its source in Display",
                err
            );
        }
    }

    #[test]
    fn test_display_chain_matches_anyhow_alternate_format() {
        let err = Error::Create(ProviderError::Spawn {
            binary: "kind".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });

        assert_eq!(
            display_chain(&err),
            "cluster startup failed: failed to run kind: not found"
        );
        assert_eq!(display_chain(&err), format!("{:#}", anyhow::Error::from(err)));
    }

    #[test]
    fn test_status_errors_pass_through_transparently() {
        let err = Error::from(StatusError::Timeout(Duration::from_secs(10)));
        assert_eq!(err.to_string(), "timed out after 10s fetching nodes");
    }
}
