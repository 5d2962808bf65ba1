//! Test doubles: an in-memory provider and throwaway shell-script binaries

use crate::cluster::{ClusterProvider, ClusterTopology, ProviderError};
use async_trait::async_trait;
use std::collections::HashSet;
#[cfg(unix)]
use std::path::PathBuf;
use std::sync::Mutex;
#[cfg(unix)]
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { name: String, topology: ClusterTopology },
    List,
    Delete(String),
}

#[derive(Default)]
pub struct RecordingProvider {
    clusters: Vec<String>,
    fail_create: bool,
    fail_list: bool,
    fail_delete: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingProvider {
    pub fn with_clusters(names: &[&str]) -> Self {
        Self {
            clusters: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_delete(mut self, name: &str) -> Self {
        self.fail_delete.insert(name.to_string());
        self
    }

    #[allow(clippy::unwrap_used)] // Test helper can use unwrap
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    #[allow(clippy::unwrap_used)] // Test helper can use unwrap
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(command: &str) -> ProviderError {
        ProviderError::CommandFailed {
            command: command.to_string(),
            code: Some(1),
            stderr: "simulated failure".to_string(),
        }
    }
}

#[async_trait]
impl ClusterProvider for RecordingProvider {
    async fn create(&self, name: &str, topology: &ClusterTopology) -> Result<(), ProviderError> {
        self.record(Call::Create {
            name: name.to_string(),
            topology: topology.clone(),
        });
        if self.fail_create {
            return Err(Self::failure("kind create cluster"));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, ProviderError> {
        self.record(Call::List);
        if self.fail_list {
            return Err(Self::failure("kind get clusters"));
        }
        Ok(self.clusters.clone())
    }

    async fn delete(&self, name: &str) -> Result<(), ProviderError> {
        self.record(Call::Delete(name.to_string()));
        if self.fail_delete.contains(name) {
            return Err(Self::failure("kind delete cluster"));
        }
        Ok(())
    }
}

/// Executable `/bin/sh` script living in its own temp dir
#[cfg(unix)]
pub struct FakeBinary {
    _dir: TempDir,
    path: PathBuf,
    log: PathBuf,
}

#[cfg(unix)]
impl FakeBinary {
    /// Write `body` after a line that appends the arguments to the call log
    #[allow(clippy::unwrap_used)] // Test helper can use unwrap
    pub fn new(name: &str, body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let log = dir.path().join("calls.log");
        let script = format!(
            "#!/bin/sh\necho \"$*\" >> '{}'\n{}\n",
            log.display(),
            body
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            _dir: dir,
            path,
            log,
        }
    }

    /// kubectl stand-in with fixed exit codes for `apply` and `wait`
    pub fn kubectl(apply_exit: i32, wait_exit: i32) -> Self {
        let apply_stderr = if apply_exit == 0 {
            String::new()
        } else {
            "echo 'error: unable to recognize manifest' >&2; ".to_string()
        };
        let body = format!(
            "case \" $* \" in\n\
             *\" apply \"*) echo 'namespace/ingress-nginx created'; {}exit {} ;;\n\
             *\" wait \"*) exit {} ;;\n\
             esac\n\
             exit 0",
            apply_stderr, apply_exit, wait_exit
        );
        Self::new("kubectl", &body)
    }

    pub fn binary(&self) -> String {
        self.path.display().to_string()
    }

    /// Argument lines of every invocation, oldest first
    pub fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    /// Subcommand (apply/wait/...) of every invocation, oldest first
    pub fn subcommands(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .filter_map(|line| {
                line.split_whitespace()
                    .find(|arg| matches!(*arg, "apply" | "wait"))
                    .map(String::from)
            })
            .collect()
    }
}
