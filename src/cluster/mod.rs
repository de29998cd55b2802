//! Cluster command executor
//!
//! The seam between the core and the Kubernetes API. The core only ever
//! talks to the [`ClusterExecutor`] trait; the production implementation
//! lives in `kube_exec`, and tests substitute a mock.

mod kube_exec;

pub use kube_exec::*;

use anyhow::Result;
use async_trait::async_trait;
use kube::{Client, Config};
use thiserror::Error;

use crate::models::{ResourceItem, ResourceKind};

/// Failures reported by the executor
///
/// Both variants are recovered locally: a fetch failure leaves prior state
/// untouched, a delete failure restores the optimistic mark. Neither
/// propagates past the coordinator that dispatched the operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClusterError {
    #[error("failed to list {kind}: {message}")]
    Fetch {
        kind: ResourceKind,
        message: String,
    },
    #[error("failed to delete {kind} {namespace}/{name}: {message}")]
    Delete {
        kind: ResourceKind,
        namespace: String,
        name: String,
        message: String,
    },
}

/// Issues list/delete operations against the remote cluster
///
/// Timeout handling is the executor's responsibility; callers only
/// distinguish success from failure.
#[async_trait]
pub trait ClusterExecutor: Send + Sync {
    /// List all resources of a kind, in the order the cluster reports them
    async fn list(&self, kind: ResourceKind) -> Result<Vec<ResourceItem>, ClusterError>;

    /// Delete one resource of a kind, addressed by namespace and name
    async fn delete(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError>;
}

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    let config = Config::infer().await?;
    let client = Client::try_from(config)?;
    Ok(client)
}
