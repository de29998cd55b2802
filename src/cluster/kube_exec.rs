//! Production cluster executor backed by the Kubernetes API
//!
//! Uses Api::namespaced when a namespace filter is set, Api::all otherwise -
//! scoping on the server side is cheaper than filtering a cluster-wide list
//! locally.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Pod, Service};
use kube::api::{Api, DeleteParams, ListParams};
use kube::core::NamespaceResourceScope;
use kube::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cluster::{ClusterError, ClusterExecutor};
use crate::models::{ResourceItem, ResourceKind};

/// Executor that talks to a live cluster
pub struct KubeExecutor {
    client: Client,
    namespace: Option<String>,
}

impl KubeExecutor {
    pub fn new(client: Client, namespace: Option<String>) -> Self {
        Self { client, namespace }
    }

    fn api<K>(&self) -> Api<K>
    where
        K: kube::Resource<Scope = NamespaceResourceScope>,
        K::DynamicType: Default,
    {
        match &self.namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        }
    }

    async fn list_as<K>(&self, kind: ResourceKind) -> Result<Vec<ResourceItem>, ClusterError>
    where
        K: kube::Resource<Scope = NamespaceResourceScope>
            + Clone
            + std::fmt::Debug
            + DeserializeOwned
            + Serialize,
        K::DynamicType: Default,
    {
        let api: Api<K> = self.api();
        let objects = api
            .list(&ListParams::default())
            .await
            .map_err(|e| ClusterError::Fetch {
                kind,
                message: e.to_string(),
            })?;

        tracing::debug!(kind = %kind, count = objects.items.len(), "listed resources");

        let items = objects
            .into_iter()
            .map(|obj| {
                let value = serde_json::to_value(&obj).unwrap_or_default();
                ResourceItem::from_json(kind, value)
            })
            .collect();
        Ok(items)
    }

    async fn delete_as<K>(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError>
    where
        K: kube::Resource<Scope = NamespaceResourceScope>
            + Clone
            + std::fmt::Debug
            + DeserializeOwned,
        K::DynamicType: Default,
    {
        // The listing may span all namespaces, so a delete always targets
        // the item's own namespace
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        api.delete(name, &DeleteParams::default())
            .await
            .map_err(|e| ClusterError::Delete {
                kind,
                namespace: namespace.to_string(),
                name: name.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(kind = %kind, namespace, name, "delete dispatched");
        Ok(())
    }
}

#[async_trait]
impl ClusterExecutor for KubeExecutor {
    async fn list(&self, kind: ResourceKind) -> Result<Vec<ResourceItem>, ClusterError> {
        match kind {
            ResourceKind::Service => self.list_as::<Service>(kind).await,
            ResourceKind::Pod => self.list_as::<Pod>(kind).await,
        }
    }

    async fn delete(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError> {
        match kind {
            ResourceKind::Service => self.delete_as::<Service>(kind, namespace, name).await,
            ResourceKind::Pod => self.delete_as::<Pod>(kind, namespace, name).await,
        }
    }
}
