//! Resource item model
//!
//! A `ResourceItem` is one instance of a resource kind as last reported by
//! the cluster. The raw API object is retained for the YAML view; the parsed
//! fields are what the renderers consume.

use chrono::{DateTime, Utc};

use crate::models::ResourceKind;

/// Kind-specific display fields extracted from the raw object
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDetail {
    Service {
        cluster_ip: Option<String>,
        external_ips: Vec<String>,
        ports: Vec<String>,
    },
    Pod {
        phase: Option<String>,
        ready_containers: usize,
        total_containers: usize,
        restarts: u64,
    },
}

/// One resource instance, identified by name within its kind
#[derive(Debug, Clone)]
pub struct ResourceItem {
    pub name: String,
    pub namespace: String,
    pub created: Option<DateTime<Utc>>,
    pub detail: ItemDetail,
    /// Raw API object, kept for the YAML view
    pub raw: serde_json::Value,
}

impl ResourceItem {
    /// Parse an item from a raw API object JSON
    ///
    /// Missing or malformed fields degrade to empty/None rather than failing
    /// the whole collection - a half-populated item is still displayable.
    pub fn from_json(kind: ResourceKind, obj: serde_json::Value) -> Self {
        let metadata = obj.get("metadata");
        let name = json_str(metadata, "name").unwrap_or_default();
        let namespace = json_str(metadata, "namespace").unwrap_or_default();
        let created = json_str(metadata, "creationTimestamp")
            .and_then(|s| crate::render::parse_utc_timestamp(&s));

        let detail = match kind {
            ResourceKind::Service => extract_service_detail(&obj),
            ResourceKind::Pod => extract_pod_detail(&obj),
        };

        Self {
            name,
            namespace,
            created,
            detail,
            raw: obj,
        }
    }

    /// Stable `namespace/name` key
    ///
    /// Names are only unique within a namespace; everything that tracks an
    /// item across redraws (marks, pending deletions, section identity) keys
    /// on this instead of the bare name.
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    /// Pod phase, if this item is a pod with a reported status
    pub fn pod_phase(&self) -> Option<&str> {
        match &self.detail {
            ItemDetail::Pod { phase, .. } => phase.as_deref(),
            _ => None,
        }
    }
}

fn json_str(value: Option<&serde_json::Value>, key: &str) -> Option<String> {
    value?
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Extract service display fields from a raw Service object
fn extract_service_detail(obj: &serde_json::Value) -> ItemDetail {
    let spec = obj.get("spec");

    let cluster_ip = json_str(spec, "clusterIP");

    let external_ips = spec
        .and_then(|s| s.get("externalIPs"))
        .and_then(|v| v.as_array())
        .map(|ips| {
            ips.iter()
                .filter_map(|ip| ip.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let ports = spec
        .and_then(|s| s.get("ports"))
        .and_then(|v| v.as_array())
        .map(|ports| {
            ports
                .iter()
                .filter_map(|p| {
                    let port = p.get("port").and_then(|n| n.as_u64())?;
                    let protocol = p.get("protocol").and_then(|s| s.as_str()).unwrap_or("TCP");
                    Some(format!("{}/{}", port, protocol))
                })
                .collect()
        })
        .unwrap_or_default();

    ItemDetail::Service {
        cluster_ip,
        external_ips,
        ports,
    }
}

/// Extract pod display fields from a raw Pod object
fn extract_pod_detail(obj: &serde_json::Value) -> ItemDetail {
    let status = obj.get("status");

    let phase = json_str(status, "phase");

    let container_statuses = status
        .and_then(|s| s.get("containerStatuses"))
        .and_then(|v| v.as_array());

    let (ready_containers, total_containers, restarts) = match container_statuses {
        Some(statuses) => {
            let ready = statuses
                .iter()
                .filter(|c| c.get("ready").and_then(|r| r.as_bool()).unwrap_or(false))
                .count();
            let restarts = statuses
                .iter()
                .filter_map(|c| c.get("restartCount").and_then(|n| n.as_u64()))
                .sum();
            (ready, statuses.len(), restarts)
        }
        None => (0, 0, 0),
    };

    ItemDetail::Pod {
        phase,
        ready_containers,
        total_containers,
        restarts,
    }
}
