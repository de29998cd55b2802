//! Polling coordinator and delete orchestrator
//!
//! Fetch and delete operations run on spawned tasks and report back through
//! an unbounded event channel consumed by the application loop. The
//! coordinator guarantees at most one outstanding fetch per resource kind;
//! a `refresh` issued while one is in flight is simply dropped.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::cluster::{ClusterError, ClusterExecutor};
use crate::models::{ResourceItem, ResourceKind};
use crate::state::ResourceStore;

/// Completion events delivered to the application loop
#[derive(Debug)]
pub enum ClusterEvent {
    /// A list operation finished
    Fetched(ResourceKind, Result<Vec<ResourceItem>, ClusterError>),
    /// A delete operation finished for one resource (namespace, name)
    Deleted(ResourceKind, String, String, Result<(), ClusterError>),
}

/// What the application loop should do after applying an event
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Schedule a redraw
    pub redraw: bool,
    /// Status message for the user: (text, is_error)
    pub message: Option<(String, bool)>,
}

/// Dispatches cluster operations with a single-flight guard per kind
pub struct Poller {
    executor: Arc<dyn ClusterExecutor>,
    event_tx: mpsc::UnboundedSender<ClusterEvent>,
    in_flight: HashSet<ResourceKind>,
}

impl Poller {
    /// Create a poller and the receiving end of its event channel
    pub fn new(
        executor: Arc<dyn ClusterExecutor>,
    ) -> (Self, mpsc::UnboundedReceiver<ClusterEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                executor,
                event_tx: tx,
                in_flight: HashSet::new(),
            },
            rx,
        )
    }

    /// Dispatch a fetch for `kind` unless one is already outstanding
    ///
    /// Returns whether a fetch was actually dispatched. There is no
    /// cancellation: the outstanding fetch still completes and updates state.
    pub fn refresh(&mut self, kind: ResourceKind) -> bool {
        if !self.in_flight.insert(kind) {
            tracing::debug!(kind = %kind, "refresh dropped, fetch already in flight");
            return false;
        }
        let executor = self.executor.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = executor.list(kind).await;
            let _ = tx.send(ClusterEvent::Fetched(kind, result));
        });
        true
    }

    /// Refresh every known kind
    pub fn refresh_all(&mut self) {
        for kind in ResourceKind::all() {
            self.refresh(*kind);
        }
    }

    /// Whether a fetch for `kind` is currently outstanding
    pub fn is_in_flight(&self, kind: ResourceKind) -> bool {
        self.in_flight.contains(&kind)
    }

    /// Walk the marked set for `kind` and dispatch deletes for every name
    ///
    /// Marks move to pending-deletion before dispatch, so the very next
    /// redraw already shows the pending style. Returns the number of deletes
    /// dispatched; the caller triggers that redraw.
    pub fn delete_marked(&mut self, kind: ResourceKind, store: &mut ResourceStore) -> usize {
        // Marked keys are namespace-qualified; resolve each back to its item
        // so the delete targets the right namespace
        let targets: Vec<(String, String)> = store
            .collection(kind)
            .map(|items| {
                items
                    .iter()
                    .filter(|i| store.marked(kind).contains(&i.qualified_name()))
                    .map(|i| (i.namespace.clone(), i.name.clone()))
                    .collect()
            })
            .unwrap_or_default();
        for (namespace, name) in &targets {
            store.begin_delete(kind, namespace, name);
            let executor = self.executor.clone();
            let tx = self.event_tx.clone();
            let namespace = namespace.clone();
            let name = name.clone();
            tokio::spawn(async move {
                let result = executor.delete(kind, &namespace, &name).await;
                let _ = tx.send(ClusterEvent::Deleted(kind, namespace, name, result));
            });
        }
        targets.len()
    }

    /// Apply a completion event to the store
    ///
    /// Fetch failures leave prior state untouched and schedule no retry;
    /// delete failures restore the optimistic mark. Either way the failure
    /// is converted into a status message rather than propagated.
    pub fn apply(&mut self, store: &mut ResourceStore, event: ClusterEvent) -> Outcome {
        match event {
            ClusterEvent::Fetched(kind, Ok(items)) => {
                self.in_flight.remove(&kind);
                store.update_collection(kind, items);
                Outcome {
                    redraw: true,
                    message: None,
                }
            }
            ClusterEvent::Fetched(kind, Err(e)) => {
                self.in_flight.remove(&kind);
                tracing::warn!(kind = %kind, error = %e, "fetch failed");
                Outcome {
                    redraw: false,
                    message: Some((e.to_string(), true)),
                }
            }
            ClusterEvent::Deleted(kind, namespace, name, Ok(())) => Outcome {
                redraw: false,
                message: Some((format!("Deleted {} {}/{}", kind, namespace, name), false)),
            },
            ClusterEvent::Deleted(kind, namespace, name, Err(e)) => {
                store.delete_failed(kind, &namespace, &name);
                tracing::warn!(kind = %kind, namespace, name, error = %e, "delete failed");
                Outcome {
                    redraw: true,
                    message: Some((e.to_string(), true)),
                }
            }
        }
    }
}
