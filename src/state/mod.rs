//! Resource state store
//!
//! Holds everything the renderers read: the last-fetched collection per
//! resource kind, the user's mark/pending-deletion sets, and the reference
//! clock for the redraw in progress. The store is an explicit context object
//! owned by the application loop and passed by reference - it performs no
//! I/O of its own.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{ResourceItem, ResourceKind};

/// Lookup failures surfaced to the user
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown resource: {kind} {namespace}/{name}")]
    UnknownResource {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },
}

/// Per-kind slice of the store
#[derive(Debug, Default)]
struct KindState {
    /// `None` means never fetched; empty means fetched and empty
    collection: Option<Vec<ResourceItem>>,
    /// `namespace/name` keys; names alone collide across namespaces
    marked: HashSet<String>,
    pending_deletion: HashSet<String>,
}

fn qualify(namespace: &str, name: &str) -> String {
    format!("{}/{}", namespace, name)
}

/// Process-wide resource state
///
/// Invariant: a key is never in `marked` and `pending_deletion` at the same
/// time, and both sets only ever hold keys of items present in the latest
/// fetched collection (pruned on every update).
#[derive(Debug)]
pub struct ResourceStore {
    kinds: HashMap<ResourceKind, KindState>,
    reference_clock: DateTime<Utc>,
}

impl ResourceStore {
    pub fn new() -> Self {
        let mut kinds = HashMap::new();
        for kind in ResourceKind::all() {
            kinds.insert(*kind, KindState::default());
        }
        Self {
            kinds,
            reference_clock: Utc::now(),
        }
    }

    /// Drop all fetched data and marks (disconnect/logout)
    pub fn reset(&mut self) {
        for state in self.kinds.values_mut() {
            *state = KindState::default();
        }
    }

    fn state(&self, kind: ResourceKind) -> &KindState {
        self.kinds.get(&kind).expect("all kinds initialized in new")
    }

    fn state_mut(&mut self, kind: ResourceKind) -> &mut KindState {
        self.kinds
            .get_mut(&kind)
            .expect("all kinds initialized in new")
    }

    /// Capture the reference clock for a new redraw
    ///
    /// Every age computed during that redraw uses this single timestamp, so
    /// the age columns are mutually consistent even though rendering is not
    /// instantaneous.
    pub fn begin_redraw(&mut self) {
        self.reference_clock = Utc::now();
    }

    pub fn reference_clock(&self) -> DateTime<Utc> {
        self.reference_clock
    }

    /// Pin the reference clock to a fixed instant (tests)
    pub fn set_reference_clock(&mut self, clock: DateTime<Utc>) {
        self.reference_clock = clock;
    }

    /// Current snapshot for a kind; `None` means never fetched
    pub fn collection(&self, kind: ResourceKind) -> Option<&[ResourceItem]> {
        self.state(kind).collection.as_deref()
    }

    /// Replace a kind's snapshot with freshly fetched items
    ///
    /// Keys that vanished from the cluster are dropped from both mark sets:
    /// a pending deletion is thereby confirmed, a stale mark discarded.
    pub fn update_collection(&mut self, kind: ResourceKind, items: Vec<ResourceItem>) {
        let state = self.state_mut(kind);
        let present: HashSet<String> = items.iter().map(|i| i.qualified_name()).collect();
        state.marked.retain(|key| present.contains(key));
        state.pending_deletion.retain(|key| present.contains(key));
        state.collection = Some(items);
    }

    /// Marked items, as `namespace/name` keys
    pub fn marked(&self, kind: ResourceKind) -> &HashSet<String> {
        &self.state(kind).marked
    }

    /// Items with a dispatched delete awaiting confirmation, as
    /// `namespace/name` keys
    pub fn pending_deletion(&self, kind: ResourceKind) -> &HashSet<String> {
        &self.state(kind).pending_deletion
    }

    /// Flag a resource for deletion; a no-op while its deletion is pending
    pub fn mark(&mut self, kind: ResourceKind, namespace: &str, name: &str) {
        let key = qualify(namespace, name);
        let state = self.state_mut(kind);
        if state.pending_deletion.contains(&key) {
            return;
        }
        state.marked.insert(key);
    }

    pub fn unmark(&mut self, kind: ResourceKind, namespace: &str, name: &str) {
        let key = qualify(namespace, name);
        self.state_mut(kind).marked.remove(&key);
    }

    /// Move a key from `marked` to `pending_deletion`; no-op if already pending
    pub fn begin_delete(&mut self, kind: ResourceKind, namespace: &str, name: &str) {
        let key = qualify(namespace, name);
        let state = self.state_mut(kind);
        if state.pending_deletion.contains(&key) {
            return;
        }
        state.marked.remove(&key);
        state.pending_deletion.insert(key);
    }

    /// A dispatched delete failed; restore the mark
    pub fn delete_failed(&mut self, kind: ResourceKind, namespace: &str, name: &str) {
        let key = qualify(namespace, name);
        let state = self.state_mut(kind);
        if state.pending_deletion.remove(&key) {
            state.marked.insert(key);
        }
    }

    /// Find an item by namespace and name within the latest fetched collection
    pub fn lookup(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<&ResourceItem, StoreError> {
        self.state(kind)
            .collection
            .as_deref()
            .and_then(|items| {
                items
                    .iter()
                    .find(|i| i.namespace == namespace && i.name == name)
            })
            .ok_or_else(|| StoreError::UnknownResource {
                kind,
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}
