//! Resource renderers
//!
//! One pure renderer per resource kind: `(snapshot) -> Node`. Renderers only
//! read the store snapshot handed to them; all styling, navigation, and
//! clipboard metadata is expressed through the render tree vocabulary.

mod pods;
mod services;

pub use pods::*;
pub use services::*;

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{ResourceItem, ResourceKind};
use crate::render::{
    heading, indent, line, mark_for_delete, nav_prop, padding, propertize, section, Node, StyleTag,
};
use crate::render::{copy_prop, NavTarget};
use crate::state::ResourceStore;

/// Label column width shared by all detail key-value lines, so labels align
/// across items and kinds.
pub const DETAIL_LABEL_WIDTH: usize = 14;

/// Immutable view of one kind's state for a single redraw
///
/// Captured once per redraw; renderers never see the store mutate mid-render.
#[derive(Debug, Clone, Copy)]
pub struct KindSnapshot<'a> {
    pub collection: Option<&'a [ResourceItem]>,
    pub marked: &'a HashSet<String>,
    pub pending_deletion: &'a HashSet<String>,
    /// Reference clock; every age in this redraw is relative to it
    pub clock: DateTime<Utc>,
}

impl<'a> KindSnapshot<'a> {
    pub fn from_store(store: &'a ResourceStore, kind: ResourceKind) -> Self {
        Self {
            collection: store.collection(kind),
            marked: store.marked(kind),
            pending_deletion: store.pending_deletion(kind),
            clock: store.reference_clock(),
        }
    }
}

/// Render the full document tree: one listing per kind, in document order
pub fn render_document(store: &ResourceStore, show_completed: bool) -> Vec<Node> {
    vec![
        render_services(&KindSnapshot::from_store(store, ResourceKind::Service)),
        render_pods(
            &KindSnapshot::from_store(store, ResourceKind::Pod),
            show_completed,
        ),
    ]
}

/// Shared three-way listing shape for a kind's section
///
/// `items` is the visible subset (`None` = never fetched). Each visible item
/// renders through `render_item`.
pub(crate) fn listing<'a>(
    kind: ResourceKind,
    column_header: String,
    items: Option<Vec<&'a ResourceItem>>,
    render_item: impl Fn(&'a ResourceItem) -> Node,
) -> Node {
    let mut body = match items {
        None => vec![
            heading(kind.title()),
            indent(vec![
                propertize(vec![StyleTag::ColumnHeader], vec![line(column_header)]),
                propertize(vec![StyleTag::InProgress], vec![line("Fetching…")]),
            ]),
        ],
        Some(items) if items.is_empty() => vec![
            heading(format!("{} (0)", kind.title())),
            indent(vec![propertize(vec![StyleTag::Dimmed], vec![line("None.")])]),
        ],
        Some(items) => {
            let count = items.len();
            let mut inner = vec![propertize(
                vec![StyleTag::ColumnHeader],
                vec![line(column_header)],
            )];
            inner.extend(items.into_iter().map(render_item));
            vec![
                heading(format!("{} ({})", kind.title(), count)),
                indent(inner),
            ]
        }
    };
    body.push(padding());
    section(kind.plural(), body)
}

/// Wrap an item's summary line with navigation and clipboard metadata, plus
/// the mark or pending-deletion override when the item carries one.
pub(crate) fn item_summary(
    kind: ResourceKind,
    item: &ResourceItem,
    snap: &KindSnapshot,
    summary: Node,
) -> Node {
    let key = item.qualified_name();
    let tagged = nav_prop(
        NavTarget::new(kind, item.namespace.clone(), item.name.clone()),
        vec![copy_prop(item.name.clone(), vec![summary])],
    );
    if snap.pending_deletion.contains(&key) {
        propertize(vec![StyleTag::PendingDeletion], vec![tagged])
    } else if snap.marked.contains(&key) {
        mark_for_delete(vec![tagged])
    } else {
        tagged
    }
}

/// Format an item's age relative to the snapshot's reference clock
pub(crate) fn item_age(item: &ResourceItem, snap: &KindSnapshot) -> String {
    item.created
        .map(|created| crate::render::format_age(created, snap.clock))
        .unwrap_or_else(|| "-".to_string())
}

/// Creation timestamp for detail lines
pub(crate) fn item_created(item: &ResourceItem) -> String {
    item.created
        .map(|c| c.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}
