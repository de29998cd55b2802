//! Resource store invariant tests

use kubedoc::models::ResourceKind;
use kubedoc::state::ResourceStore;
use kubedoc::ResourceItem;
use serde_json::json;

fn item_in(namespace: &str, name: &str) -> ResourceItem {
    ResourceItem::from_json(
        ResourceKind::Service,
        json!({"metadata": {"name": name, "namespace": namespace}}),
    )
}

fn item(name: &str) -> ResourceItem {
    item_in("default", name)
}

fn assert_disjoint(store: &ResourceStore, kind: ResourceKind) {
    let marked = store.marked(kind);
    let pending = store.pending_deletion(kind);
    assert!(
        marked.is_disjoint(pending),
        "marked and pending-deletion overlap: {:?} / {:?}",
        marked,
        pending
    );
}

#[test]
fn test_sets_stay_disjoint_under_any_op_sequence() {
    let kind = ResourceKind::Service;
    let mut store = ResourceStore::new();
    store.update_collection(kind, vec![item("a"), item("b"), item("c")]);

    // Every transition the UI can produce, interleaved
    let ops: Vec<(&str, &str)> = vec![
        ("mark", "a"),
        ("mark", "b"),
        ("begin_delete", "a"),
        ("mark", "a"), // no-op while pending
        ("delete_failed", "a"),
        ("begin_delete", "a"),
        ("begin_delete", "a"), // no-op, already pending
        ("unmark", "b"),
        ("mark", "c"),
        ("delete_failed", "c"), // no-op, never pending
        ("begin_delete", "c"),
        ("delete_failed", "a"),
    ];

    for (op, name) in ops {
        match op {
            "mark" => store.mark(kind, "default", name),
            "unmark" => store.unmark(kind, "default", name),
            "begin_delete" => store.begin_delete(kind, "default", name),
            "delete_failed" => store.delete_failed(kind, "default", name),
            _ => unreachable!(),
        }
        assert_disjoint(&store, kind);
    }

    assert!(store.marked(kind).contains("default/a"));
    assert!(store.pending_deletion(kind).contains("default/c"));
}

#[test]
fn test_sets_only_hold_keys_from_the_latest_collection() {
    let kind = ResourceKind::Service;
    let mut store = ResourceStore::new();
    store.update_collection(kind, vec![item("a"), item("b"), item("c")]);
    store.mark(kind, "default", "a");
    store.mark(kind, "default", "b");
    store.begin_delete(kind, "default", "c");

    store.update_collection(kind, vec![item("a")]);

    let present = |name: &str| {
        let key = format!("default/{}", name);
        store.marked(kind).contains(&key) || store.pending_deletion(kind).contains(&key)
    };
    assert!(present("a"));
    assert!(!present("b"));
    assert!(!present("c"));
}

#[test]
fn test_pending_deletion_confirmed_by_next_fetch() {
    let kind = ResourceKind::Service;
    let mut store = ResourceStore::new();
    store.update_collection(kind, vec![item("a"), item("b"), item("c")]);
    store.mark(kind, "default", "b");
    store.begin_delete(kind, "default", "b");

    // Next poll no longer reports "b": the deletion is confirmed
    store.update_collection(kind, vec![item("a"), item("c")]);
    assert!(store.marked(kind).is_empty());
    assert!(store.pending_deletion(kind).is_empty());
}

#[test]
fn test_marks_are_scoped_to_one_namespace() {
    let kind = ResourceKind::Service;
    let mut store = ResourceStore::new();
    store.update_collection(kind, vec![item_in("staging", "app"), item_in("prod", "app")]);
    store.mark(kind, "staging", "app");
    store.begin_delete(kind, "staging", "app");

    // prod/app shares the name but not the identity
    assert!(store.pending_deletion(kind).contains("staging/app"));
    assert!(!store.pending_deletion(kind).contains("prod/app"));
    assert!(store.marked(kind).is_empty());

    // staging/app confirmed gone; prod/app untouched
    store.update_collection(kind, vec![item_in("prod", "app")]);
    assert!(store.pending_deletion(kind).is_empty());
    assert!(store.lookup(kind, "prod", "app").is_ok());
}

#[test]
fn test_kinds_are_independent() {
    let mut store = ResourceStore::new();
    store.update_collection(ResourceKind::Service, vec![item("shared-name")]);
    store.mark(ResourceKind::Service, "default", "shared-name");

    assert!(store.marked(ResourceKind::Pod).is_empty());
    assert!(store.collection(ResourceKind::Pod).is_none());
}
