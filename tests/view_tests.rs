//! Renderer property tests
//!
//! Exercise the per-kind renderers through the evaluator against fixed
//! snapshots and a pinned reference clock.

use chrono::{TimeZone, Utc};
use kubedoc::models::ResourceKind;
use kubedoc::render::{Document, Evaluator, SectionStates, StyleTag};
use kubedoc::state::ResourceStore;
use kubedoc::views::{render_document, render_pods, render_services, KindSnapshot};
use kubedoc::ResourceItem;
use serde_json::json;

fn service(name: &str, created: &str) -> ResourceItem {
    ResourceItem::from_json(
        ResourceKind::Service,
        json!({
            "metadata": {"name": name, "namespace": "default", "creationTimestamp": created},
            "spec": {"clusterIP": "10.0.0.7", "ports": [{"port": 80}]}
        }),
    )
}

fn pod(name: &str, phase: &str) -> ResourceItem {
    ResourceItem::from_json(
        ResourceKind::Pod,
        json!({
            "metadata": {"name": name, "namespace": "default", "creationTimestamp": "2024-03-01T00:00:00Z"},
            "status": {"phase": phase, "containerStatuses": [{"ready": phase == "Running", "restartCount": 0}]}
        }),
    )
}

fn eval_services(store: &ResourceStore) -> Document {
    let states = SectionStates::new();
    let snap = KindSnapshot::from_store(store, ResourceKind::Service);
    Evaluator::new(&states)
        .eval(std::slice::from_ref(&render_services(&snap)))
        .unwrap()
}

fn eval_pods(store: &ResourceStore, show_completed: bool) -> Document {
    let states = SectionStates::new();
    let snap = KindSnapshot::from_store(store, ResourceKind::Pod);
    Evaluator::new(&states)
        .eval(std::slice::from_ref(&render_pods(&snap, show_completed)))
        .unwrap()
}

#[test]
fn test_unfetched_collection_renders_fetching() {
    let store = ResourceStore::new();
    let doc = eval_services(&store);
    let lines = doc.all_lines();

    // Heading without count, column header, one in-progress line, padding
    assert_eq!(lines[0].text(), "Services");
    assert!(lines[0].has_style(StyleTag::Heading));
    assert!(lines[1].has_style(StyleTag::ColumnHeader));
    assert!(lines[1].text().contains("NAME"));
    assert_eq!(lines[2].text(), "Fetching…");
    assert!(lines[2].has_style(StyleTag::InProgress));
    assert_eq!(lines[3].text(), "");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_empty_collection_renders_none() {
    let mut store = ResourceStore::new();
    store.update_collection(ResourceKind::Service, vec![]);
    let doc = eval_services(&store);
    let lines = doc.all_lines();

    assert_eq!(lines[0].text(), "Services (0)");
    assert_eq!(lines[1].text(), "None.");
    assert!(lines[1].has_style(StyleTag::Dimmed));
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_items_render_in_input_order_with_ages() {
    let mut store = ResourceStore::new();
    store.update_collection(
        ResourceKind::Service,
        vec![
            service("svc-b", "2024-03-01T00:00:00Z"),
            service("svc-a", "2024-04-05T00:00:00Z"),
        ],
    );
    store.set_reference_clock(Utc.with_ymd_and_hms(2024, 4, 6, 0, 0, 0).unwrap());

    let doc = eval_services(&store);
    assert_eq!(doc.section_collapsed("services/default/svc-b"), Some(false));

    let summaries: Vec<String> = doc
        .all_lines()
        .iter()
        .filter(|l| l.nav.is_some())
        .map(|l| l.text())
        .collect();
    // Input order preserved, no sorting
    assert_eq!(summaries.len(), 2);
    assert!(summaries[0].starts_with("svc-b"));
    assert!(summaries[1].starts_with("svc-a"));
    // Ages computed against the pinned reference clock
    assert!(summaries[0].ends_with("36d"));
    assert!(summaries[1].ends_with("1d"));
}

#[test]
fn test_long_names_are_ellipsized() {
    let long_name = "a-service-with-an-uncomfortably-long-name";
    let mut store = ResourceStore::new();
    store.update_collection(
        ResourceKind::Service,
        vec![service(long_name, "2024-03-01T00:00:00Z")],
    );

    let doc = eval_services(&store);
    let summary = doc
        .all_lines()
        .iter()
        .find(|l| l.nav.is_some())
        .map(|l| l.text())
        .unwrap();
    assert!(summary.starts_with("a-service-with-an-uncomfortab…"));
    assert!(!summary.contains(long_name));
}

#[test]
fn test_summary_lines_carry_nav_and_copy_metadata() {
    let mut store = ResourceStore::new();
    store.update_collection(
        ResourceKind::Service,
        vec![service("svc-a", "2024-03-01T00:00:00Z")],
    );

    let doc = eval_services(&store);
    let lines = doc.all_lines();
    let summary = lines.iter().find(|l| l.nav.is_some()).unwrap();
    let nav = summary.nav.as_ref().unwrap();
    assert_eq!(nav.kind, ResourceKind::Service);
    assert_eq!(nav.namespace, "default");
    assert_eq!(nav.name, "svc-a");
    assert_eq!(summary.copy.as_deref(), Some("svc-a"));
}

#[test]
fn test_marked_and_pending_styling() {
    let mut store = ResourceStore::new();
    store.update_collection(
        ResourceKind::Service,
        vec![
            service("svc-a", "2024-03-01T00:00:00Z"),
            service("svc-b", "2024-03-01T00:00:00Z"),
        ],
    );
    store.mark(ResourceKind::Service, "default", "svc-a");
    store.mark(ResourceKind::Service, "default", "svc-b");
    store.begin_delete(ResourceKind::Service, "default", "svc-b");

    let doc = eval_services(&store);
    let lines = doc.all_lines();
    let summary_of = |name: &str| {
        lines
            .iter()
            .find(|l| l.nav.as_ref().is_some_and(|n| n.name == name))
            .copied()
            .unwrap()
    };

    assert!(summary_of("svc-a").has_style(StyleTag::Marked));
    assert!(!summary_of("svc-a").has_style(StyleTag::PendingDeletion));
    assert!(summary_of("svc-b").has_style(StyleTag::PendingDeletion));
    assert!(!summary_of("svc-b").has_style(StyleTag::Marked));

    // The mark tag lands after the dimmed column styling, so it wins the
    // foreground in the theme
    let age_span = summary_of("svc-a").spans.last().unwrap();
    assert_eq!(age_span.styles, vec![StyleTag::Dimmed, StyleTag::Marked]);
}

#[test]
fn test_marking_one_namespace_leaves_the_other_plain() {
    let mut store = ResourceStore::new();
    let in_ns = |ns: &str| {
        ResourceItem::from_json(
            ResourceKind::Service,
            json!({
                "metadata": {"name": "app", "namespace": ns, "creationTimestamp": "2024-03-01T00:00:00Z"},
                "spec": {"clusterIP": "10.0.0.7"}
            }),
        )
    };
    store.update_collection(ResourceKind::Service, vec![in_ns("staging"), in_ns("prod")]);
    store.mark(ResourceKind::Service, "staging", "app");

    let doc = eval_services(&store);
    let lines = doc.all_lines();
    let summary_of = |ns: &str| {
        lines
            .iter()
            .find(|l| l.nav.as_ref().is_some_and(|n| n.namespace == ns))
            .copied()
            .unwrap()
    };

    assert!(summary_of("staging").has_style(StyleTag::Marked));
    assert!(!summary_of("prod").has_style(StyleTag::Marked));
}

#[test]
fn test_succeeded_pods_hidden_by_default() {
    let mut store = ResourceStore::new();
    store.update_collection(
        ResourceKind::Pod,
        vec![pod("worker-1", "Running"), pod("job-done", "Succeeded")],
    );

    let doc = eval_pods(&store, false);
    let lines = doc.all_lines();
    assert_eq!(lines[0].text(), "Pods (1)");
    assert!(!lines.iter().any(|l| l.text().starts_with("job-done")));

    // Failed pods are not special-cased
    store.update_collection(
        ResourceKind::Pod,
        vec![pod("worker-1", "Running"), pod("crashed", "Failed")],
    );
    let doc = eval_pods(&store, false);
    assert_eq!(doc.all_lines()[0].text(), "Pods (2)");
}

#[test]
fn test_show_completed_includes_succeeded_pods() {
    let mut store = ResourceStore::new();
    store.update_collection(
        ResourceKind::Pod,
        vec![pod("worker-1", "Running"), pod("job-done", "Succeeded")],
    );

    let doc = eval_pods(&store, true);
    let lines = doc.all_lines();
    assert_eq!(lines[0].text(), "Pods (2)");
    assert!(lines.iter().any(|l| l.text().starts_with("job-done")));
}

#[test]
fn test_update_collection_is_render_idempotent() {
    let items = || {
        vec![
            service("svc-a", "2024-03-01T00:00:00Z"),
            service("svc-b", "2024-03-02T00:00:00Z"),
        ]
    };
    let clock = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    let states = SectionStates::new();

    let mut store = ResourceStore::new();
    store.update_collection(ResourceKind::Service, items());
    store.set_reference_clock(clock);
    let once = Evaluator::new(&states)
        .eval(&render_document(&store, false))
        .unwrap();

    store.update_collection(ResourceKind::Service, items());
    store.set_reference_clock(clock);
    let twice = Evaluator::new(&states)
        .eval(&render_document(&store, false))
        .unwrap();

    let render = |doc: &Document| -> Vec<String> {
        doc.all_lines().iter().map(|l| l.rendered()).collect()
    };
    assert_eq!(render(&once), render(&twice));
}
