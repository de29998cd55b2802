//! Document evaluation tests
//!
//! End-to-end checks that section identity keeps transient view state stable
//! across full document rebuilds.

use kubedoc::models::ResourceKind;
use kubedoc::render::{Evaluator, RenderError, SectionStates};
use kubedoc::state::ResourceStore;
use kubedoc::views::render_document;
use kubedoc::ResourceItem;
use serde_json::json;

fn service_in(namespace: &str, name: &str) -> ResourceItem {
    ResourceItem::from_json(
        ResourceKind::Service,
        json!({
            "metadata": {
                "name": name,
                "namespace": namespace,
                "creationTimestamp": "2024-03-01T00:00:00Z"
            },
            "spec": {"clusterIP": "10.0.0.1"}
        }),
    )
}

fn service(name: &str) -> ResourceItem {
    service_in("default", name)
}

#[test]
fn test_collapse_survives_redraw_with_unchanged_data() {
    let mut store = ResourceStore::new();
    store.update_collection(
        ResourceKind::Service,
        vec![service("svc-a"), service("svc-b")],
    );

    let mut states = SectionStates::new();

    let before = Evaluator::new(&states)
        .eval(&render_document(&store, false))
        .unwrap();
    assert_eq!(
        before.section_collapsed("services/default/svc-a"),
        Some(false)
    );
    let expanded_count = before.visible_lines().len();

    // User collapses svc-a, then the data is refetched unchanged
    states.toggle("services/default/svc-a");
    let after = Evaluator::new(&states)
        .eval(&render_document(&store, false))
        .unwrap();

    assert_eq!(after.section_collapsed("services/default/svc-a"), Some(true));
    assert_eq!(
        after.section_collapsed("services/default/svc-b"),
        Some(false)
    );
    // svc-a's detail lines disappeared, its summary stayed
    assert!(after.visible_lines().len() < expanded_count);
    assert!(after
        .visible_lines()
        .iter()
        .any(|v| v.line.text().starts_with("svc-a")));
}

#[test]
fn test_unknown_sections_default_to_expanded() {
    let mut store = ResourceStore::new();
    store.update_collection(ResourceKind::Service, vec![service("svc-a")]);

    let mut states = SectionStates::new();
    states.toggle("services/default/svc-a");

    // A new resource appears; its section has no recorded state
    store.update_collection(
        ResourceKind::Service,
        vec![service("svc-a"), service("svc-new")],
    );
    let doc = Evaluator::new(&states)
        .eval(&render_document(&store, false))
        .unwrap();
    assert_eq!(doc.section_collapsed("services/default/svc-a"), Some(true));
    assert_eq!(
        doc.section_collapsed("services/default/svc-new"),
        Some(false)
    );
}

#[test]
fn test_same_name_across_namespaces_renders() {
    let mut store = ResourceStore::new();
    // Names are only unique per namespace; an all-namespace listing can
    // legitimately contain both of these
    store.update_collection(
        ResourceKind::Service,
        vec![service_in("staging", "app"), service_in("prod", "app")],
    );

    let states = SectionStates::new();
    let doc = Evaluator::new(&states)
        .eval(&render_document(&store, false))
        .unwrap();
    assert_eq!(doc.section_collapsed("services/staging/app"), Some(false));
    assert_eq!(doc.section_collapsed("services/prod/app"), Some(false));
}

#[test]
fn test_duplicate_items_abort_the_redraw() {
    let mut store = ResourceStore::new();
    // Two items with the same namespace and name produce sibling sections
    // with the same identity - a contract violation, not a degraded document
    store.update_collection(ResourceKind::Service, vec![service("dup"), service("dup")]);

    let states = SectionStates::new();
    let result = Evaluator::new(&states).eval(&render_document(&store, false));
    assert_eq!(
        result.unwrap_err(),
        RenderError::DuplicateSection {
            id: "services/default/dup".to_string()
        }
    );
}

#[test]
fn test_whole_document_has_one_section_per_kind() {
    let store = ResourceStore::new();
    let states = SectionStates::new();
    let doc = Evaluator::new(&states)
        .eval(&render_document(&store, false))
        .unwrap();

    assert_eq!(doc.section_collapsed("services"), Some(false));
    assert_eq!(doc.section_collapsed("pods"), Some(false));
}
