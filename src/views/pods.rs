//! Pod listing renderer
//!
//! Pods in phase `Succeeded` are hidden unless `show_completed` is set; the
//! displayed count reflects only the visible subset. Other terminal phases
//! (`Failed` in particular) always render.

use crate::models::{ItemDetail, ResourceItem, ResourceKind};
use crate::render::{
    ellipsize, indent, key_value, line, section, Node, StyleTag, StyledText,
};
use crate::views::{
    item_age, item_created, item_summary, listing, KindSnapshot, DETAIL_LABEL_WIDTH,
};

/// Fixed width of the pod name column
pub const POD_NAME_WIDTH: usize = 45;

/// Render the pods section of the document
pub fn render_pods(snap: &KindSnapshot, show_completed: bool) -> Node {
    let header = format!(
        "{} {:>5} {:>11} {:>8} {:>6}",
        ellipsize("NAME", POD_NAME_WIDTH),
        "READY",
        "STATUS",
        "RESTARTS",
        "AGE"
    );
    let items = snap.collection.map(|items| {
        items
            .iter()
            .filter(|item| show_completed || item.pod_phase() != Some("Succeeded"))
            .collect()
    });
    listing(ResourceKind::Pod, header, items, |item| {
        pod_entry(item, snap)
    })
}

fn pod_entry(item: &ResourceItem, snap: &KindSnapshot) -> Node {
    let (phase, ready, restarts) = match &item.detail {
        ItemDetail::Pod {
            phase,
            ready_containers,
            total_containers,
            restarts,
        } => (
            phase.clone().unwrap_or_else(|| "-".to_string()),
            format!("{}/{}", ready_containers, total_containers),
            restarts.to_string(),
        ),
        _ => ("-".to_string(), "0/0".to_string(), "0".to_string()),
    };

    let summary = line(
        StyledText::new()
            .push(ellipsize(&item.name, POD_NAME_WIDTH))
            .push_styled(format!(" {:>5}", ready), vec![StyleTag::Dimmed])
            .push_styled(format!(" {:>11}", phase), vec![StyleTag::Dimmed])
            .push_styled(format!(" {:>8}", restarts), vec![StyleTag::Dimmed])
            .push_styled(format!(" {:>6}", item_age(item, snap)), vec![StyleTag::Dimmed]),
    );

    section(
        format!("pods/{}", item.qualified_name()),
        vec![
            item_summary(ResourceKind::Pod, item, snap, summary),
            indent(vec![
                key_value(DETAIL_LABEL_WIDTH, "Namespace", &item.namespace),
                key_value(DETAIL_LABEL_WIDTH, "Created", item_created(item)),
                key_value(DETAIL_LABEL_WIDTH, "Phase", phase),
                key_value(DETAIL_LABEL_WIDTH, "Ready", ready),
                key_value(DETAIL_LABEL_WIDTH, "Restarts", restarts),
            ]),
        ],
    )
}
