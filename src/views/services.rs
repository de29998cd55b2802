//! Service listing renderer

use crate::models::{ItemDetail, ResourceItem, ResourceKind};
use crate::render::{
    ellipsize, indent, key_value, line, section, Node, StyleTag, StyledText,
};
use crate::views::{
    item_age, item_created, item_summary, listing, KindSnapshot, DETAIL_LABEL_WIDTH,
};

/// Fixed width of the service name column
pub const SERVICE_NAME_WIDTH: usize = 30;

/// Render the services section of the document
pub fn render_services(snap: &KindSnapshot) -> Node {
    let header = format!(
        "{} {:>15} {:>6}",
        ellipsize("NAME", SERVICE_NAME_WIDTH),
        "CLUSTER-IP",
        "AGE"
    );
    let items = snap.collection.map(|items| items.iter().collect());
    listing(ResourceKind::Service, header, items, |item| {
        service_entry(item, snap)
    })
}

fn service_entry(item: &ResourceItem, snap: &KindSnapshot) -> Node {
    let (cluster_ip, external_ips, ports) = match &item.detail {
        ItemDetail::Service {
            cluster_ip,
            external_ips,
            ports,
        } => (
            cluster_ip.clone().unwrap_or_else(|| "-".to_string()),
            join_or_dash(external_ips),
            join_or_dash(ports),
        ),
        _ => ("-".to_string(), "-".to_string(), "-".to_string()),
    };

    let summary = line(
        StyledText::new()
            .push(ellipsize(&item.name, SERVICE_NAME_WIDTH))
            .push_styled(format!(" {:>15}", cluster_ip), vec![StyleTag::Dimmed])
            .push_styled(format!(" {:>6}", item_age(item, snap)), vec![StyleTag::Dimmed]),
    );

    // Namespace-qualified identity: names alone collide across namespaces
    section(
        format!("services/{}", item.qualified_name()),
        vec![
            item_summary(ResourceKind::Service, item, snap, summary),
            indent(vec![
                key_value(DETAIL_LABEL_WIDTH, "Namespace", &item.namespace),
                key_value(DETAIL_LABEL_WIDTH, "Created", item_created(item)),
                key_value(DETAIL_LABEL_WIDTH, "Cluster IP", &cluster_ip),
                key_value(DETAIL_LABEL_WIDTH, "External IPs", external_ips),
                key_value(DETAIL_LABEL_WIDTH, "Ports", ports),
            ]),
        ],
    )
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
