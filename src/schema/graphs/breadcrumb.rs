use serde_json::{Value, json};

use super::{breadcrumb_id, into_node};
use crate::request::Request;
use crate::schema::Node;

/// `BreadcrumbList` from the request's exported trail; `None` when the
/// trail is empty.
pub fn build(req: &Request<'_>, _name: &str) -> Option<Node> {
    let crumbs = req.breadcrumb().export();
    if crumbs.is_empty() {
        return None;
    }

    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(index, crumb)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": crumb.text,
                "item": crumb.url,
            })
        })
        .collect();

    into_node(json!({
        "@type": "BreadcrumbList",
        "@id": breadcrumb_id(req),
        "itemListElement": items,
    }))
}
