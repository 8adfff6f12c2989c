use serde_json::{Value, json};

use super::{into_node, publisher, website_id};
use crate::request::Request;
use crate::schema::Node;

pub fn build(req: &Request<'_>, _name: &str) -> Option<Node> {
    let base = &req.config.base;
    let home = req.home_url();

    let search = if req.config.schema.search_action {
        json!({
            "@type": "SearchAction",
            "target": format!("{home}?s={{search_term_string}}"),
            "query-input": "required name=search_term_string",
        })
    } else {
        Value::Null
    };

    into_node(json!({
        "@type": "WebSite",
        "@id": website_id(req),
        "url": home,
        "name": base.title,
        "description": base.description,
        "inLanguage": base.language,
        "publisher": publisher(req),
        "potentialAction": search,
    }))
}
