//! Built-in node builders.
//!
//! Base builders return plain maps; specialized types patch them:
//!
//! ```text
//! webpage::build ──► CollectionPage, SearchResultsPage, ProfilePage, ...
//!        └──► collection ──► RealEstateListing
//! article::build ──► BlogPosting, NewsArticle, TechArticle, ...
//! ```

pub mod article;
pub mod breadcrumb;
pub mod organization;
pub mod person;
pub mod webpage;
pub mod website;

use serde_json::{Value, json};

use super::Node;
use crate::request::Request;

/// `{"@id": id}`.
pub fn id_ref(id: impl Into<String>) -> Value {
    json!({ "@id": id.into() })
}

pub fn image(url: &str) -> Value {
    json!({ "@type": "ImageObject", "url": url })
}

/// Unwrap a `json!` object literal.
pub fn into_node(value: Value) -> Option<Node> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

pub fn website_id(req: &Request<'_>) -> String {
    format!("{}#website", req.home_url())
}

pub fn organization_id(req: &Request<'_>) -> String {
    format!("{}#organization", req.home_url())
}

pub fn webpage_id(req: &Request<'_>) -> String {
    format!("{}#webpage", req.current_url())
}

pub fn breadcrumb_id(req: &Request<'_>) -> String {
    format!("{}#breadcrumb", req.current_url())
}

/// The organization reference, when one is configured.
pub fn publisher(req: &Request<'_>) -> Value {
    match &req.config.schema.organization {
        Some(_) => id_ref(organization_id(req)),
        None => Value::Null,
    }
}
