//! `WebPage` and the page types built on it.

use serde_json::{Value, json};

use super::{breadcrumb_id, id_ref, image, into_node, organization_id, webpage_id, website_id};
use crate::context::Subject;
use crate::request::Request;
use crate::schema::Node;
use crate::utils::{date, html::unescape_html};

/// Base page node, typed as `name`.
pub fn build(req: &Request<'_>, name: &str) -> Option<Node> {
    let generator = req.generator();
    let url = req.current_url();

    let mut node = into_node(json!({
        "@type": name,
        "@id": webpage_id(req),
        "url": url,
        "name": unescape_html(&generator.title()),
        "description": unescape_html(&generator.description()),
        "isPartOf": id_ref(website_id(req)),
        "inLanguage": req.config.base.language,
        "breadcrumb": id_ref(breadcrumb_id(req)),
    }))?;

    if let Some(Subject::Post(post)) = req.subject() {
        if let Some(published) = date::to_iso8601(&post.date) {
            node.insert("datePublished".into(), published.into());
        }
        if let Some(modified) = date::to_iso8601(&post.modified) {
            node.insert("dateModified".into(), modified.into());
        }
        if let Some(thumbnail) = &post.thumbnail {
            node.insert("primaryImageOfPage".into(), image(thumbnail));
        }
    }

    if req.page.front_page && req.config.schema.organization.is_some() {
        node.insert("about".into(), id_ref(organization_id(req)));
    }
    Some(node)
}

/// `CollectionPage`: the page plus the listed items.
pub fn collection(req: &Request<'_>, name: &str) -> Option<Node> {
    let mut node = build(req, name)?;
    let links = req.links();

    let items: Vec<Value> = req
        .page
        .listed
        .iter()
        .filter_map(|id| req.content.post(*id))
        .enumerate()
        .map(|(index, post)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "url": links.post(post),
                "name": post.title,
            })
        })
        .collect();

    if !items.is_empty() {
        node.insert(
            "mainEntity".into(),
            json!({ "@type": "ItemList", "itemListElement": items }),
        );
    }
    Some(node)
}

/// `ProfilePage`: the page about its person.
pub fn profile(req: &Request<'_>, name: &str) -> Option<Node> {
    let mut node = build(req, name)?;
    if let Some(person) = super::person::subject_user(req) {
        node.insert("mainEntity".into(), id_ref(super::person::person_id(req, person)));
    }
    Some(node)
}

/// `SearchResultsPage`: no dates on a results page.
pub fn search_results(req: &Request<'_>, name: &str) -> Option<Node> {
    let mut node = build(req, name)?;
    node.remove("datePublished");
    node.remove("dateModified");
    Some(node)
}

/// `RealEstateListing` and friends: a collection with a posting date.
pub fn listing(req: &Request<'_>, name: &str) -> Option<Node> {
    let mut node = collection(req, name)?;
    if let Some(Subject::Post(post)) = req.subject()
        && let Some(published) = date::to_iso8601(&post.date)
    {
        node.insert("datePosted".into(), published.into());
    }
    Some(node)
}
