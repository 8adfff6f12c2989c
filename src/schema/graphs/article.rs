//! `Article` and its subtypes.

use serde_json::{Value, json};

use super::person::{person_id, subject_user};
use super::{id_ref, image, into_node, publisher, website_id};
use crate::context::Subject;
use crate::request::Request;
use crate::schema::Node;
use crate::utils::{date, html::unescape_html};

/// Base article node for the queried post, typed as `name`.
pub fn build(req: &Request<'_>, name: &str) -> Option<Node> {
    let Some(Subject::Post(post)) = req.subject() else {
        return None;
    };
    let content = req.content;
    let permalink = req.links().post(post);

    let section = req
        .config
        .breadcrumb
        .main_taxonomy(&post.post_type)
        .map(|tax| content.post_terms(post, tax))
        .unwrap_or_default()
        .iter()
        .map(|term| term.name.clone())
        .collect::<Vec<_>>();
    let keywords = content
        .post_terms(post, "post_tag")
        .iter()
        .map(|term| term.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let author = subject_user(req).map_or(Value::Null, |user| {
        json!({
            "@type": "Person",
            "@id": person_id(req, user),
            "name": user.display_name,
            "url": req.links().author(user),
        })
    });
    let modified = if post.modified.is_empty() { &post.date } else { &post.modified };

    into_node(json!({
        "@type": name,
        "@id": format!("{permalink}#article"),
        "headline": post.title,
        "description": unescape_html(&req.generator().description()),
        "url": &permalink,
        "datePublished": date::to_iso8601(&post.date),
        "dateModified": date::to_iso8601(modified),
        "author": author,
        "publisher": publisher(req),
        "isPartOf": id_ref(website_id(req)),
        "mainEntityOfPage": permalink,
        "image": post.thumbnail.as_deref().map_or(Value::Null, image),
        "articleSection": section,
        "keywords": keywords,
        "inLanguage": req.config.base.language,
    }))
}

/// `NewsArticle`: an article with its dateline.
pub fn news(req: &Request<'_>, name: &str) -> Option<Node> {
    let mut node = build(req, name)?;
    if let Some(Subject::Post(post)) = req.subject()
        && let Some(dateline) = post.meta("dateline")
    {
        node.insert("dateline".into(), dateline.into());
    }
    Some(node)
}
