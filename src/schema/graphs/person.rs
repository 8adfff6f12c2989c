use serde_json::{Value, json};

use super::{image, into_node};
use crate::context::Subject;
use crate::data::User;
use crate::request::Request;
use crate::schema::Node;

/// The archive's user, or the author of the queried post.
pub fn subject_user<'a>(req: &Request<'a>) -> Option<&'a User> {
    match req.subject()? {
        Subject::User(user) => Some(user),
        Subject::Post(post) => req.content.user(post.author_id()?),
        _ => None,
    }
}

pub fn person_id(req: &Request<'_>, user: &User) -> String {
    format!("{}#person", req.links().author(user))
}

pub fn build(req: &Request<'_>, _name: &str) -> Option<Node> {
    let user = subject_user(req)?;
    let url = req.links().author(user);

    let mut same_as: Vec<&str> = user.url.as_deref().into_iter().collect();
    same_as.extend(user.same_as.iter().map(String::as_str));

    into_node(json!({
        "@type": "Person",
        "@id": person_id(req, user),
        "name": user.display_name,
        "url": url,
        "description": user.description,
        "image": user.avatar.as_deref().map_or(Value::Null, image),
        "sameAs": same_as,
    }))
}
