use serde_json::{Value, json};

use super::{image, into_node, organization_id};
use crate::request::Request;
use crate::schema::Node;

/// The configured publisher; `None` without `[schema.organization]`.
pub fn build(req: &Request<'_>, _name: &str) -> Option<Node> {
    let org = req.config.schema.organization.as_ref()?;

    into_node(json!({
        "@type": org.kind,
        "@id": organization_id(req),
        "name": org.name,
        "url": req.home_url(),
        "logo": org.logo.as_deref().map_or(Value::Null, image),
        "sameAs": org.same_as,
    }))
}
