//! Content entities handed to the generators.
//!
//! These are plain snapshots of what the host's content layer knows about a
//! post, term, user, post type or taxonomy. Zero ids mean "none" for parents
//! and authors, matching how fixtures are usually written.

use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Post-like entity: posts, pages, attachments and custom types.
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct Post {
    pub id: u64,

    #[educe(Default = "post".to_string())]
    pub post_type: String,

    pub title: String,

    /// Derived from the title when empty.
    pub slug: String,

    /// Absolute url. Computed from the slug path when empty.
    pub permalink: String,

    pub parent: u64,

    pub author: u64,

    /// Publication date, `YYYY-MM-DD[THH:MM:SS]`.
    pub date: String,

    pub modified: String,

    pub excerpt: String,

    pub content: String,

    /// Featured image url.
    pub thumbnail: Option<String>,

    /// Assigned term ids, keyed by taxonomy.
    pub terms: BTreeMap<String, Vec<u64>>,

    pub meta: BTreeMap<String, String>,
}

/// Taxonomy term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Term {
    pub id: u64,
    pub taxonomy: String,
    pub name: String,
    pub slug: String,
    pub parent: u64,
    pub description: String,
    pub count: u64,
    pub meta: BTreeMap<String, String>,
}

/// Author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct User {
    pub id: u64,
    pub display_name: String,
    /// Url slug. Derived from the display name when empty.
    pub nicename: String,
    pub description: String,
    pub avatar: Option<String>,
    pub url: Option<String>,
    pub same_as: Vec<String>,
    pub meta: BTreeMap<String, String>,
}

/// Post type descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostType {
    pub name: String,
    pub label: String,
    pub description: String,
    pub hierarchical: bool,
    pub has_archive: bool,
    /// Archive url. Computed from the rewrite slug when empty.
    pub archive_url: Option<String>,
    pub rewrite_slug: Option<String>,
}

/// Taxonomy descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Taxonomy {
    pub name: String,
    pub label: String,
    pub hierarchical: bool,
    pub rewrite_slug: Option<String>,
    /// Post types the taxonomy is attached to.
    pub object_types: Vec<String>,
}

/// Look up a non-empty meta value.
fn non_empty<'a>(meta: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    meta.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl Post {
    pub fn meta(&self, key: &str) -> Option<&str> {
        non_empty(&self.meta, key)
    }

    pub const fn parent_id(&self) -> Option<u64> {
        if self.parent == 0 { None } else { Some(self.parent) }
    }

    pub const fn author_id(&self) -> Option<u64> {
        if self.author == 0 { None } else { Some(self.author) }
    }

    pub fn term_ids(&self, taxonomy: &str) -> &[u64] {
        self.terms.get(taxonomy).map_or(&[], Vec::as_slice)
    }

    /// Direct property lookup by name, used by the `%%name%%` fallback.
    pub fn property(&self, name: &str) -> Option<String> {
        let value = match name {
            "id" | "ID" => self.id.to_string(),
            "post_type" => self.post_type.clone(),
            "post_title" | "name" => self.title.clone(),
            "slug" | "post_name" => self.slug.clone(),
            "permalink" | "url" => self.permalink.clone(),
            "post_excerpt" => self.excerpt.clone(),
            "post_content" | "content" => self.content.clone(),
            "post_date" => self.date.clone(),
            "post_modified" => self.modified.clone(),
            "description" => self.excerpt.clone(),
            _ => return None,
        };
        Some(value)
    }
}

impl Term {
    pub fn meta(&self, key: &str) -> Option<&str> {
        non_empty(&self.meta, key)
    }

    pub const fn parent_id(&self) -> Option<u64> {
        if self.parent == 0 { None } else { Some(self.parent) }
    }

    pub fn property(&self, name: &str) -> Option<String> {
        let value = match name {
            "id" | "term_id" => self.id.to_string(),
            "name" | "title" => self.name.clone(),
            "slug" => self.slug.clone(),
            "taxonomy" => self.taxonomy.clone(),
            "description" => self.description.clone(),
            "count" => self.count.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

impl User {
    pub fn meta(&self, key: &str) -> Option<&str> {
        non_empty(&self.meta, key)
    }

    pub fn property(&self, name: &str) -> Option<String> {
        let value = match name {
            "id" | "ID" => self.id.to_string(),
            "display_name" | "name" => self.display_name.clone(),
            "nicename" | "user_nicename" => self.nicename.clone(),
            "description" => self.description.clone(),
            "user_url" | "url" => self.url.clone()?,
            _ => return None,
        };
        Some(value)
    }
}

impl PostType {
    pub fn property(&self, name: &str) -> Option<String> {
        let value = match name {
            "name" => self.name.clone(),
            "label" | "title" => self.label.clone(),
            "description" => self.description.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Rewrite base of the archive, the post type name when unset.
    pub fn base(&self) -> &str {
        self.rewrite_slug.as_deref().unwrap_or(&self.name)
    }
}

impl Taxonomy {
    pub fn applies_to(&self, post_type: &str) -> bool {
        self.object_types.iter().any(|t| t == post_type)
    }

    /// Rewrite base of term urls, the taxonomy name when unset.
    pub fn base(&self) -> &str {
        self.rewrite_slug.as_deref().unwrap_or(&self.name)
    }
}
