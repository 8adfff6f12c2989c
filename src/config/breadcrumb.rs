//! `[breadcrumb]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How the breadcrumb trail is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreadcrumbMode {
    /// Built-in trail per page type (default).
    #[default]
    Fixed,
    /// Per page-type format strings, see [`BreadcrumbConfig::formats`].
    Flexible,
}

/// `[breadcrumb]` section in pagemeta.toml.
///
/// # Example
/// ```toml
/// [breadcrumb]
/// mode = "flexible"
/// separator = "/"
/// highlight_last = true
///
/// [breadcrumb.formats]
/// post = "%%home%% >> %%category%% >> %%title%%"
/// tax_genre = "%%home%% >> [Genres](/genres/) >> %%queried_object%%"
///
/// [breadcrumb.main_taxonomies]
/// book = "genre"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BreadcrumbConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    #[serde(default = "defaults::breadcrumb::mode")]
    #[educe(Default = defaults::breadcrumb::mode())]
    pub mode: BreadcrumbMode,

    /// Markup placed between two crumbs (trusted HTML).
    #[serde(default = "defaults::breadcrumb::separator")]
    #[educe(Default = defaults::breadcrumb::separator())]
    pub separator: String,

    #[serde(default = "defaults::breadcrumb::home_label")]
    #[educe(Default = defaults::breadcrumb::home_label())]
    pub home_label: String,

    /// Emit the posts-page crumb when the site has a static posts page.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub show_blog: bool,

    /// Emit the post-type archive crumb on single items of custom types.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub show_post_type_archive: bool,

    /// Render the last crumb as plain text instead of a link.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub highlight_last: bool,

    /// Append a "Page N" crumb on paginated requests.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub show_paged: bool,

    #[serde(default = "defaults::breadcrumb::search_prefix")]
    #[educe(Default = defaults::breadcrumb::search_prefix())]
    pub search_prefix: String,

    #[serde(default = "defaults::breadcrumb::author_prefix")]
    #[educe(Default = defaults::breadcrumb::author_prefix())]
    pub author_prefix: String,

    /// Text placed before an archive crumb (post type, term, date).
    #[serde(default)]
    pub archive_prefix: String,

    #[serde(default = "defaults::breadcrumb::not_found")]
    #[educe(Default = defaults::breadcrumb::not_found())]
    pub not_found: String,

    #[serde(default = "defaults::breadcrumb::page_prefix")]
    #[educe(Default = defaults::breadcrumb::page_prefix())]
    pub page_prefix: String,

    #[serde(default = "defaults::breadcrumb::wrapper_class")]
    #[educe(Default = defaults::breadcrumb::wrapper_class())]
    pub wrapper_class: String,

    /// Taxonomy whose terms build the trail of a single item, keyed by post
    /// type. `post` falls back to `category`.
    #[serde(default)]
    pub main_taxonomies: BTreeMap<String, String>,

    /// Flexible-mode format strings, keyed by format key
    /// (see `PageContext::format_key`).
    #[serde(default)]
    pub formats: BTreeMap<String, String>,
}

impl BreadcrumbConfig {
    /// Main taxonomy for a post type.
    pub fn main_taxonomy(&self, post_type: &str) -> Option<&str> {
        match self.main_taxonomies.get(post_type) {
            Some(taxonomy) if taxonomy.is_empty() => None,
            Some(taxonomy) => Some(taxonomy),
            None if post_type == "post" => Some("category"),
            None => None,
        }
    }

    /// Prefix an archive label with `archive_prefix`, if any.
    pub fn archive_label(&self, label: &str) -> String {
        if self.archive_prefix.is_empty() {
            label.to_owned()
        } else {
            format!("{} {label}", self.archive_prefix)
        }
    }
}
