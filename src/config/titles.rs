//! `[titles]` section configuration.
//!
//! Per page-type templates for the title, description and keywords fields,
//! plus the per page-type robots directives.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Templates for one page type. Unset fields fall back to the strategy
/// defaults (`%%title%%`, `%%description%%`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleTemplate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub noindex: bool,
    pub nofollow: bool,
}

/// `[titles]` section in pagemeta.toml.
///
/// # Example
/// ```toml
/// [titles]
/// trailing_sitename = true
///
/// [titles.home]
/// title = "%%sitename%% %%sep%% %%sitedesc%%"
///
/// [titles.post_types.post]
/// title = "%%title%%"
/// description = "%%excerpt%%"
///
/// [titles.taxonomies.post_tag]
/// noindex = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct TitlesConfig {
    /// Append ` {sep} {sitename}` to every title that does not already end
    /// with the site name.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub trailing_sitename: bool,

    #[serde(default)]
    pub home: TitleTemplate,

    /// Singular content, keyed by post type.
    #[serde(default)]
    pub post_types: BTreeMap<String, TitleTemplate>,

    /// Post-type archives, keyed by post type.
    #[serde(default)]
    pub archives: BTreeMap<String, TitleTemplate>,

    /// Term archives, keyed by taxonomy.
    #[serde(default)]
    pub taxonomies: BTreeMap<String, TitleTemplate>,

    #[serde(default)]
    pub author: TitleTemplate,

    #[serde(default)]
    pub date: TitleTemplate,

    #[serde(default)]
    pub search: TitleTemplate,

    #[serde(default)]
    pub not_found: TitleTemplate,
}

impl TitlesConfig {
    pub fn post_type(&self, name: &str) -> Option<&TitleTemplate> {
        self.post_types.get(name)
    }

    pub fn archive(&self, post_type: &str) -> Option<&TitleTemplate> {
        self.archives.get(post_type)
    }

    pub fn taxonomy(&self, name: &str) -> Option<&TitleTemplate> {
        self.taxonomies.get(name)
    }
}
