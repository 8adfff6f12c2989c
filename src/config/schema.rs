//! `[schema]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `[schema.organization]` - the entity that publishes the site.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OrganizationConfig {
    pub name: String,

    /// `Organization` or any subtype (e.g. `NewsMediaOrganization`).
    #[serde(default = "defaults::schema::organization_kind")]
    #[educe(Default = defaults::schema::organization_kind())]
    pub kind: String,

    #[serde(default)]
    pub logo: Option<String>,

    /// Social profiles, exported as `sameAs`.
    #[serde(default)]
    pub same_as: Vec<String>,
}

/// `[schema]` section in pagemeta.toml.
///
/// # Example
/// ```toml
/// [schema]
/// enable = true
/// debug = false
///
/// [schema.organization]
/// name = "Acme"
/// logo = "https://acme.test/logo.png"
///
/// [schema.post_types]
/// post = "BlogPosting"
/// listing = "RealEstateListing"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Pretty-print the JSON-LD document.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub debug: bool,

    /// Add a `SearchAction` to the `WebSite` node.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub search_action: bool,

    #[serde(default)]
    pub organization: Option<OrganizationConfig>,

    /// Default graph type per post type.
    #[serde(default)]
    pub post_types: BTreeMap<String, String>,

    /// Post types whose archives are product-style listings.
    #[serde(default = "defaults::schema::listing_post_types")]
    #[educe(Default = defaults::schema::listing_post_types())]
    pub listing_post_types: Vec<String>,
}

impl SchemaConfig {
    pub fn post_type_graph(&self, post_type: &str) -> Option<&str> {
        self.post_types
            .get(post_type)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn is_listing(&self, post_type: &str) -> bool {
        self.listing_post_types.iter().any(|t| t == post_type)
    }
}
