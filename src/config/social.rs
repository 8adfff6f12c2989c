//! `[social]`, `[robots]`, `[verification]` and `[redirects]` sections.
//!
//! Everything the head presenter needs besides titles and schema.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[social]` section - Open Graph and Twitter Card output.
///
/// # Example
/// ```toml
/// [social]
/// twitter_site = "@acme"
/// default_image = "https://acme.test/share.png"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SocialConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub open_graph: bool,

    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub twitter: bool,

    #[serde(default = "defaults::social::twitter_card")]
    #[educe(Default = defaults::social::twitter_card())]
    pub twitter_card: String,

    #[serde(default)]
    pub twitter_site: Option<String>,

    #[serde(default)]
    pub facebook_app_id: Option<String>,

    /// Image used when the page has none of its own.
    #[serde(default)]
    pub default_image: Option<String>,
}

/// `[robots]` section - global indexing policy.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RobotsConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub noindex_search: bool,

    /// Noindex page 2+ of every archive.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub noindex_paged: bool,

    /// Add `max-image-preview:large` to indexable pages.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub max_image_preview: bool,
}

/// `[verification]` section - webmaster tool codes, emitted on the homepage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerificationConfig {
    pub google: Option<String>,
    pub bing: Option<String>,
    pub yandex: Option<String>,
    pub pinterest: Option<String>,
    pub baidu: Option<String>,
}

impl VerificationConfig {
    /// `(meta name, code)` pairs in output order.
    pub fn codes(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("google-site-verification", self.google.as_deref()),
            ("msvalidate.01", self.bing.as_deref()),
            ("yandex-verification", self.yandex.as_deref()),
            ("p:domain_verify", self.pinterest.as_deref()),
            ("baidu-site-verification", self.baidu.as_deref()),
        ]
    }
}

/// `[redirects]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RedirectsConfig {
    /// Send attachment pages to their parent item.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub attachments_to_parent: bool,

    /// Status used when a redirect does not name one.
    #[serde(default = "defaults::redirects::status")]
    #[educe(Default = defaults::redirects::status())]
    pub status: u16,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_social_defaults() {
        let config = SiteConfig::default();
        assert!(config.social.open_graph);
        assert!(config.social.twitter);
        assert_eq!(config.social.twitter_card, "summary_large_image");
        assert!(config.robots.noindex_search);
        assert!(!config.robots.noindex_paged);
        assert_eq!(config.redirects.status, 301);
    }

    #[test]
    fn test_verification_codes_order() {
        let config: SiteConfig = toml::from_str(
            r#"
            [verification]
            google = "g-123"
            baidu = "b-456"
        "#,
        )
        .unwrap();

        let codes = config.verification.codes();
        assert_eq!(codes[0], ("google-site-verification", Some("g-123")));
        assert_eq!(codes[1], ("msvalidate.01", None));
        assert_eq!(codes[4], ("baidu-site-verification", Some("b-456")));
    }
}
