//! `[base]` and `[reading]` section configuration.
//!
//! Contains basic site information like name, url, separator, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in pagemeta.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Field Notes"
/// description = "Notes from the field"
/// url = "https://notes.test"
/// separator = "|"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site name, the `%%sitename%%` macro.
    #[serde(default)]
    pub title: String,

    /// Site tagline, the `%%sitedesc%%` macro.
    #[serde(default)]
    pub description: String,

    /// Home url. Every generated absolute url starts with it.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: String,

    /// BCP 47 language code (e.g., "en-US"), the `%%language%%` macro.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Open Graph locale (e.g., "en_US").
    #[serde(default = "defaults::base::locale")]
    #[educe(Default = defaults::base::locale())]
    pub locale: String,

    /// Title separator, the `%%sep%%` macro.
    #[serde(default = "defaults::base::separator")]
    #[educe(Default = defaults::base::separator())]
    pub separator: String,

    /// `chrono` format string for the `%%date%%` family of macros.
    #[serde(default = "defaults::base::date_format")]
    #[educe(Default = defaults::base::date_format())]
    pub date_format: String,

    /// Maximum length (in chars) of generated excerpts.
    #[serde(default = "defaults::base::excerpt_length")]
    #[educe(Default = defaults::base::excerpt_length())]
    pub excerpt_length: usize,
}

impl BaseConfig {
    /// Home url, always with a trailing slash.
    pub fn home_url(&self) -> String {
        let url = self.url.trim();
        if url.ends_with('/') {
            url.to_owned()
        } else {
            format!("{url}/")
        }
    }
}

/// `[reading]` section - how the front of the site is laid out.
///
/// # Example
/// ```toml
/// [reading]
/// front_page = 12   # static page shown on the front page
/// posts_page = 34   # page that lists the latest posts
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ReadingConfig {
    /// Id of the static page shown on the front page, if any.
    #[serde(default)]
    pub front_page: Option<u64>,

    /// Id of the page listing the latest posts, if any.
    #[serde(default)]
    pub posts_page: Option<u64>,

    /// Number of posts listed per archive page.
    #[serde(default = "defaults::reading::posts_per_page")]
    #[educe(Default = defaults::reading::posts_per_page())]
    pub posts_per_page: u32,
}

impl ReadingConfig {
    /// Whether the front page shows a static page rather than the posts list.
    pub const fn has_static_front(&self) -> bool {
        self.front_page.is_some()
    }
}
