//! Site configuration management for `pagemeta.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                          |
//! |------------------|--------------------------------------------------|
//! | `[base]`         | Site name, tagline, url, separator, language     |
//! | `[reading]`      | Static front page / posts page                   |
//! | `[titles]`       | Per page-type title/description templates        |
//! | `[breadcrumb]`   | Breadcrumb mode, labels, flexible formats        |
//! | `[schema]`       | Structured data graph settings                   |
//! | `[social]`       | Open Graph and Twitter Card                      |
//! | `[robots]`       | Indexing policy                                  |
//! | `[verification]` | Webmaster verification codes                     |
//! | `[redirects]`    | Redirect policy                                  |
//! | `[extra]`        | User-defined values, reachable with [`SiteConfig::get`] |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Field Notes"
//! description = "Notes from the field"
//! url = "https://notes.test"
//!
//! [titles.post_types.post]
//! description = "%%excerpt%%"
//!
//! [breadcrumb]
//! separator = "/"
//!
//! [extra]
//! plausible_domain = "notes.test"
//! ```

mod base;
mod breadcrumb;
pub mod defaults;
mod error;
mod schema;
mod social;
mod titles;

pub use base::{BaseConfig, ReadingConfig};
pub use breadcrumb::{BreadcrumbConfig, BreadcrumbMode};
pub use error::ConfigError;
pub use schema::{OrganizationConfig, SchemaConfig};
pub use social::{RedirectsConfig, RobotsConfig, SocialConfig, VerificationConfig};
pub use titles::{TitleTemplate, TitlesConfig};

use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Redirect statuses a redirect decision may carry.
pub const REDIRECT_STATUSES: [u16; 3] = [301, 302, 307];

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing pagemeta.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub reading: ReadingConfig,

    #[serde(default)]
    pub titles: TitlesConfig,

    #[serde(default)]
    pub breadcrumb: BreadcrumbConfig,

    #[serde(default)]
    pub schema: SchemaConfig,

    #[serde(default)]
    pub social: SocialConfig,

    #[serde(default)]
    pub robots: RobotsConfig,

    #[serde(default)]
    pub verification: VerificationConfig,

    #[serde(default)]
    pub redirects: RedirectsConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(config)
    }

    /// Look a value up by dotted path (`"breadcrumb.separator"`,
    /// `"extra.social.twitter"`), falling back to `default` when absent.
    ///
    /// The typed sections are the primary interface; this is the generic
    /// accessor for values that have no typed field, and for hosts that
    /// address settings by path.
    pub fn get(&self, path: &str, default: toml::Value) -> toml::Value {
        let Ok(tree) = toml::Value::try_from(self) else {
            return default;
        };

        let mut current = &tree;
        for key in path.split('.').filter(|k| !k.is_empty()) {
            match current.get(key) {
                Some(next) => current = next,
                None => return default,
            }
        }
        current.clone()
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into(),
            ));
        }

        if self.base.separator.trim().is_empty() {
            return Err(ConfigError::Validation(
                "[base.separator] must not be empty".into(),
            ));
        }

        if !REDIRECT_STATUSES.contains(&self.redirects.status) {
            return Err(ConfigError::Validation(format!(
                "[redirects.status] must be one of {REDIRECT_STATUSES:?}"
            )));
        }

        if let Some(org) = &self.schema.organization
            && org.name.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "[schema.organization.name] must not be empty".into(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
