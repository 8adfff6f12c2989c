//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> String {
        "http://localhost/".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }

    pub fn locale() -> String {
        "en_US".into()
    }

    pub fn separator() -> String {
        "-".into()
    }

    pub fn date_format() -> String {
        "%B %-d, %Y".into()
    }

    pub fn excerpt_length() -> usize {
        160
    }
}

// ============================================================================
// [reading] Section Defaults
// ============================================================================

pub mod reading {
    pub fn posts_per_page() -> u32 {
        10
    }
}

// ============================================================================
// [breadcrumb] Section Defaults
// ============================================================================

pub mod breadcrumb {
    use crate::config::BreadcrumbMode;

    pub fn mode() -> BreadcrumbMode {
        BreadcrumbMode::Fixed
    }

    pub fn separator() -> String {
        "&raquo;".into()
    }

    pub fn home_label() -> String {
        "Home".into()
    }

    pub fn search_prefix() -> String {
        "Search results for".into()
    }

    pub fn author_prefix() -> String {
        "Archives for".into()
    }

    pub fn not_found() -> String {
        "Error 404: Page not found".into()
    }

    pub fn page_prefix() -> String {
        "Page".into()
    }

    pub fn wrapper_class() -> String {
        "breadcrumbs".into()
    }
}

// ============================================================================
// [schema] Section Defaults
// ============================================================================

pub mod schema {
    pub fn listing_post_types() -> Vec<String> {
        vec!["product".into()]
    }

    pub fn organization_kind() -> String {
        "Organization".into()
    }
}

// ============================================================================
// [social] Section Defaults
// ============================================================================

pub mod social {
    pub fn twitter_card() -> String {
        "summary_large_image".into()
    }
}

// ============================================================================
// [redirects] Section Defaults
// ============================================================================

pub mod redirects {
    pub fn status() -> u16 {
        301
    }
}
