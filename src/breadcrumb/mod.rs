//! Breadcrumb trail generation.
//!
//! # Modes
//!
//! - **fixed**: one built-in rule per page type (home, posts page, ancestor
//!   or term chain, archive, search, 404)
//! - **flexible**: a format string per page type, see [`flexible`]; requests
//!   without a format use the fixed rules
//!
//! Pagination appends a `Page N` crumb in both modes. The trail is built
//! once per request (see [`Request::breadcrumb`]) and shared with the schema
//! graph through [`Breadcrumb::export`].

mod crumb;
mod fixed;
mod flexible;
mod render;
mod terms;

pub use crumb::{Crumb, CrumbKind, CrumbValue};
pub use terms::deepest as deepest_term;

use crate::config::BreadcrumbMode;
use crate::context::PageType;
use crate::log;
use crate::request::Request;
use crate::utils::url::paged_url;

/// A built trail and its markup.
#[derive(Debug, Clone, Default)]
pub struct Breadcrumb {
    crumbs: Vec<Crumb>,
    html: String,
}

impl Breadcrumb {
    pub fn crumbs(&self) -> &[Crumb] {
        &self.crumbs
    }

    /// Rendered markup; empty when breadcrumbs are disabled.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Non-empty crumbs for the `BreadcrumbList` node. A dropdown crumb is
    /// represented by its first term.
    pub fn export(&self) -> Vec<&CrumbValue> {
        self.crumbs
            .iter()
            .filter(|crumb| !crumb.is_empty())
            .filter_map(Crumb::first)
            .collect()
    }
}

pub(crate) fn build(req: &Request<'_>) -> Breadcrumb {
    let config = &req.config.breadcrumb;

    let mut crumbs = match config.mode {
        BreadcrumbMode::Flexible => flexible::trail(req).unwrap_or_else(|| fixed::trail(req)),
        BreadcrumbMode::Fixed => fixed::trail(req),
    };

    let page = req.page;
    if config.show_paged && page.is_paged() && !page.front_page && !page.is(PageType::NotFound) {
        let base = crumbs.last().map(|c| c.url().to_owned()).unwrap_or_default();
        let text = format!("{} {}", config.page_prefix, page.page_number);
        crumbs.push(Crumb::literal(text.trim(), paged_url(&base, page.page_number)));
    }

    log!(
        "breadcrumb";
        "{} crumbs for `{}` ({:?} mode)",
        crumbs.len(),
        page.page_type.as_str(),
        config.mode
    );

    let html = if config.enable {
        render::render(&crumbs, config)
    } else {
        String::new()
    };
    Breadcrumb { crumbs, html }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::fixture::{CONFIG, Fixture};

    #[test]
    fn test_paged_crumb() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"term\"\nobject = 20\npage = 3");
        let req = fx.request(&page);
        let trail = req.breadcrumb();

        let last = trail.crumbs().last().unwrap();
        assert_eq!(last.text(), "Page 3");
        assert_eq!(last.url(), "https://notes.test/category/nature/page/3/");
    }

    #[test]
    fn test_disabled_keeps_export() {
        let fx = Fixture::with_config(&format!("{CONFIG}\n[breadcrumb]\nenable = false\n"));
        let page = fx.page("page_type = \"post\"\nobject = 4");
        let req = fx.request(&page);

        assert_eq!(req.breadcrumb().html(), "");
        let names: Vec<&str> = req.breadcrumb().export().iter().map(|v| v.text.as_str()).collect();
        assert_eq!(names, ["Home", "About", "Team"]);
    }

    #[test]
    fn test_flexible_falls_back_to_fixed() {
        let fx = Fixture::with_config(&format!(
            "{CONFIG}\n[breadcrumb]\nmode = \"flexible\"\n[breadcrumb.formats]\npost = \"%%home%% >> %%title%%\"\n"
        ));
        let page = fx.page("page_type = \"post\"\nobject = 4");
        let req = fx.request(&page);
        let names: Vec<&str> = req.breadcrumb().crumbs().iter().map(Crumb::text).collect();
        assert_eq!(names, ["Home", "About", "Team"]);

        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);
        let names: Vec<&str> = req.breadcrumb().crumbs().iter().map(Crumb::text).collect();
        assert_eq!(names, ["Home", "Rivers in <em>Spring</em>"]);
    }

    #[test]
    fn test_html_rendered() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);
        let html = req.breadcrumb().html();

        assert!(html.contains(r#"href="https://notes.test/journal/""#));
        assert!(html.contains("Rivers in &lt;em&gt;Spring&lt;/em&gt;"));
        assert!(html.contains(r#"<meta itemprop="position" content="5" />"#));
    }
}
