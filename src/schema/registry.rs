//! Graph type name → node builder.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::Node;
use super::graphs::{article, breadcrumb, organization, person, webpage, website};
use crate::log;
use crate::request::Request;

/// Builds the node of one graph type. The second argument is the requested
/// type name, so one builder can serve a whole family.
pub type GraphFn = dyn Fn(&Request<'_>, &str) -> Option<Node>;

/// The builder family an unregistered name falls back to.
pub fn family(name: &str) -> Option<&'static str> {
    if name.ends_with("Page") {
        Some("WebPage")
    } else if name.ends_with("Article") || name.ends_with("Posting") {
        Some("Article")
    } else {
        None
    }
}

#[derive(Default, Clone)]
pub struct GraphRegistry {
    builders: FxHashMap<String, Rc<GraphFn>>,
}

impl GraphRegistry {
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();

        registry.register("WebSite", website::build);
        registry.register("Organization", organization::build);
        registry.register("BreadcrumbList", breadcrumb::build);
        registry.register("Person", person::build);

        for name in [
            "WebPage",
            "AboutPage",
            "ContactPage",
            "FAQPage",
            "ItemPage",
            "QAPage",
            "CheckoutPage",
            "MedicalWebPage",
        ] {
            registry.register(name, webpage::build);
        }
        registry.register("CollectionPage", webpage::collection);
        registry.register("SearchResultsPage", webpage::search_results);
        registry.register("ProfilePage", webpage::profile);
        registry.register("RealEstateListing", webpage::listing);

        for name in ["Article", "BlogPosting", "TechArticle", "ScholarlyArticle", "Report"] {
            registry.register(name, article::build);
        }
        registry.register("NewsArticle", article::news);

        registry
    }

    /// Register `builder` for `name`, replacing any earlier builder.
    pub fn register<F>(&mut self, name: &str, builder: F)
    where
        F: Fn(&Request<'_>, &str) -> Option<Node> + 'static,
    {
        self.builders.insert(name.to_owned(), Rc::new(builder));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Build the node for `name`, through its family builder when `name`
    /// itself is not registered. Unknown names yield `None`.
    pub fn build(&self, req: &Request<'_>, name: &str) -> Option<Node> {
        let builder = self
            .builders
            .get(name)
            .or_else(|| family(name).and_then(|base| self.builders.get(base)));

        match builder {
            Some(builder) => builder(req, name),
            None => {
                log!("schema"; "no builder for graph type `{}`, dropped", name);
                None
            }
        }
    }
}
