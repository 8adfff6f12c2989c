//! The per-request object every generator is driven through.
//!
//! A [`Request`] borrows the host's collaborators (config, page context,
//! content provider, cache) and owns everything that is scoped to one
//! request: registered replacers and filters, graph registrations, and the
//! breadcrumb trail and schema graph, each built at most once.
//!
//! # Example
//!
//! ```ignore
//! let page = PageRequest { page_type: PageType::Post, object: Some(7), ..Default::default() }
//!     .resolve(&config, &store);
//! let cache = MemoryCache::new();
//! let request = Request::new(&config, &page, &store, &cache);
//!
//! println!("{}", request.generator().title());
//! println!("{}", request.breadcrumb().html());
//! println!("{}", Presenter::new(&request).render());
//! ```

use std::cell::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::breadcrumb::{self, Breadcrumb};
use crate::cache::Cache;
use crate::config::SiteConfig;
use crate::context::{PageContext, PageType, Subject};
use crate::log;
use crate::data::{ContentProvider, Permalinks};
use crate::meta::{Field, FieldFilters, MetadataGenerator};
use crate::replace::{Replacement, TemplateReplacer};
use crate::schema::{self, GraphDocument, GraphEdit, GraphRegistry, Node};
use crate::utils::url::search_url;

/// Source of generator ids, so two requests sharing a cache never read each
/// other's fields.
static NEXT_GENERATOR_ID: AtomicUsize = AtomicUsize::new(1);

pub struct Request<'a> {
    pub config: &'a SiteConfig,
    pub page: &'a PageContext,
    pub content: &'a dyn ContentProvider,
    pub cache: &'a dyn Cache,
    home: String,
    replacer: TemplateReplacer,
    filters: FieldFilters,
    graphs: GraphRegistry,
    graph_edits: Vec<GraphEdit>,
    breadcrumb: OnceCell<Breadcrumb>,
    schema: OnceCell<GraphDocument>,
    generator_id: usize,
}

impl<'a> Request<'a> {
    pub fn new(
        config: &'a SiteConfig,
        page: &'a PageContext,
        content: &'a dyn ContentProvider,
        cache: &'a dyn Cache,
    ) -> Self {
        Self {
            config,
            page,
            content,
            cache,
            home: config.base.home_url(),
            replacer: TemplateReplacer::default(),
            filters: FieldFilters::default(),
            graphs: GraphRegistry::with_builtins(),
            graph_edits: Vec::new(),
            breadcrumb: OnceCell::new(),
            schema: OnceCell::new(),
            generator_id: NEXT_GENERATOR_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Site root with a trailing slash.
    pub fn home_url(&self) -> &str {
        &self.home
    }

    pub fn links(&self) -> Permalinks<'_> {
        Permalinks::new(&self.home, self.content)
    }

    /// The queried object, resolved.
    pub fn subject(&self) -> Option<Subject<'a>> {
        self.page.subject(self.content)
    }

    /// Url of the requested document, without pagination.
    pub fn current_url(&self) -> String {
        if self.page.front_page {
            return self.home.clone();
        }
        let links = self.links();
        match self.subject() {
            Some(Subject::Post(post)) => links.post(post),
            Some(Subject::Term(term)) => links.term(term),
            Some(Subject::User(user)) => links.author(user),
            Some(Subject::PostType(post_type)) => {
                links.archive(post_type).unwrap_or_else(|| self.home.clone())
            }
            None => match (self.page.page_type, self.page.date) {
                (PageType::Search, _) => {
                    search_url(&self.home, self.page.search.as_deref().unwrap_or_default())
                }
                (PageType::Date, Some(date)) => links.date(date.year, date.month, date.day),
                _ => self.home.clone(),
            },
        }
    }

    // ------------------------------------------------------------------------
    // Template replacement
    // ------------------------------------------------------------------------

    /// Register a `%%name%%` replacer for `page_types` (every page type when
    /// empty). A later registration for the same pair wins.
    pub fn add_replacer(&mut self, name: &str, replacement: impl Into<Replacement>, page_types: &[PageType]) {
        self.replacer.add_replacer(name, replacement.into(), page_types);
    }

    /// Register a last-resort resolver for macros nothing else knows.
    pub fn add_fallback<F>(&mut self, page_types: &[PageType], fallback: F)
    where
        F: Fn(&str, Option<Subject<'_>>) -> Option<String> + 'static,
    {
        self.replacer.add_fallback(page_types, fallback);
    }

    /// Resolve every `%%macro%%` in `template` against `subject` as seen
    /// from `page_type`.
    pub fn replace(&self, template: &str, subject: Option<Subject<'_>>, page_type: PageType) -> String {
        self.replacer.replace(self, template, subject, page_type)
    }

    /// [`Request::replace`] for the queried object and current page type.
    pub fn replace_current(&self, template: &str) -> String {
        self.replace(template, self.subject(), self.page.page_type)
    }

    // ------------------------------------------------------------------------
    // Field generation
    // ------------------------------------------------------------------------

    /// Transform a generated field. Generic filters (`page_type` of `None`)
    /// run before page-type filters, each group in registration order.
    pub fn add_filter<F>(&mut self, field: Field, page_type: Option<PageType>, filter: F)
    where
        F: Fn(String, &PageContext) -> String + 'static,
    {
        self.filters.add(field, page_type, filter);
    }

    pub(crate) fn filters(&self) -> &FieldFilters {
        &self.filters
    }

    pub fn generator(&self) -> MetadataGenerator<'_, 'a> {
        MetadataGenerator::new(self, self.generator_id)
    }

    /// Id of this request's generator; its fields are cached under
    /// `generator-{id}`.
    pub const fn generator_id(&self) -> usize {
        self.generator_id
    }

    // ------------------------------------------------------------------------
    // Breadcrumb
    // ------------------------------------------------------------------------

    /// The breadcrumb trail, built on first access.
    pub fn breadcrumb(&self) -> &Breadcrumb {
        self.breadcrumb.get_or_init(|| breadcrumb::build(self))
    }

    // ------------------------------------------------------------------------
    // Schema
    // ------------------------------------------------------------------------

    /// Register (or replace) the builder of a graph type.
    pub fn register_graph<F>(&mut self, name: &str, builder: F)
    where
        F: Fn(&Request<'_>, &str) -> Option<Node> + 'static,
    {
        if self.graphs.contains(name) {
            log!("schema"; "builder for `{}` replaced", name);
        }
        self.graphs.register(name, builder);
    }

    /// Queue an edit of the loaded graph type list.
    pub fn edit_graphs(&mut self, edit: GraphEdit) {
        self.graph_edits.push(edit);
    }

    pub(crate) fn graph_registry(&self) -> &GraphRegistry {
        &self.graphs
    }

    pub(crate) fn graph_edits(&self) -> &[GraphEdit] {
        &self.graph_edits
    }

    /// The cleaned schema graph, built on first access.
    pub fn schema(&self) -> &GraphDocument {
        self.schema.get_or_init(|| schema::build(self))
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    //! Shared test fixture: a small blog with a static posts page.

    use super::*;
    use crate::cache::MemoryCache;
    use crate::context::PageRequest;
    use crate::data::ContentStore;

    pub const CONFIG: &str = r#"
        [base]
        title = "Field Notes"
        description = "Notes from the field"
        url = "https://notes.test"
        separator = "|"

        [reading]
        posts_page = 2

        [schema.organization]
        name = "Field Notes Ltd"
        logo = "https://notes.test/logo.png"
    "#;

    pub const CONTENT: &str = r#"
        [[posts]]
        id = 2
        post_type = "page"
        title = "Journal"

        [[posts]]
        id = 3
        post_type = "page"
        title = "About"

        [[posts]]
        id = 4
        post_type = "page"
        title = "Team"
        parent = 3

        [[posts]]
        id = 10
        title = "Rivers in <em>Spring</em>"
        author = 1
        date = "2024-03-09T10:00:00"
        modified = "2024-03-10T08:30:00"
        excerpt = "Meltwater season."
        content = "<p>The rivers rise every spring.</p>"
        thumbnail = "https://notes.test/rivers.jpg"
        terms = { category = [21, 20], post_tag = [30] }

        [[terms]]
        id = 20
        taxonomy = "category"
        name = "Nature"

        [[terms]]
        id = 21
        taxonomy = "category"
        name = "Water"
        parent = 20

        [[terms]]
        id = 30
        taxonomy = "post_tag"
        name = "spring"

        [[users]]
        id = 1
        display_name = "Mara Ode"
        description = "Hydrologist."
        avatar = "https://notes.test/mara.png"
    "#;

    pub struct Fixture {
        pub config: SiteConfig,
        pub store: ContentStore,
        pub cache: MemoryCache,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self::with_config(CONFIG)
        }

        pub fn with_config(config: &str) -> Self {
            let config = SiteConfig::from_str(config).unwrap();
            let mut store = ContentStore::from_str(CONTENT).unwrap();
            store.resolve_permalinks(&config.base.home_url());
            Self {
                config,
                store,
                cache: MemoryCache::new(),
            }
        }

        pub fn page(&self, request: &str) -> PageContext {
            toml::from_str::<PageRequest>(request)
                .unwrap()
                .resolve(&self.config, &self.store)
        }

        pub fn request<'a>(&'a self, page: &'a PageContext) -> Request<'a> {
            Request::new(&self.config, page, &self.store, &self.cache)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixture::Fixture;
    use super::*;

    #[test]
    fn test_subject_and_links() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 4");
        let req = fx.request(&page);

        assert_eq!(req.home_url(), "https://notes.test/");
        assert_eq!(req.subject().unwrap().title(), "Team");
        let team = req.content.post(4).unwrap();
        assert_eq!(req.links().post(team), "https://notes.test/about/team/");
    }

    #[test]
    fn test_current_url() {
        let fx = Fixture::new();
        let url = |request: &str| {
            let page = fx.page(request);
            fx.request(&page).current_url()
        };

        assert_eq!(url("page_type = \"home\""), "https://notes.test/");
        assert_eq!(url("page_type = \"post\"\nobject = 2"), "https://notes.test/journal/");
        assert_eq!(url("page_type = \"term\"\nobject = 21"), "https://notes.test/category/nature/water/");
        assert_eq!(url("page_type = \"user\"\nobject = 1"), "https://notes.test/author/mara-ode/");
        assert_eq!(url("page_type = \"date\"\nyear = 2024\nmonth = 3"), "https://notes.test/2024/03/");
        assert_eq!(url("page_type = \"search\"\nsearch = \"ice\""), "https://notes.test/?s=ice");
    }

    #[test]
    fn test_generator_ids_are_unique() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"home\"");
        let a = fx.request(&page);
        let b = fx.request(&page);
        assert_ne!(a.generator_id, b.generator_id);
    }

    #[test]
    fn test_outputs_built_once() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);

        let first: *const Breadcrumb = req.breadcrumb();
        let second: *const Breadcrumb = req.breadcrumb();
        assert_eq!(first, second);

        let first: *const GraphDocument = req.schema();
        assert_eq!(first, req.schema() as *const GraphDocument);
    }

    #[test]
    fn test_register_graph_replaces_builtin() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let mut req = fx.request(&page);
        req.register_graph("Article", |_, name| {
            schema::graphs::into_node(serde_json::json!({ "@type": name, "@id": "https://notes.test/#custom" }))
        });

        assert!(req.graph_registry().contains("Article"));
        assert_eq!(
            req.schema().find("Article").unwrap()["@id"],
            "https://notes.test/#custom"
        );
    }
}
