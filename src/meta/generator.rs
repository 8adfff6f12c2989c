//! Field generation with per-request caching.

use crate::context::{PageType, Subject};
use crate::request::Request;
use crate::utils::html::{clean_text, collapse_whitespace, escape_html, unescape_html};
use crate::utils::url::{absolutize, paged_url};

use super::Field;
use super::strategy::{Strategy, override_key, strategy_for};

/// Generates the head fields of one request.
///
/// Every field is cached in the request cache under the namespace
/// `generator-{id}`, so asking twice costs one lookup.
pub struct MetadataGenerator<'r, 'a> {
    req: &'r Request<'a>,
    strategy: &'static dyn Strategy,
    namespace: String,
}

impl<'r, 'a> MetadataGenerator<'r, 'a> {
    pub fn new(req: &'r Request<'a>, id: usize) -> Self {
        Self {
            req,
            strategy: strategy_for(req.page),
            namespace: format!("generator-{id}"),
        }
    }

    fn cached(&self, field: Field, generate: impl FnOnce() -> String) -> String {
        let cache = self.req.cache;
        if let Some(value) = cache.get(field.as_str(), &self.namespace) {
            return value;
        }
        let value = generate();
        cache.set(field.as_str(), value.clone(), &self.namespace, true);
        value
    }

    fn filtered(&self, field: Field, value: String) -> String {
        self.req.filters().apply(field, value, self.req.page)
    }

    /// Strategy template → filters → macro replacement → cleanup.
    fn text(&self, field: Field) -> String {
        let raw = self.strategy.text(self.req, field).unwrap_or_default();
        let raw = self.filtered(field, raw);
        let replaced = self.req.replace_current(&raw);
        clean_text(&unescape_html(&replaced))
    }

    pub fn title(&self) -> String {
        self.cached(Field::Title, || {
            let title = self.text(Field::Title);
            if !self.req.config.titles.trailing_sitename {
                return title;
            }
            let base = &self.req.config.base;
            with_sitename(&title, &escape_html(&base.separator), &escape_html(&base.title))
        })
    }

    pub fn description(&self) -> String {
        self.cached(Field::Description, || self.text(Field::Description))
    }

    pub fn keywords(&self) -> String {
        self.cached(Field::Keywords, || self.text(Field::Keywords))
    }

    /// Entity override, else the strategy's url, paginated.
    pub fn canonical(&self) -> String {
        self.cached(Field::Canonical, || {
            let key = override_key(Field::Canonical).unwrap_or_default();
            let url = match self.req.subject().and_then(|s| s.meta(key)) {
                Some(url) => absolutize(url.trim(), self.req.home_url()),
                None => self
                    .strategy
                    .canonical(self.req)
                    .map(|base| paged_url(&base, self.req.page.page_number))
                    .unwrap_or_default(),
            };
            self.filtered(Field::Canonical, url)
        })
    }

    /// `index, follow` style directives.
    pub fn robots(&self) -> String {
        self.cached(Field::Robots, || {
            let config = &self.req.config.robots;
            let mut robots = self.strategy.robots(self.req);
            if self.req.page.is_paged() && config.noindex_paged {
                robots.noindex = true;
            }

            let mut directives = vec![
                if robots.noindex { "noindex" } else { "index" },
                if robots.nofollow { "nofollow" } else { "follow" },
            ];
            if !robots.noindex && config.max_image_preview {
                directives.push("max-image-preview:large");
            }
            self.filtered(Field::Robots, directives.join(", "))
        })
    }

    fn pagination_base(&self) -> Option<String> {
        let page = self.req.page;
        if page.max_pages <= 1 || page.is(PageType::Post) {
            return None;
        }
        self.strategy.canonical(self.req)
    }

    /// Previous page of a paginated listing.
    pub fn prev(&self) -> String {
        self.cached(Field::Prev, || {
            let page = self.req.page;
            let url = match self.pagination_base() {
                Some(base) if page.is_paged() => paged_url(&base, page.page_number - 1),
                _ => String::new(),
            };
            self.filtered(Field::Prev, url)
        })
    }

    /// Next page of a paginated listing.
    pub fn next(&self) -> String {
        self.cached(Field::Next, || {
            let page = self.req.page;
            let url = match self.pagination_base() {
                Some(base) if page.page_number < page.max_pages => {
                    paged_url(&base, page.page_number + 1)
                }
                _ => String::new(),
            };
            self.filtered(Field::Next, url)
        })
    }

    /// Entity image, else the site default.
    pub fn image(&self) -> String {
        self.cached(Field::Image, || {
            let url = self
                .strategy
                .image(self.req)
                .or_else(|| self.req.config.social.default_image.clone())
                .map(|url| absolutize(url.trim(), self.req.home_url()))
                .unwrap_or_default();
            self.filtered(Field::Image, url)
        })
    }

    /// Where the host should send the visitor instead, with the status.
    pub fn redirect(&self) -> Option<(String, u16)> {
        self.strategy
            .redirect(self.req)
            .map(|(url, status)| (absolutize(url.trim(), self.req.home_url()), status))
    }

    /// `og:*`, `article:*` and `fb:app_id` pairs, in output order.
    pub fn open_graph(&self) -> Vec<(String, String)> {
        let req = self.req;
        let social = &req.config.social;
        if !social.open_graph {
            return Vec::new();
        }

        let og_type = self.strategy.og_type(req);
        let mut tags = vec![
            ("og:locale".to_owned(), req.config.base.locale.clone()),
            ("og:type".to_owned(), og_type.to_owned()),
            ("og:title".to_owned(), self.title()),
            ("og:description".to_owned(), self.description()),
            ("og:url".to_owned(), self.canonical()),
            ("og:site_name".to_owned(), escape_html(&req.config.base.title)),
            ("og:image".to_owned(), self.image()),
        ];

        if og_type == "article"
            && let Some(Subject::Post(post)) = req.subject()
        {
            let iso = |s: &str| crate::utils::date::to_iso8601(s).unwrap_or_default();
            tags.push(("article:published_time".into(), iso(&post.date)));
            tags.push(("article:modified_time".into(), iso(&post.modified)));

            let section = req
                .config
                .breadcrumb
                .main_taxonomy(&post.post_type)
                .and_then(|tax| req.content.post_terms(post, tax).first().map(|t| t.name.clone()));
            tags.push(("article:section".into(), section.unwrap_or_default()));
            for tag in req.content.post_terms(post, "post_tag") {
                tags.push(("article:tag".into(), tag.name.clone()));
            }
            if let Some(author) = post.author_id().and_then(|id| req.content.user(id)) {
                tags.push(("article:author".into(), req.links().author(author)));
            }
        }

        if let Some(app_id) = &social.facebook_app_id {
            tags.push(("fb:app_id".into(), app_id.clone()));
        }
        tags
    }

    /// `twitter:*` pairs, in output order.
    pub fn twitter(&self) -> Vec<(String, String)> {
        let req = self.req;
        let social = &req.config.social;
        if !social.twitter {
            return Vec::new();
        }

        let creator = match req.subject() {
            Some(Subject::Post(post)) => post.author_id().and_then(|id| req.content.user(id)),
            Some(Subject::User(user)) => Some(user),
            _ => None,
        }
        .and_then(|user| user.meta("twitter"))
        .map(str::to_owned);

        vec![
            ("twitter:card".to_owned(), social.twitter_card.clone()),
            ("twitter:title".to_owned(), self.title()),
            ("twitter:description".to_owned(), self.description()),
            ("twitter:image".to_owned(), self.image()),
            ("twitter:site".to_owned(), social.twitter_site.clone().unwrap_or_default()),
            ("twitter:creator".to_owned(), creator.unwrap_or_default()),
        ]
    }
}

/// Make sure `title` ends with ` {sep} {sitename}` exactly once.
pub fn with_sitename(title: &str, sep: &str, sitename: &str) -> String {
    if sitename.is_empty() || title.ends_with(sitename) {
        return title.to_owned();
    }
    let rest = collapse_whitespace(&title.replace(sitename, ""));
    let rest = rest
        .trim_start_matches(sep)
        .trim_end_matches(sep)
        .trim();
    if rest.is_empty() {
        sitename.to_owned()
    } else {
        format!("{rest} {sep} {sitename}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Cache, NoCache};
    use crate::config::SiteConfig;
    use crate::request::fixture::{CONFIG, Fixture};

    #[test]
    fn test_with_sitename() {
        assert_eq!(with_sitename("Rivers", "|", "Notes"), "Rivers | Notes");
        assert_eq!(with_sitename("Rivers | Notes", "|", "Notes"), "Rivers | Notes");
        assert_eq!(with_sitename("Notes | Rivers", "|", "Notes"), "Rivers | Notes");
        assert_eq!(with_sitename("", "|", "Notes"), "Notes");
        assert_eq!(with_sitename("Rivers", "|", ""), "Rivers");
    }

    #[test]
    fn test_post_fields() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);
        let generator = req.generator();

        assert_eq!(generator.title(), "Rivers in Spring | Field Notes");
        assert_eq!(generator.description(), "Meltwater season.");
        assert_eq!(generator.keywords(), "spring");
        assert_eq!(generator.canonical(), "https://notes.test/rivers-in-spring/");
        assert_eq!(generator.robots(), "index, follow, max-image-preview:large");
        assert_eq!(generator.image(), "https://notes.test/rivers.jpg");
        assert_eq!(generator.prev(), "");
        assert!(generator.redirect().is_none());
    }

    #[test]
    fn test_front_page_title() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"home\"");
        let req = fx.request(&page);
        assert_eq!(req.generator().title(), "Notes from the field | Field Notes");
        assert_eq!(req.generator().description(), "Notes from the field");
    }

    #[test]
    fn test_fields_are_cached_per_generator() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);

        let title = req.generator().title();
        let namespace = format!("generator-{}", req.generator_id());
        assert_eq!(fx.cache.get("title", &namespace), Some(title));

        fx.cache.set("title", "Cached".into(), &namespace, true);
        assert_eq!(req.generator().title(), "Cached");

        let other = fx.request(&page);
        assert_eq!(other.generator().title(), "Rivers in Spring | Field Notes");
    }

    #[test]
    fn test_filters_run_before_replacement() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let mut req = fx.request(&page);
        req.add_filter(Field::Title, None, |v, _| format!("{v} %%sep%% %%author%%"));
        req.add_filter(Field::Title, Some(PageType::Term), |_, _| "never".into());

        assert_eq!(req.generator().title(), "Rivers in Spring | Mara Ode | Field Notes");
    }

    #[test]
    fn test_paginated_archive() {
        let fx = Fixture::with_config(&format!("{CONFIG}\n[robots]\nnoindex_paged = true\n"));
        let page = fx.page("page_type = \"term\"\nobject = 20\npage = 2\nmax_pages = 3");
        let req = fx.request(&page);
        let generator = req.generator();

        assert_eq!(generator.title(), "Nature Page 2 of 3 | Field Notes");
        assert_eq!(generator.canonical(), "https://notes.test/category/nature/page/2/");
        assert_eq!(generator.prev(), "https://notes.test/category/nature/");
        assert_eq!(generator.next(), "https://notes.test/category/nature/page/3/");
        assert_eq!(generator.robots(), "noindex, follow");
    }

    #[test]
    fn test_search_and_not_found() {
        let config = SiteConfig::from_str(CONFIG).unwrap();
        let fx = Fixture::new();
        let page = fx.page("page_type = \"search\"\nsearch = \"ice <b>melt</b>\"");
        let req = crate::request::Request::new(&config, &page, &fx.store, &NoCache);
        let generator = req.generator();

        assert_eq!(generator.title(), "Search results for ice melt | Field Notes");
        assert_eq!(generator.canonical(), "");
        assert_eq!(generator.robots(), "noindex, follow");

        let page = fx.page("page_type = \"404\"");
        let req = fx.request(&page);
        assert_eq!(req.generator().title(), "Error 404: Page not found | Field Notes");
        assert_eq!(req.generator().canonical(), "");
    }

    #[test]
    fn test_open_graph_article() {
        let fx = Fixture::with_config(&format!(
            "{CONFIG}\n[social]\nfacebook_app_id = \"42\"\ntwitter_site = \"@notes\"\n"
        ));
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);
        let generator = req.generator();
        let og = generator.open_graph();
        let get = |name: &str| og.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str());

        assert_eq!(get("og:type"), Some("article"));
        assert_eq!(get("og:url"), Some("https://notes.test/rivers-in-spring/"));
        assert_eq!(get("article:section"), Some("Water"));
        assert_eq!(get("article:tag"), Some("spring"));
        assert_eq!(get("article:author"), Some("https://notes.test/author/mara-ode/"));
        assert_eq!(get("fb:app_id"), Some("42"));

        let twitter = generator.twitter();
        assert_eq!(twitter[0], ("twitter:card".to_owned(), "summary_large_image".to_owned()));
        assert_eq!(twitter[4].1, "@notes");
    }
}
