//! Per page-type field sources.
//!
//! Every text field is looked up in the same order: the entity's own
//! `seo_*` meta, the `[titles]` template of the page type, then the
//! strategy's default template.

use crate::config::{REDIRECT_STATUSES, TitleTemplate};
use crate::context::{PageContext, PageType, Subject};
use crate::request::Request;

use super::Field;

/// Indexing directives before page-level adjustments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Robots {
    pub noindex: bool,
    pub nofollow: bool,
}

/// Entity meta key overriding `field`.
pub const fn override_key(field: Field) -> Option<&'static str> {
    match field {
        Field::Title => Some("seo_title"),
        Field::Description => Some("seo_description"),
        Field::Keywords => Some("seo_keywords"),
        Field::Canonical => Some("seo_canonical"),
        Field::Image => Some("seo_image"),
        Field::Robots | Field::Prev | Field::Next => None,
    }
}

/// Truthy meta flag (`1`, `true`, `yes`, `on`).
fn flag(subject: Option<Subject<'_>>, key: &str) -> Option<bool> {
    let value = subject?.meta(key)?;
    Some(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    ))
}

/// `seo_redirect` of the queried entity, with its status when valid.
fn meta_redirect(req: &Request<'_>) -> Option<(String, u16)> {
    let subject = req.subject()?;
    let url = subject.meta("seo_redirect")?;
    let status = subject
        .meta("seo_redirect_status")
        .and_then(|s| s.trim().parse::<u16>().ok())
        .filter(|s| REDIRECT_STATUSES.contains(s))
        .unwrap_or(req.config.redirects.status);
    Some((url, status))
}

fn template_field(template: &TitleTemplate, field: Field) -> Option<&str> {
    let value = match field {
        Field::Title => template.title.as_deref(),
        Field::Description => template.description.as_deref(),
        Field::Keywords => template.keywords.as_deref(),
        _ => None,
    };
    value.filter(|v| !v.trim().is_empty())
}

pub trait Strategy {
    fn name(&self) -> &'static str;

    /// `[titles]` templates of the page type.
    fn templates<'c>(&self, req: &Request<'c>) -> Option<&'c TitleTemplate>;

    /// Template used when neither the entity nor the config has one.
    fn default_text(&self, req: &Request<'_>, field: Field) -> Option<String>;

    /// Raw value or template of a text field.
    fn text(&self, req: &Request<'_>, field: Field) -> Option<String> {
        override_key(field)
            .and_then(|key| req.subject()?.meta(key))
            .or_else(|| {
                self.templates(req)
                    .and_then(|t| template_field(t, field))
                    .map(str::to_owned)
            })
            .or_else(|| self.default_text(req, field))
    }

    /// Unpaginated canonical url; `None` when the page has none.
    fn canonical(&self, req: &Request<'_>) -> Option<String> {
        Some(req.current_url())
    }

    fn robots(&self, req: &Request<'_>) -> Robots {
        let template = self.templates(req);
        let subject = req.subject();
        Robots {
            noindex: flag(subject, "seo_noindex").unwrap_or(template.is_some_and(|t| t.noindex)),
            nofollow: flag(subject, "seo_nofollow").unwrap_or(template.is_some_and(|t| t.nofollow)),
        }
    }

    fn image(&self, req: &Request<'_>) -> Option<String> {
        req.subject()?.meta("seo_image")
    }

    /// `(url, status)` the host should redirect to.
    fn redirect(&self, req: &Request<'_>) -> Option<(String, u16)> {
        meta_redirect(req)
    }

    /// `og:type`.
    fn og_type(&self, _req: &Request<'_>) -> &'static str {
        "website"
    }
}

// ============================================================================
// Strategies
// ============================================================================

pub struct SingularStrategy;

impl Strategy for SingularStrategy {
    fn name(&self) -> &'static str {
        "singular"
    }

    fn templates<'c>(&self, req: &Request<'c>) -> Option<&'c TitleTemplate> {
        let titles = &req.config.titles;
        if req.page.front_page {
            return Some(&titles.home);
        }
        titles.post_type(&req.subject()?.as_post()?.post_type)
    }

    fn default_text(&self, req: &Request<'_>, field: Field) -> Option<String> {
        match field {
            Field::Title => Some("%%title%%".into()),
            Field::Description => Some("%%excerpt%%".into()),
            Field::Keywords => {
                let post = req.subject()?.as_post()?;
                let tags: Vec<&str> = req
                    .content
                    .post_terms(post, "post_tag")
                    .iter()
                    .map(|term| term.name.as_str())
                    .collect();
                (!tags.is_empty()).then(|| tags.join(", "))
            }
            _ => None,
        }
    }

    fn image(&self, req: &Request<'_>) -> Option<String> {
        let post = req.subject()?.as_post()?;
        post.meta("seo_image")
            .map(str::to_owned)
            .or_else(|| post.thumbnail.clone())
    }

    fn redirect(&self, req: &Request<'_>) -> Option<(String, u16)> {
        if let Some(redirect) = meta_redirect(req) {
            return Some(redirect);
        }

        let post = req.subject()?.as_post()?;
        if post.post_type == "attachment" && req.config.redirects.attachments_to_parent {
            let parent = req.content.post(post.parent_id()?)?;
            return Some((req.links().post(parent), req.config.redirects.status));
        }
        None
    }

    fn og_type(&self, req: &Request<'_>) -> &'static str {
        if req.page.front_page { "website" } else { "article" }
    }
}

pub struct HomeStrategy;

impl Strategy for HomeStrategy {
    fn name(&self) -> &'static str {
        "home"
    }

    fn templates<'c>(&self, req: &Request<'c>) -> Option<&'c TitleTemplate> {
        let titles = &req.config.titles;
        if req.page.posts_page {
            titles.archive("post")
        } else {
            Some(&titles.home)
        }
    }

    fn default_text(&self, req: &Request<'_>, field: Field) -> Option<String> {
        let posts_page = req.page.posts_page;
        match field {
            Field::Title if posts_page => Some("%%title%% %%page%%".into()),
            Field::Title => Some("%%sitedesc%% %%page%%".into()),
            Field::Description if posts_page => Some("%%excerpt%%".into()),
            Field::Description => Some("%%sitedesc%%".into()),
            _ => None,
        }
    }
}

pub struct TermStrategy;

impl Strategy for TermStrategy {
    fn name(&self) -> &'static str {
        "term"
    }

    fn templates<'c>(&self, req: &Request<'c>) -> Option<&'c TitleTemplate> {
        match req.subject()? {
            Subject::Term(term) => req.config.titles.taxonomy(&term.taxonomy),
            _ => None,
        }
    }

    fn default_text(&self, _req: &Request<'_>, field: Field) -> Option<String> {
        match field {
            Field::Title => Some("%%term_title%% %%page%%".into()),
            Field::Description => Some("%%excerpt%%".into()),
            _ => None,
        }
    }
}

pub struct ArchiveStrategy;

impl Strategy for ArchiveStrategy {
    fn name(&self) -> &'static str {
        "post_archive"
    }

    fn templates<'c>(&self, req: &Request<'c>) -> Option<&'c TitleTemplate> {
        match req.subject()? {
            Subject::PostType(post_type) => req.config.titles.archive(&post_type.name),
            _ => None,
        }
    }

    fn default_text(&self, _req: &Request<'_>, field: Field) -> Option<String> {
        match field {
            Field::Title => Some("%%post_type%% %%page%%".into()),
            Field::Description => Some("%%excerpt%%".into()),
            _ => None,
        }
    }
}

pub struct AuthorStrategy;

impl Strategy for AuthorStrategy {
    fn name(&self) -> &'static str {
        "author"
    }

    fn templates<'c>(&self, req: &Request<'c>) -> Option<&'c TitleTemplate> {
        Some(&req.config.titles.author)
    }

    fn default_text(&self, _req: &Request<'_>, field: Field) -> Option<String> {
        match field {
            Field::Title => Some("%%author%% %%page%%".into()),
            Field::Description => Some("%%excerpt%%".into()),
            _ => None,
        }
    }

    fn image(&self, req: &Request<'_>) -> Option<String> {
        match req.subject()? {
            Subject::User(user) => user
                .meta("seo_image")
                .map(str::to_owned)
                .or_else(|| user.avatar.clone()),
            _ => None,
        }
    }

    fn og_type(&self, _req: &Request<'_>) -> &'static str {
        "profile"
    }
}

pub struct DateStrategy;

impl Strategy for DateStrategy {
    fn name(&self) -> &'static str {
        "date"
    }

    fn templates<'c>(&self, req: &Request<'c>) -> Option<&'c TitleTemplate> {
        Some(&req.config.titles.date)
    }

    fn default_text(&self, _req: &Request<'_>, field: Field) -> Option<String> {
        (field == Field::Title).then(|| "%%date%% %%page%%".into())
    }
}

pub struct SearchStrategy;

impl Strategy for SearchStrategy {
    fn name(&self) -> &'static str {
        "search"
    }

    fn templates<'c>(&self, req: &Request<'c>) -> Option<&'c TitleTemplate> {
        Some(&req.config.titles.search)
    }

    fn default_text(&self, req: &Request<'_>, field: Field) -> Option<String> {
        let prefix = &req.config.breadcrumb.search_prefix;
        (field == Field::Title).then(|| format!("{prefix} %%search%% %%page%%"))
    }

    fn canonical(&self, _req: &Request<'_>) -> Option<String> {
        None
    }

    fn robots(&self, req: &Request<'_>) -> Robots {
        let nofollow = req.config.titles.search.nofollow;
        Robots {
            noindex: req.config.robots.noindex_search || req.config.titles.search.noindex,
            nofollow,
        }
    }
}

pub struct NotFoundStrategy;

impl Strategy for NotFoundStrategy {
    fn name(&self) -> &'static str {
        "404"
    }

    fn templates<'c>(&self, req: &Request<'c>) -> Option<&'c TitleTemplate> {
        Some(&req.config.titles.not_found)
    }

    fn default_text(&self, req: &Request<'_>, field: Field) -> Option<String> {
        (field == Field::Title).then(|| req.config.breadcrumb.not_found.clone())
    }

    fn canonical(&self, _req: &Request<'_>) -> Option<String> {
        None
    }

    fn robots(&self, _req: &Request<'_>) -> Robots {
        Robots {
            noindex: true,
            nofollow: false,
        }
    }
}

pub struct DefaultStrategy;

impl Strategy for DefaultStrategy {
    fn name(&self) -> &'static str {
        "default"
    }

    fn templates<'c>(&self, _req: &Request<'c>) -> Option<&'c TitleTemplate> {
        None
    }

    fn default_text(&self, _req: &Request<'_>, field: Field) -> Option<String> {
        match field {
            Field::Title => Some("%%title%%".into()),
            Field::Description => Some("%%excerpt%%".into()),
            _ => None,
        }
    }
}

/// The strategy serving `page`.
pub fn strategy_for(page: &PageContext) -> &'static dyn Strategy {
    match page.page_type {
        PageType::Search => &SearchStrategy,
        PageType::NotFound => &NotFoundStrategy,
        PageType::User => &AuthorStrategy,
        PageType::Date => &DateStrategy,
        PageType::Home => &HomeStrategy,
        PageType::Post => &SingularStrategy,
        PageType::Term => &TermStrategy,
        PageType::PostArchive => &ArchiveStrategy,
        PageType::None => &DefaultStrategy,
    }
}
