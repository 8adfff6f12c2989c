//! Classification of the requested document.
//!
//! A [`PageContext`] is resolved once per request, from a [`PageRequest`]
//! against the site config and the content provider, and never changes
//! afterwards. Every generator reads the same context.
//!
//! # Page types
//!
//! | Type           | Queried object | Format key          |
//! |----------------|----------------|---------------------|
//! | `home`         | none / post    | `home`, `blog`      |
//! | `post`         | post           | post type name      |
//! | `term`         | term           | `tax_{taxonomy}`    |
//! | `user`         | user           | `author`            |
//! | `post_archive` | post type      | `archive_{type}`    |
//! | `date`         | none           | `date`              |
//! | `search`       | none           | `search`            |
//! | `404`          | none           | `404`               |
//!
//! A static front page resolves to `post` with [`PageContext::front_page`]
//! set; the static posts page resolves to `home` with
//! [`PageContext::posts_page`] set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::data::{ContentProvider, Post, PostType, Term, User};
use crate::log;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Search,
    PostArchive,
    Home,
    Post,
    Term,
    User,
    Date,
    #[serde(rename = "404")]
    NotFound,
    #[default]
    None,
}

impl PageType {
    pub const ALL: [Self; 9] = [
        Self::Search,
        Self::PostArchive,
        Self::Home,
        Self::Post,
        Self::Term,
        Self::User,
        Self::Date,
        Self::NotFound,
        Self::None,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::PostArchive => "post_archive",
            Self::Home => "home",
            Self::Post => "post",
            Self::Term => "term",
            Self::User => "user",
            Self::Date => "date",
            Self::NotFound => "404",
            Self::None => "none",
        }
    }
}

/// The entity a request is about, by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueriedObject {
    Post(u64),
    Term(u64),
    PostType(String),
    User(u64),
    #[default]
    None,
}

/// A resolved entity that macros, crumbs and nodes read from.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Post(&'a Post),
    Term(&'a Term),
    PostType(&'a PostType),
    User(&'a User),
}

impl<'a> Subject<'a> {
    pub fn meta(&self, key: &str) -> Option<String> {
        let value = match self {
            Self::Post(post) => post.meta(key),
            Self::Term(term) => term.meta(key),
            Self::User(user) => user.meta(key),
            Self::PostType(_) => None,
        };
        value.map(str::to_owned)
    }

    pub fn property(&self, name: &str) -> Option<String> {
        match self {
            Self::Post(post) => post.property(name),
            Self::Term(term) => term.property(name),
            Self::PostType(post_type) => post_type.property(name),
            Self::User(user) => user.property(name),
        }
    }

    /// Display name: post title, term name, type label or author name.
    pub fn title(&self) -> &'a str {
        match *self {
            Self::Post(post) => &post.title,
            Self::Term(term) => &term.name,
            Self::PostType(post_type) => &post_type.label,
            Self::User(user) => &user.display_name,
        }
    }

    pub const fn as_post(&self) -> Option<&'a Post> {
        match *self {
            Self::Post(post) => Some(post),
            _ => None,
        }
    }
}

/// Components of a date archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// The resolved request.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub page_type: PageType,
    pub queried_object: QueriedObject,
    /// The site's front page, static or not.
    pub front_page: bool,
    /// The static posts page.
    pub posts_page: bool,
    /// Date archive components; also kept on a 404 whose url looked like a
    /// date archive.
    pub date: Option<DateParts>,
    pub search: Option<String>,
    pub found_posts: u64,
    pub query_vars: BTreeMap<String, String>,
    /// Ids of the posts listed on an archive page.
    pub listed: Vec<u64>,
    /// 1-based.
    pub page_number: u32,
    pub max_pages: u32,
}

impl PageContext {
    pub fn is(&self, page_type: PageType) -> bool {
        self.page_type == page_type
    }

    pub const fn is_paged(&self) -> bool {
        self.page_number > 1
    }

    /// Resolve the queried object against the content provider.
    pub fn subject<'a>(&self, content: &'a dyn ContentProvider) -> Option<Subject<'a>> {
        match &self.queried_object {
            QueriedObject::Post(id) => content.post(*id).map(Subject::Post),
            QueriedObject::Term(id) => content.term(*id).map(Subject::Term),
            QueriedObject::PostType(name) => content.post_type(name).map(Subject::PostType),
            QueriedObject::User(id) => content.user(*id).map(Subject::User),
            QueriedObject::None => None,
        }
    }

    /// Key of the flexible breadcrumb format for this request.
    pub fn format_key(&self, content: &dyn ContentProvider) -> String {
        if self.front_page {
            return "home".into();
        }
        match (self.page_type, self.subject(content)) {
            (PageType::Home, _) if self.posts_page => "blog".into(),
            (PageType::Home, _) => "home".into(),
            (PageType::Post, Some(Subject::Post(post))) => post.post_type.clone(),
            (PageType::Term, Some(Subject::Term(term))) => format!("tax_{}", term.taxonomy),
            (PageType::PostArchive, Some(Subject::PostType(pt))) => format!("archive_{}", pt.name),
            (PageType::User, _) => "author".into(),
            (PageType::Date, _) => "date".into(),
            (PageType::Search, _) => "search".into(),
            (PageType::NotFound, _) => "404".into(),
            _ => "none".into(),
        }
    }
}

/// Request fixture: what the host knows about the requested url.
///
/// ```toml
/// page_type = "term"
/// object = 12
/// page = 2
/// max_pages = 4
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageRequest {
    pub page_type: PageType,
    /// Post, term or user id.
    pub object: Option<u64>,
    /// Post type name of a post-type archive.
    pub post_type: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub search: Option<String>,
    pub page: u32,
    pub max_pages: u32,
    pub found_posts: u64,
    pub listed: Vec<u64>,
    pub query_vars: BTreeMap<String, String>,
}

impl PageRequest {
    /// Classify the request. A missing queried object turns the request
    /// into a 404.
    pub fn resolve(&self, config: &SiteConfig, content: &dyn ContentProvider) -> PageContext {
        let page_number = self.page.max(1);
        let mut ctx = PageContext {
            page_type: self.page_type,
            page_number,
            max_pages: self.max_pages.max(page_number),
            found_posts: self.found_posts,
            listed: self.listed.clone(),
            query_vars: self.query_vars.clone(),
            ..PageContext::default()
        };
        let date = self.year.map(|year| DateParts {
            year,
            month: self.month,
            day: self.month.and(self.day),
        });

        match self.page_type {
            PageType::Home => {
                ctx.front_page = true;
                if let Some(id) = config.reading.front_page
                    && content.post(id).is_some()
                {
                    ctx.page_type = PageType::Post;
                    ctx.queried_object = QueriedObject::Post(id);
                }
            }
            PageType::Post => match self.object.filter(|id| content.post(*id).is_some()) {
                Some(id) => {
                    ctx.queried_object = QueriedObject::Post(id);
                    ctx.front_page = config.reading.front_page == Some(id);
                    if config.reading.posts_page == Some(id) {
                        ctx.page_type = PageType::Home;
                        ctx.posts_page = true;
                    }
                }
                None => ctx.page_type = PageType::NotFound,
            },
            PageType::Term => match self.object.filter(|id| content.term(*id).is_some()) {
                Some(id) => ctx.queried_object = QueriedObject::Term(id),
                None => ctx.page_type = PageType::NotFound,
            },
            PageType::User => match self.object.filter(|id| content.user(*id).is_some()) {
                Some(id) => ctx.queried_object = QueriedObject::User(id),
                None => ctx.page_type = PageType::NotFound,
            },
            PageType::PostArchive => {
                let name = self
                    .post_type
                    .as_deref()
                    .filter(|name| content.post_type(name).is_some());
                match name {
                    Some(name) => ctx.queried_object = QueriedObject::PostType(name.to_owned()),
                    None => ctx.page_type = PageType::NotFound,
                }
            }
            PageType::Date => match date {
                Some(parts) => ctx.date = Some(parts),
                None => ctx.page_type = PageType::NotFound,
            },
            PageType::Search => ctx.search = Some(self.search.clone().unwrap_or_default()),
            PageType::NotFound => ctx.date = date,
            PageType::None => {}
        }

        if ctx.page_type == PageType::NotFound && self.page_type != PageType::NotFound {
            log!("context"; "{} request has no queried object, serving 404", self.page_type.as_str());
        }
        ctx
    }
}
