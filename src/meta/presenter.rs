//! Head tag output.
//!
//! Tags are collected in a fixed order and rendered through three
//! templates:
//!
//! ```html
//! <meta property="{{name}}" content="{{value}}" />
//! <meta name="{{name}}" content="{{value}}" />
//! <link rel="{{name}}" href="{{value}}" />
//! ```
//!
//! Tags with an empty value are skipped at render time.

use std::fmt;

use serde::Serialize;

use crate::log;
use crate::request::Request;
use crate::utils::html::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Property,
    Name,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub kind: TagKind,
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(kind: TagKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = escape_html(&self.name);
        let value = escape_html(&self.value);
        match self.kind {
            TagKind::Property => write!(f, r#"<meta property="{name}" content="{value}" />"#),
            TagKind::Name => write!(f, r#"<meta name="{name}" content="{value}" />"#),
            TagKind::Link => write!(f, r#"<link rel="{name}" href="{value}" />"#),
        }
    }
}

/// What the host should do with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Send the visitor elsewhere; no head is rendered.
    Redirect { url: String, status: u16 },
    /// Head markup.
    Head(String),
}

pub struct Presenter<'r, 'a> {
    req: &'r Request<'a>,
}

impl<'r, 'a> Presenter<'r, 'a> {
    pub const fn new(req: &'r Request<'a>) -> Self {
        Self { req }
    }

    /// Redirect check first, head markup otherwise.
    pub fn present(&self) -> Presentation {
        if let Some((url, status)) = self.req.generator().redirect() {
            log!("head"; "redirect {} -> {}", status, url);
            return Presentation::Redirect { url, status };
        }
        Presentation::Head(self.render())
    }

    /// Every tag, in output order, empty ones included.
    pub fn tags(&self) -> Vec<Tag> {
        let req = self.req;
        let generator = req.generator();
        let mut tags = vec![
            Tag::new(TagKind::Link, "canonical", generator.canonical()),
            Tag::new(TagKind::Link, "prev", generator.prev()),
            Tag::new(TagKind::Link, "next", generator.next()),
            Tag::new(TagKind::Name, "robots", generator.robots()),
            Tag::new(TagKind::Name, "keywords", generator.keywords()),
            Tag::new(TagKind::Name, "description", generator.description()),
        ];

        tags.extend(
            generator
                .open_graph()
                .into_iter()
                .map(|(name, value)| Tag::new(TagKind::Property, name, value)),
        );
        tags.extend(
            generator
                .twitter()
                .into_iter()
                .map(|(name, value)| Tag::new(TagKind::Name, name, value)),
        );

        if req.page.front_page {
            for (name, code) in req.config.verification.codes() {
                tags.push(Tag::new(TagKind::Name, name, code.unwrap_or_default()));
            }
        }
        tags
    }

    /// Non-empty tags, then the JSON-LD script when the schema is enabled.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .tags()
            .iter()
            .filter(|tag| !tag.is_empty())
            .map(Tag::to_string)
            .collect();

        if self.req.config.schema.enable {
            let script = self.req.schema().script();
            if !script.is_empty() {
                lines.push(script);
            }
        }
        lines.join("\n")
    }
}
