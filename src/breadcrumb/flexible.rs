//! Flexible-mode trails, built from per page-type format strings.
//!
//! ```text
//! %%home%% >> [Genres](/genres/) >> %%terms_genre%% >> %%title%%
//! ```
//!
//! Segments are separated by `>>`. Inside a segment, `[...]` only feeds the
//! crumb text, `(...)` only feeds the url, and `%%macro%%` feeds both. A
//! macro with several candidates yields one crumb per candidate; several
//! macros yield the product. A known macro without candidates drops the
//! segment; an unknown macro or unbalanced brackets keep the segment as
//! literal text.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::{PageType, Subject};
use crate::data::Term;
use crate::log;
use crate::request::Request;
use crate::utils::url::{absolutize, collapse_slashes, search_url};

use super::crumb::{Crumb, CrumbKind, CrumbValue};
use super::terms;

static MACRO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%%([A-Za-z0-9_-]+)%%").unwrap());

const SEGMENT_SEPARATOR: &str = ">>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Both,
    TextOnly,
    UrlOnly,
}

#[derive(Debug, PartialEq, Eq)]
enum Piece<'f> {
    Text(Scope, &'f str),
    Macro(Scope, &'f str),
}

/// What a macro expands to.
enum Expansion {
    /// Alternatives; each becomes its own crumb.
    Items(CrumbKind, Vec<CrumbValue>),
    /// One dropdown crumb.
    List(Vec<CrumbValue>),
}

/// Trail for the request's format, `None` when no format is configured.
pub(super) fn trail(req: &Request<'_>) -> Option<Vec<Crumb>> {
    let key = req.page.format_key(req.content);
    let Some(format) = req.config.breadcrumb.formats.get(&key) else {
        log!("breadcrumb"; "no flexible format for `{}`, using fixed rules", key);
        return None;
    };

    Some(
        format
            .split(SEGMENT_SEPARATOR)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .flat_map(|segment| expand_segment(req, segment))
            .collect(),
    )
}

fn expand_segment(req: &Request<'_>, segment: &str) -> Vec<Crumb> {
    let Some(pieces) = tokenize(segment) else {
        return vec![Crumb::literal(segment, "")];
    };

    let mut expansions = Vec::new();
    for piece in &pieces {
        if let Piece::Macro(_, name) = piece {
            match expand_macro(req, name) {
                Some(expansion) => expansions.push(expansion),
                None => return vec![Crumb::literal(segment, "")],
            }
        }
    }

    // A dropdown macro turns the whole segment into one dropdown crumb.
    if let Some(values) = expansions.iter().find_map(|e| match e {
        Expansion::List(values) => Some(values),
        Expansion::Items(..) => None,
    }) {
        if values.is_empty() {
            return Vec::new();
        }
        return vec![Crumb::term_list(values.clone())];
    }

    let mut kind = CrumbKind::Literal;
    let mut candidates: Vec<&[CrumbValue]> = Vec::new();
    for expansion in &expansions {
        if let Expansion::Items(item_kind, values) = expansion {
            if values.is_empty() {
                return Vec::new();
            }
            if kind == CrumbKind::Literal {
                kind = *item_kind;
            }
            candidates.push(values.as_slice());
        }
    }

    product(&candidates)
        .into_iter()
        .map(|combo| Crumb::single(kind, compose(req, &pieces, &combo)))
        .collect()
}

/// Split a segment into scoped text and macro pieces. `None` on unbalanced
/// or nested brackets.
fn tokenize(segment: &str) -> Option<Vec<Piece<'_>>> {
    let mut pieces = Vec::new();
    let mut scope = Scope::Both;
    let mut last = 0;

    for caps in MACRO.captures_iter(segment) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        scan_text(&segment[last..whole.start()], &mut scope, &mut pieces)?;
        pieces.push(Piece::Macro(scope, name.as_str()));
        last = whole.end();
    }
    scan_text(&segment[last..], &mut scope, &mut pieces)?;

    (scope == Scope::Both).then_some(pieces)
}

/// Walk literal text, switching scope on brackets.
fn scan_text<'f>(text: &'f str, scope: &mut Scope, pieces: &mut Vec<Piece<'f>>) -> Option<()> {
    let mut start = 0;
    for (i, c) in text.char_indices() {
        let next = match (c, *scope) {
            ('[', Scope::Both) => Scope::TextOnly,
            ('(', Scope::Both) => Scope::UrlOnly,
            (']', Scope::TextOnly) | (')', Scope::UrlOnly) => Scope::Both,
            ('[' | '(' | ']' | ')', _) => return None,
            _ => continue,
        };
        if start < i {
            pieces.push(Piece::Text(*scope, &text[start..i]));
        }
        *scope = next;
        start = i + c.len_utf8();
    }
    if start < text.len() {
        pieces.push(Piece::Text(*scope, &text[start..]));
    }
    Some(())
}

/// Every combination of one candidate per macro, in macro order.
fn product<'v>(candidates: &[&'v [CrumbValue]]) -> Vec<Vec<&'v CrumbValue>> {
    candidates.iter().fold(vec![Vec::new()], |acc, values| {
        acc.iter()
            .flat_map(|prefix| {
                values.iter().map(move |value| {
                    let mut combo = prefix.clone();
                    combo.push(value);
                    combo
                })
            })
            .collect()
    })
}

/// Assemble one crumb from the pieces and one candidate per macro.
fn compose(req: &Request<'_>, pieces: &[Piece<'_>], combo: &[&CrumbValue]) -> CrumbValue {
    let mut text = String::new();
    let mut url = String::new();
    let mut values = combo.iter();

    for piece in pieces {
        match *piece {
            Piece::Text(Scope::UrlOnly, literal) => url.push_str(literal),
            Piece::Text(_, literal) => text.push_str(literal),
            Piece::Macro(scope, _) => {
                let Some(value) = values.next() else { continue };
                match scope {
                    Scope::Both => {
                        text.push_str(&value.text);
                        url.push_str(&value.url);
                    }
                    Scope::TextOnly => text.push_str(&value.text),
                    Scope::UrlOnly if value.url.is_empty() => url.push_str(&value.text),
                    Scope::UrlOnly => url.push_str(&value.url),
                }
            }
        }
    }

    let url = collapse_slashes(url.trim());
    CrumbValue::new(text.trim(), absolutize(&url, req.home_url()))
}

/// Candidates of a macro, `None` when the macro is unknown.
fn expand_macro(req: &Request<'_>, name: &str) -> Option<Expansion> {
    let content = req.content;
    let links = req.links();
    let subject = req.subject();
    let post = subject.and_then(|s| s.as_post());

    let items = |kind: CrumbKind, values: Vec<CrumbValue>| Some(Expansion::Items(kind, values));
    let term_values = |terms: &[&Term]| -> Vec<CrumbValue> {
        terms
            .iter()
            .map(|term| CrumbValue::new(&term.name, links.term(term)))
            .collect()
    };

    match name {
        "home" => items(
            CrumbKind::Literal,
            vec![CrumbValue::new(&req.config.breadcrumb.home_label, req.home_url())],
        ),
        "sitename" => items(
            CrumbKind::Literal,
            vec![CrumbValue::new(&req.config.base.title, req.home_url())],
        ),
        "title" => items(CrumbKind::Literal, current(req).into_iter().collect()),
        "queried_object" => {
            let kind = match subject {
                Some(Subject::Post(_)) => CrumbKind::IdRef,
                Some(Subject::Term(_)) => CrumbKind::TermRef,
                _ => CrumbKind::Literal,
            };
            let value = subject.and_then(|_| current(req));
            items(kind, value.into_iter().collect())
        }
        "post_parent" => {
            let ancestors = post.map(|p| content.post_ancestors(p)).unwrap_or_default();
            let values = ancestors
                .into_iter()
                .map(|p| CrumbValue::new(&p.title, links.post(p)))
                .collect();
            items(CrumbKind::IdRef, values)
        }
        "post_type" => {
            let post_type = match subject {
                Some(Subject::Post(p)) => content.post_type(&p.post_type),
                Some(Subject::PostType(pt)) => Some(pt),
                _ => None,
            };
            let value = post_type.and_then(|pt| Some(CrumbValue::new(&pt.label, links.archive(pt)?)));
            items(CrumbKind::Literal, value.into_iter().collect())
        }
        "category" => expand_macro(req, "terms_category"),
        _ => {
            if let Some(taxonomy) = name.strip_prefix("term_list_") {
                let assigned = post.map(|p| content.post_terms(p, taxonomy)).unwrap_or_default();
                return Some(Expansion::List(term_values(&assigned)));
            }
            if let Some(taxonomy) = name.strip_prefix("terms_") {
                let values = anchor_term(req, taxonomy)
                    .map(|term| terms::chain(content, &links, term))
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|crumb| crumb.values.into_iter().next())
                    .collect();
                return items(CrumbKind::TermRef, values);
            }
            if let Some(taxonomy) = name.strip_prefix("taxonomy_") {
                let values = anchor_term(req, taxonomy).map(|t| term_values(&[t]));
                return items(CrumbKind::TermRef, values.unwrap_or_default());
            }
            if let Some(key) = name.strip_prefix("meta_") {
                let value = subject.and_then(|s| s.meta(key));
                return items(
                    CrumbKind::Literal,
                    value.map(|v| CrumbValue::new(v, "")).into_iter().collect(),
                );
            }
            let value = req.page.query_vars.get(name)?;
            items(CrumbKind::Literal, vec![CrumbValue::new(value, "")])
        }
    }
}

/// Deepest assigned term of a single post, or the queried term itself on a
/// term archive of `taxonomy`.
fn anchor_term<'a>(req: &Request<'a>, taxonomy: &str) -> Option<&'a Term> {
    match req.subject()? {
        Subject::Post(post) => {
            let assigned = req.content.post_terms(post, taxonomy);
            terms::deepest(req.content, &assigned)
        }
        Subject::Term(term) if term.taxonomy == taxonomy => Some(term),
        _ => None,
    }
}

/// Text and url of the current document.
fn current(req: &Request<'_>) -> Option<CrumbValue> {
    let links = req.links();
    let page = req.page;
    let value = match req.subject() {
        Some(Subject::Post(post)) => CrumbValue::new(&post.title, links.post(post)),
        Some(Subject::Term(term)) => CrumbValue::new(&term.name, links.term(term)),
        Some(Subject::User(user)) => CrumbValue::new(&user.display_name, links.author(user)),
        Some(Subject::PostType(pt)) => CrumbValue::new(&pt.label, links.archive(pt).unwrap_or_default()),
        None => match page.page_type {
            PageType::Search => {
                let query = page.search.clone().unwrap_or_default();
                let url = search_url(req.home_url(), &query);
                CrumbValue::new(query, url)
            }
            PageType::Date => {
                let parts = page.date?;
                let label = crate::utils::date::archive_label(
                    parts.year,
                    parts.month,
                    parts.day,
                    &req.config.base.date_format,
                );
                CrumbValue::new(label, links.date(parts.year, parts.month, parts.day))
            }
            PageType::NotFound => CrumbValue::new(&req.config.breadcrumb.not_found, ""),
            PageType::Home => CrumbValue::new(&req.config.base.title, req.home_url()),
            _ => return None,
        },
    };
    Some(value)
}
