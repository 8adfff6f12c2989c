//! `%%macro%%` resolution in title, description and keyword templates.
//!
//! Each distinct macro in a template is resolved once, by the first source
//! that yields a non-empty value:
//!
//! 1. a replacer registered for `(name, page_type)` (callback results are
//!    memoized for the rest of the request)
//! 2. the built-in table (`sep`, `sitename`, `title`, `excerpt`, ...)
//! 3. a request query variable of the same name
//! 4. `meta_<key>`: subject metadata
//! 5. a property of the subject with the same name
//! 6. fallbacks registered for the page type, in order
//!
//! Anything unresolved becomes the empty string. The result has whitespace
//! collapsed, is trimmed and HTML-escaped.

mod builtin;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::FxHashMap;

use crate::context::{PageType, Subject};
use crate::request::Request;
use crate::utils::html::{collapse_whitespace, escape_html};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%%([A-Za-z0-9_-]+)%%").unwrap());

pub type ReplaceFn = dyn Fn(Option<Subject<'_>>) -> String;
pub type FallbackFn = dyn Fn(&str, Option<Subject<'_>>) -> Option<String>;

/// A registered macro value.
#[derive(Clone)]
pub enum Replacement {
    Value(String),
    Callback(Rc<ReplaceFn>),
}

impl Replacement {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(Option<Subject<'_>>) -> String + 'static,
    {
        Self::Callback(Rc::new(f))
    }
}

impl From<&str> for Replacement {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl From<String> for Replacement {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl std::fmt::Debug for Replacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

type RuleKey = (String, PageType);

#[derive(Default)]
pub struct TemplateReplacer {
    rules: FxHashMap<RuleKey, Replacement>,
    fallbacks: FxHashMap<PageType, Vec<Rc<FallbackFn>>>,
    memo: RefCell<FxHashMap<RuleKey, String>>,
}

/// Expand an empty page type list to every page type.
fn page_types_or_all(page_types: &[PageType]) -> &[PageType] {
    if page_types.is_empty() { &PageType::ALL } else { page_types }
}

/// Distinct macro names in encounter order.
pub fn rule_names(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for caps in TOKEN.captures_iter(template) {
        if let Some(name) = caps.get(1).map(|m| m.as_str())
            && !names.contains(&name)
        {
            names.push(name);
        }
    }
    names
}

impl TemplateReplacer {
    pub fn add_replacer(&mut self, name: &str, replacement: Replacement, page_types: &[PageType]) {
        let memo = self.memo.get_mut();
        for page_type in page_types_or_all(page_types) {
            let key = (name.to_owned(), *page_type);
            memo.remove(&key);
            self.rules.insert(key, replacement.clone());
        }
    }

    pub fn add_fallback<F>(&mut self, page_types: &[PageType], fallback: F)
    where
        F: Fn(&str, Option<Subject<'_>>) -> Option<String> + 'static,
    {
        let fallback: Rc<FallbackFn> = Rc::new(fallback);
        for page_type in page_types_or_all(page_types) {
            self.fallbacks.entry(*page_type).or_default().push(Rc::clone(&fallback));
        }
    }

    pub fn replace(
        &self,
        req: &Request<'_>,
        template: &str,
        subject: Option<Subject<'_>>,
        page_type: PageType,
    ) -> String {
        if !template.contains("%%") {
            return escape_html(&collapse_whitespace(template));
        }

        let values: FxHashMap<&str, String> = rule_names(template)
            .into_iter()
            .map(|name| (name, self.resolve(req, name, subject, page_type)))
            .collect();

        let replaced = TOKEN.replace_all(template, |caps: &Captures<'_>| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        });

        escape_html(&collapse_whitespace(&replaced))
    }

    /// First non-empty value in precedence order, else empty.
    fn resolve(&self, req: &Request<'_>, name: &str, subject: Option<Subject<'_>>, page_type: PageType) -> String {
        let non_empty = |value: &String| !value.is_empty();

        self.custom(name, subject, page_type)
            .filter(non_empty)
            .or_else(|| builtin::resolve(req, name, subject).filter(non_empty))
            .or_else(|| req.page.query_vars.get(name).cloned().filter(non_empty))
            .or_else(|| {
                name.strip_prefix("meta_")
                    .and_then(|meta| subject?.meta(meta))
                    .filter(non_empty)
            })
            .or_else(|| subject.and_then(|s| s.property(name)).filter(non_empty))
            .or_else(|| {
                self.fallbacks
                    .get(&page_type)?
                    .iter()
                    .find_map(|fallback| fallback(name, subject).filter(non_empty))
            })
            .unwrap_or_default()
    }

    /// A registered replacer's value; callback results are memoized.
    fn custom(&self, name: &str, subject: Option<Subject<'_>>, page_type: PageType) -> Option<String> {
        let key = (name.to_owned(), page_type);
        match self.rules.get(&key)? {
            Replacement::Value(value) => Some(value.clone()),
            Replacement::Callback(callback) => {
                if let Some(value) = self.memo.borrow().get(&key) {
                    return Some(value.clone());
                }
                let value = callback(subject);
                self.memo.borrow_mut().insert(key, value.clone());
                Some(value)
            }
        }
    }
}
