//! Per-field transformer hooks.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::context::{PageContext, PageType};

/// A generated head field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Description,
    Keywords,
    Canonical,
    Robots,
    Prev,
    Next,
    Image,
}

impl Field {
    /// Cache key of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Keywords => "keywords",
            Self::Canonical => "canonical",
            Self::Robots => "robots",
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Image => "image",
        }
    }
}

pub type FilterFn = dyn Fn(String, &PageContext) -> String;

/// Filters registered for one request.
#[derive(Default)]
pub struct FieldFilters {
    generic: FxHashMap<Field, Vec<Box<FilterFn>>>,
    typed: FxHashMap<(Field, PageType), Vec<Box<FilterFn>>>,
}

impl FieldFilters {
    pub fn add<F>(&mut self, field: Field, page_type: Option<PageType>, filter: F)
    where
        F: Fn(String, &PageContext) -> String + 'static,
    {
        let filter: Box<FilterFn> = Box::new(filter);
        match page_type {
            Some(page_type) => self.typed.entry((field, page_type)).or_default().push(filter),
            None => self.generic.entry(field).or_default().push(filter),
        }
    }

    /// Run the generic filters of `field`, then those of the page's type.
    pub fn apply(&self, field: Field, value: String, page: &PageContext) -> String {
        let generic = self.generic.get(&field).into_iter().flatten();
        let typed = self.typed.get(&(field, page.page_type)).into_iter().flatten();
        generic
            .chain(typed)
            .fold(value, |value, filter| filter(value, page))
    }

    pub fn is_empty(&self) -> bool {
        self.generic.is_empty() && self.typed.is_empty()
    }
}
