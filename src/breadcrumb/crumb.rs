use serde::Serialize;

/// What a crumb points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrumbKind {
    /// A post, by id.
    IdRef,
    /// A taxonomy term.
    TermRef,
    /// Several terms shown as one dropdown.
    TermList,
    /// Plain label, with or without a url.
    Literal,
}

/// Resolved text and url of a crumb.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrumbValue {
    pub text: String,
    pub url: String,
    /// Text is trusted markup and rendered unescaped.
    #[serde(skip)]
    pub allow_html: bool,
}

impl CrumbValue {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            allow_html: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub kind: CrumbKind,
    /// One value, or every term of a `TermList`.
    pub values: Vec<CrumbValue>,
}

impl Crumb {
    pub fn literal(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::single(CrumbKind::Literal, CrumbValue::new(text, url))
    }

    pub fn post(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::single(CrumbKind::IdRef, CrumbValue::new(text, url))
    }

    pub fn term(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::single(CrumbKind::TermRef, CrumbValue::new(text, url))
    }

    pub fn term_list(values: Vec<CrumbValue>) -> Self {
        Self {
            kind: CrumbKind::TermList,
            values,
        }
    }

    pub fn single(kind: CrumbKind, value: CrumbValue) -> Self {
        Self {
            kind,
            values: vec![value],
        }
    }

    pub fn first(&self) -> Option<&CrumbValue> {
        self.values.first()
    }

    pub fn text(&self) -> &str {
        self.first().map_or("", |v| v.text.as_str())
    }

    pub fn url(&self) -> &str {
        self.first().map_or("", |v| v.url.as_str())
    }

    /// A crumb with no visible text.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(CrumbValue::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crumb_accessors() {
        let crumb = Crumb::post("About", "https://a.test/about/");
        assert_eq!(crumb.kind, CrumbKind::IdRef);
        assert_eq!(crumb.text(), "About");
        assert_eq!(crumb.url(), "https://a.test/about/");
        assert!(!crumb.is_empty());
    }

    #[test]
    fn test_empty_crumbs() {
        assert!(Crumb::literal("  ", "https://a.test/").is_empty());
        assert!(Crumb::term_list(Vec::new()).is_empty());
        assert_eq!(Crumb::term_list(Vec::new()).text(), "");
    }
}
