//! Content lookup.
//!
//! The generators never fetch content themselves: they go through
//! [`ContentProvider`], which the host implements over whatever storage it
//! has. [`ContentStore`] is the in-memory implementation used by the CLI and
//! the tests.
//!
//! # Architecture
//!
//! ```text
//! host content layer ──► ContentProvider ──► Permalinks (url rules)
//!                               │
//!                               ├──► PageContext::resolve
//!                               ├──► breadcrumb trail
//!                               └──► schema graph
//! ```

mod store;
mod types;

pub use store::{ContentStore, StoreError};
pub use types::{Post, PostType, Taxonomy, Term, User};

use crate::utils::url::trailing_slash;

/// Guard against parent cycles in malformed content.
pub const MAX_DEPTH: usize = 64;

/// Read access to the host's content.
pub trait ContentProvider {
    fn post(&self, id: u64) -> Option<&Post>;

    fn term(&self, id: u64) -> Option<&Term>;

    fn user(&self, id: u64) -> Option<&User>;

    fn post_type(&self, name: &str) -> Option<&PostType>;

    fn taxonomy(&self, name: &str) -> Option<&Taxonomy>;

    /// Terms of `taxonomy` assigned to `post`, in assignment order.
    /// Ids that do not resolve are skipped.
    fn post_terms(&self, post: &Post, taxonomy: &str) -> Vec<&Term> {
        post.term_ids(taxonomy)
            .iter()
            .filter_map(|id| self.term(*id))
            .filter(|term| term.taxonomy == taxonomy)
            .collect()
    }

    /// Ancestors of a post, oldest first (the post itself excluded).
    fn post_ancestors(&self, post: &Post) -> Vec<&Post> {
        let mut chain = Vec::new();
        let mut next = post.parent_id();
        while let Some(id) = next {
            if chain.len() >= MAX_DEPTH || id == post.id {
                break;
            }
            let Some(parent) = self.post(id) else { break };
            chain.push(parent);
            next = parent.parent_id();
        }
        chain.reverse();
        chain
    }

    /// Ancestors of a term, oldest first (the term itself excluded).
    fn term_ancestors(&self, term: &Term) -> Vec<&Term> {
        let mut chain = Vec::new();
        let mut next = term.parent_id();
        while let Some(id) = next {
            if chain.len() >= MAX_DEPTH || id == term.id {
                break;
            }
            let Some(parent) = self.term(id) else { break };
            chain.push(parent);
            next = parent.parent_id();
        }
        chain.reverse();
        chain
    }
}

/// Url rules for every entity kind, rooted at the home url.
pub struct Permalinks<'a> {
    home: &'a str,
    content: &'a dyn ContentProvider,
}

impl<'a> Permalinks<'a> {
    pub fn new(home: &'a str, content: &'a dyn ContentProvider) -> Self {
        Self { home, content }
    }

    fn join(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return trailing_slash(self.home);
        }
        format!("{}{path}/", trailing_slash(self.home))
    }

    /// Explicit permalink, else `{home}/{ancestor-slugs}/{slug}/` (with the
    /// post type base for non-`post`/`page` types).
    pub fn post(&self, post: &Post) -> String {
        if !post.permalink.is_empty() {
            return post.permalink.clone();
        }

        let mut segments: Vec<&str> = Vec::new();
        if !matches!(post.post_type.as_str(), "post" | "page" | "attachment") {
            match self.content.post_type(&post.post_type) {
                Some(pt) => segments.push(pt.base()),
                None => segments.push(&post.post_type),
            }
        }
        let ancestors = self.content.post_ancestors(post);
        segments.extend(ancestors.iter().map(|p| p.slug.as_str()));
        segments.push(&post.slug);

        self.join(&segments.join("/"))
    }

    /// Hierarchical term url: `{home}/{base}/{ancestor-slugs}/{slug}/`.
    pub fn term(&self, term: &Term) -> String {
        let base = self.taxonomy_base(&term.taxonomy);
        let ancestors = self.content.term_ancestors(term);
        let mut segments: Vec<&str> = vec![&base];
        segments.extend(ancestors.iter().map(|t| t.slug.as_str()));
        segments.push(&term.slug);
        self.join(&segments.join("/"))
    }

    /// Compact term url: `{home}/{base}/{slug}/`, no ancestors.
    pub fn term_compact(&self, term: &Term) -> String {
        self.join(&format!("{}/{}", self.taxonomy_base(&term.taxonomy), term.slug))
    }

    fn taxonomy_base(&self, taxonomy: &str) -> String {
        match self.content.taxonomy(taxonomy) {
            Some(tax) => tax.base().to_owned(),
            None => taxonomy.to_owned(),
        }
    }

    pub fn author(&self, user: &User) -> String {
        self.join(&format!("author/{}", user.nicename))
    }

    /// Archive url of a post type; `None` when it has no archive.
    pub fn archive(&self, post_type: &PostType) -> Option<String> {
        if let Some(url) = &post_type.archive_url {
            return Some(url.clone());
        }
        post_type.has_archive.then(|| self.join(post_type.base()))
    }

    pub fn date(&self, year: i32, month: Option<u32>, day: Option<u32>) -> String {
        match (month, day) {
            (Some(m), Some(d)) => self.join(&format!("{year}/{m:02}/{d:02}")),
            (Some(m), None) => self.join(&format!("{year}/{m:02}")),
            _ => self.join(&year.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ContentStore {
        ContentStore::from_str(
            r#"
            [[posts]]
            id = 1
            post_type = "page"
            title = "About"

            [[posts]]
            id = 2
            post_type = "page"
            title = "Team"
            parent = 1

            [[posts]]
            id = 3
            post_type = "book"
            title = "Dune"

            [[post_types]]
            name = "book"
            label = "Books"
            has_archive = true
            rewrite_slug = "library"

            [[terms]]
            id = 10
            taxonomy = "category"
            name = "Science"

            [[terms]]
            id = 11
            taxonomy = "category"
            name = "Physics"
            parent = 10

            [[users]]
            id = 5
            display_name = "Ada Lovelace"
        "#,
        )
        .unwrap()
    }

    #[test]
    fn test_post_permalinks() {
        let store = store();
        let links = Permalinks::new("https://a.test/", &store);

        assert_eq!(links.post(store.post(1).unwrap()), "https://a.test/about/");
        assert_eq!(
            links.post(store.post(2).unwrap()),
            "https://a.test/about/team/"
        );
        assert_eq!(
            links.post(store.post(3).unwrap()),
            "https://a.test/library/dune/"
        );
    }

    #[test]
    fn test_term_permalinks() {
        let store = store();
        let links = Permalinks::new("https://a.test", &store);
        let physics = store.term(11).unwrap();

        assert_eq!(links.term(physics), "https://a.test/category/science/physics/");
        assert_eq!(links.term_compact(physics), "https://a.test/category/physics/");
    }

    #[test]
    fn test_other_permalinks() {
        let store = store();
        let links = Permalinks::new("https://a.test/", &store);

        assert_eq!(
            links.author(store.user(5).unwrap()),
            "https://a.test/author/ada-lovelace/"
        );
        assert_eq!(
            links.archive(store.post_type("book").unwrap()).as_deref(),
            Some("https://a.test/library/")
        );
        assert_eq!(links.archive(store.post_type("page").unwrap()), None);
        assert_eq!(links.date(2024, Some(3), None), "https://a.test/2024/03/");
    }

    #[test]
    fn test_ancestors_oldest_first() {
        let store = store();
        let team = store.post(2).unwrap();
        let chain: Vec<u64> = store.post_ancestors(team).iter().map(|p| p.id).collect();
        assert_eq!(chain, vec![1]);

        let physics = store.term(11).unwrap();
        let chain: Vec<u64> = store.term_ancestors(physics).iter().map(|t| t.id).collect();
        assert_eq!(chain, vec![10]);
    }

    #[test]
    fn test_post_terms_skips_missing() {
        let mut store = store();
        let mut post = store.post(3).unwrap().clone();
        post.terms.insert("category".into(), vec![11, 99, 10]);
        store.insert_post(post.clone());

        let names: Vec<&str> = store
            .post_terms(&post, "category")
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Physics", "Science"]);
    }
}
