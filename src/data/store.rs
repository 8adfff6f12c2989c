//! In-memory content storage.
//!
//! Loads a TOML fixture of posts, terms, users, post types and taxonomies,
//! fills in derived fields (slugs, nicenames, permalinks) and rejects
//! content the generators could not walk safely.
//!
//! ```toml
//! [[posts]]
//! id = 1
//! post_type = "page"
//! title = "About"
//!
//! [[terms]]
//! id = 3
//! taxonomy = "category"
//! name = "News"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use super::types::{Post, PostType, Taxonomy, Term, User};
use super::{ContentProvider, Permalinks};
use crate::utils::slug::slugify;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read content `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("content file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u64 },

    #[error("{kind} id must be non-zero")]
    ZeroId { kind: &'static str },

    #[error("{kind} {id} has a parent cycle")]
    ParentCycle { kind: &'static str, id: u64 },
}

/// Raw fixture layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Fixture {
    posts: Vec<Post>,
    terms: Vec<Term>,
    users: Vec<User>,
    post_types: Vec<PostType>,
    taxonomies: Vec<Taxonomy>,
}

/// Content keyed by id (and by name for descriptors).
#[derive(Debug, Clone)]
pub struct ContentStore {
    posts: BTreeMap<u64, Post>,
    terms: BTreeMap<u64, Term>,
    users: BTreeMap<u64, User>,
    post_types: BTreeMap<String, PostType>,
    taxonomies: BTreeMap<String, Taxonomy>,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore {
    /// Empty store with the built-in post types and taxonomies.
    pub fn new() -> Self {
        let mut store = Self {
            posts: BTreeMap::new(),
            terms: BTreeMap::new(),
            users: BTreeMap::new(),
            post_types: BTreeMap::new(),
            taxonomies: BTreeMap::new(),
        };
        for (name, label, hierarchical) in [
            ("post", "Posts", false),
            ("page", "Pages", true),
            ("attachment", "Media", false),
        ] {
            store.insert_post_type(PostType {
                name: name.into(),
                label: label.into(),
                hierarchical,
                ..PostType::default()
            });
        }
        store.insert_taxonomy(Taxonomy {
            name: "category".into(),
            label: "Categories".into(),
            hierarchical: true,
            rewrite_slug: None,
            object_types: vec!["post".into()],
        });
        store.insert_taxonomy(Taxonomy {
            name: "post_tag".into(),
            label: "Tags".into(),
            hierarchical: false,
            rewrite_slug: Some("tag".into()),
            object_types: vec!["post".into()],
        });
        store
    }

    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).map_err(|err| StoreError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, StoreError> {
        let fixture: Fixture = toml::from_str(content)?;
        let mut store = Self::new();

        for post_type in fixture.post_types {
            store.insert_post_type(post_type);
        }
        for taxonomy in fixture.taxonomies {
            store.insert_taxonomy(taxonomy);
        }
        for post in fixture.posts {
            if post.id == 0 {
                return Err(StoreError::ZeroId { kind: "post" });
            }
            if store.posts.contains_key(&post.id) {
                return Err(StoreError::DuplicateId { kind: "post", id: post.id });
            }
            store.insert_post(post);
        }
        for term in fixture.terms {
            if term.id == 0 {
                return Err(StoreError::ZeroId { kind: "term" });
            }
            if store.terms.contains_key(&term.id) {
                return Err(StoreError::DuplicateId { kind: "term", id: term.id });
            }
            store.insert_term(term);
        }
        for user in fixture.users {
            if user.id == 0 {
                return Err(StoreError::ZeroId { kind: "user" });
            }
            if store.users.contains_key(&user.id) {
                return Err(StoreError::DuplicateId { kind: "user", id: user.id });
            }
            store.insert_user(user);
        }

        store.check_cycles()?;
        Ok(store)
    }

    /// Insert or replace a post. An empty slug is derived from the title.
    pub fn insert_post(&mut self, mut post: Post) {
        if post.slug.is_empty() {
            post.slug = slugify(&post.title);
        }
        self.posts.insert(post.id, post);
    }

    /// Insert or replace a term. An empty slug is derived from the name.
    pub fn insert_term(&mut self, mut term: Term) {
        if term.slug.is_empty() {
            term.slug = slugify(&term.name);
        }
        self.terms.insert(term.id, term);
    }

    /// Insert or replace a user. An empty nicename is derived from the
    /// display name.
    pub fn insert_user(&mut self, mut user: User) {
        if user.nicename.is_empty() {
            user.nicename = slugify(&user.display_name);
        }
        self.users.insert(user.id, user);
    }

    pub fn insert_post_type(&mut self, post_type: PostType) {
        self.post_types.insert(post_type.name.clone(), post_type);
    }

    pub fn insert_taxonomy(&mut self, taxonomy: Taxonomy) {
        self.taxonomies.insert(taxonomy.name.clone(), taxonomy);
    }

    /// Fill in empty post permalinks relative to `home`.
    pub fn resolve_permalinks(&mut self, home: &str) {
        let resolved: Vec<(u64, String)> = {
            let links = Permalinks::new(home, &*self);
            self.posts
                .values()
                .filter(|post| post.permalink.is_empty())
                .map(|post| (post.id, links.post(post)))
                .collect()
        };
        for (id, permalink) in resolved {
            if let Some(post) = self.posts.get_mut(&id) {
                post.permalink = permalink;
            }
        }
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    pub fn len(&self) -> usize {
        self.posts.len() + self.terms.len() + self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_cycles(&self) -> Result<(), StoreError> {
        for post in self.posts.values() {
            let mut seen = FxHashSet::default();
            seen.insert(post.id);
            let mut next = post.parent_id();
            while let Some(id) = next {
                if !seen.insert(id) {
                    return Err(StoreError::ParentCycle { kind: "post", id: post.id });
                }
                next = self.posts.get(&id).and_then(Post::parent_id);
            }
        }
        for term in self.terms.values() {
            let mut seen = FxHashSet::default();
            seen.insert(term.id);
            let mut next = term.parent_id();
            while let Some(id) = next {
                if !seen.insert(id) {
                    return Err(StoreError::ParentCycle { kind: "term", id: term.id });
                }
                next = self.terms.get(&id).and_then(Term::parent_id);
            }
        }
        Ok(())
    }
}

impl ContentProvider for ContentStore {
    fn post(&self, id: u64) -> Option<&Post> {
        self.posts.get(&id)
    }

    fn term(&self, id: u64) -> Option<&Term> {
        self.terms.get(&id)
    }

    fn user(&self, id: u64) -> Option<&User> {
        self.users.get(&id)
    }

    fn post_type(&self, name: &str) -> Option<&PostType> {
        self.post_types.get(name)
    }

    fn taxonomy(&self, name: &str) -> Option<&Taxonomy> {
        self.taxonomies.get(name)
    }
}
