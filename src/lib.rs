//! pagemeta - page metadata engine.
//!
//! Given a classified request ([`PageContext`]) and per page-type templates
//! ([`SiteConfig`]), produces:
//!
//! - head fields (title, description, robots, canonical, Open Graph, Twitter)
//!   through [`MetadataGenerator`] and [`Presenter`]
//! - a breadcrumb trail and its microdata markup ([`Breadcrumb`])
//! - a schema.org JSON-LD graph ([`GraphDocument`])
//!
//! Everything runs through one [`Request`], which borrows the host's
//! collaborators and memoizes the outputs for the request's lifetime.

pub mod breadcrumb;
pub mod cache;
pub mod config;
pub mod context;
pub mod data;
pub mod logger;
pub mod meta;
pub mod replace;
pub mod request;
pub mod schema;
pub mod utils;

pub use breadcrumb::{Breadcrumb, Crumb, CrumbKind, CrumbValue};
pub use cache::{Cache, MemoryCache, NoCache};
pub use config::{ConfigError, SiteConfig};
pub use context::{PageContext, PageRequest, PageType, QueriedObject, Subject};
pub use data::{ContentProvider, ContentStore, Permalinks, StoreError};
pub use meta::{Field, MetadataGenerator, Presentation, Presenter, Tag, TagKind};
pub use replace::Replacement;
pub use request::Request;
pub use schema::{GraphDocument, GraphEdit, Node};
