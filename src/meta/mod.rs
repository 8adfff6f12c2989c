//! Head metadata: titles, descriptions, robots, social tags.
//!
//! ```text
//! Strategy (per page type) ──► FieldFilters ──► %%macro%% replacement ──► cleanup ──► cache
//!                                                                                      │
//!                                                       Presenter ◄── MetadataGenerator┘
//! ```
//!
//! Each field is generated at most once per request; see
//! [`MetadataGenerator`].

mod filters;
mod generator;
mod presenter;
pub mod strategy;

pub use filters::{Field, FieldFilters, FilterFn};
pub use generator::{MetadataGenerator, with_sitename};
pub use presenter::{Presentation, Presenter, Tag, TagKind};
pub use strategy::{Robots, Strategy, strategy_for};
