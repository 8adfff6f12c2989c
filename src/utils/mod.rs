//! Utility modules shared by the generators.

pub mod date;
pub mod html;
pub mod slug;
pub mod url;
