//! URL slugification.
//!
//! Content fixtures may omit slugs; they are derived from names here the same
//! way for posts, terms and users so generated urls stay stable.

use deunicode::deunicode;

use super::html::strip_tags;

/// Convert text to a lowercase ASCII slug: drop markup, transliterate, keep
/// `[a-z0-9]`, join everything else with single dashes.
///
/// | Input            | Output          |
/// |------------------|-----------------|
/// | `Hello World`    | `hello-world`   |
/// | `Café Crème`     | `cafe-creme`    |
/// | `你好`            | `ni-hao`        |
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(&strip_tags(text));
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
