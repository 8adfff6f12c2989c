//! Url helpers: absolutizing, slash cleanup, pagination and search links.

use regex::Regex;
use std::sync::LazyLock;

/// Two or more slashes not preceded by a scheme colon.
static MULTI_SLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^:/])/{2,}").unwrap());

/// Whether the url already carries a scheme or is protocol-relative.
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("//") || url.contains("://") || url.starts_with("mailto:")
}

/// Collapse runs of slashes in the path part, keeping `scheme://` intact.
pub fn collapse_slashes(url: &str) -> String {
    MULTI_SLASH.replace_all(url, "$1/").into_owned()
}

/// Prefix a relative url with the home url.
pub fn absolutize(url: &str, home: &str) -> String {
    if url.is_empty() || is_absolute(url) {
        return url.to_owned();
    }
    format!(
        "{}/{}",
        home.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

/// Ensure a trailing slash on a path-like url (query strings untouched).
pub fn trailing_slash(url: &str) -> String {
    if url.ends_with('/') || url.contains('?') || url.contains('#') {
        url.to_owned()
    } else {
        format!("{url}/")
    }
}

/// Url of page `n` of a paginated listing rooted at `base`.
pub fn paged_url(base: &str, n: u32) -> String {
    if n <= 1 {
        return base.to_owned();
    }
    match base.split_once('?') {
        Some((path, query)) => format!("{}page/{n}/?{query}", trailing_slash(path)),
        None => format!("{}page/{n}/", trailing_slash(base)),
    }
}

/// Search results url for `query`.
pub fn search_url(home: &str, query: &str) -> String {
    format!("{}?s={}", trailing_slash(home), urlencoding::encode(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_slashes() {
        assert_eq!(
            collapse_slashes("https://a.test//b///c/"),
            "https://a.test/b/c/"
        );
        assert_eq!(collapse_slashes("/a//b"), "/a/b");
        assert_eq!(collapse_slashes("http://a.test/"), "http://a.test/");
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("/about/", "https://a.test/"),
            "https://a.test/about/"
        );
        assert_eq!(absolutize("about", "https://a.test"), "https://a.test/about");
        assert_eq!(
            absolutize("https://b.test/x", "https://a.test/"),
            "https://b.test/x"
        );
        assert_eq!(absolutize("", "https://a.test/"), "");
    }

    #[test]
    fn test_paged_url() {
        assert_eq!(paged_url("https://a.test/news/", 1), "https://a.test/news/");
        assert_eq!(
            paged_url("https://a.test/news", 3),
            "https://a.test/news/page/3/"
        );
        assert_eq!(
            paged_url("https://a.test/?s=ice", 2),
            "https://a.test/page/2/?s=ice"
        );
    }

    #[test]
    fn test_search_url() {
        assert_eq!(
            search_url("https://a.test", "rust & go"),
            "https://a.test/?s=rust%20%26%20go"
        );
    }
}
