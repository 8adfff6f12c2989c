//! Text cleanup shared by every generated field.
//!
//! - [`strip_tags`]: drop markup (and the bodies of `script`/`style`)
//! - [`collapse_whitespace`]: fold runs of whitespace into one space
//! - [`escape_html`]: escape for attribute/text context, never double-encoding
//! - [`unescape_html`]: reverse the escapes above for JSON output
//! - [`truncate`]: cut at a word boundary for excerpts

use regex::Regex;
use std::sync::LazyLock;

/// `script`/`style` elements including their content.
static RAW_TEXT_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .unwrap()
});

/// Any other tag or comment.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z][^>]*>").unwrap());

/// An already-encoded character reference.
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
        .unwrap()
});

/// Remove HTML tags, and `script`/`style` elements together with their bodies.
pub fn strip_tags(s: &str) -> String {
    if !s.contains('<') {
        return s.to_owned();
    }
    let without_raw = RAW_TEXT_ELEMENTS.replace_all(s, "");
    TAG.replace_all(&without_raw, "").into_owned()
}

/// Collapse every run of whitespace (including newlines) into a single space
/// and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape `& < > " '` for HTML. An `&` that already starts a character
/// reference is left alone, so escaping twice is a no-op.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for (i, c) in s.char_indices() {
        match c {
            '&' if ENTITY.is_match(&s[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Undo [`escape_html`] for the references it produces, for consumers that
/// are not HTML (JSON-LD).
pub fn unescape_html(s: &str) -> String {
    if !s.contains('&') {
        return s.to_owned();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// The full cleanup applied to generated text fields.
pub fn clean_text(s: &str) -> String {
    escape_html(&collapse_whitespace(&strip_tags(s)))
}

/// Truncate to at most `max_chars` characters, backing up to the last word
/// boundary and appending an ellipsis when something was cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_owned();
    }
    let cut: String = s.chars().take(max_chars).collect();
    let head = match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}…", head.trim_end_matches(|c: char| c.is_whitespace() || c == ','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello <b>World</b></p>"), "Hello World");
        assert_eq!(strip_tags("no markup"), "no markup");
        assert_eq!(strip_tags("a < b"), "a < b");
    }

    #[test]
    fn test_strip_tags_script_body() {
        assert_eq!(
            strip_tags("Hi<script type=\"x\">alert('x')</script> there<style>p{}</style>"),
            "Hi there"
        );
        assert_eq!(strip_tags("<!-- note -->text"), "text");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\n b\t c  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
        assert_eq!(escape_html("<b>"), "&lt;b&gt;");
        assert_eq!(escape_html("it's"), "it&#039;s");
    }

    #[test]
    fn test_escape_html_no_double_encoding() {
        assert_eq!(escape_html("&amp; &#039; &raquo;"), "&amp; &#039; &raquo;");
        let once = escape_html("R&D <team>");
        assert_eq!(escape_html(&once), once);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("<p>Fish &\n chips</p>"), "Fish &amp; chips");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("the quick brown fox", 12), "the quick…");
        assert_eq!(truncate("abcdefghij", 4), "abcd…");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let raw = r#"Tom & "Jerry" <b>'s</b>"#;
        assert_eq!(unescape_html(&escape_html(raw)), raw);
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
        assert_eq!(unescape_html("plain"), "plain");
    }
}
