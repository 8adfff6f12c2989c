//! Breadcrumb markup with schema.org microdata.

use std::fmt::Write;

use crate::config::BreadcrumbConfig;
use crate::utils::html::escape_html;

use super::crumb::{Crumb, CrumbKind, CrumbValue};

const LIST_ITEM: &str =
    r#"<span itemprop="itemListElement" itemscope itemtype="https://schema.org/ListItem">"#;

/// Render non-empty crumbs joined by the separator inside the wrapper.
/// Empty when there is nothing to show.
pub(super) fn render(crumbs: &[Crumb], config: &BreadcrumbConfig) -> String {
    let visible: Vec<&Crumb> = crumbs.iter().filter(|c| !c.is_empty()).collect();
    if visible.is_empty() {
        return String::new();
    }

    let separator = format!(r#"<span class="separator">{}</span>"#, config.separator);
    let last = visible.len() - 1;
    let items: Vec<String> = visible
        .iter()
        .enumerate()
        .map(|(index, crumb)| {
            let position = index + 1;
            match crumb.kind {
                CrumbKind::TermList => term_list(crumb, position),
                _ if index == last && config.highlight_last => current(crumb, position),
                _ if crumb.url().is_empty() => current(crumb, position),
                _ => link(crumb, position),
            }
        })
        .collect();

    format!(
        r#"<div class="{}" itemscope itemtype="https://schema.org/BreadcrumbList">{}</div>"#,
        escape_html(&config.wrapper_class),
        items.join(&separator)
    )
}

fn text(value: &CrumbValue) -> String {
    if value.allow_html {
        value.text.clone()
    } else {
        escape_html(&value.text)
    }
}

fn position_meta(position: usize) -> String {
    format!(r#"<meta itemprop="position" content="{position}" />"#)
}

fn link(crumb: &Crumb, position: usize) -> String {
    let url = escape_html(crumb.url());
    let name = crumb.first().map(text).unwrap_or_default();
    format!(
        r#"{LIST_ITEM}<a itemprop="item" itemscope itemtype="https://schema.org/WebPage" itemid="{url}" href="{url}"><span itemprop="name">{name}</span></a>{}</span>"#,
        position_meta(position)
    )
}

fn current(crumb: &Crumb, position: usize) -> String {
    let name = crumb.first().map(text).unwrap_or_default();
    format!(
        r#"{LIST_ITEM}<span class="last" itemprop="name">{name}</span>{}</span>"#,
        position_meta(position)
    )
}

/// A togglable list of every term; the first one labels the toggle.
fn term_list(crumb: &Crumb, position: usize) -> String {
    let mut out = String::new();
    let summary = crumb.first().map(text).unwrap_or_default();
    let _ = write!(
        out,
        r#"{LIST_ITEM}<details class="term-list"><summary itemprop="name">{summary}</summary><ul>"#
    );
    for value in crumb.values.iter().filter(|v| !v.is_empty()) {
        let _ = write!(
            out,
            r#"<li><a href="{}">{}</a></li>"#,
            escape_html(&value.url),
            text(value)
        );
    }
    let _ = write!(out, "</ul></details>{}</span>", position_meta(position));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail() -> Vec<Crumb> {
        vec![
            Crumb::literal("Home", "https://a.test/"),
            Crumb::literal("", "https://a.test/empty/"),
            Crumb::post("Fish & Chips", "https://a.test/fish/"),
        ]
    }

    #[test]
    fn test_highlight_last_has_no_href() {
        let html = render(&trail(), &BreadcrumbConfig::default());

        assert!(html.starts_with(
            r#"<div class="breadcrumbs" itemscope itemtype="https://schema.org/BreadcrumbList">"#
        ));
        assert!(html.contains(r#"href="https://a.test/""#));
        assert!(!html.contains(r#"href="https://a.test/fish/""#));
        assert!(html.contains(r#"<span class="last" itemprop="name">Fish &amp; Chips</span>"#));
        assert!(html.contains(r#"<meta itemprop="position" content="2" />"#));
        assert!(!html.contains("empty"));
        assert_eq!(html.matches(r#"<span class="separator">&raquo;</span>"#).count(), 1);
    }

    #[test]
    fn test_without_highlight_last_links_everything() {
        let config = BreadcrumbConfig {
            highlight_last: false,
            ..BreadcrumbConfig::default()
        };
        let html = render(&trail(), &config);

        assert!(html.contains(
            r#"<a itemprop="item" itemscope itemtype="https://schema.org/WebPage" itemid="https://a.test/fish/" href="https://a.test/fish/"><span itemprop="name">Fish &amp; Chips</span></a>"#
        ));
    }

    #[test]
    fn test_term_list() {
        let crumbs = vec![Crumb::term_list(vec![
            CrumbValue::new("Rust", "https://a.test/tag/rust/"),
            CrumbValue::new("Go", "https://a.test/tag/go/"),
        ])];
        let html = render(&crumbs, &BreadcrumbConfig::default());

        assert!(html.contains(r#"<summary itemprop="name">Rust</summary>"#));
        assert!(html.contains(r#"<li><a href="https://a.test/tag/go/">Go</a></li>"#));
    }

    #[test]
    fn test_allow_html_and_empty() {
        let mut value = CrumbValue::new("<b>Bold</b>", "");
        value.allow_html = true;
        let html = render(&[Crumb::single(CrumbKind::Literal, value)], &BreadcrumbConfig::default());
        assert!(html.contains("<b>Bold</b>"));

        assert_eq!(render(&[], &BreadcrumbConfig::default()), "");
    }
}
