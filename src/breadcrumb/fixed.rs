//! Fixed-mode trails: one rule per page type.

use crate::context::{PageType, Subject};
use crate::data::{Post, PostType, Term};
use crate::request::Request;
use crate::utils::{date, url::search_url};

use super::crumb::Crumb;
use super::terms;

/// Builds the trail up to (not including) the pagination crumb.
pub(super) fn trail(req: &Request<'_>) -> Vec<Crumb> {
    let config = &req.config.breadcrumb;
    let page = req.page;

    let mut crumbs = vec![Crumb::literal(&config.home_label, req.home_url())];
    if page.front_page {
        return crumbs;
    }

    match (page.page_type, req.subject()) {
        (PageType::Home, _) => crumbs.extend(blog_crumb(req)),
        (PageType::Post, Some(Subject::Post(post))) => singular(req, post, &mut crumbs),
        (PageType::Term, Some(Subject::Term(term))) => term_archive(req, term, &mut crumbs),
        (PageType::PostArchive, Some(Subject::PostType(post_type))) => {
            let url = req.links().archive(post_type).unwrap_or_default();
            crumbs.push(Crumb::literal(config.archive_label(&post_type.label), url));
        }
        (PageType::Date, _) => {
            crumbs.extend(blog_crumb(req));
            crumbs.extend(date_crumbs(req, true));
        }
        (PageType::User, Some(Subject::User(user))) => {
            let text = format!("{} {}", config.author_prefix, user.display_name);
            crumbs.push(Crumb::literal(text.trim(), req.links().author(user)));
        }
        (PageType::Search, _) => {
            let query = page.search.as_deref().unwrap_or_default();
            let text = format!("{} {query}", config.search_prefix);
            crumbs.push(Crumb::literal(text.trim(), search_url(req.home_url(), query)));
        }
        (PageType::NotFound, _) => {
            crumbs.extend(date_crumbs(req, false));
            crumbs.push(Crumb::literal(&config.not_found, ""));
        }
        _ => {}
    }
    crumbs
}

/// The static posts page, when configured.
fn blog_crumb(req: &Request<'_>) -> Option<Crumb> {
    if !req.config.breadcrumb.show_blog {
        return None;
    }
    let posts_page = req.content.post(req.config.reading.posts_page?)?;
    Some(Crumb::post(&posts_page.title, req.links().post(posts_page)))
}

fn singular(req: &Request<'_>, post: &Post, crumbs: &mut Vec<Crumb>) {
    let config = &req.config.breadcrumb;
    let content = req.content;
    let links = req.links();

    if post.post_type == "attachment" {
        if let Some(parent) = post.parent_id().and_then(|id| content.post(id)) {
            if parent.post_type == "attachment" {
                crumbs.push(Crumb::post(&parent.title, links.post(parent)));
            } else {
                singular(req, parent, crumbs);
            }
        }
        crumbs.push(Crumb::post(&post.title, links.post(post)));
        return;
    }

    if post.post_type == "post" {
        crumbs.extend(blog_crumb(req));
    }

    let post_type = content.post_type(&post.post_type);
    if config.show_post_type_archive
        && !matches!(post.post_type.as_str(), "post" | "page")
        && let Some(archive) = post_type.and_then(|pt| archive_crumb(req, pt))
    {
        crumbs.push(archive);
    }

    if post_type.is_some_and(|pt| pt.hierarchical) {
        for ancestor in content.post_ancestors(post) {
            crumbs.push(Crumb::post(&ancestor.title, links.post(ancestor)));
        }
    } else if let Some(taxonomy) = config.main_taxonomy(&post.post_type) {
        let assigned = content.post_terms(post, taxonomy);
        if let Some(term) = terms::deepest(content, &assigned) {
            crumbs.extend(terms::chain(content, &links, term));
        }
    }

    crumbs.push(Crumb::post(&post.title, links.post(post)));
}

fn archive_crumb(req: &Request<'_>, post_type: &PostType) -> Option<Crumb> {
    let url = req.links().archive(post_type)?;
    Some(Crumb::literal(&post_type.label, url))
}

fn term_archive(req: &Request<'_>, term: &Term, crumbs: &mut Vec<Crumb>) {
    let config = &req.config.breadcrumb;
    let taxonomy = req.content.taxonomy(&term.taxonomy);

    if taxonomy.is_some_and(|tax| tax.applies_to("post")) {
        crumbs.extend(blog_crumb(req));
    }

    let mut chain = terms::chain(req.content, &req.links(), term);
    if let Some(last) = chain.last_mut().and_then(|crumb| crumb.values.first_mut()) {
        last.text = config.archive_label(&last.text);
    }
    crumbs.extend(chain);
}

/// Year, month and day crumbs of the request date. The deepest one carries
/// the archive prefix when `is_archive`.
fn date_crumbs(req: &Request<'_>, is_archive: bool) -> Vec<Crumb> {
    let Some(parts) = req.page.date else {
        return Vec::new();
    };
    let links = req.links();

    let mut crumbs = vec![Crumb::literal(
        parts.year.to_string(),
        links.date(parts.year, None, None),
    )];
    if let Some(month) = parts.month {
        let name = date::month_name(month).unwrap_or_else(|| month.to_string());
        crumbs.push(Crumb::literal(name, links.date(parts.year, Some(month), None)));
        if let Some(day) = parts.day {
            crumbs.push(Crumb::literal(
                day.to_string(),
                links.date(parts.year, Some(month), Some(day)),
            ));
        }
    }

    if is_archive && let Some(last) = crumbs.last_mut().and_then(|crumb| crumb.values.first_mut()) {
        last.text = req.config.breadcrumb.archive_label(&last.text);
    }
    crumbs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::fixture::Fixture;

    fn texts(fx: &Fixture, request: &str) -> Vec<String> {
        let page = fx.page(request);
        let req = fx.request(&page);
        trail(&req).iter().map(|c| c.text().to_owned()).collect()
    }

    #[test]
    fn test_front_page_is_home_only() {
        let fx = Fixture::new();
        assert_eq!(texts(&fx, "page_type = \"home\""), ["Home"]);
    }

    #[test]
    fn test_posts_page() {
        let fx = Fixture::new();
        assert_eq!(texts(&fx, "page_type = \"post\"\nobject = 2"), ["Home", "Journal"]);
    }

    #[test]
    fn test_single_post_follows_deepest_category() {
        let fx = Fixture::new();
        assert_eq!(
            texts(&fx, "page_type = \"post\"\nobject = 10"),
            ["Home", "Journal", "Nature", "Water", "Rivers in <em>Spring</em>"]
        );
    }

    #[test]
    fn test_hierarchical_page() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 4");
        let req = fx.request(&page);
        let crumbs = trail(&req);

        assert_eq!(
            crumbs.iter().map(Crumb::text).collect::<Vec<_>>(),
            ["Home", "About", "Team"]
        );
        assert_eq!(crumbs[1].url(), "https://notes.test/about/");
    }

    #[test]
    fn test_term_archive() {
        let fx = Fixture::new();
        assert_eq!(
            texts(&fx, "page_type = \"term\"\nobject = 21"),
            ["Home", "Journal", "Nature", "Water"]
        );
    }

    #[test]
    fn test_date_archives() {
        let fx = Fixture::new();
        assert_eq!(
            texts(&fx, "page_type = \"date\"\nyear = 2024\nmonth = 3\nday = 9"),
            ["Home", "Journal", "2024", "March", "9"]
        );

        let fx = Fixture::with_config(&format!(
            "{}\n[breadcrumb]\narchive_prefix = \"Archives for\"\nshow_blog = false\n",
            crate::request::fixture::CONFIG
        ));
        assert_eq!(
            texts(&fx, "page_type = \"date\"\nyear = 2024"),
            ["Home", "Archives for 2024"]
        );
    }

    #[test]
    fn test_author_and_search() {
        let fx = Fixture::new();
        assert_eq!(
            texts(&fx, "page_type = \"user\"\nobject = 1"),
            ["Home", "Archives for Mara Ode"]
        );

        let page = fx.page("page_type = \"search\"\nsearch = \"melt water\"");
        let req = fx.request(&page);
        let crumbs = trail(&req);
        assert_eq!(crumbs[1].text(), "Search results for melt water");
        assert_eq!(crumbs[1].url(), "https://notes.test/?s=melt%20water");
    }

    #[test]
    fn test_not_found_with_date_parts() {
        let fx = Fixture::new();
        assert_eq!(
            texts(&fx, "page_type = \"404\""),
            ["Home", "Error 404: Page not found"]
        );
        assert_eq!(
            texts(&fx, "page_type = \"404\"\nyear = 2023\nmonth = 11"),
            ["Home", "2023", "November", "Error 404: Page not found"]
        );
    }

    #[test]
    fn test_post_type_archive_and_single() {
        let mut fx = Fixture::new();
        fx.store.insert_post_type(PostType {
            name: "recipe".into(),
            label: "Recipes".into(),
            has_archive: true,
            ..PostType::default()
        });
        fx.store.insert_post(Post {
            id: 50,
            post_type: "recipe".into(),
            title: "Trout".into(),
            ..Post::default()
        });
        fx.store.resolve_permalinks("https://notes.test/");

        assert_eq!(
            texts(&fx, "page_type = \"post_archive\"\npost_type = \"recipe\""),
            ["Home", "Recipes"]
        );
        assert_eq!(
            texts(&fx, "page_type = \"post\"\nobject = 50"),
            ["Home", "Recipes", "Trout"]
        );
    }

    #[test]
    fn test_attachment_follows_parent() {
        let mut fx = Fixture::new();
        fx.store.insert_post(Post {
            id: 60,
            post_type: "attachment".into(),
            title: "river.jpg".into(),
            parent: 10,
            ..Post::default()
        });
        assert_eq!(
            texts(&fx, "page_type = \"post\"\nobject = 60"),
            ["Home", "Journal", "Nature", "Water", "Rivers in <em>Spring</em>", "river.jpg"]
        );
    }
}
