//! Built-in macro table.

use chrono::{Datelike, Utc};

use crate::context::{PageType, Subject};
use crate::request::Request;
use crate::utils::{
    date,
    html::{collapse_whitespace, strip_tags, truncate},
};

/// Value of a built-in macro, `None` when `name` is not built in or does
/// not apply to `subject`.
pub(super) fn resolve(req: &Request<'_>, name: &str, subject: Option<Subject<'_>>) -> Option<String> {
    let base = &req.config.base;
    let page = req.page;

    let value = match name {
        "sep" => base.separator.clone(),
        "sitename" => base.title.clone(),
        "sitedesc" => base.description.clone(),
        "language" => base.language.clone(),
        "title" => title(req, subject)?,
        "excerpt" => excerpt(req, subject)?,
        "resume" => truncate(&excerpt(req, subject)?, base.excerpt_length),
        "date" => match subject {
            Some(Subject::Post(post)) => date::reformat(&post.date, &base.date_format),
            _ => archive_date(req)?,
        },
        "created" => date::reformat(&subject?.as_post()?.date, &base.date_format),
        "modified" => {
            let post = subject?.as_post()?;
            let modified = if post.modified.is_empty() { &post.date } else { &post.modified };
            date::reformat(modified, &base.date_format)
        }
        "found_post" => page.found_posts.to_string(),
        "pagenumber" => page.page_number.to_string(),
        "pagetotal" => page.max_pages.to_string(),
        "page" if page.is_paged() => format!(
            "{} {} of {}",
            req.config.breadcrumb.page_prefix, page.page_number, page.max_pages
        ),
        "page" => String::new(),
        "search" => page.search.clone()?,
        "currentyear" => Utc::now().year().to_string(),
        "author" => author(req, subject)?,
        "term_title" => match subject? {
            Subject::Term(term) => term.name.clone(),
            _ => return None,
        },
        "post_type" => match subject? {
            Subject::Post(post) => req
                .content
                .post_type(&post.post_type)
                .map_or_else(|| post.post_type.clone(), |pt| pt.label.clone()),
            Subject::PostType(pt) => pt.label.clone(),
            _ => return None,
        },
        _ => return None,
    };
    Some(value)
}

fn title(req: &Request<'_>, subject: Option<Subject<'_>>) -> Option<String> {
    if let Some(subject) = subject {
        return Some(subject.title().to_owned());
    }
    match req.page.page_type {
        PageType::Date => archive_date(req),
        PageType::Search => req.page.search.clone(),
        PageType::Home => Some(req.config.base.title.clone()),
        _ => None,
    }
}

/// Manual excerpt, else the start of the content.
fn excerpt(req: &Request<'_>, subject: Option<Subject<'_>>) -> Option<String> {
    let text = match subject? {
        Subject::Post(post) if !post.excerpt.trim().is_empty() => strip_tags(&post.excerpt),
        Subject::Post(post) => truncate(
            &collapse_whitespace(&strip_tags(&post.content)),
            req.config.base.excerpt_length,
        ),
        Subject::Term(term) => strip_tags(&term.description),
        Subject::User(user) => strip_tags(&user.description),
        Subject::PostType(pt) => strip_tags(&pt.description),
    };
    Some(collapse_whitespace(&text))
}

fn author(req: &Request<'_>, subject: Option<Subject<'_>>) -> Option<String> {
    match subject? {
        Subject::Post(post) => req
            .content
            .user(post.author_id()?)
            .map(|user| user.display_name.clone()),
        Subject::User(user) => Some(user.display_name.clone()),
        _ => None,
    }
}

fn archive_date(req: &Request<'_>) -> Option<String> {
    let parts = req.page.date?;
    Some(date::archive_label(
        parts.year,
        parts.month,
        parts.day,
        &req.config.base.date_format,
    ))
}

#[cfg(test)]
mod tests {
    use crate::context::{PageType, Subject};
    use crate::request::fixture::Fixture;

    #[test]
    fn test_site_macros() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"home\"");
        let req = fx.request(&page);

        assert_eq!(
            req.replace_current("%%sitename%% %%sep%% %%sitedesc%% (%%language%%)"),
            "Field Notes | Notes from the field (en-US)"
        );
        assert_eq!(req.replace_current("%%title%%"), "Field Notes");
    }

    #[test]
    fn test_post_macros() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);

        assert_eq!(req.replace_current("%%excerpt%%"), "Meltwater season.");
        assert_eq!(req.replace_current("%%date%%"), "March 9, 2024");
        assert_eq!(req.replace_current("%%created%%"), "March 9, 2024");
        assert_eq!(req.replace_current("%%modified%%"), "March 10, 2024");
        assert_eq!(req.replace_current("%%author%%"), "Mara Ode");
        assert_eq!(req.replace_current("%%post_type%%"), "Posts");
    }

    #[test]
    fn test_resume_truncates_content() {
        let fx = Fixture::with_config(
            "[base]\ntitle = \"T\"\nurl = \"https://notes.test\"\nexcerpt_length = 15\n",
        );
        let page = fx.page("page_type = \"post\"\nobject = 3");
        let req = fx.request(&page);
        let mut about = req.content.post(3).unwrap().clone();
        about.content = "<p>We walk rivers and write about them.</p>".into();

        assert_eq!(
            req.replace("%%resume%%", Some(Subject::Post(&about)), PageType::Post),
            "We walk rivers…"
        );
    }

    #[test]
    fn test_post_only_macros_on_terms() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"term\"\nobject = 21");
        let req = fx.request(&page);

        assert_eq!(req.replace_current("%%modified%%"), "");
        assert_eq!(req.replace_current("%%term_title%%"), "Water");
        assert_eq!(req.replace_current("%%title%%"), "Water");
    }

    #[test]
    fn test_paging_macros() {
        let fx = Fixture::new();
        let paged = fx.page("page_type = \"term\"\nobject = 20\npage = 2\nmax_pages = 3\nfound_posts = 25");
        let req = fx.request(&paged);
        assert_eq!(
            req.replace_current("%%pagenumber%%/%%pagetotal%% %%found_post%% %%page%%"),
            "2/3 25 Page 2 of 3"
        );

        let first = fx.page("page_type = \"term\"\nobject = 20");
        let req = fx.request(&first);
        assert_eq!(req.replace_current("%%term_title%% %%page%%"), "Nature");
    }

    #[test]
    fn test_archive_and_search_macros() {
        let fx = Fixture::new();
        let date = fx.page("page_type = \"date\"\nyear = 2024\nmonth = 3");
        let req = fx.request(&date);
        assert_eq!(req.replace_current("%%date%% / %%title%%"), "March 2024 / March 2024");

        let search = fx.page("page_type = \"search\"\nsearch = \"ice & snow\"");
        let req = fx.request(&search);
        assert_eq!(req.replace_current("%%search%%"), "ice &amp; snow");
    }

    #[test]
    fn test_currentyear() {
        use chrono::Datelike;
        let fx = Fixture::new();
        let page = fx.page("page_type = \"home\"");
        let req = fx.request(&page);
        assert_eq!(
            req.replace_current("%%currentyear%%"),
            chrono::Utc::now().year().to_string()
        );
    }
}
