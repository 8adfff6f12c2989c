//! Structured data (JSON-LD) graph.
//!
//! # Pipeline
//!
//! ```text
//! load_graphs ──► edits ──► GraphRegistry::build ──► clean::parse_graphs ──► export
//! (type names)   (host)     (one node per name)     (dedupe, strip, empty,
//!                                                    dangling refs)
//! ```
//!
//! Nodes reference each other by `@id` only. The ids are deterministic:
//! `{home}#website`, `{home}#organization`, `{url}#webpage`,
//! `{url}#breadcrumb`, `{permalink}#article` and `{author_url}#person`.
//! A bare reference to a node that is not in the graph is dropped.
//!
//! A 404 has no graph at all.

mod clean;
pub mod graphs;
mod registry;

pub use clean::{NULLABLE, drop_dangling_refs, parse_graphs};
pub use registry::{GraphFn, GraphRegistry, family};

use serde_json::{Map, Value, json};

use crate::context::{PageType, Subject};
use crate::data::Post;
use crate::log;
use crate::request::Request;

pub type Node = Map<String, Value>;

/// One entry of the graph list: a type name to build, or a finished node.
#[derive(Debug, Clone, PartialEq)]
pub enum Graph {
    Named(String),
    Prebuilt(Node),
}

impl Graph {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Prebuilt(_) => None,
        }
    }
}

/// A host edit of the loaded graph list.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEdit {
    /// Insert at `position`, or append when `None` (or out of range).
    Insert { graph: Graph, position: Option<usize> },
    /// Remove every entry with this type name.
    Remove(String),
}

impl GraphEdit {
    pub fn insert(name: &str) -> Self {
        Self::Insert {
            graph: Graph::Named(name.to_owned()),
            position: None,
        }
    }

    pub fn insert_at(name: &str, position: usize) -> Self {
        Self::Insert {
            graph: Graph::Named(name.to_owned()),
            position: Some(position),
        }
    }

    pub fn node(node: Node) -> Self {
        Self::Insert {
            graph: Graph::Prebuilt(node),
            position: None,
        }
    }

    pub fn remove(name: &str) -> Self {
        Self::Remove(name.to_owned())
    }

    fn apply(&self, graphs: &mut Vec<Graph>) {
        match self {
            Self::Insert { graph, position } => {
                let at = position.unwrap_or(graphs.len()).min(graphs.len());
                graphs.insert(at, graph.clone());
            }
            Self::Remove(name) => graphs.retain(|g| g.name() != Some(name.as_str())),
        }
    }
}

/// The cleaned graph of one request.
#[derive(Debug, Clone, Default)]
pub struct GraphDocument {
    nodes: Vec<Node>,
    pretty: bool,
}

impl GraphDocument {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node whose `@type` is (or contains) `type_name`.
    pub fn find(&self, type_name: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| match node.get("@type") {
            Some(Value::String(t)) => t == type_name,
            Some(Value::Array(types)) => types.iter().any(|t| t == type_name),
            _ => false,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "@context": "https://schema.org",
            "@graph": self.nodes,
        })
    }

    /// The JSON-LD document; pretty-printed in debug mode.
    pub fn export(&self) -> String {
        let value = self.to_value();
        let out = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        out.unwrap_or_default()
    }

    /// `<script type="application/ld+json">`, empty without nodes.
    pub fn script(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!(
            "<script type=\"application/ld+json\">{}</script>",
            self.export().replace("</", "<\\/")
        )
    }
}

/// Graph type names for the current page, before host edits.
pub fn load_graphs(req: &Request<'_>) -> Vec<String> {
    let page = req.page;
    if page.is(PageType::NotFound) {
        return Vec::new();
    }

    let mut graphs = Vec::new();
    if page.front_page && req.config.schema.organization.is_some() {
        graphs.push("Organization".to_owned());
    }
    graphs.push("WebSite".to_owned());
    graphs.extend(primary(req));
    graphs.push("BreadcrumbList".to_owned());
    graphs
}

fn primary(req: &Request<'_>) -> Vec<String> {
    let schema = &req.config.schema;
    let names: Vec<&str> = match (req.page.page_type, req.subject()) {
        (PageType::Post, Some(Subject::Post(post))) => return singular(req, post),
        (PageType::PostArchive, Some(Subject::PostType(post_type))) => {
            let listing = schema
                .post_type_graph(&post_type.name)
                .filter(|name| schema.is_listing(&post_type.name) && family(name) != Some("Article"));
            vec![listing.unwrap_or("CollectionPage")]
        }
        (PageType::Home | PageType::PostArchive | PageType::Term | PageType::Date, _) => {
            vec!["CollectionPage"]
        }
        (PageType::User, _) => vec!["ProfilePage", "Person"],
        (PageType::Search, _) => vec!["SearchResultsPage"],
        _ => vec!["WebPage"],
    };
    names.into_iter().map(str::to_owned).collect()
}

/// Per-post override, per-post-type default, then `Article` / `WebPage`.
/// The resolved type is the only primary node; authors are embedded in it.
fn singular(req: &Request<'_>, post: &Post) -> Vec<String> {
    let name = post
        .meta("seo_schema")
        .or_else(|| req.config.schema.post_type_graph(&post.post_type))
        .unwrap_or(if post.post_type == "post" { "Article" } else { "WebPage" });
    vec![name.to_owned()]
}

pub(crate) fn build(req: &Request<'_>) -> GraphDocument {
    let schema = &req.config.schema;
    if !schema.enable {
        return GraphDocument::default();
    }

    let mut graphs: Vec<Graph> = load_graphs(req).into_iter().map(Graph::Named).collect();
    for edit in req.graph_edits() {
        edit.apply(&mut graphs);
    }

    let registry = req.graph_registry();
    let built = graphs
        .into_iter()
        .filter_map(|graph| match graph {
            Graph::Named(name) => registry.build(req, &name),
            Graph::Prebuilt(node) => Some(node),
        })
        .collect();
    let mut nodes = parse_graphs(built);
    drop_dangling_refs(&mut nodes);

    log!("schema"; "{} nodes for `{}`", nodes.len(), req.page.page_type.as_str());
    GraphDocument {
        nodes,
        pretty: schema.debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ContentProvider, PostType};
    use crate::request::fixture::{CONFIG, Fixture};

    fn types(doc: &GraphDocument) -> Vec<String> {
        doc.nodes()
            .iter()
            .map(|node| node["@type"].as_str().unwrap_or_default().to_owned())
            .collect()
    }

    #[test]
    fn test_load_graphs_per_page_type() {
        let fx = Fixture::new();
        let load = |request: &str| {
            let page = fx.page(request);
            load_graphs(&fx.request(&page))
        };

        assert_eq!(
            load("page_type = \"home\""),
            ["Organization", "WebSite", "CollectionPage", "BreadcrumbList"]
        );
        assert_eq!(
            load("page_type = \"post\"\nobject = 2"),
            ["WebSite", "CollectionPage", "BreadcrumbList"]
        );
        assert_eq!(
            load("page_type = \"post\"\nobject = 10"),
            ["WebSite", "Article", "BreadcrumbList"]
        );
        assert_eq!(
            load("page_type = \"post\"\nobject = 3"),
            ["WebSite", "WebPage", "BreadcrumbList"]
        );
        assert_eq!(
            load("page_type = \"user\"\nobject = 1"),
            ["WebSite", "ProfilePage", "Person", "BreadcrumbList"]
        );
        assert_eq!(
            load("page_type = \"search\"\nsearch = \"ice\""),
            ["WebSite", "SearchResultsPage", "BreadcrumbList"]
        );
        assert!(load("page_type = \"404\"").is_empty());
        assert!(load("page_type = \"post\"\nobject = 999").is_empty());
    }

    #[test]
    fn test_post_type_default_graph() {
        let fx = Fixture::with_config(&format!(
            "{CONFIG}\n[schema.post_types]\npage = \"AboutPage\"\npost = \"BlogPosting\"\n"
        ));
        let page = fx.page("page_type = \"post\"\nobject = 3");
        assert_eq!(load_graphs(&fx.request(&page)), ["WebSite", "AboutPage", "BreadcrumbList"]);

        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);
        assert_eq!(types(req.schema()), ["WebSite", "BlogPosting", "BreadcrumbList"]);
    }

    #[test]
    fn test_news_article_end_to_end() {
        let mut fx = Fixture::new();
        let mut post = fx.store.post(10).unwrap().clone();
        post.meta.insert("seo_schema".into(), "NewsArticle".into());
        fx.store.insert_post(post);

        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);
        let doc = req.schema();

        let articles: Vec<&Node> = doc
            .nodes()
            .iter()
            .filter(|node| node["@type"] == "NewsArticle")
            .collect();
        assert_eq!(articles.len(), 1);
        let article = articles[0];
        assert_eq!(article["articleSection"], json!(["Water", "Nature"]));
        assert_eq!(article["headline"], "Rivers in Spring");

        let crumbs: Vec<&str> = doc.find("BreadcrumbList").unwrap()["itemListElement"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|item| item["name"].as_str())
            .collect();
        assert_eq!(crumbs, ["Home", "Journal", "Nature", "Water", "Rivers in Spring"]);
    }

    #[test]
    fn test_not_found_has_no_graph() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"404\"\nyear = 2024");
        let req = fx.request(&page);

        assert!(req.schema().is_empty());
        assert_eq!(req.schema().script(), "");
        assert!(!req.breadcrumb().export().is_empty());
    }

    #[test]
    fn test_graph_edits() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let mut req = fx.request(&page);

        req.edit_graphs(GraphEdit::remove("BreadcrumbList"));
        req.edit_graphs(GraphEdit::insert_at("Organization", 0));
        req.edit_graphs(GraphEdit::node(
            graphs::into_node(json!({ "@type": ["Event"], "@id": "https://notes.test/#event", "name": "Thaw" }))
                .unwrap(),
        ));

        let doc = req.schema();
        assert_eq!(types(doc), ["Organization", "WebSite", "Article", "Event"]);
        assert_eq!(
            doc.find("Article").unwrap()["publisher"]["@id"],
            "https://notes.test/#organization"
        );
    }

    #[test]
    fn test_publisher_only_with_organization_node() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let req = fx.request(&page);
        let doc = req.schema();
        assert!(!doc.find("WebSite").unwrap().contains_key("publisher"));
        assert!(!doc.find("Article").unwrap().contains_key("publisher"));

        let page = fx.page("page_type = \"home\"");
        let req = fx.request(&page);
        assert_eq!(
            req.schema().find("WebSite").unwrap()["publisher"]["@id"],
            "https://notes.test/#organization"
        );
    }

    fn with_listing_type(extra_config: &str) -> Fixture {
        let mut fx = Fixture::with_config(&format!("{CONFIG}\n{extra_config}"));
        fx.store.insert_post_type(PostType {
            name: "property".into(),
            label: "Properties".into(),
            has_archive: true,
            ..PostType::default()
        });
        fx.store.insert_post(Post {
            id: 80,
            post_type: "property".into(),
            title: "Harbour Loft".into(),
            date: "2024-05-01T09:00:00".into(),
            ..Post::default()
        });
        fx.store.resolve_permalinks("https://notes.test/");
        fx
    }

    #[test]
    fn test_listing_post_type_single() {
        let fx = with_listing_type("[schema.post_types]\nproperty = \"RealEstateListing\"\n");
        let page = fx.page("page_type = \"post\"\nobject = 80");
        let req = fx.request(&page);
        assert_eq!(load_graphs(&req), ["WebSite", "RealEstateListing", "BreadcrumbList"]);

        let doc = req.schema();
        let listing = doc.find("RealEstateListing").unwrap();
        assert_eq!(listing["name"], "Harbour Loft | Field Notes");
        assert_eq!(listing["datePosted"], "2024-05-01T09:00:00+00:00");
        assert!(doc.find("WebPage").is_none());
    }

    #[test]
    fn test_listing_post_type_archive() {
        let fx = with_listing_type(
            "[schema]\nlisting_post_types = [\"property\"]\n[schema.post_types]\nproperty = \"RealEstateListing\"\n",
        );
        let page = fx.page("page_type = \"post_archive\"\npost_type = \"property\"\nlisted = [80]");
        let req = fx.request(&page);
        assert_eq!(load_graphs(&req), ["WebSite", "RealEstateListing", "BreadcrumbList"]);
        let listing = req.schema().find("RealEstateListing").unwrap();
        assert_eq!(listing["mainEntity"]["itemListElement"][0]["name"], "Harbour Loft");

        // not flagged as a listing: plain collection
        let fx = with_listing_type("[schema.post_types]\nproperty = \"RealEstateListing\"\n");
        let page = fx.page("page_type = \"post_archive\"\npost_type = \"property\"");
        assert_eq!(load_graphs(&fx.request(&page)), ["WebSite", "CollectionPage", "BreadcrumbList"]);

        // article types never stand in for an archive
        let fx = with_listing_type(
            "[schema]\nlisting_post_types = [\"property\"]\n[schema.post_types]\nproperty = \"NewsArticle\"\n",
        );
        let page = fx.page("page_type = \"post_archive\"\npost_type = \"property\"");
        assert_eq!(load_graphs(&fx.request(&page)), ["WebSite", "CollectionPage", "BreadcrumbList"]);
    }

    #[test]
    fn test_unknown_graph_dropped() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"post\"\nobject = 10");
        let mut req = fx.request(&page);
        req.edit_graphs(GraphEdit::insert("Recipe"));
        assert!(req.schema().find("Recipe").is_none());
    }

    #[test]
    fn test_export_and_script() {
        let fx = Fixture::new();
        let page = fx.page("page_type = \"home\"");
        let req = fx.request(&page);
        let doc = req.schema();

        let value: Value = serde_json::from_str(&doc.export()).unwrap();
        assert_eq!(value["@context"], "https://schema.org");
        assert_eq!(value["@graph"].as_array().unwrap().len(), 4);
        assert!(!doc.export().contains('\n'));
        assert!(doc.script().starts_with("<script type=\"application/ld+json\">{"));

        let fx = Fixture::with_config(&format!("{CONFIG}\n[schema]\ndebug = true\n"));
        let req = fx.request(&page);
        assert!(req.schema().export().contains("\n  \"@graph\""));
    }

    #[test]
    fn test_disabled() {
        let fx = Fixture::with_config(&format!("{CONFIG}\n[schema]\nenable = false\n"));
        let page = fx.page("page_type = \"home\"");
        assert!(fx.request(&page).schema().is_empty());
    }
}
