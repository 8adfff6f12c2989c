//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// pagemeta: head tags, breadcrumbs and schema.org graphs for one request
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file path (default: pagemeta.toml)
    #[arg(short = 'C', long, default_value = "pagemeta.toml")]
    pub config: PathBuf,

    /// Content fixture with posts, terms and users (default: content.toml)
    #[arg(short, long, default_value = "content.toml")]
    pub content: PathBuf,

    /// Log what the generators decide, on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the `<title>`, the head tags and the JSON-LD script
    Head {
        /// Request fixture (page type, queried object, pagination)
        page: PathBuf,
    },

    /// Print the breadcrumb markup
    Breadcrumb {
        /// Request fixture
        page: PathBuf,
    },

    /// Print the JSON-LD document
    Schema {
        /// Request fixture
        page: PathBuf,

        /// Pretty-print regardless of `[schema] debug`
        #[arg(long)]
        pretty: bool,
    },

    /// Print the document title
    Title {
        /// Request fixture
        page: PathBuf,
    },

    /// Print a config value by dotted path, or the whole resolved config
    Config {
        /// e.g. `breadcrumb.separator`
        path: Option<String>,
    },
}

impl Commands {
    /// The request fixture of commands that render a page.
    pub fn page(&self) -> Option<&Path> {
        match self {
            Self::Head { page }
            | Self::Breadcrumb { page }
            | Self::Schema { page, .. }
            | Self::Title { page } => Some(page),
            Self::Config { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema() {
        let cli = Cli::parse_from(["pagemeta", "-C", "~/site.toml", "schema", "page.toml", "--pretty"]);
        assert_eq!(cli.config, PathBuf::from("~/site.toml"));
        assert_eq!(cli.content, PathBuf::from("content.toml"));
        assert!(matches!(cli.command, Commands::Schema { pretty: true, .. }));
        assert_eq!(cli.command.page(), Some(Path::new("page.toml")));
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::parse_from(["pagemeta", "--verbose", "config", "base.url"]);
        assert!(cli.verbose);
        assert!(cli.command.page().is_none());
    }
}
