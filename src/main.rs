//! pagemeta - drive one request through the metadata engine from the shell.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use pagemeta::{
    ContentStore, MemoryCache, PageRequest, Presentation, Presenter, Request, SiteConfig, log,
    logger,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    let config = load_config(&cli.config)?;

    let Some(page_path) = cli.command.page() else {
        if let Commands::Config { path } = &cli.command {
            print_config(&config, path.as_deref())?;
        }
        return Ok(());
    };

    let store = load_content(&expand(&cli.content), &config)?;
    let page_request: PageRequest = {
        let path = expand(page_path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read request fixture {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("invalid request fixture {}", path.display()))?
    };

    let page = page_request.resolve(&config, &store);
    let cache = MemoryCache::new();
    let request = Request::new(&config, &page, &store, &cache);

    match &cli.command {
        Commands::Head { .. } => match Presenter::new(&request).present() {
            Presentation::Redirect { url, status } => println!("{status} {url}"),
            Presentation::Head(head) => {
                println!("<title>{}</title>", request.generator().title());
                println!("{head}");
            }
        },
        Commands::Breadcrumb { .. } => println!("{}", request.breadcrumb().html()),
        Commands::Schema { pretty, .. } => {
            let doc = request.schema();
            if *pretty {
                println!("{}", serde_json::to_string_pretty(&doc.to_value())?);
            } else {
                println!("{}", doc.export());
            }
        }
        Commands::Title { .. } => println!("{}", request.generator().title()),
        Commands::Config { .. } => {}
    }
    Ok(())
}

/// `~`-expanded path.
fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Load and validate the site config; defaults when the file is missing.
fn load_config(path: &Path) -> Result<SiteConfig> {
    let path = expand(path);
    let config = if path.exists() {
        SiteConfig::from_path(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?
    } else {
        log!("config"; "{} not found, using defaults", path.display());
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Load the content fixture and compute its permalinks.
fn load_content(path: &Path, config: &SiteConfig) -> Result<ContentStore> {
    let mut store = if path.exists() {
        ContentStore::from_path(path)
            .with_context(|| format!("failed to load content {}", path.display()))?
    } else {
        log!("content"; "{} not found, starting from an empty store", path.display());
        ContentStore::new()
    };
    store.resolve_permalinks(&config.base.home_url());
    log!("content"; "{} entities loaded", store.len());
    Ok(store)
}

fn print_config(config: &SiteConfig, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => match config.get(path, toml::Value::String(String::new())) {
            toml::Value::String(s) => println!("{s}"),
            value => println!("{value}"),
        },
        None => print!("{}", toml::to_string_pretty(config).context("failed to serialize config")?),
    }
    Ok(())
}
