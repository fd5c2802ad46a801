//! Command-line interface for newsroom.
//!
//! A thin presentation layer over the gateway and listing projections:
//! paged listings, the latest-posts digest, category lookups and detail
//! pages, printed as text or JSON.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{self, GatewayConfig};
use crate::core::{
    digest, html_to_text, resolve_detail, table_of_contents, DetailView, Gateway, Heading,
    HeadingLevel, ListingState, PageLink, ALL_CATEGORIES, CATEGORY_FILTERS,
};
use crate::domain::{ContentItem, FetchOutcome};

/// newsroom - Browse a headless-CMS blog from the terminal
#[derive(Parser, Debug)]
#[command(name = "newsroom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Content repository REST base (e.g. https://example.com/wp-json/wp/v2)
    #[arg(long, global = true, env = config::ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of the listing
    List {
        /// Category filter key ("all" for everything)
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Page number (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Items per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show the latest posts digest
    Latest {
        /// Category filter key ("all" for everything)
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Number of posts (defaults to the configured digest size)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Fetch a category directly from the repository
    Category {
        /// Category slug
        key: String,
    },

    /// Show a post with its table of contents and recent posts
    Show {
        /// Post slug
        slug: String,
    },

    /// List the category filters
    Categories,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let base_url = self.base_url.as_deref();
        match self.command {
            Commands::List {
                category,
                page,
                page_size,
            } => {
                let (config, gateway) = connect(base_url)?;
                list_page(&gateway, &config, &category, page, page_size, self.json).await
            }
            Commands::Latest { category, count } => {
                let (config, gateway) = connect(base_url)?;
                let count = count.unwrap_or(config.digest_size);
                show_latest(&gateway, &category, count, self.json).await
            }
            Commands::Category { key } => {
                let (_, gateway) = connect(base_url)?;
                show_category(&gateway, &key, self.json).await
            }
            Commands::Show { slug } => {
                let (config, gateway) = connect(base_url)?;
                show_detail(&gateway, &config, &slug, self.json).await
            }
            Commands::Categories => list_categories(self.json),
            Commands::Config => {
                let config = config::load_config(base_url)?;
                show_config(&config)
            }
        }
    }
}

/// Resolve configuration and build a WordPress-backed gateway
fn connect(base_url: Option<&str>) -> Result<(GatewayConfig, Gateway)> {
    let config = config::load_config(base_url).context("Failed to load configuration")?;
    let gateway = Gateway::wordpress(&config);
    Ok((config, gateway))
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    category: &'a str,
    page: usize,
    total_pages: usize,
    page_links: &'a [PageLink],
    items: Vec<&'a ContentItem>,
}

/// Fetch the listing collection, reporting failures instead of hiding them
async fn load_items(gateway: &Gateway) -> Result<Vec<ContentItem>> {
    match gateway.try_fetch_all().await {
        FetchOutcome::Loaded(items) => Ok(items),
        FetchOutcome::Empty => Ok(Vec::new()),
        FetchOutcome::Failed(e) => {
            Err(e).with_context(|| format!("Failed to fetch posts from {}", gateway.source_name()))
        }
    }
}

/// Print one listing page
async fn list_page(
    gateway: &Gateway,
    config: &GatewayConfig,
    category: &str,
    page: usize,
    page_size: Option<usize>,
    json: bool,
) -> Result<()> {
    let items = load_items(gateway).await?;

    let mut state = ListingState::new(page_size.unwrap_or(config.page_size));
    state.set_category(category);
    state.go_to(page, &items);
    let view = state.view(&items);

    if json {
        let output = ListingOutput {
            category: &view.category,
            page: view.page,
            total_pages: view.total_pages,
            page_links: &view.page_links,
            items: view.items,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if view.items.is_empty() {
        println!("No posts found in this category.");
        return Ok(());
    }

    print_items(&view.items);
    println!(
        "\nPage {} of {}{}{}",
        view.page,
        view.total_pages,
        if view.has_previous { "  [prev]" } else { "" },
        if view.has_next { "  [next]" } else { "" },
    );
    println!("{}", format_page_links(&view.page_links, view.page));

    Ok(())
}

/// Pagination bar with the current page bracketed, e.g. `1 ... 4 [5] 6 ... 10`
fn format_page_links(links: &[PageLink], current: usize) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Number(n) if *n == current => format!("[{}]", n),
            PageLink::Number(n) => n.to_string(),
            PageLink::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print the latest-posts digest
async fn show_latest(gateway: &Gateway, category: &str, count: usize, json: bool) -> Result<()> {
    let items = load_items(gateway).await?;
    let latest = digest(&items, category, count);

    if json {
        println!("{}", serde_json::to_string_pretty(&latest)?);
    } else if latest.is_empty() {
        println!("No posts found in this category.");
    } else {
        print_items(&latest);
    }

    Ok(())
}

/// Print a category fetched through the taxonomy lookup
async fn show_category(gateway: &Gateway, key: &str, json: bool) -> Result<()> {
    let items = match gateway.try_fetch_by_category(key).await {
        FetchOutcome::Loaded(items) => items,
        FetchOutcome::Empty => Vec::new(),
        FetchOutcome::Failed(e) => {
            return Err(e).with_context(|| format!("Failed to fetch category '{}'", key))
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No posts found in category '{}'", key);
    } else {
        print_items(&items.iter().collect::<Vec<_>>());
    }

    Ok(())
}

#[derive(Serialize)]
struct DetailOutput<'a> {
    item: Option<&'a ContentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    table_of_contents: Vec<Heading>,
    recent: &'a [ContentItem],
}

/// Print a detail page
async fn show_detail(
    gateway: &Gateway,
    config: &GatewayConfig,
    slug: &str,
    json: bool,
) -> Result<()> {
    let view = resolve_detail(gateway, slug, config.recent_limit).await;
    write_detail(&mut io::stdout().lock(), &view, slug, json)
}

/// Render a detail page to `out`
///
/// The recent-posts sidebar is written even when the post itself is missing
/// or failed to load; that state is reported in the output and then returned
/// as the error.
pub fn write_detail<W: Write>(
    out: &mut W,
    view: &DetailView,
    slug: &str,
    json: bool,
) -> Result<()> {
    let status = match &view.item {
        FetchOutcome::Loaded(_) => None,
        FetchOutcome::Empty => Some(format!("Post '{}' not found", slug)),
        FetchOutcome::Failed(e) => Some(format!("Failed to fetch post '{}': {}", slug, e)),
    };

    if json {
        let output = DetailOutput {
            item: view.item.as_loaded(),
            error: status.clone(),
            table_of_contents: view.table_of_contents(),
            recent: &view.recent,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        match &view.item {
            FetchOutcome::Loaded(item) => write_item(out, item)?,
            _ => writeln!(out, "{}", status.as_deref().unwrap_or_default())?,
        }

        if !view.recent.is_empty() {
            writeln!(out, "\nRecent posts:")?;
            for recent in &view.recent {
                writeln!(out, "  {:<14} {}", recent.short_date(), recent.title)?;
            }
        }
    }

    match &view.item {
        FetchOutcome::Loaded(_) => Ok(()),
        FetchOutcome::Empty => anyhow::bail!("Post '{}' not found", slug),
        FetchOutcome::Failed(e) => {
            Err(e.clone()).with_context(|| format!("Failed to fetch post '{}'", slug))
        }
    }
}

/// Title, byline, contents and body of one post
fn write_item<W: Write>(out: &mut W, item: &ContentItem) -> io::Result<()> {
    writeln!(out, "{}", item.title)?;
    writeln!(out, "{} | {} | {}", item.long_date(), item.author, item.category_label)?;
    if let Some(ref image) = item.image_url {
        writeln!(out, "Image: {}", image)?;
    }

    let toc = table_of_contents(&item.body);
    if !toc.is_empty() {
        writeln!(out, "\nContents:")?;
        for heading in &toc {
            let indent = match heading.level {
                HeadingLevel::H2 => "  ",
                HeadingLevel::H3 => "    ",
            };
            writeln!(out, "{}{} (#{})", indent, heading.text, heading.anchor)?;
        }
    }

    writeln!(out, "\n{}", html_to_text(&item.body))
}

/// Print the category filter bar
fn list_categories(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(CATEGORY_FILTERS)?);
        return Ok(());
    }

    for filter in CATEGORY_FILTERS {
        println!("{:<10} {}", filter.key, filter.label);
    }
    Ok(())
}

/// Show resolved configuration
fn show_config(config: &GatewayConfig) -> Result<()> {
    println!("Base URL:       {}", config.base_url);
    println!("Batch size:     {}", config.per_page);
    println!("Timeout:        {}s", config.timeout_seconds);
    println!("Excerpt budget: {}", config.excerpt_chars);
    println!("Default author: {}", config.default_author);
    println!("Page size:      {}", config.page_size);
    println!("Digest size:    {}", config.digest_size);
    println!("Recent limit:   {}", config.recent_limit);
    Ok(())
}

/// Print items as a table
fn print_items(items: &[&ContentItem]) {
    println!("{:<14} {:<16} {:<40} {}", "DATE", "CATEGORY", "SLUG", "TITLE");
    println!("{}", "-".repeat(100));

    for item in items {
        println!(
            "{:<14} {:<16} {:<40} {}",
            item.short_date(),
            item.category_label,
            item.slug,
            item.title
        );
        if !item.excerpt.is_empty() {
            println!("{:<14} {}", "", item.excerpt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["newsroom", "list"]).unwrap();
        match cli.command {
            Commands::List {
                category,
                page,
                page_size,
            } => {
                assert_eq!(category, "all");
                assert_eq!(page, 1);
                assert_eq!(page_size, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_format_page_links() {
        let links = crate::core::page_numbers(5, 10);
        assert_eq!(format_page_links(&links, 5), "1 ... 4 [5] 6 ... 10");
        assert_eq!(format_page_links(&[PageLink::Number(1)], 1), "[1]");
        assert_eq!(format_page_links(&[], 1), "");
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "newsroom",
            "show",
            "hello-world",
            "--json",
            "--base-url",
            "http://127.0.0.1:8080/wp-json/wp/v2",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(
            cli.base_url.as_deref(),
            Some("http://127.0.0.1:8080/wp-json/wp/v2")
        );
        assert!(matches!(cli.command, Commands::Show { ref slug } if slug == "hello-world"));
    }
}
