//! Changwen main entry point
//!
//! Command-line interface for the blog-category-to-EPUB archiver.

use changwen::config::load_config;
use changwen::run_crawl;
use changwen::Config;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Changwen: archive a blog category as an EPUB
///
/// Crawls one paginated blog category, extracts each article's title and body,
/// and bundles everything into a single EPUB file. Without a config file it
/// archives the built-in default category.
#[derive(Parser, Debug)]
#[command(name = "changwen")]
#[command(version = "1.0.0")]
#[command(about = "Archive a blog category as an EPUB", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (optional; built-in defaults apply)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or fall back to the built-in defaults
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => {
            tracing::info!("No config file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let output_path = run_crawl(config).await?;
    println!("EPUB written to {}", output_path.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("changwen=info,warn"),
            1 => EnvFilter::new("changwen=debug,info"),
            2 => EnvFilter::new("changwen=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Changwen Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Start URL: {}", config.site.start_url);
    println!("  User-Agent: {}", config.site.user_agent);

    println!("\nCrawler:");
    println!("  Page delay: {}ms", config.crawler.page_delay_ms);
    println!("  Article delay: {}ms", config.crawler.article_delay_ms);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nOutput:");
    println!("  EPUB: {}", config.output.epub_path);

    println!("\nBook:");
    println!("  Title: {}", config.book.title);
    println!("  Language: {}", config.book.language);
    println!("  Author: {}", config.book.author);
    println!("  Identifier: {}", config.book.identifier);

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl starting at {}", config.site.start_url);
}
