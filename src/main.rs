//! Site-Seed main entry point
//!
//! This is the command-line interface for the Site-Seed profile crawler.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use site_seed::config::{load_config_with_hash, Config};
use site_seed::output::{format_page_list, print_status_report};
use site_seed::CrawlService;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Seed: bootstrap a profile from a personal website
///
/// Site-Seed fetches a homepage, extracts its metadata and text, and walks a
/// bounded set of same-site pages, storing everything in a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "site-seed")]
#[command(version)]
#[command(about = "Bounded website crawler for profile bootstrapping", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and print the effective settings without touching the database
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a website for a user
    Submit {
        #[arg(value_name = "USER")]
        user: String,
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Crawl a website and wait for the crawl to finish
    Crawl {
        #[arg(value_name = "WEBSITE_ID")]
        website_id: i64,
    },

    /// Show a website's crawl status and page counts
    Status {
        #[arg(value_name = "WEBSITE_ID")]
        website_id: i64,
    },

    /// List a website's pages
    Pages {
        #[arg(value_name = "WEBSITE_ID")]
        website_id: i64,
    },

    /// Fetch a single page again
    Refetch {
        #[arg(value_name = "PAGE_ID")]
        page_id: i64,
    },

    /// Hide a page from listings and statistics
    DeletePage {
        #[arg(value_name = "PAGE_ID")]
        page_id: i64,
        #[arg(value_name = "ACTOR")]
        actor: String,
    },

    /// Check whether a user has a completed website
    Onboarding {
        #[arg(value_name = "USER")]
        user: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("No command given; run with --help to see the available commands");
    };

    let service = CrawlService::new(&config).context("Failed to initialize crawl service")?;
    handle_command(&service, command).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_seed=info,warn"),
            1 => EnvFilter::new("site_seed=debug,info"),
            2 => EnvFilter::new("site_seed=trace,debug"),
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

/// Handles the --dry-run mode: prints the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Site-Seed Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages per crawl: {}", config.crawler.max_pages);
    println!(
        "  Politeness delay: {}ms",
        config.crawler.politeness_delay_ms
    );
    println!(
        "  Seed fetch: {}s timeout, {} redirects",
        config.crawler.seed_timeout_secs, config.crawler.seed_max_redirects
    );
    println!(
        "  Page fetch: {}s timeout, {} redirects",
        config.crawler.page_timeout_secs, config.crawler.page_max_redirects
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
}

async fn handle_command(service: &CrawlService, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Submit { user, url } => {
            let website = service
                .submit_seed(&user, &url)
                .with_context(|| format!("Could not submit {}", url))?;
            println!(
                "Website {} created for {}: {}{}",
                website.id,
                website.user_id,
                website.url,
                if website.is_primary { " (primary)" } else { "" }
            );
        }

        Command::Crawl { website_id } => {
            let summary = service.run_crawl(website_id).await?;
            println!(
                "Crawl {}: {} pages found, {} scraped (seed included), {} failed",
                summary.status, summary.pages_found, summary.pages_scraped, summary.pages_failed
            );
            print_status_report(&service.get_status(website_id)?);
        }

        Command::Status { website_id } => {
            print_status_report(&service.get_status(website_id)?);
        }

        Command::Pages { website_id } => {
            print!("{}", format_page_list(&service.list_pages(website_id)?));
        }

        Command::Refetch { page_id } => {
            let page = service.refetch_page(page_id).await?;
            println!("Page {} is now {}: {}", page.id, page.status, page.url);
            if let Some(error) = page.error_message {
                println!("  Error: {}", error);
            }
        }

        Command::DeletePage { page_id, actor } => {
            let page = service.soft_delete_page(page_id, &actor)?;
            println!("Page {} deleted: {}", page.id, page.url);
        }

        Command::Onboarding { user } => {
            if service.can_finalize_onboarding(&user)? {
                println!("✓ {} has a completed website", user);
            } else {
                println!("✗ {} has no completed website yet", user);
            }
        }
    }

    Ok(())
}
