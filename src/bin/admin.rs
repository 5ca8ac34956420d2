//! CLI administration tool for snaplink.
//!
//! Manages links and inspects the database directly, without going through
//! the HTTP API. Talks to the same PostgreSQL store as the server.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Show one link with its click count
//! cargo run --bin admin -- links show docs2024
//!
//! # Create a link with a custom code
//! cargo run --bin admin -- links create https://example.com/docs --code docs2024
//!
//! # Delete a link without prompting
//! cargo run --bin admin -- links delete docs2024 -y
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `BASE_URL`: prefix used when printing short URLs

use snaplink::application::services::{LinkService, RedirectService};
use snaplink::config::Config;
use snaplink::domain::entities::Link;
use snaplink::infrastructure::cache::NullCache;
use snaplink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link and its click statistics
    Show {
        /// Short code
        code: String,
    },

    /// Create a short link
    Create {
        /// Target URL (http or https)
        url: String,

        /// Custom 6-8 character alphanumeric code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a link permanently
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// Services wired against PostgreSQL with caching disabled.
struct Admin {
    links: LinkService<PgLinkRepository>,
    stats: RedirectService<PgLinkRepository>,
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let repository = PgLinkRepository::connect(&database_url, &config)
        .await
        .context("Failed to connect to database")?;
    let pool = repository.pool().clone();
    let repository = Arc::new(repository);

    let admin = Admin {
        links: LinkService::new(repository.clone(), Arc::new(NullCache::new())),
        stats: RedirectService::new(repository, Arc::new(NullCache::new())),
        base_url: config.base_url.clone(),
    };

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &admin).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, admin: &Admin) -> Result<()> {
    match action {
        LinkAction::List => list_links(admin).await,
        LinkAction::Show { code } => show_link(admin, &code).await,
        LinkAction::Create { url, code } => create_link(admin, url, code).await,
        LinkAction::Delete { code, yes } => delete_link(admin, &code, yes).await,
    }
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code      Clicks  Created           Target
///   ────────────────────────────────────────────────────────────
///   docs2024  12      2025-01-15 10:30  https://example.com/docs
/// ```
async fn list_links(admin: &Admin) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = admin
        .links
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<7} {:<17} {}",
            link.code.cyan(),
            link.total_clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        links.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_link(admin: &Admin, code: &str) -> Result<()> {
    let link = admin
        .stats
        .get_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", code, e))?;

    print_link(&link, &admin.base_url);
    Ok(())
}

async fn create_link(admin: &Admin, url: String, code: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let link = admin
        .links
        .create_link(url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    print_link(&link, &admin.base_url);

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(admin: &Admin, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = admin
        .stats
        .get_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", code, e))?;

    print_link(&link, &admin.base_url);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? Its click count is lost.")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    admin
        .links
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted successfully!".green().bold());
    println!();

    Ok(())
}

fn print_link(link: &Link, base_url: &str) {
    let last_clicked = link
        .last_clicked_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:         {}", link.code.cyan().bold());
    println!(
        "  Short URL:    {}",
        format!("{}/{}", base_url, link.code).bright_yellow()
    );
    println!("  Target:       {}", link.target_url);
    println!(
        "  Clicks:       {}",
        link.total_clicks.to_string().bright_green().bold()
    );
    println!("  Last clicked: {}", last_clicked.bright_black());
    println!(
        "  Created:      {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Displays link and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(total_clicks), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    let clicked_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE total_clicks > 0")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Ever clicked:  {}",
        clicked_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
