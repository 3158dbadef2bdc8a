//! CLI administration tool for short-links.
//!
//! Provides commands for managing links, viewing click reports,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # List the latest links containing "example"
//! cargo run --bin admin -- links list --search example --limit 20
//!
//! # Show one link with its latest visitors
//! cargo run --bin admin -- links show zZ73Xa --visitors 10
//!
//! # Protect a link with a password (prompted)
//! cargo run --bin admin -- links set-password zZ73Xa
//!
//! # Remove the password again
//! cargo run --bin admin -- links clear-password zZ73Xa
//!
//! # Delete a link and its click logs
//! cargo run --bin admin -- links delete zZ73Xa
//!
//! # Click report
//! cargo run --bin admin -- report
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection string
//! - `SHORT_CODE_SALT` and friends: must match the server so codes resolve

use short_links::application::services::{LinkService, StatsService};
use short_links::config::Config;
use short_links::domain::entities::ShortLink;
use short_links::domain::repositories::LinkFilter;
use short_links::infrastructure::persistence::{PgClickLogRepository, PgLinkRepository};
use short_links::infrastructure::security::Argon2PasswordHasher;
use short_links::server::connect_database;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use sqlx::PgPool;
use std::sync::Arc;

type PgLinkService = LinkService<PgLinkRepository, PgClickLogRepository>;

/// CLI tool for managing short-links.
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

    /// Show links clicked today and during the last 7 days
    Report,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        /// Case-insensitive substring of the original URL
        #[arg(short, long)]
        search: Option<String>,

        /// Only links created on or after this local date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },

    /// Show one link and its most recent distinct visitors
    Show {
        /// Short code of the link
        code: String,

        /// Maximum number of visitors to show
        #[arg(short, long, default_value_t = 20)]
        visitors: i64,
    },

    /// Set or replace the password of a link
    SetPassword {
        /// Short code of the link
        code: String,

        /// Password (prompted when omitted); blank clears protection
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Remove the password of a link
    ClearPassword {
        /// Short code of the link
        code: String,
    },

    /// Delete a link together with its click logs
    Delete {
        /// Short code of the link
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

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env().context("Invalid configuration")?;
    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &config, &pool).await?,
        Commands::Report => handle_report(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn link_service(config: &Config, pool: &PgPool) -> Result<PgLinkService> {
    let pool = Arc::new(pool.clone());

    Ok(LinkService::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgClickLogRepository::new(pool)),
        Arc::new(config.codec()?),
        Arc::new(Argon2PasswordHasher::new()),
    ))
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let service = link_service(config, pool)?;

    match action {
        LinkAction::List {
            search,
            since,
            limit,
        } => list_links(&service, search, since, limit).await?,
        LinkAction::Show { code, visitors } => show_link(&service, &code, visitors).await?,
        LinkAction::SetPassword { code, password } => {
            set_password(&service, &code, password).await?;
        }
        LinkAction::ClearPassword { code } => {
            set_password(&service, &code, Some(String::new())).await?;
        }
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await?,
    }

    Ok(())
}

/// Lists links with their total and unique click counts.
///
/// # Output Format
///
/// ```text
/// 🔗 Short Links
///
///   Code       Clicks  Unique  Created           Original URL
///   ─────────────────────────────────────────────────────────────────────
///   zZ73Xa     12      4       2025-06-01 10:30  https://example.com
/// ```
async fn list_links(
    service: &PgLinkService,
    search: Option<String>,
    since: Option<NaiveDate>,
    limit: i64,
) -> Result<()> {
    println!("{}", "🔗 Short Links".bright_blue().bold());
    println!();

    let created_since = since.and_then(|date| {
        Local
            .from_local_datetime(&date.and_time(chrono::NaiveTime::MIN))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    });

    let filter = LinkFilter::new(limit.max(1))
        .with_search(search)
        .with_created_since(created_since);

    let links = service
        .list(filter)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<7} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Unique".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let unique = service
            .unique_clicks(link)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to count visitors: {}", e))?;

        println!(
            "  {:<10} {:<7} {:<7} {:<17} {}{}",
            service.short_code(link).cyan(),
            link.clicks.to_string().bright_green(),
            unique.to_string().green(),
            local_time(link.created_at).bright_black(),
            link.original_url,
            status_suffix(link)
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Shows a link with its counters and latest distinct visitors.
///
/// # Output Format
///
/// ```text
/// 🔗 Link zZ73Xa
///
///   URL:     https://example.com
///   Clicks:  12 total, 4 unique
///   Created: 2025-06-01 10:30
///
///   First seen        IP               User agent
///   ─────────────────────────────────────────────────────────────────────
///   2025-06-02 08:12  203.0.113.7      curl/8.5.0
/// ```
async fn show_link(service: &PgLinkService, code: &str, visitors: i64) -> Result<()> {
    let link = service
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let unique = service
        .unique_clicks(&link)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count visitors: {}", e))?;
    let recent = service
        .recent_visitors(&link, visitors)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list visitors: {}", e))?;

    println!("{}", format!("🔗 Link {}", code).bright_blue().bold());
    println!();
    println!("  URL:     {}{}", link.original_url, status_suffix(&link));
    println!(
        "  Clicks:  {} total, {} unique",
        link.clicks.to_string().bright_green(),
        unique.to_string().green()
    );
    println!("  Created: {}", local_time(link.created_at).bright_black());
    if let Some(expiration) = link.expiration {
        println!("  Expires: {}", local_time(expiration).bright_black());
    }
    println!();

    if recent.is_empty() {
        println!("{}", "  No visitors yet".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<17} {:<16} {}",
        "First seen".bright_white().bold(),
        "IP".bright_white().bold(),
        "User agent".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for visitor in &recent {
        println!(
            "  {:<17} {:<16} {}",
            local_time(visitor.clicked_at).bright_black(),
            visitor.ip_address.cyan(),
            visitor.user_agent.as_deref().unwrap_or("-")
        );
    }
    println!();

    Ok(())
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn status_suffix(link: &ShortLink) -> String {
    let mut flags = Vec::new();
    if link.is_protected() {
        flags.push("protected".yellow().to_string());
    }
    if link.is_expired(Utc::now()) {
        flags.push("expired".red().to_string());
    }

    if flags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", flags.join(", "))
    }
}

/// Sets, replaces or clears the password of a link.
///
/// A blank password removes protection.
async fn set_password(service: &PgLinkService, code: &str, password: Option<String>) -> Result<()> {
    println!("{}", "🔒 Link Password".bright_blue().bold());
    println!();

    let raw = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("New password (blank to clear)")
            .allow_empty_password(true)
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    let link = service
        .set_password(code, &raw)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update password: {}", e))?;

    if link.is_protected() {
        println!("{}", "✅ Password set".green().bold());
    } else {
        println!("{}", "✅ Password removed".green().bold());
    }
    println!("  Link: {} → {}", code.cyan(), link.original_url);
    println!();

    Ok(())
}

/// Deletes a link after confirmation.
async fn delete_link(service: &PgLinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = service
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:   {}", code.cyan());
    println!("  URL:    {}", link.original_url);
    println!("  Clicks: {}", link.clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link and its click logs?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Displays the click report.
///
/// Shows:
/// - Links clicked today (server-local date)
/// - Links clicked during the last 7 days
/// - Total number of links
async fn handle_report(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Click Report".bright_blue().bold());
    println!();

    let pool_arc = Arc::new(pool.clone());
    let stats = StatsService::new(Arc::new(PgLinkRepository::new(pool_arc)));

    let report = stats
        .report(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build report: {}", e))?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
        .fetch_one(pool)
        .await?;

    println!(
        "  Clicked today:     {}",
        report.clicks_today.to_string().bright_green().bold()
    );
    println!(
        "  Clicked this week: {}",
        report.clicks_week.to_string().bright_green().bold()
    );
    println!(
        "  Links:             {}",
        links_count.to_string().bright_white()
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
