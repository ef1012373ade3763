//! Administration CLI for linkgate.
//!
//! Inspects and deletes links and runs maintenance directly against the
//! PostgreSQL store, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show one link
//! cargo run --bin linkgate-admin -- link show Ab12Cd
//!
//! # Delete a link (asks for confirmation)
//! cargo run --bin linkgate-admin -- link delete Ab12Cd
//!
//! # Delete every expired or used-up link
//! cargo run --bin linkgate-admin -- purge
//!
//! # Generate a value for ADMIN_TOKEN
//! cargo run --bin linkgate-admin -- token generate
//!
//! # Check database connection
//! cargo run --bin linkgate-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`
//!   (required except for `token generate`)

use linkgate::config::{Config, mask_connection_string};
use linkgate::domain::entities::ShortLink;
use linkgate::domain::repositories::LinkRepository;
use linkgate::infrastructure::persistence::PgLinkRepository;
use linkgate::utils::validation::is_valid_code;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkgate.
#[derive(Parser)]
#[command(name = "linkgate-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect or delete links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Delete every expired or used-up link
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Admin token helpers
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show a link and its counters
    Show { code: String },

    /// Delete a link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Print a random token to use as ADMIN_TOKEN
    Generate,
}

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

    match cli.command {
        Commands::Token {
            action: TokenAction::Generate,
        } => generate_admin_token(),
        Commands::Link { action } => handle_link_action(action, &connect().await?).await?,
        Commands::Purge { yes } => purge(&connect().await?, yes).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?
        .context("DATABASE_URL (or DB_HOST, DB_USER and DB_NAME) must be set")?;

    PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })
}

fn repository(pool: &PgPool) -> PgLinkRepository {
    PgLinkRepository::new(Arc::new(pool.clone()))
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = repository(pool);

    match action {
        LinkAction::Show { code } => {
            ensure_code(&code)?;
            let link = find_link(&repo, &code).await?;
            print_link(&link);
        }
        LinkAction::Delete { code, yes } => {
            ensure_code(&code)?;
            let link = find_link(&repo, &code).await?;
            print_link(&link);

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this link?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            repo.delete(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

            println!("{}", "Link deleted".green().bold());
        }
    }

    Ok(())
}

fn ensure_code(code: &str) -> Result<()> {
    if !is_valid_code(code) {
        anyhow::bail!("Invalid code '{}': expected 6 alphanumeric characters", code);
    }
    Ok(())
}

async fn find_link(repo: &PgLinkRepository, code: &str) -> Result<ShortLink> {
    repo.find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Link '{}' not found", code))
}

/// Prints one link.
///
/// ```text
/// Link Ab12Cd
///
///   Destination: https://example.com/landing
///   Created:     2025-01-15 10:30 UTC
///   Expires:     never
///   Clicks:      3 / 10
///   Password:    no
///   State:       active
/// ```
fn print_link(link: &ShortLink) {
    println!("{} {}", "Link".bright_blue().bold(), link.code.cyan().bold());
    println!();
    println!("  Destination: {}", link.destination.bright_white());
    println!(
        "  Created:     {}",
        link.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  Expires:     {}",
        link.expires_at
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "never".to_string())
    );
    println!(
        "  Clicks:      {}",
        match link.max_clicks {
            Some(max) => format!("{} / {}", link.click_count, max),
            None => link.click_count.to_string(),
        }
    );
    println!(
        "  Password:    {}",
        if link.has_password() { "yes" } else { "no" }
    );

    let state = if link.is_expired() {
        "expired".red()
    } else if link.is_maxed_out() {
        "used up".red()
    } else {
        "active".green()
    };
    println!("  State:       {}", state);
    println!();
}

/// Deletes every stale link. Running it twice in a row removes nothing the
/// second time.
async fn purge(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "Purge stale links".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all expired and used-up links?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let removed = repository(pool)
        .delete_stale(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge links: {}", e))?;

    println!(
        "  Removed: {}",
        removed.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

fn generate_admin_token() {
    let token = generate_token();

    println!("{}", token.bright_yellow().bold());
    println!();
    println!("{}", "Add this to the server environment:".bright_white());
    println!("  {}={}", "ADMIN_TOKEN".bright_cyan(), token);
    println!();
    println!("{}", "Then authenticate admin requests with:".bright_white());
    println!(
        "  curl -X DELETE -H \"Authorization: Bearer {}\" http://localhost:3000/api/links/Ab12Cd",
        token
    );
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            repository(pool)
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;
            let stale: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM links
                 WHERE (expires_at IS NOT NULL AND expires_at < NOW())
                    OR (max_clicks IS NOT NULL AND click_count >= max_clicks)",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL:  {}", version.bright_white());
            println!("  Links:       {}", links.to_string().bright_green().bold());
            println!("  Stale links: {}", stale.to_string().bright_yellow());
            println!();
        }
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
